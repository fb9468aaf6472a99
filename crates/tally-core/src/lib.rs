//! # tally-core: Pure Domain Layer for Tally
//!
//! This crate holds the types and rules every other Tally crate agrees on.
//! It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    tally-api (HTTP)                             │   │
//! │  │          POST /sales ──► maps result to status + body           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-sales (service)                        │   │
//! │  │          SaleValidator ──► SalesService::add_sale               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐                  │   │
//! │  │   │   types   │  │   error   │  │ validation │                  │   │
//! │  │   │  Product  │  │ Validation│  │ body shape │                  │   │
//! │  │   │  Sale     │  │ CoreError │  │  checks    │                  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘                  │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, SaleLine, LineItemRequest)
//! - [`error`] - Domain error types with their status codes
//! - [`validation`] - Request body shape validation
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use tally_core::validation::parse_line_items;
//!
//! let body = json!([{ "productId": 1, "quantity": 2 }]);
//! let items = parse_line_items(&body).unwrap();
//! assert_eq!(items[0].quantity, 2);
//!
//! let err = parse_line_items(&json!([{ "quantity": 2 }])).unwrap_err();
//! assert_eq!(err.to_string(), "\"productId\" is required");
//! assert_eq!(err.status_code(), 400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest quantity a line item may request.
pub const MIN_QUANTITY: i64 = 1;

/// Smallest number of line items a sale request may carry.
///
/// A sale header without lines should never be written, so an empty body is
/// rejected before anything touches the store.
pub const MIN_LINE_ITEMS: usize = 1;
