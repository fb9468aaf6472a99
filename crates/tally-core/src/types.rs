//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    SaleLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (integer)   │   │  id (generated) │   │  sale_id (FK)   │       │
//! │  │  name           │   │  created_at     │   │  product_id (FK)│       │
//! │  │  quantity       │   │                 │   │  quantity       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ LineItemRequest │   │   CreatedSale   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  productId      │   │  id             │                             │
//! │  │  quantity       │   │  itemsSold      │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids are integers allocated by the store (SQLite rowids). A sale id is only
//! known after its header has been written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifier of a product row.
pub type ProductId = i64;

/// Identifier of a sale header row.
pub type SaleId = i64;

// =============================================================================
// Product
// =============================================================================

/// A product that line items can reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    /// Display name, unique across products.
    pub name: String,

    /// Units on hand. Not adjusted by sale creation.
    pub quantity: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Line Item Request
// =============================================================================

/// One product/quantity pair as submitted by the caller.
///
/// Serialized with the wire field names (`productId`, `quantity`) so the
/// `itemsSold` echo matches what the client sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItemRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl LineItemRequest {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        LineItemRequest {
            product_id,
            quantity,
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A sale header. Created once per request, before any of its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    pub id: SaleId,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale Line
// =============================================================================

/// A persisted line item. Owned by exactly one sale header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleLine {
    pub sale_id: SaleId,
    pub product_id: ProductId,
    pub quantity: i64,
}

impl SaleLine {
    /// Ties a requested line item to a freshly allocated sale id.
    pub fn for_sale(sale_id: SaleId, item: &LineItemRequest) -> Self {
        SaleLine {
            sale_id,
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }
}

// =============================================================================
// Created Sale
// =============================================================================

/// Payload returned to the caller once a sale and all its lines are stored.
///
/// ## Wire Format
/// ```json
/// { "id": 5, "itemsSold": [{ "productId": 1, "quantity": 1 }] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreatedSale {
    pub id: SaleId,
    pub items_sold: Vec<LineItemRequest>,
}

// =============================================================================
// Unit Tests
// =============================================================================
