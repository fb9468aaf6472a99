//! # Repository Module
//!
//! Database repository implementations for Tally.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  SalesService                                                          │
//! │       │                                                                 │
//! │       │  db.sales().create_sale_header()                               │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── create_sale_header(&self)                                         │
//! │  └── add_sale_line(&self, sale_id, product_id, quantity)               │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product lookup and inserts
//! - [`SaleRepository`](sale::SaleRepository) - Sale header and sale line writes

pub mod product;
pub mod sale;
