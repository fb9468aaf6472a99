//! # tally-sales: Sale Creation Service
//!
//! Turns a raw list of `{ productId, quantity }` objects into a stored sale.
//!
//! ## Modules
//!
//! - [`validator`] - body shape + product existence checks
//! - [`service`] - the orchestrator ([`SalesService::add_sale`])
//! - [`store`] - storage traits and their SQLite implementations
//! - [`response`] - result values (`ServiceError`, `Reply`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use serde_json::json;
//! use tally_db::{Database, DbConfig};
//! use tally_sales::SalesService;
//!
//! let db = Database::new(DbConfig::new("./data/tally.db")).await?;
//! let sales = SalesService::from_database(&db);
//!
//! match sales.add_sale(&json!([{ "productId": 1, "quantity": 2 }])).await {
//!     Ok(sale) => println!("sale {} recorded", sale.id),
//!     Err(e) => println!("{} {}", e.code, e.message),
//! }
//! ```

pub mod response;
pub mod service;
pub mod store;
pub mod validator;

pub use response::{Reply, ServiceError, ServiceResult};
pub use service::SalesService;
pub use store::{ProductLookup, SaleStore, StoreError};
pub use validator::SaleValidator;
