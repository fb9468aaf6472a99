//! # Storage Seams
//!
//! Traits the sale service consumes, and their SQLite implementations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SalesService ──► dyn SaleStore      ──► SaleRepository    (tally-db)  │
//! │  SaleValidator ─► dyn ProductLookup  ──► ProductRepository (tally-db)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service never sees `sqlx` types; anything that can allocate a sale id
//! and write a line can back it.

use async_trait::async_trait;
use thiserror::Error;

use tally_core::{ProductId, SaleId};
use tally_db::{DbError, ProductRepository, SaleRepository};

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error from the SQLite repositories.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Error from any other backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Writes sale headers and sale lines.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Allocates a new sale header.
    ///
    /// `Ok(None)` means the backend completed without producing an id.
    async fn create_sale_header(&self) -> Result<Option<SaleId>, StoreError>;

    /// Writes one line of an existing sale.
    async fn create_sale_line(
        &self,
        sale_id: SaleId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), StoreError>;
}

/// Answers whether a product exists.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn product_exists(&self, product_id: ProductId) -> Result<bool, StoreError>;
}

// =============================================================================
// SQLite implementations
// =============================================================================

#[async_trait]
impl SaleStore for SaleRepository {
    async fn create_sale_header(&self) -> Result<Option<SaleId>, StoreError> {
        Ok(Some(SaleRepository::create_sale_header(self).await?))
    }

    async fn create_sale_line(
        &self,
        sale_id: SaleId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), StoreError> {
        self.add_sale_line(sale_id, product_id, quantity).await?;
        Ok(())
    }
}

#[async_trait]
impl ProductLookup for ProductRepository {
    async fn product_exists(&self, product_id: ProductId) -> Result<bool, StoreError> {
        Ok(self.exists(product_id).await?)
    }
}
