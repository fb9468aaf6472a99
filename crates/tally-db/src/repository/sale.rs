//! # Sale Repository
//!
//! Database operations for sale headers and sale lines.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. CREATE HEADER                                                      │
//! │     └── create_sale_header() → SaleId (rowid)                          │
//! │                                                                         │
//! │  2. ADD LINES (one per requested item, issued concurrently)            │
//! │     └── add_sale_line(sale_id, product_id, quantity)                   │
//! │     └── add_sale_line(sale_id, product_id, quantity)                   │
//! │                                                                         │
//! │  No update, void or delete path: a sale is immutable once written.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tally_core::{ProductId, Sale, SaleId, SaleLine};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Inserts a new sale header and returns its generated id.
    ///
    /// ## Errors
    /// `DbError::Internal` if SQLite reports no rowid for the insert.
    pub async fn create_sale_header(&self) -> DbResult<SaleId> {
        let result = sqlx::query("INSERT INTO sales (created_at) VALUES (?1)")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        if result.rows_affected() != 1 || id <= 0 {
            return Err(DbError::Internal("sale header insert returned no id".to_string()));
        }

        debug!(sale_id = id, "Created sale header");
        Ok(id)
    }

    /// Inserts one line of a sale.
    ///
    /// ## Errors
    /// - `DbError::ForeignKeyViolation` for an unknown sale or product
    /// - `DbError::UniqueViolation` if the product is already on this sale
    /// - `DbError::CheckViolation` for a quantity below 1
    pub async fn add_sale_line(
        &self,
        sale_id: SaleId,
        product_id: ProductId,
        quantity: i64,
    ) -> DbResult<()> {
        debug!(sale_id, product_id, quantity, "Adding sale line");

        sqlx::query(
            r#"
            INSERT INTO sales_products (sale_id, product_id, quantity)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(sale_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a sale header by ID.
    pub async fn get_by_id(&self, id: SaleId) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>("SELECT id, created_at FROM sales WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Gets all lines of a sale, ordered by product id.
    pub async fn get_lines(&self, sale_id: SaleId) -> DbResult<Vec<SaleLine>> {
        let lines = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT sale_id, product_id, quantity
            FROM sales_products
            WHERE sale_id = ?1
            ORDER BY product_id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Returns the number of sale headers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
