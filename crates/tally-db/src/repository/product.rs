//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Existence checks for line item validation
//! - Lookup by id
//! - Inserts (seed data, tests)

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use tally_core::{Product, ProductId};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let id = repo.insert("Martelo de Thor", 10).await?;
/// assert!(repo.exists(id).await?);
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Returns whether a product with this id exists.
    pub async fn exists(&self, id: ProductId) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        debug!(product_id = id, found = found.is_some(), "Checked product existence");
        Ok(found.is_some())
    }

    /// Gets a product by ID.
    pub async fn get_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, created_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists all products ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity, created_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Inserts a product and returns its generated id.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when the name is already taken.
    pub async fn insert(&self, name: &str, quantity: i64) -> DbResult<ProductId> {
        debug!(name = %name, quantity, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, quantity, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(name)
        .bind(quantity)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Returns the number of products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let id = repo.insert("Martelo de Thor", 10).await.unwrap();

        assert!(repo.exists(id).await.unwrap());
        assert!(!repo.exists(id + 100).await.unwrap());

        let product = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.name, "Martelo de Thor");
        assert_eq!(product.quantity, 10);
        assert!(repo.get_by_id(id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert("Traje de encolhimento", 20).await.unwrap();
        repo.insert("Escudo do Capitão América", 30).await.unwrap();

        let products = repo.list().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Traje de encolhimento");
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_unique_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert("Martelo de Thor", 10).await.unwrap();
        let err = repo.insert("Martelo de Thor", 5).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
