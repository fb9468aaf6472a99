//! # Sales Service
//!
//! Records a sale: validate, write the header, fan out the lines.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_sale(body)                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Validating ──── error ─────────────────────────► Rejected (400/404/422)│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Creating-Header ── no id / error ──────────────► Header-Failed (501)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Creating-Lines   line 1 ─┐                                             │
//! │   (all issued     line 2 ─┼─► join (wait for every write to settle)    │
//! │    at once)       line n ─┘        │                                    │
//! │                                    ├── any failed ─► Lines-Failed (500) │
//! │                                    ▼                                    │
//! │                               Completed (201)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Line Failures
//! A failed line write fails the request, but the header and any lines that
//! did land stay in the store. Nothing is rolled back; the sale id is logged
//! so the orphan can be found.

use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use tally_core::{CreatedSale, LineItemRequest, SaleId, SaleLine};
use tally_db::Database;

use crate::response::{ServiceError, ServiceResult};
use crate::store::{ProductLookup, SaleStore};
use crate::validator::SaleValidator;

/// Creates sales. Cheap to clone; clones share the same backends.
#[derive(Clone)]
pub struct SalesService {
    validator: SaleValidator,
    store: Arc<dyn SaleStore>,
}

impl SalesService {
    /// Creates a service over arbitrary backends.
    pub fn new(products: Arc<dyn ProductLookup>, store: Arc<dyn SaleStore>) -> Self {
        SalesService {
            validator: SaleValidator::new(products),
            store,
        }
    }

    /// Creates a service backed by the SQLite repositories of `db`.
    pub fn from_database(db: &Database) -> Self {
        SalesService::new(Arc::new(db.products()), Arc::new(db.sales()))
    }

    /// Records a sale from a raw request body.
    ///
    /// ## Returns
    /// * `Ok(CreatedSale)` - `{ id, itemsSold }`, answered with 201
    /// * `Err(ServiceError)` - validation errors pass through unchanged;
    ///   501 `Sale not added` if no header; 500 `Sale items not added` if a line failed
    pub async fn add_sale(&self, body: &Value) -> ServiceResult<CreatedSale> {
        let span = info_span!("add_sale", request_id = %Uuid::new_v4());
        self.record_sale(body).instrument(span).await
    }

    async fn record_sale(&self, body: &Value) -> ServiceResult<CreatedSale> {
        let items = match self.validator.validate(body).await {
            Ok(items) => items,
            Err(e) => {
                info!(code = e.code, message = %e.message, "Sale request rejected");
                return Err(e);
            }
        };

        let sale_id = self.create_header().await?;

        self.create_lines(sale_id, &items).await?;

        info!(sale_id, items = items.len(), "Sale recorded");

        Ok(CreatedSale {
            id: sale_id,
            items_sold: items,
        })
    }

    async fn create_header(&self) -> ServiceResult<SaleId> {
        match self.store.create_sale_header().await {
            Ok(Some(sale_id)) => Ok(sale_id),
            Ok(None) => {
                warn!("Store returned no sale id");
                Err(ServiceError::sale_not_added())
            }
            Err(e) => {
                error!(error = %e, "Sale header insert failed");
                Err(ServiceError::sale_not_added())
            }
        }
    }

    /// Issues every line write before awaiting any, then waits for all of them.
    async fn create_lines(&self, sale_id: SaleId, items: &[LineItemRequest]) -> ServiceResult<()> {
        let lines: Vec<SaleLine> = items
            .iter()
            .map(|item| SaleLine::for_sale(sale_id, item))
            .collect();

        let writes = lines.iter().map(|line| {
            self.store
                .create_sale_line(line.sale_id, line.product_id, line.quantity)
        });

        let results = join_all(writes).await;

        let mut failed = 0;
        for (line, result) in lines.iter().zip(results) {
            if let Err(e) = result {
                failed += 1;
                error!(
                    sale_id,
                    product_id = line.product_id,
                    quantity = line.quantity,
                    error = %e,
                    "Sale line insert failed"
                );
            }
        }

        if failed > 0 {
            error!(
                sale_id,
                failed,
                total = lines.len(),
                "Sale header left without all of its lines"
            );
            return Err(ServiceError::sale_items_not_added());
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::Barrier;

    use crate::store::StoreError;
    use tally_core::ProductId;

    struct Catalogue;

    #[async_trait]
    impl ProductLookup for Catalogue {
        async fn product_exists(&self, product_id: ProductId) -> Result<bool, StoreError> {
            Ok((1..=3).contains(&product_id))
        }
    }

    /// Allocates ids from `next_id` and records every call.
    struct RecordingStore {
        next_id: AtomicI64,
        header_result: HeaderResult,
        failing_product: Option<ProductId>,
        headers: AtomicI64,
        lines: Mutex<Vec<SaleLine>>,
        barrier: Option<Barrier>,
    }

    enum HeaderResult {
        Allocate,
        NoId,
        Fail,
    }

    impl RecordingStore {
        fn starting_at(id: SaleId) -> Self {
            RecordingStore {
                next_id: AtomicI64::new(id),
                header_result: HeaderResult::Allocate,
                failing_product: None,
                headers: AtomicI64::new(0),
                lines: Mutex::new(Vec::new()),
                barrier: None,
            }
        }

        fn lines(&self) -> Vec<SaleLine> {
            self.lines.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SaleStore for RecordingStore {
        async fn create_sale_header(&self) -> Result<Option<SaleId>, StoreError> {
            self.headers.fetch_add(1, Ordering::SeqCst);
            match self.header_result {
                HeaderResult::Allocate => Ok(Some(self.next_id.fetch_add(1, Ordering::SeqCst))),
                HeaderResult::NoId => Ok(None),
                HeaderResult::Fail => Err(StoreError::Backend("disk full".to_string())),
            }
        }

        async fn create_sale_line(
            &self,
            sale_id: SaleId,
            product_id: ProductId,
            quantity: i64,
        ) -> Result<(), StoreError> {
            // Only passes once every line write is in flight
            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }
            if self.failing_product == Some(product_id) {
                return Err(StoreError::Backend("constraint failed".to_string()));
            }
            self.lines.lock().unwrap().push(SaleLine {
                sale_id,
                product_id,
                quantity,
            });
            Ok(())
        }
    }

    fn service(store: Arc<RecordingStore>) -> SalesService {
        SalesService::new(Arc::new(Catalogue), store)
    }

    fn two_items() -> Value {
        json!([{ "productId": 1, "quantity": 1 }, { "productId": 2, "quantity": 5 }])
    }

    #[tokio::test]
    async fn test_add_sale_success() {
        let store = Arc::new(RecordingStore::starting_at(5));

        let sale = service(store.clone()).add_sale(&two_items()).await.unwrap();

        assert_eq!(
            serde_json::to_value(&sale).unwrap(),
            json!({
                "id": 5,
                "itemsSold": [
                    { "productId": 1, "quantity": 1 },
                    { "productId": 2, "quantity": 5 }
                ]
            })
        );

        let mut lines = store.lines();
        lines.sort_by_key(|l| l.product_id);
        assert_eq!(
            lines,
            vec![
                SaleLine { sale_id: 5, product_id: 1, quantity: 1 },
                SaleLine { sale_id: 5, product_id: 2, quantity: 5 },
            ]
        );
    }

    #[tokio::test]
    async fn test_validation_error_passes_through() {
        let store = Arc::new(RecordingStore::starting_at(5));
        let svc = service(store.clone());

        let err = svc.add_sale(&json!([{ "quantity": 1 }])).await.unwrap_err();
        assert_eq!(err, ServiceError::new(400, "\"productId\" is required"));

        let err = svc
            .add_sale(&json!([{ "productId": 100, "quantity": 1 }]))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::new(404, "Product not found"));

        // nothing was written
        assert_eq!(store.headers.load(Ordering::SeqCst), 0);
        assert!(store.lines().is_empty());
    }

    #[tokio::test]
    async fn test_header_without_id() {
        let store = Arc::new(RecordingStore {
            header_result: HeaderResult::NoId,
            ..RecordingStore::starting_at(5)
        });

        let err = service(store.clone()).add_sale(&two_items()).await.unwrap_err();

        assert_eq!(err, ServiceError::new(501, "Sale not added"));
        assert!(store.lines().is_empty());
    }

    #[tokio::test]
    async fn test_header_failure() {
        let store = Arc::new(RecordingStore {
            header_result: HeaderResult::Fail,
            ..RecordingStore::starting_at(5)
        });

        let err = service(store.clone()).add_sale(&two_items()).await.unwrap_err();

        assert_eq!(err, ServiceError::new(501, "Sale not added"));
        assert!(store.lines().is_empty());
    }

    #[tokio::test]
    async fn test_line_failure_waits_for_siblings() {
        let store = Arc::new(RecordingStore {
            failing_product: Some(1),
            ..RecordingStore::starting_at(5)
        });

        let err = service(store.clone()).add_sale(&two_items()).await.unwrap_err();

        assert_eq!(err, ServiceError::new(500, "Sale items not added"));
        // the sibling write still settled; nothing is rolled back
        assert_eq!(
            store.lines(),
            vec![SaleLine { sale_id: 5, product_id: 2, quantity: 5 }]
        );
    }

    #[tokio::test]
    async fn test_line_writes_are_concurrent() {
        let store = Arc::new(RecordingStore {
            barrier: Some(Barrier::new(3)),
            ..RecordingStore::starting_at(1)
        });
        let body = json!([
            { "productId": 1, "quantity": 1 },
            { "productId": 2, "quantity": 1 },
            { "productId": 3, "quantity": 1 }
        ]);

        // Sequential writes would block forever on the barrier
        let sale = tokio::time::timeout(Duration::from_secs(5), service(store.clone()).add_sale(&body))
            .await
            .expect("line writes were not issued concurrently")
            .unwrap();

        assert_eq!(sale.id, 1);
        assert_eq!(store.lines().len(), 3);
    }

    #[tokio::test]
    async fn test_repeated_request_gets_new_sale() {
        let store = Arc::new(RecordingStore::starting_at(5));
        let svc = service(store.clone());

        let first = svc.add_sale(&two_items()).await.unwrap();
        let second = svc.add_sale(&two_items()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.items_sold, second.items_sold);
        assert_eq!(store.lines().len(), 4);
    }
}
