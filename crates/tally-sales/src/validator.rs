//! # Sale Validator
//!
//! Checks a raw request body and turns it into line items.
//!
//! Two passes, first violation wins:
//! 1. body shape (`tally_core::validation::parse_line_items`)
//! 2. every referenced product exists, checked in request order

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use tally_core::validation::parse_line_items;
use tally_core::{CoreError, LineItemRequest};

use crate::response::{ServiceError, ServiceResult};
use crate::store::ProductLookup;

/// Validates sale request bodies against the body rules and the product catalogue.
#[derive(Clone)]
pub struct SaleValidator {
    products: Arc<dyn ProductLookup>,
}

impl SaleValidator {
    pub fn new(products: Arc<dyn ProductLookup>) -> Self {
        SaleValidator { products }
    }

    /// Validates `body`, returning the parsed line items.
    ///
    /// ## Errors
    /// - 400 / 422 for shape violations
    /// - 404 `Product not found` for the first unknown product
    /// - 500 `Product lookup failed` if the lookup itself errors
    pub async fn validate(&self, body: &Value) -> ServiceResult<Vec<LineItemRequest>> {
        let items = parse_line_items(body)?;

        for item in &items {
            let exists = self
                .products
                .product_exists(item.product_id)
                .await
                .map_err(|e| {
                    error!(product_id = item.product_id, error = %e, "Product lookup failed");
                    ServiceError::product_lookup_failed()
                })?;

            if !exists {
                debug!(product_id = item.product_id, "Unknown product in sale request");
                return Err(CoreError::ProductNotFound(item.product_id).into());
            }
        }

        Ok(items)
    }
}
