//! # Service Results
//!
//! The value every `add_sale` call ends in. Nothing is thrown: validation
//! failures, store failures and successes all come back as data.
//!
//! ## Codes
//! ```text
//! 201  sale and all lines stored
//! 400  malformed body                       (from tally-core)
//! 404  Product not found                    (from tally-core)
//! 422  quantity below 1                     (from tally-core)
//! 500  Product lookup failed / Sale items not added
//! 501  Sale not added
//! ```

use serde::Serialize;
use ts_rs::TS;

use tally_core::{CoreError, CreatedSale, ValidationError};

/// Sale and all of its lines were stored.
pub const STATUS_CREATED: u16 = 201;

/// A store call failed after validation passed.
pub const STATUS_INTERNAL: u16 = 500;

/// The store could not allocate a sale id.
pub const STATUS_NOT_IMPLEMENTED: u16 = 501;

pub const SALE_NOT_ADDED: &str = "Sale not added";
pub const SALE_ITEMS_NOT_ADDED: &str = "Sale items not added";
pub const PRODUCT_LOOKUP_FAILED: &str = "Product lookup failed";

/// A failed `add_sale`: status code plus the message shown to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub code: u16,
    pub message: String,
}

impl ServiceError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        ServiceError {
            code,
            message: message.into(),
        }
    }

    pub fn sale_not_added() -> Self {
        ServiceError::new(STATUS_NOT_IMPLEMENTED, SALE_NOT_ADDED)
    }

    pub fn sale_items_not_added() -> Self {
        ServiceError::new(STATUS_INTERNAL, SALE_ITEMS_NOT_ADDED)
    }

    pub fn product_lookup_failed() -> Self {
        ServiceError::new(STATUS_INTERNAL, PRODUCT_LOOKUP_FAILED)
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ServiceError {}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        ServiceError::new(err.status_code(), err.to_string())
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        CoreError::from(err).into()
    }
}

/// Result of `SalesService::add_sale`.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Flat reply object handed to callers that want a single shape.
///
/// ```json
/// { "code": 201, "data": { "id": 5, "itemsSold": [...] } }
/// { "code": 404, "error": "Product not found" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Reply {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub data: Option<CreatedSale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

impl From<ServiceResult<CreatedSale>> for Reply {
    fn from(result: ServiceResult<CreatedSale>) -> Self {
        match result {
            Ok(sale) => Reply {
                code: STATUS_CREATED,
                data: Some(sale),
                error: None,
            },
            Err(err) => Reply {
                code: err.code,
                data: None,
                error: Some(err.message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tally_core::LineItemRequest;

    #[test]
    fn test_core_errors_keep_code_and_message() {
        let err: ServiceError = CoreError::ProductNotFound(100).into();
        assert_eq!(err, ServiceError::new(404, "Product not found"));

        let err: ServiceError = ValidationError::required("quantity").into();
        assert_eq!(err, ServiceError::new(400, "\"quantity\" is required"));
    }

    #[test]
    fn test_reply_shapes() {
        let created = Reply::from(Ok(CreatedSale {
            id: 5,
            items_sold: vec![LineItemRequest::new(1, 1)],
        }));
        assert_eq!(
            serde_json::to_value(&created).unwrap(),
            json!({ "code": 201, "data": { "id": 5, "itemsSold": [{ "productId": 1, "quantity": 1 }] } })
        );

        let failed = Reply::from(Err(ServiceError::sale_not_added()));
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({ "code": 501, "error": "Sale not added" })
        );
    }
}
