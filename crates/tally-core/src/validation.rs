//! # Validation Module
//!
//! Shape validation for sale request bodies.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (pure)                                           │
//! │  ├── body is a non-empty array of objects                              │
//! │  ├── productId / quantity present, numeric, integral                   │
//! │  └── quantity >= 1                                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: SaleValidator (tally-sales)                                  │
//! │  └── every productId exists (Product Lookup)                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reporting
//! Only the first violation is reported. Items are checked in order; within
//! an item `productId` is checked before `quantity`, and unknown keys last.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::LineItemRequest;
use crate::{MIN_LINE_ITEMS, MIN_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Label used for errors about the body itself.
const BODY_LABEL: &str = "value";

const PRODUCT_ID: &str = "productId";
const QUANTITY: &str = "quantity";

// =============================================================================
// Body Validators
// =============================================================================

/// Parses a raw sale request body into line items.
///
/// ## Rules
/// - Body must be an array with at least one element
/// - Every element must be an object with exactly `productId` and `quantity`
/// - Both fields must be integral JSON numbers
/// - `quantity` must be at least 1
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use tally_core::validation::parse_line_items;
///
/// assert!(parse_line_items(&json!([{ "productId": 1, "quantity": 1 }])).is_ok());
/// assert!(parse_line_items(&json!([{ "productId": "A", "quantity": 1 }])).is_err());
/// assert!(parse_line_items(&json!({ "productId": 1 })).is_err());
/// ```
pub fn parse_line_items(body: &Value) -> ValidationResult<Vec<LineItemRequest>> {
    let items = body.as_array().ok_or_else(|| ValidationError::MustBeArray {
        field: BODY_LABEL.to_string(),
    })?;

    if items.len() < MIN_LINE_ITEMS {
        return Err(ValidationError::TooFewItems {
            field: BODY_LABEL.to_string(),
            min: MIN_LINE_ITEMS,
        });
    }

    items.iter().map(parse_line_item).collect()
}

/// Parses a single array element into a line item.
pub fn parse_line_item(item: &Value) -> ValidationResult<LineItemRequest> {
    let fields = item.as_object().ok_or_else(|| ValidationError::MustBeObject {
        field: BODY_LABEL.to_string(),
    })?;

    let product_id = integer_field(fields, PRODUCT_ID)?;

    let quantity = integer_field(fields, QUANTITY)?;
    validate_quantity(quantity)?;

    if let Some(unknown) = fields
        .keys()
        .find(|key| key.as_str() != PRODUCT_ID && key.as_str() != QUANTITY)
    {
        return Err(ValidationError::NotAllowed {
            field: unknown.clone(),
        });
    }

    Ok(LineItemRequest::new(product_id, quantity))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested quantity.
///
/// ## Rules
/// - Must be at least MIN_QUANTITY (1)
/// - No upper bound; stock is not checked at sale creation
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < MIN_QUANTITY {
        return Err(ValidationError::too_small(QUANTITY, MIN_QUANTITY));
    }

    Ok(())
}

/// Reads a required integral field.
///
/// `null`, strings and booleans are "not a number". Numbers written with a
/// zero fraction (`2.0`) are accepted.
fn integer_field(fields: &Map<String, Value>, field: &str) -> ValidationResult<i64> {
    let number = match fields.get(field) {
        None => return Err(ValidationError::required(field)),
        Some(Value::Number(n)) => n,
        Some(_) => return Err(ValidationError::must_be_number(field)),
    };

    if let Some(n) = number.as_i64() {
        return Ok(n);
    }

    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Ok(f as i64)
        }
        _ => Err(ValidationError::must_be_integer(field)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
