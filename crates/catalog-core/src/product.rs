//! # Product Types
//!
//! Product types for the catalog.
//! A `Product` only exists inside the store; callers hand in a `ProductInput`,
//! validate it into a `ProductDraft`, and get `Product` snapshots back.

use crate::error::{CatalogError, CatalogResult};
use crate::validation::{
    parse_price_text, validate_name, validate_price, FieldViolation, ValidationErrors,
    NAME_FIELD, PRICE_FIELD,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Store-assigned product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Price held in cents, exchanged as a decimal number (`9.99`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    cents: i64,
}

impl Price {
    /// Create a price from a decimal amount, rounding to the nearest cent
    pub fn new(amount: f64) -> Self {
        Self {
            cents: (amount * 100.0).round() as i64,
        }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Format for display (e.g., "$10.00")
    pub fn display(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!("{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Price::new)
    }
}

/// A product held by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Assigned by the store, never by the caller
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Unit price
    pub price: Price,
}

impl Product {
    pub(crate) fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
        }
    }

    /// Overwrite name and price; the id is left alone
    pub(crate) fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.price = draft.price;
    }
}

/// Candidate product as submitted by a caller.
///
/// Every field is optional so that missing values surface as validation
/// messages instead of decode failures. Any `id` is accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(default, alias = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, alias = "Name")]
    pub name: Option<String>,

    #[serde(default, alias = "Price")]
    pub price: Option<f64>,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            price: Some(price),
        }
    }

    /// Check every field and produce a draft the store will accept
    pub fn validate(&self) -> Result<ProductDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(v) = validate_name(self.name.as_deref()) {
            errors.push(v);
        }
        if let Err(v) = validate_price(self.price) {
            errors.push(v);
        }

        // Both fields are present once no violation was recorded
        errors.into_result(ProductDraft {
            name: self.name.clone().unwrap_or_default(),
            price: Price::new(self.price.unwrap_or_default()),
        })
    }
}

/// Validated name and price, ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    name: String,
    price: Price,
}

impl ProductDraft {
    /// Validate a name/price pair
    pub fn new(name: impl Into<String>, price: f64) -> Result<Self, ValidationErrors> {
        ProductInput::new(name, price).validate()
    }

    /// Turn a JSON request body into a draft.
    ///
    /// A `null` or non-object body is an `InvalidArgument`. Fields with the
    /// wrong JSON type are reported alongside the regular field checks, so a
    /// caller always gets every violated field at once. Field names match
    /// case-insensitively and any `id` is ignored.
    pub fn from_json(body: Value) -> CatalogResult<Self> {
        let fields = match body {
            Value::Object(fields) => fields,
            Value::Null => {
                return Err(CatalogError::InvalidArgument(
                    "product payload is required".to_string(),
                ))
            }
            _ => {
                return Err(CatalogError::InvalidArgument(
                    "product payload must be a JSON object".to_string(),
                ))
            }
        };

        let mut errors = ValidationErrors::new();

        let name = match json_name(&fields) {
            Ok(name) => name,
            Err(v) => {
                errors.push(v);
                None
            }
        };
        let price = match json_price(&fields) {
            Ok(price) => price,
            Err(v) => {
                errors.push(v);
                None
            }
        };

        let input = ProductInput {
            id: None,
            name,
            price,
        };

        if errors.is_empty() {
            return Ok(input.validate()?);
        }

        // Run the checks for whichever fields did decode
        if !errors.has_field(NAME_FIELD) {
            if let Err(v) = validate_name(input.name.as_deref()) {
                errors.push(v);
            }
        }
        if !errors.has_field(PRICE_FIELD) {
            if let Err(v) = validate_price(input.price) {
                errors.push(v);
            }
        }
        Err(errors.into())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

fn json_field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    fields
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

fn json_name(fields: &Map<String, Value>) -> Result<Option<String>, FieldViolation> {
    match json_field(fields, NAME_FIELD) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(name)) => Ok(Some(name.clone())),
        Some(other) => Err(FieldViolation::new(
            NAME_FIELD,
            format!("The value {} is not valid for Name.", other),
        )),
    }
}

// Numeric strings are accepted the same way form input is
fn json_price(fields: &Map<String, Value>) -> Result<Option<f64>, FieldViolation> {
    match json_field(fields, PRICE_FIELD) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(raw)) => parse_price_text(raw),
        Some(other) => Err(FieldViolation::new(
            PRICE_FIELD,
            format!("The value {} is not valid for Price.", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_conversion() {
        let price = Price::new(10.99);
        assert_eq!(price.cents(), 1099);
        assert_eq!(price.as_decimal(), 10.99);
        assert_eq!(Price::new(999_999.99).cents(), 999_999_99);
        assert_eq!(Price::new(999_999.99).as_decimal(), 999_999.99);
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::new(29.99).display(), "$29.99");
        assert_eq!(Price::new(0.01).display(), "$0.01");
        assert_eq!(Price::new(1200.0).display(), "$1200.00");
    }

    #[test]
    fn test_product_json_shape() {
        let product = Product {
            id: ProductId::new(1),
            name: "Widget".to_string(),
            price: Price::new(9.99),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 1, "name": "Widget", "price": 9.99 })
        );

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_input_accepts_either_case_and_ignores_id() {
        let input: ProductInput =
            serde_json::from_str(r#"{"Id": 99, "Name": "Gadget", "Price": 19.99}"#).unwrap();
        assert_eq!(input.id, Some(99));

        let draft = input.validate().unwrap();
        assert_eq!(draft.name(), "Gadget");
        assert_eq!(draft.price().cents(), 1999);
    }

    #[test]
    fn test_input_reports_every_field() {
        let input: ProductInput = serde_json::from_str("{}").unwrap();
        let errors = input.validate().unwrap_err();

        assert_eq!(errors.fields(), vec!["Name", "Price"]);
    }

    #[test]
    fn test_null_body_is_invalid_argument() {
        let err = ProductDraft::from_json(Value::Null).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));

        let err = ProductDraft::from_json(serde_json::json!([1, 2])).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
    }

    #[test]
    fn test_json_body_to_draft() {
        let draft =
            ProductDraft::from_json(serde_json::json!({ "id": "x", "Name": "Widget", "price": 9.99 }))
                .unwrap();
        assert_eq!(draft.name(), "Widget");
        assert_eq!(draft.price().cents(), 999);

        // Numeric strings are read like form input
        let draft =
            ProductDraft::from_json(serde_json::json!({ "name": "Widget", "price": "19.99" })).unwrap();
        assert_eq!(draft.price().cents(), 1999);
    }

    #[test]
    fn test_json_body_with_wrong_types_names_fields() {
        let err =
            ProductDraft::from_json(serde_json::json!({ "name": "Widget", "price": "abc" })).unwrap_err();
        let errors = err.violations().unwrap();
        assert_eq!(errors.fields(), vec!["Price"]);
        assert_eq!(
            errors.messages_for("Price").next(),
            Some("The value 'abc' is not valid for Price.")
        );

        let err = ProductDraft::from_json(serde_json::json!({ "name": 5, "price": 0 })).unwrap_err();
        let errors = err.violations().unwrap();
        assert_eq!(errors.fields(), vec!["Name", "Price"]);
        assert_eq!(
            errors.messages_for("Name").next(),
            Some("The value 5 is not valid for Name.")
        );
        assert_eq!(
            errors.messages_for("Price").next(),
            Some("Price must be between 0.01 and 999999.99")
        );
    }

    #[test]
    fn test_json_body_keeps_submitted_price_or_rejects_it() {
        let err =
            ProductDraft::from_json(serde_json::json!({ "name": "Widget", "price": 9.999 })).unwrap_err();
        assert!(err.violations().unwrap().has_field("Price"));

        let draft =
            ProductDraft::from_json(serde_json::json!({ "name": "Widget", "price": 9.99 })).unwrap();
        assert_eq!(draft.price().as_decimal(), 9.99);
    }

    #[test]
    fn test_draft_rejects_zero_price() {
        let errors = ProductDraft::new("Widget", 0.0).unwrap_err();
        assert!(errors.has_field("Price"));
        assert!(!errors.has_field("Name"));
    }
}
