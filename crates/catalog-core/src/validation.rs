//! # Field Validation
//!
//! Explicit checks for the constraints a product must satisfy.
//! Every check reports a `FieldViolation` naming the field it rejected, and
//! checks for separate fields are collected into one `ValidationErrors`.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Field name used in violations for the product name
pub const NAME_FIELD: &str = "Name";

/// Field name used in violations for the product price
pub const PRICE_FIELD: &str = "Price";

/// Maximum product name length, in UTF-16 code units
pub const NAME_MAX_CHARS: usize = 100;

/// Lowest accepted price
pub const PRICE_MIN: f64 = 0.01;

/// Highest accepted price
pub const PRICE_MAX: f64 = 999_999.99;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field name as callers see it ("Name", "Price")
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Ordered collection of violations.
///
/// Serializes as a map of field name to messages, in the order fields were
/// first rejected:
///
/// ```json
/// { "Name": ["Product name is required"], "Price": ["Price is required"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: FieldViolation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.violations.iter()
    }

    /// Check whether any violation names `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Messages recorded against `field`
    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.field == field)
            .map(|v| v.message.as_str())
    }

    /// Distinct field names, in first-seen order
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for v in &self.violations {
            if !fields.contains(&v.field.as_str()) {
                fields.push(&v.field);
            }
        }
        fields
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for v in &self.violations {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", v)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.fields();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for field in fields {
            let messages: Vec<&str> = self.messages_for(field).collect();
            map.serialize_entry(field, &messages)?;
        }
        map.end()
    }
}

/// Check a product name: required, 1 to 100 characters.
///
/// Whitespace-only names count as missing. Length is measured in UTF-16
/// code units, so characters outside the Basic Multilingual Plane count twice.
pub fn validate_name(name: Option<&str>) -> Result<(), FieldViolation> {
    let name = match name {
        Some(n) if !n.trim().is_empty() => n,
        _ => return Err(FieldViolation::new(NAME_FIELD, "Product name is required")),
    };

    let len = name.encode_utf16().count();
    if !(1..=NAME_MAX_CHARS).contains(&len) {
        return Err(FieldViolation::new(
            NAME_FIELD,
            format!(
                "Product name must be between 1 and {} characters",
                NAME_MAX_CHARS
            ),
        ));
    }

    Ok(())
}

/// Check a product price: required, between 0.01 and 999999.99 inclusive,
/// with at most two decimal places.
pub fn validate_price(price: Option<f64>) -> Result<(), FieldViolation> {
    let price = price.ok_or_else(|| FieldViolation::new(PRICE_FIELD, "Price is required"))?;

    if !price.is_finite() || !(PRICE_MIN..=PRICE_MAX).contains(&price) {
        return Err(FieldViolation::new(
            PRICE_FIELD,
            format!("Price must be between {} and {}", PRICE_MIN, PRICE_MAX),
        ));
    }

    // A value with at most two decimals survives a round trip through whole cents
    if (price * 100.0).round() / 100.0 != price {
        return Err(FieldViolation::new(
            PRICE_FIELD,
            "Price must have at most 2 decimal places",
        ));
    }

    Ok(())
}

/// Parse a price submitted as text (HTML forms).
///
/// Blank input is treated as missing so `validate_price` reports it as
/// required.
pub fn parse_price_text(raw: &str) -> Result<Option<f64>, FieldViolation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed.parse::<f64>().map(Some).map_err(|_| {
        FieldViolation::new(
            PRICE_FIELD,
            format!("The value '{}' is not valid for Price.", raw),
        )
    })
}
