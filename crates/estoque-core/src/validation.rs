//! # Validation Module
//!
//! Turns raw form text into a `Product` and enforces field rules.
//!
//! ## Validation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Form fields (text)                                                     │
//! │    id: "3"   name: "Mouse"   price: "49.90"   quantity: "10"            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductForm::to_new_product() / to_existing_product()                  │
//! │       │                                                                 │
//! │       ├── empty field?        ──► ValidationError::Required             │
//! │       ├── "abc" as number?    ──► ValidationError::InvalidFormat        │
//! │       ├── negative number?    ──► ValidationError::OutOfRange           │
//! │       ├── no row selected?    ──► ValidationError::SelectionRequired    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Product ──► repository                                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this module touches storage: a `ValidationError` never
//! reaches the repository.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::{Money, ParseMoneyError};
use crate::types::Product;
use crate::{ID_PLACEHOLDER, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Maximum 255 characters
///
/// ## Example
/// ```rust
/// use estoque_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Mouse").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock quantity.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (out of stock)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a product id used to address an existing row.
///
/// ## Rules
/// - Must be positive; storage never issues 0 or negative ids
pub fn validate_product_id(id: i64) -> ValidationResult<()> {
    if id < 1 {
        return Err(ValidationError::OutOfRange {
            field: "id".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Field Parsers
// =============================================================================

/// Parses and validates a price field.
///
/// ## Example
/// ```rust
/// use estoque_core::validation::parse_price;
///
/// assert_eq!(parse_price("49.90").unwrap().cents(), 4990);
/// assert!(parse_price("abc").is_err());
/// assert!(parse_price("-1").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let price = text.parse::<Money>().map_err(|e| match e {
        ParseMoneyError::Empty => ValidationError::required("price"),
        other => ValidationError::invalid_format("price", other.to_string()),
    })?;

    validate_price_cents(price.cents())?;
    Ok(price)
}

/// Parses and validates a quantity field.
pub fn parse_quantity(text: &str) -> ValidationResult<i64> {
    let qty = parse_integer("quantity", text)?;
    validate_quantity(qty)?;
    Ok(qty)
}

/// Parses and validates an id field.
pub fn parse_product_id(text: &str) -> ValidationResult<i64> {
    let id = parse_integer("id", text)?;
    validate_product_id(id)?;
    Ok(id)
}

fn parse_integer(field: &str, text: &str) -> ValidationResult<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::required(field));
    }

    text.parse::<i64>().map_err(|_| {
        ValidationError::invalid_format(field, format!("'{}' is not a whole number", text))
    })
}

// =============================================================================
// Form
// =============================================================================

/// The raw text of the product form.
///
/// ## Usage
/// ```rust
/// use estoque_core::validation::ProductForm;
///
/// let form = ProductForm::new("1", "Mouse", "39.90", "8");
/// let product = form.to_existing_product().unwrap();
/// assert_eq!(product.id, 1);
/// assert_eq!(product.price.cents(), 3990);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub id: String,
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl ProductForm {
    /// Creates a form from its field texts.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        ProductForm {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
        }
    }

    /// Fills a form from a stored product, as when a row is selected.
    ///
    /// Price is shown with two decimal places.
    pub fn from_product(product: &Product) -> Self {
        ProductForm {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
        }
    }

    /// Whether the id field refers to a selected row.
    pub fn has_selection(&self) -> bool {
        let id = self.id.trim();
        !id.is_empty() && id != ID_PLACEHOLDER
    }

    /// Builds a product for insertion. The id field is ignored.
    ///
    /// ## Errors
    /// - `Required` if name, price or quantity is empty
    /// - `InvalidFormat` if price or quantity is not a number
    /// - `OutOfRange` if price or quantity is negative
    pub fn to_new_product(&self) -> ValidationResult<Product> {
        self.check_required()?;

        let name = self.name.trim();
        validate_product_name(name)?;
        let price = parse_price(&self.price)?;
        let quantity = parse_quantity(&self.quantity)?;

        Ok(Product::new(name, price, quantity))
    }

    /// Builds a product addressing an existing row.
    ///
    /// ## Errors
    /// Everything `to_new_product` reports, plus `SelectionRequired` when
    /// the id field is empty or still shows the placeholder.
    pub fn to_existing_product(&self) -> ValidationResult<Product> {
        if !self.has_selection() {
            return Err(ValidationError::SelectionRequired {
                action: "update".to_string(),
            });
        }

        let product = self.to_new_product()?;
        let id = parse_product_id(&self.id)?;
        Ok(product.with_id(id))
    }

    /// Reads only the id, for deletion.
    pub fn selected_id(&self) -> ValidationResult<i64> {
        if !self.has_selection() {
            return Err(ValidationError::SelectionRequired {
                action: "delete".to_string(),
            });
        }

        parse_product_id(&self.id)
    }

    // Empty fields are reported in form order, before any parse error.
    fn check_required(&self) -> ValidationResult<()> {
        for (field, value) in [
            ("name", &self.name),
            ("price", &self.price),
            ("quantity", &self.quantity),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::required(field));
            }
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

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Mouse").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(255)).is_ok());
        assert!(validate_product_name(&"A".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(10).is_ok());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(4990).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("120.00").unwrap(), Money::from_cents(12000));
        assert_eq!(parse_price(""), Err(ValidationError::required("price")));
        assert!(matches!(
            parse_price("abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_price("-0.01"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 5 ").unwrap(), 5);
        assert!(matches!(
            parse_quantity("2.5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_quantity("-1"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_product_id() {
        assert_eq!(parse_product_id("7").unwrap(), 7);
        assert!(parse_product_id("0").is_err());
        assert!(parse_product_id("x").is_err());
    }

    #[test]
    fn test_new_product_from_form() {
        let form = ProductForm::new(ID_PLACEHOLDER, "  Mouse ", "49.90", "10");
        let product = form.to_new_product().unwrap();

        assert!(!product.is_persisted());
        assert_eq!(product.name, "Mouse");
        assert_eq!(product.price, Money::from_cents(4990));
        assert_eq!(product.quantity, 10);
    }

    #[test]
    fn test_new_product_ignores_id_text() {
        let form = ProductForm::new("99", "Mouse", "49.90", "10");
        assert_eq!(form.to_new_product().unwrap().id, 0);
    }

    #[test]
    fn test_empty_fields_reported_in_form_order() {
        let form = ProductForm::new("", "", "", "");
        assert_eq!(form.to_new_product(), Err(ValidationError::required("name")));

        let form = ProductForm::new("", "Mouse", "", "abc");
        assert_eq!(form.to_new_product(), Err(ValidationError::required("price")));

        let form = ProductForm::new("", "Mouse", "1.00", " ");
        assert_eq!(
            form.to_new_product(),
            Err(ValidationError::required("quantity"))
        );
    }

    #[test]
    fn test_existing_product_requires_selection() {
        for id in ["", "  ", ID_PLACEHOLDER] {
            let form = ProductForm::new(id, "Mouse", "39.90", "8");
            assert_eq!(
                form.to_existing_product(),
                Err(ValidationError::SelectionRequired {
                    action: "update".to_string()
                })
            );
        }
    }

    #[test]
    fn test_existing_product_from_form() {
        let form = ProductForm::new("1", "Mouse", "39.90", "8");
        let product = form.to_existing_product().unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.price, Money::from_cents(3990));
    }

    #[test]
    fn test_selected_id() {
        assert_eq!(ProductForm::new("2", "", "", "").selected_id().unwrap(), 2);
        assert!(matches!(
            ProductForm::default().selected_id(),
            Err(ValidationError::SelectionRequired { .. })
        ));
        assert!(matches!(
            ProductForm::new("two", "", "", "").selected_id(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_form_from_product_formats_price() {
        let product = Product::new("Keyboard", Money::from_cents(12000), 5).with_id(2);
        let form = ProductForm::from_product(&product);

        assert_eq!(form, ProductForm::new("2", "Keyboard", "120.00", "5"));
        assert_eq!(form.to_existing_product().unwrap(), product);
    }
}
