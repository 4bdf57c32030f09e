//! # Product Commands
//!
//! Product maintenance: add, update, delete, list, show, next-id probe,
//! plus the database health check.
//!
//! ## Maintenance Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Maintenance Flow                             │
//! │                                                                         │
//! │  ProductForm { id, name, price, quantity }   (raw text)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Validation (estoque-core) ──── invalid? ──► VALIDATION_ERROR           │
//! │       │                                     (storage never touched)     │
//! │       ▼                                                                 │
//! │  ProductRepository (estoque-db)                                         │
//! │       │   create → new id                                               │
//! │       │   update / delete → false ──────────► NOT_FOUND                 │
//! │       ▼                                                                 │
//! │  Refreshed list, ordered by id                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CommandOutcome { message, products }                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::{ApiError, ErrorCode};
use estoque_core::validation::parse_product_id;
use estoque_core::{Product, ProductForm};
use estoque_db::Database;

/// Product DTO (Data Transfer Object) for output.
///
/// `price` is the two-decimal text shown in the table; `priceCents` is the
/// exact amount for scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub price_cents: i64,
    pub quantity: i64,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id,
            name: p.name,
            price: p.price.to_string(),
            price_cents: p.price.cents(),
            quantity: p.quantity,
        }
    }
}

/// Result of a command: an optional status line and the products to show.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub products: Vec<ProductDto>,
}

impl CommandOutcome {
    fn listing(products: Vec<Product>) -> Self {
        CommandOutcome {
            message: None,
            products: products.into_iter().map(ProductDto::from).collect(),
        }
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Adds a product from form text.
///
/// ## Returns
/// `Product added with ID: N` and the refreshed list.
///
/// ## Errors
/// `VALIDATION_ERROR` for empty or malformed fields; nothing is stored.
pub async fn add_product(db: &Database, form: &ProductForm) -> Result<CommandOutcome, ApiError> {
    debug!(name = %form.name, "add_product command");

    let product = form.to_new_product()?;
    let created = db.products().create(&product).await?;

    let outcome = list_products(db).await?;
    Ok(outcome.with_message(format!("Product added with ID: {}", created.id)))
}

/// Replaces name, price and quantity of the selected product.
///
/// ## Errors
/// - `VALIDATION_ERROR` if no id is selected or a field is invalid
/// - `NOT_FOUND` if no row has that id
pub async fn update_product(
    db: &Database,
    form: &ProductForm,
) -> Result<CommandOutcome, ApiError> {
    debug!(id = %form.id, "update_product command");

    let product = form.to_existing_product()?;

    if !db.products().update(&product).await? {
        return Err(ApiError::new(
            ErrorCode::NotFound,
            format!("Product not found for update: {}", product.id),
        ));
    }

    let outcome = list_products(db).await?;
    Ok(outcome.with_message(format!("Product updated: {}", product.id)))
}

/// Deletes the product with the given id text.
///
/// ## Errors
/// - `VALIDATION_ERROR` if the id is empty, the placeholder, or not a number
/// - `NOT_FOUND` if no row has that id
pub async fn delete_product(db: &Database, id_text: &str) -> Result<CommandOutcome, ApiError> {
    debug!(id = %id_text, "delete_product command");

    let form = ProductForm {
        id: id_text.to_string(),
        ..ProductForm::default()
    };
    let id = form.selected_id()?;

    if !db.products().delete(id).await? {
        return Err(ApiError::new(
            ErrorCode::NotFound,
            format!("Product not found for delete: {}", id),
        ));
    }

    let outcome = list_products(db).await?;
    Ok(outcome.with_message(format!("Product deleted: {}", id)))
}

/// Lists every product ordered by id.
pub async fn list_products(db: &Database) -> Result<CommandOutcome, ApiError> {
    let start = Instant::now();

    let products = db.products().list().await?;

    debug!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = products.len(),
        "list_products complete"
    );

    Ok(CommandOutcome::listing(products))
}

/// Shows a single product.
///
/// ## Errors
/// `NOT_FOUND` if no row has that id.
pub async fn show_product(db: &Database, id_text: &str) -> Result<CommandOutcome, ApiError> {
    debug!(id = %id_text, "show_product command");

    let id = parse_product_id(id_text)?;
    let product = db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id.to_string()))?;

    Ok(CommandOutcome::listing(vec![product]))
}

/// Reports the id a new product would probably get.
///
/// Advisory only: the id shown before an add is `max(id) + 1`, and the
/// store decides the real one.
pub async fn next_product_id(db: &Database) -> Result<i64, ApiError> {
    Ok(db.products().next_id().await?)
}

/// Checks that the database can be opened and queried.
///
/// ## Errors
/// `CONNECTION_ERROR` when the endpoint is unreachable.
pub async fn check_health(db: &Database) -> Result<CommandOutcome, ApiError> {
    if !db.health_check().await {
        return Err(ApiError::new(
            ErrorCode::ConnectionError,
            "Database is not reachable",
        ));
    }
    Ok(CommandOutcome::default().with_message("Database is reachable"))
}

/// Creates the product table if it is missing.
pub async fn init_schema(db: &Database) -> Result<CommandOutcome, ApiError> {
    db.ensure_schema().await?;
    Ok(CommandOutcome::default().with_message("Product table ready"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use estoque_core::{Money, ID_PLACEHOLDER};
    use estoque_db::ConnectionConfig;
    use tempfile::TempDir;

    async fn test_db() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::new(ConnectionConfig::new(
            dir.path().join("estoque.db").display().to_string(),
        ));
        init_schema(&db).await.unwrap();
        (dir, db)
    }

    fn unreachable_db(dir: &TempDir) -> Database {
        Database::new(ConnectionConfig::new(
            dir.path()
                .join("missing")
                .join("estoque.db")
                .display()
                .to_string(),
        ))
    }

    #[test]
    fn test_product_dto_from_product() {
        let product = Product::new("Mouse", Money::from_cents(4990), 10).with_id(1);
        let dto = ProductDto::from(product);

        assert_eq!(dto.id, 1);
        assert_eq!(dto.price, "49.90");
        assert_eq!(dto.price_cents, 4990);

        let json = serde_json::to_string(&dto).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"name":"Mouse","price":"49.90","priceCents":4990,"quantity":10}"#
        );
    }

    #[tokio::test]
    async fn test_add_product_reports_id_and_refreshes() {
        let (_dir, db) = test_db().await;

        let form = ProductForm::new(ID_PLACEHOLDER, "Mouse", "49.90", "10");
        let outcome = add_product(&db, &form).await.unwrap();

        assert_eq!(outcome.message.as_deref(), Some("Product added with ID: 1"));
        assert_eq!(outcome.products.len(), 1);
        assert_eq!(outcome.products[0].name, "Mouse");
        assert_eq!(outcome.products[0].price, "49.90");
        assert_eq!(outcome.products[0].quantity, 10);
    }

    #[tokio::test]
    async fn test_add_product_rejects_invalid_form() {
        let (_dir, db) = test_db().await;

        let err = add_product(&db, &ProductForm::new("", "Mouse", "abc", "10"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_product(&db, &ProductForm::new("", "", "1.00", "1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("name"));

        assert!(list_products(&db).await.unwrap().products.is_empty());
    }

    #[tokio::test]
    async fn test_update_product() {
        let (_dir, db) = test_db().await;
        add_product(&db, &ProductForm::new("", "Mouse", "49.90", "10"))
            .await
            .unwrap();

        let outcome = update_product(&db, &ProductForm::new("1", "Mouse", "39.90", "8"))
            .await
            .unwrap();

        assert_eq!(outcome.products.len(), 1);
        assert_eq!(outcome.products[0].price, "39.90");
        assert_eq!(outcome.products[0].quantity, 8);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (_dir, db) = test_db().await;

        let err = update_product(&db, &ProductForm::new("99", "Ghost", "1.00", "1"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found for update: 99");
    }

    #[tokio::test]
    async fn test_update_requires_selection() {
        let (_dir, db) = test_db().await;

        let err = update_product(&db, &ProductForm::new(ID_PLACEHOLDER, "Mouse", "1.00", "1"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "select a product to update");
    }

    #[tokio::test]
    async fn test_delete_product() {
        let (_dir, db) = test_db().await;
        add_product(&db, &ProductForm::new("", "Mouse", "49.90", "10"))
            .await
            .unwrap();
        add_product(&db, &ProductForm::new("", "Keyboard", "120.00", "5"))
            .await
            .unwrap();

        let outcome = delete_product(&db, "1").await.unwrap();
        assert_eq!(outcome.message.as_deref(), Some("Product deleted: 1"));
        assert_eq!(outcome.products.len(), 1);
        assert_eq!(outcome.products[0].name, "Keyboard");

        let err = delete_product(&db, "1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found for delete: 1");
    }

    #[tokio::test]
    async fn test_delete_requires_selection() {
        let (_dir, db) = test_db().await;

        let err = delete_product(&db, "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = delete_product(&db, ID_PLACEHOLDER).await.unwrap_err();
        assert_eq!(err.message, "select a product to delete");
    }

    #[tokio::test]
    async fn test_show_product() {
        let (_dir, db) = test_db().await;
        add_product(&db, &ProductForm::new("", "Mouse", "49.90", "10"))
            .await
            .unwrap();

        let outcome = show_product(&db, "1").await.unwrap();
        assert_eq!(outcome.products.len(), 1);
        assert_eq!(outcome.products[0].name, "Mouse");

        let err = show_product(&db, "2").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 2");
    }

    #[tokio::test]
    async fn test_next_product_id() {
        let (_dir, db) = test_db().await;
        assert_eq!(next_product_id(&db).await.unwrap(), 1);

        add_product(&db, &ProductForm::new("", "Mouse", "49.90", "10"))
            .await
            .unwrap();
        assert_eq!(next_product_id(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_check_health() {
        let (dir, db) = test_db().await;

        let outcome = check_health(&db).await.unwrap();
        assert_eq!(outcome.message.as_deref(), Some("Database is reachable"));
        assert!(outcome.products.is_empty());

        let err = check_health(&unreachable_db(&dir)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConnectionError);
    }

    #[tokio::test]
    async fn test_unreachable_database_is_connection_error() {
        let dir = TempDir::new().unwrap();
        let db = unreachable_db(&dir);

        let err = list_products(&db).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConnectionError);

        let err = add_product(&db, &ProductForm::new("", "Mouse", "49.90", "10"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConnectionError);
    }
}
