//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - `create`: insert, return the product with its generated id
//! - `list`: every row, ascending id
//! - `update` / `delete`: by id, `false` when the id is unknown
//! - `next_id`: max id + 1 (informational only)
//!
//! ## One Connection per Call
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   pub async fn update(&self, p)                                         │
//! │   ┌─────────────────────────────────────────────────────────────────┐  │
//! │   │ conn = acquire()?          ◄── ConnectionFailed leaves here     │  │
//! │   │ result = update_product()   ◄── no `?` between acquire/release  │  │
//! │   │ release(conn)               ◄── always runs                     │  │
//! │   │ result                      ◄── StorageError leaves here        │  │
//! │   └─────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;
use tracing::{debug, info};

use crate::connection::ConnectionProvider;
use crate::error::{DbError, DbResult};
use estoque_core::{Money, Product};

const INSERT_PRODUCT: &str = "INSERT INTO product (name, price, quantity) VALUES (?, ?, ?)";

const SELECT_ALL_PRODUCTS: &str = "SELECT id, name, price, quantity FROM product ORDER BY id";

const SELECT_PRODUCT_BY_ID: &str = "SELECT id, name, price, quantity FROM product WHERE id = ?";

const UPDATE_PRODUCT: &str = "UPDATE product SET name = ?, price = ?, quantity = ? WHERE id = ?";

const DELETE_PRODUCT: &str = "DELETE FROM product WHERE id = ?";

const SELECT_MAX_ID: &str = "SELECT MAX(id) FROM product";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(provider);
///
/// let mouse = repo.create(&Product::new("Mouse", Money::from_cents(4990), 10)).await?;
/// let all = repo.list().await?;
/// let found = repo.update(&mouse.with_id(mouse.id)).await?;
/// let removed = repo.delete(mouse.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    connections: ConnectionProvider,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(connections: ConnectionProvider) -> Self {
        ProductRepository { connections }
    }

    /// Inserts a new product.
    ///
    /// The id of `product` is ignored; storage assigns one.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Copy of the input carrying the generated id
    /// * `Err(DbError::NoRowsAffected)` - Insert touched no row
    /// * `Err(DbError::MissingGeneratedId)` - No id came back
    pub async fn create(&self, product: &Product) -> DbResult<Product> {
        debug!(name = %product.name, "Inserting product");

        let mut conn = self.connections.acquire().await?;
        let result = insert_product(&mut conn, product).await;
        self.connections.release(conn).await;

        let id = result?;
        info!(id, name = %product.name, "Product created");
        Ok(product.with_id(id))
    }

    /// Lists every product, ordered by ascending id.
    ///
    /// Each call reads storage again; nothing is cached.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let mut conn = self.connections.acquire().await?;
        let result = select_all_products(&mut conn).await;
        self.connections.release(conn).await;

        let products = result?;
        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let mut conn = self.connections.acquire().await?;
        let result = select_product_by_id(&mut conn, id).await;
        self.connections.release(conn).await;

        result
    }

    /// Replaces name, price and quantity of the product with `product.id`.
    ///
    /// ## Returns
    /// * `Ok(true)` - Exactly one row updated
    /// * `Ok(false)` - No product has that id
    pub async fn update(&self, product: &Product) -> DbResult<bool> {
        debug!(id = product.id, "Updating product");

        let mut conn = self.connections.acquire().await?;
        let result = update_product(&mut conn, product).await;
        self.connections.release(conn).await;

        let updated = result?;
        if updated {
            info!(id = product.id, "Product updated");
        } else {
            debug!(id = product.id, "No product to update");
        }
        Ok(updated)
    }

    /// Hard-deletes the product with the given id.
    ///
    /// ## Returns
    /// * `Ok(true)` - Exactly one row deleted
    /// * `Ok(false)` - No product has that id
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        debug!(id, "Deleting product");

        let mut conn = self.connections.acquire().await?;
        let result = delete_product(&mut conn, id).await;
        self.connections.release(conn).await;

        let deleted = result?;
        if deleted {
            info!(id, "Product deleted");
        } else {
            debug!(id, "No product to delete");
        }
        Ok(deleted)
    }

    /// Returns one greater than the current maximum id, or 1 when the
    /// table is empty.
    ///
    /// ## Errors
    /// `DbError::IdExhausted` when the largest id is already `i64::MAX`.
    ///
    /// ## Note
    /// Informational only. Storage assigns real ids, and never reuses a
    /// deleted one, so the next insert may receive a larger id.
    pub async fn next_id(&self) -> DbResult<i64> {
        let mut conn = self.connections.acquire().await?;
        let result = select_max_id(&mut conn).await;
        self.connections.release(conn).await;

        match result? {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or_else(|| DbError::IdExhausted {
                entity: "Product".to_string(),
                max,
            }),
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

async fn insert_product(conn: &mut SqliteConnection, product: &Product) -> DbResult<i64> {
    let result = sqlx::query(INSERT_PRODUCT)
        .bind(&product.name)
        .bind(product.price.to_decimal())
        .bind(product.quantity)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::no_rows("Insert product"));
    }

    match result.last_insert_rowid() {
        id if id > 0 => Ok(id),
        _ => Err(DbError::missing_id("Product")),
    }
}

async fn select_all_products(conn: &mut SqliteConnection) -> DbResult<Vec<Product>> {
    let rows = sqlx::query(SELECT_ALL_PRODUCTS)
        .fetch_all(&mut *conn)
        .await?;

    rows.iter().map(product_from_row).collect()
}

async fn select_product_by_id(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<Product>> {
    let row = sqlx::query(SELECT_PRODUCT_BY_ID)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(product_from_row).transpose()
}

async fn update_product(conn: &mut SqliteConnection, product: &Product) -> DbResult<bool> {
    let result = sqlx::query(UPDATE_PRODUCT)
        .bind(&product.name)
        .bind(product.price.to_decimal())
        .bind(product.quantity)
        .bind(product.id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() == 1)
}

async fn delete_product(conn: &mut SqliteConnection, id: i64) -> DbResult<bool> {
    let result = sqlx::query(DELETE_PRODUCT)
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() == 1)
}

async fn select_max_id(conn: &mut SqliteConnection) -> DbResult<Option<i64>> {
    let max: Option<i64> = sqlx::query_scalar(SELECT_MAX_ID)
        .fetch_one(&mut *conn)
        .await?;

    Ok(max)
}

/// Maps a `id, name, price, quantity` row to a Product.
fn product_from_row(row: &SqliteRow) -> DbResult<Product> {
    // NUMERIC affinity stores 120.00 as INTEGER 120; decode either as f64.
    // Rows written elsewhere may carry more than two decimals: truncated.
    let price: f64 = row.try_get_unchecked("price")?;

    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price: Money::from_decimal(price),
        quantity: row.try_get("quantity")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
