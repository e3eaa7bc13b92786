//! Product Repository
//!
//! Catalog rows keyed by model code. Stock movements go through the
//! conditional UPDATE helpers so the level can never drop below zero.

use super::{BaseRepository, RepoError, RepoResult};
use chrono::Utc;
use shared::models::{ModelCode, Product, ProductCreate, ProductUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const PRODUCT_FIELDS: &str = "<string>id AS id, model, name, price, base_price, stock, \
     low_stock_threshold, is_active, created_at, updated_at";

/// Row shape for stock-mutating statements (`RETURN stock`)
#[derive(serde::Deserialize)]
struct StockRow {
    stock: i64,
}

#[derive(Clone, Debug)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active products (storefront catalog)
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query(format!(
                "SELECT {PRODUCT_FIELDS} FROM product WHERE is_active = true ORDER BY model"
            ))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find all products including deactivated ones (admin view)
    pub async fn find_all_with_inactive(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query(format!("SELECT {PRODUCT_FIELDS} FROM product ORDER BY model"))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by record id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Invalid product ID format: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {PRODUCT_FIELDS} FROM product WHERE id = $id"))
            .bind(("id", record_id))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Find product by model code
    pub async fn find_by_model(&self, model: ModelCode) -> RepoResult<Option<Product>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {PRODUCT_FIELDS} FROM product WHERE model = $model LIMIT 1"
            ))
            .bind(("model", model.as_str().to_string()))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let model: ModelCode = data
            .model
            .parse()
            .map_err(|e: shared::models::InvalidModelCode| RepoError::Validation(e.to_string()))?;

        // Check duplicate model
        if self.find_by_model(model).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Product '{}' already exists",
                model
            )));
        }

        let now = Utc::now();
        let product = Product {
            id: None,
            model,
            name: data.name,
            price: data.price,
            base_price: data.base_price.unwrap_or(data.price),
            stock: data.stock.unwrap_or(0).max(0),
            low_stock_threshold: data.low_stock_threshold.unwrap_or(5),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.base
            .db()
            .query("CREATE product CONTENT $data RETURN NONE")
            .bind(("data", product))
            .await?
            .check()?;

        self.find_by_model(model)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update catalog fields (price, name, threshold, active flag)
    pub async fn update(&self, model: ModelCode, data: ProductUpdate) -> RepoResult<Product> {
        let mut existing = self
            .find_by_model(model)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", model)))?;

        if let Some(name) = data.name {
            existing.name = name;
        }
        if let Some(price) = data.price {
            existing.price = price;
        }
        if let Some(base_price) = data.base_price {
            existing.base_price = base_price;
        }
        if let Some(threshold) = data.low_stock_threshold {
            existing.low_stock_threshold = threshold;
        }
        if let Some(is_active) = data.is_active {
            existing.is_active = is_active;
        }
        existing.updated_at = Utc::now();
        // id is never serialized, so CONTENT cannot touch the record id
        existing.id = None;

        self.base
            .db()
            .query("UPDATE product CONTENT $data WHERE model = $model RETURN NONE")
            .bind(("data", existing))
            .bind(("model", model.as_str().to_string()))
            .await?
            .check()?;

        self.find_by_model(model)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", model)))
    }

    /// Add stock units (restock delivery)
    pub async fn restock(&self, model: ModelCode, quantity: i64) -> RepoResult<Product> {
        if quantity < 1 {
            return Err(RepoError::Validation(
                "Restock quantity must be at least 1".to_string(),
            ));
        }

        let mut result = self
            .base
            .db()
            .query("UPDATE product SET stock += $qty, updated_at = $now WHERE model = $model RETURN stock")
            .bind(("qty", quantity))
            .bind(("now", Utc::now()))
            .bind(("model", model.as_str().to_string()))
            .await?;
        let rows: Vec<StockRow> = result.take(0)?;
        if rows.is_empty() {
            return Err(RepoError::NotFound(format!("Product {} not found", model)));
        }

        self.find_by_model(model)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", model)))
    }

    /// Atomically take one unit of stock.
    ///
    /// The decrement and the `stock > 0` guard run in a single statement, so
    /// concurrent callers can never drive the level below zero. Returns the
    /// stock after the decrement, None when nothing matched (unknown model,
    /// deactivated or sold out).
    pub async fn reserve_stock(&self, model: ModelCode) -> RepoResult<Option<i64>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE product SET stock -= 1, updated_at = $now \
                 WHERE model = $model AND is_active = true AND stock > 0 RETURN stock",
            )
            .bind(("now", Utc::now()))
            .bind(("model", model.as_str().to_string()))
            .await?;
        let rows: Vec<StockRow> = result.take(0)?;
        Ok(rows.into_iter().next().map(|r| r.stock))
    }

    /// Put one reserved unit back (persist failure or cancellation)
    pub async fn release_stock(&self, model: ModelCode) -> RepoResult<Option<i64>> {
        let mut result = self
            .base
            .db()
            .query("UPDATE product SET stock += 1, updated_at = $now WHERE model = $model RETURN stock")
            .bind(("now", Utc::now()))
            .bind(("model", model.as_str().to_string()))
            .await?;
        let rows: Vec<StockRow> = result.take(0)?;
        Ok(rows.into_iter().next().map(|r| r.stock))
    }

    /// Active products at or below their low-stock threshold
    pub async fn find_low_stock(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query(format!(
                "SELECT {PRODUCT_FIELDS} FROM product \
                 WHERE is_active = true AND stock <= low_stock_threshold ORDER BY stock"
            ))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Hard delete a product
    pub async fn delete(&self, model: ModelCode) -> RepoResult<bool> {
        if self.find_by_model(model).await?.is_none() {
            return Ok(false);
        }
        self.base
            .db()
            .query("DELETE product WHERE model = $model")
            .bind(("model", model.as_str().to_string()))
            .await?
            .check()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use rust_decimal::Decimal;

    async fn repo() -> ProductRepository {
        let service = DbService::memory().await.unwrap();
        ProductRepository::new(service.db)
    }

    fn e3_payload(stock: i64) -> ProductCreate {
        ProductCreate {
            model: "E3".to_string(),
            name: "ENTION E3 Pro".to_string(),
            price: Decimal::from(45999),
            base_price: Some(Decimal::from(52999)),
            stock: Some(stock),
            low_stock_threshold: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_model() {
        let repo = repo().await;
        let created = repo.create(e3_payload(10)).await.unwrap();
        assert_eq!(created.model, ModelCode::E3);
        assert_eq!(created.stock, 10);
        assert!(created.id.is_some());

        let found = repo.find_by_model(ModelCode::E3).await.unwrap().unwrap();
        assert_eq!(found.name, "ENTION E3 Pro");
        assert_eq!(found.price, Decimal::from(45999));

        let by_id = repo
            .find_by_id(found.id.as_deref().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_id.model, ModelCode::E3);
    }

    #[tokio::test]
    async fn test_duplicate_model_rejected() {
        let repo = repo().await;
        repo.create(e3_payload(5)).await.unwrap();
        let err = repo.create(e3_payload(5)).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_reserve_stock_until_empty() {
        let repo = repo().await;
        repo.create(e3_payload(2)).await.unwrap();

        assert_eq!(repo.reserve_stock(ModelCode::E3).await.unwrap(), Some(1));
        assert_eq!(repo.reserve_stock(ModelCode::E3).await.unwrap(), Some(0));
        // Sold out: the guarded update matches nothing
        assert_eq!(repo.reserve_stock(ModelCode::E3).await.unwrap(), None);

        assert_eq!(repo.release_stock(ModelCode::E3).await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_reserve_unknown_model() {
        let repo = repo().await;
        assert_eq!(repo.reserve_stock(ModelCode::E5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_and_low_stock() {
        let repo = repo().await;
        repo.create(e3_payload(3)).await.unwrap();

        let updated = repo
            .update(
                ModelCode::E3,
                ProductUpdate {
                    name: None,
                    price: Some(Decimal::from(43999)),
                    base_price: None,
                    low_stock_threshold: Some(4),
                    is_active: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, Decimal::from(43999));
        assert_eq!(updated.low_stock_threshold, 4);

        // stock 3 <= threshold 4
        let low = repo.find_low_stock().await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].model, ModelCode::E3);
    }
}
