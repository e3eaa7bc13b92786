//! Order Repository
//!
//! Persistence for the order aggregate. Lifecycle rules (status machine,
//! stock compensation, returns) live in [`crate::orders::OrderManager`];
//! this layer only moves rows.

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::Order;
use shared::types::PaginationParams;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const ORDER_FIELDS: &str = "<string>id AS id, order_number, user_id, product, \
     shipping_address, payment, status, delivered_at, return_request, created_at";

/// Row shape for count statements
#[derive(serde::Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone, Debug)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a freshly placed order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let number = order.order_number.clone();
        self.base
            .db()
            .query("CREATE order CONTENT $data RETURN NONE")
            .bind(("data", order))
            .await?
            .check()?;

        self.find_by_number(&number)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by record id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::NotFound(format!("Invalid order ID format: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {ORDER_FIELDS} FROM order WHERE id = $id"))
            .bind(("id", record_id))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Find order by its human-facing order number
    pub async fn find_by_number(&self, order_number: &str) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM order WHERE order_number = $number LIMIT 1"
            ))
            .bind(("number", order_number.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// All orders of one user, newest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM order WHERE user_id = $user ORDER BY created_at DESC"
            ))
            .bind(("user", user_id.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Paginated admin listing, newest first.
    ///
    /// 注意：分页语句刻意不带 WHERE 过滤。
    /// 嵌入式 SDK 的 WHERE + ORDER BY + LIMIT 组合会丢第一条记录。
    pub async fn find_page(&self, params: &PaginationParams) -> RepoResult<(Vec<Order>, i64)> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM order ORDER BY created_at DESC LIMIT $limit START $offset"
            ))
            .bind(("limit", params.limit()))
            .bind(("offset", params.offset()))
            .await?
            .take(0)?;

        let mut result = self
            .base
            .db()
            .query("SELECT count() AS count FROM order GROUP ALL")
            .await?;
        let counts: Vec<CountRow> = result.take(0)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);

        Ok((orders, total))
    }

    /// Replace the full order content (status changes, payment stamp, return request)
    pub async fn save(&self, order: &Order) -> RepoResult<Order> {
        let id_str = order
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Order has no ID".to_string()))?;
        let record_id: RecordId = id_str
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid order ID format: {}", id_str)))?;

        let mut data = order.clone();
        // id is never serialized, so CONTENT cannot touch the record id
        data.id = None;

        self.base
            .db()
            .query("UPDATE $id CONTENT $data RETURN NONE")
            .bind(("id", record_id))
            .bind(("data", data))
            .await?
            .check()?;

        self.find_by_id(&id_str)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id_str)))
    }
}
