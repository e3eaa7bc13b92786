//! OrderManager - order lifecycle state machine
//!
//! This module handles:
//! - Checkout validation and atomic stock reservation
//! - Status transitions along a closed table
//! - Return submission and admin resolution
//! - Refund orchestration against the payment gateway
//!
//! # Checkout Flow
//!
//! ```text
//! place_order(data)
//!     ├─ 1. Require and parse the model code
//!     ├─ 2. Reserve one stock unit (single conditional UPDATE)
//!     ├─ 3. Build the order document (snapshot of product config)
//!     ├─ 4. Persist
//!     └─ 5. On persist failure: release the reserved unit, propagate
//! ```

use crate::db::repository::{OrderRepository, ProductRepository, RepoError};
use crate::services::PaymentGateway;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use shared::error::{AppError, ErrorCode};
use shared::models::order::{
    default_ram, default_ssd, default_warranty, Order, OrderCreate, OrderStatus, PaymentInfo,
    PaymentMethod, PaymentStatus, ProductConfig, ReturnReceipt, ReturnRequest, ReturnResolution,
    ReturnStatus, ReturnSubmit,
};
use shared::models::product::ModelCode;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum OrderFlowError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error("Product model is required")]
    ModelRequired,

    #[error("Unknown product model: {0}")]
    UnknownModel(String),

    #[error("Product is out of stock: {0}")]
    OutOfStock(ModelCode),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Invalid order status: {0}")]
    InvalidStatus(String),

    #[error("Cannot move order from '{from}' to '{to}'")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Return reason must not be empty")]
    ReasonRequired,

    #[error("Only delivered orders can be returned")]
    NotDelivered,

    #[error("Active return request already in progress")]
    ReturnActive,

    #[error("Return window of {0} days has expired")]
    WindowExpired(i64),

    #[error("No return request exists for this order")]
    NoReturn,

    #[error("Return request is not pending (current status: {0})")]
    ReturnNotPending(ReturnStatus),

    #[error("Order has already been returned")]
    AlreadyReturned,

    #[error("Payment signature verification failed")]
    SignatureInvalid,

    #[error("Payment verification applies only to online orders")]
    WrongPaymentMethod,
}

impl From<OrderFlowError> for AppError {
    fn from(err: OrderFlowError) -> Self {
        use OrderFlowError::*;

        let message = err.to_string();
        let code = match err {
            Repo(e) => return e.into(),
            ModelRequired => ErrorCode::RequiredField,
            UnknownModel(_) => ErrorCode::ProductModelInvalid,
            OutOfStock(_) => ErrorCode::ProductOutOfStock,
            OrderNotFound(_) => ErrorCode::OrderNotFound,
            InvalidStatus(_) => ErrorCode::OrderStatusInvalid,
            InvalidTransition { .. } => ErrorCode::OrderTransitionInvalid,
            ReasonRequired => ErrorCode::RequiredField,
            NotDelivered => ErrorCode::OrderNotDelivered,
            ReturnActive => ErrorCode::ReturnAlreadyActive,
            WindowExpired(_) => ErrorCode::ReturnWindowExpired,
            NoReturn => ErrorCode::ReturnNotFound,
            ReturnNotPending(_) => ErrorCode::ReturnNotPending,
            AlreadyReturned => ErrorCode::OrderAlreadyReturned,
            SignatureInvalid => ErrorCode::PaymentSignatureInvalid,
            WrongPaymentMethod => ErrorCode::PaymentInvalidMethod,
        };
        AppError::with_message(code, message)
    }
}

pub type FlowResult<T> = Result<T, OrderFlowError>;

/// 订单号: ENTION-<毫秒时间戳后8位>-<3位随机后缀>
///
/// 时间戳段在8位内循环，随机段隔离同毫秒并发；order_number
/// 上的唯一索引兜底极小概率的碰撞。
fn generate_order_number() -> String {
    let millis = Utc::now().timestamp_millis().rem_euclid(100_000_000);
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    format!("ENTION-{millis:08}-{suffix:03}")
}

/// 退货窗口判定，闭区间（恰好满窗仍可退）
fn within_return_window(
    delivered_at: DateTime<Utc>,
    now: DateTime<Utc>,
    window_days: i64,
) -> bool {
    now.signed_duration_since(delivered_at) <= Duration::days(window_days)
}

/// OrderManager for lifecycle writes
///
/// Cheap to clone; both repositories are thin handles over the same
/// embedded database connection.
#[derive(Clone, Debug)]
pub struct OrderManager {
    orders: OrderRepository,
    products: ProductRepository,
    payments: Arc<dyn PaymentGateway>,
    /// Days after delivery during which a return may be submitted
    return_window_days: i64,
}

impl OrderManager {
    pub fn new(db: Surreal<Db>, payments: Arc<dyn PaymentGateway>, return_window_days: i64) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            products: ProductRepository::new(db),
            payments,
            return_window_days,
        }
    }

    /// Checkout: validate the payload, reserve stock, persist the order
    ///
    /// 库存扣减在前、落库在后。落库失败时补偿性归还已扣减的一件；
    /// 嵌入式 SurrealDB 不跨表开事务，这里是手动 saga。
    pub async fn place_order(&self, data: OrderCreate) -> FlowResult<Order> {
        let raw_model = data
            .product
            .model
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        if raw_model.is_empty() {
            return Err(OrderFlowError::ModelRequired);
        }
        let model: ModelCode = raw_model
            .parse()
            .map_err(|_| OrderFlowError::UnknownModel(raw_model.to_string()))?;

        // 原子扣减；未匹配到行（缺货、下架、未建档）一律按缺货处理
        if self.products.reserve_stock(model).await?.is_none() {
            return Err(OrderFlowError::OutOfStock(model));
        }

        let input = data.product;
        let order = Order {
            id: None,
            order_number: generate_order_number(),
            user_id: data.user_id,
            product: ProductConfig {
                name: input
                    .name
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| format!("ENTION {model}")),
                model,
                selected_ram: input.selected_ram.unwrap_or_else(default_ram),
                selected_ssd: input.selected_ssd.unwrap_or_else(default_ssd),
                selected_warranty: input.selected_warranty.unwrap_or_else(default_warranty),
                price: input.price,
                base_price: input.base_price.unwrap_or(input.price),
            },
            shipping_address: data.shipping_address,
            payment: PaymentInfo {
                method: data.payment_method,
                status: PaymentStatus::Pending,
                transaction_id: None,
            },
            status: OrderStatus::Pending,
            delivered_at: None,
            return_request: None,
            created_at: Utc::now(),
        };

        match self.orders.create(order).await {
            Ok(saved) => Ok(saved),
            Err(e) => {
                tracing::error!(
                    model = %model,
                    error = %e,
                    "order persist failed, releasing reserved stock"
                );
                if let Err(release_err) = self.products.release_stock(model).await {
                    tracing::error!(
                        model = %model,
                        error = %release_err,
                        "compensating stock release failed, inventory is off by one"
                    );
                }
                Err(e.into())
            }
        }
    }

    /// Move an order along the transition table
    ///
    /// `delivered` stamps `delivered_at`; cancelling a not-yet-shipped
    /// order releases its reserved stock unit. `returned` is not
    /// reachable here, only through [`Self::resolve_return`].
    pub async fn update_status(&self, order_id: &str, requested: &str) -> FlowResult<Order> {
        let next = OrderStatus::parse(requested)
            .ok_or_else(|| OrderFlowError::InvalidStatus(requested.to_string()))?;

        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderFlowError::OrderNotFound(order_id.to_string()))?;

        if !order.status.can_transition_to(next) {
            return Err(OrderFlowError::InvalidTransition {
                from: order.status,
                to: next,
            });
        }

        // delivered_at 是退货窗口的唯一计时依据
        if next == OrderStatus::Delivered {
            order.delivered_at = Some(Utc::now());
        }

        let releases_stock = next == OrderStatus::Cancelled && order.status.holds_stock();
        order.status = next;
        let saved = self.orders.save(&order).await?;

        // 先落库再归还库存：取消一旦生效就不可能重试出双重归还
        if releases_stock {
            match self.products.release_stock(saved.product.model).await {
                Ok(Some(_)) => {}
                Ok(None) => tracing::warn!(
                    model = %saved.product.model,
                    order_number = %saved.order_number,
                    "cancelled order references an unknown product, stock not released"
                ),
                Err(e) => tracing::error!(
                    model = %saved.product.model,
                    order_number = %saved.order_number,
                    error = %e,
                    "stock release after cancellation failed, inventory is off by one"
                ),
            }
        }

        Ok(saved)
    }

    /// Customer-side return submission
    ///
    /// 前置条件按序短路：理由非空、订单存在、状态恰为 delivered、
    /// 无进行中的退货（Rejected 可重新发起）、delivered_at 存在、
    /// 仍在退货窗口内。
    pub async fn submit_return(
        &self,
        order_id: &str,
        data: ReturnSubmit,
    ) -> FlowResult<ReturnReceipt> {
        let reason = data.reason.trim().to_string();
        if reason.is_empty() {
            return Err(OrderFlowError::ReasonRequired);
        }

        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderFlowError::OrderNotFound(order_id.to_string()))?;

        if order.status != OrderStatus::Delivered {
            return Err(OrderFlowError::NotDelivered);
        }

        if let Some(existing) = &order.return_request {
            if existing.status != ReturnStatus::Rejected {
                return Err(OrderFlowError::ReturnActive);
            }
        }

        // delivered 状态却没有时间戳的历史脏数据按不可退处理
        let delivered_at = order.delivered_at.ok_or(OrderFlowError::NotDelivered)?;
        if !within_return_window(delivered_at, Utc::now(), self.return_window_days) {
            return Err(OrderFlowError::WindowExpired(self.return_window_days));
        }

        order.return_request = Some(ReturnRequest {
            reason,
            comments: data.comments.filter(|c| !c.trim().is_empty()),
            status: ReturnStatus::Pending,
            requested_at: Utc::now(),
            processed_at: None,
        });
        let saved = self.orders.save(&order).await?;

        Ok(ReturnReceipt {
            message: "Return request submitted".to_string(),
            order_id: saved.id.unwrap_or_default(),
            order_number: saved.order_number,
        })
    }

    /// Admin-side return resolution
    ///
    /// 可退款（在线支付成功且有交易号）先走网关退款：成功则批准并置
    /// returned，失败则标记 Refund_Failed 且订单保持 delivered 等人工
    /// 跟进。不可退款（COD 或未支付）直接批准。三种结果都是 200，
    /// 由响应体区分。
    pub async fn resolve_return(&self, order_id: &str) -> FlowResult<ReturnResolution> {
        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderFlowError::OrderNotFound(order_id.to_string()))?;

        let mut request = order
            .return_request
            .clone()
            .ok_or(OrderFlowError::NoReturn)?;
        if request.status != ReturnStatus::Pending {
            return Err(OrderFlowError::ReturnNotPending(request.status));
        }
        if order.status == OrderStatus::Returned {
            return Err(OrderFlowError::AlreadyReturned);
        }

        let refund_target = order
            .payment
            .is_refundable()
            .then(|| order.payment.transaction_id.clone())
            .flatten();

        let message = if let Some(txn) = refund_target {
            match self.payments.refund(&txn, order.product.price).await {
                Ok(receipt) => {
                    tracing::info!(
                        order_number = %order.order_number,
                        refund_id = %receipt.id,
                        "refund issued"
                    );
                    request.status = ReturnStatus::Approved;
                    order.status = OrderStatus::Returned;
                    order.payment.status = PaymentStatus::Refunded;
                    "Return approved, refund issued"
                }
                Err(e) => {
                    // 钱没退回去就绝不标记 returned，货款状态必须可审计
                    tracing::error!(
                        order_id = %order_id,
                        transaction_id = %txn,
                        error = %e,
                        "refund attempt failed, flagged for manual follow-up"
                    );
                    request.status = ReturnStatus::RefundFailed;
                    "Refund attempt failed, flagged for manual follow-up"
                }
            }
        } else {
            request.status = ReturnStatus::Approved;
            order.status = OrderStatus::Returned;
            "Return approved, no refund required"
        };

        request.processed_at = Some(Utc::now());
        let return_status = request.status;
        order.return_request = Some(request);
        let saved = self.orders.save(&order).await?;

        Ok(ReturnResolution {
            message: message.to_string(),
            return_status,
            order_status: saved.status,
        })
    }

    /// Online payment confirmation after client-side checkout
    ///
    /// 验签通过才盖章 payment 并把 pending 推进到 processing。
    /// 同一笔交易的重复回调幂等返回当前订单。
    pub async fn confirm_payment(
        &self,
        order_number: &str,
        gateway_order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> FlowResult<Order> {
        let mut order = self
            .orders
            .find_by_number(order_number)
            .await?
            .ok_or_else(|| OrderFlowError::OrderNotFound(order_number.to_string()))?;

        if order.payment.method != PaymentMethod::Online {
            return Err(OrderFlowError::WrongPaymentMethod);
        }

        if order.payment.status == PaymentStatus::Success
            && order.payment.transaction_id.as_deref() == Some(payment_id)
        {
            return Ok(order);
        }

        if !self
            .payments
            .verify_signature(gateway_order_id, payment_id, signature)
        {
            return Err(OrderFlowError::SignatureInvalid);
        }

        order.payment.status = PaymentStatus::Success;
        order.payment.transaction_id = Some(payment_id.to_string());
        if order.status == OrderStatus::Pending {
            order.status = OrderStatus::Processing;
        }
        Ok(self.orders.save(&order).await?)
    }
}
