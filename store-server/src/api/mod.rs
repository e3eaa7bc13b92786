//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`products`] - 商品目录与库存接口
//! - [`checkout`] - 下单、订单生命周期与退货接口
//! - [`payments`] - 在线支付下单与验签接口
//! - [`logistics`] - 快递可达性、运单与轨迹接口
//! - [`addresses`] - 收货地址簿接口
//! - [`tickets`] - 售后工单接口

pub mod health;

// Catalog
pub mod products;

// Order lifecycle
pub mod checkout;
pub mod payments;

// Fulfilment
pub mod logistics;

// Account
pub mod addresses;
pub mod tickets;
