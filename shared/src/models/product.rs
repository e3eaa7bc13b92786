//! Product Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Sellable laptop model codes
///
/// The catalog is a fixed lineup; stock is tracked per model code.
/// Request input is parsed case-insensitively ("e3" -> `E3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelCode {
    E2,
    E3,
    E4,
    E5,
}

impl ModelCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ModelCode::E2 => "E2",
            ModelCode::E3 => "E3",
            ModelCode::E4 => "E4",
            ModelCode::E5 => "E5",
        }
    }

    /// All known model codes
    pub const fn all() -> [ModelCode; 4] {
        [ModelCode::E2, ModelCode::E3, ModelCode::E4, ModelCode::E5]
    }
}

/// Error when parsing an unknown model code string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidModelCode(pub String);

impl fmt::Display for InvalidModelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown product model: {}", self.0)
    }
}

impl std::error::Error for InvalidModelCode {}

impl FromStr for ModelCode {
    type Err = InvalidModelCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "E2" => Ok(ModelCode::E2),
            "E3" => Ok(ModelCode::E3),
            "E4" => Ok(ModelCode::E4),
            "E5" => Ok(ModelCode::E5),
            _ => Err(InvalidModelCode(s.to_string())),
        }
    }
}

impl fmt::Display for ModelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Product entity (inventory aggregate)
///
/// `stock` never goes below zero: order placement decrements it through a
/// conditional update and rollback increments it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub model: ModelCode,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// MRP shown struck-through on the storefront
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    #[serde(default)]
    pub stock: i64,
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_low_stock_threshold() -> i64 {
    5
}

fn default_true() -> bool {
    true
}

impl Product {
    /// True when available stock is at or below the configured threshold
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductCreate {
    /// Model code string, parsed case-insensitively
    #[validate(length(min = 1, max = 10))]
    pub model: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub base_price: Option<Decimal>,
    pub stock: Option<i64>,
    pub low_stock_threshold: Option<i64>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub base_price: Option<Decimal>,
    pub low_stock_threshold: Option<i64>,
    pub is_active: Option<bool>,
}

/// Restock payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjust {
    /// Units to add to current stock (must be >= 1)
    pub quantity: i64,
}
