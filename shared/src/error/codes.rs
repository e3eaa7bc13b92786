//! Unified error codes for the ENTION storefront
//!
//! This module defines all error codes used across the store server and frontend.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Logistics errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Product errors
//! - 7xxx: Address errors
//! - 8xxx: Support ticket errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 3xxx: Logistics ====================
    /// Pincode is outside the delivery network
    PincodeNotServiceable = 3001,
    /// Courier rejected the shipment manifest
    ShipmentCreateFailed = 3002,
    /// Waybill not found
    WaybillNotFound = 3003,
    /// Courier API returned an error
    LogisticsApiError = 3004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Status value is not a known order status
    OrderStatusInvalid = 4002,
    /// Requested status change is not a legal transition
    OrderTransitionInvalid = 4003,
    /// Order has already been returned
    OrderAlreadyReturned = 4004,
    /// Order has not been delivered
    OrderNotDelivered = 4005,
    /// Return window has expired
    ReturnWindowExpired = 4006,
    /// An active return request already exists
    ReturnAlreadyActive = 4007,
    /// No return request exists on this order
    ReturnNotFound = 4008,
    /// Return request is not pending
    ReturnNotPending = 4009,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Payment signature verification failed
    PaymentSignatureInvalid = 5002,
    /// Invalid payment method
    PaymentInvalidMethod = 5003,
    /// Refund attempt failed
    RefundFailed = 5004,
    /// Payment gateway request failed
    PaymentGatewayError = 5005,
    /// Payment amount is invalid
    PaymentInvalidAmount = 5006,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product is out of stock
    ProductOutOfStock = 6002,
    /// Unknown product model code
    ProductModelInvalid = 6003,
    /// Product model already exists
    ProductModelExists = 6004,
    /// Product has invalid price
    ProductInvalidPrice = 6005,
    /// Stock quantity must be positive
    StockQuantityInvalid = 6006,

    // ==================== 7xxx: Address ====================
    /// Address not found
    AddressNotFound = 7001,
    /// Pincode must be 6 digits
    PincodeInvalid = 7002,

    // ==================== 8xxx: Support ====================
    /// Support ticket not found
    TicketNotFound = 8001,
    /// Ticket is closed
    TicketClosed = 8002,
    /// Status value is not a known ticket status
    TicketStatusInvalid = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Logistics
            ErrorCode::PincodeNotServiceable => "Pincode is not serviceable",
            ErrorCode::ShipmentCreateFailed => "Failed to create shipment",
            ErrorCode::WaybillNotFound => "Waybill not found",
            ErrorCode::LogisticsApiError => "Logistics provider request failed",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderStatusInvalid => "Invalid order status",
            ErrorCode::OrderTransitionInvalid => "Illegal order status transition",
            ErrorCode::OrderAlreadyReturned => "Order has already been returned",
            ErrorCode::OrderNotDelivered => "Order has not been delivered",
            ErrorCode::ReturnWindowExpired => "Return window has expired",
            ErrorCode::ReturnAlreadyActive => "An active return request is already in progress",
            ErrorCode::ReturnNotFound => "No return request exists for this order",
            ErrorCode::ReturnNotPending => "Return request is not pending",

            // Payment
            ErrorCode::PaymentFailed => "Payment processing failed",
            ErrorCode::PaymentSignatureInvalid => "Payment signature verification failed",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",
            ErrorCode::RefundFailed => "Refund attempt failed",
            ErrorCode::PaymentGatewayError => "Payment gateway request failed",
            ErrorCode::PaymentInvalidAmount => "Payment amount is invalid",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductOutOfStock => "Product is out of stock",
            ErrorCode::ProductModelInvalid => "Unknown product model",
            ErrorCode::ProductModelExists => "Product model already exists",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::StockQuantityInvalid => "Stock quantity must be positive",

            // Address
            ErrorCode::AddressNotFound => "Address not found",
            ErrorCode::PincodeInvalid => "Pincode must be 6 digits",

            // Support
            ErrorCode::TicketNotFound => "Support ticket not found",
            ErrorCode::TicketClosed => "Ticket is closed",
            ErrorCode::TicketStatusInvalid => "Invalid ticket status",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Logistics
            3001 => Ok(ErrorCode::PincodeNotServiceable),
            3002 => Ok(ErrorCode::ShipmentCreateFailed),
            3003 => Ok(ErrorCode::WaybillNotFound),
            3004 => Ok(ErrorCode::LogisticsApiError),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderStatusInvalid),
            4003 => Ok(ErrorCode::OrderTransitionInvalid),
            4004 => Ok(ErrorCode::OrderAlreadyReturned),
            4005 => Ok(ErrorCode::OrderNotDelivered),
            4006 => Ok(ErrorCode::ReturnWindowExpired),
            4007 => Ok(ErrorCode::ReturnAlreadyActive),
            4008 => Ok(ErrorCode::ReturnNotFound),
            4009 => Ok(ErrorCode::ReturnNotPending),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::PaymentSignatureInvalid),
            5003 => Ok(ErrorCode::PaymentInvalidMethod),
            5004 => Ok(ErrorCode::RefundFailed),
            5005 => Ok(ErrorCode::PaymentGatewayError),
            5006 => Ok(ErrorCode::PaymentInvalidAmount),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductOutOfStock),
            6003 => Ok(ErrorCode::ProductModelInvalid),
            6004 => Ok(ErrorCode::ProductModelExists),
            6005 => Ok(ErrorCode::ProductInvalidPrice),
            6006 => Ok(ErrorCode::StockQuantityInvalid),

            // Address
            7001 => Ok(ErrorCode::AddressNotFound),
            7002 => Ok(ErrorCode::PincodeInvalid),

            // Support
            8001 => Ok(ErrorCode::TicketNotFound),
            8002 => Ok(ErrorCode::TicketClosed),
            8003 => Ok(ErrorCode::TicketStatusInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::PincodeNotServiceable.code(), 3001);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::ReturnWindowExpired.code(), 4006);
        assert_eq!(ErrorCode::PaymentSignatureInvalid.code(), 5002);
        assert_eq!(ErrorCode::ProductOutOfStock.code(), 6002);
        assert_eq!(ErrorCode::AddressNotFound.code(), 7001);
        assert_eq!(ErrorCode::TicketNotFound.code(), 8001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::OrderNotFound.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0).unwrap(), ErrorCode::Success);
        assert_eq!(ErrorCode::try_from(4001).unwrap(), ErrorCode::OrderNotFound);
        assert_eq!(
            ErrorCode::try_from(4007).unwrap(),
            ErrorCode::ReturnAlreadyActive
        );
        assert_eq!(
            ErrorCode::try_from(6002).unwrap(),
            ErrorCode::ProductOutOfStock
        );
        assert_eq!(ErrorCode::try_from(9002).unwrap(), ErrorCode::DatabaseError);
    }

    #[test]
    fn test_try_from_invalid() {
        let result = ErrorCode::try_from(12345);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), InvalidErrorCode(12345));

        let result = ErrorCode::try_from(1001);
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::NotFound), "3");
        assert_eq!(format!("{}", ErrorCode::OrderNotFound), "4001");
        assert_eq!(format!("{}", ErrorCode::InternalError), "9001");
    }

    #[test]
    fn test_message() {
        assert_eq!(
            ErrorCode::Success.message(),
            "Operation completed successfully"
        );
        assert_eq!(ErrorCode::OrderNotFound.message(), "Order not found");
        assert_eq!(
            ErrorCode::ReturnAlreadyActive.message(),
            "An active return request is already in progress"
        );
        assert_eq!(
            ErrorCode::ProductOutOfStock.message(),
            "Product is out of stock"
        );
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }

    #[test]
    fn test_roundtrip() {
        // Test that serialization -> deserialization roundtrip works
        let codes = [
            ErrorCode::Success,
            ErrorCode::PincodeNotServiceable,
            ErrorCode::ReturnNotPending,
            ErrorCode::PaymentGatewayError,
            ErrorCode::InternalError,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");
    }

    #[test]
    fn test_debug() {
        let debug_str = format!("{:?}", ErrorCode::Success);
        assert_eq!(debug_str, "Success");

        let debug_str = format!("{:?}", ErrorCode::ReturnWindowExpired);
        assert_eq!(debug_str, "ReturnWindowExpired");
    }

    #[test]
    fn test_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ErrorCode::Success);
        set.insert(ErrorCode::NotFound);
        set.insert(ErrorCode::Success); // Duplicate

        assert_eq!(set.len(), 2);
        assert!(set.contains(&ErrorCode::Success));
        assert!(set.contains(&ErrorCode::NotFound));
    }
}
