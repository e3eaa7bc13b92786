//! Address Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Saved address book entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub full_name: String,
    pub phone: String,
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create address payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressCreate {
    #[validate(length(min = 1, max = 100))]
    pub user_id: String,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(length(min = 8, max = 15))]
    pub phone: String,
    #[validate(length(min = 1, max = 200))]
    pub line1: String,
    #[validate(length(max = 200))]
    pub line2: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 100))]
    pub state: String,
    #[validate(custom(function = "validate_pincode"))]
    pub pincode: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Update address payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressUpdate {
    #[validate(length(min = 1, max = 100))]
    pub full_name: Option<String>,
    #[validate(length(min = 8, max = 15))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub line1: Option<String>,
    #[validate(length(max = 200))]
    pub line2: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub state: Option<String>,
    pub pincode: Option<String>,
}

/// Indian PIN codes are exactly 6 digits
pub fn validate_pincode(pincode: &str) -> Result<(), ValidationError> {
    if pincode.len() == 6 && pincode.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("pincode"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pincode() {
        assert!(validate_pincode("110042").is_ok());
        assert!(validate_pincode("11004").is_err());
        assert!(validate_pincode("1100422").is_err());
        assert!(validate_pincode("11OO42").is_err());
        assert!(validate_pincode("").is_err());
    }

    #[test]
    fn test_address_create_validation() {
        let payload = AddressCreate {
            user_id: "user_1".to_string(),
            full_name: "Asha Verma".to_string(),
            phone: "9876543210".to_string(),
            line1: "12 MG Road".to_string(),
            line2: None,
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
            is_default: false,
        };
        assert!(payload.validate().is_ok());

        let bad = AddressCreate {
            pincode: "56".to_string(),
            ..payload
        };
        assert!(bad.validate().is_err());
    }
}
