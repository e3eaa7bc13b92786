//! Razorpay integration via REST API (no SDK dependency)
//!
//! Orders: POST /v1/orders (basic auth, amounts in paise).
//! Checkout callback: HMAC-SHA256 over "order_id|payment_id" with the key
//! secret, hex encoded.
//! Refunds: POST /v1/payments/{id}/refund.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sha2::Sha256;
use std::time::Duration;

use super::{GatewayError, GatewayOrder, GatewayResult, PaymentGateway, RefundReceipt};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, serde::Deserialize)]
struct RazorpayOrder {
    id: String,
    amount: i64,
    currency: String,
}

#[derive(Debug, serde::Deserialize)]
struct RazorpayRefund {
    id: String,
    payment_id: String,
    status: String,
}

/// Convert a rupee amount to integer paise
fn rupees_to_paise(amount: Decimal) -> GatewayResult<i64> {
    if amount <= Decimal::ZERO {
        return Err(GatewayError::InvalidAmount(format!(
            "Amount must be positive, got {}",
            amount
        )));
    }
    (amount * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .ok_or_else(|| GatewayError::InvalidAmount(format!("Amount out of range: {}", amount)))
}

#[derive(Debug, Clone)]
pub struct RazorpayClient {
    client: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayClient {
    pub fn new(base_url: &str, key_id: &str, key_secret: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            key_id: key_id.to_string(),
            key_secret: key_secret.to_string(),
        }
    }

    /// Signature for an (order, payment) pair, hex encoded
    pub fn sign(&self, order_id: &str, payment_id: &str) -> String {
        let mut mac = match Hmac::<Sha256>::new_from_slice(self.key_secret.as_bytes()) {
            Ok(mac) => mac,
            Err(_) => return String::new(),
        };
        mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, amount: Decimal, receipt: &str) -> GatewayResult<GatewayOrder> {
        let amount_paise = rupees_to_paise(amount)?;

        let resp = self
            .client
            .post(format!("{}/v1/orders", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&serde_json::json!({
                "amount": amount_paise,
                "currency": "INR",
                "receipt": receipt,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Api { status, body });
        }

        let order: RazorpayOrder = resp.json().await?;
        Ok(GatewayOrder {
            id: order.id,
            amount: order.amount,
            currency: order.currency,
        })
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(self.key_secret.as_bytes()) else {
            return false;
        };
        mac.update(format!("{}|{}", order_id, payment_id).as_bytes());

        // Decode hex signature and use constant-time comparison via hmac::verify_slice
        let Ok(sig_bytes) = hex::decode(signature) else {
            return false;
        };
        mac.verify_slice(&sig_bytes).is_ok()
    }

    async fn refund(&self, payment_id: &str, amount: Decimal) -> GatewayResult<RefundReceipt> {
        let amount_paise = rupees_to_paise(amount)?;

        let resp = self
            .client
            .post(format!(
                "{}/v1/payments/{}/refund",
                self.base_url, payment_id
            ))
            .timeout(REQUEST_TIMEOUT)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&serde_json::json!({ "amount": amount_paise }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(
                "Razorpay refund rejected for {}: {} - {}",
                payment_id,
                status,
                body
            );
            return Err(GatewayError::Api { status, body });
        }

        let refund: RazorpayRefund = resp.json().await?;
        Ok(RefundReceipt {
            id: refund.id,
            payment_id: refund.payment_id,
            status: refund.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RazorpayClient {
        RazorpayClient::new("https://api.razorpay.com", "rzp_test_key", "secret_1")
    }

    #[test]
    fn test_signature_roundtrip() {
        let client = client();
        let sig = client.sign("order_abc", "pay_xyz");
        assert!(!sig.is_empty());
        assert!(client.verify_signature("order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_signature_rejects_mismatch() {
        let client = client();
        let sig = client.sign("order_abc", "pay_xyz");

        assert!(!client.verify_signature("order_abc", "pay_other", &sig));
        assert!(!client.verify_signature("order_other", "pay_xyz", &sig));

        // Tampered hex
        let mut bytes = sig.clone().into_bytes();
        bytes[0] = if bytes[0] == b'0' { b'1' } else { b'0' };
        let tampered = String::from_utf8(bytes).unwrap();
        assert!(!client.verify_signature("order_abc", "pay_xyz", &tampered));

        // Not hex at all
        assert!(!client.verify_signature("order_abc", "pay_xyz", "zz-not-hex"));

        // Signed with a different secret
        let other = RazorpayClient::new("https://api.razorpay.com", "rzp_test_key", "secret_2");
        assert!(!other.verify_signature("order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_rupees_to_paise() {
        assert_eq!(rupees_to_paise(Decimal::from(45999)).unwrap(), 4_599_900);
        // 32999.99 rupees
        assert_eq!(rupees_to_paise(Decimal::new(3_299_999, 2)).unwrap(), 3_299_999);
        assert!(rupees_to_paise(Decimal::ZERO).is_err());
        assert!(rupees_to_paise(Decimal::from(-5)).is_err());
    }
}
