//! Delhivery integration via REST API (no SDK dependency)
//!
//! Serviceability: GET /c/api/pin-codes/json/?filter_codes={pin}
//! Expected TAT:   GET /api/dc/expected_tat
//! Shipments:      POST /api/cmu/create.json (form payload, `data` is JSON)
//! Tracking:       GET /api/v1/packages/json/?waybill={wb}
//!
//! All endpoints authenticate with an `Authorization: Token {key}` header.

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;
use shared::models::{Order, PaymentMethod};
use std::time::Duration;

use super::{
    DeliveryEstimate, GatewayError, GatewayResult, LogisticsProvider, Serviceability, Shipment,
    TrackingEvent, TrackingInfo,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct DelhiveryClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
    pickup_location: String,
    origin_pincode: String,
}

impl DelhiveryClient {
    pub fn new(base_url: &str, api_token: &str, pickup_location: &str, origin_pincode: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            pickup_location: pickup_location.to_string(),
            origin_pincode: origin_pincode.to_string(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Token {}", self.api_token)
    }

    async fn read_json(resp: reqwest::Response) -> GatewayResult<Value> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Api { status, body });
        }
        Ok(resp.json().await?)
    }
}

/// Pull the serviceability verdict out of a pin-code lookup response
fn parse_serviceability(pincode: &str, data: &Value) -> Serviceability {
    let postal = data["delivery_codes"]
        .as_array()
        .and_then(|codes| codes.first())
        .map(|entry| &entry["postal_code"]);

    match postal {
        Some(postal) if !postal.is_null() => Serviceability {
            pincode: pincode.to_string(),
            serviceable: true,
            cod_available: postal["cod"].as_str() == Some("Y"),
        },
        _ => Serviceability {
            pincode: pincode.to_string(),
            serviceable: false,
            cod_available: false,
        },
    }
}

/// Pull the scan history out of a package tracking response
fn parse_tracking(waybill: &str, data: &Value) -> GatewayResult<TrackingInfo> {
    let shipment = &data["ShipmentData"][0]["Shipment"];
    if shipment.is_null() {
        return Err(GatewayError::UnexpectedResponse(data.to_string()));
    }

    let current_status = shipment["Status"]["Status"].as_str().map(String::from);
    let events = shipment["Scans"]
        .as_array()
        .map(|scans| {
            scans
                .iter()
                .map(|scan| {
                    let detail = &scan["ScanDetail"];
                    TrackingEvent {
                        status: detail["Scan"].as_str().unwrap_or_default().to_string(),
                        location: detail["ScannedLocation"].as_str().map(String::from),
                        timestamp: detail["ScanDateTime"].as_str().map(String::from),
                        remarks: detail["Instructions"].as_str().map(String::from),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(TrackingInfo {
        waybill: waybill.to_string(),
        current_status,
        events,
    })
}

#[async_trait]
impl LogisticsProvider for DelhiveryClient {
    async fn check_serviceability(&self, pincode: &str) -> GatewayResult<Serviceability> {
        let resp = self
            .client
            .get(format!("{}/c/api/pin-codes/json/", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", self.auth_header())
            .query(&[("filter_codes", pincode)])
            .send()
            .await?;

        let data = Self::read_json(resp).await?;
        Ok(parse_serviceability(pincode, &data))
    }

    async fn expected_delivery(&self, destination_pincode: &str) -> GatewayResult<DeliveryEstimate> {
        let resp = self
            .client
            .get(format!("{}/api/dc/expected_tat", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", self.auth_header())
            .query(&[
                ("origin_pin", self.origin_pincode.as_str()),
                ("destination_pin", destination_pincode),
                ("mot", "S"),
                ("pdt", "B2C"),
            ])
            .send()
            .await?;

        let data = Self::read_json(resp).await?;
        let expected_delivery = data["data"]["expected_delivery_date"]
            .as_str()
            .or_else(|| data["expected_delivery_date"].as_str())
            .map(String::from);

        Ok(DeliveryEstimate {
            origin: self.origin_pincode.clone(),
            destination: destination_pincode.to_string(),
            expected_delivery,
        })
    }

    async fn create_shipment(&self, order: &Order) -> GatewayResult<Shipment> {
        let cod_amount = match order.payment.method {
            PaymentMethod::Cod => order.product.price.to_f64().unwrap_or(0.0),
            PaymentMethod::Online => 0.0,
        };
        let payment_mode = match order.payment.method {
            PaymentMethod::Cod => "COD",
            PaymentMethod::Online => "Prepaid",
        };

        let shipment_data = serde_json::json!({
            "shipments": [{
                "name": order.shipping_address.full_name,
                "add": order.shipping_address.line1,
                "city": order.shipping_address.city,
                "state": order.shipping_address.state,
                "pin": order.shipping_address.pincode,
                "phone": order.shipping_address.phone,
                "order": order.order_number,
                "payment_mode": payment_mode,
                "cod_amount": cod_amount,
                "products_desc": order.product.name,
                "quantity": 1,
            }],
            "pickup_location": { "name": self.pickup_location },
        });

        let payload = shipment_data.to_string();
        let resp = self
            .client
            .post(format!("{}/api/cmu/create.json", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", self.auth_header())
            .form(&[("format", "json"), ("data", payload.as_str())])
            .send()
            .await?;

        let data = Self::read_json(resp).await?;
        let package = data["packages"]
            .as_array()
            .and_then(|packages| packages.first());
        let waybill = package.and_then(|p| p["waybill"].as_str()).unwrap_or_default();

        if waybill.is_empty() {
            return Err(GatewayError::UnexpectedResponse(data.to_string()));
        }

        Ok(Shipment {
            waybill: waybill.to_string(),
            order_number: order.order_number.clone(),
            status: package
                .and_then(|p| p["status"].as_str())
                .unwrap_or("Registered")
                .to_string(),
        })
    }

    async fn track(&self, waybill: &str) -> GatewayResult<TrackingInfo> {
        let resp = self
            .client
            .get(format!("{}/api/v1/packages/json/", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", self.auth_header())
            .query(&[("waybill", waybill)])
            .send()
            .await?;

        let data = Self::read_json(resp).await?;
        parse_tracking(waybill, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_serviceability() {
        let data = json!({
            "delivery_codes": [{
                "postal_code": { "pin": 560001, "cod": "Y", "pre_paid": "Y" }
            }]
        });
        let verdict = parse_serviceability("560001", &data);
        assert!(verdict.serviceable);
        assert!(verdict.cod_available);

        let prepaid_only = json!({
            "delivery_codes": [{
                "postal_code": { "pin": 190001, "cod": "N", "pre_paid": "Y" }
            }]
        });
        let verdict = parse_serviceability("190001", &prepaid_only);
        assert!(verdict.serviceable);
        assert!(!verdict.cod_available);
    }

    #[test]
    fn test_parse_serviceability_empty() {
        let data = json!({ "delivery_codes": [] });
        let verdict = parse_serviceability("999999", &data);
        assert!(!verdict.serviceable);
        assert!(!verdict.cod_available);
    }

    #[test]
    fn test_parse_tracking() {
        let data = json!({
            "ShipmentData": [{
                "Shipment": {
                    "Status": { "Status": "In Transit" },
                    "Scans": [
                        {
                            "ScanDetail": {
                                "Scan": "Picked up",
                                "ScannedLocation": "Delhi_Hub",
                                "ScanDateTime": "2026-08-18T10:15:00",
                                "Instructions": "Package picked"
                            }
                        },
                        {
                            "ScanDetail": {
                                "Scan": "In Transit",
                                "ScannedLocation": "Bengaluru_Hub"
                            }
                        }
                    ]
                }
            }]
        });

        let info = parse_tracking("WB123", &data).unwrap();
        assert_eq!(info.current_status.as_deref(), Some("In Transit"));
        assert_eq!(info.events.len(), 2);
        assert_eq!(info.events[0].status, "Picked up");
        assert_eq!(info.events[1].location.as_deref(), Some("Bengaluru_Hub"));
        assert!(info.events[1].timestamp.is_none());
    }

    #[test]
    fn test_parse_tracking_unknown_waybill() {
        let data = json!({ "ShipmentData": [] });
        assert!(parse_tracking("WB404", &data).is_err());
    }
}
