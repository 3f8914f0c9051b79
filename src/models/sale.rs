// src/models/sale.rs
// DOCUMENTATION: Sale records, payment status and DTOs
// PURPOSE: A sale transfers one artwork to a buyer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::dates;

/// Gallery commission taken on every sale
pub const COMMISSION_RATE: f64 = 0.10;

/// Commission owed on a sale price, rounded to cents
pub fn commission_for(price: f64) -> f64 {
    (price * COMMISSION_RATE * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(format!("unknown payment status: {}", other)),
        }
    }
}

/// Sale row joined with its artwork and the artwork's artist
#[derive(Debug, Clone, FromRow)]
pub struct Sale {
    pub id: Uuid,
    pub artwork_id: Uuid,
    pub buyer: String,
    pub buyer_email: Option<String>,
    pub buyer_phone: Option<String>,
    pub shipping_address: Option<String>,
    pub price: f64,
    pub commission: f64,
    pub payment_method: String,
    pub payment_status: String,
    pub transaction_id: Uuid,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub artwork_title: Option<String>,
    #[sqlx(default)]
    pub artwork_image_url: Option<String>,
    #[sqlx(default)]
    pub artwork_price: Option<f64>,
    #[sqlx(default)]
    pub artist_name: Option<String>,
}

/// Body of POST /api/sales
/// DOCUMENTATION: Required fields are optional here so that a missing one
/// yields "Missing required fields" rather than a JSON parse error
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub artwork_id: Option<Uuid>,
    pub buyer_name: Option<String>,
    pub buyer_email: Option<String>,
    pub buyer_phone: Option<String>,
    pub shipping_address: Option<String>,
    pub payment_method: Option<String>,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "dates::deserialize_opt")]
    pub sale_date: Option<DateTime<Utc>>,
}

/// A create request whose required fields have been checked
#[derive(Debug, Clone)]
pub struct NewSale {
    pub artwork_id: Uuid,
    pub buyer: String,
    pub buyer_email: Option<String>,
    pub buyer_phone: Option<String>,
    pub shipping_address: Option<String>,
    pub payment_method: String,
    pub price: f64,
    pub commission: f64,
    pub payment_status: PaymentStatus,
    pub transaction_id: Uuid,
    pub date: DateTime<Utc>,
}

/// Body of PUT /api/sales/{id}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaleRequest {
    #[serde(alias = "buyerName")]
    pub buyer: Option<String>,
    pub buyer_email: Option<String>,
    pub buyer_phone: Option<String>,
    pub shipping_address: Option<String>,
    pub payment_method: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub price: Option<f64>,
    #[serde(default, alias = "saleDate", deserialize_with = "dates::deserialize_opt")]
    pub date: Option<DateTime<Utc>>,
}

/// Artwork reference embedded in sale responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleArtworkSummary {
    pub id: Uuid,
    pub title: String,
    pub image_url: Option<String>,
    pub price: Option<f64>,
    pub artist: Option<String>,
}

/// Sale DTO for API responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub id: Uuid,
    pub artwork_id: Uuid,
    pub artwork: Option<SaleArtworkSummary>,
    pub buyer: String,
    pub buyer_email: Option<String>,
    pub buyer_phone: Option<String>,
    pub shipping_address: Option<String>,
    pub price: f64,
    pub commission: f64,
    pub total_amount: f64,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub transaction_id: Uuid,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response of GET /api/sales/stats
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SalesStats {
    pub total: f64,
    pub count: i64,
}

impl Sale {
    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status.parse().unwrap_or_else(|e| {
            log::warn!("Sale {} has {}, treating as pending", self.id, e);
            PaymentStatus::Pending
        })
    }

    /// Price plus commission
    pub fn total_amount(&self) -> f64 {
        self.price + self.commission
    }

    pub fn to_response(&self) -> SaleResponse {
        let artwork = self.artwork_title.as_ref().map(|title| SaleArtworkSummary {
            id: self.artwork_id,
            title: title.clone(),
            image_url: self.artwork_image_url.clone(),
            price: self.artwork_price,
            artist: self.artist_name.clone(),
        });

        SaleResponse {
            id: self.id,
            artwork_id: self.artwork_id,
            artwork,
            buyer: self.buyer.clone(),
            buyer_email: self.buyer_email.clone(),
            buyer_phone: self.buyer_phone.clone(),
            shipping_address: self.shipping_address.clone(),
            price: self.price,
            commission: self.commission,
            total_amount: self.total_amount(),
            payment_method: self.payment_method.clone(),
            payment_status: self.payment_status(),
            transaction_id: self.transaction_id,
            date: self.date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commission_is_ten_percent() {
        assert_eq!(commission_for(1000.0), 100.0);
        assert_eq!(commission_for(249.99), 25.0);
        assert_eq!(commission_for(0.0), 0.0);
    }

    #[test]
    fn test_create_request_tolerates_missing_fields() {
        let req: CreateSaleRequest =
            serde_json::from_value(serde_json::json!({ "buyerName": "Ada" })).unwrap();
        assert_eq!(req.buyer_name.as_deref(), Some("Ada"));
        assert!(req.artwork_id.is_none());
        assert!(req.price.is_none());
    }

    #[test]
    fn test_update_request_accepts_buyer_name_alias() {
        let req: UpdateSaleRequest = serde_json::from_value(serde_json::json!({
            "buyerName": "Grace",
            "paymentStatus": "refunded"
        }))
        .unwrap();
        assert_eq!(req.buyer.as_deref(), Some("Grace"));
        assert_eq!(req.payment_status, Some(PaymentStatus::Refunded));
    }

    #[test]
    fn test_response_includes_total_amount() {
        let sale = Sale {
            id: Uuid::new_v4(),
            artwork_id: Uuid::new_v4(),
            buyer: "Ada".to_string(),
            buyer_email: None,
            buyer_phone: None,
            shipping_address: None,
            price: 500.0,
            commission: 50.0,
            payment_method: "card".to_string(),
            payment_status: "completed".to_string(),
            transaction_id: Uuid::new_v4(),
            date: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            artwork_title: Some("Nocturne".to_string()),
            artwork_image_url: None,
            artwork_price: Some(500.0),
            artist_name: Some("Whistler".to_string()),
        };

        let json = serde_json::to_value(sale.to_response()).unwrap();
        assert_eq!(json["totalAmount"], 550.0);
        assert_eq!(json["paymentStatus"], "completed");
        assert_eq!(json["artwork"]["title"], "Nocturne");
        assert_eq!(json["artwork"]["artist"], "Whistler");
    }
}
