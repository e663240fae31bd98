use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// wire shape of a product record served by the product service, field
/// names follow the JSON convention shared by all sibling services.
/// Only the key is mandatory, a write response may carry an id-only
/// skeleton of this object
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub product_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_unit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

/// wire shape of an order record served by the order service
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_date: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_fee: Option<Decimal>,
}

impl ProductDto {
    pub fn id_only(product_id: u32) -> Self {
        Self {
            product_id,
            product_title: None,
            image_url: None,
            sku: None,
            price_unit: None,
            quantity: None,
        }
    }
}

impl OrderDto {
    pub fn id_only(order_id: u32) -> Self {
        Self {
            order_id,
            order_date: None,
            order_desc: None,
            order_fee: None,
        }
    }
}
