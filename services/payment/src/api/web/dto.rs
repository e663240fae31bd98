use serde::{Deserialize, Serialize};

use estore_common::api::dto::OrderDto;

use crate::model::PaymentStatus;

/// shape exposed at the API boundary, distinct from the persisted record,
/// the nested order is present only after successful enrichment or as an
/// id-only skeleton on write responses
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<u32>,
    pub is_payed: bool,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderDto>,
}

#[derive(Deserialize, Serialize)]
pub struct PaymentCollectionDto {
    pub collection: Vec<PaymentDto>,
}
