use serde::{Deserialize, Serialize};

use estore_common::api::dto::{OrderDto, ProductDto};

/// shape exposed at the API boundary, distinct from the persisted record,
/// the nested objects are present only after successful enrichment or as
/// id-only skeletons on write responses
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub product_id: u32,
    pub order_id: u32,
    pub ordered_quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderDto>,
}

#[derive(Deserialize, Serialize)]
pub struct OrderItemCollectionDto {
    pub collection: Vec<OrderItemDto>,
}
