use std::fmt::Display;

use estore_common::api::dto::{OrderDto, ProductDto};

use crate::api::web::dto::OrderItemDto;
use crate::error::AppError;

pub const ENTITY_LABEL: &str = "OrderItem";

/// composite identity of an order-item record, no two records share
/// both component values
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderItemKey {
    pub product_id: u32,
    pub order_id: u32,
}

impl Display for OrderItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(productId:{}, orderId:{})",
            self.product_id, self.order_id
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemModel {
    pub id: OrderItemKey,
    pub ordered_quantity: u32,
}

impl TryFrom<OrderItemDto> for OrderItemModel {
    type Error = AppError;
    // nested objects in the input carry nothing this record keeps locally,
    // their bodies are discarded
    fn try_from(value: OrderItemDto) -> Result<Self, Self::Error> {
        if value.product_id == 0 || value.order_id == 0 {
            return Err(AppError::invalid_input(
                "product id and order id must be positive",
            ));
        }
        if value.ordered_quantity == 0 {
            return Err(AppError::invalid_input("ordered quantity must be positive"));
        }
        Ok(Self {
            id: OrderItemKey {
                product_id: value.product_id,
                order_id: value.order_id,
            },
            ordered_quantity: value.ordered_quantity,
        })
    }
}

impl OrderItemModel {
    pub fn into_dto(self, product: Option<ProductDto>, order: Option<OrderDto>) -> OrderItemDto {
        OrderItemDto {
            product_id: self.id.product_id,
            order_id: self.id.order_id,
            ordered_quantity: self.ordered_quantity,
            product,
            order,
        }
    }

    // write paths never reach out to sibling services, the nested objects
    // in the response carry only the foreign IDs
    pub fn into_bare_dto(self) -> OrderItemDto {
        let product = ProductDto::id_only(self.id.product_id);
        let order = OrderDto::id_only(self.id.order_id);
        self.into_dto(Some(product), Some(order))
    }
}
