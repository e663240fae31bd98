mod order_item;

pub use order_item::{OrderItemKey, OrderItemModel, ENTITY_LABEL};
