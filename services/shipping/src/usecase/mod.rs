mod manage_order_item;

pub use manage_order_item::{
    DiscardOrderItemUseCase, FetchOrderItemUseCase, ListOrderItemsUseCase, StoreOrderItemUseCase,
    UpdateOrderItemUseCase,
};
