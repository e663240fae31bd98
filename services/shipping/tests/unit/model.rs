use estore_common::api::dto::{OrderDto, ProductDto};
use estore_common::error::AppErrorCode;

use shipping::api::web::dto::OrderItemDto;
use shipping::model::{OrderItemKey, OrderItemModel};

fn ut_dto(product_id: u32, order_id: u32, ordered_quantity: u32) -> OrderItemDto {
    OrderItemDto {
        product_id,
        order_id,
        ordered_quantity,
        product: None,
        order: None,
    }
}

#[test]
fn convert_dto_ok() {
    let mut dto = ut_dto(185, 92, 4);
    // bodies of nested objects in a write request are discarded
    dto.product = Some(ProductDto {
        product_title: Some("anything".to_string()),
        ..ProductDto::id_only(185)
    });
    dto.order = Some(OrderDto::id_only(92));
    let result = OrderItemModel::try_from(dto);
    assert!(result.is_ok());
    let m = result.unwrap();
    assert_eq!(m.id.product_id, 185);
    assert_eq!(m.id.order_id, 92);
    assert_eq!(m.ordered_quantity, 4);
}

#[test]
fn convert_dto_reject_zero_quantity() {
    let result = OrderItemModel::try_from(ut_dto(185, 92, 0));
    assert!(result.is_err());
    let e = result.err().unwrap();
    assert_eq!(e.code, AppErrorCode::InvalidInput);
    assert!(e.detail.unwrap().contains("quantity"));
}

#[test]
fn convert_dto_reject_zero_key_component() {
    let result = OrderItemModel::try_from(ut_dto(0, 92, 4));
    assert!(result.is_err());
    assert_eq!(result.err().unwrap().code, AppErrorCode::InvalidInput);
    let result = OrderItemModel::try_from(ut_dto(185, 0, 4));
    assert!(result.is_err());
    assert_eq!(result.err().unwrap().code, AppErrorCode::InvalidInput);
}

#[test]
fn key_display_contains_components() {
    let id = OrderItemKey {
        product_id: 185,
        order_id: 92,
    };
    let rendered = id.to_string();
    assert!(rendered.contains("185"));
    assert!(rendered.contains("92"));
}

#[test]
fn bare_dto_keeps_foreign_ids_only() {
    let m = OrderItemModel {
        id: OrderItemKey {
            product_id: 185,
            order_id: 92,
        },
        ordered_quantity: 4,
    };
    let dto = m.into_bare_dto();
    assert_eq!(dto.ordered_quantity, 4);
    let product = dto.product.unwrap();
    assert_eq!(product.product_id, 185);
    assert!(product.product_title.is_none());
    assert!(product.price_unit.is_none());
    let order = dto.order.unwrap();
    assert_eq!(order.order_id, 92);
    assert!(order.order_desc.is_none());
}
