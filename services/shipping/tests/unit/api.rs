use rust_decimal::Decimal;

use shipping::api::web::dto::{OrderItemCollectionDto, OrderItemDto};

#[test]
fn dto_serialize_omits_absent_nested_objects() {
    let dto = OrderItemDto {
        product_id: 185,
        order_id: 92,
        ordered_quantity: 4,
        product: None,
        order: None,
    };
    let value = serde_json::to_value(&dto).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("productId").unwrap().as_u64(), Some(185));
    assert_eq!(obj.get("orderId").unwrap().as_u64(), Some(92));
    assert_eq!(obj.get("orderedQuantity").unwrap().as_u64(), Some(4));
    assert!(obj.get("product").is_none());
    assert!(obj.get("order").is_none());
}

#[test]
fn dto_deserialize_remote_payload() {
    // payload shape returned by sibling services on the enrichment path
    let serial = r#"
        {
            "productId": 1,
            "orderId": 1,
            "orderedQuantity": 2,
            "product": {
                "productId": 1,
                "productTitle": "Laptop ASUS",
                "imageUrl": "laptop-image.jpg",
                "sku": "LAPTOP-001",
                "priceUnit": 999.99,
                "quantity": 25
            },
            "order": {
                "orderId": 1,
                "orderDesc": "Test Order",
                "orderFee": 1999.98
            }
        }"#;
    let dto = serde_json::from_str::<OrderItemDto>(serial).unwrap();
    assert_eq!(dto.ordered_quantity, 2);
    let product = dto.product.unwrap();
    assert_eq!(product.product_title.as_deref(), Some("Laptop ASUS"));
    assert_eq!(product.price_unit, Some(Decimal::new(99999, 2)));
    let order = dto.order.unwrap();
    assert_eq!(order.order_desc.as_deref(), Some("Test Order"));
    assert_eq!(order.order_fee, Some(Decimal::new(199998, 2)));
    assert!(order.order_date.is_none());
}

#[test]
fn collection_wrapper_shape() {
    let dto = OrderItemDto {
        product_id: 185,
        order_id: 92,
        ordered_quantity: 4,
        product: None,
        order: None,
    };
    let wrapped = OrderItemCollectionDto {
        collection: vec![dto],
    };
    let value = serde_json::to_value(&wrapped).unwrap();
    let items = value.get("collection").unwrap().as_array().unwrap();
    assert_eq!(items.len(), 1);
}
