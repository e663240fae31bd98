use rust_decimal::Decimal;

use payment::api::web::dto::{PaymentCollectionDto, PaymentDto};
use payment::model::PaymentStatus;

#[test]
fn dto_serialize_wire_shape() {
    let dto = PaymentDto {
        payment_id: None,
        is_payed: false,
        payment_status: PaymentStatus::InProgress,
        order: None,
    };
    let value = serde_json::to_value(&dto).unwrap();
    let obj = value.as_object().unwrap();
    // an unassigned key and an absent nested order are omitted entirely
    assert!(obj.get("paymentId").is_none());
    assert!(obj.get("order").is_none());
    assert_eq!(obj.get("isPayed").unwrap().as_bool(), Some(false));
    assert_eq!(
        obj.get("paymentStatus").unwrap().as_str(),
        Some("IN_PROGRESS")
    );
}

#[test]
fn dto_deserialize_remote_payload() {
    let serial = r#"
        {
            "paymentId": 1,
            "isPayed": false,
            "paymentStatus": "IN_PROGRESS",
            "order": {
                "orderId": 1,
                "orderDesc": "Test Order",
                "orderFee": 99.99
            }
        }"#;
    let dto = serde_json::from_str::<PaymentDto>(serial).unwrap();
    assert_eq!(dto.payment_id, Some(1));
    assert!(!dto.is_payed);
    assert_eq!(dto.payment_status, PaymentStatus::InProgress);
    let order = dto.order.unwrap();
    assert_eq!(order.order_desc.as_deref(), Some("Test Order"));
    assert_eq!(order.order_fee, Some(Decimal::new(9999, 2)));
}

#[test]
fn collection_wrapper_shape() {
    let dto = PaymentDto {
        payment_id: Some(1),
        is_payed: true,
        payment_status: PaymentStatus::Completed,
        order: None,
    };
    let wrapped = PaymentCollectionDto {
        collection: vec![dto],
    };
    let value = serde_json::to_value(&wrapped).unwrap();
    let items = value.get("collection").unwrap().as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].get("paymentStatus").unwrap().as_str(),
        Some("COMPLETED")
    );
}
