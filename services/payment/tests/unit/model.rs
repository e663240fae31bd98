use estore_common::api::dto::OrderDto;
use estore_common::error::AppErrorCode;

use payment::api::web::dto::PaymentDto;
use payment::model::{PaymentModel, PaymentStatus};

#[test]
fn status_code_roundtrip() {
    for status in [
        PaymentStatus::NotStarted,
        PaymentStatus::InProgress,
        PaymentStatus::Completed,
    ] {
        let code = u8::from(status.clone());
        let back = PaymentStatus::try_from(code).unwrap();
        assert_eq!(back, status);
    }
    let result = PaymentStatus::try_from(250u8);
    assert!(result.is_err());
    assert_eq!(result.err().unwrap().code, AppErrorCode::DataCorruption);
}

#[test]
fn convert_dto_ok() {
    let dto = PaymentDto {
        payment_id: None,
        is_payed: false,
        payment_status: PaymentStatus::InProgress,
        order: Some(OrderDto {
            order_desc: Some("discarded on the write path".to_string()),
            ..OrderDto::id_only(37)
        }),
    };
    let result = PaymentModel::try_from(dto);
    assert!(result.is_ok());
    let m = result.unwrap();
    assert!(m.payment_id.is_none());
    assert_eq!(m.order_id, 37);
    assert!(!m.is_payed);
    assert_eq!(m.status, PaymentStatus::InProgress);
}

#[test]
fn convert_dto_requires_order_reference() {
    let dto = PaymentDto {
        payment_id: None,
        is_payed: false,
        payment_status: PaymentStatus::NotStarted,
        order: None,
    };
    let result = PaymentModel::try_from(dto);
    assert!(result.is_err());
    let e = result.err().unwrap();
    assert_eq!(e.code, AppErrorCode::InvalidInput);
    assert!(e.detail.unwrap().contains("order"));
}

#[test]
fn bare_dto_keeps_foreign_id_only() {
    let m = PaymentModel {
        payment_id: Some(5),
        order_id: 37,
        is_payed: true,
        status: PaymentStatus::Completed,
    };
    let dto = m.into_bare_dto();
    assert_eq!(dto.payment_id, Some(5));
    assert!(dto.is_payed);
    assert_eq!(dto.payment_status, PaymentStatus::Completed);
    let order = dto.order.unwrap();
    assert_eq!(order.order_id, 37);
    assert!(order.order_desc.is_none());
    assert!(order.order_fee.is_none());
}
