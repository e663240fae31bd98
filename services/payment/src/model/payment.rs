use serde::{Deserialize, Serialize};

use estore_common::api::dto::OrderDto;
use estore_common::error::AppErrorCode;

use crate::api::web::dto::PaymentDto;
use crate::error::AppError;

pub const ENTITY_LABEL: &str = "Payment";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl From<PaymentStatus> for u8 {
    fn from(value: PaymentStatus) -> u8 {
        match value {
            PaymentStatus::NotStarted => 0,
            PaymentStatus::InProgress => 1,
            PaymentStatus::Completed => 2,
        }
    }
}
impl TryFrom<u8> for PaymentStatus {
    type Error = AppError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NotStarted),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Completed),
            _others => Err(AppError {
                code: AppErrorCode::DataCorruption,
                detail: Some(format!("payment-status: {}", value)),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentModel {
    // `None` until first persisted, the repository assigns the key
    pub payment_id: Option<u32>,
    pub order_id: u32,
    pub is_payed: bool,
    pub status: PaymentStatus,
}

impl TryFrom<PaymentDto> for PaymentModel {
    type Error = AppError;
    // the order reference comes from the nested object, its remaining
    // fields are discarded
    fn try_from(value: PaymentDto) -> Result<Self, Self::Error> {
        let order = value
            .order
            .ok_or_else(|| AppError::invalid_input("order reference required"))?;
        if order.order_id == 0 {
            return Err(AppError::invalid_input("order id must be positive"));
        }
        Ok(Self {
            payment_id: value.payment_id,
            order_id: order.order_id,
            is_payed: value.is_payed,
            status: value.payment_status,
        })
    }
}

impl PaymentModel {
    pub fn into_dto(self, order: Option<OrderDto>) -> PaymentDto {
        PaymentDto {
            payment_id: self.payment_id,
            is_payed: self.is_payed,
            payment_status: self.status,
            order,
        }
    }

    // write paths never reach out to the order service, the nested object
    // in the response carries only the foreign ID
    pub fn into_bare_dto(self) -> PaymentDto {
        let order = OrderDto::id_only(self.order_id);
        self.into_dto(Some(order))
    }
}
