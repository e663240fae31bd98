use std::boxed::Box;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use estore_common::adapter::datastore::{
    AbstInMemoryDStore, AppInMemFetchedSingleRow, AppInMemUpdateData,
};
use estore_common::error::AppErrorCode;

use super::AbsPaymentRepo;
use crate::error::AppError;
use crate::model::{PaymentModel, PaymentStatus};

const TABLE_LABEL: &str = "payment";

enum InMemColIdx {
    OrderId,
    IsPayed,
    Status,
    TotNumColumns,
}

impl From<InMemColIdx> for usize {
    fn from(value: InMemColIdx) -> usize {
        match value {
            InMemColIdx::OrderId => 0,
            InMemColIdx::IsPayed => 1,
            InMemColIdx::Status => 2,
            InMemColIdx::TotNumColumns => 3,
        }
    }
}

pub struct PaymentInMemRepo {
    datastore: Arc<Box<dyn AbstInMemoryDStore>>,
}

impl PaymentInMemRepo {
    pub async fn new(m: Arc<Box<dyn AbstInMemoryDStore>>) -> Result<Self, AppError> {
        m.create_table(TABLE_LABEL).await.map_err(AppError::from)?;
        Ok(Self { datastore: m })
    }

    fn parse_row(pkey: &str, row: &AppInMemFetchedSingleRow) -> Result<PaymentModel, AppError> {
        let corrupt = |detail: String| AppError {
            code: AppErrorCode::DataCorruption,
            detail: Some(detail),
        };
        let payment_id = pkey
            .parse::<u32>()
            .map_err(|e| corrupt(format!("payment, key: {}", e)))?;
        let read_col = |idx: InMemColIdx| {
            let i = usize::from(idx);
            row.get(i)
                .ok_or_else(|| corrupt(format!("payment, missing column, key: {}", pkey)))
        };
        let order_id = read_col(InMemColIdx::OrderId)?
            .parse::<u32>()
            .map_err(|e| corrupt(format!("payment, order-id: {}", e)))?;
        let is_payed = read_col(InMemColIdx::IsPayed)?
            .parse::<bool>()
            .map_err(|e| corrupt(format!("payment, is-payed: {}", e)))?;
        let status_code = read_col(InMemColIdx::Status)?
            .parse::<u8>()
            .map_err(|e| corrupt(format!("payment, status: {}", e)))?;
        let status = PaymentStatus::try_from(status_code)?;
        Ok(PaymentModel {
            payment_id: Some(payment_id),
            order_id,
            is_payed,
            status,
        })
    } // end of fn parse_row

    async fn next_payment_id(&self) -> Result<u32, AppError> {
        let rows = self
            .datastore
            .fetch_all(TABLE_LABEL)
            .await
            .map_err(AppError::from)?;
        let curr_max = rows
            .keys()
            .filter_map(|k| k.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        Ok(curr_max + 1)
    }
}

#[async_trait]
impl AbsPaymentRepo for PaymentInMemRepo {
    async fn fetch_all(&self) -> Result<Vec<PaymentModel>, AppError> {
        let rows = self
            .datastore
            .fetch_all(TABLE_LABEL)
            .await
            .map_err(AppError::from)?;
        rows.iter()
            .map(|(pkey, row)| Self::parse_row(pkey, row))
            .collect::<Result<Vec<_>, _>>()
    }

    async fn fetch_one(&self, payment_id: u32) -> Result<Option<PaymentModel>, AppError> {
        let pkey = payment_id.to_string();
        let info = HashMap::from([(TABLE_LABEL.to_string(), vec![pkey.clone()])]);
        let mut resultset = self.datastore.fetch(info).await.map_err(AppError::from)?;
        let found = resultset
            .remove(TABLE_LABEL)
            .and_then(|mut t| t.remove(pkey.as_str()));
        match found {
            Some(row) => Self::parse_row(pkey.as_str(), &row).map(Some),
            None => Ok(None),
        }
    }

    async fn save(&self, payment: PaymentModel) -> Result<PaymentModel, AppError> {
        let payment_id = match payment.payment_id {
            Some(v) => v,
            None => self.next_payment_id().await?,
        };
        let row = {
            let num_cols = usize::from(InMemColIdx::TotNumColumns);
            let mut r = (0..num_cols)
                .map(|_n| String::new())
                .collect::<AppInMemFetchedSingleRow>();
            let cols = [
                (InMemColIdx::OrderId, payment.order_id.to_string()),
                (InMemColIdx::IsPayed, payment.is_payed.to_string()),
                (
                    InMemColIdx::Status,
                    u8::from(payment.status.clone()).to_string(),
                ),
            ];
            for (idx, val) in cols {
                let i = usize::from(idx);
                r[i] = val;
            }
            r
        };
        let table = HashMap::from([(payment_id.to_string(), row)]);
        let data: AppInMemUpdateData = HashMap::from([(TABLE_LABEL.to_string(), table)]);
        let _num_saved = self.datastore.save(data).await.map_err(AppError::from)?;
        Ok(PaymentModel {
            payment_id: Some(payment_id),
            ..payment
        })
    } // end of fn save

    async fn delete(&self, payment_id: u32) -> Result<bool, AppError> {
        let info = HashMap::from([(TABLE_LABEL.to_string(), vec![payment_id.to_string()])]);
        let num_removed = self.datastore.delete(info).await.map_err(AppError::from)?;
        Ok(num_removed > 0)
    }
} // end of impl AbsPaymentRepo
