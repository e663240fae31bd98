use std::boxed::Box;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use estore_common::adapter::datastore::{
    AbstInMemoryDStore, AppInMemFetchedSingleRow, AppInMemUpdateData,
};
use estore_common::error::AppErrorCode;

use super::AbsOrderItemRepo;
use crate::error::AppError;
use crate::model::{OrderItemKey, OrderItemModel};

const TABLE_LABEL: &str = "order_item";

enum InMemColIdx {
    OrderedQuantity,
    TotNumColumns,
}

impl From<InMemColIdx> for usize {
    fn from(value: InMemColIdx) -> usize {
        match value {
            InMemColIdx::OrderedQuantity => 0,
            InMemColIdx::TotNumColumns => 1,
        }
    }
}

pub struct OrderItemInMemRepo {
    datastore: Arc<Box<dyn AbstInMemoryDStore>>,
}

impl OrderItemInMemRepo {
    pub async fn new(m: Arc<Box<dyn AbstInMemoryDStore>>) -> Result<Self, AppError> {
        m.create_table(TABLE_LABEL).await.map_err(AppError::from)?;
        Ok(Self { datastore: m })
    }

    fn render_pkey(id: &OrderItemKey) -> String {
        format!("{}-{}", id.product_id, id.order_id)
    }

    fn parse_row(pkey: &str, row: &AppInMemFetchedSingleRow) -> Result<OrderItemModel, AppError> {
        let corrupt = |detail: String| AppError {
            code: AppErrorCode::DataCorruption,
            detail: Some(detail),
        };
        let id_elms = pkey.split('-').collect::<Vec<&str>>();
        if id_elms.len() != 2 {
            return Err(corrupt(format!("order-item, malformed key: {}", pkey)));
        }
        let product_id = id_elms[0]
            .parse::<u32>()
            .map_err(|e| corrupt(format!("order-item, product-id: {}", e)))?;
        let order_id = id_elms[1]
            .parse::<u32>()
            .map_err(|e| corrupt(format!("order-item, order-id: {}", e)))?;
        let qty_idx = usize::from(InMemColIdx::OrderedQuantity);
        let ordered_quantity = row
            .get(qty_idx)
            .ok_or_else(|| corrupt(format!("order-item, missing column, key: {}", pkey)))?
            .parse::<u32>()
            .map_err(|e| corrupt(format!("order-item, quantity: {}", e)))?;
        Ok(OrderItemModel {
            id: OrderItemKey {
                product_id,
                order_id,
            },
            ordered_quantity,
        })
    } // end of fn parse_row
}

#[async_trait]
impl AbsOrderItemRepo for OrderItemInMemRepo {
    async fn fetch_all(&self) -> Result<Vec<OrderItemModel>, AppError> {
        let rows = self
            .datastore
            .fetch_all(TABLE_LABEL)
            .await
            .map_err(AppError::from)?;
        rows.iter()
            .map(|(pkey, row)| Self::parse_row(pkey, row))
            .collect::<Result<Vec<_>, _>>()
    }

    async fn fetch_one(&self, id: &OrderItemKey) -> Result<Option<OrderItemModel>, AppError> {
        let pkey = Self::render_pkey(id);
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

    async fn save(&self, item: OrderItemModel) -> Result<OrderItemModel, AppError> {
        let row = {
            let num_cols = usize::from(InMemColIdx::TotNumColumns);
            let mut r = (0..num_cols)
                .map(|_n| String::new())
                .collect::<AppInMemFetchedSingleRow>();
            let idx = usize::from(InMemColIdx::OrderedQuantity);
            r[idx] = item.ordered_quantity.to_string();
            r
        };
        let table = HashMap::from([(Self::render_pkey(&item.id), row)]);
        let data: AppInMemUpdateData = HashMap::from([(TABLE_LABEL.to_string(), table)]);
        let _num_saved = self.datastore.save(data).await.map_err(AppError::from)?;
        Ok(item)
    }

    async fn delete(&self, id: &OrderItemKey) -> Result<bool, AppError> {
        let info = HashMap::from([(TABLE_LABEL.to_string(), vec![Self::render_pkey(id)])]);
        let num_removed = self.datastore.delete(info).await.map_err(AppError::from)?;
        Ok(num_removed > 0)
    }
} // end of impl AbsOrderItemRepo
