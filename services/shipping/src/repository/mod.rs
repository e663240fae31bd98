use std::boxed::Box;
use std::sync::Arc;

use async_trait::async_trait;

use estore_common::error::AppErrorCode;

use crate::error::AppError;
use crate::model::{OrderItemKey, OrderItemModel};
use crate::AppDataStoreContext;

mod in_mem;
// make in-memory repo visible for testing purpose
pub use in_mem::OrderItemInMemRepo;

// the repository instance may be used across an await,
// the future created by app callers has to be able to pass to different threads
// , it is the reason to add `Send` and `Sync` as super-traits
#[async_trait]
pub trait AbsOrderItemRepo: Sync + Send {
    async fn fetch_all(&self) -> Result<Vec<OrderItemModel>, AppError>;

    async fn fetch_one(&self, id: &OrderItemKey) -> Result<Option<OrderItemModel>, AppError>;

    // full-record upsert, there is no partial-patch variant
    async fn save(&self, item: OrderItemModel) -> Result<OrderItemModel, AppError>;

    // remove the row of the given key, reports whether a row was actually
    // removed ; an absent key is not an error at this layer
    async fn delete(&self, id: &OrderItemKey) -> Result<bool, AppError>;
}

pub async fn app_repo_order_item(
    ds: Arc<AppDataStoreContext>,
) -> Result<Box<dyn AbsOrderItemRepo>, AppError> {
    let in_mem = ds.in_mem.as_ref().ok_or(AppError {
        code: AppErrorCode::MissingDataStore,
        detail: Some("order-item".to_string()),
    })?;
    let repo = OrderItemInMemRepo::new(in_mem.clone()).await?;
    Ok(Box::new(repo))
}
