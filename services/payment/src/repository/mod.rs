use std::boxed::Box;
use std::sync::Arc;

use async_trait::async_trait;

use estore_common::error::AppErrorCode;

use crate::error::AppError;
use crate::model::PaymentModel;
use crate::AppDataStoreContext;

mod in_mem;
// make in-memory repo visible for testing purpose
pub use in_mem::PaymentInMemRepo;

// the repository instance may be used across an await,
// the future created by app callers has to be able to pass to different threads
// , it is the reason to add `Send` and `Sync` as super-traits
#[async_trait]
pub trait AbsPaymentRepo: Sync + Send {
    async fn fetch_all(&self) -> Result<Vec<PaymentModel>, AppError>;

    async fn fetch_one(&self, payment_id: u32) -> Result<Option<PaymentModel>, AppError>;

    // full-record upsert, a model without a key is assigned the next
    // available payment ID
    async fn save(&self, payment: PaymentModel) -> Result<PaymentModel, AppError>;

    // remove the row of the given key, reports whether a row was actually
    // removed ; an absent key is not an error at this layer
    async fn delete(&self, payment_id: u32) -> Result<bool, AppError>;
}

pub async fn app_repo_payment(
    ds: Arc<AppDataStoreContext>,
) -> Result<Box<dyn AbsPaymentRepo>, AppError> {
    let in_mem = ds.in_mem.as_ref().ok_or(AppError {
        code: AppErrorCode::MissingDataStore,
        detail: Some("payment".to_string()),
    })?;
    let repo = PaymentInMemRepo::new(in_mem.clone()).await?;
    Ok(Box::new(repo))
}
