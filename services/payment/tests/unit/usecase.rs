use std::boxed::Box;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use estore_common::api::dto::OrderDto;
use estore_common::error::AppErrorCode;

use payment::adapter::thirdparty::AbsOrderSvcClient;
use payment::api::web::dto::PaymentDto;
use payment::error::AppError;
use payment::model::{PaymentModel, PaymentStatus};
use payment::repository::{app_repo_payment, AbsPaymentRepo};
use payment::usecase::{
    DiscardPaymentUseCase, FetchPaymentUseCase, ListPaymentsUseCase, StorePaymentUseCase,
    UpdatePaymentUseCase,
};

use super::{ut_logctx, ut_setup_dstore_ctx};

struct MockOrderSvcClient {
    data: HashMap<u32, OrderDto>,
    num_calls: Arc<AtomicU32>,
}

#[async_trait]
impl AbsOrderSvcClient for MockOrderSvcClient {
    async fn fetch_order(&self, order_id: u32) -> Result<OrderDto, AppError> {
        self.num_calls.fetch_add(1, Ordering::Relaxed);
        self.data.get(&order_id).cloned().ok_or(AppError {
            code: AppErrorCode::RemoteSvcUnavailable,
            detail: Some(format!("order-id:{}, status:500", order_id)),
        })
    }
}

fn ut_order_client(
    orders: Vec<OrderDto>,
) -> (Arc<Box<dyn AbsOrderSvcClient>>, Arc<AtomicU32>) {
    let num_calls = Arc::new(AtomicU32::new(0));
    let c = MockOrderSvcClient {
        data: orders.into_iter().map(|d| (d.order_id, d)).collect(),
        num_calls: num_calls.clone(),
    };
    (Arc::new(Box::new(c)), num_calls)
}

fn ut_order_test() -> OrderDto {
    OrderDto {
        order_id: 1,
        order_date: None,
        order_desc: Some("Test Order".to_string()),
        order_fee: Some(Decimal::new(9999, 2)),
    }
}

fn ut_in_progress_dto() -> PaymentDto {
    PaymentDto {
        payment_id: None,
        is_payed: false,
        payment_status: PaymentStatus::InProgress,
        order: Some(OrderDto::id_only(1)),
    }
}

#[tokio::test]
async fn list_enriched_ok() {
    let ds_ctx = ut_setup_dstore_ctx(32);
    let repo = app_repo_payment(ds_ctx.clone()).await.unwrap();
    let seed = PaymentModel {
        payment_id: None,
        order_id: 1,
        is_payed: false,
        status: PaymentStatus::InProgress,
    };
    repo.save(seed).await.unwrap();
    let (order_client, order_calls) = ut_order_client(vec![ut_order_test()]);
    let uc = ListPaymentsUseCase {
        repo: app_repo_payment(ds_ctx).await.unwrap(),
        order_client,
        logctx: ut_logctx(),
    };
    let result = uc.execute().await;
    assert!(result.is_ok());
    let collection = result.unwrap();
    assert_eq!(collection.len(), 1);
    let dto = &collection[0];
    assert_eq!(dto.payment_status, PaymentStatus::InProgress);
    assert!(!dto.is_payed);
    let order = dto.order.as_ref().unwrap();
    assert_eq!(order.order_desc.as_deref(), Some("Test Order"));
    assert_eq!(order.order_fee, Some(Decimal::new(9999, 2)));
    assert_eq!(order_calls.load(Ordering::Relaxed), 1);
} // end of fn list_enriched_ok

#[tokio::test]
async fn list_aborts_when_remote_fails() {
    let ds_ctx = ut_setup_dstore_ctx(32);
    let repo = app_repo_payment(ds_ctx.clone()).await.unwrap();
    let seed = PaymentModel {
        payment_id: None,
        order_id: 1,
        is_payed: false,
        status: PaymentStatus::InProgress,
    };
    repo.save(seed).await.unwrap();
    // order service answers 500, no partial result comes back
    let (order_client, _order_calls) = ut_order_client(Vec::new());
    let uc = ListPaymentsUseCase {
        repo: app_repo_payment(ds_ctx).await.unwrap(),
        order_client,
        logctx: ut_logctx(),
    };
    let result = uc.execute().await;
    assert!(result.is_err());
    assert_eq!(
        result.err().unwrap().code,
        AppErrorCode::RemoteSvcUnavailable
    );
}

#[tokio::test]
async fn fetch_by_id_enriched_ok() {
    let ds_ctx = ut_setup_dstore_ctx(32);
    let repo = app_repo_payment(ds_ctx.clone()).await.unwrap();
    let seed = PaymentModel {
        payment_id: None,
        order_id: 1,
        is_payed: false,
        status: PaymentStatus::InProgress,
    };
    let saved = repo.save(seed).await.unwrap();
    let (order_client, _order_calls) = ut_order_client(vec![ut_order_test()]);
    let uc = FetchPaymentUseCase {
        repo: app_repo_payment(ds_ctx).await.unwrap(),
        order_client,
        logctx: ut_logctx(),
    };
    let result = uc.execute(saved.payment_id.unwrap()).await;
    assert!(result.is_ok());
    let dto = result.unwrap();
    assert_eq!(dto.payment_id, saved.payment_id);
    assert_eq!(dto.payment_status, PaymentStatus::InProgress);
    assert_eq!(
        dto.order.unwrap().order_desc.as_deref(),
        Some("Test Order")
    );
}

#[tokio::test]
async fn fetch_by_id_not_found() {
    let ds_ctx = ut_setup_dstore_ctx(32);
    let (order_client, order_calls) = ut_order_client(vec![ut_order_test()]);
    let uc = FetchPaymentUseCase {
        repo: app_repo_payment(ds_ctx).await.unwrap(),
        order_client,
        logctx: ut_logctx(),
    };
    let result = uc.execute(999).await;
    assert!(result.is_err());
    let e = result.err().unwrap();
    assert_eq!(e.code, AppErrorCode::RecordNotFound);
    let detail = e.detail.unwrap();
    assert!(detail.contains("Payment with id: 999 not found"));
    // an absent record never triggers the remote lookup
    assert_eq!(order_calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn store_assigns_fresh_id() {
    let ds_ctx = ut_setup_dstore_ctx(32);
    let uc = StorePaymentUseCase {
        repo: app_repo_payment(ds_ctx.clone()).await.unwrap(),
        logctx: ut_logctx(),
    };
    let result = uc.execute(ut_in_progress_dto()).await;
    assert!(result.is_ok());
    let dto = result.unwrap();
    let first_id = dto.payment_id.unwrap();
    assert_eq!(dto.payment_status, PaymentStatus::InProgress);
    // write path performs no enrichment, the nested order only carries the ID
    let order = dto.order.unwrap();
    assert_eq!(order.order_id, 1);
    assert!(order.order_desc.is_none());
    let uc = StorePaymentUseCase {
        repo: app_repo_payment(ds_ctx).await.unwrap(),
        logctx: ut_logctx(),
    };
    let result = uc.execute(ut_in_progress_dto()).await;
    let second_id = result.unwrap().payment_id.unwrap();
    assert!(second_id > first_id);
}

#[tokio::test]
async fn store_requires_order_reference() {
    let ds_ctx = ut_setup_dstore_ctx(32);
    let uc = StorePaymentUseCase {
        repo: app_repo_payment(ds_ctx.clone()).await.unwrap(),
        logctx: ut_logctx(),
    };
    let req = PaymentDto {
        payment_id: None,
        is_payed: false,
        payment_status: PaymentStatus::NotStarted,
        order: None,
    };
    let result = uc.execute(req).await;
    assert!(result.is_err());
    assert_eq!(result.err().unwrap().code, AppErrorCode::InvalidInput);
    // the invalid record never reaches the datastore
    let repo = app_repo_payment(ds_ctx).await.unwrap();
    assert!(repo.fetch_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_requires_payment_id() {
    let ds_ctx = ut_setup_dstore_ctx(32);
    let uc = UpdatePaymentUseCase {
        repo: app_repo_payment(ds_ctx).await.unwrap(),
        logctx: ut_logctx(),
    };
    let result = uc.execute(ut_in_progress_dto()).await;
    assert!(result.is_err());
    let e = result.err().unwrap();
    assert_eq!(e.code, AppErrorCode::InvalidInput);
    assert!(e.detail.unwrap().contains("payment id"));
}

#[tokio::test]
async fn update_replaces_whole_record() {
    let ds_ctx = ut_setup_dstore_ctx(32);
    let uc = StorePaymentUseCase {
        repo: app_repo_payment(ds_ctx.clone()).await.unwrap(),
        logctx: ut_logctx(),
    };
    let stored = uc.execute(ut_in_progress_dto()).await.unwrap();
    let uc = UpdatePaymentUseCase {
        repo: app_repo_payment(ds_ctx.clone()).await.unwrap(),
        logctx: ut_logctx(),
    };
    let req = PaymentDto {
        payment_id: stored.payment_id,
        is_payed: true,
        payment_status: PaymentStatus::Completed,
        order: Some(OrderDto::id_only(1)),
    };
    let result = uc.execute(req).await;
    assert!(result.is_ok());
    let dto = result.unwrap();
    assert!(dto.is_payed);
    assert_eq!(dto.payment_status, PaymentStatus::Completed);
    let repo = app_repo_payment(ds_ctx).await.unwrap();
    let found = repo.fetch_one(stored.payment_id.unwrap()).await.unwrap();
    let m = found.unwrap();
    assert!(m.is_payed);
    assert_eq!(m.status, PaymentStatus::Completed);
}

#[tokio::test]
async fn discard_checks_existence_first() {
    let ds_ctx = ut_setup_dstore_ctx(32);
    let uc = StorePaymentUseCase {
        repo: app_repo_payment(ds_ctx.clone()).await.unwrap(),
        logctx: ut_logctx(),
    };
    let stored = uc.execute(ut_in_progress_dto()).await.unwrap();
    let payment_id = stored.payment_id.unwrap();
    let uc = DiscardPaymentUseCase {
        repo: app_repo_payment(ds_ctx.clone()).await.unwrap(),
        logctx: ut_logctx(),
    };
    let result = uc.execute(payment_id).await;
    assert!(result.is_ok());
    let repo = app_repo_payment(ds_ctx.clone()).await.unwrap();
    assert!(repo.fetch_one(payment_id).await.unwrap().is_none());
    // removing the same key again fails, the single-key policy checks
    // existence before the delete
    let uc = DiscardPaymentUseCase {
        repo: app_repo_payment(ds_ctx).await.unwrap(),
        logctx: ut_logctx(),
    };
    let result = uc.execute(payment_id).await;
    assert!(result.is_err());
    let e = result.err().unwrap();
    assert_eq!(e.code, AppErrorCode::RecordNotFound);
    assert!(e.detail.unwrap().contains(&payment_id.to_string()));
} // end of fn discard_checks_existence_first
