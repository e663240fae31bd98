use std::boxed::Box;
use std::sync::Arc;

use estore_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use crate::adapter::thirdparty::AbsOrderSvcClient;
use crate::api::web::dto::PaymentDto;
use crate::error::AppError;
use crate::model::{PaymentModel, ENTITY_LABEL};
use crate::repository::AbsPaymentRepo;

// merge the remote order record into the DTO of one local payment, a
// failing lookup aborts, there is no retry and no partial result
async fn enrich_one(
    payment: PaymentModel,
    order_client: &Arc<Box<dyn AbsOrderSvcClient>>,
    logctx: &Arc<AppLogContext>,
) -> Result<PaymentDto, AppError> {
    let order = order_client
        .fetch_order(payment.order_id)
        .await
        .map_err(|e| {
            app_log_event!(
                logctx,
                AppLogLevel::WARNING,
                "order-id:{}, {}",
                payment.order_id,
                e
            );
            e
        })?;
    Ok(payment.into_dto(Some(order)))
}

pub struct ListPaymentsUseCase {
    pub repo: Box<dyn AbsPaymentRepo>,
    pub order_client: Arc<Box<dyn AbsOrderSvcClient>>,
    pub logctx: Arc<AppLogContext>,
}

impl ListPaymentsUseCase {
    pub async fn execute(self) -> Result<Vec<PaymentDto>, AppError> {
        let payments = self.repo.fetch_all().await.map_err(|e| {
            let logctx_p = &self.logctx;
            app_log_event!(logctx_p, AppLogLevel::ERROR, "{}", e);
            e
        })?;
        let mut out = Vec::with_capacity(payments.len());
        // one remote call per record, a single failure aborts the whole batch
        for payment in payments {
            let dto = enrich_one(payment, &self.order_client, &self.logctx).await?;
            out.push(dto);
        }
        Ok(out)
    }
} // end of impl ListPaymentsUseCase

pub struct FetchPaymentUseCase {
    pub repo: Box<dyn AbsPaymentRepo>,
    pub order_client: Arc<Box<dyn AbsOrderSvcClient>>,
    pub logctx: Arc<AppLogContext>,
}

impl FetchPaymentUseCase {
    pub async fn execute(self, payment_id: u32) -> Result<PaymentDto, AppError> {
        let maybe_payment = self.repo.fetch_one(payment_id).await.map_err(|e| {
            let logctx_p = &self.logctx;
            app_log_event!(logctx_p, AppLogLevel::ERROR, "{}", e);
            e
        })?;
        // an absent record never causes a remote lookup
        let payment = maybe_payment
            .ok_or_else(|| AppError::record_not_found(ENTITY_LABEL, payment_id.to_string()))?;
        enrich_one(payment, &self.order_client, &self.logctx).await
    }
} // end of impl FetchPaymentUseCase

pub struct StorePaymentUseCase {
    pub repo: Box<dyn AbsPaymentRepo>,
    pub logctx: Arc<AppLogContext>,
}

impl StorePaymentUseCase {
    pub async fn execute(self, req: PaymentDto) -> Result<PaymentDto, AppError> {
        let payment = PaymentModel::try_from(req)?;
        let saved = self.repo.save(payment).await.map_err(|e| {
            let logctx_p = &self.logctx;
            app_log_event!(logctx_p, AppLogLevel::ERROR, "{}", e);
            e
        })?;
        Ok(saved.into_bare_dto())
    }
}

pub struct UpdatePaymentUseCase {
    pub repo: Box<dyn AbsPaymentRepo>,
    pub logctx: Arc<AppLogContext>,
}

impl UpdatePaymentUseCase {
    // full-record replace, the request must address an assigned key
    pub async fn execute(self, req: PaymentDto) -> Result<PaymentDto, AppError> {
        if req.payment_id.is_none() {
            return Err(AppError::invalid_input("payment id required"));
        }
        let payment = PaymentModel::try_from(req)?;
        let saved = self.repo.save(payment).await.map_err(|e| {
            let logctx_p = &self.logctx;
            app_log_event!(logctx_p, AppLogLevel::ERROR, "{}", e);
            e
        })?;
        Ok(saved.into_bare_dto())
    }
}

pub struct DiscardPaymentUseCase {
    pub repo: Box<dyn AbsPaymentRepo>,
    pub logctx: Arc<AppLogContext>,
}

impl DiscardPaymentUseCase {
    // single-key removal loads the record first and fails on an absent key,
    // unlike the composite-key policy of the shipping service
    pub async fn execute(self, payment_id: u32) -> Result<(), AppError> {
        let maybe_payment = self.repo.fetch_one(payment_id).await.map_err(|e| {
            let logctx_p = &self.logctx;
            app_log_event!(logctx_p, AppLogLevel::ERROR, "{}", e);
            e
        })?;
        if maybe_payment.is_none() {
            return Err(AppError::record_not_found(
                ENTITY_LABEL,
                payment_id.to_string(),
            ));
        }
        let _removed = self.repo.delete(payment_id).await.map_err(|e| {
            let logctx_p = &self.logctx;
            app_log_event!(logctx_p, AppLogLevel::ERROR, "{}", e);
            e
        })?;
        Ok(())
    } // end of fn execute
}
