use std::boxed::Box;
use std::sync::Arc;

use estore_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use crate::adapter::thirdparty::{AbsOrderSvcClient, AbsProductSvcClient};
use crate::api::web::dto::OrderItemDto;
use crate::error::AppError;
use crate::model::{OrderItemKey, OrderItemModel, ENTITY_LABEL};
use crate::repository::AbsOrderItemRepo;

// merge remote records into the DTO of one local record, the two lookups
// run sequentially and the first failing one aborts, there is no retry
// and no partial result
async fn enrich_one(
    item: OrderItemModel,
    product_client: &Arc<Box<dyn AbsProductSvcClient>>,
    order_client: &Arc<Box<dyn AbsOrderSvcClient>>,
    logctx: &Arc<AppLogContext>,
) -> Result<OrderItemDto, AppError> {
    let product = product_client
        .fetch_product(item.id.product_id)
        .await
        .map_err(|e| {
            app_log_event!(logctx, AppLogLevel::WARNING, "{}, {}", item.id, e);
            e
        })?;
    let order = order_client
        .fetch_order(item.id.order_id)
        .await
        .map_err(|e| {
            app_log_event!(logctx, AppLogLevel::WARNING, "{}, {}", item.id, e);
            e
        })?;
    Ok(item.into_dto(Some(product), Some(order)))
}

pub struct ListOrderItemsUseCase {
    pub repo: Box<dyn AbsOrderItemRepo>,
    pub product_client: Arc<Box<dyn AbsProductSvcClient>>,
    pub order_client: Arc<Box<dyn AbsOrderSvcClient>>,
    pub logctx: Arc<AppLogContext>,
}

impl ListOrderItemsUseCase {
    pub async fn execute(self) -> Result<Vec<OrderItemDto>, AppError> {
        let items = self.repo.fetch_all().await.map_err(|e| {
            let logctx_p = &self.logctx;
            app_log_event!(logctx_p, AppLogLevel::ERROR, "{}", e);
            e
        })?;
        let mut out = Vec::with_capacity(items.len());
        // one remote call per foreign reference per record, a single
        // failure aborts the whole batch
        for item in items {
            let dto = enrich_one(
                item,
                &self.product_client,
                &self.order_client,
                &self.logctx,
            )
            .await?;
            out.push(dto);
        }
        Ok(out)
    }
} // end of impl ListOrderItemsUseCase

pub struct FetchOrderItemUseCase {
    pub repo: Box<dyn AbsOrderItemRepo>,
    pub product_client: Arc<Box<dyn AbsProductSvcClient>>,
    pub order_client: Arc<Box<dyn AbsOrderSvcClient>>,
    pub logctx: Arc<AppLogContext>,
}

impl FetchOrderItemUseCase {
    pub async fn execute(self, id: OrderItemKey) -> Result<OrderItemDto, AppError> {
        let maybe_item = self.repo.fetch_one(&id).await.map_err(|e| {
            let logctx_p = &self.logctx;
            app_log_event!(logctx_p, AppLogLevel::ERROR, "{}", e);
            e
        })?;
        // an absent record never causes remote lookups
        let item =
            maybe_item.ok_or_else(|| AppError::record_not_found(ENTITY_LABEL, id.to_string()))?;
        enrich_one(
            item,
            &self.product_client,
            &self.order_client,
            &self.logctx,
        )
        .await
    }
} // end of impl FetchOrderItemUseCase

pub struct StoreOrderItemUseCase {
    pub repo: Box<dyn AbsOrderItemRepo>,
    pub logctx: Arc<AppLogContext>,
}

impl StoreOrderItemUseCase {
    pub async fn execute(self, req: OrderItemDto) -> Result<OrderItemDto, AppError> {
        let item = OrderItemModel::try_from(req)?;
        let saved = self.repo.save(item).await.map_err(|e| {
            let logctx_p = &self.logctx;
            app_log_event!(logctx_p, AppLogLevel::ERROR, "{}", e);
            e
        })?;
        Ok(saved.into_bare_dto())
    }
}

pub struct UpdateOrderItemUseCase {
    pub repo: Box<dyn AbsOrderItemRepo>,
    pub logctx: Arc<AppLogContext>,
}

impl UpdateOrderItemUseCase {
    // full-record replace keyed by the composite identity in the request
    pub async fn execute(self, req: OrderItemDto) -> Result<OrderItemDto, AppError> {
        let item = OrderItemModel::try_from(req)?;
        let saved = self.repo.save(item).await.map_err(|e| {
            let logctx_p = &self.logctx;
            app_log_event!(logctx_p, AppLogLevel::ERROR, "{}", e);
            e
        })?;
        Ok(saved.into_bare_dto())
    }
}

pub struct DiscardOrderItemUseCase {
    pub repo: Box<dyn AbsOrderItemRepo>,
    pub logctx: Arc<AppLogContext>,
}

impl DiscardOrderItemUseCase {
    // composite-key removal has no pre-existence check, discarding an
    // absent key succeeds silently
    pub async fn execute(self, id: OrderItemKey) -> Result<(), AppError> {
        let _removed = self.repo.delete(&id).await.map_err(|e| {
            let logctx_p = &self.logctx;
            app_log_event!(logctx_p, AppLogLevel::ERROR, "{}", e);
            e
        })?;
        Ok(())
    }
}
