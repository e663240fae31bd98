use std::sync::Arc;

use axum::debug_handler;
use axum::extract::{Json as ExtractJson, Path as ExtractPath, State as ExtractState};
use axum::http::{
    header as HttpHeader, HeaderMap as HttpHeaderMap, HeaderValue as HttpHeaderValue,
    StatusCode as HttpStatusCode,
};
use axum::response::IntoResponse;
use serde::Serialize;

use estore_common::constant::HTTP_CONTENT_TYPE_JSON;
use estore_common::error::AppErrorCode;
use estore_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use super::dto::{PaymentCollectionDto, PaymentDto};
use crate::error::AppError;
use crate::repository::app_repo_payment;
use crate::usecase::{
    DiscardPaymentUseCase, FetchPaymentUseCase, ListPaymentsUseCase, StorePaymentUseCase,
    UpdatePaymentUseCase,
};
use crate::AppSharedState;

pub(super) fn render_error(log_ctx: &Arc<AppLogContext>, e: AppError) -> (HttpStatusCode, String) {
    let (status, reason) = match e.code {
        AppErrorCode::RecordNotFound => (
            HttpStatusCode::NOT_FOUND,
            e.detail.unwrap_or_else(|| "not found".to_string()),
        ),
        AppErrorCode::InvalidInput => (
            HttpStatusCode::BAD_REQUEST,
            e.detail.unwrap_or_else(|| "invalid input".to_string()),
        ),
        AppErrorCode::EmptyInputData => {
            // detail of this code is not meant for frontend clients
            (HttpStatusCode::BAD_REQUEST, "invalid input".to_string())
        }
        ref _others => {
            app_log_event!(log_ctx, AppLogLevel::ERROR, "{}", e);
            (
                HttpStatusCode::INTERNAL_SERVER_ERROR,
                "internal-error".to_string(),
            )
        }
    };
    let body = serde_json::json!({"reason": reason}).to_string();
    (status, body)
}

pub(super) fn render_ok<T: Serialize>(
    value: &T,
    status: HttpStatusCode,
) -> (HttpStatusCode, String) {
    match serde_json::to_string(value) {
        Ok(s) => (status, s),
        Err(_) => (
            HttpStatusCode::INTERNAL_SERVER_ERROR,
            r#"{"reason":"serialization-failure"}"#.to_string(),
        ),
    }
}

pub(super) fn json_response(
    status: HttpStatusCode,
    serial_body: String,
) -> (HttpStatusCode, HttpHeaderMap, String) {
    let ctype_val = HttpHeaderValue::from_static(HTTP_CONTENT_TYPE_JSON);
    let mut hdr_map = HttpHeaderMap::new();
    hdr_map.insert(HttpHeader::CONTENT_TYPE, ctype_val);
    (status, hdr_map, serial_body)
}

#[debug_handler(state = AppSharedState)]
pub(super) async fn list_handler(
    ExtractState(appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let log_ctx = appstate.log_context().clone();
    let (status, serial_body) = match app_repo_payment(appstate.datastore()).await {
        Ok(repo) => {
            let uc = ListPaymentsUseCase {
                repo,
                order_client: appstate.order_client(),
                logctx: log_ctx.clone(),
            };
            match uc.execute().await {
                Ok(payments) => {
                    let resp_body = PaymentCollectionDto {
                        collection: payments,
                    };
                    render_ok(&resp_body, HttpStatusCode::OK)
                }
                Err(e) => render_error(&log_ctx, e),
            }
        }
        Err(e) => render_error(&log_ctx, e),
    };
    json_response(status, serial_body)
} // end of fn list_handler

#[debug_handler(state = AppSharedState)]
pub(super) async fn fetch_handler(
    ExtractPath(payment_id): ExtractPath<u32>,
    ExtractState(appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let log_ctx = appstate.log_context().clone();
    let (status, serial_body) = match app_repo_payment(appstate.datastore()).await {
        Ok(repo) => {
            let uc = FetchPaymentUseCase {
                repo,
                order_client: appstate.order_client(),
                logctx: log_ctx.clone(),
            };
            match uc.execute(payment_id).await {
                Ok(payment) => render_ok(&payment, HttpStatusCode::OK),
                Err(e) => render_error(&log_ctx, e),
            }
        }
        Err(e) => render_error(&log_ctx, e),
    };
    json_response(status, serial_body)
} // end of fn fetch_handler

#[debug_handler(state = AppSharedState)]
pub(super) async fn store_handler(
    ExtractState(appstate): ExtractState<AppSharedState>,
    ExtractJson(req_body): ExtractJson<PaymentDto>,
) -> impl IntoResponse {
    let log_ctx = appstate.log_context().clone();
    let (status, serial_body) = match app_repo_payment(appstate.datastore()).await {
        Ok(repo) => {
            let uc = StorePaymentUseCase {
                repo,
                logctx: log_ctx.clone(),
            };
            match uc.execute(req_body).await {
                Ok(payment) => render_ok(&payment, HttpStatusCode::CREATED),
                Err(e) => render_error(&log_ctx, e),
            }
        }
        Err(e) => render_error(&log_ctx, e),
    };
    json_response(status, serial_body)
} // end of fn store_handler

#[debug_handler(state = AppSharedState)]
pub(super) async fn update_handler(
    ExtractState(appstate): ExtractState<AppSharedState>,
    ExtractJson(req_body): ExtractJson<PaymentDto>,
) -> impl IntoResponse {
    let log_ctx = appstate.log_context().clone();
    let (status, serial_body) = match app_repo_payment(appstate.datastore()).await {
        Ok(repo) => {
            let uc = UpdatePaymentUseCase {
                repo,
                logctx: log_ctx.clone(),
            };
            match uc.execute(req_body).await {
                Ok(payment) => render_ok(&payment, HttpStatusCode::OK),
                Err(e) => render_error(&log_ctx, e),
            }
        }
        Err(e) => render_error(&log_ctx, e),
    };
    json_response(status, serial_body)
} // end of fn update_handler

#[debug_handler(state = AppSharedState)]
pub(super) async fn discard_handler(
    ExtractPath(payment_id): ExtractPath<u32>,
    ExtractState(appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let log_ctx = appstate.log_context().clone();
    let (status, serial_body) = match app_repo_payment(appstate.datastore()).await {
        Ok(repo) => {
            let uc = DiscardPaymentUseCase {
                repo,
                logctx: log_ctx.clone(),
            };
            match uc.execute(payment_id).await {
                Ok(()) => (HttpStatusCode::NO_CONTENT, String::new()),
                Err(e) => render_error(&log_ctx, e),
            }
        }
        Err(e) => render_error(&log_ctx, e),
    };
    json_response(status, serial_body)
} // end of fn discard_handler
