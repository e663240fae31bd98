use std::collections::HashMap;

use axum::routing::{delete, get, post, put, MethodRouter};

use crate::constant::api::web as WebConst;
use crate::{AppSharedState, WebApiHdlrLabel};

pub mod dto;
mod payment;

pub type ApiRouteType = MethodRouter<AppSharedState>;
pub type ApiRouteTableType = HashMap<WebApiHdlrLabel, ApiRouteType>;

pub fn route_table() -> ApiRouteTableType {
    let mut out: ApiRouteTableType = HashMap::new();
    out.insert(WebConst::LIST_PAYMENTS, get(payment::list_handler));
    out.insert(WebConst::FETCH_PAYMENT, get(payment::fetch_handler));
    out.insert(WebConst::STORE_PAYMENT, post(payment::store_handler));
    out.insert(WebConst::UPDATE_PAYMENT, put(payment::update_handler));
    out.insert(WebConst::DISCARD_PAYMENT, delete(payment::discard_handler));
    out
}
