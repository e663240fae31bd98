use std::collections::HashMap;

use axum::routing::{delete, get, post, put, MethodRouter};

use crate::constant::api::web as WebConst;
use crate::{AppSharedState, WebApiHdlrLabel};

pub mod dto;
mod order_item;

pub type ApiRouteType = MethodRouter<AppSharedState>;
pub type ApiRouteTableType = HashMap<WebApiHdlrLabel, ApiRouteType>;

pub fn route_table() -> ApiRouteTableType {
    let mut out: ApiRouteTableType = HashMap::new();
    out.insert(WebConst::LIST_ORDER_ITEMS, get(order_item::list_handler));
    out.insert(WebConst::FETCH_ORDER_ITEM, get(order_item::fetch_handler));
    out.insert(WebConst::STORE_ORDER_ITEM, post(order_item::store_handler));
    out.insert(WebConst::UPDATE_ORDER_ITEM, put(order_item::update_handler));
    out.insert(
        WebConst::DISCARD_ORDER_ITEM,
        delete(order_item::discard_handler),
    );
    out
}
