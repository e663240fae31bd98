use std::sync::Arc;

pub mod adapter;
pub mod api;
pub mod constant;
pub mod error;
pub mod model;
pub mod network;
pub mod repository;
pub mod usecase;

use estore_common::adapter::datastore::{self, AbstInMemoryDStore};
use estore_common::config::AppConfig;
use estore_common::logging::AppLogContext;

use adapter::thirdparty::{self, AbsOrderSvcClient, AbsProductSvcClient};
use error::AppError;

type WebApiHdlrLabel = &'static str;

pub struct AppDataStoreContext {
    pub in_mem: Option<Arc<Box<dyn AbstInMemoryDStore>>>,
}

// global state shared by all request-handling tasks
pub struct AppSharedState {
    _cfg: Arc<AppConfig>,
    _log: Arc<AppLogContext>,
    dstore: Arc<AppDataStoreContext>,
    _product_client: Arc<Box<dyn AbsProductSvcClient>>,
    _order_client: Arc<Box<dyn AbsOrderSvcClient>>,
}

impl AppSharedState {
    pub fn try_build(cfg: AppConfig, log: AppLogContext) -> Result<Self, AppError> {
        let log = Arc::new(log);
        let in_mem = datastore::build_context(&cfg.api_server.data_store).map(Arc::new);
        let ds_ctx = Arc::new(AppDataStoreContext { in_mem });
        let (product_client, order_client) =
            thirdparty::build_context(&cfg.api_server.remote_services, log.clone())?;
        Ok(Self {
            _cfg: Arc::new(cfg),
            _log: log,
            dstore: ds_ctx,
            _product_client: product_client,
            _order_client: order_client,
        })
    } // end of fn try_build

    pub fn config(&self) -> &Arc<AppConfig> {
        &self._cfg
    }

    pub fn log_context(&self) -> &Arc<AppLogContext> {
        &self._log
    }

    pub fn datastore(&self) -> Arc<AppDataStoreContext> {
        self.dstore.clone()
    }

    pub fn product_client(&self) -> Arc<Box<dyn AbsProductSvcClient>> {
        self._product_client.clone()
    }

    pub fn order_client(&self) -> Arc<Box<dyn AbsOrderSvcClient>> {
        self._order_client.clone()
    }
} // end of impl AppSharedState

impl Clone for AppSharedState {
    fn clone(&self) -> Self {
        Self {
            _cfg: self._cfg.clone(),
            _log: self._log.clone(),
            dstore: self.dstore.clone(),
            _product_client: self._product_client.clone(),
            _order_client: self._order_client.clone(),
        }
    }
}
