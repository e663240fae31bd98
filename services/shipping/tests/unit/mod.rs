mod adapter;
mod api;
mod model;

use std::boxed::Box;
use std::sync::Arc;

use estore_common::adapter::datastore::{AbstInMemoryDStore, AppInMemoryDStore};
use estore_common::config::{AppBasepathCfg, AppInMemoryDbCfg, AppLoggingCfg};
use estore_common::logging::AppLogContext;

use shipping::AppDataStoreContext;

pub(crate) fn ut_setup_dstore_ctx(max_items: u32) -> Arc<AppDataStoreContext> {
    let cfg = AppInMemoryDbCfg {
        alias: "unit-test".to_string(),
        max_items,
    };
    let inmem: Box<dyn AbstInMemoryDStore> = Box::new(AppInMemoryDStore::new(&cfg));
    Arc::new(AppDataStoreContext {
        in_mem: Some(Arc::new(inmem)),
    })
}

pub(crate) fn ut_logctx() -> Arc<AppLogContext> {
    let serial = r#"
        {
            "handlers": [
                {"alias": "std-console", "min_level": "WARNING", "destination": "console", "path": null}
            ],
            "loggers": [
                {"alias": "unit-test", "handlers": ["std-console"], "level": null}
            ]
        }"#;
    let cfg = serde_json::from_str::<AppLoggingCfg>(serial).unwrap();
    let basepath = AppBasepathCfg {
        system: ".".to_string(),
        service: ".".to_string(),
    };
    Arc::new(AppLogContext::new(&basepath, &cfg))
}
