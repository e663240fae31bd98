use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::env;

use tokio::runtime::Builder as RuntimeBuilder;
use tower_http::cors::CorsLayer;

use estore_common::config::{AppCfgHardLimit, AppCfgInitArgs, AppConfig};
use estore_common::constant::env_vars::EXPECTED_LABELS;
use estore_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use payment::api::web::route_table;
use payment::constant::hard_limit;
use payment::network::{app_web_service, middleware, net_listener};
use payment::AppSharedState;

async fn start_server(shr_state: AppSharedState) {
    let log_ctx_p = shr_state.log_context().clone();
    let cfg = shr_state.config().clone();
    let rtable = route_table();
    let listener_cfg = &cfg.api_server.listen;
    let (service, num_applied) = app_web_service(listener_cfg, rtable, shr_state);
    if num_applied == 0 {
        app_log_event!(
            log_ctx_p,
            AppLogLevel::ERROR,
            "no route created, web API server failed to start"
        );
        return;
    }
    let result = net_listener(listener_cfg.host.clone(), listener_cfg.port).await;
    match result {
        Ok(b) => {
            let co = {
                let cors_path = cfg.basepath.system.clone() + listener_cfg.cors.as_str();
                match middleware::cors(cors_path) {
                    Ok(v) => v,
                    Err(e) => {
                        app_log_event!(
                            log_ctx_p,
                            AppLogLevel::ERROR,
                            "cors layer init error, detail: {:?}",
                            e
                        );
                        CorsLayer::new()
                    }
                }
            };
            let reqlm = middleware::req_body_limit(cfg.api_server.limit_req_body_in_bytes);
            let connlm = middleware::conn_limit(listener_cfg.max_connections);
            let service = service.layer(reqlm).layer(co).layer(connlm);
            let sr = axum::serve(b, service).with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            });
            let _ = sr.await;
            app_log_event!(log_ctx_p, AppLogLevel::WARNING, "API server terminating");
        }
        Err(e) => {
            app_log_event!(
                log_ctx_p,
                AppLogLevel::ERROR,
                "API server failed to start, {}",
                e
            );
        }
    }
} // end of fn start_server

fn start_async_runtime(cfg: AppConfig) {
    let log_ctx = AppLogContext::new(&cfg.basepath, &cfg.api_server.logging);
    let shr_state = match AppSharedState::try_build(cfg, log_ctx) {
        Ok(s) => s,
        Err(e) => {
            println!("app failed to init shared state, error: {}", e);
            return;
        }
    };
    let cfg = shr_state.config();
    let log_ctx = shr_state.log_context().clone();
    let log_ctx2 = log_ctx.clone();
    let stack_nbytes: usize = (cfg.api_server.stack_sz_kb as usize) << 10;
    let result = RuntimeBuilder::new_multi_thread()
        .worker_threads(cfg.api_server.num_workers as usize)
        .on_thread_start(move || {
            let log_cpy = log_ctx.clone();
            app_log_event!(log_cpy, AppLogLevel::INFO, "[API server] worker started");
        })
        .on_thread_stop(move || {
            let log_cpy = log_ctx2.clone();
            app_log_event!(log_cpy, AppLogLevel::INFO, "[API server] worker terminating");
        })
        .thread_stack_size(stack_nbytes)
        .thread_name("web-api-worker")
        // manage low-level I/O drivers used by network types
        .enable_io()
        .enable_time()
        .build();
    match result {
        Ok(rt) => {
            // new worker threads spawned
            rt.block_on(async move {
                start_server(shr_state).await;
            });
        }
        Err(e) => {
            let log_ctx_p = shr_state.log_context();
            app_log_event!(
                log_ctx_p,
                AppLogLevel::ERROR,
                "async runtime failed to build, {}",
                e
            );
        }
    };
} // end of fn start_async_runtime

fn main() {
    let iter = env::vars().filter(|(k, _v)| EXPECTED_LABELS.contains(&k.as_str()));
    let env_var_map: HashMap<String, String, RandomState> = HashMap::from_iter(iter);
    let args = AppCfgInitArgs {
        env_var_map,
        limit: AppCfgHardLimit {
            nitems_per_inmem_table: hard_limit::MAX_ITEMS_STORED_PER_MODEL,
            num_remote_services: hard_limit::MAX_NUM_REMOTE_SERVICES,
        },
    };
    match AppConfig::new(args) {
        Ok(cfg) => start_async_runtime(cfg),
        Err(e) => {
            println!("app failed to configure, error code: {:?}", e.code);
        }
    };
} // end of main
