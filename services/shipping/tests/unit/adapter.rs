use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use estore_common::config::AppRemoteSvcCfg;
use estore_common::error::AppErrorCode;

use shipping::adapter::thirdparty::{build_context, AbsOrderSvcClient, AbsProductSvcClient};

use super::ut_logctx;

// single-shot sibling-service stub, answers the first request with the
// given status line and body, then reports the request path it saw
async fn ut_stub_remote(
    status_line: &'static str,
    resp_body: &'static str,
) -> (u16, oneshot::Receiver<String>) {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let (mut stream, _addr) = listener.accept().await.unwrap();
        let mut collected = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            collected.extend_from_slice(&chunk[..n]);
            if n == 0 || collected.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let req_head = String::from_utf8_lossy(&collected).to_string();
        let path = req_head
            .split_whitespace()
            .nth(1)
            .unwrap_or_default()
            .to_string();
        let resp = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            resp_body.len(),
            resp_body
        );
        stream.write_all(resp.as_bytes()).await.unwrap();
        stream.flush().await.unwrap();
        let _ = tx.send(path);
    });
    (port, rx)
} // end of fn ut_stub_remote

fn ut_remote_cfgs(product_port: u16, order_port: u16) -> Vec<AppRemoteSvcCfg> {
    vec![
        AppRemoteSvcCfg {
            app_label: "product".to_string(),
            host: "127.0.0.1".to_string(),
            port: product_port,
            base_path: "/product-service/api/products".to_string(),
        },
        AppRemoteSvcCfg {
            app_label: "order".to_string(),
            host: "127.0.0.1".to_string(),
            port: order_port,
            base_path: "/order-service/api/orders".to_string(),
        },
    ]
}

#[tokio::test]
async fn remote_fetch_product_ok() {
    let resp_body = r#"{"productId": 1, "productTitle": "Laptop ASUS", "priceUnit": 999.99}"#;
    let (port, seen_path) = ut_stub_remote("200 OK", resp_body).await;
    let cfgs = ut_remote_cfgs(port, port);
    let (product_client, _order_client) = build_context(&cfgs, ut_logctx()).unwrap();
    let result = product_client.fetch_product(1).await;
    assert!(result.is_ok());
    let dto = result.unwrap();
    assert_eq!(dto.product_id, 1);
    assert_eq!(dto.product_title.as_deref(), Some("Laptop ASUS"));
    // the lookup URL is composed as <base-path>/<id>
    let path = seen_path.await.unwrap();
    assert_eq!(path.as_str(), "/product-service/api/products/1");
}

#[tokio::test]
async fn remote_fetch_order_non_2xx() {
    let (port, _seen_path) = ut_stub_remote("500 Internal Server Error", "oops").await;
    let cfgs = ut_remote_cfgs(port, port);
    let (_product_client, order_client) = build_context(&cfgs, ut_logctx()).unwrap();
    let result = order_client.fetch_order(1).await;
    assert!(result.is_err());
    let e = result.err().unwrap();
    assert_eq!(e.code, AppErrorCode::RemoteSvcUnavailable);
    assert!(e.detail.unwrap().contains("500"));
}

#[tokio::test]
async fn remote_fetch_malformed_payload() {
    let (port, _seen_path) = ut_stub_remote("200 OK", "not-a-json-object").await;
    let cfgs = ut_remote_cfgs(port, port);
    let (product_client, _order_client) = build_context(&cfgs, ut_logctx()).unwrap();
    let result = product_client.fetch_product(1).await;
    assert!(result.is_err());
    assert_eq!(result.err().unwrap().code, AppErrorCode::RemoteInvalidReply);
}

#[tokio::test]
async fn remote_cfg_missing_label() {
    let cfgs = vec![AppRemoteSvcCfg {
        app_label: "order".to_string(),
        host: "127.0.0.1".to_string(),
        port: 8012,
        base_path: "/order-service/api/orders".to_string(),
    }];
    let result = build_context(&cfgs, ut_logctx());
    assert!(result.is_err());
    let e = result.err().unwrap();
    assert_eq!(e.code, AppErrorCode::NoRemoteServiceCfg);
    assert_eq!(e.detail.unwrap().as_str(), "product");
}
