//! End-to-end tests against a real listener on an ephemeral port.

use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use webhook_receiver::{ServerError, WebhookServer};

struct RunningServer {
    base_url: String,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl RunningServer {
    async fn start() -> Self {
        let server = WebhookServer::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("bind ephemeral port");
        let addr = server.local_addr().expect("local addr");

        let (shutdown, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.run(async {
            let _ = rx.await;
        }));

        Self {
            base_url: format!("http://{addr}"),
            shutdown,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn stop(self) {
        let _ = self.shutdown.send(());
        self.handle
            .await
            .expect("server task panicked")
            .expect("server returned an error");
    }
}

fn assert_cors_headers(response: &reqwest::Response) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

#[tokio::test]
async fn post_webhook_round_trip() {
    let server = RunningServer::start().await;
    let client = Client::new();

    let response = client
        .post(server.url("/webhook"))
        .header("Content-Type", "application/json")
        .body(r#"{"message":"hello"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(&response);
    assert_eq!(response.text().await.unwrap(), "Webhook received!\n");

    server.stop().await;
}

#[tokio::test]
async fn client_errors_over_the_wire() {
    let server = RunningServer::start().await;
    let client = Client::new();

    let response = client
        .post(server.url("/webhook"))
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors_headers(&response);
    assert_eq!(response.text().await.unwrap(), "Bad request\n");

    let response = client.get(server.url("/webhook")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors_headers(&response);
    assert_eq!(response.text().await.unwrap(), "Invalid request method\n");

    server.stop().await;
}

#[tokio::test]
async fn preflight_over_the_wire() {
    let server = RunningServer::start().await;
    let client = Client::new();

    let response = client
        .request(reqwest::Method::OPTIONS, server.url("/webhook"))
        .header("Origin", "https://example.com")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(&response);
    assert!(response.text().await.unwrap().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn concurrent_posts_are_independent() {
    let server = RunningServer::start().await;
    let client = Client::new();

    let requests = (0..16).map(|i| {
        let client = client.clone();
        let url = server.url("/webhook");
        tokio::spawn(async move {
            client
                .post(url)
                .body(format!(r#"{{"message":"msg-{i}"}}"#))
                .send()
                .await
                .unwrap()
                .status()
        })
    });

    for request in requests.collect::<Vec<_>>() {
        assert_eq!(request.await.unwrap(), StatusCode::OK);
    }

    server.stop().await;
}
