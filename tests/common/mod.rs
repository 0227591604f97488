// tests/common/mod.rs
#![allow(dead_code)]

use axum::Router;
use remote_facts::{Credentials, Fetcher};

/// Serve `router` on an ephemeral localhost port; returns the base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });
    format!("http://{addr}")
}

/// A URL nothing listens on (port grabbed, then released).
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/gone")
}

pub fn fetcher() -> Fetcher {
    Fetcher::with_client(reqwest::Client::new(), Credentials::new())
}

pub fn fetcher_with(creds: Credentials) -> Fetcher {
    Fetcher::with_client(reqwest::Client::new(), creds)
}
