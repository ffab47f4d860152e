// ABOUTME: Tests the real TCP serve loop and its graceful shutdown
// ABOUTME: Talks to the server over loopback with reqwest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::create_test_resources;
use rezepte_server::server::serve_with_shutdown;
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[tokio::test]
async fn test_serves_over_tcp_and_stops_on_signal() {
    let (_database, resources) = create_test_resources(Path::new("assets")).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(serve_with_shutdown(listener, resources, async move {
        let _ = stop_rx.await;
    }));

    let client = reqwest::Client::new();
    let created = client
        .post(format!("{base}/api/recipes"))
        .json(&json!({"label": "Porridge", "parts": [{"label": "", "ingredients": [{"name": "Oats"}]}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), reqwest::StatusCode::CREATED);
    let link: String = created.json().await.unwrap();

    let heads: Vec<Value> = client
        .get(format!("{base}/api/recipes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(heads.len(), 1);
    assert_eq!(heads[0]["uiLink"], link.as_str());

    drop(client);
    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(20), server)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
