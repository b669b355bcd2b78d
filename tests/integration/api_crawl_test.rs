// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{crawl_request, create_dispatcher, mount_html_page, mount_json_endpoint};
use ingestrs::domain::models::crawl::CrawlKind;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_api_crawl_records_endpoint_metadata() {
    let server = MockServer::start().await;
    mount_json_endpoint(&server, "/v1/items", r#"{"items":[1,2,3]}"#).await;

    let dispatcher = create_dispatcher();
    let request = crawl_request(
        vec![format!("{}/v1/items", server.uri())],
        CrawlKind::Api,
        0,
        10,
    );

    let items = dispatcher.crawl(&request).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content, r#"{"items":[1,2,3]}"#);
    assert_eq!(items[0].content_type, "application/json");
    assert_eq!(items[0].metadata.get("status_code").unwrap(), "200");
}

#[tokio::test]
async fn test_api_crawl_merges_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("{}", "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = create_dispatcher();
    let mut request = crawl_request(
        vec![format!("{}/search", server.uri())],
        CrawlKind::Api,
        0,
        10,
    );
    request
        .parameters
        .insert("q".to_string(), "rust".to_string());

    let items = dispatcher.crawl(&request).await.unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn test_mixed_crawl_shares_one_budget() {
    let server = MockServer::start().await;
    mount_html_page(&server, "/page", "page", &[]).await;
    mount_json_endpoint(&server, "/api/a", "{}").await;
    mount_json_endpoint(&server, "/api/b", "{}").await;

    let dispatcher = create_dispatcher();
    let request = crawl_request(
        vec![
            format!("{}/page", server.uri()),
            format!("{}/api/a", server.uri()),
            format!("{}/api/b", server.uri()),
        ],
        CrawlKind::Mixed,
        0,
        2,
    );

    // The web phase admits sources until the shared budget runs out; the API
    // phase then finds nothing left to reserve.
    let items = dispatcher.crawl(&request).await.unwrap();
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_api_crawl_unreachable_endpoint_does_not_abort_run() {
    let server = MockServer::start().await;
    mount_json_endpoint(&server, "/good", r#"{"ok":true}"#).await;

    let dispatcher = create_dispatcher();
    let request = crawl_request(
        vec![
            "http://127.0.0.1:9/dead".to_string(),
            format!("{}/good", server.uri()),
        ],
        CrawlKind::Api,
        0,
        10,
    );

    let items = dispatcher.crawl(&request).await.unwrap();

    assert_eq!(items.len(), 1);
    assert!(items[0].url.ends_with("/good"));
}
