// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{crawl_request, create_dispatcher, mount_html_page};
use ingestrs::domain::models::crawl::CrawlKind;
use wiremock::MockServer;

#[tokio::test]
async fn test_web_crawl_follows_links_breadth_first() {
    let server = MockServer::start().await;
    mount_html_page(&server, "/", "root", &["/a", "/b"]).await;
    mount_html_page(&server, "/a", "a", &["/c"]).await;
    mount_html_page(&server, "/b", "b", &[]).await;
    mount_html_page(&server, "/c", "c", &[]).await;

    let dispatcher = create_dispatcher();
    let request = crawl_request(vec![format!("{}/", server.uri())], CrawlKind::Web, 2, 10);

    let items = dispatcher.crawl(&request).await.unwrap();

    let mut urls: Vec<String> = items.iter().map(|i| i.url.clone()).collect();
    urls.sort();
    assert_eq!(
        urls,
        vec![
            format!("{}/", server.uri()),
            format!("{}/a", server.uri()),
            format!("{}/b", server.uri()),
            format!("{}/c", server.uri()),
        ]
    );
}

#[tokio::test]
async fn test_web_crawl_depth_limit_stops_link_following() {
    let server = MockServer::start().await;
    mount_html_page(&server, "/", "root", &["/a"]).await;
    mount_html_page(&server, "/a", "a", &["/b"]).await;
    mount_html_page(&server, "/b", "b", &[]).await;

    let dispatcher = create_dispatcher();
    let request = crawl_request(vec![format!("{}/", server.uri())], CrawlKind::Web, 1, 10);

    let items = dispatcher.crawl(&request).await.unwrap();

    assert_eq!(items.len(), 2);
    assert!(!items.iter().any(|i| i.url.ends_with("/b")));
}

#[tokio::test]
async fn test_web_crawl_respects_page_budget() {
    let server = MockServer::start().await;
    let links: Vec<String> = (0..20).map(|i| format!("/page{}", i)).collect();
    let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
    mount_html_page(&server, "/", "root", &link_refs).await;
    for link in &links {
        mount_html_page(&server, link, link, &[]).await;
    }

    let dispatcher = create_dispatcher();
    let request = crawl_request(vec![format!("{}/", server.uri())], CrawlKind::Web, 1, 5);

    let items = dispatcher.crawl(&request).await.unwrap();

    assert_eq!(items.len(), 5);
}

#[tokio::test]
async fn test_web_crawl_deduplicates_urls() {
    let server = MockServer::start().await;
    // Both seeds link to the same child
    mount_html_page(&server, "/x", "x", &["/shared"]).await;
    mount_html_page(&server, "/y", "y", &["/shared"]).await;
    mount_html_page(&server, "/shared", "shared", &[]).await;

    let dispatcher = create_dispatcher();
    let request = crawl_request(
        vec![format!("{}/x", server.uri()), format!("{}/y", server.uri())],
        CrawlKind::Web,
        1,
        10,
    );

    let items = dispatcher.crawl(&request).await.unwrap();

    assert_eq!(items.len(), 3);
    let shared_count = items.iter().filter(|i| i.url.ends_with("/shared")).count();
    assert_eq!(shared_count, 1);
}

#[tokio::test]
async fn test_empty_sources_rejected_before_any_fetch() {
    let dispatcher = create_dispatcher();
    let request = crawl_request(vec![], CrawlKind::Web, 1, 10);

    assert!(dispatcher.crawl(&request).await.is_err());
}
