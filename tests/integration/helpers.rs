// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use ingestrs::config::settings::CrawlerSettings;
use ingestrs::crawler::api::ApiCrawler;
use ingestrs::crawler::dispatcher::CrawlDispatcher;
use ingestrs::crawler::web::WebCrawler;
use ingestrs::domain::models::crawl::{CrawlKind, CrawlRequest};
use ingestrs::engines::reqwest_engine::ReqwestEngine;
use ingestrs::engines::traits::FetchEngine;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn test_crawler_settings() -> CrawlerSettings {
    CrawlerSettings {
        user_agent: "ingestrs-test/1.0".to_string(),
        request_timeout_secs: 5,
        max_concurrent_requests: 4,
        respect_robots_txt: false,
    }
}

/// 构建接入真实HTTP引擎的爬取分发器
pub fn create_dispatcher() -> Arc<CrawlDispatcher> {
    let settings = test_crawler_settings();
    let engine: Arc<dyn FetchEngine> = Arc::new(ReqwestEngine::new(&settings).unwrap());

    let web_crawler = WebCrawler::new(
        engine.clone(),
        settings.user_agent.clone(),
        settings.max_concurrent_requests,
    );
    let api_crawler = ApiCrawler::new(engine);
    Arc::new(CrawlDispatcher::new(web_crawler, api_crawler))
}

pub fn crawl_request(
    sources: Vec<String>,
    kind: CrawlKind,
    max_depth: u32,
    max_pages: usize,
) -> CrawlRequest {
    CrawlRequest {
        id: Uuid::new_v4(),
        sources,
        headers: HashMap::new(),
        parameters: HashMap::new(),
        max_depth,
        max_pages,
        kind,
    }
}

/// 在模拟服务器上挂载一个带出链的HTML页面
pub async fn mount_html_page(server: &MockServer, page_path: &str, title: &str, links: &[&str]) {
    let anchors: String = links
        .iter()
        .map(|l| format!("<a href=\"{}\">{}</a>", l, l))
        .collect();
    let body = format!(
        "<html><head><title>{}</title></head><body><p>Content of {}.</p>{}</body></html>",
        title, title, anchors
    );

    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// 在模拟服务器上挂载一个JSON端点
pub async fn mount_json_endpoint(server: &MockServer, endpoint_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(endpoint_path))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body, "application/json"),
        )
        .mount(server)
        .await;
}
