// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{crawl_request, create_dispatcher, mount_html_page};
use async_trait::async_trait;
use ingestrs::domain::models::crawl::CrawlKind;
use ingestrs::domain::models::document::Document;
use ingestrs::indexing::DocumentSink;
use ingestrs::pipeline::IngestPipeline;
use parking_lot::Mutex;
use std::sync::Arc;
use wiremock::MockServer;

/// 收集接收端：把入库调用记录在内存里供断言使用
#[derive(Default)]
struct CollectingSink {
    batches: Mutex<Vec<(String, Vec<Document>)>>,
}

#[async_trait]
impl DocumentSink for CollectingSink {
    async fn index_documents(&self, index: &str, documents: Vec<Document>) -> anyhow::Result<()> {
        self.batches.lock().push((index.to_string(), documents));
        Ok(())
    }
}

struct FailingSink;

#[async_trait]
impl DocumentSink for FailingSink {
    async fn index_documents(&self, _index: &str, _documents: Vec<Document>) -> anyhow::Result<()> {
        anyhow::bail!("index unavailable")
    }
}

#[tokio::test]
async fn test_ingest_produces_processed_documents() {
    let server = MockServer::start().await;
    mount_html_page(&server, "/article", "Breaking News", &[]).await;

    let sink = Arc::new(CollectingSink::default());
    let pipeline = IngestPipeline::new(
        create_dispatcher(),
        sink.clone(),
        "documents".to_string(),
    );

    let request = crawl_request(
        vec![format!("{}/article", server.uri())],
        CrawlKind::Web,
        0,
        10,
    );
    let items = pipeline.ingest(&request).await.unwrap();
    assert_eq!(items.len(), 1);

    let batches = sink.batches.lock();
    assert_eq!(batches.len(), 1);
    let (index, documents) = &batches[0];
    assert_eq!(index, "documents");
    assert_eq!(documents.len(), 1);

    let doc = &documents[0];
    assert_eq!(doc.title, "Breaking News");
    assert!(doc.content.contains("Content of Breaking News."));
    assert_eq!(doc.source, format!("{}/article", server.uri()));
}

#[tokio::test]
async fn test_ingest_propagates_sink_failure() {
    let server = MockServer::start().await;
    mount_html_page(&server, "/article", "x", &[]).await;

    let pipeline = IngestPipeline::new(
        create_dispatcher(),
        Arc::new(FailingSink),
        "documents".to_string(),
    );

    let request = crawl_request(
        vec![format!("{}/article", server.uri())],
        CrawlKind::Web,
        0,
        10,
    );

    assert!(pipeline.ingest(&request).await.is_err());
}
