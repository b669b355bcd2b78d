// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::document::Document;
use async_trait::async_trait;
use tracing::{debug, info};

/// 文档接收端接口
///
/// 爬取核心对搜索索引的唯一出口。真实的搜索引擎绑定在此之外实现；
/// 核心只依赖这个窄接口。
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// 将一批文档写入指定索引
    async fn index_documents(&self, index: &str, documents: Vec<Document>) -> anyhow::Result<()>;
}

/// 日志接收端
///
/// 默认实现：仅记录将要入库的文档，用于未接入搜索引擎时运行守护进程。
pub struct LoggingSink;

#[async_trait]
impl DocumentSink for LoggingSink {
    async fn index_documents(&self, index: &str, documents: Vec<Document>) -> anyhow::Result<()> {
        for doc in &documents {
            info!(
                "Would index document {} ({}) into {}",
                doc.id, doc.source, index
            );
            if let Ok(json) = serde_json::to_string(doc) {
                debug!("Document payload: {}", json);
            }
        }
        info!("Indexed {} documents into {}", documents.len(), index);
        Ok(())
    }
}
