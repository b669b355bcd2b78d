// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::crawler::dispatcher::CrawlDispatcher;
use crate::domain::models::crawl::{CrawlRequest, CrawledItem};
use crate::indexing::DocumentSink;
use crate::jobs::runner::CrawlExecutor;
use crate::processing::processor::DataProcessor;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// 摄取流水线
///
/// 把一次爬取执行串成完整链路：分发爬取、文本处理、文档入库。
/// 调度任务的每个周期都经由这里执行。
pub struct IngestPipeline {
    dispatcher: Arc<CrawlDispatcher>,
    sink: Arc<dyn DocumentSink>,
    index_name: String,
}

impl IngestPipeline {
    /// 创建新的摄取流水线实例
    ///
    /// # 参数
    ///
    /// * `dispatcher` - 爬取分发器
    /// * `sink` - 文档接收端
    /// * `index_name` - 目标索引名称
    pub fn new(
        dispatcher: Arc<CrawlDispatcher>,
        sink: Arc<dyn DocumentSink>,
        index_name: String,
    ) -> Self {
        Self {
            dispatcher,
            sink,
            index_name,
        }
    }

    /// 执行一次完整的爬取-处理-入库链路
    ///
    /// # 参数
    ///
    /// * `request` - 爬取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<CrawledItem>)` - 本次爬取的原始条目
    /// * `Err(anyhow::Error)` - 请求校验失败或入库失败
    pub async fn ingest(&self, request: &CrawlRequest) -> anyhow::Result<Vec<CrawledItem>> {
        let items = self.dispatcher.crawl(request).await?;

        let documents = DataProcessor::process(&items);
        self.sink
            .index_documents(&self.index_name, documents)
            .await?;

        info!(
            "Ingest cycle for request {} finished with {} items",
            request.id,
            items.len()
        );

        Ok(items)
    }
}

#[async_trait]
impl CrawlExecutor for IngestPipeline {
    async fn execute(&self, request: CrawlRequest) -> anyhow::Result<usize> {
        let items = self.ingest(&request).await?;
        Ok(items.len())
    }
}
