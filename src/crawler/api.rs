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

use crate::crawler::budget::CrawlBudget;
use crate::domain::models::crawl::{CrawlRequest, CrawledItem};
use crate::engines::traits::FetchEngine;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

/// API端点爬取策略
///
/// 按请求顺序逐个抓取配置的端点。端点与网页爬取共用同一份
/// 预算与访问记录，因此Mixed模式下两种策略合计不超过页面上限。
pub struct ApiCrawler {
    /// 抓取引擎
    engine: Arc<dyn FetchEngine>,
}

impl ApiCrawler {
    /// 创建新的API爬取策略实例
    pub fn new(engine: Arc<dyn FetchEngine>) -> Self {
        Self { engine }
    }

    /// 执行API端点爬取
    ///
    /// 每个端点：合并查询参数、附加请求头、发起一次GET请求，
    /// 把响应体、内容类型和响应元数据（状态码、内容长度）记录为
    /// 一条结果。单个端点失败只记录日志并跳过，不中断其余端点；
    /// 配额用尽则提前停止。
    ///
    /// # 参数
    ///
    /// * `request` - 爬取请求
    /// * `budget` - 本次执行专属的预算与访问记录
    ///
    /// # 返回值
    ///
    /// 本次执行准入并成功抓取的条目列表
    pub async fn crawl(&self, request: &CrawlRequest, budget: &CrawlBudget) -> Vec<CrawledItem> {
        info!(
            "Starting API crawl for request {} with {} endpoints",
            request.id,
            request.sources.len()
        );

        let mut results = Vec::new();

        for endpoint in &request.sources {
            if budget.is_exhausted() {
                debug!("Page budget exhausted, skipping remaining endpoints");
                break;
            }

            let url = match Self::build_url(endpoint, &request.parameters) {
                Ok(url) => url,
                Err(e) => {
                    warn!("Invalid API endpoint {}: {}", endpoint, e);
                    continue;
                }
            };

            // Same admission gate as the web strategy: endpoints count
            // against the shared page budget
            if !budget.try_reserve(url.as_str()) {
                continue;
            }

            match self.engine.fetch(url.as_str(), &request.headers).await {
                Ok(response) => {
                    let mut metadata = HashMap::new();
                    metadata.insert("status_code".to_string(), response.status_code.to_string());
                    metadata.insert(
                        "content_length".to_string(),
                        response.content_length.to_string(),
                    );

                    results.push(CrawledItem {
                        id: Uuid::new_v4(),
                        url: url.to_string(),
                        content: response.content,
                        content_type: response.content_type,
                        fetched_at: Utc::now(),
                        metadata,
                    });
                }
                Err(e) => {
                    warn!("Failed to fetch API endpoint {}: {}", url, e);
                }
            }
        }

        info!(
            "Completed API crawl for request {}. Crawled {} endpoints",
            request.id,
            results.len()
        );

        results
    }

    /// 把查询参数合并进端点URL
    fn build_url(
        endpoint: &str,
        parameters: &HashMap<String, String>,
    ) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(endpoint)?;
        if !parameters.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in parameters {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
