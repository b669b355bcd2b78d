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

use crate::crawler::api::ApiCrawler;
use crate::crawler::budget::CrawlBudget;
use crate::crawler::web::WebCrawler;
use crate::domain::models::crawl::{CrawlKind, CrawlRequest, CrawledItem};
use thiserror::Error;
use tracing::info;
use validator::Validate;

/// 爬取调度错误类型
#[derive(Error, Debug)]
pub enum CrawlError {
    /// 请求校验失败
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// 爬取分发器
///
/// 根据请求类型选择网页策略、API策略或两者（Mixed），并合并结果。
/// 每次调用分配一对全新的预算与访问记录，两种策略共用同一份，
/// 因此页面总数上限作用于两者合计而非各自独立。
pub struct CrawlDispatcher {
    web_crawler: WebCrawler,
    api_crawler: ApiCrawler,
}

impl CrawlDispatcher {
    /// 创建新的爬取分发器实例
    ///
    /// # 参数
    ///
    /// * `web_crawler` - 网页爬取策略
    /// * `api_crawler` - API爬取策略
    pub fn new(web_crawler: WebCrawler, api_crawler: ApiCrawler) -> Self {
        Self {
            web_crawler,
            api_crawler,
        }
    }

    /// 执行一次爬取
    ///
    /// # 参数
    ///
    /// * `request` - 爬取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<CrawledItem>)` - 本次执行抓取到的条目（总数≤max_pages）
    /// * `Err(CrawlError)` - 请求校验失败
    pub async fn crawl(&self, request: &CrawlRequest) -> Result<Vec<CrawledItem>, CrawlError> {
        request
            .validate()
            .map_err(|e| CrawlError::ValidationError(e.to_string()))?;

        info!(
            "Starting {} crawl for request {}",
            request.kind, request.id
        );

        // Fresh budget per execution, shared by both strategies
        let budget = CrawlBudget::new(request.max_pages);

        let mut results = Vec::new();
        match request.kind {
            CrawlKind::Web => {
                results.extend(self.web_crawler.crawl(request, &budget).await);
            }
            CrawlKind::Api => {
                results.extend(self.api_crawler.crawl(request, &budget).await);
            }
            CrawlKind::Mixed => {
                results.extend(self.web_crawler.crawl(request, &budget).await);
                results.extend(self.api_crawler.crawl(request, &budget).await);
            }
        }

        info!(
            "Completed crawl for request {}. Crawled {} items",
            request.id,
            results.len()
        );

        Ok(results)
    }
}
