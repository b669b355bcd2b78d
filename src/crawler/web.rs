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
use crate::crawler::links::LinkDiscoverer;
use crate::crawler::robots::RobotsCheckerTrait;
use crate::domain::models::crawl::{CrawlRequest, CrawledItem};
use crate::engines::traits::FetchEngine;
use chrono::Utc;
use futures::StreamExt;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 网页爬取策略
///
/// 从种子URL开始按链接深度逐层广度优先遍历。策略对象本身不持有
/// 任何单次执行的状态：访问记录与页面配额由调用方为每次执行
/// 新建的[`CrawlBudget`]承载，因此同一个策略实例可以安全地服务
/// 多个并发执行。
pub struct WebCrawler {
    /// 抓取引擎
    engine: Arc<dyn FetchEngine>,
    /// Robots.txt检查器（可选）
    robots_checker: Option<Arc<dyn RobotsCheckerTrait>>,
    /// 检查robots.txt时使用的User-Agent
    user_agent: String,
    /// 单层级内的最大并发抓取数
    max_concurrency: usize,
}

/// 单个URL抓取的产出：结果条目加下一层级候选链接
struct FetchOutcome {
    item: CrawledItem,
    next_links: HashSet<String>,
}

impl WebCrawler {
    /// 创建新的网页爬取策略实例
    ///
    /// # 参数
    ///
    /// * `engine` - 抓取引擎
    /// * `user_agent` - robots检查使用的User-Agent
    /// * `max_concurrency` - 单层级最大并发抓取数
    pub fn new(engine: Arc<dyn FetchEngine>, user_agent: String, max_concurrency: usize) -> Self {
        Self {
            engine,
            robots_checker: None,
            user_agent,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// 启用robots.txt检查
    pub fn with_robots_checker(mut self, checker: Arc<dyn RobotsCheckerTrait>) -> Self {
        self.robots_checker = Some(checker);
        self
    }

    /// 执行广度优先爬取
    ///
    /// 逐层推进：每一层先经过`try_reserve`准入，再以受限并发抓取，
    /// 整层完成后才进入下一层（层级屏障）。配额用尽、没有后续层级
    /// 或达到最大深度时终止。
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
            "Starting web crawl for request {} with {} seed urls",
            request.id,
            request.sources.len()
        );

        let mut results = Vec::new();
        let mut frontier: Vec<String> = request.sources.clone();
        let mut depth: u32 = 0;

        while !frontier.is_empty() && depth <= request.max_depth {
            // Admission gate: visited check and page budget in one atomic step
            let admitted: Vec<String> = frontier
                .iter()
                .filter(|url| budget.try_reserve(url))
                .cloned()
                .collect();

            if admitted.is_empty() {
                break;
            }

            debug!(
                "Crawling depth {} with {} admitted urls ({} candidates)",
                depth,
                admitted.len(),
                frontier.len()
            );

            // Fetch the whole level with bounded concurrency; collecting the
            // stream is the per-level synchronization barrier.
            let follow_links = depth < request.max_depth;
            let outcomes: Vec<Option<FetchOutcome>> = futures::stream::iter(admitted)
                .map(|url| self.fetch_one(url, request, follow_links))
                .buffer_unordered(self.max_concurrency)
                .collect()
                .await;

            let mut next_frontier: HashSet<String> = HashSet::new();
            for outcome in outcomes.into_iter().flatten() {
                next_frontier.extend(outcome.next_links);
                results.push(outcome.item);
            }

            if budget.is_exhausted() {
                debug!("Page budget exhausted at depth {}", depth);
                break;
            }

            frontier = next_frontier.into_iter().collect();
            depth += 1;
        }

        info!(
            "Completed web crawl for request {}. Crawled {} pages",
            request.id,
            results.len()
        );

        results
    }

    /// 抓取单个已准入的URL
    ///
    /// 所有按URL的失败（robots拒绝、传输错误、非2xx状态）都在此
    /// 吸收为跳过，不向上传播。
    async fn fetch_one(
        &self,
        url: String,
        request: &CrawlRequest,
        follow_links: bool,
    ) -> Option<FetchOutcome> {
        if let Some(checker) = &self.robots_checker {
            match checker.is_allowed(&url, &self.user_agent).await {
                Ok(true) => {}
                Ok(false) => {
                    debug!("Robots.txt disallows {}", url);
                    return None;
                }
                Err(e) => {
                    warn!("Robots check failed for {}: {}", url, e);
                    // Treat an unreachable robots.txt as allow
                }
            }
        }

        let response = match self.engine.fetch(&url, &request.headers).await {
            Ok(r) => r,
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                return None;
            }
        };

        if !response.is_success() {
            warn!("Failed to fetch {}: status {}", url, response.status_code);
            return None;
        }

        let next_links = if follow_links && response.content_type.contains("html") {
            match LinkDiscoverer::extract_links(&response.content, &url) {
                Ok(links) => links,
                Err(e) => {
                    // Malformed content counts as "no links found" for this page
                    warn!("Failed to extract links from {}: {}", url, e);
                    HashSet::new()
                }
            }
        } else {
            HashSet::new()
        };

        Some(FetchOutcome {
            item: CrawledItem {
                id: Uuid::new_v4(),
                url,
                content: response.content,
                content_type: response.content_type,
                fetched_at: Utc::now(),
                metadata: HashMap::new(),
            },
            next_links,
        })
    }
}

#[cfg(test)]
#[path = "web_test.rs"]
mod tests;
