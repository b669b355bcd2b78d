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

use crate::config::settings::CrawlerSettings;
use crate::engines::traits::{EngineError, FetchEngine, FetchResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎。客户端在构造时创建一次，
/// 带有统一的User-Agent和请求超时；超时保证单个无响应端点
/// 不会无限期推迟任务取消。
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 根据爬虫配置创建新的抓取引擎实例
    ///
    /// # 参数
    ///
    /// * `settings` - 爬虫配置
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 新的引擎实例
    /// * `Err(EngineError)` - 客户端构建失败
    pub fn new(settings: &CrawlerSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FetchEngine for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    /// * `headers` - 附加请求头
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 抓取响应（非2xx状态码也作为响应返回）
    /// * `Err(EngineError)` - 网络层失败
    async fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<FetchResponse, EngineError> {
        // Build headers, skipping entries that are not valid header names/values
        let mut header_map = HeaderMap::new();
        for (k, v) in headers {
            if let (Ok(k), Ok(v)) = (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(v),
            ) {
                header_map.insert(k, v);
            }
        }

        let start = Instant::now();
        let response = self.client.get(url).headers(header_map).send().await?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        // Ensure content_type is not empty
        let content_type = if content_type.trim().is_empty() {
            "text/html".to_string()
        } else {
            content_type
        };

        let content = response.text().await?;
        let content_length = content.len();

        Ok(FetchResponse {
            status_code,
            content,
            content_type,
            content_length,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
