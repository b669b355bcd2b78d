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

use anyhow::Result;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// 链接发现器
///
/// 负责从HTML内容中提取下一深度层级的候选链接
pub struct LinkDiscoverer;

impl LinkDiscoverer {
    /// 从HTML内容中提取链接
    ///
    /// 相对路径按抓取页面自身的URL解析为绝对地址；
    /// 纯片段、mailto和javascript目标被丢弃，仅保留http/https链接。
    ///
    /// # 参数
    ///
    /// * `html_content` - HTML内容
    /// * `base_url` - 抓取页面自身的URL
    ///
    /// # 返回值
    ///
    /// * `Ok(HashSet<String>)` - 提取到的绝对链接集合
    /// * `Err(anyhow::Error)` - 基础URL无法解析
    pub fn extract_links(html_content: &str, base_url: &str) -> Result<HashSet<String>> {
        let fragment = Html::parse_document(html_content);
        let selector =
            Selector::parse("a").map_err(|e| anyhow::anyhow!("Invalid selector: {:?}", e))?;
        let base = Url::parse(base_url)?;
        let mut links = HashSet::new();

        for element in fragment.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                // Ignore fragment identifiers, mailto and javascript links
                if href.starts_with('#')
                    || href.starts_with("mailto:")
                    || href.starts_with("javascript:")
                {
                    continue;
                }

                if let Ok(url) = base.join(href) {
                    // Only keep http/https links
                    if url.scheme() == "http" || url.scheme() == "https" {
                        // Remove fragment to improve deduplication
                        let mut url_clean = url.clone();
                        url_clean.set_fragment(None);
                        links.insert(url_clean.to_string());
                    }
                }
            }
        }

        Ok(links)
    }
}
