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

use crate::domain::models::crawl::CrawlSchedule;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含爬虫、任务调度、索引以及启动时注册的定时爬取计划
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 爬虫配置
    pub crawler: CrawlerSettings,
    /// 任务调度配置
    pub jobs: JobsSettings,
    /// 索引配置
    pub indexing: IndexingSettings,
    /// 启动时注册的爬取计划
    #[serde(default)]
    pub schedules: Vec<CrawlSchedule>,
}

/// 爬虫配置设置
#[derive(Debug, Deserialize)]
pub struct CrawlerSettings {
    /// HTTP请求使用的User-Agent
    pub user_agent: String,
    /// 单个请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 同一层级内的最大并发请求数
    pub max_concurrent_requests: usize,
    /// 是否遵守robots.txt
    pub respect_robots_txt: bool,
}

/// 任务调度配置设置
#[derive(Debug, Deserialize)]
pub struct JobsSettings {
    /// 计划未指定时的默认执行间隔（秒）
    pub default_interval_secs: u64,
    /// 守护进程状态日志的输出间隔（秒）
    pub status_check_interval_secs: u64,
}

/// 索引配置设置
#[derive(Debug, Deserialize)]
pub struct IndexingSettings {
    /// 文档写入的目标索引名称
    pub index_name: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载配置，支持默认值
    ///
    /// # 返回值
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default crawler settings
            .set_default("crawler.user_agent", "ingestrs-bot/1.0")?
            .set_default("crawler.request_timeout_secs", 30)?
            .set_default("crawler.max_concurrent_requests", 8)?
            .set_default("crawler.respect_robots_txt", true)?
            // Default job settings
            .set_default("jobs.default_interval_secs", 3600)?
            .set_default("jobs.status_check_interval_secs", 60)?
            // Default indexing settings
            .set_default("indexing.index_name", "documents")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("INGESTRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
