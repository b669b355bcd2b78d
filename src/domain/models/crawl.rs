// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// 爬取类型枚举
///
/// 决定一次爬取使用的抓取策略：
/// Web按链接广度优先遍历，Api按固定端点列表抓取，Mixed两者兼用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrawlKind {
    /// 网页爬取
    #[default]
    Web,
    /// API端点爬取
    Api,
    /// 混合模式
    Mixed,
}

impl fmt::Display for CrawlKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CrawlKind::Web => write!(f, "web"),
            CrawlKind::Api => write!(f, "api"),
            CrawlKind::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for CrawlKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(CrawlKind::Web),
            "api" => Ok(CrawlKind::Api),
            "mixed" => Ok(CrawlKind::Mixed),
            _ => Err(()),
        }
    }
}

/// 爬取请求
///
/// 描述一次爬取执行的全部输入，执行开始后不再变更。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CrawlRequest {
    /// 请求唯一标识符
    pub id: Uuid,
    /// 起始URL或API端点列表，按配置顺序处理
    #[validate(length(min = 1, message = "sources must not be empty"))]
    pub sources: Vec<String>,
    /// 随每个请求附加的HTTP请求头
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// 合并进端点URL的查询参数
    #[serde(default)]
    pub parameters: HashMap<String, String>,
    /// 最大链接跳数，0表示只抓取种子URL
    pub max_depth: u32,
    /// 本次执行允许抓取的页面总数上限
    #[validate(range(min = 1, message = "max_pages must be at least 1"))]
    pub max_pages: usize,
    /// 爬取类型
    #[serde(default)]
    pub kind: CrawlKind,
}

impl CrawlRequest {
    /// 从调度配置派生爬取请求
    ///
    /// # 参数
    ///
    /// * `schedule` - 任务的调度配置
    ///
    /// # 返回值
    ///
    /// 返回带有新生成标识符的爬取请求
    pub fn from_schedule(schedule: &CrawlSchedule) -> Self {
        Self {
            id: Uuid::new_v4(),
            sources: schedule.sources.clone(),
            headers: schedule.headers.clone(),
            parameters: schedule.parameters.clone(),
            max_depth: schedule.max_depth,
            max_pages: schedule.max_pages,
            kind: schedule.kind,
        }
    }
}

/// 爬取结果条目
///
/// 每次执行中每个唯一URL恰好产出一条。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawledItem {
    /// 条目唯一标识符
    pub id: Uuid,
    /// 来源URL
    pub url: String,
    /// 原始响应内容
    pub content: String,
    /// 响应内容类型
    pub content_type: String,
    /// 抓取时间戳
    pub fetched_at: DateTime<Utc>,
    /// 自由格式元数据
    pub metadata: HashMap<String, String>,
}

/// 爬取调度配置
///
/// 由配置文件提供，任务创建后不可变。
/// `cron`仅作为运维侧的原始表达式保留，实际调度按`interval_secs`的
/// 固定周期近似执行。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSchedule {
    /// 调度名称
    pub name: String,
    /// 原始cron表达式（仅记录，不求值）
    #[serde(default)]
    pub cron: Option<String>,
    /// 两次执行之间的固定间隔（秒）
    pub interval_secs: u64,
    /// 起始URL或端点列表
    pub sources: Vec<String>,
    /// 附加请求头
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// 附加查询参数
    #[serde(default)]
    pub parameters: HashMap<String, String>,
    /// 最大链接跳数
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    /// 最大页面数
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    /// 爬取类型
    #[serde(default)]
    pub kind: CrawlKind,
}

fn default_max_depth() -> u32 {
    1
}

fn default_max_pages() -> usize {
    10
}
