// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// 入库文档
///
/// 爬取结果经文本提取和规范化后的最终形态，交给文档接收端入库。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// 文档唯一标识符
    pub id: Uuid,
    /// 文档标题（缺失时回退为来源URL）
    pub title: String,
    /// 规范化后的正文
    pub content: String,
    /// 来源URL
    pub source: String,
    /// 抓取时间
    pub crawl_date: DateTime<Utc>,
    /// 提取的元数据
    pub metadata: HashMap<String, String>,
}
