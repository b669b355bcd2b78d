// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::CrawledItem;
use crate::domain::models::document::Document;
use crate::processing::extractor::TextExtractor;
use crate::processing::normalizer::TextNormalizer;
use tracing::info;
use uuid::Uuid;

/// 数据处理器
///
/// 把爬取结果转换为可入库的文档：提取文本、提取元数据、规范化正文。
/// 单条处理是纯函数式的，处理失败仅影响该条目。
pub struct DataProcessor;

impl DataProcessor {
    /// 处理一批爬取结果
    ///
    /// # 参数
    ///
    /// * `items` - 爬取结果条目
    ///
    /// # 返回值
    ///
    /// 成功转换的文档列表
    pub fn process(items: &[CrawledItem]) -> Vec<Document> {
        info!("Processing {} crawled items", items.len());

        let documents: Vec<Document> = items.iter().map(Self::process_one).collect();

        info!("Successfully processed {} documents", documents.len());
        documents
    }

    fn process_one(item: &CrawledItem) -> Document {
        let text = TextExtractor::extract_text(&item.content, &item.content_type);
        let mut metadata = TextExtractor::extract_metadata(&item.content, &item.content_type);

        // Response metadata recorded by the crawl strategies rides along
        for (k, v) in &item.metadata {
            metadata.entry(k.clone()).or_insert_with(|| v.clone());
        }

        let title = metadata
            .get("title")
            .cloned()
            .unwrap_or_else(|| item.url.clone());

        Document {
            id: Uuid::new_v4(),
            title,
            content: TextNormalizer::normalize(&text),
            source: item.url.clone(),
            crawl_date: item.fetched_at,
            metadata,
        }
    }
}
