// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::{Html, Selector};
use std::collections::HashMap;

/// 文本提取器
///
/// 从爬取到的原始内容中提取纯文本与元数据。提取永不失败：
/// 无法处理的内容按原样或空结果返回，由调用方决定取舍。
pub struct TextExtractor;

impl TextExtractor {
    /// 按内容类型提取纯文本
    ///
    /// HTML剥离script/style后取正文文本；JSON和纯文本原样返回；
    /// 其余类型默认按HTML处理。
    ///
    /// # 参数
    ///
    /// * `content` - 原始内容
    /// * `content_type` - 内容类型
    pub fn extract_text(content: &str, content_type: &str) -> String {
        let content_type = content_type.to_lowercase();
        if content_type.contains("html") {
            Self::extract_text_from_html(content)
        } else if content_type.contains("json") || content_type.contains("text/plain") {
            content.to_string()
        } else {
            // Default to HTML handling for unknown types
            Self::extract_text_from_html(content)
        }
    }

    /// 从HTML内容提取元数据
    ///
    /// 提取`<title>`和所有带name属性的`<meta>`标签。
    /// 非HTML或无法解析的内容返回空映射。
    pub fn extract_metadata(content: &str, content_type: &str) -> HashMap<String, String> {
        let mut metadata = HashMap::new();
        if !content_type.to_lowercase().contains("html") {
            return metadata;
        }

        let document = Html::parse_document(content);

        if let Ok(selector) = Selector::parse("title") {
            if let Some(title) = document.select(&selector).next() {
                let text = title.text().collect::<Vec<_>>().join(" ").trim().to_string();
                if !text.is_empty() {
                    metadata.insert("title".to_string(), text);
                }
            }
        }

        if let Ok(selector) = Selector::parse("meta[name]") {
            for element in document.select(&selector) {
                if let (Some(name), Some(value)) = (
                    element.value().attr("name"),
                    element.value().attr("content"),
                ) {
                    metadata.insert(name.to_lowercase(), value.to_string());
                }
            }
        }

        metadata
    }

    fn extract_text_from_html(html: &str) -> String {
        let document = Html::parse_document(html);

        // Prefer an explicit main-content container, fall back to body
        let text = Self::select_text(&document, "article, main, #content, .content")
            .or_else(|| Self::select_text(&document, "body"))
            .unwrap_or_default();

        text
    }

    /// 取第一个匹配元素下的全部文本，跳过script和style
    fn select_text(document: &Html, selector_str: &str) -> Option<String> {
        let selector = Selector::parse(selector_str).ok()?;
        let root = document.select(&selector).next()?;

        let skip = Selector::parse("script, style").ok()?;
        let skipped: Vec<_> = root.select(&skip).flat_map(|e| e.text()).collect();

        let mut parts = Vec::new();
        for piece in root.text() {
            let trimmed = piece.trim();
            if trimmed.is_empty() || skipped.contains(&piece) {
                continue;
            }
            parts.push(trimmed);
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }
}
