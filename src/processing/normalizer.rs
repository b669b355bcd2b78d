// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use deunicode::deunicode;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
// The regex crate does not support backreferences, so runs of the same
// punctuation character are matched with one alternation branch per character.
static REPEATED_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\.)\.+|(,),+|(;);+|(:):+|(!)!+|(\?)\?+").unwrap());
static CONTROL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x00-\x08\x0b\x0c\x0e-\x1f]").unwrap());

/// 文本规范化器
///
/// 把提取出的原始文本整理成适合索引的形态：
/// 折叠空白、去掉控制字符、压缩重复标点、Unicode转写为ASCII近似。
pub struct TextNormalizer;

impl TextNormalizer {
    /// 规范化一段文本
    ///
    /// # 参数
    ///
    /// * `text` - 待规范化的文本
    ///
    /// # 返回值
    ///
    /// 规范化后的文本；空输入返回空字符串
    pub fn normalize(text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let text = CONTROL_CHARS.replace_all(text, " ");
        let text = deunicode(&text);
        let text = REPEATED_PUNCT.replace_all(&text, "${1}${2}${3}${4}${5}${6}");
        let text = WHITESPACE.replace_all(&text, " ");

        text.trim().to_string()
    }
}
