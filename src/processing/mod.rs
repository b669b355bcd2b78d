// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 文本提取器
pub mod extractor;

/// 文本规范化器
pub mod normalizer;

/// 数据处理器
pub mod processor;
