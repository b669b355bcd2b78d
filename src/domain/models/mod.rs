// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 爬取（crawl）：爬取请求、爬取计划和爬取到的原始条目
/// - 任务（job）：调度任务的状态机和状态视图
/// - 文档（document）：经过处理、可写入索引的文档
///
/// 这些模型构成了系统的数据基础，定义了业务概念的
/// 结构和行为。
pub mod crawl;
pub mod document;
pub mod job;
