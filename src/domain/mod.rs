// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务实体：
/// - 领域模型（models）：爬取请求、任务状态、文档等数据结构
///
/// 领域层不依赖于任何外部实现，体现了纯粹的业务概念。
pub mod models;
