// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 代理协调器模块
///
/// 守护进程入口：注册配置的爬取计划并输出周期性状态日志
pub mod agent;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 爬取模块
///
/// 实现网页与API爬取策略、预算控制和分发
pub mod crawler;

/// 领域模块
///
/// 包含核心业务实体
pub mod domain;

/// 引擎模块
///
/// 实现HTTP抓取引擎
pub mod engines;

/// 索引模块
///
/// 定义文档接收端接口及默认实现
pub mod indexing;

/// 任务模块
///
/// 实现任务注册表和任务运行器
pub mod jobs;

/// 流水线模块
///
/// 将爬取、处理、入库串成完整链路
pub mod pipeline;

/// 处理模块
///
/// 实现文本提取、规范化和文档组装
pub mod processing;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
