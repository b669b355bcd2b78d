// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// API端点爬取策略
pub mod api;

/// 爬取预算与访问记录
pub mod budget;

/// 爬取分发器
pub mod dispatcher;

/// 链接发现器
pub mod links;

/// Robots.txt检查器
pub mod robots;

/// 网页爬取策略
pub mod web;
