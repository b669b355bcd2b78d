// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 任务注册表
pub mod registry;

/// 任务运行器
pub mod runner;
