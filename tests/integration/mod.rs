// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod api_crawl_test;
pub mod helpers;
pub mod job_lifecycle_test;
pub mod pipeline_test;
pub mod web_crawl_test;
