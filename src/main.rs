// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use ingestrs::agent::AgentCoordinator;
use ingestrs::config::settings::Settings;
use ingestrs::crawler::api::ApiCrawler;
use ingestrs::crawler::dispatcher::CrawlDispatcher;
use ingestrs::crawler::robots::RobotsChecker;
use ingestrs::crawler::web::WebCrawler;
use ingestrs::engines::reqwest_engine::ReqwestEngine;
use ingestrs::engines::traits::FetchEngine;
use ingestrs::indexing::LoggingSink;
use ingestrs::jobs::registry::JobRegistry;
use ingestrs::pipeline::IngestPipeline;
use ingestrs::utils::telemetry;
use std::sync::Arc;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动守护进程
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting ingestrs...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Build the fetch engine shared by both crawl strategies
    let engine: Arc<dyn FetchEngine> = Arc::new(ReqwestEngine::new(&settings.crawler)?);

    // 4. Assemble crawl strategies and the dispatcher
    let mut web_crawler = WebCrawler::new(
        engine.clone(),
        settings.crawler.user_agent.clone(),
        settings.crawler.max_concurrent_requests,
    );
    if settings.crawler.respect_robots_txt {
        web_crawler = web_crawler.with_robots_checker(Arc::new(RobotsChecker::new()));
    }
    let api_crawler = ApiCrawler::new(engine);
    let dispatcher = Arc::new(CrawlDispatcher::new(web_crawler, api_crawler));

    // 5. Build the ingest pipeline and the job registry
    let pipeline = Arc::new(IngestPipeline::new(
        dispatcher,
        Arc::new(LoggingSink),
        settings.indexing.index_name.clone(),
    ));
    let registry = Arc::new(JobRegistry::new(pipeline));
    info!("Job registry initialized");

    // 6. Register configured schedules and run until shutdown
    let mut agent = AgentCoordinator::new(registry, &settings.jobs);
    agent.register_schedules(settings.schedules);
    agent.start_status_loop();

    info!("ingestrs is running, press Ctrl-C to stop");
    agent.wait_for_shutdown().await;

    Ok(())
}
