// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::JobsSettings;
use crate::domain::models::crawl::CrawlSchedule;
use crate::jobs::registry::JobRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// 代理协调器
///
/// 守护进程的最外层：启动时注册配置中的爬取计划，运行期间周期性
/// 输出任务状态日志，收到关闭信号后停止状态循环。各任务运行器由
/// 注册表自行管理，进程退出时随运行时一并终止。
pub struct AgentCoordinator {
    registry: Arc<JobRegistry>,
    default_interval_secs: u64,
    status_interval: Duration,
    status_handle: Option<JoinHandle<()>>,
}

impl AgentCoordinator {
    /// 创建新的代理协调器实例
    ///
    /// # 参数
    ///
    /// * `registry` - 任务注册表
    /// * `settings` - 任务调度配置
    pub fn new(registry: Arc<JobRegistry>, settings: &JobsSettings) -> Self {
        Self {
            registry,
            default_interval_secs: settings.default_interval_secs,
            status_interval: Duration::from_secs(settings.status_check_interval_secs),
            status_handle: None,
        }
    }

    /// 注册配置中的所有爬取计划
    ///
    /// 间隔为0的计划使用配置的默认间隔。
    ///
    /// # 参数
    ///
    /// * `schedules` - 启动时要注册的爬取计划
    pub fn register_schedules(&self, schedules: Vec<CrawlSchedule>) {
        for mut schedule in schedules {
            if schedule.interval_secs == 0 {
                schedule.interval_secs = self.default_interval_secs;
            }
            let job_id = self.registry.schedule(schedule);
            info!("Registered configured crawl job {}", job_id);
        }
    }

    /// 启动周期性状态日志循环
    pub fn start_status_loop(&mut self) {
        let registry = self.registry.clone();
        let interval = self.status_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so the log starts one interval in
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let jobs = registry.list_active();
                info!("{} active crawl jobs", jobs.len());
                for job in &jobs {
                    info!(
                        "Job {} ({}): {} last_run={:?} next_run={:?}",
                        job.job_id, job.name, job.status, job.last_run, job.next_run
                    );
                }
            }
        });
        self.status_handle = Some(handle);
    }

    /// 等待关闭信号并停止状态循环
    pub async fn wait_for_shutdown(&mut self) {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(err) => error!("Unable to listen for shutdown signal: {}", err),
        }

        info!("Shutting down agent...");
        if let Some(handle) = self.status_handle.take() {
            handle.abort();
        }

        info!("Agent shut down successfully");
    }
}
