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

use crate::domain::models::crawl::CrawlSchedule;
use crate::domain::models::job::{JobStatus, JobStatusView};
use crate::jobs::runner::{CrawlExecutor, JobRunner};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

/// 任务注册表错误类型
#[derive(Error, Debug)]
pub enum JobError {
    /// 任务不存在
    #[error("Job {0} not found")]
    NotFound(Uuid),
}

/// 任务记录
///
/// 注册表中一个调度任务的完整状态。状态字段仅由对应的运行器
/// 和注册表操作修改，读取方通过[`JobStatusView`]快照访问。
pub struct JobRecord {
    /// 调度配置
    pub schedule: CrawlSchedule,
    /// 当前状态
    pub status: JobStatus,
    /// 上次执行时间
    pub last_run: Option<DateTime<Utc>>,
    /// 下次执行时间
    pub next_run: Option<DateTime<Utc>>,
    /// 错误信息
    pub error: Option<String>,
    /// 取消信号发送端
    cancel_tx: watch::Sender<bool>,
}

/// 任务注册表
///
/// 任务标识符到任务状态的并发安全映射，是系统中唯一被多个并发
/// 参与者（调度/取消调用方和各运行器）共同修改的资源。底层并发
/// 原语隐藏在显式的schedule/cancel/list_active操作之后，调用方
/// 无需外部加锁。
pub struct JobRegistry {
    jobs: Arc<DashMap<Uuid, JobRecord>>,
    executor: Arc<dyn CrawlExecutor>,
}

impl JobRegistry {
    /// 创建新的任务注册表实例
    ///
    /// # 参数
    ///
    /// * `executor` - 运行器每个周期调用的爬取执行器
    pub fn new(executor: Arc<dyn CrawlExecutor>) -> Self {
        Self {
            jobs: Arc::new(DashMap::new()),
            executor,
        }
    }

    /// 调度一个新的爬取任务
    ///
    /// 生成全新的任务标识符，以Scheduled状态插入记录，并启动绑定
    /// 独立取消句柄的运行器。本方法立即返回，不等待首次执行完成。
    ///
    /// # 参数
    ///
    /// * `schedule` - 调度配置
    ///
    /// # 返回值
    ///
    /// 新任务的标识符
    pub fn schedule(&self, schedule: CrawlSchedule) -> Uuid {
        let job_id = Uuid::new_v4();
        let (cancel_tx, cancel_rx) = watch::channel(false);

        info!(
            "Scheduling crawl job {} ({}) every {}s",
            job_id, schedule.name, schedule.interval_secs
        );

        self.jobs.insert(
            job_id,
            JobRecord {
                schedule: schedule.clone(),
                status: JobStatus::Scheduled,
                last_run: None,
                next_run: None,
                error: None,
                cancel_tx,
            },
        );

        let runner = JobRunner::new(
            job_id,
            schedule,
            self.jobs.clone(),
            self.executor.clone(),
        );
        tokio::spawn(runner.run(cancel_rx));

        job_id
    }

    /// 取消一个任务
    ///
    /// 向对应运行器发出取消信号。取消是协作式的：运行器在每个
    /// 周期开始和等待期间观察信号，最迟在"当前抓取加等待间隔"
    /// 之内退出。
    ///
    /// # 参数
    ///
    /// * `job_id` - 任务标识符
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 信号已发出
    /// * `Err(JobError::NotFound)` - 任务不存在
    pub fn cancel(&self, job_id: Uuid) -> Result<(), JobError> {
        match self.jobs.get(&job_id) {
            Some(record) => {
                info!("Cancelling crawl job {}", job_id);
                let _ = record.cancel_tx.send(true);
                Ok(())
            }
            None => Err(JobError::NotFound(job_id)),
        }
    }

    /// 列出当前注册的任务
    ///
    /// 返回时点快照；已取消的任务由运行器移除后不再出现，
    /// 失败的任务保留其终止状态以便观察。
    pub fn list_active(&self) -> Vec<JobStatusView> {
        self.jobs
            .iter()
            .map(|entry| JobStatusView {
                job_id: *entry.key(),
                name: entry.schedule.name.clone(),
                status: entry.status,
                last_run: entry.last_run,
                next_run: entry.next_run,
                error: entry.error.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
