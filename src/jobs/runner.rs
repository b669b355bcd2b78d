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

use crate::domain::models::crawl::{CrawlRequest, CrawlSchedule};
use crate::domain::models::job::JobStatus;
use crate::jobs::registry::JobRecord;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};
use uuid::Uuid;

/// 爬取执行器接口
///
/// 运行器每个周期执行的工作单元。生产实现为完整的
/// 爬取-处理-入库流水线，测试中可替换为受控实现。
#[async_trait]
pub trait CrawlExecutor: Send + Sync {
    /// 执行一次爬取，返回产出的条目数
    async fn execute(&self, request: CrawlRequest) -> anyhow::Result<usize>;
}

/// 任务运行器
///
/// 每个调度任务一个独立的运行器任务。状态机：
/// Scheduled → Running → Scheduled（循环）/Failed/Cancelled。
///
/// 每个周期：先检查取消信号；转入Running并执行一次爬取；成功则
/// 转回Scheduled并重新计算下次执行时间；失败则转入Failed、记录
/// 错误并退出循环（失败的任务绝不静默重试，其终止状态通过注册表
/// 保持可见）。周期之间的等待本身是取消点。
pub struct JobRunner {
    job_id: Uuid,
    schedule: CrawlSchedule,
    jobs: Arc<DashMap<Uuid, JobRecord>>,
    executor: Arc<dyn CrawlExecutor>,
}

impl JobRunner {
    /// 创建新的任务运行器实例
    pub fn new(
        job_id: Uuid,
        schedule: CrawlSchedule,
        jobs: Arc<DashMap<Uuid, JobRecord>>,
        executor: Arc<dyn CrawlExecutor>,
    ) -> Self {
        Self {
            job_id,
            schedule,
            jobs,
            executor,
        }
    }

    /// 运行任务循环直至取消或失败
    ///
    /// # 参数
    ///
    /// * `cancel_rx` - 取消信号接收端
    pub async fn run(self, mut cancel_rx: watch::Receiver<bool>) {
        // Fixed-interval approximation of the schedule: next_run is always
        // recomputed from the interval after each run, never hardcoded
        let interval = Duration::from_secs(self.schedule.interval_secs.max(1));

        loop {
            // 1. Cancellation check at the top of each tick
            if *cancel_rx.borrow() {
                self.finish_cancelled();
                return;
            }

            // 2. Dispatch one crawl cycle
            self.update_record(|record| {
                record.status = JobStatus::Running;
            });

            let request = CrawlRequest::from_schedule(&self.schedule);
            info!(
                "Executing scheduled crawl job {} ({})",
                self.job_id, self.schedule.name
            );

            match self.executor.execute(request).await {
                Ok(count) => {
                    let now = Utc::now();
                    let next = now + chrono::Duration::from_std(interval).unwrap_or_default();
                    info!(
                        "Crawl job {} produced {} items, next run at {}",
                        self.job_id, count, next
                    );
                    self.update_record(|record| {
                        record.status = JobStatus::Scheduled;
                        record.last_run = Some(now);
                        record.next_run = Some(next);
                    });
                }
                Err(e) => {
                    // A failed job must end in an observable terminal state,
                    // not keep reporting a stale status forever
                    error!("Crawl job {} failed: {}", self.job_id, e);
                    self.update_record(|record| {
                        record.status = JobStatus::Failed;
                        record.error = Some(e.to_string());
                        record.next_run = None;
                    });
                    return;
                }
            }

            // 3. Wait for the next tick; waiting is itself a cancellation point
            tokio::select! {
                _ = cancel_rx.changed() => {
                    if *cancel_rx.borrow() {
                        self.finish_cancelled();
                        return;
                    }
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }
    }

    /// 标记任务为已取消并从注册表移除
    fn finish_cancelled(&self) {
        info!("Crawl job {} was cancelled", self.job_id);
        self.update_record(|record| {
            record.status = JobStatus::Cancelled;
        });
        self.jobs.remove(&self.job_id);
    }

    /// 在锁内更新本任务的记录
    fn update_record<F: FnOnce(&mut JobRecord)>(&self, f: F) {
        if let Some(mut record) = self.jobs.get_mut(&self.job_id) {
            f(&mut record);
        }
    }
}
