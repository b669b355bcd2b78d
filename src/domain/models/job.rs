// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 任务状态枚举
///
/// 表示调度任务在其生命周期中的不同状态。
/// 状态转换遵循以下流程：
/// Scheduled → Running → Scheduled（循环）/Failed/Cancelled
///
/// Failed和Cancelled是终止状态，进入后运行器不再发起任何调度。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// 已调度，等待下一次执行
    #[default]
    Scheduled,
    /// 执行中
    Running,
    /// 已完成
    Completed,
    /// 已失败（终止状态）
    Failed,
    /// 已取消（终止状态）
    Cancelled,
}

impl JobStatus {
    /// 判断状态是否为终止状态
    ///
    /// # 返回值
    ///
    /// Failed或Cancelled返回true，其余返回false
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Failed | JobStatus::Cancelled)
    }
}

/// 将任务状态格式化为字符串表示
///
/// 用于日志记录和状态显示
impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobStatus::Scheduled => write!(f, "scheduled"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
            JobStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// 从字符串解析任务状态
impl FromStr for JobStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(JobStatus::Scheduled),
            "running" => Ok(JobStatus::Running),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            "cancelled" => Ok(JobStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// 任务状态视图
///
/// `list_active`返回的时点快照，调用方不得假设其反映调用之后的注册表状态。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusView {
    /// 任务标识符
    pub job_id: Uuid,
    /// 调度名称
    pub name: String,
    /// 当前状态
    pub status: JobStatus,
    /// 上次执行时间
    pub last_run: Option<DateTime<Utc>>,
    /// 下次执行时间
    pub next_run: Option<DateTime<Utc>>,
    /// 错误信息（任务失败时填充）
    pub error: Option<String>,
}
