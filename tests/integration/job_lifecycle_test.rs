// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_dispatcher, mount_html_page};
use ingestrs::domain::models::crawl::{CrawlKind, CrawlSchedule};
use ingestrs::domain::models::job::JobStatus;
use ingestrs::indexing::LoggingSink;
use ingestrs::jobs::registry::JobRegistry;
use ingestrs::pipeline::IngestPipeline;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

fn schedule_for(sources: Vec<String>) -> CrawlSchedule {
    CrawlSchedule {
        name: "nightly".to_string(),
        cron: None,
        interval_secs: 600,
        sources,
        headers: HashMap::new(),
        parameters: HashMap::new(),
        max_depth: 0,
        max_pages: 10,
        kind: CrawlKind::Web,
    }
}

fn build_registry() -> Arc<JobRegistry> {
    let pipeline = Arc::new(IngestPipeline::new(
        create_dispatcher(),
        Arc::new(LoggingSink),
        "documents".to_string(),
    ));
    Arc::new(JobRegistry::new(pipeline))
}

/// 轮询等待条件成立，超时即失败
async fn wait_until<F: Fn() -> bool>(condition: F, what: &str) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("timed out waiting for {}", what);
}

#[tokio::test]
async fn test_scheduled_job_runs_immediately_and_reschedules() {
    let server = MockServer::start().await;
    mount_html_page(&server, "/feed", "feed", &[]).await;

    let registry = build_registry();
    let job_id = registry.schedule(schedule_for(vec![format!("{}/feed", server.uri())]));

    let r = registry.clone();
    wait_until(
        move || {
            r.list_active()
                .iter()
                .any(|j| j.job_id == job_id && j.last_run.is_some())
        },
        "first run to complete",
    )
    .await;

    let jobs = registry.list_active();
    let job = jobs.iter().find(|j| j.job_id == job_id).unwrap();
    assert_eq!(job.status, JobStatus::Scheduled);
    assert!(job.next_run.is_some());
    assert!(job.error.is_none());
    assert_eq!(job.name, "nightly");
}

#[tokio::test]
async fn test_failed_job_is_terminal_but_still_visible() {
    // Empty source list fails request validation on the first run
    let registry = build_registry();
    let job_id = registry.schedule(schedule_for(vec![]));

    let r = registry.clone();
    wait_until(
        move || {
            r.list_active()
                .iter()
                .any(|j| j.job_id == job_id && j.status == JobStatus::Failed)
        },
        "job to fail",
    )
    .await;

    let jobs = registry.list_active();
    let job = jobs.iter().find(|j| j.job_id == job_id).unwrap();
    assert!(job.error.is_some());
    assert!(job.next_run.is_none());
}

#[tokio::test]
async fn test_cancelled_job_is_removed_from_registry() {
    let server = MockServer::start().await;
    mount_html_page(&server, "/feed", "feed", &[]).await;

    let registry = build_registry();
    let job_id = registry.schedule(schedule_for(vec![format!("{}/feed", server.uri())]));

    let r = registry.clone();
    wait_until(
        move || {
            r.list_active()
                .iter()
                .any(|j| j.job_id == job_id && j.last_run.is_some())
        },
        "first run to complete",
    )
    .await;

    registry.cancel(job_id).unwrap();

    let r = registry.clone();
    wait_until(
        move || !r.list_active().iter().any(|j| j.job_id == job_id),
        "cancelled job to be removed",
    )
    .await;

    // Cancelling again reports the job as unknown
    assert!(registry.cancel(job_id).is_err());
}
