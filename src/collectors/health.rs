//! HTTP health checks via curl, with optional per-group drill-down.

#![allow(missing_docs)]

use std::time::Duration;

use tracing::debug;

use crate::collectors::exec::CommandRunner;
use crate::core::config::{HealthConfig, ServiceConfig};
use crate::core::errors::{CollectorError, DataSource};
use crate::extract::{HealthStatus, extract, group_names};

/// curl write-out appended after the body on its own line.
const TIMING_WRITE_OUT: &str = "\n%{time_total}";

/// Status of one sub-group of a group-expanding service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHealth {
    pub name: String,
    pub status: HealthStatus,
    /// Upper-cased status text, or `OK`/`FAIL` when the body carried none.
    pub status_text: String,
}

/// One service's health for the current poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthResult {
    pub service: String,
    pub latency_ms: Option<u64>,
    pub status: HealthStatus,
    /// Raw extracted `status` value; empty when absent.
    pub status_text: String,
    pub expand_groups: bool,
    pub groups: Vec<GroupHealth>,
    pub error: Option<CollectorError>,
}

impl HealthResult {
    fn failed(service: &ServiceConfig, error: CollectorError) -> Self {
        Self {
            service: service.name.clone(),
            latency_ms: None,
            status: HealthStatus::Unknown,
            status_text: String::new(),
            expand_groups: service.expand_groups,
            groups: Vec::new(),
            error: Some(error),
        }
    }
}

/// Poll every configured service in order.
///
/// A failing service yields a result carrying its error; it never prevents
/// the remaining services from being polled.
pub fn collect_health(runner: &dyn CommandRunner, health: &HealthConfig) -> Vec<HealthResult> {
    health
        .services
        .iter()
        .map(|service| check_service(runner, health, service))
        .collect()
}

fn check_service(
    runner: &dyn CommandRunner,
    health: &HealthConfig,
    service: &ServiceConfig,
) -> HealthResult {
    let timeout = health.timeout_secs.to_string();
    let args = [
        "-s",
        "-m",
        timeout.as_str(),
        "-w",
        TIMING_WRITE_OUT,
        service.url.as_str(),
    ]
    .map(str::to_string);
    let output = match runner.run(DataSource::Health, &health.binary, &args, None) {
        Ok(output) => output,
        Err(e) => return HealthResult::failed(service, e),
    };

    let (body, latency_ms) = split_timing(&output);
    let status_text = extract(body, "status").unwrap_or_default().trim().to_string();
    let status = HealthStatus::from_body(body);

    let groups = if service.expand_groups {
        let names = extract(body, "groups").map(group_names).unwrap_or_default();
        debug!(service = %service.name, groups = names.len(), "expanding health groups");
        names
            .into_iter()
            .map(|name| check_group(runner, health, &service.url, name))
            .collect()
    } else {
        Vec::new()
    };

    HealthResult {
        service: service.name.clone(),
        latency_ms,
        status,
        status_text,
        expand_groups: service.expand_groups,
        groups,
        error: None,
    }
}

/// Groups are fetched one after another; a transport failure reads as an
/// empty body and therefore as FAIL.
fn check_group(
    runner: &dyn CommandRunner,
    health: &HealthConfig,
    base_url: &str,
    name: String,
) -> GroupHealth {
    let url = format!("{}/{name}", base_url.trim_end_matches('/'));
    let timeout = health.timeout_secs.to_string();
    let args = ["-s", "-m", timeout.as_str(), url.as_str()].map(str::to_string);
    let body = runner
        .run(DataSource::Health, &health.binary, &args, None)
        .unwrap_or_default();

    let body = body.trim();
    let text = extract(body, "status").unwrap_or_default().trim().to_uppercase();
    let status = if HealthStatus::from_body(body) == HealthStatus::Ok {
        HealthStatus::Ok
    } else {
        HealthStatus::Fail
    };
    let status_text = if text.is_empty() {
        status.label().to_string()
    } else {
        text
    };

    GroupHealth {
        name,
        status,
        status_text,
    }
}

/// Split curl output into the body and the trailing `%{time_total}` line,
/// converted to whole milliseconds.
#[must_use]
pub fn split_timing(output: &str) -> (&str, Option<u64>) {
    let trimmed = output.trim_end();
    let (body, last) = match trimmed.rsplit_once('\n') {
        Some((body, last)) => (body, last),
        None => ("", trimmed),
    };
    match last.trim().parse::<f64>() {
        Ok(secs) if (0.0..1.0e9).contains(&secs) => {
            let ms = Duration::from_secs_f64(secs).as_millis();
            (body.trim(), Some(u64::try_from(ms).unwrap_or(u64::MAX)))
        }
        _ => (trimmed.trim(), None),
    }
}
