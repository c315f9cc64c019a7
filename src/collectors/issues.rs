//! Issue-tracker polling: recent unresolved issues and coarse totals.

#![allow(missing_docs)]

use crate::collectors::exec::CommandRunner;
use crate::core::config::{IssuesConfig, ProjectConfig};
use crate::core::errors::{CollectorError, DataSource};
use crate::extract::{IssueRecord, count_data_rows, parse_issues};

/// Recent unresolved issues for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIssues {
    pub label: String,
    pub issues: Vec<IssueRecord>,
}

/// Coarse issue total for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCount {
    pub label: String,
    pub total: usize,
}

fn list_args(issues: &IssuesConfig, project: &ProjectConfig) -> Vec<String> {
    [
        "issues",
        "list",
        "--org",
        issues.org.as_str(),
        "--project",
        project.slug.as_str(),
    ]
    .map(str::to_string)
    .to_vec()
}

/// Query every project for unresolved issues inside the configured window.
///
/// The first failing project fails the whole collection.
pub fn collect_issue_list(
    runner: &dyn CommandRunner,
    issues: &IssuesConfig,
) -> Result<Vec<ProjectIssues>, CollectorError> {
    let query = format!("age:-{}h is:unresolved", issues.window_hours);
    issues
        .projects
        .iter()
        .map(|project| {
            let mut args = list_args(issues, project);
            args.push("--query".to_string());
            args.push(query.clone());
            let output = runner.run(DataSource::IssueList, &issues.binary, &args, None)?;
            Ok(ProjectIssues {
                label: project.label.clone(),
                issues: parse_issues(&output),
            })
        })
        .collect()
}

/// Count listed issues per project without a query filter.
pub fn collect_issue_counts(
    runner: &dyn CommandRunner,
    issues: &IssuesConfig,
) -> Result<Vec<IssueCount>, CollectorError> {
    issues
        .projects
        .iter()
        .map(|project| {
            let args = list_args(issues, project);
            let output = runner.run(DataSource::IssueCounts, &issues.binary, &args, None)?;
            Ok(IssueCount {
                label: project.label.clone(),
                total: count_data_rows(&output),
            })
        })
        .collect()
}
