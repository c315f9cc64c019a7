//! Public extraction API against realistic tool output.

use oncall_dashboard::collectors::{PodSnapshot, parse_active_context};
use oncall_dashboard::extract::{
    HealthStatus, count_data_rows, extract, group_names, parse_issues,
};

const HEALTH_BODY: &str = r#"{
  "status": "UP",
  "groups": ["liveness", "readiness"],
  "details": {"db": {"status": "UP"}, "cache": {"status": "DOWN"}}
}"#;

const ISSUE_TABLE: &str = "\
+------------+----------+-------------------------+--------------+------------+-------+
| Issue ID   | Short ID | Title                   | Last seen    | Status     | Level |
+------------+----------+-------------------------+--------------+------------+-------+
| 5512000001 | IAM-3F   | TokenExpired in refresh | 3 min ago    | unresolved | error |
| 5512000002 | IAM-3G   | Slow query on users     | 1 hour ago   | unresolved | info  |
| 5512000003 | IAM-3H   | Worker OOM              | 1 day ago    | resolved   | fatal |
+------------+----------+-------------------------+--------------+------------+-------+
";

#[test]
fn health_body_status_and_groups() {
    assert_eq!(extract(HEALTH_BODY, "status"), Some("UP"));
    assert_eq!(HealthStatus::from_body(HEALTH_BODY), HealthStatus::Ok);

    let groups = extract(HEALTH_BODY, "groups").expect("groups present");
    assert_eq!(groups, r#"["liveness", "readiness"]"#);
    assert_eq!(group_names(groups), vec!["liveness", "readiness"]);
}

#[test]
fn nested_object_comes_back_balanced() {
    let details = extract(HEALTH_BODY, "details").expect("details present");
    assert!(details.starts_with('{'));
    assert!(details.ends_with('}'));
    assert_eq!(extract(details, "cache"), Some(r#"{"status": "DOWN"}"#));
}

#[test]
fn degraded_bodies_still_classify() {
    assert_eq!(HealthStatus::from_body(r#"{"status":"down"}"#), HealthStatus::Fail);
    assert_eq!(HealthStatus::from_body(""), HealthStatus::Unknown);
    assert_eq!(HealthStatus::from_body("<html>502</html>"), HealthStatus::Unknown);
    assert_eq!(HealthStatus::from_body(r#"{"status": "ok"#), HealthStatus::Ok);
    assert_eq!(HealthStatus::Fail.label(), "FAIL");
}

#[test]
fn missing_key_is_none() {
    assert_eq!(extract(HEALTH_BODY, "version"), None);
    assert_eq!(extract(r#"{"status":"#, "status"), None);
}

#[test]
fn issue_table_rows_are_recovered() {
    let issues = parse_issues(ISSUE_TABLE);
    assert_eq!(issues.len(), 3);
    assert_eq!(issues[0].short_id, "IAM-3F");
    assert_eq!(issues[0].title, "TokenExpired in refresh");
    assert_eq!(issues[1].level, "info");
    assert_eq!(issues[2].status, "resolved");
    assert_eq!(issues[2].level, "fatal");
}

#[test]
fn table_without_header_yields_nothing() {
    assert!(parse_issues("").is_empty());
    assert!(parse_issues("No issues found.\n").is_empty());
}

#[test]
fn row_count_skips_blank_and_issue_lines() {
    let plain = "Issue ID  Title\n\n101  a\n102  b\n";
    assert_eq!(count_data_rows(plain), 2);
    assert_eq!(count_data_rows(""), 0);
}

#[test]
fn active_context_is_the_starred_row() {
    let output = "\
CURRENT   NAME        CLUSTER     AUTHINFO   NAMESPACE
          staging     staging     admin
*         prod-eu     prod-eu     admin      payments
";
    assert_eq!(parse_active_context(output).as_deref(), Some("prod-eu"));
    assert_eq!(parse_active_context("NAME\nstaging\n"), None);
}

#[test]
fn pod_snapshot_keeps_names_aligned_with_rows() {
    let display = "\
NAME                      READY   STATUS    RESTARTS   AGE
ticketing-7d9f8-abcde     1/1     Running   0          2d
iam-5c6b7-fghij           0/1     Pending   0          1m
";
    let aligned = PodSnapshot::new(
        display,
        vec!["ticketing-7d9f8-abcde".into(), "iam-5c6b7-fghij".into()],
    );
    assert_eq!(aligned.rows().len(), 2);
    assert_eq!(aligned.names()[1], "iam-5c6b7-fghij");

    let stale = PodSnapshot::new(display, vec!["ticketing-7d9f8-abcde".into()]);
    assert_eq!(stale.names(), ["ticketing-7d9f8-abcde", "iam-5c6b7-fghij"]);
}
