//! Fault-tolerant extraction of structured facts from collector output.
//!
//! Nothing in here returns an error: absent fields come back as `None`,
//! unrecognizable tables as empty vectors.

pub mod issue_table;
pub mod json_field;

pub use issue_table::{IssueRecord, count_data_rows, parse_issues};
pub use json_field::{HealthStatus, extract, group_names};
