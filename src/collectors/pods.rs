//! Pod inventory: a names-only listing plus the human display table.

#![allow(missing_docs)]

use crate::collectors::exec::CommandRunner;
use crate::core::config::KubeConfig;
use crate::core::errors::{CollectorError, DataSource};

/// Display table plus the pod names in row order.
///
/// `names()[i]` always belongs to data row `i` of the table (row 0 of
/// `table()` is the header).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodSnapshot {
    header: String,
    rows: Vec<String>,
    names: Vec<String>,
}

impl PodSnapshot {
    /// Pair the display output with the names listing.
    ///
    /// Blank display lines are dropped. When the two listings disagree on the
    /// row count (a pod appeared between the two calls) the names are re-read
    /// from the first column of the display rows so indices stay aligned.
    #[must_use]
    pub fn new(display: &str, names: Vec<String>) -> Self {
        let mut lines = display
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty());
        let header = lines.next().unwrap_or_default().to_string();
        let rows: Vec<String> = lines.map(str::to_string).collect();

        let names = if names.len() == rows.len() {
            names
        } else {
            rows.iter()
                .map(|row| row.split_whitespace().next().unwrap_or_default().to_string())
                .collect()
        };

        Self {
            header,
            rows,
            names,
        }
    }

    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Data rows, without the header.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Full renderable table, header first.
    #[must_use]
    pub fn table(&self) -> String {
        std::iter::once(self.header.as_str())
            .chain(self.rows.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Split a `custom-columns=NAME` listing into names.
#[must_use]
pub fn parse_names(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn namespace_args(kube: &KubeConfig) -> Vec<String> {
    kube.namespace
        .as_ref()
        .map(|ns| vec!["-n".to_string(), ns.clone()])
        .unwrap_or_default()
}

/// Run both listings and pair them.
pub fn collect_pods(
    runner: &dyn CommandRunner,
    kube: &KubeConfig,
) -> Result<PodSnapshot, CollectorError> {
    let mut names_args: Vec<String> = [
        "get",
        "pods",
        "--no-headers",
        "-o",
        "custom-columns=NAME:.metadata.name",
    ]
    .map(str::to_string)
    .to_vec();
    names_args.extend(namespace_args(kube));
    let names = runner.run(DataSource::Pods, &kube.binary, &names_args, None)?;

    let mut display_args = vec!["get".to_string(), "pods".to_string()];
    display_args.extend(namespace_args(kube));
    let display = runner.run(DataSource::Pods, &kube.binary, &display_args, None)?;

    Ok(PodSnapshot::new(&display, parse_names(&names)))
}
