//! Active cluster context from `kubectl config get-contexts`.

use crate::collectors::exec::CommandRunner;
use crate::core::config::KubeConfig;
use crate::core::errors::{CollectorError, DataSource};

/// Find the row marked `*` and return its second whitespace field.
#[must_use]
pub fn parse_active_context(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('*'))
        .find_map(|line| line.split_whitespace().nth(1).map(str::to_string))
}

/// `None` when the tool answered but no context is marked current.
pub fn collect_context(
    runner: &dyn CommandRunner,
    kube: &KubeConfig,
) -> Result<Option<String>, CollectorError> {
    let args = ["config", "get-contexts"].map(str::to_string);
    let output = runner.run(DataSource::Context, &kube.binary, &args, None)?;
    Ok(parse_active_context(&output))
}
