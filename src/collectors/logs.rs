//! Tail of one pod's logs, bounded by a hard deadline.

use crate::collectors::exec::CommandRunner;
use crate::collectors::pods::namespace_args;
use crate::core::config::KubeConfig;
use crate::core::errors::{CollectorError, DataSource};

/// Fetch the last `log_tail_lines` lines for `pod`.
///
/// The child is killed once `log_timeout_secs` elapses.
pub fn collect_logs(
    runner: &dyn CommandRunner,
    kube: &KubeConfig,
    pod: &str,
) -> Result<String, CollectorError> {
    let mut args = vec![
        "logs".to_string(),
        pod.to_string(),
        format!("--tail={}", kube.log_tail_lines),
    ];
    args.extend(namespace_args(kube));
    runner.run(
        DataSource::PodLogs,
        &kube.binary,
        &args,
        Some(kube.log_timeout()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::test_support::ScriptedRunner;

    #[test]
    fn requests_tail_for_pod() {
        let runner = ScriptedRunner::default().respond("logs api-1", "line one\nline two\n");
        let text = collect_logs(&runner, &KubeConfig::default(), "api-1").expect("scripted");
        assert_eq!(text.lines().count(), 2);
        assert_eq!(runner.calls(), vec!["kubectl logs api-1 --tail=500"]);
    }

    #[test]
    fn failure_is_tagged_as_pod_logs() {
        let runner = ScriptedRunner::default().fail("logs");
        let err = collect_logs(&runner, &KubeConfig::default(), "api-1").expect_err("fails");
        assert_eq!(err.origin(), DataSource::PodLogs);
    }
}
