//! The load test command shared by `test` and the REPL's `/test`.

use std::sync::Arc;

use log::warn;
use tokio_util::sync::CancellationToken;

use super::shutdown::run_until_cancelled;
use super::statistics::{print_run_banner, print_run_summary};
use crate::config::SchedulerConfig;
use crate::error_handling::ConfigError;
use crate::scheduler::{run_load_test, ConsoleReporter, RunSummary};
use crate::upstream::CompletionClient;

/// Runs a load test with console output.
///
/// Returns `Ok(None)` if the run was cancelled before finishing; no summary is
/// printed in that case.
///
/// # Errors
///
/// Returns `ConfigError::InvalidSetting` if the limits are unusable. Nothing
/// is sent upstream in that case.
pub async fn run_console_load_test(
    client: Arc<dyn CompletionClient>,
    model: &str,
    total_requests: usize,
    config: &SchedulerConfig,
    cancel: &CancellationToken,
) -> Result<Option<RunSummary>, ConfigError> {
    config.validate()?;
    print_run_banner(model, total_requests, config);

    let run = run_load_test(client, total_requests, config, Arc::new(ConsoleReporter));
    match run_until_cancelled(cancel, run).await {
        Some(result) => {
            let summary = result?;
            print_run_summary(&summary);
            Ok(Some(summary))
        }
        None => {
            warn!("Load test cancelled before completion");
            Ok(None)
        }
    }
}
