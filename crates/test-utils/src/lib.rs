pub mod builders;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

use npsag::engine::{ExplorationConfig, ExplorationContext, ExplorationOutcome};
use npsag::jobs::JobSet;
use npsag::time::Time;

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Logs are captured per test and printed only for failing tests (unless
/// run with `-- --nocapture`). Enable levels with e.g.
/// `RUST_LOG=debug cargo test`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Explore `jobs` to completion and hand back both the context and outcome.
pub fn explore<T: Time>(
    jobs: JobSet<T>,
    config: ExplorationConfig,
) -> (ExplorationContext<T>, ExplorationOutcome<T>) {
    let mut ctx = ExplorationContext::new(jobs, config).expect("Failed to set up exploration");
    let outcome = ctx.explore().expect("Exploration failed");
    (ctx, outcome)
}
