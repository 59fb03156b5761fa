//! Binary entry point: logging setup and runtime launch.

use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_logging();
    cinefile::app::run().await
}

/// Route `tracing` output to a file under the logs directory; stdout belongs
/// to the TUI. Level is controlled via `CINEFILE_LOG` (default `info`).
fn init_logging() {
    let path = cinefile::config::logs_dir().join("cinefile.log");
    let Ok(file) = File::create(&path) else {
        return;
    };
    let filter =
        EnvFilter::try_from_env("CINEFILE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}
