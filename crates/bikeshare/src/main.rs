mod bootstrap;

use std::io;

use anyhow::Result;
use bikeshare_core::settings::Settings;
use bikeshare_runtime::session::run_session;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("bikeshare v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data dir: {}, log level: {}",
        settings.data_dir.display(),
        settings.log_level
    );

    for (city, path) in bootstrap::missing_city_files(&settings) {
        tracing::warn!("no data file for {} at {}", city, path.display());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = run_session(stdin.lock(), stdout.lock(), &settings.data_dir)?;

    tracing::info!("exiting after {} iteration(s)", summary.iterations.len());
    Ok(())
}
