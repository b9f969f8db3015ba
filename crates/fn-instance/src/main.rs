//! Function instance worker: resolves the instance config and reports it.

use anyhow::Context;
use fn_instance::config::ConfigSource;
use fn_instance::init_logging;
use log::info;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    init_logging();

    let source = ConfigSource::from_env();
    info!(
        "starting function instance (help={}, path_set={}, content_set={})",
        source.help,
        !source.path.is_empty(),
        !source.content.is_empty()
    );

    // Resolution failures are logged by the resolver.
    let Ok(config) = source.resolve() else {
        return Ok(ExitCode::FAILURE);
    };

    info!("resolved instance config: {}", config.to_masked_string());
    let rendered =
        serde_json::to_string_pretty(&config.masked()).context("failed to render config")?;
    println!("{rendered}");
    Ok(ExitCode::SUCCESS)
}
