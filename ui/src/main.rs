use anyhow::Context;
use clap::Parser;
use facefinder::app::App;
use facefinder::cli::Cli;
use facefinder::{config, logger};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match config::init_config(cli.config.as_deref()).config() {
        Ok(config) => config,
        Err(msg) => anyhow::bail!("{msg}"),
    };

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("{}\n", error.user_message());
        }
        anyhow::bail!("Configuration validation failed with {} error(s)", errors.len());
    }

    logger::setup_logger(config.logging()).context("Failed to initialize logging")?;

    let app = App::new(config).context("Failed to start FaceFinder")?;

    match app.run(cli.command).await {
        Ok(code) => Ok(code),
        Err(e) => {
            log::error!("{e}");
            eprintln!("{}", e.user_message());
            if app.navigation().take_login_redirect() {
                log::info!("Login required, redirected to {}", app.navigation().login_path());
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
