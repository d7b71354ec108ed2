//! # `ndl serve`
//!
//! Runs the API service: loads the listings once, installs the Prometheus
//! metrics exporter, and serves until interrupted.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use metrics_exporter_prometheus::PrometheusBuilder;

use ndl_api::AppState;
use ndl_core::DatalakeConfig;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Configuration file.
    #[arg(long, default_value = "ndl.yaml")]
    pub config: PathBuf,

    /// Override the configured bind address.
    #[arg(long)]
    pub bind: Option<String>,
}

pub fn run(args: &ServeArgs) -> Result<()> {
    let config = DatalakeConfig::load(&args.config)?;
    let bind = args.bind.clone().unwrap_or_else(|| config.bind.clone());
    let state = AppState::load(config);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        PrometheusBuilder::new().install()?;
        ndl_api::serve(state, &bind).await
    })
}
