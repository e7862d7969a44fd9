// ABOUTME: Command-line runner for the RTE demand-response signal worker
// ABOUTME: Runs the worker until Ctrl-C, or checks credentials against the API
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # RTE Signals Binary
//!
//! `rte-signals run` keeps the worker alive and periodically logs the current
//! and next signals. `rte-signals check` validates the configured credentials.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rte_signals::credentials::verify_credentials;
use rte_signals::datetime::france_now;
use rte_signals::{logging, SignalReadings, SignalWorker, WorkerConfig};
use std::process::ExitCode;
use std::time::Duration;
use tokio::signal::ctrl_c;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "rte-signals")]
#[command(about = "RTE demand-response signal worker", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the worker until interrupted (default)
    Run {
        /// Seconds between two readings reports
        #[arg(long, default_value_t = 300)]
        report_interval: u64,
    },
    /// Check the configured credentials with one token grant and one signal request
    Check,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init_from_env()?;
    let config = WorkerConfig::from_env().context("failed to load configuration")?;
    info!("{}", config.summary());

    match cli.command.unwrap_or(Command::Run {
        report_interval: 300,
    }) {
        Command::Run { report_interval } => {
            run(&config, Duration::from_secs(report_interval.max(1))).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check => Ok(check(&config).await),
    }
}

async fn run(config: &WorkerConfig, report_interval: Duration) -> Result<()> {
    let mut worker = SignalWorker::from_config(config);
    worker.start();

    let mut reports = interval(report_interval);
    reports.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            result = ctrl_c() => {
                result.context("failed to listen for Ctrl-C")?;
                worker.stop("ctrl_c");
                break;
            }
            _ = reports.tick() => {
                let readings = SignalReadings::observe(&worker.signal_days(), &france_now());
                info!(current = readings.current, next = readings.next, "Demand response signals");
            }
        }
    }

    worker.join().await;
    Ok(())
}

async fn check(config: &WorkerConfig) -> ExitCode {
    match verify_credentials(&config.credentials, &config.endpoints).await {
        Ok(()) => {
            info!("Credentials are valid");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error.category = e.category(), "Credential check failed: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
