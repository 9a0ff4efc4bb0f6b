//! Claims Agent Dashboard - Console Binary
//!
//! Drives one dashboard for the sample collision claim from stdin.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin claims-dashboard
//!
//! DASHBOARD_APPROVAL_STEP_DELAY_MS=500 DASHBOARD_EXPORT_DIR=/tmp cargo run --bin claims-dashboard
//! ```
//!
//! # Environment Variables
//!
//! * `DASHBOARD_AGENT_ID` - Acting agent (default: Agent A-4782)
//! * `DASHBOARD_TIMEZONE` - IANA zone for displayed times (default: UTC)
//! * `DASHBOARD_ASSESSMENT_DELAY_MS` - Simulated inference time (default: 2000)
//! * `DASHBOARD_APPROVAL_STEP_DELAY_MS` - Gap between cascade steps (default: 3000)
//! * `DASHBOARD_STATUS_BANNER_TTL_MS` - Banner lifetime (default: 5000)
//! * `DASHBOARD_FINAL_ESTIMATE_POLICY` - overwrite_on_recalculate or seed_once
//! * `DASHBOARD_AUDIT_DAMAGE_LIST_CHANGES` - Audit damage additions and removals (default: false)
//! * `DASHBOARD_INITIAL_FINAL_ESTIMATE` - Starting final estimate
//! * `DASHBOARD_EXPORT_DIR` - Where documents are written (default: .)
//! * `DASHBOARD_LOG_LEVEL` - trace, debug, info, warn, error (default: info)

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use core_kernel::SystemClock;
use domain_claims::ClaimDetails;
use interface_dashboard::{
    init_tracing, view, ClaimsDashboard, Command, DashboardConfig, FileExportSink,
    LocalImageStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = DashboardConfig::from_env().context("loading DASHBOARD_* configuration")?;
    init_tracing(&config.log_level);
    let settings = config.to_settings()?;

    let dashboard = ClaimsDashboard::open(
        ClaimDetails::collision_sample(),
        settings,
        Arc::new(SystemClock),
        Arc::new(LocalImageStore::new(config.export_dir.join("uploads"))),
        Arc::new(FileExportSink::new(&config.export_dir)),
    )?;

    println!("{}", view::render_summary(&dashboard.snapshot().await));
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("reading stdin")?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl+C, shutting down");
                break;
            }
        };
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(e) = run(&dashboard, command).await {
            eprintln!("error: {:#}", e);
        }
    }

    tracing::info!("Dashboard closed");
    Ok(())
}

async fn run(dashboard: &ClaimsDashboard, command: Command) -> anyhow::Result<()> {
    let state = match command {
        Command::Status(status) => dashboard.change_status(status).await?,
        Command::Submit => dashboard.submit_for_approval().await?,
        Command::Approve => dashboard.approve().await?,
        Command::SendRepairAuthorization => dashboard.send_repair_authorization().await?,
        Command::Rerun => dashboard.run_assessment().await?,
        Command::Upload(uploads) => dashboard.upload_images(uploads).await?,
        Command::Severity { index, severity } => dashboard.update_severity(index, severity).await?,
        Command::Type { index, damage_type } => dashboard.update_type(index, damage_type).await?,
        Command::Add => dashboard.add_damage().await?,
        Command::Remove(index) => dashboard.remove_damage(index).await?,
        Command::Estimate(value) => dashboard.set_final_estimate(value).await?,
        Command::Notes(notes) => dashboard.set_agent_notes(notes).await?,
        Command::Confidence { input, strict: true } => {
            dashboard.override_confidence_strict(&input).await?
        }
        Command::Confidence { input, strict: false } => dashboard.override_confidence(input).await?,
        Command::Download => {
            let receipt = dashboard.download_repair_authorization().await?;
            println!("Saved {} ({} bytes)", receipt.location, receipt.bytes_written);
            return Ok(());
        }
        Command::Show => dashboard.snapshot().await,
        Command::Audit => {
            print!("{}", view::render_audit(&dashboard.snapshot().await));
            return Ok(());
        }
        Command::History => {
            print!("{}", view::render_history(&dashboard.snapshot().await));
            return Ok(());
        }
        Command::Json => {
            let state = dashboard.snapshot().await;
            println!("{}", serde_json::to_string_pretty(&state)?);
            return Ok(());
        }
        Command::Help => {
            println!("{}", interface_dashboard::command::USAGE);
            return Ok(());
        }
        Command::Quit => return Ok(()),
    };
    println!("{}", view::render_summary(&state));
    Ok(())
}
