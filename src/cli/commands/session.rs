//! Practice session CLI commands.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use super::open_database;
use crate::adapters::sqlite::{SqliteDrillStore, SqliteSessionRepository};
use crate::cli::output::{format_duration, format_millis, output, table, truncate, CommandOutput};
use crate::cli::time::parse_time;
use crate::domain::models::{Config, DrillId, DrillStatsReport, EpochMillis, SessionId, SessionInput};
use crate::services::{DrillRepository, SessionStore};

#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommands,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Record a finished practice session
    Record {
        /// Drill that was practiced
        #[arg(long)]
        drill: i64,

        /// When the session began
        #[arg(long, value_parser = parse_time)]
        started: EpochMillis,

        /// Session length in milliseconds
        #[arg(long)]
        duration_ms: i64,

        /// Number of prompts shown
        #[arg(long, default_value = "0")]
        prompts: u32,
    },
    /// Show practice time per drill
    Stats {
        /// Only count sessions of this drill
        #[arg(long)]
        drill: Option<i64>,

        /// Earliest session start to include (default: all time)
        #[arg(long, value_parser = parse_time)]
        since: Option<EpochMillis>,

        /// Latest session start to include (default: no limit)
        #[arg(long, value_parser = parse_time)]
        until: Option<EpochMillis>,
    },
}

#[derive(Debug, Serialize)]
pub struct SessionRecordedOutput {
    pub session_id: SessionId,
    pub drill_id: DrillId,
    pub drill_name: String,
    pub time_started: EpochMillis,
    pub total_session_time_millis: i64,
}

impl CommandOutput for SessionRecordedOutput {
    fn to_human(&self) -> String {
        format!(
            "Recorded session {} for {} ({}) started {}",
            self.session_id,
            self.drill_name,
            format_duration(self.total_session_time_millis),
            format_millis(self.time_started),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct StatsOutput {
    pub since: Option<EpochMillis>,
    pub until: Option<EpochMillis>,
    #[serde(flatten)]
    pub report: DrillStatsReport,
}

impl CommandOutput for StatsOutput {
    fn to_human(&self) -> String {
        let window = match (self.since, self.until) {
            (Some(since), Some(until)) => {
                format!("from {} to {}", format_millis(since), format_millis(until))
            }
            (Some(since), None) => format!("since {}", format_millis(since)),
            (None, Some(until)) => format!("until {}", format_millis(until)),
            (None, None) => "in total".to_string(),
        };

        if self.report.per_drill.is_empty() {
            return format!("No practice recorded {window}.");
        }

        let mut table = table(["DRILL", "TIME"]);
        for stat in &self.report.per_drill {
            table.add_row(vec![
                truncate(&stat.drill_name, 40),
                format_duration(stat.total_time_millis),
            ]);
        }

        format!(
            "Practice {window}: {}\n{table}",
            format_duration(self.report.total_all_drills)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.report).unwrap_or_default()
    }
}

pub async fn execute(args: SessionArgs, config: &Config, json_mode: bool) -> Result<()> {
    let pool = open_database(config).await?;
    let store = SessionStore::new(Arc::new(SqliteSessionRepository::new(pool.clone())));

    match args.command {
        SessionCommands::Record {
            drill,
            started,
            duration_ms,
            prompts,
        } => {
            let drills = DrillRepository::new(Arc::new(SqliteDrillStore::new(pool)));
            let drill = drills
                .load_by_id(DrillId(drill))
                .await
                .context("Sessions can only be recorded for saved drills")?;

            let session = SessionInput::for_drill(&drill, started, duration_ms, prompts);
            let session_id = store.record_session(&session).await?;

            let out = SessionRecordedOutput {
                session_id,
                drill_id: session.drill_id,
                drill_name: session.drill_name,
                time_started: session.time_started,
                total_session_time_millis: session.total_session_time_millis,
            };
            output(&out, json_mode);
        }

        SessionCommands::Stats {
            drill,
            since,
            until,
        } => {
            let report = store
                .query_range(drill.map(DrillId), since.unwrap_or(EpochMillis::MIN), until)
                .await?;
            let out = StatsOutput {
                since,
                until,
                report,
            };
            output(&out, json_mode);
        }
    }

    Ok(())
}
