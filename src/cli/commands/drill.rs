//! Drill CLI commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use super::open_database;
use crate::adapters::sqlite::SqliteDrillStore;
use crate::cli::output::{output, table, truncate, CommandOutput};
use crate::domain::models::{Config, Drill, DrillConfiguration, DrillId, PromptLayer};
use crate::services::{find_similar, DrillRepository};

#[derive(Args, Debug)]
pub struct DrillArgs {
    #[command(subcommand)]
    pub command: DrillCommands,
}

#[derive(Subcommand, Debug)]
pub enum DrillCommands {
    /// List all drills
    List,
    /// Show drill details
    Show {
        /// Drill ID
        id: i64,
    },
    /// Save a drill configuration from a JSON or YAML file
    Import {
        /// Path to the configuration file
        file: PathBuf,

        /// Replace the drill named by the file's drillId instead of adding a new one
        #[arg(long)]
        replace: bool,
    },
    /// Copy a drill under a new name
    Duplicate {
        /// Drill ID
        id: i64,
    },
    /// Delete a drill
    Delete {
        /// Drill ID
        id: i64,
    },
    /// List drills with the same prompts as this one
    Similar {
        /// Drill ID
        id: i64,
    },
}

#[derive(Debug, Serialize)]
pub struct DrillSummary {
    pub id: DrillId,
    pub name: String,
    pub tempo: u32,
    pub beats_per_prompt: u32,
    pub milliseconds_per_prompt: u64,
    pub layers: Vec<String>,
}

impl From<&Drill> for DrillSummary {
    fn from(drill: &Drill) -> Self {
        let config = &drill.configuration;
        Self {
            id: drill.id,
            name: drill.name.clone(),
            tempo: config.tempo,
            beats_per_prompt: config.beats_per_prompt,
            milliseconds_per_prompt: config.milliseconds_per_prompt(),
            layers: config.prompt_layers.iter().map(describe_layer).collect(),
        }
    }
}

fn describe_layer(layer: &PromptLayer) -> String {
    let label = match layer {
        PromptLayer::NoteSequence(l) => l.label.as_deref(),
        PromptLayer::ChordSequence(l) => l.label.as_deref(),
        PromptLayer::IntervalSequence(l) => l.label.as_deref(),
    };
    match label {
        Some(label) => format!("{} \"{label}\" ({})", layer.kind(), layer.len()),
        None => format!("{} ({})", layer.kind(), layer.len()),
    }
}

#[derive(Debug, Serialize)]
pub struct DrillListOutput {
    pub drills: Vec<DrillSummary>,
    pub total: usize,
    /// Rows left out because their configuration could not be read.
    pub skipped: Vec<SkippedOutput>,
}

#[derive(Debug, Serialize)]
pub struct SkippedOutput {
    pub id: DrillId,
    pub error: String,
}

impl CommandOutput for DrillListOutput {
    fn to_human(&self) -> String {
        let mut lines = Vec::new();

        if self.drills.is_empty() {
            lines.push("No drills found.".to_string());
        } else {
            let mut table = table(["ID", "NAME", "TEMPO", "BEATS", "LAYERS"]);
            for drill in &self.drills {
                table.add_row(vec![
                    drill.id.to_string(),
                    truncate(&drill.name, 40),
                    drill.tempo.to_string(),
                    drill.beats_per_prompt.to_string(),
                    drill.layers.join(", "),
                ]);
            }
            lines.push(format!("Found {} drill(s):", self.total));
            lines.push(table.to_string());
        }

        if !self.skipped.is_empty() {
            lines.push(format!("\nSkipped {} unreadable drill(s):", self.skipped.len()));
            for skipped in &self.skipped {
                lines.push(format!("  {}: {}", skipped.id, skipped.error));
            }
        }

        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct DrillDetailOutput {
    #[serde(flatten)]
    pub summary: DrillSummary,
    pub configuration: DrillConfiguration,
}

impl CommandOutput for DrillDetailOutput {
    fn to_human(&self) -> String {
        let s = &self.summary;
        let mut lines = vec![
            format!("Drill: {}", s.name),
            format!("ID: {}", s.id),
            format!("Tempo: {} bpm", s.tempo),
            format!("Beats per prompt: {}", s.beats_per_prompt),
            format!("Prompt every: {} ms", s.milliseconds_per_prompt),
        ];

        if s.layers.is_empty() {
            lines.push("Layers: none".to_string());
        } else {
            lines.push("Layers:".to_string());
            for (index, layer) in s.layers.iter().enumerate() {
                lines.push(format!("  {}. {layer}", index + 1));
            }
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.configuration).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct DrillSavedOutput {
    pub message: String,
    pub drill: DrillSummary,
    pub similar: Vec<DrillId>,
}

impl CommandOutput for DrillSavedOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if !self.similar.is_empty() {
            let ids: Vec<String> = self.similar.iter().map(ToString::to_string).collect();
            lines.push(format!(
                "Warning: same prompts as existing drill(s): {}",
                ids.join(", ")
            ));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct SimilarOutput {
    pub id: DrillId,
    pub similar: Vec<DrillSummary>,
}

impl CommandOutput for SimilarOutput {
    fn to_human(&self) -> String {
        if self.similar.is_empty() {
            return format!("No drills share prompts with drill {}.", self.id);
        }

        let mut table = table(["ID", "NAME", "TEMPO"]);
        for drill in &self.similar {
            table.add_row(vec![
                drill.id.to_string(),
                truncate(&drill.name, 40),
                drill.tempo.to_string(),
            ]);
        }
        format!("Drills with the same prompts as {}:\n{table}", self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct DrillActionOutput {
    pub success: bool,
    pub message: String,
}

impl CommandOutput for DrillActionOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}

fn read_configuration(path: &Path) -> Result<DrillConfiguration> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&text).with_context(|| format!("Invalid drill in {}", path.display()))
    } else {
        serde_json::from_str(&text).with_context(|| format!("Invalid drill in {}", path.display()))
    }
}

/// Report the drills similar to `drill`, based on the repository's latest snapshot.
async fn similar_to(repo: &DrillRepository<SqliteDrillStore>, drill: &Drill) -> Vec<DrillId> {
    find_similar(&drill.configuration, &repo.cached_drills().await)
}

pub async fn execute(args: DrillArgs, config: &Config, json_mode: bool) -> Result<()> {
    let pool = open_database(config).await?;
    let repo = DrillRepository::new(Arc::new(SqliteDrillStore::new(pool)));

    match args.command {
        DrillCommands::List => {
            let report = repo.load_all_with_report().await?;
            let out = DrillListOutput {
                total: report.drills.len(),
                drills: report.drills.iter().map(DrillSummary::from).collect(),
                skipped: report
                    .skipped
                    .iter()
                    .map(|s| SkippedOutput {
                        id: s.id,
                        error: s.error.to_string(),
                    })
                    .collect(),
            };
            output(&out, json_mode);
        }

        DrillCommands::Show { id } => {
            let drill = repo.load_by_id(DrillId(id)).await?;
            let out = DrillDetailOutput {
                summary: DrillSummary::from(&drill),
                configuration: drill.configuration,
            };
            output(&out, json_mode);
        }

        DrillCommands::Import { file, replace } => {
            let mut configuration = read_configuration(&file)?;
            if !replace {
                configuration.drill_id = None;
            }

            let drill = repo.save(configuration).await?;
            let similar = similar_to(&repo, &drill).await;
            let out = DrillSavedOutput {
                message: format!("Saved drill {}: {}", drill.id, drill.name),
                drill: DrillSummary::from(&drill),
                similar,
            };
            output(&out, json_mode);
        }

        DrillCommands::Duplicate { id } => {
            let drill = repo.duplicate(DrillId(id)).await?;
            let out = DrillSavedOutput {
                message: format!("Duplicated drill {id} as {}: {}", drill.id, drill.name),
                drill: DrillSummary::from(&drill),
                similar: Vec::new(),
            };
            output(&out, json_mode);
        }

        DrillCommands::Delete { id } => {
            repo.delete_by_id(DrillId(id)).await?;
            let out = DrillActionOutput {
                success: true,
                message: format!("Drill deleted: {id}"),
            };
            output(&out, json_mode);
        }

        DrillCommands::Similar { id } => {
            let drill = repo.load_by_id(DrillId(id)).await?;
            let corpus = repo.load_all().await?;
            let matches = find_similar(&drill.configuration, &corpus);
            let out = SimilarOutput {
                id: drill.id,
                similar: corpus
                    .iter()
                    .filter(|d| matches.contains(&d.id))
                    .map(DrillSummary::from)
                    .collect(),
            };
            output(&out, json_mode);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_yaml_configuration() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(
            file,
            "drillName: Fourths\nbeatsPerPrompt: 2\ntempo: 90\npromptLayers:\n  - layerType: intervalSequence\n    intervals: [5]"
        )
        .unwrap();

        let config = read_configuration(file.path()).unwrap();
        assert_eq!(config.drill_name, "Fourths");
        assert_eq!(config.prompt_layers.len(), 1);
    }

    #[test]
    fn test_read_json_configuration_reports_bad_layer() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"drillName":"x","beatsPerPrompt":1,"tempo":60,"promptLayers":[{{"notes":[]}}]}}"#
        )
        .unwrap();

        assert!(read_configuration(file.path()).is_err());
    }

    #[test]
    fn test_describe_layer() {
        let drill = DrillConfiguration::new("x", 1, 60).with_layer(
            crate::domain::models::NoteSequenceLayer {
                notes: vec!["C".parse().unwrap(), "G".parse().unwrap()],
                label: Some("Roots".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(describe_layer(&drill.prompt_layers[0]), "noteSequence \"Roots\" (2)");
    }
}
