//! Report output model for dotpath runs.

use anyhow::{bail, Context, Result};
use dotpath_animation::{LegReport, SequencerReport};
use dotpath_core::Point;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Component, Path};

/// One leg as written to the report; progress samples are summarized
#[derive(Debug, Clone, Serialize)]
pub struct LegSummary {
    pub target: String,
    pub from: Point,
    pub to: Point,
    pub frames: usize,
    pub final_progress: f64,
    pub started_at_ms: f64,
    pub finished_at_ms: f64,
}

impl From<&LegReport> for LegSummary {
    fn from(leg: &LegReport) -> Self {
        Self {
            target: leg.label.clone(),
            from: leg.from,
            to: leg.to,
            frames: leg.samples.len(),
            final_progress: leg.final_progress(),
            started_at_ms: leg.started_at,
            finished_at_ms: leg.finished_at,
        }
    }
}

/// Machine-readable result of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub legs: Vec<LegSummary>,
    pub ignored_clicks: usize,
    pub elapsed_ms: f64,
    pub marker_offset: Point,
}

impl RunReport {
    pub fn from_sequencer(report: &SequencerReport, elapsed_ms: f64, marker_offset: Point) -> Self {
        Self::from_legs(&report.legs, report.ignored_clicks, elapsed_ms, marker_offset)
    }

    pub fn from_legs(
        legs: &[LegReport],
        ignored_clicks: usize,
        elapsed_ms: f64,
        marker_offset: Point,
    ) -> Self {
        Self {
            legs: legs.iter().map(LegSummary::from).collect(),
            ignored_clicks,
            elapsed_ms,
            marker_offset,
        }
    }

    /// Write pretty JSON to a path under the working directory
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            bail!(
                "Report path {} must stay inside the working directory",
                path.display()
            );
        }

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write report {}", path.display()))
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", self.to_json()?).context("Failed to write report")
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}
