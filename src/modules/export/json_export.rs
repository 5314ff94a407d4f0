//! JSON Export
//!
//! Writes the dashboard datasets, with the values the charts derive from
//! them, to a JSON file.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::ExportError;
use crate::domain::{
    PendingTaskBucket, PerformanceSample, ProjectOutcome, PENDING_TASKS, PERFORMANCE,
    PROJECT_OUTCOMES, WORKLOAD,
};
use crate::modules::dashboard::projection::{
    bar_height, segment_angle_degrees, workload_intensity, workload_text_is_light,
};

#[derive(Serialize)]
struct ExportablePendingTask {
    #[serde(flatten)]
    bucket: PendingTaskBucket,
    bar_height: u32,
}

#[derive(Serialize)]
struct ExportablePerformance {
    #[serde(flatten)]
    sample: PerformanceSample,
    /// Absent for the first sample
    #[serde(skip_serializing_if = "Option::is_none")]
    segment_angle: Option<f64>,
}

#[derive(Serialize)]
struct ExportableWorkloadCell {
    count: u32,
    intensity: u8,
    light_text: bool,
}

#[derive(Serialize)]
struct ExportableWorkloadRow {
    team: &'static str,
    days: Vec<ExportableWorkloadCell>,
}

#[derive(Serialize)]
struct ExportableDashboard {
    pending_tasks: Vec<ExportablePendingTask>,
    performance: Vec<ExportablePerformance>,
    workload: Vec<ExportableWorkloadRow>,
    projects: Vec<ProjectOutcome>,
}

fn snapshot() -> ExportableDashboard {
    let pending_tasks = PENDING_TASKS
        .iter()
        .map(|bucket| ExportablePendingTask {
            bucket: *bucket,
            bar_height: bar_height(bucket.count),
        })
        .collect();

    let performance = PERFORMANCE
        .iter()
        .enumerate()
        .map(|(idx, sample)| ExportablePerformance {
            sample: *sample,
            segment_angle: idx
                .checked_sub(1)
                .map(|prev| segment_angle_degrees(PERFORMANCE[prev].score, sample.score)),
        })
        .collect();

    let workload = WORKLOAD
        .iter()
        .map(|row| ExportableWorkloadRow {
            team: row.team,
            days: row
                .days
                .iter()
                .map(|&count| ExportableWorkloadCell {
                    count,
                    intensity: workload_intensity(count),
                    light_text: workload_text_is_light(count),
                })
                .collect(),
        })
        .collect();

    ExportableDashboard {
        pending_tasks,
        performance,
        workload,
        projects: PROJECT_OUTCOMES.to_vec(),
    }
}

/// Write the dashboard snapshot to a JSON file
pub fn write_dashboard(path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(&snapshot())?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(())
}
