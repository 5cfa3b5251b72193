//! Per-group views derived from the unified datasets. Inputs are never modified.

use serde::Serialize;

use crate::config::PipelineConfig;
use crate::data_models::{EnvironmentReading, GrowthMeasurement};
use crate::reconcile::Dataset;

/// One line of the EC condition table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionRow {
    pub group: String,
    pub target_ec: f64,
    pub specimen_count: usize,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentSummary {
    pub group: String,
    pub target_ec: f64,
    pub samples: usize,
    pub mean_temperature: Option<f64>,
    pub mean_humidity: Option<f64>,
    pub mean_ph: Option<f64>,
    pub mean_ec: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthSummary {
    pub group: String,
    pub target_ec: f64,
    pub specimens: usize,
    pub mean_leaf_count: Option<f64>,
    pub mean_shoot_length: Option<f64>,
    pub mean_root_length: Option<f64>,
    pub mean_fresh_weight: Option<f64>,
}

/// Every configured group, in configuration order, with its growth specimen count.
pub fn condition_table(config: &PipelineConfig, growth: &Dataset<GrowthMeasurement>) -> Vec<ConditionRow> {
    config
        .groups
        .iter()
        .map(|group| ConditionRow {
            group: group.name.clone(),
            target_ec: group.target_ec,
            specimen_count: growth.rows_for_group(&group.name).count(),
            color: group.color.clone(),
        })
        .collect()
}

pub fn environment_summary(
    config: &PipelineConfig,
    environment: &Dataset<EnvironmentReading>,
) -> Vec<EnvironmentSummary> {
    config
        .groups
        .iter()
        .map(|group| {
            let rows: Vec<&EnvironmentReading> = environment.rows_for_group(&group.name).collect();
            EnvironmentSummary {
                group: group.name.clone(),
                target_ec: group.target_ec,
                samples: rows.len(),
                mean_temperature: mean(rows.iter().map(|r| r.temperature)),
                mean_humidity: mean(rows.iter().map(|r| r.humidity)),
                mean_ph: mean(rows.iter().map(|r| r.ph)),
                mean_ec: mean(rows.iter().map(|r| r.ec)),
            }
        })
        .collect()
}

pub fn growth_summary(config: &PipelineConfig, growth: &Dataset<GrowthMeasurement>) -> Vec<GrowthSummary> {
    config
        .groups
        .iter()
        .map(|group| {
            let rows: Vec<&GrowthMeasurement> = growth.rows_for_group(&group.name).collect();
            GrowthSummary {
                group: group.name.clone(),
                target_ec: group.target_ec,
                specimens: rows.len(),
                mean_leaf_count: mean(rows.iter().map(|r| r.leaf_count)),
                mean_shoot_length: mean(rows.iter().map(|r| r.shoot_length)),
                mean_root_length: mean(rows.iter().map(|r| r.root_length)),
                mean_fresh_weight: mean(rows.iter().map(|r| r.fresh_weight)),
            }
        })
        .collect()
}

/// Mean of the present values; `None` if there are none.
fn mean<I>(values: I) -> Option<f64>
where
    I: Iterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
