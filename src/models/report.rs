use super::{MoistureReadings, ZoneId};
use crate::error::{IrrigationError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    PercentOfFc,
    PercentOfAwc,
    GppRequired,
    AvgDrawDownPerDay,
    EstDaysToNextIrrigation,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::PercentOfFc,
        Metric::PercentOfAwc,
        Metric::GppRequired,
        Metric::AvgDrawDownPerDay,
        Metric::EstDaysToNextIrrigation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::PercentOfFc => "percent_of_FC",
            Metric::PercentOfAwc => "percent_of_AWC",
            Metric::GppRequired => "GPP_required_to_reach_FC_high",
            Metric::AvgDrawDownPerDay => "avg_draw_down_per_day",
            Metric::EstDaysToNextIrrigation => "est_days_to_next_irrigation",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The five metrics for one block, all computed successfully.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    #[serde(rename = "percent_of_FC")]
    pub percent_of_fc: f64,
    #[serde(rename = "percent_of_AWC")]
    pub percent_of_awc: f64,
    #[serde(rename = "GPP_required_to_reach_FC_high")]
    pub gpp_required: f64,
    pub avg_draw_down_per_day: f64,
    pub est_days_to_next_irrigation: f64,
}

/// Per-metric outcomes. A failed metric never hides the others.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationReport {
    pub percent_of_fc: Result<f64>,
    pub percent_of_awc: Result<f64>,
    pub gpp_required: Result<f64>,
    pub avg_draw_down_per_day: Result<f64>,
    pub est_days_to_next_irrigation: Result<f64>,
}

impl CalculationReport {
    pub fn get(&self, metric: Metric) -> &Result<f64> {
        match metric {
            Metric::PercentOfFc => &self.percent_of_fc,
            Metric::PercentOfAwc => &self.percent_of_awc,
            Metric::GppRequired => &self.gpp_required,
            Metric::AvgDrawDownPerDay => &self.avg_draw_down_per_day,
            Metric::EstDaysToNextIrrigation => &self.est_days_to_next_irrigation,
        }
    }

    pub fn failures(&self) -> Vec<(Metric, &IrrigationError)> {
        Metric::ALL
            .iter()
            .filter_map(|m| self.get(*m).as_ref().err().map(|e| (*m, e)))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failures().is_empty()
    }

    /// Collapses to the plain record, yielding the first failure in output order.
    pub fn into_result(self) -> Result<CalculationResult> {
        Ok(CalculationResult {
            percent_of_fc: self.percent_of_fc?,
            percent_of_awc: self.percent_of_awc?,
            gpp_required: self.gpp_required?,
            avg_draw_down_per_day: self.avg_draw_down_per_day?,
            est_days_to_next_irrigation: self.est_days_to_next_irrigation?,
        })
    }

    pub fn to_output<'a>(
        &self,
        sm_units: &'a MoistureReadings,
        user_root_zones: &'a [ZoneId],
    ) -> ReportOutput<'a> {
        ReportOutput {
            sm_units,
            user_root_zones,
            percent_of_fc: (&self.percent_of_fc).into(),
            percent_of_awc: (&self.percent_of_awc).into(),
            gpp_required: (&self.gpp_required).into(),
            avg_draw_down_per_day: (&self.avg_draw_down_per_day).into(),
            est_days_to_next_irrigation: (&self.est_days_to_next_irrigation).into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricValue {
    Value(f64),
    Error(String),
}

impl From<&Result<f64>> for MetricValue {
    fn from(outcome: &Result<f64>) -> Self {
        match outcome {
            Ok(v) => MetricValue::Value(*v),
            Err(e) => MetricValue::Error(e.to_string()),
        }
    }
}

/// Report as published to the host, echoing the inputs it was computed from.
#[derive(Debug, Serialize)]
pub struct ReportOutput<'a> {
    pub sm_units: &'a MoistureReadings,
    pub user_root_zones: &'a [ZoneId],
    #[serde(rename = "percent_of_FC")]
    pub percent_of_fc: MetricValue,
    #[serde(rename = "percent_of_AWC")]
    pub percent_of_awc: MetricValue,
    #[serde(rename = "GPP_required_to_reach_FC_high")]
    pub gpp_required: MetricValue,
    pub avg_draw_down_per_day: MetricValue,
    pub est_days_to_next_irrigation: MetricValue,
}

/// Plain result with the same input echo, for strict mode.
#[derive(Debug, Serialize)]
pub struct ResultOutput<'a> {
    pub sm_units: &'a MoistureReadings,
    pub user_root_zones: &'a [ZoneId],
    #[serde(flatten)]
    pub result: CalculationResult,
}
