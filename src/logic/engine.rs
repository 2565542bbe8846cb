use super::{drawdown, irrigation, ratios};
use crate::error::Result;
use crate::models::{
    CalculationReport, EvaporationTable, Metric, MoistureReadings, Thresholds, ZoneConfigs, ZoneId,
};
use chrono::NaiveDate;

/// One complete snapshot for one vineyard block.
#[derive(Debug, Clone, Copy)]
pub struct CalculationInputs<'a> {
    pub root_zones: &'a [ZoneId],
    pub all_zones: &'a [ZoneId],
    pub readings: &'a MoistureReadings,
    pub configs: &'a ZoneConfigs,
    pub thresholds: Thresholds,
    pub evaporation: &'a EvaporationTable,
    pub last_irrigation_date: NaiveDate,
    pub current_date: NaiveDate,
}

impl CalculationInputs<'_> {
    pub fn percent_of_fc(&self) -> Result<f64> {
        ratios::average_percent_fc(self.root_zones, self.readings, self.configs)
    }

    pub fn percent_of_awc(&self) -> Result<f64> {
        ratios::average_percent_awc(self.root_zones, self.readings, self.configs)
    }

    pub fn gpp_required(&self) -> Result<f64> {
        irrigation::gpp_required(
            self.root_zones,
            self.all_zones,
            self.readings,
            self.configs,
            self.thresholds.fc_high,
            self.thresholds.multiplier,
            self.thresholds.last_irrigation_gpp,
        )
    }

    pub fn avg_draw_down_per_day(&self) -> Result<f64> {
        drawdown::average_drawdown_per_day(
            self.readings,
            self.evaporation,
            self.last_irrigation_date,
            self.current_date,
        )
    }

    pub fn est_days_to_next_irrigation(&self) -> Result<f64> {
        drawdown::est_days_until_irrigation(
            self.root_zones,
            self.readings,
            self.configs,
            self.evaporation,
            self.thresholds.fc_low,
            self.last_irrigation_date,
            self.current_date,
        )
    }

    /// Headroom between field capacity and saturation above the root zone.
    pub fn excess_above_root_zone(&self) -> Result<f64> {
        irrigation::excess_above_root_zone(
            self.root_zones,
            self.all_zones,
            self.readings,
            self.configs,
        )
    }

    pub fn metric(&self, metric: Metric) -> Result<f64> {
        match metric {
            Metric::PercentOfFc => self.percent_of_fc(),
            Metric::PercentOfAwc => self.percent_of_awc(),
            Metric::GppRequired => self.gpp_required(),
            Metric::AvgDrawDownPerDay => self.avg_draw_down_per_day(),
            Metric::EstDaysToNextIrrigation => self.est_days_to_next_irrigation(),
        }
    }
}

/// Computes all five metrics; each is evaluated on its own so one bad input
/// only fails the metrics that depend on it.
pub fn compute(inputs: &CalculationInputs<'_>) -> CalculationReport {
    let report = CalculationReport {
        percent_of_fc: inputs.percent_of_fc(),
        percent_of_awc: inputs.percent_of_awc(),
        gpp_required: inputs.gpp_required(),
        avg_draw_down_per_day: inputs.avg_draw_down_per_day(),
        est_days_to_next_irrigation: inputs.est_days_to_next_irrigation(),
    };

    for (metric, err) in report.failures() {
        tracing::warn!("Failed to compute {}: {}", metric, err);
    }
    if let Ok(excess) = inputs.excess_above_root_zone() {
        tracing::debug!(excess, "Excess moisture capacity above root zone");
    }
    tracing::debug!(
        root_zones = inputs.root_zones.len(),
        zones_reported = inputs.readings.len(),
        "Computed irrigation metrics"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IrrigationError;
    use crate::logic::fixtures::*;
    use crate::models::MoistureReading;

    struct Block {
        root: Vec<ZoneId>,
        all: Vec<ZoneId>,
        readings: MoistureReadings,
        configs: ZoneConfigs,
        evaporation: EvaporationTable,
        thresholds: Thresholds,
        last: NaiveDate,
        current: NaiveDate,
    }

    impl Block {
        fn reference() -> Self {
            Self {
                root: root_zones(),
                all: all_zones(),
                readings: reference_readings(),
                configs: reference_configs(),
                evaporation: EvaporationTable::default(),
                thresholds: Thresholds {
                    fc_high: 0.95,
                    fc_low: 0.85,
                    multiplier: 1.3,
                    last_irrigation_gpp: 8.0,
                },
                last: last_irrigation_date(),
                current: current_date(),
            }
        }

        fn inputs(&self) -> CalculationInputs<'_> {
            CalculationInputs {
                root_zones: &self.root,
                all_zones: &self.all,
                readings: &self.readings,
                configs: &self.configs,
                thresholds: self.thresholds,
                evaporation: &self.evaporation,
                last_irrigation_date: self.last,
                current_date: self.current,
            }
        }
    }

    #[test]
    fn reference_scenario() {
        let block = Block::reference();
        let result = compute(&block.inputs()).into_result().unwrap();

        assert_eq!(round2(result.percent_of_fc), 0.91);
        assert_eq!(round2(result.percent_of_awc), 0.74);
        assert_eq!(round2(result.gpp_required), 3.18);
        assert_eq!(round2(result.avg_draw_down_per_day), -1.88);
        assert_eq!(round2(result.est_days_to_next_irrigation), 6.57);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let block = Block::reference();
        let first = compute(&block.inputs()).into_result().unwrap();
        let second = compute(&block.inputs()).into_result().unwrap();

        assert_eq!(first.percent_of_fc.to_bits(), second.percent_of_fc.to_bits());
        assert_eq!(first.gpp_required.to_bits(), second.gpp_required.to_bits());
        assert_eq!(
            first.est_days_to_next_irrigation.to_bits(),
            second.est_days_to_next_irrigation.to_bits()
        );
    }

    #[test]
    fn excess_above_reference_root_zone() {
        let block = Block::reference();
        // (64 + 66) field capacity minus (69 + 71) saturation for zones 4 and 8
        let excess = block.inputs().excess_above_root_zone().unwrap();
        assert!((excess - (-10.0)).abs() < 1e-9);
    }

    #[test]
    fn individual_metrics_match_report() {
        let block = Block::reference();
        let inputs = block.inputs();
        let report = compute(&inputs);
        for metric in Metric::ALL {
            assert_eq!(&inputs.metric(metric), report.get(metric));
        }
    }

    #[test]
    fn same_day_fails_only_date_metrics() {
        let mut block = Block::reference();
        block.current = block.last;
        let report = compute(&block.inputs());

        assert!(report.percent_of_fc.is_ok());
        assert!(report.percent_of_awc.is_ok());
        assert!(report.gpp_required.is_ok());
        assert!(matches!(
            report.avg_draw_down_per_day,
            Err(IrrigationError::DivisionByZero(_))
        ));
        assert!(matches!(
            report.est_days_to_next_irrigation,
            Err(IrrigationError::DivisionByZero(_))
        ));
    }

    #[test]
    fn missing_shallow_reading_fails_only_gpp() {
        let mut block = Block::reference();
        block.readings.remove(&ZoneId::new(8));
        let report = compute(&block.inputs());

        assert_eq!(
            report.gpp_required,
            Err(IrrigationError::MissingZoneData {
                zone: ZoneId::new(8),
                dataset: "moisture readings",
            })
        );
        assert!(report.percent_of_fc.is_ok());
        assert!(report.avg_draw_down_per_day.is_ok());
        assert!(report.est_days_to_next_irrigation.is_ok());
    }

    #[test]
    fn empty_selection_fails_root_zone_metrics() {
        let mut block = Block::reference();
        block.root.clear();
        let report = compute(&block.inputs());

        assert_eq!(report.percent_of_fc, Err(IrrigationError::EmptySelection));
        assert_eq!(report.percent_of_awc, Err(IrrigationError::EmptySelection));
        assert_eq!(report.gpp_required, Err(IrrigationError::EmptySelection));
        assert_eq!(
            report.est_days_to_next_irrigation,
            Err(IrrigationError::EmptySelection)
        );
        // Drawdown covers every reported zone, independent of the selection
        assert!(report.avg_draw_down_per_day.is_ok());
    }

    #[test]
    fn multiplier_ignored_without_deficit() {
        let mut block = Block::reference();
        for zone in root_zones() {
            block
                .readings
                .insert(zone, MoistureReading::new(75.0, 60.0, 70.0));
        }

        for multiplier in [1.0, 1.3, 3.0] {
            block.thresholds.multiplier = multiplier;
            assert_eq!(compute(&block.inputs()).gpp_required, Ok(0.0));
        }
    }

    #[test]
    fn no_value_is_ever_non_finite() {
        let mut block = Block::reference();
        block.thresholds.last_irrigation_gpp = 0.0;
        block.current = block.last;
        let report = compute(&block.inputs());

        for metric in Metric::ALL {
            if let Ok(v) = report.get(metric) {
                assert!(v.is_finite(), "{} produced {}", metric, v);
            }
        }
        assert!(matches!(
            report.gpp_required,
            Err(IrrigationError::DivisionByZero(_))
        ));
    }
}
