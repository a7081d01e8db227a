//! Time series projection
//!
//! Expands a TCO breakdown into a cumulative cost series. Period 0 carries
//! the one-time investment; recurring cost is spread evenly over the
//! remaining periods.

use nac_core::{
    safe_div, CashFlowPoint, CashFlowSeries, DeploymentModel, Granularity, LifecycleEvent,
    LifecycleEventKind, OrganizationConfig, TcoResult, YearlyCost,
};

/// Share of the original hardware cost spent on the refresh cycle
pub const HARDWARE_REFRESH_FRACTION: f64 = 0.5;

/// Horizon (years) from which a refresh happens at all
const REFRESH_MIN_YEARS: u32 = 3;

/// Period index of the start of year 3
pub fn refresh_period(granularity: Granularity) -> u32 {
    granularity.periods_per_year() * 2
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSeriesProjector {
    granularity: Granularity,
}

impl TimeSeriesProjector {
    pub fn new(granularity: Granularity) -> Self {
        Self { granularity }
    }

    pub fn quarterly() -> Self {
        Self::new(Granularity::Quarterly)
    }

    pub fn monthly() -> Self {
        Self::new(Granularity::Monthly)
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn project(
        &self,
        tco: &TcoResult,
        config: &OrganizationConfig,
        model: DeploymentModel,
    ) -> CashFlowSeries {
        let per_year = self.granularity.periods_per_year();
        let periods = config.horizon_years().saturating_mul(per_year);
        let per_period = safe_div(tco.recurring_total(), periods as f64);

        let mut events = Vec::new();
        if model == DeploymentModel::OnPremises
            && config.horizon_years() >= REFRESH_MIN_YEARS
            && tco.hardware > 0.0
        {
            events.push(LifecycleEvent {
                period: refresh_period(self.granularity),
                kind: LifecycleEventKind::HardwareRefresh,
                amount: tco.hardware * HARDWARE_REFRESH_FRACTION,
            });
        }

        let mut cumulative = tco.initial_investment();
        let mut points = Vec::with_capacity(periods as usize + 1);
        points.push(CashFlowPoint {
            period: 0,
            cumulative_value: cumulative,
        });

        for period in 1..=periods {
            cumulative += per_period;
            cumulative += events
                .iter()
                .filter(|e| e.period == period)
                .map(|e| e.amount)
                .sum::<f64>();
            points.push(CashFlowPoint {
                period,
                cumulative_value: cumulative,
            });
        }

        tracing::trace!(
            periods = points.len(),
            refresh = !events.is_empty(),
            final_value = cumulative,
            "cash flow projected"
        );

        CashFlowSeries {
            granularity: self.granularity,
            points,
            events,
        }
    }

    /// Collapse a series into per-year cost; year 0 is the initial investment
    pub fn yearly(series: &CashFlowSeries) -> Vec<YearlyCost> {
        let per_year = series.granularity.periods_per_year() as usize;
        let values = series.values();
        let Some(&initial) = values.first() else {
            return Vec::new();
        };

        let mut yearly = vec![YearlyCost {
            year: 0,
            cost: initial,
        }];
        let mut start = 0;
        let mut year = 1;
        while start + per_year < values.len() {
            let end = start + per_year;
            yearly.push(YearlyCost {
                year,
                cost: values[end] - values[start],
            });
            start = end;
            year += 1;
        }
        yearly
    }
}
