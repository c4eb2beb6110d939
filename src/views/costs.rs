//! Costs View
//!
//! Summary statistics over the trip cost history and an SVG bar chart.

use serde::Serialize;

use super::{ViewError, ViewResult};
use crate::store::TripCost;

/// Bar color of the cost chart
pub const BAR_COLOR: &str = "#239614";

const CHART_WIDTH: f64 = 720.0;
const CHART_HEIGHT: f64 = 260.0;
const CHART_PADDING: f64 = 24.0;
const BAR_GAP: f64 = 0.2;

/// Statistics over all trips
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSummary {
    pub min: f64,
    pub max: f64,
    pub total: f64,
    pub previous: f64,
    pub last: f64,
    /// Percent change of the last trip against the previous one.
    /// `None` when the previous trip cost nothing.
    pub delta_percent: Option<f64>,
    pub trips: usize,
}

impl CostSummary {
    /// Compute the summary; needs at least two trips
    pub fn compute(trips: &[TripCost]) -> ViewResult<Self> {
        let [.., previous, last] = trips else {
            return Err(ViewError::InsufficientHistory { found: trips.len() });
        };

        let costs = trips.iter().map(|t| t.cost);
        let min = costs.clone().fold(f64::INFINITY, f64::min);
        let max = costs.clone().fold(f64::NEG_INFINITY, f64::max);
        let total = costs.sum();

        let delta_percent = if previous.cost == 0.0 {
            None
        } else {
            Some((last.cost - previous.cost) / previous.cost * 100.0)
        };

        Ok(Self {
            min,
            max,
            total,
            previous: previous.cost,
            last: last.cost,
            delta_percent,
            trips: trips.len(),
        })
    }
}

/// One summary tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
    /// Delta sign for styling: "up", "down" or "flat"
    pub trend: Option<String>,
}

impl MetricCard {
    fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value: format_euro(value),
            delta: None,
            trend: None,
        }
    }
}

/// One bar of the chart, in SVG user units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub value: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Bar chart of the cost per trip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub width: f64,
    pub height: f64,
    pub baseline: f64,
    pub color: String,
    pub bars: Vec<ChartBar>,
}

impl BarChart {
    pub fn build(trips: &[TripCost]) -> Self {
        let baseline = CHART_HEIGHT - CHART_PADDING;
        let plot_height = baseline - CHART_PADDING;
        let max = trips.iter().map(|t| t.cost).fold(0.0, f64::max);
        let slot = if trips.is_empty() {
            0.0
        } else {
            CHART_WIDTH / trips.len() as f64
        };

        let bars = trips
            .iter()
            .enumerate()
            .map(|(i, trip)| {
                let height = if max > 0.0 {
                    trip.cost.max(0.0) / max * plot_height
                } else {
                    0.0
                };
                ChartBar {
                    label: trip.trip_name.clone(),
                    value: format_euro(trip.cost),
                    x: i as f64 * slot + slot * BAR_GAP / 2.0,
                    y: baseline - height,
                    width: slot * (1.0 - BAR_GAP),
                    height,
                }
            })
            .collect();

        Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            baseline,
            color: BAR_COLOR.to_string(),
            bars,
        }
    }
}

/// Render model of the costs section
#[derive(Debug, Clone, Serialize)]
pub struct CostsView {
    pub summary: CostSummary,
    pub metrics: Vec<MetricCard>,
    pub chart: BarChart,
}

impl CostsView {
    pub fn build(trips: &[TripCost]) -> ViewResult<Self> {
        let summary = CostSummary::compute(trips)?;

        let mut last = MetricCard::new("Kosten der letzten Reise", summary.last);
        last.delta = Some(format_delta(summary.delta_percent));
        last.trend = Some(
            match summary.delta_percent {
                Some(d) if d > 0.0 => "up",
                Some(d) if d < 0.0 => "down",
                _ => "flat",
            }
            .to_string(),
        );

        let metrics = vec![
            MetricCard::new("Günstigste Reise", summary.min),
            MetricCard::new("Teuerste Reise", summary.max),
            last,
            MetricCard::new("Gesamtkosten", summary.total),
        ];

        Ok(Self {
            summary,
            metrics,
            chart: BarChart::build(trips),
        })
    }
}

/// `1200 €` for whole amounts, `1200.50 €` otherwise
pub fn format_euro(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0} €", value)
    } else {
        format!("{:.2} €", value)
    }
}

/// Signed percentage with one decimal, `n/a` when undefined
pub fn format_delta(delta: Option<f64>) -> String {
    match delta {
        Some(d) => format!("{:+.1} %", d),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trips(rows: &[(&str, f64)]) -> Vec<TripCost> {
        rows.iter().map(|(n, c)| TripCost::new(*n, *c)).collect()
    }

    #[test]
    fn test_two_trip_summary() {
        let summary = CostSummary::compute(&trips(&[("A", 100.0), ("B", 120.0)])).unwrap();
        assert_eq!(summary.total, 220.0);
        assert_eq!(summary.min, 100.0);
        assert_eq!(summary.max, 120.0);
        assert_eq!(summary.last, 120.0);
        assert!((summary.delta_percent.unwrap() - 20.0).abs() < 1e-9);
        assert_eq!(format_delta(summary.delta_percent), "+20.0 %");
    }

    #[test]
    fn test_delta_uses_last_two_in_file_order() {
        let summary =
            CostSummary::compute(&trips(&[("A", 500.0), ("B", 200.0), ("C", 150.0)])).unwrap();
        assert_eq!(summary.previous, 200.0);
        assert_eq!(summary.last, 150.0);
        assert_eq!(format_delta(summary.delta_percent), "-25.0 %");
        assert_eq!(summary.max, 500.0);
        assert_eq!(summary.trips, 3);
    }

    #[test]
    fn test_insufficient_history() {
        assert_eq!(
            CostSummary::compute(&trips(&[("A", 100.0)])),
            Err(ViewError::InsufficientHistory { found: 1 })
        );
        assert_eq!(
            CostSummary::compute(&[]),
            Err(ViewError::InsufficientHistory { found: 0 })
        );
    }

    #[test]
    fn test_zero_previous_cost() {
        let summary = CostSummary::compute(&trips(&[("A", 0.0), ("B", 50.0)])).unwrap();
        assert_eq!(summary.delta_percent, None);
        assert_eq!(format_delta(summary.delta_percent), "n/a");
    }

    #[test]
    fn test_metric_cards() {
        let view = CostsView::build(&trips(&[("A", 100.0), ("B", 120.0)])).unwrap();
        let labels: Vec<&str> = view.metrics.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Günstigste Reise", "Teuerste Reise", "Kosten der letzten Reise", "Gesamtkosten"]
        );
        assert_eq!(view.metrics[3].value, "220 €");
        assert_eq!(view.metrics[2].delta.as_deref(), Some("+20.0 %"));
        assert_eq!(view.metrics[2].trend.as_deref(), Some("up"));
    }

    #[test]
    fn test_chart_scales_to_max() {
        let chart = BarChart::build(&trips(&[("A", 50.0), ("B", 100.0)]));
        assert_eq!(chart.bars.len(), 2);
        assert_eq!(chart.color, "#239614");
        assert!((chart.bars[0].height * 2.0 - chart.bars[1].height).abs() < 1e-9);
        assert_eq!(chart.bars[1].y, CHART_PADDING);
        assert!(chart.bars[0].x < chart.bars[1].x);
    }

    #[test]
    fn test_format_euro() {
        assert_eq!(format_euro(850.0), "850 €");
        assert_eq!(format_euro(1200.5), "1200.50 €");
    }
}
