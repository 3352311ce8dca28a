//! Chart Surface Module
//! The rendering abstraction every output (window, bitmap, in-memory chart)
//! implements, plus the in-memory `Chart` model they all share.

use crate::data::Domain;
use std::sync::Arc;
use thiserror::Error;

/// Fraction of each axis covered by the legend box when scoring corners.
const LEGEND_EXTENT: f64 = 0.3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Curve '{label}' has {values} values for a domain of {domain} points")]
    LengthMismatch {
        label: String,
        values: usize,
        domain: usize,
    },
    #[error("Curve '{0}' does not share the chart's domain")]
    DomainMismatch(String),
}

/// Chart corner a legend can be anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

impl Corner {
    /// Order in which corners are tried by `LegendPlacement::Best`.
    pub const SEARCH_ORDER: [Corner; 4] = [
        Corner::UpperRight,
        Corner::UpperLeft,
        Corner::LowerLeft,
        Corner::LowerRight,
    ];

    /// Whether a point with normalised coordinates `(u, v)` lies under a
    /// legend anchored at this corner.
    fn covers(self, u: f64, v: f64) -> bool {
        let right = u >= 1.0 - LEGEND_EXTENT;
        let left = u <= LEGEND_EXTENT;
        let top = v >= 1.0 - LEGEND_EXTENT;
        let bottom = v <= LEGEND_EXTENT;
        match self {
            Corner::UpperRight => right && top,
            Corner::UpperLeft => left && top,
            Corner::LowerLeft => left && bottom,
            Corner::LowerRight => right && bottom,
        }
    }
}

/// Where the legend goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPlacement {
    /// Corner overlapping the fewest plotted points.
    #[default]
    Best,
    Corner(Corner),
}

/// One labelled series on a chart.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

/// Output target for a chart: a window, a bitmap, or plain memory.
///
/// Curves and legend are collected first; `display` consumes the surface,
/// so nothing can be added once the chart has been shown.
pub trait ChartSurface {
    type Output;
    type Error: From<ChartError>;

    fn add_curve(
        &mut self,
        domain: &Arc<Domain>,
        values: &[Option<f64>],
        label: &str,
    ) -> Result<(), ChartError>;

    fn show_legend(&mut self, placement: LegendPlacement);

    fn display(self) -> Result<Self::Output, Self::Error>;
}

/// Ordered curves on one set of axes plus an optional legend.
#[derive(Debug, Clone, Default)]
pub struct Chart {
    domain: Option<Arc<Domain>>,
    series: Vec<Series>,
    legend: Option<LegendPlacement>,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(&self) -> Option<&Arc<Domain>> {
        self.domain.as_ref()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn labels(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn legend(&self) -> Option<LegendPlacement> {
        self.legend
    }

    /// Defined (x, y) points of one series, in domain order.
    pub fn points<'a>(&'a self, series: &'a Series) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.domain
            .iter()
            .flat_map(|d| d.x_values())
            .zip(series.values.iter())
            .filter_map(|(x, y)| y.map(|y| (x, y)))
    }

    /// Runs of consecutive defined points of one series.
    ///
    /// A gap (`None`) ends the current run, so a renderer drawing each run as
    /// its own polyline never bridges an undefined value.
    pub fn segments(&self, series: &Series) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        let xs = self.domain.iter().flat_map(|d| d.x_values());

        for (x, y) in xs.zip(series.values.iter()) {
            match y {
                Some(y) => current.push((x, *y)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    /// Bounds of all defined points as `(x_min, x_max, y_min, y_max)`.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for series in &self.series {
            for (x, y) in self.points(series) {
                bounds = Some(match bounds {
                    None => (x, x, y, y),
                    Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
                });
            }
        }
        bounds
    }

    /// Resolve the requested legend placement to a concrete corner.
    pub fn legend_corner(&self) -> Option<Corner> {
        self.legend.map(|placement| match placement {
            LegendPlacement::Corner(corner) => corner,
            LegendPlacement::Best => self.best_corner(),
        })
    }

    /// Corner whose legend box covers the fewest points, first in
    /// `Corner::SEARCH_ORDER` on ties.
    pub fn best_corner(&self) -> Corner {
        let Some((x0, x1, y0, y1)) = self.bounds() else {
            return Corner::UpperRight;
        };
        let normalise = |value: f64, lo: f64, hi: f64| {
            if hi > lo {
                (value - lo) / (hi - lo)
            } else {
                0.5
            }
        };

        let mut counts = [0usize; 4];
        for series in &self.series {
            for (x, y) in self.points(series) {
                let (u, v) = (normalise(x, x0, x1), normalise(y, y0, y1));
                for (count, corner) in counts.iter_mut().zip(Corner::SEARCH_ORDER) {
                    if corner.covers(u, v) {
                        *count += 1;
                    }
                }
            }
        }

        // min_by_key returns the first minimum, which keeps the search order
        Corner::SEARCH_ORDER
            .into_iter()
            .zip(counts)
            .min_by_key(|&(_, count)| count)
            .map(|(corner, _)| corner)
            .unwrap_or(Corner::UpperRight)
    }
}

impl ChartSurface for Chart {
    type Output = Chart;
    type Error = ChartError;

    fn add_curve(
        &mut self,
        domain: &Arc<Domain>,
        values: &[Option<f64>],
        label: &str,
    ) -> Result<(), ChartError> {
        if values.len() != domain.len() {
            return Err(ChartError::LengthMismatch {
                label: label.to_string(),
                values: values.len(),
                domain: domain.len(),
            });
        }

        match &self.domain {
            Some(existing) if !Arc::ptr_eq(existing, domain) && **existing != **domain => {
                return Err(ChartError::DomainMismatch(label.to_string()));
            }
            Some(_) => {}
            None => self.domain = Some(Arc::clone(domain)),
        }

        // Non-finite values become gaps so renderers only see real numbers
        let values = values
            .iter()
            .map(|v| v.filter(|v| v.is_finite()))
            .collect();

        self.series.push(Series {
            label: label.to_string(),
            values,
        });
        Ok(())
    }

    fn show_legend(&mut self, placement: LegendPlacement) {
        self.legend = Some(placement);
    }

    fn display(self) -> Result<Chart, ChartError> {
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Curve, Domain};

    fn growth_chart() -> Chart {
        let domain = Arc::new(Domain::default());
        let mut chart = Chart::new();
        for curve in Curve::sample_all(Arc::clone(&domain)) {
            chart.add_curve(&domain, &curve.values, curve.label()).unwrap();
        }
        chart.show_legend(LegendPlacement::Best);
        chart
    }

    #[test]
    fn best_legend_avoids_the_steep_curve() {
        let chart = growth_chart();
        assert_eq!(chart.best_corner(), Corner::UpperLeft);
        assert_eq!(chart.legend_corner(), Some(Corner::UpperLeft));
    }

    #[test]
    fn explicit_corner_is_kept() {
        let mut chart = growth_chart();
        chart.show_legend(LegendPlacement::Corner(Corner::LowerRight));
        assert_eq!(chart.legend_corner(), Some(Corner::LowerRight));
    }

    #[test]
    fn empty_chart_defaults_to_upper_right() {
        let chart = Chart::new();
        assert_eq!(chart.bounds(), None);
        assert_eq!(chart.best_corner(), Corner::UpperRight);
        assert_eq!(chart.legend_corner(), None);
    }

    #[test]
    fn rejects_values_not_matching_domain_length() {
        let domain = Arc::new(Domain::new(3));
        let mut chart = Chart::new();
        let err = chart.add_curve(&domain, &[Some(1.0)], "short").unwrap_err();
        assert_eq!(
            err,
            ChartError::LengthMismatch {
                label: "short".to_string(),
                values: 1,
                domain: 3
            }
        );
    }

    #[test]
    fn rejects_a_second_domain() {
        let mut chart = Chart::new();
        let a = Arc::new(Domain::new(2));
        let b = Arc::new(Domain::new(3));
        chart.add_curve(&a, &[Some(0.0), Some(1.0)], "a").unwrap();
        let err = chart
            .add_curve(&b, &[Some(0.0), Some(1.0), Some(2.0)], "b")
            .unwrap_err();
        assert_eq!(err, ChartError::DomainMismatch("b".to_string()));

        // An equal domain in a different allocation is still the same domain
        let a2 = Arc::new(Domain::new(2));
        assert!(chart.add_curve(&a2, &[Some(2.0), Some(3.0)], "a2").is_ok());
    }

    #[test]
    fn non_finite_values_become_gaps() {
        let domain = Arc::new(Domain::new(4));
        let mut chart = Chart::new();
        chart
            .add_curve(
                &domain,
                &[Some(f64::NEG_INFINITY), Some(1.0), Some(f64::NAN), Some(3.0)],
                "raw",
            )
            .unwrap();

        let series = &chart.series()[0];
        assert_eq!(series.values, vec![None, Some(1.0), None, Some(3.0)]);
        assert_eq!(
            chart.segments(series),
            vec![vec![(1.0, 1.0)], vec![(3.0, 3.0)]]
        );
    }

    #[test]
    fn leading_gap_is_not_a_segment() {
        let chart = growth_chart();
        let log2 = &chart.series()[1];
        let segments = chart.segments(log2);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 99);
        assert_eq!(segments[0][0], (1.0, 0.0));
    }
}
