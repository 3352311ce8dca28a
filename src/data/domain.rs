//! Domain Module
//! The ordered integer x-values shared by every curve on a chart.

/// Number of points plotted for each curve.
pub const DOMAIN_SIZE: usize = 100;

/// Ordered sequence of integers `0..size`.
///
/// Generated once and shared read-only (behind an `Arc`) by all curves so
/// that every curve is sampled at exactly the same x-positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    values: Vec<u32>,
}

impl Default for Domain {
    fn default() -> Self {
        Self::new(DOMAIN_SIZE)
    }
}

impl Domain {
    pub fn new(size: usize) -> Self {
        Self {
            values: (0..size as u32).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// X-values as floats, ready for a plotting backend.
    pub fn x_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().map(|&n| f64::from(n))
    }
}
