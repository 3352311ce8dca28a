//! Growth Curve Module
//! Samples the growth functions over a shared domain.

use crate::data::Domain;
use log::debug;
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("{function} is undefined at n = {n}")]
    NumericDomain { function: GrowthFunction, n: u32 },
}

/// The growth-rate functions compared on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowthFunction {
    Linear,
    Log2,
    NLog2,
    NLog10,
}

impl GrowthFunction {
    /// Chart order.
    pub const ALL: [GrowthFunction; 4] = [
        GrowthFunction::Linear,
        GrowthFunction::Log2,
        GrowthFunction::NLog2,
        GrowthFunction::NLog10,
    ];

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            GrowthFunction::Linear => "linear",
            GrowthFunction::Log2 => "log2 n",
            GrowthFunction::NLog2 => "n log2 n",
            GrowthFunction::NLog10 => "n log10 n",
        }
    }

    /// Evaluate the function at `n`.
    ///
    /// Logarithms are undefined at zero, so every function except `Linear`
    /// returns `CurveError::NumericDomain` for `n == 0`.
    pub fn evaluate(self, n: u32) -> Result<f64, CurveError> {
        let x = f64::from(n);
        if n == 0 && self != GrowthFunction::Linear {
            return Err(CurveError::NumericDomain { function: self, n });
        }

        Ok(match self {
            GrowthFunction::Linear => x,
            GrowthFunction::Log2 => x.log2(),
            GrowthFunction::NLog2 => x * x.log2(),
            GrowthFunction::NLog10 => x * x.log10(),
        })
    }
}

impl fmt::Display for GrowthFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named series sampled over a shared domain.
///
/// `values[i]` is `None` where the function is undefined at `domain[i]`;
/// such points are left as gaps instead of being handed to a renderer.
#[derive(Debug, Clone)]
pub struct Curve {
    pub function: GrowthFunction,
    pub domain: Arc<Domain>,
    pub values: Vec<Option<f64>>,
}

impl Curve {
    /// Apply `function` pointwise to `domain`.
    pub fn sample(function: GrowthFunction, domain: Arc<Domain>) -> Self {
        let values = domain
            .values()
            .iter()
            .map(|&n| match function.evaluate(n) {
                Ok(v) if v.is_finite() => Some(v),
                Ok(v) => {
                    debug!("{} produced non-finite {} at n = {}, leaving a gap", function, v, n);
                    None
                }
                Err(e) => {
                    debug!("{}, leaving a gap", e);
                    None
                }
            })
            .collect();

        Self {
            function,
            domain,
            values,
        }
    }

    /// Sample every growth function over the same domain, in chart order.
    pub fn sample_all(domain: Arc<Domain>) -> Vec<Curve> {
        GrowthFunction::ALL
            .par_iter()
            .map(|&function| Self::sample(function, Arc::clone(&domain)))
            .collect()
    }

    pub fn label(&self) -> &'static str {
        self.function.label()
    }

    /// Defined (x, y) points, skipping gaps.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.domain
            .x_values()
            .zip(self.values.iter())
            .filter_map(|(x, y)| y.map(|y| (x, y)))
    }
}
