//! Data module - Domain generation and curve sampling

mod curves;
mod domain;

pub use curves::Curve;
pub use domain::{Domain, DOMAIN_SIZE};
