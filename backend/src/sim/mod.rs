//! # Simulation Module
//!
//! Synthetic operational data for the service centers: a uniform random
//! source abstraction, the random-variate generators built on top of it, and
//! the series builders that turn variates into hourly/daily/weekly metric
//! records.
//!
//! Everything draws through [`rng::UniformSource`] so callers control the
//! random stream: seeded for reproducible tests, OS entropy in production.

pub mod rng;
pub mod series;
pub mod variates;

pub use rng::{SimRng, UniformSource};
