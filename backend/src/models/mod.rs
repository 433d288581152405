pub mod catalog;
pub mod metrics;

pub use catalog::*;
pub use metrics::*;
