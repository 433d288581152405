//! # API Module
//!
//! Data transfer objects for the engine's public operations. The HTTP layer
//! of the portal serializes these to JSON without reshaping, so field casing
//! here is part of the external contract:
//!
//! - Dashboard DTOs serialize camelCase (the chart components read them
//!   as-is)
//! - Statistical report DTOs serialize snake_case, with one camelCase
//!   holdover (`isNormal`) the report UI already depends on

pub mod types;

pub use types::*;
