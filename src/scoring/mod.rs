pub mod aggregate;
pub mod bands;
pub mod classify;
pub mod coder;
pub mod config;
pub mod engine;
pub mod normalize;
pub mod rank;
pub mod validation;

pub use aggregate::{aggregate, aggregate_range};
pub use bands::{Band, RangeOp};
pub use classify::{check_coverage, check_coverage_steps, classify, ClassificationRule};
pub use coder::{code, style_code, PolarAxis, ZeroPolicy};
pub use config::*;
pub use engine::{evaluate, interpret, DimensionResult, GroupResult, Profile, Report};
pub use normalize::{normalize, RangePolicy};
pub use rank::{rank, top_code, RankedEntry, Scored};
pub use validation::validate_profile;
