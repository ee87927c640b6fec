pub mod types;

pub use types::{AggregateMode, Dimension, Group};
