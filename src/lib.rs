pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod presets;
pub mod response;
pub mod scoring;

pub use error::{EngineError, EngineResult};
