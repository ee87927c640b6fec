use thiserror::Error;

/// Errors raised by the scoring engine and the response extractor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("{id}: value {value} is not on the scale [{min}, {max}]")]
    InvalidRange {
        id: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{subject}: score {score} matches no band")]
    UnclassifiedScore { subject: String, score: f64 },

    #[error("response is not valid JSON: {0}")]
    ResponseParse(String),

    #[error("unknown dimension '{0}'")]
    UnknownDimension(String),

    #[error("group '{group}' references unknown dimension '{member}'")]
    UnknownMember { group: String, member: String },

    #[error("unknown rule '{0}'")]
    UnknownRule(String),

    #[error("invalid band range '{range}': {reason}")]
    InvalidBand { range: String, reason: String },

    #[error("invalid profile:\n  - {}", .0.join("\n  - "))]
    Profile(Vec<String>),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
