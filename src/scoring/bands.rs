use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, PartialEq)]
pub enum RangeOp {
    LessThan(f64),
    LessEqual(f64),
    GreaterThan(f64),
    GreaterEqual(f64),
    Equal(f64),
    Between(f64, f64), // Inclusive range: N..M or N-M
}

fn parse_bound(range: &str, s: &str) -> EngineResult<f64> {
    let value: f64 = s.trim().parse().map_err(|_| EngineError::InvalidBand {
        range: range.to_string(),
        reason: format!("'{}' is not a number", s.trim()),
    })?;
    if !value.is_finite() {
        return Err(EngineError::InvalidBand {
            range: range.to_string(),
            reason: "bounds must be finite".to_string(),
        });
    }
    Ok(value)
}

/// Split "N-M" on the first '-' that is not a sign. "-5--4" -> ("-5", "-4")
fn split_dash(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    (1..bytes.len())
        .find(|&i| bytes[i] == b'-' && !matches!(bytes[i - 1], b'-' | b'e' | b'E'))
        .map(|i| (&s[..i], &s[i + 1..]))
}

impl RangeOp {
    pub fn parse(s: &str) -> EngineResult<Self> {
        let raw = s;
        let s = s.trim();
        if s.is_empty() {
            return Err(EngineError::InvalidBand {
                range: raw.to_string(),
                reason: "empty range".to_string(),
            });
        }

        let op = if let Some(val) = s.strip_prefix(">=") {
            RangeOp::GreaterEqual(parse_bound(raw, val)?)
        } else if let Some(val) = s.strip_prefix("<=") {
            RangeOp::LessEqual(parse_bound(raw, val)?)
        } else if let Some(val) = s.strip_prefix('>') {
            RangeOp::GreaterThan(parse_bound(raw, val)?)
        } else if let Some(val) = s.strip_prefix('<') {
            RangeOp::LessThan(parse_bound(raw, val)?)
        } else if let Some((low, high)) = s.split_once("..") {
            RangeOp::Between(parse_bound(raw, low)?, parse_bound(raw, high)?)
        } else if let Some((low, high)) = split_dash(s) {
            RangeOp::Between(parse_bound(raw, low)?, parse_bound(raw, high)?)
        } else {
            RangeOp::Equal(parse_bound(raw, s)?)
        };

        if let RangeOp::Between(low, high) = op {
            if low > high {
                return Err(EngineError::InvalidBand {
                    range: raw.to_string(),
                    reason: format!("lower bound {} exceeds upper bound {}", low, high),
                });
            }
        }
        Ok(op)
    }

    pub fn matches(&self, value: f64) -> bool {
        match *self {
            RangeOp::LessThan(n) => value < n,
            RangeOp::LessEqual(n) => value <= n,
            RangeOp::GreaterThan(n) => value > n,
            RangeOp::GreaterEqual(n) => value >= n,
            RangeOp::Equal(n) => value == n,
            RangeOp::Between(low, high) => value >= low && value <= high,
        }
    }
}

impl std::fmt::Display for RangeOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeOp::LessThan(n) => write!(f, "<{}", n),
            RangeOp::LessEqual(n) => write!(f, "<={}", n),
            RangeOp::GreaterThan(n) => write!(f, ">{}", n),
            RangeOp::GreaterEqual(n) => write!(f, ">={}", n),
            RangeOp::Equal(n) => write!(f, "{}", n),
            RangeOp::Between(low, high) => write!(f, "{}..{}", low, high),
        }
    }
}

/// One row of a classification table.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub range: RangeOp,
    pub label: String,
}

impl Band {
    pub fn parse(range: &str, label: &str) -> EngineResult<Self> {
        Ok(Self {
            range: RangeOp::parse(range)?,
            label: label.to_string(),
        })
    }
}
