use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub id: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub value: f64,
}

impl Dimension {
    pub fn new(id: &str, label: &str, min: f64, max: f64, value: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            min,
            max,
            value,
        }
    }

    /// Whether the value lies inside `[min, max]`
    pub fn in_range(&self) -> bool {
        self.value.is_finite() && self.value >= self.min && self.value <= self.max
    }

    /// Both bounds are whole numbers, so only whole values are on the scale
    pub fn is_whole_scale(&self) -> bool {
        self.min.fract() == 0.0 && self.max.fract() == 0.0
    }

    /// A scale centered on zero, as used by polar axes (-5..+5)
    pub fn is_symmetric(&self) -> bool {
        self.min < 0.0 && self.min == -self.max
    }

    /// Return a copy with a different value
    pub fn with_value(&self, value: f64) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateMode {
    #[default]
    Sum,
    Mean,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    pub label: String,
    pub members: Vec<String>, // dimension ids, in declaration order
    pub mode: AggregateMode,
}

impl Group {
    pub fn new(id: &str, label: &str, members: &[&str], mode: AggregateMode) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
            mode,
        }
    }
}
