use serde::{Deserialize, Serialize};

/// Where an exact zero lands on a polar axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroPolicy {
    Left,
    Right,
    Neutral(String),
}

/// Left/right code pair for a signed axis such as -5..+5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolarAxis {
    pub left: String,
    pub right: String,
    pub zero: ZeroPolicy,
}

impl PolarAxis {
    pub fn new(left: &str, right: &str, zero: ZeroPolicy) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
            zero,
        }
    }
}

/// Code a signed value: negative -> left, positive -> right, zero -> policy.
pub fn code(value: f64, axis: &PolarAxis) -> &str {
    if value < 0.0 {
        axis.left.as_str()
    } else if value > 0.0 {
        axis.right.as_str()
    } else {
        match &axis.zero {
            ZeroPolicy::Left => axis.left.as_str(),
            ZeroPolicy::Right => axis.right.as_str(),
            ZeroPolicy::Neutral(code) => code.as_str(),
        }
    }
}

/// Concatenate per-axis codes into a type code, e.g. "IT" + "S" + "P" -> "ITSP"
pub fn style_code<'a, I>(codes: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    codes.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_coding() {
        let axis = PolarAxis::new("I", "E", ZeroPolicy::Left);
        assert_eq!(code(-5.0, &axis), "I");
        assert_eq!(code(-0.5, &axis), "I");
        assert_eq!(code(0.5, &axis), "E");
        assert_eq!(code(5.0, &axis), "E");
    }

    #[test]
    fn test_zero_policies() {
        assert_eq!(code(0.0, &PolarAxis::new("I", "E", ZeroPolicy::Left)), "I");
        assert_eq!(code(0.0, &PolarAxis::new("I", "E", ZeroPolicy::Right)), "E");
        let neutral = PolarAxis::new("I", "E", ZeroPolicy::Neutral("X".to_string()));
        assert_eq!(code(0.0, &neutral), "X");
        assert_eq!(code(-0.0, &neutral), "X");
    }

    #[test]
    fn test_style_code() {
        let axes = [
            (PolarAxis::new("I", "E", ZeroPolicy::Left), -2.0),
            (PolarAxis::new("S", "G", ZeroPolicy::Left), 3.0),
            (PolarAxis::new("P", "F", ZeroPolicy::Right), 0.0),
        ];
        let code_str = style_code(axes.iter().map(|(axis, v)| code(*v, axis)));
        assert_eq!(code_str, "IGF");
    }

    #[test]
    fn test_axis_yaml() {
        let yaml = r#"
left: "I"
right: "E"
zero: left
"#;
        let axis: PolarAxis = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(axis.zero, ZeroPolicy::Left);

        let yaml = r#"
left: "I"
right: "E"
zero:
  neutral: "X"
"#;
        let axis: PolarAxis = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(axis.zero, ZeroPolicy::Neutral("X".to_string()));
    }

    #[test]
    fn test_axis_requires_zero_policy() {
        let yaml = r#"
left: "I"
right: "E"
"#;
        assert!(serde_saphyr::from_str::<PolarAxis>(yaml).is_err());
    }
}
