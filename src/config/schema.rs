use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::presets::load_preset;
use crate::scoring::ProfileConfig;

/// A score sheet: which profile to use and the values entered for it.
///
/// Example YAML:
/// ```yaml
/// preset: holland
/// values:
///   R: 45
///   I: 72
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Sheet {
    /// Name of a built-in preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Inline profile (mutually exclusive with `preset`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileConfig>,

    /// Dimension id -> entered value
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
}

impl Sheet {
    pub fn from_preset(name: &str) -> Self {
        Self {
            preset: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Resolve the profile this sheet points at
    pub fn profile_config(&self) -> Result<ProfileConfig> {
        match (&self.preset, &self.profile) {
            (Some(_), Some(_)) => bail!("Sheet sets both 'preset' and 'profile'; pick one"),
            (Some(name), None) => load_preset(name),
            (None, Some(profile)) => Ok(profile.clone()),
            (None, None) => bail!("Sheet needs either 'preset' or 'profile'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_sheet_parse() {
        let yaml = r#"
preset: holland
values:
  R: 45
  I: 72.5
"#;
        let sheet: Sheet = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(sheet.values["I"], 72.5);
        assert_eq!(sheet.profile_config().unwrap().name, "holland");
    }

    #[test]
    fn test_inline_profile_sheet() {
        let yaml = r#"
profile:
  name: custom
  dimensions:
    - { id: focus, min: 0, max: 10 }
values:
  focus: 8
"#;
        let sheet: Sheet = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(sheet.profile_config().unwrap().name, "custom");
    }

    #[test]
    fn test_sheet_needs_exactly_one_source() {
        let empty = Sheet::default();
        assert!(empty.profile_config().is_err());

        let mut both = Sheet::from_preset("holland");
        both.profile = Some(load_preset("holland").unwrap());
        let err = both.profile_config().unwrap_err();
        assert!(err.to_string().contains("pick one"));
    }

    #[test]
    fn test_sheet_serde_roundtrip() {
        let mut sheet = Sheet::from_preset("life-design");
        sheet.values.insert("health".to_string(), 7.0);
        let yaml = serde_saphyr::to_string(&sheet).unwrap();
        let parsed: Sheet = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(sheet, parsed);
    }
}
