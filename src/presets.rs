//! Built-in scoring profiles for the panel family.

use anyhow::{Context, Result};

use crate::scoring::ProfileConfig;

const HOLLAND: &str = r#"
name: holland
title: Holland RIASEC
code_length: 3
rules:
  level:
    - { range: "<=40", label: Low }
    - { range: "41-59", label: Mid }
    - { range: ">=60", label: High }
dimensions:
  - { id: R, label: Realistic, min: 0, max: 100, rule: level }
  - { id: I, label: Investigative, min: 0, max: 100, rule: level }
  - { id: A, label: Artistic, min: 0, max: 100, rule: level }
  - { id: S, label: Social, min: 0, max: 100, rule: level }
  - { id: E, label: Enterprising, min: 0, max: 100, rule: level }
  - { id: C, label: Conventional, min: 0, max: 100, rule: level }
"#;

const CAREER_NEXT: &str = r#"
name: career-next
title: Career Next
rules:
  track:
    - { range: "<=12", label: Low }
    - { range: "13-21", label: Mid }
    - { range: ">=22", label: High }
dimensions:
  - { id: a1, label: "Track A / Trip 1", min: 1, max: 10 }
  - { id: a2, label: "Track A / Trip 2", min: 1, max: 10 }
  - { id: a3, label: "Track A / Trip 3", min: 1, max: 10 }
  - { id: b1, label: "Track B / Trip 1", min: 1, max: 10 }
  - { id: b2, label: "Track B / Trip 2", min: 1, max: 10 }
  - { id: b3, label: "Track B / Trip 3", min: 1, max: 10 }
  - { id: c1, label: "Track C / Trip 1", min: 1, max: 10 }
  - { id: c2, label: "Track C / Trip 2", min: 1, max: 10 }
  - { id: c3, label: "Track C / Trip 3", min: 1, max: 10 }
groups:
  - { id: A, label: Track A, members: [a1, a2, a3], mode: sum, rule: track }
  - { id: B, label: Track B, members: [b1, b2, b3], mode: sum, rule: track }
  - { id: C, label: Track C, members: [c1, c2, c3], mode: sum, rule: track }
"#;

const CAREER_STYLE: &str = r#"
name: career-style
title: Career Style
rules:
  office:
    - { range: "<=-4", label: back }
    - { range: "-3..3", label: half }
    - { range: ">=4", label: front }
dimensions:
  - id: drive
    label: "Stability / Challenge"
    min: -5
    max: 5
    axis: { left: S, right: C, zero: left }
  - id: scope
    label: "Specialist / Generalist"
    min: -5
    max: 5
    axis: { left: P, right: G, zero: left }
  - id: team
    label: "Solo / Team"
    min: -5
    max: 5
    axis: { left: O, right: T, zero: left }
  - id: office
    label: "Back office / Front office"
    min: -5
    max: 5
    rule: office
"#;

const LIFE_DESIGN: &str = r#"
name: life-design
title: Life Design
rules:
  area:
    - { range: "<=3", label: Low }
    - { range: "4-6", label: Mid }
    - { range: ">=7", label: High }
dimensions:
  - { id: health, label: Health, min: 0, max: 10, rule: area }
  - { id: work, label: Work, min: 0, max: 10, rule: area }
  - { id: money, label: Money, min: 0, max: 10, rule: area }
  - { id: family, label: Family, min: 0, max: 10, rule: area }
  - { id: friends, label: Friends, min: 0, max: 10, rule: area }
  - { id: growth, label: Growth, min: 0, max: 10, rule: area }
  - { id: leisure, label: Leisure, min: 0, max: 10, rule: area }
  - { id: home, label: Home, min: 0, max: 10, rule: area }
groups:
  - id: balance
    label: Overall balance
    members: [health, work, money, family, friends, growth, leisure, home]
    mode: mean
"#;

const LIFE_CURVE: &str = r#"
name: life-curve
title: Life Curve
rules:
  mood:
    - { range: "<=-3", label: low }
    - { range: "-2..2", label: even }
    - { range: ">=3", label: high }
dimensions:
  - { id: childhood, label: Childhood, min: -5, max: 5, rule: mood, axis: { left: "-", right: "+", zero: { neutral: "=" } } }
  - { id: teens, label: Teens, min: -5, max: 5, rule: mood, axis: { left: "-", right: "+", zero: { neutral: "=" } } }
  - { id: twenties, label: Twenties, min: -5, max: 5, rule: mood, axis: { left: "-", right: "+", zero: { neutral: "=" } } }
  - { id: thirties, label: Thirties, min: -5, max: 5, rule: mood, axis: { left: "-", right: "+", zero: { neutral: "=" } } }
  - { id: forties, label: Forties, min: -5, max: 5, rule: mood, axis: { left: "-", right: "+", zero: { neutral: "=" } } }
  - { id: now, label: Now, min: -5, max: 5, rule: mood, axis: { left: "-", right: "+", zero: { neutral: "=" } } }
groups:
  - { id: average, label: Average mood, members: [childhood, teens, twenties, thirties, forties, now], mode: mean }
"#;

const PRESETS: &[(&str, &str)] = &[
    ("holland", HOLLAND),
    ("career-next", CAREER_NEXT),
    ("career-style", CAREER_STYLE),
    ("life-design", LIFE_DESIGN),
    ("life-curve", LIFE_CURVE),
];

/// Names of the built-in presets, in display order
pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|(name, _)| *name).collect()
}

/// Load a built-in preset by name
pub fn load_preset(name: &str) -> Result<ProfileConfig> {
    let (_, yaml) = PRESETS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .with_context(|| {
            format!(
                "Unknown preset '{}'. Available: {}",
                name,
                preset_names().join(", ")
            )
        })?;
    serde_saphyr::from_str(yaml).with_context(|| format!("Failed to parse preset '{}'", name))
}
