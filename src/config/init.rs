use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_sheet_path, save_sheet, Sheet};
use crate::model::Dimension;
use crate::scoring::{normalize, Profile, RangePolicy};

/// Prompt user with a message and return their trimmed input.
fn prompt<R: BufRead>(input: &mut R, message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim().to_string())
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no<R: BufRead>(input: &mut R, message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let answer = prompt(input, &format!("{} [{}]: ", message, hint))?.to_lowercase();
    if answer.is_empty() {
        Ok(default_yes)
    } else {
        Ok(answer == "y" || answer == "yes")
    }
}

/// Ask for one dimension value until it parses and lies in range.
/// Empty input keeps the default.
fn prompt_value<R: BufRead>(input: &mut R, dim: &Dimension) -> Result<f64> {
    loop {
        let message = format!("{} ({}..{}) [{}]: ", dim.label, dim.min, dim.max, dim.value);
        let answer = prompt(input, &message)?;
        if answer.is_empty() {
            return Ok(dim.value);
        }
        match answer.parse::<f64>() {
            Ok(v) => match normalize(&dim.with_value(v), RangePolicy::Reject) {
                Ok(v) => return Ok(v),
                Err(e) => println!("  Invalid: {}. Try again.", e),
            },
            Err(_) => println!("  Invalid: '{}' is not a number. Try again.", answer),
        }
    }
}

/// Fill in sheet values from `input`, one prompt per dimension.
pub fn fill_values<R: BufRead>(input: &mut R, profile: &Profile, sheet: &mut Sheet) -> Result<()> {
    println!("{}", profile.title);
    println!("{}", "=".repeat(profile.title.chars().count()));
    for dim in profile.default_dimensions() {
        let current = sheet.values.get(&dim.id).copied().unwrap_or(dim.value);
        let value = prompt_value(input, &dim.with_value(current))?;
        sheet.values.insert(dim.id.clone(), value);
    }
    Ok(())
}

/// Create a score sheet for `preset`.
///
/// Non-interactive runs record every default value and refuse to overwrite
/// an existing file unless `force` is set.
pub fn run_init(preset: &str, path: Option<PathBuf>, interactive: bool, force: bool) -> Result<PathBuf> {
    let sheet_path = match path {
        Some(p) => p,
        None => get_sheet_path()?,
    };

    let mut sheet = Sheet::from_preset(preset);
    let profile = Profile::from_config(&sheet.profile_config()?)?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    if sheet_path.exists() && !force {
        let overwrite = interactive
            && prompt_yes_no(
                &mut input,
                &format!("Sheet already exists at {}. Overwrite?", sheet_path.display()),
                false,
            )?;
        if !overwrite {
            anyhow::bail!(
                "Sheet already exists at {} (use --force to overwrite)",
                sheet_path.display()
            );
        }
    }

    if interactive {
        fill_values(&mut input, &profile, &mut sheet)?;
    } else {
        sheet.values = defaults_for(&profile);
    }

    save_sheet(&sheet_path, &sheet)?;
    tracing::info!(path = %sheet_path.display(), preset, "wrote score sheet");
    Ok(sheet_path)
}

fn defaults_for(profile: &Profile) -> std::collections::BTreeMap<String, f64> {
    profile
        .default_dimensions()
        .into_iter()
        .map(|d| (d.id, d.value))
        .collect()
}
