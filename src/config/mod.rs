pub mod init;
mod schema;

pub use schema::Sheet;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/scorebands/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("scorebands"))
}

/// Get the default sheet path (~/.config/scorebands/sheet.yaml)
pub fn get_sheet_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("sheet.yaml"))
}

/// Load a score sheet from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to the sheet. If None, uses ~/.config/scorebands/sheet.yaml
///
/// # Errors
///
/// Returns an error if:
/// - The sheet file does not exist
/// - The sheet file cannot be read
/// - The YAML cannot be parsed
pub fn load_sheet(path: Option<PathBuf>) -> Result<Sheet> {
    let sheet_path = match path {
        Some(p) => p,
        None => get_sheet_path()?,
    };

    if !sheet_path.exists() {
        anyhow::bail!(
            "Sheet not found at {}. Run `scorebands init` to create one",
            sheet_path.display()
        );
    }

    let content = fs::read_to_string(&sheet_path)
        .with_context(|| format!("Failed to read sheet at {}", sheet_path.display()))?;

    let sheet: Sheet = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse sheet: invalid YAML in {}", sheet_path.display()))?;

    Ok(sheet)
}

/// Write bytes atomically, creating parent directories as needed.
///
/// The destination is never left half-written.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;

    Ok(())
}

/// Save a score sheet as YAML
pub fn save_sheet(path: &Path, sheet: &Sheet) -> Result<()> {
    let yaml = serde_saphyr::to_string(sheet)
        .map_err(|e| anyhow::anyhow!("Failed to serialize sheet: {}", e))?;
    write_atomic(path, yaml.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_missing_sheet() {
        let path = env::temp_dir().join("scorebands_test_missing_sheet.yaml");
        let _ = fs::remove_file(&path);

        let err = load_sheet(Some(path)).unwrap_err();
        assert!(err.to_string().contains("scorebands init"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = env::temp_dir()
            .join("scorebands_test_dir")
            .join("roundtrip.yaml");
        let _ = fs::remove_file(&path);

        let mut sheet = Sheet::from_preset("holland");
        sheet.values.insert("R".to_string(), 45.0);
        sheet.values.insert("I".to_string(), 72.0);
        save_sheet(&path, &sheet).unwrap();

        let loaded = load_sheet(Some(path.clone())).unwrap();
        assert_eq!(loaded, sheet);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let path = env::temp_dir().join("scorebands_test_invalid.yaml");
        fs::write(&path, "preset: [unclosed").unwrap();

        let err = load_sheet(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));

        let _ = fs::remove_file(&path);
    }
}
