use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;

use scorebands::{EngineError, config, output, presets, response, scoring};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_RESPONSE: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify, aggregate and rank a score sheet
    Score {
        /// Built-in preset to score (ignores the sheet file)
        #[arg(short, long, conflicts_with = "sheet")]
        preset: Option<String>,

        /// Path to a score sheet (defaults to ~/.config/scorebands/sheet.yaml)
        #[arg(short, long)]
        sheet: Option<PathBuf>,

        /// Override a value, e.g. --set I=72 (repeatable)
        #[arg(long = "set", value_name = "ID=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, f64)>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,

        /// Also write the JSON report to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List built-in presets
    Presets,
    /// Create a score sheet from a preset
    Init {
        /// Preset the sheet is based on
        #[arg(short, long, default_value = "holland")]
        preset: String,

        /// Prompt for each value instead of writing defaults
        #[arg(short, long)]
        interactive: bool,

        /// Overwrite an existing sheet
        #[arg(long)]
        force: bool,

        /// Where to write the sheet (defaults to ~/.config/scorebands/sheet.yaml)
        path: Option<PathBuf>,
    },
    /// Extract the JSON object from a generative-text response
    Extract {
        /// Response file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Fail unless these top-level keys are present (repeatable)
        #[arg(short, long = "require", value_name = "KEY")]
        require: Vec<String>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "scorebands")]
#[command(about = "Classify, aggregate and rank scored dimensions", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{}'", s))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing dimension id in '{}'", s));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((id.to_string(), value))
}

/// Exit code for an error surfaced from the engine
fn exit_code_for(err: &EngineError) -> i32 {
    match err {
        EngineError::InvalidRange { .. }
        | EngineError::UnknownDimension(_)
        | EngineError::UnclassifiedScore { .. } => EXIT_INPUT,
        EngineError::ResponseParse(_) => EXIT_RESPONSE,
        _ => EXIT_CONFIG,
    }
}

fn run_score(
    preset: Option<String>,
    sheet_path: Option<PathBuf>,
    set: Vec<(String, f64)>,
    format: Format,
    out: Option<PathBuf>,
) -> Result<(), i32> {
    let sheet = match preset {
        Some(name) => config::Sheet::from_preset(&name),
        None => config::load_sheet(sheet_path).map_err(|e| {
            eprintln!("Sheet error: {:#}", e);
            EXIT_CONFIG
        })?,
    };

    let profile_config = sheet.profile_config().map_err(|e| {
        eprintln!("Config error: {:#}", e);
        EXIT_CONFIG
    })?;

    // Validate profile at startup
    if let Err(errors) = scoring::validate_profile(&profile_config) {
        eprintln!("Profile '{}' errors:", profile_config.name);
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(EXIT_CONFIG);
    }

    let profile = scoring::Profile::from_config(&profile_config).map_err(|e| {
        eprintln!("Config error: {}", e);
        EXIT_CONFIG
    })?;

    let mut values: BTreeMap<String, f64> = sheet.values.clone();
    for (id, value) in set {
        values.insert(id, value);
    }
    tracing::debug!(profile = %profile.name, values = values.len(), "scoring sheet");

    let report = scoring::evaluate(&profile, &values).map_err(|e| {
        eprintln!("Input error: {}", e);
        exit_code_for(&e)
    })?;

    let generated_at = chrono::Utc::now();
    let json = || {
        output::format_json(&report, generated_at).map_err(|e| {
            eprintln!("Failed to serialize report: {}", e);
            EXIT_FAILURE
        })
    };

    match format {
        Format::Table => println!(
            "{}",
            output::format_ranked_table(&report, output::should_use_colors())
        ),
        Format::Tsv => println!("{}", output::format_tsv(&report)),
        Format::Json => println!("{}", json()?),
    }

    if let Some(path) = out {
        let body = json()?;
        config::write_atomic(&path, body.as_bytes()).map_err(|e| {
            eprintln!("Failed to write report: {:#}", e);
            EXIT_FAILURE
        })?;
        tracing::info!(path = %path.display(), "wrote report");
    }

    Ok(())
}

fn run_extract(file: Option<PathBuf>, require: Vec<String>) -> Result<(), i32> {
    let text = match file {
        Some(path) => std::fs::read_to_string(&path).map_err(|e| {
            eprintln!("Failed to read {}: {}", path.display(), e);
            EXIT_FAILURE
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map_err(|e| {
                eprintln!("Failed to read stdin: {}", e);
                EXIT_FAILURE
            })?;
            buf
        }
    };

    let required: Vec<&str> = require.iter().map(String::as_str).collect();
    let value = response::extract_json(&text)
        .and_then(|v| response::require_fields(&v, &required).map(|_| v))
        .map_err(|e| {
            eprintln!("{}", e);
            EXIT_RESPONSE
        })?;

    match serde_json::to_string_pretty(&value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("Failed to serialize JSON: {}", e);
            return Err(EXIT_FAILURE);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    scorebands::logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Score {
            preset,
            sheet,
            set,
            format,
            out,
        } => run_score(preset, sheet, set, format, out),
        Commands::Presets => {
            for name in presets::preset_names() {
                match presets::load_preset(name) {
                    Ok(p) => println!("{:<14} {} ({} dimensions)", name, p.title(), p.dimensions.len()),
                    Err(e) => eprintln!("{}: {:#}", name, e),
                }
            }
            Ok(())
        }
        Commands::Init {
            preset,
            interactive,
            force,
            path,
        } => match config::init::run_init(&preset, path, interactive, force) {
            Ok(path) => {
                println!("Sheet written to {}", path.display());
                println!("Run `scorebands score --sheet {}` to score it.", path.display());
                Ok(())
            }
            Err(e) => {
                eprintln!("Init error: {:#}", e);
                Err(EXIT_CONFIG)
            }
        },
        Commands::Extract { file, require } => run_extract(file, require),
    };

    std::process::exit(match result {
        Ok(()) => EXIT_SUCCESS,
        Err(code) => code,
    });
}
