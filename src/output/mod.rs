pub mod formatter;

pub use formatter::{format_json, format_ranked_table, format_score, format_tsv, should_use_colors};
