pub mod extract;
pub mod slot;

pub use extract::{extract_json, parse_outcome, parse_response, require_fields, ParseOutcome};
pub use slot::ResponseSlot;
