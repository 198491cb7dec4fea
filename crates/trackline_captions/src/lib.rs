//! Caption ingestion for the overlay timeline: SubRip parsing with
//! structured diagnostics, timing synthesis for plain scripts, and export.

pub mod error;
pub mod overlay;
pub mod report;
pub mod script;
pub mod srt;
pub mod words;

pub use error::{CaptionsError, Result};
pub use overlay::{caption_bounds, caption_overlay};
pub use report::{IssueKind, ParseIssue, ParseReport};
pub use script::{captions_from_script, ScriptTiming};
pub use srt::{format_time_string, parse_srt, parse_srt_file, parse_time_string, to_srt};
