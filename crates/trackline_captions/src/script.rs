use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use trackline_core::Caption;

use crate::error::{CaptionsError, Result};
use crate::words::distribute_words;

/// Confidence assigned to synthesized captions.
pub const SCRIPT_CONFIDENCE: f64 = 0.99;

/// A sentence with its terminating punctuation, if any.
static SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+[.!?]*").expect("sentence pattern"));

/// Speaking-rate model for scripts without timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScriptTiming {
    pub words_per_minute: u32,
    /// Silence inserted after each sentence.
    pub sentence_gap_ms: u64,
}

impl Default for ScriptTiming {
    fn default() -> Self {
        Self {
            words_per_minute: 160,
            sentence_gap_ms: 500,
        }
    }
}

impl ScriptTiming {
    /// Spoken length of `word_count` words, rounded to whole milliseconds.
    pub fn duration_ms(&self, word_count: usize) -> u64 {
        let wpm = self.words_per_minute as u64;
        (word_count as u64 * 60_000 * 2 + wpm) / (2 * wpm)
    }
}

/// Build one caption per sentence of `text`, back to back from 0 ms with
/// `sentence_gap_ms` of silence between sentences.
pub fn captions_from_script(text: &str, timing: &ScriptTiming) -> Result<Vec<Caption>> {
    if timing.words_per_minute == 0 {
        return Err(CaptionsError::InvalidRate);
    }

    let mut captions = Vec::new();
    let mut cursor_ms = 0u64;

    for m in SENTENCE.find_iter(text) {
        let sentence = m.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
        if !sentence.chars().any(char::is_alphanumeric) {
            continue;
        }

        let word_count = sentence.split_whitespace().count();
        let start_ms = cursor_ms;
        let end_ms = start_ms + timing.duration_ms(word_count);
        let words = distribute_words(&sentence, start_ms, end_ms, SCRIPT_CONFIDENCE);

        captions.push(Caption {
            text: sentence,
            start_ms,
            end_ms,
            timestamp_ms: None,
            confidence: SCRIPT_CONFIDENCE,
            words,
        });
        cursor_ms = end_ms + timing.sentence_gap_ms;
    }

    if captions.is_empty() {
        return Err(CaptionsError::NoSentences);
    }
    tracing::debug!(
        sentences = captions.len(),
        wpm = timing.words_per_minute,
        "generated captions from script"
    );
    Ok(captions)
}
