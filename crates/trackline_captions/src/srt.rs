use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use trackline_core::Caption;

use crate::error::Result;
use crate::report::{ParseIssue, ParseReport};
use crate::words::distribute_words;

/// Confidence assigned to captions read from a subtitle file.
pub const SRT_CONFIDENCE: f64 = 0.95;

static TIMESTAMP_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+:\d+:\d+,\d+)\s*-->\s*(\d+:\d+:\d+,\d+)").expect("timestamp pattern")
});

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>|\{[^}]*\}").expect("markup pattern"));

/// A run of non-blank lines.
struct Block<'a> {
    /// 1-based block position.
    index: usize,
    /// 1-based file line of the block's first line.
    source_line: usize,
    lines: Vec<&'a str>,
}

/// Parse SubRip text into captions.
///
/// ```text
/// 1
/// 00:00:01,000 --> 00:00:04,000
/// First caption text
///
/// 2
/// 00:00:05,500 --> 00:00:08,000
/// Second caption text
/// with multiple lines
/// ```
///
/// Structural problems (empty input, too few lines, no timestamp anywhere)
/// fail immediately. A malformed block is reported and skipped; the rest of
/// the file still loads. Overlapping captions are reported but kept.
pub fn parse_srt(content: &str) -> ParseReport {
    let normalized = normalize(content);

    if let Err(issue) = validate_structure(&normalized) {
        tracing::debug!(issue = %issue, "SRT rejected before block parsing");
        return ParseReport::failed(vec![issue]);
    }

    let blocks = split_blocks(&normalized);
    let mut parsed: Vec<(usize, usize, Caption)> = Vec::with_capacity(blocks.len());
    let mut errors = Vec::new();

    for block in &blocks {
        match parse_block(block) {
            Ok(caption) => parsed.push((block.index, block.source_line, caption)),
            Err(issue) => {
                tracing::warn!(block = block.index, issue = %issue, "skipping subtitle block");
                errors.push(issue);
            }
        }
    }

    parsed.sort_by_key(|(_, _, caption)| caption.start_ms);

    for pair in parsed.windows(2) {
        let (prev_block, _, prev) = &pair[0];
        let (block, source_line, next) = &pair[1];
        if prev.end_ms > next.start_ms {
            errors.push(
                ParseIssue::timing(format!(
                    "Subtitle {} overlaps with subtitle {}",
                    prev_block, block
                ))
                .at_block(*block, *source_line)
                .with_details(format!(
                    "{} ends at {}, {} starts at {}",
                    prev_block,
                    format_time_string(prev.end_ms),
                    block,
                    format_time_string(next.start_ms)
                )),
            );
        }
    }

    let captions: Vec<Caption> = parsed.into_iter().map(|(_, _, c)| c).collect();
    tracing::debug!(
        blocks = blocks.len(),
        captions = captions.len(),
        issues = errors.len(),
        "parsed SRT"
    );
    ParseReport::from_parts(captions, errors)
}

/// Read and parse a subtitle file. Only an unreadable file is an `Err`;
/// content that is not UTF-8 comes back as a failed report with an
/// encoding issue.
pub fn parse_srt_file(path: impl AsRef<Path>) -> Result<ParseReport> {
    let bytes = std::fs::read(path.as_ref())?;
    match String::from_utf8(bytes) {
        Ok(content) => Ok(parse_srt(&content)),
        Err(e) => Ok(ParseReport::failed(vec![ParseIssue::encoding(
            "File is not valid UTF-8 text",
        )
        .with_details(e.to_string())])),
    }
}

/// Convert `HH:MM:SS,mmm` to milliseconds.
pub fn parse_time_string(value: &str) -> std::result::Result<u64, ParseIssue> {
    let invalid = |why: &str| {
        ParseIssue::timing(format!("Invalid time value: {}", value.trim())).with_details(why.to_string())
    };

    let (hms, millis) = value
        .trim()
        .split_once(',')
        .ok_or_else(|| invalid("missing ',' before milliseconds"))?;

    let parts: Vec<&str> = hms.split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(invalid("expected HH:MM:SS"));
    };

    let hours = parse_component(hours).ok_or_else(|| invalid("hours are not numeric"))?;
    let minutes = parse_component(minutes).ok_or_else(|| invalid("minutes are not numeric"))?;
    let seconds = parse_component(seconds).ok_or_else(|| invalid("seconds are not numeric"))?;
    let millis = parse_component(millis).ok_or_else(|| invalid("milliseconds are not numeric"))?;

    if minutes >= 60 {
        return Err(invalid("minutes must be below 60"));
    }
    if seconds >= 60 {
        return Err(invalid("seconds must be below 60"));
    }
    if millis >= 1000 {
        return Err(invalid("milliseconds must be below 1000"));
    }

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .and_then(|secs| secs.checked_mul(1000))
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(|| invalid("time value out of range"))
}

/// Format milliseconds as `HH:MM:SS,mmm`.
pub fn format_time_string(ms: u64) -> String {
    let millis = ms % 1000;
    let total_secs = ms / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;
    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, millis)
}

/// Export captions as SubRip text, numbered from 1 in the given order.
pub fn to_srt(captions: &[Caption]) -> String {
    let mut output = String::new();
    for (index, caption) in captions.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        output.push_str(&format!(
            "{}\n{} --> {}\n{}\n",
            index + 1,
            format_time_string(caption.start_ms),
            format_time_string(caption.end_ms),
            caption.text
        ));
    }
    output
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

fn normalize(content: &str) -> String {
    content
        .trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

fn validate_structure(content: &str) -> std::result::Result<(), ParseIssue> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ParseIssue::validation("File is empty"));
    }
    if trimmed.lines().count() < 3 {
        return Err(ParseIssue::validation("File is too short to contain a subtitle")
            .with_details("expected at least 3 lines: number, timestamp, text"));
    }
    if !TIMESTAMP_LINE.is_match(trimmed) {
        return Err(ParseIssue::format("No valid timestamps found")
            .with_details("expected HH:MM:SS,mmm --> HH:MM:SS,mmm"));
    }
    Ok(())
}

fn split_blocks(content: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<Block<'_>> = None;

    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            blocks.extend(current.take());
            continue;
        }
        match current.as_mut() {
            Some(block) => block.lines.push(line),
            None => {
                current = Some(Block {
                    index: blocks.len() + 1,
                    source_line: i + 1,
                    lines: vec![line],
                })
            }
        }
    }
    blocks.extend(current);
    blocks
}

fn parse_block(block: &Block<'_>) -> std::result::Result<Caption, ParseIssue> {
    let at = |issue: ParseIssue| issue.at_block(block.index, block.source_line);

    let number_line = block.lines[0].trim();
    if number_line.parse::<u64>().is_err() {
        return Err(at(ParseIssue::format("Invalid subtitle number").with_details(number_line)));
    }

    let Some(timestamp_line) = block.lines.get(1) else {
        return Err(at(ParseIssue::format("Missing timestamp line")));
    };
    let Some(caps) = TIMESTAMP_LINE.captures(timestamp_line) else {
        return Err(at(
            ParseIssue::format("Invalid timestamp format").with_details(timestamp_line.trim())
        ));
    };

    let start_ms = parse_time_string(&caps[1]).map_err(at)?;
    let end_ms = parse_time_string(&caps[2]).map_err(at)?;
    if start_ms >= end_ms {
        return Err(at(ParseIssue::timing("Start time must be before end time")
            .with_details(timestamp_line.trim())));
    }

    let raw_text = block.lines[2..].join("\n");
    let text = MARKUP.replace_all(&raw_text, "").trim().to_string();
    if text.is_empty() {
        return Err(at(ParseIssue::validation("Subtitle text is empty")));
    }

    let words = distribute_words(&text, start_ms, end_ms, SRT_CONFIDENCE);
    Ok(Caption {
        text,
        start_ms,
        end_ms,
        timestamp_ms: None,
        confidence: SRT_CONFIDENCE,
        words,
    })
}

fn parse_component(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
