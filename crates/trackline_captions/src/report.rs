use serde::{Deserialize, Serialize};
use std::fmt;
use trackline_core::Caption;

const FORMAT_EXAMPLE: &str = "1\n00:00:01,000 --> 00:00:04,000\nFirst subtitle text\n\n2\n00:00:05,000 --> 00:00:08,000\nSecond subtitle text";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Structure or content emptiness.
    Validation,
    /// Malformed block or timestamp syntax.
    Format,
    /// Bad time values, ordering, or overlaps.
    Timing,
    /// Character set problems while reading the file.
    Encoding,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IssueKind::Validation => "validation",
            IssueKind::Format => "format",
            IssueKind::Timing => "timing",
            IssueKind::Encoding => "encoding",
        };
        f.write_str(s)
    }
}

/// One diagnostic from caption parsing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParseIssue {
    pub kind: IssueKind,
    pub message: String,
    /// 1-based position of the subtitle block among blank-line separated
    /// blocks. This is a block number, not a file line number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 1-based file line where the block starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ParseIssue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
            source_line: None,
            details: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(IssueKind::Validation, message)
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::new(IssueKind::Format, message)
    }

    pub fn timing(message: impl Into<String>) -> Self {
        Self::new(IssueKind::Timing, message)
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::new(IssueKind::Encoding, message)
    }

    pub fn at_block(mut self, block: usize, source_line: usize) -> Self {
        self.line = Some(block);
        self.source_line = Some(source_line);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.source_line) {
            (Some(block), Some(line)) => {
                write!(f, "[{}] block {} (line {}): {}", self.kind, block, line, self.message)?
            }
            (Some(block), None) => write!(f, "[{}] block {}: {}", self.kind, block, self.message)?,
            _ => write!(f, "[{}] {}", self.kind, self.message)?,
        }
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

/// Outcome of parsing a caption file.
///
/// `success` is true when at least one caption came out; `errors` may still
/// hold non-fatal issues (skipped blocks, overlaps). On failure `captions`
/// is absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParseReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captions: Option<Vec<Caption>>,
    pub errors: Vec<ParseIssue>,
}

impl ParseReport {
    pub fn failed(errors: Vec<ParseIssue>) -> Self {
        Self {
            success: false,
            captions: None,
            errors,
        }
    }

    pub fn from_parts(captions: Vec<Caption>, errors: Vec<ParseIssue>) -> Self {
        if captions.is_empty() {
            Self::failed(errors)
        } else {
            Self {
                success: true,
                captions: Some(captions),
                errors,
            }
        }
    }

    pub fn captions(&self) -> &[Caption] {
        self.captions.as_deref().unwrap_or(&[])
    }

    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Human-readable report: an itemized issue list, plus format guidance
    /// when the file could not be used.
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        if self.success {
            out.push_str(&format!("Loaded {} caption(s)", self.captions().len()));
            if self.errors.is_empty() {
                out.push('\n');
                return out;
            }
            out.push_str(&format!(" with {} warning(s):\n", self.errors.len()));
        } else {
            out.push_str(&format!(
                "Could not load captions ({} error(s)):\n",
                self.errors.len()
            ));
        }

        for (i, issue) in self.errors.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, issue));
        }

        if !self.success {
            out.push_str("\nExpected SRT format:\n\n");
            out.push_str(FORMAT_EXAMPLE);
            out.push('\n');
        }
        out
    }
}
