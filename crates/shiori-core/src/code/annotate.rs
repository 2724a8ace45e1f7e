//! Highlight markers in code blocks.
//!
//! Authors mark lines for emphasis with comment lines:
//!
//! ```text
//! // highlight-start
//! let emphasized = true;
//! // highlight-end
//! // highlight-end        <- alone: emphasizes the next line only
//! let also_emphasized = true;
//! ```
//!
//! Marker lines are removed from the output and highlighted indices refer
//! to the cleaned code.

use crate::config::AnnotateConfig;
use serde::Serialize;
use std::collections::BTreeSet;

/// Marker substrings recognized on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationMarkers {
    pub start: String,
    pub end: String,
}

impl Default for AnnotationMarkers {
    fn default() -> Self {
        Self::from(&AnnotateConfig::default())
    }
}

impl From<&AnnotateConfig> for AnnotationMarkers {
    fn from(config: &AnnotateConfig) -> Self {
        Self {
            start: config.start_marker.clone(),
            end: config.end_marker.clone(),
        }
    }
}

/// Cleaned code with the lines to emphasize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightSpec {
    pub processed_code: String,
    /// Zero-based indices into `processed_code` lines.
    pub highlighted_lines: BTreeSet<usize>,
}

impl HighlightSpec {
    pub fn line_count(&self) -> usize {
        self.processed_code.split('\n').count()
    }

    /// Single-line blocks are shown without line numbers.
    pub fn is_single_line(&self) -> bool {
        self.line_count() == 1
    }

    pub fn is_highlighted(&self, line: usize) -> bool {
        self.highlighted_lines.contains(&line)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.processed_code.split('\n')
    }
}

enum State {
    Normal,
    InBlock { start: usize },
}

/// Annotate with the default `highlight-start` / `highlight-end` markers.
pub fn annotate(code: &str) -> HighlightSpec {
    annotate_with(code, &AnnotationMarkers::default())
}

/// Strip marker lines from `code` and collect the highlighted lines.
///
/// A start marker opens a block and an end marker closes it, highlighting
/// every line emitted in between. An end marker with no open block
/// highlights the next emitted line. A block left open at the end of the
/// input highlights nothing. Start markers inside an open block move the
/// block start.
pub fn annotate_with(code: &str, markers: &AnnotationMarkers) -> HighlightSpec {
    let mut output: Vec<&str> = Vec::new();
    let mut highlighted = BTreeSet::new();
    let mut state = State::Normal;
    let mut highlight_next = false;

    for line in code.split('\n') {
        if line.contains(markers.start.as_str()) {
            state = State::InBlock {
                start: output.len(),
            };
            continue;
        }

        if line.contains(markers.end.as_str()) {
            match std::mem::replace(&mut state, State::Normal) {
                State::InBlock { start } => highlighted.extend(start..output.len()),
                State::Normal => highlight_next = true,
            }
            continue;
        }

        output.push(line);
        if highlight_next {
            highlighted.insert(output.len() - 1);
            highlight_next = false;
        }
    }

    HighlightSpec {
        processed_code: output.join("\n"),
        highlighted_lines: highlighted,
    }
}
