//! Code block helpers.
//!
//! - [`annotate`]: highlight markers inside a block's code
//! - [`meta`]: language, file name and presentation flags from a fence's
//!   info string
//! - [`blocks`]: fenced block discovery in a markdown document

pub mod annotate;
pub mod blocks;
pub mod meta;

pub use annotate::{AnnotationMarkers, HighlightSpec, annotate, annotate_with};
pub use blocks::{AnnotatedBlock, FenceExtractor, FencedBlock, annotate_document, extract_fenced_blocks};
pub use meta::{CodeMeta, DEFAULT_LANGUAGE};
