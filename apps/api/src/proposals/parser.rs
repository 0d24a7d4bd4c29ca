//! Response Parser: splits free-text model output into labeled sections.
//!
//! Two stages behind one [`SectionSplitter`] interface:
//! 1. [`MarkerSplitter`] cuts on `<LABEL> <n>:` markers (case-insensitive),
//!    dropping the preamble and any segment that trims to nothing.
//! 2. [`LineChunker`] runs only when stage 1 yields nothing: the non-blank lines are
//!    partitioned into a fixed number of contiguous chunks.
//!
//! The two contracts differ in how the fallback treats empty chunks. Template
//! customization drops them (the assembler then reports the shortfall); freeform
//! keeps them as empty sections. This asymmetry is observable in responses and
//! is kept as-is.

use std::sync::OnceLock;

use regex::Regex;

use crate::proposals::prompts::{CUSTOMIZED_TEMPLATE_MARKER, PROPOSAL_MARKER, SECTION_COUNT};

/// A strategy that turns raw model text into an ordered list of sections.
pub trait SectionSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}

// ────────────────────────────────────────────────────────────────────────────
// Stage 1: marker split
// ────────────────────────────────────────────────────────────────────────────

pub struct MarkerSplitter {
    pattern: Regex,
}

impl MarkerSplitter {
    /// Matches `<label> <ASCII digits>:` in any case, e.g. `proposal 2:`.
    pub fn new(label: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(r"(?i){} [0-9]+:", regex::escape(label)))?;
        Ok(Self { pattern })
    }
}

impl SectionSplitter for MarkerSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        self.pattern
            .split(text)
            .skip(1) // preamble before the first marker
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stage 2: line chunking fallback
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyChunks {
    Drop,
    Keep,
}

pub struct LineChunker {
    pub chunks: usize,
    pub empty: EmptyChunks,
}

impl SectionSplitter for LineChunker {
    fn split(&self, text: &str) -> Vec<String> {
        let chunks = chunk_by_lines(text, self.chunks);
        match self.empty {
            EmptyChunks::Keep => chunks,
            EmptyChunks::Drop => chunks.into_iter().filter(|c| !c.is_empty()).collect(),
        }
    }
}

/// Partitions the non-blank lines of `text` into `n` contiguous chunks of
/// `ceil(lines / n)` lines. Trailing chunks come out empty when lines run out.
pub fn chunk_by_lines(text: &str, n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }

    let lines: Vec<&str> = text.split('\n').filter(|l| !l.trim().is_empty()).collect();
    let chunk_size = lines.len().div_ceil(n);

    (0..n)
        .map(|i| {
            let start = (i * chunk_size).min(lines.len());
            let end = (start + chunk_size).min(lines.len());
            lines[start..end].join("\n").trim().to_string()
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Two-stage parser
// ────────────────────────────────────────────────────────────────────────────

pub struct SectionParser {
    primary: Box<dyn SectionSplitter>,
    fallback: Box<dyn SectionSplitter>,
}

impl SectionParser {
    pub fn new(primary: Box<dyn SectionSplitter>, fallback: Box<dyn SectionSplitter>) -> Self {
        Self { primary, fallback }
    }

    /// Returns `true` alongside the sections when the fallback produced them.
    pub fn parse(&self, text: &str) -> (Vec<String>, bool) {
        let sections = self.primary.split(text);
        if sections.is_empty() {
            (self.fallback.split(text), true)
        } else {
            (sections, false)
        }
    }
}

fn marker_parser(label: &str, empty: EmptyChunks) -> SectionParser {
    let markers = MarkerSplitter::new(label).expect("valid marker regex");
    SectionParser::new(
        Box::new(markers),
        Box::new(LineChunker {
            chunks: SECTION_COUNT,
            empty,
        }),
    )
}

/// Parser for `CUSTOMIZED TEMPLATE n:` output. Fallback drops empty chunks.
pub fn template_parser() -> &'static SectionParser {
    static PARSER: OnceLock<SectionParser> = OnceLock::new();
    PARSER.get_or_init(|| marker_parser(CUSTOMIZED_TEMPLATE_MARKER, EmptyChunks::Drop))
}

/// Parser for `PROPOSAL n:` output. Fallback keeps empty chunks.
pub fn proposal_parser() -> &'static SectionParser {
    static PARSER: OnceLock<SectionParser> = OnceLock::new();
    PARSER.get_or_init(|| marker_parser(PROPOSAL_MARKER, EmptyChunks::Keep))
}
