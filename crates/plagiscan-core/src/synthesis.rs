//! Score and summary synthesis from a list of flagged spans.
//!
//! The score is the share of the text covered by flagged sentences, measured
//! in characters (Unicode scalar values):
//!
//! ```text
//! score = round(100 * sum(chars(span.sentence)) / chars(text))
//! ```
//!
//! Overlapping or repeated spans are summed as-is, so the score can exceed
//! 100. A zero-length text scores 0.

use std::fmt;

use serde::Serialize;

use crate::band::ScoreBand;
use crate::span::{AnalysisResult, FlaggedSpan, SourceType};

/// Which summary rule applied. The first matching rule wins, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Verdict {
    /// Score 0 and nothing flagged.
    Clean,
    /// Both web and AI passages flagged.
    Mixed { web: usize, ai: usize },
    WebOnly { web: usize },
    AiOnly { ai: usize },
    /// Score above zero with no spans counted. Unreachable from well-formed
    /// input; kept so the rule table is total.
    ScoreOnly { score: u32 },
}

impl Verdict {
    pub fn select(score: u32, web: usize, ai: usize) -> Self {
        if score == 0 && web == 0 && ai == 0 {
            Self::Clean
        } else if web > 0 && ai > 0 {
            Self::Mixed { web, ai }
        } else if web > 0 {
            Self::WebOnly { web }
        } else if ai > 0 {
            Self::AiOnly { ai }
        } else {
            Self::ScoreOnly { score }
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clean => write!(
                f,
                "Excellent! No signs of plagiarism or AI-generated content were detected."
            ),
            Self::Mixed { web, ai } => write!(
                f,
                "Found {web} passage(s) copied from internet sources and {ai} passage(s) generated by AI."
            ),
            Self::WebOnly { web } => {
                write!(f, "Found {web} passage(s) copied from internet sources.")
            }
            Self::AiOnly { ai } => write!(f, "Found {ai} passage(s) likely generated by AI."),
            Self::ScoreOnly { score } => write!(
                f,
                "Analysis complete. The plagiarism/AI score is {score}%."
            ),
        }
    }
}

/// Final, display-ready result of one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    pub score: u32,
    pub verdict: Verdict,
    pub summary: String,
    #[serde(rename = "plagiarizedSentences")]
    pub spans: Vec<FlaggedSpan>,
}

impl ScoredResult {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score)
    }

    pub fn web_spans(&self) -> impl Iterator<Item = &FlaggedSpan> {
        self.spans.iter().filter(|s| s.source_type == SourceType::Web)
    }

    pub fn ai_spans(&self) -> impl Iterator<Item = &FlaggedSpan> {
        self.spans.iter().filter(|s| s.source_type == SourceType::Ai)
    }
}

/// Compute score, verdict and summary for `spans` found in `text`.
pub fn synthesize(text: &str, spans: Vec<FlaggedSpan>) -> ScoredResult {
    let total = text.chars().count();
    let flagged: usize = spans.iter().map(|s| s.sentence.chars().count()).sum();
    let score = percent_rounded(flagged, total);

    let web = spans.iter().filter(|s| s.is_web()).count();
    let ai = spans.iter().filter(|s| s.is_ai()).count();

    let verdict = Verdict::select(score, web, ai);
    ScoredResult {
        score,
        verdict,
        summary: verdict.to_string(),
        spans,
    }
}

/// Synthesize from a parsed reply. An empty span list short-circuits to
/// [`clean_result`].
pub fn synthesize_analysis(text: &str, analysis: AnalysisResult) -> ScoredResult {
    if analysis.is_empty() {
        return clean_result();
    }
    synthesize(text, analysis.spans)
}

/// The fixed "no issues found" result.
pub fn clean_result() -> ScoredResult {
    ScoredResult {
        score: 0,
        verdict: Verdict::Clean,
        summary: Verdict::Clean.to_string(),
        spans: Vec::new(),
    }
}

/// `round(100 * part / whole)` with halves rounded up, in integer arithmetic.
fn percent_rounded(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (part as u64, whole as u64);
    ((200 * part + whole) / (2 * whole)) as u32
}
