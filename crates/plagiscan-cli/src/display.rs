//! Text and JSON rendering of a check report.
//!
//! The text card has the same sections as the result panels of a GUI front
//! end. The overview and the highlighted text are always printed; the web
//! matches, AI passages, and search references only when non-empty.

use std::fmt;

use chrono::{SecondsFormat, Utc};
use plagiscan_core::{
    FlaggedSpan, GroundingSource, ScoreBand, ScoredResult, SourceType, Verdict, partition, title_for,
};
use serde::Serialize;

const LABEL_WIDTH: usize = 10;

// ── ANSI styling ──

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const ORANGE: &str = "\x1b[38;5;208m";

/// Whether to emit ANSI escapes. Without colour, flagged text is bracketed:
/// `[[web]]` and `{{ai}}`.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub color: bool,
}

impl Style {
    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn band(&self, band: ScoreBand, text: &str) -> String {
        let code = match band {
            ScoreBand::Low => GREEN,
            ScoreBand::Moderate => YELLOW,
            ScoreBand::Elevated => ORANGE,
            ScoreBand::High => RED,
        };
        self.paint(code, text)
    }

    fn flagged(&self, source_type: SourceType, text: &str) -> String {
        match (self.color, source_type) {
            (true, SourceType::Web) => self.paint(CYAN, text),
            (true, SourceType::Ai) => self.paint(MAGENTA, text),
            (false, SourceType::Web) => format!("[[{text}]]"),
            (false, SourceType::Ai) => format!("{{{{{text}}}}}"),
        }
    }
}

// ── Public API ──

/// Render the full report card for a successful check of `text`.
pub fn render_findings(
    text: &str,
    scored: &ScoredResult,
    sources: &[GroundingSource],
    style: Style,
) -> String {
    FindingsCard {
        text,
        scored,
        sources,
        style,
    }
    .to_string()
}

/// Render the error panel for a failed check.
pub fn render_failure(message: &str, style: Style) -> String {
    format!(
        "{}\n  {}\n",
        style.paint(RED, &style.paint(BOLD, "Analysis failed")),
        message
    )
}

// ── Card sections ──

struct FindingsCard<'a> {
    text: &'a str,
    scored: &'a ScoredResult,
    sources: &'a [GroundingSource],
    style: Style,
}

impl fmt::Display for FindingsCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.overview(f)?;
        self.highlighted(f)?;
        self.web_matches(f)?;
        self.ai_passages(f)?;
        self.references(f)
    }
}

impl FindingsCard<'_> {
    fn heading(&self, f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
        writeln!(f, "{}", self.style.paint(BOLD, title))
    }

    fn overview(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let band = self.scored.band();
        self.heading(f, "=== Analysis report ===")?;
        writeln!(
            f,
            "  {:<LABEL_WIDTH$} {} ({})",
            "score",
            self.style.band(band, &format!("{}%", self.scored.score)),
            band.as_str()
        )?;
        writeln!(f, "  {:<LABEL_WIDTH$} {}", "summary", self.scored.summary)?;
        writeln!(f)
    }

    fn highlighted(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.heading(f, "Highlighted text")?;
        let mut body = String::new();
        for segment in partition(self.text, &self.scored.spans) {
            match segment.span {
                Some(span) => body.push_str(&self.style.flagged(span.source_type, segment.text)),
                None => body.push_str(segment.text),
            }
        }
        for line in body.lines() {
            writeln!(f, "  {line}")?;
        }
        writeln!(f)
    }

    fn web_matches(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let web: Vec<&FlaggedSpan> = self.scored.web_spans().collect();
        if web.is_empty() {
            return Ok(());
        }
        self.heading(f, &format!("Copied from the internet ({})", web.len()))?;
        for span in web {
            writeln!(f, "  \"{}\"", self.style.flagged(SourceType::Web, &span.sentence))?;
            writeln!(f, "    {:<LABEL_WIDTH$} {}", "source", span.source)?;
            if let Some(title) = title_for(self.sources, &span.source) {
                writeln!(f, "    {:<LABEL_WIDTH$} {}", "page", title)?;
            }
        }
        writeln!(f)
    }

    fn ai_passages(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ai: Vec<&FlaggedSpan> = self.scored.ai_spans().collect();
        if ai.is_empty() {
            return Ok(());
        }
        self.heading(f, &format!("Likely AI-generated ({})", ai.len()))?;
        for span in ai {
            writeln!(f, "  \"{}\"", self.style.flagged(SourceType::Ai, &span.sentence))?;
            writeln!(f, "    {:<LABEL_WIDTH$} {}", "analysis", span.source)?;
        }
        writeln!(f)
    }

    fn references(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let linked: Vec<(&str, &str)> = self
            .sources
            .iter()
            .filter_map(|s| Some((s.label()?, s.uri()?)))
            .collect();
        if linked.is_empty() {
            return Ok(());
        }
        self.heading(f, &format!("Search references ({})", linked.len()))?;
        for (label, uri) in linked {
            if label == uri {
                writeln!(f, "  - {uri}")?;
            } else {
                writeln!(f, "  - {label} <{uri}>")?;
            }
        }
        writeln!(f)
    }
}

// ── JSON ──

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFindings<'a> {
    generated_at: String,
    score: u32,
    band: ScoreBand,
    verdict: Verdict,
    summary: &'a str,
    plagiarized_sentences: &'a [FlaggedSpan],
    sources: &'a [GroundingSource],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFailure<'a> {
    generated_at: String,
    error: &'a str,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn findings_json(scored: &ScoredResult, sources: &[GroundingSource]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonFindings {
        generated_at: now(),
        score: scored.score,
        band: scored.band(),
        verdict: scored.verdict,
        summary: &scored.summary,
        plagiarized_sentences: &scored.spans,
        sources,
    })
}

pub fn failure_json(message: &str) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonFailure {
        generated_at: now(),
        error: message,
    })
}
