//! Core types: flagged spans, score synthesis, highlighting, and citation lookup.

pub mod band;
pub mod citation;
pub mod highlight;
pub mod span;
pub mod synthesis;

pub use band::ScoreBand;
pub use citation::{GroundingSource, WebSource, title_for};
pub use highlight::{RenderSegment, Segments, partition};
pub use span::{AnalysisResult, FlaggedSpan, SourceType};
pub use synthesis::{ScoredResult, Verdict, clean_result, synthesize, synthesize_analysis};
