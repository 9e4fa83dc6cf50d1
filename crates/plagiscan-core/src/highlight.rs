//! Partition of the analyzed text into plain and flagged segments.
//!
//! Sentences are matched as literal text, longest first: the scan always
//! takes the earliest occurrence of any sentence, and when several sentences
//! start at the same position the longest wins. Matches never overlap; the
//! cursor jumps past each one.
//!
//! Segments carry the *first* span (in longest-first order) whose sentence
//! equals the segment text. Repeated occurrences of a sentence, and distinct
//! spans that share a sentence, all resolve to that one span.

use crate::span::FlaggedSpan;

/// One piece of the partitioned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSegment<'a> {
    pub text: &'a str,
    pub span: Option<&'a FlaggedSpan>,
}

impl RenderSegment<'_> {
    pub fn is_flagged(&self) -> bool {
        self.span.is_some()
    }
}

/// Lazy iterator over the segments of a text. See [`partition`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    /// Non-empty sentences, longest first, stable on ties.
    ordered: Vec<&'a FlaggedSpan>,
    /// Next occurrence of each `ordered` sentence at or after the cursor, or
    /// `None` once it no longer occurs. Filled on the first search.
    next_at: Vec<Option<usize>>,
    cursor: usize,
    /// A match already located, emitted after the plain text before it.
    pending: Option<(usize, &'a FlaggedSpan)>,
    done: bool,
}

/// Split `text` into segments covering it exactly once, in order.
///
/// With no usable spans the whole text comes back as a single plain segment,
/// even when it is empty. Otherwise no empty segment is produced.
pub fn partition<'a>(text: &'a str, spans: &'a [FlaggedSpan]) -> Segments<'a> {
    let mut ordered: Vec<&FlaggedSpan> = spans.iter().filter(|s| !s.sentence.is_empty()).collect();
    ordered.sort_by_key(|s| std::cmp::Reverse(s.sentence.chars().count()));

    Segments {
        text,
        ordered,
        next_at: Vec::new(),
        cursor: 0,
        pending: None,
        done: false,
    }
}

impl<'a> Segments<'a> {
    /// Earliest match at or after the cursor, as an absolute byte offset.
    ///
    /// A sentence is searched again only after the cursor has passed its
    /// cached occurrence, and each search starts at the cursor.
    fn next_match(&mut self) -> Option<(usize, &'a FlaggedSpan)> {
        let (text, cursor) = (self.text, self.cursor);
        if self.next_at.is_empty() {
            self.next_at = self.ordered.iter().map(|s| text.find(s.sentence.as_str())).collect();
        }

        let mut best: Option<(usize, &'a FlaggedSpan)> = None;
        for (slot, &span) in self.next_at.iter_mut().zip(&self.ordered) {
            if let Some(at) = *slot
                && at < cursor
            {
                *slot = text[cursor..].find(span.sentence.as_str()).map(|o| cursor + o);
            }
            if let Some(at) = *slot
                && best.is_none_or(|(b, _)| at < b)
            {
                best = Some((at, span));
            }
        }
        best
    }

    fn flagged(&mut self, start: usize, span: &'a FlaggedSpan) -> RenderSegment<'a> {
        let end = start + span.sentence.len();
        self.cursor = end;
        RenderSegment {
            text: &self.text[start..end],
            span: Some(span),
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = RenderSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.ordered.is_empty() {
            self.done = true;
            return Some(RenderSegment {
                text: self.text,
                span: None,
            });
        }
        if let Some((start, span)) = self.pending.take() {
            return Some(self.flagged(start, span));
        }
        if self.cursor >= self.text.len() {
            self.done = true;
            return None;
        }

        match self.next_match() {
            Some((start, span)) if start == self.cursor => Some(self.flagged(start, span)),
            Some((start, span)) => {
                let plain = &self.text[self.cursor..start];
                self.cursor = start;
                self.pending = Some((start, span));
                Some(RenderSegment {
                    text: plain,
                    span: None,
                })
            }
            None => {
                let plain = &self.text[self.cursor..];
                self.cursor = self.text.len();
                self.done = true;
                Some(RenderSegment {
                    text: plain,
                    span: None,
                })
            }
        }
    }
}

impl std::iter::FusedIterator for Segments<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::SourceType;

    fn web(s: &str) -> FlaggedSpan {
        FlaggedSpan::new(s, "https://example.com", SourceType::Web)
    }

    fn ai(s: &str) -> FlaggedSpan {
        FlaggedSpan::new(s, "note", SourceType::Ai)
    }

    fn texts<'a>(segments: impl Iterator<Item = RenderSegment<'a>>) -> Vec<(&'a str, bool)> {
        segments.map(|s| (s.text, s.is_flagged())).collect()
    }

    #[test]
    fn no_spans_yields_whole_text() {
        let text = "Nothing flagged here.";
        let segs: Vec<_> = partition(text, &[]).collect();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].text, text);
        assert!(segs[0].span.is_none());
    }

    #[test]
    fn no_spans_on_empty_text() {
        let segs: Vec<_> = partition("", &[]).collect();
        assert_eq!(segs, vec![RenderSegment { text: "", span: None }]);
    }

    #[test]
    fn empty_sentences_are_ignored() {
        let spans = vec![web("")];
        let segs: Vec<_> = partition("abc", &spans).collect();
        assert_eq!(texts(segs.into_iter()), vec![("abc", false)]);
    }

    #[test]
    fn reconstructs_text() {
        let text = "First sentence. Second one is copied. Third is fine. Fourth sounds generated.";
        let spans = vec![web("Second one is copied."), ai("Fourth sounds generated.")];
        let segs: Vec<_> = partition(text, &spans).collect();

        let joined: String = segs.iter().map(|s| s.text).collect();
        assert_eq!(joined, text);
        for seg in &segs {
            if let Some(span) = seg.span {
                assert_eq!(seg.text, span.sentence);
            }
        }
        assert_eq!(
            texts(segs.into_iter()),
            vec![
                ("First sentence. ", false),
                ("Second one is copied.", true),
                (" Third is fine. ", false),
                ("Fourth sounds generated.", true),
            ]
        );
    }

    #[test]
    fn longest_sentence_wins() {
        let spans = vec![ai("a"), web("ab")];
        let segs: Vec<_> = partition("ab", &spans).collect();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].text, "ab");
        assert_eq!(segs[0].span, Some(&spans[1]));
    }

    #[test]
    fn nested_shorter_sentence_still_matches_elsewhere() {
        let spans = vec![web("cat sat"), ai("cat")];
        let segs: Vec<_> = partition("cat sat; cat ran", &spans).collect();
        assert_eq!(
            texts(segs.iter().copied()),
            vec![("cat sat", true), ("; ", false), ("cat", true), (" ran", false)]
        );
        assert!(segs[2].span.unwrap().is_ai());
    }

    #[test]
    fn earliest_match_beats_longer_later_match() {
        let spans = vec![web("bcd"), ai("ab")];
        let segs: Vec<_> = partition("abcd", &spans).collect();
        assert_eq!(texts(segs.into_iter()), vec![("ab", true), ("cd", false)]);
    }

    #[test]
    fn repeated_occurrences_share_one_span() {
        let spans = vec![web("echo")];
        let segs: Vec<_> = partition("echo, echo", &spans).collect();
        let flagged: Vec<_> = segs.iter().filter_map(|s| s.span).collect();
        assert_eq!(flagged.len(), 2);
        assert!(std::ptr::eq(flagged[0], flagged[1]));
    }

    #[test]
    fn duplicate_sentences_use_first_in_order() {
        let spans = vec![ai("same"), web("same")];
        let segs: Vec<_> = partition("x same", &spans).collect();
        assert_eq!(segs[1].span.unwrap().source_type, SourceType::Ai);
    }

    #[test]
    fn pattern_characters_are_literal() {
        let spans = vec![web("(a+b)*[c]?"), ai("$1.00 ^")];
        let text = "Cost: $1.00 ^ and (a+b)*[c]? too";
        let segs: Vec<_> = partition(text, &spans).collect();
        assert_eq!(
            texts(segs.into_iter()),
            vec![
                ("Cost: ", false),
                ("$1.00 ^", true),
                (" and ", false),
                ("(a+b)*[c]?", true),
                (" too", false),
            ]
        );
    }

    #[test]
    fn sentence_absent_from_text() {
        let spans = vec![web("not present")];
        let segs: Vec<_> = partition("some text", &spans).collect();
        assert_eq!(texts(segs.into_iter()), vec![("some text", false)]);
    }

    #[test]
    fn match_at_end_and_whole_text() {
        let spans = vec![web("end.")];
        let segs: Vec<_> = partition("the end.", &spans).collect();
        assert_eq!(texts(segs.into_iter()), vec![("the ", false), ("end.", true)]);

        let segs: Vec<_> = partition("end.", &spans).collect();
        assert_eq!(texts(segs.into_iter()), vec![("end.", true)]);
    }

    #[test]
    fn multibyte_text() {
        let spans = vec![ai("văn bản")];
        let text = "Đây là văn bản mẫu.";
        let segs: Vec<_> = partition(text, &spans).collect();
        assert_eq!(
            texts(segs.into_iter()),
            vec![("Đây là ", false), ("văn bản", true), (" mẫu.", false)]
        );
    }

    #[test]
    fn many_sentences_over_long_text() {
        let sentences: Vec<String> = (0..500).map(|i| format!("Flagged sentence number {i}.")).collect();
        let mut text = String::new();
        for (i, sentence) in sentences.iter().enumerate() {
            text.push_str(&"Plain filler that nobody flagged. ".repeat(8));
            if i % 2 == 0 {
                text.push_str(sentence);
                text.push(' ');
            }
        }
        let spans: Vec<FlaggedSpan> = sentences.iter().map(|s| ai(s)).collect();

        let started = std::time::Instant::now();
        let segs: Vec<_> = partition(&text, &spans).collect();
        assert!(started.elapsed() < std::time::Duration::from_secs(10));

        assert_eq!(segs.iter().filter(|s| s.is_flagged()).count(), 250);
        assert_eq!(segs.iter().map(|s| s.text).collect::<String>(), text);
        assert!(segs.iter().all(|s| !s.text.is_empty()));
    }

    #[test]
    fn partition_can_be_called_again() {
        let spans = vec![web("b")];
        let first: Vec<_> = partition("abc", &spans).collect();
        let second: Vec<_> = partition("abc", &spans).collect();
        assert_eq!(first, second);

        let mut it = partition("abc", &spans);
        assert_eq!(it.by_ref().count(), 3);
        assert_eq!(it.next(), None);
    }
}
