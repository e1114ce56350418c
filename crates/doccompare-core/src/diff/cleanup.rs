//! Semantic cleanup of raw character-level edit scripts.
//!
//! A minimal character diff of two prose documents is visually noisy: a
//! changed amount such as `$100 -> $150` comes out as `1`, `-0`, `+5`, `0`,
//! and a reworded clause is shredded into dozens of one-letter edits around
//! coincidentally shared letters. This pass trades edit-count minimality for
//! readable edit spans.
//!
//! The script is first regrouped into alternating *equal runs* and *edit
//! regions* (one deleted string plus one inserted string). Then:
//!
//! 1. **Noise absorption.** An equal run between two regions is folded into
//!    them when it is at most [`DiffOptions::noise_max_chars`] chars, or when
//!    it is no longer than the larger side of *both* neighbouring regions.
//!    Runs containing a line break are never absorbed. Repeated to a fixed
//!    point.
//! 2. **Affix factoring.** A common prefix or suffix of a region's deleted
//!    and inserted text is handed back to the neighbouring equal runs.
//! 3. **Word alignment** (optional). A region that begins or ends inside a
//!    word is widened to the word boundary on that side.
//!
//! Every step moves text between equal runs and regions without reordering
//! it, so both sides of the script still reconstruct their documents.

use crate::config::DiffOptions;
use crate::model::EditOp;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Equal(String),
    Edit { deleted: String, inserted: String },
}

impl Segment {
    fn is_empty(&self) -> bool {
        match self {
            Segment::Equal(t) => t.is_empty(),
            Segment::Edit { deleted, inserted } => deleted.is_empty() && inserted.is_empty(),
        }
    }
}

/// Run the full cleanup pipeline over a raw edit script
pub fn semantic_cleanup(ops: Vec<EditOp>, opts: &DiffOptions) -> Vec<EditOp> {
    let segments = into_segments(ops);
    let segments = absorb_noise(segments, opts.noise_max_chars);
    let segments = factor_affixes(segments);
    let segments = if opts.align_to_words {
        align_to_words(segments)
    } else {
        segments
    };
    into_ops(segments)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Append to the output, merging with a trailing segment of the same kind
fn push_segment(out: &mut Vec<Segment>, seg: Segment) {
    if seg.is_empty() {
        return;
    }
    match (out.last_mut(), seg) {
        (Some(Segment::Equal(last)), Segment::Equal(text)) => last.push_str(&text),
        (
            Some(Segment::Edit {
                deleted: d,
                inserted: i,
            }),
            Segment::Edit { deleted, inserted },
        ) => {
            d.push_str(&deleted);
            i.push_str(&inserted);
        }
        (_, seg) => out.push(seg),
    }
}

fn into_segments(ops: Vec<EditOp>) -> Vec<Segment> {
    let mut out = Vec::with_capacity(ops.len());
    for op in ops {
        let seg = match op {
            EditOp::Equal(t) => Segment::Equal(t),
            EditOp::Delete(t) => Segment::Edit {
                deleted: t,
                inserted: String::new(),
            },
            EditOp::Insert(t) => Segment::Edit {
                deleted: String::new(),
                inserted: t,
            },
        };
        push_segment(&mut out, seg);
    }
    out
}

fn into_ops(segments: Vec<Segment>) -> Vec<EditOp> {
    let mut ops = Vec::with_capacity(segments.len() * 2);
    for seg in segments {
        match seg {
            Segment::Equal(t) => {
                if !t.is_empty() {
                    ops.push(EditOp::Equal(t));
                }
            }
            Segment::Edit { deleted, inserted } => {
                if !deleted.is_empty() {
                    ops.push(EditOp::Delete(deleted));
                }
                if !inserted.is_empty() {
                    ops.push(EditOp::Insert(inserted));
                }
            }
        }
    }
    ops
}

fn edit_weight(deleted: &str, inserted: &str) -> usize {
    char_len(deleted).max(char_len(inserted))
}

fn absorb_noise(segments: Vec<Segment>, noise_max_chars: usize) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::with_capacity(segments.len());

    for seg in segments {
        let (mut deleted, mut inserted) = match seg {
            Segment::Edit { deleted, inserted } => (deleted, inserted),
            equal => {
                push_segment(&mut out, equal);
                continue;
            }
        };

        // Fold `[.., Edit(prev), Equal(gap)]` into the incoming edit while the
        // gap qualifies. Each fold grows the edit, which may qualify the next
        // gap further left.
        while out.len() >= 2 {
            let n = out.len();
            let qualifies = match (&out[n - 2], &out[n - 1]) {
                (
                    Segment::Edit {
                        deleted: pd,
                        inserted: pi,
                    },
                    Segment::Equal(gap),
                ) => {
                    let gap_len = char_len(gap);
                    !gap.contains('\n')
                        && (gap_len <= noise_max_chars
                            || (gap_len <= edit_weight(pd, pi)
                                && gap_len <= edit_weight(&deleted, &inserted)))
                }
                _ => false,
            };
            if !qualifies {
                break;
            }

            let gap = match out.pop() {
                Some(Segment::Equal(gap)) => gap,
                _ => unreachable!("checked above"),
            };
            let (mut pd, mut pi) = match out.pop() {
                Some(Segment::Edit { deleted, inserted }) => (deleted, inserted),
                _ => unreachable!("checked above"),
            };
            pd.push_str(&gap);
            pd.push_str(&deleted);
            pi.push_str(&gap);
            pi.push_str(&inserted);
            deleted = pd;
            inserted = pi;
        }

        push_segment(&mut out, Segment::Edit { deleted, inserted });
    }

    out
}

/// Byte length of the longest common prefix, on a char boundary
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((idx, _), _)| idx)
        .unwrap_or_else(|| a.len().min(b.len()))
}

/// Byte length of the longest common suffix, on a char boundary
fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(ca, cb)| ca == cb)
        .map(|(c, _)| c.len_utf8())
        .sum()
}

fn factor_affixes(segments: Vec<Segment>) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());

    for seg in segments {
        let (mut deleted, mut inserted) = match seg {
            Segment::Edit { deleted, inserted } => (deleted, inserted),
            equal => {
                push_segment(&mut out, equal);
                continue;
            }
        };

        let prefix = common_prefix_len(&deleted, &inserted);
        if prefix > 0 {
            let shared: String = deleted.drain(..prefix).collect();
            inserted.drain(..prefix);
            push_segment(&mut out, Segment::Equal(shared));
        }

        let suffix = common_suffix_len(&deleted, &inserted);
        let shared_tail = if suffix > 0 {
            let tail = deleted.split_off(deleted.len() - suffix);
            inserted.truncate(inserted.len() - suffix);
            Some(tail)
        } else {
            None
        };

        push_segment(&mut out, Segment::Edit { deleted, inserted });
        if let Some(tail) = shared_tail {
            push_segment(&mut out, Segment::Equal(tail));
        }
    }

    out
}

fn starts_with_word(s: &str) -> bool {
    s.chars().next().is_some_and(is_word_char)
}

fn ends_with_word(s: &str) -> bool {
    s.chars().next_back().is_some_and(is_word_char)
}

/// Split off the trailing run of word chars of an equal run
fn take_word_tail(seg: &mut Segment) -> String {
    match seg {
        Segment::Equal(text) => {
            let cut = text
                .char_indices()
                .rev()
                .find(|(_, c)| !is_word_char(*c))
                .map(|(idx, c)| idx + c.len_utf8())
                .unwrap_or(0);
            text.split_off(cut)
        }
        Segment::Edit { .. } => String::new(),
    }
}

/// Split off the leading run of word chars of an equal run
fn take_word_head(seg: &mut Segment) -> String {
    match seg {
        Segment::Equal(text) => {
            let cut = text
                .char_indices()
                .find(|(_, c)| !is_word_char(*c))
                .map(|(idx, _)| idx)
                .unwrap_or(text.len());
            let rest = text.split_off(cut);
            std::mem::replace(text, rest)
        }
        Segment::Edit { .. } => String::new(),
    }
}

fn align_to_words(mut segments: Vec<Segment>) -> Vec<Segment> {
    for i in 0..segments.len() {
        let (starts_in_word, ends_in_word) = match &segments[i] {
            Segment::Edit { deleted, inserted } => (
                starts_with_word(deleted) || starts_with_word(inserted),
                ends_with_word(deleted) || ends_with_word(inserted),
            ),
            Segment::Equal(_) => continue,
        };

        let head = if starts_in_word && i > 0 && ends_with_word_segment(&segments[i - 1]) {
            take_word_tail(&mut segments[i - 1])
        } else {
            String::new()
        };
        let tail = if ends_in_word && i + 1 < segments.len() && starts_with_word_segment(&segments[i + 1]) {
            take_word_head(&mut segments[i + 1])
        } else {
            String::new()
        };

        if let Segment::Edit { deleted, inserted } = &mut segments[i] {
            deleted.insert_str(0, &head);
            inserted.insert_str(0, &head);
            deleted.push_str(&tail);
            inserted.push_str(&tail);
        }
    }

    // Widening may have emptied equal runs; re-merge neighbours
    let mut out = Vec::with_capacity(segments.len());
    for seg in segments {
        push_segment(&mut out, seg);
    }
    out
}

fn ends_with_word_segment(seg: &Segment) -> bool {
    matches!(seg, Segment::Equal(t) if ends_with_word(t))
}

fn starts_with_word_segment(seg: &Segment) -> bool {
    matches!(seg, Segment::Equal(t) if starts_with_word(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::edit::{reconstruct_new, reconstruct_old};

    fn eq(s: &str) -> EditOp {
        EditOp::Equal(s.to_string())
    }
    fn del(s: &str) -> EditOp {
        EditOp::Delete(s.to_string())
    }
    fn ins(s: &str) -> EditOp {
        EditOp::Insert(s.to_string())
    }

    fn assert_preserves(raw: &[EditOp], cleaned: &[EditOp]) {
        assert_eq!(reconstruct_old(raw), reconstruct_old(cleaned));
        assert_eq!(reconstruct_new(raw), reconstruct_new(cleaned));
    }

    #[test]
    fn test_word_alignment_widens_digit_edit() {
        let raw = vec![eq("The fee is $1"), del("0"), ins("5"), eq("0.")];
        let cleaned = semantic_cleanup(raw.clone(), &DiffOptions::default());

        assert_eq!(
            cleaned,
            vec![eq("The fee is $"), del("100"), ins("150"), eq(".")]
        );
        assert_preserves(&raw, &cleaned);
    }

    #[test]
    fn test_alignment_can_be_disabled() {
        let raw = vec![eq("The fee is $1"), del("0"), ins("5"), eq("0.")];
        let opts = DiffOptions {
            align_to_words: false,
            ..DiffOptions::default()
        };
        let cleaned = semantic_cleanup(raw.clone(), &opts);
        assert_eq!(cleaned, raw);
    }

    #[test]
    fn test_short_equal_between_edits_is_absorbed() {
        // "cat sat" -> "dog ran": the shared " " is noise
        let raw = vec![del("cat"), ins("dog"), eq(" "), del("sat"), ins("ran")];
        let cleaned = semantic_cleanup(raw.clone(), &DiffOptions::default());

        assert_eq!(cleaned, vec![del("cat sat"), ins("dog ran")]);
        assert_preserves(&raw, &cleaned);
    }

    #[test]
    fn test_long_equal_between_edits_is_kept() {
        let raw = vec![
            del("a"),
            ins("b"),
            eq(" remains untouched here "),
            del("c"),
            ins("d"),
        ];
        let opts = DiffOptions {
            align_to_words: false,
            ..DiffOptions::default()
        };
        let cleaned = semantic_cleanup(raw.clone(), &opts);
        assert_eq!(cleaned, raw);
    }

    #[test]
    fn test_line_break_is_never_absorbed() {
        let raw = vec![del("x"), eq("\n"), del("y")];
        let opts = DiffOptions {
            align_to_words: false,
            ..DiffOptions::default()
        };
        let cleaned = semantic_cleanup(raw.clone(), &opts);
        assert_eq!(cleaned, raw);
    }

    #[test]
    fn test_absorption_cascades_leftwards() {
        // After folding the second gap, the merged edit is heavy enough to
        // swallow the first gap too.
        let raw = vec![
            del("abcd"),
            eq("xyzw"),
            del("c"),
            eq("q"),
            del("defghij"),
        ];
        let opts = DiffOptions {
            align_to_words: false,
            noise_max_chars: 1,
            ..DiffOptions::default()
        };
        let cleaned = semantic_cleanup(raw.clone(), &opts);
        assert_eq!(cleaned, vec![del("abcdxyzwcqdefghij")]);
        assert_preserves(&raw, &cleaned);
    }

    #[test]
    fn test_common_affixes_return_to_equal_runs() {
        // A fragmented insertion of "not " that absorbed a shared "t"
        let raw = vec![eq("shall "), ins("no"), eq("t"), ins(" t"), eq("erminate")];
        let cleaned = semantic_cleanup(raw.clone(), &DiffOptions::default());

        assert_eq!(
            cleaned,
            vec![eq("shall "), ins("not "), eq("terminate")]
        );
        assert_preserves(&raw, &cleaned);
    }

    #[test]
    fn test_identical_region_collapses() {
        let raw = vec![eq("a"), del("same"), ins("same"), eq("b")];
        let cleaned = semantic_cleanup(raw, &DiffOptions::default());
        assert_eq!(cleaned, vec![eq("asameb")]);
    }

    #[test]
    fn test_multibyte_affixes() {
        let raw = vec![del("我爱"), ins("我不爱")];
        let opts = DiffOptions {
            align_to_words: false,
            ..DiffOptions::default()
        };
        let cleaned = semantic_cleanup(raw.clone(), &opts);
        assert_eq!(cleaned, vec![eq("我"), ins("不"), eq("爱")]);
        assert_preserves(&raw, &cleaned);
    }
}
