//! Change chunker.
//!
//! Folds an edit script into [`ChangeRecord`]s small enough to scan in a
//! change list, and computes [`Stats`] from the raw script.
//!
//! Consecutive inserts accumulate into a pending addition, consecutive
//! deletes into a pending deletion. A pending buffer becomes a record when
//! an equal run arrives, when it grows past [`ChunkOptions::max_chars`], or
//! when it contains a line break. Stats are counted from the script itself,
//! so splitting or merging records never skews them.
//!
//! A record's `after` context is the head of the next equal run, unless
//! another edit of the same kind continues it first. A record split off by
//! the size or line-break rule is followed by more changed text, so its
//! `after` stays empty.

use doccompare_core_types::ChangeId;

use crate::config::ChunkOptions;
use crate::model::{ChangeContext, ChangeKind, ChangeRecord, EditOp, Stats};

/// A buffer that has been opened but not yet flushed
struct Pending {
    text: String,
    chars: usize,
    position: usize,
    before: String,
}

/// A flushed record still waiting for its trailing context
struct Draft {
    kind: ChangeKind,
    text: String,
    position: usize,
    before: String,
    after: String,
}

#[derive(Default)]
struct Chunker {
    offset: usize,
    /// Tail of the most recent equal run, already cut to the context budget
    last_equal: String,
    addition: Option<Pending>,
    deletion: Option<Pending>,
    drafts: Vec<Draft>,
    /// Indices into `drafts` whose `after` is filled by the next equal run
    awaiting_after: Vec<usize>,
    stats: Stats,
}

fn tail_chars(text: &str, n: usize) -> String {
    let len = text.chars().count();
    text.chars().skip(len.saturating_sub(n)).collect()
}

fn head_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

impl Chunker {
    fn pending_mut(&mut self, kind: ChangeKind) -> &mut Option<Pending> {
        match kind {
            ChangeKind::Addition => &mut self.addition,
            ChangeKind::Deletion => &mut self.deletion,
        }
    }

    fn push_edit(&mut self, kind: ChangeKind, text: &str, opts: &ChunkOptions) {
        let chars = text.chars().count();
        let offset = self.offset;
        let before = self.last_equal.clone();

        if self.pending_mut(kind).is_none() {
            let drafts = &self.drafts;
            self.awaiting_after.retain(|&idx| drafts[idx].kind != kind);
        }

        let pending = self.pending_mut(kind).get_or_insert_with(|| Pending {
            text: String::new(),
            chars: 0,
            position: offset,
            before,
        });
        pending.text.push_str(text);
        pending.chars += chars;
        let overflow = pending.chars > opts.max_chars || pending.text.contains('\n');

        self.offset += chars;
        if overflow {
            self.flush(kind);
        }
    }

    fn push_equal(&mut self, text: &str, opts: &ChunkOptions) {
        self.flush(ChangeKind::Deletion);
        self.flush(ChangeKind::Addition);

        if !self.awaiting_after.is_empty() {
            let after = head_chars(text, opts.context_chars);
            for idx in self.awaiting_after.drain(..) {
                self.drafts[idx].after = after.clone();
            }
        }

        self.last_equal = tail_chars(text, opts.context_chars);
        self.offset += text.chars().count();
    }

    fn flush(&mut self, kind: ChangeKind) {
        let Some(pending) = self.pending_mut(kind).take() else {
            return;
        };
        let trimmed = pending.text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.awaiting_after.push(self.drafts.len());
        self.drafts.push(Draft {
            kind,
            text: trimmed.to_string(),
            position: pending.position,
            before: pending.before,
            after: String::new(),
        });
    }

    fn finish(mut self) -> (Vec<ChangeRecord>, Stats) {
        self.flush(ChangeKind::Deletion);
        self.flush(ChangeKind::Addition);

        // A deletion buffer can stay open across inserts and flush after a
        // later-opened addition; restore document order.
        self.drafts.sort_by_key(|d| d.position);

        let records: Vec<ChangeRecord> = self
            .drafts
            .into_iter()
            .enumerate()
            .map(|(ordinal, d)| ChangeRecord {
                id: ChangeId::from_ordinal(ordinal),
                kind: d.kind,
                text: d.text,
                context: ChangeContext {
                    before: d.before,
                    after: d.after,
                },
                position: d.position,
            })
            .collect();

        let mut stats = self.stats;
        stats.total_changes = records.len();
        (records, stats)
    }
}

/// Coalesce an edit script into change records and compute statistics
///
/// Records come back in document order with strictly increasing
/// `position`, ids `change-0`, `change-1`, ... in that order.
pub fn chunk(ops: &[EditOp], opts: &ChunkOptions) -> (Vec<ChangeRecord>, Stats) {
    let mut chunker = Chunker::default();

    for op in ops {
        match op {
            EditOp::Equal(text) => {
                chunker.stats.unchanged += text.chars().count();
                chunker.push_equal(text, opts);
            }
            EditOp::Insert(text) => {
                chunker.stats.additions += text.chars().count();
                chunker.push_edit(ChangeKind::Addition, text, opts);
            }
            EditOp::Delete(text) => {
                chunker.stats.deletions += text.chars().count();
                chunker.push_edit(ChangeKind::Deletion, text, opts);
            }
        }
    }

    let (records, stats) = chunker.finish();
    tracing::debug!(
        ops = ops.len(),
        changes = records.len(),
        additions = stats.additions,
        deletions = stats.deletions,
        "edit script chunked"
    );
    (records, stats)
}
