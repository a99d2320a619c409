//! Merging the editorial feed with rows of template cards.
//!
//! Primary (editorial) cards are emitted one by one. After every
//! `group_every`-th primary card a row of up to `group_size` secondary cards
//! is inserted. The row's start cycles through the secondary list, but the
//! row itself is never wrapped past the end of the list, so rows near the end
//! of a short list may be shorter than `group_size`.

use serde::Serialize;

/// Default number of primary cards between secondary rows.
pub const DEFAULT_GROUP_EVERY: usize = 4;

/// Default number of secondary cards per row.
pub const DEFAULT_GROUP_SIZE: usize = 3;

/// One slot in the merged feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeedEntry<P, S> {
    Primary { card: P },
    Secondary { cards: Vec<S> },
}

impl<P, S> FeedEntry<P, S> {
    pub fn is_primary(&self) -> bool {
        matches!(self, FeedEntry::Primary { .. })
    }

    pub fn is_secondary(&self) -> bool {
        matches!(self, FeedEntry::Secondary { .. })
    }
}

/// What to do when the cadence never produced a secondary row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TailPolicy {
    /// Append one row of the first `group_size` secondary cards, so a short
    /// editorial feed still shows templates.
    #[default]
    AppendIfNoneInserted,
    /// Leave the feed as produced by the cadence alone.
    Never,
}

impl TailPolicy {
    /// Parse a policy name as used in query strings (`append` / `never`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "append" | "append_if_none_inserted" => Some(Self::AppendIfNoneInserted),
            "never" | "none" => Some(Self::Never),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterleaveOptions {
    pub group_every: usize,
    pub group_size: usize,
    pub tail: TailPolicy,
}

impl Default for InterleaveOptions {
    fn default() -> Self {
        Self {
            group_every: DEFAULT_GROUP_EVERY,
            group_size: DEFAULT_GROUP_SIZE,
            tail: TailPolicy::default(),
        }
    }
}

/// Merge `primary` and `secondary` into a single display order.
///
/// After the k-th primary card (1-indexed) with `k % group_every == 0`, the
/// row `secondary[start..start + group_size]` (clamped to the list end) is
/// inserted, where `start = ((k - 1) / group_every * group_size) % len`.
/// A zero `group_every` or `group_size` disables secondary rows entirely.
pub fn interleave<P, S: Clone>(
    primary: impl IntoIterator<Item = P>,
    secondary: &[S],
    opts: InterleaveOptions,
) -> Vec<FeedEntry<P, S>> {
    let InterleaveOptions {
        group_every,
        group_size,
        tail,
    } = opts;
    let rows_enabled = group_every > 0 && group_size > 0 && !secondary.is_empty();

    let mut out = Vec::new();
    let mut inserted = false;

    for (index, card) in primary.into_iter().enumerate() {
        out.push(FeedEntry::Primary { card });

        let k = index + 1;
        if !rows_enabled || k % group_every != 0 {
            continue;
        }

        // `(block * group_size) % len`, reduced first so huge sizes cannot overflow.
        let len = secondary.len();
        let block = (k - 1) / group_every;
        let start = ((block % len) * (group_size % len)) % len;
        let end = start.saturating_add(group_size).min(len);
        let row = &secondary[start..end];

        if !row.is_empty() {
            out.push(FeedEntry::Secondary {
                cards: row.to_vec(),
            });
            inserted = true;
        }
    }

    if rows_enabled && !inserted && tail == TailPolicy::AppendIfNoneInserted {
        let end = group_size.min(secondary.len());
        out.push(FeedEntry::Secondary {
            cards: secondary[..end].to_vec(),
        });
    }

    out
}
