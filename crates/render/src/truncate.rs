//! Output budget enforcement.
//!
//! Two strategies share one ceiling:
//! - [`truncate_prefix`] binary-searches the longest item prefix whose serialization fits
//!   (homogeneous rows: json arrays, csv, facet lists);
//! - [`truncate_blocks`] greedily packs pre-rendered markdown blocks and hard-cuts the first
//!   block that overflows when enough budget remains.

/// Minimum remaining budget for a partial block to be worth including.
const MIN_PARTIAL_CHARS: usize = 100;

const ELLIPSIS: char = '…';

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `input` to at most `max_chars` characters on a char boundary.
pub fn truncate_to_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((cut_byte, _)) => &input[..cut_byte],
        None => input,
    }
}

pub fn truncation_notice(shown: usize, total: usize, max_chars: usize) -> String {
    format!(
        "⚠️ Response truncated at {max_chars} characters (showing {shown} of {total} items). \
         Reduce `size` or add filters to narrow the results."
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTruncation {
    pub text: String,
    /// Number of leading items included in `text`.
    pub count: usize,
    pub truncated: bool,
}

/// Serializes the longest prefix of `items` that fits in `max_chars`.
///
/// Precondition: the character length of `serialize(&items[..k])` must be non-decreasing in
/// `k`. Json-array and csv-row composition satisfy this; with a non-monotonic serializer the
/// returned prefix fits but may not be the longest.
///
/// The full serialization is tried first and returned unchanged when it fits. Otherwise the
/// result is the maximal `k` such that `serialize(&items[..k])` fits, so `k + 1` items always
/// overflow.
pub fn truncate_prefix<T, E, F>(
    items: &[T],
    max_chars: usize,
    mut serialize: F,
) -> Result<PrefixTruncation, E>
where
    F: FnMut(&[T]) -> Result<String, E>,
{
    let full = serialize(items)?;
    if char_len(&full) <= max_chars {
        return Ok(PrefixTruncation {
            text: full,
            count: items.len(),
            truncated: false,
        });
    }

    // `lo` is the best known prefix (0 is the floor even if it does not fit), `hi` is known
    // to overflow.
    let mut lo = 0usize;
    let mut hi = items.len();
    let mut best = serialize(&items[..0])?;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        let candidate = serialize(&items[..mid])?;
        if char_len(&candidate) <= max_chars {
            lo = mid;
            best = candidate;
        } else {
            hi = mid;
        }
    }

    log::debug!(
        "prefix truncation kept {lo} of {} items under {max_chars} chars",
        items.len()
    );
    Ok(PrefixTruncation {
        text: best,
        count: lo,
        truncated: true,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTruncation {
    /// Kept blocks, followed by the notice block when truncated.
    pub blocks: Vec<String>,
    /// Number of source blocks included fully or partially.
    pub kept: usize,
    pub truncated: bool,
}

/// Greedy packing for heterogeneous markdown blocks.
///
/// Not optimal: a short block after an overflowing one is never pulled forward.
pub fn truncate_blocks(blocks: Vec<String>, max_chars: usize) -> BlockTruncation {
    let total = blocks.len();
    let total_chars: usize = blocks.iter().map(|b| char_len(b)).sum();
    if total_chars <= max_chars {
        return BlockTruncation {
            blocks,
            kept: total,
            truncated: false,
        };
    }

    let mut used = 0usize;
    let mut out = Vec::with_capacity(total + 1);
    for block in blocks {
        let len = char_len(&block);
        if used + len <= max_chars {
            used += len;
            out.push(block);
            continue;
        }
        let remaining = max_chars - used;
        if remaining > MIN_PARTIAL_CHARS {
            let mut partial = truncate_to_chars(&block, remaining - 1).to_string();
            partial.push(ELLIPSIS);
            out.push(partial);
        }
        break;
    }

    let kept = out.len();
    log::debug!("block truncation kept {kept} of {total} blocks under {max_chars} chars");
    out.push(truncation_notice(kept, total, max_chars));
    BlockTruncation {
        blocks: out,
        kept,
        truncated: true,
    }
}
