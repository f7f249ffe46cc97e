//! Half-match shortcut: split both texts around a long shared substring.
//!
//! When the two texts share a substring at least half as long as the longer
//! text, diffing the fragments on either side independently is much faster
//! than a full bisection, at the cost of the minimality guarantee.

use crate::affix::{common_prefix, common_suffix, find};
use crate::deadline::Deadline;

/// The fragments of both texts around a shared middle.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct HalfMatch<'a, T> {
    pub old_prefix: &'a [T],
    pub old_suffix: &'a [T],
    pub new_prefix: &'a [T],
    pub new_suffix: &'a [T],
    pub common: &'a [T],
}

/// Candidate split in terms of the longer and shorter text.
struct Candidate<'a, T> {
    long_prefix: &'a [T],
    long_suffix: &'a [T],
    short_prefix: &'a [T],
    short_suffix: &'a [T],
    common: &'a [T],
}

/// Look for a shared substring at least half the length of the longer text.
///
/// Only attempted under a limited deadline: with unlimited time the optimal
/// bisection result is always preferred.
pub(crate) fn half_match<'a, T: PartialEq>(
    old: &'a [T],
    new: &'a [T],
    deadline: Deadline,
) -> Option<HalfMatch<'a, T>> {
    if !deadline.is_limited() {
        return None;
    }

    let old_is_long = old.len() > new.len();
    let (long, short) = if old_is_long { (old, new) } else { (new, old) };
    if long.len() < 4 || short.len() * 2 < long.len() {
        return None;
    }

    // Seeds at the second and third quarters of the longer text.
    let first = half_match_at(long, short, long.len().div_ceil(4));
    let second = half_match_at(long, short, long.len().div_ceil(2));
    let best = match (first, second) {
        (None, None) => return None,
        (Some(c), None) | (None, Some(c)) => c,
        (Some(a), Some(b)) => {
            if a.common.len() > b.common.len() {
                a
            } else {
                b
            }
        }
    };

    Some(if old_is_long {
        HalfMatch {
            old_prefix: best.long_prefix,
            old_suffix: best.long_suffix,
            new_prefix: best.short_prefix,
            new_suffix: best.short_suffix,
            common: best.common,
        }
    } else {
        HalfMatch {
            old_prefix: best.short_prefix,
            old_suffix: best.short_suffix,
            new_prefix: best.long_prefix,
            new_suffix: best.long_suffix,
            common: best.common,
        }
    })
}

/// Probe a quarter-length seed of `long` starting at `start` against every
/// occurrence in `short`, extending each hit outward.
fn half_match_at<'a, T: PartialEq>(
    long: &'a [T],
    short: &'a [T],
    start: usize,
) -> Option<Candidate<'a, T>> {
    let seed = &long[start..start + long.len() / 4];
    let mut best: Option<Candidate<'a, T>> = None;
    let mut best_len = 0;

    let mut from = 0;
    while let Some(j) = find(short, seed, from) {
        let prefix_len = common_prefix(&long[start..], &short[j..]);
        let suffix_len = common_suffix(&long[..start], &short[..j]);
        if best_len < prefix_len + suffix_len {
            best_len = prefix_len + suffix_len;
            best = Some(Candidate {
                long_prefix: &long[..start - suffix_len],
                long_suffix: &long[start + prefix_len..],
                short_prefix: &short[..j - suffix_len],
                short_suffix: &short[j + prefix_len..],
                common: &short[j - suffix_len..j + prefix_len],
            });
        }
        from = j + 1;
    }

    best.filter(|c| c.common.len() * 2 >= long.len())
}
