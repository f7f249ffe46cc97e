//! Common prefix, suffix and overlap measurements over symbol slices.

/// Length of the common prefix of `a` and `b`.
pub(crate) fn common_prefix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Length of the common suffix of `a` and `b`.
pub(crate) fn common_suffix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Length of the longest suffix of `a` that is also a prefix of `b`.
pub(crate) fn common_overlap<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let len = a.len().min(b.len());
    if len == 0 {
        return 0;
    }
    let a = &a[a.len() - len..];
    let b = &b[..len];
    if a == b {
        return len;
    }

    // Grow a candidate suffix of `a`, jumping ahead to wherever it next
    // occurs in `b`.
    let mut best = 0;
    let mut length = 1;
    while length <= len {
        let pattern = &a[len - length..];
        let Some(found) = find(b, pattern, 0) else {
            return best;
        };
        length += found;
        if length > len {
            break;
        }
        if found == 0 || a[len - length..] == b[..length] {
            best = length;
            length += 1;
        }
    }
    best
}

/// Index of the first occurrence of `needle` in `haystack` at or after `from`.
pub(crate) fn find<T: PartialEq>(haystack: &[T], needle: &[T], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(from);
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}
