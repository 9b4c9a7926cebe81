//! Intersection (AND) of packed uid lists.

use std::cmp::Ordering;

use uidpack_codec::{Encoder, UidPack, DEFAULT_BLOCK_SIZE};

use crate::cursor::Cursor;

/// Linear intersection of two packed lists.
///
/// Either side absent gives an absent result. The output adopts `u`'s block size.
/// Runs in `O(|u| + |v|)`: on a mismatch the lagging side skips ahead past every uid
/// below the other head, by whole blocks when possible.
pub fn intersect<'u, 'v>(
    u: impl Into<Option<&'u UidPack>>,
    v: impl Into<Option<&'v UidPack>>,
) -> Option<UidPack> {
    let (u, v) = (u.into()?, v.into()?);

    let mut out = Encoder::new(u.block_size());
    let mut uc = Cursor::new(u);
    let mut vc = Cursor::new(v);

    // Sorted inputs: once either side runs out, no further match is possible.
    while let (Some(a), Some(b)) = (uc.current(), vc.current()) {
        match a.cmp(&b) {
            Ordering::Equal => {
                out.push(a);
                uc.advance();
                vc.advance();
            }
            Ordering::Greater => vc.skip_below(a),
            Ordering::Less => uc.skip_below(b),
        }
    }
    Some(out.finish())
}

/// A list paired with its exact length, for ordering by size.
struct ListInfo<'a> {
    list: Option<&'a UidPack>,
    len: usize,
}

/// Intersection of many packed lists, smallest first.
///
/// - no lists: an empty list with [`DEFAULT_BLOCK_SIZE`]
/// - one list: a copy of it (absent stays absent)
/// - otherwise: pairwise [`intersect`] folded in ascending size order, stopping as soon
///   as the running result is empty. Any absent operand makes the result absent.
///
/// The result adopts the block size of the smallest operand.
pub fn intersect_sorted<'a, I>(lists: I) -> Option<UidPack>
where
    I: IntoIterator,
    I::Item: Into<Option<&'a UidPack>>,
{
    let mut ls: Vec<ListInfo<'a>> = lists
        .into_iter()
        .map(|l| {
            let list: Option<&'a UidPack> = l.into();
            ListInfo {
                list,
                len: list.map_or(0, UidPack::exact_len),
            }
        })
        .collect();

    match ls.len() {
        0 => return Some(UidPack::empty(DEFAULT_BLOCK_SIZE)),
        1 => return ls[0].list.cloned(),
        _ => {}
    }

    // Stable: equal sizes keep caller order.
    ls.sort_by_key(|l| l.len);
    tracing::trace!(
        lens = ?ls.iter().map(|l| l.len).collect::<Vec<_>>(),
        "intersecting smallest first"
    );

    let mut acc = intersect(ls[0].list, ls[1].list);
    for (i, info) in ls.iter().enumerate().skip(2) {
        let Some(cur) = acc.as_ref().filter(|p| !p.is_empty()) else {
            tracing::trace!(folded = i, total = ls.len(), "intersection empty, stopping early");
            break;
        };
        acc = intersect(cur, info.list);
    }
    acc
}
