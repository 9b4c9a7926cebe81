//! K-way union (OR) of packed uid lists.

use std::cmp::Reverse;
use std::collections::binary_heap::{BinaryHeap, PeekMut};

use uidpack_codec::{Encoder, Uid, UidPack, DEFAULT_BLOCK_SIZE};

use crate::cursor::Cursor;

/// Head of one source list. Ordered by value; ties between sources are arbitrary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct HeapElem {
    val: Uid,
    list_idx: usize,
}

/// Sorted, duplicate-free union of any number of packed lists.
///
/// Absent and empty entries are skipped. The output adopts the block size of the first
/// non-empty list, or [`DEFAULT_BLOCK_SIZE`] when there is none.
///
/// A min-heap holds the head of every source that still has uids; the root is always the
/// global minimum. Equal heads from different sources are coalesced by comparing against
/// the last uid written. `O(N log k)` for `N` total uids over `k` sources.
pub fn merge_sorted<'a, I>(lists: I) -> UidPack
where
    I: IntoIterator,
    I::Item: Into<Option<&'a UidPack>>,
{
    let mut cursors: Vec<Cursor<'a>> = Vec::new();
    let mut heap: BinaryHeap<Reverse<HeapElem>> = BinaryHeap::new();
    let mut block_size = None;

    for list in lists {
        let list: Option<&'a UidPack> = list.into();
        let Some(list) = list else {
            continue;
        };
        let cursor = Cursor::new(list);
        let Some(val) = cursor.current() else {
            continue;
        };
        block_size.get_or_insert(list.block_size());
        heap.push(Reverse(HeapElem {
            val,
            list_idx: cursors.len(),
        }));
        cursors.push(cursor);
    }
    tracing::trace!(sources = heap.len(), "merging packed lists");

    let mut out = Encoder::new(block_size.unwrap_or(DEFAULT_BLOCK_SIZE));
    let mut last: Option<Uid> = None;

    while let Some(mut top) = heap.peek_mut() {
        let HeapElem { val, list_idx } = top.0;
        if last != Some(val) {
            out.push(val);
            last = Some(val);
        }

        let cursor = &mut cursors[list_idx];
        cursor.advance();
        match cursor.current() {
            // Dropping `top` sifts the replaced root back into place.
            Some(next) => top.0.val = next,
            None => {
                PeekMut::pop(top);
            }
        }
    }
    out.finish()
}
