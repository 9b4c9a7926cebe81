//! Block-crossing cursor shared by every set operation.
//!
//! Invariant: after any public method returns, either `idx` addresses a uid in the
//! decoder's current block, or the list is exhausted. Empty blocks are skipped eagerly,
//! so callers never see a block boundary.

use uidpack_codec::{Decoder, Encoder, SeekFrom, Uid, UidPack};

pub(crate) struct Cursor<'a> {
    dec: Decoder<'a>,
    idx: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(pack: &'a UidPack) -> Self {
        let mut c = Self {
            dec: Decoder::new(pack),
            idx: 0,
        };
        c.refill();
        c
    }

    /// Current head, or `None` once every block is consumed.
    pub(crate) fn current(&self) -> Option<Uid> {
        self.dec.uids().get(self.idx).copied()
    }

    pub(crate) fn advance(&mut self) {
        self.idx += 1;
        self.refill();
    }

    /// Skip every uid strictly below `target`.
    ///
    /// Gallops inside the loaded block; if the whole block is below `target`, seeks forward
    /// by block base so the blocks in between are never decoded.
    pub(crate) fn skip_below(&mut self, target: Uid) {
        let block = self.dec.uids();
        self.idx = gallop(block, self.idx, target);
        if self.idx == block.len() {
            self.dec.seek(target, SeekFrom::Current);
            self.idx = 0;
        }
    }

    /// Copy every uid strictly below `target` into `out`, crossing blocks as needed.
    pub(crate) fn copy_below(&mut self, target: Uid, out: &mut Encoder) {
        loop {
            let block = self.dec.uids();
            let end = gallop(block, self.idx, target);
            out.extend_from_slice(&block[self.idx..end]);
            let at_block_end = end == block.len();
            self.idx = end;
            if !at_block_end {
                return;
            }
            self.refill();
            if self.current().is_none() {
                return;
            }
        }
    }

    /// Copy everything that is left, through the last block.
    pub(crate) fn drain_into(&mut self, out: &mut Encoder) {
        while self.current().is_some() {
            out.extend_from_slice(&self.dec.uids()[self.idx..]);
            self.idx = self.dec.uids().len();
            self.refill();
        }
    }

    fn refill(&mut self) {
        while self.idx >= self.dec.uids().len() {
            if !self.dec.next_block() {
                return;
            }
            self.idx = 0;
        }
    }
}

/// Index of the first element of `block[from..]` that is `>= target` (exponential search).
fn gallop(block: &[Uid], from: usize, target: Uid) -> usize {
    if from >= block.len() || block[from] >= target {
        return from.min(block.len());
    }
    // block[lo] < target holds throughout.
    let mut lo = from;
    let mut step = 1;
    while lo + step < block.len() && block[lo + step] < target {
        lo += step;
        step *= 2;
    }
    let hi = (lo + step + 1).min(block.len());
    lo + 1 + block[lo + 1..hi].partition_point(|&uid| uid < target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pack(uids: &[Uid], block_size: usize) -> UidPack {
        UidPack::from_sorted(uids, block_size).unwrap()
    }

    fn rest(c: &mut Cursor<'_>) -> Vec<Uid> {
        let mut out = Vec::new();
        while let Some(uid) = c.current() {
            out.push(uid);
            c.advance();
        }
        out
    }

    #[test]
    fn gallop_finds_partition_point() {
        let block = [1u64, 3, 5, 7, 9, 11, 13];
        assert_eq!(gallop(&block, 0, 0), 0);
        assert_eq!(gallop(&block, 0, 8), 4);
        assert_eq!(gallop(&block, 2, 5), 2);
        assert_eq!(gallop(&block, 2, 14), 7);
        assert_eq!(gallop(&block, 7, 1), 7);
        assert_eq!(gallop(&[], 0, 1), 0);
    }

    #[test]
    fn advance_crosses_block_boundaries() {
        let p = pack(&[1, 2, 3, 4, 5], 2);
        let mut c = Cursor::new(&p);
        assert_eq!(rest(&mut c), vec![1, 2, 3, 4, 5]);
        assert_eq!(c.current(), None);
        c.advance();
        assert_eq!(c.current(), None);
    }

    #[test]
    fn empty_pack_starts_exhausted() {
        let p = UidPack::empty(3);
        let c = Cursor::new(&p);
        assert_eq!(c.current(), None);
    }

    #[test]
    fn skip_below_jumps_whole_blocks() {
        let p = pack(&(0..100).map(|x| x * 2).collect::<Vec<_>>(), 4);
        let mut c = Cursor::new(&p);
        c.skip_below(51);
        assert_eq!(c.current(), Some(52));
        c.skip_below(52);
        assert_eq!(c.current(), Some(52));
        c.skip_below(1_000);
        assert_eq!(c.current(), None);
    }

    #[test]
    fn copy_below_spans_blocks_and_stops_at_target() {
        let p = pack(&[1, 2, 3, 4, 5, 6, 7], 2);
        let mut c = Cursor::new(&p);
        let mut enc = Encoder::new(2);
        c.copy_below(6, &mut enc);
        assert_eq!(c.current(), Some(6));
        assert_eq!(enc.finish().to_vec(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn drain_copies_all_remaining_blocks() {
        let p = pack(&[1, 2, 3, 4, 5, 6, 7], 3);
        let mut c = Cursor::new(&p);
        c.advance();
        let mut enc = Encoder::new(3);
        c.drain_into(&mut enc);
        assert_eq!(c.current(), None);
        assert_eq!(enc.finish().to_vec(), vec![2, 3, 4, 5, 6, 7]);
    }

    proptest! {
        #[test]
        fn skip_below_matches_linear_scan(
            mut uids in prop::collection::vec(0u64..5_000, 0..300),
            block_size in 1usize..20,
            mut targets in prop::collection::vec(0u64..5_100, 0..20),
        ) {
            uids.sort_unstable();
            uids.dedup();
            targets.sort_unstable();
            let p = pack(&uids, block_size);
            let mut c = Cursor::new(&p);
            for t in targets {
                c.skip_below(t);
                let expected = uids.iter().copied().find(|&u| u >= t);
                prop_assert_eq!(c.current(), expected);
            }
        }
    }
}
