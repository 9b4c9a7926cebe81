//! Block-at-a-time decoding of a [`UidPack`].

use crate::{Uid, UidBlock, UidPack};

/// Where [`Decoder::seek`] starts looking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekFrom {
    /// Consider every block of the list.
    Start,
    /// Only the current block and those after it; never moves backwards.
    Current,
}

/// Decoding cursor over a [`UidPack`].
///
/// Holds exactly one materialized block. `uids()` is the current block, possibly trimmed
/// at the front by [`seek`](Decoder::seek). Once past the last block, `uids()` is empty
/// and `block_idx()` equals the block count.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    pack: &'a UidPack,
    block_idx: usize,
    uids: Vec<Uid>,
}

impl<'a> Decoder<'a> {
    /// Open a decoder positioned at the first block.
    pub fn new(pack: &'a UidPack) -> Self {
        let mut dec = Self::unloaded(pack);
        dec.load(0);
        dec
    }

    /// Open a decoder already sought to the first uid `>= target`.
    ///
    /// Same as [`new`](Decoder::new) followed by a [`SeekFrom::Start`] seek, but only the
    /// target block is decoded.
    pub fn starting_at(pack: &'a UidPack, target: Uid) -> Self {
        let mut dec = Self::unloaded(pack);
        dec.seek(target, SeekFrom::Start);
        dec
    }

    fn unloaded(pack: &'a UidPack) -> Self {
        // Full blocks all share the first block's length.
        let cap = pack
            .blocks()
            .first()
            .map_or(0, UidBlock::num_uids)
            .min(pack.block_size());
        Self {
            pack,
            block_idx: 0,
            uids: Vec::with_capacity(cap),
        }
    }

    /// The list being decoded.
    pub fn pack(&self) -> &'a UidPack {
        self.pack
    }

    /// Decoded uids of the current block.
    pub fn uids(&self) -> &[Uid] {
        &self.uids
    }

    /// True while the cursor addresses a block with uids left.
    pub fn valid(&self) -> bool {
        !self.uids.is_empty()
    }

    /// Index of the current block.
    pub fn block_idx(&self) -> usize {
        self.block_idx
    }

    /// Move to the next block. Returns false once the list is exhausted.
    pub fn next_block(&mut self) -> bool {
        if self.block_idx < self.pack.num_blocks() {
            self.load(self.block_idx + 1);
        }
        self.valid()
    }

    /// Re-decode the current block in full, undoing any trimming done by `seek`.
    pub fn unpack_block(&mut self) -> &[Uid] {
        self.load(self.block_idx);
        &self.uids
    }

    /// Position at the first uid `>= target`.
    ///
    /// The block is chosen from block bases alone; only that block is decoded. If every
    /// uid in it is below `target`, the cursor moves on to the next block.
    pub fn seek(&mut self, target: Uid, from: SeekFrom) -> &[Uid] {
        let blocks = self.pack.blocks();
        let lo = match from {
            SeekFrom::Start => 0,
            SeekFrom::Current => self.block_idx.min(blocks.len()),
        };
        // First block (at or after `lo`) whose base exceeds the target.
        let above = lo + blocks[lo..].partition_point(|b| b.base() <= target);
        let idx = above.saturating_sub(1).max(lo);

        if from == SeekFrom::Start || idx != self.block_idx {
            self.load(idx);
        }
        let skip = self.uids.partition_point(|&uid| uid < target);
        self.uids.drain(..skip);
        if self.uids.is_empty() {
            self.next_block();
        }
        &self.uids
    }

    fn load(&mut self, idx: usize) {
        self.block_idx = idx.min(self.pack.num_blocks());
        self.uids.clear();
        if let Some(block) = self.pack.blocks().get(self.block_idx) {
            block.unpack_into(&mut self.uids);
        }
    }
}

/// Iterator over every uid of a pack, decoding lazily block by block.
#[derive(Debug, Clone)]
pub struct Uids<'a> {
    dec: Decoder<'a>,
    idx: usize,
}

impl<'a> Uids<'a> {
    pub(crate) fn new(dec: Decoder<'a>) -> Self {
        Self { dec, idx: 0 }
    }
}

impl Iterator for Uids<'_> {
    type Item = Uid;

    fn next(&mut self) -> Option<Uid> {
        while self.idx >= self.dec.uids().len() {
            if !self.dec.next_block() {
                return None;
            }
            self.idx = 0;
        }
        let uid = self.dec.uids()[self.idx];
        self.idx += 1;
        Some(uid)
    }
}
