//! Streaming builder for [`UidPack`].

use crate::{Uid, UidBlock, UidPack};

/// Default uids per block for lists built without an input to inherit from.
pub const DEFAULT_BLOCK_SIZE: usize = 10;

/// Largest block size a pack can record. Larger requests are clamped to it.
pub const MAX_BLOCK_SIZE: usize = u32::MAX as usize;

/// Upper bound on the up-front reservation for the pending block.
const PENDING_RESERVE: usize = 256;

/// Clamp a requested block size into `1..=MAX_BLOCK_SIZE`.
pub(crate) fn clamp_block_size(block_size: usize) -> u32 {
    u32::try_from(block_size.max(1)).unwrap_or(u32::MAX)
}

/// Configuration for freshly built packs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackConfig {
    /// Uids per block. Zero is treated as one, values above [`MAX_BLOCK_SIZE`] as the
    /// maximum.
    pub block_size: usize,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

/// Accumulates ascending uids and cuts them into blocks of `block_size`.
///
/// The caller guarantees strictly ascending input; this is only checked in debug builds.
#[derive(Debug)]
pub struct Encoder {
    block_size: usize,
    pending: Vec<Uid>,
    blocks: Vec<UidBlock>,
    last: Option<Uid>,
}

impl Encoder {
    /// Create an encoder producing blocks of `block_size` uids.
    ///
    /// The block size is clamped into `1..=MAX_BLOCK_SIZE`. The pending buffer grows with
    /// the input, so a huge block size costs nothing until uids arrive.
    pub fn new(block_size: usize) -> Self {
        let block_size = clamp_block_size(block_size) as usize;
        Self {
            block_size,
            pending: Vec::with_capacity(block_size.min(PENDING_RESERVE)),
            blocks: Vec::new(),
            last: None,
        }
    }

    /// Create an encoder from a [`PackConfig`].
    pub fn with_config(cfg: &PackConfig) -> Self {
        Self::new(cfg.block_size)
    }

    /// Append one uid.
    pub fn push(&mut self, uid: Uid) {
        debug_assert!(
            self.last.map_or(true, |last| uid > last),
            "encoder input must be strictly increasing: {:?} then {uid}",
            self.last
        );
        self.last = Some(uid);
        self.pending.push(uid);
        if self.pending.len() == self.block_size {
            self.pack_block();
        }
    }

    /// Append a run of ascending uids.
    pub fn extend_from_slice(&mut self, uids: &[Uid]) {
        for &uid in uids {
            self.push(uid);
        }
    }

    /// Uids appended so far.
    pub fn len(&self) -> usize {
        self.blocks.len() * self.block_size + self.pending.len()
    }

    /// True if nothing was appended.
    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// Flush the partial block and produce the immutable pack.
    pub fn finish(mut self) -> UidPack {
        self.pack_block();
        UidPack::from_blocks(self.block_size, self.blocks)
    }

    fn pack_block(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        self.blocks.push(UidBlock::pack(&self.pending));
        self.pending.clear();
    }
}

impl Extend<Uid> for Encoder {
    fn extend<I: IntoIterator<Item = Uid>>(&mut self, iter: I) {
        for uid in iter {
            self.push(uid);
        }
    }
}

impl FromIterator<Uid> for UidPack {
    /// Builds with [`PackConfig::default`]. Input must be strictly ascending.
    fn from_iter<I: IntoIterator<Item = Uid>>(iter: I) -> Self {
        let mut enc = Encoder::with_config(&PackConfig::default());
        enc.extend(iter);
        enc.finish()
    }
}
