//! The packed uid list container.

use crate::encoder::clamp_block_size;
use crate::{Decoder, Encoder, Error, Uid, UidBlock, Uids};

/// A block-compressed, sorted, duplicate-free list of uids.
///
/// Every block except possibly the last holds exactly `block_size` uids. The type is
/// immutable once built: produce one with [`Encoder`] or [`UidPack::from_sorted`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawUidPack"))]
pub struct UidPack {
    block_size: u32,
    blocks: Vec<UidBlock>,
}

/// Unvalidated wire shape; deserialization goes through [`UidPack::validate`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawUidPack {
    block_size: u32,
    blocks: Vec<UidBlock>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawUidPack> for UidPack {
    type Error = Error;

    fn try_from(raw: RawUidPack) -> Result<Self, Self::Error> {
        let pack = UidPack {
            block_size: raw.block_size,
            blocks: raw.blocks,
        };
        pack.validate()?;
        Ok(pack)
    }
}

impl UidPack {
    /// A structurally present list with no blocks.
    ///
    /// The block size is clamped into `1..=MAX_BLOCK_SIZE`, like [`Encoder::new`].
    pub fn empty(block_size: usize) -> Self {
        Self {
            block_size: clamp_block_size(block_size),
            blocks: Vec::new(),
        }
    }

    pub(crate) fn from_blocks(block_size: usize, blocks: Vec<UidBlock>) -> Self {
        Self {
            block_size: clamp_block_size(block_size),
            blocks,
        }
    }

    /// Build a pack from a slice, checking that it is strictly increasing.
    pub fn from_sorted(uids: &[Uid], block_size: usize) -> Result<Self, Error> {
        if block_size == 0 {
            return Err(Error::ZeroBlockSize);
        }
        if let Some(i) = uids.windows(2).position(|w| w[1] <= w[0]) {
            return Err(Error::NotStrictlyIncreasing {
                index: i + 1,
                prev: uids[i],
                next: uids[i + 1],
            });
        }
        let mut enc = Encoder::new(block_size);
        enc.extend_from_slice(uids);
        Ok(enc.finish())
    }

    /// Target uids per block.
    pub fn block_size(&self) -> usize {
        self.block_size as usize
    }

    /// All blocks, in ascending uid order.
    pub fn blocks(&self) -> &[UidBlock] {
        &self.blocks
    }

    /// Number of blocks.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// True if the list holds no uids.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Exact uid count, summed from per-block recorded counts (no decoding).
    pub fn exact_len(&self) -> usize {
        self.blocks.iter().map(UidBlock::num_uids).sum()
    }

    /// Upper bound on the uid count: `num_blocks * block_size`.
    pub fn approx_len(&self) -> usize {
        self.blocks.len() * self.block_size()
    }

    /// Iterate every uid, decoding one block at a time.
    pub fn iter(&self) -> Uids<'_> {
        Uids::new(Decoder::new(self))
    }

    /// Decode the whole list.
    pub fn to_vec(&self) -> Vec<Uid> {
        let mut out = Vec::with_capacity(self.exact_len());
        for block in &self.blocks {
            block.unpack_into(&mut out);
        }
        out
    }

    /// Check every structural invariant of the packed format.
    ///
    /// Packs produced by [`Encoder`] always pass. Use this on packs from untrusted bytes.
    pub fn validate(&self) -> Result<(), Error> {
        if self.block_size == 0 {
            return Err(Error::ZeroBlockSize);
        }
        let last_block = self.blocks.len().saturating_sub(1);
        let mut prev: Option<Uid> = None;
        for (i, block) in self.blocks.iter().enumerate() {
            let uids = block.try_unpack(i)?;
            if uids.len() > self.block_size()
                || (i < last_block && uids.len() != self.block_size())
            {
                return Err(Error::BadBlockLength {
                    block: i,
                    len: uids.len(),
                    block_size: self.block_size(),
                });
            }
            if let (Some(p), Some(&first)) = (prev, uids.first()) {
                if first <= p {
                    return Err(Error::BlocksOutOfOrder { block: i });
                }
            }
            prev = uids.last().copied();
        }
        Ok(())
    }

    /// Serialize with `postcard`.
    #[cfg(feature = "persistence")]
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        postcard::to_allocvec(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize with `postcard`, validating the result.
    #[cfg(feature = "persistence")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        postcard::from_bytes(bytes).map_err(|e| Error::Serialization(e.to_string()))
    }
}

impl<'a> IntoIterator for &'a UidPack {
    type Item = Uid;
    type IntoIter = Uids<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
