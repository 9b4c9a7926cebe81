//! A single independently decodable block of a packed uid list.

use crate::{varint, Error, Uid};

/// One block of a [`UidPack`](crate::UidPack).
///
/// Layout: `base` is the first uid, `deltas` holds `num_uids - 1` varint gaps.
/// `num_uids` is recorded so rank computations can skip blocks without decoding them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UidBlock {
    base: Uid,
    deltas: Vec<u8>,
    num_uids: u32,
}

impl UidBlock {
    /// Pack a non-empty, strictly increasing run of uids.
    ///
    /// Ordering is not checked here; the encoder trusts its caller.
    pub(crate) fn pack(uids: &[Uid]) -> Self {
        debug_assert!(!uids.is_empty());
        // The encoder never cuts a block longer than MAX_BLOCK_SIZE.
        debug_assert!(uids.len() <= crate::MAX_BLOCK_SIZE);
        let mut deltas = Vec::with_capacity(uids.len());
        for gap in crate::gaps_from_sorted_ids_unchecked(uids).into_iter().skip(1) {
            varint::encode_u64(gap, &mut deltas);
        }
        Self {
            base: uids[0],
            deltas,
            num_uids: uids.len() as u32,
        }
    }

    /// First uid in the block. Usable for seeking without decoding.
    pub fn base(&self) -> Uid {
        self.base
    }

    /// Recorded uid count.
    pub fn num_uids(&self) -> usize {
        self.num_uids as usize
    }

    /// Encoded gap bytes.
    pub fn deltas(&self) -> &[u8] {
        &self.deltas
    }

    /// Decode the block, appending to `out`.
    ///
    /// Never panics. On malformed deltas the decoded prefix is kept and a warning is logged;
    /// packs built by [`Encoder`](crate::Encoder) or accepted by
    /// [`UidPack::validate`](crate::UidPack::validate) never take that path.
    pub fn unpack_into(&self, out: &mut Vec<Uid>) {
        // Each delta takes at least one byte, which bounds the count for any block.
        out.reserve(self.num_uids().min(self.deltas.len() + 1));
        let mut cur = self.base;
        out.push(cur);
        let mut bytes = &self.deltas[..];
        while !bytes.is_empty() {
            let Some((gap, n)) = varint::decode_u64(bytes) else {
                tracing::warn!(base = self.base, "truncated varint in uid block");
                return;
            };
            let Some(next) = cur.checked_add(gap) else {
                tracing::warn!(base = self.base, gap, "uid overflow in uid block");
                return;
            };
            cur = next;
            out.push(cur);
            bytes = &bytes[n..];
        }
    }

    /// Strict decode used by validation.
    pub(crate) fn try_unpack(&self, block: usize) -> Result<Vec<Uid>, Error> {
        if self.num_uids == 0 {
            return Err(Error::EmptyBlock { block });
        }
        let mut gaps = Vec::with_capacity(self.num_uids().min(self.deltas.len() + 1));
        gaps.push(self.base);
        let mut bytes = &self.deltas[..];
        while !bytes.is_empty() {
            let (gap, n) = varint::decode_u64(bytes).ok_or(Error::CorruptBlock { block })?;
            if gap == 0 {
                return Err(Error::CorruptBlock { block });
            }
            gaps.push(gap);
            bytes = &bytes[n..];
        }
        if gaps.len() != self.num_uids() {
            return Err(Error::CountMismatch {
                block,
                recorded: self.num_uids(),
                decoded: gaps.len(),
            });
        }
        crate::ids_from_gaps(&gaps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_then_unpack_keeps_values() {
        let uids = [3u64, 4, 100, 1 << 40, u64::MAX];
        let block = UidBlock::pack(&uids);
        assert_eq!(block.base(), 3);
        assert_eq!(block.num_uids(), 5);
        let mut out = Vec::new();
        block.unpack_into(&mut out);
        assert_eq!(out, uids);
        assert_eq!(block.try_unpack(0).unwrap(), uids);
    }

    #[test]
    fn single_uid_block_has_no_deltas() {
        let block = UidBlock::pack(&[42]);
        assert!(block.deltas().is_empty());
        let mut out = Vec::new();
        block.unpack_into(&mut out);
        assert_eq!(out, vec![42]);
    }

    #[test]
    fn corrupt_deltas_keep_prefix_without_panicking() {
        let mut block = UidBlock::pack(&[1, 2, 3]);
        block.deltas.push(0x80);
        let mut out = Vec::new();
        block.unpack_into(&mut out);
        assert_eq!(out, vec![1, 2, 3]);
        assert_eq!(block.try_unpack(7), Err(Error::CorruptBlock { block: 7 }));
    }

    #[test]
    fn recorded_count_must_match() {
        let mut block = UidBlock::pack(&[1, 2, 3]);
        block.num_uids = 4;
        assert_eq!(
            block.try_unpack(0),
            Err(Error::CountMismatch {
                block: 0,
                recorded: 4,
                decoded: 3
            })
        );
    }

    #[test]
    fn inflated_count_is_rejected_without_reserving_it() {
        let block = UidBlock {
            base: 1,
            deltas: Vec::new(),
            num_uids: u32::MAX,
        };
        let mut out = Vec::new();
        block.unpack_into(&mut out);
        assert_eq!(out, vec![1]);
        assert!(matches!(
            block.try_unpack(0),
            Err(Error::CountMismatch { decoded: 1, .. })
        ));
    }

    #[test]
    fn zero_gap_is_a_duplicate() {
        let block = UidBlock {
            base: 5,
            deltas: vec![0],
            num_uids: 2,
        };
        assert_eq!(block.try_unpack(2), Err(Error::CorruptBlock { block: 2 }));
    }
}
