//! `uidpack-codec`: the block-compressed representation of uid lists.
//!
//! This crate holds the *mechanical* building blocks shared by the set-algebra engine:
//! - varint + delta (gap) encoding of ascending `u64` uids
//! - [`UidPack`]: a list cut into fixed-size, independently decodable blocks
//! - [`Encoder`] / [`Decoder`]: append-only building and block-at-a-time decoding
//!
//! It intentionally does **not** implement any set operation; those live in `uidpack`
//! and only ever see a list through the decoder/encoder contract.

#![warn(missing_docs)]

mod block;
mod decoder;
mod encoder;
mod pack;
pub mod varint;

pub use block::UidBlock;
pub use decoder::{Decoder, SeekFrom, Uids};
pub use encoder::{Encoder, PackConfig, DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE};
pub use pack::UidPack;

/// A 64-bit entity identifier.
pub type Uid = u64;

/// Errors for packed uid lists.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input ids were not strictly increasing.
    #[error("ids are not strictly increasing at index {index}: prev={prev}, next={next}")]
    NotStrictlyIncreasing {
        /// Index where the monotonicity violation occurred.
        index: usize,
        /// Previous id (expected smaller than `next`).
        prev: Uid,
        /// Next id (must be strictly greater than `prev`).
        next: Uid,
    },
    /// Decoding overflowed `u64`.
    #[error("u64 overflow while decoding at index {index}")]
    Overflow {
        /// Index in the gaps stream where overflow occurred.
        index: usize,
    },
    /// A pack declared a block size of zero.
    #[error("block size must be at least 1")]
    ZeroBlockSize,
    /// A block recorded zero uids.
    #[error("block {block} is empty")]
    EmptyBlock {
        /// Block index.
        block: usize,
    },
    /// A block holds more than `block_size` uids, or an inner block is not full.
    #[error("block {block} holds {len} uids, block size is {block_size}")]
    BadBlockLength {
        /// Block index.
        block: usize,
        /// Decoded uid count.
        len: usize,
        /// Declared block size.
        block_size: usize,
    },
    /// Malformed varint or zero gap inside a block.
    #[error("block {block} has corrupt deltas")]
    CorruptBlock {
        /// Block index.
        block: usize,
    },
    /// The recorded uid count disagrees with the decoded deltas.
    #[error("block {block} records {recorded} uids but decodes to {decoded}")]
    CountMismatch {
        /// Block index.
        block: usize,
        /// Count stored in the block header.
        recorded: usize,
        /// Count actually decoded.
        decoded: usize,
    },
    /// A block starts at or below the last uid of the previous block.
    #[error("block {block} is not above the previous block")]
    BlocksOutOfOrder {
        /// Block index.
        block: usize,
    },
    /// `postcard` failed to (de)serialize a pack.
    #[cfg(feature = "persistence")]
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Encode a sorted list of uids as gaps (delta encoding).
///
/// This is the **checked** variant: input must be strictly increasing.
pub fn gaps_from_sorted_ids(ids: &[Uid]) -> Result<Vec<Uid>, Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut out = Vec::with_capacity(ids.len());
    out.push(ids[0]);
    for i in 1..ids.len() {
        let prev = ids[i - 1];
        let next = ids[i];
        if next <= prev {
            return Err(Error::NotStrictlyIncreasing { index: i, prev, next });
        }
        out.push(next - prev);
    }
    Ok(out)
}

/// Encode gaps without validating sort order.
///
/// If inputs are not strictly increasing, the output is **not** a meaningful encoding.
pub fn gaps_from_sorted_ids_unchecked(ids: &[Uid]) -> Vec<Uid> {
    let mut out = Vec::with_capacity(ids.len());
    let mut prev = 0;
    for (i, &id) in ids.iter().enumerate() {
        if i == 0 {
            out.push(id);
        } else {
            out.push(id.saturating_sub(prev));
        }
        prev = id;
    }
    out
}

/// Decode gaps back into absolute uids.
///
/// This is the **checked** variant: returns an error on overflow.
pub fn ids_from_gaps(gaps: &[Uid]) -> Result<Vec<Uid>, Error> {
    let mut out = Vec::with_capacity(gaps.len());
    let mut cur: Uid = 0;
    for (i, &g) in gaps.iter().enumerate() {
        if i == 0 {
            cur = g;
        } else {
            cur = cur.checked_add(g).ok_or(Error::Overflow { index: i })?;
        }
        out.push(cur);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn gaps_rejects_unsorted() {
        let err = gaps_from_sorted_ids(&[10, 10]).unwrap_err();
        assert_eq!(
            err,
            Error::NotStrictlyIncreasing {
                index: 1,
                prev: 10,
                next: 10
            }
        );
    }

    #[test]
    fn ids_from_gaps_rejects_overflow() {
        let err = ids_from_gaps(&[u64::MAX, 1]).unwrap_err();
        assert_eq!(err, Error::Overflow { index: 1 });
    }

    #[test]
    fn error_messages_name_the_block() {
        let msg = Error::CountMismatch {
            block: 3,
            recorded: 10,
            decoded: 9,
        }
        .to_string();
        assert_eq!(msg, "block 3 records 10 uids but decodes to 9");
    }

    proptest! {
        #[test]
        fn gaps_roundtrip_strictly_increasing(mut ids in prop::collection::vec(any::<u64>(), 0..200)) {
            ids.sort_unstable();
            ids.dedup();
            let gaps = gaps_from_sorted_ids(&ids).unwrap();
            prop_assert_eq!(&gaps_from_sorted_ids_unchecked(&ids), &gaps);
            let back = ids_from_gaps(&gaps).unwrap();
            prop_assert_eq!(back, ids);
        }
    }
}
