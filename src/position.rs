//! Rank lookup in a packed uid list.

use uidpack_codec::{Decoder, Uid, UidBlock, UidPack};

/// 0-based position of `uid` in the whole list, or `None` if it is not present.
///
/// Seeks to the candidate block using block bases only, decodes that one block, and adds
/// the recorded counts of the blocks before it. Cost is one block decode plus a pass over
/// block headers.
pub fn index_of<'a>(u: impl Into<Option<&'a UidPack>>, uid: Uid) -> Option<usize> {
    let u = u.into()?;
    let mut dec = Decoder::starting_at(u, uid);
    let block_idx = dec.block_idx();
    // Seek may have trimmed the block; ranks need all of it.
    let uids = dec.unpack_block();

    let base: usize = u
        .blocks()
        .iter()
        .take(block_idx)
        .map(UidBlock::num_uids)
        .sum();
    let pos = uids.partition_point(|&x| x < uid);
    match uids.get(pos) {
        Some(&found) if found == uid => Some(base + pos),
        _ => None,
    }
}
