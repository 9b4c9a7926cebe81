//! Predicate filtering of a packed uid list.

use uidpack_codec::{Decoder, Encoder, Uid, UidPack};

/// Keep the uids for which `f(uid, index)` returns true, in order.
///
/// `index` is the 0-based rank of `uid` in the whole list, counted across blocks.
/// Single pass; an absent list gives an absent result.
pub fn apply_filter<'a, F>(u: impl Into<Option<&'a UidPack>>, mut f: F) -> Option<UidPack>
where
    F: FnMut(Uid, usize) -> bool,
{
    let u = u.into()?;
    let mut out = Encoder::new(u.block_size());
    let mut dec = Decoder::new(u);
    let mut index = 0;
    while dec.valid() {
        for &uid in dec.uids() {
            if f(uid, index) {
                out.push(uid);
            }
            index += 1;
        }
        dec.next_block();
    }
    Some(out.finish())
}
