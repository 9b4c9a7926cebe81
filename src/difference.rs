//! Difference (NOT) of two packed uid lists.

use std::cmp::Ordering;

use uidpack_codec::{Encoder, UidPack};

use crate::cursor::Cursor;

/// `u` minus `v`: the uids of `u` that are not in `v`.
///
/// `u` absent gives an absent result; `v` absent gives a copy of `u`. The output adopts
/// `u`'s block size. Runs of `u` below `v`'s head are copied in bulk, and once `v` is
/// exhausted every remaining block of `u` is copied through.
pub fn difference<'u, 'v>(
    u: impl Into<Option<&'u UidPack>>,
    v: impl Into<Option<&'v UidPack>>,
) -> Option<UidPack> {
    let u = u.into()?;
    let Some(v) = v.into() else {
        return Some(u.clone());
    };

    let mut out = Encoder::new(u.block_size());
    let mut uc = Cursor::new(u);
    let mut vc = Cursor::new(v);

    while let Some(a) = uc.current() {
        let Some(b) = vc.current() else {
            uc.drain_into(&mut out);
            break;
        };
        match a.cmp(&b) {
            Ordering::Less => uc.copy_below(b, &mut out),
            Ordering::Equal => {
                uc.advance();
                vc.advance();
            }
            Ordering::Greater => vc.skip_below(a),
        }
    }
    Some(out.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uidpack_codec::Uid;

    fn pack(uids: &[Uid], block_size: usize) -> UidPack {
        UidPack::from_sorted(uids, block_size).unwrap()
    }

    #[test]
    fn difference_basic() {
        let a = pack(&[1, 2, 3, 4, 5], 2);
        let b = pack(&[2, 4], 2);
        assert_eq!(difference(&a, &b).unwrap().to_vec(), vec![1, 3, 5]);
    }

    #[test]
    fn difference_absent_operands() {
        let a = pack(&[1, 2, 3], 2);
        assert_eq!(difference(&a, None::<&UidPack>), Some(a.clone()));
        assert_eq!(difference(None::<&UidPack>, &a), None);
        assert_eq!(difference(None::<&UidPack>, None::<&UidPack>), None);
    }

    #[test]
    fn difference_with_itself_is_empty() {
        let a = pack(&(0..50).collect::<Vec<_>>(), 4);
        assert!(difference(&a, &a).unwrap().is_empty());
    }

    #[test]
    fn difference_with_empty_copies_every_block() {
        let a = pack(&(0..23).collect::<Vec<_>>(), 5);
        let e = UidPack::empty(5);
        assert_eq!(difference(&a, &e).unwrap().to_vec(), a.to_vec());
        assert!(difference(&e, &a).unwrap().is_empty());
    }

    #[test]
    fn tail_copy_continues_past_the_active_block() {
        // v runs out while u still has four blocks left.
        let u: Vec<Uid> = (1..=12).collect();
        let v = [2u64, 3];
        let out = difference(&pack(&u, 2), &pack(&v, 2)).unwrap();
        assert_eq!(out.to_vec(), vec![1, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(out.block_size(), 2);
    }

    #[test]
    fn removals_spanning_block_boundaries() {
        let u: Vec<Uid> = (1..=12).collect();
        let v = [2u64, 3, 4, 5, 8, 9, 12];
        let out = difference(&pack(&u, 2), &pack(&v, 2)).unwrap();
        assert_eq!(out.to_vec(), vec![1, 6, 7, 10, 11]);
    }

    #[test]
    fn v_entirely_below_or_above_u() {
        let u = pack(&[10, 11, 12, 13, 14], 2);
        assert_eq!(
            difference(&u, &pack(&[1, 2, 3], 2)).unwrap().to_vec(),
            vec![10, 11, 12, 13, 14]
        );
        assert_eq!(
            difference(&u, &pack(&[20, 30], 2)).unwrap().to_vec(),
            vec![10, 11, 12, 13, 14]
        );
    }

    proptest! {
        #[test]
        fn difference_matches_set_oracle(
            a in prop::collection::btree_set(0u64..1_000, 0..150),
            b in prop::collection::btree_set(0u64..1_000, 0..150),
            bs_a in 1usize..10,
            bs_b in 1usize..10,
        ) {
            let av: Vec<Uid> = a.iter().copied().collect();
            let bv: Vec<Uid> = b.iter().copied().collect();
            let expected: Vec<Uid> = a.difference(&b).copied().collect();
            let got = difference(&pack(&av, bs_a), &pack(&bv, bs_b)).unwrap().to_vec();
            prop_assert!(got.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(got, expected);
        }
    }
}
