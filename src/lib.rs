//! # uidpack
//!
//! Set algebra over block-compressed uid lists: the posting lists a graph database
//! composes when it evaluates query predicates.
//!
//! Every list is a [`UidPack`]: a sorted, duplicate-free sequence of `u64` uids cut into
//! fixed-size blocks that decode independently. The operations here stream through those
//! blocks one at a time and never materialize a whole list.
//!
//! | operation            | meaning                                   |
//! |----------------------|-------------------------------------------|
//! | [`intersect`]        | AND of two lists                          |
//! | [`intersect_sorted`] | AND of many lists, smallest first          |
//! | [`difference`]       | `u` NOT `v`                               |
//! | [`merge_sorted`]     | OR of many lists, duplicates coalesced    |
//! | [`apply_filter`]     | keep uids matching `f(uid, global_index)` |
//! | [`index_of`]         | global rank of a uid                      |
//!
//! ## Absent vs. empty
//!
//! An absent list (`None`) and a present list with no uids are different inputs.
//! Pairwise operations take anything convertible into `Option<&UidPack>`, so both
//! `&pack` and `None` can be passed directly:
//!
//! ```
//! use uidpack::{difference, intersect, UidPack};
//!
//! let a = UidPack::from_sorted(&[1, 2, 3, 4, 5], 2)?;
//! let b = UidPack::from_sorted(&[2, 4], 2)?;
//!
//! assert_eq!(intersect(&a, &b).unwrap().to_vec(), vec![2, 4]);
//! assert_eq!(difference(&a, &b).unwrap().to_vec(), vec![1, 3, 5]);
//! // Subtracting an absent list is a copy; intersecting with one is absent.
//! assert_eq!(difference(&a, None::<&UidPack>), Some(a.clone()));
//! assert!(intersect(&a, None::<&UidPack>).is_none());
//! # Ok::<(), uidpack::Error>(())
//! ```
//!
//! ## Scope (deliberate)
//!
//! - Inputs must already be sorted and duplicate-free. The operations do not re-check;
//!   use [`UidPack::from_sorted`] or [`UidPack::validate`] at the boundary.
//! - Every call is synchronous and single-threaded. Nothing is shared between calls, so
//!   independent calls may run in parallel.
//! - The packed format itself lives in `uidpack-codec`, re-exported as [`codec`].

mod cursor;
mod difference;
mod filter;
mod intersect;
mod merge;
mod position;

pub use uidpack_codec as codec;
pub use uidpack_codec::{Error, PackConfig, Uid, UidPack, DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE};

pub use difference::difference;
pub use filter::apply_filter;
pub use intersect::{intersect, intersect_sorted};
pub use merge::merge_sorted;
pub use position::index_of;
