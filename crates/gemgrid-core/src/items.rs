//! Item bookkeeping: the ordered [`ItemList`] and the [`ItemMask`] family of
//! collected-item sets.
//!
//! An item's position in the list is its index for the whole round, and that
//! index is the bit it occupies in a mask. Pick the mask type with
//! [`MaskWidth::for_items`]: a single word is enough for most boards, and
//! [`ItemSet`] covers anything larger.

use std::fmt;
use std::hash::Hash;

use crate::geom::Point;

/// Item coordinates in row-major scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemList {
    positions: Vec<Point>,
}

impl ItemList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether there are no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of item `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Point> {
        self.positions.get(index).copied()
    }

    /// Index of the item at `p`, if any.
    pub fn index_of(&self, p: Point) -> Option<usize> {
        self.positions.iter().position(|&q| q == p)
    }

    /// Iterate over item positions in index order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.positions.iter().copied()
    }

    /// The positions as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        &self.positions
    }
}

impl FromIterator<Point> for ItemList {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Point>> for ItemList {
    fn from(positions: Vec<Point>) -> Self {
        Self { positions }
    }
}

// ---------------------------------------------------------------------------
// Masks
// ---------------------------------------------------------------------------

/// A set of collected item indices.
///
/// Implementations are value types: [`with`](Self::with) returns a new mask
/// and leaves `self` alone, so masks can be used directly as hash-map keys in
/// a search.
pub trait ItemMask: Clone + Eq + Hash + fmt::Debug {
    /// Largest item count this mask can represent, `None` if unbounded.
    const CAPACITY: Option<usize>;

    /// The empty mask for a list of `items` items.
    fn empty(items: usize) -> Self;

    /// Whether item `index` is in the set.
    fn contains(&self, index: usize) -> bool;

    /// A copy of `self` with item `index` added.
    fn with(&self, index: usize) -> Self;

    /// Number of items in the set.
    fn count(&self) -> usize;
}

impl ItemMask for u64 {
    const CAPACITY: Option<usize> = Some(64);

    #[inline]
    fn empty(_items: usize) -> Self {
        0
    }

    #[inline]
    fn contains(&self, index: usize) -> bool {
        *self & (1u64 << index) != 0
    }

    #[inline]
    fn with(&self, index: usize) -> Self {
        *self | (1u64 << index)
    }

    #[inline]
    fn count(&self) -> usize {
        self.count_ones() as usize
    }
}

impl ItemMask for u128 {
    const CAPACITY: Option<usize> = Some(128);

    #[inline]
    fn empty(_items: usize) -> Self {
        0
    }

    #[inline]
    fn contains(&self, index: usize) -> bool {
        *self & (1u128 << index) != 0
    }

    #[inline]
    fn with(&self, index: usize) -> Self {
        *self | (1u128 << index)
    }

    #[inline]
    fn count(&self) -> usize {
        self.count_ones() as usize
    }
}

/// Heap-backed bit-set for boards with more items than fit in a `u128`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ItemSet {
    words: Box<[u64]>,
}

impl fmt::Debug for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indices: Vec<usize> = (0..self.words.len() * 64)
            .filter(|&i| self.contains(i))
            .collect();
        f.debug_tuple("ItemSet").field(&indices).finish()
    }
}

impl ItemMask for ItemSet {
    const CAPACITY: Option<usize> = None;

    fn empty(items: usize) -> Self {
        Self {
            words: vec![0; items.div_ceil(64)].into_boxed_slice(),
        }
    }

    fn contains(&self, index: usize) -> bool {
        self.words
            .get(index / 64)
            .is_some_and(|w| w & (1u64 << (index % 64)) != 0)
    }

    fn with(&self, index: usize) -> Self {
        let mut words = self.words.clone();
        if let Some(w) = words.get_mut(index / 64) {
            *w |= 1u64 << (index % 64);
        }
        Self { words }
    }

    fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// The smallest mask representation able to hold a given item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskWidth {
    Word,
    DoubleWord,
    Set,
}

impl MaskWidth {
    /// Pick the width for `items` items.
    pub fn for_items(items: usize) -> Self {
        if fits::<u64>(items) {
            Self::Word
        } else if fits::<u128>(items) {
            Self::DoubleWord
        } else {
            Self::Set
        }
    }
}

fn fits<M: ItemMask>(items: usize) -> bool {
    M::CAPACITY.is_none_or(|cap| items <= cap)
}
