use crate::color::{Lab, Rgb};
use crate::kdtree::{KdPoint, KdTree};

use super::error::QuantizeError;

/// A named reference color.
///
/// Duplicate colors are allowed; each entry stays an independent
/// candidate in the index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    /// Display name, e.g. the bead catalog label
    pub name: String,
    /// sRGB value of the entry
    pub color: Rgb,
}

impl PaletteEntry {
    /// Create an entry from a name and an sRGB color.
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Lab point tagged with the palette position it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedLab {
    lab: Lab,
    index: usize,
}

impl KdPoint for IndexedLab {
    #[inline]
    fn coords(&self) -> [f64; 3] {
        self.lab.to_array()
    }
}

/// Nearest palette entry for a query color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteMatch {
    /// Position of the matched entry in the palette
    pub index: usize,
    /// Lab coordinates of the matched entry
    pub lab: Lab,
    /// Euclidean Lab distance from the query
    pub distance: f64,
}

/// A palette with precomputed Lab points and a KD-tree over them.
///
/// Construction is the only expensive step. Queries take `&self`, and the
/// index is `Send + Sync`, so one instance can serve concurrent callers
/// behind an `Arc`.
///
/// # Example
///
/// ```
/// use lab_quantize::{Lab, PaletteEntry, PaletteIndex, Rgb};
///
/// let index = PaletteIndex::new(vec![
///     PaletteEntry::new("Red", Rgb::new(255, 0, 0)),
///     PaletteEntry::new("Blue", Rgb::new(0, 0, 255)),
/// ])
/// .unwrap();
///
/// let m = index.nearest(Lab::from(Rgb::new(10, 10, 250))).unwrap();
/// assert_eq!(index.entries()[m.index].name, "Blue");
/// ```
#[derive(Debug, Clone)]
pub struct PaletteIndex {
    entries: Vec<PaletteEntry>,
    lab: Vec<Lab>,
    tree: KdTree<IndexedLab>,
}

impl PaletteIndex {
    /// Build an index over `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::EmptyPalette`] if `entries` is empty.
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self, QuantizeError> {
        if entries.is_empty() {
            return Err(QuantizeError::EmptyPalette);
        }

        let lab: Vec<Lab> = entries.iter().map(|e| Lab::from(e.color)).collect();
        let points = lab
            .iter()
            .enumerate()
            .map(|(index, &lab)| IndexedLab { lab, index })
            .collect();

        Ok(Self {
            entries,
            lab,
            tree: KdTree::build(points),
        })
    }

    /// Find the palette entry closest to `lab`.
    ///
    /// Only returns `None` if the index is empty, which construction rules
    /// out.
    pub fn nearest(&self, lab: Lab) -> Option<PaletteMatch> {
        self.tree.nearest(lab.to_array()).map(|n| PaletteMatch {
            index: n.point.index,
            lab: n.point.lab,
            distance: n.distance,
        })
    }

    /// Palette entries in their original order.
    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Lab coordinates of each entry, in palette order.
    #[inline]
    pub fn lab_points(&self) -> &[Lab] {
        &self.lab
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed index.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
