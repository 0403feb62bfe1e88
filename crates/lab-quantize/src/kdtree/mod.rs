//! Balanced 3-D KD-tree with exact nearest-neighbor search.
//!
//! The tree is built once from a fixed point set and is immutable afterwards,
//! so a built tree can be shared across threads behind a plain reference.
//!
//! # Construction
//!
//! Each level splits on axis `depth % 3`. Points are stably sorted on that
//! axis and the element at `len / 2` becomes the node; everything before it
//! forms the left subtree and everything after it the right subtree. Points
//! with equal coordinates stay in input order, so identical input always
//! yields an identical tree.
//!
//! # Search
//!
//! [`KdTree::nearest`] descends toward the target first, then visits the
//! opposite subtree only when the splitting plane is strictly closer than
//! the best distance found so far. The result is exact: it always matches a
//! brute-force scan. On equal distances the first point found wins.
//!
//! ```
//! use lab_quantize::KdTree;
//!
//! let tree = KdTree::build(vec![[30.0, 20.0, 10.0], [60.0, 50.0, 40.0], [45.0, 35.0, 25.0]]);
//! let nearest = tree.nearest([47.0, 37.0, 27.0]).unwrap();
//! assert_eq!(*nearest.point, [45.0, 35.0, 25.0]);
//! ```

use crate::color::Lab;

/// A value with three spatial coordinates.
pub trait KdPoint {
    /// Coordinates used for partitioning and distance.
    fn coords(&self) -> [f64; 3];
}

impl KdPoint for [f64; 3] {
    #[inline]
    fn coords(&self) -> [f64; 3] {
        *self
    }
}

impl KdPoint for Lab {
    #[inline]
    fn coords(&self) -> [f64; 3] {
        self.to_array()
    }
}

/// Euclidean distance between two coordinate triples.
#[inline]
pub fn euclidean_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Result of a nearest-neighbor query.
#[derive(Debug)]
pub struct Nearest<'a, P> {
    /// The closest stored point.
    pub point: &'a P,
    /// Euclidean distance from the query target to `point`.
    pub distance: f64,
}

#[derive(Debug, Clone)]
struct KdNode<P> {
    point: P,
    axis: usize,
    left: Option<Box<KdNode<P>>>,
    right: Option<Box<KdNode<P>>>,
}

/// Immutable KD-tree over 3-D points.
///
/// An empty tree is valid; every query against it returns `None`.
#[derive(Debug, Clone)]
pub struct KdTree<P> {
    root: Option<Box<KdNode<P>>>,
    len: usize,
}

impl<P: KdPoint> KdTree<P> {
    /// Build a balanced tree from `points`.
    ///
    /// Duplicate points are kept as independent nodes.
    pub fn build(points: Vec<P>) -> Self {
        let len = points.len();
        Self {
            root: build_node(points, 0),
            len,
        }
    }

    /// Find the stored point closest to `target`.
    ///
    /// Returns `None` only for an empty tree.
    pub fn nearest(&self, target: [f64; 3]) -> Option<Nearest<'_, P>> {
        let mut best = None;
        if let Some(root) = &self.root {
            root.search(target, &mut best);
        }
        best
    }
}

impl<P> KdTree<P> {
    /// Number of points in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels from the root to the deepest leaf (0 when empty).
    pub fn depth(&self) -> usize {
        fn depth_of<P>(node: &Option<Box<KdNode<P>>>) -> usize {
            match node {
                None => 0,
                Some(n) => 1 + depth_of(&n.left).max(depth_of(&n.right)),
            }
        }
        depth_of(&self.root)
    }
}

fn build_node<P: KdPoint>(mut points: Vec<P>, depth: usize) -> Option<Box<KdNode<P>>> {
    let axis = depth % 3;

    if points.len() <= 1 {
        return points.pop().map(|point| {
            Box::new(KdNode {
                point,
                axis,
                left: None,
                right: None,
            })
        });
    }

    // sort_by is stable: ties keep input order
    points.sort_by(|a, b| a.coords()[axis].total_cmp(&b.coords()[axis]));

    let median = points.len() / 2;
    let right = points.split_off(median + 1);
    let point = points.pop()?;
    let left = points;

    Some(Box::new(KdNode {
        point,
        axis,
        left: build_node(left, depth + 1),
        right: build_node(right, depth + 1),
    }))
}

impl<P: KdPoint> KdNode<P> {
    fn search<'a>(&'a self, target: [f64; 3], best: &mut Option<Nearest<'a, P>>) {
        let coords = self.point.coords();
        let distance = euclidean_distance(target, coords);

        if best.as_ref().map_or(true, |b| distance < b.distance) {
            *best = Some(Nearest {
                point: &self.point,
                distance,
            });
        }

        let (near, far) = if target[self.axis] < coords[self.axis] {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        };

        if let Some(node) = near {
            node.search(target, best);
        }

        if let Some(node) = far {
            let plane_distance = (target[self.axis] - coords[self.axis]).abs();
            if best.as_ref().map_or(true, |b| plane_distance < b.distance) {
                node.search(target, best);
            }
        }
    }
}
