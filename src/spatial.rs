//! Nearest-neighbor lookups over seed points.
//!
//! A k-d tree over 2D integer coordinates, split by row at even depths and
//! by column at odd depths. Nodes live in a flat arena and refer to their
//! children by index. Distances are exact: squared Euclidean in `i64`, no
//! floating point anywhere.

/// A point in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedPoint {
    pub row: usize,
    pub col: usize,
}

impl SeedPoint {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Squared Euclidean distance between two points.
pub(crate) fn distance_squared(a: SeedPoint, b: SeedPoint) -> i64 {
    let d_row = a.row as i64 - b.row as i64;
    let d_col = a.col as i64 - b.col as i64;
    d_row * d_row + d_col * d_col
}

#[derive(Debug, Clone)]
struct Node {
    point: SeedPoint,
    left: Option<usize>,
    right: Option<usize>,
}

/// A k-d tree over [`SeedPoint`]s.
///
/// Built once from a point set, then queried. Duplicate points are allowed;
/// ties on distance resolve to whichever candidate the descent reaches
/// first, which makes every query fully deterministic.
#[derive(Debug, Clone)]
pub struct KdTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl KdTree {
    /// Build a tree from `points`.
    ///
    /// Each level sorts its slice along the level's axis and splits at the
    /// middle element, so the tree is balanced regardless of input order.
    pub fn build(points: &[SeedPoint]) -> Self {
        let mut scratch = points.to_vec();
        let mut nodes = Vec::with_capacity(points.len());
        let root = build_subtree(&mut scratch, 0, &mut nodes);
        Self { nodes, root }
    }

    /// Number of points in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The point closest to `query`, or `None` for an empty tree.
    pub fn nearest(&self, query: SeedPoint) -> Option<SeedPoint> {
        let root = self.root?;
        Some(self.nodes[self.nearest_node(root, query, 0)].point)
    }

    fn nearest_node(&self, index: usize, query: SeedPoint, depth: usize) -> usize {
        let node = &self.nodes[index];
        let axis_gap = if depth % 2 == 0 {
            query.row as i64 - node.point.row as i64
        } else {
            query.col as i64 - node.point.col as i64
        };
        let (near, far) = if axis_gap <= 0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        let mut best = index;
        if let Some(child) = near {
            best = self.closer(query, best, self.nearest_node(child, query, depth + 1));
        }
        // The far side can only win if the splitting plane is strictly
        // closer than the best match so far.
        if let Some(child) = far {
            if axis_gap * axis_gap < distance_squared(query, self.nodes[best].point) {
                best = self.closer(query, best, self.nearest_node(child, query, depth + 1));
            }
        }
        best
    }

    /// Of two node indices, the one nearer to `query`; `a` wins ties.
    fn closer(&self, query: SeedPoint, a: usize, b: usize) -> usize {
        let dist_a = distance_squared(query, self.nodes[a].point);
        let dist_b = distance_squared(query, self.nodes[b].point);
        if dist_a <= dist_b {
            a
        } else {
            b
        }
    }
}

fn build_subtree(points: &mut [SeedPoint], depth: usize, nodes: &mut Vec<Node>) -> Option<usize> {
    if points.is_empty() {
        return None;
    }
    if depth % 2 == 0 {
        points.sort_by_key(|point| point.row);
    } else {
        points.sort_by_key(|point| point.col);
    }

    let median = points.len() / 2;
    let (left_half, rest) = points.split_at_mut(median);
    let (middle, right_half) = rest.split_at_mut(1);

    let left = build_subtree(left_half, depth + 1, nodes);
    let right = build_subtree(right_half, depth + 1, nodes);
    nodes.push(Node {
        point: middle[0],
        left,
        right,
    });
    Some(nodes.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: the four corners and center of a 5x5 area.
    fn corner_points() -> Vec<SeedPoint> {
        vec![
            SeedPoint::new(0, 0),
            SeedPoint::new(0, 4),
            SeedPoint::new(4, 0),
            SeedPoint::new(4, 4),
            SeedPoint::new(2, 2),
        ]
    }

    #[test]
    fn test_empty_tree_has_no_nearest() {
        let tree = KdTree::build(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.nearest(SeedPoint::new(3, 3)), None);
    }

    #[test]
    fn test_single_point_always_wins() {
        let tree = KdTree::build(&[SeedPoint::new(7, 2)]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.nearest(SeedPoint::new(0, 0)), Some(SeedPoint::new(7, 2)));
        assert_eq!(tree.nearest(SeedPoint::new(7, 2)), Some(SeedPoint::new(7, 2)));
    }

    #[test]
    fn test_center_beats_corners() {
        let tree = KdTree::build(&corner_points());
        // (2,3) is distance 1 from the center and at least 5 from every
        // corner.
        assert_eq!(
            tree.nearest(SeedPoint::new(2, 3)),
            Some(SeedPoint::new(2, 2))
        );
    }

    #[test]
    fn test_query_outside_the_hull() {
        let tree = KdTree::build(&corner_points());
        assert_eq!(
            tree.nearest(SeedPoint::new(10, 10)),
            Some(SeedPoint::new(4, 4))
        );
    }

    #[test]
    fn test_exact_match_returns_itself() {
        let tree = KdTree::build(&corner_points());
        for point in corner_points() {
            assert_eq!(tree.nearest(point), Some(point));
        }
    }

    #[test]
    fn test_duplicate_points_are_allowed() {
        let tree = KdTree::build(&[
            SeedPoint::new(3, 3),
            SeedPoint::new(3, 3),
            SeedPoint::new(1, 1),
        ]);
        assert_eq!(tree.len(), 3);
        assert_eq!(
            tree.nearest(SeedPoint::new(3, 4)),
            Some(SeedPoint::new(3, 3))
        );
    }

    #[test]
    fn test_collinear_points_split_on_second_axis() {
        // All points share a row, so every useful split happens on the
        // column axis one level down.
        let tree = KdTree::build(&[
            SeedPoint::new(0, 0),
            SeedPoint::new(0, 10),
            SeedPoint::new(0, 20),
            SeedPoint::new(0, 30),
        ]);
        assert_eq!(
            tree.nearest(SeedPoint::new(0, 12)),
            Some(SeedPoint::new(0, 10))
        );
        assert_eq!(
            tree.nearest(SeedPoint::new(0, 26)),
            Some(SeedPoint::new(0, 30))
        );
    }

    #[test]
    fn test_distance_tie_resolves_deterministically() {
        // (0,1) is distance 1 from both points. The descent meets (0,2)
        // at the root (middle of the row-stable order), so it wins the tie
        // on every run.
        let tree = KdTree::build(&[SeedPoint::new(0, 0), SeedPoint::new(0, 2)]);
        assert_eq!(
            tree.nearest(SeedPoint::new(0, 1)),
            Some(SeedPoint::new(0, 2))
        );
    }

    #[test]
    fn test_distance_squared_is_symmetric() {
        let a = SeedPoint::new(2, 9);
        let b = SeedPoint::new(5, 1);
        assert_eq!(distance_squared(a, b), 73);
        assert_eq!(distance_squared(b, a), 73);
        assert_eq!(distance_squared(a, a), 0);
    }
}
