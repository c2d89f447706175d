//! Local node numbering of linear and quadratic cells
//!
//! Engines store the corners of a quadratic cell in their own order. This crate numbers
//! nodes the conventional way: vertices first, then one mid-edge node per edge in the
//! order of [`TRIANGLE_EDGES`] / [`TETRAHEDRON_EDGES`].
//!
//! ```text
//!        node order              engine corner order
//!            2                           2
//!           / \                         / \
//!          5   4                       4   3
//!         /     \                     /     \
//!        0---3---1                   0---5---1
//! ```

/// Engine corner of each triangle node
pub const TRIANGLE_NODE_TO_CORNER: [usize; 6] = [0, 1, 2, 5, 3, 4];

/// Engine corner of each tetrahedron node
pub const TETRAHEDRON_NODE_TO_CORNER: [usize; 10] = [0, 1, 2, 3, 6, 7, 9, 5, 8, 4];

/// Vertex pairs of triangle nodes 3, 4 and 5
pub const TRIANGLE_EDGES: [[usize; 2]; 3] = [[0, 1], [1, 2], [2, 0]];

/// Vertex pairs of tetrahedron nodes 4 to 9
pub const TETRAHEDRON_EDGES: [[usize; 2]; 6] = [[0, 1], [1, 2], [2, 0], [0, 3], [1, 3], [2, 3]];

/// Engine corner holding node `node` of a triangle with `corner_count` corners
///
/// Linear triangles (3 corners) use the identity.
pub fn triangle_corner(node: usize, corner_count: usize) -> Option<usize> {
    match corner_count {
        3 if node < 3 => Some(node),
        6 => TRIANGLE_NODE_TO_CORNER.get(node).copied(),
        _ => None,
    }
}

/// Engine corner holding node `node` of a tetrahedron with `corner_count` corners
pub fn tetrahedron_corner(node: usize, corner_count: usize) -> Option<usize> {
    match corner_count {
        4 if node < 4 => Some(node),
        10 => TETRAHEDRON_NODE_TO_CORNER.get(node).copied(),
        _ => None,
    }
}

/// Node stored at engine corner `corner` of a quadratic tetrahedron
pub fn tetrahedron_node(corner: usize) -> Option<usize> {
    TETRAHEDRON_NODE_TO_CORNER.iter().position(|&c| c == corner)
}
