//! Boundary extraction over the 8-neighborhood.
//!
//! A foreground cell is a boundary cell iff any of its 8 neighbors is
//! background or the cell lies on the grid edge (the edge counts as
//! outside). Background cells are never boundary cells.

use crate::mask::Mask;

/// Offsets of the 8-neighborhood: N, S, W, E and the four diagonals.
const NEIGHBORS: [(i64, i64); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
];

/// Extract the boundary cells of a mask.
///
/// Evaluated once per region on the union mask; per-part boundaries are
/// derived from it with [`part_boundary`].
#[must_use = "returns the boundary mask"]
pub fn boundary(mask: &Mask) -> Mask {
    let width = mask.width();
    let height = mask.height();
    let mut out = Mask::new(width, height);

    for y in 0..height {
        for x in 0..width {
            if !mask.contains(x, y) {
                continue;
            }
            if is_boundary_cell(mask, i64::from(x), i64::from(y)) {
                out.set(x, y);
            }
        }
    }
    out
}

/// Restrict a union boundary to one part: part mask AND union boundary.
#[must_use = "returns the part's boundary mask"]
pub fn part_boundary(part_mask: &Mask, union_boundary: &Mask) -> Mask {
    part_mask.and(union_boundary)
}

#[allow(clippy::cast_sign_loss)]
fn is_boundary_cell(mask: &Mask, x: i64, y: i64) -> bool {
    NEIGHBORS.iter().any(|&(dx, dy)| {
        let nx = x + dx;
        let ny = y + dy;
        if nx < 0 || ny < 0 || nx >= i64::from(mask.width()) || ny >= i64::from(mask.height()) {
            return true; // grid edge counts as outside
        }
        !mask.contains(nx as u32, ny as u32)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Filled rectangle mask covering `[x0, x1] x [y0, y1]`.
    fn filled_rect(x0: u32, y0: u32, x1: u32, y1: u32) -> Mask {
        let mut mask = Mask::new(16, 16);
        for y in y0..=y1 {
            for x in x0..=x1 {
                mask.set(x, y);
            }
        }
        mask
    }

    #[test]
    fn empty_mask_has_empty_boundary() {
        assert!(boundary(&Mask::new(16, 16)).is_empty());
    }

    #[test]
    fn interior_rectangle_boundary_is_its_ring() {
        let mask = filled_rect(4, 4, 9, 9);
        let edge = boundary(&mask);
        // 6x6 block: ring has 6*6 - 4*4 = 20 cells.
        assert_eq!(edge.foreground_count(), 20);
        assert!(edge.contains(4, 4));
        assert!(edge.contains(9, 6));
        assert!(!edge.contains(6, 6));
    }

    #[test]
    fn diagonal_neighbor_counts() {
        // A cell whose only background neighbor is diagonal is still
        // boundary under the 8-neighborhood: punch one interior cell out
        // of a filled block and check its diagonal neighbors.
        let mut hole = Mask::new(16, 16);
        hole.set(6, 6);
        let with_hole = filled_rect(4, 4, 9, 9).minus(&hole);

        let edge = boundary(&with_hole);
        assert!(edge.contains(5, 5), "diagonal neighbor of hole");
        assert!(edge.contains(7, 7), "diagonal neighbor of hole");
        assert!(!edge.contains(6, 6), "background is never boundary");
    }

    #[test]
    fn grid_edge_counts_as_outside() {
        let mask = filled_rect(0, 0, 3, 3);
        let edge = boundary(&mask);
        assert!(edge.contains(0, 0));
        assert!(edge.contains(0, 2));
        assert!(!edge.contains(1, 1));
    }

    #[test]
    fn boundary_is_subset_of_mask() {
        let mask = filled_rect(2, 3, 12, 10);
        let edge = boundary(&mask);
        assert!(edge.minus(&mask).is_empty());
    }

    #[test]
    fn single_cell_is_its_own_boundary() {
        let mut mask = Mask::new(16, 16);
        mask.set(8, 8);
        let edge = boundary(&mask);
        assert_eq!(edge.foreground_count(), 1);
        assert!(edge.contains(8, 8));
    }

    #[test]
    fn part_boundary_restricts_to_part() {
        let a = filled_rect(2, 2, 5, 5);
        let b = filled_rect(10, 10, 13, 13);
        let mut union = Mask::new(16, 16);
        union.or_assign(&a);
        union.or_assign(&b);

        let union_edge = boundary(&union);
        let a_edge = part_boundary(&a, &union_edge);
        assert!(!a_edge.is_empty());
        assert!(a_edge.minus(&a).is_empty());
        assert!(!a_edge.intersects(&b));
    }
}
