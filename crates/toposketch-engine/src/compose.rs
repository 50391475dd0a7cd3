//! Region composition: group stroke masks into connected parts.
//!
//! Two strokes are adjacent iff their masks share at least one
//! foreground cell. Parts are the connected components of that
//! adjacency relation, discovered with a union-find over stroke
//! indices. Components are order-independent, but the reported order is
//! deterministic: parts appear by their smallest stroke index, and each
//! part lists its member strokes ascending.

use petgraph::unionfind::UnionFind;

use crate::mask::Mask;

/// Output of [`compose`]: the parts, their masks, and the union mask.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// Connected components as ascending stroke indices, ordered by
    /// smallest member.
    pub parts: Vec<Vec<usize>>,
    /// Cell-wise OR of each part's stroke masks, parallel to `parts`.
    pub part_masks: Vec<Mask>,
    /// Cell-wise OR of all part masks.
    pub union: Mask,
}

/// Merge per-stroke masks into connected parts and a union mask.
///
/// Zero strokes produce zero parts and an empty union.
#[must_use = "returns the composed parts and union mask"]
pub fn compose(stroke_masks: &[Mask], width: u32, height: u32) -> Composition {
    let n = stroke_masks.len();
    let mut components: UnionFind<usize> = UnionFind::new(n);

    for i in 0..n {
        for j in (i + 1)..n {
            if stroke_masks[i].intersects(&stroke_masks[j]) {
                components.union(i, j);
            }
        }
    }

    // Map each root to a part index in order of first occurrence, so
    // parts come out sorted by smallest member.
    let mut parts: Vec<Vec<usize>> = Vec::new();
    let mut roots: Vec<usize> = Vec::new();
    for i in 0..n {
        let root = components.find_mut(i);
        match roots.iter().position(|&r| r == root) {
            Some(part) => parts[part].push(i),
            None => {
                roots.push(root);
                parts.push(vec![i]);
            }
        }
    }

    let mut union = Mask::new(width, height);
    let part_masks: Vec<Mask> = parts
        .iter()
        .map(|part| {
            let mut mask = Mask::new(width, height);
            for &idx in part {
                mask.or_assign(&stroke_masks[idx]);
            }
            union.or_assign(&mask);
            mask
        })
        .collect();

    Composition {
        parts,
        part_masks,
        union,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with(cells: &[(u32, u32)]) -> Mask {
        let mut mask = Mask::new(16, 16);
        for &(x, y) in cells {
            mask.set(x, y);
        }
        mask
    }

    #[test]
    fn zero_strokes_yield_zero_parts() {
        let composition = compose(&[], 16, 16);
        assert!(composition.parts.is_empty());
        assert!(composition.part_masks.is_empty());
        assert!(composition.union.is_empty());
    }

    #[test]
    fn disjoint_strokes_are_separate_parts() {
        let masks = vec![mask_with(&[(0, 0)]), mask_with(&[(10, 10)])];
        let composition = compose(&masks, 16, 16);
        assert_eq!(composition.parts, vec![vec![0], vec![1]]);
        assert_eq!(composition.union.foreground_count(), 2);
    }

    #[test]
    fn single_shared_cell_merges_strokes() {
        let masks = vec![
            mask_with(&[(0, 0), (1, 1)]),
            mask_with(&[(1, 1), (2, 2)]),
        ];
        let composition = compose(&masks, 16, 16);
        assert_eq!(composition.parts, vec![vec![0, 1]]);
        assert_eq!(composition.part_masks[0].foreground_count(), 3);
    }

    #[test]
    fn transitive_overlap_forms_one_part() {
        // 0 overlaps 1, 1 overlaps 2, but 0 and 2 are disjoint.
        let masks = vec![
            mask_with(&[(0, 0), (1, 0)]),
            mask_with(&[(1, 0), (2, 0)]),
            mask_with(&[(2, 0), (3, 0)]),
        ];
        let composition = compose(&masks, 16, 16);
        assert_eq!(composition.parts, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn parts_ordered_by_smallest_member() {
        // Strokes 0 and 2 connect; stroke 1 stands alone.
        let masks = vec![
            mask_with(&[(0, 0)]),
            mask_with(&[(8, 8)]),
            mask_with(&[(0, 0), (1, 0)]),
        ];
        let composition = compose(&masks, 16, 16);
        assert_eq!(composition.parts, vec![vec![0, 2], vec![1]]);
    }

    #[test]
    fn union_is_or_of_part_masks() {
        let masks = vec![mask_with(&[(0, 0)]), mask_with(&[(5, 5), (6, 6)])];
        let composition = compose(&masks, 16, 16);
        let mut expected = Mask::new(16, 16);
        for part_mask in &composition.part_masks {
            expected.or_assign(part_mask);
        }
        assert_eq!(composition.union, expected);
    }

    #[test]
    fn part_mask_contains_every_member_mask() {
        let masks = vec![
            mask_with(&[(0, 0), (1, 1)]),
            mask_with(&[(1, 1), (2, 2)]),
        ];
        let composition = compose(&masks, 16, 16);
        for &idx in &composition.parts[0] {
            let covered = masks[idx].minus(&composition.part_masks[0]);
            assert!(covered.is_empty(), "stroke {idx} not covered by its part");
        }
    }
}
