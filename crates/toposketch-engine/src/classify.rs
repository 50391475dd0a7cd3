//! Topology classification: open, closed, or neither.
//!
//! A part's type comes from the *kinds* of strokes that actually border
//! it: collect the kinds of member strokes whose own mask touches the
//! part's boundary cells (a stroke buried in interior fill contributes
//! nothing). Exactly one kind represented means the part is that kind;
//! any mix means neither. The region's type is the parts' shared type
//! when they all agree, otherwise neither.
//!
//! An open region, by definition, excludes its own boundary: its final
//! mask is the union mask minus the boundary mask. Closed and neither
//! regions keep the union mask unmodified.

use crate::boundary::part_boundary;
use crate::compose::Composition;
use crate::mask::Mask;
use crate::types::{SetType, StrokeKind};

/// Classify every part of a composition.
///
/// `stroke_kinds` and `stroke_masks` are indexed by stroke, parallel to
/// the indices stored in `composition.parts`.
#[must_use = "returns one type per part"]
pub fn classify_parts(
    composition: &Composition,
    stroke_kinds: &[StrokeKind],
    stroke_masks: &[Mask],
    union_boundary: &Mask,
) -> Vec<SetType> {
    composition
        .parts
        .iter()
        .zip(&composition.part_masks)
        .map(|(part, part_mask)| {
            let edge = part_boundary(part_mask, union_boundary);
            classify_part(part, stroke_kinds, stroke_masks, &edge)
        })
        .collect()
}

/// Classify one part from the kinds of strokes touching its boundary.
fn classify_part(
    part: &[usize],
    stroke_kinds: &[StrokeKind],
    stroke_masks: &[Mask],
    part_edge: &Mask,
) -> SetType {
    let mut kinds_seen: Option<StrokeKind> = None;
    for &idx in part {
        debug_assert!(idx < stroke_kinds.len(), "part references stroke {idx}");
        if !stroke_masks[idx].intersects(part_edge) {
            continue;
        }
        match kinds_seen {
            None => kinds_seen = Some(stroke_kinds[idx]),
            Some(kind) if kind == stroke_kinds[idx] => {}
            Some(_) => return SetType::Neither,
        }
    }
    match kinds_seen {
        Some(StrokeKind::Open) => SetType::Open,
        Some(StrokeKind::Closed) => SetType::Closed,
        None => SetType::Neither,
    }
}

/// Derive the region's type from its part types.
///
/// All parts agreeing on one type makes the region that type; anything
/// else (including zero parts) is [`SetType::Neither`].
#[must_use]
pub fn classify_region(part_types: &[SetType]) -> SetType {
    match part_types.split_first() {
        Some((&first, rest)) if rest.iter().all(|&t| t == first) => first,
        _ => SetType::Neither,
    }
}

/// Derive the final analysis mask from the region's type.
///
/// Open regions shed their boundary cells; closed and neither regions
/// keep the union mask as-is.
#[must_use = "returns the final analysis mask"]
pub fn final_mask(union: &Mask, union_boundary: &Mask, set_type: SetType) -> Mask {
    if set_type == SetType::Open {
        union.minus(union_boundary)
    } else {
        union.clone()
    }
}
