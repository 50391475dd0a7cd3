//! toposketch-engine: raster topology and set analysis (sans-IO).
//!
//! Turns freehand strokes grouped into named regions into topological
//! facts through: rasterization -> part composition -> boundary
//! extraction -> open/closed classification -> diameter -> point and
//! pairwise relations.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! scene values and returns structured data. Rendering the results as
//! notation or overlays lives in `toposketch-report`.

pub mod boundary;
pub mod classify;
pub mod compose;
pub mod diagnostics;
pub mod hull;
pub mod mask;
pub mod raster;
pub mod relate;
pub mod types;

pub use diagnostics::{AnalysisDiagnostics, RegionDiagnostics};
pub use mask::Mask;
pub use raster::FillRule;
pub use relate::{
    Containment, NeighborhoodRelation, NeighborhoodStatement, PairRelation, PointClass,
    PointRegionClassification, PointReport,
};
pub use types::{
    AnalysisConfig, AnalysisError, AnalysisReport, Point, PointMarker, Region, RegionAnalysis,
    RegionId, RegionReport, Scene, SetType, Stroke, StrokeKind,
};

/// Run the full analysis over a scene.
///
/// Analyzes every region with at least one stroke, classifies every
/// point marker against every analyzed region, and relates every
/// unordered pair of analyzed regions. Regions with zero strokes are
/// absent from the report entirely.
///
/// The run is a pure function of `scene` and `config`: no state
/// survives between calls, and identical inputs produce identical
/// reports.
///
/// # Analysis steps (per region)
///
/// 1. Rasterize each stroke to an occupancy mask
/// 2. Group strokes into connected parts (shared-cell adjacency)
/// 3. Extract the union boundary over the 8-neighborhood
/// 4. Classify each part and the region (open / closed / neither)
/// 5. Derive the final mask (open regions shed their boundary)
/// 6. Measure the geometric diameter of the final mask
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidConfig`] if the grid has a zero
/// dimension or the stroke width is zero.
pub fn analyze(scene: &Scene, config: &AnalysisConfig) -> Result<AnalysisReport, AnalysisError> {
    config.validate()?;

    let mut regions = std::collections::BTreeMap::new();
    for (id, region) in &scene.regions {
        if region.strokes.is_empty() {
            continue;
        }
        regions.insert(
            id.clone(),
            RegionReport {
                name: region.name.clone(),
                analysis: analyze_region(region, config),
            },
        );
    }

    let points = scene
        .points
        .iter()
        .map(|marker| {
            let classifications = regions
                .iter()
                .map(|(id, report)| PointRegionClassification {
                    region: id.clone(),
                    class: relate::classify_point(marker, &report.analysis, config),
                })
                .collect();
            let neighborhoods = regions
                .iter()
                .filter_map(|(id, report)| {
                    relate::neighborhood_relation(marker, &report.analysis.mask).map(|relation| {
                        NeighborhoodStatement {
                            region: id.clone(),
                            relation,
                        }
                    })
                })
                .collect();
            PointReport {
                marker: *marker,
                classifications,
                neighborhoods,
            }
        })
        .collect();

    // Unordered pairs in (first, second) identifier order; the BTreeMap
    // iteration already sorts the ids.
    let ids: Vec<&RegionId> = regions.keys().collect();
    let mut pairs = Vec::new();
    for (i, &first) in ids.iter().enumerate() {
        for &second in &ids[i + 1..] {
            pairs.push(relate::relate_pair(
                first,
                &regions[first].analysis,
                second,
                &regions[second].analysis,
            ));
        }
    }

    Ok(AnalysisReport {
        regions,
        points,
        pairs,
    })
}

/// Analyze a single region: parts, types, final mask, boundary, and
/// diameter.
///
/// Total over well-formed input; a region whose strokes all rasterize
/// to empty masks yields empty parts in the result rather than an
/// error.
#[must_use]
pub fn analyze_region(region: &Region, config: &AnalysisConfig) -> RegionAnalysis {
    let stroke_masks: Vec<Mask> = region
        .strokes
        .iter()
        .map(|stroke| raster::rasterize(stroke, config))
        .collect();
    let stroke_kinds: Vec<StrokeKind> = region.strokes.iter().map(|stroke| stroke.kind).collect();

    let composition = compose::compose(&stroke_masks, config.width, config.height);
    let union_boundary = boundary::boundary(&composition.union);
    let part_types =
        classify::classify_parts(&composition, &stroke_kinds, &stroke_masks, &union_boundary);
    let set_type = classify::classify_region(&part_types);
    let final_mask = classify::final_mask(&composition.union, &union_boundary, set_type);
    let diameter = hull::diameter(&final_mask);

    RegionAnalysis {
        parts: composition.parts,
        part_types,
        set_type,
        mask: final_mask,
        boundary: union_boundary,
        diameter,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Stroke {
        Stroke::closed(vec![
            Point::new(x0, y0),
            Point::new(x0 + size, y0),
            Point::new(x0 + size, y0 + size),
            Point::new(x0, y0 + size),
        ])
    }

    fn scene_with(regions: Vec<(&str, Vec<Stroke>)>) -> Scene {
        let mut scene = Scene::default();
        for (id, strokes) in regions {
            let mut region = Region::new(id);
            region.strokes = strokes;
            scene.regions.insert(RegionId::from(id), region);
        }
        scene
    }

    #[test]
    fn invalid_config_is_rejected() {
        let scene = Scene::default();
        let config = AnalysisConfig::with_grid(0, 32);
        assert!(matches!(
            analyze(&scene, &config),
            Err(AnalysisError::InvalidConfig(_)),
        ));
    }

    #[test]
    fn empty_scene_yields_empty_report() {
        let report = analyze(&Scene::default(), &AnalysisConfig::with_grid(32, 32)).unwrap();
        assert!(report.regions.is_empty());
        assert!(report.points.is_empty());
        assert!(report.pairs.is_empty());
    }

    #[test]
    fn strokeless_region_is_absent_from_report() {
        let scene = scene_with(vec![("A", vec![]), ("B", vec![square(5.0, 5.0, 15.0)])]);
        let report = analyze(&scene, &AnalysisConfig::with_grid(32, 32)).unwrap();
        assert!(!report.regions.contains_key(&RegionId::from("A")));
        assert!(report.regions.contains_key(&RegionId::from("B")));
        assert!(report.pairs.is_empty());
    }

    #[test]
    fn single_closed_region_analyzes_closed() {
        let scene = scene_with(vec![("A", vec![square(5.0, 5.0, 20.0)])]);
        let report = analyze(&scene, &AnalysisConfig::with_grid(48, 48)).unwrap();
        let analysis = &report.regions[&RegionId::from("A")].analysis;
        assert_eq!(analysis.parts_count(), 1);
        assert_eq!(analysis.set_type, SetType::Closed);
        assert!(analysis.diameter > 0.0);
    }

    #[test]
    fn report_carries_display_name() {
        let mut scene = Scene::default();
        let mut region = Region::new("My Set");
        region.strokes.push(square(5.0, 5.0, 15.0));
        scene.regions.insert(RegionId::from("A"), region);
        let report = analyze(&scene, &AnalysisConfig::with_grid(32, 32)).unwrap();
        assert_eq!(report.regions[&RegionId::from("A")].name, "My Set");
    }

    #[test]
    fn points_are_classified_against_every_region() {
        let mut scene = scene_with(vec![
            ("A", vec![square(4.0, 4.0, 10.0)]),
            ("B", vec![square(20.0, 20.0, 10.0)]),
        ]);
        scene.points.push(PointMarker::new(9.0, 9.0, 0.0));
        let report = analyze(&scene, &AnalysisConfig::with_grid(40, 40)).unwrap();

        assert_eq!(report.points.len(), 1);
        let point = &report.points[0];
        assert_eq!(point.classifications.len(), 2);
        assert_eq!(point.classifications[0].region, RegionId::from("A"));
        assert_eq!(point.classifications[0].class, PointClass::Interior);
        assert_eq!(point.classifications[1].class, PointClass::Exterior);
        // Radius 0: no neighborhood statements.
        assert!(point.neighborhoods.is_empty());
    }

    #[test]
    fn radius_marker_gets_neighborhood_statements() {
        let mut scene = scene_with(vec![("A", vec![square(4.0, 4.0, 14.0)])]);
        scene.points.push(PointMarker::new(11.0, 11.0, 2.0));
        let report = analyze(&scene, &AnalysisConfig::with_grid(40, 40)).unwrap();
        let point = &report.points[0];
        assert_eq!(point.neighborhoods.len(), 1);
        assert_eq!(
            point.neighborhoods[0].relation,
            NeighborhoodRelation::ContainedIn,
        );
    }

    #[test]
    fn tiny_radius_marker_gets_no_neighborhood_statements() {
        // Positive radius, but too small to reach any grid coordinate
        // from a cell-center placement: the disc samples zero cells.
        let mut scene = scene_with(vec![("A", vec![square(4.0, 4.0, 14.0)])]);
        scene.points.push(PointMarker::new(11.5, 11.5, 0.4));
        let report = analyze(&scene, &AnalysisConfig::with_grid(40, 40)).unwrap();
        let point = &report.points[0];
        assert_eq!(point.classifications.len(), 1);
        assert!(point.neighborhoods.is_empty());
    }

    #[test]
    fn pairs_cover_every_unordered_pair_in_order() {
        let scene = scene_with(vec![
            ("A", vec![square(2.0, 2.0, 6.0)]),
            ("B", vec![square(12.0, 2.0, 6.0)]),
            ("C", vec![square(22.0, 2.0, 6.0)]),
        ]);
        let report = analyze(&scene, &AnalysisConfig::with_grid(40, 40)).unwrap();
        let pair_ids: Vec<(&str, &str)> = report
            .pairs
            .iter()
            .map(|p| (p.first.as_str(), p.second.as_str()))
            .collect();
        assert_eq!(pair_ids, vec![("A", "B"), ("A", "C"), ("B", "C")]);
    }

    #[test]
    fn analysis_is_deterministic() {
        let mut scene = scene_with(vec![
            ("A", vec![square(4.0, 4.0, 12.0)]),
            ("B", vec![square(10.0, 10.0, 12.0)]),
        ]);
        scene.points.push(PointMarker::new(8.0, 8.0, 3.0));
        let config = AnalysisConfig::with_grid(40, 40);
        assert_eq!(analyze(&scene, &config).unwrap(), analyze(&scene, &config).unwrap());
    }

    #[test]
    fn report_serializes_to_json() {
        let scene = scene_with(vec![("A", vec![square(5.0, 5.0, 15.0)])]);
        let report = analyze(&scene, &AnalysisConfig::with_grid(32, 32)).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let deserialized: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, deserialized);
    }
}
