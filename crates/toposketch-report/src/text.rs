//! Text rendering of an analysis report in set notation.
//!
//! Produces the three sections the analysis surface displays: a
//! per-region geometry summary, per-point classification statements,
//! and pairwise logic statements grouped by operator. Each section has
//! a fixed fallback string for the empty case, so the renderer always
//! returns displayable text.
//!
//! Points are named `P1`, `P2`, ... in scene order. Regions appear
//! under their display names; statements reference the name, not the
//! identifier.

use std::fmt::Write;

use toposketch_engine::{
    AnalysisReport, Containment, NeighborhoodRelation, PointClass, PointReport, RegionId,
};

use crate::notation;

/// Render all three sections, separated by blank lines.
#[must_use]
pub fn render(report: &AnalysisReport) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        geometry_section(report),
        points_section(report),
        logic_section(report),
    )
}

/// Per-region geometry summary: type, part count, diameter.
#[must_use]
pub fn geometry_section(report: &AnalysisReport) -> String {
    let mut out = String::new();
    for region_report in report.regions.values() {
        let analysis = &region_report.analysis;
        let _ = writeln!(out, "### {}", region_report.name);
        let _ = writeln!(out, "* **Type:** {}", analysis.set_type);
        let _ = writeln!(out, "* **Parts:** {}", analysis.parts_count());
        let _ = writeln!(out, "* **Diameter:** {:.2} px", analysis.diameter);
        let _ = writeln!(out, "---");
    }
    if out.is_empty() {
        "No sets drawn.".to_owned()
    } else {
        out
    }
}

/// Per-point classification statements.
///
/// For each point: a status line placing it in (or out of) the closures
/// it touches, a detail line with one membership statement per region,
/// and a neighborhood line when the marker has a radius and the disc
/// sampled at least one cell.
#[must_use]
pub fn points_section(report: &AnalysisReport) -> String {
    let mut out = String::new();
    for (i, point) in report.points.iter().enumerate() {
        let point_name = format!("P{}", i + 1);
        render_point(&mut out, report, point, &point_name);
    }
    if out.is_empty() {
        "No points placed.".to_owned()
    } else {
        out
    }
}

fn render_point(out: &mut String, report: &AnalysisReport, point: &PointReport, point_name: &str) {
    let mut closures: Vec<String> = Vec::new();
    let mut details: Vec<String> = Vec::new();

    for classification in &point.classifications {
        let name = display_name(report, &classification.region);
        match classification.class {
            PointClass::Interior => {
                details.push(format!(
                    "{point_name} {} {name}{}",
                    notation::ELEMENT_OF,
                    notation::INTERIOR,
                ));
                closures.push(format!("{name}{}", notation::CLOSURE));
            }
            PointClass::Boundary => {
                details.push(format!(
                    "{point_name} {} {}{name}",
                    notation::ELEMENT_OF,
                    notation::BOUNDARY,
                ));
                closures.push(format!("{name}{}", notation::CLOSURE));
            }
            PointClass::Exterior => {
                details.push(format!(
                    "{point_name} {} {name}{}",
                    notation::NOT_ELEMENT_OF,
                    notation::CLOSURE,
                ));
            }
        }
    }

    if closures.is_empty() {
        let _ = writeln!(
            out,
            "{point_name} {} (All {}s)",
            notation::NOT_ELEMENT_OF,
            notation::CLOSURE,
        );
    } else {
        let _ = writeln!(
            out,
            "{point_name} {} {}",
            notation::ELEMENT_OF,
            closures.join(" "),
        );
    }
    let _ = writeln!(out, "* {}", details.join(" | "));

    if !point.neighborhoods.is_empty() {
        let statements: Vec<String> = point
            .neighborhoods
            .iter()
            .map(|statement| {
                let name = display_name(report, &statement.region);
                let neighborhood = format!("{}({point_name})", notation::NEIGHBORHOOD);
                match statement.relation {
                    NeighborhoodRelation::ContainedIn => {
                        format!("{neighborhood} {} {name}", notation::SUBSET)
                    }
                    NeighborhoodRelation::Meets => format!(
                        "{neighborhood} {} {name} {} {}",
                        notation::INTERSECTION,
                        notation::NOT_EQUAL,
                        notation::EMPTY_SET,
                    ),
                    NeighborhoodRelation::Disjoint => format!(
                        "{neighborhood} {} {name} {} {}",
                        notation::INTERSECTION,
                        notation::EQUAL,
                        notation::EMPTY_SET,
                    ),
                }
            })
            .collect();
        let _ = writeln!(out, "* {}", statements.join(" | "));
    }
    let _ = writeln!(out);
}

/// Pairwise logic statements grouped under Intersection, Difference,
/// and Containment headings.
#[must_use]
pub fn logic_section(report: &AnalysisReport) -> String {
    let mut intersections: Vec<String> = Vec::new();
    let mut differences: Vec<String> = Vec::new();
    let mut containments: Vec<String> = Vec::new();

    for pair in &report.pairs {
        let first = display_name(report, &pair.first);
        let second = display_name(report, &pair.second);

        intersections.push(emptiness_statement(
            &format!("{first} {} {second}", notation::INTERSECTION),
            pair.intersection_nonempty,
        ));
        differences.push(emptiness_statement(
            &format!("{first} {} {second}", notation::DIFFERENCE),
            pair.first_minus_second_nonempty,
        ));
        differences.push(emptiness_statement(
            &format!("{second} {} {first}", notation::DIFFERENCE),
            pair.second_minus_first_nonempty,
        ));

        match pair.containment {
            Some(Containment::FirstInSecond) => {
                containments.push(format!("{first} {} {second}", notation::SUBSET));
            }
            Some(Containment::SecondInFirst) => {
                containments.push(format!("{second} {} {first}", notation::SUBSET));
            }
            Some(Containment::Equal) => {
                containments.push(format!("{first} {} {second}", notation::EQUAL));
            }
            None => {}
        }
    }

    let mut out = String::new();
    write_group(
        &mut out,
        &format!("Intersection ({})", notation::INTERSECTION),
        &intersections,
    );
    write_group(
        &mut out,
        &format!("Difference ({})", notation::DIFFERENCE),
        &differences,
    );
    write_group(
        &mut out,
        &format!("Containment ({} or {})", notation::SUBSET, notation::EQUAL),
        &containments,
    );

    if out.is_empty() {
        "No interactions.".to_owned()
    } else {
        out
    }
}

/// `expr ≠ ∅` or `expr = ∅` depending on `nonempty`.
fn emptiness_statement(expr: &str, nonempty: bool) -> String {
    let relation = if nonempty {
        notation::NOT_EQUAL
    } else {
        notation::EQUAL
    };
    format!("{expr} {relation} {}", notation::EMPTY_SET)
}

fn write_group(out: &mut String, heading: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    let _ = writeln!(out, "### {heading}");
    for line in lines {
        let _ = writeln!(out, "* {line}");
    }
    let _ = writeln!(out, "---");
}

/// The region's display name, falling back to the identifier.
fn display_name<'a>(report: &'a AnalysisReport, id: &'a RegionId) -> &'a str {
    report
        .regions
        .get(id)
        .map_or_else(|| id.as_str(), |region_report| &region_report.name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use toposketch_engine::{
        AnalysisConfig, Point, PointMarker, Region, Scene, Stroke, analyze,
    };

    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Stroke {
        Stroke::closed(vec![
            Point::new(x0, y0),
            Point::new(x0 + size, y0),
            Point::new(x0 + size, y0 + size),
            Point::new(x0, y0 + size),
        ])
    }

    fn add_region(scene: &mut Scene, id: &str, strokes: Vec<Stroke>) {
        let mut region = Region::new(id);
        region.strokes = strokes;
        scene.regions.insert(RegionId::from(id), region);
    }

    #[test]
    fn empty_report_uses_fallbacks() {
        let report = analyze(&Scene::default(), &AnalysisConfig::with_grid(32, 32)).unwrap();
        assert_eq!(geometry_section(&report), "No sets drawn.");
        assert_eq!(points_section(&report), "No points placed.");
        assert_eq!(logic_section(&report), "No interactions.");
    }

    #[test]
    fn geometry_section_lists_type_parts_diameter() {
        let mut scene = Scene::default();
        add_region(&mut scene, "A", vec![square(5.0, 5.0, 20.0)]);
        let report = analyze(&scene, &AnalysisConfig::with_grid(48, 48)).unwrap();

        let text = geometry_section(&report);
        assert!(text.contains("### A"));
        assert!(text.contains("* **Type:** Closed"));
        assert!(text.contains("* **Parts:** 1"));
        assert!(text.contains("px"));
    }

    #[test]
    fn interior_point_renders_interior_membership() {
        let mut scene = Scene::default();
        add_region(&mut scene, "A", vec![square(4.0, 4.0, 20.0)]);
        scene.points.push(PointMarker::new(14.0, 14.0, 0.0));
        let report = analyze(&scene, &AnalysisConfig::with_grid(48, 48)).unwrap();

        let text = points_section(&report);
        assert!(text.contains("P1 \u{2208} A\u{305}"), "status line: {text}");
        assert!(text.contains("P1 \u{2208} A\u{2070}"), "detail line: {text}");
    }

    #[test]
    fn exterior_point_renders_negated_closure() {
        let mut scene = Scene::default();
        add_region(&mut scene, "A", vec![square(4.0, 4.0, 8.0)]);
        scene.points.push(PointMarker::new(40.0, 40.0, 0.0));
        let report = analyze(&scene, &AnalysisConfig::with_grid(48, 48)).unwrap();

        let text = points_section(&report);
        assert!(text.contains("P1 \u{2209} (All \u{305}s)"), "{text}");
        assert!(text.contains("P1 \u{2209} A\u{305}"), "{text}");
    }

    #[test]
    fn boundary_point_uses_boundary_operator() {
        let mut scene = Scene::default();
        add_region(&mut scene, "A", vec![square(4.0, 4.0, 20.0)]);
        // On the left edge of the filled square.
        scene.points.push(PointMarker::new(4.0, 14.0, 0.0));
        let report = analyze(&scene, &AnalysisConfig::with_grid(48, 48)).unwrap();

        let text = points_section(&report);
        assert!(text.contains("P1 \u{2208} \u{2202}A"), "{text}");
    }

    #[test]
    fn neighborhood_line_renders_for_radius_markers() {
        let mut scene = Scene::default();
        add_region(&mut scene, "A", vec![square(4.0, 4.0, 20.0)]);
        scene.points.push(PointMarker::new(14.0, 14.0, 2.0));
        let report = analyze(&scene, &AnalysisConfig::with_grid(48, 48)).unwrap();

        let text = points_section(&report);
        assert!(text.contains("N(P1) \u{2282} A"), "{text}");
    }

    #[test]
    fn points_are_numbered_in_scene_order() {
        let mut scene = Scene::default();
        add_region(&mut scene, "A", vec![square(4.0, 4.0, 10.0)]);
        scene.points.push(PointMarker::new(8.0, 8.0, 0.0));
        scene.points.push(PointMarker::new(40.0, 40.0, 0.0));
        let report = analyze(&scene, &AnalysisConfig::with_grid(48, 48)).unwrap();

        let text = points_section(&report);
        let p1 = text.find("P1").unwrap();
        let p2 = text.find("P2").unwrap();
        assert!(p1 < p2);
    }

    #[test]
    fn logic_section_groups_statements() {
        let mut scene = Scene::default();
        add_region(&mut scene, "A", vec![square(10.0, 10.0, 8.0)]);
        add_region(&mut scene, "B", vec![square(4.0, 4.0, 30.0)]);
        let report = analyze(&scene, &AnalysisConfig::with_grid(48, 48)).unwrap();

        let text = logic_section(&report);
        assert!(text.contains("### Intersection (\u{2229})"), "{text}");
        assert!(text.contains("A \u{2229} B \u{2260} \u{2205}"), "{text}");
        assert!(text.contains("### Difference (\\)"), "{text}");
        assert!(text.contains("A \\ B = \u{2205}"), "{text}");
        assert!(text.contains("B \\ A \u{2260} \u{2205}"), "{text}");
        assert!(text.contains("### Containment (\u{2282} or =)"), "{text}");
        assert!(text.contains("A \u{2282} B"), "{text}");
    }

    #[test]
    fn disjoint_regions_emit_empty_intersection() {
        let mut scene = Scene::default();
        add_region(&mut scene, "A", vec![square(2.0, 2.0, 8.0)]);
        add_region(&mut scene, "B", vec![square(30.0, 30.0, 8.0)]);
        let report = analyze(&scene, &AnalysisConfig::with_grid(48, 48)).unwrap();

        let text = logic_section(&report);
        assert!(text.contains("A \u{2229} B = \u{2205}"), "{text}");
        assert!(!text.contains("### Containment"), "{text}");
    }

    #[test]
    fn statements_use_display_names() {
        let mut scene = Scene::default();
        let mut region = Region::new("Alpha");
        region.strokes = vec![square(4.0, 4.0, 12.0)];
        scene.regions.insert(RegionId::from("A"), region);
        let report = analyze(&scene, &AnalysisConfig::with_grid(32, 32)).unwrap();

        let text = geometry_section(&report);
        assert!(text.contains("### Alpha"));
    }

    #[test]
    fn render_joins_all_three_sections() {
        let report = analyze(&Scene::default(), &AnalysisConfig::with_grid(32, 32)).unwrap();
        let text = render(&report);
        assert!(text.contains("No sets drawn."));
        assert!(text.contains("No points placed."));
        assert!(text.contains("No interactions."));
    }
}
