//! SVG boundary overlay serializer.
//!
//! Converts a boundary mask into an SVG document with a single `<path>`
//! covering every boundary cell as a unit square (`M x,y h1 v1 h-1 z`
//! per cell), built with the [`svg`] crate for document construction.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::Path;

use toposketch_engine::Mask;

/// Fill color of the boundary cells.
const BOUNDARY_FILL: &str = "rgba(255, 100, 100, 0.2)";

/// Build the `d` attribute for a boundary mask: one closed unit square
/// per foreground cell, in row-major order.
///
/// Returns an empty string for an empty mask.
#[must_use]
pub fn boundary_path_data(mask: &Mask) -> String {
    let cells: Vec<String> = mask
        .foreground_points()
        .into_iter()
        .map(|(x, y)| format!("M{x},{y}h1v1h-1z"))
        .collect();
    cells.join(" ")
}

/// Serialize a boundary mask into an SVG document string.
///
/// The `viewBox` matches the mask's grid so one SVG unit is one cell.
/// An empty mask produces a valid document with no `<path>` element.
#[must_use]
pub fn to_overlay_svg(mask: &Mask) -> String {
    let mut doc = Document::new()
        .set("width", mask.width())
        .set("height", mask.height())
        .set("viewBox", (0, 0, mask.width(), mask.height()));

    let d = boundary_path_data(mask);
    if !d.is_empty() {
        let path = Path::new()
            .set("d", d)
            .set("fill", BOUNDARY_FILL)
            .set("stroke", "none");
        doc = doc.add(path);
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}
