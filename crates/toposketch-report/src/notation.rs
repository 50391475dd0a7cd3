//! The algebraic symbols used in rendered statements.
//!
//! Fixed notation; renderers never invent symbols outside this table.

/// Interior marker, appended to a set name: `A⁰`.
pub const INTERIOR: &str = "\u{2070}";

/// Boundary operator, prefixed to a set name: `∂A`.
pub const BOUNDARY: &str = "\u{2202}";

/// Closure marker: a combining overline appended to a set name.
pub const CLOSURE: &str = "\u{305}";

/// Set membership: `∈`.
pub const ELEMENT_OF: &str = "\u{2208}";

/// Negated membership: `∉`.
pub const NOT_ELEMENT_OF: &str = "\u{2209}";

/// Intersection: `∩`.
pub const INTERSECTION: &str = "\u{2229}";

/// Set difference: `\`.
pub const DIFFERENCE: &str = "\\";

/// The empty set: `∅`.
pub const EMPTY_SET: &str = "\u{2205}";

/// Proper-subset relation: `⊂`.
pub const SUBSET: &str = "\u{2282}";

/// Equality: `=`.
pub const EQUAL: &str = "=";

/// Inequality: `≠`.
pub const NOT_EQUAL: &str = "\u{2260}";

/// Neighborhood operator, applied to a point name: `N(P1)`.
pub const NEIGHBORHOOD: &str = "N";
