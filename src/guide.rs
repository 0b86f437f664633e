//! Guide lines: the annotation drawn while a field has focus.
//!
//! A field declares its guides as data ([`GuideSpec`]) naming anchors, not
//! as accessor closures. Building a guide looks the anchors up in whatever
//! geometry is at hand (resolved or presentation) and yields ordered point
//! lists tagged with a line style. [`build_path_with_style`] turns one into
//! SVG path data.

use serde::Serialize;

use crate::defaults;
use crate::fields::{self, round_to};
use crate::geometry::project_onto_line;
use crate::log::debug;
use crate::params::Field;
use crate::resolve::{Anchor, Anchors, ResolvedGeometry};
use crate::types::Point;
use crate::view::PresentationGeometry;

/// Line style of one guide polyline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Straight,
    Dashed,
}

/// Coordinate axis a reference guide is aligned with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn of(self, p: Point) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    fn with(self, p: Point, value: f64) -> Point {
        match self {
            Axis::X => Point::new(value, p.y),
            Axis::Y => Point::new(p.x, value),
        }
    }
}

/// One polyline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Guide {
    pub style: Style,
    pub points: Vec<Point>,
}

impl Guide {
    pub fn new(style: Style, points: Vec<Point>) -> Self {
        Self { style, points }
    }

    /// True if there is something to draw: at least one point, all finite
    pub fn is_drawable(&self) -> bool {
        !self.points.is_empty() && self.points.iter().all(|p| p.is_finite())
    }
}

/// Anything anchors can be looked up in
pub trait AnchorLookup {
    fn point(&self, anchor: Anchor) -> Point;
}

impl AnchorLookup for Anchors {
    fn point(&self, anchor: Anchor) -> Point {
        self.get(anchor)
    }
}

impl AnchorLookup for ResolvedGeometry {
    fn point(&self, anchor: Anchor) -> Point {
        self.anchors.get(anchor)
    }
}

impl AnchorLookup for PresentationGeometry {
    fn point(&self, anchor: Anchor) -> Point {
        self.anchors.get(anchor)
    }
}

/// Declarative guide descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum GuideSpec {
    /// A polyline through the anchors, in order
    Between {
        style: Style,
        anchors: &'static [Anchor],
    },
    /// Solid measured segment plus dashed reference, for axis-aligned
    /// dimensions such as reach and stack. Expands to two guides.
    ToReferenceLine { from: Anchor, axis: Axis, to: Anchor },
    /// Segment from `from` to its foot on the line through `line`
    Perpendicular {
        style: Style,
        from: Anchor,
        line: [Anchor; 2],
    },
}

impl GuideSpec {
    pub const fn straight(anchors: &'static [Anchor]) -> Self {
        GuideSpec::Between {
            style: Style::Straight,
            anchors,
        }
    }

    pub const fn dashed(anchors: &'static [Anchor]) -> Self {
        GuideSpec::Between {
            style: Style::Dashed,
            anchors,
        }
    }

    pub fn build(&self, geometry: &impl AnchorLookup) -> Vec<Guide> {
        match *self {
            GuideSpec::Between { style, anchors } => {
                vec![Guide::new(style, guide_between_points(geometry, anchors))]
            }
            GuideSpec::ToReferenceLine { from, axis, to } => {
                line_from_point_to_reference_line(geometry, from, axis, to).to_vec()
            }
            GuideSpec::Perpendicular { style, from, line } => vec![Guide::new(
                style,
                line_from_point_perpendicular_to_line(geometry, from, line).to_vec(),
            )],
        }
    }
}

/// Look up each anchor in order
pub fn guide_between_points(geometry: &impl AnchorLookup, anchors: &[Anchor]) -> Vec<Point> {
    anchors.iter().map(|a| geometry.point(*a)).collect()
}

/// Two guides measuring `to` against `from` along one axis.
///
/// The solid guide runs from `from` to `to` with the `axis` coordinate
/// pinned to `from`'s (the measured span). The dashed guide runs from `to`
/// through the same aligned point and half the span beyond it (the reference
/// line the span is measured against).
pub fn line_from_point_to_reference_line(
    geometry: &impl AnchorLookup,
    from: Anchor,
    axis: Axis,
    to: Anchor,
) -> [Guide; 2] {
    let pa = geometry.point(from);
    let pb = geometry.point(to);
    let aligned = axis.with(pb, axis.of(pa));
    let overshoot = axis.of(pa) - defaults::REFERENCE_OVERSHOOT * (axis.of(pb) - axis.of(pa));

    [
        Guide::new(Style::Straight, vec![pa, aligned]),
        Guide::new(Style::Dashed, vec![pb, axis.with(pb, overshoot)]),
    ]
}

/// `[p, foot of p on line]`
pub fn line_from_point_perpendicular_to_line(
    geometry: &impl AnchorLookup,
    from: Anchor,
    line: [Anchor; 2],
) -> [Point; 2] {
    let p = geometry.point(from);
    let foot = project_onto_line(geometry.point(line[0]), geometry.point(line[1]), p);
    [p, foot]
}

/// All guides for a field. Empty for fields without a guide.
pub fn guide_for(field: Field, geometry: &impl AnchorLookup) -> Vec<Guide> {
    fields::spec(field)
        .guides
        .iter()
        .flat_map(|spec| spec.build(geometry))
        .collect()
}

/// SVG path data under construction.
///
/// Coordinates are rounded to the display precision; `-0` is normalized.
#[derive(Debug, Default)]
pub struct PathData {
    commands: Vec<String>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(self, p: Point) -> Self {
        self.push('M', p)
    }

    pub fn line_to(self, p: Point) -> Self {
        self.push('L', p)
    }

    fn push(mut self, op: char, p: Point) -> Self {
        let x = round_to(p.x, defaults::ROUND_PRECISION);
        let y = round_to(p.y, defaults::ROUND_PRECISION);
        self.commands.push(format!("{op}{x} {y}"));
        self
    }

    pub fn build(self) -> String {
        self.commands.join(" ")
    }
}

/// A guide ready for drawing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuidePath {
    pub style: Style,
    /// SVG path data
    pub d: String,
    /// `stroke-dasharray`, set for dashed guides
    pub dash_array: Option<&'static str>,
}

/// Turn a guide into path data. `None` when there is nothing drawable.
pub fn build_path_with_style(guide: &Guide) -> Option<GuidePath> {
    if !guide.is_drawable() {
        debug!(?guide, "skipping guide with no drawable points");
        return None;
    }

    let (first, rest) = guide.points.split_first()?;
    let d = rest
        .iter()
        .fold(PathData::new().move_to(*first), |path, p| path.line_to(*p))
        .build();

    Some(GuidePath {
        style: guide.style,
        d,
        dash_array: match guide.style {
            Style::Straight => None,
            Style::Dashed => Some(defaults::DASH_ARRAY),
        },
    })
}
