//! Frame geometry resolver.
//!
//! A fixed, dependency-ordered pipeline of closed-form steps that turns a
//! [`FrameParams`] into named anchor points and a few back-derived scalars.
//! Later steps read points produced by earlier ones, so the order below is
//! load-bearing.
//!
//! Nothing here fails. An infeasible frame (bb drop longer than the
//! chainstay, a top tube that cannot reach the head tube) yields NaN in the
//! affected anchors; a short list of watched anchors is then promoted into
//! per-field [`FieldError`]s.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::defaults;
use crate::errors::FieldError;
use crate::geometry::{circle_line_intersections, signed_offset, vector_from_polar};
use crate::log::{debug, warn};
use crate::params::{Field, FrameParams, ViewContext};
use crate::types::Point;

/// Named points of the frame skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    Bb,
    FrontHub,
    RearHub,
    HeadTubeStart,
    HeadTubeEnd,
    TopTubeStart,
    TopTubeEnd,
    BottomTubeStart,
    SeatTubeEnd,
    ForkStart,
    HeadTubeProjection,
}

impl Anchor {
    pub const ALL: [Anchor; 11] = [
        Anchor::Bb,
        Anchor::FrontHub,
        Anchor::RearHub,
        Anchor::HeadTubeStart,
        Anchor::HeadTubeEnd,
        Anchor::TopTubeStart,
        Anchor::TopTubeEnd,
        Anchor::BottomTubeStart,
        Anchor::SeatTubeEnd,
        Anchor::ForkStart,
        Anchor::HeadTubeProjection,
    ];
}

/// One position per [`Anchor`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anchors {
    pub bb: Point,
    pub front_hub: Point,
    pub rear_hub: Point,
    /// Bottom of the head tube (fork side)
    pub head_tube_start: Point,
    /// Top of the head tube, fixed by reach and stack
    pub head_tube_end: Point,
    pub top_tube_start: Point,
    pub top_tube_end: Point,
    pub bottom_tube_start: Point,
    pub seat_tube_end: Point,
    pub fork_start: Point,
    /// Where the steering axis crosses the hub line
    pub head_tube_projection: Point,
}

impl Anchors {
    pub fn get(&self, anchor: Anchor) -> Point {
        match anchor {
            Anchor::Bb => self.bb,
            Anchor::FrontHub => self.front_hub,
            Anchor::RearHub => self.rear_hub,
            Anchor::HeadTubeStart => self.head_tube_start,
            Anchor::HeadTubeEnd => self.head_tube_end,
            Anchor::TopTubeStart => self.top_tube_start,
            Anchor::TopTubeEnd => self.top_tube_end,
            Anchor::BottomTubeStart => self.bottom_tube_start,
            Anchor::SeatTubeEnd => self.seat_tube_end,
            Anchor::ForkStart => self.fork_start,
            Anchor::HeadTubeProjection => self.head_tube_projection,
        }
    }

    /// Apply `f` to every point
    pub fn map(&self, f: impl Fn(Point) -> Point) -> Anchors {
        Anchors {
            bb: f(self.bb),
            front_hub: f(self.front_hub),
            rear_hub: f(self.rear_hub),
            head_tube_start: f(self.head_tube_start),
            head_tube_end: f(self.head_tube_end),
            top_tube_start: f(self.top_tube_start),
            top_tube_end: f(self.top_tube_end),
            bottom_tube_start: f(self.bottom_tube_start),
            seat_tube_end: f(self.seat_tube_end),
            fork_start: f(self.fork_start),
            head_tube_projection: f(self.head_tube_projection),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Anchor, Point)> + '_ {
        Anchor::ALL.into_iter().map(|a| (a, self.get(a)))
    }

    pub fn all_finite(&self) -> bool {
        self.iter().all(|(_, p)| p.is_finite())
    }
}

/// Scalars recomputed from the resolved points (millimeters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Derived {
    /// Perpendicular distance from the front hub to the steering axis.
    /// Positive when the hub sits ahead of the axis.
    pub fork_offset: f64,
    /// Gap between the head tube bottom and the fork crown
    pub crown_height: f64,
    /// Top tube length as drawn, from the seat tube to the head tube
    pub top_tube_len: f64,
    /// Distance of the down tube junction from the head tube top
    pub bottom_tube_offset: f64,
}

/// Everything the resolver produces for one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedGeometry {
    pub anchors: Anchors,
    pub derived: Derived,
    pub thickness: f64,
    pub errors: BTreeMap<Field, FieldError>,
}

impl ResolvedGeometry {
    pub fn point(&self, anchor: Anchor) -> Point {
        self.anchors.get(anchor)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Value the resolver recomputed for a field, if it recomputes one.
    pub fn derived_value(&self, field: Field) -> Option<f64> {
        match field {
            Field::TopTubeLen => Some(self.derived.top_tube_len),
            Field::CrownHeight => Some(self.derived.crown_height),
            Field::ForkOffset => Some(self.derived.fork_offset),
            _ => None,
        }
    }
}

/// A watched anchor: when it is NaN but its own inputs are not, `field` gets `error`.
struct Watch {
    anchor: Anchor,
    inputs: &'static [Anchor],
    field: Field,
    error: FieldError,
}

const WATCHED: &[Watch] = &[
    Watch {
        anchor: Anchor::RearHub,
        inputs: &[Anchor::Bb],
        field: Field::ChainstayLen,
        error: FieldError::TooShort,
    },
    Watch {
        anchor: Anchor::TopTubeStart,
        inputs: &[Anchor::TopTubeEnd, Anchor::HeadTubeStart, Anchor::HeadTubeEnd],
        field: Field::TopTubeLen,
        error: FieldError::TooShort,
    },
    Watch {
        anchor: Anchor::ForkStart,
        inputs: &[Anchor::FrontHub, Anchor::HeadTubeStart, Anchor::HeadTubeEnd],
        field: Field::ForkLen,
        error: FieldError::TooShort,
    },
];

/// Resolve a parameter set into positioned geometry.
///
/// The bottom bracket is placed at `view.pan`; zoom is not applied here
/// (see [`crate::view::transform`]). The input is never mutated.
pub fn resolve(params: &FrameParams, view: &ViewContext) -> ResolvedGeometry {
    let p = params;
    let head_tube_angle = p.head_tube_angle.internal();
    let seat_tube_angle = p.seat_tube_angle.internal();

    // 1. everything hangs off the bottom bracket
    let bb = view.pan;

    // 2. chainstay is the hypotenuse, bb drop the vertical leg
    let rear_hub = bb
        - Point::new(
            p.chainstay_len * (p.bb_drop_len / p.chainstay_len).asin().cos(),
            p.bb_drop_len,
        );

    // 3. the hub line is horizontal by definition
    let front_hub = rear_hub + Point::new(p.wheelbase_len, 0.0);

    // 4. reach and stack pin the head tube top
    let head_tube_end = bb + Point::new(p.reach_len, -p.stack_len);

    // 5. the offset angle points up the steering axis, so step down from the top
    let head_tube_start = head_tube_end - vector_from_polar(p.head_tube_len, head_tube_angle);

    // 6.
    let seat_tube_end =
        bb + vector_from_polar(p.seat_tube_len + p.seat_tube_extra, seat_tube_angle);

    // 7. fork offset as actually drawn, not as typed
    let fork_offset = signed_offset(front_hub, head_tube_start, head_tube_end);

    // 8. root [1] is the crown side. Can flip for extreme geometries.
    let [_, fork_start] =
        circle_line_intersections(head_tube_end, head_tube_start, front_hub, p.fork_len);

    // 9.
    let top_tube_end = bb + vector_from_polar(p.seat_tube_len, seat_tube_angle);

    // 10. root [0] is the one below the head tube top. Same caveat as step 8.
    let [top_tube_start, _] =
        circle_line_intersections(head_tube_end, head_tube_start, top_tube_end, p.top_tube_len);

    // 11.
    let bottom_tube_offset = defaults::BOTTOM_TUBE_OFFSET_RATIO * p.head_tube_len;
    let bottom_tube_start =
        head_tube_start + vector_from_polar(p.head_tube_len - bottom_tube_offset, head_tube_angle);

    // 12.
    let crown_height = (fork_start - head_tube_start).length();
    let top_tube_len = (top_tube_start - top_tube_end).length();

    // 13.
    let head_tube_projection = Point::new(
        head_tube_end.x + (front_hub.y - head_tube_end.y) / p.head_tube_angle.tan(),
        front_hub.y,
    );

    let anchors = Anchors {
        bb,
        front_hub,
        rear_hub,
        head_tube_start,
        head_tube_end,
        top_tube_start,
        top_tube_end,
        bottom_tube_start,
        seat_tube_end,
        fork_start,
        head_tube_projection,
    };

    debug!(?anchors, fork_offset, crown_height, top_tube_len, "resolved frame");

    ResolvedGeometry {
        anchors,
        derived: Derived {
            fork_offset,
            crown_height,
            top_tube_len,
            bottom_tube_offset,
        },
        thickness: p.thickness,
        errors: check_watched(&anchors),
    }
}

fn check_watched(anchors: &Anchors) -> BTreeMap<Field, FieldError> {
    let mut errors = BTreeMap::new();
    for watch in WATCHED {
        let inputs_ok = watch.inputs.iter().all(|a| !anchors.get(*a).is_nan());
        if inputs_ok && anchors.get(watch.anchor).is_nan() {
            warn!(anchor = ?watch.anchor, field = %watch.field, "infeasible geometry");
            errors.insert(watch.field, watch.error);
        }
    }
    errors
}
