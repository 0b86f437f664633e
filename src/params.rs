//! The editable frame parameter set and the view context it is drawn in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::types::{Angle, Point, Zoom};

/// Names of every field a user can see. Serialized in camelCase, which is
/// also the field path used for error annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    WheelbaseLen,
    TopTubeLen,
    HeadTubeLen,
    HeadTubeAngle,
    SeatTubeLen,
    SeatTubeAngle,
    ChainstayLen,
    BbDropLen,
    ReachLen,
    StackLen,
    ForkOffset,
    ForkLen,
    /// Derived, never stored in [`FrameParams`]
    CrownHeight,
    SeatTubeExtra,
    TopTubeOffset,
    Thickness,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::WheelbaseLen,
        Field::TopTubeLen,
        Field::HeadTubeLen,
        Field::HeadTubeAngle,
        Field::SeatTubeLen,
        Field::SeatTubeAngle,
        Field::ChainstayLen,
        Field::BbDropLen,
        Field::ReachLen,
        Field::StackLen,
        Field::ForkOffset,
        Field::ForkLen,
        Field::CrownHeight,
        Field::SeatTubeExtra,
        Field::TopTubeOffset,
        Field::Thickness,
    ];

    /// Field path as used by the store and in error maps
    pub fn path(self) -> &'static str {
        match self {
            Field::WheelbaseLen => "wheelbaseLen",
            Field::TopTubeLen => "topTubeLen",
            Field::HeadTubeLen => "headTubeLen",
            Field::HeadTubeAngle => "headTubeAngle",
            Field::SeatTubeLen => "seatTubeLen",
            Field::SeatTubeAngle => "seatTubeAngle",
            Field::ChainstayLen => "chainstayLen",
            Field::BbDropLen => "bbDropLen",
            Field::ReachLen => "reachLen",
            Field::StackLen => "stackLen",
            Field::ForkOffset => "forkOffset",
            Field::ForkLen => "forkLen",
            Field::CrownHeight => "crownHeight",
            Field::SeatTubeExtra => "seatTubeExtra",
            Field::TopTubeOffset => "topTubeOffset",
            Field::Thickness => "thickness",
        }
    }

    pub fn is_angle(self) -> bool {
        matches!(self, Field::HeadTubeAngle | Field::SeatTubeAngle)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.path() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Raw lengths (mm) and angles for one bicycle.
///
/// Over-complete on purpose: `top_tube_len` and `fork_offset` are stored
/// inputs, but the resolver reports its own recomputed values for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameParams {
    pub wheelbase_len: f64,
    pub top_tube_len: f64,
    pub head_tube_len: f64,
    pub head_tube_angle: Angle,
    pub seat_tube_len: f64,
    pub seat_tube_angle: Angle,
    pub chainstay_len: f64,
    pub bb_drop_len: f64,
    pub reach_len: f64,
    pub stack_len: f64,
    pub fork_offset: f64,
    pub fork_len: f64,
    pub seat_tube_extra: f64,
    pub top_tube_offset: f64,
    pub thickness: f64,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            wheelbase_len: defaults::WHEELBASE_LEN,
            top_tube_len: defaults::TOP_TUBE_LEN,
            head_tube_len: defaults::HEAD_TUBE_LEN,
            head_tube_angle: Angle::from_frame_degrees(defaults::HEAD_TUBE_DEGREES),
            seat_tube_len: defaults::SEAT_TUBE_LEN,
            seat_tube_angle: Angle::from_frame_degrees(defaults::SEAT_TUBE_DEGREES),
            chainstay_len: defaults::CHAINSTAY_LEN,
            bb_drop_len: defaults::BB_DROP_LEN,
            reach_len: defaults::REACH_LEN,
            stack_len: defaults::STACK_LEN,
            fork_offset: defaults::FORK_OFFSET,
            fork_len: defaults::FORK_LEN,
            seat_tube_extra: defaults::SEAT_TUBE_EXTRA,
            top_tube_offset: defaults::TOP_TUBE_OFFSET,
            thickness: defaults::THICKNESS,
        }
    }
}

impl FrameParams {
    /// Stored value of a field in internal units (angles in offset radians).
    /// `None` for derived fields.
    pub fn get(&self, field: Field) -> Option<f64> {
        let value = match field {
            Field::WheelbaseLen => self.wheelbase_len,
            Field::TopTubeLen => self.top_tube_len,
            Field::HeadTubeLen => self.head_tube_len,
            Field::HeadTubeAngle => self.head_tube_angle.internal(),
            Field::SeatTubeLen => self.seat_tube_len,
            Field::SeatTubeAngle => self.seat_tube_angle.internal(),
            Field::ChainstayLen => self.chainstay_len,
            Field::BbDropLen => self.bb_drop_len,
            Field::ReachLen => self.reach_len,
            Field::StackLen => self.stack_len,
            Field::ForkOffset => self.fork_offset,
            Field::ForkLen => self.fork_len,
            Field::SeatTubeExtra => self.seat_tube_extra,
            Field::TopTubeOffset => self.top_tube_offset,
            Field::Thickness => self.thickness,
            Field::CrownHeight => return None,
        };
        Some(value)
    }

    /// A copy with one field replaced (internal units). `None` for derived fields.
    pub fn with(&self, field: Field, value: f64) -> Option<FrameParams> {
        let mut next = self.clone();
        match field {
            Field::WheelbaseLen => next.wheelbase_len = value,
            Field::TopTubeLen => next.top_tube_len = value,
            Field::HeadTubeLen => next.head_tube_len = value,
            Field::HeadTubeAngle => next.head_tube_angle = Angle::from_internal(value),
            Field::SeatTubeLen => next.seat_tube_len = value,
            Field::SeatTubeAngle => next.seat_tube_angle = Angle::from_internal(value),
            Field::ChainstayLen => next.chainstay_len = value,
            Field::BbDropLen => next.bb_drop_len = value,
            Field::ReachLen => next.reach_len = value,
            Field::StackLen => next.stack_len = value,
            Field::ForkOffset => next.fork_offset = value,
            Field::ForkLen => next.fork_len = value,
            Field::SeatTubeExtra => next.seat_tube_extra = value,
            Field::TopTubeOffset => next.top_tube_offset = value,
            Field::Thickness => next.thickness = value,
            Field::CrownHeight => return None,
        }
        Some(next)
    }
}

/// Pan (presentation pixels) and zoom for one drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewContext {
    pub pan: Point,
    pub zoom: Zoom,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self {
            pan: defaults::VIEW_PAN,
            zoom: defaults::VIEW_ZOOM,
        }
    }
}

impl ViewContext {
    pub fn new(pan: Point, zoom: Zoom) -> Self {
        Self { pan, zoom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_paths_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.path().parse::<Field>(), Ok(field));
            assert_eq!(
                serde_json::to_string(&field).unwrap(),
                format!("\"{}\"", field.path())
            );
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert_eq!(
            "spokeCount".parse::<Field>(),
            Err(UnknownField("spokeCount".to_string()))
        );
    }

    #[test]
    fn with_leaves_receiver_untouched() {
        let params = FrameParams::default();
        let edited = params.with(Field::ReachLen, 400.0).unwrap();
        assert_eq!(edited.reach_len, 400.0);
        assert_eq!(params.reach_len, defaults::REACH_LEN);
        assert_eq!(edited.get(Field::ReachLen), Some(400.0));
    }

    #[test]
    fn derived_fields_are_not_stored() {
        let params = FrameParams::default();
        assert_eq!(params.get(Field::CrownHeight), None);
        assert!(params.with(Field::CrownHeight, 10.0).is_none());
    }

    #[test]
    fn angles_are_stored_with_offset() {
        let params = FrameParams::default();
        let raw = params.get(Field::HeadTubeAngle).unwrap();
        assert!((raw - (std::f64::consts::PI + 73.0_f64.to_radians())).abs() < 1e-12);
    }

    #[test]
    fn default_view() {
        let view = ViewContext::default();
        assert_eq!(view.pan, Point::new(200.0, 300.0));
        assert_eq!(view.zoom.factor(), 0.5);
    }
}
