//! Per-field presentation table: labels, units, human/internal conversion,
//! input constraints, and guide descriptors.
//!
//! Conversions are a closed set of transforms dispatched through
//! `enum_dispatch`, so the table is plain data.

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use crate::defaults;
use crate::errors::InputError;
use crate::guide::{Axis, GuideSpec, Style};
use crate::input;
use crate::params::{Field, FrameParams};
use crate::resolve::{Anchor, ResolvedGeometry};
use crate::types::{to_degrees_without_offset, to_radians_with_offset};

/// Round to `1/precision`, folding `-0` into `0`
pub(crate) fn round_to(value: f64, precision: f64) -> f64 {
    (value * precision).round() / precision + 0.0
}

/// Conversion between stored (internal) and displayed (human) values
#[enum_dispatch]
pub trait Transform {
    fn for_humans(&self, internal: f64) -> f64;
    fn for_calculations(&self, human: f64) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Identity;

impl Transform for Identity {
    fn for_humans(&self, internal: f64) -> f64 {
        internal
    }

    fn for_calculations(&self, human: f64) -> f64 {
        human
    }
}

/// Display rounded to `1/precision`; input taken as is
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Round {
    pub precision: f64,
}

impl Transform for Round {
    fn for_humans(&self, internal: f64) -> f64 {
        round_to(internal, self.precision)
    }

    fn for_calculations(&self, human: f64) -> f64 {
        human
    }
}

/// Frame-builder degrees outside, π-offset radians inside.
/// `sign` of -1 mirrors the angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegreesWithPiOffset {
    pub sign: f64,
}

impl Transform for DegreesWithPiOffset {
    fn for_humans(&self, internal: f64) -> f64 {
        round_to(self.sign * to_degrees_without_offset(internal), defaults::ROUND_PRECISION)
    }

    fn for_calculations(&self, human: f64) -> f64 {
        to_radians_with_offset(self.sign * human)
    }
}

#[enum_dispatch(Transform)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FieldTransform {
    Identity,
    Round,
    DegreesWithPiOffset,
}

const ROUND: FieldTransform = FieldTransform::Round(Round {
    precision: defaults::ROUND_PRECISION,
});
const IDENTITY: FieldTransform = FieldTransform::Identity(Identity);
const DEGREES: FieldTransform =
    FieldTransform::DegreesWithPiOffset(DegreesWithPiOffset { sign: 1.0 });

/// A limit that may depend on the current parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Bound {
    Const(f64),
    /// `factor · field`
    Scaled(Field, f64),
    /// Sum of the stored fields
    Sum(&'static [Field]),
}

impl Bound {
    pub fn value(&self, params: &FrameParams) -> f64 {
        match *self {
            Bound::Const(v) => v,
            Bound::Scaled(field, factor) => factor * params.get(field).unwrap_or(f64::NAN),
            Bound::Sum(fields) => fields
                .iter()
                .map(|f| params.get(*f).unwrap_or(f64::NAN))
                .sum(),
        }
    }
}

/// Strict limits on a human-unit value, checked before an edit is accepted
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Constraint {
    Any,
    Above(Bound),
    Below(Bound),
    /// Open interval
    Between(f64, f64),
}

impl Constraint {
    /// `Err` carries a description of the violated bound
    pub fn check(&self, value: f64, params: &FrameParams) -> Result<(), String> {
        let show = |v: f64| round_to(v, defaults::ROUND_PRECISION);
        match *self {
            Constraint::Any => Ok(()),
            Constraint::Above(bound) => {
                let limit = bound.value(params);
                if value > limit {
                    Ok(())
                } else {
                    Err(format!("greater than {}", show(limit)))
                }
            }
            Constraint::Below(bound) => {
                let limit = bound.value(params);
                if value < limit {
                    Ok(())
                } else {
                    Err(format!("less than {}", show(limit)))
                }
            }
            Constraint::Between(lo, hi) => {
                if value > lo && value < hi {
                    Ok(())
                } else {
                    Err(format!("between {} and {}", show(lo), show(hi)))
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub long: &'static str,
    pub short: &'static str,
}

pub const MILLIMETERS: Unit = Unit {
    long: "millimeters",
    short: "mm",
};
pub const DEGREES_UNIT: Unit = Unit {
    long: "degrees",
    short: "°",
};

/// One row of the field table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub unit: Unit,
    pub transform: FieldTransform,
    pub constraint: Constraint,
    pub guides: &'static [GuideSpec],
    /// Shows a recomputed value and rejects edits
    pub readonly: bool,
    /// Hidden unless extras are shown
    pub extra: bool,
}

impl FieldSpec {
    /// Value to show, in human units. Read-only fields show what the
    /// resolver recomputed.
    pub fn display_value(&self, params: &FrameParams, resolved: &ResolvedGeometry) -> Option<f64> {
        let internal = if self.readonly {
            resolved.derived_value(self.field)
        } else {
            params.get(self.field)
        };
        internal.map(|v| self.transform.for_humans(v))
    }

    /// Parse typed text into an internal value, validating against `params`.
    pub fn parse(&self, source: &str, params: &FrameParams) -> Result<f64, InputError> {
        if self.readonly {
            return Err(InputError::ReadOnly { field: self.field });
        }

        let human = input::value_for_field(self.field, source)?;
        self.constraint
            .check(human, params)
            .map_err(|bound| InputError::OutOfRange {
                field: self.field,
                value: human,
                bound,
            })?;

        Ok(self.transform.for_calculations(human))
    }
}

/// Table entry for a field
pub fn spec(field: Field) -> &'static FieldSpec {
    &FIELDS[field as usize]
}

/// Rows in display order, honoring the extras toggle
pub fn visible(show_extras: bool) -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(move |s| show_extras || !s.extra)
}

const ANGLE_RANGE: Constraint = Constraint::Between(0.0, 90.0);

const fn row(
    field: Field,
    label: &'static str,
    transform: FieldTransform,
    constraint: Constraint,
) -> FieldSpec {
    FieldSpec {
        field,
        label,
        unit: MILLIMETERS,
        transform,
        constraint,
        guides: &[],
        readonly: false,
        extra: false,
    }
}

/// Indexed by `Field as usize`
pub static FIELDS: [FieldSpec; 16] = [
    FieldSpec {
        guides: &[GuideSpec::straight(&[Anchor::FrontHub, Anchor::RearHub])],
        ..row(
            Field::WheelbaseLen,
            "wheelbase",
            ROUND,
            Constraint::Below(Bound::Sum(&[
                Field::ChainstayLen,
                Field::TopTubeLen,
                Field::ForkLen,
                Field::HeadTubeLen,
            ])),
        )
    },
    FieldSpec {
        guides: &[GuideSpec::straight(&[Anchor::TopTubeStart, Anchor::TopTubeEnd])],
        readonly: true,
        ..row(Field::TopTubeLen, "top tube", ROUND, Constraint::Above(Bound::Const(0.0)))
    },
    FieldSpec {
        guides: &[GuideSpec::straight(&[Anchor::HeadTubeStart, Anchor::HeadTubeEnd])],
        ..row(
            Field::HeadTubeLen,
            "head tube",
            IDENTITY,
            Constraint::Above(Bound::Scaled(
                Field::HeadTubeLen,
                defaults::BOTTOM_TUBE_OFFSET_RATIO,
            )),
        )
    },
    FieldSpec {
        unit: DEGREES_UNIT,
        guides: &[GuideSpec::straight(&[
            Anchor::RearHub,
            Anchor::HeadTubeProjection,
            Anchor::HeadTubeEnd,
        ])],
        ..row(Field::HeadTubeAngle, "head tube angle", DEGREES, ANGLE_RANGE)
    },
    FieldSpec {
        guides: &[GuideSpec::straight(&[Anchor::Bb, Anchor::TopTubeEnd])],
        ..row(Field::SeatTubeLen, "seat tube", IDENTITY, Constraint::Any)
    },
    FieldSpec {
        unit: DEGREES_UNIT,
        ..row(Field::SeatTubeAngle, "seat tube angle", DEGREES, ANGLE_RANGE)
    },
    FieldSpec {
        guides: &[GuideSpec::straight(&[Anchor::Bb, Anchor::RearHub])],
        ..row(Field::ChainstayLen, "chainstay", ROUND, Constraint::Any)
    },
    FieldSpec {
        guides: &[
            GuideSpec::Perpendicular {
                style: Style::Straight,
                from: Anchor::Bb,
                line: [Anchor::RearHub, Anchor::FrontHub],
            },
            GuideSpec::dashed(&[Anchor::RearHub, Anchor::FrontHub]),
        ],
        ..row(Field::BbDropLen, "bb drop", ROUND, Constraint::Any)
    },
    FieldSpec {
        guides: &[GuideSpec::ToReferenceLine {
            from: Anchor::Bb,
            axis: Axis::Y,
            to: Anchor::HeadTubeEnd,
        }],
        ..row(Field::ReachLen, "reach", ROUND, Constraint::Any)
    },
    FieldSpec {
        guides: &[GuideSpec::ToReferenceLine {
            from: Anchor::Bb,
            axis: Axis::X,
            to: Anchor::HeadTubeEnd,
        }],
        ..row(Field::StackLen, "stack", ROUND, Constraint::Any)
    },
    FieldSpec {
        guides: &[
            GuideSpec::Perpendicular {
                style: Style::Straight,
                from: Anchor::FrontHub,
                line: [Anchor::HeadTubeStart, Anchor::HeadTubeEnd],
            },
            GuideSpec::dashed(&[Anchor::HeadTubeStart, Anchor::HeadTubeEnd]),
            GuideSpec::dashed(&[Anchor::FrontHub, Anchor::RearHub]),
        ],
        ..row(Field::ForkOffset, "fork offset", IDENTITY, Constraint::Above(Bound::Const(0.0)))
    },
    FieldSpec {
        guides: &[GuideSpec::straight(&[Anchor::FrontHub, Anchor::ForkStart])],
        ..row(
            Field::ForkLen,
            "fork",
            IDENTITY,
            Constraint::Above(Bound::Scaled(Field::ForkOffset, 4.0)),
        )
    },
    FieldSpec {
        guides: &[GuideSpec::straight(&[Anchor::HeadTubeStart, Anchor::ForkStart])],
        readonly: true,
        extra: true,
        ..row(Field::CrownHeight, "crown height", ROUND, Constraint::Any)
    },
    FieldSpec {
        guides: &[GuideSpec::straight(&[Anchor::SeatTubeEnd, Anchor::TopTubeEnd])],
        extra: true,
        ..row(
            Field::SeatTubeExtra,
            "seat tube padding",
            IDENTITY,
            Constraint::Above(Bound::Scaled(Field::Thickness, 1.0)),
        )
    },
    FieldSpec {
        guides: &[GuideSpec::straight(&[Anchor::TopTubeStart, Anchor::HeadTubeEnd])],
        extra: true,
        ..row(
            Field::TopTubeOffset,
            "top tube offset in head tube",
            IDENTITY,
            Constraint::Above(Bound::Const(0.0)),
        )
    },
    FieldSpec {
        extra: true,
        ..row(Field::Thickness, "thickness", IDENTITY, Constraint::Above(Bound::Const(0.0)))
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ViewContext;
    use crate::resolve::resolve;

    #[test]
    fn table_is_indexed_by_field() {
        for (i, field) in Field::ALL.into_iter().enumerate() {
            assert_eq!(FIELDS[i].field, field);
            assert_eq!(spec(field).field, field);
        }
    }

    #[test]
    fn degrees_transform_round_trips() {
        let t = DEGREES;
        let internal = t.for_calculations(72.5);
        assert!((internal - (std::f64::consts::PI + 72.5_f64.to_radians())).abs() < 1e-12);
        assert_eq!(t.for_humans(internal), 72.5);
    }

    #[test]
    fn mirrored_degrees_round_trip() {
        let t = FieldTransform::from(DegreesWithPiOffset { sign: -1.0 });
        assert_eq!(t.for_humans(t.for_calculations(12.0)), 12.0);
    }

    #[test]
    fn round_shows_one_decimal() {
        assert_eq!(ROUND.for_humans(564.4999), 564.5);
        assert_eq!(ROUND.for_humans(-0.01), 0.0);
        assert_eq!(ROUND.for_calculations(1.2345), 1.2345);
        assert_eq!(IDENTITY.for_humans(1.2345), 1.2345);
    }

    #[test]
    fn read_only_fields_show_recomputed_values() {
        let params = FrameParams {
            top_tube_len: 551.234,
            ..FrameParams::default()
        };
        let resolved = resolve(&params, &ViewContext::default());
        let shown = spec(Field::TopTubeLen).display_value(&params, &resolved).unwrap();
        assert_eq!(shown, round_to(resolved.derived.top_tube_len, 10.0));
        let crown = spec(Field::CrownHeight).display_value(&params, &resolved).unwrap();
        assert_eq!(crown, round_to(resolved.derived.crown_height, 10.0));
        let angle = spec(Field::HeadTubeAngle).display_value(&params, &resolved).unwrap();
        assert_eq!(angle, 73.0);
    }

    #[test]
    fn parse_applies_transform() {
        let params = FrameParams::default();
        let internal = spec(Field::SeatTubeAngle).parse("74", &params).unwrap();
        assert!((internal - (std::f64::consts::PI + 74.0_f64.to_radians())).abs() < 1e-12);
        assert_eq!(spec(Field::ReachLen).parse("39cm", &params).unwrap(), 390.0);
    }

    #[test]
    fn parse_rejects_read_only() {
        let err = spec(Field::CrownHeight).parse("10", &FrameParams::default()).unwrap_err();
        assert!(matches!(err, InputError::ReadOnly { field: Field::CrownHeight }));
    }

    #[test]
    fn angle_must_be_inside_open_range() {
        let params = FrameParams::default();
        for bad in ["0", "90", "-3", "120deg"] {
            let err = spec(Field::HeadTubeAngle).parse(bad, &params).unwrap_err();
            assert!(matches!(err, InputError::OutOfRange { .. }), "{bad}: {err:?}");
        }
        assert_eq!(
            spec(Field::HeadTubeAngle).parse("90", &params).unwrap_err().to_string(),
            "headTubeAngle must be between 0 and 90"
        );
    }

    #[test]
    fn fork_must_exceed_four_offsets() {
        let params = FrameParams {
            fork_offset: 50.0,
            ..FrameParams::default()
        };
        let fork = spec(Field::ForkLen);
        assert!(fork.parse("200", &params).is_err());
        assert_eq!(fork.parse("201", &params).unwrap(), 201.0);
    }

    #[test]
    fn wheelbase_limited_by_tube_sum() {
        let params = FrameParams::default();
        let limit =
            params.chainstay_len + params.top_tube_len + params.fork_len + params.head_tube_len;
        let wheelbase = spec(Field::WheelbaseLen);
        assert!(wheelbase.parse(&format!("{limit}"), &params).is_err());
        assert!(wheelbase.parse("1000", &params).is_ok());
    }

    #[test]
    fn head_tube_limited_by_bottom_tube_offset() {
        let params = FrameParams::default();
        let head_tube = spec(Field::HeadTubeLen);
        assert!(head_tube.parse("70", &params).is_err());
        assert!(head_tube.parse("80", &params).is_ok());
    }

    #[test]
    fn seat_tube_padding_must_clear_thickness() {
        let params = FrameParams::default();
        let err = spec(Field::SeatTubeExtra).parse("15", &params).unwrap_err();
        assert_eq!(err.to_string(), "seatTubeExtra must be greater than 15");
    }

    #[test]
    fn extras_are_hidden_by_default() {
        let shown: Vec<Field> = visible(false).map(|s| s.field).collect();
        assert!(!shown.contains(&Field::CrownHeight));
        assert!(!shown.contains(&Field::SeatTubeExtra));
        assert_eq!(visible(true).count(), FIELDS.len());
    }

    #[test]
    fn angle_fields_use_degree_units() {
        for s in &FIELDS {
            let expected = if s.field.is_angle() { DEGREES_UNIT } else { MILLIMETERS };
            assert_eq!(s.unit, expected, "{:?}", s.field);
        }
    }
}
