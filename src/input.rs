//! Reading what a user typed into a field.
//!
//! The grammar lives in `field_input.pest`: a number with an optional unit.
//! Lengths are normalized to millimeters, angles stay in degrees.

use miette::{NamedSource, SourceSpan};
use pest::Parser;
use pest::error::InputLocation;

use crate::errors::InputError;
use crate::params::Field;
use crate::{FieldInputParser, Rule};

/// A unit suffix recognized in field input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputUnit {
    Millimeters,
    Centimeters,
    Inches,
    Degrees,
}

impl InputUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            InputUnit::Millimeters => "mm",
            InputUnit::Centimeters => "cm",
            InputUnit::Inches => "in",
            InputUnit::Degrees => "deg",
        }
    }

    pub fn is_angle(self) -> bool {
        self == InputUnit::Degrees
    }

    /// Multiplier into the field's base unit (mm or degrees)
    fn factor(self) -> f64 {
        match self {
            InputUnit::Millimeters | InputUnit::Degrees => 1.0,
            InputUnit::Centimeters => 10.0,
            InputUnit::Inches => 25.4,
        }
    }
}

/// Parsed but not yet converted input
#[derive(Debug, Clone, PartialEq)]
pub struct HumanInput {
    pub value: f64,
    pub unit: Option<(InputUnit, SourceSpan)>,
}

fn named(source: &str) -> NamedSource<String> {
    NamedSource::new("input", source.to_string())
}

/// Parse `source` into a number and an optional unit.
pub fn parse_input(source: &str) -> Result<HumanInput, InputError> {
    let mut pairs = FieldInputParser::parse(Rule::input, source).map_err(|e| {
        let span: SourceSpan = match e.location {
            InputLocation::Pos(pos) => (pos, 0).into(),
            InputLocation::Span((start, end)) => (start, end - start).into(),
        };
        InputError::Syntax {
            src: named(source),
            span,
            message: e.variant.message().to_string(),
        }
    })?;

    let mut value = f64::NAN;
    let mut unit = None;

    let Some(input) = pairs.next() else {
        return Err(InputError::Syntax {
            src: named(source),
            span: (0, source.len()).into(),
            message: "empty input".to_string(),
        });
    };

    for pair in input.into_inner() {
        let span = pair.as_span();
        let span: SourceSpan = (span.start(), span.end() - span.start()).into();
        match pair.as_rule() {
            Rule::number => {
                value = pair.as_str().parse::<f64>().map_err(|e| InputError::InvalidNumber {
                    message: e.to_string(),
                    src: named(source),
                    span,
                })?;
            }
            Rule::unit => {
                let kind = pair.into_inner().next().map(|p| p.as_rule());
                let parsed = match kind {
                    Some(Rule::mm) => InputUnit::Millimeters,
                    Some(Rule::cm) => InputUnit::Centimeters,
                    Some(Rule::inch) => InputUnit::Inches,
                    Some(Rule::deg) => InputUnit::Degrees,
                    _ => continue,
                };
                unit = Some((parsed, span));
            }
            _ => {}
        }
    }

    if !value.is_finite() {
        return Err(InputError::InvalidNumber {
            message: "value is not finite".to_string(),
            src: named(source),
            span: (0, source.len()).into(),
        });
    }

    Ok(HumanInput { value, unit })
}

/// Parse `source` for `field`, converted to the field's human unit
/// (millimeters or degrees). A bare number is taken in that unit.
pub fn value_for_field(field: Field, source: &str) -> Result<f64, InputError> {
    let input = parse_input(source)?;
    match input.unit {
        None => Ok(input.value),
        Some((unit, _)) if unit.is_angle() == field.is_angle() => Ok(input.value * unit.factor()),
        Some((unit, span)) => Err(InputError::UnitMismatch {
            field,
            unit: unit.symbol(),
            expected: if field.is_angle() { "degrees" } else { "mm, cm or in" },
            src: named(source),
            span,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_numbers() {
        for (src, expected) in [
            ("42", 42.0),
            ("-3.5", -3.5),
            (".5", 0.5),
            ("7.", 7.0),
            ("1e3", 1000.0),
            (" 12 ", 12.0),
        ] {
            let parsed = parse_input(src).unwrap();
            assert_eq!(parsed.value, expected, "{src}");
            assert_eq!(parsed.unit, None);
        }
    }

    #[test]
    fn units_are_case_insensitive() {
        for (src, unit) in [
            ("550mm", InputUnit::Millimeters),
            ("55 CM", InputUnit::Centimeters),
            ("21.5in", InputUnit::Inches),
            ("21.5 Inches", InputUnit::Inches),
            ("21.5\"", InputUnit::Inches),
            ("73deg", InputUnit::Degrees),
            ("73 degrees", InputUnit::Degrees),
            ("73°", InputUnit::Degrees),
        ] {
            let parsed = parse_input(src).unwrap();
            assert_eq!(parsed.unit.map(|(u, _)| u), Some(unit), "{src}");
        }
    }

    #[test]
    fn lengths_convert_to_millimeters() {
        assert_eq!(value_for_field(Field::ReachLen, "40cm").unwrap(), 400.0);
        assert_eq!(value_for_field(Field::ReachLen, "10in").unwrap(), 254.0);
        assert_eq!(value_for_field(Field::ReachLen, "388").unwrap(), 388.0);
        assert_eq!(value_for_field(Field::HeadTubeAngle, "72.5°").unwrap(), 72.5);
    }

    #[test]
    fn unit_mismatch_points_at_unit() {
        let err = value_for_field(Field::HeadTubeAngle, "73 mm").unwrap_err();
        match err {
            InputError::UnitMismatch { unit, expected, span, .. } => {
                assert_eq!(unit, "mm");
                assert_eq!(expected, "degrees");
                assert_eq!(span.offset(), 3);
                assert_eq!(span.len(), 2);
            }
            other => panic!("expected unit mismatch, got {other:?}"),
        }
        assert_eq!(
            value_for_field(Field::StackLen, "5deg").unwrap_err().to_string(),
            "stackLen does not take deg"
        );
    }

    #[test]
    fn garbage_is_a_syntax_error() {
        for src in ["", "abc", "5 furlongs", "1.2.3", "5e", "mm"] {
            let err = parse_input(src).unwrap_err();
            assert!(matches!(err, InputError::Syntax { .. }), "{src}: {err:?}");
        }
    }

    #[test]
    fn overflow_is_rejected() {
        let err = parse_input("1e400").unwrap_err();
        assert!(matches!(err, InputError::InvalidNumber { .. }));
    }
}
