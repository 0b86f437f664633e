//! Error types with rich diagnostics using miette
//!
//! Input errors carry source spans so a form can underline the offending
//! part of what the user typed.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Serialize;
use thiserror::Error;

use crate::params::{Field, UnknownField};

// ============================================================================
// Geometric infeasibility
// ============================================================================

/// Per-field annotation attached by the resolver. Never returned as `Err`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldError {
    /// The dimension cannot reach the point it has to meet
    #[error("too short")]
    TooShort,
}

// ============================================================================
// Human input
// ============================================================================

/// Errors from parsing, converting, or validating a value typed into a field
#[derive(Error, Diagnostic, Debug)]
pub enum InputError {
    #[error("could not read a number")]
    #[diagnostic(
        code(framegeo::input::syntax),
        help("enter a number, optionally followed by a unit such as mm, cm, in or deg")
    )]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("invalid number: {message}")]
    #[diagnostic(code(framegeo::input::invalid_number))]
    InvalidNumber {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid number")]
        span: SourceSpan,
    },

    #[error("{field} does not take {unit}")]
    #[diagnostic(code(framegeo::input::unit_mismatch), help("use {expected}"))]
    UnitMismatch {
        field: Field,
        unit: &'static str,
        expected: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("wrong unit")]
        span: SourceSpan,
    },

    #[error("{field} must be {bound}")]
    #[diagnostic(code(framegeo::input::out_of_range))]
    OutOfRange {
        field: Field,
        value: f64,
        bound: String,
    },

    #[error("{field} is read-only")]
    #[diagnostic(code(framegeo::input::read_only), help("this value is derived from the others"))]
    ReadOnly { field: Field },

    #[error(transparent)]
    #[diagnostic(code(framegeo::input::unknown_field))]
    UnknownField(#[from] UnknownField),
}

// ============================================================================
// Templates
// ============================================================================

/// Errors importing template records from the store
#[derive(Error, Diagnostic, Debug)]
pub enum TemplateError {
    #[error("malformed template JSON")]
    #[diagnostic(code(framegeo::template::json))]
    Json(#[from] serde_json::Error),

    #[error("template {name:?} has a non-finite {field}")]
    #[diagnostic(code(framegeo::template::non_finite))]
    NonFinite { name: String, field: Field },
}
