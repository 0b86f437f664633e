//! Bicycle frame geometry.
//!
//! Takes a bicycle's named dimensions ([`FrameParams`]) and resolves them into
//! a positioned 2D skeleton: hubs, tube ends, fork crown, plus recomputed
//! lengths and per-field feasibility errors. On top of that sit the view
//! transform, guide lines for the focused field, human input parsing, stored
//! templates, and a small reducer for editing sessions.
//!
//! ```
//! use framegeo::{FrameParams, ViewContext, resolve, transform};
//!
//! let params = FrameParams::default();
//! let view = ViewContext::default();
//! let resolved = resolve(&params, &view);
//! assert!(resolved.is_valid());
//! let drawn = transform(&resolved, &view);
//! assert!(drawn.anchors.all_finite());
//! ```

use pest_derive::Parser;

pub mod defaults;
pub mod editor;
pub mod errors;
pub mod fields;
pub mod geometry;
pub mod guide;
pub mod input;
pub mod log;
pub mod params;
pub mod resolve;
pub mod template;
pub mod types;
pub mod view;

#[derive(Parser)]
#[grammar = "field_input.pest"]
pub struct FieldInputParser;

pub use editor::{Action, Editor, Frame};
pub use errors::{FieldError, InputError, TemplateError};
pub use fields::{FieldSpec, spec};
pub use guide::{Guide, GuidePath, GuideSpec, Style, build_path_with_style, guide_for};
pub use params::{Field, FrameParams, ViewContext};
pub use resolve::{Anchor, Anchors, Derived, ResolvedGeometry, resolve};
pub use template::{RawTemplate, Template, parse_template_list};
pub use types::{Angle, Point, Zoom};
pub use view::{PresentationGeometry, transform};

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_number_with_unit() {
        let result = FieldInputParser::parse(Rule::input, "38.8 cm");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_bare_number() {
        let result = FieldInputParser::parse(Rule::input, "-12.5e1");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn reject_trailing_text() {
        let result = FieldInputParser::parse(Rule::input, "12 mm please");
        assert!(result.is_err());
    }
}
