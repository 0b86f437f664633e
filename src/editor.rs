//! Reducer-style editing session.
//!
//! An [`Editor`] is one immutable revision. [`Editor::apply`] takes an
//! [`Action`] and returns the next revision, or the input error that
//! rejected it. The previous revision is left as it was.

use std::collections::BTreeMap;

use crate::errors::InputError;
use crate::fields;
use crate::guide::{GuidePath, build_path_with_style, guide_for};
use crate::log::debug;
use crate::params::{Field, FrameParams, ViewContext};
use crate::resolve::{ResolvedGeometry, resolve};
use crate::template::Template;
use crate::types::{Point, Zoom};
use crate::view::{PresentationGeometry, transform};

/// One user action
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Typed text for a field, in human units
    SetField { field: Field, input: String },
    /// Show guides for a field
    Focus(Field),
    Blur,
    Pan(Point),
    Zoom(Zoom),
    /// Replace every parameter with a template's
    LoadTemplate(Template),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Editor {
    pub params: FrameParams,
    pub view: ViewContext,
    /// Field whose guides are drawn
    pub focus: Option<Field>,
    pub revision: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(FrameParams::default(), ViewContext::default())
    }
}

/// Everything needed to draw one revision
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub resolved: ResolvedGeometry,
    pub presentation: PresentationGeometry,
    /// Path data for the focused field's guides
    pub guides: Vec<GuidePath>,
    /// Human-unit values for every field that has one
    pub values: BTreeMap<Field, f64>,
}

impl Editor {
    pub fn new(params: FrameParams, view: ViewContext) -> Self {
        Self {
            params,
            view,
            focus: None,
            revision: 0,
        }
    }

    pub fn apply(&self, action: Action) -> Result<Editor, InputError> {
        debug!(revision = self.revision, ?action, "applying editor action");

        let mut next = self.clone();
        match action {
            Action::SetField { field, input } => {
                let value = fields::spec(field).parse(&input, &self.params)?;
                next.params = self
                    .params
                    .with(field, value)
                    .ok_or(InputError::ReadOnly { field })?;
            }
            Action::Focus(field) => next.focus = Some(field),
            Action::Blur => next.focus = None,
            Action::Pan(pan) => next.view.pan = pan,
            Action::Zoom(zoom) => next.view.zoom = zoom,
            Action::LoadTemplate(template) => next.params = template.params,
        }
        next.revision += 1;
        Ok(next)
    }

    /// `SetField` addressed by field path, as the store and forms name fields
    pub fn set_by_path(&self, path: &str, input: &str) -> Result<Editor, InputError> {
        let field: Field = path.parse()?;
        self.apply(Action::SetField {
            field,
            input: input.to_string(),
        })
    }

    /// Apply actions in order, stopping at the first rejected one.
    pub fn apply_all(
        &self,
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<Editor, InputError> {
        actions
            .into_iter()
            .try_fold(self.clone(), |editor, action| editor.apply(action))
    }

    /// Resolve, transform, and build guides for the current revision.
    pub fn frame(&self) -> Frame {
        let resolved = resolve(&self.params, &self.view);
        let presentation = transform(&resolved, &self.view);

        let guides = self
            .focus
            .map(|field| guide_for(field, &presentation))
            .unwrap_or_default()
            .iter()
            .filter_map(build_path_with_style)
            .collect();

        let values = Field::ALL
            .into_iter()
            .filter_map(|field| {
                fields::spec(field)
                    .display_value(&self.params, &resolved)
                    .map(|v| (field, v))
            })
            .collect();

        Frame {
            resolved,
            presentation,
            guides,
            values,
        }
    }
}
