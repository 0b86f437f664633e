//! Stored bike templates.
//!
//! The store keeps angles in frame-builder degrees; [`Template`] holds a
//! ready-to-resolve [`FrameParams`] with angles in offset radians. Records
//! written before `topTubeOffset` existed fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::errors::TemplateError;
use crate::params::{Field, FrameParams};
use crate::types::Angle;

fn default_top_tube_offset() -> f64 {
    defaults::TEMPLATE_TOP_TUBE_OFFSET
}

fn default_thickness() -> f64 {
    defaults::TEMPLATE_THICKNESS
}

/// A template as the store serves it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTemplate {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub wheelbase_len: f64,
    pub top_tube_len: f64,
    pub head_tube_len: f64,
    /// Degrees
    pub head_tube_angle: f64,
    pub seat_tube_len: f64,
    /// Degrees
    pub seat_tube_angle: f64,
    pub chainstay_len: f64,
    pub bb_drop_len: f64,
    pub reach_len: f64,
    pub stack_len: f64,
    pub fork_offset: f64,
    pub fork_len: f64,
    pub seat_tube_extra: f64,
    #[serde(default = "default_top_tube_offset")]
    pub top_tube_offset: f64,
    #[serde(default = "default_thickness")]
    pub thickness: f64,
}

/// A named parameter set
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Store id; `None` until saved
    pub id: Option<String>,
    pub name: String,
    pub params: FrameParams,
}

impl Template {
    pub fn new(name: impl Into<String>, params: FrameParams) -> Self {
        Self {
            id: None,
            name: name.into(),
            params,
        }
    }

    /// Convert degrees to offset radians and check every value is finite.
    pub fn from_raw(raw: RawTemplate) -> Result<Template, TemplateError> {
        let params = FrameParams {
            wheelbase_len: raw.wheelbase_len,
            top_tube_len: raw.top_tube_len,
            head_tube_len: raw.head_tube_len,
            head_tube_angle: Angle::from_frame_degrees(raw.head_tube_angle),
            seat_tube_len: raw.seat_tube_len,
            seat_tube_angle: Angle::from_frame_degrees(raw.seat_tube_angle),
            chainstay_len: raw.chainstay_len,
            bb_drop_len: raw.bb_drop_len,
            reach_len: raw.reach_len,
            stack_len: raw.stack_len,
            fork_offset: raw.fork_offset,
            fork_len: raw.fork_len,
            seat_tube_extra: raw.seat_tube_extra,
            top_tube_offset: raw.top_tube_offset,
            thickness: raw.thickness,
        };

        let non_finite = Field::ALL
            .into_iter()
            .find(|f| params.get(*f).is_some_and(|v| !v.is_finite()));
        if let Some(field) = non_finite {
            return Err(TemplateError::NonFinite { name: raw.name, field });
        }

        Ok(Template {
            id: raw.id,
            name: raw.name,
            params,
        })
    }

    pub fn to_raw(&self) -> RawTemplate {
        let p = &self.params;
        RawTemplate {
            id: self.id.clone(),
            name: self.name.clone(),
            wheelbase_len: p.wheelbase_len,
            top_tube_len: p.top_tube_len,
            head_tube_len: p.head_tube_len,
            head_tube_angle: p.head_tube_angle.frame_degrees(),
            seat_tube_len: p.seat_tube_len,
            seat_tube_angle: p.seat_tube_angle.frame_degrees(),
            chainstay_len: p.chainstay_len,
            bb_drop_len: p.bb_drop_len,
            reach_len: p.reach_len,
            stack_len: p.stack_len,
            fork_offset: p.fork_offset,
            fork_len: p.fork_len,
            seat_tube_extra: p.seat_tube_extra,
            top_tube_offset: p.top_tube_offset,
            thickness: p.thickness,
        }
    }
}

/// Parse one stored record
pub fn parse_template(json: &str) -> Result<Template, TemplateError> {
    Template::from_raw(serde_json::from_str(json)?)
}

/// Parse the store's list response
pub fn parse_template_list(json: &str) -> Result<Vec<Template>, TemplateError> {
    let raw: Vec<RawTemplate> = serde_json::from_str(json)?;
    raw.into_iter().map(Template::from_raw).collect()
}

/// Serialize a template for saving
pub fn template_to_json(template: &Template) -> Result<String, TemplateError> {
    Ok(serde_json::to_string(&template.to_raw())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LHT: &str = r#"{"_id":"5bf59787770d2f4d00005ec2","seatTubeAngle":73,"name":"Surly LHT","wheelbaseLen":1055.6,"topTubeLen":564.5,"chainstayLen":460.2,"seatTubeLen":560,"headTubeLen":152,"forkLen":390,"bbDropLen":78,"seatTubeExtra":20,"headTubeAngle":72,"reachLen":389.3,"stackLen":588,"forkOffset":45,"thickness":14}"#;

    #[test]
    fn imports_store_record() {
        let t = parse_template(LHT).unwrap();
        assert_eq!(t.id.as_deref(), Some("5bf59787770d2f4d00005ec2"));
        assert_eq!(t.name, "Surly LHT");
        assert_eq!(t.params.reach_len, 389.3);
        assert_eq!(t.params.top_tube_offset, 19.8);
        assert_eq!(t.params.thickness, 14.0);
        let expected = std::f64::consts::PI + 72.0_f64.to_radians();
        assert!((t.params.head_tube_angle.internal() - expected).abs() < 1e-12);
    }

    #[test]
    fn export_restores_degrees() {
        let t = parse_template(LHT).unwrap();
        let raw = t.to_raw();
        assert!((raw.head_tube_angle - 72.0).abs() < 1e-9);
        assert!((raw.seat_tube_angle - 73.0).abs() < 1e-9);
        assert_eq!(raw.top_tube_offset, 19.8);
    }

    #[test]
    fn unsaved_template_has_no_id_key() {
        let t = Template::new("mine", FrameParams::default());
        let json = template_to_json(&t).unwrap();
        assert!(!json.contains("_id"));
        assert!(json.contains(r#""name":"mine""#));
        let back: RawTemplate = serde_json::from_str(&json).unwrap();
        assert!((back.head_tube_angle - 73.0).abs() < 1e-9);
    }

    #[test]
    fn list_parses_every_record() {
        let list = format!("[{LHT},{LHT}]");
        assert_eq!(parse_template_list(&list).unwrap().len(), 2);
    }

    #[test]
    fn missing_field_is_a_json_error() {
        let err = parse_template(r#"{"name":"half"}"#).unwrap_err();
        assert!(matches!(err, TemplateError::Json(_)));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut raw = parse_template(LHT).unwrap().to_raw();
        raw.fork_len = f64::INFINITY;
        let err = Template::from_raw(raw).unwrap_err();
        assert!(matches!(err, TemplateError::NonFinite { field: Field::ForkLen, .. }));
    }
}
