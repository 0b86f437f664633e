//! Default sizes and settings (all lengths in millimeters)

use crate::types::{Point, Zoom};

/// Down tube joins the head tube this fraction of the head tube length
/// above the head tube bottom.
pub const BOTTOM_TUBE_OFFSET_RATIO: f64 = 0.7;

/// Display rounding: values are shown to 1/ROUND_PRECISION.
pub const ROUND_PRECISION: f64 = 10.0;

/// `stroke-dasharray` for dashed guides
pub const DASH_ARRAY: &str = "3 5";

/// Dashed reference lines extend this fraction of the measured span past the anchor.
pub const REFERENCE_OVERSHOOT: f64 = 0.5;

pub const VIEW_PAN: Point = Point::new(200.0, 300.0);
pub const VIEW_ZOOM: Zoom = Zoom::new(0.5);

/// Thickness assumed for template records that do not carry one.
pub const TEMPLATE_THICKNESS: f64 = 14.0;
/// Top tube offset assumed for template records that do not carry one.
pub const TEMPLATE_TOP_TUBE_OFFSET: f64 = 19.8;

// Default bike
pub const WHEELBASE_LEN: f64 = 1011.0;
pub const TOP_TUBE_LEN: f64 = 550.0;
pub const HEAD_TUBE_LEN: f64 = 114.0;
pub const HEAD_TUBE_DEGREES: f64 = 73.0;
pub const SEAT_TUBE_LEN: f64 = 550.0;
pub const SEAT_TUBE_DEGREES: f64 = 73.5;
pub const CHAINSTAY_LEN: f64 = 435.0;
pub const BB_DROP_LEN: f64 = 75.0;
pub const REACH_LEN: f64 = 388.0;
pub const STACK_LEN: f64 = 544.0;
pub const FORK_OFFSET: f64 = 48.0;
pub const FORK_LEN: f64 = 388.0;
pub const SEAT_TUBE_EXTRA: f64 = 20.0;
pub const TOP_TUBE_OFFSET: f64 = 19.8;
pub const THICKNESS: f64 = 15.0;
