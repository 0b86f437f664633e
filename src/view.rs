//! Pan and zoom applied to resolved geometry.

use serde::Serialize;

use crate::params::ViewContext;
use crate::resolve::{Anchor, Anchors, ResolvedGeometry};
use crate::types::Point;

/// Resolved geometry in presentation pixels. Disposable, rebuilt per render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PresentationGeometry {
    pub anchors: Anchors,
    /// The pan point itself, for drawing the view origin marker
    pub pan: Point,
    pub thickness: f64,
}

impl PresentationGeometry {
    pub fn point(&self, anchor: Anchor) -> Point {
        self.anchors.get(anchor)
    }
}

/// Scale-then-translate a single point: `pan + zoom·p`
#[inline]
pub fn apply(view: &ViewContext, p: Point) -> Point {
    view.pan + p.scale(view.zoom.factor())
}

/// Map every point through [`apply`] and scale the tube thickness by zoom.
///
/// Derived lengths are already baked into the points and are not carried
/// over.
pub fn transform(resolved: &ResolvedGeometry, view: &ViewContext) -> PresentationGeometry {
    PresentationGeometry {
        anchors: resolved.anchors.map(|p| apply(view, p)),
        pan: apply(view, view.pan),
        thickness: view.zoom.factor() * resolved.thickness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FrameParams;
    use crate::resolve::resolve;
    use crate::types::Zoom;

    fn origin(zoom: f64) -> ViewContext {
        ViewContext::new(Point::ZERO, Zoom::try_new(zoom).unwrap())
    }

    #[test]
    fn scale_then_translate() {
        let view = ViewContext::new(Point::new(100.0, 50.0), Zoom::try_new(2.0).unwrap());
        assert_eq!(apply(&view, Point::new(3.0, -4.0)), Point::new(106.0, 42.0));
    }

    #[test]
    fn doubling_zoom_doubles_distances() {
        let resolved = resolve(&FrameParams::default(), &origin(1.0));
        let one = transform(&resolved, &origin(1.0));
        let two = transform(&resolved, &origin(2.0));
        for a in Anchor::ALL {
            for b in Anchor::ALL {
                let d1 = (one.point(a) - one.point(b)).length();
                let d2 = (two.point(a) - two.point(b)).length();
                assert!((d2 - 2.0 * d1).abs() < 1e-9, "{a:?}-{b:?}: {d1} vs {d2}");
            }
        }
    }

    #[test]
    fn thickness_scales_with_zoom() {
        let resolved = resolve(&FrameParams::default(), &origin(1.0));
        let p = transform(&resolved, &origin(0.5));
        assert_eq!(p.thickness, 7.5);
    }

    #[test]
    fn resolved_geometry_is_untouched() {
        let view = ViewContext::default();
        let resolved = resolve(&FrameParams::default(), &view);
        let before = resolved.clone();
        let presented = transform(&resolved, &view);
        assert_eq!(resolved, before);
        // bb was placed at pan by the resolver, then panned again here
        assert_eq!(presented.anchors.bb, Point::new(300.0, 450.0));
    }
}
