//! Custom positioning requests.
//!
//! A custom request names an anchor and up to four numeric fields (width,
//! height, x offset, y offset), each of which may be given in absolute
//! screen units or as a fraction of the screen bounds.  Placement reuses
//! the anchor math of the [`resolver`](crate::resolver).
//!
//! # Wire format
//!
//! Requests arrive as a flat object of optional fields ([`CustomParams`]):
//!
//! ```json
//! {"position": "center", "absoluteWidth": 400, "relativeHeight": 0.5}
//! {"position": "bottomRight", "absoluteXOffset": -20, "absoluteYOffset": 20}
//! ```
//!
//! Unrecognised anchor names fall back to `topLeft`.  That mirrors a
//! long-standing behaviour external callers may rely on, but it is more
//! likely a latent bug than a feature: a typo silently moves the window to
//! the top-left corner.

use crate::geometry::{Rect, Size};
use crate::layout::Anchor;
use crate::resolver::{degenerate, place};
use log::warn;
use serde::{Deserialize, Serialize};

/// A numeric field that is either absolute or screen-relative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Raw screen units.
    Absolute(f64),
    /// Fraction of the corresponding bounds dimension.
    Relative(f64),
}

impl Dimension {
    /// Resolve against `extent` (the bounds width or height).
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Dimension::Absolute(v) => v,
            Dimension::Relative(f) => f * extent,
        }
    }

    fn value(self) -> f64 {
        match self {
            Dimension::Absolute(v) | Dimension::Relative(v) => v,
        }
    }

    /// Pick the effective value for a size field.
    ///
    /// Absolute wins when positive, then relative when positive; anything
    /// else leaves the field unset.
    pub fn for_size(absolute: Option<f64>, relative: Option<f64>) -> Option<Dimension> {
        match (absolute, relative) {
            (Some(a), _) if a > 0.0 => Some(Dimension::Absolute(a)),
            (_, Some(r)) if r > 0.0 => Some(Dimension::Relative(r)),
            _ => None,
        }
    }

    /// Pick the effective value for an offset field.
    ///
    /// Like [`for_size`](Self::for_size) but negative offsets are accepted;
    /// only zero counts as "not given".  Defaults to no offset.
    ///
    /// This departs from the positive-only rule in both directions: a
    /// negative absolute offset is honoured rather than dropped, and an
    /// explicit absolute `0` does not pin the offset, so a relative one
    /// given alongside it still applies.
    pub fn for_offset(absolute: Option<f64>, relative: Option<f64>) -> Dimension {
        match (absolute, relative) {
            (Some(a), _) if a != 0.0 => Dimension::Absolute(a),
            (_, Some(r)) if r != 0.0 => Dimension::Relative(r),
            _ => Dimension::Absolute(0.0),
        }
    }
}

/// A fully-typed custom positioning request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomRequest {
    pub anchor: Anchor,
    #[serde(default)]
    pub width: Option<Dimension>,
    #[serde(default)]
    pub height: Option<Dimension>,
    #[serde(default = "no_offset")]
    pub x_offset: Dimension,
    #[serde(default = "no_offset")]
    pub y_offset: Dimension,
}

fn no_offset() -> Dimension {
    Dimension::Absolute(0.0)
}

impl CustomRequest {
    /// A request that only re-anchors, keeping the current size.
    pub fn at(anchor: Anchor) -> Self {
        Self {
            anchor,
            width: None,
            height: None,
            x_offset: no_offset(),
            y_offset: no_offset(),
        }
    }
}

/// The flat wire form of a [`CustomRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomParams {
    /// Anchor identifier; `topLeft` when missing or unrecognised.
    #[serde(alias = "anchor")]
    pub position: Option<String>,
    pub absolute_width: Option<f64>,
    pub relative_width: Option<f64>,
    pub absolute_height: Option<f64>,
    pub relative_height: Option<f64>,
    pub absolute_x_offset: Option<f64>,
    pub relative_x_offset: Option<f64>,
    pub absolute_y_offset: Option<f64>,
    pub relative_y_offset: Option<f64>,
}

/// Parse an anchor name, falling back to `topLeft` for anything unknown.
pub fn anchor_or_top_left(name: &str) -> Anchor {
    Anchor::parse(name).unwrap_or_else(|| {
        warn!("unrecognised anchor {:?}, falling back to topLeft", name);
        Anchor::TopLeft
    })
}

impl CustomParams {
    /// Apply field precedence and produce a typed request.
    pub fn to_request(&self) -> CustomRequest {
        let anchor = match self.position.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => anchor_or_top_left(name),
            _ => Anchor::TopLeft,
        };
        CustomRequest {
            anchor,
            width: Dimension::for_size(self.absolute_width, self.relative_width),
            height: Dimension::for_size(self.absolute_height, self.relative_height),
            x_offset: Dimension::for_offset(self.absolute_x_offset, self.relative_x_offset),
            y_offset: Dimension::for_offset(self.absolute_y_offset, self.relative_y_offset),
        }
    }
}

/// Resolve a custom request to a target frame.
///
/// Width and height fall back to the current window size when unset (or
/// non-positive).  Offsets are resolved against the bounds once and added
/// to the anchored origin as-is.
pub fn resolve_custom(request: &CustomRequest, current: &Rect, bounds: &Rect) -> Rect {
    if bounds.is_empty() {
        return degenerate(bounds);
    }
    let size_field = |dim: Option<Dimension>, extent: f64, fallback: f64| {
        dim.filter(|d| d.value() > 0.0)
            .map(|d| d.resolve(extent))
            .unwrap_or(fallback)
    };
    let size = Size::new(
        size_field(request.width, bounds.width(), current.width()),
        size_field(request.height, bounds.height(), current.height()),
    );
    let offset = (
        request.x_offset.resolve(bounds.width()),
        request.y_offset.resolve(bounds.height()),
    );
    place(request.anchor, size, offset, current, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn screen() -> Rect {
        Rect::from_xywh(0.0, 0.0, 1920.0, 1080.0)
    }

    fn window() -> Rect {
        Rect::from_xywh(300.0, 200.0, 800.0, 600.0)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn absolute_width_relative_height_centered() {
        let req = CustomRequest {
            width: Some(Dimension::Absolute(400.0)),
            height: Some(Dimension::Relative(0.5)),
            ..CustomRequest::at(Anchor::Center)
        };
        let r = resolve_custom(&req, &window(), &screen());
        assert_eq!(r, Rect::from_xywh(760.0, 270.0, 400.0, 540.0));
    }

    #[test]
    fn empty_request_keeps_size_and_reanchors() {
        let req = CustomRequest::at(Anchor::BottomRight);
        let r = resolve_custom(&req, &window(), &screen());
        assert_eq!(r, Rect::from_xywh(1120.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn offsets_are_added_after_anchoring() {
        let req = CustomRequest {
            width: Some(Dimension::Absolute(500.0)),
            height: Some(Dimension::Absolute(400.0)),
            x_offset: Dimension::Absolute(-20.0),
            y_offset: Dimension::Relative(0.1),
            ..CustomRequest::at(Anchor::BottomRight)
        };
        let r = resolve_custom(&req, &window(), &screen());
        assert!(close(r.min_x(), 1400.0));
        assert!(close(r.min_y(), 108.0));
        assert_eq!(r.size, Size::new(500.0, 400.0));
    }

    #[test]
    fn relative_anchor_offsets_from_current_origin() {
        let req = CustomRequest {
            x_offset: Dimension::Absolute(10.0),
            ..CustomRequest::at(Anchor::Relative)
        };
        let r = resolve_custom(&req, &window(), &screen());
        assert_eq!(r, Rect::from_xywh(310.0, 200.0, 800.0, 600.0));
    }

    #[test]
    fn non_positive_sizes_fall_back_to_current() {
        let req = CustomRequest {
            width: Some(Dimension::Absolute(0.0)),
            height: Some(Dimension::Relative(-0.5)),
            ..CustomRequest::at(Anchor::TopLeft)
        };
        let r = resolve_custom(&req, &window(), &screen());
        assert_eq!(r.size, window().size);
    }

    #[test]
    fn zero_area_bounds_degenerate() {
        let bounds = Rect::from_xywh(10.0, 10.0, 0.0, 900.0);
        let r = resolve_custom(&CustomRequest::at(Anchor::Center), &window(), &bounds);
        assert_eq!(r, Rect::new(bounds.origin, Size::ZERO));
    }

    //  Wire form

    #[test]
    fn absolute_wins_over_relative_when_positive() {
        let p = CustomParams {
            absolute_width: Some(300.0),
            relative_width: Some(0.9),
            absolute_height: Some(0.0),
            relative_height: Some(0.25),
            ..Default::default()
        };
        let req = p.to_request();
        assert_eq!(req.width, Some(Dimension::Absolute(300.0)));
        assert_eq!(req.height, Some(Dimension::Relative(0.25)));
    }

    #[test]
    fn missing_fields_mean_unset() {
        let req = CustomParams::default().to_request();
        assert_eq!(req, CustomRequest::at(Anchor::TopLeft));
    }

    #[test]
    fn negative_offsets_are_kept() {
        let p = CustomParams {
            absolute_x_offset: Some(-15.0),
            relative_y_offset: Some(-0.1),
            ..Default::default()
        };
        let req = p.to_request();
        assert_eq!(req.x_offset, Dimension::Absolute(-15.0));
        assert_eq!(req.y_offset, Dimension::Relative(-0.1));
    }

    #[test]
    fn zero_absolute_offset_yields_to_relative() {
        assert_eq!(
            Dimension::for_offset(Some(0.0), Some(-0.1)),
            Dimension::Relative(-0.1)
        );
        assert_eq!(Dimension::for_offset(Some(0.0), None), Dimension::Absolute(0.0));
    }

    #[test]
    fn unknown_anchor_falls_back_to_top_left() {
        let p = CustomParams {
            position: Some("somewhere".into()),
            ..Default::default()
        };
        assert_eq!(p.to_request().anchor, Anchor::TopLeft);
    }

    #[test]
    fn params_deserialize_from_camel_case() {
        let json = r#"{"position":"center","absoluteWidth":400,"relativeHeight":0.5}"#;
        let p: CustomParams = serde_json::from_str(json).unwrap();
        let r = resolve_custom(&p.to_request(), &window(), &screen());
        assert_eq!(r, Rect::from_xywh(760.0, 270.0, 400.0, 540.0));
    }

    #[test]
    fn anchor_alias_is_accepted() {
        let p: CustomParams = serde_json::from_str(r#"{"anchor":"bottom-left"}"#).unwrap();
        assert_eq!(p.to_request().anchor, Anchor::BottomLeft);
    }
}
