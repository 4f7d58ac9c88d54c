//! The layout resolver.
//!
//! Turns a [`LayoutSpec`] plus the window's current frame and the screen
//! bounds into a concrete target [`Rect`].  Resolution is a pure function:
//! no state is kept between calls and the bounds are supplied fresh every
//! time, since the window may have moved to another display in between.
//!
//! # Applying the result
//!
//! The returned frame must be realised **move first, then resize**
//! ([`WindowPort::apply`](crate::traits::WindowPort::apply)).  Shrinking a
//! large window in place before moving it would otherwise clip it against
//! the screen edges mid-transition.

use crate::geometry::{Point, Rect, Size};
use crate::grid::ScreenGrid;
use crate::layout::{ActionKind, Anchor, LayoutSpec, SizeSpec, FOURTH, RESTORE_FRACTION, THIRD};

/// Origin of a window of `size` placed at `anchor` within `bounds`.
///
/// [`Anchor::Relative`] keeps `current` unchanged.
pub fn anchor_origin(anchor: Anchor, size: Size, current: Point, bounds: &Rect) -> Point {
    let (w, h) = (size.width, size.height);
    match anchor {
        Anchor::Center => Point::new(bounds.mid_x() - w / 2.0, bounds.mid_y() - h / 2.0),
        Anchor::CenterRight => Point::new(bounds.max_x() - w, bounds.mid_y() - h / 2.0),
        Anchor::CenterLeft => Point::new(bounds.min_x(), bounds.mid_y() - h / 2.0),
        Anchor::TopRight => Point::new(bounds.max_x() - w, bounds.max_y() - h),
        Anchor::TopLeft => Point::new(bounds.min_x(), bounds.max_y() - h),
        Anchor::BottomRight => Point::new(bounds.max_x() - w, bounds.min_y()),
        Anchor::BottomLeft => Point::new(bounds.min_x(), bounds.min_y()),
        Anchor::Relative => current,
    }
}

/// Place a window of `size` at `anchor`, then shift it by `offset`.
pub(crate) fn place(
    anchor: Anchor,
    size: Size,
    offset: (f64, f64),
    current: &Rect,
    bounds: &Rect,
) -> Rect {
    let size = size.non_negative();
    let origin = anchor_origin(anchor, size, current.origin, bounds).offset(offset.0, offset.1);
    Rect::new(origin, size)
}

/// Zero-size frame at the bounds origin, used when no usable display area
/// was detected.
pub(crate) fn degenerate(bounds: &Rect) -> Rect {
    Rect::new(bounds.origin, Size::ZERO)
}

/// Target size for `spec`, falling back to `current` on unspecified axes.
fn target_size(spec: SizeSpec, current: Size, bounds: &Rect) -> Size {
    let (width, height) = match spec {
        SizeSpec::Relative { width, height } => (
            width.map(|f| f * bounds.width()),
            height.map(|f| f * bounds.height()),
        ),
        SizeSpec::Absolute { width, height } => (width, height),
    };
    Size::new(
        width.unwrap_or(current.width),
        height.unwrap_or(current.height),
    )
}

/// Resolve `spec` to a target frame.
///
/// Never fails.  With zero-area `bounds` the result is a zero-size frame at
/// the bounds origin; callers should treat that as a display detection
/// problem upstream.
pub fn resolve(spec: LayoutSpec, current: &Rect, bounds: &Rect) -> Rect {
    if bounds.is_empty() {
        return degenerate(bounds);
    }
    match spec {
        LayoutSpec::Anchored(anchor, size) => {
            let size = target_size(size, current.size, bounds);
            place(anchor, size, (0.0, 0.0), current, bounds)
        }
        LayoutSpec::Dynamic(action) => resolve_action(action, current, bounds),
    }
}

fn resolve_action(action: ActionKind, current: &Rect, bounds: &Rect) -> Rect {
    match action {
        ActionKind::ToggleFullscreen => {
            if bounds.is_covered_by(current.size) {
                let size = bounds.size.scale(RESTORE_FRACTION, RESTORE_FRACTION);
                place(Anchor::Center, size, (0.0, 0.0), current, bounds)
            } else {
                *bounds
            }
        }
        ActionKind::MaximizeHeight => Rect::from_xywh(
            current.min_x(),
            bounds.min_y(),
            current.width(),
            bounds.height(),
        ),
        ActionKind::MaximizeWidth => Rect::from_xywh(
            bounds.min_x(),
            current.min_y(),
            bounds.width(),
            current.height(),
        ),
        // No display enumeration: only pull a stray window back on screen.
        ActionKind::PreviousDisplay | ActionKind::NextDisplay => {
            if bounds.contains_rect(current) {
                *current
            } else {
                place(Anchor::Center, current.size, (0.0, 0.0), current, bounds)
            }
        }
        ActionKind::SecondFourthOfRow => ScreenGrid::columns(FOURTH).cell(bounds, 1, 0),
        ActionKind::ThirdFourthOfRow => ScreenGrid::columns(FOURTH).cell(bounds, 2, 0),
        ActionKind::TopCenterSixth => ScreenGrid::new(THIRD, 0.5).top_cell(bounds, 1),
        ActionKind::BottomCenterSixth => ScreenGrid::new(THIRD, 0.5).cell(bounds, 1, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{lookup, Template};

    const EPS: f64 = 1e-6;

    fn screen() -> Rect {
        Rect::from_xywh(0.0, 0.0, 1920.0, 1080.0)
    }

    fn window() -> Rect {
        Rect::from_xywh(300.0, 200.0, 800.0, 600.0)
    }

    fn assert_rect_eq(actual: Rect, expected: Rect) {
        let close = |a: f64, b: f64| (a - b).abs() < EPS;
        assert!(
            close(actual.min_x(), expected.min_x())
                && close(actual.min_y(), expected.min_y())
                && close(actual.width(), expected.width())
                && close(actual.height(), expected.height()),
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    fn resolve_id(id: &str, current: &Rect) -> Rect {
        resolve(lookup(id).unwrap(), current, &screen())
    }

    /// Expected frame of every template for `window()` on `screen()`.
    const CATALOG: &[(&str, [f64; 4])] = &[
        ("toggle-fullscreen", [0.0, 0.0, 1920.0, 1080.0]),
        ("maximize", [0.0, 0.0, 1920.0, 1080.0]),
        ("maximize-height", [300.0, 0.0, 800.0, 1080.0]),
        ("maximize-width", [0.0, 200.0, 1920.0, 600.0]),
        ("left-half", [0.0, 0.0, 960.0, 1080.0]),
        ("right-half", [960.0, 0.0, 960.0, 1080.0]),
        ("bottom-half", [0.0, 0.0, 1920.0, 540.0]),
        ("top-half", [0.0, 540.0, 1920.0, 540.0]),
        ("center", [560.0, 240.0, 800.0, 600.0]),
        ("move-up", [0.0, 480.0, 800.0, 600.0]),
        ("move-down", [0.0, 0.0, 800.0, 600.0]),
        ("move-left", [0.0, 240.0, 800.0, 600.0]),
        ("move-right", [1120.0, 240.0, 800.0, 600.0]),
        ("restore", [384.0, 216.0, 1152.0, 648.0]),
        ("reasonable-size", [384.0, 216.0, 1152.0, 648.0]),
        ("previous-display", [300.0, 200.0, 800.0, 600.0]),
        ("next-display", [300.0, 200.0, 800.0, 600.0]),
        ("first-third", [0.0, 0.0, 633.6, 1080.0]),
        ("first-two-thirds", [0.0, 0.0, 1286.4, 1080.0]),
        ("center-third", [643.2, 0.0, 633.6, 1080.0]),
        ("last-two-thirds", [633.6, 0.0, 1286.4, 1080.0]),
        ("last-third", [1286.4, 0.0, 633.6, 1080.0]),
        ("first-fourth", [0.0, 0.0, 480.0, 1080.0]),
        ("second-fourth", [480.0, 0.0, 480.0, 1080.0]),
        ("third-fourth", [960.0, 0.0, 480.0, 1080.0]),
        ("last-fourth", [1440.0, 0.0, 480.0, 1080.0]),
        ("top-left-quarter", [0.0, 540.0, 960.0, 540.0]),
        ("top-right-quarter", [960.0, 540.0, 960.0, 540.0]),
        ("bottom-left-quarter", [0.0, 0.0, 960.0, 540.0]),
        ("bottom-right-quarter", [960.0, 0.0, 960.0, 540.0]),
        ("top-left-sixth", [0.0, 540.0, 633.6, 540.0]),
        ("top-center-sixth", [633.6, 540.0, 633.6, 540.0]),
        ("top-right-sixth", [1286.4, 540.0, 633.6, 540.0]),
        ("bottom-left-sixth", [0.0, 0.0, 633.6, 540.0]),
        ("bottom-center-sixth", [633.6, 0.0, 633.6, 540.0]),
        ("bottom-right-sixth", [1286.4, 0.0, 633.6, 540.0]),
    ];

    #[test]
    fn every_template_resolves_to_its_frame() {
        assert_eq!(CATALOG.len(), Template::ALL.len());
        for t in Template::ALL {
            let [x, y, w, h] = CATALOG
                .iter()
                .find(|(id, _)| *id == t.id())
                .map(|(_, frame)| *frame)
                .unwrap_or_else(|| panic!("no expected frame for {}", t));
            assert_rect_eq(resolve_id(t.id(), &window()), Rect::from_xywh(x, y, w, h));
        }
    }

    #[test]
    fn left_half() {
        assert_rect_eq(
            resolve_id("left-half", &window()),
            Rect::from_xywh(0.0, 0.0, 960.0, 1080.0),
        );
    }

    #[test]
    fn top_center_sixth() {
        assert_rect_eq(
            resolve_id("top-center-sixth", &window()),
            Rect::from_xywh(633.6, 540.0, 633.6, 540.0),
        );
    }

    #[test]
    fn bottom_center_sixth() {
        assert_rect_eq(
            resolve_id("bottom-center-sixth", &window()),
            Rect::from_xywh(633.6, 0.0, 633.6, 540.0),
        );
    }

    #[test]
    fn second_and_third_fourth() {
        assert_rect_eq(
            resolve_id("second-fourth", &window()),
            Rect::from_xywh(480.0, 0.0, 480.0, 1080.0),
        );
        assert_rect_eq(
            resolve_id("third-fourth", &window()),
            Rect::from_xywh(960.0, 0.0, 480.0, 1080.0),
        );
    }

    #[test]
    fn maximize_fills_bounds_from_any_start() {
        let bounds = Rect::from_xywh(0.0, 70.0, 1440.0, 830.0);
        for start in [
            window(),
            Rect::from_xywh(-500.0, 2000.0, 10.0, 10.0),
            Rect::from_xywh(0.0, 0.0, 5000.0, 5000.0),
        ] {
            let r = resolve(lookup("maximize").unwrap(), &start, &bounds);
            assert_eq!(r, bounds);
        }
    }

    #[test]
    fn center_keeps_current_size() {
        assert_rect_eq(
            resolve_id("center", &window()),
            Rect::from_xywh(560.0, 240.0, 800.0, 600.0),
        );
    }

    #[test]
    fn move_templates_keep_size() {
        assert_rect_eq(
            resolve_id("move-up", &window()),
            Rect::from_xywh(0.0, 480.0, 800.0, 600.0),
        );
        assert_rect_eq(
            resolve_id("move-down", &window()),
            Rect::from_xywh(0.0, 0.0, 800.0, 600.0),
        );
        assert_rect_eq(
            resolve_id("move-right", &window()),
            Rect::from_xywh(1120.0, 240.0, 800.0, 600.0),
        );
    }

    #[test]
    fn quarters_hit_their_corners() {
        let w = window();
        assert_rect_eq(
            resolve_id("top-right-quarter", &w),
            Rect::from_xywh(960.0, 540.0, 960.0, 540.0),
        );
        assert_rect_eq(
            resolve_id("bottom-left-quarter", &w),
            Rect::from_xywh(0.0, 0.0, 960.0, 540.0),
        );
    }

    #[test]
    fn bounds_origin_is_respected() {
        let bounds = Rect::from_xywh(1920.0, 100.0, 1280.0, 700.0);
        let r = resolve(lookup("right-half").unwrap(), &window(), &bounds);
        assert_rect_eq(r, Rect::from_xywh(2560.0, 100.0, 640.0, 700.0));
    }

    /// Containment with a little slack for fractional widths like `0.67`.
    fn within(bounds: &Rect, r: &Rect) -> bool {
        r.min_x() >= bounds.min_x() - EPS
            && r.max_x() <= bounds.max_x() + EPS
            && r.min_y() >= bounds.min_y() - EPS
            && r.max_y() <= bounds.max_y() + EPS
    }

    #[test]
    fn anchored_templates_stay_within_bounds() {
        let bounds = screen();
        let current = Rect::from_xywh(5000.0, -300.0, 400.0, 300.0);
        for t in Template::ALL {
            if let LayoutSpec::Anchored(..) = t.spec() {
                let r = resolve(t.spec(), &current, &bounds);
                assert!(within(&bounds, &r), "{} escaped bounds: {:?}", t, r);
            }
        }
    }

    #[test]
    fn every_anchor_stays_within_bounds() {
        let bounds = screen();
        let size = Size::new(700.0, 500.0);
        for anchor in [
            Anchor::Center,
            Anchor::CenterLeft,
            Anchor::CenterRight,
            Anchor::TopLeft,
            Anchor::TopRight,
            Anchor::BottomLeft,
            Anchor::BottomRight,
        ] {
            let spec = LayoutSpec::Anchored(
                anchor,
                SizeSpec::Absolute {
                    width: Some(size.width),
                    height: Some(size.height),
                },
            );
            let r = resolve(spec, &window(), &bounds);
            assert!(bounds.contains_rect(&r), "{} escaped bounds: {:?}", anchor, r);
        }
    }

    #[test]
    fn relative_anchor_is_idempotent() {
        let spec = LayoutSpec::Anchored(Anchor::Relative, SizeSpec::fraction(0.5, 0.5));
        let once = resolve(spec, &window(), &screen());
        let twice = resolve(spec, &once, &screen());
        assert_eq!(once, twice);
        assert_eq!(once.origin, window().origin);
    }

    #[test]
    fn toggle_fullscreen_from_window_fills_bounds() {
        let r = resolve_id("toggle-fullscreen", &window());
        assert_eq!(r, screen());
    }

    #[test]
    fn toggle_fullscreen_from_fullscreen_restores() {
        let r = resolve_id("toggle-fullscreen", &screen());
        assert_rect_eq(r, Rect::from_xywh(384.0, 216.0, 1152.0, 648.0));
    }

    #[test]
    fn toggle_fullscreen_is_two_state() {
        let full = resolve_id("toggle-fullscreen", &window());
        let restored = resolve_id("toggle-fullscreen", &full);
        assert_ne!(restored, screen());
        let full_again = resolve_id("toggle-fullscreen", &restored);
        assert_eq!(full_again, screen());
        assert_rect_eq(resolve_id("toggle-fullscreen", &full_again), restored);
    }

    #[test]
    fn oversized_window_counts_as_fullscreen() {
        let big = Rect::from_xywh(-10.0, -10.0, 2000.0, 1200.0);
        let r = resolve_id("toggle-fullscreen", &big);
        assert_rect_eq(r, Rect::from_xywh(384.0, 216.0, 1152.0, 648.0));
    }

    #[test]
    fn maximize_height_and_width() {
        let w = window();
        assert_eq!(
            resolve_id("maximize-height", &w),
            Rect::from_xywh(300.0, 0.0, 800.0, 1080.0)
        );
        assert_eq!(
            resolve_id("maximize-width", &w),
            Rect::from_xywh(0.0, 200.0, 1920.0, 600.0)
        );
    }

    #[test]
    fn display_actions_noop_when_on_screen() {
        assert_eq!(resolve_id("next-display", &window()), window());
        assert_eq!(resolve_id("previous-display", &window()), window());
    }

    #[test]
    fn display_actions_recenter_stray_window() {
        let stray = Rect::from_xywh(1800.0, 900.0, 400.0, 300.0);
        assert_rect_eq(
            resolve_id("next-display", &stray),
            Rect::from_xywh(760.0, 390.0, 400.0, 300.0),
        );
        let below = Rect::from_xywh(100.0, -50.0, 400.0, 300.0);
        assert_rect_eq(
            resolve_id("previous-display", &below),
            Rect::from_xywh(760.0, 390.0, 400.0, 300.0),
        );
    }

    #[test]
    fn zero_area_bounds_degenerate() {
        let bounds = Rect::from_xywh(50.0, 60.0, 0.0, 0.0);
        for t in Template::ALL {
            let r = resolve(t.spec(), &window(), &bounds);
            assert_eq!(r, Rect::new(Point::new(50.0, 60.0), Size::ZERO), "{}", t);
        }
    }

    #[test]
    fn negative_absolute_size_is_clamped() {
        let spec = LayoutSpec::Anchored(
            Anchor::TopLeft,
            SizeSpec::Absolute {
                width: Some(-100.0),
                height: None,
            },
        );
        let r = resolve(spec, &window(), &screen());
        assert_eq!(r.size, Size::new(0.0, 600.0));
    }
}
