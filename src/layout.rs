//! The layout catalog.
//!
//! Every named template (`"left-half"`, `"top-center-sixth"`, …) maps to
//! exactly one [`LayoutSpec`].  The table is fixed at compile time; template
//! identifiers are the public vocabulary that hotkeys, scripts and the IPC
//! socket depend on, so they only ever match exactly.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Reference point on the screen used to place a window of a known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Center,
    CenterLeft,
    CenterRight,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Keep the window's current origin (size-only changes).
    Relative,
}

impl Anchor {
    /// Parse an anchor identifier.
    ///
    /// Case-insensitive; `-`, `_` and whitespace are ignored, so
    /// `"centerLeft"`, `"center-left"` and `"CENTER_LEFT"` are equivalent.
    pub fn parse(s: &str) -> Option<Anchor> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(|c| c.to_lowercase())
            .collect();
        match normalized.as_str() {
            "center" => Some(Anchor::Center),
            "centerleft" => Some(Anchor::CenterLeft),
            "centerright" => Some(Anchor::CenterRight),
            "topleft" => Some(Anchor::TopLeft),
            "topright" => Some(Anchor::TopRight),
            "bottomleft" => Some(Anchor::BottomLeft),
            "bottomright" => Some(Anchor::BottomRight),
            "relative" => Some(Anchor::Relative),
            _ => None,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Anchor::Center => "center",
            Anchor::CenterLeft => "centerLeft",
            Anchor::CenterRight => "centerRight",
            Anchor::TopLeft => "topLeft",
            Anchor::TopRight => "topRight",
            Anchor::BottomLeft => "bottomLeft",
            Anchor::BottomRight => "bottomRight",
            Anchor::Relative => "relative",
        };
        f.write_str(s)
    }
}

impl Serialize for Anchor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Anchor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Anchor::parse(&s).ok_or_else(|| DeError::custom(format!("invalid anchor: {:?}", s)))
    }
}

/// Target size of an anchored layout.
///
/// A `None` dimension keeps the window's current extent on that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeSpec {
    /// Fractions of the screen bounds (`0.0..=1.0`).
    Relative {
        width: Option<f64>,
        height: Option<f64>,
    },
    /// Raw screen units.
    Absolute {
        width: Option<f64>,
        height: Option<f64>,
    },
}

impl SizeSpec {
    /// Keep both current dimensions.
    pub const KEEP: SizeSpec = SizeSpec::Relative {
        width: None,
        height: None,
    };

    /// Shorthand for a fully-specified relative size.
    pub const fn fraction(width: f64, height: f64) -> SizeSpec {
        SizeSpec::Relative {
            width: Some(width),
            height: Some(height),
        }
    }
}

/// Layouts whose target depends on the window's current geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    ToggleFullscreen,
    MaximizeHeight,
    MaximizeWidth,
    PreviousDisplay,
    NextDisplay,
    SecondFourthOfRow,
    ThirdFourthOfRow,
    TopCenterSixth,
    BottomCenterSixth,
}

/// What a template resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutSpec {
    Anchored(Anchor, SizeSpec),
    Dynamic(ActionKind),
}

/// Size used by `restore`, `reasonable-size` and the fullscreen toggle when
/// leaving fullscreen.
pub const RESTORE_FRACTION: f64 = 0.6;

/// Fraction of the screen width used for "third" columns.
pub const THIRD: f64 = 0.33;

/// Fraction of the screen width used for "two thirds" columns.
pub const TWO_THIRDS: f64 = 0.67;

/// Fraction of the screen width used for "fourth" columns.
pub const FOURTH: f64 = 0.25;

macro_rules! templates {
    ($($variant:ident => $id:literal,)*) => {
        /// Every named template, in catalog order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Template {
            $($variant,)*
        }

        impl Template {
            /// The complete, fixed vocabulary.
            pub const ALL: &'static [Template] = &[$(Template::$variant,)*];

            /// The template's public identifier.
            pub fn id(self) -> &'static str {
                match self {
                    $(Template::$variant => $id,)*
                }
            }

            /// Look a template up by its exact identifier.
            pub fn from_id(id: &str) -> Option<Template> {
                match id {
                    $($id => Some(Template::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

templates! {
    ToggleFullscreen => "toggle-fullscreen",
    Maximize => "maximize",
    MaximizeHeight => "maximize-height",
    MaximizeWidth => "maximize-width",
    LeftHalf => "left-half",
    RightHalf => "right-half",
    BottomHalf => "bottom-half",
    TopHalf => "top-half",
    Center => "center",
    MoveUp => "move-up",
    MoveDown => "move-down",
    MoveLeft => "move-left",
    MoveRight => "move-right",
    Restore => "restore",
    ReasonableSize => "reasonable-size",
    PreviousDisplay => "previous-display",
    NextDisplay => "next-display",
    FirstThird => "first-third",
    FirstTwoThirds => "first-two-thirds",
    CenterThird => "center-third",
    LastTwoThirds => "last-two-thirds",
    LastThird => "last-third",
    FirstFourth => "first-fourth",
    SecondFourth => "second-fourth",
    ThirdFourth => "third-fourth",
    LastFourth => "last-fourth",
    TopLeftQuarter => "top-left-quarter",
    TopRightQuarter => "top-right-quarter",
    BottomLeftQuarter => "bottom-left-quarter",
    BottomRightQuarter => "bottom-right-quarter",
    TopLeftSixth => "top-left-sixth",
    TopCenterSixth => "top-center-sixth",
    TopRightSixth => "top-right-sixth",
    BottomLeftSixth => "bottom-left-sixth",
    BottomCenterSixth => "bottom-center-sixth",
    BottomRightSixth => "bottom-right-sixth",
}

impl Template {
    /// The layout this template stands for.
    pub fn spec(self) -> LayoutSpec {
        use Anchor::*;
        use LayoutSpec::{Anchored, Dynamic};

        match self {
            Template::ToggleFullscreen => Dynamic(ActionKind::ToggleFullscreen),
            Template::Maximize => Anchored(TopLeft, SizeSpec::fraction(1.0, 1.0)),
            Template::MaximizeHeight => Dynamic(ActionKind::MaximizeHeight),
            Template::MaximizeWidth => Dynamic(ActionKind::MaximizeWidth),

            Template::LeftHalf => Anchored(CenterLeft, SizeSpec::fraction(0.5, 1.0)),
            Template::RightHalf => Anchored(CenterRight, SizeSpec::fraction(0.5, 1.0)),
            Template::BottomHalf => Anchored(BottomLeft, SizeSpec::fraction(1.0, 0.5)),
            Template::TopHalf => Anchored(TopLeft, SizeSpec::fraction(1.0, 0.5)),

            Template::Center => Anchored(Center, SizeSpec::KEEP),
            Template::MoveUp => Anchored(TopLeft, SizeSpec::KEEP),
            Template::MoveDown => Anchored(BottomLeft, SizeSpec::KEEP),
            Template::MoveLeft => Anchored(CenterLeft, SizeSpec::KEEP),
            Template::MoveRight => Anchored(CenterRight, SizeSpec::KEEP),

            Template::Restore | Template::ReasonableSize => Anchored(
                Center,
                SizeSpec::fraction(RESTORE_FRACTION, RESTORE_FRACTION),
            ),

            Template::PreviousDisplay => Dynamic(ActionKind::PreviousDisplay),
            Template::NextDisplay => Dynamic(ActionKind::NextDisplay),

            Template::FirstThird => Anchored(CenterLeft, SizeSpec::fraction(THIRD, 1.0)),
            Template::FirstTwoThirds => Anchored(CenterLeft, SizeSpec::fraction(TWO_THIRDS, 1.0)),
            Template::CenterThird => Anchored(Center, SizeSpec::fraction(THIRD, 1.0)),
            Template::LastTwoThirds => Anchored(CenterRight, SizeSpec::fraction(TWO_THIRDS, 1.0)),
            Template::LastThird => Anchored(CenterRight, SizeSpec::fraction(THIRD, 1.0)),

            Template::FirstFourth => Anchored(CenterLeft, SizeSpec::fraction(FOURTH, 1.0)),
            Template::SecondFourth => Dynamic(ActionKind::SecondFourthOfRow),
            Template::ThirdFourth => Dynamic(ActionKind::ThirdFourthOfRow),
            Template::LastFourth => Anchored(CenterRight, SizeSpec::fraction(FOURTH, 1.0)),

            Template::TopLeftQuarter => Anchored(TopLeft, SizeSpec::fraction(0.5, 0.5)),
            Template::TopRightQuarter => Anchored(TopRight, SizeSpec::fraction(0.5, 0.5)),
            Template::BottomLeftQuarter => Anchored(BottomLeft, SizeSpec::fraction(0.5, 0.5)),
            Template::BottomRightQuarter => Anchored(BottomRight, SizeSpec::fraction(0.5, 0.5)),

            Template::TopLeftSixth => Anchored(TopLeft, SizeSpec::fraction(THIRD, 0.5)),
            Template::TopCenterSixth => Dynamic(ActionKind::TopCenterSixth),
            Template::TopRightSixth => Anchored(TopRight, SizeSpec::fraction(THIRD, 0.5)),
            Template::BottomLeftSixth => Anchored(BottomLeft, SizeSpec::fraction(THIRD, 0.5)),
            Template::BottomCenterSixth => Dynamic(ActionKind::BottomCenterSixth),
            Template::BottomRightSixth => Anchored(BottomRight, SizeSpec::fraction(THIRD, 0.5)),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// An identifier that is not part of the template vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown template: {0:?}")]
pub struct UnknownTemplate(pub String);

/// Look up the layout for a template identifier.
///
/// Callers treat [`UnknownTemplate`] as a no-op, never as a user-facing
/// failure.
pub fn lookup(id: &str) -> Result<LayoutSpec, UnknownTemplate> {
    Template::from_id(id)
        .map(Template::spec)
        .ok_or_else(|| UnknownTemplate(id.to_string()))
}
