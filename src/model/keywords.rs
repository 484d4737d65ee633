//! String-valued context properties as enums.
//!
//! The engine silently ignores keywords it doesn't know, so values are parsed
//! on our side and only canonical strings are ever handed to it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CanvasError;

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal, default = $default:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $css:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $css)] $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $css, )+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CanvasError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $css => Ok($name::$variant), )+
                    _ => Err(CanvasError::UnknownKeyword {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

keyword_enum! {
    /// `globalCompositeOperation`: how new shapes combine with what is already drawn.
    CompositeOperation, "composite operation", default = SourceOver {
        /// New shapes on top of existing content.
        SourceOver => "source-over",
        /// New shapes behind existing content.
        DestinationOver => "destination-over",
        /// New shape only where both overlap, everything else transparent.
        SourceIn => "source-in",
        DestinationIn => "destination-in",
        /// New shape where it doesn't overlap existing content.
        SourceOut => "source-out",
        DestinationOut => "destination-out",
        SourceAtop => "source-atop",
        DestinationAtop => "destination-atop",
        /// Overlapping colors are added.
        Lighter => "lighter",
        Xor => "xor",
        /// Only the new shape is shown.
        Copy => "copy",
        Multiply => "multiply",
        Screen => "screen",
        Overlay => "overlay",
        Darken => "darken",
        Lighten => "lighten",
        ColorDodge => "color-dodge",
        ColorBurn => "color-burn",
        HardLight => "hard-light",
        SoftLight => "soft-light",
        Difference => "difference",
        Exclusion => "exclusion",
        Hue => "hue",
        Saturation => "saturation",
        Color => "color",
        Luminosity => "luminosity",
    }
}

keyword_enum! {
    LineCap, "line cap", default = Butt {
        Butt => "butt",
        Round => "round",
        Square => "square",
    }
}

keyword_enum! {
    LineJoin, "line join", default = Miter {
        Round => "round",
        Bevel => "bevel",
        Miter => "miter",
    }
}

keyword_enum! {
    TextAlign, "text align", default = Start {
        Left => "left",
        Right => "right",
        Center => "center",
        Start => "start",
        End => "end",
    }
}

keyword_enum! {
    TextBaseline, "text baseline", default = Alphabetic {
        Top => "top",
        Hanging => "hanging",
        Middle => "middle",
        Alphabetic => "alphabetic",
        Ideographic => "ideographic",
        Bottom => "bottom",
    }
}

keyword_enum! {
    /// How a pattern tiles.
    Repetition, "pattern repetition", default = Repeat {
        Repeat => "repeat",
        RepeatX => "repeat-x",
        RepeatY => "repeat-y",
        NoRepeat => "no-repeat",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_parses_back() {
        for op in CompositeOperation::ALL {
            assert_eq!(op.as_str().parse::<CompositeOperation>().unwrap(), *op);
        }
        for cap in LineCap::ALL {
            assert_eq!(cap.to_string().parse::<LineCap>().unwrap(), *cap);
        }
        for base in TextBaseline::ALL {
            assert_eq!(base.as_str().parse::<TextBaseline>().unwrap(), *base);
        }
        assert_eq!(CompositeOperation::ALL.len(), 26);
    }

    #[test]
    fn defaults_match_a_fresh_context() {
        assert_eq!(CompositeOperation::default().as_str(), "source-over");
        assert_eq!(LineCap::default().as_str(), "butt");
        assert_eq!(LineJoin::default().as_str(), "miter");
        assert_eq!(TextAlign::default().as_str(), "start");
        assert_eq!(TextBaseline::default().as_str(), "alphabetic");
        assert_eq!(Repetition::default().as_str(), "repeat");
    }

    #[test]
    fn unknown_keyword_is_reported() {
        match "plus-lighter".parse::<CompositeOperation>() {
            Err(CanvasError::UnknownKeyword { kind, value }) => {
                assert_eq!(kind, "composite operation");
                assert_eq!(value, "plus-lighter");
            }
            other => panic!("unexpected {:?}", other),
        }
        // keywords are case sensitive in the engine too
        assert!("Round".parse::<LineJoin>().is_err());
    }

    #[test]
    fn serde_uses_css_names() {
        let json = serde_json::to_string(&CompositeOperation::DestinationAtop).unwrap();
        assert_eq!(json, r#""destination-atop""#);
        let rep: Repetition = serde_json::from_str(r#""no-repeat""#).unwrap();
        assert_eq!(rep, Repetition::NoRepeat);
    }
}
