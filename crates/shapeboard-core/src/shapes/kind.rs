//! Shape kinds offered by the palette.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a shape.
///
/// Stored on the wire as a lowercase string. Kinds this build does not know
/// about are kept as [`ShapeKind::Unknown`] so that a drawing saved by a newer
/// editor survives a load/save cycle untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    /// Unrecognised kind read from storage. Never produced by the palette.
    Unknown(String),
}

impl ShapeKind {
    /// The kinds shown in the palette, in display order.
    pub const PALETTE: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle];

    /// Wire name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Unknown(name) => name,
        }
    }

    /// Whether this kind can be drawn and hit-tested.
    pub fn is_known(&self) -> bool {
        !matches!(self, ShapeKind::Unknown(_))
    }

    /// Fill and stroke used for this kind on the canvas and in the palette.
    pub fn palette_style(&self) -> Option<PaletteStyle> {
        let (fill, stroke) = match self {
            ShapeKind::Circle => ((0x64, 0xb5, 0xf6), (0x19, 0x76, 0xd2)),
            ShapeKind::Square => ((0x81, 0xc7, 0x84), (0x38, 0x8e, 0x3c)),
            ShapeKind::Triangle => ((0xff, 0xf1, 0x76), (0xfb, 0xc0, 0x2d)),
            ShapeKind::Unknown(_) => return None,
        };
        Some(PaletteStyle {
            fill: Color::from_rgba8(fill.0, fill.1, fill.2, 255),
            stroke: Color::from_rgba8(stroke.0, stroke.1, stroke.2, 255),
            stroke_width: PaletteStyle::STROKE_WIDTH,
        })
    }
}

impl From<String> for ShapeKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "circle" => ShapeKind::Circle,
            "square" => ShapeKind::Square,
            "triangle" => ShapeKind::Triangle,
            _ => ShapeKind::Unknown(name),
        }
    }
}

impl From<&str> for ShapeKind {
    fn from(name: &str) -> Self {
        ShapeKind::from(name.to_string())
    }
}

impl From<ShapeKind> for String {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colors for drawing a shape kind.
#[derive(Debug, Clone, Copy)]
pub struct PaletteStyle {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
}

impl PaletteStyle {
    pub const STROKE_WIDTH: f64 = 2.0;
}
