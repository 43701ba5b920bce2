//! Line-width tiers, label offsets and clearances.
//!
//! Stroke widths are not computed continuously. Each drawable surface
//! picks one of three tiers by body length:
//!
//! | Body length      | Silkscreen | Documentation outline |
//! |------------------|------------|-----------------------|
//! | >= 2.0 mm        | thick      | thick                 |
//! | 1.0 to < 2.0 mm  | thin       | thin                  |
//! | < 1.0 mm         | thin       | thinnest              |
//!
//! The two surfaces collapse to the same tier for mid-size parts but are
//! still chosen separately.

use serde::Deserialize;

/// Body length at or above which lines are drawn thick (mm).
pub const THICK_LENGTH: f64 = 2.0;

/// Body length at or above which the outline is drawn thin rather than thinnest (mm).
pub const THIN_LENGTH: f64 = 1.0;

/// Body length above which silkscreen lines are drawn at all (mm).
pub const SILKSCREEN_MIN_LENGTH: f64 = 1.0;

/// Body width at or above which labels use the wide offset (mm).
pub const WIDE_LABEL_WIDTH: f64 = 2.0;

/// Line-width tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTier {
    /// Thickest lines, for parts of 2.0mm and longer.
    Thick,
    /// Regular lines.
    Thin,
    /// Hairlines, used for the outline of the smallest parts.
    Thinnest,
}

/// Tier selection for both surfaces of one part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeTiers {
    /// Tier for silkscreen (placement layer) lines.
    pub silkscreen: LineTier,
    /// Tier for the documentation outline.
    pub outline: LineTier,
}

impl StrokeTiers {
    /// Selects the tiers for a body of the given length (mm).
    #[must_use]
    pub fn for_length(length: f64) -> Self {
        if length >= THICK_LENGTH {
            Self {
                silkscreen: LineTier::Thick,
                outline: LineTier::Thick,
            }
        } else if length >= THIN_LENGTH {
            Self {
                silkscreen: LineTier::Thin,
                outline: LineTier::Thin,
            }
        } else {
            Self {
                silkscreen: LineTier::Thin,
                outline: LineTier::Thinnest,
            }
        }
    }
}

/// Drawing style for generated footprints. All values in millimetres.
///
/// The defaults are the values existing libraries were generated with;
/// changing them changes every generated document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Style {
    /// Width of thick-tier lines.
    pub line_width: f64,
    /// Width of thin-tier lines.
    pub line_width_thin: f64,
    /// Width of thinnest-tier lines.
    pub line_width_thinnest: f64,
    /// Height of name/value text.
    pub text_height: f64,
    /// Stroke width of name/value text.
    pub text_stroke_width: f64,
    /// Label distance from the body edge for wide bodies.
    pub label_offset: f64,
    /// Label distance from the body edge for narrow bodies.
    pub label_offset_thin: f64,
    /// Gap between silkscreen line ends and copper.
    pub silkscreen_clearance: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            line_width: 0.25,
            line_width_thin: 0.15,
            line_width_thinnest: 0.1,
            text_height: 1.0,
            text_stroke_width: 0.2,
            label_offset: 1.1,
            label_offset_thin: 0.8,
            silkscreen_clearance: 0.15,
        }
    }
}

impl Style {
    /// Returns the line width of a tier.
    #[must_use]
    pub const fn width(&self, tier: LineTier) -> f64 {
        match tier {
            LineTier::Thick => self.line_width,
            LineTier::Thin => self.line_width_thin,
            LineTier::Thinnest => self.line_width_thinnest,
        }
    }

    /// Returns the label distance from the body edge for a body of the
    /// given width.
    #[must_use]
    pub fn label_offset_for(&self, body_width: f64) -> f64 {
        if body_width < WIDE_LABEL_WIDTH {
            self.label_offset_thin
        } else {
            self.label_offset
        }
    }
}
