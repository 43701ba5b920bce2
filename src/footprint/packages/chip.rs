//! Footprint layout for two-terminal chip components.
//!
//! Chip components include:
//! - Resistors (01005, 0201, 0402, 0603, 0805, 1206, 1210, 2010, 2512)
//! - Capacitors and inductors of the same sizes
//!
//! The land pattern is taken directly from the part dimensions: two
//! rectangular pads separated by the inter-pad gap, a documentation
//! outline of the body, silkscreen lines along the long edges and two
//! text labels.

use serde::Deserialize;

use crate::error::SpecError;
use crate::footprint::naming;
use crate::footprint::packages::{
    Edge, FootprintCalculator, FootprintLayout, FootprintVariant, HAlign, LabelKind, Layer, Pad,
    Polygon, Point, Primitive, StrokeText, VAlign,
};
use crate::footprint::style::{StrokeTiers, Style, SILKSCREEN_MIN_LENGTH};

/// Placeholder substituted with the component designator.
pub const NAME_PLACEHOLDER: &str = "{{NAME}}";

/// Placeholder substituted with the component value.
pub const VALUE_PLACEHOLDER: &str = "{{VALUE}}";

/// Dimensions of one chip part. All lengths in millimetres.
///
/// Construction validates that every dimension is positive and that the
/// pads are separated by less than the body length. Once built the
/// values cannot change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawChipSpec")]
pub struct ChipSpec {
    size_imperial: String,
    length: f64,
    width: f64,
    height: f64,
    pad_length: f64,
    pad_width: f64,
    gap: f64,
}

/// Unvalidated [`ChipSpec`] as read from a configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawChipSpec {
    size_imperial: String,
    length: f64,
    width: f64,
    height: f64,
    pad_length: f64,
    pad_width: f64,
    gap: f64,
}

impl TryFrom<RawChipSpec> for ChipSpec {
    type Error = SpecError;

    fn try_from(raw: RawChipSpec) -> Result<Self, Self::Error> {
        Self::new(
            raw.size_imperial,
            raw.length,
            raw.width,
            raw.height,
            raw.pad_length,
            raw.pad_width,
            raw.gap,
        )
    }
}

impl ChipSpec {
    /// Creates a validated chip specification.
    ///
    /// # Arguments
    ///
    /// * `size_imperial` - Imperial size label, e.g. `"0603"`
    /// * `length` - Body length along the pad axis
    /// * `width` - Body width
    /// * `height` - Maximum body height
    /// * `pad_length` - Pad size along the pad axis
    /// * `pad_width` - Pad size across the pad axis
    /// * `gap` - Distance between the inner pad edges
    ///
    /// # Errors
    ///
    /// Returns an error naming the part and field if a dimension is not a
    /// positive number, or if `gap` is not smaller than `length`.
    pub fn new(
        size_imperial: impl Into<String>,
        length: f64,
        width: f64,
        height: f64,
        pad_length: f64,
        pad_width: f64,
        gap: f64,
    ) -> Result<Self, SpecError> {
        let spec = Self {
            size_imperial: size_imperial.into(),
            length,
            width,
            height,
            pad_length,
            pad_width,
            gap,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Builds a spec from a built-in table row. Debug builds validate the row.
    pub(crate) fn from_table(
        size_imperial: &str,
        [length, width, height, pad_length, pad_width, gap]: [f64; 6],
    ) -> Self {
        let spec = Self {
            size_imperial: size_imperial.to_string(),
            length,
            width,
            height,
            pad_length,
            pad_width,
            gap,
        };
        debug_assert_eq!(spec.validate(), Ok(()), "invalid table row {size_imperial}");
        spec
    }

    /// Checks that every dimension is positive and the gap fits inside the body.
    ///
    /// # Errors
    ///
    /// Returns an error naming the part and the offending field.
    pub fn validate(&self) -> Result<(), SpecError> {
        for (field, value) in [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
            ("pad_length", self.pad_length),
            ("pad_width", self.pad_width),
            ("gap", self.gap),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SpecError::NonPositive {
                    part: self.size_imperial.clone(),
                    field,
                    value,
                });
            }
        }

        if self.gap >= self.length {
            return Err(SpecError::GapTooLarge {
                part: self.size_imperial.clone(),
                gap: self.gap,
                length: self.length,
            });
        }

        Ok(())
    }

    /// Imperial size label, e.g. `"0603"`. Several height variants may share one.
    #[must_use]
    pub fn size_imperial(&self) -> &str {
        &self.size_imperial
    }

    /// Metric size code, e.g. `"1608"` for a 1.6mm x 0.8mm body.
    #[must_use]
    pub fn size_metric(&self) -> String {
        naming::metric_size_code(self.length, self.width)
    }

    /// Body length (mm).
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Body width (mm).
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Maximum body height (mm).
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Pad size along the pad axis (mm).
    #[must_use]
    pub const fn pad_length(&self) -> f64 {
        self.pad_length
    }

    /// Pad size across the pad axis (mm).
    #[must_use]
    pub const fn pad_width(&self) -> f64 {
        self.pad_width
    }

    /// Distance between the inner pad edges (mm).
    #[must_use]
    pub const fn gap(&self) -> f64 {
        self.gap
    }
}

/// Lays out chip footprints.
#[derive(Debug, Clone, Default)]
pub struct ChipCalculator {
    style: Style,
}

impl ChipCalculator {
    /// Creates a calculator drawing with the given style.
    #[must_use]
    pub const fn new(style: Style) -> Self {
        Self { style }
    }

    fn label(&self, layer: Layer, v_align: VAlign, y: f64, value: &str) -> StrokeText {
        StrokeText {
            layer,
            height: self.style.text_height,
            stroke_width: self.style.text_stroke_width,
            h_align: HAlign::Center,
            v_align,
            position: Point::new(0.0, y),
            rotation: 0.0,
            auto_rotate: true,
            mirror: false,
            value: value.to_string(),
        }
    }
}

impl FootprintCalculator for ChipCalculator {
    type Spec = ChipSpec;
    type Error = SpecError;

    /// Lays out one footprint variant of a chip part.
    ///
    /// Primitives are returned in drawing order: pad 2 (right), pad 1
    /// (left), documentation outline, silkscreen top and bottom (only for
    /// bodies longer than 1.0mm), name label, value label.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::SilkscreenClearance`] if silkscreen is drawn
    /// but the gap is too narrow for the line plus its clearance, and
    /// [`SpecError::NonPositive`] if the variant adjustment shrinks a pad
    /// to nothing.
    fn layout(
        &self,
        spec: &ChipSpec,
        variant: &FootprintVariant,
    ) -> Result<FootprintLayout, SpecError> {
        let style = &self.style;
        let tiers = StrokeTiers::for_length(spec.length);
        let silkscreen_width = style.width(tiers.silkscreen);
        let outline_width = style.width(tiers.outline);

        let pad_length = spec.pad_length + variant.adjust.pad_length_delta;
        let pad_width = spec.pad_width + variant.adjust.pad_width_delta;
        for (field, value) in [("pad_length", pad_length), ("pad_width", pad_width)] {
            if value <= 0.0 {
                return Err(SpecError::NonPositive {
                    part: spec.size_imperial.clone(),
                    field,
                    value,
                });
            }
        }

        let mut primitives = Vec::with_capacity(7);

        // Pads sit symmetric about the origin, inner edges at +-gap/2
        let pad_x = spec.gap / 2.0 + pad_length / 2.0;
        primitives.push(Primitive::Pad(Pad::rect(2, pad_x, 0.0, pad_length, pad_width)));
        primitives.push(Primitive::Pad(Pad::rect(1, -pad_x, 0.0, pad_length, pad_width)));

        primitives.push(Primitive::Outline(Polygon::centred_rect(
            Layer::TopDocumentation,
            outline_width,
            spec.length,
            spec.width,
        )));

        if spec.length > SILKSCREEN_MIN_LENGTH {
            let half_length = spec.gap / 2.0 - silkscreen_width / 2.0 - style.silkscreen_clearance;
            if half_length <= 0.0 {
                return Err(SpecError::SilkscreenClearance {
                    part: spec.size_imperial.clone(),
                    gap: spec.gap,
                    half_length,
                });
            }
            let y = spec.width / 2.0 + silkscreen_width / 2.0;
            for (edge, y) in [(Edge::Top, y), (Edge::Bottom, -y)] {
                primitives.push(Primitive::Silkscreen {
                    edge,
                    polygon: Polygon::horizontal_line(
                        Layer::TopPlacement,
                        silkscreen_width,
                        half_length,
                        y,
                    ),
                });
            }
        }

        let label_y = spec.width / 2.0 + style.label_offset_for(spec.width);
        primitives.push(Primitive::Label {
            label: LabelKind::Name,
            text: self.label(Layer::TopNames, VAlign::Bottom, label_y, NAME_PLACEHOLDER),
        });
        primitives.push(Primitive::Label {
            label: LabelKind::Value,
            text: self.label(Layer::TopValues, VAlign::Top, -label_y, VALUE_PLACEHOLDER),
        });

        Ok(FootprintLayout { primitives })
    }
}
