//! Footprint family layouts.
//!
//! Each package family has its own module turning physical dimensions
//! into drawable primitives. All coordinates are in millimetres with the
//! origin at the body centre.

pub mod chip;

/// A 2D point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Board layer a primitive is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Body outline, not manufactured.
    TopDocumentation,
    /// Silkscreen.
    TopPlacement,
    /// Component name text.
    TopNames,
    /// Component value text.
    TopValues,
}

impl Layer {
    /// Returns the layer name used in package documents.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TopDocumentation => "top_documentation",
            Self::TopPlacement => "top_placement",
            Self::TopNames => "top_names",
            Self::TopValues => "top_values",
        }
    }
}

/// Pad shape type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadShape {
    /// Rectangular pad.
    Rect,
}

impl PadShape {
    /// Returns the shape name used in package documents.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rect => "rect",
        }
    }
}

/// A surface-mount pad on the top side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pad {
    /// Pad number (1-based).
    pub number: u32,
    /// Pad centre.
    pub position: Point,
    /// Pad size in X direction (mm).
    pub width: f64,
    /// Pad size in Y direction (mm).
    pub height: f64,
    /// Pad shape.
    pub shape: PadShape,
}

impl Pad {
    /// Creates a new rectangular pad.
    #[must_use]
    pub const fn rect(number: u32, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            number,
            position: Point::new(x, y),
            width,
            height,
            shape: PadShape::Rect,
        }
    }
}

/// A polygon vertex. `angle` is the arc angle of the edge leaving this
/// vertex; zero means a straight edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Vertex position.
    pub position: Point,
    /// Arc angle in degrees.
    pub angle: f64,
}

impl Vertex {
    /// Creates a vertex with a straight outgoing edge.
    #[must_use]
    pub const fn straight(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            angle: 0.0,
        }
    }
}

/// An open or closed polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Layer the polygon is drawn on.
    pub layer: Layer,
    /// Stroke width (mm).
    pub line_width: f64,
    /// Whether the area is filled.
    pub fill: bool,
    /// Whether the area can be used to grab the footprint.
    pub grab_area: bool,
    /// Vertices in drawing order.
    pub vertices: Vec<Vertex>,
}

impl Polygon {
    /// Creates a closed rectangle centred at the origin.
    ///
    /// Emits five vertices, starting and ending at the north-west corner.
    #[must_use]
    pub fn centred_rect(layer: Layer, line_width: f64, length: f64, width: f64) -> Self {
        let half_x = length / 2.0;
        let half_y = width / 2.0;
        Self {
            layer,
            line_width,
            fill: false,
            grab_area: true,
            vertices: vec![
                Vertex::straight(-half_x, half_y),
                Vertex::straight(half_x, half_y),
                Vertex::straight(half_x, -half_y),
                Vertex::straight(-half_x, -half_y),
                Vertex::straight(-half_x, half_y),
            ],
        }
    }

    /// Creates a single horizontal line from `-half_length` to `half_length` at `y`.
    #[must_use]
    pub fn horizontal_line(layer: Layer, line_width: f64, half_length: f64, y: f64) -> Self {
        Self {
            layer,
            line_width,
            fill: false,
            grab_area: false,
            vertices: vec![
                Vertex::straight(-half_length, y),
                Vertex::straight(half_length, y),
            ],
        }
    }

    /// Returns `true` if the first and last vertex coincide.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) => self.vertices.len() > 2 && first == last,
            _ => false,
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    /// Centred on the anchor.
    Center,
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    /// Anchor at the bottom of the text.
    Bottom,
    /// Anchor at the top of the text.
    Top,
}

impl HAlign {
    /// Returns the alignment keyword used in package documents.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "center",
        }
    }
}

impl VAlign {
    /// Returns the alignment keyword used in package documents.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Top => "top",
        }
    }
}

/// Stroke text anchored on the footprint.
///
/// `value` is usually a placeholder such as `{{NAME}}` that the CAD tool
/// substitutes when the footprint is placed.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeText {
    /// Layer the text is drawn on.
    pub layer: Layer,
    /// Glyph height (mm).
    pub height: f64,
    /// Glyph stroke width (mm).
    pub stroke_width: f64,
    /// Horizontal alignment.
    pub h_align: HAlign,
    /// Vertical alignment.
    pub v_align: VAlign,
    /// Anchor position.
    pub position: Point,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Keep the text upright when the footprint is rotated.
    pub auto_rotate: bool,
    /// Mirror the text.
    pub mirror: bool,
    /// Text or placeholder.
    pub value: String,
}

/// Which silkscreen edge a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Line above the body.
    Top,
    /// Line below the body.
    Bottom,
}

/// Which label a stroke text is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Component designator, drawn above the body.
    Name,
    /// Component value, drawn below the body.
    Value,
}

/// A drawable primitive together with its role in the footprint.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// A copper pad.
    Pad(Pad),
    /// Body outline on the documentation layer.
    Outline(Polygon),
    /// A silkscreen line.
    Silkscreen {
        /// Edge the line is drawn along.
        edge: Edge,
        /// Line geometry.
        polygon: Polygon,
    },
    /// A name or value label.
    Label {
        /// Label role.
        label: LabelKind,
        /// Text geometry.
        text: StrokeText,
    },
}

/// All primitives of one footprint variant, in drawing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FootprintLayout {
    /// Primitives in drawing order.
    pub primitives: Vec<Primitive>,
}

impl FootprintLayout {
    /// Returns the pads in drawing order.
    pub fn pads(&self) -> impl Iterator<Item = &Pad> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Pad(pad) => Some(pad),
            _ => None,
        })
    }

    /// Returns the body outline, if any.
    #[must_use]
    pub fn outline(&self) -> Option<&Polygon> {
        self.primitives.iter().find_map(|p| match p {
            Primitive::Outline(polygon) => Some(polygon),
            _ => None,
        })
    }

    /// Returns the silkscreen lines in drawing order.
    pub fn silkscreen(&self) -> impl Iterator<Item = (Edge, &Polygon)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Silkscreen { edge, polygon } => Some((*edge, polygon)),
            _ => None,
        })
    }

    /// Returns the labels in drawing order.
    pub fn labels(&self) -> impl Iterator<Item = (LabelKind, &StrokeText)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Label { label, text } => Some((*label, text)),
            _ => None,
        })
    }
}

/// Per-variant adjustment applied on top of the nominal land pattern.
///
/// Both shipped variants use zero deltas, so their geometry is identical.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VariantAdjust {
    /// Added to the pad length (X), extending the pad outwards (mm).
    pub pad_length_delta: f64,
    /// Added to the pad width (Y) (mm).
    pub pad_width_delta: f64,
}

/// A named footprint variant of a package.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintVariant {
    /// Key used in identifier roles, e.g. `reflow`.
    pub key: &'static str,
    /// Display name of the footprint.
    pub name: &'static str,
    /// Geometry adjustment for this variant.
    pub adjust: VariantAdjust,
}

impl FootprintVariant {
    /// Footprint for reflow soldering.
    pub const REFLOW: Self = Self {
        key: "reflow",
        name: "reflow",
        adjust: VariantAdjust {
            pad_length_delta: 0.0,
            pad_width_delta: 0.0,
        },
    };

    /// Footprint for hand soldering.
    pub const HAND_SOLDERING: Self = Self {
        key: "handsoldering",
        name: "hand soldering",
        adjust: VariantAdjust {
            pad_length_delta: 0.0,
            pad_width_delta: 0.0,
        },
    };

    /// The variants every package is generated with, in output order.
    pub const ALL: [Self; 2] = [Self::REFLOW, Self::HAND_SOLDERING];
}

/// Trait for footprint family layouts.
pub trait FootprintCalculator {
    /// Part dimensions this family is parameterised by.
    type Spec;
    /// Error for dimensions that cannot be laid out.
    type Error;

    /// Lays out one footprint variant of a part.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions leave no room for a primitive.
    fn layout(
        &self,
        spec: &Self::Spec,
        variant: &FootprintVariant,
    ) -> Result<FootprintLayout, Self::Error>;
}
