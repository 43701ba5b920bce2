//! Text encoder for package documents.
//!
//! # Document Format
//!
//! ```text
//! (librepcb_package <uuid>
//!  (name "...") (description "...") ...       // one node per line
//!  (pad <uuid> (name "1"))
//!  (footprint <uuid>
//!   (name "reflow")
//!   (pad <uuid> (side top) (shape rect)
//!    (position x y) (rotation 0.0) (size w h) (drill 0.0)
//!   )
//!   (polygon <uuid> (layer ...) ...)
//!   (stroke_text <uuid> (layer ...) ...)
//!  )
//! )
//! ```
//!
//! Each nesting level indents by one space. Numbers go through
//! [`format_float`]. The document ends with exactly one newline.

use std::fmt::Write;

use crate::footprint::format::format_float;
use crate::footprint::packages::{Pad, Polygon, StrokeText};

use super::{Element, Footprint, Package};

/// Renders a package document.
#[must_use]
pub fn render_package(package: &Package) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "(librepcb_package {}", package.uuid);
    let _ = writeln!(output, " (name \"{}\")", package.name);
    let _ = writeln!(output, " (description \"{}\")", package.description);
    let _ = writeln!(output, " (keywords \"{}\")", package.keywords);
    let _ = writeln!(output, " (author \"{}\")", package.author);
    let _ = writeln!(output, " (version \"{}\")", package.version);
    let _ = writeln!(output, " (created {})", package.created);
    let _ = writeln!(output, " (deprecated {})", package.deprecated);
    let _ = writeln!(output, " (category {})", package.category);

    for pad in &package.pads {
        let _ = writeln!(output, " (pad {} (name \"{}\"))", pad.uuid, pad.name);
    }

    for footprint in &package.footprints {
        write_footprint(&mut output, footprint);
    }

    output.push_str(")\n");
    output
}

fn write_footprint(output: &mut String, footprint: &Footprint) {
    let _ = writeln!(output, " (footprint {}", footprint.uuid);
    let _ = writeln!(output, "  (name \"{}\")", footprint.name);
    let _ = writeln!(output, "  (description \"{}\")", footprint.description);

    for pad in &footprint.pads {
        write_pad(output, pad);
    }
    for polygon in &footprint.polygons {
        write_polygon(output, polygon);
    }
    for text in &footprint.texts {
        write_stroke_text(output, text);
    }

    output.push_str(" )\n");
}

fn write_pad(output: &mut String, pad: &Element<Pad>) {
    let geometry = &pad.geometry;
    let _ = writeln!(
        output,
        "  (pad {} (side top) (shape {})",
        pad.uuid,
        geometry.shape.as_str()
    );
    let _ = writeln!(
        output,
        "   (position {} {}) (rotation 0.0) (size {} {}) (drill 0.0)",
        format_float(geometry.position.x),
        format_pad_y(geometry.position.y),
        format_float(geometry.width),
        format_float(geometry.height)
    );
    output.push_str("  )\n");
}

/// Pads on the horizontal axis carry a bare `0` as y coordinate.
fn format_pad_y(value: f64) -> String {
    let formatted = format_float(value);
    if formatted == "0.0" {
        "0".to_string()
    } else {
        formatted
    }
}

fn write_polygon(output: &mut String, polygon: &Element<Polygon>) {
    let geometry = &polygon.geometry;
    let _ = writeln!(
        output,
        "  (polygon {} (layer {})",
        polygon.uuid,
        geometry.layer.as_str()
    );
    let _ = writeln!(
        output,
        "   (width {}) (fill {}) (grab_area {})",
        format_float(geometry.line_width),
        geometry.fill,
        geometry.grab_area
    );
    for vertex in &geometry.vertices {
        let _ = writeln!(
            output,
            "   (vertex (position {} {}) (angle {}))",
            format_float(vertex.position.x),
            format_float(vertex.position.y),
            format_float(vertex.angle)
        );
    }
    output.push_str("  )\n");
}

fn write_stroke_text(output: &mut String, text: &Element<StrokeText>) {
    let geometry = &text.geometry;
    let _ = writeln!(
        output,
        "  (stroke_text {} (layer {})",
        text.uuid,
        geometry.layer.as_str()
    );
    let _ = writeln!(
        output,
        "   (height {}) (stroke_width {}) (letter_spacing auto) (line_spacing auto)",
        format_float(geometry.height),
        format_float(geometry.stroke_width)
    );
    let _ = writeln!(
        output,
        "   (align {} {}) (position {} {}) (rotation {})",
        geometry.h_align.as_str(),
        geometry.v_align.as_str(),
        format_float(geometry.position.x),
        format_float(geometry.position.y),
        format_float(geometry.rotation)
    );
    let _ = writeln!(
        output,
        "   (auto_rotate {}) (mirror {}) (value \"{}\")",
        geometry.auto_rotate, geometry.mirror, geometry.value
    );
    output.push_str("  )\n");
}
