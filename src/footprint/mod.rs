//! Footprint geometry.
//!
//! Turns a handful of physical part dimensions into drawable primitives:
//! pads, a documentation outline, silkscreen lines and text labels. The
//! layout is pure; identifiers and document assembly live in
//! [`crate::library`].
//!
//! # Supported Package Types
//!
//! - [`packages::chip`] - Two-terminal chip resistors, capacitors, inductors
//!
//! # Example
//!
//! ```
//! use footprint_gen::footprint::{
//!     ChipCalculator, ChipSpec, FootprintCalculator, FootprintVariant,
//! };
//!
//! let spec = ChipSpec::new("0603", 1.6, 0.8, 0.55, 0.8, 0.8, 0.8).unwrap();
//! let layout = ChipCalculator::default()
//!     .layout(&spec, &FootprintVariant::REFLOW)
//!     .unwrap();
//!
//! assert_eq!(layout.pads().count(), 2);
//! assert_eq!(layout.silkscreen().count(), 2);
//! ```

pub mod format;
pub mod naming;
pub mod packages;
pub mod style;

pub use packages::chip::{ChipCalculator, ChipSpec};
pub use packages::{
    FootprintCalculator, FootprintLayout, FootprintVariant, Primitive, VariantAdjust,
};
pub use style::{LineTier, StrokeTiers, Style};
