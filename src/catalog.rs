//! Part catalogs.
//!
//! A [`ChipFamily`] lists the parts to generate together with the
//! metadata shared by all of them. The default family is the standard
//! set of chip resistors, 01005 through 2512.

use serde::Deserialize;
use uuid::Uuid;

use crate::footprint::ChipSpec;

/// Default name template for chip resistors.
pub const RESISTOR_NAME: &str = "RESC{size_metric}X{height} ({size_imperial})";

/// Default description template for chip resistors.
pub const RESISTOR_DESCRIPTION: &str = "Chip resistor {size_metric} (imperial {size_imperial}).\\n\\n\
     Length: {length}mm\\nWidth: {width}mm\\nHeight: max {height}mm";

/// Package category of chip resistors.
pub const RESISTOR_CATEGORY: Uuid = uuid::uuid!("a20f0330-06d3-4bc2-a1fa-f8577deb6770");

/// Creation timestamp of the published chip resistor packages.
pub const RESISTOR_CREATED: &str = "2018-12-19T00:08:03Z";

/// Generator note appended to every description.
pub const GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), " (chip)");

/// A family of chip parts generated with shared metadata.
///
/// `name` may use `{size_metric}`, `{size_imperial}` and `{height}` (as
/// an IPC dimension, `0.55` -> `55`). `description` may use
/// `{size_metric}`, `{size_imperial}`, `{length}`, `{width}` and
/// `{height}` (in millimetres).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ChipFamily {
    /// Package name template.
    pub name: String,
    /// Package description template.
    pub description: String,
    /// Author written into every package.
    pub author: String,
    /// Keywords appended after the size codes.
    pub keywords: String,
    /// Package category UUID.
    pub package_category: Uuid,
    /// Fixed creation timestamp (RFC 3339); the current time if unset.
    pub created: Option<String>,
    /// Generator note appended to the description.
    pub generator: String,
    /// Parts to generate, in output order.
    pub parts: Vec<ChipSpec>,
}

impl Default for ChipFamily {
    fn default() -> Self {
        Self {
            name: RESISTOR_NAME.to_string(),
            description: RESISTOR_DESCRIPTION.to_string(),
            author: "Danilo B.".to_string(),
            keywords: "r,resistor,chip".to_string(),
            package_category: RESISTOR_CATEGORY,
            created: Some(RESISTOR_CREATED.to_string()),
            generator: GENERATOR.to_string(),
            parts: chip_resistors(),
        }
    }
}

/// Standard chip resistor sizes.
///
/// Rows are `(imperial, [length, width, height, pad length, pad width, gap])`
/// in millimetres. Several sizes come in more than one height.
const CHIP_RESISTORS: [(&str, [f64; 6]); 17] = [
    ("01005", [0.4, 0.2, 0.15, 0.17, 0.18, 0.2]),
    ("0201", [0.6, 0.3, 0.26, 0.37, 0.29, 0.28]),
    ("0402", [1.0, 0.5, 0.35, 0.6, 0.5, 0.5]),
    ("0603", [1.6, 0.8, 0.55, 0.8, 0.8, 0.8]),
    ("0805", [2.0, 1.25, 0.60, 0.9, 1.2, 1.4]),
    ("0805", [2.0, 1.25, 0.65, 0.9, 1.2, 1.4]),
    ("0805", [2.0, 1.25, 0.70, 0.9, 1.2, 1.4]),
    ("1206", [3.2, 1.6, 0.60, 1.3, 1.5, 1.8]),
    ("1206", [3.2, 1.6, 0.65, 1.3, 1.5, 1.8]),
    ("1206", [3.2, 1.6, 0.70, 1.3, 1.5, 1.8]),
    ("1210", [3.2, 2.55, 0.60, 1.3, 2.4, 1.8]),
    ("1210", [3.2, 2.55, 0.65, 1.3, 2.4, 1.8]),
    ("1210", [3.2, 2.55, 0.70, 1.3, 2.4, 1.8]),
    ("2010", [5.0, 2.5, 0.65, 1.4, 2.4, 3.3]),
    ("2010", [5.0, 2.5, 0.70, 1.4, 2.4, 3.3]),
    ("2512", [6.4, 3.2, 0.65, 1.4, 3.0, 4.6]),
    ("2512", [6.4, 3.2, 0.70, 1.4, 3.0, 4.6]),
];

/// Returns the standard chip resistor parts in output order.
#[must_use]
pub fn chip_resistors() -> Vec<ChipSpec> {
    CHIP_RESISTORS
        .iter()
        .map(|&(imperial, dimensions)| ChipSpec::from_table(imperial, dimensions))
        .collect()
}

/// Looks up the first standard chip resistor with the given imperial size.
#[must_use]
pub fn standard_chip_resistor(size_imperial: &str) -> Option<ChipSpec> {
    chip_resistors()
        .into_iter()
        .find(|spec| spec.size_imperial() == size_imperial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::{ChipCalculator, FootprintCalculator, FootprintVariant};

    #[test]
    fn every_standard_row_is_valid() {
        for (imperial, [length, width, height, pad_length, pad_width, gap]) in CHIP_RESISTORS {
            let result = ChipSpec::new(imperial, length, width, height, pad_length, pad_width, gap);
            assert!(result.is_ok(), "{imperial}: {result:?}");
        }
        assert_eq!(chip_resistors().len(), CHIP_RESISTORS.len());
    }

    #[test]
    fn standard_parts_lay_out() {
        let calculator = ChipCalculator::default();
        for spec in chip_resistors() {
            for variant in &FootprintVariant::ALL {
                assert!(calculator.layout(&spec, variant).is_ok(), "{spec:?}");
            }
        }
    }

    #[test]
    fn standard_sizes_exist() {
        assert!(standard_chip_resistor("01005").is_some());
        assert!(standard_chip_resistor("0603").is_some());
        assert!(standard_chip_resistor("2512").is_some());
        assert!(standard_chip_resistor("INVALID").is_none());
    }

    #[test]
    fn standard_lookup_returns_first_height() {
        let spec = standard_chip_resistor("1206").unwrap();
        assert!((spec.height() - 0.60).abs() < f64::EPSILON);
        assert_eq!(spec.size_metric(), "3216");
    }

    #[test]
    fn default_family() {
        let family = ChipFamily::default();
        assert_eq!(family.parts.len(), 17);
        assert_eq!(family.package_category.to_string(), "a20f0330-06d3-4bc2-a1fa-f8577deb6770");
        assert_eq!(family.generator, "footprint-gen (chip)");
        assert!(family.description.contains(r"\n\nLength: {length}mm"));
    }

    #[test]
    fn family_from_json_keeps_defaults() {
        let json = r#"{
            "name": "CAPC{size_metric}X{height} ({size_imperial})",
            "keywords": "c,capacitor,chip",
            "parts": [
                {
                    "size_imperial": "0402",
                    "length": 1.0, "width": 0.5, "height": 0.5,
                    "pad_length": 0.6, "pad_width": 0.5, "gap": 0.5
                }
            ]
        }"#;
        let family: ChipFamily = serde_json::from_str(json).unwrap();
        assert_eq!(family.parts.len(), 1);
        assert_eq!(family.keywords, "c,capacitor,chip");
        assert_eq!(family.author, "Danilo B.");
    }

    #[test]
    fn family_rejects_invalid_part() {
        let json = r#"{
            "parts": [
                {
                    "size_imperial": "0402",
                    "length": 1.0, "width": 0.5, "height": 0.5,
                    "pad_length": 0.6, "pad_width": 0.5, "gap": 1.5
                }
            ]
        }"#;
        assert!(serde_json::from_str::<ChipFamily>(json).is_err());
    }
}
