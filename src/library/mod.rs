//! Package documents.
//!
//! A [`Package`] is the complete, immutable description of one generated
//! part: metadata, pad list and one [`Footprint`] per variant, with a
//! UUID on every element. [`PackageBuilder`] assembles it from a part
//! specification, the footprint layout and the [`UuidCache`];
//! [`writer::render_package`] turns it into text and a [`DocumentStore`]
//! persists it.
//!
//! # Identifier Roles
//!
//! Every UUID is resolved with category `pkg`, the substituted package
//! name and one of these roles (`{key}` is the variant key):
//!
//! | Role                          | Element                     |
//! |-------------------------------|-----------------------------|
//! | `pkg`                         | the package                 |
//! | `pad-1`, `pad-2`              | package pads                |
//! | `footprint-{key}`             | footprint variant           |
//! | `polygon-outline-{key}`       | documentation outline       |
//! | `line-silkscreen-top-{key}`   | upper silkscreen line       |
//! | `line-silkscreen-bot-{key}`   | lower silkscreen line       |
//! | `text-name-{key}`             | name label                  |
//! | `text-value-{key}`            | value label                 |

pub mod error;
pub mod store;
pub mod uuid_cache;
pub mod writer;

pub use error::{LibraryError, LibraryResult};
pub use store::{DirectoryStore, DocumentStore};
pub use uuid_cache::{UuidCache, UuidKey};

use uuid::Uuid;

use crate::catalog::ChipFamily;
use crate::footprint::format::{format_ipc_dimension, format_plain};
use crate::footprint::naming::{apply_template, TemplateParams};
use crate::footprint::packages::{Edge, LabelKind, Pad, Polygon, Primitive, StrokeText};
use crate::footprint::{ChipCalculator, ChipSpec, FootprintCalculator, FootprintVariant};

/// UUID category for package elements.
pub const PACKAGE_CATEGORY: &str = "pkg";

/// Package schema version written into every document.
pub const PACKAGE_VERSION: &str = "0.3";

/// A package pad: a named connection point shared by all footprints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePad {
    /// Pad UUID, reused by the footprint pads.
    pub uuid: Uuid,
    /// Pad name, e.g. `"1"`.
    pub name: String,
}

/// A geometry primitive with its UUID.
#[derive(Debug, Clone, PartialEq)]
pub struct Element<T> {
    /// Element UUID.
    pub uuid: Uuid,
    /// Element geometry.
    pub geometry: T,
}

/// One footprint variant of a package.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    /// Footprint UUID.
    pub uuid: Uuid,
    /// Display name, e.g. `"hand soldering"`.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Pads, each carrying the UUID of its package pad.
    pub pads: Vec<Element<Pad>>,
    /// Outline and silkscreen polygons in drawing order.
    pub polygons: Vec<Element<Polygon>>,
    /// Name and value labels.
    pub texts: Vec<Element<StrokeText>>,
}

/// A fully assembled package document.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    /// Package UUID; also names the output directory.
    pub uuid: Uuid,
    /// Package name, e.g. `"RESC1608X55 (0603)"`.
    pub name: String,
    /// Description text, with `\n` escapes as written in the document.
    pub description: String,
    /// Comma-separated keywords.
    pub keywords: String,
    /// Author.
    pub author: String,
    /// Package version.
    pub version: String,
    /// Creation timestamp, RFC 3339.
    pub created: String,
    /// Whether the package is deprecated.
    pub deprecated: bool,
    /// Package category UUID.
    pub category: Uuid,
    /// Package pads.
    pub pads: Vec<PackagePad>,
    /// Footprint variants.
    pub footprints: Vec<Footprint>,
}

/// Assembles [`Package`]s for the parts of one chip family.
#[derive(Debug)]
pub struct PackageBuilder<'a, C = ChipCalculator> {
    family: &'a ChipFamily,
    calculator: &'a C,
    created: &'a str,
}

impl<'a, C> PackageBuilder<'a, C>
where
    C: FootprintCalculator<Spec = ChipSpec>,
    LibraryError: From<C::Error>,
{
    /// Creates a builder.
    ///
    /// `created` is used for every package that this builder produces.
    #[must_use]
    pub const fn new(family: &'a ChipFamily, calculator: &'a C, created: &'a str) -> Self {
        Self {
            family,
            calculator,
            created,
        }
    }

    /// Returns the substituted package name of a part.
    ///
    /// # Errors
    ///
    /// Returns an error if the family's name template is invalid.
    pub fn package_name(&self, spec: &ChipSpec) -> LibraryResult<String> {
        let mut params = size_params(spec);
        params.insert("height", format_ipc_dimension(spec.height()));
        Ok(apply_template(&self.family.name, &params)?)
    }

    /// Returns the substituted package description of a part, without
    /// the generator note.
    ///
    /// # Errors
    ///
    /// Returns an error if the family's description template is invalid.
    pub fn package_description(&self, spec: &ChipSpec) -> LibraryResult<String> {
        let mut params = size_params(spec);
        params.insert("length", format_plain(spec.length()));
        params.insert("width", format_plain(spec.width()));
        params.insert("height", format_plain(spec.height()));
        Ok(apply_template(&self.family.description, &params)?)
    }

    /// Builds the package document of one part.
    ///
    /// Resolves the UUID of every element role through `cache`, inserting
    /// new ones for roles seen for the first time. Silkscreen roles are
    /// resolved even for parts drawn without silkscreen, so the cache
    /// holds the same rows for every part.
    ///
    /// # Errors
    ///
    /// Returns an error if a template is invalid or the part cannot be
    /// laid out.
    pub fn build(&self, spec: &ChipSpec, cache: &mut UuidCache) -> LibraryResult<Package> {
        let name = self.package_name(spec)?;
        let description = format!(
            "{}\\n\\nGenerated with {}",
            self.package_description(spec)?,
            self.family.generator
        );
        let mut uuid = |role: &str| cache.resolve(&UuidKey::new(PACKAGE_CATEGORY, &name, role));

        let package_uuid = uuid("pkg");
        let pads = vec![
            PackagePad {
                uuid: uuid("pad-1"),
                name: "1".to_string(),
            },
            PackagePad {
                uuid: uuid("pad-2"),
                name: "2".to_string(),
            },
        ];

        let mut footprints = Vec::with_capacity(FootprintVariant::ALL.len());
        for variant in &FootprintVariant::ALL {
            let key = variant.key;
            let footprint_uuid = uuid(&format!("footprint-{key}"));
            let text_name = uuid(&format!("text-name-{key}"));
            let text_value = uuid(&format!("text-value-{key}"));
            let silkscreen_top = uuid(&format!("line-silkscreen-top-{key}"));
            let silkscreen_bot = uuid(&format!("line-silkscreen-bot-{key}"));
            let outline = uuid(&format!("polygon-outline-{key}"));

            let mut footprint = Footprint {
                uuid: footprint_uuid,
                name: variant.name.to_string(),
                description: String::new(),
                pads: Vec::new(),
                polygons: Vec::new(),
                texts: Vec::new(),
            };

            let layout = self.calculator.layout(spec, variant)?;
            for primitive in layout.primitives {
                match primitive {
                    Primitive::Pad(pad) => {
                        // Footprint pads share the UUID of their package pad
                        let number = pad.number.to_string();
                        let pad_uuid = pads
                            .iter()
                            .find(|package_pad| package_pad.name == number)
                            .map_or_else(|| uuid(&format!("pad-{number}")), |p| p.uuid);
                        footprint.pads.push(Element {
                            uuid: pad_uuid,
                            geometry: pad,
                        });
                    }
                    Primitive::Outline(polygon) => footprint.polygons.push(Element {
                        uuid: outline,
                        geometry: polygon,
                    }),
                    Primitive::Silkscreen { edge, polygon } => {
                        let line_uuid = match edge {
                            Edge::Top => silkscreen_top,
                            Edge::Bottom => silkscreen_bot,
                        };
                        footprint.polygons.push(Element {
                            uuid: line_uuid,
                            geometry: polygon,
                        });
                    }
                    Primitive::Label { label, text } => {
                        let text_uuid = match label {
                            LabelKind::Name => text_name,
                            LabelKind::Value => text_value,
                        };
                        footprint.texts.push(Element {
                            uuid: text_uuid,
                            geometry: text,
                        });
                    }
                }
            }

            footprints.push(footprint);
        }

        Ok(Package {
            uuid: package_uuid,
            keywords: format!(
                "{},{},{}",
                spec.size_metric(),
                spec.size_imperial(),
                self.family.keywords
            ),
            name,
            description,
            author: self.family.author.clone(),
            version: PACKAGE_VERSION.to_string(),
            created: self.created.to_string(),
            deprecated: false,
            category: self.family.package_category,
            pads,
            footprints,
        })
    }
}

fn size_params(spec: &ChipSpec) -> TemplateParams {
    let mut params = TemplateParams::new();
    params.insert("size_metric", spec.size_metric());
    params.insert("size_imperial", spec.size_imperial().to_string());
    params
}
