//! Generation runs.
//!
//! Ties the pieces together: every part of a [`ChipFamily`] is laid out,
//! assembled into a package with cached UUIDs, rendered and stored. Parts
//! are processed in catalog order and the first error aborts the run.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::catalog::ChipFamily;
use crate::footprint::{ChipCalculator, Style};
use crate::library::writer::render_package;
use crate::library::{DocumentStore, LibraryResult, PackageBuilder, UuidCache};

/// Summary of one generated package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPackage {
    /// Package name.
    pub name: String,
    /// Package UUID.
    pub uuid: Uuid,
}

/// Formats a timestamp the way package documents record it.
#[must_use]
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Generates every part of `family` into `store`.
///
/// Packages without a fixed creation time in the family are stamped with
/// `now`, the same for the whole run. `cache` is updated with every newly
/// issued UUID; saving it is up to the caller.
///
/// # Errors
///
/// Returns the first template, layout or storage error. Packages stored
/// before the error remain in place.
pub fn generate_family(
    family: &ChipFamily,
    style: &Style,
    cache: &mut UuidCache,
    store: &mut impl DocumentStore,
    now: DateTime<Utc>,
) -> LibraryResult<Vec<GeneratedPackage>> {
    let created = family
        .created
        .clone()
        .unwrap_or_else(|| format_timestamp(now));
    let calculator = ChipCalculator::new(style.clone());
    let builder = PackageBuilder::new(family, &calculator, &created);

    let mut generated = Vec::with_capacity(family.parts.len());
    for spec in &family.parts {
        let package = builder.build(spec, cache)?;
        tracing::info!(name = %package.name, uuid = %package.uuid, "Generating package");

        store.store(package.uuid, &render_package(&package))?;
        generated.push(GeneratedPackage {
            name: package.name,
            uuid: package.uuid,
        });
    }

    tracing::info!(count = generated.len(), "Generated packages");

    Ok(generated)
}
