//! Persistent UUID cache.
//!
//! Every element of a generated package (the package itself, pads,
//! footprints, polygons, texts) needs a UUID that stays the same each
//! time the library is regenerated. The cache maps a semantic key such as
//! `pkg-resc1608x55~(0603)-pad-1` to the UUID first issued for it.
//!
//! # Store Format
//!
//! Headerless two-column CSV, one `key,uuid` row per entry, sorted by key:
//!
//! ```text
//! pkg-resc1608x55~(0603)-pad-1,0d2e6b30-4d5b-4ab4-9c5a-0b8f3f3c8e21
//! pkg-resc1608x55~(0603)-pad-2,5c1f0f7c-27a5-4f0e-8e8a-8d2b0f9d6b10
//! ```
//!
//! Entries are never removed, so renamed parts leave stale rows behind.
//! Two processes must not use the same cache file at the same time.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::Path;

use uuid::Uuid;

use super::error::{LibraryError, LibraryResult};
use super::store::write_atomic;

/// Normalised cache key: `{category}-{full_name}-{role}`, lowercased,
/// spaces replaced by `~`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UuidKey(String);

impl UuidKey {
    /// Builds a key for one element of a component.
    ///
    /// # Arguments
    ///
    /// * `category` - Element category, e.g. `"pkg"` or `"cmp"`
    /// * `full_name` - Full component name, e.g. `"RESC3216X65 (1206)"`
    /// * `role` - Element role, e.g. `"pad-1"` or `"footprint-reflow"`
    ///
    /// # Examples
    ///
    /// ```
    /// use footprint_gen::library::UuidKey;
    ///
    /// let key = UuidKey::new("pkg", "RESC1608X55 (0603)", "pad-1");
    /// assert_eq!(key.as_str(), "pkg-resc1608x55~(0603)-pad-1");
    /// ```
    #[must_use]
    pub fn new(category: &str, full_name: &str, role: &str) -> Self {
        Self(
            format!("{category}-{full_name}-{role}")
                .to_lowercase()
                .replace(' ', "~"),
        )
    }

    /// Returns the normalised key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UuidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// In-memory view of the UUID cache.
///
/// Loaded once before generation, mutated by [`UuidCache::resolve`] and
/// saved once afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UuidCache {
    entries: BTreeMap<String, Uuid>,
}

impl UuidCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the cache from a CSV file.
    ///
    /// A missing file yields an empty cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or if any
    /// row is malformed. A corrupt cache must abort generation, since
    /// continuing would hand out fresh UUIDs for existing elements.
    pub fn open(path: impl AsRef<Path>) -> LibraryResult<Self> {
        let path = path.as_ref();
        let file = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No UUID cache found, starting empty");
                return Ok(Self::new());
            }
            Err(e) => return Err(LibraryError::file_read(path, e)),
        };

        let cache = Self::read_from(file)?;

        tracing::info!(
            path = %path.display(),
            count = cache.len(),
            "Loaded UUID cache"
        );

        Ok(cache)
    }

    /// Reads cache entries from CSV data.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::CacheCorrupt`] if a row does not have
    /// exactly two fields, the second field is not a lowercase hyphenated
    /// UUID, or a key is repeated with a different UUID.
    pub fn read_from(reader: impl io::Read) -> LibraryResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut entries = BTreeMap::new();

        for result in csv_reader.records() {
            let record = result.map_err(|e| {
                let line = e.position().map_or(0, csv::Position::line);
                LibraryError::cache_corrupt(line, e.to_string())
            })?;
            let line = record.position().map_or(0, csv::Position::line);

            if record.len() != 2 {
                return Err(LibraryError::cache_corrupt(
                    line,
                    format!("expected 2 fields, found {}", record.len()),
                ));
            }

            let key = &record[0];
            let value = &record[1];
            let uuid = Uuid::try_parse(value).map_err(|e| {
                LibraryError::cache_corrupt(line, format!("invalid UUID '{value}': {e}"))
            })?;
            // Only the lowercase hyphenated form is written back unchanged
            if uuid.hyphenated().to_string() != value {
                return Err(LibraryError::cache_corrupt(
                    line,
                    format!("UUID '{value}' is not in lowercase hyphenated form"),
                ));
            }

            if let Some(previous) = entries.insert(key.to_string(), uuid) {
                if previous != uuid {
                    return Err(LibraryError::cache_corrupt(
                        line,
                        format!("key '{key}' maps to both {previous} and {uuid}"),
                    ));
                }
            }
        }

        Ok(Self { entries })
    }

    /// Returns the UUID for `key`, issuing a fresh random one on first use.
    pub fn resolve(&mut self, key: &UuidKey) -> Uuid {
        if let Some(uuid) = self.entries.get(key.as_str()) {
            return *uuid;
        }

        let uuid = Uuid::new_v4();
        tracing::trace!(key = %key, uuid = %uuid, "Issued new UUID");
        self.entries.insert(key.as_str().to_string(), uuid);
        uuid
    }

    /// Returns the UUID recorded for `key`, without issuing one.
    #[must_use]
    pub fn get(&self, key: &UuidKey) -> Option<Uuid> {
        self.entries.get(key.as_str()).copied()
    }

    /// Returns the number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes all entries as CSV, sorted by key.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails.
    pub fn write_to(&self, writer: impl io::Write) -> io::Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        for (key, uuid) in &self.entries {
            let uuid = uuid.to_string();
            csv_writer.write_record([key.as_str(), uuid.as_str()])?;
        }

        csv_writer.flush()
    }

    /// Saves the cache, replacing the file at `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> LibraryResult<()> {
        let path = path.as_ref();
        write_atomic(path, |file| self.write_to(file))?;

        tracing::info!(
            path = %path.display(),
            count = self.len(),
            "Saved UUID cache"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_normalised() {
        let key = UuidKey::new("pkg", "RESC1608X55 (0603)", "text-name-reflow");
        assert_eq!(key.as_str(), "pkg-resc1608x55~(0603)-text-name-reflow");
        assert_eq!(key.to_string(), key.as_str());
    }

    #[test]
    fn keys_differing_only_in_case_coincide() {
        assert_eq!(
            UuidKey::new("pkg", "RESC1608X55", "pad-1"),
            UuidKey::new("PKG", "resc1608x55", "PAD-1")
        );
    }

    #[test]
    fn resolve_is_stable() {
        let mut cache = UuidCache::new();
        let key = UuidKey::new("pkg", "RESC1608X55 (0603)", "pad-1");
        let first = cache.resolve(&key);
        let second = cache.resolve(&key);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key), Some(first));
    }

    #[test]
    fn distinct_keys_get_distinct_uuids() {
        let mut cache = UuidCache::new();
        let a = cache.resolve(&UuidKey::new("pkg", "RESC1608X55 (0603)", "pad-1"));
        let b = cache.resolve(&UuidKey::new("pkg", "RESC1608X55 (0603)", "pad-2"));
        assert_ne!(a, b);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn get_does_not_insert() {
        let cache = UuidCache::new();
        assert_eq!(cache.get(&UuidKey::new("pkg", "X", "pkg")), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn write_then_read_preserves_entries() {
        let mut cache = UuidCache::new();
        let keys = [
            UuidKey::new("pkg", "RESC1608X55 (0603)", "pkg"),
            UuidKey::new("pkg", "Name, with comma", "pad-1"),
            UuidKey::new("pkg", "Quote \"here\"", "pad-2"),
        ];
        let issued: Vec<Uuid> = keys.iter().map(|k| cache.resolve(k)).collect();

        let mut buffer = Vec::new();
        cache.write_to(&mut buffer).unwrap();
        let mut reloaded = UuidCache::read_from(buffer.as_slice()).unwrap();

        assert_eq!(reloaded, cache);
        for (key, uuid) in keys.iter().zip(issued) {
            assert_eq!(reloaded.resolve(key), uuid);
        }
    }

    #[test]
    fn written_rows_are_sorted() {
        let mut cache = UuidCache::new();
        cache.resolve(&UuidKey::new("pkg", "b", "pkg"));
        cache.resolve(&UuidKey::new("pkg", "a", "pkg"));

        let mut buffer = Vec::new();
        cache.write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("pkg-a-pkg,"));
        assert!(lines[1].starts_with("pkg-b-pkg,"));
        assert!(text.ends_with('\n'));
        assert!(!text.contains('\r'));
    }

    #[test]
    fn reads_existing_rows() {
        let data = "pkg-resc1608x55~(0603)-pad-1,8a6c3b0e-3c39-4bfb-8f0e-5b5d3e0b2f6a\n";
        let cache = UuidCache::read_from(data.as_bytes()).unwrap();
        assert_eq!(
            cache
                .get(&UuidKey::new("pkg", "RESC1608X55 (0603)", "pad-1"))
                .map(|u| u.to_string()),
            Some("8a6c3b0e-3c39-4bfb-8f0e-5b5d3e0b2f6a".to_string())
        );
    }

    #[test]
    fn reject_wrong_field_count() {
        let data = "a,8a6c3b0e-3c39-4bfb-8f0e-5b5d3e0b2f6a\nb\n";
        let err = UuidCache::read_from(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LibraryError::CacheCorrupt { line: 2, .. }));
    }

    #[test]
    fn reject_invalid_uuid() {
        let err = UuidCache::read_from("a,not-a-uuid\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LibraryError::CacheCorrupt { line: 1, .. }));
    }

    #[test]
    fn reject_non_canonical_uuid_forms() {
        for value in [
            "8A6C3B0E-3C39-4BFB-8F0E-5B5D3E0B2F6A",
            "8a6c3b0e3c394bfb8f0e5b5d3e0b2f6a",
            "{8a6c3b0e-3c39-4bfb-8f0e-5b5d3e0b2f6a}",
            "urn:uuid:8a6c3b0e-3c39-4bfb-8f0e-5b5d3e0b2f6a",
        ] {
            let data = format!("a,{value}\n");
            let err = UuidCache::read_from(data.as_bytes()).unwrap_err();
            assert!(
                matches!(err, LibraryError::CacheCorrupt { line: 1, .. }),
                "{value}"
            );
        }
    }

    #[test]
    fn stored_rows_round_trip_byte_for_byte() {
        let data = "pkg-a-pad-1,8a6c3b0e-3c39-4bfb-8f0e-5b5d3e0b2f6a\n\
                    pkg-a-pkg,5c1f0f7c-27a5-4f0e-8e8a-8d2b0f9d6b10\n";
        let cache = UuidCache::read_from(data.as_bytes()).unwrap();
        let mut buffer = Vec::new();
        cache.write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), data);
    }

    #[test]
    fn reject_conflicting_duplicate() {
        let data = "a,8a6c3b0e-3c39-4bfb-8f0e-5b5d3e0b2f6a\n\
                    a,5c1f0f7c-27a5-4f0e-8e8a-8d2b0f9d6b10\n";
        assert!(UuidCache::read_from(data.as_bytes()).is_err());
    }

    #[test]
    fn empty_input_is_empty_cache() {
        let cache = UuidCache::read_from(&b""[..]).unwrap();
        assert!(cache.is_empty());
    }
}
