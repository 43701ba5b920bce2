//! End-to-end generation tests.
//!
//! These tests run whole generation passes into temporary directories and
//! check the written documents and the persisted UUID cache.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{TimeZone, Utc};
use footprint_gen::catalog::{standard_chip_resistor, ChipFamily};
use footprint_gen::footprint::Style;
use footprint_gen::generate::generate_family;
use footprint_gen::library::store::{PACKAGE_FILE, PACKAGE_MARKER_FILE};
use footprint_gen::library::{DirectoryStore, LibraryError, UuidCache, UuidKey};
use tempfile::TempDir;

fn test_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Reads every `package.lp` below `root`, keyed by directory name.
fn read_packages(root: &Path) -> BTreeMap<String, String> {
    std::fs::read_dir(root)
        .expect("Failed to list output")
        .map(|entry| {
            let entry = entry.expect("Failed to read entry");
            let name = entry.file_name().to_string_lossy().to_string();
            let text = std::fs::read_to_string(entry.path().join(PACKAGE_FILE))
                .expect("Failed to read package");
            (name, text)
        })
        .collect()
}

const ROLES: [&str; 15] = [
    "pkg",
    "pad-1",
    "pad-2",
    "footprint-reflow",
    "polygon-outline-reflow",
    "line-silkscreen-top-reflow",
    "line-silkscreen-bot-reflow",
    "text-name-reflow",
    "text-value-reflow",
    "footprint-handsoldering",
    "polygon-outline-handsoldering",
    "line-silkscreen-top-handsoldering",
    "line-silkscreen-bot-handsoldering",
    "text-name-handsoldering",
    "text-value-handsoldering",
];

fn fixed_uuid(index: usize) -> String {
    format!("00000000-0000-4000-8000-{index:012}")
}

const EXPECTED_0603: &str = r#"(librepcb_package @pkg@
 (name "RESC1608X55 (0603)")
 (description "Chip resistor 1608 (imperial 0603).\n\nLength: 1.6mm\nWidth: 0.8mm\nHeight: max 0.55mm\n\nGenerated with footprint-gen (chip)")
 (keywords "1608,0603,r,resistor,chip")
 (author "Danilo B.")
 (version "0.3")
 (created 2018-12-19T00:08:03Z)
 (deprecated false)
 (category a20f0330-06d3-4bc2-a1fa-f8577deb6770)
 (pad @pad-1@ (name "1"))
 (pad @pad-2@ (name "2"))
@footprints@)
"#;

const EXPECTED_FOOTPRINT_0603: &str = r#" (footprint @footprint-KEY@
  (name "NAME")
  (description "")
  (pad @pad-2@ (side top) (shape rect)
   (position 0.8 0) (rotation 0.0) (size 0.8 0.8) (drill 0.0)
  )
  (pad @pad-1@ (side top) (shape rect)
   (position -0.8 0) (rotation 0.0) (size 0.8 0.8) (drill 0.0)
  )
  (polygon @polygon-outline-KEY@ (layer top_documentation)
   (width 0.15) (fill false) (grab_area true)
   (vertex (position -0.8 0.4) (angle 0.0))
   (vertex (position 0.8 0.4) (angle 0.0))
   (vertex (position 0.8 -0.4) (angle 0.0))
   (vertex (position -0.8 -0.4) (angle 0.0))
   (vertex (position -0.8 0.4) (angle 0.0))
  )
  (polygon @line-silkscreen-top-KEY@ (layer top_placement)
   (width 0.15) (fill false) (grab_area false)
   (vertex (position -0.175 0.475) (angle 0.0))
   (vertex (position 0.175 0.475) (angle 0.0))
  )
  (polygon @line-silkscreen-bot-KEY@ (layer top_placement)
   (width 0.15) (fill false) (grab_area false)
   (vertex (position -0.175 -0.475) (angle 0.0))
   (vertex (position 0.175 -0.475) (angle 0.0))
  )
  (stroke_text @text-name-KEY@ (layer top_names)
   (height 1.0) (stroke_width 0.2) (letter_spacing auto) (line_spacing auto)
   (align center bottom) (position 0.0 1.2) (rotation 0.0)
   (auto_rotate true) (mirror false) (value "{{NAME}}")
  )
  (stroke_text @text-value-KEY@ (layer top_values)
   (height 1.0) (stroke_width 0.2) (letter_spacing auto) (line_spacing auto)
   (align center top) (position 0.0 -1.2) (rotation 0.0)
   (auto_rotate true) (mirror false) (value "{{VALUE}}")
  )
 )
"#;

#[test]
fn renders_0603_exactly() {
    let temp_dir = test_temp_dir();
    let full_name = "RESC1608X55 (0603)";

    // Seed the cache so every UUID is known in advance
    let csv: String = ROLES
        .iter()
        .enumerate()
        .map(|(i, role)| {
            format!(
                "{},{}\n",
                UuidKey::new("pkg", full_name, role),
                fixed_uuid(i + 1)
            )
        })
        .collect();
    let mut cache = UuidCache::read_from(csv.as_bytes()).expect("Failed to read cache");

    let family = ChipFamily {
        parts: vec![standard_chip_resistor("0603").expect("0603 missing")],
        ..ChipFamily::default()
    };
    let mut store = DirectoryStore::create(temp_dir.path()).expect("Failed to create store");
    let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    let generated = generate_family(&family, &Style::default(), &mut cache, &mut store, now)
        .expect("Generation failed");

    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0].uuid.to_string(), fixed_uuid(1));
    assert_eq!(cache.len(), ROLES.len(), "no UUID should have been issued");

    let footprints: String = [("reflow", "reflow"), ("handsoldering", "hand soldering")]
        .iter()
        .map(|(key, name)| {
            EXPECTED_FOOTPRINT_0603
                .replace("-KEY@", &format!("-{key}@"))
                .replace("\"NAME\"", &format!("\"{name}\""))
        })
        .collect();
    let mut expected = EXPECTED_0603.replace("@footprints@", &footprints);
    for (i, role) in ROLES.iter().enumerate() {
        expected = expected.replace(&format!("@{role}@"), &fixed_uuid(i + 1));
    }

    let package_dir = temp_dir.path().join(fixed_uuid(1));
    let actual = std::fs::read_to_string(package_dir.join(PACKAGE_FILE)).expect("No package");
    assert_eq!(actual, expected);
    assert_eq!(
        std::fs::read_to_string(package_dir.join(PACKAGE_MARKER_FILE)).expect("No marker"),
        "0.1\n"
    );
}

#[test]
fn regeneration_with_saved_cache_is_stable() {
    let temp_dir = test_temp_dir();
    let cache_path = temp_dir.path().join("uuid_cache_chip.csv");
    let family = ChipFamily::default();
    let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();

    let first_root = temp_dir.path().join("first");
    let mut cache = UuidCache::open(&cache_path).expect("Failed to open cache");
    assert!(cache.is_empty());
    let mut store = DirectoryStore::create(&first_root).expect("Failed to create store");
    generate_family(&family, &Style::default(), &mut cache, &mut store, now)
        .expect("First run failed");
    cache.save(&cache_path).expect("Failed to save cache");
    let entries = cache.len();
    assert_eq!(entries, 17 * ROLES.len(), "every part resolves all roles");

    let second_root = temp_dir.path().join("second");
    let mut cache = UuidCache::open(&cache_path).expect("Failed to reopen cache");
    assert_eq!(cache.len(), entries);
    let mut store = DirectoryStore::create(&second_root).expect("Failed to create store");
    generate_family(&family, &Style::default(), &mut cache, &mut store, now)
        .expect("Second run failed");

    assert_eq!(cache.len(), entries, "no UUID should have been issued");
    let first = read_packages(&first_root);
    let second = read_packages(&second_root);
    assert_eq!(first.len(), 17);
    assert_eq!(first, second);
}

#[test]
fn cache_keeps_stale_entries() {
    let temp_dir = test_temp_dir();
    let cache_path = temp_dir.path().join("cache.csv");
    std::fs::write(
        &cache_path,
        "pkg-renamed~part-pkg,5c1f0f7c-27a5-4f0e-8e8a-8d2b0f9d6b10\n",
    )
    .expect("Failed to seed cache");

    let mut cache = UuidCache::open(&cache_path).expect("Failed to open cache");
    let family = ChipFamily {
        parts: vec![standard_chip_resistor("0402").expect("0402 missing")],
        ..ChipFamily::default()
    };
    let mut store =
        DirectoryStore::create(temp_dir.path().join("out")).expect("Failed to create store");
    generate_family(
        &family,
        &Style::default(),
        &mut cache,
        &mut store,
        Utc::now(),
    )
    .expect("Generation failed");
    cache.save(&cache_path).expect("Failed to save cache");

    let saved = std::fs::read_to_string(&cache_path).expect("Failed to read cache");
    assert!(saved.contains("pkg-renamed~part-pkg,5c1f0f7c-27a5-4f0e-8e8a-8d2b0f9d6b10\n"));
    assert!(saved.contains("pkg-resc1005x35~(0402)-pkg,"));
}

#[test]
fn corrupt_cache_is_rejected() {
    let temp_dir = test_temp_dir();
    let cache_path = temp_dir.path().join("cache.csv");
    std::fs::write(&cache_path, "pkg-a-pkg,not-a-uuid\n").expect("Failed to seed cache");

    let result = UuidCache::open(&cache_path);
    assert!(matches!(result, Err(LibraryError::CacheCorrupt { .. })));
}

#[test]
fn packages_live_in_uuid_directories() {
    let temp_dir = test_temp_dir();
    let mut cache = UuidCache::new();
    let mut store = DirectoryStore::create(temp_dir.path()).expect("Failed to create store");
    let generated = generate_family(
        &ChipFamily::default(),
        &Style::default(),
        &mut cache,
        &mut store,
        Utc::now(),
    )
    .expect("Generation failed");

    for package in &generated {
        let dir = store.package_dir(package.uuid);
        let text = std::fs::read_to_string(dir.join(PACKAGE_FILE)).expect("No package");
        assert!(text.starts_with(&format!("(librepcb_package {}\n", package.uuid)));
        assert!(text.contains(&format!(" (name \"{}\")\n", package.name)));
        assert!(text.ends_with(")\n") && !text.ends_with("\n\n"));
    }
}

#[test]
fn example_config_generates() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/example-config.json");
    let config = footprint_gen::config::load_config(Some(&path)).expect("Failed to load config");
    assert_eq!(config.chip.parts.len(), 2);

    let temp_dir = test_temp_dir();
    let mut cache = UuidCache::new();
    let mut store = DirectoryStore::create(temp_dir.path()).expect("Failed to create store");
    let generated = generate_family(
        &config.chip,
        &config.style,
        &mut cache,
        &mut store,
        Utc::now(),
    )
    .expect("Generation failed");

    let names: Vec<&str> = generated.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["CAPC1608X80 (0603)", "CAPC2012X125 (0805)"]);
}
