//! End-to-end tests: tag file on disk → docset search index.

use std::fs;
use std::path::{Path, PathBuf};

use doxyindex::error::AppError;
use doxyindex::index::SearchIndex;
use doxyindex::models::{ClassifierOptions, EntryType, ResolvedEntry};
use doxyindex::plist::{self, PlistUpdate};
use doxyindex::services::IndexService;
use doxyindex::tagfile::TagFile;
use tempfile::TempDir;

const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleIdentifier</key>
	<string>geometry</string>
	<key>CFBundleName</key>
	<string>Geometry</string>
	<key>DocSetPlatformFamily</key>
	<string>geometry</string>
</dict>
</plist>
"#;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/geometry.tag")
}

/// Lays out `Geometry.docset/Contents/{Info.plist,Resources/}` and returns
/// the index path inside it.
fn docset(dir: &TempDir) -> PathBuf {
    let contents = dir.path().join("Geometry.docset").join("Contents");
    fs::create_dir_all(contents.join("Resources")).unwrap();
    fs::write(contents.join("Info.plist"), INFO_PLIST).unwrap();
    contents.join("Resources").join("docSet.dsidx")
}

fn entry(name: &str, entry_type: EntryType, path: &str) -> ResolvedEntry {
    ResolvedEntry::new(name, entry_type, path)
}

#[test]
fn test_index_with_scopes_and_signatures() {
    let dir = TempDir::new().unwrap();
    let db = docset(&dir);

    let tagfile = TagFile::read(&fixture()).unwrap();
    let mut index = SearchIndex::open(&db).unwrap();
    let service = IndexService::new(ClassifierOptions::new(true, true));
    let report = service.index(&tagfile, &mut index).unwrap();

    let expected = vec![
        entry("geometry.h", EntryType::File, "geometry_8h.html"),
        entry("GEO_VERSION", EntryType::Macro, "geometry_8h.html#a1b2c3"),
        entry(
            "some_func(int &output, const double input) -> bool",
            EntryType::Function,
            "geometry_8h.html#a3c4d5",
        ),
        entry("geo", EntryType::Namespace, "namespacegeo.html"),
        entry("geo::Scalar", EntryType::Type, "namespacegeo.html#t1"),
        entry("geo::Color", EntryType::Enum, "namespacegeo.html#e1"),
        entry("geo::Red", EntryType::Value, "namespacegeo.html#e1a"),
        entry(
            "geo::area(const Shape &shape) -> double",
            EntryType::Method,
            "namespacegeo.html#f1",
        ),
        entry("geo::Shape", EntryType::Class, "classgeo_1_1Shape.html"),
        entry("geo::Shape::Shape()", EntryType::Method, "classgeo_1_1Shape.html#m1"),
        entry(
            "geo::Shape::area() const =0 -> virtual double",
            EntryType::Method,
            "classgeo_1_1Shape.html#m2",
        ),
        entry("geo::Shape::cache_", EntryType::Variable, "classgeo_1_1Shape.html#v1"),
        entry("Getting Started", EntryType::Guide, "getting_started.html"),
        entry("Shape primitives", EntryType::Module, "group__shapes.html"),
    ];

    assert_eq!(index.entries().unwrap(), expected);
    assert_eq!(report.write.inserted, expected.len());
    assert_eq!(report.walk.skipped, 1);
    assert_eq!(report.nodes, 16);
}

#[test]
fn test_index_with_plain_names() {
    let tagfile = TagFile::read(&fixture()).unwrap();
    let service = IndexService::new(ClassifierOptions::default());
    let mut index = SearchIndex::in_memory().unwrap();

    service.index(&tagfile, &mut index).unwrap();

    let names: Vec<_> = index
        .entries()
        .unwrap()
        .into_iter()
        .map(|e| (e.entry_type, e.name))
        .collect();
    assert!(names.contains(&(EntryType::Function, "some_func".to_string())));
    assert!(names.contains(&(EntryType::Method, "area".to_string())));
    assert!(names.contains(&(EntryType::Value, "Red".to_string())));
    // Top-level compounds keep the qualified name Doxygen gave them.
    assert!(names.contains(&(EntryType::Class, "geo::Shape".to_string())));
    // Both `area` overloads live at different anchors and are kept.
    let areas = names.iter().filter(|(_, n)| n == "area").count();
    assert_eq!(areas, 2);
}

#[test]
fn test_reindex_into_existing_database() {
    let dir = TempDir::new().unwrap();
    let db = docset(&dir);
    let tagfile = TagFile::read(&fixture()).unwrap();
    let service = IndexService::new(ClassifierOptions::default());

    let first = {
        let mut index = SearchIndex::open(&db).unwrap();
        service.index(&tagfile, &mut index).unwrap()
    };

    let mut index = SearchIndex::open(&db).unwrap();
    let second = service.index(&tagfile, &mut index).unwrap();

    assert_eq!(second.write.inserted, 0);
    assert_eq!(second.write.ignored, first.write.written);
    assert_eq!(index.count().unwrap(), first.write.inserted);

    index.reset().unwrap();
    assert_eq!(index.count().unwrap(), 0);
    let third = service.index(&tagfile, &mut index).unwrap();
    assert_eq!(third.write.inserted, first.write.inserted);

    let rebuilt = service.rebuild(&tagfile, &mut index).unwrap();
    assert_eq!(rebuilt.write.inserted, first.write.inserted);
    assert_eq!(index.count().unwrap(), first.write.inserted);
}

#[test]
fn test_counts_by_type() {
    let tagfile = TagFile::read(&fixture()).unwrap();
    let service = IndexService::new(ClassifierOptions::new(false, true));
    let mut index = SearchIndex::in_memory().unwrap();

    let report = service.index(&tagfile, &mut index).unwrap();
    let stored = index.count_by_type().unwrap();

    assert_eq!(report.by_type.get(&EntryType::Method), Some(&3));
    assert_eq!(stored.get("Method"), Some(&3));
    assert_eq!(stored.get("Macro"), Some(&1));
    assert_eq!(stored.values().sum::<usize>(), 14);
}

#[test]
fn test_mark_docset_plist() {
    let dir = TempDir::new().unwrap();
    let db = docset(&dir);

    let plist_path = plist::info_plist_path(&db).unwrap();
    assert!(plist_path.ends_with("Geometry.docset/Contents/Info.plist"));

    assert_eq!(plist::mark_dash_docset(&plist_path).unwrap(), PlistUpdate::Inserted);
    let text = fs::read_to_string(&plist_path).unwrap();
    assert!(text.contains("<key>isDashDocset</key>"));
    assert!(text.contains("<key>CFBundleName</key>"));

    assert_eq!(plist::mark_dash_docset(&plist_path).unwrap(), PlistUpdate::Unchanged);
}

#[test]
fn test_missing_tag_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.tag");

    let err = TagFile::read(&missing).unwrap_err();
    assert!(matches!(err, AppError::TagFileRead { .. }));
}

#[test]
fn test_wrong_root_element() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doxygen.xml");
    fs::write(&path, "<doxygenindex><compound kind=\"class\"/></doxygenindex>").unwrap();

    let err = TagFile::read(&path).unwrap_err();
    assert!(matches!(err, AppError::InvalidTagFile(_)));
}
