//! GTModel naming conformance, level by level.
//!
//! Each level gets one conforming name, a set of names that must each
//! fail, and a run with the level's root absent.

mod common;

use std::path::Path;

use cdb_structure::{CheckStatus, Hierarchy};
use common::{messages, mkdirs, run, touch};

const GEOMETRY: &str = "GTModel/500_GTModelGeometry";
const MINE: &str = "GTModel/500_GTModelGeometry/A_Culture/A_Extraction/010_Mine";
const GOOD_FILE: &str = "D500_S001_T001_L23_AA010_000_Mine.flt";

fn level_report(root: &Path, level: &str) -> cdb_structure::CheckReport {
    run(&Hierarchy::GtModel.level_check(root, level).unwrap())
}

/// Build one tree per name under `parent`, and expect each to fail `level`.
fn assert_each_fails(parent: &str, level: &str, names: &[&str]) {
    for name in names {
        let dir = tempfile::tempdir().unwrap();
        mkdirs(dir.path(), &format!("{parent}/{name}"));
        let report = level_report(dir.path(), level);
        assert_eq!(report.status, CheckStatus::Failed, "{name} should fail {level}");
        assert!(report
            .violations
            .iter()
            .all(|v| v.path.ends_with(name)));
    }
}

// ---------------------------------------------------------------------------
// Dataset level
// ---------------------------------------------------------------------------

#[test]
fn dataset_good() {
    let dir = tempfile::tempdir().unwrap();
    mkdirs(dir.path(), GEOMETRY);
    let report = level_report(dir.path(), "dataset");
    assert_eq!(report.status, CheckStatus::Passed, "{:?}", report.failure_message());
}

#[test]
fn dataset_bad() {
    assert_each_fails(
        "GTModel",
        "dataset",
        &["5_GTModelGeometry", "5xx_GTModelGeometry", "-1_GTModelGeometry", "999_GTModelGeometry"],
    );
}

#[test]
fn dataset_messages_name_the_defect() {
    let cases = [
        ("5_GTModelGeometry", "code width"),
        ("5xx_GTModelGeometry", "Invalid number format"),
        ("-1_GTModelGeometry", "cannot be below 0"),
        ("999_GTModelGeometry", "Invalid GTModel dataset code 999"),
    ];
    for (name, expected) in cases {
        let dir = tempfile::tempdir().unwrap();
        mkdirs(dir.path(), &format!("GTModel/{name}"));
        let report = level_report(dir.path(), "dataset");
        assert!(
            messages(&report).iter().any(|m| m.contains(expected)),
            "{name}: {:?}",
            messages(&report)
        );
    }
}

#[test]
fn dataset_skip() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(level_report(dir.path(), "dataset").status, CheckStatus::Skipped);
}

// ---------------------------------------------------------------------------
// Category level
// ---------------------------------------------------------------------------

#[test]
fn category_good() {
    let dir = tempfile::tempdir().unwrap();
    mkdirs(dir.path(), &format!("{GEOMETRY}/A_Culture"));
    assert_eq!(level_report(dir.path(), "category").status, CheckStatus::Passed);
}

#[test]
fn category_bad() {
    assert_each_fails(
        GEOMETRY,
        "category",
        &["B_Culture", "A_Hydrography", "Z_Culture", "A_Bogus"],
    );
}

#[test]
fn category_skip() {
    let dir = tempfile::tempdir().unwrap();
    mkdirs(dir.path(), "GTModel");
    assert_eq!(level_report(dir.path(), "category").status, CheckStatus::Skipped);
}

// ---------------------------------------------------------------------------
// Subcategory level
// ---------------------------------------------------------------------------

#[test]
fn subcategory_good() {
    let dir = tempfile::tempdir().unwrap();
    mkdirs(dir.path(), &format!("{GEOMETRY}/A_Culture/A_Extraction"));
    assert_eq!(level_report(dir.path(), "subcategory").status, CheckStatus::Passed);
}

#[test]
fn subcategory_bad() {
    assert_each_fails(
        &format!("{GEOMETRY}/A_Culture"),
        "subcategory",
        &["B_Extraction", "A_Disposal", "ZZZZ_Extraction", "A_Bogus"],
    );
}

#[test]
fn subcategory_letters_are_scoped_by_category() {
    let dir = tempfile::tempdir().unwrap();
    mkdirs(dir.path(), &format!("{GEOMETRY}/B_Hydrography/H_Inland_Water"));
    mkdirs(dir.path(), &format!("{GEOMETRY}/A_Culture/H_Inland_Water"));

    let report = level_report(dir.path(), "subcategory");
    assert_eq!(report.status, CheckStatus::Failed);
    assert!(report
        .violations
        .iter()
        .all(|v| v.path.contains("A_Culture")));
}

#[test]
fn subcategory_skip() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(level_report(dir.path(), "subcategory").status, CheckStatus::Skipped);
}

// ---------------------------------------------------------------------------
// Feature type level
// ---------------------------------------------------------------------------

#[test]
fn feature_type_good() {
    let dir = tempfile::tempdir().unwrap();
    mkdirs(dir.path(), MINE);
    assert_eq!(level_report(dir.path(), "feature-type").status, CheckStatus::Passed);
}

#[test]
fn feature_type_bad() {
    assert_each_fails(
        &format!("{GEOMETRY}/A_Culture/A_Extraction"),
        "feature-type",
        &["001_Mine", "010_Quarry_Wall", "999_Mine", "010_Bogus"],
    );
}

#[test]
fn feature_type_code_must_be_three_digits() {
    let dir = tempfile::tempdir().unwrap();
    mkdirs(dir.path(), &format!("{GEOMETRY}/A_Culture/A_Extraction/10_Mine"));
    let report = level_report(dir.path(), "feature-type");
    assert_eq!(
        messages(&report),
        vec!["Invalid CDB Feature Type code width: expected 3 digits, found 2"]
    );
}

#[test]
fn feature_type_skip() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(level_report(dir.path(), "feature-type").status, CheckStatus::Skipped);
}

// ---------------------------------------------------------------------------
// LOD level
// ---------------------------------------------------------------------------

#[test]
fn lod_good() {
    let dir = tempfile::tempdir().unwrap();
    mkdirs(dir.path(), &format!("{MINE}/L23"));
    assert_eq!(level_report(dir.path(), "lod").status, CheckStatus::Passed);
}

#[test]
fn lod_bad() {
    assert_each_fails(MINE, "lod", &["LA", "L99", "L9"]);
}

#[test]
fn lod_skip() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(level_report(dir.path(), "lod").status, CheckStatus::Skipped);
}

// ---------------------------------------------------------------------------
// Per-level isolation
// ---------------------------------------------------------------------------

#[test]
fn level_checks_report_only_their_level() {
    let dir = tempfile::tempdir().unwrap();
    mkdirs(dir.path(), &format!("{MINE}/L99"));

    for level in ["category", "subcategory", "feature-type"] {
        assert_eq!(level_report(dir.path(), level).status, CheckStatus::Passed, "{level}");
    }
    let lod = level_report(dir.path(), "lod");
    assert_eq!(messages(&lod), vec!["Invalid LOD code 99"]);
}

// ---------------------------------------------------------------------------
// Geometry files
// ---------------------------------------------------------------------------

fn file_report(name: &str) -> cdb_structure::CheckReport {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &format!("{MINE}/L23/{name}"));
    run(&Hierarchy::GtModel.geometry_check(dir.path()).unwrap())
}

#[test]
fn geometry_file_good() {
    let report = file_report(GOOD_FILE);
    assert_eq!(report.status, CheckStatus::Passed, "{:?}", report.failure_message());
}

#[test]
fn geometry_file_bad_cases() {
    let cases = [
        ("D500_S01_T001_L23_AA010_000_Mine.flt", "component selector 1 '01': expected 3 digits"),
        ("D500_S001_T+07_L23_AA010_000_Mine.flt", "Incorrect zero padding for component selector 2"),
        ("D500_S001_Txyz_L23_AA010_000_Mine.flt", "Invalid number format for component selector 2"),
        ("D501_S001_T001_L23_AA010_000_Mine.flt", "Dataset code does not match: expected 500, found 501"),
        ("D500_S001_T001_L22_AA010_000_Mine.flt", "LOD does not match parent directory"),
        ("D500_S001_T001_L23_AB010_000_Mine.flt", "CDB Subcategory does not match parent directory"),
        ("D500_S001_T001_L23_BA010_000_Mine.flt", "CDB Category does not match parent directory"),
        ("D500_S001_T001_L23_AA012_000_Mine.flt", "CDB Feature Type does not match parent directory"),
        ("D500_S001_T001_L23_AA010_000_Mine.obj", "Invalid GTModel geometry file extension '.obj'"),
        ("D500_S001_T001_L23_AA010_xyz_Mine.flt", "Invalid number format for Feature subcode: 'xyz'"),
        ("D500_S001_T001_L23_AA010_00_Mine.flt", "Invalid Feature subcode width: expected 3 digits, found 2"),
        ("D500_S001_T001_L23_AA010_Mine.flt", "expected at least 7, found 6"),
    ];
    for (name, expected) in cases {
        let report = file_report(name);
        assert_eq!(messages(&report).len(), 1, "{name}: {:?}", messages(&report));
        assert!(messages(&report)[0].contains(expected), "{name}: {:?}", messages(&report));
    }
}

#[test]
fn model_name_may_contain_underscores() {
    let dir = tempfile::tempdir().unwrap();
    touch(
        dir.path(),
        &format!(
            "{GEOMETRY}/A_Culture/K_Recreational/040_Athletic_Field/L23/D500_S001_T001_L23_AK040_000_Athletic_Field.flt"
        ),
    );
    let report = run(&Hierarchy::GtModel.geometry_check(dir.path()).unwrap());
    assert_eq!(report.status, CheckStatus::Passed, "{:?}", report.failure_message());
}

#[test]
fn directory_at_file_level_is_one_violation() {
    let dir = tempfile::tempdir().unwrap();
    mkdirs(dir.path(), &format!("{MINE}/L23/{GOOD_FILE}/nested_Bogus"));
    let report = run(&Hierarchy::GtModel.geometry_check(dir.path()).unwrap());
    assert_eq!(
        messages(&report),
        vec!["Expected a file for GTModel geometry, found a directory"]
    );
}

#[test]
fn file_at_directory_level_is_not_descended() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &format!("{GEOMETRY}/A_Culture/A_Extraction"));
    let report = run(&Hierarchy::GtModel.geometry_check(dir.path()).unwrap());
    assert_eq!(
        messages(&report),
        vec!["Expected a directory for CDB Subcategory, found a file"]
    );
}

#[test]
fn whole_tree_accumulates_across_levels() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &format!("{MINE}/L23/{GOOD_FILE}"));
    mkdirs(dir.path(), &format!("{GEOMETRY}/A_Culture/A_Extraction/999_Mine/L9"));
    mkdirs(dir.path(), &format!("{GEOMETRY}/Z_Culture"));

    let report = run(&Hierarchy::GtModel.geometry_check(dir.path()).unwrap());
    let paths: Vec<&str> = report.violations.iter().map(|v| v.path.as_str()).collect();

    // Discovery order follows sorted names: A_Culture's subtree, then Z_Culture.
    assert_eq!(paths.len(), 3);
    assert!(paths[0].ends_with("999_Mine"));
    assert!(paths[1].ends_with("L9"));
    assert!(paths[2].ends_with("Z_Culture"));
}
