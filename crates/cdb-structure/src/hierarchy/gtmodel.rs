//! # GTModel Geometry
//!
//! `GTModel/500_GTModelGeometry/<category>/<subcategory>/<feature type>/<LOD>/<file>`
//!
//! ```text
//! A_Culture/A_Extraction/010_Mine/L23/D500_S001_T001_L23_AA010_000_Mine.flt
//! ```

use cdb_core::{CodeField, EntryKind, SegmentLayout, TokenRule, Width};
use cdb_registry::CodeCategory;

use super::tables::{FACC_CATEGORIES, FACC_SUBCATEGORIES, GTMODEL_DATASETS};
use crate::error::StructureError;
use crate::grammar::{CodeSource, LevelGrammar};

pub const DIRECTORY: &str = "GTModel";
pub const GEOMETRY_DATASET: &str = "500_GTModelGeometry";

const GEOMETRY_FILE: &str = concat!(
    r"^D(?P<dataset>[^_]+)",
    r"_S(?P<selector1>[^_]+)",
    r"_T(?P<selector2>[^_]+)",
    r"_L(?P<lod>[^_]+)",
    r"_(?P<category>[^_])(?P<subcategory>[^_])(?P<feature_type>[^_]+)",
    r"_(?P<feature_subcode>[^_]+)",
    r"_(?P<model>.+)$",
);

pub fn dataset_level() -> LevelGrammar {
    LevelGrammar::new(
        "dataset",
        "GTModel dataset",
        SegmentLayout::coded_directory(CodeField::numeric(Width::Exact(3))),
    )
    .with_source(CodeSource::fixed(GTMODEL_DATASETS))
}

pub fn geometry_levels() -> Result<Vec<LevelGrammar>, StructureError> {
    let category = LevelGrammar::new(
        "category",
        "CDB Category",
        SegmentLayout::coded_directory(CodeField::letter()),
    )
    .with_source(CodeSource::fixed(FACC_CATEGORIES));

    let subcategory = LevelGrammar::new(
        "subcategory",
        "CDB Subcategory",
        SegmentLayout::coded_directory(CodeField::letter()),
    )
    .with_source(CodeSource::fixed(FACC_SUBCATEGORIES).scoped_by(&[0]));

    let feature_type = LevelGrammar::new(
        "feature-type",
        "CDB Feature Type",
        SegmentLayout::coded_directory(CodeField::numeric(Width::Exact(3))),
    )
    .with_source(CodeSource::registry(CodeCategory::FeatureType).scoped_by(&[0, 1]));

    let lod = LevelGrammar::new(
        "lod",
        "LOD",
        SegmentLayout::bare_directory(CodeField::prefixed('L', Width::Exact(2))),
    )
    .with_source(CodeSource::registry(CodeCategory::Lod));

    let file = LevelGrammar::new(
        "geometry-file",
        "GTModel geometry",
        SegmentLayout {
            tokens: TokenRule::AtLeast(7),
            ..SegmentLayout::composite(EntryKind::File, 7)
        },
    )
    .with_pattern(GEOMETRY_FILE)?
    .with_literal("dataset", "Dataset code", "500")
    .with_numeric("feature_subcode", "Feature subcode", 3)
    .with_selector("selector1", "component selector 1")
    .with_selector("selector2", "component selector 2")
    .with_ancestor_code("category", 0, "CDB Category")
    .with_ancestor_code("subcategory", 1, "CDB Subcategory")
    .with_ancestor_code("feature_type", 2, "CDB Feature Type")
    .with_ancestor_code("lod", 3, "LOD")
    .with_extensions(&["flt"]);

    Ok(vec![category, subcategory, feature_type, lod, file])
}
