//! # MModel Geometry
//!
//! `MModel/600_MModelGeometry/<kind>/<domain>/<country>/<category>/<entity>/<file>`
//!
//! ```text
//! 1_Platform/1_Land/225_United_States/1_Tank/1_1_225_1_1_1_0/D600_S001_T001_1_1_225_1_1_1_0.flt
//! ```
//!
//! The entity directory spells out the full seven-field DIS code. Its
//! first four fields restate the directories above it; the file name
//! restates all seven fields of the entity directory.

use cdb_core::{CodeField, EntryKind, SegmentLayout, Width};
use cdb_registry::CodeCategory;

use super::tables::MMODEL_DATASETS;
use crate::error::StructureError;
use crate::grammar::{CodeSource, LevelGrammar};

pub const DIRECTORY: &str = "MModel";
pub const GEOMETRY_DATASET: &str = "600_MModelGeometry";

const ENTITY: &str = concat!(
    r"^(?P<kind>\d+)_(?P<domain>\d+)_(?P<country>\d+)_(?P<category>\d+)",
    r"_(?P<subcategory>\d+)_(?P<specific>\d+)_(?P<extra>\d+)$",
);

const GEOMETRY_FILE: &str = concat!(
    r"^D(?P<dataset>[^_]+)_S(?P<selector1>[^_]+)_T(?P<selector2>[^_]+)",
    r"_(?P<kind>[^_]+)_(?P<domain>[^_]+)_(?P<country>[^_]+)_(?P<category>[^_]+)",
    r"_(?P<subcategory>[^_]+)_(?P<specific>[^_]+)_(?P<extra>[^_]+)$",
);

const ENTITY_FIELDS: [(&str, &str); 7] = [
    ("kind", "DIS Entity Kind"),
    ("domain", "DIS Domain"),
    ("country", "DIS Country"),
    ("category", "DIS Category"),
    ("subcategory", "DIS Subcategory"),
    ("specific", "DIS Specific"),
    ("extra", "DIS Extra"),
];

pub fn dataset_level() -> LevelGrammar {
    LevelGrammar::new(
        "dataset",
        "MModel dataset",
        SegmentLayout::coded_directory(CodeField::numeric(Width::Exact(3))),
    )
    .with_source(CodeSource::fixed(MMODEL_DATASETS))
}

fn coded(key: &'static str, name: &'static str, category: CodeCategory) -> LevelGrammar {
    LevelGrammar::new(
        key,
        name,
        SegmentLayout::coded_directory(CodeField::numeric(Width::Any)),
    )
    .with_source(CodeSource::registry(category))
}

pub fn geometry_levels() -> Result<Vec<LevelGrammar>, StructureError> {
    let mut entity = LevelGrammar::new(
        "entity",
        "DIS Entity",
        SegmentLayout::composite(EntryKind::Directory, 7),
    )
    .with_pattern(ENTITY)?
    .with_composite(
        "subcategory",
        "DIS Subcategory",
        CodeSource::registry(CodeCategory::Subcategory),
    );
    for (depth, &(capture, noun)) in ENTITY_FIELDS.iter().take(4).enumerate() {
        entity = entity.with_ancestor_code(capture, depth, noun);
    }

    let mut file = LevelGrammar::new(
        "geometry-file",
        "MModel geometry",
        SegmentLayout::composite(EntryKind::File, 10),
    )
    .with_pattern(GEOMETRY_FILE)?
    .with_literal("dataset", "Dataset code", "600")
    .with_selector("selector1", "component selector 1")
    .with_selector("selector2", "component selector 2")
    .with_extensions(&["flt"]);
    for (capture, noun) in ENTITY_FIELDS {
        file = file.with_ancestor_field(capture, 4, noun);
    }

    Ok(vec![
        coded("kind", "DIS Entity Kind", CodeCategory::Kind),
        coded("domain", "DIS Domain", CodeCategory::Domain),
        coded("country", "DIS Country", CodeCategory::Country),
        coded("category", "DIS Category", CodeCategory::Category),
        entity,
        file,
    ])
}
