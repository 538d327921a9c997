//! # Hierarchies
//!
//! The grammar tables this crate ships, and the checks built from them.
//!
//! Each hierarchy has a dataset level (`GTModel/<ddd>_<Dataset>`) and a
//! geometry subtree below its geometry dataset. For each hierarchy there
//! is one check for the dataset level, one check per geometry level
//! (reporting only that level), and one whole-subtree geometry check.
//!
//! Check names are `<hierarchy>/<level>`, with `<hierarchy>/geometry` for
//! the whole subtree: `gtmodel/dataset`, `gtmodel/lod`,
//! `mmodel/geometry`.

pub mod gtmodel;
pub mod mmodel;
pub mod tables;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::check::ConformanceCheck;
use crate::error::StructureError;
use crate::grammar::LevelGrammar;

/// Key of the whole-subtree geometry check.
pub const GEOMETRY: &str = "geometry";

/// A model hierarchy with its own naming grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Hierarchy {
    #[serde(rename = "gtmodel")]
    GtModel,
    #[serde(rename = "mmodel")]
    MModel,
}

impl Hierarchy {
    /// Every hierarchy, in check order.
    pub fn all() -> &'static [Hierarchy] {
        &[Self::GtModel, Self::MModel]
    }

    /// The name used on the command line and in check names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GtModel => "gtmodel",
            Self::MModel => "mmodel",
        }
    }

    /// Directory directly under the CDB root.
    pub fn directory(self) -> &'static str {
        match self {
            Self::GtModel => gtmodel::DIRECTORY,
            Self::MModel => mmodel::DIRECTORY,
        }
    }

    /// Geometry dataset directory under [`Hierarchy::directory`].
    pub fn geometry_dataset(self) -> &'static str {
        match self {
            Self::GtModel => gtmodel::GEOMETRY_DATASET,
            Self::MModel => mmodel::GEOMETRY_DATASET,
        }
    }

    pub fn dataset_level(self) -> LevelGrammar {
        match self {
            Self::GtModel => gtmodel::dataset_level(),
            Self::MModel => mmodel::dataset_level(),
        }
    }

    /// The geometry grammar table, verified.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::Grammar`] if the table is inconsistent.
    pub fn geometry_levels(self) -> Result<Vec<LevelGrammar>, StructureError> {
        let levels = match self {
            Self::GtModel => gtmodel::geometry_levels()?,
            Self::MModel => mmodel::geometry_levels()?,
        };
        for (depth, level) in levels.iter().enumerate() {
            level.verify(depth)?;
        }
        Ok(levels)
    }

    /// Every selectable level key, dataset first.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::Grammar`] if the table is inconsistent.
    pub fn level_keys(self) -> Result<Vec<&'static str>, StructureError> {
        let mut keys = vec![self.dataset_level().key()];
        keys.extend(self.geometry_levels()?.iter().map(LevelGrammar::key));
        keys.push(GEOMETRY);
        Ok(keys)
    }

    fn check_name(self, key: &str) -> String {
        format!("{}/{key}", self.as_str())
    }

    /// The dataset-level check, rooted at `<cdb_root>/GTModel`.
    pub fn dataset_check(self, cdb_root: &Path) -> ConformanceCheck {
        let level = self.dataset_level();
        ConformanceCheck::new(
            self.check_name(level.key()),
            cdb_root.join(self.directory()),
            Arc::new(vec![level]),
        )
    }

    /// The whole geometry-subtree check.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::Grammar`] if the table is inconsistent.
    pub fn geometry_check(self, cdb_root: &Path) -> Result<ConformanceCheck, StructureError> {
        Ok(ConformanceCheck::new(
            self.check_name(GEOMETRY),
            self.geometry_root(cdb_root),
            Arc::new(self.geometry_levels()?),
        ))
    }

    /// One check per geometry level, each reporting only its own level.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::Grammar`] if the table is inconsistent.
    pub fn geometry_level_checks(self, cdb_root: &Path) -> Result<Vec<ConformanceCheck>, StructureError> {
        let levels = Arc::new(self.geometry_levels()?);
        let root = self.geometry_root(cdb_root);
        Ok(levels
            .iter()
            .enumerate()
            .map(|(depth, level)| {
                ConformanceCheck::new("", root.clone(), Arc::clone(&levels))
                    .for_level(self.check_name(level.key()), depth)
            })
            .collect())
    }

    /// The default pair: dataset level plus whole geometry subtree.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::Grammar`] if the table is inconsistent.
    pub fn checks(self, cdb_root: &Path) -> Result<Vec<ConformanceCheck>, StructureError> {
        Ok(vec![self.dataset_check(cdb_root), self.geometry_check(cdb_root)?])
    }

    /// The check selected by a level key (`dataset`, `lod`, `geometry`).
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownLevel`] if no level has that key.
    pub fn level_check(self, cdb_root: &Path, key: &str) -> Result<ConformanceCheck, StructureError> {
        if key == self.dataset_level().key() {
            return Ok(self.dataset_check(cdb_root));
        }
        if key == GEOMETRY {
            return self.geometry_check(cdb_root);
        }
        self.geometry_level_checks(cdb_root)?
            .into_iter()
            .find(|check| check.name() == self.check_name(key))
            .ok_or_else(|| StructureError::UnknownLevel {
                hierarchy: self.as_str().to_string(),
                level: key.to_string(),
                known: self
                    .level_keys()
                    .map(|keys| keys.join(", "))
                    .unwrap_or_default(),
            })
    }

    fn geometry_root(self, cdb_root: &Path) -> std::path::PathBuf {
        cdb_root.join(self.directory()).join(self.geometry_dataset())
    }
}

impl fmt::Display for Hierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hierarchy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gtmodel" => Ok(Self::GtModel),
            "mmodel" => Ok(Self::MModel),
            other => Err(format!("unknown hierarchy '{other}' (expected gtmodel or mmodel)")),
        }
    }
}
