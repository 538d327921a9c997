//! # Code Categories
//!
//! One variant per reference table. The YAML discriminant is the
//! snake_case variant name (`feature_type`, `lod`).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A registry code category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeCategory {
    /// DIS Entity Kind (platform, munition, life form, ...).
    Kind,
    /// DIS Domain (land, air, surface, ...).
    Domain,
    /// DIS Country.
    Country,
    /// DIS Category.
    Category,
    /// DIS Subcategory.
    Subcategory,
    /// FACC feature type, scoped by category and subcategory letters.
    FeatureType,
    /// Level of detail.
    Lod,
}

impl CodeCategory {
    pub fn all() -> &'static [CodeCategory] {
        &[
            Self::Kind,
            Self::Domain,
            Self::Country,
            Self::Category,
            Self::Subcategory,
            Self::FeatureType,
            Self::Lod,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kind => "kind",
            Self::Domain => "domain",
            Self::Country => "country",
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::FeatureType => "feature_type",
            Self::Lod => "lod",
        }
    }
}

impl std::fmt::Display for CodeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::all().iter().map(CodeCategory::as_str).collect();
                format!("unknown code category '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_yaml_discriminant() {
        for category in CodeCategory::all() {
            let yaml = serde_yaml::to_string(category).unwrap();
            assert_eq!(yaml.trim(), category.to_string());
        }
    }

    #[test]
    fn from_str_accepts_dashes_and_case() {
        assert_eq!("feature-type".parse(), Ok(CodeCategory::FeatureType));
        assert_eq!("LOD".parse(), Ok(CodeCategory::Lod));
        assert_eq!(" kind ".parse(), Ok(CodeCategory::Kind));
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "texture".parse::<CodeCategory>().unwrap_err();
        assert!(err.contains("texture"));
        assert!(err.contains("feature_type"));
    }
}
