//! Sheet roles derived from naming conventions.
//!
//! The workbook declares no schema, so a sheet's role comes from its name:
//! administrative sheets are skipped, a revision marker suffix makes a sheet
//! the override of a base entity, and every other sheet is a base sheet.

use crate::odf::Spreadsheet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Naming conventions of the workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Sheet names excluded from extraction
    pub excluded: Vec<String>,
    /// Name prefixes of excluded sheets
    pub reserved_prefixes: Vec<String>,
    /// Case-sensitive suffixes marking a revision sheet
    pub revision_markers: Vec<String>,
    /// Historical renames applied to the base name of a revision sheet
    pub renames: BTreeMap<String, String>,
    /// Sheets holding the alignment matrix
    pub matrix_sheets: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            excluded: vec!["Spielleiter".to_string()],
            reserved_prefixes: vec![".".to_string()],
            revision_markers: vec!["__V2".to_string(), "_V2".to_string()],
            renames: BTreeMap::from([("Korbi".to_string(), "Kobi".to_string())]),
            matrix_sheets: vec!["Gesinnung".to_string()],
        }
    }
}

impl CatalogConfig {
    /// Classify one sheet name.
    ///
    /// Revision markers are tried longest first, so a doubled separator is
    /// stripped as a whole.
    ///
    /// # Examples
    ///
    /// ```
    /// use charsheet::catalog::{CatalogConfig, SheetRole};
    ///
    /// let config = CatalogConfig::default();
    /// assert_eq!(config.classify("Georg"), SheetRole::Base);
    /// assert_eq!(
    ///     config.classify("Georg__V2"),
    ///     SheetRole::Override { base: "Georg".to_string() }
    /// );
    /// assert_eq!(config.classify("Spielleiter"), SheetRole::Excluded);
    /// ```
    pub fn classify(&self, name: &str) -> SheetRole {
        if name.trim().is_empty()
            || self.excluded.iter().any(|excluded| excluded == name)
            || self
                .reserved_prefixes
                .iter()
                .any(|prefix| !prefix.is_empty() && name.starts_with(prefix.as_str()))
        {
            return SheetRole::Excluded;
        }
        if self.matrix_sheets.iter().any(|sheet| sheet == name) {
            return SheetRole::Matrix;
        }

        let mut markers: Vec<&str> = self
            .revision_markers
            .iter()
            .map(String::as_str)
            .filter(|marker| !marker.is_empty())
            .collect();
        markers.sort_by_key(|marker| std::cmp::Reverse(marker.len()));

        for marker in markers {
            if let Some(stripped) = name.strip_suffix(marker)
                && !stripped.is_empty()
            {
                let base = self
                    .renames
                    .get(stripped)
                    .cloned()
                    .unwrap_or_else(|| stripped.to_string());
                return SheetRole::Override { base };
            }
        }
        SheetRole::Base
    }
}

/// Role of a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum SheetRole {
    /// Administrative or hidden sheet
    Excluded,
    /// The alignment matrix
    Matrix,
    /// A character's base sheet, keyed by its own name
    Base,
    /// A revision of the character named `base`
    Override { base: String },
}

/// A sheet and its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetInfo {
    pub name: String,
    #[serde(flatten)]
    pub role: SheetRole,
}

/// Sheets making up one character.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Name of the base sheet
    pub base: Option<String>,
    /// Name of the revision sheet
    pub revision: Option<String>,
}

/// All sheets of a document, classified, with characters keyed by base name.
#[derive(Debug, Clone, Default)]
pub struct SheetCatalog {
    sheets: Vec<SheetInfo>,
    entries: BTreeMap<String, CatalogEntry>,
}

impl SheetCatalog {
    /// Classify sheet names in document order.
    pub fn build<'a>(names: impl IntoIterator<Item = &'a str>, config: &CatalogConfig) -> Self {
        let mut catalog = Self::default();

        for name in names {
            let role = config.classify(name);
            tracing::debug!(sheet = %name, ?role, "sheet classified");

            match &role {
                SheetRole::Base => {
                    let entry = catalog.entries.entry(name.to_string()).or_default();
                    entry.base = Some(name.to_string());
                },
                SheetRole::Override { base } => {
                    let entry = catalog.entries.entry(base.clone()).or_default();
                    if let Some(previous) = entry.revision.replace(name.to_string()) {
                        tracing::warn!(
                            base = %base,
                            previous = %previous,
                            sheet = %name,
                            "several revision sheets for one character, keeping the last"
                        );
                    }
                },
                SheetRole::Excluded | SheetRole::Matrix => {},
            }

            catalog.sheets.push(SheetInfo {
                name: name.to_string(),
                role,
            });
        }

        catalog
    }

    /// Classify the sheets of a spreadsheet.
    pub fn from_spreadsheet(spreadsheet: &Spreadsheet, config: &CatalogConfig) -> Self {
        Self::build(spreadsheet.sheet_names(), config)
    }

    /// Characters by base name, in sorted order.
    pub fn entries(&self) -> &BTreeMap<String, CatalogEntry> {
        &self.entries
    }

    /// Sheets of one character.
    pub fn get(&self, base_name: &str) -> Option<&CatalogEntry> {
        self.entries.get(base_name)
    }

    /// Every sheet with its role, in document order.
    pub fn sheets(&self) -> &[SheetInfo] {
        &self.sheets
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no character sheets were found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_roles() {
        let config = CatalogConfig::default();
        assert_eq!(config.classify("Spielleiter"), SheetRole::Excluded);
        assert_eq!(config.classify(".Vorlage"), SheetRole::Excluded);
        assert_eq!(config.classify(""), SheetRole::Excluded);
        assert_eq!(config.classify("Gesinnung"), SheetRole::Matrix);
        assert_eq!(config.classify("Anna"), SheetRole::Base);
        assert_eq!(
            config.classify("Anna_V2"),
            SheetRole::Override {
                base: "Anna".to_string()
            }
        );
    }

    #[test]
    fn test_doubled_marker_is_stripped_whole() {
        let config = CatalogConfig::default();
        assert_eq!(
            config.classify("Georg__V2"),
            SheetRole::Override {
                base: "Georg".to_string()
            }
        );
    }

    #[test]
    fn test_marker_is_case_sensitive_suffix() {
        let config = CatalogConfig::default();
        assert_eq!(config.classify("Anna_v2"), SheetRole::Base);
        assert_eq!(config.classify("V2_Anna"), SheetRole::Base);
        assert_eq!(config.classify("_V2"), SheetRole::Base);
    }

    #[test]
    fn test_rename_applies_to_revision_base() {
        let config = CatalogConfig::default();
        assert_eq!(
            config.classify("Korbi_V2"),
            SheetRole::Override {
                base: "Kobi".to_string()
            }
        );
        assert_eq!(config.classify("Korbi"), SheetRole::Base);
    }

    #[test]
    fn test_catalog_pairs_base_and_revision() {
        let names = [
            "Spielleiter",
            "Kobi",
            "Anna",
            "Korbi_V2",
            "Georg__V2",
            ".hidden",
            "Gesinnung",
        ];
        let catalog = SheetCatalog::build(names, &CatalogConfig::default());

        let keys: Vec<&str> = catalog.entries().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Anna", "Georg", "Kobi"]);

        let kobi = catalog.get("Kobi").unwrap();
        assert_eq!(kobi.base.as_deref(), Some("Kobi"));
        assert_eq!(kobi.revision.as_deref(), Some("Korbi_V2"));

        let georg = catalog.get("Georg").unwrap();
        assert_eq!(georg.base, None);
        assert_eq!(georg.revision.as_deref(), Some("Georg__V2"));

        assert_eq!(catalog.sheets().len(), names.len());
        assert_eq!(catalog.sheets()[6].role, SheetRole::Matrix);
        for entry in catalog.entries().values() {
            assert!(entry.base.is_some() || entry.revision.is_some());
        }
    }

    #[test]
    fn test_last_revision_wins() {
        let catalog = SheetCatalog::build(["Anna_V2", "Anna__V2"], &CatalogConfig::default());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Anna").unwrap().revision.as_deref(), Some("Anna__V2"));
    }

    #[test]
    fn test_sheet_info_serialization() {
        let info = SheetInfo {
            name: "Anna_V2".to_string(),
            role: SheetRole::Override {
                base: "Anna".to_string(),
            },
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["name"], "Anna_V2");
        assert_eq!(json["role"], "override");
        assert_eq!(json["base"], "Anna");
    }
}
