// SPDX-License-Identifier: MPL-2.0
//! Catalog records handed to the player by the query layer.
//!
//! The player only reads a handful of fields; everything else in the
//! record is ignored. Both the database column names and the camelCase
//! names used by the web layer are accepted.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A movie or episode row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct CatalogEntry {
    #[serde(default)]
    pub id: i64,

    #[serde(default, alias = "titulo")]
    pub title: Option<String>,

    #[serde(default, alias = "sinopse", alias = "sinopsis")]
    pub synopsis: Option<String>,

    #[serde(default, alias = "capa_url", alias = "coverUrl")]
    pub cover_url: Option<String>,

    #[serde(default, alias = "videoUrl")]
    pub video_url: Option<String>,

    #[serde(default, alias = "seasonNumber")]
    pub season_number: Option<u32>,

    #[serde(default, alias = "episodeNumber")]
    pub episode_number: Option<u32>,
}

impl CatalogEntry {
    /// Parses a single record from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a single JSON record from disk.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
            .map_err(|err| Error::Catalog(format!("{}: {}", path.display(), err)))
    }

    /// The stream identifier, if the record has a non-blank one.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        non_blank(self.video_url.as_deref())
    }

    #[must_use]
    pub fn poster(&self) -> Option<&str> {
        non_blank(self.cover_url.as_deref())
    }

    #[must_use]
    pub fn display_title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    #[must_use]
    pub fn is_episode(&self) -> bool {
        self.season_number.is_some() || self.episode_number.is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_database_column_names() {
        let entry = CatalogEntry::from_json(
            r#"{"id": 7, "titulo": "Filme", "sinopse": "...", "capa_url": "c.jpg", "video_url": "v.m3u8"}"#,
        )
        .expect("valid record");
        assert_eq!(entry.id, 7);
        assert_eq!(entry.display_title(), Some("Filme"));
        assert_eq!(entry.poster(), Some("c.jpg"));
        assert_eq!(entry.source(), Some("v.m3u8"));
        assert!(!entry.is_episode());
    }

    #[test]
    fn parses_camel_case_episode_record() {
        let entry = CatalogEntry::from_json(
            r#"{"id": 3, "title": "Pilot", "sinopsis": "x", "coverUrl": "p.png",
                "videoUrl": "ep.mp4", "seasonNumber": 2, "episodeNumber": 5, "extra": true}"#,
        )
        .expect("valid record");
        assert_eq!(entry.season_number, Some(2));
        assert_eq!(entry.episode_number, Some(5));
        assert_eq!(entry.synopsis.as_deref(), Some("x"));
        assert!(entry.is_episode());
    }

    #[test]
    fn blank_video_url_is_no_source() {
        let entry = CatalogEntry::from_json(r#"{"id": 1, "video_url": "   "}"#).expect("valid");
        assert_eq!(entry.source(), None);
        assert_eq!(entry.display_title(), None);
    }

    #[test]
    fn malformed_json_is_catalog_error() {
        let result = CatalogEntry::from_json("{ not json");
        assert!(matches!(result, Err(Error::Catalog(_))));
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("entry.json");
        fs::write(&path, r#"{"id": 9, "video_url": "a.mp4"}"#).expect("write");

        let entry = CatalogEntry::load_from_path(&path).expect("load");
        assert_eq!(entry.id, 9);

        let missing = CatalogEntry::load_from_path(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
