//! JSON形式のキーワードファイル
//!
//! ```json
//! {
//!   "properties": { "background": ["black", "blue"], "border": [] },
//!   "aliases": { "-moz-background": "background" }
//! }
//! ```

use super::{AliasMode, KeywordSource, StaticKeywordSource};
use crate::error::{FileError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct KeywordFile {
    properties: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
}

/// JSONファイル由来のキーワード提供元
#[derive(Debug, Clone)]
pub struct JsonKeywordSource {
    inner: StaticKeywordSource,
}

impl JsonKeywordSource {
    /// JSON文字列から読み込む
    pub fn from_json(text: &str) -> Result<Self> {
        let file: KeywordFile = serde_json::from_str(text)?;

        let mut inner = StaticKeywordSource::new();
        for (name, values) in file.properties {
            inner = inner.with_property(name, values);
        }
        for (alias, target) in file.aliases {
            inner = inner.with_alias(alias, target)?;
        }

        Ok(Self { inner })
    }

    /// ファイルから読み込む
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FileError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let text = std::fs::read_to_string(path)?;
        log::debug!("Reading CSS keywords from {}", path.display());
        Self::from_json(&text)
    }
}

impl KeywordSource for JsonKeywordSource {
    fn property_names(&self, aliases: AliasMode) -> Vec<String> {
        self.inner.property_names(aliases)
    }

    fn values_for_property(&self, name: &str) -> Vec<String> {
        self.inner.values_for_property(name)
    }
}
