//! CSSキーワード辞書
//!
//! 外部のスタイルエンジンが提供するプロパティ名・値の一覧を取り込み、
//! セッション中は変更されない整列済み辞書として保持する

pub mod json;

pub use json::JsonKeywordSource;

use crate::error::{KeywordError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// エイリアス（ベンダープレフィックス付き等の別名）の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliasMode {
    #[default]
    Include,
    Exclude,
}

/// キーワード提供元のトレイト
///
/// スタイルエンジンの列挙APIを抽象化したもの。返す列は未整列・重複ありでもよい
pub trait KeywordSource {
    /// 既知のCSSプロパティ名をすべて取得
    fn property_names(&self, aliases: AliasMode) -> Vec<String>;

    /// プロパティが取り得る値をすべて取得
    fn values_for_property(&self, name: &str) -> Vec<String>;
}

/// メモリ上のキーワード提供元
#[derive(Debug, Clone, Default)]
pub struct StaticKeywordSource {
    properties: BTreeMap<String, Vec<String>>,
    aliases: BTreeMap<String, String>,
}

impl StaticKeywordSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// プロパティと値の一覧を追加
    pub fn with_property<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// 値を持たないプロパティ名を一括追加
    pub fn with_property_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.properties.entry(name.into()).or_default();
        }
        self
    }

    /// エイリアスを追加
    pub fn with_alias(
        mut self,
        alias: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<Self> {
        let alias = alias.into();
        let target = target.into();
        if !self.properties.contains_key(&target) {
            return Err(KeywordError::UnknownAliasTarget { alias, target }.into());
        }
        self.aliases.insert(alias, target);
        Ok(self)
    }
}

impl KeywordSource for StaticKeywordSource {
    fn property_names(&self, aliases: AliasMode) -> Vec<String> {
        let mut names: Vec<String> = self.properties.keys().cloned().collect();
        if aliases == AliasMode::Include {
            names.extend(self.aliases.keys().cloned());
        }
        names
    }

    fn values_for_property(&self, name: &str) -> Vec<String> {
        let resolved = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.properties.get(resolved).cloned().unwrap_or_default()
    }
}

/// 整列済みのプロパティ辞書と値辞書
///
/// 構築後は不変。どの列も昇順で重複を含まない
#[derive(Debug, Clone, Default)]
pub struct KeywordDictionary {
    properties: Vec<String>,
    values: BTreeMap<String, Vec<String>>,
}

impl KeywordDictionary {
    /// 提供元から辞書を構築
    pub fn load(source: &dyn KeywordSource, aliases: AliasMode) -> Self {
        let mut names = BTreeSet::new();
        for name in source.property_names(aliases) {
            if name.is_empty() {
                log::warn!("Skipping empty CSS property name from keyword source");
                continue;
            }
            names.insert(name);
        }

        let mut values = BTreeMap::new();
        for name in &names {
            values.insert(name.clone(), sorted_unique(source.values_for_property(name)));
        }

        let dictionary = Self {
            properties: names.into_iter().collect(),
            values,
        };
        log::info!(
            "Loaded CSS keyword dictionary: {} properties, {} values",
            dictionary.properties.len(),
            dictionary.value_count()
        );
        dictionary
    }

    /// 整列済みプロパティ名
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// プロパティの整列済み値一覧
    pub fn values(&self, property: &str) -> Result<&[String]> {
        self.values
            .get(property)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                KeywordError::InvalidKey {
                    property: property.to_string(),
                }
                .into()
            })
    }

    pub fn has_property(&self, property: &str) -> bool {
        self.values.contains_key(property)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    fn value_count(&self) -> usize {
        self.values.values().map(Vec::len).sum()
    }
}

fn sorted_unique(mut items: Vec<String>) -> Vec<String> {
    items.sort();
    items.dedup();
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompError;

    fn sample_source() -> StaticKeywordSource {
        StaticKeywordSource::new()
            .with_property("color", ["red", "blue", "red"])
            .with_property("background", ["blur(1px)", "blue", "black"])
            .with_property_names(["border", "background"])
            .with_alias("-moz-background", "background")
            .unwrap()
    }

    #[test]
    fn test_load_sorts_and_dedups() {
        let dictionary = KeywordDictionary::load(&sample_source(), AliasMode::Include);

        assert_eq!(
            dictionary.properties(),
            ["-moz-background", "background", "border", "color"]
        );
        assert_eq!(dictionary.values("color").unwrap(), ["blue", "red"]);
        assert_eq!(
            dictionary.values("background").unwrap(),
            ["black", "blue", "blur(1px)"]
        );
        assert!(dictionary.values("border").unwrap().is_empty());
    }

    #[test]
    fn test_alias_values_resolve_through_target() {
        let dictionary = KeywordDictionary::load(&sample_source(), AliasMode::Include);
        assert_eq!(
            dictionary.values("-moz-background").unwrap(),
            dictionary.values("background").unwrap()
        );
    }

    #[test]
    fn test_exclude_aliases() {
        let dictionary = KeywordDictionary::load(&sample_source(), AliasMode::Exclude);
        assert_eq!(dictionary.len(), 3);
        assert!(!dictionary.has_property("-moz-background"));
    }

    #[test]
    fn test_unknown_property_is_invalid_key() {
        let dictionary = KeywordDictionary::load(&sample_source(), AliasMode::Include);
        match dictionary.values("colour") {
            Err(CompError::Keyword(KeywordError::InvalidKey { property })) => {
                assert_eq!(property, "colour");
            }
            other => panic!("Expected InvalidKey, got {:?}", other),
        }
    }

    #[test]
    fn test_alias_to_unknown_target_rejected() {
        let result = StaticKeywordSource::new().with_alias("-webkit-foo", "foo");
        assert!(matches!(
            result,
            Err(CompError::Keyword(KeywordError::UnknownAliasTarget { .. }))
        ));
    }

    #[test]
    fn test_empty_names_are_dropped() {
        let source = StaticKeywordSource::new().with_property_names(["", "color"]);
        let dictionary = KeywordDictionary::load(&source, AliasMode::Include);
        assert_eq!(dictionary.properties(), ["color"]);
        assert!(!dictionary.is_empty());
    }
}
