//! 候補照合
//!
//! 前方一致（大文字小文字を区別）で辞書を絞り込み、表示上限で切り詰める。
//! ポップアップが描画できる行数と同じ上限でなければ件数・選択位置の期待値がずれる

use crate::error::{ConfigError, Result};
use crate::keywords::KeywordDictionary;

/// ポップアップの既定表示上限
pub const DEFAULT_MAX_SUGGESTIONS: usize = 15;

/// プロパティ名・値の候補照合器
#[derive(Debug, Clone)]
pub struct SuggestionMatcher {
    dictionary: KeywordDictionary,
    max_suggestions: usize,
}

impl SuggestionMatcher {
    /// 既定の上限（15件）で作成
    pub fn new(dictionary: KeywordDictionary) -> Self {
        Self {
            dictionary,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    /// 上限を指定して作成。0件は設定ミスとして扱う
    pub fn with_max_suggestions(dictionary: KeywordDictionary, max: usize) -> Result<Self> {
        if max == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_suggestions".to_string(),
                value: max.to_string(),
            }
            .into());
        }
        Ok(Self {
            dictionary,
            max_suggestions: max,
        })
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    pub fn dictionary(&self) -> &KeywordDictionary {
        &self.dictionary
    }

    /// プロパティ名の候補
    pub fn suggest_properties(&self, prefix: &str) -> Vec<&str> {
        let suggestions = filter_prefix(self.dictionary.properties(), prefix, self.max_suggestions);
        log::debug!(
            "property prefix {:?}: {} suggestion(s)",
            prefix,
            suggestions.len()
        );
        suggestions
    }

    /// 指定プロパティの値候補
    ///
    /// 辞書にないプロパティ名は `InvalidKey`
    pub fn suggest_values(&self, property: &str, prefix: &str) -> Result<Vec<&str>> {
        let values = self.dictionary.values(property)?;
        let suggestions = filter_prefix(values, prefix, self.max_suggestions);
        log::debug!(
            "value prefix {:?} for {}: {} suggestion(s)",
            prefix,
            property,
            suggestions.len()
        );
        Ok(suggestions)
    }

    pub fn count_properties(&self, prefix: &str) -> usize {
        self.suggest_properties(prefix).len()
    }

    pub fn count_values(&self, property: &str, prefix: &str) -> Result<usize> {
        Ok(self.suggest_values(property, prefix)?.len())
    }
}

fn filter_prefix<'a>(entries: &'a [String], prefix: &str, max: usize) -> Vec<&'a str> {
    entries
        .iter()
        .filter(|entry| entry.starts_with(prefix))
        .take(max)
        .map(String::as_str)
        .collect()
}
