//! 設定
//!
//! JSON設定ファイルの読み込みと検証。パスは `~` と環境変数を展開する

use crate::completion::{CssCompleter, SuggestionMatcher, DEFAULT_MAX_SUGGESTIONS};
use crate::error::{ConfigError, FileError, Result};
use crate::keywords::{AliasMode, JsonKeywordSource, KeywordDictionary};
use crate::logging::LogLevel;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 設定ディレクトリ名
const CONFIG_DIR_NAME: &str = "csscomp";
const CONFIG_FILE_NAME: &str = "config.json";

/// 補完設定
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// 自動補完の有効/無効（スタイルエディタの設定項目に相当）
    pub autocompletion_enabled: bool,
    /// ポップアップの表示上限
    pub max_suggestions: usize,
    /// エイリアスのプロパティ名を候補に含めるか
    pub include_aliases: bool,
    /// キーワードファイル
    pub keywords: Option<PathBuf>,
    pub log_level: LogLevel,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            autocompletion_enabled: true,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            include_aliases: true,
            keywords: None,
            log_level: LogLevel::default(),
        }
    }
}

impl CompletionConfig {
    /// 設定ファイルから読み込む
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound {
                path: path.display().to_string(),
            }
            .into(),
            _ => crate::error::CompError::from(e),
        })?;

        let config: Self = serde_json::from_str(&text).map_err(|e| {
            log::warn!("Invalid config {}: {}", path.display(), e);
            ConfigError::InvalidFile {
                path: path.display().to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 既定の場所から読み込む。ファイルがなければ既定値
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// 既定の設定ファイルパス
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_suggestions == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_suggestions".to_string(),
                value: self.max_suggestions.to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn alias_mode(&self) -> AliasMode {
        if self.include_aliases {
            AliasMode::Include
        } else {
            AliasMode::Exclude
        }
    }

    /// `~` と `$VAR` を展開したキーワードファイルのパス
    pub fn keywords_path(&self) -> Result<Option<PathBuf>> {
        self.keywords.as_deref().map(expand_path).transpose()
    }

    /// 設定に従ってキーワードファイルから照合器を構築
    pub fn build_matcher(&self) -> Result<SuggestionMatcher> {
        let path = self.keywords_path()?.ok_or_else(|| ConfigError::InvalidValue {
            key: "keywords".to_string(),
            value: "<unset>".to_string(),
        })?;
        let source = JsonKeywordSource::from_path(&path)?;
        let dictionary = KeywordDictionary::load(&source, self.alias_mode());
        SuggestionMatcher::with_max_suggestions(dictionary, self.max_suggestions)
    }

    /// 照合器を包んだ補完器を構築。自動補完が無効なら候補を返さない
    pub fn build_completer(&self) -> Result<CssCompleter> {
        let matcher = self.build_matcher()?;
        Ok(CssCompleter::new(matcher).with_enabled(self.autocompletion_enabled))
    }
}

/// パス中の `~` と環境変数を展開
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw).map_err(|e| ConfigError::PathExpansion {
        message: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.as_ref()))
}
