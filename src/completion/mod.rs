//! 補完機能
//!
//! CSSプロパティ名・値の補完候補の計算

pub mod context;
pub mod matcher;

pub use context::CssContext;
pub use matcher::{SuggestionMatcher, DEFAULT_MAX_SUGGESTIONS};

use crate::error::Result;

/// 補完エンジンのトレイト
pub trait CompletionEngine {
    /// 入力文字列に対する補完候補を取得
    fn complete(&self, input: &str) -> Result<Vec<String>>;

    /// 共通プレフィックスを取得
    fn common_prefix(&self, candidates: &[String]) -> String {
        let refs: Vec<&str> = candidates.iter().map(String::as_str).collect();
        common_prefix(&refs)
    }
}

/// 候補群の最長共通接頭辞
pub fn common_prefix(candidates: &[&str]) -> String {
    let Some((first, rest)) = candidates.split_first() else {
        return String::new();
    };

    let mut end = first.len();
    for candidate in rest {
        end = first
            .char_indices()
            .zip(candidate.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((idx, ch), _)| idx + ch.len_utf8())
            .unwrap_or(0)
            .min(end);
    }
    first[..end].to_string()
}

/// カーソル位置での補完結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub context: CssContext,
    pub items: Vec<String>,
}

impl Completion {
    pub fn prefix(&self) -> &str {
        self.context.prefix()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 文脈判定と候補照合を組み合わせた補完器
#[derive(Debug, Clone)]
pub struct CssCompleter {
    matcher: SuggestionMatcher,
    enabled: bool,
}

impl CssCompleter {
    pub fn new(matcher: SuggestionMatcher) -> Self {
        Self {
            matcher,
            enabled: true,
        }
    }

    /// 無効にすると文脈は判定するが候補は返さない
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn matcher(&self) -> &SuggestionMatcher {
        &self.matcher
    }

    /// カーソル手前のテキストに対する補完候補
    ///
    /// セレクタ補完は行わない。辞書にないプロパティの値は候補なし
    pub fn complete_at(&self, text_before_cursor: &str) -> Result<Completion> {
        let context = CssContext::detect(text_before_cursor);
        if !self.enabled {
            log::debug!("Autocompletion disabled; no items for {:?}", context);
            return Ok(Completion {
                context,
                items: Vec::new(),
            });
        }

        let items: Vec<String> = match &context {
            CssContext::Property { prefix } => self
                .matcher
                .suggest_properties(prefix)
                .into_iter()
                .map(str::to_string)
                .collect(),
            CssContext::Value { property, prefix } => {
                if self.matcher.dictionary().has_property(property) {
                    self.matcher
                        .suggest_values(property, prefix)?
                        .into_iter()
                        .map(str::to_string)
                        .collect()
                } else {
                    log::debug!("No value completion for unknown property {}", property);
                    Vec::new()
                }
            }
            CssContext::Selector { .. } | CssContext::None => Vec::new(),
        };

        Ok(Completion { context, items })
    }
}

impl CompletionEngine for CssCompleter {
    fn complete(&self, input: &str) -> Result<Vec<String>> {
        Ok(self.complete_at(input)?.items)
    }
}
