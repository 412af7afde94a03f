//! csscomp - CSS property/value autocompletion oracle
//!
//! スタイルエディタの補完ポップアップが表示すべき候補を、キーワード辞書から
//! 前方一致と表示上限で求める。エディタとポップアップは外部のホストとして扱う

// コアモジュール
pub mod config;
pub mod error;
pub mod logging;

// データ層
pub mod keywords;

// ロジック層
pub mod completion;
pub mod input;

// 検証層
pub mod scenario;

// 公開API
pub use completion::{CssCompleter, SuggestionMatcher, DEFAULT_MAX_SUGGESTIONS};
pub use config::CompletionConfig;
pub use error::{CompError, Result};
pub use keywords::{AliasMode, KeywordDictionary, KeywordSource, StaticKeywordSource};
pub use scenario::{style_editor_scenario, AutocompleteHost, ScenarioRunner};
