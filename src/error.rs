//! エラーハンドリングシステム
//!
//! csscomp 全体で使用される統一されたエラー型とユーティリティを定義
//! 不正なキーワード参照は即座にエラーとして返し、既定値で握りつぶさない

use thiserror::Error;

/// クレート全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum CompError {
    /// キーワード辞書エラー
    #[error("Keyword dictionary error")]
    Keyword(#[from] KeywordError),

    /// 設定エラー
    #[error("Configuration error")]
    Config(#[from] ConfigError),

    /// ファイル操作エラー
    #[error("File operation failed")]
    File(#[from] FileError),

    /// 入力処理エラー
    #[error("Input processing failed")]
    Input(#[from] InputError),

    /// シナリオ実行エラー
    #[error("Scenario failed")]
    Scenario(#[from] ScenarioError),
}

/// キーワード辞書固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeywordError {
    /// 値辞書に存在しないプロパティ名での問い合わせ
    #[error("Invalid key: unknown CSS property '{property}'")]
    InvalidKey { property: String },

    #[error("Alias '{alias}' points to unknown property '{target}'")]
    UnknownAliasTarget { alias: String, target: String },

    #[error("Keyword file parse error: {message}")]
    Parse { message: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration file: {path}")]
    InvalidFile { path: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Path expansion failed: {message}")]
    PathExpansion { message: String },
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

/// 入力処理固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid key name: {name}")]
    InvalidKeyName { name: String },
}

/// シナリオ実行固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    /// ホスト（エディタ/ポップアップ）側の失敗
    #[error("Host failed at step {step}: {message}")]
    Host { step: usize, message: String },

    /// 期待状態との不一致（fail_fast 時）
    #[error("Step {step} failed: {message}")]
    StepFailed { step: usize, message: String },

    #[error("Autocompletion popup is available although autocompletion is disabled")]
    PopupWhileDisabled,
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Warning,
    Error,
    Fatal,
}

impl CompError {
    /// 利用者向けのメッセージとレベルを取得
    pub fn user_message(&self) -> (String, ErrorLevel) {
        match self {
            CompError::Keyword(KeywordError::InvalidKey { property }) => (
                format!("未知のCSSプロパティです: {}", property),
                ErrorLevel::Fatal,
            ),
            CompError::Keyword(KeywordError::Parse { message }) => (
                format!("キーワードファイルを解析できません: {}", message),
                ErrorLevel::Error,
            ),
            CompError::File(FileError::NotFound { path }) => {
                (format!("ファイルが見つかりません: {}", path), ErrorLevel::Error)
            }
            CompError::Config(ConfigError::InvalidValue { key, value }) => (
                format!("設定値が不正です: {} = {}", key, value),
                ErrorLevel::Error,
            ),
            CompError::Input(InputError::InvalidKeyName { name }) => {
                (format!("不明なキー名です: {}", name), ErrorLevel::Warning)
            }
            CompError::Scenario(ScenarioError::StepFailed { step, message }) => (
                format!("シナリオのステップ {} が失敗しました: {}", step, message),
                ErrorLevel::Error,
            ),
            _ => (format!("エラーが発生しました: {}", self.detail()), ErrorLevel::Error),
        }
    }

    /// ラップされた内部エラーの詳細文字列
    pub fn detail(&self) -> String {
        match self {
            CompError::Keyword(e) => e.to_string(),
            CompError::Config(e) => e.to_string(),
            CompError::File(e) => e.to_string(),
            CompError::Input(e) => e.to_string(),
            CompError::Scenario(e) => e.to_string(),
        }
    }
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, CompError>;

// std::io::Error から CompError への変換
impl From<std::io::Error> for CompError {
    fn from(error: std::io::Error) -> Self {
        CompError::File(FileError::Io {
            message: error.to_string(),
        })
    }
}

// JSON 解析エラーの変換
impl From<serde_json::Error> for CompError {
    fn from(error: serde_json::Error) -> Self {
        CompError::Keyword(KeywordError::Parse {
            message: error.to_string(),
        })
    }
}
