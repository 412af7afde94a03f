//! 補完シナリオ
//!
//! キー入力の列と、各入力後に期待されるポップアップ状態の定義

pub mod runner;

pub use runner::{
    AutocompleteHost, PopupSnapshot, ScenarioContext, ScenarioReport, ScenarioRunner, StepFailure,
};

use crate::completion::SuggestionMatcher;
use crate::error::Result;
use crate::input::{Key, KeyCode};
use std::fmt;

/// 1ステップで行う操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Accel + Space による補完要求
    RequestSuggestions,
    /// キー押下
    Press(Key),
}

/// 操作後にハーネスが待つエディタイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitEvent {
    /// 候補計算の完了
    AfterSuggest,
    /// カーソル移動
    CursorActivity,
    /// 候補の挿入
    SuggestionEntered,
}

impl StepAction {
    /// キー名から操作を作成。`None` は補完要求
    pub fn from_name(name: Option<&str>) -> Result<Self> {
        match name {
            None => Ok(StepAction::RequestSuggestions),
            Some(name) => Ok(StepAction::Press(Key::from_name(name)?)),
        }
    }

    /// 実際に送出するキー
    pub fn key(&self) -> Key {
        match self {
            StepAction::RequestSuggestions => Key::accel_space(),
            StepAction::Press(key) => key.clone(),
        }
    }

    /// 操作後に待つべきイベント
    ///
    /// ポップアップが閉じている間の Down はカーソル移動として扱われる
    pub fn wait_event(&self, popup_open: bool) -> WaitEvent {
        let key = match self {
            StepAction::RequestSuggestions => return WaitEvent::AfterSuggest,
            StepAction::Press(key) => key,
        };

        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Enter | KeyCode::Home | KeyCode::End => {
                WaitEvent::CursorActivity
            }
            KeyCode::Down if !popup_open => WaitEvent::CursorActivity,
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => WaitEvent::SuggestionEntered,
            _ => WaitEvent::AfterSuggest,
        }
    }
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAction::RequestSuggestions => write!(f, "Accel+Space"),
            StepAction::Press(key) => write!(f, "{}", key),
        }
    }
}

/// 操作後のポップアップの期待状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedPopup {
    /// 閉じている。`inserted` は挿入済みであるべき候補の位置
    Closed { inserted: Option<usize> },
    /// 開いている
    Open {
        count: usize,
        selected: usize,
        /// 選択中の候補がカーソル直前に挿入されているか検証する
        inserted: bool,
    },
}

impl ExpectedPopup {
    pub fn closed() -> Self {
        ExpectedPopup::Closed { inserted: None }
    }

    pub fn open(count: usize, selected: usize) -> Self {
        ExpectedPopup::Open {
            count,
            selected,
            inserted: false,
        }
    }

    pub fn open_inserted(count: usize, selected: usize) -> Self {
        ExpectedPopup::Open {
            count,
            selected,
            inserted: true,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ExpectedPopup::Open { .. })
    }
}

/// シナリオの1ステップ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioStep {
    pub action: StepAction,
    pub expected: ExpectedPopup,
}

impl ScenarioStep {
    pub fn new(action: StepAction, expected: ExpectedPopup) -> Self {
        Self { action, expected }
    }

    /// キー名と期待状態から作成
    pub fn press(name: &str, expected: ExpectedPopup) -> Result<Self> {
        Ok(Self::new(StepAction::from_name(Some(name))?, expected))
    }

    pub fn request(expected: ExpectedPopup) -> Self {
        Self::new(StepAction::RequestSuggestions, expected)
    }
}

/// スタイルエディタ補完の標準シナリオ
///
/// テストページのスタイルシートに対してカーソル移動・補完要求・候補選択を行う。
/// 件数は照合器から計算するため、キーワード辞書に追従する
pub fn style_editor_scenario(matcher: &SuggestionMatcher) -> Result<Vec<ScenarioStep>> {
    use ExpectedPopup as E;

    let closed = E::closed;
    let font = matcher.count_properties("font");
    let b = matcher.count_properties("b");
    let ba = matcher.count_properties("ba");
    let bg_b = matcher.count_values("background", "b")?;
    let bg_bl = matcher.count_values("background", "bl")?;

    // None は補完要求
    let mut table: Vec<(Option<&str>, ExpectedPopup)> = Vec::new();
    table.extend((0..4).map(|_| (Some("VK_RIGHT"), closed())));
    table.extend([
        (None, E::open(1, 0)),
        (Some("VK_LEFT"), closed()),
        (Some("VK_RIGHT"), closed()),
        (Some("VK_DOWN"), closed()),
    ]);
    table.extend((0..3).map(|_| (Some("VK_RIGHT"), closed())));
    table.extend([
        (None, E::open(font, 0)),
        (Some("VK_END"), closed()),
        (Some("VK_RETURN"), closed()),
        (Some("b"), E::open(b, 0)),
        (Some("a"), E::open(ba, 0)),
        (Some("VK_DOWN"), E::open_inserted(ba, 0)),
        (Some("VK_TAB"), E::open_inserted(ba, 1)),
        (Some(":"), closed()),
        (Some("b"), E::open(bg_b, 0)),
        (Some("l"), E::open(bg_bl, 0)),
        (Some("VK_TAB"), E::open_inserted(bg_bl, 0)),
        (Some("VK_DOWN"), E::open_inserted(bg_bl, 1)),
        (Some("VK_UP"), E::open_inserted(bg_bl, 0)),
        (Some("VK_TAB"), E::open_inserted(bg_bl, 1)),
        (Some("VK_TAB"), E::open_inserted(bg_bl, 2)),
        (Some("VK_LEFT"), closed()),
        (Some("VK_RIGHT"), closed()),
        (Some("VK_DOWN"), closed()),
        (Some("VK_RETURN"), closed()),
        // セレクタ補完（テストページ内の要素名）
        (Some("b"), E::open(2, 0)),
        (Some("u"), E::open(1, 0)),
        (Some("VK_RETURN"), E::Closed { inserted: Some(0) }),
        (Some("{"), closed()),
        (Some("VK_HOME"), closed()),
        (Some("VK_DOWN"), closed()),
        (Some("VK_DOWN"), closed()),
    ]);
    table.extend((0..10).map(|_| (Some("VK_RIGHT"), closed())));
    table.push((None, E::open(1, 0)));

    table
        .into_iter()
        .map(|(name, expected)| Ok(ScenarioStep::new(StepAction::from_name(name)?, expected)))
        .collect()
}
