//! シナリオテスト用ユーティリティ
//!
//! - 行末入力のみを扱う簡易エディタと補完ポップアップのホスト
//! - キーワード辞書のフィクスチャ

#![allow(dead_code)]

use csscomp::error::ScenarioError;
use csscomp::input::KeyCode;
use csscomp::scenario::{PopupSnapshot, StepAction, WaitEvent};
use csscomp::{
    AliasMode, AutocompleteHost, CompError, CssCompleter, KeywordDictionary, Result,
    StaticKeywordSource, SuggestionMatcher,
};

/// テスト用キーワード辞書
pub fn fixture_source() -> StaticKeywordSource {
    let borders = (0..20).map(|i| format!("border-x{:02}", i));
    StaticKeywordSource::new()
        .with_property("backface-visibility", ["hidden", "visible"])
        .with_property(
            "background",
            ["black", "blue", "blur(1px)", "border-box", "none"],
        )
        .with_property("background-color", ["black", "blue", "transparent"])
        .with_property("display", ["block", "flex", "none"])
        .with_property_names(["border", "font", "font-size"])
        .with_property_names(borders)
}

pub fn fixture_matcher() -> SuggestionMatcher {
    SuggestionMatcher::new(KeywordDictionary::load(&fixture_source(), AliasMode::Include))
}

/// ポップアップの内部状態
#[derive(Debug, Clone, Default)]
struct PopupModel {
    open: bool,
    items: Vec<String>,
    selected: usize,
    /// 接頭辞の開始位置（バイト）
    token_start: usize,
    inserted: bool,
}

/// 行末にのみ入力できる簡易エディタ
pub struct LineEditorHost {
    completer: CssCompleter,
    text: String,
    popup: PopupModel,
}

impl LineEditorHost {
    pub fn new(matcher: SuggestionMatcher, initial: &str) -> Self {
        Self {
            completer: CssCompleter::new(matcher),
            text: initial.to_string(),
            popup: PopupModel::default(),
        }
    }

    /// 補完を無効化したホスト
    pub fn disabled(matcher: SuggestionMatcher, initial: &str) -> Self {
        Self {
            completer: CssCompleter::new(matcher).with_enabled(false),
            text: initial.to_string(),
            popup: PopupModel::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn suggest(&mut self, explicit: bool) -> Result<()> {
        let completion = self.completer.complete_at(&self.text)?;
        if completion.is_empty() || (!explicit && completion.prefix().is_empty()) {
            self.popup.open = false;
            return Ok(());
        }
        self.popup = PopupModel {
            open: true,
            token_start: self.text.len() - completion.prefix().len(),
            items: completion.items,
            selected: 0,
            inserted: false,
        };
        Ok(())
    }

    fn navigate(&mut self, forward: bool) {
        let count = self.popup.items.len();
        if !self.popup.inserted {
            self.popup.inserted = true;
        } else if forward {
            self.popup.selected = (self.popup.selected + 1) % count;
        } else {
            self.popup.selected = (self.popup.selected + count - 1) % count;
        }
        self.text.truncate(self.popup.token_start);
        self.text.push_str(&self.popup.items[self.popup.selected]);
    }

    fn perform(&mut self, action: &StepAction) -> Result<WaitEvent> {
        let key = action.key();
        if key.is_accel_space() {
            self.suggest(true)?;
            return Ok(WaitEvent::AfterSuggest);
        }

        let fired = match key.code {
            KeyCode::Char(ch) if key.is_insertable_char() => {
                self.text.push(ch);
                self.suggest(false)?;
                WaitEvent::AfterSuggest
            }
            KeyCode::Tab | KeyCode::Down if self.popup.open => {
                self.navigate(true);
                WaitEvent::SuggestionEntered
            }
            KeyCode::Up if self.popup.open => {
                self.navigate(false);
                WaitEvent::SuggestionEntered
            }
            KeyCode::Enter => {
                if self.popup.open {
                    if !self.popup.inserted {
                        self.navigate(true);
                    }
                    self.popup.open = false;
                } else {
                    self.text.push('\n');
                }
                WaitEvent::CursorActivity
            }
            _ => {
                self.popup.open = false;
                WaitEvent::CursorActivity
            }
        };
        Ok(fired)
    }
}

impl AutocompleteHost for LineEditorHost {
    fn send(&mut self, action: &StepAction, wait: WaitEvent) -> Result<()> {
        let fired = self.perform(action)?;
        if fired != wait {
            return Err(CompError::Scenario(ScenarioError::Host {
                step: 0,
                message: format!("waited for {:?} but editor fired {:?}", wait, fired),
            }));
        }
        Ok(())
    }

    fn popup(&self) -> PopupSnapshot {
        if !self.popup.open {
            return PopupSnapshot::default();
        }
        PopupSnapshot {
            open: true,
            item_count: self.popup.items.len(),
            selected_index: Some(self.popup.selected),
        }
    }

    fn item_label(&self, index: usize) -> Option<String> {
        self.popup.items.get(index).cloned()
    }

    fn text_before_cursor(&self) -> String {
        self.text.rsplit('\n').next().unwrap_or_default().to_string()
    }

    fn autocompletion_available(&self) -> bool {
        self.completer.is_enabled()
    }
}
