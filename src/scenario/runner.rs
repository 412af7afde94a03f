//! シナリオ実行
//!
//! 外部のエディタ/ポップアップ（ホスト）にキー入力を送り、各ステップ後の
//! ポップアップ状態を期待値と照合する

use super::{ExpectedPopup, ScenarioStep, StepAction, WaitEvent};
use crate::error::{Result, ScenarioError};

/// ある時点のポップアップ状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopupSnapshot {
    pub open: bool,
    pub item_count: usize,
    pub selected_index: Option<usize>,
}

/// エディタとポップアップの組
pub trait AutocompleteHost {
    /// 操作を送出し、`wait` のイベントが発生するまで待つ
    fn send(&mut self, action: &StepAction, wait: WaitEvent) -> Result<()>;

    /// 現在のポップアップ状態
    fn popup(&self) -> PopupSnapshot;

    /// ポップアップ項目のラベル
    fn item_label(&self, index: usize) -> Option<String>;

    /// カーソル行のカーソル手前までのテキスト
    fn text_before_cursor(&self) -> String;

    /// 補完ポップアップが利用可能か
    fn autocompletion_available(&self) -> bool;
}

/// 1回の実行中の状態
#[derive(Debug, Clone, Default)]
pub struct ScenarioContext {
    /// 現在のステップ番号
    pub step: usize,
    /// 操作送出前にポップアップが開いていたか
    pub popup_open_before: bool,
}

/// 期待値との不一致
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: usize,
    pub action: String,
    pub message: String,
}

/// 実行結果
#[derive(Debug, Clone, Default)]
pub struct ScenarioReport {
    pub steps_run: usize,
    pub failures: Vec<StepFailure>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// シナリオ実行器
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    steps: Vec<ScenarioStep>,
    fail_fast: bool,
}

impl ScenarioRunner {
    pub fn new(steps: Vec<ScenarioStep>) -> Self {
        Self {
            steps,
            fail_fast: false,
        }
    }

    /// 最初の不一致で中断する
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn steps(&self) -> &[ScenarioStep] {
        &self.steps
    }

    /// 全ステップを実行
    pub fn run<H: AutocompleteHost + ?Sized>(&self, host: &mut H) -> Result<ScenarioReport> {
        let mut report = ScenarioReport::default();
        let mut context = ScenarioContext::default();

        for (index, step) in self.steps.iter().enumerate() {
            context.step = index;
            context.popup_open_before = host.popup().open;

            let wait = step.action.wait_event(context.popup_open_before);
            log::info!(
                "pressing {} to get result {:?} for index {}",
                step.action,
                step.expected,
                index
            );
            host.send(&step.action, wait)
                .map_err(|e| ScenarioError::Host {
                    step: index,
                    message: e.detail(),
                })?;

            let failures = check_step(&context, step, host);
            report.steps_run += 1;

            if let Some(first) = failures.first() {
                if self.fail_fast {
                    return Err(ScenarioError::StepFailed {
                        step: first.step,
                        message: first.message.clone(),
                    }
                    .into());
                }
                for failure in &failures {
                    log::warn!("step {} ({}): {}", failure.step, failure.action, failure.message);
                }
            }
            report.failures.extend(failures);
        }

        Ok(report)
    }

    /// 補完が無効化されたホストにポップアップが存在しないことを確認
    pub fn verify_disabled<H: AutocompleteHost + ?Sized>(host: &H) -> Result<()> {
        if host.autocompletion_available() {
            return Err(ScenarioError::PopupWhileDisabled.into());
        }
        Ok(())
    }
}

fn check_step<H: AutocompleteHost + ?Sized>(
    context: &ScenarioContext,
    step: &ScenarioStep,
    host: &H,
) -> Vec<StepFailure> {
    let mut messages = Vec::new();
    let popup = host.popup();

    match &step.expected {
        ExpectedPopup::Open {
            count,
            selected,
            inserted,
        } => {
            if !popup.open {
                messages.push("popup is closed, expected open".to_string());
            } else {
                if popup.item_count != *count {
                    messages.push(format!(
                        "expected {} suggestion(s), popup shows {}",
                        count, popup.item_count
                    ));
                }
                if popup.selected_index != Some(*selected) {
                    messages.push(format!(
                        "expected index {} selected, got {:?}",
                        selected, popup.selected_index
                    ));
                }
                if *inserted {
                    messages.extend(check_inserted(host, *selected));
                }
            }
        }
        ExpectedPopup::Closed { inserted } => {
            if popup.open {
                messages.push("popup is open, expected closed".to_string());
            }
            if let Some(index) = inserted {
                messages.extend(check_inserted(host, *index));
            }
        }
    }

    messages
        .into_iter()
        .map(|message| StepFailure {
            step: context.step,
            action: step.action.to_string(),
            message,
        })
        .collect()
}

fn check_inserted<H: AutocompleteHost + ?Sized>(host: &H, index: usize) -> Option<String> {
    let Some(label) = host.item_label(index) else {
        return Some(format!("no popup item at index {}", index));
    };

    let text = host.text_before_cursor();
    if text.ends_with(&label) {
        None
    } else {
        Some(format!(
            "suggestion {:?} is not inserted before the cursor (line: {:?})",
            label, text
        ))
    }
}
