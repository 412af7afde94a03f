//! キー表現
//!
//! ハーネスが合成するキー入力の内部表現と、キー名（`VK_TAB` や `C-x` 形式）の解析

use crate::error::{InputError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// キー入力の内部表現
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
///
/// `accel` は macOS では Cmd、それ以外では Ctrl に相当する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    pub accel: bool,
    pub alt: bool,
    pub shift: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Esc,
}

fn vk_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^VK_([A-Z0-9_]+)$").expect("VK pattern is valid"))
}

impl Key {
    /// 修飾なしキー
    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    /// 文字キー
    pub fn char(ch: char) -> Self {
        Self::plain(KeyCode::Char(ch))
    }

    /// 補完要求（Accel + Space）
    pub fn accel_space() -> Self {
        Self {
            modifiers: KeyModifiers {
                accel: true,
                ..KeyModifiers::default()
            },
            code: KeyCode::Char(' '),
        }
    }

    pub fn is_accel_space(&self) -> bool {
        self.modifiers.accel && self.code == KeyCode::Char(' ')
    }

    /// 挿入可能な文字かどうかを判定
    pub fn is_insertable_char(&self) -> bool {
        matches!(self.code, KeyCode::Char(_)) && !self.modifiers.accel && !self.modifiers.alt
    }

    /// キー名を解析
    ///
    /// `VK_RETURN` 等の仮想キー名、`C-`/`M-`/`S-` 修飾付き表記、単一文字を受け付ける
    pub fn from_name(name: &str) -> Result<Self> {
        let mut modifiers = KeyModifiers::default();
        let mut remaining = name;

        // 修飾キーの解析
        loop {
            if let Some(rest) = remaining.strip_prefix("C-") {
                modifiers.accel = true;
                remaining = rest;
            } else if let Some(rest) = remaining.strip_prefix("M-") {
                modifiers.alt = true;
                remaining = rest;
            } else if let Some(rest) = remaining.strip_prefix("S-") {
                modifiers.shift = true;
                remaining = rest;
            } else {
                break;
            }
        }

        let code = if let Some(captures) = vk_pattern().captures(remaining) {
            match &captures[1] {
                "RETURN" | "ENTER" => KeyCode::Enter,
                "BACK_SPACE" => KeyCode::Backspace,
                "DELETE" => KeyCode::Delete,
                "TAB" => KeyCode::Tab,
                "UP" => KeyCode::Up,
                "DOWN" => KeyCode::Down,
                "LEFT" => KeyCode::Left,
                "RIGHT" => KeyCode::Right,
                "HOME" => KeyCode::Home,
                "END" => KeyCode::End,
                "ESCAPE" => KeyCode::Esc,
                "SPACE" => KeyCode::Char(' '),
                _ => return Err(invalid(name)),
            }
        } else {
            let mut chars = remaining.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return Err(invalid(name)),
            }
        };

        Ok(Self { modifiers, code })
    }
}

fn invalid(name: &str) -> crate::error::CompError {
    InputError::InvalidKeyName {
        name: name.to_string(),
    }
    .into()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.accel {
            write!(f, "C-")?;
        }
        if self.modifiers.alt {
            write!(f, "M-")?;
        }
        if self.modifiers.shift {
            write!(f, "S-")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "VK_SPACE"),
            KeyCode::Char(ch) => write!(f, "{}", ch),
            KeyCode::Enter => write!(f, "VK_RETURN"),
            KeyCode::Backspace => write!(f, "VK_BACK_SPACE"),
            KeyCode::Delete => write!(f, "VK_DELETE"),
            KeyCode::Tab => write!(f, "VK_TAB"),
            KeyCode::Up => write!(f, "VK_UP"),
            KeyCode::Down => write!(f, "VK_DOWN"),
            KeyCode::Left => write!(f, "VK_LEFT"),
            KeyCode::Right => write!(f, "VK_RIGHT"),
            KeyCode::Home => write!(f, "VK_HOME"),
            KeyCode::End => write!(f, "VK_END"),
            KeyCode::Esc => write!(f, "VK_ESCAPE"),
        }
    }
}
