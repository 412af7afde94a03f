//! 入力処理モジュール
//!
//! ハーネスが送出するキー入力の表現

pub mod keybinding;

// 公開API
pub use keybinding::{Key, KeyCode, KeyModifiers};
