//! カーソル位置の文脈判定
//!
//! カーソル手前のCSSテキストを走査し、セレクタ・プロパティ名・値のどの名前空間で
//! 入力中かと、その接頭辞を求める

use regex::Regex;
use std::sync::OnceLock;

/// 入力中の名前空間
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssContext {
    /// ルールブロック外（セレクタ）
    Selector { prefix: String },
    /// ブロック内のプロパティ名
    Property { prefix: String },
    /// `property:` 以降の値
    Value { property: String, prefix: String },
    /// コメント・文字列内など補完対象外
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Selector,
    Property,
    Value,
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^-?[A-Za-z_-][A-Za-z0-9_-]*$").expect("identifier pattern is valid")
    })
}

fn is_token_char(ch: char) -> bool {
    !ch.is_whitespace() && !matches!(ch, ',' | '(' | ')' | '/' | ':' | ';' | '{' | '}')
}

fn trailing_token(segment: &str) -> String {
    let start = segment
        .char_indices()
        .rev()
        .find(|(_, ch)| !is_token_char(*ch))
        .map(|(idx, ch)| idx + ch.len_utf8())
        .unwrap_or(0);
    segment[start..].to_string()
}

impl CssContext {
    /// カーソル手前のテキストから文脈を判定
    pub fn detect(text_before_cursor: &str) -> Self {
        let mut state = ScanState::Selector;
        let mut depth = 0usize;
        // 現在の状態が始まったバイト位置
        let mut segment_start = 0usize;
        let mut property = String::new();
        let mut chars = text_before_cursor.char_indices().peekable();

        while let Some((idx, ch)) = chars.next() {
            match ch {
                '/' if matches!(chars.peek(), Some((_, '*'))) => {
                    chars.next();
                    let mut end = None;
                    while let Some((_, c)) = chars.next() {
                        if c == '*' {
                            if let Some((slash, '/')) = chars.peek().copied() {
                                chars.next();
                                end = Some(slash + 1);
                                break;
                            }
                        }
                    }
                    let Some(end) = end else {
                        return CssContext::None;
                    };
                    // 空白とコメントだけが先行する場合は接頭辞に含めない
                    if text_before_cursor[segment_start..idx].trim().is_empty() {
                        segment_start = end;
                    }
                }
                '"' | '\'' => {
                    let mut closed = false;
                    while let Some((_, c)) = chars.next() {
                        if c == '\\' {
                            chars.next();
                        } else if c == ch {
                            closed = true;
                            break;
                        }
                    }
                    if !closed {
                        return CssContext::None;
                    }
                }
                '{' => {
                    depth += 1;
                    state = ScanState::Property;
                    segment_start = idx + 1;
                }
                '}' => {
                    depth = depth.saturating_sub(1);
                    state = if depth == 0 {
                        ScanState::Selector
                    } else {
                        ScanState::Property
                    };
                    segment_start = idx + 1;
                }
                ';' if depth > 0 => {
                    state = ScanState::Property;
                    segment_start = idx + 1;
                }
                ':' if state == ScanState::Property => {
                    property = text_before_cursor[segment_start..idx].trim().to_string();
                    state = ScanState::Value;
                    segment_start = idx + 1;
                }
                _ => {}
            }
        }

        let segment = &text_before_cursor[segment_start..];
        match state {
            ScanState::Selector => CssContext::Selector {
                prefix: trailing_token(segment),
            },
            ScanState::Property => {
                let prefix = segment.trim_start();
                if prefix.chars().any(char::is_whitespace) {
                    return CssContext::None;
                }
                CssContext::Property {
                    prefix: prefix.to_string(),
                }
            }
            ScanState::Value => {
                if !identifier_pattern().is_match(&property) {
                    return CssContext::None;
                }
                CssContext::Value {
                    property,
                    prefix: trailing_token(segment),
                }
            }
        }
    }

    /// 入力中の接頭辞
    pub fn prefix(&self) -> &str {
        match self {
            CssContext::Selector { prefix }
            | CssContext::Property { prefix }
            | CssContext::Value { prefix, .. } => prefix,
            CssContext::None => "",
        }
    }
}
