//! # 时间格式模式转换
//!
//! ## 设计思路
//!
//! 调用方习惯传入 `yyyy-MM-dd HH:mm` 这类字母模式，而 `chrono` 只认 strftime。
//! 本模块把字母模式一次性翻译为 strftime 字符串，并在翻译阶段就拒绝无法表达的写法，
//! 不让非法格式拖到格式化时才 panic。
//!
//! ## 实现思路
//!
//! - 含 `%` 的模式视为 strftime，原样使用（仍做合法性校验）。
//! - 否则用预编译正则把模式切成“同字母连续段 / 引号字面量 / 其他字面量”三类 token。
//! - 每个字母段按长度映射到 strftime 说明符，未知字母直接报错。

use chrono::format::{Item, StrftimeItems};
use once_cell::sync::Lazy;
use regex::Regex;

use super::DateError;

/// 模式分词正则。
///
/// 顺序即优先级：引号字面量 → 已知字母段 → 单个未知字母 → 非字母字面量 → 孤立引号。
static PATTERN_TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"'(?:[^']|'')*'|y+|M+|d+|H+|h+|m+|s+|S+|a+|E+|u+|D+|Z+|z+|X+|[A-Za-z]|[^A-Za-z']+|'",
    )
    .expect("pattern token regex is valid")
});

/// 已校验、已翻译为 strftime 的时间格式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    strftime: String,
}

impl DatePattern {
    /// 解析调用方传入的模式。
    ///
    /// ```rust
    /// use android_util::datetime::DatePattern;
    ///
    /// let p = DatePattern::parse("yyyy-MM-dd HH:mm").unwrap();
    /// assert_eq!(p.as_strftime(), "%Y-%m-%d %H:%M");
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, DateError> {
        let strftime = if pattern.contains('%') {
            pattern.to_string()
        } else {
            translate_letter_pattern(pattern)?
        };

        if StrftimeItems::new(&strftime).any(|item| item == Item::Error) {
            return Err(invalid(pattern, "包含无法识别的 strftime 说明符"));
        }

        Ok(Self {
            source: pattern.to_string(),
            strftime,
        })
    }

    /// 调用方传入的原始模式。
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn as_strftime(&self) -> &str {
        &self.strftime
    }
}

fn invalid(pattern: &str, reason: impl Into<String>) -> DateError {
    DateError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.into(),
    }
}

fn translate_letter_pattern(pattern: &str) -> Result<String, DateError> {
    let mut out = String::with_capacity(pattern.len() * 2);

    for token in PATTERN_TOKENS.find_iter(pattern) {
        let text = token.as_str();

        if text == "'" {
            return Err(invalid(pattern, format!("第 {} 个字符处的引号未闭合", token.start())));
        }

        if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
            let inner = &text[1..text.len() - 1];
            if inner.is_empty() {
                out.push('\'');
            } else {
                out.push_str(&inner.replace("''", "'"));
            }
            continue;
        }

        let Some(letter) = text.chars().next().filter(|c| c.is_ascii_alphabetic()) else {
            out.push_str(text);
            continue;
        };

        out.push_str(letter_specifier(pattern, letter, text.len())?);
    }

    Ok(out)
}

/// 单个字母段 → strftime 说明符。
fn letter_specifier(pattern: &str, letter: char, count: usize) -> Result<&'static str, DateError> {
    let spec = match (letter, count) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('d', 1) => "%-d",
        ('d', _) => "%d",
        ('H', 1) => "%-H",
        ('H', _) => "%H",
        ('h', 1) => "%-I",
        ('h', _) => "%I",
        ('m', 1) => "%-M",
        ('m', _) => "%M",
        ('s', 1) => "%-S",
        ('s', _) => "%S",
        // 不足三位按毫秒输出（补零到三位）
        ('S', 1..=3) => "%3f",
        ('S', 6) => "%6f",
        ('S', 9) => "%9f",
        ('a', _) => "%p",
        ('E', 1..=3) => "%a",
        ('E', _) => "%A",
        ('u', _) => "%u",
        ('D', _) => "%j",
        ('Z', _) => "%z",
        ('z', _) => "%Z",
        ('X', 2) => "%z",
        ('X', 3) => "%:z",
        _ => {
            return Err(invalid(
                pattern,
                format!("不支持的格式字母 '{}'（连续 {} 个）", letter, count),
            ));
        }
    };
    Ok(spec)
}
