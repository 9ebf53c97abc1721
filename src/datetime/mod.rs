//! # 时间戳与时间字符串互转
//!
//! ## 设计思路
//!
//! - 时间戳统一为“自 Unix 纪元起的毫秒数”（`i64`）。
//! - 默认按本地时区格式化/解析；`*_in` 版本接受任意 `chrono::TimeZone`，便于测试与服务端使用。
//! - 解析失败返回 `DateError`；仅为兼容旧调用方保留 `string_to_timestamp_or_sentinel`。
//!
//! ## 实现思路
//!
//! 模式先经 [`DatePattern`] 翻译与校验，再交给 `chrono` 处理。
//! 解析先把文本读入 `chrono::format::Parsed`，缺失的字段按纪元补齐：
//! 年 1970、月 1、日 1、时分秒 0。因此 `yyyy-MM`、`HH` 这类粗粒度模式也能解析。
//! 文本只需前缀匹配模式，剩余部分忽略。

mod pattern;

use std::fmt::{self, Write as _};

use chrono::format::{self, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, Local, MappedLocalTime, NaiveDateTime, Offset, TimeDelta, TimeZone};

pub use pattern::DatePattern;

/// 解析失败时兼容接口返回的哨兵值。
///
/// 注意：`-1` 同时也是合法时间戳 `1969-12-31T23:59:59.999Z`，两者无法区分。
/// 新代码请使用返回 `Result` 的 [`string_to_timestamp`]。
pub const PARSE_FAILED_SENTINEL: i64 = -1;

/// 时间转换错误。
#[derive(Debug, thiserror::Error)]
pub enum DateError {
    #[error("无效的时间格式 '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("时间字符串 '{text}' 与格式 '{pattern}' 不匹配: {source}")]
    Parse {
        text: String,
        pattern: String,
        source: chrono::ParseError,
    },

    #[error("时间戳超出可表示范围: {0}")]
    OutOfRange(i64),

    #[error("本地时间不存在（夏令时跳变）: {0}")]
    NonexistentLocalTime(String),
}

/// 按本地时区把毫秒时间戳格式化为字符串。
///
/// # 参数
/// * `millis`  - 时间戳（毫秒）
/// * `pattern` - 目标格式，如 `yyyy-MM-dd HH:mm:ss`
pub fn timestamp_to_string(millis: i64, pattern: &str) -> Result<String, DateError> {
    timestamp_to_string_in(millis, pattern, &Local)
}

/// 在指定时区下格式化毫秒时间戳。
///
/// ```rust
/// use android_util::datetime::timestamp_to_string_in;
/// use chrono::Utc;
///
/// let text = timestamp_to_string_in(0, "yyyy-MM-dd HH:mm:ss", &Utc).unwrap();
/// assert_eq!(text, "1970-01-01 00:00:00");
/// ```
pub fn timestamp_to_string_in<Tz>(millis: i64, pattern: &str, tz: &Tz) -> Result<String, DateError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let pattern = DatePattern::parse(pattern)?;
    let utc = DateTime::from_timestamp_millis(millis).ok_or(DateError::OutOfRange(millis))?;
    let zoned = utc.with_timezone(tz);

    let mut out = String::new();
    write!(out, "{}", zoned.format(pattern.as_strftime())).map_err(|_| DateError::InvalidPattern {
        pattern: pattern.source().to_string(),
        reason: "格式化时无法输出该说明符".to_string(),
    })?;
    Ok(out)
}

/// 按本地时区把时间字符串解析为毫秒时间戳。
///
/// # 参数
/// * `text`    - 如 `2015-10-01 10:20`
/// * `pattern` - 如 `yyyy-MM-dd HH:mm`
///
/// 本地时间落在夏令时跳变的空档内时，按跳变前的偏移换算，结果相当于向后顺延空档长度。
pub fn string_to_timestamp(text: &str, pattern: &str) -> Result<i64, DateError> {
    string_to_timestamp_in(text, pattern, &Local)
}

/// 在指定时区下解析时间字符串。
///
/// 模式中含时区偏移（`Z` / `XXX` / `%z`）时以字符串里的偏移为准，忽略 `tz`。
///
/// ```rust
/// use android_util::datetime::string_to_timestamp_in;
/// use chrono::Utc;
///
/// // 缺失的日按 1 号补齐
/// let millis = string_to_timestamp_in("2015-10", "yyyy-MM", &Utc).unwrap();
/// assert_eq!(millis, 1_443_657_600_000);
/// ```
pub fn string_to_timestamp_in<Tz: TimeZone>(text: &str, pattern: &str, tz: &Tz) -> Result<i64, DateError> {
    let pattern = DatePattern::parse(pattern)?;
    let parse_error = |source| DateError::Parse {
        text: text.to_string(),
        pattern: pattern.source().to_string(),
        source,
    };

    let mut parsed = Parsed::new();
    let rest = format::parse_and_remainder(&mut parsed, text, StrftimeItems::new(pattern.as_strftime()))
        .map_err(parse_error)?;
    if !rest.is_empty() {
        log::debug!("时间字符串 '{}' 末尾的 '{}' 未参与解析", text, rest);
    }
    fill_epoch_defaults(&mut parsed).map_err(parse_error)?;

    if parsed.offset().is_some() {
        return parsed
            .to_datetime()
            .map(|dt| dt.timestamp_millis())
            .map_err(parse_error);
    }

    let naive = parsed.to_naive_datetime_with_offset(0).map_err(parse_error)?;
    if parsed.timestamp().is_some() {
        return Ok(naive.and_utc().timestamp_millis());
    }

    resolve_local(&naive, tz)
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| DateError::NonexistentLocalTime(text.to_string()))
}

/// 兼容接口：解析失败时记录日志并返回 [`PARSE_FAILED_SENTINEL`]。
pub fn string_to_timestamp_or_sentinel(text: &str, pattern: &str) -> i64 {
    match string_to_timestamp(text, pattern) {
        Ok(millis) => millis,
        Err(err) => {
            log::warn!("⚠️ 时间解析失败，返回哨兵值 {}: {}", PARSE_FAILED_SENTINEL, err);
            PARSE_FAILED_SENTINEL
        }
    }
}

/// 按纪元补齐模式里没有出现的字段。
///
/// 秒级时间戳（`%s`）自带完整时间，不补；有序日（`D`）或周数时不补月日。
fn fill_epoch_defaults(parsed: &mut Parsed) -> ParseResult<()> {
    if parsed.timestamp().is_some() {
        return Ok(());
    }

    let has_year = parsed.year().is_some()
        || parsed.year_div_100().is_some()
        || parsed.year_mod_100().is_some()
        || parsed.isoyear().is_some();
    if !has_year {
        parsed.set_year(1970)?;
    }

    let has_week = parsed.week_from_sun().is_some() || parsed.week_from_mon().is_some() || parsed.isoweek().is_some();
    if parsed.ordinal().is_none() && !has_week {
        if parsed.month().is_none() {
            parsed.set_month(1)?;
        }
        if parsed.day().is_none() {
            parsed.set_day(1)?;
        }
    }

    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, None) => parsed.set_hour(0)?,
        // 只有 `hh` 没有 `a` 时按上午
        (None, Some(_)) => parsed.set_ampm(false)?,
        // 只有 `a` 时按 12 点
        (Some(_), None) => parsed.set_hour12(12)?,
        (Some(_), Some(_)) => {}
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    if parsed.second().is_none() {
        parsed.set_second(0)?;
    }
    Ok(())
}

/// 本地时间 → 时区时间。重叠时取较早的一个；落在跳变空档时按一天前的偏移换算。
fn resolve_local<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(naive) {
        MappedLocalTime::Single(dt) | MappedLocalTime::Ambiguous(dt, _) => Some(dt),
        MappedLocalTime::None => {
            let before = tz
                .from_local_datetime(&naive.checked_sub_signed(TimeDelta::days(1))?)
                .earliest()?;
            let offset = before.offset().fix();
            let utc = naive.checked_sub_offset(offset)?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, Utc};

    /// 1970-01-01 02:00 UTC 起由 +00:00 跳到 +01:00，本地 02:00–03:00 不存在。
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    const SWITCH_SECS: i64 = 2 * 3600;

    impl SpringForward {
        fn before() -> FixedOffset {
            FixedOffset::east_opt(0).expect("offset")
        }

        fn after() -> FixedOffset {
            FixedOffset::east_opt(3600).expect("offset")
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, _: &NaiveDate) -> MappedLocalTime<FixedOffset> {
            MappedLocalTime::Single(Self::before())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> MappedLocalTime<FixedOffset> {
            let secs = local.and_utc().timestamp();
            if secs < SWITCH_SECS {
                MappedLocalTime::Single(Self::before())
            } else if secs < SWITCH_SECS + 3600 {
                MappedLocalTime::None
            } else {
                MappedLocalTime::Single(Self::after())
            }
        }

        fn offset_from_utc_date(&self, _: &NaiveDate) -> FixedOffset {
            Self::before()
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if utc.and_utc().timestamp() < SWITCH_SECS {
                Self::before()
            } else {
                Self::after()
            }
        }
    }

    #[test]
    fn formats_epoch_in_utc() {
        let text = timestamp_to_string_in(0, "yyyy-MM-dd HH:mm:ss", &Utc).expect("format");
        assert_eq!(text, "1970-01-01 00:00:00");
    }

    #[test]
    fn formats_with_fixed_offset() {
        let east8 = FixedOffset::east_opt(8 * 3600).expect("offset");
        let text = timestamp_to_string_in(0, "yyyy-MM-dd HH:mm", &east8).expect("format");
        assert_eq!(text, "1970-01-01 08:00");
    }

    #[test]
    fn formats_milliseconds() {
        let text = timestamp_to_string_in(1_026, "ss.SSS", &Utc).expect("format");
        assert_eq!(text, "01.026");
    }

    #[test]
    fn parses_minute_precision_text() {
        let millis = string_to_timestamp_in("2015-10-01 10:20", "yyyy-MM-dd HH:mm", &Utc).expect("parse");
        assert_eq!(millis, 1_443_694_800_000);
    }

    #[test]
    fn date_only_pattern_parses_to_midnight() {
        let millis = string_to_timestamp_in("2015-10-01", "yyyy-MM-dd", &Utc).expect("parse");
        assert_eq!(millis, 1_443_657_600_000);
    }

    #[test]
    fn time_only_pattern_parses_on_epoch_day() {
        let millis = string_to_timestamp_in("10:20", "HH:mm", &Utc).expect("parse");
        assert_eq!(millis, 37_200_000);
    }

    #[test]
    fn year_only_pattern_parses_to_new_year() {
        let millis = string_to_timestamp_in("2015", "yyyy", &Utc).expect("parse");
        assert_eq!(millis, 1_420_070_400_000);
    }

    #[test]
    fn year_month_pattern_parses_to_first_day() {
        let millis = string_to_timestamp_in("2015-10", "yyyy-MM", &Utc).expect("parse");
        assert_eq!(millis, 1_443_657_600_000);
        assert_eq!(timestamp_to_string_in(millis, "yyyy-MM", &Utc).expect("format"), "2015-10");
    }

    #[test]
    fn month_day_pattern_parses_in_epoch_year() {
        let millis = string_to_timestamp_in("10-01", "MM-dd", &Utc).expect("parse");
        assert_eq!(millis, 23_587_200_000);
    }

    #[test]
    fn hour_only_pattern_parses_on_epoch_day() {
        let millis = string_to_timestamp_in("10", "HH", &Utc).expect("parse");
        assert_eq!(millis, 36_000_000);
    }

    #[test]
    fn twelve_hour_clock_without_marker_is_morning() {
        let millis = string_to_timestamp_in("10:20", "hh:mm", &Utc).expect("parse");
        assert_eq!(millis, 37_200_000);
        let pm = string_to_timestamp_in("10:20 PM", "hh:mm a", &Utc).expect("parse");
        assert_eq!(pm, 37_200_000 + 12 * 3_600_000);
    }

    #[test]
    fn trailing_text_after_pattern_is_ignored() {
        let millis = string_to_timestamp_in("2015-10-01 10:20:30", "yyyy-MM-dd", &Utc).expect("parse");
        assert_eq!(millis, 1_443_657_600_000);
    }

    #[test]
    fn local_time_in_dst_gap_moves_forward() {
        // 02:30 不存在，按跳变前的 +00:00 换算，得到 UTC 02:30，即本地 03:30
        let millis = string_to_timestamp_in("1970-01-01 02:30", "yyyy-MM-dd HH:mm", &SpringForward).expect("parse");
        assert_eq!(millis, 9_000_000);
        assert_eq!(
            timestamp_to_string_in(millis, "HH:mm", &SpringForward).expect("format"),
            "03:30"
        );
    }

    #[test]
    fn time_after_dst_gap_uses_new_offset() {
        let millis = string_to_timestamp_in("1970-01-01 04:00", "yyyy-MM-dd HH:mm", &SpringForward).expect("parse");
        assert_eq!(millis, 3 * 3_600_000);
    }

    #[test]
    fn explicit_offset_in_text_wins() {
        let millis = string_to_timestamp_in(
            "1970-01-01T08:00:00+08:00",
            "yyyy-MM-dd'T'HH:mm:ssXXX",
            &Utc,
        )
        .expect("parse");
        assert_eq!(millis, 0);
    }

    #[test]
    fn mismatched_text_is_a_parse_error() {
        let err = string_to_timestamp_in("2015/10/01", "yyyy-MM-dd", &Utc).unwrap_err();
        assert!(matches!(err, DateError::Parse { .. }));
    }

    #[test]
    fn sentinel_helper_returns_minus_one_on_failure() {
        assert_eq!(string_to_timestamp_or_sentinel("not a date", "yyyy-MM-dd"), PARSE_FAILED_SENTINEL);
        assert_eq!(string_to_timestamp_or_sentinel("2015-10-01", "yyyy-MM-dd G"), -1);
    }

    #[test]
    fn out_of_range_timestamp_is_rejected() {
        let err = timestamp_to_string_in(i64::MAX, "yyyy", &Utc).unwrap_err();
        assert!(matches!(err, DateError::OutOfRange(i64::MAX)));
    }

    #[test]
    fn local_round_trip_matches() {
        let pattern = "yyyy-MM-dd HH:mm:ss";
        let text = timestamp_to_string(1_443_694_800_000, pattern).expect("format");
        let millis = string_to_timestamp(&text, pattern).expect("parse");
        assert_eq!(timestamp_to_string(millis, pattern).expect("format"), text);
    }
}
