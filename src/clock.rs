use chrono::{NaiveTime, Timelike};

/// 0時からの経過秒数を返す。
pub fn seconds_since_midnight(time: &NaiveTime) -> i64 {
    i64::from(time.hour()) * 3600 + i64::from(time.minute()) * 60 + i64::from(time.second())
}

/// 2つの時刻の間隔を秒で返す。
///
/// `end`が`start`より前の場合は負の値になる。
///
/// # Arguments
///
/// * `start` - 開始時刻
/// * `end` - 終了時刻
pub fn interval(start: &NaiveTime, end: &NaiveTime) -> i64 {
    seconds_since_midnight(end) - seconds_since_midnight(start)
}
