use std::array;

use chrono::{Datelike, Weekday};

use crate::clock::{interval, seconds_since_midnight};
use crate::presence_record::UserDataset;

/// 月曜日から日曜日までの曜日の略称。
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// 曜日ごとに値をまとめる入れ物。
///
/// 7曜日分の枠を常に持ち、月曜日から順に並ぶ。
#[derive(Clone, Debug, PartialEq)]
pub struct WeekdayBuckets<T> {
    slots: [T; 7],
}

impl<T: Default> Default for WeekdayBuckets<T> {
    fn default() -> Self {
        Self {
            slots: array::from_fn(|_| T::default()),
        }
    }
}

impl<T> WeekdayBuckets<T> {
    fn get_mut(&mut self, weekday: Weekday) -> &mut T {
        &mut self.slots[weekday.num_days_from_monday() as usize]
    }

    /// 月曜日から順に曜日の略称と値を返す。
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &T)> {
        WEEKDAY_LABELS.into_iter().zip(self.slots.iter())
    }
}

/// 曜日ごとの出勤時刻と退勤時刻。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StartEnd {
    pub starts: Vec<i64>,
    pub ends: Vec<i64>,
}

/// 記録を曜日ごとにまとめ、在席時間(秒)の一覧を返す。
///
/// # Arguments
///
/// * `dataset` - 1ユーザーの記録
pub fn group_by_weekday(dataset: &UserDataset) -> WeekdayBuckets<Vec<i64>> {
    dataset
        .values()
        .fold(WeekdayBuckets::default(), |mut buckets, record| {
            buckets
                .get_mut(record.date.weekday())
                .push(interval(&record.start, &record.end));
            buckets
        })
}

/// 記録を曜日ごとにまとめ、出勤時刻と退勤時刻(0時からの秒数)の一覧を返す。
///
/// # Arguments
///
/// * `dataset` - 1ユーザーの記録
pub fn group_start_end_by_weekday(dataset: &UserDataset) -> WeekdayBuckets<StartEnd> {
    dataset
        .values()
        .fold(WeekdayBuckets::default(), |mut buckets, record| {
            let bucket = buckets.get_mut(record.date.weekday());
            bucket.starts.push(seconds_since_midnight(&record.start));
            bucket.ends.push(seconds_since_midnight(&record.end));
            buckets
        })
}
