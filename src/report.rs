use log::debug;
use serde::Serialize;

use crate::presence_record::{Dataset, UserDataset, UserId};
use crate::stats::{mean, total};
use crate::weekday::{group_by_weekday, group_start_end_by_weekday};

/// 曜日ごとの平均在席時間(秒)。
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeanTimeRow(pub &'static str, pub f64);

/// 曜日ごとの合計在席時間(秒)。先頭に見出し行を持つ。
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PresenceRow {
    Header(&'static str, &'static str),
    Weekday(&'static str, i64),
}

/// 曜日ごとの平均出勤時刻と平均退勤時刻(0時からの秒数)。
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StartEndRow(pub &'static str, pub f64, pub f64);

/// 出力するレポート。各行はJSONの配列として出力される。
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    MeanTime(Vec<MeanTimeRow>),
    Presence(Vec<PresenceRow>),
    StartEnd(Vec<StartEndRow>),
}

pub const PRESENCE_HEADER: PresenceRow = PresenceRow::Header("Weekday", "Presence (s)");

/// 指定したユーザーの記録を返す。存在しない場合は`None`を返す。
fn user_dataset(dataset: &Dataset, user_id: UserId) -> Option<&UserDataset> {
    let user = dataset.get(&user_id);
    if user.is_none() {
        debug!("User {} not found!", user_id);
    }
    user
}

/// 曜日ごとの平均在席時間を返す。
///
/// ユーザーが存在しない場合は空のレポートを返す。
///
/// # Arguments
///
/// * `dataset` - 全ユーザーの記録
/// * `user_id` - 対象のユーザー
pub fn mean_time_weekday(dataset: &Dataset, user_id: UserId) -> Vec<MeanTimeRow> {
    let Some(user) = user_dataset(dataset, user_id) else {
        return vec![];
    };

    group_by_weekday(user)
        .iter()
        .map(|(label, intervals)| MeanTimeRow(label, mean(intervals)))
        .collect()
}

/// 曜日ごとの合計在席時間を、見出し行を先頭に付けて返す。
///
/// ユーザーが存在しない場合は見出し行も含めず空のレポートを返す。
///
/// # Arguments
///
/// * `dataset` - 全ユーザーの記録
/// * `user_id` - 対象のユーザー
pub fn presence_weekday(dataset: &Dataset, user_id: UserId) -> Vec<PresenceRow> {
    let Some(user) = user_dataset(dataset, user_id) else {
        return vec![];
    };

    let weekdays = group_by_weekday(user);
    std::iter::once(PRESENCE_HEADER)
        .chain(
            weekdays
                .iter()
                .map(|(label, intervals)| PresenceRow::Weekday(label, total(intervals))),
        )
        .collect()
}

/// 曜日ごとの平均出勤時刻と平均退勤時刻を返す。
///
/// ユーザーが存在しない場合は空のレポートを返す。
pub fn presence_start_end(dataset: &Dataset, user_id: UserId) -> Vec<StartEndRow> {
    let Some(user) = user_dataset(dataset, user_id) else {
        return vec![];
    };

    group_start_end_by_weekday(user)
        .iter()
        .map(|(label, bucket)| StartEndRow(label, mean(&bucket.starts), mean(&bucket.ends)))
        .collect()
}
