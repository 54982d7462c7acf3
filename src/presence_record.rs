use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

pub type UserId = u32;

/// 1日分の出退勤記録。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresenceRecord {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// 1ユーザーの日付ごとの記録。日付順に並ぶ。
pub type UserDataset = BTreeMap<NaiveDate, PresenceRecord>;

/// 全ユーザーの記録。
pub type Dataset = BTreeMap<UserId, UserDataset>;
