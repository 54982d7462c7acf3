use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};

use crate::presence_record::{Dataset, PresenceRecord, UserId};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// 出退勤記録を読み込むためのtrait。
#[cfg_attr(test, mockall::automock)]
pub trait PresenceRepository {
    /// 全ユーザーの記録を読み込む。
    ///
    /// 読み込みに失敗した場合でもエラーにはせず、空のデータセットを返す。
    fn load(&self) -> Dataset;
}

/// `user_id,date,start,end`形式のCSVファイルから記録を読み込む。
///
/// 呼び出しのたびにファイル全体を読み直す。
///
/// # Examples
///
/// ```
/// let store = CsvPresenceStore::new("data.csv");
/// let dataset = store.load();
/// ```
pub struct CsvPresenceStore {
    path: PathBuf,
}

impl CsvPresenceStore {
    /// 新しい`CsvPresenceStore`を返す。
    ///
    /// # Arguments
    ///
    /// * `path` - 読み込むCSVファイルのパス
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PresenceRepository for CsvPresenceStore {
    fn load(&self) -> Dataset {
        let mut dataset = Dataset::new();

        let mut reader = match ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_path(&self.path)
        {
            Ok(reader) => reader,
            Err(err) => {
                warn!(
                    "Failed to open presence data {}: {}",
                    self.path.display(),
                    err
                );
                return dataset;
            }
        };

        for row in reader.records() {
            let record = match row {
                Ok(record) => record,
                Err(err) if err.is_io_error() => {
                    warn!("Failed to read presence data {}: {}", self.path.display(), err);
                    break;
                }
                Err(err) => {
                    debug!("Skipping unreadable row: {}", err);
                    continue;
                }
            };
            let line = record.position().map_or(0, |position| position.line());
            match parse_record(&record) {
                Ok((user_id, record)) => {
                    // 同じ日付が重複した場合は後の行で上書きする
                    dataset.entry(user_id).or_default().insert(record.date, record);
                }
                Err(err) => debug!("Skipping line {}: {:#}", line, err),
            }
        }

        info!(
            "Loaded presence data for {} users from {}",
            dataset.len(),
            self.path.display()
        );

        dataset
    }
}

/// CSVの1行を記録に変換する。
fn parse_record(record: &StringRecord) -> Result<(UserId, PresenceRecord)> {
    if record.len() != 4 {
        bail!("Expected 4 fields, found {}", record.len());
    }

    let user_id = record[0]
        .parse::<UserId>()
        .with_context(|| format!("Failed to parse user id: {}", &record[0]))?;
    let date = NaiveDate::parse_from_str(&record[1], DATE_FORMAT)
        .with_context(|| format!("Failed to parse date: {}", &record[1]))?;
    let start = NaiveTime::parse_from_str(&record[2], TIME_FORMAT)
        .with_context(|| format!("Failed to parse start time: {}", &record[2]))?;
    let end = NaiveTime::parse_from_str(&record[3], TIME_FORMAT)
        .with_context(|| format!("Failed to parse end time: {}", &record[3]))?;

    Ok((user_id, PresenceRecord { date, start, end }))
}
