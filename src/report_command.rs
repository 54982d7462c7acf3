use log::info;

use crate::presence_record::UserId;
use crate::presence_store::PresenceRepository;
use crate::report::{mean_time_weekday, presence_start_end, presence_weekday, Report};

/// レポートを出力するサブコマンドの引数。
#[derive(Debug, clap::Args)]
pub struct ReportArgs {
    #[clap(help = "Identifier of the user to summarize")]
    user_id: UserId,
}

/// 出力するレポートの種類。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    /// 曜日ごとの平均在席時間
    MeanTimeWeekday,
    /// 曜日ごとの合計在席時間
    PresenceWeekday,
    /// 曜日ごとの平均出勤時刻と平均退勤時刻
    PresenceStartEnd,
}

pub struct ReportCommand<'a, T: PresenceRepository> {
    repository: &'a T,
}

impl<'a, T: PresenceRepository> ReportCommand<'a, T> {
    /// 新しい`ReportCommand`を返す。
    ///
    /// # Arguments
    /// * `repository` - 出退勤記録を読み込むためのリポジトリ
    pub fn new(repository: &'a T) -> Self {
        Self { repository }
    }

    /// レポートを作成する。
    ///
    /// 呼び出しのたびに記録を読み込み直す。
    /// 記録に存在しないユーザーの場合は空のレポートを返す。
    ///
    /// # Arguments
    ///
    /// * `kind` - 作成するレポートの種類
    /// * `args` - サブコマンドの引数
    pub fn run(&self, kind: ReportKind, args: ReportArgs) -> Report {
        let dataset = self.repository.load();
        info!("Building {:?} report for user {}", kind, args.user_id);

        match kind {
            ReportKind::MeanTimeWeekday => {
                Report::MeanTime(mean_time_weekday(&dataset, args.user_id))
            }
            ReportKind::PresenceWeekday => {
                Report::Presence(presence_weekday(&dataset, args.user_id))
            }
            ReportKind::PresenceStartEnd => {
                Report::StartEnd(presence_start_end(&dataset, args.user_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ReportArgs, ReportCommand, ReportKind};
    use crate::presence_record::Dataset;
    use crate::presence_store::{CsvPresenceStore, MockPresenceRepository, PresenceRepository};
    use crate::report::{MeanTimeRow, PresenceRow, Report, StartEndRow};

    const SAMPLE_CSV: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/presence.csv");

    fn sample_repository() -> MockPresenceRepository {
        let mut repository = MockPresenceRepository::new();
        repository
            .expect_load()
            .times(1)
            .returning(|| CsvPresenceStore::new(SAMPLE_CSV).load());
        repository
    }

    #[test]
    fn test_mean_time_weekday() {
        let repository = sample_repository();

        let command = ReportCommand::new(&repository);
        let report = command.run(ReportKind::MeanTimeWeekday, ReportArgs { user_id: 10 });

        let Report::MeanTime(rows) = report else {
            panic!("Unexpected report kind");
        };
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[1], MeanTimeRow("Tue", 30047.0));
        assert_eq!(rows[4], MeanTimeRow("Fri", 0.0));
    }

    #[test]
    fn test_presence_weekday() {
        let repository = sample_repository();

        let command = ReportCommand::new(&repository);
        let report = command.run(ReportKind::PresenceWeekday, ReportArgs { user_id: 10 });

        let Report::Presence(rows) = report else {
            panic!("Unexpected report kind");
        };
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], PresenceRow::Header("Weekday", "Presence (s)"));
        assert_eq!(rows[3], PresenceRow::Weekday("Wed", 24465));
    }

    #[test]
    fn test_presence_start_end() {
        let repository = sample_repository();

        let command = ReportCommand::new(&repository);
        let report = command.run(ReportKind::PresenceStartEnd, ReportArgs { user_id: 10 });

        let Report::StartEnd(rows) = report else {
            panic!("Unexpected report kind");
        };
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[3], StartEndRow("Thu", 38926.0, 62631.0));
    }

    /// 存在しないユーザーの場合はどのレポートも空になることを確認する。
    #[rstest]
    #[case::mean_time(ReportKind::MeanTimeWeekday, Report::MeanTime(vec![]))]
    #[case::presence(ReportKind::PresenceWeekday, Report::Presence(vec![]))]
    #[case::start_end(ReportKind::PresenceStartEnd, Report::StartEnd(vec![]))]
    fn test_unknown_user(#[case] kind: ReportKind, #[case] expected: Report) {
        let repository = sample_repository();

        let command = ReportCommand::new(&repository);

        assert_eq!(command.run(kind, ReportArgs { user_id: 99 }), expected);
    }

    /// 呼び出しのたびに記録を読み込み直すことを確認する。
    #[test]
    fn test_reload_each_run() {
        let mut repository = MockPresenceRepository::new();
        repository
            .expect_load()
            .times(2)
            .returning(Dataset::new);

        let command = ReportCommand::new(&repository);
        command.run(ReportKind::MeanTimeWeekday, ReportArgs { user_id: 10 });
        command.run(ReportKind::PresenceWeekday, ReportArgs { user_id: 10 });
    }
}
