use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fern::colors::{Color, ColoredLevelConfig};
use log::{info, LevelFilter};

mod clock;
mod config;
mod console;
mod intranet;
mod presence_record;
mod presence_store;
mod report;
mod report_command;
mod roster;
mod stats;
mod weekday;

use config::{Config, ConfigArgs};
use console::{ConsoleJson, ConsolePresenter};
use intranet::IntranetClient;
use presence_store::CsvPresenceStore;
use report_command::{ReportArgs, ReportCommand, ReportKind};
use roster::parse_users_xml;

/// 出退勤記録を曜日ごとに集計するCLIアプリケーション。
///
/// # Examples
/// ```
/// $ cargo run -- users
/// $ cargo run -- --data-csv data.csv mean-time-weekday 10
/// $ cargo run -- fetch-users --users-url https://intranet.example.com/api/users.xml
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(
        long = "data-csv",
        value_name = "PATH",
        help = "Presence records csv [env: PRESENCE_DATA_CSV]"
    )]
    data_csv: Option<PathBuf>,

    #[clap(
        long = "users-xml",
        value_name = "PATH",
        help = "Users xml [env: PRESENCE_USERS_XML]"
    )]
    users_xml: Option<PathBuf>,

    #[clap(
        long = "users-url",
        value_name = "URL",
        help = "Where fetch-users downloads the users xml from [env: PRESENCE_USERS_URL]"
    )]
    users_url: Option<String>,

    #[clap(long = "pretty", help = "Pretty-print the json output")]
    pretty: bool,

    #[clap(short = 'v', long = "verbose", help = "Show debug logs")]
    verbose: bool,

    #[clap(subcommand)]
    subcommand: SubCommands,
}

/// サブコマンドを表す列挙型。
#[derive(Debug, Subcommand)]
enum SubCommands {
    /// List users from the users xml
    Users,
    /// Mean presence time of a user grouped by weekday
    MeanTimeWeekday(ReportArgs),
    /// Total presence time of a user grouped by weekday
    PresenceWeekday(ReportArgs),
    /// Mean start and end time of a user grouped by weekday
    PresenceStartEnd(ReportArgs),
    /// Download the users xml and replace the local copy
    FetchUsers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logger(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    })?;

    let config = Config::resolve(ConfigArgs {
        data_csv: args.data_csv,
        users_xml: args.users_xml,
        users_url: args.users_url,
    })
    .context("Failed to resolve configuration")?;

    match args.subcommand {
        SubCommands::Users => {
            let users = parse_users_xml(&config.users_xml)?;
            show(&users, args.pretty)?;
        }
        SubCommands::MeanTimeWeekday(report) => {
            run_report(&config, ReportKind::MeanTimeWeekday, report, args.pretty)?
        }
        SubCommands::PresenceWeekday(report) => {
            run_report(&config, ReportKind::PresenceWeekday, report, args.pretty)?
        }
        SubCommands::PresenceStartEnd(report) => {
            run_report(&config, ReportKind::PresenceStartEnd, report, args.pretty)?
        }
        SubCommands::FetchUsers => fetch_users(&config).await?,
    }

    Ok(())
}

/// ログの出力先と形式を設定する。
fn setup_logger(level: LevelFilter) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .debug(Color::Blue);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("hyper", LevelFilter::Info)
        .level_for("reqwest", LevelFilter::Info)
        .chain(io::stderr())
        .apply()
        .context("Failed to set up logger")
}

/// 標準出力にJSONで表示する。
fn show<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    ConsoleJson::new(&mut stdout, pretty).show(value)
}

/// レポートを作成して表示する。
fn run_report(config: &Config, kind: ReportKind, report: ReportArgs, pretty: bool) -> Result<()> {
    let store = CsvPresenceStore::new(&config.data_csv);
    let command = ReportCommand::new(&store);

    show(&command.run(kind, report), pretty)
}

/// 利用者一覧のXMLをダウンロードし、ローカルのファイルを置き換える。
async fn fetch_users(config: &Config) -> Result<()> {
    let users_url = config
        .users_url
        .as_deref()
        .context("Users url is not configured, set --users-url or PRESENCE_USERS_URL")?;

    let client = IntranetClient::new(users_url);
    let (xml, users) = client
        .download_users()
        .await
        .context("Failed to download users xml")?;

    if let Some(parent) = config.users_xml.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&config.users_xml, xml)
        .with_context(|| format!("Failed to write users xml: {}", config.users_xml.display()))?;
    info!(
        "Saved {} users to {}",
        users.len(),
        config.users_xml.display()
    );

    Ok(())
}
