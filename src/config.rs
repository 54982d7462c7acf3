use std::{env, path::PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "presence-analyzer";
const DATA_CSV_ENV: &str = "PRESENCE_DATA_CSV";
const USERS_XML_ENV: &str = "PRESENCE_USERS_XML";
const USERS_URL_ENV: &str = "PRESENCE_USERS_URL";

/// 読み込むファイルの場所などの設定。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub data_csv: PathBuf,
    pub users_xml: PathBuf,
    pub users_url: Option<String>,
}

/// コマンドラインで指定された設定。
#[derive(Clone, Debug, Default)]
pub struct ConfigArgs {
    pub data_csv: Option<PathBuf>,
    pub users_xml: Option<PathBuf>,
    pub users_url: Option<String>,
}

impl Config {
    /// コマンドライン引数、環境変数、既定値の順に設定を決める。
    ///
    /// 既定値はユーザーのデータディレクトリ配下のファイルとする。
    pub fn resolve(args: ConfigArgs) -> Result<Self> {
        Self::resolve_with(args, |key| env::var(key).ok(), dirs::data_dir)
    }

    fn resolve_with(
        args: ConfigArgs,
        env_var: impl Fn(&str) -> Option<String>,
        data_dir: impl FnOnce() -> Option<PathBuf>,
    ) -> Result<Self> {
        let data_csv = args
            .data_csv
            .or_else(|| env_var(DATA_CSV_ENV).map(PathBuf::from));
        let users_xml = args
            .users_xml
            .or_else(|| env_var(USERS_XML_ENV).map(PathBuf::from));
        let users_url = args.users_url.or_else(|| env_var(USERS_URL_ENV));

        let (data_csv, users_xml) = match (data_csv, users_xml) {
            (Some(data_csv), Some(users_xml)) => (data_csv, users_xml),
            (data_csv, users_xml) => {
                let app_dir = data_dir()
                    .context("Failed to locate the user data directory")?
                    .join(APP_DIR);
                (
                    data_csv.unwrap_or_else(|| app_dir.join("data.csv")),
                    users_xml.unwrap_or_else(|| app_dir.join("users.xml")),
                )
            }
        };

        Ok(Self {
            data_csv,
            users_xml,
            users_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::PathBuf};

    use rstest::rstest;

    use super::{Config, ConfigArgs};

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    fn data_dir() -> Option<PathBuf> {
        Some(PathBuf::from("/home/user/.local/share"))
    }

    #[test]
    fn test_resolve_defaults() {
        let config = Config::resolve_with(ConfigArgs::default(), env_of(&[]), data_dir).unwrap();

        assert_eq!(
            config,
            Config {
                data_csv: PathBuf::from("/home/user/.local/share/presence-analyzer/data.csv"),
                users_xml: PathBuf::from("/home/user/.local/share/presence-analyzer/users.xml"),
                users_url: None,
            }
        );
    }

    /// コマンドライン引数が環境変数より優先されることを確認する。
    #[rstest]
    #[case::args_only(Some("args.csv"), None, "args.csv")]
    #[case::env_only(None, Some("env.csv"), "env.csv")]
    #[case::args_over_env(Some("args.csv"), Some("env.csv"), "args.csv")]
    fn test_resolve_data_csv(
        #[case] arg: Option<&str>,
        #[case] env: Option<&str>,
        #[case] expected: &str,
    ) {
        let args = ConfigArgs {
            data_csv: arg.map(PathBuf::from),
            ..ConfigArgs::default()
        };
        let vars: Vec<(&str, &str)> = env.map(|v| ("PRESENCE_DATA_CSV", v)).into_iter().collect();

        let config = Config::resolve_with(args, env_of(&vars), data_dir).unwrap();

        assert_eq!(config.data_csv, PathBuf::from(expected));
    }

    #[test]
    fn test_resolve_from_env() {
        let vars = [
            ("PRESENCE_DATA_CSV", "/srv/data.csv"),
            ("PRESENCE_USERS_XML", "/srv/users.xml"),
            ("PRESENCE_USERS_URL", "https://intranet.example.com/api/users.xml"),
        ];

        let config = Config::resolve_with(ConfigArgs::default(), env_of(&vars), || None).unwrap();

        assert_eq!(config.data_csv, PathBuf::from("/srv/data.csv"));
        assert_eq!(config.users_xml, PathBuf::from("/srv/users.xml"));
        assert_eq!(
            config.users_url.as_deref(),
            Some("https://intranet.example.com/api/users.xml")
        );
    }

    /// データディレクトリが見つからず、既定値が必要な場合はエラーになることを確認する。
    #[test]
    fn test_resolve_without_data_dir() {
        let args = ConfigArgs {
            data_csv: Some(PathBuf::from("data.csv")),
            ..ConfigArgs::default()
        };

        assert!(Config::resolve_with(args, env_of(&[]), || None).is_err());
    }
}
