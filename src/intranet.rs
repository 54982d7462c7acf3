use anyhow::{Context, Result};
use log::info;
use reqwest::Client;

use crate::roster::{parse_users, RosterEntry};

/// 利用者一覧のXMLを配布するサーバーと通信するためのクライアント。
///
/// # Examples
///
/// ```
/// let client = IntranetClient::new("https://intranet.example.com/api/users.xml");
/// let (xml, users) = client.download_users().await.unwrap();
/// ```
pub struct IntranetClient {
    client: Client,
    users_url: String,
}

impl IntranetClient {
    /// 新しい`IntranetClient`を返す。
    ///
    /// # Arguments
    ///
    /// * `users_url` - 利用者一覧のXMLのURL
    pub fn new(users_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            users_url: users_url.into(),
        }
    }

    /// 利用者一覧のXMLを取得する。
    ///
    /// 取得したXMLが利用者一覧として読めない場合はエラーを返す。
    /// 戻り値は取得したXMLそのものと、読み込んだ利用者の一覧。
    pub async fn download_users(&self) -> Result<(String, Vec<RosterEntry>)> {
        let xml = self
            .client
            .get(&self.users_url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", self.users_url))?
            .error_for_status()
            .context("Request returned an error status")?
            .text()
            .await
            .context("Failed to read response body")?;
        let users = parse_users(&xml).context("Downloaded users xml is invalid")?;
        info!("Downloaded {} users from {}", users.len(), self.users_url);

        Ok((xml, users))
    }
}
