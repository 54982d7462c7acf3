use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::presence_record::UserId;

/// 利用者の一覧の1件。
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub user_id: UserId,
    pub name: String,
}

/// 利用者一覧のXMLをデシリアライズするための構造体。
#[derive(Debug, Deserialize)]
struct XmlIntranet {
    users: XmlUsers,
}

#[derive(Debug, Deserialize)]
struct XmlUsers {
    #[serde(rename = "user", default)]
    users: Vec<XmlUser>,
}

#[derive(Debug, Deserialize)]
struct XmlUser {
    #[serde(rename = "@id")]
    id: UserId,
    name: String,
}

/// XML文字列から利用者の一覧を文書の順に返す。
pub fn parse_users(xml: &str) -> Result<Vec<RosterEntry>> {
    let intranet: XmlIntranet =
        quick_xml::de::from_str(xml).context("Failed to deserialize users xml")?;

    Ok(intranet
        .users
        .users
        .into_iter()
        .map(|user| RosterEntry {
            user_id: user.id,
            name: user.name,
        })
        .collect())
}

/// XMLファイルから利用者の一覧を返す。
///
/// # Arguments
///
/// * `path` - 利用者一覧のXMLファイルのパス
pub fn parse_users_xml(path: &Path) -> Result<Vec<RosterEntry>> {
    let xml = fs::read_to_string(path)
        .with_context(|| format!("Failed to read users xml: {}", path.display()))?;
    let users = parse_users(&xml)
        .with_context(|| format!("Failed to parse users xml: {}", path.display()))?;
    info!("Loaded {} users from {}", users.len(), path.display());

    Ok(users)
}
