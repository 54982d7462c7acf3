use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

/// Consoleにレポートを表示するためのtrait。
pub trait ConsolePresenter {
    /// レポートを表示する。
    ///
    /// # Arguments
    ///
    /// * `value` - 表示するレポート
    fn show<T: Serialize>(&mut self, value: &T) -> Result<()>;
}

/// レポートをJSON形式で表示する。
pub struct ConsoleJson<'a, W: Write> {
    writer: &'a mut W,
    pretty: bool,
}

impl<'a, W: Write> ConsoleJson<'a, W> {
    /// 新しい`ConsoleJson`を返す。
    ///
    /// # Arguments
    ///
    /// * `writer` - 出力先
    /// * `pretty` - 改行とインデントを付けて出力するかどうか
    pub fn new(writer: &'a mut W, pretty: bool) -> Self {
        Self { writer, pretty }
    }
}

impl<'a, W: Write> ConsolePresenter for ConsoleJson<'a, W> {
    fn show<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut *self.writer, value)
        } else {
            serde_json::to_writer(&mut *self.writer, value)
        };
        written.context("Failed to serialize report")?;
        writeln!(self.writer).context("Failed to write report")?;

        Ok(())
    }
}
