//! Deploy log housekeeping
//!
//! Log followers write one dated file per service; cleanup removes files
//! whose embedded date fell out of the retention window. Dates come from
//! the file name, never from filesystem metadata, so behavior is the same
//! on every platform.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::errors::{GamedexError, Result};

/// `<dir>/<service>-YYYY-MM-DD.log`
pub fn dated_log_path(dir: &Path, service: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}-{}.log", service, date.format("%Y-%m-%d")))
}

/// Extract the date from a follower log file name; None for anything else
pub fn parse_log_date(file_name: &str) -> Option<NaiveDate> {
    let stem = file_name.strip_suffix(".log")?;
    if stem.len() < 11 {
        return None;
    }
    let (prefix, date_part) = stem.split_at(stem.len() - 10);
    if !prefix.ends_with('-') {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Remove dated log files older than `retention_days`, returning the count
///
/// Files without a parseable date suffix (e.g. `cron.log`) are left alone.
pub fn cleanup_older_than(dir: &Path, retention_days: u32, today: NaiveDate) -> Result<usize> {
    if !dir.exists() {
        debug!("Log dir {} does not exist, nothing to clean", dir.display());
        return Ok(0);
    }

    let entries = fs::read_dir(dir)
        .map_err(|e| GamedexError::file_operation(format!("读取日志目录失败: {}", e)))?;

    let mut removed = 0;
    for entry in entries {
        let entry =
            entry.map_err(|e| GamedexError::file_operation(format!("读取目录项失败: {}", e)))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(date) = parse_log_date(name) else {
            continue;
        };

        let age = (today - date).num_days();
        if age > retention_days as i64 {
            fs::remove_file(entry.path()).map_err(|e| {
                GamedexError::file_operation(format!("删除日志 {} 失败: {}", name, e))
            })?;
            debug!("Removed stale log file: {}", name);
            removed += 1;
        }
    }

    info!("Log cleanup removed {} file(s)", removed);
    Ok(removed)
}
