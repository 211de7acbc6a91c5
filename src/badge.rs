//! Shields.io endpoint badge document.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::path::Path;

use crate::runtime::Runtime;

pub const SCHEMA_VERSION: u32 = 1;
pub const LABEL: &str = "total downloads";
pub const COLOR: &str = "brightgreen";

/// The JSON document read by the shields.io `endpoint` badge.
/// Field order is the serialized order.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub schema_version: u32,
    pub label: String,
    pub message: String,
    pub color: String,
}

impl Badge {
    /// Badge showing `total` with thousands separators.
    pub fn total_downloads(total: u64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            label: LABEL.to_string(),
            message: format_thousands(total),
            color: COLOR.to_string(),
        }
    }

    /// Two-space indented JSON without a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize badge")
    }
}

/// Formats `n` with `,` between groups of three digits.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Serializes `badge` and overwrites `path` with it.
#[tracing::instrument(skip(runtime, badge))]
pub fn write_badge<R: Runtime>(runtime: &R, path: &Path, badge: &Badge) -> Result<()> {
    let json = badge.to_json()?;
    debug!("Writing {} bytes to {:?}", json.len(), path);
    runtime
        .write(path, json.as_bytes())
        .with_context(|| format!("Failed to write badge to {}", path.display()))
}
