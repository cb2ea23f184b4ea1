//! User feedback helpers: notifications, alert markup and size captions

use crate::render::escape_html;
use crate::types::{FileAttachment, Severity};
use serde::Serialize;
use std::time::Duration;

/// Bootstrap alert flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Danger,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Info => "info",
            AlertKind::Warning => "warning",
            AlertKind::Danger => "danger",
        }
    }

    /// Font Awesome icon name shown in front of the message
    pub fn icon(&self) -> &'static str {
        match self {
            AlertKind::Success => "check-circle",
            AlertKind::Info => "info-circle",
            AlertKind::Warning => "exclamation-triangle",
            AlertKind::Danger => "exclamation-circle",
        }
    }
}

impl From<Severity> for AlertKind {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => AlertKind::Warning,
            Severity::Danger => AlertKind::Danger,
        }
    }
}

/// A dismissible message that removes itself after `ttl`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: AlertKind,
    pub ttl: Duration,
}

impl Notification {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

    pub fn new(message: impl Into<String>, kind: AlertKind) -> Self {
        Self {
            message: message.into(),
            kind,
            ttl: Self::DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Class list for the alert container element
    pub fn class_name(&self) -> String {
        format!(
            "alert alert-{} alert-dismissible fade show",
            self.kind.as_str()
        )
    }

    /// Inner markup: icon, escaped message and close button
    pub fn inner_html(&self) -> String {
        format!(
            "<i class=\"fas fa-{} me-2\"></i>{}<button type=\"button\" class=\"btn-close\" data-bs-dismiss=\"alert\"></button>",
            self.kind.icon(),
            escape_html(&self.message)
        )
    }
}

/// Human readable size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `16 MB`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{:.2}", scaled);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Caption shown under the file input after a file is picked
pub fn file_caption(file: &FileAttachment) -> String {
    format!(
        "Selected: {} ({})",
        file.name,
        format_file_size(file.size_bytes)
    )
}
