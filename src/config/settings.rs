use serde::{Deserialize, Serialize};

use crate::render::ExportFormat;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub export: ExportSettings,
    #[serde(default)]
    pub pdf: PdfSettings,
    pub notify: NotifySettings,
    #[serde(default)]
    pub mail: Option<MailSettings>,
    pub data: DataSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExportSettings {
    pub currency_symbol: String,
    pub output_dir: String,
    #[serde(default)]
    pub default_format: ExportFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PdfSettings {
    #[serde(default = "default_typst")]
    pub typst: String,
    #[serde(default = "default_paper")]
    pub paper: String,
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            typst: default_typst(),
            paper: default_paper(),
        }
    }
}

fn default_typst() -> String {
    "typst".to_string()
}

fn default_paper() -> String {
    "a4".to_string()
}

/// Who hears about transaction changes
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct NotifySettings {
    /// Location whose users are told about purchase-side changes
    pub admin_location: String,
    pub head_office_location: String,
    /// Addresses copied on every change email
    #[serde(default)]
    pub email_to: Vec<String>,
    #[serde(default)]
    pub outbox_dir: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MailSettings {
    pub server: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    pub from: String,
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_use_tls() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DataSettings {
    pub file: String,
}
