mod settings;

pub use settings::{Config, DataSettings, ExportSettings, MailSettings, NotifySettings, PdfSettings};

use crate::error::{ExportError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG config dir, else ~/.bakery-export/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "bakery-export") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        ExportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".bakery-export"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Expand ~ and resolve relative paths against the config directory
pub fn resolve_path(config_dir: &Path, path: &str) -> PathBuf {
    let expanded = expand_path(path);
    if expanded.is_relative() {
        config_dir.join(expanded)
    } else {
        expanded
    }
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(ExportError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ExportError::ConfigParse { path, source: e })
}

/// Create the config directory with a config template and a sample dataset
pub fn init_config_dir(config_dir: &Path) -> Result<()> {
    if config_dir.exists() {
        return Err(ExportError::AlreadyInitialized(config_dir.to_path_buf()));
    }
    fs::create_dir_all(config_dir)?;
    fs::write(config_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(config_dir.join("data.json"), DATA_TEMPLATE)?;
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[export]
currency_symbol = "₹"
output_dir = "output"        # relative paths resolve against this directory
default_format = "xlsx"      # xlsx | pdf

[pdf]
typst = "typst"
paper = "a4"

[notify]
admin_location = "LOC-HO"
head_office_location = "LOC-HO"
email_to = ["accounts@example.com"]
outbox_dir = "outbox"        # used when [mail] is not configured

# [mail]
# server = "smtp.example.com"
# port = 587
# username = "mailer"
# password = "secret"
# from = "Bakery Back Office <noreply@example.com>"

[data]
file = "data.json"
"#;

/// Sample dataset written by `init`
pub const DATA_TEMPLATE: &str = r#"{
  "companies": [
    { "id": "CMP-1", "name": "Golden Crust Bakery", "address": "12 Mill Road", "phone": "+91-80-5550-1000", "tax_id": "29ABCDE1234F1Z5" }
  ],
  "parties": [
    { "id": "PTY-1", "name": "Fresh Flour Traders", "address": "44 Market Street", "phone": "+91-80-5550-2000" },
    { "id": "PTY-2", "name": "Cafe Aroma", "address": "9 Lake View", "location_id": "LOC-OUT1" }
  ],
  "locations": [
    { "id": "LOC-HO", "name": "Head Office" },
    { "id": "LOC-OUT1", "name": "Indiranagar Outlet" }
  ],
  "kitchens": [
    { "id": "KIT-1", "name": "Central Kitchen", "location_id": "LOC-HO" }
  ],
  "products": [
    { "id": "PRD-FLOUR", "name": "Wheat Flour", "unit": "kg" },
    { "id": "PRD-SUGAR", "name": "Sugar", "unit": "kg" },
    { "id": "PRD-BREAD", "name": "Sandwich Bread", "unit": "loaf" }
  ],
  "users": [
    { "id": "USR-1", "name": "Asha Admin", "email": "asha@example.com", "role": "admin", "location_id": "LOC-HO" },
    { "id": "USR-2", "name": "Priya Purchase", "email": "priya@example.com", "role": "purchase", "location_id": "LOC-HO" },
    { "id": "USR-3", "name": "Sam Sales", "email": "sam@example.com", "role": "sales", "location_id": "LOC-OUT1" },
    { "id": "USR-4", "name": "Kiran Kitchen", "role": "kitchen", "location_id": "LOC-HO" }
  ],
  "transactions": [
    {
      "id": "TXN-1",
      "kind": "purchase",
      "number": "PUR-0001",
      "date": "2024-01-05T10:30:00",
      "company_id": "CMP-1",
      "party_id": "PTY-1",
      "location_id": "LOC-HO",
      "lines": [
        { "product_id": "PRD-FLOUR", "quantity": 50.0, "rate": 42.0, "tax": 105.0 },
        { "product_id": "PRD-SUGAR", "quantity": 20.0, "rate": 48.5, "discount": 20.0 }
      ],
      "remarks": "Monthly stock",
      "created_by": "USR-2",
      "created_at": "2024-01-05T10:35:00"
    },
    {
      "id": "TXN-2",
      "kind": "sale",
      "number": "SAL-0001",
      "date": "2024-01-06T16:00:00",
      "company_id": "CMP-1",
      "party_id": "PTY-2",
      "location_id": "LOC-OUT1",
      "lines": [
        { "product_id": "PRD-BREAD", "quantity": 30.0, "rate": 45.0, "tax": 67.5 }
      ],
      "discount": 17.5,
      "payment_modes": [
        { "mode": "Cash", "amount": 1000.0 },
        { "mode": "Card", "amount": 400.0 },
        { "mode": "UPI", "amount": 0.0 }
      ],
      "created_by": "USR-3",
      "created_at": "2024-01-06T16:05:00"
    },
    {
      "id": "TXN-3",
      "kind": "kitchen_production",
      "number": "KPR-0001",
      "date": "2024-01-07T06:00:00",
      "company_id": "CMP-1",
      "location_id": "LOC-HO",
      "kitchen_id": "KIT-1",
      "lines": [
        { "product_id": "PRD-BREAD", "quantity": 40.0, "rate": 30.0 }
      ],
      "consumptions": [
        { "product_id": "PRD-FLOUR", "quantity": 20.0, "rate": 42.0 },
        { "product_id": "PRD-SUGAR", "quantity": 2.0, "rate": 48.5 }
      ],
      "created_by": "USR-4",
      "created_at": "2024-01-07T06:10:00"
    }
  ]
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Dataset;
    use tempfile::TempDir;

    #[test]
    fn test_templates_parse() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.export.currency_symbol, "₹");
        assert_eq!(config.pdf.paper, "a4");
        assert!(config.mail.is_none());

        let data: Dataset = serde_json::from_str(DATA_TEMPLATE).unwrap();
        assert_eq!(data.transactions.len(), 3);
    }

    #[test]
    fn test_resolve_path_relative_to_config_dir() {
        let dir = Path::new("/etc/bakery");
        assert_eq!(resolve_path(dir, "out"), PathBuf::from("/etc/bakery/out"));
        assert_eq!(resolve_path(dir, "/tmp/out"), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_init_refuses_existing_dir() {
        let temp = TempDir::new().unwrap();
        let result = init_config_dir(temp.path());
        assert!(matches!(result, Err(ExportError::AlreadyInitialized(_))));
    }
}
