use serde::Serialize;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Content type is derived from the file extension
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = match file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
        {
            Some(ext) if ext == "pdf" => "application/pdf",
            Some(ext) if ext == "xlsx" => XLSX_CONTENT_TYPE,
            _ => "application/octet-stream",
        };
        Self {
            file_name,
            content_type: content_type.to_string(),
            bytes,
        }
    }
}

/// Ordered key-value facts followed by optional free text
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmailBody {
    pub facts: Vec<(String, String)>,
    pub remarks: Option<String>,
}

impl EmailBody {
    pub fn to_text(&self) -> String {
        let width = self.facts.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
        let mut out = String::new();
        for (key, value) in &self.facts {
            out.push_str(&format!("{:<width$}  {}\n", format!("{key}:"), value, width = width + 1));
        }
        if let Some(remarks) = &self.remarks {
            out.push_str("\nRemarks:\n");
            out.push_str(remarks);
            out.push('\n');
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Email {
    pub to: Vec<String>,
    pub subject: String,
    pub body: EmailBody,
    pub attachments: Vec<Attachment>,
}
