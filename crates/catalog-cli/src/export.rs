//! Category export formats

use catalog_category::AgentCategory;
use std::str::FromStr;

/// Output format for `export`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown export format '{other}' (expected json or csv)")),
        }
    }
}

const CSV_HEADER: &str = "id,value,label,description,order,isActive,custom,createdAt,updatedAt";

/// Lets spreadsheet tools detect UTF-8 for CJK labels
const UTF8_BOM: char = '\u{FEFF}';

/// Pretty-printed JSON array
///
/// # Errors
/// Serialization failure
pub fn to_json(categories: &[AgentCategory]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(categories)
}

/// CSV with a byte-order mark and a header row; text columns are quoted
pub fn to_csv(categories: &[AgentCategory]) -> String {
    let mut out = String::from(UTF8_BOM);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for c in categories {
        let row = [
            c.id.clone(),
            quote(&c.value),
            quote(&c.label),
            quote(&c.description),
            c.order.to_string(),
            c.is_active.to_string(),
            c.custom.to_string(),
            c.created_at.to_rfc3339(),
            c.updated_at.to_rfc3339(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
