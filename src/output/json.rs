//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Envelope for JSON output: payload plus metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a, T: ?Sized> {
    pub data: &'a T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// When the output was produced (RFC 3339)
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Number of records, for list payloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Metadata {
    fn now(count: Option<usize>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            count,
        }
    }
}

/// Format a list as pretty-printed JSON with a record count
pub fn format_json<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput {
        data: items,
        meta: Metadata::now(Some(items.len())),
    })
}

/// Format a single record as pretty-printed JSON
pub fn format_json_item<T: Serialize + ?Sized>(item: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput {
        data: item,
        meta: Metadata::now(None),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize)]
    struct Plazo {
        id_plazo: i64,
        descripcion: String,
    }

    #[test]
    fn test_list_envelope() {
        let items = vec![
            Plazo {
                id_plazo: 1,
                descripcion: "Apelación".to_string(),
            },
            Plazo {
                id_plazo: 2,
                descripcion: "Alegatos".to_string(),
            },
        ];

        let out = format_json(&items).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["data"][1]["descripcion"], "Alegatos");
        assert_eq!(v["meta"]["count"], 2);
        assert_eq!(v["meta"]["version"], env!("CARGO_PKG_VERSION"));
        assert!(v["meta"]["timestamp"].is_string());
    }

    #[test]
    fn test_empty_list() {
        let items: Vec<Plazo> = vec![];
        let out = format_json(&items).unwrap();
        assert!(out.contains("\"data\": []"));
        assert!(out.contains("\"count\": 0"));
    }

    #[test]
    fn test_single_item_has_no_count() {
        let out = format_json_item(&Plazo {
            id_plazo: 7,
            descripcion: "x".to_string(),
        })
        .unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["data"]["id_plazo"], 7);
        assert!(v["meta"].get("count").is_none());
    }
}
