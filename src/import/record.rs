use serde::Serialize;

use super::clean::clean_text;

/// One row of the `cadastro` table.
///
/// Field names on the wire follow the table's column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "instrumento")]
    pub instrument: Option<String>,
    #[serde(rename = "localidade")]
    pub locality: Option<String>,
    #[serde(rename = "cidade")]
    pub city: Option<String>,
    #[serde(rename = "comum")]
    pub group: Option<String>,
    #[serde(rename = "cargo")]
    pub role: Option<String>,
    #[serde(rename = "nivel")]
    pub level: Option<String>,
    #[serde(rename = "ativo")]
    pub active: bool,
}

impl Record {
    /// Build a record from a row, looking fields up by canonical column name.
    ///
    /// Returns `None` when the name is empty after cleaning. An empty group
    /// falls back to the locality.
    pub fn from_row<'a, F>(field: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let clean = |column: &str| field(column).and_then(clean_text);

        let name = clean("nome")?;
        let locality = clean("localidade");
        let group = clean("comum").or_else(|| locality.clone());

        Some(Record {
            name,
            instrument: clean("instrumento"),
            locality,
            city: clean("cidade"),
            group,
            role: clean("cargo"),
            level: clean("nivel"),
            active: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn record(pairs: &[(&'static str, &'static str)]) -> Option<Record> {
        let row: HashMap<&str, &str> = pairs.iter().copied().collect();
        Record::from_row(|column| row.get(column).copied())
    }

    #[test]
    fn test_name_required() {
        assert!(record(&[]).is_none());
        assert!(record(&[("nome", "")]).is_none());
        assert!(record(&[("nome", "◆ ")]).is_none());
        assert!(record(&[("nome", "NULL"), ("localidade", "SP")]).is_none());
    }

    #[test]
    fn test_group_inherits_locality() {
        let rec = record(&[("nome", "Bea"), ("comum", ""), ("localidade", "Jardim ◆")]).unwrap();
        assert_eq!(rec.group.as_deref(), Some("Jardim"));
        assert_eq!(rec.locality.as_deref(), Some("Jardim"));

        let rec = record(&[("nome", "Bea"), ("comum", "Centro"), ("localidade", "Jardim")]).unwrap();
        assert_eq!(rec.group.as_deref(), Some("Centro"));

        let rec = record(&[("nome", "Bea")]).unwrap();
        assert_eq!(rec.group, None);
    }

    #[test]
    fn test_serializes_with_column_names() {
        let rec = record(&[
            ("nome", "Ana"),
            ("instrumento", "Violino"),
            ("cidade", "Itapevi"),
            ("cargo", "Músico"),
        ])
        .unwrap();

        assert_eq!(
            serde_json::to_value(&rec).unwrap(),
            json!({
                "nome": "Ana",
                "instrumento": "Violino",
                "localidade": null,
                "cidade": "Itapevi",
                "comum": null,
                "cargo": "Músico",
                "nivel": null,
                "ativo": true,
            })
        );
    }
}
