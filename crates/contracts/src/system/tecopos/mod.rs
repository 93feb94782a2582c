use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTokenRequest {
    pub region: String,
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSupplierRequest {
    pub region: String,
    pub business_id: String,
    pub supplier_id: String,
    pub supplier_name: Option<String>,
}

/// Query for `GET /me/tecopos/businesses`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessesQuery {
    pub region: String,
}

/// Query for `GET /me/tecopos/suppliers`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuppliersQuery {
    pub region: String,
    pub business_id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// One business or supplier returned by a Tecopos lookup
#[derive(Debug, Clone, PartialEq)]
pub struct LookupEntry {
    pub id: String,
    pub name: String,
}

/// Flatten a raw Tecopos lookup body.
///
/// Tecopos answers either with a bare list or with a paginated
/// `{"items": [...]}` object. Entries without an id are skipped.
pub fn lookup_entries(body: &serde_json::Value) -> Vec<LookupEntry> {
    use serde_json::Value;

    let rows: &[Value] = match body {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("items")
            .or_else(|| map.get("data"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    };

    rows.iter()
        .filter_map(|row| {
            let id = match row.get("id")? {
                Value::Number(n) => n.to_string(),
                Value::String(s) if !s.is_empty() => s.clone(),
                _ => return None,
            };
            let name = row
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Some(LookupEntry { id, name })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entries_from_bare_list() {
        let body = json!([{"id": 15, "name": "Mercado Centro"}, {"name": "sin id"}]);
        assert_eq!(
            lookup_entries(&body),
            vec![LookupEntry {
                id: "15".into(),
                name: "Mercado Centro".into()
            }]
        );
    }

    #[test]
    fn entries_from_paginated_object() {
        let body = json!({"totalItems": 1, "items": [{"id": "7", "name": "Lácteos SA"}]});
        let entries = lookup_entries(&body);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "7");
    }

    #[test]
    fn other_shapes_are_empty() {
        assert!(lookup_entries(&json!(null)).is_empty());
        assert!(lookup_entries(&json!({"message": "x"})).is_empty());
    }

    #[test]
    fn suppliers_query_name_defaults_to_empty() {
        let q: SuppliersQuery =
            serde_json::from_value(json!({"region": "api", "businessId": "3"})).unwrap();
        assert_eq!(q.name, "");
        assert_eq!(q.business_id, "3");
    }
}
