use serde::{Deserialize, Serialize};

use super::repo::StoredAnalysis;

/// JSON variant of the analyze request, for clients that cannot send
/// multipart bodies.
#[derive(Debug, Deserialize)]
pub struct AnalyzeBase64Request {
    pub image_base64: String,
    #[serde(default)]
    pub content_type: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub nome: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Serialize)]
pub struct UserAnalysesResponse {
    pub user_id: String,
    pub analyses: Vec<StoredAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: &'static str,
    pub vision: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_limit_defaults_to_ten() {
        let q: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.limit, 10);

        let q: ListQuery = serde_json::from_str(r#"{"limit": 5}"#).unwrap();
        assert_eq!(q.limit, 5);
    }

    #[test]
    fn base64_request_optional_fields_default() {
        let body: AnalyzeBase64Request =
            serde_json::from_str(r#"{"image_base64": "aGk=", "user_id": "u1"}"#).unwrap();
        assert_eq!(body.content_type, None);
        assert_eq!(body.nome, None);
    }
}
