//! Lawyer directory endpoints.

use serde_json::Value;

use super::ApiClient;
use crate::error::AppError;
use crate::types::Lawyer;

impl ApiClient {
    /// `GET /lawyers`: the public directory. The backend returns a bare
    /// array; any other shape reads as an empty directory.
    pub async fn list_lawyers(&self) -> Result<Vec<Lawyer>, AppError> {
        let value = self.get_value("/lawyers", false).await?;
        if !value.is_array() {
            return Ok(Vec::new());
        }
        serde_json::from_value(value)
            .map_err(|e| AppError::Internal(format!("Unexpected response from server: {}", e)))
    }

    /// `GET /lawyers/{id}`
    pub async fn lawyer_by_id(&self, id: i64) -> Result<Lawyer, AppError> {
        self.get(&format!("/lawyers/{}", id), &[], false).await
    }

    /// `GET /lawyers/me/profile-id`: the signed-in lawyer's profile id.
    ///
    /// Older backend builds return a bare number, newer ones `{"id": n}`;
    /// both are accepted.
    pub async fn my_lawyer_profile_id(&self) -> Result<Option<i64>, AppError> {
        let value = self.get_value("/lawyers/me/profile-id", true).await?;
        Ok(profile_id_from(&value))
    }
}

fn profile_id_from(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::Object(map) => map.get("id").and_then(Value::as_i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_id_accepts_both_shapes() {
        assert_eq!(profile_id_from(&json!(17)), Some(17));
        assert_eq!(profile_id_from(&json!({"id": 17})), Some(17));
    }

    #[test]
    fn test_profile_id_absent_for_other_shapes() {
        assert_eq!(profile_id_from(&json!(null)), None);
        assert_eq!(profile_id_from(&json!("17")), None);
        assert_eq!(profile_id_from(&json!({"profileId": 17})), None);
    }
}
