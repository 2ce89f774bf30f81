//! Authentication endpoints.

use serde_json::json;

use super::ApiClient;
use crate::error::AppError;
use crate::types::AuthResponse;

/// Profile fields collected by the lawyer signup form beyond the account
/// basics. Sent alongside the account so `/auth/register-lawyer` can
/// create the user and the profile in one transaction.
#[derive(Debug, Clone, Default)]
pub struct LawyerSignup {
    pub experience: i32,
    pub location: String,
    pub court_of_practice: String,
    pub availability_details: String,
    pub v_hour: String,
    pub specialties: Vec<String>,
}

impl ApiClient {
    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        self.post(
            "/auth/login",
            json!({ "email": email, "password": password }),
            false,
        )
        .await
    }

    /// `POST /auth/register` for client accounts. The backend takes the
    /// display name as `firstName`.
    pub async fn register_client(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AppError> {
        self.post(
            "/auth/register",
            json!({ "firstName": name, "email": email, "password": password }),
            false,
        )
        .await
    }

    /// `POST /auth/register-lawyer`
    pub async fn register_lawyer(
        &self,
        name: &str,
        email: &str,
        password: &str,
        profile: &LawyerSignup,
    ) -> Result<AuthResponse, AppError> {
        let mut body = json!({
            "firstName": name,
            "email": email,
            "password": password,
            "experience": profile.experience,
            "location": profile.location,
            "courtOfPractice": profile.court_of_practice,
            "availabilityDetails": profile.availability_details,
            "vHour": profile.v_hour,
        });
        if !profile.specialties.is_empty() {
            body["specialties"] = json!(profile.specialties);
        }
        self.post("/auth/register-lawyer", body, false).await
    }
}
