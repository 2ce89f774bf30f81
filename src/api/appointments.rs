//! Appointment endpoints. All of these require a signed-in session.

use serde_json::json;

use super::ApiClient;
use crate::error::AppError;
use crate::types::{Appointment, PagedResponse};

/// Booking request for `POST /appointments`. The client identity comes
/// from the bearer token server-side; status starts as `PENDING`.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub lawyer_profile_id: i64,
    pub appointment_date: String,
    pub problem_description: String,
    pub notes: Option<String>,
}

impl ApiClient {
    pub async fn create_appointment(&self, req: &NewAppointment) -> Result<(), AppError> {
        // The response echoes the created row; nothing in it is needed.
        let _: serde_json::Value = self
            .post(
                "/appointments",
                json!({
                    "lawyerProfileId": req.lawyer_profile_id,
                    "appointmentDate": req.appointment_date,
                    "problemDescription": req.problem_description,
                    "notes": req.notes,
                }),
                true,
            )
            .await?;
        Ok(())
    }

    /// `GET /appointments/by-lawyer/{id}`: appointments booked with a
    /// lawyer. The backend resolves the path id as a user id first, then
    /// as a profile id, so either works.
    pub async fn appointments_by_lawyer(
        &self,
        lawyer_id: i64,
        page: u32,
        size: u32,
    ) -> Result<PagedResponse<Appointment>, AppError> {
        self.get(
            &format!("/appointments/by-lawyer/{}", lawyer_id),
            &[("page", page.to_string()), ("size", size.to_string())],
            true,
        )
        .await
    }

    /// `GET /appointments/my`: the signed-in client's appointments.
    pub async fn my_appointments(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PagedResponse<Appointment>, AppError> {
        self.get(
            "/appointments/my",
            &[("page", page.to_string()), ("size", size.to_string())],
            true,
        )
        .await
    }

    /// `PATCH /appointments/{id}/status`. Only the owning lawyer may
    /// change status; invalid statuses come back as a 400.
    pub async fn update_appointment_status(&self, id: i64, status: &str) -> Result<(), AppError> {
        let _: serde_json::Value = self
            .patch(
                &format!("/appointments/{}/status", id),
                json!({ "status": status }),
            )
            .await?;
        Ok(())
    }
}
