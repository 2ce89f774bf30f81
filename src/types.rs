//! Data transfer types for the marketplace backend.
//!
//! The backend serializes with Jackson (camelCase keys); every field the
//! client does not strictly need is optional with a serde default so a
//! contract drift on one field never fails a whole response.

use serde::{Deserialize, Serialize};

/// Authentication response from `/auth/login` and the register endpoints.
///
/// Older backend builds exposed the display name as `name` or `fname`
/// instead of `fName`; the aliases accept all three.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, alias = "fname", alias = "name")]
    pub f_name: Option<String>,
    #[serde(default)]
    pub lawyer_profile_id: Option<i64>,
}

impl AuthResponse {
    /// Fold the response into the locally persisted user shape.
    ///
    /// A response without an id carries no usable user record.
    pub fn stored_user(&self) -> Option<StoredUser> {
        self.id.map(|id| StoredUser {
            id: Some(id),
            email: self.email.clone(),
            role: self.role.clone(),
            name: self.f_name.clone(),
            lawyer_profile_id: self.lawyer_profile_id,
        })
    }
}

/// The user object persisted locally alongside the bearer token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lawyer_profile_id: Option<i64>,
}

/// A lawyer profile from `/lawyers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lawyer {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub experience: Option<i32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub court_of_practice: Option<String>,
    #[serde(default)]
    pub availability_details: Option<String>,
    #[serde(default)]
    pub v_hour: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

impl Lawyer {
    /// Court of practice, falling back to location (the directory shows one
    /// line for both).
    pub fn court_or_location(&self) -> &str {
        self.court_of_practice
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.location.as_deref())
            .unwrap_or("")
    }
}

/// One appointment row from the paged appointment endpoints.
///
/// `appointment_date` stays a raw string: the backend omits `:00` seconds
/// for on-the-minute times, so a strict timestamp type would reject half
/// the rows. Rendering reparses it best-effort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    #[serde(default)]
    pub appointment_date: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub problem_description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub lawyer_name: Option<String>,
}

impl Appointment {
    pub fn is_rejected(&self) -> bool {
        self.status == AppointmentStatus::Rejected.as_str()
    }
}

/// The backend's closed appointment status set. Transitions are enforced
/// server-side only; the client never validates them locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Rejected,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::InProgress => "IN_PROGRESS",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Rejected => "REJECTED",
        }
    }

    /// Map a dashboard control label onto the backend value.
    pub fn from_ui_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "accepted" => Some(AppointmentStatus::Confirmed),
            "on progress" => Some(AppointmentStatus::InProgress),
            "done" => Some(AppointmentStatus::Completed),
            "rejected" => Some(AppointmentStatus::Rejected),
            _ => None,
        }
    }

    /// Human label for a raw backend status. Unknown values pass through.
    pub fn display_label(raw: &str) -> String {
        match raw {
            "CONFIRMED" => "Accepted".to_string(),
            "IN_PROGRESS" => "On Progress".to_string(),
            "COMPLETED" => "Done".to_string(),
            "PENDING" => "Pending".to_string(),
            other => other.to_string(),
        }
    }
}

/// An info-hub article. The backend stores `date` as free text, so it
/// stays a string here too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoHubPost {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Spring-style pagination envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    #[serde(default)]
    pub content: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_elements: i64,
    #[serde(default)]
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lawyer_parses_backend_shape() {
        let json = r#"{
            "id": 7,
            "name": "A. Rahman",
            "experience": 12,
            "location": "Dhaka",
            "courtOfPractice": "Dhaka High Court",
            "availabilityDetails": "Mon-Fri, 10:00-17:00",
            "vHour": "2500/hour",
            "specialties": ["Family Law", "Civil"]
        }"#;
        let lawyer: Lawyer = serde_json::from_str(json).unwrap();
        assert_eq!(lawyer.id, 7);
        assert_eq!(lawyer.court_or_location(), "Dhaka High Court");
        assert_eq!(lawyer.specialties.len(), 2);
    }

    #[test]
    fn test_lawyer_tolerates_missing_fields() {
        let lawyer: Lawyer = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(lawyer.name, None);
        assert!(lawyer.specialties.is_empty());
        assert_eq!(lawyer.court_or_location(), "");
    }

    #[test]
    fn test_auth_response_name_aliases() {
        let with_fname: AuthResponse =
            serde_json::from_str(r#"{"token":"t","id":1,"fName":"Sam"}"#).unwrap();
        assert_eq!(with_fname.f_name.as_deref(), Some("Sam"));

        let with_name: AuthResponse =
            serde_json::from_str(r#"{"token":"t","id":1,"name":"Sam"}"#).unwrap();
        assert_eq!(with_name.f_name.as_deref(), Some("Sam"));
    }

    #[test]
    fn test_auth_response_without_id_has_no_user() {
        let res: AuthResponse = serde_json::from_str(r#"{"token":"t"}"#).unwrap();
        assert!(res.stored_user().is_none());

        let res: AuthResponse =
            serde_json::from_str(r#"{"token":"t","id":9,"email":"a@b.c","role":"USER"}"#).unwrap();
        let user = res.stored_user().unwrap();
        assert_eq!(user.id, Some(9));
        assert_eq!(user.role.as_deref(), Some("USER"));
    }

    #[test]
    fn test_paged_response_defaults() {
        let page: PagedResponse<Appointment> = serde_json::from_str("{}").unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_appointment_without_optional_fields() {
        let json = r#"{"id": 5, "status": "PENDING"}"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.id, 5);
        assert!(!appt.is_rejected());
        assert_eq!(appt.appointment_date, None);
    }

    #[test]
    fn test_status_labels_cover_controls() {
        assert_eq!(
            AppointmentStatus::from_ui_label("accepted"),
            Some(AppointmentStatus::Confirmed)
        );
        assert_eq!(
            AppointmentStatus::from_ui_label("On Progress"),
            Some(AppointmentStatus::InProgress)
        );
        assert_eq!(
            AppointmentStatus::from_ui_label("done"),
            Some(AppointmentStatus::Completed)
        );
        assert_eq!(
            AppointmentStatus::from_ui_label("rejected"),
            Some(AppointmentStatus::Rejected)
        );
        assert_eq!(AppointmentStatus::from_ui_label("nonsense"), None);
    }

    #[test]
    fn test_status_display_labels() {
        assert_eq!(AppointmentStatus::display_label("CONFIRMED"), "Accepted");
        assert_eq!(AppointmentStatus::display_label("IN_PROGRESS"), "On Progress");
        assert_eq!(AppointmentStatus::display_label("COMPLETED"), "Done");
        assert_eq!(AppointmentStatus::display_label("PENDING"), "Pending");
        // Unknown statuses render as-is rather than failing.
        assert_eq!(AppointmentStatus::display_label("ARCHIVED"), "ARCHIVED");
    }

    #[test]
    fn test_info_hub_post_keeps_free_form_date() {
        let json = r#"{"id":1,"title":"T","content":"C","category":"family","date":"March 2024"}"#;
        let post: InfoHubPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.date.as_deref(), Some("March 2024"));
    }
}
