//! Role-specific appointment loading and status changes. Business logic
//! only; rendering stays in the command layer.

use crate::api::ApiClient;
use crate::error::AppError;
use crate::state::AppState;
use crate::types::AppointmentStatus;

/// How the lawyer id used for appointment queries was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LawyerIdSource {
    /// Confirmed by the backend's profile-id endpoint.
    Profile(i64),
    /// Profile lookup failed; the backend also resolves the plain user id
    /// on the by-lawyer endpoint, so fall back to that.
    UserId(i64),
    /// No usable id on the session at all.
    Missing,
}

impl LawyerIdSource {
    pub fn id(&self) -> Option<i64> {
        match self {
            LawyerIdSource::Profile(id) | LawyerIdSource::UserId(id) => Some(*id),
            LawyerIdSource::Missing => None,
        }
    }
}

/// Resolve which id to query the lawyer's appointments with.
///
/// Asks the backend for the signed-in user's lawyer profile id and persists
/// it on the stored user; a failed lookup falls back to the raw user id.
pub async fn resolve_lawyer_id(state: &AppState, api: &ApiClient) -> LawyerIdSource {
    match api.my_lawyer_profile_id().await {
        Ok(Some(profile_id)) => {
            if let Err(e) = state.update_user(|u| u.lawyer_profile_id = Some(profile_id)) {
                log::warn!("Failed to persist lawyer profile id: {}", e);
            }
            return LawyerIdSource::Profile(profile_id);
        }
        Ok(None) => {}
        Err(e) => log::debug!("Lawyer profile lookup failed: {}", e),
    }

    match state.session().user.and_then(|u| u.id) {
        Some(user_id) => LawyerIdSource::UserId(user_id),
        None => LawyerIdSource::Missing,
    }
}

/// Load one page of a lawyer's incoming appointments into the shared feed.
/// Rejected rows are dropped; the lawyer already turned those down.
pub async fn load_lawyer_appointments(
    state: &AppState,
    api: &ApiClient,
    lawyer_id: i64,
    page: u32,
) -> Result<(), AppError> {
    let size = state.config.page_size;
    let response = api.appointments_by_lawyer(lawyer_id, page, size).await?;
    if let Ok(mut feed) = state.appointments.lock() {
        feed.absorb_filtered(page, response, |a| !a.is_rejected());
    }
    Ok(())
}

/// Load one page of the signed-in client's appointments. Clients see every
/// status, rejections included.
pub async fn load_client_appointments(
    state: &AppState,
    api: &ApiClient,
    page: u32,
) -> Result<(), AppError> {
    let size = state.config.page_size;
    let response = api.my_appointments(page, size).await?;
    if let Ok(mut feed) = state.appointments.lock() {
        feed.absorb(page, response);
    }
    Ok(())
}

/// Push a status change to the backend, then mirror it into the feed so the
/// dashboard stays consistent without a refetch. Rejecting removes the row.
pub async fn change_status(
    state: &AppState,
    api: &ApiClient,
    appointment_id: i64,
    status: AppointmentStatus,
) -> Result<(), AppError> {
    api.update_appointment_status(appointment_id, status.as_str())
        .await?;
    if let Ok(mut feed) = state.appointments.lock() {
        for appt in feed.items_mut() {
            if appt.id == appointment_id {
                appt.status = status.as_str().to_string();
            }
        }
        feed.retain(|a| !a.is_rejected());
    }
    Ok(())
}
