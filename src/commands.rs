//! Application commands: one async function per user-visible operation.
//!
//! Commands validate input, call the backend, update [`AppState`], and hand
//! typed data back for rendering. All user-facing strings for validation
//! live here; page formatting lives in `render`.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::analysis::gemini::GeminiClient;
use crate::analysis::ingest::{self, DocumentInput};
use crate::analysis::AnalysisReport;
use crate::api::appointments::NewAppointment;
use crate::api::auth::LawyerSignup;
use crate::api::infohub::PostDraft;
use crate::api::ApiClient;
use crate::availability::{self, Availability};
use crate::error::AppError;
use crate::nav::Page;
use crate::services::dashboard;
use crate::session::{Role, Session};
use crate::state::{AnalysisState, AppState};
use crate::types::{AppointmentStatus, InfoHubPost, Lawyer, StoredUser};
use crate::util;

/// Hub category ids alongside their display names. `all` sends no category
/// to the server.
pub const HUB_CATEGORIES: &[(&str, &str)] = &[
    ("all", "All Categories"),
    ("property", "Property Law"),
    ("family", "Family Law"),
    ("business", "Business Law"),
    ("criminal", "Criminal Law"),
    ("civil", "Civil Rights"),
    ("labor", "Labor Law"),
];

// Compile-once regex patterns via OnceLock.
fn re_email() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^@\s]+@[^@\s]+\.[^@\s]+").unwrap())
}

fn validation(problems: Vec<&str>) -> AppError {
    AppError::Validation(problems.join("; "))
}

// ---------------------------------------------------------------------------
// Auth

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();
        if !re_email().is_match(&self.email) {
            problems.push("Valid email required");
        }
        if self.password.len() < 6 {
            problems.push("Min 6 characters");
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(validation(problems))
        }
    }
}

/// Signup form for both account kinds. The lawyer-only fields are ignored
/// unless `lawyer` is set.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub lawyer: bool,
    /// Years of experience, still raw text from the form.
    pub experience: String,
    pub location: String,
    pub court_of_practice: String,
    /// Free-text availability, used when no structured days/hours given.
    pub availability_details: String,
    pub available_days: Vec<String>,
    pub available_from: String,
    pub available_to: String,
    pub v_hour: String,
    /// Comma-separated specialties.
    pub specialties: String,
}

impl SignUpForm {
    fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();
        if !re_email().is_match(&self.email) {
            problems.push("Valid email required");
        }
        if self.password.len() < 6 {
            problems.push("Min 6 characters");
        }
        if self.name.trim().is_empty() {
            problems.push("Name required");
        }
        if self.confirm != self.password {
            problems.push("Passwords do not match");
        }
        if self.lawyer {
            if self.experience.trim().parse::<i32>().is_err() {
                problems.push("Experience (years) required");
            }
            if self.location.trim().is_empty() {
                problems.push("Location required");
            }
            if self.court_of_practice.trim().is_empty() {
                problems.push("Court of practice required");
            }
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(validation(problems))
        }
    }

    /// Availability string sent to the backend: structured days/hours when
    /// given, otherwise the free-text field as typed.
    fn availability_string(&self) -> String {
        let built = availability::format_details(
            &self.available_days,
            self.available_from.trim(),
            self.available_to.trim(),
        );
        if built.is_empty() {
            self.availability_details.trim().to_string()
        } else {
            built
        }
    }

    fn specialty_list(&self) -> Vec<String> {
        self.specialties
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Sign in and persist the session. Lands on the dashboard.
pub async fn sign_in(
    state: &AppState,
    api: &ApiClient,
    form: &SignInForm,
) -> Result<Role, AppError> {
    form.validate()?;
    let res = api.login(&form.email, &form.password).await?;

    let token = res.token.clone().unwrap_or_default();
    let user = res.stored_user();
    let role = Role::from_raw(Some(
        user.as_ref()
            .and_then(|u| u.role.as_deref())
            .unwrap_or("client"),
    ));
    state.set_session(Session { token, user })?;
    state.navigate(Page::Dashboard)?;
    Ok(role)
}

/// Register an account (client or lawyer) and sign in.
///
/// A register response without a token falls back to a login call. A 409
/// gets the friendlier duplicate-email message.
pub async fn sign_up(state: &AppState, api: &ApiClient, form: &SignUpForm) -> Result<Role, AppError> {
    form.validate()?;

    let result = if form.lawyer {
        let profile = LawyerSignup {
            experience: form.experience.trim().parse().unwrap_or(0),
            location: form.location.clone(),
            court_of_practice: form.court_of_practice.clone(),
            availability_details: form.availability_string(),
            v_hour: form.v_hour.clone(),
            specialties: form.specialty_list(),
        };
        api.register_lawyer(&form.name, &form.email, &form.password, &profile)
            .await
    } else {
        api.register_client(&form.name, &form.email, &form.password)
            .await
    };
    let res = result.map_err(friendly_signup_error)?;

    let form_role = if form.lawyer { "lawyer" } else { "client" };
    let mut token = res.token.clone().unwrap_or_default();
    let mut user = res.stored_user().unwrap_or_else(|| StoredUser {
        id: res.id,
        email: Some(form.email.clone()),
        role: Some(form_role.to_string()),
        name: Some(form.name.clone()),
        lawyer_profile_id: None,
    });
    if token.is_empty() {
        let login = api.login(&form.email, &form.password).await?;
        if let Some(t) = login.token.clone().filter(|t| !t.is_empty()) {
            token = t;
        }
        if let Some(u) = login.stored_user() {
            user = u;
        }
    }

    state.set_session(Session {
        token,
        user: Some(user),
    })?;
    state.navigate(Page::Dashboard)?;
    Ok(Role::from_raw(Some(form_role)))
}

fn friendly_signup_error(e: AppError) -> AppError {
    if e.status() == Some(409) {
        AppError::Http {
            status: 409,
            message: "An account with this email already exists.".to_string(),
        }
    } else {
        e
    }
}

/// Drop the session and land on the home page.
pub fn sign_out(state: &AppState) -> Result<(), AppError> {
    state.clear_session()?;
    state.navigate(Page::Home)
}

// ---------------------------------------------------------------------------
// Lawyer directory

#[derive(Debug, Clone, Default)]
pub struct DirectoryFilters {
    pub search: String,
    pub specialty: Option<String>,
    pub location: Option<String>,
}

/// Fetch the directory into state and return the rows matching the filters.
pub async fn browse_lawyers(
    state: &AppState,
    api: &ApiClient,
    filters: &DirectoryFilters,
) -> Result<Vec<Lawyer>, AppError> {
    let lawyers = api.list_lawyers().await?;
    if let Ok(mut directory) = state.directory.lock() {
        *directory = lawyers.clone();
    }
    state.navigate(Page::Lawyers)?;
    Ok(filter_directory(&lawyers, filters))
}

/// Search matches name or any specialty; specialty filter is an exact
/// membership test; location matches court-of-practice falling back to
/// location, exactly.
pub fn filter_directory(lawyers: &[Lawyer], filters: &DirectoryFilters) -> Vec<Lawyer> {
    let q = filters.search.to_lowercase();
    lawyers
        .iter()
        .filter(|l| {
            let matches_search = l
                .name
                .as_deref()
                .map(|n| n.to_lowercase().contains(&q))
                .unwrap_or(false)
                || l.specialties.iter().any(|s| s.to_lowercase().contains(&q));
            let matches_specialty = filters
                .specialty
                .as_deref()
                .map(|wanted| l.specialties.iter().any(|s| s == wanted))
                .unwrap_or(true);
            let matches_location = filters
                .location
                .as_deref()
                .map(|wanted| l.court_or_location() == wanted)
                .unwrap_or(true);
            matches_search && matches_specialty && matches_location
        })
        .cloned()
        .collect()
}

/// Distinct specialty names across the directory, sorted.
pub fn specialty_options(lawyers: &[Lawyer]) -> Vec<String> {
    let mut options: Vec<String> = lawyers
        .iter()
        .flat_map(|l| l.specialties.iter().cloned())
        .collect();
    options.sort();
    options.dedup();
    options
}

/// Distinct court/location values across the directory, sorted.
pub fn location_options(lawyers: &[Lawyer]) -> Vec<String> {
    let mut options: Vec<String> = lawyers
        .iter()
        .map(|l| l.court_or_location().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    options.sort();
    options.dedup();
    options
}

/// Open one lawyer's profile page.
pub async fn view_lawyer(state: &AppState, api: &ApiClient, id: i64) -> Result<Lawyer, AppError> {
    let lawyer = api.lawyer_by_id(id).await?;
    state.navigate(Page::LawyerProfile { lawyer_id: id })?;
    Ok(lawyer)
}

// ---------------------------------------------------------------------------
// Booking

#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    /// Candidate time, `YYYY-MM-DDTHH:MM`.
    pub appointment_date: String,
    pub problem_description: String,
    pub notes: String,
}

/// Book an appointment with a lawyer. Requires a signed-in non-lawyer
/// session; the candidate time must fall inside the lawyer's availability.
pub async fn book_appointment(
    state: &AppState,
    api: &ApiClient,
    lawyer_id: i64,
    form: &BookingForm,
) -> Result<(), AppError> {
    match state.role() {
        Role::Anonymous => {
            return Err(AppError::Validation(
                "Please login or sign up to book an appointment.".to_string(),
            ))
        }
        Role::Lawyer => {
            return Err(AppError::Validation(
                "Lawyer accounts cannot book appointments.".to_string(),
            ))
        }
        Role::Client | Role::Admin => {}
    }
    if state.session().user.and_then(|u| u.id).is_none() {
        return Err(AppError::Validation(
            "You must be logged in to book an appointment".to_string(),
        ));
    }

    let mut problems = Vec::new();
    if form.appointment_date.is_empty() {
        problems.push("Date & time is required");
    }
    if form.problem_description.trim().is_empty() {
        problems.push("Please describe your problem");
    }
    if !problems.is_empty() {
        return Err(validation(problems));
    }
    let when = util::parse_datetime(&form.appointment_date).ok_or_else(|| {
        AppError::Validation("Date & time must be in YYYY-MM-DDTHH:MM format".to_string())
    })?;

    let lawyer = api.lawyer_by_id(lawyer_id).await?;
    let window = Availability::parse(lawyer.availability_details.as_deref().unwrap_or(""));
    if !window.allows(Some(when)) {
        return Err(AppError::Validation(
            "lawyer not available at the time you have selected".to_string(),
        ));
    }

    let notes = form.notes.trim();
    api.create_appointment(&NewAppointment {
        lawyer_profile_id: lawyer.id,
        appointment_date: form.appointment_date.clone(),
        problem_description: form.problem_description.clone(),
        notes: if notes.is_empty() {
            None
        } else {
            Some(notes.to_string())
        },
    })
    .await
}

// ---------------------------------------------------------------------------
// Info hub

/// Open the hub on a category (`all`/empty means no filter) and load the
/// first page of articles.
pub async fn open_hub(
    state: &AppState,
    api: &ApiClient,
    category: &str,
) -> Result<(), AppError> {
    let normalized = category.trim().to_lowercase();
    let server_category = match normalized.as_str() {
        "" | "all" => None,
        other => Some(other.to_string()),
    };
    if let Ok(mut current) = state.hub_category.lock() {
        *current = server_category.clone();
    }
    if let Ok(mut posts) = state.posts.lock() {
        posts.reset();
    }
    load_hub_page(state, api, 0).await?;
    state.navigate(Page::Hub)
}

/// Load one more page of articles into the hub feed.
pub async fn load_more_posts(state: &AppState, api: &ApiClient) -> Result<(), AppError> {
    let page = state.posts.lock().map(|p| p.next_page()).unwrap_or(0);
    load_hub_page(state, api, page).await
}

async fn load_hub_page(state: &AppState, api: &ApiClient, page: u32) -> Result<(), AppError> {
    let category = state
        .hub_category
        .lock()
        .map(|c| c.clone())
        .unwrap_or_default();
    let response = api
        .list_info_hub(category.as_deref(), page, state.config.page_size)
        .await?;
    if let Ok(mut posts) = state.posts.lock() {
        posts.absorb(page, response);
    }
    Ok(())
}

/// Client-side narrowing on top of the server category filter, matching
/// title or content against the search text.
pub fn filter_posts<'a>(
    posts: &'a [InfoHubPost],
    category: Option<&str>,
    search: &str,
) -> Vec<&'a InfoHubPost> {
    let q = search.to_lowercase();
    posts
        .iter()
        .filter(|p| {
            let matches_category = category
                .map(|c| p.category.as_deref().unwrap_or("").to_lowercase() == c)
                .unwrap_or(true);
            let matches_search = p
                .title
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(&q)
                || p.content
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(&q);
            matches_category && matches_search
        })
        .collect()
}

/// Open a single article page, re-fetching the article.
pub async fn open_post(state: &AppState, api: &ApiClient, id: i64) -> Result<InfoHubPost, AppError> {
    let post = api.info_hub_by_id(id).await?;
    state.navigate(Page::HubDetail { post_id: id })?;
    Ok(post)
}

// ---------------------------------------------------------------------------
// Dashboard

/// What the dashboard shows for the current role.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// Not signed in; the page offers login/register instead of data.
    Anonymous,
    /// Client appointments are in the shared feed.
    Client,
    /// Lawyer appointments are in the shared feed; `lawyer_id` is the id
    /// the feed was loaded with, `None` when no profile could be resolved.
    Lawyer { lawyer_id: Option<i64> },
    /// Admin article management; articles are in the posts feed.
    Admin,
}

/// Open the role-gated dashboard and load its first page of data.
pub async fn open_dashboard(state: &AppState, api: &ApiClient) -> Result<DashboardView, AppError> {
    state.navigate(Page::Dashboard)?;
    match state.role() {
        Role::Anonymous => Ok(DashboardView::Anonymous),
        Role::Client => {
            if let Ok(mut feed) = state.appointments.lock() {
                feed.reset();
            }
            dashboard::load_client_appointments(state, api, 0).await?;
            Ok(DashboardView::Client)
        }
        Role::Lawyer => {
            if let Ok(mut feed) = state.appointments.lock() {
                feed.reset();
            }
            let resolved = dashboard::resolve_lawyer_id(state, api).await;
            if let Some(id) = resolved.id() {
                dashboard::load_lawyer_appointments(state, api, id, 0).await?;
            }
            Ok(DashboardView::Lawyer {
                lawyer_id: resolved.id(),
            })
        }
        Role::Admin => {
            if let Ok(mut current) = state.hub_category.lock() {
                *current = None;
            }
            if let Ok(mut posts) = state.posts.lock() {
                posts.reset();
            }
            load_hub_page(state, api, 0).await?;
            Ok(DashboardView::Admin)
        }
    }
}

/// Load the next page of dashboard appointments for the given view.
pub async fn load_more_appointments(
    state: &AppState,
    api: &ApiClient,
    view: &DashboardView,
) -> Result<(), AppError> {
    let page = state
        .appointments
        .lock()
        .map(|f| f.next_page())
        .unwrap_or(0);
    match view {
        DashboardView::Client => dashboard::load_client_appointments(state, api, page).await,
        DashboardView::Lawyer {
            lawyer_id: Some(id),
        } => dashboard::load_lawyer_appointments(state, api, *id, page).await,
        DashboardView::Lawyer { lawyer_id: None } => Err(AppError::Validation(
            "No linked lawyer profile found for this account.".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Change an appointment's status from a dashboard control label
/// (`accepted`, `on progress`, `done`, `rejected`). Returns `false` when
/// the label maps to no status, leaving everything untouched.
pub async fn change_appointment_status(
    state: &AppState,
    api: &ApiClient,
    appointment_id: i64,
    label: &str,
) -> Result<bool, AppError> {
    let Some(status) = AppointmentStatus::from_ui_label(label) else {
        return Ok(false);
    };
    dashboard::change_status(state, api, appointment_id, status).await?;
    Ok(true)
}

/// Admin form for creating or editing an article. `id` present means edit.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub category: String,
    pub date: String,
}

impl PostForm {
    fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty()
            || self.content.trim().is_empty()
            || self.category.trim().is_empty()
            || self.date.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Title, category, date and content are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Create or update an article, then reload the list from page 0.
pub async fn save_post(
    state: &AppState,
    api: &ApiClient,
    form: &PostForm,
) -> Result<InfoHubPost, AppError> {
    form.validate()?;
    let draft = PostDraft {
        title: form.title.clone(),
        content: form.content.clone(),
        category: form.category.clone(),
        date: Some(form.date.clone()),
    };
    let saved = match form.id {
        Some(id) => api.update_info_hub(id, &draft).await?,
        None => api.create_info_hub(&draft).await?,
    };
    if let Ok(mut posts) = state.posts.lock() {
        posts.reset();
    }
    load_hub_page(state, api, 0).await?;
    Ok(saved)
}

/// Delete an article, then reload the list from page 0.
pub async fn delete_post(state: &AppState, api: &ApiClient, id: i64) -> Result<(), AppError> {
    api.delete_info_hub(id).await?;
    if let Ok(mut posts) = state.posts.lock() {
        posts.reset();
    }
    load_hub_page(state, api, 0).await
}

// ---------------------------------------------------------------------------
// Document review

/// Load a document from disk into the review pipeline.
pub fn load_document(state: &AppState, path: &Path) -> Result<DocumentInput, AppError> {
    state.navigate(Page::Documents)?;
    state.set_analysis(AnalysisState::Ingesting);
    match ingest::load_document(path) {
        Ok(input) => {
            state.set_analysis(AnalysisState::Ready(input.clone()));
            Ok(input)
        }
        Err(e) => {
            state.set_analysis(AnalysisState::Failed {
                input: None,
                message: e.to_string(),
            });
            Err(e)
        }
    }
}

/// Analyze the loaded document. The loaded input survives a failure so a
/// retry (e.g. after supplying an API key) skips re-reading the file.
pub async fn analyze_document(state: &AppState) -> Result<AnalysisReport, AppError> {
    let Some(input) = state.analysis_state().document().cloned() else {
        return Err(AppError::Validation(
            "Please provide a document before analyzing.".to_string(),
        ));
    };
    let client = match GeminiClient::from_env_or_storage(&state.config.gemini_model, &state.storage)
    {
        Ok(client) => client,
        Err(e) => {
            state.set_analysis(AnalysisState::Failed {
                input: Some(input),
                message: e.to_string(),
            });
            return Err(e);
        }
    };
    state.set_analysis(AnalysisState::Analyzing(input.clone()));
    match client.analyze(&input).await {
        Ok(report) => {
            state.set_analysis(AnalysisState::Done {
                input,
                report: report.clone(),
            });
            Ok(report)
        }
        Err(e) => {
            state.set_analysis(AnalysisState::Failed {
                input: Some(input),
                message: e.to_string(),
            });
            Err(e)
        }
    }
}

/// Store the Gemini API key for future runs.
pub fn set_gemini_key(state: &AppState, key: &str) -> Result<(), AppError> {
    if key.trim().is_empty() {
        return Err(AppError::Validation("API key cannot be empty".to_string()));
    }
    state.storage.save_gemini_key(key)
}

/// Remove the stored Gemini API key.
pub fn clear_gemini_key(state: &AppState) -> Result<(), AppError> {
    state.storage.delete_gemini_key()
}

/// Drop any loaded document or result and return the pipeline to idle.
pub fn reset_analysis(state: &AppState) {
    state.set_analysis(AnalysisState::Idle);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::AppConfig;
    use crate::storage::Storage;

    fn lawyer(id: i64, name: &str, court: Option<&str>, specs: &[&str]) -> Lawyer {
        Lawyer {
            id,
            name: Some(name.to_string()),
            experience: Some(5),
            location: Some("Dhaka".to_string()),
            court_of_practice: court.map(str::to_string),
            availability_details: None,
            v_hour: None,
            specialties: specs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn offline(dir: &Path) -> (AppState, ApiClient) {
        let storage = Arc::new(Storage::open(dir.join("state")));
        let config = AppConfig::default();
        let api = ApiClient::new(&config, Arc::clone(&storage));
        (AppState::new(config, storage), api)
    }

    fn signed_in(state: &AppState, role: &str, id: Option<i64>) {
        state
            .set_session(Session {
                token: "jwt".to_string(),
                user: Some(StoredUser {
                    id,
                    role: Some(role.to_string()),
                    ..StoredUser::default()
                }),
            })
            .unwrap();
    }

    #[test]
    fn test_sign_in_form_rejects_bad_input() {
        let err = SignInForm {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        }
        .validate()
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Valid email required"));
        assert!(msg.contains("Min 6 characters"));

        assert!(SignInForm {
            email: "a@b.co".to_string(),
            password: "hunter2".to_string(),
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn test_sign_up_form_lawyer_requirements() {
        let mut form = SignUpForm {
            name: "Nadia".to_string(),
            email: "n@firm.example".to_string(),
            password: "secret9".to_string(),
            confirm: "secret9".to_string(),
            lawyer: true,
            ..SignUpForm::default()
        };
        let msg = form.validate().unwrap_err().to_string();
        assert!(msg.contains("Experience (years) required"));
        assert!(msg.contains("Location required"));
        assert!(msg.contains("Court of practice required"));

        form.experience = "8".to_string();
        form.location = "Dhaka".to_string();
        form.court_of_practice = "Dhaka High Court".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_sign_up_form_confirm_mismatch() {
        let form = SignUpForm {
            name: "Sam".to_string(),
            email: "s@b.co".to_string(),
            password: "secret9".to_string(),
            confirm: "secret8".to_string(),
            ..SignUpForm::default()
        };
        assert!(form
            .validate()
            .unwrap_err()
            .to_string()
            .contains("Passwords do not match"));
    }

    #[test]
    fn test_availability_string_prefers_structured_input() {
        let form = SignUpForm {
            available_days: vec!["Monday".to_string(), "Tuesday".to_string()],
            available_from: "09:00".to_string(),
            available_to: "17:00".to_string(),
            availability_details: "whenever".to_string(),
            ..SignUpForm::default()
        };
        assert_eq!(form.availability_string(), "Monday, Tuesday, 09:00–17:00");

        let free_text_only = SignUpForm {
            availability_details: "  Mon–Fri, 10:00–16:00 ".to_string(),
            ..SignUpForm::default()
        };
        assert_eq!(free_text_only.availability_string(), "Mon–Fri, 10:00–16:00");
    }

    #[test]
    fn test_specialty_list_splits_and_trims() {
        let form = SignUpForm {
            specialties: " Family Law , Civil ,, ".to_string(),
            ..SignUpForm::default()
        };
        assert_eq!(form.specialty_list(), vec!["Family Law", "Civil"]);
        assert!(SignUpForm::default().specialty_list().is_empty());
    }

    #[test]
    fn test_friendly_signup_error_rewrites_conflict_only() {
        let friendly = friendly_signup_error(AppError::Http {
            status: 409,
            message: "Email taken".to_string(),
        });
        assert_eq!(
            friendly.to_string(),
            "An account with this email already exists."
        );

        let other = friendly_signup_error(AppError::Http {
            status: 400,
            message: "Bad request".to_string(),
        });
        assert_eq!(other.to_string(), "Bad request");
    }

    #[test]
    fn test_filter_directory_search_and_filters() {
        let lawyers = vec![
            lawyer(1, "A. Rahman", Some("Dhaka High Court"), &["Family Law"]),
            lawyer(2, "B. Chowdhury", None, &["Criminal Law"]),
            lawyer(3, "C. Karim", Some("Supreme Court"), &["Family Law", "Civil"]),
        ];

        let by_name = filter_directory(
            &lawyers,
            &DirectoryFilters {
                search: "rahman".to_string(),
                ..DirectoryFilters::default()
            },
        );
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, 1);

        // Search also matches specialties.
        let by_spec_text = filter_directory(
            &lawyers,
            &DirectoryFilters {
                search: "criminal".to_string(),
                ..DirectoryFilters::default()
            },
        );
        assert_eq!(by_spec_text.len(), 1);
        assert_eq!(by_spec_text[0].id, 2);

        let by_specialty = filter_directory(
            &lawyers,
            &DirectoryFilters {
                specialty: Some("Family Law".to_string()),
                ..DirectoryFilters::default()
            },
        );
        assert_eq!(by_specialty.len(), 2);

        // Location filter matches court-of-practice, falling back to location.
        let by_location = filter_directory(
            &lawyers,
            &DirectoryFilters {
                location: Some("Dhaka".to_string()),
                ..DirectoryFilters::default()
            },
        );
        assert_eq!(by_location.len(), 1);
        assert_eq!(by_location[0].id, 2);
    }

    #[test]
    fn test_filter_directory_empty_search_matches_all() {
        let lawyers = vec![
            lawyer(1, "A", None, &[]),
            lawyer(2, "B", None, &["Civil"]),
        ];
        let all = filter_directory(&lawyers, &DirectoryFilters::default());
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_directory_option_lists() {
        let lawyers = vec![
            lawyer(1, "A", Some("Dhaka High Court"), &["Family Law", "Civil"]),
            lawyer(2, "B", None, &["Civil"]),
        ];
        assert_eq!(specialty_options(&lawyers), vec!["Civil", "Family Law"]);
        assert_eq!(location_options(&lawyers), vec!["Dhaka", "Dhaka High Court"]);
    }

    #[test]
    fn test_filter_posts_category_and_search() {
        let posts = vec![
            InfoHubPost {
                id: 1,
                title: Some("Property deeds explained".to_string()),
                content: Some("Registration steps".to_string()),
                category: Some("Property".to_string()),
                date: Some("2024-01-01".to_string()),
            },
            InfoHubPost {
                id: 2,
                title: Some("Divorce process".to_string()),
                content: Some("Family court procedure".to_string()),
                category: Some("family".to_string()),
                date: None,
            },
        ];

        // Category matches case-insensitively on the post side.
        let property = filter_posts(&posts, Some("property"), "");
        assert_eq!(property.len(), 1);
        assert_eq!(property[0].id, 1);

        // Search matches content, not just titles.
        let court = filter_posts(&posts, None, "court");
        assert_eq!(court.len(), 1);
        assert_eq!(court[0].id, 2);

        assert_eq!(filter_posts(&posts, None, "").len(), 2);
    }

    #[test]
    fn test_hub_categories_cover_known_ids() {
        let ids: Vec<&str> = HUB_CATEGORIES.iter().map(|(id, _)| *id).collect();
        assert_eq!(
            ids,
            vec!["all", "property", "family", "business", "criminal", "civil", "labor"]
        );
    }

    #[test]
    fn test_post_form_requires_all_fields() {
        let mut form = PostForm {
            title: "T".to_string(),
            content: "C".to_string(),
            category: "family".to_string(),
            date: " ".to_string(),
            ..PostForm::default()
        };
        assert!(form.validate().is_err());

        form.date = "2024-03-01".to_string();
        assert!(form.validate().is_ok());
    }

    // The gates below must all reject before any request leaves the client;
    // nothing here has a backend to talk to.

    #[tokio::test]
    async fn test_booking_gates_fire_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let (state, api) = offline(dir.path());

        let err = book_appointment(&state, &api, 1, &BookingForm::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please login or sign up to book an appointment."
        );

        signed_in(&state, "LAWYER", Some(5));
        let err = book_appointment(&state, &api, 1, &BookingForm::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Lawyer accounts cannot book appointments.");

        signed_in(&state, "USER", None);
        let err = book_appointment(&state, &api, 1, &BookingForm::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "You must be logged in to book an appointment"
        );

        signed_in(&state, "USER", Some(5));
        let err = book_appointment(&state, &api, 1, &BookingForm::default())
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Date & time is required"));
        assert!(msg.contains("Please describe your problem"));
    }

    #[tokio::test]
    async fn test_booking_rejects_bad_datetime_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let (state, api) = offline(dir.path());
        signed_in(&state, "USER", Some(5));

        let form = BookingForm {
            appointment_date: "tomorrow noon".to_string(),
            problem_description: "Land dispute".to_string(),
            notes: String::new(),
        };
        let err = book_appointment(&state, &api, 1, &form).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Date & time must be in YYYY-MM-DDTHH:MM format"
        );
    }

    #[tokio::test]
    async fn test_analyze_without_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _api) = offline(dir.path());
        let err = analyze_document(&state).await.unwrap_err();
        assert_eq!(err.to_string(), "Please provide a document before analyzing.");
    }

    #[tokio::test]
    async fn test_unknown_status_label_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let (state, api) = offline(dir.path());
        signed_in(&state, "LAWYER", Some(5));
        let changed = change_appointment_status(&state, &api, 3, "archived")
            .await
            .unwrap();
        assert!(!changed);
    }

    #[tokio::test]
    async fn test_load_more_without_profile_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (state, api) = offline(dir.path());
        let err = load_more_appointments(
            &state,
            &api,
            &DashboardView::Lawyer { lawyer_id: None },
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "No linked lawyer profile found for this account."
        );
    }
}
