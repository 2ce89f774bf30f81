//! Plain-text page rendering. Every page the shell can land on has a
//! renderer here; commands produce data, these turn it into a screen.

use crate::analysis::AnalysisReport;
use crate::commands::{self, DashboardView, DirectoryFilters, HUB_CATEGORIES};
use crate::session::{Role, Session};
use crate::state::{AnalysisState, AppState};
use crate::types::{Appointment, AppointmentStatus, InfoHubPost, Lawyer};
use crate::util;

pub const BOOKING_CONFIRMATION: &str =
    "Appointment request submitted. We'll notify you once it's confirmed.";

pub const ANALYSIS_DISCLAIMER: &str = "This AI analysis is for informational purposes only and \
     does not constitute legal advice. It may contain errors or omissions. Always consult with a \
     qualified legal professional for any legal matters or before taking any action based on this \
     analysis.";

fn heading(out: &mut String, title: &str, tagline: &str) {
    out.push_str(&format!("== {} ==\n", title));
    if !tagline.is_empty() {
        out.push_str(tagline);
        out.push('\n');
    }
    out.push('\n');
}

pub fn home_page(session: &Session) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        "Your Gateway to Legal Justice in Bangladesh",
        "Connect with qualified legal professionals, get AI-powered case analysis, and manage \
         your legal matters efficiently.",
    );
    out.push_str("  lawyers    Find Legal Professionals: search qualified lawyers by specialty,\n");
    out.push_str("             location, and court of practice\n");
    out.push_str("  hub        Legal Information Hub: free legal information, guides, and FAQs\n");
    out.push_str("  review     Document Analysis: upload legal documents for AI-powered\n");
    out.push_str("             analysis, summaries, and warnings\n");
    out.push_str("  dashboard  Appointments and account\n\n");
    match session.role() {
        Role::Anonymous => {
            out.push_str("Not signed in. Use `login` or `signup` to get started.\n");
        }
        role => {
            let name = session
                .user
                .as_ref()
                .and_then(|u| u.name.clone())
                .unwrap_or_else(|| "there".to_string());
            out.push_str(&format!("Signed in as {} ({}).\n", name, role.as_str()));
        }
    }
    out
}

pub fn directory_page(shown: &[Lawyer], role: Role) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        "Find Legal Professionals",
        "Search our directory of qualified lawyers across Bangladesh",
    );
    out.push_str(&format!("Showing {} lawyers\n\n", shown.len()));
    for lawyer in shown {
        lawyer_card(&mut out, lawyer);
    }
    if role == Role::Anonymous && !shown.is_empty() {
        out.push_str("Login to book consultation\n");
    }
    out
}

fn lawyer_card(out: &mut String, lawyer: &Lawyer) {
    out.push_str(&format!(
        "[{}] {}\n",
        lawyer.id,
        lawyer.name.as_deref().unwrap_or("")
    ));
    if let Some(years) = lawyer.experience {
        out.push_str(&format!("    {} years experience\n", years));
    }
    let place = lawyer.court_or_location();
    if !place.is_empty() {
        out.push_str(&format!("    {}\n", place));
    }
    out.push_str(&format!(
        "    {}\n",
        lawyer
            .v_hour
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or("Consultation fee N/A")
    ));
    if !lawyer.specialties.is_empty() {
        out.push_str(&format!("    {}\n", lawyer.specialties.join(", ")));
    }
    if let Some(avail) = lawyer.availability_details.as_deref().filter(|a| !a.is_empty()) {
        out.push_str(&format!("    {}\n", avail));
    }
    out.push('\n');
}

pub fn profile_page(lawyer: &Lawyer, role: Role) -> String {
    let mut out = String::new();
    heading(&mut out, lawyer.name.as_deref().unwrap_or("Lawyer Profile"), "");
    if let Some(years) = lawyer.experience {
        out.push_str(&format!("Experience:   {} years\n", years));
    }
    if let Some(location) = lawyer.location.as_deref().filter(|l| !l.is_empty()) {
        out.push_str(&format!("Location:     {}\n", location));
    }
    if let Some(court) = lawyer.court_of_practice.as_deref().filter(|c| !c.is_empty()) {
        out.push_str(&format!("Court:        {}\n", court));
    }
    out.push_str(&format!(
        "Consultation: {}\n",
        lawyer
            .v_hour
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or("Consultation fee N/A")
    ));
    out.push_str(&format!(
        "Availability: {}\n",
        lawyer
            .availability_details
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or("—")
    ));
    if !lawyer.specialties.is_empty() {
        out.push_str(&format!("Specialties:  {}\n", lawyer.specialties.join(", ")));
    }
    out.push('\n');
    match role {
        Role::Anonymous => out.push_str("Please login or sign up to book an appointment.\n"),
        Role::Lawyer => {}
        Role::Client | Role::Admin => {
            out.push_str(&format!("Book a consultation: book {}\n", lawyer.id))
        }
    }
    out
}

pub fn hub_page(shown: &[&InfoHubPost], category: &str, has_more: bool) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        "Legal Information Hub",
        "Free access to legal information, guides, and FAQs",
    );
    let category_name = HUB_CATEGORIES
        .iter()
        .find(|(id, _)| *id == category)
        .map(|(_, name)| *name)
        .unwrap_or(category);
    out.push_str(&format!("Category: {}\n\n", category_name));
    if shown.is_empty() {
        out.push_str("No articles found.\n");
        return out;
    }
    for post in shown {
        out.push_str(&format!(
            "[{}] {}\n",
            post.id,
            post.title.as_deref().unwrap_or("")
        ));
        out.push_str(&format!(
            "    {} • {}\n",
            post.category.as_deref().filter(|c| !c.is_empty()).unwrap_or("general"),
            post.date.as_deref().unwrap_or("")
        ));
        out.push_str(&format!("    {}\n\n", preview(post.content.as_deref().unwrap_or(""))));
    }
    if has_more {
        out.push_str("More articles available: hub more\n");
    }
    out
}

/// First 240 characters of the content, single-line, with an ellipsis when
/// truncated.
fn preview(content: &str) -> String {
    let flat = content.replace('\n', " ");
    let mut cut = flat.chars().take(240).collect::<String>();
    if flat.chars().count() > 240 {
        cut.push('…');
    }
    cut
}

pub fn post_page(post: &InfoHubPost) -> String {
    let mut out = String::new();
    heading(&mut out, post.title.as_deref().unwrap_or(""), "");
    out.push_str(&format!(
        "{} • {}\n\n",
        post.category.as_deref().filter(|c| !c.is_empty()).unwrap_or("general"),
        post.date.as_deref().unwrap_or("")
    ));
    out.push_str(post.content.as_deref().unwrap_or(""));
    out.push('\n');
    out
}

pub fn dashboard_anonymous() -> String {
    let mut out = String::new();
    heading(
        &mut out,
        "Access Your Dashboard",
        "Register or login to access your personalized legal dashboard",
    );
    out.push_str("Track your cases, manage appointments, and access your legal documents\n");
    out.push_str("Use `login` or `signup` to continue.\n");
    out
}

pub fn client_dashboard(items: &[Appointment], has_more: bool) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        "My Dashboard",
        "Welcome back! Here's what's happening with your legal matters.",
    );
    out.push_str("My Appointments\n\n");
    if items.is_empty() {
        out.push_str("No appointments yet.\n");
        return out;
    }
    for appt in items {
        // Clients see the raw backend status.
        out.push_str(&format!(
            "#{}  {}  [{}]\n",
            appt.id,
            appt.lawyer_name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Lawyer"),
            if appt.status.is_empty() { "PENDING" } else { &appt.status }
        ));
        appointment_details(&mut out, appt, true);
    }
    if has_more {
        out.push_str("More appointments available: dashboard more\n");
    }
    out
}

pub fn lawyer_dashboard(items: &[Appointment], has_more: bool, resolved_id: Option<i64>) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        "Lawyer Dashboard",
        "Manage your appointments and case activities.",
    );
    out.push_str(&format!(
        "Resolved ID: {}\n",
        resolved_id.map(|id| id.to_string()).unwrap_or_else(|| "—".to_string())
    ));
    out.push_str("My Appointments\n\n");
    if items.is_empty() {
        if resolved_id.is_some() {
            out.push_str("No appointments to show.\n");
        } else {
            out.push_str("No linked lawyer profile found for this account.\n");
        }
        return out;
    }
    for appt in items {
        out.push_str(&format!(
            "#{}  {}  [{}]\n",
            appt.id,
            appt.client_name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Client"),
            AppointmentStatus::display_label(&appt.status)
        ));
        appointment_details(&mut out, appt, false);
    }
    if has_more {
        out.push_str("More appointments available: dashboard more\n");
    }
    out.push_str(
        "Update one with: dashboard status <id> <accepted|on progress|done|rejected>\n",
    );
    out
}

fn appointment_details(out: &mut String, appt: &Appointment, with_notes: bool) {
    let when = appt
        .appointment_date
        .as_deref()
        .map(util::format_datetime)
        .unwrap_or_else(|| "—".to_string());
    out.push_str(&format!("    {}\n", when));
    if let Some(problem) = appt.problem_description.as_deref().filter(|p| !p.is_empty()) {
        out.push_str(&format!("    {}\n", problem));
    }
    if with_notes {
        if let Some(notes) = appt.notes.as_deref().filter(|n| !n.is_empty()) {
            out.push_str(&format!("    Notes: {}\n", notes));
        }
    }
    out.push('\n');
}

pub fn admin_dashboard(items: &[InfoHubPost], has_more: bool) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        "Admin Dashboard",
        "Manage InfoHub content and administrative tasks.",
    );
    out.push_str("Posts\n\n");
    if items.is_empty() {
        out.push_str("No posts yet.\n");
    }
    for post in items {
        out.push_str(&format!(
            "[{}] {}\n    {} • {}\n",
            post.id,
            post.title.as_deref().unwrap_or(""),
            post.category.as_deref().unwrap_or(""),
            post.date.as_deref().unwrap_or("")
        ));
    }
    out.push('\n');
    if has_more {
        out.push_str("More posts available: dashboard more\n");
    }
    out.push_str("Manage with: post create | post edit <id> | post delete <id>\n");
    out
}

// ---------------------------------------------------------------------------
// Screens: snapshot live state, then render with the pure functions above.
// Shared between the interactive shell and the one-shot subcommands.

pub fn directory_screen(state: &AppState, filters: &DirectoryFilters) -> String {
    let directory = state
        .directory
        .lock()
        .map(|d| d.clone())
        .unwrap_or_default();
    let shown = commands::filter_directory(&directory, filters);
    directory_page(&shown, state.role())
}

pub fn hub_screen(state: &AppState, search: &str) -> String {
    let (items, has_more) = state
        .posts
        .lock()
        .map(|f| (f.items().to_vec(), f.has_more()))
        .unwrap_or_default();
    let category = state
        .hub_category
        .lock()
        .map(|c| c.clone())
        .unwrap_or_default();
    let shown = commands::filter_posts(&items, category.as_deref(), search);
    hub_page(&shown, category.as_deref().unwrap_or("all"), has_more)
}

pub fn dashboard_screen(state: &AppState, view: &DashboardView) -> String {
    match view {
        DashboardView::Anonymous => dashboard_anonymous(),
        DashboardView::Client => {
            let (items, has_more) = appointments_snapshot(state);
            client_dashboard(&items, has_more)
        }
        DashboardView::Lawyer { lawyer_id } => {
            let (items, has_more) = appointments_snapshot(state);
            lawyer_dashboard(&items, has_more, *lawyer_id)
        }
        DashboardView::Admin => {
            let (items, has_more) = state
                .posts
                .lock()
                .map(|f| (f.items().to_vec(), f.has_more()))
                .unwrap_or_default();
            admin_dashboard(&items, has_more)
        }
    }
}

fn appointments_snapshot(state: &AppState) -> (Vec<Appointment>, bool) {
    state
        .appointments
        .lock()
        .map(|f| (f.items().to_vec(), f.has_more()))
        .unwrap_or_default()
}

pub fn analysis_page(state: &AnalysisState) -> String {
    let mut out = String::new();
    heading(&mut out, "AI Document Review", "Upload a file to begin.");
    match state {
        AnalysisState::Idle => {
            out.push_str("No document loaded. Load one with: review load <path>\n");
            out.push_str("Supported: TXT, PDF, PNG, JPG, JPEG\n");
        }
        AnalysisState::Ingesting => {
            out.push_str("Reading the document...\n");
        }
        AnalysisState::Ready(input) => {
            out.push_str(&format!("Loaded: {}\n", input.name()));
            out.push_str("Run the analysis with: review analyze\n");
        }
        AnalysisState::Analyzing(input) => {
            out.push_str(&format!("Loaded: {}\n", input.name()));
            out.push_str("Analyzing your document...\n");
        }
        AnalysisState::Done { input, report } => {
            out.push_str(&format!("Analyzed: {}\n\n", input.name()));
            out.push_str(&report_sections(report));
        }
        AnalysisState::Failed { input, message } => {
            if let Some(input) = input {
                out.push_str(&format!("Loaded: {}\n", input.name()));
            }
            out.push_str(&format!("Error: {}\n", message));
        }
    }
    out
}

pub fn report_sections(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push_str("Document Summary\n");
    out.push_str(&format!("  {}\n\n", report.summary));

    out.push_str("Key Suggestions\n");
    if report.suggestions.is_empty() {
        out.push_str("  No suggestions found.\n");
    }
    for suggestion in &report.suggestions {
        out.push_str(&format!("  - {}\n    {}\n", suggestion.title, suggestion.details));
    }
    out.push('\n');

    out.push_str(&format!(
        "Potential Warnings ({} warning(s) found)\n",
        report.warnings.len()
    ));
    if report.warnings.is_empty() {
        out.push_str("  No warnings found.\n");
    }
    for warning in &report.warnings {
        out.push_str(&format!("  ! {}\n    {}\n", warning.clause, warning.reason));
    }
    out.push('\n');

    out.push_str("Disclaimer: ");
    out.push_str(ANALYSIS_DISCLAIMER);
    out.push('\n');
    out
}
