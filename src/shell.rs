//! Interactive shell: reads commands from stdin and drives the page loop.
//!
//! The shell owns the per-run view caches (fetched lawyer profile, open
//! article, dashboard view) and re-renders the current page after every
//! command. All network work goes through the command layer; errors print
//! inline next to the command that caused them.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::api::ApiClient;
use crate::commands::{
    self, BookingForm, DashboardView, DirectoryFilters, PostForm, SignInForm, SignUpForm,
    HUB_CATEGORIES,
};
use crate::error::AppError;
use crate::nav::Page;
use crate::render;
use crate::session::Role;
use crate::state::AppState;
use crate::types::{InfoHubPost, Lawyer};

pub struct Shell {
    state: AppState,
    api: ApiClient,
    /// Active directory filters, reapplied client-side without a refetch.
    filters: DirectoryFilters,
    /// Client-side search over the loaded hub articles.
    hub_search: String,
    lawyer: Option<Lawyer>,
    post: Option<InfoHubPost>,
    dashboard: Option<DashboardView>,
}

impl Shell {
    pub fn new(state: AppState, api: ApiClient) -> Self {
        Self {
            state,
            api,
            filters: DirectoryFilters::default(),
            hub_search: String::new(),
            lawyer: None,
            post: None,
            dashboard: None,
        }
    }

    pub async fn run(&mut self) -> Result<(), AppError> {
        self.restore().await;
        self.print_page();
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            print!("{}> ", self.state.current_page().name());
            io::stdout().flush()?;
            line.clear();
            if stdin.read_line(&mut line)? == 0 {
                break;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed == "quit" || trimmed == "exit" {
                break;
            }
            if let Err(e) = self.dispatch(trimmed).await {
                log::debug!("Command failed ({}): {}", e.kind(), e);
                println!("Error: {}", e);
            }
        }
        Ok(())
    }

    /// Re-fetch whatever the persisted page needs. Failures are logged and
    /// swallowed; the page still opens, just without its data.
    async fn restore(&mut self) {
        match self.state.current_page() {
            Page::LawyerProfile { lawyer_id } => match self.api.lawyer_by_id(lawyer_id).await {
                Ok(lawyer) => self.lawyer = Some(lawyer),
                Err(e) => log::warn!("Could not restore lawyer {}: {}", lawyer_id, e),
            },
            Page::HubDetail { post_id } => match self.api.info_hub_by_id(post_id).await {
                Ok(post) => self.post = Some(post),
                Err(e) => log::warn!("Could not restore article {}: {}", post_id, e),
            },
            Page::Lawyers => {
                if let Err(e) =
                    commands::browse_lawyers(&self.state, &self.api, &self.filters).await
                {
                    log::warn!("Could not restore the lawyer directory: {}", e);
                }
            }
            Page::Hub => {
                if let Err(e) = commands::open_hub(&self.state, &self.api, "all").await {
                    log::warn!("Could not restore the article list: {}", e);
                }
            }
            Page::Dashboard => match commands::open_dashboard(&self.state, &self.api).await {
                Ok(view) => self.dashboard = Some(view),
                Err(e) => log::warn!("Could not restore the dashboard: {}", e),
            },
            Page::Home | Page::Documents | Page::Auth => {}
        }
    }

    async fn dispatch(&mut self, line: &str) -> Result<(), AppError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((head, rest)) = tokens.split_first() else {
            return Ok(());
        };
        match (*head, rest) {
            ("help", _) => self.print_help(),
            ("home", _) => {
                self.state.navigate(Page::Home)?;
                self.print_page();
            }
            ("lawyers", rest) => {
                self.filters = DirectoryFilters {
                    search: rest.join(" "),
                    ..DirectoryFilters::default()
                };
                commands::browse_lawyers(&self.state, &self.api, &self.filters).await?;
                self.print_page();
            }
            ("specialty", []) => {
                let options = commands::specialty_options(&self.directory_snapshot());
                println!("Specialties: {}", options.join(", "));
            }
            ("specialty", rest) => {
                let wanted = rest.join(" ");
                self.filters.specialty = if wanted.eq_ignore_ascii_case("all") {
                    None
                } else {
                    Some(wanted)
                };
                self.print_page();
            }
            ("location", []) => {
                let options = commands::location_options(&self.directory_snapshot());
                println!("Locations: {}", options.join(", "));
            }
            ("location", rest) => {
                let wanted = rest.join(" ");
                self.filters.location = if wanted.eq_ignore_ascii_case("all") {
                    None
                } else {
                    Some(wanted)
                };
                self.print_page();
            }
            ("view", rest) => {
                let id = parse_id(rest, "view <lawyer-id>")?;
                self.lawyer = Some(commands::view_lawyer(&self.state, &self.api, id).await?);
                self.print_page();
            }
            ("book", rest) => self.book(rest).await?,
            ("hub", ["more"]) => {
                commands::load_more_posts(&self.state, &self.api).await?;
                self.print_page();
            }
            ("hub", ["search", q @ ..]) => {
                self.hub_search = q.join(" ");
                self.print_page();
            }
            ("hub", rest) => {
                let category = rest.first().copied().unwrap_or("all");
                if !HUB_CATEGORIES.iter().any(|(id, _)| *id == category) {
                    return Err(AppError::Validation(format!(
                        "Unknown category '{}'. One of: {}",
                        category,
                        category_ids().join(", ")
                    )));
                }
                self.hub_search.clear();
                commands::open_hub(&self.state, &self.api, category).await?;
                self.print_page();
            }
            ("read", rest) => {
                let id = parse_id(rest, "read <article-id>")?;
                self.post = Some(commands::open_post(&self.state, &self.api, id).await?);
                self.print_page();
            }
            ("dashboard", []) => {
                self.dashboard = Some(commands::open_dashboard(&self.state, &self.api).await?);
                self.print_page();
            }
            ("dashboard", ["more"]) => {
                let Some(view) = self.dashboard.clone() else {
                    return Err(AppError::Validation("Open the dashboard first.".to_string()));
                };
                match view {
                    DashboardView::Admin => {
                        commands::load_more_posts(&self.state, &self.api).await?
                    }
                    ref view => {
                        commands::load_more_appointments(&self.state, &self.api, view).await?
                    }
                }
                self.print_page();
            }
            ("dashboard", ["status", raw_id, label @ ..]) => {
                let id = raw_id
                    .parse::<i64>()
                    .map_err(|_| usage("dashboard status <id> <label>"))?;
                let label = label.join(" ");
                if commands::change_appointment_status(&self.state, &self.api, id, &label).await? {
                    self.print_page();
                } else {
                    println!(
                        "Unknown status '{}'. One of: accepted, on progress, done, rejected.",
                        label
                    );
                }
            }
            ("post", rest) => self.post_admin(rest).await?,
            ("review", rest) => self.review(rest).await?,
            ("key", ["set", value @ ..]) => {
                commands::set_gemini_key(&self.state, &value.join(" "))?;
                println!("API key saved.");
            }
            ("key", ["clear"]) => {
                commands::clear_gemini_key(&self.state)?;
                println!("API key removed.");
            }
            ("login", _) => self.login().await?,
            ("signup", _) => self.signup().await?,
            ("logout", _) => {
                commands::sign_out(&self.state)?;
                self.dashboard = None;
                println!("Signed out.");
                self.print_page();
            }
            _ => println!("Unknown command '{}'. Try `help`.", head),
        }
        Ok(())
    }

    async fn book(&mut self, rest: &[&str]) -> Result<(), AppError> {
        let lawyer_id = match rest.first() {
            Some(raw) => raw.parse::<i64>().map_err(|_| usage("book <lawyer-id>"))?,
            None => match self.state.current_page() {
                Page::LawyerProfile { lawyer_id } => lawyer_id,
                _ => return Err(usage("book <lawyer-id>")),
            },
        };
        // Role gates fire before the form is worth prompting for.
        if matches!(self.state.role(), Role::Anonymous | Role::Lawyer) {
            return commands::book_appointment(
                &self.state,
                &self.api,
                lawyer_id,
                &BookingForm::default(),
            )
            .await;
        }
        let form = BookingForm {
            appointment_date: prompt("Date & time (YYYY-MM-DDTHH:MM): ")?,
            problem_description: prompt("Describe your problem: ")?,
            notes: prompt("Notes (optional): ")?,
        };
        commands::book_appointment(&self.state, &self.api, lawyer_id, &form).await?;
        println!("{}", render::BOOKING_CONFIRMATION);
        Ok(())
    }

    async fn post_admin(&mut self, rest: &[&str]) -> Result<(), AppError> {
        if self.state.role() != Role::Admin {
            return Err(AppError::Validation("Admin sign-in required.".to_string()));
        }
        match rest {
            ["create"] => {
                let form = PostForm {
                    id: None,
                    title: prompt("Title: ")?,
                    category: prompt("Category (e.g., family, property): ")?,
                    date: prompt("Date (YYYY-MM-DD): ")?,
                    content: prompt("Content: ")?,
                };
                let saved = commands::save_post(&self.state, &self.api, &form).await?;
                println!("Saved [{}] {}", saved.id, saved.title.as_deref().unwrap_or(""));
                self.print_page();
            }
            ["edit", raw_id] => {
                let id = raw_id.parse::<i64>().map_err(|_| usage("post edit <id>"))?;
                let current = self
                    .state
                    .posts
                    .lock()
                    .map(|feed| feed.items().iter().find(|p| p.id == id).cloned())
                    .unwrap_or_default();
                let Some(current) = current else {
                    return Err(AppError::Validation(format!(
                        "No loaded post with id {}. Open the dashboard first.",
                        id
                    )));
                };
                let form = PostForm {
                    id: Some(id),
                    title: prompt_default("Title", current.title.as_deref().unwrap_or(""))?,
                    category: prompt_default("Category", current.category.as_deref().unwrap_or(""))?,
                    date: prompt_default("Date", current.date.as_deref().unwrap_or(""))?,
                    content: prompt_default("Content", current.content.as_deref().unwrap_or(""))?,
                };
                let saved = commands::save_post(&self.state, &self.api, &form).await?;
                println!("Saved [{}] {}", saved.id, saved.title.as_deref().unwrap_or(""));
                self.print_page();
            }
            ["delete", raw_id] => {
                let id = raw_id.parse::<i64>().map_err(|_| usage("post delete <id>"))?;
                if !yes(&prompt("Delete this post? (y/N): ")?) {
                    return Ok(());
                }
                commands::delete_post(&self.state, &self.api, id).await?;
                println!("Deleted.");
                self.print_page();
            }
            _ => return Err(usage("post create | post edit <id> | post delete <id>")),
        }
        Ok(())
    }

    async fn review(&mut self, rest: &[&str]) -> Result<(), AppError> {
        match rest {
            [] => {
                self.state.navigate(Page::Documents)?;
                self.print_page();
            }
            ["load", path @ ..] if !path.is_empty() => {
                let path = PathBuf::from(path.join(" "));
                commands::load_document(&self.state, &path)?;
                self.print_page();
            }
            ["analyze"] => self.analyze().await?,
            ["reset"] => {
                commands::reset_analysis(&self.state);
                self.print_page();
            }
            _ => return Err(usage("review [load <path> | analyze | reset]")),
        }
        Ok(())
    }

    /// Run the analysis; a missing API key prompts for one and retries once.
    async fn analyze(&mut self) -> Result<(), AppError> {
        match commands::analyze_document(&self.state).await {
            Ok(_) => {
                self.print_page();
                Ok(())
            }
            Err(e) if e.requires_api_key() => {
                println!("{}", e);
                let key = prompt("Gemini API key (blank to cancel): ")?;
                if key.trim().is_empty() {
                    return Ok(());
                }
                commands::set_gemini_key(&self.state, &key)?;
                commands::analyze_document(&self.state).await?;
                self.print_page();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn login(&mut self) -> Result<(), AppError> {
        let form = SignInForm {
            email: prompt("Email: ")?,
            password: prompt("Password: ")?,
        };
        commands::sign_in(&self.state, &self.api, &form).await?;
        self.dashboard = Some(commands::open_dashboard(&self.state, &self.api).await?);
        self.print_page();
        Ok(())
    }

    async fn signup(&mut self) -> Result<(), AppError> {
        let mut form = SignUpForm {
            name: prompt("Name: ")?,
            email: prompt("Email: ")?,
            password: prompt("Password: ")?,
            confirm: prompt("Confirm password: ")?,
            ..SignUpForm::default()
        };
        form.lawyer = yes(&prompt("Register as a lawyer? (y/N): ")?);
        if form.lawyer {
            form.experience = prompt("Experience (years): ")?;
            form.location = prompt("Location: ")?;
            form.court_of_practice = prompt("Court of practice: ")?;
            let days = prompt("Available days, comma separated (blank for none): ")?;
            form.available_days = days
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect();
            if form.available_days.is_empty() {
                form.availability_details = prompt("Availability notes (optional): ")?;
            } else {
                form.available_from = prompt("Available from (HH:MM): ")?;
                form.available_to = prompt("Available to (HH:MM): ")?;
            }
            form.v_hour = prompt("Hourly rate (optional): ")?;
            form.specialties = prompt("Specialties, comma separated (optional): ")?;
        }
        commands::sign_up(&self.state, &self.api, &form).await?;
        self.dashboard = Some(commands::open_dashboard(&self.state, &self.api).await?);
        self.print_page();
        Ok(())
    }

    fn print_page(&self) {
        let text = match self.state.current_page() {
            Page::Home => render::home_page(&self.state.session()),
            Page::Lawyers => render::directory_screen(&self.state, &self.filters),
            Page::LawyerProfile { .. } => match &self.lawyer {
                Some(lawyer) => render::profile_page(lawyer, self.state.role()),
                None => "Profile not loaded. Pick one with `view <id>`.\n".to_string(),
            },
            Page::Documents => render::analysis_page(&self.state.analysis_state()),
            Page::Hub => render::hub_screen(&self.state, &self.hub_search),
            Page::HubDetail { .. } => match &self.post {
                Some(post) => render::post_page(post),
                None => "Article not loaded. Pick one with `read <id>`.\n".to_string(),
            },
            Page::Dashboard => {
                let view = self
                    .dashboard
                    .clone()
                    .unwrap_or_else(|| match self.state.role() {
                        Role::Anonymous => DashboardView::Anonymous,
                        Role::Client => DashboardView::Client,
                        Role::Lawyer => DashboardView::Lawyer { lawyer_id: None },
                        Role::Admin => DashboardView::Admin,
                    });
                render::dashboard_screen(&self.state, &view)
            }
            Page::Auth => "Sign in with `login`, or create an account with `signup`.\n".to_string(),
        };
        println!("{}", text);
    }

    fn directory_snapshot(&self) -> Vec<Lawyer> {
        self.state
            .directory
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }

    fn print_help(&self) {
        println!(
            "\
Commands:
  home                               landing page
  lawyers [search]                   lawyer directory
  specialty <name|all>               filter the directory by specialty
  location <name|all>                filter the directory by court or location
  view <id>                          open a lawyer profile
  book [id]                          book a consultation (prompts for details)
  hub [category]                     legal articles (categories: {})
  hub search <text>                  narrow the loaded articles
  hub more                           load the next page of articles
  read <id>                          open one article
  dashboard                          your dashboard
  dashboard more                     load the next page
  dashboard status <id> <label>      update an appointment (accepted, on progress, done, rejected)
  post create|edit <id>|delete <id>  manage articles (admin)
  review [load <path>|analyze|reset] AI document review
  key set <value> | key clear        manage the Gemini API key
  login | signup | logout            account
  quit                               leave",
            category_ids().join(", ")
        );
    }
}

fn category_ids() -> Vec<&'static str> {
    HUB_CATEGORIES.iter().map(|(id, _)| *id).collect()
}

fn prompt(label: &str) -> Result<String, AppError> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompt showing the current value; an empty answer keeps it.
fn prompt_default(label: &str, current: &str) -> Result<String, AppError> {
    let typed = prompt(&format!("{} [{}]: ", label, current))?;
    if typed.is_empty() {
        Ok(current.to_string())
    } else {
        Ok(typed)
    }
}

fn yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn usage(text: &str) -> AppError {
    AppError::Validation(format!("Usage: {}", text))
}

fn parse_id(rest: &[&str], usage_text: &str) -> Result<i64, AppError> {
    rest.first()
        .and_then(|raw| raw.parse::<i64>().ok())
        .ok_or_else(|| usage(usage_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_accepts_y_and_yes_only() {
        assert!(yes("y"));
        assert!(yes("Yes"));
        assert!(yes(" YES "));
        assert!(!yes(""));
        assert!(!yes("no"));
    }

    #[test]
    fn test_parse_id_requires_a_number() {
        assert_eq!(parse_id(&["41"], "view <id>").unwrap(), 41);
        assert!(parse_id(&[], "view <id>").is_err());
        assert!(parse_id(&["abc"], "view <id>").is_err());
    }

    #[test]
    fn test_category_ids_match_hub_categories() {
        let ids = category_ids();
        assert!(ids.contains(&"all"));
        assert!(ids.contains(&"family"));
        assert_eq!(ids.len(), HUB_CATEGORIES.len());
    }
}
