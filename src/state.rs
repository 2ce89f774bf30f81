use std::sync::{Arc, Mutex};

use crate::analysis::ingest::DocumentInput;
use crate::analysis::AnalysisReport;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::feed::Feed;
use crate::nav::Page;
use crate::session::{Role, Session};
use crate::storage::Storage;
use crate::types::{Appointment, InfoHubPost, Lawyer, StoredUser};

/// Where the document review flow currently stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnalysisState {
    #[default]
    Idle,
    /// File read in progress.
    Ingesting,
    /// Document loaded, not yet analyzed.
    Ready(DocumentInput),
    /// Request to the model in flight.
    Analyzing(DocumentInput),
    /// Analysis finished.
    Done {
        input: DocumentInput,
        report: AnalysisReport,
    },
    /// Analysis failed. The input survives when the failure came after
    /// loading, so a retry does not re-read the file.
    Failed {
        input: Option<DocumentInput>,
        message: String,
    },
}

impl AnalysisState {
    /// The loaded document, if one survives in this state.
    pub fn document(&self) -> Option<&DocumentInput> {
        match self {
            AnalysisState::Idle | AnalysisState::Ingesting => None,
            AnalysisState::Ready(input) | AnalysisState::Analyzing(input) => Some(input),
            AnalysisState::Done { input, .. } => Some(input),
            AnalysisState::Failed { input, .. } => input.as_ref(),
        }
    }
}

/// Shared application state for one run of the client.
///
/// Session and page are restored from the state directory on startup and
/// written back whenever they change; everything else is per-run cache.
pub struct AppState {
    pub config: AppConfig,
    pub storage: Arc<Storage>,
    pub page: Mutex<Page>,
    pub session: Mutex<Session>,
    pub directory: Mutex<Vec<Lawyer>>,
    pub appointments: Mutex<Feed<Appointment>>,
    pub posts: Mutex<Feed<InfoHubPost>>,
    pub hub_category: Mutex<Option<String>>,
    pub analysis: Mutex<AnalysisState>,
}

impl AppState {
    pub fn new(config: AppConfig, storage: Arc<Storage>) -> Self {
        let session = storage.load_session().unwrap_or_default();
        let page = storage
            .load_ui_state()
            .map(|ui| Page::from_persisted(&ui))
            .unwrap_or_default();

        Self {
            config,
            storage,
            page: Mutex::new(page),
            session: Mutex::new(session),
            directory: Mutex::new(Vec::new()),
            appointments: Mutex::new(Feed::new()),
            posts: Mutex::new(Feed::new()),
            hub_category: Mutex::new(None),
            analysis: Mutex::new(AnalysisState::Idle),
        }
    }

    pub fn current_page(&self) -> Page {
        self.page.lock().map(|p| *p).unwrap_or_default()
    }

    /// Switch pages and persist the position for the next run.
    pub fn navigate(&self, page: Page) -> Result<(), AppError> {
        if let Ok(mut guard) = self.page.lock() {
            *guard = page;
        }
        self.storage.save_ui_state(&page.persisted())
    }

    pub fn session(&self) -> Session {
        self.session.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn role(&self) -> Role {
        self.session().role()
    }

    /// Store a fresh session in memory and on disk.
    pub fn set_session(&self, session: Session) -> Result<(), AppError> {
        if let Ok(mut guard) = self.session.lock() {
            *guard = session.clone();
        }
        self.storage.save_session(&session)
    }

    /// Drop the session everywhere. UI state is left alone.
    pub fn clear_session(&self) -> Result<(), AppError> {
        if let Ok(mut guard) = self.session.lock() {
            *guard = Session::default();
        }
        self.storage.clear_session()
    }

    /// Update the stored user in place and persist, e.g. after learning
    /// the linked lawyer profile id.
    pub fn update_user(&self, f: impl FnOnce(&mut StoredUser)) -> Result<(), AppError> {
        let mut session = self.session();
        if let Some(user) = session.user.as_mut() {
            f(user);
        }
        self.set_session(session)
    }

    pub fn analysis_state(&self) -> AnalysisState {
        self.analysis.lock().map(|a| a.clone()).unwrap_or_default()
    }

    pub fn set_analysis(&self, next: AnalysisState) {
        if let Ok(mut guard) = self.analysis.lock() {
            *guard = next;
        }
    }
}
