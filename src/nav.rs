//! Navigation pages and their persisted form.
//!
//! Pages that need a record id carry it in the variant, so a detail page
//! without a selection is unrepresentable. The persisted form keeps the
//! id in a separate field so older state files still restore.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Lawyers,
    LawyerProfile { lawyer_id: i64 },
    Documents,
    Hub,
    HubDetail { post_id: i64 },
    Dashboard,
    Auth,
}

impl Page {
    /// Stable kebab-case name used in the state file.
    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Lawyers => "lawyers",
            Page::LawyerProfile { .. } => "lawyer-profile",
            Page::Documents => "documents",
            Page::Hub => "hub",
            Page::HubDetail { .. } => "hub-detail",
            Page::Dashboard => "dashboard",
            Page::Auth => "auth",
        }
    }

    pub fn persisted(&self) -> PersistedUi {
        let mut ui = PersistedUi {
            page: Some(self.name().to_string()),
            ..Default::default()
        };
        match self {
            Page::LawyerProfile { lawyer_id } => ui.selected_lawyer_id = Some(*lawyer_id),
            Page::HubDetail { post_id } => ui.selected_post_id = Some(*post_id),
            _ => {}
        }
        ui
    }

    /// Rebuild a page from a state file.
    ///
    /// Unknown names fall back to home. A detail page whose id was lost
    /// falls back to its parent list instead.
    pub fn from_persisted(ui: &PersistedUi) -> Page {
        match ui.page.as_deref() {
            Some("lawyers") => Page::Lawyers,
            Some("lawyer-profile") => match ui.selected_lawyer_id {
                Some(id) => Page::LawyerProfile { lawyer_id: id },
                None => Page::Lawyers,
            },
            Some("documents") => Page::Documents,
            Some("hub") => Page::Hub,
            Some("hub-detail") => match ui.selected_post_id {
                Some(id) => Page::HubDetail { post_id: id },
                None => Page::Hub,
            },
            Some("dashboard") => Page::Dashboard,
            Some("auth") => Page::Auth,
            _ => Page::Home,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::Home
    }
}

/// On-disk shape of `ui_state.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedUi {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub selected_lawyer_id: Option<i64>,
    #[serde(default)]
    pub selected_post_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_round_trips() {
        let pages = [
            Page::Home,
            Page::Lawyers,
            Page::LawyerProfile { lawyer_id: 42 },
            Page::Documents,
            Page::Hub,
            Page::HubDetail { post_id: 7 },
            Page::Dashboard,
            Page::Auth,
        ];
        for page in pages {
            assert_eq!(Page::from_persisted(&page.persisted()), page);
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_home() {
        let ui = PersistedUi {
            page: Some("billing".to_string()),
            ..Default::default()
        };
        assert_eq!(Page::from_persisted(&ui), Page::Home);
        assert_eq!(Page::from_persisted(&PersistedUi::default()), Page::Home);
    }

    #[test]
    fn test_detail_page_without_id_falls_back_to_list() {
        let ui = PersistedUi {
            page: Some("lawyer-profile".to_string()),
            ..Default::default()
        };
        assert_eq!(Page::from_persisted(&ui), Page::Lawyers);

        let ui = PersistedUi {
            page: Some("hub-detail".to_string()),
            ..Default::default()
        };
        assert_eq!(Page::from_persisted(&ui), Page::Hub);
    }

    #[test]
    fn test_persisted_detail_page_keeps_id() {
        let ui = Page::LawyerProfile { lawyer_id: 9 }.persisted();
        assert_eq!(ui.page.as_deref(), Some("lawyer-profile"));
        assert_eq!(ui.selected_lawyer_id, Some(9));
        assert_eq!(ui.selected_post_id, None);
    }
}
