//! Local state directory: session, UI state, and the saved Gemini key.
//!
//! Everything lives under `~/.counseldesk` as JSON files. Reads are
//! tolerant (a malformed file reads as absent); writes are atomic. The
//! session and key files hold credentials and are written `0600` with a
//! `0700` parent.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::nav::PersistedUi;
use crate::session::Session;
use crate::util::atomic_write_str;

const STATE_DIR_NAME: &str = ".counseldesk";
const SESSION_FILE: &str = "session.json";
const UI_STATE_FILE: &str = "ui_state.json";
const GEMINI_KEY_FILE: &str = "gemini/key.json";

#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Open the state directory under the user's home.
    pub fn open_default() -> Result<Self, AppError> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Internal("Could not find home directory".to_string()))?;
        Ok(Self {
            root: home.join(STATE_DIR_NAME),
        })
    }

    /// Open an explicit state directory.
    pub fn open(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // === Session ===

    pub fn load_session(&self) -> Option<Session> {
        self.read_json(&self.root.join(SESSION_FILE))
    }

    pub fn save_session(&self, session: &Session) -> Result<(), AppError> {
        self.write_secret(&self.root.join(SESSION_FILE), session)
    }

    pub fn clear_session(&self) -> Result<(), AppError> {
        let path = self.root.join(SESSION_FILE);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    // === UI state ===

    pub fn load_ui_state(&self) -> Option<PersistedUi> {
        self.read_json(&self.root.join(UI_STATE_FILE))
    }

    pub fn save_ui_state(&self, ui: &PersistedUi) -> Result<(), AppError> {
        let path = self.root.join(UI_STATE_FILE);
        self.ensure_parent(&path)?;
        let content = serde_json::to_string_pretty(ui)
            .map_err(|e| AppError::Internal(format!("Failed to serialize UI state: {}", e)))?;
        atomic_write_str(&path, &content)?;
        Ok(())
    }

    // === Gemini API key ===

    pub fn load_gemini_key(&self) -> Option<String> {
        let stored: Option<StoredKey> = self.read_json(&self.root.join(GEMINI_KEY_FILE));
        stored
            .map(|k| k.api_key)
            .filter(|k| !k.trim().is_empty())
    }

    pub fn save_gemini_key(&self, key: &str) -> Result<(), AppError> {
        let stored = StoredKey {
            api_key: key.trim().to_string(),
        };
        self.write_secret(&self.root.join(GEMINI_KEY_FILE), &stored)
    }

    pub fn delete_gemini_key(&self) -> Result<(), AppError> {
        let path = self.root.join(GEMINI_KEY_FILE);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    // === Helpers ===

    fn read_json<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Option<T> {
        if !path.exists() {
            return None;
        }
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", path.display(), e);
                None
            }
        }
    }

    fn ensure_parent(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    fs::set_permissions(parent, fs::Permissions::from_mode(0o700))?;
                }
            }
        }
        Ok(())
    }

    fn write_secret<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<(), AppError> {
        self.ensure_parent(path)?;
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| AppError::Internal(format!("Failed to serialize state: {}", e)))?;
        atomic_write_str(path, &content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredKey {
    #[serde(default)]
    api_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StoredUser;

    fn temp_storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path().join("state"));
        (dir, storage)
    }

    #[test]
    fn test_session_round_trip() {
        let (_dir, storage) = temp_storage();
        assert!(storage.load_session().is_none());

        let session = Session {
            token: "jwt-token".to_string(),
            user: Some(StoredUser {
                id: Some(3),
                email: Some("a@b.c".to_string()),
                role: Some("CLIENT".to_string()),
                name: Some("Ana".to_string()),
                lawyer_profile_id: None,
            }),
        };
        storage.save_session(&session).unwrap();
        assert_eq!(storage.load_session(), Some(session));

        storage.clear_session().unwrap();
        assert!(storage.load_session().is_none());
    }

    #[test]
    fn test_malformed_session_reads_as_absent() {
        let (_dir, storage) = temp_storage();
        fs::create_dir_all(storage.root()).unwrap();
        fs::write(storage.root().join(SESSION_FILE), "{truncated").unwrap();
        assert!(storage.load_session().is_none());
    }

    #[test]
    fn test_ui_state_round_trip() {
        let (_dir, storage) = temp_storage();
        let ui = PersistedUi {
            page: Some("lawyer-profile".to_string()),
            selected_lawyer_id: Some(12),
            selected_post_id: None,
        };
        storage.save_ui_state(&ui).unwrap();
        assert_eq!(storage.load_ui_state(), Some(ui));
    }

    #[test]
    fn test_gemini_key_round_trip_and_delete() {
        let (_dir, storage) = temp_storage();
        assert!(storage.load_gemini_key().is_none());

        storage.save_gemini_key("  AIza-secret  ").unwrap();
        assert_eq!(storage.load_gemini_key().as_deref(), Some("AIza-secret"));

        storage.delete_gemini_key().unwrap();
        assert!(storage.load_gemini_key().is_none());
    }

    #[test]
    fn test_blank_saved_key_reads_as_absent() {
        let (_dir, storage) = temp_storage();
        storage.save_gemini_key("   ").unwrap();
        assert!(storage.load_gemini_key().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_secret_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, storage) = temp_storage();
        storage.save_session(&Session::default()).unwrap();
        let mode = fs::metadata(storage.root().join(SESSION_FILE))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
