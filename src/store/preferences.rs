use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StorageBackend;
use crate::{
    error::{AppError, AppResult},
    models::{UserProfile, UserSettings},
};

/// Everything the storefront keeps on the user's device
///
/// Each field falls back to its default when missing, so blobs written by
/// older builds still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub settings: UserSettings,
    #[serde(default)]
    pub my_list: Vec<String>,
    #[serde(default)]
    pub viewing_history: Vec<String>,
}

/// "Download my data" document
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataExport {
    pub user_id: Option<Uuid>,
    pub user_data: Option<UserProfile>,
    pub my_list: Vec<String>,
    pub viewing_history: Vec<String>,
    pub settings: UserSettings,
}

pub struct PreferencesStore<B: StorageBackend> {
    backend: B,
    current: Preferences,
}

impl<B: StorageBackend> PreferencesStore<B> {
    /// Reads the stored blob once; a malformed blob is replaced by defaults
    pub fn open(backend: B) -> AppResult<Self> {
        let current = match backend.read()? {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored preferences are malformed, using defaults");
                Preferences::default()
            }),
            None => Preferences::default(),
        };

        Ok(Self { backend, current })
    }

    pub fn snapshot(&self) -> &Preferences {
        &self.current
    }

    /// Applies `change` to a copy and keeps it only once the backend has it
    fn update<F>(&mut self, change: F) -> AppResult<()>
    where
        F: FnOnce(&mut Preferences),
    {
        let mut next = self.current.clone();
        change(&mut next);

        let json = serde_json::to_string(&next)
            .map_err(|e| AppError::Storage(format!("Preferences serialization error: {}", e)))?;
        self.backend.write(&json)?;

        self.current = next;
        Ok(())
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.current.user_id
    }

    pub fn set_user_id(&mut self, user_id: Uuid) -> AppResult<()> {
        self.update(|prefs| prefs.user_id = Some(user_id))
    }

    pub fn clear_user_id(&mut self) -> AppResult<()> {
        self.update(|prefs| prefs.user_id = None)
    }

    pub fn settings(&self) -> &UserSettings {
        &self.current.settings
    }

    pub fn save_settings(&mut self, settings: UserSettings) -> AppResult<()> {
        self.update(|prefs| prefs.settings = settings.normalized())
    }

    pub fn my_list(&self) -> &[String] {
        &self.current.my_list
    }

    /// Returns false when the id was already listed
    pub fn add_to_my_list(&mut self, movie_id: &str) -> AppResult<bool> {
        if self.current.my_list.iter().any(|id| id == movie_id) {
            return Ok(false);
        }
        self.update(|prefs| prefs.my_list.push(movie_id.to_string()))?;
        Ok(true)
    }

    pub fn remove_from_my_list(&mut self, movie_id: &str) -> AppResult<()> {
        self.update(|prefs| prefs.my_list.retain(|id| id != movie_id))
    }

    pub fn viewing_history(&self) -> &[String] {
        &self.current.viewing_history
    }

    /// Appends a watched title, keeping each id once in first-seen order
    pub fn record_view(&mut self, movie_id: &str) -> AppResult<()> {
        if self.current.viewing_history.iter().any(|id| id == movie_id) {
            return Ok(());
        }
        self.update(|prefs| prefs.viewing_history.push(movie_id.to_string()))
    }

    pub fn clear_history(&mut self) -> AppResult<()> {
        self.update(|prefs| prefs.viewing_history.clear())
    }

    /// Drops the per-user keys on sign-out; settings stay on the device
    pub fn clear_session_data(&mut self) -> AppResult<()> {
        self.update(|prefs| {
            prefs.user_id = None;
            prefs.my_list.clear();
            prefs.viewing_history.clear();
        })
    }

    /// Wipes everything, as on account deletion
    pub fn clear(&mut self) -> AppResult<()> {
        self.backend.clear()?;
        self.current = Preferences::default();
        Ok(())
    }

    pub fn export(&self, profile: Option<UserProfile>) -> DataExport {
        DataExport {
            user_id: self.current.user_id,
            user_data: profile,
            my_list: self.current.my_list.clone(),
            viewing_history: self.current.viewing_history.clone(),
            settings: self.current.settings.clone(),
        }
    }

    pub fn export_json(&self, profile: Option<UserProfile>) -> AppResult<String> {
        serde_json::to_string_pretty(&self.export(profile))
            .map_err(|e| AppError::Storage(format!("Export serialization error: {}", e)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::Theme;
    use crate::store::{FileStorage, MemoryStorage};

    fn empty_store() -> PreferencesStore<MemoryStorage> {
        PreferencesStore::open(MemoryStorage::default()).unwrap()
    }

    /// Backend that loads a fixed blob and refuses every change
    pub(crate) struct ReadOnlyStorage(pub Option<String>);

    impl StorageBackend for ReadOnlyStorage {
        fn read(&self) -> AppResult<Option<String>> {
            Ok(self.0.clone())
        }

        fn write(&mut self, _contents: &str) -> AppResult<()> {
            Err(AppError::Storage("disk full".to_string()))
        }

        fn clear(&mut self) -> AppResult<()> {
            Err(AppError::Storage("disk full".to_string()))
        }
    }

    #[test]
    fn test_defaults_when_nothing_stored() {
        let store = empty_store();
        assert_eq!(store.snapshot(), &Preferences::default());
        assert_eq!(store.user_id(), None);
        assert_eq!(store.settings(), &UserSettings::default());
    }

    #[test]
    fn test_malformed_blob_falls_back_to_defaults() {
        let store = PreferencesStore::open(MemoryStorage::with_contents("not json")).unwrap();
        assert_eq!(store.snapshot(), &Preferences::default());
    }

    #[test]
    fn test_partial_blob_keeps_known_fields() {
        let store =
            PreferencesStore::open(MemoryStorage::with_contents(r#"{"my_list":["3","7"]}"#))
                .unwrap();
        assert_eq!(store.my_list(), ["3", "7"]);
        assert!(store.viewing_history().is_empty());
    }

    #[test]
    fn test_user_id_set_and_clear() {
        let mut store = empty_store();
        let id = Uuid::new_v4();
        store.set_user_id(id).unwrap();
        assert_eq!(store.user_id(), Some(id));
        store.clear_user_id().unwrap();
        assert_eq!(store.user_id(), None);
    }

    #[test]
    fn test_my_list_has_no_duplicates() {
        let mut store = empty_store();
        assert!(store.add_to_my_list("13").unwrap());
        assert!(!store.add_to_my_list("13").unwrap());
        assert!(store.add_to_my_list("15").unwrap());
        store.remove_from_my_list("13").unwrap();
        assert_eq!(store.my_list(), ["15"]);
    }

    #[test]
    fn test_history_record_and_clear() {
        let mut store = empty_store();
        store.record_view("1").unwrap();
        store.record_view("2").unwrap();
        store.record_view("1").unwrap();
        assert_eq!(store.viewing_history(), ["1", "2"]);
        store.clear_history().unwrap();
        assert!(store.viewing_history().is_empty());
    }

    #[test]
    fn test_settings_are_normalized_on_save() {
        let mut store = empty_store();
        store
            .save_settings(UserSettings {
                theme: Theme::Light,
                font_size: 99,
                ..UserSettings::default()
            })
            .unwrap();
        assert_eq!(store.settings().theme, Theme::Light);
        assert_eq!(store.settings().font_size, 20);
    }

    #[test]
    fn test_clear_session_data_keeps_settings() {
        let mut store = empty_store();
        store.set_user_id(Uuid::new_v4()).unwrap();
        store.add_to_my_list("1").unwrap();
        store.record_view("2").unwrap();
        store
            .save_settings(UserSettings {
                autoplay: false,
                ..UserSettings::default()
            })
            .unwrap();

        store.clear_session_data().unwrap();

        assert_eq!(store.user_id(), None);
        assert!(store.my_list().is_empty());
        assert!(store.viewing_history().is_empty());
        assert!(!store.settings().autoplay);
    }

    #[test]
    fn test_changes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let id = Uuid::new_v4();

        {
            let mut store = PreferencesStore::open(FileStorage::new(&path)).unwrap();
            store.set_user_id(id).unwrap();
            store.add_to_my_list("15").unwrap();
        }

        let store = PreferencesStore::open(FileStorage::new(&path)).unwrap();
        assert_eq!(store.user_id(), Some(id));
        assert_eq!(store.my_list(), ["15"]);
    }

    #[test]
    fn test_clear_wipes_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut store = PreferencesStore::open(FileStorage::new(&path)).unwrap();
        store.add_to_my_list("1").unwrap();
        store.clear().unwrap();

        assert!(!path.exists());
        assert_eq!(store.snapshot(), &Preferences::default());
    }

    #[test]
    fn test_export_document_shape() {
        let mut store = empty_store();
        store.add_to_my_list("15").unwrap();
        store.record_view("1").unwrap();

        let profile = UserProfile {
            full_name: "Ram Babu".to_string(),
            email: "ram@example.com".to_string(),
        };
        let json = store.export_json(Some(profile)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["myList"], serde_json::json!(["15"]));
        assert_eq!(value["viewingHistory"], serde_json::json!(["1"]));
        assert_eq!(value["userData"]["full_name"], "Ram Babu");
        assert_eq!(value["settings"]["font_size"], 16);
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        let stored = r#"{"my_list":["3"],"viewing_history":["1"]}"#.to_string();
        let mut store = PreferencesStore::open(ReadOnlyStorage(Some(stored))).unwrap();
        let before = store.snapshot().clone();

        assert!(matches!(
            store.set_user_id(Uuid::new_v4()),
            Err(AppError::Storage(_))
        ));
        assert!(store.add_to_my_list("15").is_err());
        assert!(store.record_view("2").is_err());
        assert!(store.clear_session_data().is_err());
        assert!(store.clear().is_err());

        assert_eq!(store.user_id(), None);
        assert_eq!(store.snapshot(), &before);
    }
}
