use serde::{Deserialize, Serialize};

pub const MIN_FONT_SIZE: u8 = 12;
pub const MAX_FONT_SIZE: u8 = 20;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub email: bool,
    #[serde(default)]
    pub push: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            push: false,
        }
    }
}

/// Settings page state. Every field has a default so partially written or
/// older blobs still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSettings {
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_true")]
    pub autoplay: bool,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default = "default_font_size")]
    pub font_size: u8,
    #[serde(default)]
    pub high_contrast: bool,
    #[serde(default)]
    pub data_sharing: bool,
}

fn default_true() -> bool {
    true
}

fn default_email() -> String {
    "user@example.com".to_string()
}

fn default_language() -> String {
    "English".to_string()
}

fn default_font_size() -> u8 {
    16
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            email: default_email(),
            theme: Theme::default(),
            language: default_language(),
            autoplay: true,
            notifications: NotificationSettings::default(),
            font_size: default_font_size(),
            high_contrast: false,
            data_sharing: false,
        }
    }
}

impl UserSettings {
    /// Clamps values the settings sliders cannot produce
    pub fn normalized(mut self) -> Self {
        self.font_size = self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_blob_uses_defaults() {
        let settings: UserSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, UserSettings::default());
        assert!(settings.autoplay);
        assert!(settings.notifications.email);
        assert!(!settings.notifications.push);
        assert_eq!(settings.font_size, 16);
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn test_partial_blob_keeps_given_fields() {
        let settings: UserSettings =
            serde_json::from_str(r#"{"theme":"light","autoplay":false}"#).unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert!(!settings.autoplay);
        assert_eq!(settings.language, "English");
    }

    #[test]
    fn test_font_size_is_clamped() {
        let settings = UserSettings {
            font_size: 40,
            ..UserSettings::default()
        };
        assert_eq!(settings.normalized().font_size, MAX_FONT_SIZE);

        let settings = UserSettings {
            font_size: 2,
            ..UserSettings::default()
        };
        assert_eq!(settings.normalized().font_size, MIN_FONT_SIZE);
    }
}
