pub mod chat;
pub mod profile;
pub mod project;

pub mod settings {
    use serde::{Deserialize, Serialize};
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Value shipped in sample `.env` files; never a real key.
    pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

    fn default_true() -> bool {
        true
    }

    fn default_timeout_secs() -> u64 {
        10
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct ProviderAuth {
        pub api_key: Option<String>,
    }

    impl ProviderAuth {
        /// The configured key, unless it is blank or the sample placeholder.
        pub fn usable_api_key(&self) -> Option<&str> {
            self.api_key.as_deref().filter(|k| is_usable_key(k))
        }
    }

    /// True when `key` looks like something worth sending to the API.
    pub fn is_usable_key(key: &str) -> bool {
        let key = key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ModelProvider {
        pub openai_model: String, // e.g., "gpt-4"
        pub openai_base_url: Option<String>,
        pub openai_auth: ProviderAuth,
        pub temperature: f32,
        pub max_tokens: u32,
        /// Upper bound for one completion request, after which the local
        /// fallback answers instead.
        #[serde(default = "default_timeout_secs")]
        pub request_timeout_secs: u64,
    }

    impl Default for ModelProvider {
        fn default() -> Self {
            Self {
                openai_model: "gpt-4".into(),
                openai_base_url: None,
                openai_auth: ProviderAuth::default(),
                temperature: 0.7,
                max_tokens: 300,
                request_timeout_secs: default_timeout_secs(),
            }
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AppSettings {
        pub model: ModelProvider,
        #[serde(default = "default_true")]
        pub dark_mode: bool,
        #[serde(default = "default_true")]
        pub animations_enabled: bool,
    }

    impl Default for AppSettings {
        fn default() -> Self {
            Self {
                model: ModelProvider::default(),
                dark_mode: true,
                animations_enabled: true,
            }
        }
    }

    impl AppSettings {
        /// Read settings from `path`. Returns `None` when the file is
        /// missing or does not parse.
        pub fn load_from(path: &Path) -> Option<Self> {
            let bytes = fs::read(path).ok()?;
            serde_json::from_slice(&bytes).ok()
        }

        pub fn save_to(&self, path: &Path) -> io::Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_vec_pretty(self).map_err(io::Error::other)?;
            fs::write(path, json)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_placeholder_key_is_not_usable() {
            let auth = ProviderAuth {
                api_key: Some(PLACEHOLDER_API_KEY.to_string()),
            };
            assert_eq!(auth.usable_api_key(), None);

            let blank = ProviderAuth {
                api_key: Some("   ".to_string()),
            };
            assert_eq!(blank.usable_api_key(), None);

            let real = ProviderAuth {
                api_key: Some("sk-live".to_string()),
            };
            assert_eq!(real.usable_api_key(), Some("sk-live"));
        }

        #[test]
        fn test_settings_round_trip_through_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("settings.json");

            let mut settings = AppSettings::default();
            settings.model.request_timeout_secs = 3;
            settings.animations_enabled = false;
            settings.save_to(&path).unwrap();

            let loaded = AppSettings::load_from(&path).unwrap();
            assert_eq!(loaded.model.request_timeout_secs, 3);
            assert!(!loaded.animations_enabled);
            assert_eq!(loaded.model.openai_model, "gpt-4");
        }

        #[test]
        fn test_missing_fields_use_defaults() {
            let json = r#"{"model":{"openai_model":"gpt-4o-mini","openai_base_url":null,
                "openai_auth":{"api_key":null},"temperature":0.2,"max_tokens":50}}"#;
            let settings: AppSettings = serde_json::from_str(json).unwrap();
            assert_eq!(settings.model.request_timeout_secs, 10);
            assert!(settings.dark_mode);
            assert!(settings.animations_enabled);
        }
    }
}

pub mod agent_api {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ChatMessage {
        pub role: String, // "system" | "user" | "assistant"
        pub content: String,
    }

    impl ChatMessage {
        pub fn system(content: impl Into<String>) -> Self {
            Self {
                role: "system".into(),
                content: content.into(),
            }
        }

        pub fn user(content: impl Into<String>) -> Self {
            Self {
                role: "user".into(),
                content: content.into(),
            }
        }
    }
}
