use serde::Deserialize;
use std::env;
use std::fs::{metadata, File};
use std::io::Read;

// Environment variable holding the provider credential. Overrides the config file.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

// ---------------------------------------------- Provider Config ----------------------------------------------
// OpenAI compatible API
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub chat_model: String,
    pub image_model: String,
    // None keeps the transport default (no explicit timeout).
    pub request_timeout_secs: Option<u64>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        OpenAiConfig {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            chat_model: "gpt-4o-mini".to_string(),
            image_model: "dall-e-3".to_string(),
            request_timeout_secs: None,
        }
    }
}

// ---------------------------------------------- Design Config ----------------------------------------------
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DesignConfig {
    pub require_image_description: bool,
    pub include_image_in_prompt: bool,
    // Keep the text suggestions when image generation fails.
    pub allow_partial_results: bool,
    pub image_count: u32,
    pub image_size: String,
    pub image_quality: String,
    pub image_style: String,
}

impl Default for DesignConfig {
    fn default() -> Self {
        DesignConfig {
            require_image_description: true,
            include_image_in_prompt: false,
            allow_partial_results: false,
            image_count: 1,
            image_size: "1024x1024".to_string(),
            image_quality: "hd".to_string(),
            image_style: "natural".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: usize,
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_attempts: 1,
            base_delay_ms: 400,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TlsConfig {
    pub cert_file: String,
    pub key_file: String,
}

// ---------------------------------------------- Config ----------------------------------------------
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub log_config_path: String,
    pub max_body_bytes: usize,
    pub tls: Option<TlsConfig>,
    pub openai: OpenAiConfig,
    pub design: DesignConfig,
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 3000,
            bind_address: "0.0.0.0".to_string(),
            log_config_path: format!("{}/src/configs/log4rs.yaml", env!("CARGO_MANIFEST_DIR")),
            max_body_bytes: 25 * 1024 * 1024,
            tls: None,
            openai: OpenAiConfig::default(),
            design: DesignConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
        let config_path = if metadata("/etc/room_designer/configs.yaml").is_ok() {
            "/etc/room_designer/configs.yaml"
        } else {
            "src/configs/configs.yaml"
        };

        let mut config = if metadata(config_path).is_ok() {
            let mut file = File::open(config_path)?;
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            Config::from_yaml(&contents)?
        } else {
            Config::default()
        };

        if let Ok(api_key) = env::var(API_KEY_ENV) {
            config.openai.api_key = Some(api_key);
        }
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Config, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    // A blank key counts as missing.
    pub fn api_key(&self) -> Option<&str> {
        self.openai
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_strict() {
        let config = Config::default();
        assert!(config.design.require_image_description);
        assert!(!config.design.allow_partial_results);
        assert_eq!(config.design.image_count, 1);
        assert_eq!(config.retry.max_attempts, 1);
        assert!(config.openai.request_timeout_secs.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "port: 8080\nopenai:\n  chat_model: gpt-4o\ndesign:\n  require_image_description: false\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.openai.chat_model, "gpt-4o");
        assert_eq!(config.openai.image_model, "dall-e-3");
        assert!(!config.design.require_image_description);
        assert_eq!(config.design.image_size, "1024x1024");
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let mut config = Config::default();
        assert!(config.api_key().is_none());
        config.openai.api_key = Some("   ".to_string());
        assert!(config.api_key().is_none());
        config.openai.api_key = Some("sk-test".to_string());
        assert_eq!(config.api_key(), Some("sk-test"));
    }
}
