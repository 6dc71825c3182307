use serde::{Deserialize, Serialize};

/// Connection settings for a single Excavator rig
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigConfig {
    pub host_address: String,
    pub host_port: u16,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub debug_logging: bool,
}

impl RigConfig {
    pub fn new(host_address: impl Into<String>, host_port: u16) -> Self {
        Self {
            host_address: host_address.into(),
            host_port,
            auth_token: None,
            debug_logging: false,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{"host_address": "192.168.1.50", "host_port": 4067}"#;
        let config: RigConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.host_address, "192.168.1.50");
        assert_eq!(config.host_port, 4067);
        assert!(config.auth_token.is_none());
        assert!(!config.debug_logging);
    }

    #[test]
    fn config_deserializes_full() {
        let json = r#"{
            "host_address": "rig.local",
            "host_port": 4067,
            "auth_token": "secret",
            "debug_logging": true
        }"#;
        let config: RigConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
        assert!(config.debug_logging);
    }

    #[test]
    fn builder_sets_optional_fields() {
        let config = RigConfig::new("rig.local", 4067)
            .with_auth_token("token")
            .with_debug_logging(true);
        assert_eq!(config.auth_token.as_deref(), Some("token"));
        assert!(config.debug_logging);
    }
}
