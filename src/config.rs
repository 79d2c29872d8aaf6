/// Extension settings persisted in chrome.storage.local

use crate::error::ConfigError;
use crate::match_pattern::MatchPattern;
use serde::{Deserialize, Serialize};

/// Storage key for the serialized [`ExtensionConfig`]
pub const CONFIG_STORAGE_KEY: &str = "tab_grouper_config";

/// Tabs loaded on `host` are grouped under `title`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupRule {
    pub host: String,
    pub title: String,
    #[serde(default = "default_true")]
    pub bring_to_front: bool,
}

impl GroupRule {
    pub fn new(host: &str, title: &str) -> GroupRule {
        GroupRule {
            host: host.trim().to_lowercase(),
            title: title.trim().to_string(),
            bring_to_front: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// What the popup lists and how it groups
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopupConfig {
    pub url_patterns: Vec<String>,
    pub group_title: String,
    pub path_prefix: String,
}

impl Default for PopupConfig {
    fn default() -> Self {
        PopupConfig {
            url_patterns: vec![
                "https://developer.chrome.com/docs/webstore/*".to_string(),
                "https://developer.chrome.com/docs/extensions/*".to_string(),
            ],
            group_title: "DOCS".to_string(),
            path_prefix: "/docs".to_string(),
        }
    }
}

/// Root storage structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtensionConfig {
    #[serde(default)]
    pub rules: Vec<GroupRule>,
    #[serde(default)]
    pub popup: PopupConfig,
}

impl ExtensionConfig {
    pub fn new() -> Self {
        ExtensionConfig {
            rules: vec![GroupRule::new("github.com", "GHUB")],
            popup: PopupConfig::default(),
        }
    }

    /// First rule whose host equals `hostname`
    pub fn rule_for_host(&self, hostname: &str) -> Option<&GroupRule> {
        self.rules
            .iter()
            .find(|r| r.host.eq_ignore_ascii_case(hostname))
    }

    pub fn add_rule(&mut self, rule: GroupRule) -> Result<(), ConfigError> {
        validate_rule(&rule)?;
        if self.rule_for_host(&rule.host).is_some() {
            return Err(ConfigError::DuplicateHost(rule.host));
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn remove_rule(&mut self, host: &str) -> bool {
        let original_len = self.rules.len();
        self.rules.retain(|r| !r.host.eq_ignore_ascii_case(host));
        self.rules.len() < original_len
    }

    pub fn update_rule_title(&mut self, host: &str, new_title: String) -> bool {
        self.rules
            .iter_mut()
            .find(|r| r.host.eq_ignore_ascii_case(host))
            .map(|rule| {
                rule.title = new_title;
            })
            .is_some()
    }

    /// Parsed popup URL patterns
    pub fn popup_patterns(&self) -> Result<Vec<MatchPattern>, ConfigError> {
        self.popup
            .url_patterns
            .iter()
            .map(|p| MatchPattern::parse(p))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, rule) in self.rules.iter().enumerate() {
            validate_rule(rule)?;
            if self.rules[..i].iter().any(|r| r.host.eq_ignore_ascii_case(&rule.host)) {
                return Err(ConfigError::DuplicateHost(rule.host.clone()));
            }
        }
        if self.popup.group_title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        self.popup_patterns()?;
        Ok(())
    }
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_rule(rule: &GroupRule) -> Result<(), ConfigError> {
    if rule.host.trim().is_empty() {
        return Err(ConfigError::EmptyHost);
    }
    if rule.title.trim().is_empty() {
        return Err(ConfigError::EmptyTitle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtensionConfig::default();

        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.rules[0].host, "github.com");
        assert_eq!(config.rules[0].title, "GHUB");
        assert!(config.rules[0].bring_to_front);
        assert_eq!(config.popup.group_title, "DOCS");
        assert_eq!(config.popup.path_prefix, "/docs");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rule_for_host() {
        let config = ExtensionConfig::default();

        assert!(config.rule_for_host("github.com").is_some());
        assert!(config.rule_for_host("GITHUB.COM").is_some());
        assert!(config.rule_for_host("gist.github.com").is_none());
    }

    #[test]
    fn test_add_rule() {
        let mut config = ExtensionConfig::default();

        config.add_rule(GroupRule::new(" Docs.RS ", "RUST")).unwrap();

        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rule_for_host("docs.rs").map(|r| r.title.as_str()), Some("RUST"));
    }

    #[test]
    fn test_add_rule_rejects_duplicates_and_empty_fields() {
        let mut config = ExtensionConfig::default();

        assert_eq!(
            config.add_rule(GroupRule::new("GitHub.com", "OTHER")),
            Err(ConfigError::DuplicateHost("github.com".to_string()))
        );
        assert_eq!(config.add_rule(GroupRule::new("", "X")), Err(ConfigError::EmptyHost));
        assert_eq!(config.add_rule(GroupRule::new("a.com", "  ")), Err(ConfigError::EmptyTitle));
        assert_eq!(config.rules.len(), 1);
    }

    #[test]
    fn test_remove_rule() {
        let mut config = ExtensionConfig::default();

        assert!(!config.remove_rule("nonexistent.com"));
        assert!(config.remove_rule("github.com"));
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_update_rule_title() {
        let mut config = ExtensionConfig::default();

        assert!(config.update_rule_title("github.com", "CODE".to_string()));
        assert!(!config.update_rule_title("gitlab.com", "CODE".to_string()));
        assert_eq!(config.rules[0].title, "CODE");
    }

    #[test]
    fn test_validate_rejects_bad_patterns() {
        let mut config = ExtensionConfig::default();
        config.popup.url_patterns.push("developer.chrome.com".to_string());

        assert!(matches!(config.validate(), Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_validate_rejects_duplicate_rules_loaded_from_storage() {
        let mut config = ExtensionConfig::default();
        config.rules.push(GroupRule::new("github.com", "AGAIN"));

        assert!(matches!(config.validate(), Err(ConfigError::DuplicateHost(_))));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r#"{"rules": [{"host": "docs.rs", "title": "RUST"}]}"#;
        let config: ExtensionConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.rules.len(), 1);
        assert!(config.rules[0].bring_to_front);
        assert_eq!(config.popup, PopupConfig::default());
    }

    #[test]
    fn test_serialization() {
        let config = ExtensionConfig::default();

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ExtensionConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, config);
    }
}
