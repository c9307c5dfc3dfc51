use crate::config::{is_truthy, require, require_group, scalar_to_string, ConfigError, ReviewConfig};
use indexmap::IndexMap;
use log::debug;

/// Value stored for enabled feature flags; also the only value a conditional block treats as true.
pub const TRUE_VALUE: &str = "true";
pub const FALSE_VALUE: &str = "false";

/// Flat mapping from placeholder name to its rendered string.
///
/// Built once from a [`ReviewConfig`] and read-only afterwards. Entries keep
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementTable {
    entries: IndexMap<String, String>,
}

impl ReplacementTable {
    /// Derives the table from the configuration.
    ///
    /// Analytics detail keys and `FUNDING_TEXT` are only added when their
    /// group is enabled; a disabled group contributes just its `*_ENABLED`
    /// flag set to `"false"`.
    pub fn build(config: &ReviewConfig) -> Result<Self, ConfigError> {
        let mut table = Self::default();

        let organization = require_group(config.organization.as_ref(), "organization")?;
        table.insert_scalar("ORGANIZATION_NAME", organization.name.as_ref(), "organization.name")?;
        table.insert_scalar(
            "GITHUB_URL",
            organization.github_url.as_ref(),
            "organization.github_url",
        )?;

        let template = require_group(config.template.as_ref(), "template")?;
        table.insert_scalar("TEMPLATE_PACKAGE", template.package.as_ref(), "template.package")?;
        table.insert_scalar(
            "CITATION_FUNCTION",
            template.citation_function.as_ref(),
            "template.citation_function",
        )?;

        let standards = require_group(config.standards.as_ref(), "standards")?;
        table.insert_scalar("LICENSE", standards.license.as_ref(), "standards.license")?;
        table.insert_scalar(
            "STYLE_GUIDE",
            standards.style_guide.as_ref(),
            "standards.style_guide",
        )?;
        table.insert_scalar(
            "INDENT_SIZE",
            standards.indent_size.as_ref(),
            "standards.indent_size",
        )?;
        table.insert_scalar(
            "MAX_LINE_LENGTH",
            standards.max_line_length.as_ref(),
            "standards.max_line_length",
        )?;

        let analytics = require_group(config.analytics.as_ref(), "analytics")?;
        if is_truthy(require(analytics.enabled.as_ref(), "analytics.enabled")?) {
            table.insert("ANALYTICS_ENABLED", TRUE_VALUE);
            table.insert_scalar(
                "ANALYTICS_TYPE",
                analytics.analytics_type.as_ref(),
                "analytics.type",
            )?;
            table.insert_scalar("ANALYTICS_DOMAIN", analytics.domain.as_ref(), "analytics.domain")?;
            table.insert_scalar("ANALYTICS_SCRIPT", analytics.script.as_ref(), "analytics.script")?;
        } else {
            table.insert("ANALYTICS_ENABLED", FALSE_VALUE);
        }

        let funding = require_group(config.funding.as_ref(), "funding")?;
        if is_truthy(require(funding.enabled.as_ref(), "funding.enabled")?) {
            table.insert("FUNDING_ENABLED", TRUE_VALUE);
            if is_truthy(require(funding.use_default.as_ref(), "funding.use_default")?) {
                table.insert_scalar(
                    "FUNDING_TEXT",
                    funding.default_text.as_ref(),
                    "funding.default_text",
                )?;
            } else {
                table.insert_scalar(
                    "FUNDING_TEXT",
                    funding.custom_text.as_ref(),
                    "funding.custom_text",
                )?;
            }
        } else {
            table.insert("FUNDING_ENABLED", FALSE_VALUE);
        }

        debug!("Built replacement table with {} entries", table.len());
        Ok(table)
    }

    fn insert(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn insert_scalar(
        &mut self,
        key: &str,
        value: Option<&serde_yaml::Value>,
        path: &str,
    ) -> Result<(), ConfigError> {
        let value = scalar_to_string(require(value, path)?, path)?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether `key` is present and holds the true value.
    pub fn is_true(&self, key: &str) -> bool {
        self.get(key) == Some(TRUE_VALUE)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReplacementTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_CONFIG: &str = r#"
organization:
  name: Acme Labs
  github_url: https://github.com/acme
template:
  package: acmetemplate
  citation_function: cite_acme
standards:
  license: MIT
  style_guide: tidyverse
  indent_size: 2
  max_line_length: 80
"#;

    fn config_with(extra: &str) -> ReviewConfig {
        ReviewConfig::parse(&format!("{}{}", BASE_CONFIG, extra)).unwrap()
    }

    #[test]
    fn test_build_scalars() {
        let config = config_with(
            "analytics:\n  enabled: false\nfunding:\n  enabled: false\n",
        );
        let table = ReplacementTable::build(&config).unwrap();
        assert_eq!(table.get("ORGANIZATION_NAME"), Some("Acme Labs"));
        assert_eq!(table.get("GITHUB_URL"), Some("https://github.com/acme"));
        assert_eq!(table.get("TEMPLATE_PACKAGE"), Some("acmetemplate"));
        assert_eq!(table.get("CITATION_FUNCTION"), Some("cite_acme"));
        assert_eq!(table.get("LICENSE"), Some("MIT"));
        assert_eq!(table.get("STYLE_GUIDE"), Some("tidyverse"));
        assert_eq!(table.get("INDENT_SIZE"), Some("2"));
        assert_eq!(table.get("MAX_LINE_LENGTH"), Some("80"));
    }

    #[test]
    fn test_analytics_disabled_omits_details() {
        // Details present in the file are still ignored when disabled.
        let config = config_with(
            "analytics:\n  enabled: false\n  type: plausible\n  domain: acme.org\n  script: s.js\nfunding:\n  enabled: false\n",
        );
        let table = ReplacementTable::build(&config).unwrap();
        assert_eq!(table.get("ANALYTICS_ENABLED"), Some("false"));
        assert!(!table.contains_key("ANALYTICS_TYPE"));
        assert!(!table.contains_key("ANALYTICS_DOMAIN"));
        assert!(!table.contains_key("ANALYTICS_SCRIPT"));
        assert_eq!(table.get("FUNDING_ENABLED"), Some("false"));
        assert!(!table.contains_key("FUNDING_TEXT"));
    }

    #[test]
    fn test_analytics_enabled_adds_details() {
        let config = config_with(
            "analytics:\n  enabled: true\n  type: plausible\n  domain: acme.org\n  script: https://plausible.io/js/script.js\nfunding:\n  enabled: false\n",
        );
        let table = ReplacementTable::build(&config).unwrap();
        assert!(table.is_true("ANALYTICS_ENABLED"));
        assert_eq!(table.get("ANALYTICS_TYPE"), Some("plausible"));
        assert_eq!(table.get("ANALYTICS_DOMAIN"), Some("acme.org"));
        assert_eq!(
            table.get("ANALYTICS_SCRIPT"),
            Some("https://plausible.io/js/script.js")
        );
    }

    #[test]
    fn test_analytics_enabled_missing_detail() {
        let config = config_with(
            "analytics:\n  enabled: true\n  type: plausible\nfunding:\n  enabled: false\n",
        );
        let err = ReplacementTable::build(&config).unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingKey { ref path } if path == "analytics.domain"),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn test_funding_default_text() {
        let config = config_with(
            "analytics:\n  enabled: false\nfunding:\n  enabled: true\n  use_default: true\n  default_text: \"Supported by  the Acme Fund.\\n\"\n  custom_text: Ignored\n",
        );
        let table = ReplacementTable::build(&config).unwrap();
        assert!(table.is_true("FUNDING_ENABLED"));
        assert_eq!(table.get("FUNDING_TEXT"), Some("Supported by  the Acme Fund.\n"));
    }

    #[test]
    fn test_funding_custom_text() {
        let config = config_with(
            "analytics:\n  enabled: false\nfunding:\n  enabled: true\n  use_default: false\n  default_text: Default\n  custom_text: Custom grant text\n",
        );
        let table = ReplacementTable::build(&config).unwrap();
        assert_eq!(table.get("FUNDING_TEXT"), Some("Custom grant text"));
    }

    #[test]
    fn test_funding_default_without_custom_text() {
        let config = config_with(
            "analytics:\n  enabled: false\nfunding:\n  enabled: true\n  use_default: true\n  default_text: Default\n",
        );
        let table = ReplacementTable::build(&config).unwrap();
        assert_eq!(table.get("FUNDING_TEXT"), Some("Default"));
    }

    #[test]
    fn test_yaml11_false_words_disable_groups() {
        let config = config_with("analytics:\n  enabled: no\nfunding:\n  enabled: off\n");
        let table = ReplacementTable::build(&config).unwrap();
        assert_eq!(table.get("ANALYTICS_ENABLED"), Some("false"));
        assert!(!table.contains_key("ANALYTICS_TYPE"));
        assert_eq!(table.get("FUNDING_ENABLED"), Some("false"));
        assert!(!table.contains_key("FUNDING_TEXT"));
    }

    #[test]
    fn test_yaml11_use_default_words() {
        let config = config_with(
            "analytics:\n  enabled: false\nfunding:\n  enabled: yes\n  use_default: No\n  default_text: Default\n  custom_text: Custom\n",
        );
        let table = ReplacementTable::build(&config).unwrap();
        assert!(table.is_true("FUNDING_ENABLED"));
        assert_eq!(table.get("FUNDING_TEXT"), Some("Custom"));
    }

    #[test]
    fn test_empty_flags_disable_groups() {
        let config = config_with("analytics:\n  enabled:\nfunding:\n  enabled:\n");
        let table = ReplacementTable::build(&config).unwrap();
        assert_eq!(table.get("ANALYTICS_ENABLED"), Some("false"));
        assert_eq!(table.get("FUNDING_ENABLED"), Some("false"));
    }

    #[test]
    fn test_empty_use_default_picks_custom_text() {
        let config = config_with(
            "analytics:\n  enabled: false\nfunding:\n  enabled: true\n  use_default:\n  custom_text: Custom\n",
        );
        let table = ReplacementTable::build(&config).unwrap();
        assert_eq!(table.get("FUNDING_TEXT"), Some("Custom"));
    }

    #[test]
    fn test_absent_flag_is_missing() {
        let config = config_with("analytics:\n  type: plausible\nfunding:\n  enabled: false\n");
        let err = ReplacementTable::build(&config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { ref path } if path == "analytics.enabled"));
    }

    #[test]
    fn test_missing_required_key() {
        let config = ReviewConfig::parse(
            "organization:\n  name: Acme\ntemplate:\n  package: p\n  citation_function: c\n",
        )
        .unwrap();
        let err = ReplacementTable::build(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required config key: organization.github_url"
        );
    }

    #[test]
    fn test_missing_group() {
        let config = config_with("funding:\n  enabled: false\n");
        let err = ReplacementTable::build(&config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { ref path } if path == "analytics"));
    }

    #[test]
    fn test_insertion_order() {
        let config = config_with("analytics:\n  enabled: false\nfunding:\n  enabled: false\n");
        let table = ReplacementTable::build(&config).unwrap();
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.first(), Some(&"ORGANIZATION_NAME"));
        assert_eq!(keys.last(), Some(&"FUNDING_ENABLED"));
        assert_eq!(table.len(), 10);
    }
}
