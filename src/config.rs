//! Decoding of the configuration block embedded in a query source.
//!
//! Format:
//! ```toml
//! package = "main"
//! name = "GetPerson"
//! ```
//!
//! Any other keys are kept for whatever consumes the query afterwards.

use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Identifiers accepted for `package` and `name`.
const IDENTIFIER: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

/// Settings declared in a query's configuration block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryConfig {
    /// Package or namespace the generated query belongs to
    #[serde(default)]
    pub package: String,
    /// Name of the query
    #[serde(default)]
    pub name: String,
    /// Remaining keys, untouched
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl QueryConfig {
    /// Decodes configuration text extracted by the splitter.
    ///
    /// Empty text yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the text is not valid TOML of the
    /// expected shape, and [`Error::InvalidName`] if `package` or `name` is
    /// set to something other than an identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlx_named_sql::config::QueryConfig;
    ///
    /// let config = QueryConfig::from_toml("package = \"main\"\nname = \"GetPerson\"")?;
    /// assert_eq!(config.package, "main");
    /// assert_eq!(config.name, "GetPerson");
    /// # Ok::<(), sqlx_named_sql::Error>(())
    /// ```
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let identifier = Regex::new(IDENTIFIER)?;
        for (key, value) in [("package", &self.package), ("name", &self.name)] {
            if !value.is_empty() && !identifier.is_match(value) {
                return Err(Error::InvalidName {
                    key,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_package_and_name() {
        let config = QueryConfig::from_toml("package = \"main\"\nname = \"GetSomething\"").unwrap();
        assert_eq!(config.package, "main");
        assert_eq!(config.name, "GetSomething");
        assert!(config.extra.is_empty());
    }

    #[test]
    fn test_from_toml_empty() {
        let config = QueryConfig::from_toml("").unwrap();
        assert_eq!(config, QueryConfig::default());
    }

    #[test]
    fn test_from_toml_keeps_extra_keys() {
        let config =
            QueryConfig::from_toml("name = \"DeletePerson\"\nreturns = \"exec\"\ntimeout = 5")
                .unwrap();
        assert_eq!(config.name, "DeletePerson");
        assert_eq!(
            config.extra.get("returns").and_then(|v| v.as_str()),
            Some("exec")
        );
        assert_eq!(
            config.extra.get("timeout").and_then(|v| v.as_integer()),
            Some(5)
        );
    }

    #[test]
    fn test_from_toml_malformed() {
        let result = QueryConfig::from_toml("name = ");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_from_toml_wrong_type() {
        let result = QueryConfig::from_toml("name = 42");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_from_toml_rejects_non_identifier_name() {
        let result = QueryConfig::from_toml("name = \"get person\"");
        assert!(matches!(
            result,
            Err(Error::InvalidName { key: "name", ref value }) if value == "get person"
        ));
    }

    #[test]
    fn test_from_toml_rejects_leading_digit_package() {
        let result = QueryConfig::from_toml("package = \"1main\"");
        assert!(matches!(result, Err(Error::InvalidName { key: "package", .. })));
    }
}
