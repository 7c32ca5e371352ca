use serde::Deserialize;

use crate::error::ConfigError;

pub const ENV_PREFIX: &str = "NOTIFICATION_OPTIONS_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodecConfig {
  #[serde(default = "default_max_record_bytes")]
  pub max_record_bytes: usize,    // 65536
  #[serde(default = "default_true")]
  pub require_options_root: bool, // reject records whose root is not <options>
  #[serde(default)]
  pub xml_declaration: bool,      // prefix serialized records with <?xml ...?>
}

fn default_max_record_bytes() -> usize { 64 * 1024 }
fn default_true() -> bool { true }

impl Default for CodecConfig {
  fn default() -> Self {
    Self {
      max_record_bytes: default_max_record_bytes(),
      require_options_root: true,
      xml_declaration: false,
    }
  }
}

impl CodecConfig {
  /// Reads `NOTIFICATION_OPTIONS_*` variables; unset keys keep their defaults.
  pub fn from_env() -> Result<Self, ConfigError> {
    let config: Self = envy::prefixed(ENV_PREFIX).from_env()?;
    config.validate()?;
    Ok(config)
  }

  pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
  where
    I: IntoIterator<Item = (String, String)>,
  {
    let config: Self = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.max_record_bytes == 0 {
      return Err(ConfigError::Invalid("max_record_bytes must be greater than zero".into()));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
  }

  #[test]
  fn empty_environment_yields_defaults() {
    let config = CodecConfig::from_vars(Vec::new()).unwrap();
    assert_eq!(config, CodecConfig::default());
  }

  #[test]
  fn prefixed_variables_override_defaults() {
    let config = CodecConfig::from_vars(vars(&[
      ("NOTIFICATION_OPTIONS_MAX_RECORD_BYTES", "512"),
      ("NOTIFICATION_OPTIONS_REQUIRE_OPTIONS_ROOT", "false"),
      ("NOTIFICATION_OPTIONS_XML_DECLARATION", "true"),
      ("MAX_RECORD_BYTES", "1"),
    ]))
    .unwrap();

    assert_eq!(config.max_record_bytes, 512);
    assert!(!config.require_options_root);
    assert!(config.xml_declaration);
  }

  #[test]
  fn zero_limit_is_rejected() {
    let err = CodecConfig::from_vars(vars(&[("NOTIFICATION_OPTIONS_MAX_RECORD_BYTES", "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
  }

  #[test]
  fn garbage_limit_is_an_env_error() {
    let err = CodecConfig::from_vars(vars(&[("NOTIFICATION_OPTIONS_MAX_RECORD_BYTES", "lots")])).unwrap_err();
    assert!(matches!(err, ConfigError::Env(_)));
  }
}
