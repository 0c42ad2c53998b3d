use serde::{Serialize, Deserialize};

use crate::Error;

/// The indent width used when none is configured.
pub const DEFAULT_INDENT: usize = 2;
/// The recursion depth used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 128;
/// The widest indent a [`Config`] may specify.
pub const MAX_INDENT: usize = 16;
/// The deepest recursion a [`Config`] may allow.
///
/// Decoding and formatting both recurse once per level. Together with `serde_json`'s own limit of
/// 128 levels per parse, this keeps them within a 2 MiB thread stack.
pub const MAX_DEPTH: usize = 256;

/// What to do with a fragment when decoding it found no JSON.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewritePolicy {
  /// Return the fragment's original text.
  #[default]
  KeepUnchanged,
  /// Always emit the formatter's output, rendering an undecoded fragment as a JSON string literal.
  AlwaysFormat,
}

/// The configuration of a [`crate::Normalizer`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
  /// The amount of spaces each nesting level is indented by.
  pub indent: usize,
  /// The maximum depth decoding will recurse to.
  ///
  /// Every array element, object value, and string-encoded layer counts as one level. Values
  /// beyond this depth are left as they are.
  pub max_depth: usize,
  /// The policy for fragments which contained no JSON.
  pub policy: RewritePolicy,
}

impl Default for Config {
  fn default() -> Self {
    Self { indent: DEFAULT_INDENT, max_depth: DEFAULT_MAX_DEPTH, policy: RewritePolicy::default() }
  }
}

impl Config {
  /// Set the indent width.
  #[must_use]
  pub const fn with_indent(mut self, indent: usize) -> Self {
    self.indent = indent;
    self
  }

  /// Set the maximum recursion depth.
  #[must_use]
  pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
    self.max_depth = max_depth;
    self
  }

  /// Set the rewrite policy.
  #[must_use]
  pub const fn with_policy(mut self, policy: RewritePolicy) -> Self {
    self.policy = policy;
    self
  }

  /// Check this configuration is within the supported bounds.
  pub fn validate(&self) -> Result<(), Error> {
    if self.indent > MAX_INDENT {
      Err(Error::InvalidConfig { reason: "indent is wider than 16 spaces" })?;
    }
    if self.max_depth == 0 {
      Err(Error::InvalidConfig { reason: "max depth must be at least 1" })?;
    }
    if self.max_depth > MAX_DEPTH {
      Err(Error::InvalidConfig { reason: "max depth exceeds 256" })?;
    }
    Ok(())
  }
}

#[test]
fn config_defaults() {
  let config = Config::default();
  assert_eq!(config.indent, 2);
  assert_eq!(config.max_depth, 128);
  assert_eq!(config.policy, RewritePolicy::KeepUnchanged);
  config.validate().unwrap();
}

#[test]
fn config_bounds() {
  assert!(Config::default().with_indent(MAX_INDENT).validate().is_ok());
  assert!(Config::default().with_indent(MAX_INDENT + 1).validate().is_err());
  assert!(Config::default().with_max_depth(1).validate().is_ok());
  assert!(matches!(
    Config::default().with_max_depth(0).validate(),
    Err(Error::InvalidConfig { .. })
  ));
  assert!(Config::default().with_max_depth(MAX_DEPTH + 1).validate().is_err());
}

#[test]
fn config_deserialize_partial() {
  let config: Config = serde_json::from_str(r#"{"indent":4,"policy":"always-format"}"#).unwrap();
  assert_eq!(
    config,
    Config::default().with_indent(4).with_policy(RewritePolicy::AlwaysFormat)
  );
  let config: Config = serde_json::from_str("{}").unwrap();
  assert_eq!(config, Config::default());
}
