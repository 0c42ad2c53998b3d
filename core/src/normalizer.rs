use serde_json::Value;

use crate::{Config, RewritePolicy, Error, decode::decode_bounded, format_with_indent};

/// The result of applying the normalizer to a fragment's text.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Applied {
  /// The text the fragment should display.
  pub text: String,
  /// If `text` differs from the fragment's original text.
  ///
  /// Callers may skip writing the fragment back when this is `false`.
  pub changed: bool,
}

/// A normalizer for fragments of text containing string-encoded JSON.
///
/// This holds no state besides its configuration and may be shared freely.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Normalizer {
  config: Config,
}

impl Normalizer {
  /// Create a new normalizer, validating its configuration.
  pub fn new(config: Config) -> Result<Self, Error> {
    config.validate()?;
    Ok(Self { config })
  }

  /// The configuration in use.
  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Recursively decode string-encoded JSON within this value.
  ///
  /// This is [`crate::decode`] with the configured depth limit.
  pub fn decode(&self, value: Value) -> Value {
    decode_bounded(value, 0, self.config.max_depth)
  }

  /// Format a value with the configured indent.
  pub fn format(&self, value: &Value) -> String {
    format_with_indent(value, self.config.indent)
  }

  /// Normalize the text of a fragment.
  ///
  /// The text itself is decoded as a string. If it encoded JSON, the decoded value is formatted.
  /// If nothing was decoded, the configured [`RewritePolicy`] decides if the original text is
  /// kept or if it's formatted as a JSON string literal.
  pub fn apply(&self, text: &str) -> Applied {
    let decoded = self.decode(Value::String(text.to_string()));

    // A string at the root means the text didn't encode any JSON
    if decoded.is_string() && (self.config.policy == RewritePolicy::KeepUnchanged) {
      log::trace!("fragment contained no JSON, leaving it unchanged");
      return Applied { text: text.to_string(), changed: false };
    }

    let formatted = self.format(&decoded);
    Applied { changed: formatted != text, text: formatted }
  }
}
