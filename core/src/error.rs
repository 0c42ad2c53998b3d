/// An error at the boundary of the normalizer.
///
/// Decoding and formatting are total and never produce these. They're only raised when
/// constructing a [`crate::Normalizer`] or when a group of fragments can't be resolved at all.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum Error {
  /// The configuration was outside the supported bounds.
  #[error("invalid configuration: {reason}")]
  InvalidConfig {
    /// Why the configuration was rejected.
    reason: &'static str,
  },
  /// A group of fragments was requested with a blank grouping key.
  #[error("grouping key is empty")]
  EmptyGroupingKey,
  /// The fragment provider could not resolve the group.
  #[error("could not resolve fragments for `{key}`: {reason}")]
  Resolve {
    /// The grouping key which was requested.
    key: String,
    /// The provider's error.
    reason: String,
  },
}
