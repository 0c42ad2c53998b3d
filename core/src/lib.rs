#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

mod config;
mod error;
mod decode;
mod format;
mod normalizer;
mod fragment;

pub use serde_json::{Map, Number, Value};

pub use config::{Config, RewritePolicy, DEFAULT_INDENT, DEFAULT_MAX_DEPTH, MAX_INDENT, MAX_DEPTH};
pub use error::Error;
pub use decode::decode;
pub use format::{format, format_with_indent};
pub use normalizer::{Normalizer, Applied};
pub use fragment::{Scope, GroupingKey, Request, Outcome, Response, FragmentProvider};

/// Normalize the text of a single fragment with the default configuration.
///
/// This decodes the text and, if any JSON was found, returns it formatted with [`format`]. If
/// nothing was decoded, the text is returned unchanged.
pub fn normalize_fragment_text(text: &str) -> String {
  Normalizer::default().apply(text).text
}

#[test]
fn package_metadata() {
  assert!(!env!("CARGO_PKG_AUTHORS").is_empty());
  assert!(!env!("CARGO_PKG_LICENSE").is_empty());
}
