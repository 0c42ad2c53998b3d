use core::fmt;
use std::collections::HashMap;

use serde::{Serialize, Deserialize};

use crate::{Error, Normalizer};

/// Which fragments a request applies to.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
  /// The single fragment the user selected.
  Selected,
  /// Every fragment sharing the selected fragment's grouping key.
  SameClass,
}

/// An opaque identifier for a group of related fragments, such as a shared CSS class.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupingKey(String);

impl GroupingKey {
  /// Create a grouping key, rejecting keys which are empty or solely whitespace.
  pub fn new(key: impl Into<String>) -> Result<Self, Error> {
    let key = Self(key.into());
    if key.is_blank() {
      Err(Error::EmptyGroupingKey)?;
    }
    Ok(key)
  }

  /// The key as a string.
  pub fn as_str(&self) -> &str {
    &self.0
  }

  fn is_blank(&self) -> bool {
    self.0.trim().is_empty()
  }
}

impl fmt::Display for GroupingKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// A request from an invocation trigger (a menu item, a keyboard shortcut, a command line).
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "kebab-case")]
pub enum Request {
  /// Normalize the text of a single fragment.
  Selected {
    /// The fragment's current text.
    text: String,
  },
  /// Normalize every fragment the provider resolves for this key.
  SameClass {
    /// The key identifying the group.
    key: GroupingKey,
  },
}

impl Request {
  /// The scope of this request.
  pub fn scope(&self) -> Scope {
    match self {
      Request::Selected { .. } => Scope::Selected,
      Request::SameClass { .. } => Scope::SameClass,
    }
  }
}

/// What happened to a single fragment.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
  /// The fragment contained JSON and should display this text instead.
  Rewritten {
    /// The normalized text.
    text: String,
  },
  /// The fragment was left as it was.
  Unchanged {
    /// The fragment's original text.
    text: String,
  },
  /// The fragment couldn't be read. Other fragments in its group were still processed.
  Failed {
    /// Why the fragment couldn't be read.
    reason: String,
  },
}

impl Outcome {
  /// The text the fragment should display, if it could be read.
  pub fn text(&self) -> Option<&str> {
    match self {
      Outcome::Rewritten { text } | Outcome::Unchanged { text } => Some(text),
      Outcome::Failed { .. } => None,
    }
  }
}

/// The response to a [`Request`], with one [`Outcome`] per fragment in the order they were
/// resolved.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Response {
  /// The scope of the request this responds to.
  pub scope: Scope,
  /// The outcome for each fragment.
  pub fragments: Vec<Outcome>,
}

impl Response {
  /// The amount of fragments which were rewritten.
  pub fn rewritten(&self) -> usize {
    self.fragments.iter().filter(|outcome| matches!(outcome, Outcome::Rewritten { .. })).count()
  }

  /// The amount of fragments which failed.
  pub fn failed(&self) -> usize {
    self.fragments.iter().filter(|outcome| matches!(outcome, Outcome::Failed { .. })).count()
  }

  /// If no fragments were resolved.
  pub fn is_empty(&self) -> bool {
    self.fragments.is_empty()
  }
}

/// A resolver for the fragments sharing a grouping key.
///
/// The normalizer has no knowledge of where fragments live. Whoever displays them implements
/// this, and writes the returned text back afterwards.
pub trait FragmentProvider {
  /// The error when resolving a group, or a fragment within it.
  type Error: fmt::Display;

  /// Resolve the text of every fragment sharing this key, in a stable order.
  ///
  /// The outer error is for when the group can't be resolved at all. An individual fragment which
  /// can't be read should be yielded as an error within the list, letting the rest of the group
  /// be processed.
  #[allow(clippy::type_complexity)]
  fn resolve(&mut self, key: &GroupingKey) -> Result<Vec<Result<String, Self::Error>>, Self::Error>;
}

/// An in-memory set of groups.
///
/// Unknown keys resolve to an empty group, as querying for a class no element has would.
impl FragmentProvider for HashMap<GroupingKey, Vec<String>> {
  type Error = core::convert::Infallible;

  fn resolve(&mut self, key: &GroupingKey) -> Result<Vec<Result<String, Self::Error>>, Self::Error> {
    Ok(self.get(key).into_iter().flatten().cloned().map(Ok).collect())
  }
}

impl Normalizer {
  fn outcome(&self, text: &str) -> Outcome {
    let applied = self.apply(text);
    if applied.changed {
      Outcome::Rewritten { text: applied.text }
    } else {
      Outcome::Unchanged { text: applied.text }
    }
  }

  /// Handle the text of a single selected fragment.
  ///
  /// This is [`Normalizer::handle`] for [`Request::Selected`], without needing a provider.
  pub fn handle_selected(&self, text: &str) -> Response {
    let outcome = self.outcome(text);
    log::debug!("handled Selected request: rewritten = {}", matches!(outcome, Outcome::Rewritten { .. }));
    Response { scope: Scope::Selected, fragments: vec![outcome] }
  }

  /// Handle a request, resolving groups of fragments with the provider.
  ///
  /// The provider is only consulted for [`Request::SameClass`].
  ///
  /// Fragments are processed independently, in the order the provider returned them. A fragment
  /// which fails to resolve is reported as [`Outcome::Failed`] without affecting the others.
  pub fn handle<P: FragmentProvider + ?Sized>(
    &self,
    request: Request,
    provider: &mut P,
  ) -> Result<Response, Error> {
    let scope = request.scope();
    let fragments = match request {
      Request::Selected { text } => return Ok(self.handle_selected(&text)),
      Request::SameClass { key } => {
        if key.is_blank() {
          Err(Error::EmptyGroupingKey)?;
        }
        let resolved = provider
          .resolve(&key)
          .map_err(|e| Error::Resolve { key: key.to_string(), reason: e.to_string() })?;
        resolved
          .into_iter()
          .enumerate()
          .map(|(i, fragment)| match fragment {
            Ok(text) => self.outcome(&text),
            Err(e) => {
              log::warn!("fragment {i} of `{key}` failed: {e}");
              Outcome::Failed { reason: e.to_string() }
            }
          })
          .collect()
      }
    };

    let response = Response { scope, fragments };
    log::debug!(
      "handled {scope:?} request: {} fragments, {} rewritten, {} failed",
      response.fragments.len(),
      response.rewritten(),
      response.failed(),
    );
    Ok(response)
  }
}
