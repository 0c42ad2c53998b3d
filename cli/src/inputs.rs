use std::{fs, io::{self, Read}, path::PathBuf};

use anyhow::Context;
use unstringify::{GroupingKey, FragmentProvider};

/// A source of text on the command line.
#[derive(Clone, Debug)]
pub(crate) enum Input {
  Stdin,
  File(PathBuf),
}

impl Input {
  pub(crate) fn read(&self) -> anyhow::Result<String> {
    match self {
      Input::Stdin => {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
        Ok(text)
      }
      Input::File(path) => {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
      }
    }
  }
}

/// Resolves every input, or every line of every input, as one group of fragments.
///
/// The command line only ever has a single group, so the key is solely used for logging.
pub(crate) struct Inputs {
  pub(crate) inputs: Vec<Input>,
  pub(crate) lines: bool,
}

impl FragmentProvider for Inputs {
  type Error = anyhow::Error;

  fn resolve(&mut self, key: &GroupingKey) -> anyhow::Result<Vec<anyhow::Result<String>>> {
    log::debug!("resolving {} inputs for `{key}`", self.inputs.len());
    let mut fragments = vec![];
    for input in &self.inputs {
      match input.read() {
        Ok(text) if self.lines => fragments.extend(text.lines().map(|line| Ok(line.to_string()))),
        Ok(text) => fragments.push(Ok(text)),
        Err(e) => fragments.push(Err(e)),
      }
    }
    Ok(fragments)
  }
}
