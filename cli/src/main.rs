use std::{io::{self, Write}, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use unstringify::{
  Config, RewritePolicy, Normalizer, GroupingKey, Request, Response, DEFAULT_INDENT,
  DEFAULT_MAX_DEPTH,
};

mod inputs;
use inputs::{Input, Inputs};

/// Recursively decode JSON stored in strings and pretty-print the result.
///
/// Each file is a fragment. With no files, stdin is read as a single fragment. Text which doesn't
/// contain JSON is printed as it was.
#[derive(Parser, Debug)]
#[command(name = "unstringify", version)]
struct Args {
  /// The files to normalize.
  files: Vec<PathBuf>,

  /// Spaces to indent each nesting level by.
  #[arg(short, long, default_value_t = DEFAULT_INDENT)]
  indent: usize,

  /// How deep to recurse into nested and string-encoded values.
  #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
  max_depth: usize,

  /// Format fragments even if they didn't contain any JSON, quoting them as strings.
  #[arg(long)]
  always_format: bool,

  /// Treat every line of the input as its own fragment.
  #[arg(short, long)]
  lines: bool,

  /// Print the structured response as JSON instead of the fragments' text.
  #[arg(long)]
  json: bool,
}

impl Args {
  fn config(&self) -> Config {
    let policy =
      if self.always_format { RewritePolicy::AlwaysFormat } else { RewritePolicy::KeepUnchanged };
    Config::default().with_indent(self.indent).with_max_depth(self.max_depth).with_policy(policy)
  }

  fn request(&self) -> anyhow::Result<(Request, Inputs)> {
    let inputs = if self.files.is_empty() {
      vec![Input::Stdin]
    } else {
      self.files.iter().cloned().map(Input::File).collect()
    };
    let mut inputs = Inputs { inputs, lines: self.lines };

    // A lone stdin is the single selected fragment, anything else is a group
    if (inputs.inputs.len() == 1) && matches!(inputs.inputs[0], Input::Stdin) && !self.lines {
      let text = inputs.inputs[0].read()?;
      inputs.inputs.clear();
      return Ok((Request::Selected { text }, inputs));
    }
    let key = GroupingKey::new(if self.lines { "lines" } else { "files" })?;
    Ok((Request::SameClass { key }, inputs))
  }
}

fn write_text(out: &mut impl Write, response: &Response) -> io::Result<()> {
  for outcome in &response.fragments {
    let Some(text) = outcome.text() else { continue };
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
      out.write_all(b"\n")?;
    }
  }
  out.flush()
}

fn main() -> anyhow::Result<ExitCode> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

  let args = Args::parse();
  let normalizer = Normalizer::new(args.config())?;
  let (request, mut inputs) = args.request()?;
  let response = normalizer.handle(request, &mut inputs)?;

  let mut stdout = io::stdout().lock();
  if args.json {
    serde_json::to_writer_pretty(&mut stdout, &response).context("failed to write response")?;
    writeln!(stdout)?;
  } else {
    write_text(&mut stdout, &response).context("failed to write output")?;
  }

  if response.failed() != 0 {
    log::warn!("{} of {} fragments failed", response.failed(), response.fragments.len());
    return Ok(ExitCode::FAILURE);
  }
  Ok(ExitCode::SUCCESS)
}
