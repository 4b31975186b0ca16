mod commands;
mod core;
mod logging;
mod release;
mod ui;
mod utils;

use clap::{Parser, Subcommand};
use crate::core::context::ReleaseContext;
use crate::core::error::{ReleaseError, print_error};
use crate::release::prompt::{Prompter, ScriptedDecisions};
use std::path::PathBuf;

/// Bump manifest versions, commit, push and package a release
///
/// Without a subcommand the full release runs interactively; pass
/// --set-version to run it without prompts.
#[derive(Parser)]
#[command(name = "release-manager")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Project root (default: current directory)
  #[arg(long, global = true, value_name = "DIR")]
  root: Option<PathBuf>,

  /// Config file (default: release.toml, .release.toml or .config/release.toml in the root)
  #[arg(long, global = true, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Run the release without prompts, using this version
  #[arg(long, value_name = "VERSION")]
  set_version: Option<String>,

  /// Clean artifacts first (with --set-version)
  #[arg(long, requires = "set_version")]
  clean: bool,

  /// Commit and push the version bump (with --set-version)
  #[arg(long, requires = "set_version")]
  publish: bool,

  /// Create the release zip (with --set-version)
  #[arg(long, requires = "set_version")]
  archive: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Write VERSION into every configured manifest
  Bump {
    /// New version, copied verbatim
    version: String,
  },

  /// Remove cache directories and stale release archives
  Clean,

  /// Build <slug>-v<VERSION>.zip from the project tree
  Archive {
    /// Version used in the archive name
    version: String,
  },

  /// Stage everything except shared exclusions, commit and push
  Publish {
    /// Version used in the commit message
    version: String,
  },

  /// Show the resolved configuration and current manifest versions
  Show {
    /// Print the resolved configuration as TOML
    #[arg(long)]
    toml: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  logging::init();
  let cli = Cli::parse();

  if cli.command.is_some() && cli.set_version.is_some() {
    handle_error(ReleaseError::with_help(
      "--set-version cannot be combined with a subcommand",
      "Use `release-manager --set-version <VERSION> [--clean] [--publish] [--archive]` for a full release.",
    ));
  }

  let root = match cli.root {
    Some(root) => root,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => {
        eprintln!("Error: Failed to get current directory: {}", e);
        std::process::exit(1);
      }
    },
  };

  let ctx = match ReleaseContext::build(&root, cli.config.as_deref()) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };
  tracing::debug!(root = %ctx.root.display(), "release context ready");

  let result = match cli.command {
    None => match cli.set_version {
      Some(version) => {
        let mut decisions = ScriptedDecisions::new(version)
          .clean(cli.clean)
          .publish(cli.publish)
          .archive(cli.archive);
        commands::run_release(&ctx, &mut decisions)
      }
      None => commands::run_release(&ctx, &mut Prompter::stdio()),
    },
    Some(Commands::Bump { version }) => commands::run_bump(&ctx, &version),
    Some(Commands::Clean) => commands::run_clean(&ctx),
    Some(Commands::Archive { version }) => commands::run_archive(&ctx, &version),
    Some(Commands::Publish { version }) => commands::run_publish(&ctx, &version),
    Some(Commands::Show { toml }) => commands::run_show(&ctx, toml),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  tracing::debug!(error = %err, "release-manager exited with error");
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
