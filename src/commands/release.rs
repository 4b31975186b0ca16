//! Release command implementation
//!
//! Runs the full pipeline, interactively or from CLI flags. Step failures are
//! printed and the run continues; only an empty version stops it, and even
//! then the process exits 0.

use crate::core::context::ReleaseContext;
use crate::core::error::{ReleaseError, ReleaseResult, print_error};
use crate::release::pipeline::{Decisions, ReleasePipeline, ReleaseSummary, Stage, StepOutcome};

/// Run the release pipeline with the given decision source
pub fn run_release(ctx: &ReleaseContext, decisions: &mut dyn Decisions) -> ReleaseResult<()> {
  println!("=== {} Release Manager ===", ctx.config.project.slug);
  print_current_versions(ctx);

  match ReleasePipeline::new(&ctx.root, &ctx.config).run(decisions, print_stage) {
    Ok(summary) => print_summary(&summary),
    // Nothing was touched; the run ends like any other
    Err(e) => print_error(&ReleaseError::Config(e)),
  }
  Ok(())
}

pub(crate) fn print_current_versions(ctx: &ReleaseContext) {
  for manifest in ctx.current_versions() {
    match manifest.version {
      Ok(Some(version)) => println!("Current {} version: {}", manifest.label, version),
      Ok(None) => println!("Current {} version: (none)", manifest.label),
      Err(_) => println!("Current {} version: unknown", manifest.label),
    }
  }
}

fn print_stage(stage: &Stage, outcome: &StepOutcome) {
  match outcome {
    StepOutcome::Completed(detail) => println!("✅ {}: {}", stage, detail),
    StepOutcome::Skipped => println!("⏭️  Skipped {}", stage),
    StepOutcome::Failed(reason) => eprintln!("❌ {} failed: {}", stage, reason),
  }
}

fn print_summary(summary: &ReleaseSummary) {
  println!();
  if summary.is_success() {
    println!("🎉 Release {} done", summary.version);
    if let Some(StepOutcome::Completed(detail)) = summary.outcome(&Stage::Archive) {
      println!("   Release ready: {}", detail);
    }
  } else {
    let failures = summary.failures();
    println!(
      "⚠️  Release {} finished with {} failed step(s):",
      summary.version,
      failures.len()
    );
    for (stage, _) in failures {
      println!("   • {}", stage);
    }
  }
}
