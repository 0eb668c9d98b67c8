//! Implementation of the `stencil new` command.
//!
//! Responsibility: translate CLI arguments and config defaults into a
//! `ScaffoldSpec`, call the core scaffold service, and display results. No
//! file-layout logic lives here.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, instrument};

use stencil_adapters::LocalFilesystem;
use stencil_core::{
    application::ScaffoldService,
    domain::{Flavor, FsEntry, ProjectStructure, ScaffoldSpec},
};

use crate::{
    cli::{NewArgs, OutputFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `stencil new` command.
///
/// Dispatch sequence:
/// 1. Merge flags over config defaults into a validated `ScaffoldSpec`
/// 2. Early-exit with the file plan if `--dry-run`
/// 3. Confirm with user unless `--yes` or `--quiet`
/// 4. Scaffold via `ScaffoldService`
/// 5. Print next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Build spec (name validation happens here, before any I/O)
    let spec = build_spec(&args, &config)?;
    debug!(spec = %spec, "Spec resolved");

    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()));

    // 2. Dry run: describe but do not write.
    if args.dry_run {
        let plan = service.plan(&spec)?;
        show_plan(&spec, &plan, &output)?;
        return Ok(());
    }

    // 3. Show configuration and confirm
    if !global.quiet && !args.yes {
        show_configuration(&spec, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let project_root = spec.project_root();
    if project_root.exists() {
        output.warning(&format!(
            "{} already exists; generated files will be overwritten",
            project_root.display()
        ))?;
    }

    // 4. Scaffold
    let spinner = spinner(&output, &format!("Creating '{}'...", spec.project_name()));
    info!(project = %spec.project_name(), path = %project_root.display(), "Scaffold started");

    let result = service.scaffold(&spec);
    spinner.finish_and_clear();
    let root = result?;

    info!(project = %spec.project_name(), "Scaffold completed");

    // 5. Success + next steps
    output.success(&format!(
        "Project '{}' created at {}",
        spec.project_name(),
        root.display()
    ))?;

    if !global.quiet {
        let pm = spec.package_manager();
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", root.display()))?;
        output.print(&format!("  {}", pm.install_command()))?;
        output.print(&format!("  {}", pm.run_command("dev")))?;
    }

    Ok(())
}

// ── Spec construction ─────────────────────────────────────────────────────────

/// Flags win; anything unset falls back to the `[scaffold]` config section.
fn build_spec(args: &NewArgs, config: &AppConfig) -> CliResult<ScaffoldSpec> {
    let defaults = &config.scaffold;
    let flavor = Flavor::from(args.flavor);

    let mut builder = ScaffoldSpec::builder(args.name.as_str(), flavor)
        .typescript(args.typescript().unwrap_or(defaults.typescript))
        .styling_framework(args.tailwind().unwrap_or(defaults.tailwind))
        .package_manager(
            args.package_manager
                .map(Into::into)
                .unwrap_or(defaults.package_manager),
        )
        .target_root(args.output.as_deref().unwrap_or(&defaults.target_root));

    if let Some(router) = args.router {
        if !flavor.uses_router() {
            return Err(CliError::InvalidInput {
                message: format!("--router only applies to Next.js, not {}", flavor.display_name()),
                source: None,
            });
        }
        builder = builder.router_style(router.into());
    }

    Ok(builder.build()?)
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(spec: &ScaffoldSpec, out: &OutputManager) -> CliResult<()> {
    let toggle = |on: bool| if on { "yes" } else { "no" };

    out.header("Configuration")?;
    out.print(&format!("  Project:         {}", spec.project_name()))?;
    out.print(&format!("  Flavor:          {}", spec.flavor().display_name()))?;
    if spec.flavor().uses_router() {
        out.print(&format!("  Router:          {}", spec.router_style().display_name()))?;
    }
    out.print(&format!("  TypeScript:      {}", toggle(spec.use_typescript())))?;
    out.print(&format!("  Tailwind:        {}", toggle(spec.use_styling_framework())))?;
    out.print(&format!("  Package manager: {}", spec.package_manager()))?;
    out.print(&format!("  Location:        {}", spec.project_root().display()))?;
    out.print("")?;
    Ok(())
}

fn show_plan(spec: &ScaffoldSpec, plan: &ProjectStructure, out: &OutputManager) -> CliResult<()> {
    out.info(&format!(
        "Dry run: would create {} entries at {}",
        plan.entry_count(),
        spec.project_root().display(),
    ))?;
    for entry in plan.entries() {
        match entry {
            FsEntry::Directory(dir) => {
                out.print(&format!("  {}/", dir.path.to_slash_string()))?;
            }
            FsEntry::File(file) => out.print(&format!(
                "  {:<24} {} bytes",
                file.path.to_slash_string(),
                file.content.len()
            ))?,
        }
    }
    Ok(())
}

fn spinner(output: &OutputManager, message: &str) -> ProgressBar {
    if output.is_quiet() || output.format() != OutputFormat::Human {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        return confirm_plain();
    }

    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e.to_string()),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    confirm_plain()
}

fn confirm_plain() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_ascii_lowercase();
    input.is_empty() || input == "y" || input == "yes"
}

// ── Tests ─────────────────────────────────────────────────────────────────────
