//! smi - submodule importer
//!
//! Main entry point for the CLI.

mod commands;

use anyhow::{bail, Context};
use commands::{AddArgs, Cli, Commands, ListArgs};
use clap::Parser;
use dialoguer::{theme::ColorfulTheme, MultiSelect};
use std::path::{Path, PathBuf};
use std::process;
use submodule_importer::config::{validate_config, validate_config_result, ImporterConfig};
use submodule_importer::{logging, style, Candidate, Importer, ImporterError, Progress};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbosity()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style::error("Error:"), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let repo_root = match cli.repo {
        Some(ref path) => absolutize(path)?,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match &cli.command {
        Commands::Init { force } => handle_init_command(&repo_root, cli.config.as_deref(), *force),
        Commands::Config => {
            let (config, source) = load_config(&cli, &repo_root)?;
            handle_config_command(&config, source.as_deref())
        }
        Commands::List(args) => {
            let (config, _) = load_config(&cli, &repo_root)?;
            validate_config_result(&config)?;
            let importer = Importer::from_config(&config, &repo_root);
            handle_list_command(&importer, args, cli.quiet)
        }
        Commands::Add(args) => {
            let (config, _) = load_config(&cli, &repo_root)?;
            validate_config_result(&config)?;
            let mut importer = Importer::from_config(&config, &repo_root);
            handle_add_command(&mut importer, args, cli.quiet)
        }
    }
}

fn load_config(cli: &Cli, repo_root: &Path) -> anyhow::Result<(ImporterConfig, Option<PathBuf>)> {
    let (mut config, source) = ImporterConfig::discover(repo_root, cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(ref manifest) = cli.manifest {
        config.manifest = absolutize(manifest)?;
    }
    Ok((config, source))
}

fn absolutize(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()
            .context("Failed to determine current directory")?
            .join(path))
    }
}

fn handle_init_command(repo_root: &Path, config_path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let config_file = match config_path {
        Some(path) => absolutize(path)?,
        None => ImporterConfig::repo_path(repo_root),
    };

    if config_file.exists() && !force {
        println!("Configuration already exists at {}", style::path(&config_file.display().to_string()));
        println!("Use --force to overwrite it.");
        return Ok(());
    }

    ImporterConfig::default()
        .save(&config_file)
        .with_context(|| format!("Failed to write {}", config_file.display()))?;

    println!(
        "{} Created configuration at {}",
        style::success("✓"),
        style::path(&config_file.display().to_string())
    );
    Ok(())
}

fn handle_config_command(config: &ImporterConfig, source: Option<&Path>) -> anyhow::Result<()> {
    match source {
        Some(path) => println!("{}", style::dim(&format!("# from {}", path.display()))),
        None => println!("{}", style::dim("# built-in defaults")),
    }
    print!("{}", serde_yaml::to_string(config).map_err(ImporterError::from)?);

    if let Err(errors) = validate_config(config) {
        println!();
        for error in &errors {
            println!("{} {}", style::warning("!"), error);
        }
        bail!("{} configuration problem(s)", errors.len());
    }
    Ok(())
}

fn print_warnings(importer: &Importer, quiet: bool) {
    if quiet {
        return;
    }
    for warning in importer.warnings() {
        eprintln!("{} {}", style::warning("warning:"), warning);
    }
}

fn handle_list_command(importer: &Importer, args: &ListArgs, quiet: bool) -> anyhow::Result<()> {
    let shown: Vec<&Candidate> = importer
        .list_candidates()
        .iter()
        .filter(|c| args.shows(c.installed))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&shown).map_err(ImporterError::from)?);
        return Ok(());
    }

    print_warnings(importer, quiet);

    let candidates = importer.list_candidates();
    if candidates.is_empty() {
        return Ok(());
    }

    let name_width = candidates.iter().map(|c| c.name.len()).max().unwrap_or(0).max(10);
    let status_width = 25;

    println!(
        "{}",
        style::header(&format!(
            "  {:<name_width$}  {:<status_width$}  URL",
            "Repository", "Status"
        ))
    );
    for candidate in &shown {
        println!(
            "{} {}  {}  {}",
            style::status_indicator(candidate),
            style::name(&format!("{:<name_width$}", candidate.name)),
            pad_styled(style::status_style(candidate), candidate.status_label().len(), status_width),
            style::dim(&candidate.url)
        );
    }

    let installed = candidates.iter().filter(|c| c.installed).count();
    if !quiet {
        println!();
        println!(
            "{} installed, {} not installed",
            style::count(installed),
            style::count(candidates.len() - installed)
        );
    }
    Ok(())
}

/// Pad styled text by its visible width
fn pad_styled(text: impl std::fmt::Display, visible: usize, width: usize) -> String {
    format!("{}{}", text, " ".repeat(width.saturating_sub(visible)))
}

fn handle_add_command(importer: &mut Importer, args: &AddArgs, quiet: bool) -> anyhow::Result<()> {
    print_warnings(importer, quiet);

    let on_progress = |progress: &Progress<'_>| {
        if !quiet {
            eprintln!("{}", style::progress_line(progress));
        }
    };

    let report = if args.all {
        importer.add_missing(on_progress)?
    } else {
        let names = if args.interactive || args.names.is_empty() {
            prompt_selection(importer)?
        } else {
            args.names.clone()
        };
        importer.add(&names, on_progress)?
    };

    if report.added.is_empty() && report.skipped.is_empty() && report.failure.is_none() {
        if !quiet {
            println!("Nothing to add.");
        }
        return Ok(());
    }

    if !quiet {
        for name in &report.skipped {
            println!("{} {} is already installed", style::dim("-"), style::name(name));
        }
        for name in &report.added {
            println!("{} {}", style::success("✓"), style::name(name));
        }
        println!("Added {} submodule(s).", style::count(report.added_count()));
    }

    match report.failure {
        Some(failure) => Err(anyhow::Error::new(failure.error).context(format!(
            "Stopped at {} after adding {} submodule(s)",
            failure.name,
            report.added.len()
        ))),
        None => Ok(()),
    }
}

fn prompt_selection(importer: &Importer) -> anyhow::Result<Vec<String>> {
    let missing: Vec<&Candidate> = importer
        .list_candidates()
        .iter()
        .filter(|c| !c.installed)
        .collect();

    if missing.is_empty() {
        return Ok(Vec::new());
    }

    let items: Vec<String> = missing
        .iter()
        .map(|c| format!("{}  {}", c.name, c.url))
        .collect();

    let picked = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select submodules to add (space to toggle, enter to confirm)")
        .items(&items)
        .interact_opt()
        .map_err(|e| ImporterError::Prompt(e.to_string()))?;

    Ok(picked
        .unwrap_or_default()
        .into_iter()
        .map(|i| missing[i].name.clone())
        .collect())
}
