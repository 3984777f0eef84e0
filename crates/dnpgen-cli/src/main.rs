use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use log::{info, warn};

use dnpgen_core::config::Config;
use dnpgen_core::{
    render, write_lists_file, Category, ClassificationRun, Family, ProjectLayout, Result,
    RuleSet, RunReport, SigExt, LIST_FILE,
};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Some(Commands::Generate {
            path,
            node,
            skip_ext,
        }) => handle_generate(cli.config, &path, &node, skip_ext),
        Some(Commands::Classify { input, output }) => {
            handle_classify(cli.config, &input, output.as_deref())
        }
        Some(Commands::Config { action }) => handle_config(action, cli.config),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// `RUST_LOG` overrides the level chosen by -v/-q
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "dnpgen", &mut io::stdout());
}

/// Explicit --config, otherwise search next to the executable, then the
/// current directory, then the user config directory
fn resolve_config_path(cli_config: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = cli_config {
        return Ok(path);
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir()?;

    Config::discover(&Config::search_dirs(exe_dir.as_deref(), &cwd))
}

fn load_config(cli_config: Option<PathBuf>) -> Result<Config> {
    let path = resolve_config_path(cli_config)?;
    info!("Config: {}", path.display());
    Config::load(&path)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn handle_generate(
    cli_config: Option<PathBuf>,
    path: &Path,
    node: &str,
    skip_ext: bool,
) -> Result<()> {
    let config = load_config(cli_config)?;
    let root = absolute(path)?;
    let layout = ProjectLayout::resolve(&root, node)?;

    if !skip_ext {
        info!("Running SIGEXT...");
        let sigext = SigExt::from_config(&config);
        if let Err(e) = sigext.run(
            &layout.resource_dir,
            &layout.mwt_file,
            &layout.node,
            &layout.sig_file,
        ) {
            warn!("{}; using existing {}", e, layout.sig_file.display());
        }
    }

    let (rules, _) = RuleSet::from_config(&config);
    info!(
        "Processing: {}",
        layout
            .sig_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    );
    let report = ClassificationRun::new(&rules).process_file(&layout.sig_file)?;

    info!("Generating {}...", LIST_FILE);
    write_lists_file(&report.lists, &layout.list_file)?;

    print_summary(&report, &layout.list_file);
    Ok(())
}

fn handle_classify(
    cli_config: Option<PathBuf>,
    input: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let config = load_config(cli_config)?;
    let (rules, _) = RuleSet::from_config(&config);
    let report = ClassificationRun::new(&rules).process_file(input)?;

    match output {
        Some(path) if path == Path::new("-") => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(render(&report.lists).as_bytes())?;
            stdout.flush()?;
        }
        _ => {
            let path = output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| input.with_file_name(LIST_FILE));
            write_lists_file(&report.lists, &path)?;
            print_summary(&report, &path);
        }
    }

    Ok(())
}

fn print_summary(report: &RunReport, list_file: &Path) {
    println!();
    println!("{}", "--- Summary ---".cyan().bold());
    println!("{}", report.lists.counts());
    if report.unrecognized > 0 {
        println!(
            "{}",
            format!("{} declarations with unmapped type skipped", report.unrecognized).dimmed()
        );
    }
    println!("{} {}", "Written:".green(), list_file.display());
}

fn handle_config(action: ConfigAction, cli_config: Option<PathBuf>) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let path = resolve_config_path(cli_config)?;
            println!("{}", path.display());
        }
        ConfigAction::Init { dir } => {
            let dir = match dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let path = Config::init(&dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
        ConfigAction::List => {
            let config = load_config(cli_config)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Get { key } => {
            let config = load_config(cli_config)?;
            match config.get(&key) {
                Some(value) => println!("{}", value),
                None => return Err(dnpgen_core::DnpGenError::ConfigKeyNotFound { key }),
            }
        }
        ConfigAction::Set { key, value } => {
            let path = resolve_config_path(cli_config)?;
            let mut config = Config::load(&path)?;
            config.set(&key, &value)?;
            config.save(&path)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::Check => {
            let config = load_config(cli_config)?;
            let (rules, warnings) = RuleSet::from_config(&config);

            println!();
            for family in [Family::Analog, Family::Digital] {
                println!("{} output patterns:", family.name().cyan().bold());
                for pattern in rules.output_patterns(family).patterns() {
                    let mark = if pattern.is_valid() {
                        "ok".green()
                    } else {
                        "invalid".red()
                    };
                    println!("  [{}] {}", mark, pattern.source);
                }
            }
            println!();
            for category in Category::ALL {
                println!(
                    "spare {}: {}",
                    category,
                    rules.spare_for(category, "<point>")
                );
            }
            println!();

            if warnings.is_empty() {
                println!("{}", "All patterns valid.".green());
            } else {
                println!(
                    "{}",
                    format!("{} invalid pattern(s) will never match.", warnings.len()).yellow()
                );
            }
        }
    }

    Ok(())
}
