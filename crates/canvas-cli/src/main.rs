//! commit-canvas CLI: paint a synthetic contribution history into a git repository.

mod confirm;
mod style;
mod telemetry;

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;

use canvas_core::config::DEFAULT_ENV_FILE;
use canvas_core::prelude::{CanvasConfig, EnvFile, WeekdayDistribution};
use canvas_exec::{ExecError, Materializer};
use canvas_plan::SimulationPlan;
use canvas_vcs::{GitCli, Repository};

use confirm::{AssumeYes, Confirm, TerminalConfirm};

#[derive(Parser)]
#[command(name = "commit-canvas")]
#[command(about = "Fill a git repository with backdated commits following a weekday pattern", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the summary, wait for confirmation, then create the commits
    Run {
        /// Env file with GIT_USER_NAME, GIT_USER_EMAIL, START_YEAR, END_YEAR
        #[arg(short, long, default_value = DEFAULT_ENV_FILE)]
        env_file: PathBuf,

        /// Repository working directory
        #[arg(short, long, default_value = ".")]
        workdir: PathBuf,

        /// Seed for timestamp draws (overrides CANVAS_SEED)
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the confirmation keystroke
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the summary and per-weekday breakdown without touching the repository
    Plan {
        #[arg(short, long, default_value = DEFAULT_ENV_FILE)]
        env_file: PathBuf,

        #[arg(short, long, default_value = ".")]
        workdir: PathBuf,
    },

    /// Check the env file and exit
    Validate {
        #[arg(short, long, default_value = DEFAULT_ENV_FILE)]
        env_file: PathBuf,

        #[arg(short, long, default_value = ".")]
        workdir: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Invalid or missing .env values: {0}")]
    Config(#[from] canvas_core::prelude::Error),

    #[error("Run failed: {0}")]
    Exec(#[from] ExecError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Exec(e) => e.exit_code(),
            CliError::Config(_) | CliError::Terminal(_) => 1,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            env_file,
            workdir,
            seed,
            yes,
        } => {
            let mut gate: Box<dyn Confirm> = if yes {
                Box::new(AssumeYes)
            } else {
                Box::new(TerminalConfirm)
            };
            let opts = RunOptions {
                seed,
                verbose: cli.verbose,
                color: io::stdout().is_terminal(),
            };
            let repo = GitCli::new(&workdir);
            run(&workdir, &env_file, &opts, gate.as_mut(), repo, &mut io::stdout())
        }
        Commands::Plan { env_file, workdir } => plan(&workdir, &env_file),
        Commands::Validate { env_file, workdir } => validate(&workdir, &env_file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Env file path, relative paths taken from the working directory.
fn env_path(workdir: &Path, env_file: &Path) -> PathBuf {
    workdir.join(env_file)
}

/// File, then process environment on top, then CLI flags on top of that.
fn load_config(
    workdir: &Path,
    env_file: &Path,
    seed: Option<u64>,
) -> Result<CanvasConfig, CliError> {
    let path = env_path(workdir, env_file);
    let file = EnvFile::load(&path)?;
    tracing::debug!(path = %path.display(), keys = file.len(), "env file loaded");
    let mut cfg = CanvasConfig::resolve(&file, |key| std::env::var(key).ok())?;
    if seed.is_some() {
        cfg.seed = seed;
    }
    Ok(cfg)
}

fn build_plan(cfg: &CanvasConfig) -> Result<SimulationPlan, CliError> {
    Ok(SimulationPlan::new(
        cfg.date_range()?,
        WeekdayDistribution::STANDARD,
    ))
}

struct RunOptions {
    seed: Option<u64>,
    verbose: u8,
    color: bool,
}

/// Banner, gate, then materialize. Banner, progress, and summary all go to `out`.
fn run<R: Repository, W: Write>(
    workdir: &Path,
    env_file: &Path,
    opts: &RunOptions,
    gate: &mut dyn Confirm,
    repo: R,
    out: &mut W,
) -> Result<(), CliError> {
    let cfg = load_config(workdir, env_file, opts.seed)?;
    let plan = build_plan(&cfg)?;
    let totals = plan.totals();

    write!(out, "{}", style::banner(&cfg, &plan, totals, opts.color))?;
    writeln!(out, "{}", style::PROMPT)?;
    out.flush()?;

    if !gate.confirm()? {
        writeln!(out, "\nCancelled")?;
        return Ok(());
    }

    tracing::info!(workdir = %workdir.display(), total = totals.total, "starting run");
    let manifest = Materializer::new(cfg, repo, workdir, &mut *out).run(&plan)?;

    writeln!(out, "\nDone")?;
    writeln!(out, "Total commits: {}", manifest.commits)?;
    if opts.verbose > 0 {
        writeln!(out, "Plan hash: {}", manifest.plan_hash)?;
        writeln!(out, "Duration: {}ms", manifest.duration_ms())?;
    }
    out.flush()?;
    Ok(())
}

fn plan(workdir: &Path, env_file: &Path) -> Result<(), CliError> {
    let cfg = load_config(workdir, env_file, None)?;
    let plan = build_plan(&cfg)?;
    let color = io::stdout().is_terminal();
    print!("{}", style::banner(&cfg, &plan, plan.totals(), color));
    print!("{}", style::breakdown(&plan));
    Ok(())
}

fn validate(workdir: &Path, env_file: &Path) -> Result<(), CliError> {
    let cfg = load_config(workdir, env_file, None)?;
    let range = cfg.date_range()?;
    println!("✓ Configuration is valid ({range}, {} days)", range.day_count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_vcs::MemoryRepo;

    const ENV: &str = "GIT_USER_NAME=Ada\nGIT_USER_EMAIL=ada@example.com\nSTART_YEAR=2023\nEND_YEAR=2024\n";

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["commit-canvas", "-vv", "run", "--yes", "--seed", "7"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run { yes, seed, env_file, .. } => {
                assert!(yes);
                assert_eq!(seed, Some(7));
                assert_eq!(env_file, PathBuf::from(".env"));
            }
            _ => panic!("expected run"),
        }
        assert!(Cli::try_parse_from(["commit-canvas", "plan", "-e", "x.env"]).is_ok());
        assert!(Cli::try_parse_from(["commit-canvas"]).is_err());
    }

    #[test]
    fn env_file_is_relative_to_workdir() {
        let p = env_path(Path::new("/repo"), Path::new(".env"));
        assert_eq!(p, PathBuf::from("/repo/.env"));
        let abs = env_path(Path::new("/repo"), Path::new("/etc/canvas.env"));
        assert_eq!(abs, PathBuf::from("/etc/canvas.env"));
    }

    #[test]
    fn seed_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("canvas.env"), format!("{ENV}CANVAS_SEED=1\n")).unwrap();
        let cfg = load_config(dir.path(), Path::new("canvas.env"), Some(99)).unwrap();
        assert_eq!(cfg.seed, Some(99));
        assert_eq!((cfg.start_year, cfg.end_year), (2023, 2024));
    }

    #[test]
    fn bad_config_exits_with_one() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.env"), "GIT_USER_NAME=Ada\n").unwrap();
        let err = load_config(dir.path(), Path::new("bad.env"), None).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().starts_with("Invalid or missing .env values"));
    }

    struct Decline;

    impl Confirm for Decline {
        fn confirm(&mut self) -> io::Result<bool> {
            Ok(false)
        }
    }

    fn opts(verbose: u8) -> RunOptions {
        RunOptions {
            seed: Some(3),
            verbose,
            color: false,
        }
    }

    #[test]
    fn declined_gate_leaves_directory_untouched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), ENV).unwrap();
        let repo = MemoryRepo::new();
        let mut out: Vec<u8> = Vec::new();
        run(
            dir.path(),
            Path::new(".env"),
            &opts(0),
            &mut Decline,
            repo.clone(),
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\nGitHub Commit Canvas\n"));
        assert!(text.ends_with(&format!("\n\n{}\n\nCancelled\n", style::PROMPT)));
        assert_eq!(repo.init_calls(), 0);
        assert!(!dir.path().join("data.txt").exists());
    }

    #[test]
    fn confirmed_run_prints_summary() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "GIT_USER_NAME=Ada\nGIT_USER_EMAIL=ada@example.com\nSTART_YEAR=2024\nEND_YEAR=2024\n",
        )
        .unwrap();
        let repo = MemoryRepo::new();
        let mut out: Vec<u8> = Vec::new();
        run(
            dir.path(),
            Path::new(".env"),
            &opts(1),
            &mut AssumeYes,
            repo.clone(),
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let total = repo.commit_count() - 1;
        assert_eq!(total, 3505);
        let (progress, summary) = text.split_once("\nDone\n").unwrap();
        assert!(progress.contains(&format!("{}\n\r[", style::PROMPT)));
        assert!(progress.contains(&format!("] {total}/{total} ")));
        assert!(progress.ends_with("c/s"));
        assert!(summary.starts_with(&format!("Total commits: {total}\nPlan hash: ")));
        assert!(summary.ends_with("ms\n"));
    }
}
