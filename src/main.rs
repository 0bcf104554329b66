//! mytail - display the last part of a file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::builder::RangedU64ValueParser;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mytail::config::{ConfigError, ConfigLoader, TailConfig};
use mytail::follow::{self, DirectoryWatcher, FollowTracker, StopReason};
use mytail::orchestrator::{BatchOptions, Orchestrator};
use mytail::source::{FileSource, FsOpener};
use mytail::tail::{tail_stream, ReadRequest, ReadStatus, TargetFile};
use mytail::PROGRAM_NAME;

#[derive(Parser)]
#[command(name = "mytail", about = "Display the last part of a file", version)]
struct Cli {
    /// Files to display. Standard input is read when none are given.
    files: Vec<PathBuf>,

    /// Number of lines to display.
    #[arg(short = 'n', long, value_name = "N", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    lines: Option<usize>,

    /// Number of bytes to display. Overrides --lines.
    #[arg(short = 'c', long, value_name = "B")]
    bytes: Option<u64>,

    /// Suppress headers when multiple files are being examined.
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Output appended data as the files grow.
    #[arg(short = 'f', long)]
    follow: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file to use instead of the default search paths.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<TailConfig, ConfigError> {
    path.map_or_else(ConfigLoader::new, ConfigLoader::with_path)
        .load()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{PROGRAM_NAME}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let request = ReadRequest::from_counts(Some(cli.lines.unwrap_or(config.lines)), cli.bytes);
    let options = BatchOptions {
        request,
        quiet: cli.quiet || config.quiet,
        follow: cli.follow,
    };
    tracing::info!(files = cli.files.len(), request = ?request, follow = cli.follow, "Starting");

    let status = if cli.files.is_empty() {
        tail_stdin(request, cli.follow)
    } else {
        tail_files(&cli.files, options).await
    };

    match status {
        Ok(status) => ExitCode::from(status.code()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{PROGRAM_NAME}: {e}");
            ExitCode::FAILURE
        }
    }
}

fn tail_stdin(request: ReadRequest, follow: bool) -> io::Result<ReadStatus> {
    if follow {
        tracing::debug!("Follow mode ignored for standard input");
    }

    let result = tail_stream(io::stdin().lock(), Path::new("standard input"), request);

    let mut out = io::stdout().lock();
    for unit in &result.units {
        writeln!(out, "{unit}")?;
    }
    out.flush()?;

    if let Some(e) = &result.error {
        eprintln!("{PROGRAM_NAME}: {e}");
    }
    Ok(result.status())
}

async fn tail_files(files: &[PathBuf], options: BatchOptions) -> io::Result<ReadStatus> {
    let opener = FsOpener::new();
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();

    let report = Orchestrator::new(&opener, options).run(files, &mut out, &mut err)?;
    if !options.follow {
        return Ok(report.status);
    }

    let follow_status = follow_files(report.followed, &mut out, &mut err).await?;
    Ok(report.status.and(follow_status))
}

async fn follow_files<W: Write, E: Write>(
    followed: Vec<(TargetFile, FileSource)>,
    out: &mut W,
    err: &mut E,
) -> io::Result<ReadStatus> {
    let mut tracker = FollowTracker::new();
    for (target, source) in followed {
        if let Err(e) = tracker.track(target, source) {
            writeln!(err, "{PROGRAM_NAME}: {e}")?;
        }
    }
    if tracker.is_empty() {
        return Ok(ReadStatus::Success);
    }

    let (watcher, mut events) = match DirectoryWatcher::new(tracker.watched_dirs()) {
        Ok(pair) => pair,
        Err(e) => {
            writeln!(err, "{PROGRAM_NAME}: {e}")?;
            return Ok(ReadStatus::Failure);
        }
    };

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::warn!("Cannot listen for interrupts, follow until the watch ends");
            std::future::pending::<()>().await;
        }
    };

    let reason = follow::run(&mut tracker, &mut events, shutdown, out, err).await?;
    drop(watcher);

    if let StopReason::Invalidated(dir) = &reason {
        tracing::info!(dir = %dir.display(), "Stopped following");
    }
    Ok(ReadStatus::Success)
}
