use std::{path::PathBuf, sync::Arc};

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde_json::json;
use webready::{
    BatchConverter, ConsoleReporter, ConversionOutcome, ConversionReport, ConvertOptions,
    DEFAULT_FFMPEG_PROGRAM, ProgressCallback, ProgressEvent, ProgressInfo,
};

const CLI_AFTER_HELP: &str = "Examples:\n  webready\n  webready ~/Videos --progress\n  webready media --ffmpeg /opt/ffmpeg/bin/ffmpeg --json\n  webready --completions zsh > _webready";

#[derive(Debug, Parser)]
#[command(
    name = "webready",
    version,
    about = "Re-encode every video under a directory for web playback",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Directory to scan recursively.
    #[arg(default_value = ".")]
    input_dir: PathBuf,

    /// Encoder executable to run.
    #[arg(long, env = "WEBREADY_FFMPEG", default_value = DEFAULT_FFMPEG_PROGRAM)]
    ffmpeg: PathBuf,

    /// Show additional logging output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar across files.
    #[arg(long)]
    progress: bool,

    /// Print a machine-readable summary when done.
    #[arg(long)]
    json: bool,

    /// Print a shell completion script and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn colorize_line(info: &ProgressInfo) -> String {
    let line = ConsoleReporter::line(info);
    match info.event {
        ProgressEvent::Skipped => line.yellow().to_string(),
        ProgressEvent::Converting => line.cyan().to_string(),
        ProgressEvent::Converted => line.green().to_string(),
        ProgressEvent::Failed { .. } => line.red().to_string(),
    }
}

/// Where notice lines go. With `--json`, stdout carries only the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoticeStream {
    Stdout,
    Stderr,
}

fn notice_stream(json: bool) -> NoticeStream {
    if json {
        NoticeStream::Stderr
    } else {
        NoticeStream::Stdout
    }
}

/// Prints notices in colour, above an optional progress bar.
///
/// The bar is hidden while the encoder runs, since ffmpeg writes its own
/// progress to the same terminal.
struct TerminalProgress {
    bar: Option<ProgressBar>,
    stream: NoticeStream,
}

impl TerminalProgress {
    fn new(show_bar: bool, stream: NoticeStream) -> Result<Self, Box<dyn std::error::Error>> {
        let bar = if show_bar {
            let pb = ProgressBar::new(0);
            let style =
                ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
            pb.set_style(style.progress_chars("##-"));
            Some(pb)
        } else {
            None
        };
        Ok(Self { bar, stream })
    }

    fn emit(&self, line: String) {
        match &self.bar {
            Some(pb) if !pb.is_hidden() => pb.println(line),
            _ => match self.stream {
                NoticeStream::Stdout => println!("{line}"),
                NoticeStream::Stderr => eprintln!("{line}"),
            },
        }
    }

    fn finish(&self) {
        if let Some(pb) = &self.bar {
            pb.finish_with_message("done");
        }
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        let line = colorize_line(info);
        let Some(pb) = &self.bar else {
            self.emit(line);
            return;
        };

        pb.set_length(info.total);
        match info.event {
            ProgressEvent::Converting => {
                pb.set_message(info.input.display().to_string());
                self.emit(line);
                pb.set_draw_target(ProgressDrawTarget::hidden());
            }
            ProgressEvent::Skipped => {
                pb.set_position(info.current);
                self.emit(line);
            }
            ProgressEvent::Converted | ProgressEvent::Failed { .. } => {
                pb.set_draw_target(ProgressDrawTarget::stderr());
                pb.set_position(info.current);
                self.emit(line);
            }
        }
    }
}

fn report_to_json(report: &ConversionReport) -> serde_json::Value {
    let files: Vec<_> = report
        .files
        .iter()
        .map(|file| {
            let error = match &file.outcome {
                ConversionOutcome::Failed(error) => Some(error.as_str()),
                _ => None,
            };
            json!({
                "input": file.input.display().to_string(),
                "output": file.output.display().to_string(),
                "outcome": file.outcome.label(),
                "error": error,
            })
        })
        .collect();

    json!({
        "converted": report.converted(),
        "skipped": report.skipped(),
        "failed": report.failed(),
        "files": files,
    })
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "webready", &mut std::io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose);

    let terminal = Arc::new(TerminalProgress::new(cli.progress, notice_stream(cli.json))?);
    let options = ConvertOptions::new()
        .with_encoder_program(cli.ffmpeg.as_os_str())
        .with_progress(terminal.clone());
    log::debug!("Converting {} with {options:?}", cli.input_dir.display());

    let report = BatchConverter::from_options(&options).run(&cli.input_dir)?;
    terminal.finish();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report_to_json(&report))?);
    } else if cli.verbose {
        eprintln!("{} {report}", "summary:".bold());
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
