mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use emotion_sense::config::AppConfig;
use emotion_sense::display::{emoji_for, title_case};
use emotion_sense::export::{export_csv, export_file_name};
use emotion_sense::history::{FileBlobStore, HistoryLog};
use emotion_sense::scoring::FrameSignal;
use emotion_sense::session::{CaptureSession, SyntheticCamera};
use emotion_sense::{format_percent, AnalysisResult, Analyzer, RandomJitter};

#[derive(Parser)]
#[command(name = "emotion-sense", about = "Simulated text and face emotion analysis")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Seed the noise source for reproducible output.
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Analyze(AnalyzeArgs),
    Capture(CaptureArgs),
    Watch(WatchArgs),
    History(HistoryArgs),
    Stats,
    Export(ExportArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    #[arg(long)]
    text: Option<String>,
    #[arg(long)]
    no_save: bool,
    #[arg(long)]
    no_delay: bool,
}

#[derive(Args, Debug, Clone)]
struct CaptureArgs {
    #[arg(long)]
    no_save: bool,
}

#[derive(Args, Debug, Clone)]
struct WatchArgs {
    #[arg(long, default_value_t = 5)]
    ticks: usize,
    #[arg(long)]
    interval_ms: Option<u64>,
}

#[derive(Args, Debug, Clone)]
struct HistoryArgs {
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

#[derive(Args, Debug, Clone)]
struct ExportArgs {
    /// Write to this file (or into this directory) instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    web_root: Option<String>,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emotion_sense=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (mut config, _) = AppConfig::load(cli.config)?;
    if cli.seed.is_some() {
        config.analysis.seed = cli.seed;
    }

    match cli.command {
        Command::Analyze(args) => run_analyze(args, &config).await,
        Command::Capture(args) => run_capture(args, &config),
        Command::Watch(args) => run_watch(args, &config).await,
        Command::History(args) => run_history(args, &config),
        Command::Stats => run_stats(&config),
        Command::Export(args) => run_export(args, &config),
        Command::Serve(args) => server::serve(args, config).await,
    }
}

fn open_history(config: &AppConfig) -> HistoryLog<FileBlobStore> {
    HistoryLog::with_config(FileBlobStore::new(config.history.dir.clone()), &config.history)
}

async fn run_analyze(args: AnalyzeArgs, config: &AppConfig) -> Result<(), String> {
    let text = read_text(args.text)?;
    let mut analyzer = Analyzer::new(RandomJitter::from_seed(config.analysis.seed))?;

    let latency = config.analysis.latency();
    if !args.no_delay && !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    let result = analyzer.analyze_text(&text);
    print_result(&result);

    if !args.no_save {
        open_history(config).record(&result, &text)?;
    }
    Ok(())
}

fn run_capture(args: CaptureArgs, config: &AppConfig) -> Result<(), String> {
    let frame = FrameSignal::new(config.capture.width, config.capture.height);
    if !frame.is_ready() {
        return Err("camera not ready: capture width and height must be non-zero".to_string());
    }

    let mut analyzer = Analyzer::new(RandomJitter::from_seed(config.analysis.seed))?;
    let result = analyzer.analyze_face(&frame);
    println!(
        "Captured: {} ({} confidence)",
        result.primary_emotion,
        format_percent(result.confidence)
    );
    print_breakdown(&result);

    if !args.no_save {
        open_history(config).record(&result, "")?;
    }
    Ok(())
}

async fn run_watch(args: WatchArgs, config: &AppConfig) -> Result<(), String> {
    let period = args
        .interval_ms
        .map(|value| Duration::from_millis(value.max(1)))
        .unwrap_or_else(|| config.capture.interval());
    let analyzer = Analyzer::new(RandomJitter::from_seed(config.analysis.seed))?;
    let camera = SyntheticCamera::new(config.capture.width, config.capture.height);

    let session = CaptureSession::start(analyzer, camera, period);
    let mut results = session.subscribe();
    let mut seen = 0usize;
    while seen < args.ticks {
        match results.recv().await {
            Ok(result) => {
                seen += 1;
                println!(
                    "[{}] {} {} ({})",
                    seen,
                    emoji_for(result.primary_emotion.label()),
                    title_case(result.primary_emotion.label()),
                    format_percent(result.confidence)
                );
            }
            Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
    session.stop().await;
    Ok(())
}

fn run_history(args: HistoryArgs, config: &AppConfig) -> Result<(), String> {
    let entries = open_history(config).read_all();
    if entries.is_empty() {
        println!("No analyses recorded yet.");
        return Ok(());
    }

    for entry in entries.iter().take(args.limit) {
        let content = if entry.content.is_empty() {
            String::new()
        } else {
            format!(" \"{}\"", entry.content)
        };
        println!(
            "{} {:<4} {} {} {}{}",
            entry.date,
            entry.kind.label(),
            emoji_for(&entry.emotion),
            title_case(&entry.emotion),
            format_percent(entry.confidence),
            content
        );
    }
    Ok(())
}

fn run_stats(config: &AppConfig) -> Result<(), String> {
    let stats = open_history(config).stats();
    println!("Total analyses: {}", stats.total_analyses);
    println!("Happy detections: {}", stats.happy_detections);
    Ok(())
}

fn run_export(args: ExportArgs, config: &AppConfig) -> Result<(), String> {
    let entries = open_history(config).read_all();
    let Some(csv) = export_csv(&entries) else {
        println!("No data to export");
        return Ok(());
    };

    match args.out {
        Some(out) => {
            let path = resolve_export_path(&out);
            std::fs::write(&path, csv)
                .map_err(|err| format!("failed to write export: {}", err))?;
            println!("Data exported to {}", path.display());
        }
        None => println!("{}", csv),
    }
    Ok(())
}

fn resolve_export_path(out: &Path) -> PathBuf {
    if out.is_dir() {
        out.join(export_file_name(chrono::Local::now().date_naive()))
    } else {
        out.to_path_buf()
    }
}

fn print_result(result: &AnalysisResult) {
    let label = result.primary_emotion.label();
    println!(
        "Primary emotion: {} {} ({} confidence)",
        title_case(label),
        emoji_for(label),
        format_percent(result.confidence)
    );
    print_breakdown(result);

    if !result.suggestions.is_empty() {
        println!("\nSuggestions:");
        for suggestion in &result.suggestions {
            println!("- {}", suggestion);
        }
    }
}

fn print_breakdown(result: &AnalysisResult) {
    println!("\nEmotion breakdown:");
    for (emotion, value) in result.emotion_breakdown.iter() {
        println!(
            "  {} {}: {}",
            title_case(emotion.label()),
            emoji_for(emotion.label()),
            format_percent(value)
        );
    }
}

fn read_text(arg: Option<String>) -> Result<String, String> {
    if let Some(text) = arg {
        if !text.trim().is_empty() {
            return Ok(text.trim().to_string());
        }
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Err("please enter some text to analyze: pass --text or pipe stdin".to_string());
    }
    Ok(trimmed.to_string())
}
