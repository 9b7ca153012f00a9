// ABOUTME: CLI binary for the call-for-papers scrape engine.
// ABOUTME: Runs full scrape runs or extracts a single record from a saved HTML file.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use cfp_engine::{parse_journals, Client, ScrapeRun};

#[derive(Parser, Debug)]
#[command(name = "cfp-cli")]
#[command(about = "Scrape journal call-for-papers listings and print JSON")]
struct Args {
    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Output compact JSON instead of pretty
    #[arg(long)]
    compact: bool,

    /// JSON file with a custom journal list (array of {name, url})
    #[arg(long = "journals-file")]
    journals_file: Option<PathBuf>,

    /// Pause between detail-page fetches, in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,

    /// Request timeout, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// HTML file to extract a single record from (requires --url and --journal)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// URL context for HTML file extraction (required with --html)
    #[arg(long = "url")]
    url: Option<String>,

    /// Journal name for parser selection (required with --html)
    #[arg(long = "journal")]
    journal: Option<String>,

    /// Record title for HTML file extraction (default: file stem)
    #[arg(long = "title")]
    title: Option<String>,
}

fn write_json(value: &impl serde::Serialize, output: Option<&PathBuf>, compact: bool) -> anyhow::Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    match output {
        Some(path) => fs::write(path, text)?,
        None => println!("{}", text),
    }
    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut builder = Client::builder()
        .delay(Duration::from_millis(args.delay_ms))
        .timeout(Duration::from_secs(args.timeout_secs));

    if let Some(path) = &args.journals_file {
        let json = fs::read_to_string(path)?;
        builder = builder.journals(parse_journals(&json)?);
    }
    let client = builder.build();

    if let Some(html_path) = &args.html {
        // Single-record extraction from a saved page
        let url = args
            .url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("--url is required when using --html"))?;
        let journal = args
            .journal
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("--journal is required when using --html"))?;
        let title = args.title.clone().unwrap_or_else(|| {
            html_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        let html = fs::read_to_string(html_path)?;
        let record = client.extract_issue_html(&html, url, journal, &title)?;
        write_json(&record, args.output.as_ref(), args.compact)?;
        return Ok(());
    }

    let run: ScrapeRun = client.scrape_all().await?;
    write_json(&run, args.output.as_ref(), args.compact)?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
