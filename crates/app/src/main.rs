use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use interview_export_core::{
    export_all, save_artifact, segment_with_report, Complexity, ExportFormat, GeminiConfig,
    GeminiGenerator, GenerationRequest, TextGenerator, DEFAULT_FILE_STEM,
};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "interview-export", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask Gemini for interview questions and export them.
    Generate {
        #[command(flatten)]
        topic: TopicArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Gemini API key, overrides GEMINI_API_KEY.
        #[arg(long)]
        api_key: Option<String>,

        /// Gemini model name, overrides GEMINI_MODEL.
        #[arg(long)]
        model: Option<String>,

        /// Gemini base URL, overrides GEMINI_ENDPOINT.
        #[arg(long)]
        endpoint: Option<String>,

        /// Print the generated text before exporting.
        #[arg(long, default_value_t = false)]
        show_text: bool,
    },
    /// Export already generated text read from a file, or stdin when the path is `-`.
    Convert {
        /// Text file with alternating question and answer lines.
        #[arg(long, default_value = "-")]
        input: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the prompt that would be sent to the provider.
    Prompt {
        #[command(flatten)]
        topic: TopicArgs,
    },
}

#[derive(Args)]
struct TopicArgs {
    /// Programming language or area, e.g. Python, HR, Data Science.
    #[arg(long)]
    domain: String,

    /// Years of experience (1-50).
    #[arg(long, default_value = "1")]
    experience: u8,

    /// Question complexity: basic, intermediate or advanced.
    #[arg(long, default_value_t = Complexity::Basic, value_parser = clap::value_parser!(Complexity))]
    complexity: Complexity,
}

impl TopicArgs {
    fn request(&self) -> anyhow::Result<GenerationRequest> {
        Ok(GenerationRequest::new(
            self.domain.as_str(),
            self.experience,
            self.complexity,
        )?)
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Which files to produce.
    #[arg(long, value_enum, default_value_t = FormatArg::Both)]
    format: FormatArg,

    /// Directory the exported files are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// File name without extension.
    #[arg(long, default_value = DEFAULT_FILE_STEM)]
    stem: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Tabular,
    Document,
    Both,
}

/// Command-line flags win over the `GEMINI_*` environment, which wins over built-in defaults.
fn gemini_config(
    base: GeminiConfig,
    api_key: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
) -> GeminiConfig {
    let mut config = base;
    if let Some(model) = model {
        config.model = model;
    }
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
    }
    match api_key {
        Some(api_key) => config.with_api_key(api_key),
        None => config,
    }
}

impl FormatArg {
    fn formats(self) -> Vec<ExportFormat> {
        match self {
            FormatArg::Tabular => vec![ExportFormat::Tabular],
            FormatArg::Document => vec![ExportFormat::Document],
            FormatArg::Both => ExportFormat::ALL.to_vec(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");
    let dotenv = dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        dotenv = ?dotenv,
        "interview-export boot"
    );

    match cli.command {
        Command::Generate {
            topic,
            output,
            api_key,
            model,
            endpoint,
            show_text,
        } => {
            let request = topic.request()?;
            let config = gemini_config(GeminiConfig::from_env(), api_key, model, endpoint);

            let generator = GeminiGenerator::new(config);
            let generated = generator
                .generate(&request)
                .await
                .context("fetching interview questions")?;

            info!(
                model = %generated.model,
                generated_at = %generated.generated_at.to_rfc3339(),
                chars = generated.text.len(),
                "questions generated"
            );

            if show_text {
                println!("{}", generated.text);
            }

            export_text(&generated.text, &output)
        }
        Command::Convert { input, output } => {
            let text = read_input(&input).await?;
            export_text(&text, &output)
        }
        Command::Prompt { topic } => {
            println!("{}", topic.request()?.prompt());
            Ok(())
        }
    }
}

async fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("reading stdin")?;
        return Ok(text);
    }

    tokio::fs::read_to_string(Path::new(input))
        .await
        .with_context(|| format!("reading {input}"))
}

fn export_text(text: &str, output: &OutputArgs) -> anyhow::Result<()> {
    let extraction = segment_with_report(text);
    for condition in &extraction.degraded {
        warn!(?condition, "question/answer pairing is incomplete");
    }

    let records = extraction.records;
    if records.is_empty() {
        println!("0 question/answer pairs found; nothing to export");
        return Ok(());
    }
    info!(records = records.len(), "extracted question/answer pairs");

    let report = export_all(&records, &output.format.formats());

    for failure in &report.failures {
        warn!(format = %failure.format, error = %failure, "export skipped");
        eprintln!("{failure}");
    }

    for artifact in &report.artifacts {
        let path = save_artifact(&output.out_dir, &output.stem, artifact)
            .with_context(|| format!("saving {} export", artifact.format))?;
        println!(
            "{} ({}, {} bytes, sha256={})",
            path.display(),
            artifact.mime_type(),
            artifact.bytes.len(),
            artifact.checksum()
        );
    }

    if report.artifacts.is_empty() {
        bail!("every export format failed");
    }

    Ok(())
}
