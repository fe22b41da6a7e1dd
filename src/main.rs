// Aegis CLI - run a compliance audit over one video or transcript

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use aegis::audit::{AuditRunner, ReportOrchestrator};
use aegis::config::{AegisConfig, LlmBackend};
use aegis::llm::{LlmProvider, OllamaConfig, OllamaProvider, OpenAiConfig, OpenAiProvider};
use aegis::report::ParsedReport;
use aegis::rules::RuleStore;
use aegis::transcript::language::is_likely_english;
use aegis::transcript::{TranscriptionProvider, VideoDbConfig, VideoDbProvider};
use aegis::{AnalysisRun, PlatformReport};

#[derive(Parser, Debug)]
#[command(
    name = "aegis",
    version,
    about = "AI compliance auditor for video content across social platforms"
)]
struct Cli {
    /// Video file to transcribe and audit
    #[arg(long, conflicts_with = "transcript")]
    video: Option<PathBuf>,

    /// Pre-rendered transcript text file ("[MM:SS - MM:SS] text" lines)
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Comma-separated platform names (each needs a <platform>.txt rule file)
    #[arg(long, default_value = "youtube")]
    platforms: String,

    /// Directory containing the rule documents (overrides AEGIS_RULES_DIR)
    #[arg(long)]
    rules_dir: Option<PathBuf>,

    /// LLM backend: openai or ollama (overrides AEGIS_LLM_BACKEND)
    #[arg(long)]
    backend: Option<LlmBackend>,

    /// Skip the English-content heuristic gate
    #[arg(long)]
    skip_language_check: bool,

    /// Print the run as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = AegisConfig::from_env();
    if let Some(dir) = cli.rules_dir.clone() {
        config.rules_dir = dir;
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }

    let (transcript_text, video_name) = obtain_transcript(&cli, &config).await?;

    if !cli.skip_language_check && !is_likely_english(&transcript_text) {
        bail!(
            "The transcript does not appear to contain English speech; \
             the compliance prompts are English-only (pass --skip-language-check to override)"
        );
    }

    let platforms: Vec<String> = cli
        .platforms
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if platforms.is_empty() {
        bail!("No platforms selected");
    }

    let llm = build_llm_provider(&config);
    if !llm.is_ready().await {
        log::warn!(
            "LLM backend '{}' is not ready; analysis requests will likely fail",
            llm.provider_name()
        );
    }

    let runner = AuditRunner::new(
        RuleStore::new(config.rules_dir.clone()),
        ReportOrchestrator::new(llm),
    );
    let run = runner.run(&transcript_text, &platforms, video_name).await;

    if run.reports.is_empty() {
        bail!(
            "Analysis complete, but no reports were produced. Verify the rule files in {} \
             and the LLM backend configuration",
            config.rules_dir.display()
        );
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&run)?);
    } else {
        render_run(&run);
    }

    Ok(())
}

/// Resolve the transcript text: either read a pre-rendered file or upload
/// the video to the transcription service.
async fn obtain_transcript(cli: &Cli, config: &AegisConfig) -> Result<(String, Option<String>)> {
    if let Some(path) = &cli.transcript {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read transcript file {}", path.display()))?;
        return Ok((text, None));
    }

    let Some(path) = &cli.video else {
        bail!("Provide --video or --transcript");
    };

    let provider = VideoDbProvider::new(VideoDbConfig {
        base_url: config.videodb_base_url.clone(),
        api_key: config.videodb_api_key.clone(),
        ..VideoDbConfig::default()
    });

    log::info!("Generating transcript for {} (this may take a minute)", path.display());
    let transcript = provider
        .transcribe(path)
        .await
        .context("Transcription failed")?;

    let video_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string());

    Ok((transcript.render(), video_name))
}

fn build_llm_provider(config: &AegisConfig) -> Arc<dyn LlmProvider> {
    match config.backend {
        LlmBackend::OpenAi => Arc::new(OpenAiProvider::new(OpenAiConfig {
            base_url: config.openai_base_url.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
            timeout_secs: config.request_timeout_secs,
        })),
        LlmBackend::Ollama => Arc::new(OllamaProvider::new(OllamaConfig {
            base_url: config.ollama_base_url.clone(),
            model: config.ollama_model.clone(),
            timeout_secs: config.request_timeout_secs,
        })),
    }
}

fn render_run(run: &AnalysisRun) {
    if let Some(name) = &run.video_name {
        println!("Compliance audit for {} ({} platforms)\n", name, run.reports.len());
    }

    for (platform, report) in &run.reports {
        println!("==== {} ====", platform);
        match report {
            PlatformReport::Structured(parsed) => render_parsed(parsed),
            PlatformReport::Unstructured(raw) => {
                println!("(report could not be segmented; raw model output follows)\n");
                println!("{}", raw);
            }
        }
        println!();
    }
}

fn render_parsed(report: &ParsedReport) {
    println!("\nVideo Content Summary");
    println!("---------------------");
    println!("{}\n", report.summary);

    println!("Compliance Risk Score: {}/10 ({})\n", report.risk_score, report.verdict_text);

    println!("Rule-by-Rule Analysis");
    println!("---------------------");
    println!("{}\n", report.rule_analysis);

    println!("Strategic Advisory");
    println!("------------------");
    println!("{}", report.advisory);
}
