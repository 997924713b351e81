//! Cognition CLI - Command-line interface for Synheart Cognition
//!
//! Commands:
//! - analyze: Classify a window of signal samples and print a report
//! - tokens: Print the adaptive tokens for a state
//! - explain: Print the user-facing explanation for a state
//! - validate: Check signal samples for values the engine would mis-weight
//! - doctor: Diagnose configuration and persisted baselines

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use synheart_cognition::cognitive::adapter::{
    parse_baseline, parse_samples, parse_samples_ndjson, validate_samples, SampleIssue,
};
use synheart_cognition::cognitive::aggregator::select_window;
use synheart_cognition::cognitive::baseline::AggregateBaselineStore;
use synheart_cognition::cognitive::encoder::ReportEncoder;
use synheart_cognition::cognitive::{
    evaluate, explain_adaptation, get_adaptive_tokens, tokens_to_css_variables,
};
use synheart_cognition::cognitive::types::{AdaptationMode, CognitiveState, SignalSample};
use synheart_cognition::{CognitionError, EngineConfig, COGNITION_VERSION, PRODUCER_NAME};

/// Cognition - On-device cognitive state inference from behavioral signals
#[derive(Parser)]
#[command(name = "cognition")]
#[command(author = "Synheart AI Inc")]
#[command(version = COGNITION_VERSION)]
#[command(about = "Infer attentional state and adaptive UI tokens from behavioral signals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a window of signal samples and print a report
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Baseline aggregate JSON file
        #[arg(long)]
        baseline: Option<PathBuf>,

        /// Adaptation mode (invisible, subtle, visible); overrides the config file
        #[arg(long)]
        mode: Option<AdaptationMode>,

        /// Engine config JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },

    /// Print the adaptive tokens for a state
    Tokens {
        /// Cognitive state (neutral, flow, distracted, overload, fatigued, hyperfocus, recovery)
        state: CognitiveState,

        /// Adaptation mode
        #[arg(long, default_value = "subtle")]
        mode: AdaptationMode,

        /// Print CSS custom properties instead of JSON
        #[arg(long)]
        css: bool,
    },

    /// Print the user-facing explanation for a state
    Explain {
        state: CognitiveState,

        #[arg(long, default_value = "subtle")]
        mode: AdaptationMode,
    },

    /// Check signal samples for values the engine would mis-weight
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration and persisted baselines
    Doctor {
        /// Check a saved baseline store file
        #[arg(long)]
        baselines: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one sample per line)
    Ndjson,
    /// JSON array of samples
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CognitionCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            input_format,
            baseline,
            mode,
            config,
            output_format,
        } => cmd_analyze(
            &input,
            input_format,
            baseline.as_deref(),
            mode,
            config.as_deref(),
            output_format,
        ),
        Commands::Tokens { state, mode, css } => cmd_tokens(state, mode, css),
        Commands::Explain { state, mode } => {
            println!("{}", explain_adaptation(state, &get_adaptive_tokens(state, mode)));
            Ok(())
        }
        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),
        Commands::Doctor { baselines, json } => cmd_doctor(baselines.as_deref(), json),
    }
}

fn read_input(input: &Path) -> Result<String, CognitionCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn read_samples(
    input: &Path,
    input_format: InputFormat,
) -> Result<Vec<SignalSample>, CognitionCliError> {
    let input_data = read_input(input)?;
    let samples = match input_format {
        InputFormat::Ndjson => parse_samples_ndjson(&input_data)?,
        InputFormat::Json => parse_samples(&input_data)?,
    };
    Ok(samples)
}

fn cmd_analyze(
    input: &Path,
    input_format: InputFormat,
    baseline: Option<&Path>,
    mode: Option<AdaptationMode>,
    config: Option<&Path>,
    output_format: OutputFormat,
) -> Result<(), CognitionCliError> {
    let config = match config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let mode = mode.unwrap_or(config.adaptation_mode);

    let baseline = match baseline {
        Some(path) => Some(parse_baseline(&fs::read_to_string(path)?)?),
        None => None,
    };

    let mut samples = read_samples(input, input_format)?;
    if let Some(window) = config.window() {
        samples = select_window(&samples, window);
    }
    if samples.is_empty() {
        tracing::warn!("no samples in input; reporting neutral state");
    }

    let evaluation = evaluate(&samples, baseline.as_ref(), mode);
    let report = ReportEncoder::new().encode(&evaluation);

    let output = match output_format {
        OutputFormat::Json => serde_json::to_string(&report)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&report)?,
    };
    println!("{}", output);

    Ok(())
}

fn cmd_tokens(
    state: CognitiveState,
    mode: AdaptationMode,
    css: bool,
) -> Result<(), CognitionCliError> {
    let tokens = get_adaptive_tokens(state, mode);

    if css {
        println!(":root {{");
        for (name, value) in tokens_to_css_variables(&tokens) {
            println!("  {}: {};", name, value);
        }
        println!("}}");
    } else {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    }

    Ok(())
}

fn cmd_validate(
    input: &Path,
    input_format: InputFormat,
    json: bool,
) -> Result<(), CognitionCliError> {
    let samples = read_samples(input, input_format)?;
    let issues = validate_samples(&samples);

    let report = ValidationReport {
        total_samples: samples.len(),
        valid_samples: samples.len() - issues.len(),
        invalid_samples: issues.len(),
        issues,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total samples:   {}", report.total_samples);
        println!("Valid samples:   {}", report.valid_samples);
        println!("Invalid samples: {}", report.invalid_samples);

        if !report.issues.is_empty() {
            println!("\nIssues:");
            for issue in &report.issues {
                println!(
                    "  - Sample {} ({}): {:?}",
                    issue.index, issue.signal_type, issue.reason
                );
            }
        }
    }

    if report.invalid_samples > 0 {
        Err(CognitionCliError::ValidationFailed(report.invalid_samples))
    } else {
        Ok(())
    }
}

fn cmd_doctor(baselines: Option<&Path>, json: bool) -> Result<(), CognitionCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "cognition_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Cognition version {}", COGNITION_VERSION),
    });

    checks.push(DoctorCheck {
        name: "default_mode".to_string(),
        status: CheckStatus::Ok,
        message: format!(
            "Default adaptation mode: {}",
            EngineConfig::default().adaptation_mode
        ),
    });

    if let Some(baselines_path) = baselines {
        let check = if baselines_path.exists() {
            match fs::read_to_string(baselines_path) {
                Ok(content) => match AggregateBaselineStore::from_json(&content) {
                    Ok(store) => DoctorCheck {
                        name: "baselines".to_string(),
                        status: CheckStatus::Ok,
                        message: format!(
                            "Baselines file valid ({} of {} windows)",
                            store.window_count(),
                            store.window_size()
                        ),
                    },
                    Err(e) => DoctorCheck {
                        name: "baselines".to_string(),
                        status: CheckStatus::Error,
                        message: format!("Invalid baselines JSON: {}", e),
                    },
                },
                Err(e) => DoctorCheck {
                    name: "baselines".to_string(),
                    status: CheckStatus::Error,
                    message: format!("Cannot read baselines file: {}", e),
                },
            }
        } else {
            DoctorCheck {
                name: "baselines".to_string(),
                status: CheckStatus::Warning,
                message: "Baselines file does not exist".to_string(),
            }
        };
        checks.push(check);
    }

    let stdin_message = if atty::is(atty::Stream::Stdin) {
        "stdin is a TTY (pass samples with --input)"
    } else {
        "stdin is a pipe (ready for --input -)"
    };
    checks.push(DoctorCheck {
        name: "stdin".to_string(),
        status: CheckStatus::Ok,
        message: stdin_message.to_string(),
    });

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: COGNITION_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Cognition Doctor Report");
        println!("=======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(CognitionCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Error handling

enum CognitionCliError {
    Io(io::Error),
    Engine(CognitionError),
    Json(serde_json::Error),
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for CognitionCliError {
    fn from(e: io::Error) -> Self {
        CognitionCliError::Io(e)
    }
}

impl From<CognitionError> for CognitionCliError {
    fn from(e: CognitionError) -> Self {
        CognitionCliError::Engine(e)
    }
}

impl From<serde_json::Error> for CognitionCliError {
    fn from(e: serde_json::Error) -> Self {
        CognitionCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CognitionCliError> for CliError {
    fn from(e: CognitionCliError) -> Self {
        match e {
            CognitionCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CognitionCliError::Engine(e) => {
                let hint = match &e {
                    CognitionError::InvalidConfig(_) => "Check the engine config file",
                    CognitionError::UnknownState(_) | CognitionError::UnknownAdaptationMode(_) => {
                        "Run 'cognition --help' for accepted values"
                    }
                    _ => "Ensure input is an array or NDJSON stream of signal samples",
                };
                CliError {
                    code: "PARSE_ERROR".to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            CognitionCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            CognitionCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} samples failed validation", count),
                hint: Some("Drop or fix the listed samples and retry".to_string()),
            },
            CognitionCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: None,
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_samples: usize,
    valid_samples: usize,
    invalid_samples: usize,
    issues: Vec<SampleIssue>,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
