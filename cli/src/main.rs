//! rxrules: rule-based drug recommendation advisor.
//!
//! Usage:
//!   rxrules serve --config rxrules.toml
//!   rxrules recommend --age 72 --symptom fever --condition kidney_disease
//!   rxrules scenarios

mod scenarios;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rxrules_contracts::error::{RxError, RxResult};
use rxrules_contracts::patient::{Condition, PatientData, Symptom};
use rxrules_contracts::recommendation::Recommendation;
use rxrules_engine::{evaluate, RuleEngine};
use rxrules_web::config::ServerConfig;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Rule-based drug suggestions with safety warnings.
///
/// Not medical advice. The rule set is fixed and has not been clinically
/// validated.
#[derive(Parser)]
#[command(name = "rxrules", version, about = "Rule-based drug recommendation advisor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the intake form and JSON API over HTTP.
    Serve(ServeArgs),
    /// Evaluate one patient from command-line flags.
    Recommend(RecommendArgs),
    /// Run the built-in reference patients and report pass/fail.
    Scenarios,
}

#[derive(Args)]
struct ServeArgs {
    /// TOML file with `host`, `port`, `log_filter`.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured host.
    #[arg(long)]
    host: Option<String>,
    /// Overrides the configured port.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args)]
struct RecommendArgs {
    #[arg(long, default_value_t = 0)]
    age: u32,
    /// Repeatable, e.g. `--symptom fever --symptom cough`.
    #[arg(long = "symptom")]
    symptoms: Vec<Symptom>,
    /// Repeatable, e.g. `--condition diabetes`.
    #[arg(long = "condition")]
    conditions: Vec<Condition>,
    #[arg(long, default_value = "")]
    allergies: String,
    #[arg(long = "meds", default_value = "")]
    current_meds: String,
    /// mg/dL
    #[arg(long)]
    creatinine: Option<f64>,
    /// mg/dL
    #[arg(long)]
    blood_sugar: Option<f64>,
    /// Print the recommendation as JSON.
    #[arg(long)]
    json: bool,
    /// Also print which rules contributed.
    #[arg(long)]
    trace: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Recommend(args) => {
            init_logging("warn");
            recommend(args)
        }
        Command::Scenarios => {
            init_logging("warn");
            run_scenarios()
        }
    };

    if let Err(e) = result {
        eprintln!("rxrules: {}", e);
        std::process::exit(1);
    }
}

/// Initialize structured logging. `RUST_LOG` wins over `default_filter`.
fn init_logging(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .compact()
        .init();
}

// ── Subcommands ───────────────────────────────────────────────────────────────

async fn serve(args: ServeArgs) -> RxResult<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    init_logging(&config.log_filter);

    let mut server = rxrules_web::start(&config, Arc::new(RuleEngine)).await?;
    println!("Serving on http://{}/ (Ctrl-C to stop)", server.local_addr());

    tokio::signal::ctrl_c().await.map_err(|e| RxError::ServerError {
        reason: format!("failed to listen for Ctrl-C: {e}"),
    })?;

    server.shutdown();
    server.join().await
}

fn recommend(args: RecommendArgs) -> RxResult<()> {
    let patient = PatientData {
        age: args.age,
        symptoms: args.symptoms.into_iter().collect(),
        conditions: args.conditions.into_iter().collect(),
        allergies: args.allergies,
        current_meds: args.current_meds,
        creatinine: args.creatinine.filter(|v| v.is_finite()),
        blood_sugar: args.blood_sugar.filter(|v| v.is_finite()),
        ..PatientData::default()
    };

    let eval = evaluate(&patient);

    if args.json {
        let json = serde_json::to_string_pretty(&eval.recommendation).map_err(|e| {
            RxError::SerializationError {
                reason: format!("recommendation: {e}"),
            }
        })?;
        println!("{json}");
    } else {
        print_recommendation(&eval.recommendation);
    }

    if args.trace {
        println!("Rules: {}", eval.trace.join(" -> "));
    }
    Ok(())
}

fn run_scenarios() -> RxResult<()> {
    let scenarios = scenarios::all();
    let mut failed = 0;

    for scenario in &scenarios {
        let (eval, ok) = scenario.run();
        println!(
            "  [{}] {:<36} {}",
            if ok { "PASS" } else { "FAIL" },
            scenario.name,
            eval.recommendation.drug_name
        );
        if !ok {
            failed += 1;
        }
    }

    println!();
    println!("{} of {} scenarios passed.", scenarios.len() - failed, scenarios.len());

    if failed > 0 {
        return Err(RxError::ScenarioFailed {
            failed,
            total: scenarios.len(),
        });
    }
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_recommendation(rec: &Recommendation) {
    println!("Drug:    {}", rec.drug_name);
    println!("Dosage:  {}", rec.dosage);
    println!("Reason:  {}", rec.reason);
    print_list("Alternatives", &rec.alternatives);
    print_list("Warnings", &rec.warnings);
    print_list("Precautions", &rec.precautions);
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{title}:");
    for item in items {
        println!("  - {item}");
    }
}
