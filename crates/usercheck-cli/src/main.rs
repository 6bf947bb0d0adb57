//! usercheck CLI - black-box validation testing for user-management APIs

mod storage;
mod suites;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Value, json};

use usercheck_core::report::{BatchError, MatchStrategy, Report};
use usercheck_core::{Config, to_http_file};
use usercheck_runner::{ApiClient, Target, run_batch};

#[derive(Parser)]
#[command(name = "usercheck")]
#[command(about = "Black-box validation testing for user-management APIs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "terminal")]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a validation suite against the configured service
    Run {
        /// Which suite to run
        #[arg(short, long, default_value = "all")]
        suite: SuiteArg,

        /// Config file (default: .usercheck.toml)
        #[arg(short, long)]
        config: Option<String>,

        /// Report directory (overrides config)
        #[arg(short, long)]
        report_dir: Option<String>,

        /// Require exact message equality instead of substring containment
        #[arg(long)]
        exact: bool,
    },

    /// Initialize config file
    Init,

    /// Show config status and readiness
    Doctor,

    /// Export JSON Schema for the report format
    Schema,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SuiteArg {
    Login,
    CreateUser,
    All,
}

impl SuiteArg {
    fn selected(self) -> Vec<Suite> {
        match self {
            Self::Login => vec![Suite::Login],
            Self::CreateUser => vec![Suite::CreateUser],
            Self::All => vec![Suite::Login, Suite::CreateUser],
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Suite {
    Login,
    CreateUser,
}

impl Suite {
    const fn slug(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::CreateUser => "create-user",
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Login => "login validation",
            Self::CreateUser => "create-user validation",
        }
    }

    const fn target(self) -> Target {
        match self {
            Self::Login => Target::Login,
            Self::CreateUser => Target::CreateUser,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    Terminal,
    Json,
    Silent,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(3)
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Run {
            suite,
            config,
            report_dir,
            exact,
        } => {
            let cfg = if let Some(path) = config {
                Config::load(std::path::Path::new(&path))?
            } else {
                Config::load_default()?
            };

            let strategy = if exact {
                MatchStrategy::Exact
            } else {
                cfg.match_strategy
            };
            let report_dir = report_dir.map_or_else(|| cfg.report_dir.clone(), PathBuf::from);

            run_suites(&cfg, suite.selected(), strategy, &report_dir, cli.output)
        }

        Commands::Init => {
            let config_path = ".usercheck.toml";
            if std::path::Path::new(config_path).exists() {
                eprintln!("{config_path} already exists");
                return Ok(1);
            }

            std::fs::write(config_path, Config::example())?;
            println!("Created {config_path}");
            println!("\nEdit the file to configure:");
            println!("  - base_url: service to test");
            println!("  - credentials: admin login for the bearer token");
            println!("  - report_dir: where JSON reports are written");
            Ok(0)
        }

        Commands::Doctor => {
            println!("usercheck doctor");
            println!("================\n");

            let config_ok = std::path::Path::new(".usercheck.toml").exists()
                || std::path::Path::new(".usercheck.json").exists()
                || std::path::Path::new("usercheck.toml").exists();
            println!(
                "[{}] Config file (.usercheck.toml)",
                if config_ok { "OK" } else { "--" }
            );

            if let Ok(cfg) = Config::load_default() {
                println!("[OK] base_url: {}", cfg.base_url);
                println!("[OK] report_dir: {}", cfg.report_dir.display());
            }

            println!("{}", doctor_footer(config_ok));
            Ok(0)
        }

        Commands::Schema => {
            println!("{}", usercheck_core::generate_schema());
            Ok(0)
        }
    }
}

fn run_suites(
    cfg: &Config,
    selected: Vec<Suite>,
    strategy: MatchStrategy,
    report_dir: &std::path::Path,
    output: OutputFormat,
) -> Result<i32> {
    let client = ApiClient::new(&cfg.base_url, cfg.headers.clone(), cfg.timeout_secs)?;

    // Obtain the bearer token once; it is passed explicitly to every call
    // that needs it.
    let login_payload = json!({
        "email": cfg.credentials.email,
        "password": cfg.credentials.password,
    });
    let login = client.login(&login_payload, None)?;
    let Some(token) = login.token().map(String::from) else {
        eprintln!(
            "Error: login as {} failed with status {}, cannot obtain token",
            cfg.credentials.email, login.status
        );
        return Ok(3);
    };

    let mut batch_errors: Vec<BatchError> = Vec::new();
    let mut json_reports: Vec<Value> = Vec::new();

    for suite in selected {
        if output == OutputFormat::Terminal {
            eprintln!("Running {} suite...", suite.slug());
        }

        let (cases, suite_token) = match suite {
            Suite::Login => (suites::login_cases(cfg), None),
            Suite::CreateUser => {
                ensure_fixture_user(&client, &token);
                let mut cases = suites::create_user_cases();
                cases.push(suites::duplicate_create_case());
                (cases, Some(token.as_str()))
            }
        };

        let results = run_batch(&client, suite.target(), &cases, suite_token);
        let report = Report::build(suite.title(), storage::timestamp_iso(), &results, strategy);
        let path = storage::save_report(&report, suite.slug(), report_dir)?;

        if !report.faulty_cases.is_empty() {
            let target = suite.target();
            let content = to_http_file(
                &report.faulty_cases,
                target.method(),
                &client.url(target.path()),
                suite_token,
            );
            if let Err(e) = storage::save_repro(&content, &path) {
                eprintln!("Warning: failed to write .http file: {e}");
            }
        }

        match output {
            OutputFormat::Terminal => print_report(&report, &path),
            OutputFormat::Json => json_reports.push(serde_json::to_value(&report)?),
            OutputFormat::Silent => {}
        }

        if let Err(e) = report.ensure_passed(&path.display().to_string()) {
            batch_errors.push(e);
        }
    }

    match output {
        OutputFormat::Terminal => {
            if batch_errors.is_empty() {
                println!("\nPASS: all suites clean");
            } else {
                println!("\nFAIL:");
                for e in &batch_errors {
                    println!("  {e}");
                }
            }
        }
        OutputFormat::Json => {
            let verdict = if batch_errors.is_empty() { "PASS" } else { "FAIL" };
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "verdict": verdict,
                    "reports": json_reports,
                }))?
            );
        }
        OutputFormat::Silent => {}
    }

    Ok(i32::from(!batch_errors.is_empty()))
}

const fn doctor_footer(config_ok: bool) -> &'static str {
    if config_ok {
        "\nReady to run!"
    } else {
        "\nCreate config file:\n  usercheck init"
    }
}

/// Make sure the fixture user exists so the duplicate-create case hits a
/// real conflict. Creation result is deliberately ignored; the conflict
/// case itself is what gets asserted.
fn ensure_fixture_user(client: &ApiClient, token: &str) {
    let fixture = suites::create_user_defaults();
    let fixture_email = fixture.get("email").and_then(Value::as_str).unwrap_or("");

    let exists = client
        .get_all_users(None, Some(token))
        .ok()
        .and_then(|resp| {
            let rows = resp.body.get("data")?.get("rows")?.as_array()?;
            Some(rows.iter().any(|row| {
                row.get("email").and_then(Value::as_str) == Some(fixture_email)
            }))
        })
        .unwrap_or(false);

    if !exists {
        let _ = client.create_user(&Value::Object(fixture), Some(token));
    }
}

fn print_report(report: &Report, path: &std::path::Path) {
    let passed = report.total_cases - report.failures;
    println!(
        "{}: {}/{} passed",
        report.title, passed, report.total_cases
    );

    for outcome in &report.faulty_cases {
        let actual_status = outcome
            .actual
            .status
            .map_or_else(|| "none".to_string(), |s| s.to_string());
        println!(
            "  FAIL {}: expected {} \"{}\", got {} \"{}\"",
            outcome.test_case,
            outcome.expected.status,
            outcome.expected.message,
            actual_status,
            outcome.actual.message.as_deref().unwrap_or(""),
        );
        if let Some(err) = &outcome.error {
            println!("       transport: {err}");
        }
    }

    println!("Report saved: {}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_footer_depends_on_config_presence() {
        assert!(doctor_footer(true).contains("Ready to run"));
        assert!(doctor_footer(false).contains("usercheck init"));
        assert!(!doctor_footer(false).contains("Ready to run"));
    }
}
