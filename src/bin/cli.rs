//! APP CLI Client
//!
//! Command-line interface for invoking any APP verb.

use std::process::ExitCode;
use std::time::Duration;

use appclient::{AppError, Config, Connection};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// APP CLI
#[derive(Parser, Debug)]
#[command(name = "app-cli")]
#[command(about = "Invoke a command on an Account Provisioning Protocol server")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(short, long)]
    server: String,

    /// Server port
    #[arg(short, long)]
    port: u16,

    /// Connect/read timeout in seconds (0 = none)
    #[arg(short, long, default_value = "120")]
    timeout: u64,

    /// Trace every line sent and received
    #[arg(short, long)]
    debug: bool,

    /// Login user
    #[arg(short, long)]
    user: Option<String>,

    /// Login domain
    #[arg(long)]
    domain: Option<String>,

    /// Login password
    #[arg(long)]
    password: Option<String>,

    /// Verb to invoke, e.g. domain_list
    verb: String,

    /// Parameters as NAME=VALUE
    #[arg(value_parser = parse_param)]
    params: Vec<(String, String)>,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got {:?}", raw)),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing/logging
    let default_filter = if args.debug {
        "warn,appclient=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut builder = Config::builder()
        .host(&args.server)
        .port(args.port)
        .timeout(Duration::from_secs(args.timeout))
        .debug(args.debug);
    if let Some(user) = &args.user {
        builder = builder.user(user);
    }
    if let Some(domain) = &args.domain {
        builder = builder.domain(domain);
    }
    if let Some(password) = &args.password {
        builder = builder.password(password);
    }
    let config = builder.build();

    match run(&config, &args.verb, &args.params) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(match e {
                AppError::Authentication { .. } => 3,
                AppError::Protocol(_) => 4,
                _ => 2,
            })
        }
    }
}

/// Connect, invoke and print every response line. Returns the command's `Ok()`.
fn run(config: &Config, verb: &str, params: &[(String, String)]) -> appclient::Result<bool> {
    let mut conn = Connection::connect(config)?;
    let response = conn.invoke(verb, params.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;

    for line in response.lines() {
        println!("{}", line);
    }

    let ok = conn.is_ok();
    conn.close();
    Ok(ok)
}
