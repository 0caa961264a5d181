//! campus-profile: 学生资料命令行工具
//!
//! Usage:
//!   campus-profile fetch <u_id>                          Resolve and print a profile
//!   campus-profile update <u_id> --field k=v [--photo p] Submit a profile update
//!   campus-profile routes                                Print the active route table

use anyhow::{anyhow, bail, Context};
use campus_profile_client::{PhotoSource, ProfileClient, ProfileUpdate};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "fetch" => cmd_fetch(&args[2..]).await,
        "update" => cmd_update(&args[2..]).await,
        "routes" => cmd_routes(&args[2..]),
        "version" | "--version" | "-V" => {
            println!("campus-profile {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"campus-profile: 学生资料命令行工具

USAGE:
    campus-profile <COMMAND> [OPTIONS]

COMMANDS:
    fetch <u_id> [--verbose]            Resolve a profile and print the payload
    update <u_id> [--field k=v]...      Submit a profile update
           [--photo <path>] [--refresh]
    routes                              Print the active route table (YAML)
    version                             Show version information
    help                                Show this help message

OPTIONS:
    --base-url <url>                    Backend base URL
    --routes <file>                     YAML route table

ENVIRONMENT:
    CAMPUS_API_BASE_URL                 Backend base URL
    CAMPUS_API_TOKEN                    Bearer token
    CAMPUS_ROUTES_FILE                  YAML route table
    RUST_LOG                            Log filter (default: warn)"#
    );
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

fn flag_values<'a>(args: &'a [String], name: &str) -> Vec<&'a str> {
    args.windows(2)
        .filter(|w| w[0] == name)
        .map(|w| w[1].as_str())
        .collect()
}

fn positional(args: &[String]) -> Option<&str> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        match arg.as_str() {
            "--base-url" | "--routes" | "--field" | "--photo" => skip_next = true,
            a if a.starts_with("--") => {}
            a => return Some(a),
        }
    }
    None
}

fn build_client(args: &[String]) -> anyhow::Result<ProfileClient> {
    let mut builder = ProfileClient::builder();
    if let Some(url) = flag_value(args, "--base-url") {
        builder = builder.base_url(url);
    }
    if let Some(path) = flag_value(args, "--routes") {
        builder = builder.routes_file(path);
    }
    builder.build().context("cannot build profile client")
}

async fn cmd_fetch(args: &[String]) -> anyhow::Result<()> {
    let client = build_client(args)?;
    // An absent id goes through as empty so the client reports it.
    let u_id = positional(args).unwrap_or_default();
    let resolution = client.fetch_profile(u_id).await?;

    if args.iter().any(|a| a == "--verbose") {
        eprintln!("request_id: {}", resolution.request_id);
        for attempt in &resolution.attempts {
            let status = attempt
                .http_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            eprintln!("  {} -> {} ({:?})", attempt.candidate, status, attempt.outcome);
        }
        eprintln!("winner: {}", resolution.winner);
    }
    println!("{}", serde_json::to_string_pretty(&resolution.body)?);
    Ok(())
}

async fn cmd_update(args: &[String]) -> anyhow::Result<()> {
    let client = build_client(args)?;
    let u_id = positional(args).ok_or_else(|| anyhow!("update requires a <u_id>"))?;

    let mut update = ProfileUpdate::new(u_id);
    for pair in flag_values(args, "--field") {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("--field expects name=value, got '{pair}'"))?;
        update.set_field(name.trim(), value)?;
    }
    if let Some(photo) = flag_value(args, "--photo") {
        update.u_profile_photo = Some(PhotoSource::parse(photo));
    }
    if update.plan()?.text_fields.len() == 1 && update.u_profile_photo.is_none() {
        bail!("nothing to update: pass at least one --field or --photo");
    }

    if args.iter().any(|a| a == "--refresh") {
        let resolution = client.update_and_refresh(&update).await?;
        println!("{}", serde_json::to_string_pretty(&resolution.body)?);
    } else {
        let body = client.update_profile(&update).await?;
        println!("{}", serde_json::to_string_pretty(&body)?);
    }
    Ok(())
}

fn cmd_routes(args: &[String]) -> anyhow::Result<()> {
    let client = build_client(args)?;
    print!("{}", serde_yaml::to_string(client.routes())?);
    Ok(())
}
