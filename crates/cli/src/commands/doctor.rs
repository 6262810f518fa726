//! Doctor command - validate configuration and show status

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::args::DoctorArgs;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    server: CheckResult,
    website: CheckResult,
    linkedin: CheckResult,
    x: CheckResult,
    facebook: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        server: CheckResult::error("Not checked"),
        website: CheckResult::error("Not checked"),
        linkedin: CheckResult::error("Not checked"),
        x: CheckResult::error("Not checked"),
        facebook: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {:#}", e));
            None
        }
    };

    if let Some(ref config) = config {
        report.server = check_server(config);
        report.website = check_website(config);
        report.linkedin = check_platform(
            config.linkedin.enabled,
            &[
                &config.linkedin.access_token_env,
                &config.linkedin.organization_urn_env,
            ],
        );
        report.x = check_platform(config.x.enabled, &[&config.x.bearer_token_env]);
        report.facebook = check_platform(
            config.facebook.enabled,
            &[
                &config.facebook.page_id_env,
                &config.facebook.page_access_token_env,
            ],
        );
    }

    let checks = [
        &report.config,
        &report.server,
        &report.website,
        &report.linkedin,
        &report.x,
        &report.facebook,
    ];

    let has_error = checks.iter().any(|c| c.is_error());
    let all_ok = checks.iter().all(|c| c.is_ok());

    report.overall = if has_error {
        "error".to_string()
    } else if all_ok {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

fn env_is_set(name: &str) -> bool {
    std::env::var(name)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false)
}

fn describe_env(name: &str) -> String {
    let state = if env_is_set(name) { "set" } else { "not set" };
    format!("{} ({})", name, state)
}

fn check_server(config: &AppConfig) -> CheckResult {
    let server = &config.server;

    if server.bind.parse::<std::net::SocketAddr>().is_err() {
        return CheckResult::error(format!("Invalid bind address: {}", server.bind));
    }

    let keys = [&server.signing_key_env, &server.next_signing_key_env];
    let details = serde_json::json!({
        "bind": server.bind,
        "signing_keys": keys
            .iter()
            .map(|env| serde_json::json!({ "env": env, "set": env_is_set(env) }))
            .collect::<Vec<_>>(),
    });

    let message = format!(
        "Bind: {}, Signing key: {}",
        server.bind,
        describe_env(&server.signing_key_env)
    );

    if keys.iter().any(|env| env_is_set(env)) {
        CheckResult::ok(message).with_details(details)
    } else if server.allow_unsigned {
        CheckResult::warn(format!("{}, accepting unsigned calls", message)).with_details(details)
    } else {
        CheckResult::warn(format!("{}, trigger calls will be rejected", message))
            .with_details(details)
    }
}

fn check_website(config: &AppConfig) -> CheckResult {
    if config.website.enabled {
        CheckResult::ok("Enabled, no credentials required")
    } else {
        CheckResult::ok("Website disabled")
    }
}

/// A platform missing credentials still answers each request, with a failure
fn check_platform(enabled: bool, envs: &[&String]) -> CheckResult {
    if !enabled {
        return CheckResult::ok("Disabled");
    }

    if let Some(empty) = envs.iter().find(|env| env.trim().is_empty()) {
        return CheckResult::error(format!("Empty env var name configured: {:?}", empty));
    }

    let message = envs
        .iter()
        .map(|env| describe_env(env))
        .collect::<Vec<_>>()
        .join(", ");

    if envs.iter().all(|env| env_is_set(env)) {
        CheckResult::ok(message)
    } else {
        CheckResult::warn(message)
    }
}

fn print_report(report: &DoctorReport) {
    println!("hirecast Doctor Report");
    println!("======================");
    println!();

    print_check("Config", &report.config);
    print_check("Server", &report.server);
    print_check("Website", &report.website);
    print_check("LinkedIn", &report.linkedin);
    print_check("X", &report.x);
    print_check("Facebook", &report.facebook);

    println!();
    let symbol = match report.overall.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} Overall: {}", symbol, report.overall.to_uppercase());

    if report.overall == "ok" {
        println!();
        println!("Ready to publish! Try: hirecast serve");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    let symbol = match result.status.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} {}: {}", symbol, name, result.message);
}
