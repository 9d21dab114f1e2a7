//! themereg CLI - Main entry point for CLI binary
//!
//! This binary provides the `themereg` tool for inspecting and driving the
//! theme registration state.

use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use themereg_lib::engine::{
    cli::formatter::{format_timestamp, format_value, CliFormatter},
    cli::{Cli, Commands, ErrorsAction, OptionsAction, OutputFormat},
    config::Config,
    logging,
    options::{NoticeVisibility, OptionValue},
    registration::{Registration, RegistrationError},
    updater::UpdateTransient,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run_cli(cli) {
        Ok(code) => code,
        Err(e) => {
            CliFormatter::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    let project_dir = cli.get_project_dir();
    let json = cli.format == OutputFormat::Json;

    if let Commands::Init { slug, endpoint } = &cli.command {
        cmd_init(&project_dir, slug, endpoint.as_deref(), json)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load_or_default(&project_dir)
        .with_context(|| format!("loading config from {}", project_dir.display()))?;
    let mut registration = Registration::from_config(&config, &project_dir)
        .with_context(|| format!("opening {}", config.storage_path(&project_dir).display()))?;

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Activate => cmd_activate(&mut registration, json)?,
        Commands::CheckUpdate { version } => cmd_check_update(&registration, &version, json)?,
        Commands::Status => cmd_status(&registration, json)?,
        Commands::Options { action } => cmd_options(&mut registration, action, json)?,
        Commands::Errors { action } => cmd_errors(&mut registration, action, json)?,
        Commands::DismissNotice => {
            registration.dismiss_notice()?;
            if json {
                println!("{}", serde_json::json!({ "success": true, "notice": NoticeVisibility::Hidden }));
            } else {
                CliFormatter::success("Notice dismissed");
            }
        }
        Commands::Register { code } => return Ok(report_disallowed(registration.register(&code), json)),
        Commands::Unregister => return Ok(report_disallowed(registration.unregister(), json)),
        Commands::LatestVersion => {
            return Ok(report_disallowed(registration.get_latest_version(), json))
        }
        Commands::DownloadUrl { version } => {
            return Ok(report_disallowed(registration.get_download_url(&version), json))
        }
        Commands::Purge => {
            registration.purge()?;
            if json {
                println!("{}", serde_json::json!({ "success": true }));
            } else {
                CliFormatter::success("Removed all registration options");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_init(project_dir: &Path, slug: &str, endpoint: Option<&str>, json: bool) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(project_dir)?;
    config.theme.slug = slug.to_string();
    if let Some(endpoint) = endpoint {
        config.updates.endpoint = endpoint.to_string();
    }
    config.save(project_dir)?;

    if json {
        println!("{}", serde_json::json!({
            "success": true,
            "project_dir": project_dir.display().to_string(),
            "slug": config.theme.slug,
            "endpoint": config.updates.endpoint,
        }));
    } else {
        CliFormatter::success(&format!("Wrote config for {}", config.theme.slug));
        CliFormatter::kv("Directory", &project_dir.display().to_string());
        CliFormatter::kv("Endpoint", &config.updates.endpoint);
    }
    Ok(())
}

fn cmd_activate(registration: &mut Registration, json: bool) -> anyhow::Result<()> {
    let report = registration.on_activate()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.added.is_empty() && report.removed.is_empty() {
        CliFormatter::info("Already activated, nothing changed");
    } else {
        CliFormatter::success("Activated");
        for name in &report.added {
            CliFormatter::item(&format!("added {}", name));
        }
        for name in &report.removed {
            CliFormatter::item(&format!("removed {}", name));
        }
    }
    Ok(())
}

fn cmd_check_update(registration: &Registration, version: &str, json: bool) -> anyhow::Result<()> {
    let slug = registration.theme_slug().to_string();
    let transient = registration.check_for_update(UpdateTransient::with_installed(&slug, version));
    let update = transient.response.get(&slug);

    if json {
        println!("{}", serde_json::json!({
            "installed": version,
            "update": update,
        }));
        return Ok(());
    }

    match update {
        Some(update) => {
            CliFormatter::success(&format!("Update available: {} -> {}", version, update.new_version));
            CliFormatter::kv("Details", &update.url);
            CliFormatter::kv("Package", &update.package);
        }
        None => CliFormatter::info(&format!("{} {} is up to date", slug, version)),
    }
    Ok(())
}

fn cmd_status(registration: &Registration, json: bool) -> anyhow::Result<()> {
    let flags = registration.flags()?;
    let errors = registration.get_errors()?;
    let notice = registration.notice()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({
            "theme": registration.theme_slug(),
            "registered": registration.is_registered(),
            "verified": registration.is_verified(),
            "public": registration.is_public(),
            "code": registration.get_code(),
            "notice": notice,
            "errors": errors,
            "flags": flags,
        }))?);
        return Ok(());
    }

    CliFormatter::header(&format!("Registration: {}", registration.theme_slug()));
    CliFormatter::kv("Registered", &registration.is_registered().to_string());
    CliFormatter::kv("Verified", &registration.is_verified().to_string());
    CliFormatter::kv("Public", &registration.is_public().to_string());
    CliFormatter::kv(
        "Notice",
        match notice {
            NoticeVisibility::Shown => "shown",
            NoticeVisibility::Hidden => "hidden",
        },
    );

    CliFormatter::header("Flags");
    for (name, value) in &flags {
        let rendered = match value {
            Some(OptionValue::Int(ts)) if name.ends_with("_sold_at") => format_timestamp(*ts),
            other => format_value(other.as_ref()),
        };
        CliFormatter::kv(name, &rendered);
    }

    if !errors.is_empty() {
        CliFormatter::header("Errors");
        for error in &errors {
            CliFormatter::item(error);
        }
    }
    Ok(())
}

fn cmd_options(registration: &mut Registration, action: OptionsAction, json: bool) -> anyhow::Result<()> {
    let store = registration.options_mut();

    match action {
        OptionsAction::List => {
            let all = store.get_all()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else if all.is_empty() {
                CliFormatter::info(&format!("{} is empty", store.option_name()));
            } else {
                CliFormatter::header(store.option_name());
                for (key, value) in &all {
                    CliFormatter::kv(key, &format!("{} ({})", value, value.kind()));
                }
            }
        }
        OptionsAction::Get { key } => {
            let value = store.get_opt(&key)?;
            if json {
                println!("{}", serde_json::json!({ "key": key, "value": value }));
            } else {
                CliFormatter::kv(&key, &format_value(value.as_ref()));
            }
        }
        OptionsAction::Set { key, value, kind } => {
            let value = kind.parse(&value).map_err(|e| anyhow!(e))?;
            store.set(&key, value.clone())?;
            if json {
                println!("{}", serde_json::json!({ "success": true, "key": key, "value": value }));
            } else {
                CliFormatter::success(&format!("Set {} = {}", key, value));
            }
        }
        OptionsAction::Delete { key } => {
            store.delete(&key)?;
            if json {
                println!("{}", serde_json::json!({ "success": true, "key": key }));
            } else {
                CliFormatter::success(&format!("Deleted {}", key));
            }
        }
        OptionsAction::Clear => {
            store.delete_all()?;
            if json {
                println!("{}", serde_json::json!({ "success": true }));
            } else {
                CliFormatter::success(&format!("Deleted {}", store.option_name()));
            }
        }
    }
    Ok(())
}

fn cmd_errors(registration: &mut Registration, action: ErrorsAction, json: bool) -> anyhow::Result<()> {
    match action {
        ErrorsAction::Set { messages } => {
            registration.set_errors(messages)?;
        }
        ErrorsAction::List => {}
    }

    let errors = registration.get_errors()?;
    let notice = registration.notice()?;
    if json {
        println!("{}", serde_json::json!({ "errors": errors, "notice": notice }));
    } else if errors.is_empty() {
        CliFormatter::info("No registration errors");
    } else {
        for error in &errors {
            CliFormatter::item(error);
        }
    }
    Ok(())
}

/// Print the outcome of a disabled registration call
fn report_disallowed<T>(result: Result<T, RegistrationError>, json: bool) -> ExitCode {
    let Err(e) = result else {
        return ExitCode::SUCCESS;
    };

    if json {
        println!("{}", serde_json::json!({
            "success": false,
            "code": e.code(),
            "message": e.to_string(),
        }));
    } else {
        CliFormatter::error(&format!("{} (code {})", e, e.code()));
    }
    ExitCode::FAILURE
}
