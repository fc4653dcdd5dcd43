//! `jobboard` command-line front-end.
//!
//! # Responsibility
//! - Resolve configuration (file, then environment, then flags).
//! - Drive the listing service and print the same notices as the entry form.

mod args;

use args::{Cli, Command, SubmitArgs};
use clap::Parser;
use jobboard_core::logging::init_logging_from;
use jobboard_core::service::listing_service::{NO_DATA_NOTICE, UPLOAD_OK_NOTICE};
use jobboard_core::{
    open_repository, JobBoardConfig, ListingForm, ListingRepository, ListingService,
    ListingServiceError,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

type Service = ListingService<Box<dyn ListingRepository>>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Command::Ping = cli.command {
        println!("jobboard_core ping={}", jobboard_core::ping());
        println!("jobboard_core version={}", jobboard_core::core_version());
        return Ok(());
    }

    let config = resolve_config(&cli)?;
    init_logging_from(&config.logging)?;
    let backend = config.backend().map_err(|err| err.to_string())?;
    let repo = open_repository(&backend).map_err(|err| err.to_string())?;
    let service = ListingService::new(repo);

    match cli.command {
        Command::Submit(args) => submit(&service, args),
        Command::List => list(&service),
        Command::Export { out } => {
            export(&service, out.unwrap_or_else(|| PathBuf::from(&config.export.file_name)))
        }
        Command::Ping => Ok(()),
    }
}

fn resolve_config(cli: &Cli) -> Result<JobBoardConfig, String> {
    let mut config = JobBoardConfig::load(cli.config.as_deref()).map_err(|err| err.to_string())?;
    config.apply_env_overrides();

    if let Some(url) = &cli.store_url {
        config.store.url = Some(url.clone());
    }
    if let Some(db) = &cli.db {
        // An explicit local database wins over any configured remote URL.
        config.store.url = None;
        config.local.db_path = Some(db.clone());
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.store.timeout_secs = timeout_secs;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.dir = Some(dir.clone());
    }
    Ok(config)
}

fn submit(service: &Service, args: SubmitArgs) -> Result<(), String> {
    let form = ListingForm {
        company_name: args.company_name,
        phone_number: args.phone_number,
        location: args.location,
        role: args.role,
        cyber_security: args.cyber_security,
        python_backend: args.python_backend,
        net_backend: args.net_backend,
        ai_developer: args.ai_developer,
    };
    service.submit(form).map_err(|err| err.notice())?;
    println!("{UPLOAD_OK_NOTICE}");
    Ok(())
}

fn list(service: &Service) -> Result<(), String> {
    let table = service.load_table().map_err(|err| err.to_string())?;
    if table.is_empty() {
        println!("{NO_DATA_NOTICE}");
    } else {
        print!("{}", table.render_text());
    }
    Ok(())
}

fn export(service: &Service, out: PathBuf) -> Result<(), String> {
    let rows = match service.export_to(&out) {
        Ok(rows) => rows,
        Err(ListingServiceError::NoData) => {
            println!("{NO_DATA_NOTICE}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    info!(
        "event=listing_export module=cli status=ok rows={} path={}",
        rows,
        out.display()
    );
    println!("Exported {rows} listing(s) to {}", out.display());
    Ok(())
}
