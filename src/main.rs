//! APP LEGAL CLI - companion for the legal case-management backend

use clap::{CommandFactory, Parser};
use colored::Colorize;

mod cli;
mod client;
mod config;
mod deadlines;
mod error;
mod models;
mod output;
mod realtime;
mod session;

use cli::args::GlobalOptions;
use cli::context::open_session;
use cli::{
    CasesCommands, Cli, Commands, ConfigCommands, DeadlinesCommands, DeviceCommands,
    DocsCommands, NotesCommands, SummaryCommands,
};
use error::{Error, Result};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);
    if let Err(err) = run(cli, &opts).await {
        report(err, &opts).await;
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("applegal", log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

/// Print the error. A rejected or missing session also drops the stored
/// token and points the user at `applegal login`.
async fn report(err: Error, opts: &GlobalOptions) {
    if err.is_unauthorized() {
        match open_session(opts) {
            Ok(session) => session.clear().await,
            Err(e) => log::warn!("Could not open session to clear it: {}", e),
        }
        eprintln!(
            "{} Session expired or missing. Run '{}' to sign in again.",
            "✗".red(),
            "applegal login -e <EMAIL>".cyan()
        );
    }
    eprintln!("Error: {}", err);
}

async fn run(cli: Cli, opts: &GlobalOptions) -> Result<()> {
    match cli.command {
        Commands::Login { email, password } => cli::auth::login(opts, &email, password).await,
        Commands::Register {
            client_id,
            email,
            phone,
            password,
        } => cli::auth::register(opts, client_id, &email, &phone, password).await,
        Commands::Logout => cli::auth::logout(opts).await,
        Commands::Status => cli::status::run(opts).await,
        Commands::Version => {
            println!("applegal version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Docs(cmd) => match cmd {
            DocsCommands::List => cli::docs::list(opts).await,
            DocsCommands::Url { doc_id } => cli::docs::url(opts, &doc_id),
            DocsCommands::Download { doc_id, output } => {
                cli::docs::download(opts, &doc_id, output.as_deref()).await
            }
            DocsCommands::Upload { file, case_id } => {
                cli::docs::upload(opts, &file, case_id).await
            }
        },
        Commands::Cases(cmd) => match cmd {
            CasesCommands::List {
                filters,
                pagination,
            } => cli::cases::list(opts, &filters, &pagination).await,
        },
        Commands::Deadlines(cmd) => match cmd {
            DeadlinesCommands::List {
                case_id,
                search,
                filter,
            } => cli::deadlines::list(opts, case_id, search.as_deref(), filter).await,
            DeadlinesCommands::Complete { deadline_id } => {
                cli::deadlines::complete(opts, deadline_id).await
            }
            DeadlinesCommands::Delete { deadline_id, yes } => {
                cli::deadlines::delete(opts, deadline_id, yes).await
            }
        },
        Commands::Notes(cmd) => match cmd {
            NotesCommands::List {
                filters,
                pagination,
            } => cli::notes::list(opts, &filters, &pagination).await,
            NotesCommands::Watch {
                filters,
                pagination,
                client_id,
            } => cli::notes::watch(opts, &filters, &pagination, client_id).await,
        },
        Commands::Device(cmd) => match cmd {
            DeviceCommands::Register {
                push_token,
                platform,
            } => cli::device::register(opts, &push_token, platform).await,
        },
        Commands::Summary(cmd) => match cmd {
            SummaryCommands::Create { image } => cli::summary::create(opts, &image).await,
            SummaryCommands::List => cli::summary::list(opts).await,
        },
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => cli::config::show(opts),
            ConfigCommands::SetClient { client_id } => cli::config::set_client(opts, client_id),
            ConfigCommands::Set { key, value } => cli::config::set(opts, &key, &value),
        },
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "applegal", &mut std::io::stdout());
            Ok(())
        }
    }
}
