use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use counseldesk::api::ApiClient;
use counseldesk::commands::{self, BookingForm, DirectoryFilters, SignInForm};
use counseldesk::config::AppConfig;
use counseldesk::error::AppError;
use counseldesk::render;
use counseldesk::shell::Shell;
use counseldesk::state::AppState;
use counseldesk::storage::Storage;

#[derive(Parser)]
#[command(name = "counseldesk", version)]
#[command(about = "Terminal client for a legal-services marketplace")]
struct Cli {
    /// State directory override (default: ~/.counseldesk).
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,
    /// With no subcommand, the interactive shell starts.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List lawyers, with optional filters.
    Lawyers {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Show one lawyer's profile.
    Lawyer { id: i64 },
    /// Book a consultation with a lawyer.
    Book {
        lawyer_id: i64,
        /// Candidate time, YYYY-MM-DDTHH:MM.
        #[arg(long)]
        date: String,
        #[arg(long)]
        problem: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List legal info hub articles.
    Hub {
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show one article.
    Read { id: i64 },
    /// Show the dashboard for the signed-in account.
    Dashboard,
    /// Update an appointment's status (lawyer accounts).
    Status {
        appointment_id: i64,
        /// One of: accepted, "on progress", done, rejected.
        status: String,
    },
    /// Analyze a document with Gemini and print the report.
    Review { path: PathBuf },
    /// Sign in and persist the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and drop the persisted session.
    Logout,
    /// Manage the stored Gemini API key.
    Key {
        #[command(subcommand)]
        command: KeyCommand,
    },
}

#[derive(Subcommand)]
enum KeyCommand {
    /// Store a key in the state directory.
    Set { value: String },
    /// Remove the stored key.
    Clear,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let storage = Arc::new(match cli.state_dir {
        Some(dir) => Storage::open(dir),
        None => Storage::open_default()?,
    });
    let config = AppConfig::load(storage.root())?;
    let api = ApiClient::new(&config, Arc::clone(&storage));
    let state = AppState::new(config, storage);

    let Some(command) = cli.command else {
        return Shell::new(state, api).run().await;
    };

    match command {
        Command::Lawyers {
            search,
            specialty,
            location,
        } => {
            let filters = DirectoryFilters {
                search: search.unwrap_or_default(),
                specialty,
                location,
            };
            commands::browse_lawyers(&state, &api, &filters).await?;
            print!("{}", render::directory_screen(&state, &filters));
        }
        Command::Lawyer { id } => {
            let lawyer = commands::view_lawyer(&state, &api, id).await?;
            print!("{}", render::profile_page(&lawyer, state.role()));
        }
        Command::Book {
            lawyer_id,
            date,
            problem,
            notes,
        } => {
            let form = BookingForm {
                appointment_date: date,
                problem_description: problem,
                notes,
            };
            commands::book_appointment(&state, &api, lawyer_id, &form).await?;
            println!("{}", render::BOOKING_CONFIRMATION);
        }
        Command::Hub { category, search } => {
            commands::open_hub(&state, &api, &category).await?;
            print!("{}", render::hub_screen(&state, &search));
        }
        Command::Read { id } => {
            let post = commands::open_post(&state, &api, id).await?;
            print!("{}", render::post_page(&post));
        }
        Command::Dashboard => {
            let view = commands::open_dashboard(&state, &api).await?;
            print!("{}", render::dashboard_screen(&state, &view));
        }
        Command::Status {
            appointment_id,
            status,
        } => {
            let changed =
                commands::change_appointment_status(&state, &api, appointment_id, &status).await?;
            if !changed {
                return Err(AppError::Validation(format!(
                    "Unknown status '{}'. One of: accepted, on progress, done, rejected.",
                    status
                )));
            }
            println!("Status updated.");
        }
        Command::Review { path } => {
            commands::load_document(&state, &path)?;
            let report = commands::analyze_document(&state).await?;
            print!("{}", render::report_sections(&report));
        }
        Command::Login { email, password } => {
            let form = SignInForm { email, password };
            let role = commands::sign_in(&state, &api, &form).await?;
            println!("Signed in ({}).", role.as_str());
        }
        Command::Logout => {
            commands::sign_out(&state)?;
            println!("Signed out.");
        }
        Command::Key { command } => match command {
            KeyCommand::Set { value } => {
                commands::set_gemini_key(&state, &value)?;
                println!("API key saved.");
            }
            KeyCommand::Clear => {
                commands::clear_gemini_key(&state)?;
                println!("API key removed.");
            }
        },
    }
    Ok(())
}
