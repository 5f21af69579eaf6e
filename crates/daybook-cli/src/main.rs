use anyhow::Result;
use clap::{Parser, Subcommand};
use daybook_core::chat::ChatDate;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Daybook CLI - talk through your day and keep it as a diary", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config file and DAYBOOK_API_BASE_URL)
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the access token
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account, then log in with it
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        phone_number: String,
    },
    /// Forget the stored token and email
    Logout,
    /// Show the email of the current login
    Whoami,
    /// List the dates that have a chat
    Calendar,
    /// Open (or create) the chat for a date and print it
    Open {
        /// Defaults to today
        date: Option<ChatDate>,
        /// Print the messages of a sealed chat instead of its diary
        #[arg(long)]
        messages: bool,
    },
    /// Send a message in the chat for a date
    Send { date: ChatDate, content: String },
    /// Write the diary for a date, closing its chat
    Seal { date: ChatDate },
    /// Replace the title and body of a date's diary
    EditDiary {
        date: ChatDate,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let context = commands::Context::load(cli.api_base_url.as_deref())?;
    init_tracing(&context.config.log_level);

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&context, &email, &password).await?,
        Commands::Signup {
            name,
            email,
            password,
            phone_number,
        } => commands::auth::signup(&context, name, email, password, phone_number).await?,
        Commands::Logout => commands::auth::logout(&context).await?,
        Commands::Whoami => commands::auth::whoami(&context).await?,
        Commands::Calendar => commands::session::calendar(&context).await?,
        Commands::Open { date, messages } => {
            let date = date.unwrap_or_else(ChatDate::today);
            commands::session::open(&context, date, messages).await?
        }
        Commands::Send { date, content } => commands::session::send(&context, date, &content).await?,
        Commands::Seal { date } => commands::session::seal(&context, date).await?,
        Commands::EditDiary { date, title, body } => {
            commands::session::edit_diary(&context, date, &title, &body).await?
        }
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
