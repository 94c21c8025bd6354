use clap::{Parser, Subcommand};
use learnhub::console::commands;
use uuid::Uuid;

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Inspect the runtime configuration
    Env {
        #[command(subcommand)]
        command: EnvCommands,
    },
    /// Prepare the certificate storage directory
    Storage {
        #[command(subcommand)]
        command: StorageCommands,
    },
    Certificate {
        #[command(subcommand)]
        command: CertificateCommands,
    },
    /// Exercise a running server
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
}

#[derive(Debug, Subcommand)]
enum EnvCommands {
    /// Fails when a required setting is missing
    Check,
}

#[derive(Debug, Subcommand)]
enum StorageCommands {
    Fix {
        /// Defaults to `certificates.storage_dir` from the configuration
        #[arg(long)]
        dir: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum CertificateCommands {
    /// Re-render certificate PDFs from database records
    Regenerate {
        #[arg(long)]
        id: Option<Uuid>,
        #[arg(long)]
        missing_only: bool,
    },
}

#[derive(Debug, Subcommand)]
enum DebugCommands {
    Ping {
        #[arg(long, env = "LEARNHUB_URL", default_value = "http://127.0.0.1:8000")]
        url: String,
    },
    Login {
        #[arg(long, env = "LEARNHUB_URL", default_value = "http://127.0.0.1:8000")]
        url: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Contact {
        #[arg(long, env = "LEARNHUB_URL", default_value = "http://127.0.0.1:8000")]
        url: String,
        #[arg(long, default_value = "Console")]
        name: String,
        #[arg(long, default_value = "console@example.com")]
        email: String,
        #[arg(long, default_value = "Connectivity check")]
        subject: String,
        #[arg(long, default_value = "Sent from the console debug command")]
        message: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    get_command(cli).call()
}

fn get_command(cli: Cli) -> Box<dyn commands::CallableTrait> {
    match cli.command {
        Commands::Env { command } => match command {
            EnvCommands::Check => Box::new(commands::env::CheckCommand::new()),
        },
        Commands::Storage { command } => match command {
            StorageCommands::Fix { dir } => Box::new(commands::storage::FixCommand::new(dir)),
        },
        Commands::Certificate { command } => match command {
            CertificateCommands::Regenerate { id, missing_only } => Box::new(
                commands::certificate::RegenerateCommand::new(id, missing_only),
            ),
        },
        Commands::Debug { command } => match command {
            DebugCommands::Ping { url } => Box::new(commands::debug::PingCommand::new(url)),
            DebugCommands::Login {
                url,
                email,
                password,
            } => Box::new(commands::debug::LoginCommand::new(url, email, password)),
            DebugCommands::Contact {
                url,
                name,
                email,
                subject,
                message,
            } => Box::new(commands::debug::ContactCommand::new(
                url, name, email, subject, message,
            )),
        },
    }
}
