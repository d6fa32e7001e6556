use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use livraria::cli::{
    handle_backup_command, handle_book_command, handle_export_command, handle_import_command,
    BackupCommands, BookCommands,
};
use livraria::config::{paths::DATA_DIR_ENV, LivrariaPaths, Settings};
use livraria::logging::{init_logging, logging_status};
use livraria::shell::Shell;
use livraria::storage::Storage;

#[derive(Parser)]
#[command(
    name = "livraria",
    version,
    about = "Bookstore catalog manager",
    long_about = "Livraria keeps a bookstore's catalog in a local SQLite database. \
                  Run it without a subcommand for the interactive menu, or use the \
                  subcommands below from scripts."
)]
struct Cli {
    /// Base directory for the database, backups, exports and logs
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu (default)
    Menu,

    #[command(flatten)]
    Book(BookCommands),

    /// Export the catalog to CSV
    Export {
        /// Output file (defaults to exports/livros_exportados.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import books from a CSV file
    Import {
        /// Path to CSV file
        file: PathBuf,
        /// Only check the file, do not write anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.base_dir {
        Some(dir) => LivrariaPaths::with_base_dir(dir),
        None => LivrariaPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    if !paths.settings_file().exists() {
        settings.save(&paths)?;
    }

    if let Err(e) = init_logging(&settings.log_level, &paths.log_dir()) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let storage = Storage::new(&paths)?;

    match cli.command {
        None | Some(Commands::Menu) => {
            let stdin = io::stdin();
            let mut shell = Shell::new(&storage, &paths, &settings, stdin.lock(), io::stdout());
            shell.run()?;
        }
        Some(Commands::Book(cmd)) => {
            handle_book_command(&storage, &paths, &settings, cmd)?;
        }
        Some(Commands::Export { output }) => {
            handle_export_command(&storage, &paths, output)?;
        }
        Some(Commands::Import { file, dry_run }) => {
            handle_import_command(&storage, &paths, &settings, &file, dry_run)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("Livraria Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Database file:    {}", paths.database_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Export file:      {}", paths.export_file().display());
            println!("Log directory:    {}", paths.log_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Backup retention: {}", settings.backup_retention);
            println!("  Auto backup:      {}", settings.auto_backup);
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Log level:        {}", settings.log_level);
            println!();
            match logging_status() {
                Some((level, dir)) => println!("Logging: {} -> {}", level, dir.display()),
                None => println!("Logging: disabled"),
            }
        }
    }

    Ok(())
}
