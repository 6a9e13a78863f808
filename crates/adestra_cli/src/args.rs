//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "adestra", version)]
#[command(about = "Client, dog, lesson and payment records for a dog-training business")]
pub struct Cli {
    /// Directory holding the database and logs
    #[arg(long, env = "ADESTRA_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log directory (defaults to <data-dir>/logs)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the core version and exit
    Ping,
    /// Manage clients
    #[command(subcommand)]
    Client(ClientCommand),
    /// Manage dogs
    #[command(subcommand)]
    Dog(DogCommand),
    /// Manage lessons
    #[command(subcommand)]
    Lesson(LessonCommand),
    /// Manage payments
    #[command(subcommand)]
    Payment(PaymentCommand),
    /// Write every record to a JSON backup file
    Export {
        /// Output path (defaults to a timestamped file in the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace every record with the contents of a JSON backup file
    Import {
        file: PathBuf,

        /// Confirm that all current records will be replaced
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// Register a client
    Add(ClientFields),
    /// Change fields of an existing client
    Edit {
        id: String,
        #[command(flatten)]
        fields: ClientEdit,
    },
    /// List clients by name
    List,
    /// Show a client with their dogs, lessons and payments
    Show { id: String },
    /// Remove a client (their dogs, lessons and payments are kept)
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct ClientFields {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Debug, Args)]
pub struct ClientEdit {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum DogCommand {
    /// Register a dog for a client
    Add(DogFields),
    /// Change fields of an existing dog
    Edit {
        id: String,
        #[command(flatten)]
        fields: DogEdit,
    },
    /// List dogs by name
    List {
        /// Only dogs owned by this client id
        #[arg(long)]
        client: Option<String>,
    },
    /// Remove a dog (its lessons are kept)
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct DogFields {
    /// Owner client id
    #[arg(long)]
    pub client: String,
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub breed: String,
    /// Age in years; fractions allowed
    #[arg(long, default_value_t = 0.0, value_parser = parse_age)]
    pub age: f64,
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Debug, Args)]
pub struct DogEdit {
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub breed: Option<String>,
    #[arg(long, value_parser = parse_age)]
    pub age: Option<f64>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum LessonCommand {
    /// Record a lesson
    Add(LessonFields),
    /// Change fields of an existing lesson
    Edit {
        id: String,
        #[command(flatten)]
        fields: LessonEdit,
    },
    /// List lessons by date
    List {
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        dog: Option<String>,
    },
    /// Remove a lesson
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct LessonFields {
    #[arg(long)]
    pub client: String,
    #[arg(long)]
    pub dog: String,
    /// YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
    /// Duration in minutes
    #[arg(long, default_value_t = 60)]
    pub duration: u32,
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Debug, Args)]
pub struct LessonEdit {
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub dog: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub duration: Option<u32>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum PaymentCommand {
    /// Record a payment
    Add(PaymentFields),
    /// Change fields of an existing payment
    Edit {
        id: String,
        #[command(flatten)]
        fields: PaymentEdit,
    },
    /// List payments by date
    List {
        #[arg(long)]
        client: Option<String>,
        /// e.g. pago, pendente
        #[arg(long)]
        status: Option<String>,
    },
    /// Remove a payment
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct PaymentFields {
    #[arg(long)]
    pub client: String,
    #[arg(long)]
    pub amount: Decimal,
    #[arg(long, default_value = "Pix")]
    pub method: String,
    /// More than one marks the payment as paid in installments
    #[arg(long, default_value_t = 1)]
    pub installments: u32,
    /// YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long, default_value = "pago")]
    pub status: String,
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Debug, Args)]
pub struct PaymentEdit {
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub amount: Option<Decimal>,
    #[arg(long)]
    pub method: Option<String>,
    #[arg(long)]
    pub installments: Option<u32>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

/// Finite, non-negative number of years.
fn parse_age(value: &str) -> Result<f64, String> {
    let age: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if !age.is_finite() || age < 0.0 {
        return Err(format!("age must be a finite number of years, got `{value}`"));
    }
    Ok(age)
}
