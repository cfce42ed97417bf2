pub mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use heliodesk_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "heliodesk",
    about = "Heliodesk back-office CLI",
    long_about = "Operate the solar back office: inspect leads, employees, roles and \
                  partnership contacts, and assign leads to employees.",
    after_help = "Examples:\n  heliodesk doctor --json\n  heliodesk leads list --status new\n  heliodesk assign --lead 42 --employee 17"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Validate config, session readiness, and backend connectivity")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
    #[command(subcommand, about = "Manage the role directory")]
    Roles(RolesCommand),
    #[command(subcommand, about = "Inspect the employee directory")]
    Employees(EmployeesCommand),
    #[command(subcommand, about = "Inspect and file leads")]
    Leads(LeadsCommand),
    #[command(subcommand, about = "Inspect partnership contact requests")]
    Contacts(ContactsCommand),
    #[command(subcommand, about = "Manage the persisted operator session")]
    Session(SessionCommand),
    #[command(about = "Assign a lead to an employee")]
    Assign {
        #[arg(long, help = "Lead id to assign")]
        lead: i64,
        #[arg(long, help = "Employee id to assign the lead to")]
        employee: i64,
    },
}

#[derive(Debug, Subcommand)]
enum RolesCommand {
    #[command(about = "List roles, merged with roles discovered on employee records")]
    List {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Create a role")]
    Create {
        #[arg(help = "Role name")]
        name: String,
    },
    #[command(about = "Delete a role, trying each backend delete shape in order")]
    Delete {
        #[arg(help = "Role name")]
        name: String,
    },
}

#[derive(Debug, Subcommand)]
enum EmployeesCommand {
    #[command(about = "List employees, optionally restricted to one role bucket")]
    List {
        #[arg(long, help = "Role bucket to filter by, e.g. \"Sales Person\"")]
        role: Option<String>,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Create an employee record")]
    Create {
        #[command(flatten)]
        fields: commands::employees::EmployeeFields,
    },
    #[command(about = "Update an employee record; only the provided fields change")]
    Update {
        #[arg(help = "Employee id")]
        id: i64,
        #[command(flatten)]
        fields: commands::employees::EmployeeFields,
    },
    #[command(about = "Delete an employee record")]
    Delete {
        #[arg(help = "Employee id")]
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum LeadsCommand {
    #[command(about = "List leads with client-side filtering and pagination")]
    List {
        #[arg(long, help = "Filter by status: new|assigned|scheduled|completed")]
        status: Option<String>,
        #[arg(long, help = "Filter by assigned employee id")]
        employee: Option<i64>,
        #[arg(long, default_value_t = 1, help = "Page number (1-based)")]
        page: usize,
        #[arg(long, default_value_t = 10, help = "Page size")]
        page_size: usize,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "File a new enquiry lead")]
    Create {
        #[arg(long, help = "Enquirer name")]
        name: String,
        #[arg(long, help = "Enquirer email")]
        email: Option<String>,
        #[arg(long, help = "Enquirer mobile number")]
        mobile: Option<String>,
        #[arg(long, help = "Site address")]
        address: Option<String>,
        #[arg(long, help = "Free-form enquiry message")]
        message: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum ContactsCommand {
    #[command(about = "List job and supplier partnership requests")]
    List {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
enum SessionCommand {
    #[command(about = "Store a bearer token for authenticated calls")]
    Login {
        #[arg(long, help = "Bearer token issued by the backend")]
        token: String,
    },
    #[command(about = "Clear the persisted session")]
    Logout,
    #[command(about = "Show whether a session token is stored")]
    Status,
}

fn init_logging(config: &AppConfig) {
    use heliodesk_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            let _ = tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .compact()
                .try_init();
        }
        Pretty => {
            let _ = tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .pretty()
                .try_init();
        }
        Json => {
            let _ = tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .json()
                .try_init();
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Roles(RolesCommand::List { json }) => commands::roles::list(json),
        Command::Roles(RolesCommand::Create { name }) => commands::roles::create(&name),
        Command::Roles(RolesCommand::Delete { name }) => commands::roles::delete(&name),
        Command::Employees(EmployeesCommand::List { role, json }) => {
            commands::employees::list(role.as_deref(), json)
        }
        Command::Employees(EmployeesCommand::Create { fields }) => {
            commands::employees::create(fields)
        }
        Command::Employees(EmployeesCommand::Update { id, fields }) => {
            commands::employees::update(id, fields)
        }
        Command::Employees(EmployeesCommand::Delete { id }) => commands::employees::delete(id),
        Command::Leads(LeadsCommand::List { status, employee, page, page_size, json }) => {
            commands::leads::list(status.as_deref(), employee, page, page_size, json)
        }
        Command::Leads(LeadsCommand::Create { name, email, mobile, address, message }) => {
            commands::leads::create(name, email, mobile, address, message)
        }
        Command::Contacts(ContactsCommand::List { json }) => commands::contacts::list(json),
        Command::Session(SessionCommand::Login { token }) => commands::session::login(&token),
        Command::Session(SessionCommand::Logout) => commands::session::logout(),
        Command::Session(SessionCommand::Status) => commands::session::status(),
        Command::Assign { lead, employee } => commands::assign::run(lead, employee),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
