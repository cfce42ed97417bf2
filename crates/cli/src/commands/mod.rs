pub mod assign;
pub mod config;
pub mod contacts;
pub mod doctor;
pub mod employees;
pub mod leads;
pub mod roles;
pub mod session;

use heliodesk_api::ApiClient;
use heliodesk_core::config::{AppConfig, LoadOptions};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn listing(output: String) -> Self {
        Self { exit_code: 0, output }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Load config and build the backend client, mapping failures into a command
/// result for `command`.
pub(crate) fn client_setup(command: &str) -> Result<(AppConfig, ApiClient), Box<CommandResult>> {
    let config = AppConfig::load(LoadOptions::default()).map_err(|error| {
        Box::new(CommandResult::failure(command, "config", error.to_string(), 2))
    })?;
    let client = ApiClient::new(&config).map_err(|error| {
        Box::new(CommandResult::failure(command, "client", error.to_string(), 2))
    })?;
    Ok((config, client))
}

/// Single-threaded runtime for the command's network calls, in the style of
/// the per-command runtimes the binary uses elsewhere.
pub(crate) fn runtime(command: &str) -> Result<tokio::runtime::Runtime, Box<CommandResult>> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        Box::new(CommandResult::failure(
            command,
            "runtime",
            format!("failed to initialize async runtime: {error}"),
            2,
        ))
    })
}

pub(crate) fn render_json<T: Serialize>(records: &T) -> String {
    serde_json::to_string_pretty(records)
        .unwrap_or_else(|error| format!("serialization failed: {error}"))
}
