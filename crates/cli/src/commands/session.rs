use heliodesk_api::{Session, SessionStore};
use heliodesk_core::config::{AppConfig, LoadOptions};

use super::CommandResult;

fn store(command: &str) -> Result<SessionStore, Box<CommandResult>> {
    let config = AppConfig::load(LoadOptions::default()).map_err(|error| {
        Box::new(CommandResult::failure(command, "config", error.to_string(), 2))
    })?;
    Ok(SessionStore::new(config.session.path))
}

pub fn login(token: &str) -> CommandResult {
    let session = Session::with_token(token);
    if !session.is_authenticated() {
        return CommandResult::failure("session login", "validation", "a token is required", 1);
    }

    let store = match store("session login") {
        Ok(store) => store,
        Err(result) => return *result,
    };

    match store.save(&session) {
        Ok(()) => CommandResult::success(
            "session login",
            format!("session stored at `{}`", store.path().display()),
        ),
        Err(error) => CommandResult::failure("session login", "session", error.to_string(), 1),
    }
}

pub fn logout() -> CommandResult {
    let store = match store("session logout") {
        Ok(store) => store,
        Err(result) => return *result,
    };

    match store.clear() {
        Ok(()) => CommandResult::success("session logout", "session cleared"),
        Err(error) => CommandResult::failure("session logout", "session", error.to_string(), 1),
    }
}

pub fn status() -> CommandResult {
    let store = match store("session status") {
        Ok(store) => store,
        Err(result) => return *result,
    };

    match store.load() {
        Ok(session) if session.is_authenticated() => {
            CommandResult::success("session status", "a session token is stored")
        }
        Ok(_) => CommandResult::success(
            "session status",
            "no session token stored; assignment calls send an empty bearer",
        ),
        Err(error) => CommandResult::failure("session status", "session", error.to_string(), 1),
    }
}
