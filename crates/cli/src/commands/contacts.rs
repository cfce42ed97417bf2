use super::{client_setup, render_json, runtime, CommandResult};

pub fn list(json_output: bool) -> CommandResult {
    let (_config, client) = match client_setup("contacts list") {
        Ok(setup) => setup,
        Err(result) => return *result,
    };
    let runtime = match runtime("contacts list") {
        Ok(runtime) => runtime,
        Err(result) => return *result,
    };

    let contacts = match runtime.block_on(client.list_contacts()) {
        Ok(contacts) => contacts,
        Err(error) => {
            return CommandResult::failure("contacts list", "backend", error.user_message(), 1)
        }
    };

    if json_output {
        return CommandResult::listing(render_json(&contacts));
    }

    let mut lines = vec![format!("{} partnership request(s):", contacts.len())];
    for contact in &contacts {
        let company =
            contact.company.as_deref().map(|company| format!(" ({company})")).unwrap_or_default();
        lines.push(format!("- #{} {}{company}", contact.id, contact.name));
    }
    CommandResult::listing(lines.join("\n"))
}
