use heliodesk_core::domain::lead::{EnquiryDraft, LeadStatus};
use heliodesk_portal::{page_count, paginate, LeadFilter, Page};

use super::{client_setup, render_json, runtime, CommandResult};

pub fn list(
    status: Option<&str>,
    employee: Option<i64>,
    page: usize,
    page_size: usize,
    json_output: bool,
) -> CommandResult {
    let status = match status.map(parse_status_arg).transpose() {
        Ok(status) => status,
        Err(message) => return CommandResult::failure("leads list", "validation", message, 1),
    };
    if page == 0 {
        return CommandResult::failure("leads list", "validation", "page numbers start at 1", 1);
    }

    let (_config, client) = match client_setup("leads list") {
        Ok(setup) => setup,
        Err(result) => return *result,
    };
    let runtime = match runtime("leads list") {
        Ok(runtime) => runtime,
        Err(result) => return *result,
    };

    let leads = match runtime.block_on(client.list_leads()) {
        Ok(leads) => leads,
        Err(error) => {
            return CommandResult::failure("leads list", "backend", error.user_message(), 1)
        }
    };

    let filter = LeadFilter { status, assigned_to: employee };
    let matched: Vec<_> = filter.apply(&leads).into_iter().cloned().collect();
    let pages = page_count(matched.len(), page_size);
    let current = paginate(&matched, Page { number: page, size: page_size });

    if json_output {
        return CommandResult::listing(render_json(&current));
    }

    let mut lines =
        vec![format!("page {page}/{pages} ({} lead(s) match the filter):", matched.len())];
    for lead in current {
        let assignee = lead
            .assigned_to
            .map(|id| format!(", assigned to #{id}"))
            .unwrap_or_default();
        let name = lead.name.as_deref().unwrap_or("(unnamed)");
        lines.push(format!("- #{} {name}: {:?}{assignee}", lead.id, lead.status));
    }
    CommandResult::listing(lines.join("\n"))
}

pub fn create(
    name: String,
    email: Option<String>,
    mobile: Option<String>,
    address: Option<String>,
    message: Option<String>,
) -> CommandResult {
    if name.trim().is_empty() {
        return CommandResult::failure("leads create", "validation", "a name is required", 1);
    }

    let (_config, client) = match client_setup("leads create") {
        Ok(setup) => setup,
        Err(result) => return *result,
    };
    let runtime = match runtime("leads create") {
        Ok(runtime) => runtime,
        Err(result) => return *result,
    };

    let draft =
        EnquiryDraft { name: name.trim().to_owned(), email, mobile, address, message };
    match runtime.block_on(client.create_lead(&draft)) {
        Ok(()) => CommandResult::success("leads create", format!("enquiry filed for `{}`", draft.name)),
        Err(error) => CommandResult::failure("leads create", "backend", error.user_message(), 1),
    }
}

fn parse_status_arg(raw: &str) -> Result<LeadStatus, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "new" => Ok(LeadStatus::New),
        "assigned" => Ok(LeadStatus::Assigned),
        "scheduled" => Ok(LeadStatus::Scheduled),
        "completed" => Ok(LeadStatus::Completed),
        other => Err(format!(
            "unknown status `{other}` (expected new|assigned|scheduled|completed)"
        )),
    }
}
