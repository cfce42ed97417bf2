use chrono::NaiveDate;
use heliodesk_core::domain::employee::EmployeeDraft;
use heliodesk_core::matching::{employee_matches, RoleTarget};
use heliodesk_portal::EmployeeDirectory;

use super::{client_setup, render_json, runtime, CommandResult};

/// Shared flag set for employee create/update.
#[derive(Debug, clap::Args)]
pub struct EmployeeFields {
    #[arg(long, help = "First name")]
    first_name: Option<String>,
    #[arg(long, help = "Last name")]
    last_name: Option<String>,
    #[arg(long, help = "Email address")]
    email: Option<String>,
    #[arg(long, help = "Mobile number")]
    mobile: Option<String>,
    #[arg(long, help = "Postal address")]
    address: Option<String>,
    #[arg(long, help = "Joining date (YYYY-MM-DD)")]
    joining_date: Option<String>,
    #[arg(long, help = "Primary role name")]
    role: Option<String>,
}

impl EmployeeFields {
    fn into_draft(self) -> Result<EmployeeDraft, String> {
        let joining_date = self
            .joining_date
            .map(|raw| {
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|_| format!("invalid joining date `{raw}` (expected YYYY-MM-DD)"))
            })
            .transpose()?;

        Ok(EmployeeDraft {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email,
            mobile: self.mobile,
            address: self.address,
            joining_date,
            role: self.role,
        })
    }
}

pub fn list(role: Option<&str>, json_output: bool) -> CommandResult {
    let (_config, client) = match client_setup("employees list") {
        Ok(setup) => setup,
        Err(result) => return *result,
    };
    let runtime = match runtime("employees list") {
        Ok(runtime) => runtime,
        Err(result) => return *result,
    };

    let employees = runtime.block_on(async {
        let mut directory = EmployeeDirectory::default();
        directory.refresh(&client).await;
        directory.employees().to_vec()
    });

    let target = role.map(RoleTarget::parse);
    let bucketed: Vec<_> = employees
        .iter()
        .filter(|employee| {
            target.as_ref().map(|target| employee_matches(employee, target)).unwrap_or(true)
        })
        .collect();

    render_listing(bucketed, &target, json_output)
}

pub fn create(fields: EmployeeFields) -> CommandResult {
    let draft = match fields.into_draft() {
        Ok(draft) => draft,
        Err(message) => {
            return CommandResult::failure("employees create", "validation", message, 1)
        }
    };
    if draft.first_name.trim().is_empty() {
        return CommandResult::failure(
            "employees create",
            "validation",
            "a first name is required",
            1,
        );
    }

    let (_config, client) = match client_setup("employees create") {
        Ok(setup) => setup,
        Err(result) => return *result,
    };
    let runtime = match runtime("employees create") {
        Ok(runtime) => runtime,
        Err(result) => return *result,
    };

    match runtime.block_on(client.create_employee(&draft)) {
        Ok(()) => CommandResult::success(
            "employees create",
            format!("employee `{}` created", draft.first_name.trim()),
        ),
        Err(error) => {
            CommandResult::failure("employees create", "backend", error.user_message(), 1)
        }
    }
}

pub fn update(id: i64, fields: EmployeeFields) -> CommandResult {
    let draft = match fields.into_draft() {
        Ok(draft) => draft,
        Err(message) => {
            return CommandResult::failure("employees update", "validation", message, 1)
        }
    };

    let (_config, client) = match client_setup("employees update") {
        Ok(setup) => setup,
        Err(result) => return *result,
    };
    let runtime = match runtime("employees update") {
        Ok(runtime) => runtime,
        Err(result) => return *result,
    };

    match runtime.block_on(client.update_employee(id, &draft)) {
        Ok(()) => CommandResult::success("employees update", format!("employee {id} updated")),
        Err(error) => {
            CommandResult::failure("employees update", "backend", error.user_message(), 1)
        }
    }
}

pub fn delete(id: i64) -> CommandResult {
    let (_config, client) = match client_setup("employees delete") {
        Ok(setup) => setup,
        Err(result) => return *result,
    };
    let runtime = match runtime("employees delete") {
        Ok(runtime) => runtime,
        Err(result) => return *result,
    };

    match runtime.block_on(client.delete_employee(id)) {
        Ok(()) => CommandResult::success("employees delete", format!("employee {id} deleted")),
        Err(error) => {
            CommandResult::failure("employees delete", "backend", error.user_message(), 1)
        }
    }
}

fn render_listing(
    bucketed: Vec<&heliodesk_core::Employee>,
    target: &Option<RoleTarget>,
    json_output: bool,
) -> CommandResult {
    if json_output {
        return CommandResult::listing(render_json(&bucketed));
    }

    let heading = match &target {
        Some(target) => format!("{} employee(s) in the `{}` bucket:", bucketed.len(), target.name()),
        None => format!("{} employee(s):", bucketed.len()),
    };
    let mut lines = vec![heading];
    for employee in bucketed {
        let extra_roles = if employee.roles.len() > 1 {
            format!(" [{}]", employee.roles.join(", "))
        } else {
            String::new()
        };
        lines.push(format!(
            "- #{} {}: {}{}",
            employee.id,
            employee.full_name(),
            employee.primary_role,
            extra_roles
        ));
    }
    CommandResult::listing(lines.join("\n"))
}
