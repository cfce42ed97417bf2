use heliodesk_core::domain::role::RoleId;
use heliodesk_portal::{EmployeeDirectory, RoleDirectory};

use super::{client_setup, render_json, runtime, CommandResult};

pub fn list(json_output: bool) -> CommandResult {
    let (_config, client) = match client_setup("roles list") {
        Ok(setup) => setup,
        Err(result) => return *result,
    };
    let runtime = match runtime("roles list") {
        Ok(runtime) => runtime,
        Err(result) => return *result,
    };

    let roles = runtime.block_on(async {
        let mut roles = RoleDirectory::default();
        let mut employees = EmployeeDirectory::default();
        roles.refresh(&client).await;
        employees.refresh(&client).await;
        roles.merge_employee_roles(&employees);
        roles.roles().to_vec()
    });

    if json_output {
        return CommandResult::listing(render_json(&roles));
    }

    let mut lines = vec![format!("{} role(s):", roles.len())];
    for role in &roles {
        let id = match role.id {
            RoleId::Assigned(id) => format!("id {id}"),
            RoleId::Synthetic(id) => format!("positional id {id}, not durable"),
        };
        lines.push(format!("- {} ({id})", role.name));
    }
    CommandResult::listing(lines.join("\n"))
}

pub fn create(name: &str) -> CommandResult {
    let name = name.trim();
    if name.is_empty() {
        return CommandResult::failure("roles create", "validation", "role name is required", 1);
    }

    let (_config, client) = match client_setup("roles create") {
        Ok(setup) => setup,
        Err(result) => return *result,
    };
    let runtime = match runtime("roles create") {
        Ok(runtime) => runtime,
        Err(result) => return *result,
    };

    match runtime.block_on(client.create_role(name)) {
        Ok(()) => CommandResult::success("roles create", format!("role `{name}` created")),
        Err(error) => CommandResult::failure("roles create", "backend", error.user_message(), 1),
    }
}

pub fn delete(name: &str) -> CommandResult {
    let name = name.trim();
    if name.is_empty() {
        return CommandResult::failure("roles delete", "validation", "role name is required", 1);
    }

    let (_config, client) = match client_setup("roles delete") {
        Ok(setup) => setup,
        Err(result) => return *result,
    };
    let runtime = match runtime("roles delete") {
        Ok(runtime) => runtime,
        Err(result) => return *result,
    };

    let result = runtime.block_on(async {
        let roles = client.list_roles().await.map_err(|error| (error, "backend"))?;
        let role = roles
            .into_iter()
            .find(|role| role.name == name)
            .ok_or_else(|| (not_found(name), "validation"))?;
        client.delete_role(&role).await.map_err(|error| (error, "backend"))
    });

    match result {
        Ok(()) => CommandResult::success("roles delete", format!("role `{name}` deleted")),
        Err((error, class)) => {
            CommandResult::failure("roles delete", class, error.user_message(), 1)
        }
    }
}

fn not_found(name: &str) -> heliodesk_api::ApiError {
    heliodesk_api::ApiError::Rejected(format!("role `{name}` is not in the directory"))
}
