use heliodesk_api::SessionStore;
use heliodesk_portal::{AssignError, AssignmentWorkflow, LeadBoard};

use super::{client_setup, runtime, CommandResult};

pub fn run(lead_id: i64, employee_id: i64) -> CommandResult {
    let (config, client) = match client_setup("assign") {
        Ok(setup) => setup,
        Err(result) => return *result,
    };
    let runtime = match runtime("assign") {
        Ok(runtime) => runtime,
        Err(result) => return *result,
    };

    let session = match SessionStore::new(&config.session.path).load() {
        Ok(session) => session,
        Err(error) => return CommandResult::failure("assign", "session", error.to_string(), 1),
    };

    let result = runtime.block_on(async {
        let employees =
            client.list_employees().await.map_err(|error| (error.user_message(), "backend"))?;
        if !employees.iter().any(|employee| employee.id == employee_id) {
            return Err((
                format!("employee {employee_id} is not in the directory"),
                "validation",
            ));
        }

        let leads =
            client.list_leads().await.map_err(|error| (error.user_message(), "backend"))?;
        let mut board = LeadBoard::with_leads(leads);
        board.select(lead_id);

        let workflow = AssignmentWorkflow::new(&session);
        workflow.assign(&mut board, &client, lead_id, Some(employee_id)).await.map_err(|error| {
            let class = match &error {
                AssignError::Backend(_) => "backend",
                _ => "validation",
            };
            (error.user_message(), class)
        })
    });

    match result {
        Ok(()) => CommandResult::success(
            "assign",
            format!("lead {lead_id} assigned to employee {employee_id}"),
        ),
        Err((message, class)) => CommandResult::failure("assign", class, message, 1),
    }
}
