use heliodesk_api::{ApiClient, ApiError};
use heliodesk_core::config::AppConfig;
use heliodesk_core::domain::employee::EmployeeDraft;
use heliodesk_core::domain::lead::{EnquiryDraft, LeadStatus};
use heliodesk_core::domain::role::{Role, RoleId};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let mut config = AppConfig::default();
    config.backend.base_url = server.uri();
    ApiClient::new(&config).expect("client")
}

#[tokio::test]
async fn list_roles_unwraps_envelope_and_normalizes_mixed_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": ["Sales Person", {"role_name": "Field Executive", "id": 7}],
        })))
        .mount(&server)
        .await;

    let roles = client_for(&server).list_roles().await.expect("roles");

    assert_eq!(
        roles,
        vec![
            Role { id: RoleId::Synthetic(1), name: "Sales Person".to_owned() },
            Role { id: RoleId::Assigned(7), name: "Field Executive".to_owned() },
        ]
    );
}

#[tokio::test]
async fn list_employees_accepts_a_bare_array_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/employees/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 17, "name": "Asha Verma", "role": "Senior Sales Executive"},
        ])))
        .mount(&server)
        .await;

    let employees = client_for(&server).list_employees().await.expect("employees");

    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].id, 17);
    assert_eq!(employees[0].first_name, "Asha");
    assert_eq!(employees[0].primary_role, "Senior Sales Executive");
}

#[tokio::test]
async fn assign_lead_sends_bearer_header_and_id_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/assignleads"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({"leadId": 42, "employeeId": 17})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).assign_lead(42, 17, "tok-123").await.expect("assign");
}

#[tokio::test]
async fn assign_lead_sends_an_empty_bearer_when_signed_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/assignleads"))
        .and(header("authorization", "Bearer "))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).assign_lead(42, 17, "").await.expect("assign");
}

#[tokio::test]
async fn assign_lead_surfaces_the_server_rejection_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/assignleads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "lead already assigned",
        })))
        .mount(&server)
        .await;

    let error = client_for(&server).assign_lead(42, 17, "tok").await.expect_err("rejection");
    assert!(matches!(error, ApiError::Rejected(ref message) if message == "lead already assigned"));
}

#[tokio::test]
async fn delete_role_stops_at_the_first_shape_the_backend_accepts() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/roles/Surveyor"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "no such route"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/roles"))
        .and(body_json(json!({"role_name": "Surveyor"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let role = Role { id: RoleId::Assigned(3), name: "Surveyor".to_owned() };
    client_for(&server).delete_role(&role).await.expect("delete");
}

#[tokio::test]
async fn delete_role_falls_all_the_way_back_to_the_id_route() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/roles/Surveyor"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/roles"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/roles/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let role = Role { id: RoleId::Assigned(3), name: "Surveyor".to_owned() };
    client_for(&server).delete_role(&role).await.expect("delete");
}

#[tokio::test]
async fn create_role_posts_the_role_name_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/roles"))
        .and(body_json(json!({"role_name": "Installer"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).create_role("Installer").await.expect("create");
}

#[tokio::test]
async fn list_leads_parses_status_and_assignee() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/leads/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 42, "status": "new", "name": "Rooftop enquiry"},
                {"id": 43, "status": "Assigned", "assignedTo": 17},
            ],
        })))
        .mount(&server)
        .await;

    let leads = client_for(&server).list_leads().await.expect("leads");

    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0].status, LeadStatus::New);
    assert_eq!(leads[1].status, LeadStatus::Assigned);
    assert_eq!(leads[1].assigned_to, Some(17));
}

#[tokio::test]
async fn employee_mutations_hit_the_id_scoped_routes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/employees"))
        .and(body_json(json!({"first_name": "Asha", "last_name": "Verma", "role": "Installer"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/employees/17"))
        .and(body_json(json!({"first_name": "Asha", "last_name": "Verma", "role": "Surveyor"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/employees/17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let draft = EmployeeDraft {
        first_name: "Asha".to_owned(),
        last_name: "Verma".to_owned(),
        role: Some("Installer".to_owned()),
        ..EmployeeDraft::default()
    };
    client.create_employee(&draft).await.expect("create");

    let updated = EmployeeDraft { role: Some("Surveyor".to_owned()), ..draft };
    client.update_employee(17, &updated).await.expect("update");
    client.delete_employee(17).await.expect("delete");
}

#[tokio::test]
async fn enquiry_form_leads_post_without_a_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/leads"))
        .and(body_json(json!({"name": "Rooftop enquiry", "mobile": "555-0101"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let draft = EnquiryDraft {
        name: "Rooftop enquiry".to_owned(),
        mobile: Some("555-0101".to_owned()),
        ..EnquiryDraft::default()
    };
    client_for(&server).create_lead(&draft).await.expect("create lead");
}

#[tokio::test]
async fn non_success_status_becomes_a_typed_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/leads/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;

    let error = client_for(&server).list_leads().await.expect_err("status error");
    assert!(matches!(error, ApiError::Status { status: 500, ref message } if message == "boom"));
}

#[tokio::test]
async fn non_json_bodies_become_a_malformed_body_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let error = client_for(&server).list_contacts().await.expect_err("malformed body");
    assert!(matches!(error, ApiError::MalformedBody(_)));
}
