use std::time::Duration;

use heliodesk_core::config::AppConfig;
use heliodesk_core::domain::contact::Contact;
use heliodesk_core::domain::employee::{Employee, EmployeeDraft};
use heliodesk_core::domain::lead::{EnquiryDraft, Lead};
use heliodesk_core::domain::role::Role;
use heliodesk_core::envelope;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::ApiError;

/// Typed client for the back-office REST backend.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.backend.timeout_secs))
            .build()?;

        Ok(Self { http, base_url: config.backend.base_url.trim_end_matches('/').to_owned() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        let items = self.get_collection("/api/roles").await?;
        Ok(items.iter().enumerate().filter_map(|(index, raw)| Role::from_raw(index, raw)).collect())
    }

    pub async fn create_role(&self, role_name: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/roles"))
            .json(&json!({ "role_name": role_name }))
            .send()
            .await?;
        let (status, body) = read_body(response).await?;
        check_mutation(status, &body)
    }

    /// Delete a role. The backend has shipped three delete shapes over time;
    /// they are tried in order and the first confirmed success wins.
    pub async fn delete_role(&self, role: &Role) -> Result<(), ApiError> {
        let by_name = self
            .request_mutation(self.http.delete(self.url(&format!("/api/roles/{}", role.name))))
            .await;
        let Err(by_name_error) = by_name else {
            return Ok(());
        };

        warn!(
            role = %role.name,
            error = %by_name_error,
            "role delete by name failed; retrying with body payload"
        );
        let by_body = self
            .request_mutation(
                self.http.delete(self.url("/api/roles")).json(&json!({ "role_name": role.name })),
            )
            .await;
        let Err(by_body_error) = by_body else {
            return Ok(());
        };

        warn!(
            role = %role.name,
            error = %by_body_error,
            "role delete with body payload failed; retrying by id"
        );
        self.request_mutation(
            self.http.delete(self.url(&format!("/api/roles/{}", role.id.value()))),
        )
        .await
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let items = self.get_collection("/api/employees/").await?;
        Ok(items.iter().filter_map(Employee::from_raw).collect())
    }

    pub async fn create_employee(&self, draft: &EmployeeDraft) -> Result<(), ApiError> {
        let response = self.http.post(self.url("/api/employees")).json(draft).send().await?;
        let (status, body) = read_body(response).await?;
        check_mutation(status, &body)
    }

    pub async fn update_employee(&self, id: i64, draft: &EmployeeDraft) -> Result<(), ApiError> {
        let response =
            self.http.put(self.url(&format!("/api/employees/{id}"))).json(draft).send().await?;
        let (status, body) = read_body(response).await?;
        check_mutation(status, &body)
    }

    pub async fn delete_employee(&self, id: i64) -> Result<(), ApiError> {
        self.request_mutation(self.http.delete(self.url(&format!("/api/employees/{id}")))).await
    }

    pub async fn list_leads(&self) -> Result<Vec<Lead>, ApiError> {
        let items = self.get_collection("/api/leads/").await?;
        Ok(items.iter().filter_map(Lead::from_raw).collect())
    }

    /// Submit a public enquiry-form lead.
    pub async fn create_lead(&self, draft: &EnquiryDraft) -> Result<(), ApiError> {
        let response = self.http.post(self.url("/api/leads")).json(draft).send().await?;
        let (status, body) = read_body(response).await?;
        check_mutation(status, &body)
    }

    /// Assign a lead to an employee. The bearer token is sent verbatim; an
    /// unauthenticated session sends an empty token rather than omitting the
    /// header, matching what the backend expects.
    pub async fn assign_lead(
        &self,
        lead_id: i64,
        employee_id: i64,
        bearer_token: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/assignleads"))
            .header(AUTHORIZATION, format!("Bearer {bearer_token}"))
            .json(&json!({ "leadId": lead_id, "employeeId": employee_id }))
            .send()
            .await?;
        let (status, body) = read_body(response).await?;
        check_mutation(status, &body)
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        let items = self.get_collection("/api/contacts").await?;
        Ok(items.iter().filter_map(Contact::from_raw).collect())
    }

    async fn get_collection(&self, path: &str) -> Result<Vec<Value>, ApiError> {
        debug!(path, "fetching collection");
        let response = self.http.get(self.url(path)).send().await?;
        let (status, body) = read_body(response).await?;
        check_status(status, &body)?;
        Ok(envelope::collection(&body)?)
    }

    async fn request_mutation(&self, request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let response = request.send().await?;
        let (status, body) = read_body(response).await?;
        check_mutation(status, &body)
    }
}

async fn read_body(response: Response) -> Result<(u16, Value), ApiError> {
    let status = response.status().as_u16();
    let text = response.text().await?;
    if text.trim().is_empty() {
        // Some mutation endpoints reply with an empty body on success.
        return Ok((status, json!({})));
    }

    let body =
        serde_json::from_str(&text).map_err(|error| ApiError::MalformedBody(error.to_string()))?;
    Ok((status, body))
}

fn check_status(status: u16, body: &Value) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    let message = envelope::response_message(body).unwrap_or("request failed").to_owned();
    Err(ApiError::Status { status, message })
}

fn check_mutation(status: u16, body: &Value) -> Result<(), ApiError> {
    check_status(status, body)?;
    if envelope::succeeded(body) {
        return Ok(());
    }

    let message =
        envelope::response_message(body).unwrap_or("the backend reported a failure").to_owned();
    Err(ApiError::Rejected(message))
}
