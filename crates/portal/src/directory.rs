use async_trait::async_trait;
use heliodesk_api::{ApiClient, ApiError};
use heliodesk_core::domain::employee::Employee;
use heliodesk_core::domain::role::{Role, RoleId};
use tracing::{debug, warn};

/// Read access the directories need from the backend. `ApiClient` is the
/// production implementation; tests substitute scripted fakes.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    async fn fetch_roles(&self) -> Result<Vec<Role>, ApiError>;
    async fn fetch_employees(&self) -> Result<Vec<Employee>, ApiError>;
}

#[async_trait]
impl DirectorySource for ApiClient {
    async fn fetch_roles(&self) -> Result<Vec<Role>, ApiError> {
        self.list_roles().await
    }

    async fn fetch_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.list_employees().await
    }
}

/// The set of role names usable in the portal.
///
/// Names deduplicate by exact string equality only, last write wins. Variants
/// differing in case or whitespace stay distinct entries on purpose: the
/// deployed backend contains such near-duplicates and collapsing them would
/// re-bucket existing employees.
#[derive(Debug, Default)]
pub struct RoleDirectory {
    roles: Vec<Role>,
    latest_ticket: u64,
}

impl RoleDirectory {
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Fetch and replace the collection. Failures are logged and leave an
    /// empty directory; callers never see an error.
    pub async fn refresh<S: DirectorySource + ?Sized>(&mut self, source: &S) {
        let ticket = self.begin_refresh();
        let fetched = match source.fetch_roles().await {
            Ok(roles) => roles,
            Err(error) => {
                warn!(error = %error, "role fetch failed; directory resets to empty");
                Vec::new()
            }
        };
        self.complete_refresh(ticket, fetched);
    }

    /// Start a refresh and get its ticket. Only the most recently issued
    /// ticket may apply, so a slow response cannot clobber a newer one.
    pub fn begin_refresh(&mut self) -> u64 {
        self.latest_ticket += 1;
        self.latest_ticket
    }

    /// Apply a completed fetch. Returns false when the ticket is stale and
    /// the result was discarded.
    pub fn complete_refresh(&mut self, ticket: u64, fetched: Vec<Role>) -> bool {
        if ticket != self.latest_ticket {
            debug!(ticket, latest = self.latest_ticket, "discarding stale role refresh");
            return false;
        }

        self.roles = dedupe_by_name(fetched);
        true
    }

    /// Append role names discovered on employee records that the roles
    /// endpoint did not report. Union by exact string equality.
    pub fn merge_employee_roles(&mut self, employees: &EmployeeDirectory) {
        for name in employees.discovered_role_names() {
            if self.roles.iter().any(|role| role.name == name) {
                continue;
            }
            let id = RoleId::Synthetic(self.roles.len() as i64 + 1);
            self.roles.push(Role { id, name });
        }
    }
}

/// The normalized employee collection.
#[derive(Debug, Default)]
pub struct EmployeeDirectory {
    employees: Vec<Employee>,
    latest_ticket: u64,
}

impl EmployeeDirectory {
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn find(&self, id: i64) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    pub async fn refresh<S: DirectorySource + ?Sized>(&mut self, source: &S) {
        let ticket = self.begin_refresh();
        let fetched = match source.fetch_employees().await {
            Ok(employees) => employees,
            Err(error) => {
                warn!(error = %error, "employee fetch failed; directory resets to empty");
                Vec::new()
            }
        };
        self.complete_refresh(ticket, fetched);
    }

    pub fn begin_refresh(&mut self) -> u64 {
        self.latest_ticket += 1;
        self.latest_ticket
    }

    pub fn complete_refresh(&mut self, ticket: u64, fetched: Vec<Employee>) -> bool {
        if ticket != self.latest_ticket {
            debug!(ticket, latest = self.latest_ticket, "discarding stale employee refresh");
            return false;
        }

        self.employees = fetched;
        true
    }

    /// Every role string carried by any employee, in encounter order,
    /// deduplicated by exact equality.
    pub fn discovered_role_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for employee in &self.employees {
            for name in
                std::iter::once(&employee.primary_role).chain(employee.roles.iter())
            {
                if !names.iter().any(|seen| seen == name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }
}

fn dedupe_by_name(fetched: Vec<Role>) -> Vec<Role> {
    let mut roles: Vec<Role> = Vec::with_capacity(fetched.len());
    for role in fetched {
        if let Some(existing) = roles.iter_mut().find(|existing| existing.name == role.name) {
            // Last write wins, keeping the first occurrence's position.
            *existing = role;
        } else {
            roles.push(role);
        }
    }
    roles
}

#[cfg(test)]
mod tests {
    use heliodesk_core::domain::employee::Employee;
    use heliodesk_core::domain::role::{Role, RoleId};

    use super::{EmployeeDirectory, RoleDirectory};

    fn role(id: RoleId, name: &str) -> Role {
        Role { id, name: name.to_owned() }
    }

    fn employee(id: i64, primary_role: &str, roles: &[&str]) -> Employee {
        Employee {
            id,
            first_name: "Test".to_owned(),
            last_name: String::new(),
            email: None,
            mobile: None,
            address: None,
            joining_date: None,
            primary_role: primary_role.to_owned(),
            roles: if roles.is_empty() {
                vec![primary_role.to_owned()]
            } else {
                roles.iter().map(|name| (*name).to_owned()).collect()
            },
        }
    }

    #[test]
    fn stale_refresh_results_are_discarded() {
        let mut directory = RoleDirectory::default();
        let first = directory.begin_refresh();
        let second = directory.begin_refresh();

        assert!(directory.complete_refresh(second, vec![role(RoleId::Assigned(1), "Installer")]));
        assert!(!directory.complete_refresh(first, vec![role(RoleId::Assigned(2), "Surveyor")]));

        assert_eq!(directory.roles().len(), 1);
        assert_eq!(directory.roles()[0].name, "Installer");
    }

    #[test]
    fn duplicate_names_collapse_last_write_wins() {
        let mut directory = RoleDirectory::default();
        let ticket = directory.begin_refresh();
        directory.complete_refresh(
            ticket,
            vec![
                role(RoleId::Synthetic(1), "Installer"),
                role(RoleId::Assigned(9), "Surveyor"),
                role(RoleId::Assigned(4), "Installer"),
            ],
        );

        let names: Vec<&str> = directory.roles().iter().map(|role| role.name.as_str()).collect();
        assert_eq!(names, vec!["Installer", "Surveyor"]);
        assert_eq!(directory.roles()[0].id, RoleId::Assigned(4));
    }

    #[test]
    fn case_variants_stay_distinct() {
        let mut directory = RoleDirectory::default();
        let ticket = directory.begin_refresh();
        directory.complete_refresh(
            ticket,
            vec![role(RoleId::Assigned(1), "Sales"), role(RoleId::Assigned(2), "sales")],
        );

        assert_eq!(directory.roles().len(), 2);
    }

    #[test]
    fn employee_roles_merge_without_exact_duplicates() {
        let mut roles = RoleDirectory::default();
        let ticket = roles.begin_refresh();
        roles.complete_refresh(ticket, vec![role(RoleId::Assigned(1), "Sales Person")]);

        let mut employees = EmployeeDirectory::default();
        let ticket = employees.begin_refresh();
        employees.complete_refresh(
            ticket,
            vec![
                employee(1, "Sales Person", &[]),
                employee(2, "Installer", &["Installer", "Surveyor"]),
                // Trailing whitespace is a different string, so it merges as
                // its own entry.
                employee(3, "Sales Person ", &[]),
            ],
        );

        roles.merge_employee_roles(&employees);

        let names: Vec<&str> = roles.roles().iter().map(|role| role.name.as_str()).collect();
        assert_eq!(names, vec!["Sales Person", "Installer", "Surveyor", "Sales Person "]);

        let merged = &roles.roles()[1];
        assert!(!merged.id.is_durable());
    }

    #[test]
    fn discovered_names_keep_encounter_order() {
        let mut employees = EmployeeDirectory::default();
        let ticket = employees.begin_refresh();
        employees.complete_refresh(
            ticket,
            vec![employee(1, "Surveyor", &["Surveyor", "Installer"]), employee(2, "Surveyor", &[])],
        );

        assert_eq!(employees.discovered_role_names(), vec!["Surveyor", "Installer"]);
    }

    #[test]
    fn find_locates_employees_by_id() {
        let mut employees = EmployeeDirectory::default();
        let ticket = employees.begin_refresh();
        employees.complete_refresh(ticket, vec![employee(7, "Installer", &[])]);

        assert!(employees.find(7).is_some());
        assert!(employees.find(8).is_none());
    }
}
