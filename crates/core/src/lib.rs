pub mod config;
pub mod domain;
pub mod envelope;
pub mod errors;
pub mod matching;

pub use domain::contact::Contact;
pub use domain::employee::{Employee, EmployeeDraft};
pub use domain::lead::{EnquiryDraft, Lead, LeadStatus};
pub use domain::role::{Role, RoleId};
pub use envelope::{collection, response_message, succeeded, ShapeError};
pub use errors::DomainError;
pub use matching::{employee_matches, RoleTarget};
