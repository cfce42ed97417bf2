//! Back-office portal state for heliodesk.
//!
//! The portal layer owns the in-memory view of backend records and the
//! workflows that mutate them:
//! - **Directories** (`directory`) - fetch-and-replace collections of roles
//!   and employees, with stale-response guarding
//! - **Assignment** (`assignment`) - the lead board and the assign-to-employee
//!   workflow, modelled as a per-lead state machine
//! - **Filtering** (`filter`) - client-side lead filtering and pagination
//!
//! Each directory owns its collection exclusively; nothing else mutates them
//! outside the refresh cycle and the assignment commit path.

pub mod assignment;
pub mod directory;
pub mod filter;

pub use assignment::{AssignError, AssignLeads, AssignState, AssignmentWorkflow, LeadBoard};
pub use directory::{DirectorySource, EmployeeDirectory, RoleDirectory};
pub use filter::{page_count, paginate, LeadFilter, Page};
