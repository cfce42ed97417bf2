pub mod contact;
pub mod employee;
pub mod lead;
pub mod role;
