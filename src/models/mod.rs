pub mod employee;
pub mod form;
pub mod user;
