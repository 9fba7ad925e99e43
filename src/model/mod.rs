pub mod attendance;
pub mod deduction;
pub mod employee;
