pub mod burndown;
pub mod compare;
pub mod engine;
pub mod interactive;
pub mod loan_args;
pub mod loans;
