pub mod file;
pub mod loans_csv;
pub mod stdin;
