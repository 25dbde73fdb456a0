pub mod aggregate;
pub mod args;
pub mod run;
pub mod scan;
