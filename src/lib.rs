pub mod agent;
pub mod deployment;
pub mod errors;
pub mod inputs;
pub mod providers;
