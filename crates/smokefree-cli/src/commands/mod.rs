pub mod completions;
pub mod config;
pub mod import;
pub mod milestones;
pub mod quit;
pub mod smoke;
pub mod status;
