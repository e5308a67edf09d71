// ABOUTME: Configuration constants shared across Voxdesk packages
// ABOUTME: Environment variable names and their documented defaults

pub mod constants;
