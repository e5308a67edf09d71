//! Voxdesk dashboard workflow
//!
//! Drives a client's dashboard: decide between creating and configuring an
//! assistant, keep the system prompt draft, write it back as a complete model
//! configuration, and record the created assistant on the client's profile.

pub mod error;
pub mod linker;
pub mod registry;
pub mod state;
pub mod sync;

pub use error::{WorkflowError, WorkflowResult};
pub use linker::ProfileStore;
pub use registry::DashboardRegistry;
pub use state::{DashboardView, ViewState, WorkflowStatus, SUCCESS_NOTICE_DURATION};
pub use sync::{ConfigurationSync, LINK_WARNING, PROFILE_UNAVAILABLE, SAVED_NOTICE};
