//! Vercel API models
//!
//! Wire types for the REST payloads consumed by vscdl. No I/O lives here.

pub mod models;

pub use models::deployment::{Deployment, DeploymentList, DeploymentSummary, ReadyState};
pub use models::error::{ApiErrorBody, ApiErrorDetail};
pub use models::files::{EncodedFileContent, FileNode, FileNodeError};
pub use models::project::{CreateProjectRequest, Project, ProjectList, UpdateProjectRequest};
pub use models::team::{AddTeamMemberRequest, TeamMember, TeamMemberList};
