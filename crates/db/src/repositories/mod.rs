//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod archive_repo;
pub mod attachment_repo;
pub mod comment_repo;
pub mod goal_repo;
pub mod invitation_repo;
pub mod meeting_repo;
pub mod project_repo;
pub mod role_repo;
pub mod session_repo;
pub mod task_repo;
pub mod user_repo;
pub mod workspace_repo;

pub use activity_repo::ActivityRepo;
pub use archive_repo::ArchiveRepo;
pub use attachment_repo::AttachmentRepo;
pub use comment_repo::CommentRepo;
pub use goal_repo::GoalRepo;
pub use invitation_repo::InvitationRepo;
pub use meeting_repo::MeetingRepo;
pub use project_repo::ProjectRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
pub use workspace_repo::WorkspaceRepo;
