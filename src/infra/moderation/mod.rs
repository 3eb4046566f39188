pub mod policy_file;
pub mod remote_moderator;
pub mod session;

pub use policy_file::{load_policy, PolicyFileError};
pub use remote_moderator::RemoteModerator;
pub use session::StaticSessionProvider;
