//! Database entities

pub mod join_request;
pub mod message;
pub mod notification;
pub mod project;
pub mod project_member;
pub mod user;

pub use join_request::Entity as JoinRequest;
pub use message::Entity as Message;
pub use notification::Entity as Notification;
pub use project::Entity as Project;
pub use project_member::Entity as ProjectMember;
pub use user::Entity as User;

pub mod prelude {
    pub use super::join_request::Entity as JoinRequest;
    pub use super::message::Entity as Message;
    pub use super::notification::Entity as Notification;
    pub use super::project::Entity as Project;
    pub use super::project_member::Entity as ProjectMember;
    pub use super::user::Entity as User;
}
