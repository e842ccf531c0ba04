//! HTTP handlers, grouped by resource

pub mod auth;
pub mod members;
pub mod messages;
pub mod notifications;
pub mod projects;
pub mod requests;
pub mod system;

pub use auth::{get_current_user, login, logout, register, update_profile};
pub use members::{list_members, remove_member};
pub use messages::{
    delete_message, edit_message, list_messages, send_message, unread_count,
};
pub use notifications::{delete_notification, list_notifications, mark_notification_read};
pub use projects::{create_project, delete_project, get_project, list_projects, update_project};
pub use requests::{
    create_request, delete_request, list_received_requests, update_request_status,
};
pub use system::health_check;
