pub mod notifications;
pub mod topic_notification_request;
pub mod user_notification_request;
