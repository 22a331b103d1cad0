pub mod topic_request;
pub mod topics;
