pub mod dispatcher;
pub mod error;
pub mod fcm;
pub mod provider;

pub use dispatcher::{DispatchReport, Dispatcher, TopicNotification, UserNotification};
pub use error::{DispatchError, DispatchResult, ProviderError, ProviderResult};
pub use fcm::{FcmProvider, ServiceAccount};
pub use provider::{PushProvider, TokenOutcome, TopicReport, UnavailableProvider};

#[cfg(test)]
mod tests;
