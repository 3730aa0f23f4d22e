pub mod feedback_client;
pub mod transport;

pub use feedback_client::FeedbackClient;
pub use transport::Transport;
