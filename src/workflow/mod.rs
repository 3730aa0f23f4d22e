pub mod form_state;
pub mod submission_flow;

pub use form_state::FormState;
pub use submission_flow::{
    CloseCallback, PostSuccess, PostSuccessAction, SkipReason, SubmissionController,
    SubmitOutcome,
};
