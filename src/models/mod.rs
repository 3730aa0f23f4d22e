pub mod feedback;
pub mod file_ref;

pub use feedback::{
    rating_label, AttachmentInfo, FeedbackPayload, FormSnapshot, SubmissionPhase,
    PROFILE_PICTURE_FIELD, RATING_LABELS,
};
pub use file_ref::FileRef;
