mod form_submission;
mod submission_response;

pub use form_submission::{BodyParseError, FormSubmission, SubmissionFormData};
pub use submission_response::SubmissionResponse;
