pub mod analysis;
pub mod cli;
pub mod error;
pub mod field;
pub mod form;
pub mod trace;

pub use error::CopilotError;
pub use field::knowledge::{explain_field, validate_field};
pub use field::password::enhance_password_field;
pub use field::purpose::guess_field_purpose;
pub use form::classifier::{FormClassifier, classify};
pub use form::form_model::{
    ClassificationResult, FieldDescriptor, FormAttributes, PageSignals, PageSnapshot,
};
pub use form::responder::respond_to_question;
