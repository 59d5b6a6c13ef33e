pub mod form_context;
pub mod question;
