pub mod cache;
pub mod classifier;
pub mod form_model;
pub mod patterns;
pub mod responder;
