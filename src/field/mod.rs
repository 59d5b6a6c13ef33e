pub mod knowledge;
pub mod password;
pub mod purpose;
