pub mod form;
pub mod multipart;
pub mod pattern;
