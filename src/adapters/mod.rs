pub mod genai;
pub mod mail;
