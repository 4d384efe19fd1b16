pub mod ascent;
pub mod balloon;
pub mod environment;
pub mod sweep;
pub mod thermal;
