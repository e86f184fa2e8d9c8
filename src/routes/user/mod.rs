pub mod edit;
pub mod profile;

/// Body of every 403 raised by the user routes themselves.
pub const FORBIDDEN: &str = "Forbidden";
