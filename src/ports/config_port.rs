//! Configuration access port trait.

/// Raw string access to a section/key configuration store. Typed parsing
/// and validation live in [`crate::domain::settings`] so that missing and
/// malformed values produce distinct errors.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}
