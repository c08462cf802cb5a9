//! Configuration access port trait.

/// Read access to `[section] key = value` settings.
///
/// Typed getters fall back to `default` when the key is absent or does not
/// parse; callers that must reject bad values validate through
/// [`crate::domain::config_validation`] first.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
}
