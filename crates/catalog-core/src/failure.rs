//! Failure normalization.
//!
//! Fetch tasks can fail with a typed error or with an arbitrary panic
//! payload. Both end up as a single display string.

use std::any::Any;
use std::error::Error;

/// Message used when a failure carries nothing displayable.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Something went wrong";

/// Convert an arbitrary failure value into a display message.
///
/// Error values yield their message, strings are returned as-is, anything
/// else yields `fallback`. Never panics.
pub fn failure_message(failure: &(dyn Any + Send), fallback: &str) -> String {
    if let Some(err) = failure.downcast_ref::<Box<dyn Error + Send + Sync>>() {
        return err.to_string();
    }
    if let Some(err) = failure.downcast_ref::<Box<dyn Error + Send>>() {
        return err.to_string();
    }
    if let Some(s) = failure.downcast_ref::<String>() {
        return s.clone();
    }
    if let Some(s) = failure.downcast_ref::<&'static str>() {
        return (*s).to_string();
    }
    fallback.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Opaque;

    #[test]
    fn test_error_value_yields_message() {
        let err: Box<dyn Error + Send + Sync> = "Failed to fetch products".into();
        assert_eq!(failure_message(&err, "fallback"), "Failed to fetch products");
    }

    #[test]
    fn test_string_values() {
        assert_eq!(failure_message(&String::from("boom"), "fallback"), "boom");
        assert_eq!(failure_message(&"static boom", "fallback"), "static boom");
    }

    #[test]
    fn test_opaque_value_yields_fallback() {
        assert_eq!(failure_message(&Opaque, "Failed to load"), "Failed to load");
        assert_eq!(failure_message(&42_u32, DEFAULT_FAILURE_MESSAGE), DEFAULT_FAILURE_MESSAGE);
    }

    #[test]
    fn test_panic_payload() {
        let payload = std::panic::catch_unwind(|| panic!("exploded {}", 7)).unwrap_err();
        assert_eq!(failure_message(&*payload, "fallback"), "exploded 7");

        let payload = std::panic::catch_unwind(|| std::panic::panic_any(Opaque)).unwrap_err();
        assert_eq!(failure_message(&*payload, "fallback"), "fallback");
    }
}
