//! Request lifecycle.

/// Status of the most recently started fetch cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Lifecycle<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Waiting for the response.
    Loading,
    /// Response applied.
    Loaded(T),
    /// Cycle failed with a user-facing message.
    Errored(String),
}

impl<T> Lifecycle<T> {
    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Lifecycle::Loading)
    }

    /// The loaded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Lifecycle::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// The error message, if the cycle failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Lifecycle::Errored(message) => Some(message),
            _ => None,
        }
    }

    /// Build from a fetch outcome.
    pub fn from_result(result: Result<T, String>) -> Self {
        match result {
            Ok(value) => Lifecycle::Loaded(value),
            Err(message) => Lifecycle::Errored(message),
        }
    }
}

/// Outcome of handing a response back to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response belonged to the latest cycle and was applied.
    Applied,
    /// A newer cycle started first; the response was dropped.
    Stale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_accessors() {
        let idle: Lifecycle<u32> = Lifecycle::default();
        assert_eq!(idle, Lifecycle::Idle);
        assert!(!idle.is_loading());
        assert_eq!(idle.loaded(), None);

        assert!(Lifecycle::<u32>::Loading.is_loading());
        assert_eq!(Lifecycle::Loaded(3).loaded(), Some(&3));
        assert_eq!(Lifecycle::<u32>::Errored("nope".into()).error(), Some("nope"));
    }

    #[test]
    fn test_from_result() {
        assert_eq!(Lifecycle::from_result(Ok::<_, String>(1)), Lifecycle::Loaded(1));
        assert_eq!(
            Lifecycle::<u8>::from_result(Err("Failed to load".into())),
            Lifecycle::Errored("Failed to load".into())
        );
    }
}
