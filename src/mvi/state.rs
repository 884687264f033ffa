//! Marker trait for reducer-owned state.

/// State values are cheap to clone, comparable (so callers can detect that
/// an intent was ignored) and start from a well-defined default.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
