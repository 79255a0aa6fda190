//! Error types for the mapping layer.

/// Errors that can occur while turning a wire object into a domain entity.
///
/// Mapping is purely structural, so the only way it fails is a response
/// that lacks something the domain type can't exist without.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A required attribute was absent. Carries the attribute's path in the
    /// pod's naming, e.g. `roomSystemInfo.id`.
    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),
}

/// Unwraps a required wire attribute.
pub(crate) fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ModelError> {
    value.ok_or(ModelError::MissingField(field))
}
