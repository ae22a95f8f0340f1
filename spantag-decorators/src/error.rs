/// An error returned when a decoration rule cannot be constructed.
///
/// Rules that fail to construct are never part of an engine. Loading a configuration skips them
/// and continues with the remaining entries.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RuleError {
    /// The configuration entry does not name a decorator type.
    #[error("decorator has no type")]
    MissingType,

    /// No decorator with this identifier is registered.
    #[error("unknown decorator type `{0}`")]
    UnknownKind(String),

    /// The rule has no tag to match on, so it would apply to every span.
    #[error("decorator `{0}` has no matching tag")]
    MissingMatchingTag(&'static str),
}
