use armature_extract::ExtractError;
use thiserror::Error;

/// Errors raised by registration, dependency inference, and resolution.
///
/// The enum is `Clone`: a failed build settles a shared cache slot, and
/// every concurrent or later request for that name observes the same
/// error.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The name is already bound; the original registration is kept.
    #[error("provider `{0}` is already registered")]
    DuplicateProvider(String),

    /// No provider is registered under the requested name.
    #[error("no provider registered for `{0}`")]
    UnknownProvider(String),

    /// Automatic dependency inference could not parse the producer's
    /// declared parameter list.
    #[error("cannot infer dependencies: {0}")]
    UnparseableProducer(#[from] ExtractError),

    /// The resolution chain revisited a name it is already building.
    #[error("dependency cycle detected: {}", .trail.join(" -> "))]
    CyclicDependency { trail: Vec<String> },

    /// Invoking `name`'s producer failed.
    #[error("building `{name}` failed")]
    Build {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// A failure raised inside a consumer-supplied producer.
    #[error("producer failed: {0}")]
    Producer(String),

    /// The value bound to `name` is not of the requested type.
    #[error("provider `{name}` does not yield a `{expected}`")]
    TypeMismatch { name: String, expected: &'static str },
}
