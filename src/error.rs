use std::fmt;
use std::io;

/// Errors raised while collecting fields or generating option code
///
/// Every variant aborts the in-flight request; nothing is written when one
/// is returned.
#[derive(Debug)]
pub enum FoggoError {
    /// No struct type with the requested name exists in the package
    StructNotFound {
        /// The struct name that was searched for
        name: String,
    },
    /// Two eligible fields would produce the same exported option identifier
    DuplicateFieldName {
        /// The field declared first
        first: String,
        /// The field that collides with it
        second: String,
    },
    /// The struct declares type parameters, which the templates cannot carry
    GenericStruct {
        /// The struct name
        name: String,
    },
    /// The formatter rejected the rendered code, or the template failed to expand
    Format(String),
    /// The Go package could not be loaded
    PackageLoad(String),
    /// The configuration file is unreadable or invalid
    Config(String),
    /// Reading sources or writing the generated file failed
    Io(io::Error),
}

impl fmt::Display for FoggoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoggoError::StructNotFound { name } => {
                write!(f, "struct '{name}' was not found in the package")
            }
            FoggoError::DuplicateFieldName { first, second } => {
                write!(
                    f,
                    "fields '{first}' and '{second}' have the same name when case is ignored; \
                    their option functions would collide"
                )
            }
            FoggoError::GenericStruct { name } => {
                write!(
                    f,
                    "struct '{name}' declares type parameters, which are not supported"
                )
            }
            FoggoError::Format(msg) => write!(f, "failed to format generated code: {msg}"),
            FoggoError::PackageLoad(msg) => write!(f, "failed to load package: {msg}"),
            FoggoError::Config(msg) => write!(f, "invalid configuration: {msg}"),
            FoggoError::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for FoggoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FoggoError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for FoggoError {
    fn from(err: io::Error) -> Self {
        FoggoError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_both_colliding_fields() {
        let err = FoggoError::DuplicateFieldName {
            first: "A".to_string(),
            second: "a".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'A'"));
        assert!(msg.contains("'a'"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = FoggoError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "gone");
    }
}
