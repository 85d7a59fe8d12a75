use thiserror::Error;

pub type GenResult<T> = Result<T, GenError>;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Declaration '{declaration}' has no @{annotation} annotation")]
    MissingAnnotation {
        declaration: String,
        annotation: String,
    },

    #[error("@{annotation} on '{declaration}' has no '{argument}' argument")]
    MissingArgument {
        declaration: String,
        annotation: String,
        argument: String,
    },

    #[error("'{argument}' argument on '{declaration}' must be a non-empty string")]
    InvalidArgument {
        declaration: String,
        argument: String,
    },

    #[error("Failed to write generated output")]
    Io(#[from] std::io::Error),
}

impl GenError {
    pub fn missing_annotation(declaration: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self::MissingAnnotation {
            declaration: declaration.into(),
            annotation: annotation.into(),
        }
    }

    pub fn missing_argument(
        declaration: impl Into<String>,
        annotation: impl Into<String>,
        argument: impl Into<String>,
    ) -> Self {
        Self::MissingArgument {
            declaration: declaration.into(),
            annotation: annotation.into(),
            argument: argument.into(),
        }
    }

    pub fn invalid_argument(declaration: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::InvalidArgument {
            declaration: declaration.into(),
            argument: argument.into(),
        }
    }
}
