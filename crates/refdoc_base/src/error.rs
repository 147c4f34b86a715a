use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use tracing_error::{SpanTrace, SpanTraceStatus};

/* 📖 # Why a custom error type and not use anyhow/eyre/thiserror etc?

- Better control over error handling
- No dependencies to compile and integrate
- More transparency into error handling logic

The registry loader in particular needs to report many authoring problems at once,
which maps onto the `Multiple` variant rather than onto a single opaque message.
 */

/// Error variants that can occur in refdoc operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// File system operation failed
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The registry or configuration was authored incorrectly
    Authoring { location: String, problem: String },

    /// Multiple errors occurred during batch operations
    Multiple { errors: Vec<RefdocError> },

    /// Catch-all for other errors with a message
    Message { message: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::Authoring { location, problem } => write!(f, "{}: {}", location, problem),
            ErrorKind::Multiple { errors } => {
                write!(f, "Multiple errors occurred ({} total)", errors.len())
            }
            ErrorKind::Message { message } => write!(f, "{}", message),
        }
    }
}

/* 📖 # Why separate ErrorKind and RefdocError?
This two-layer design provides a clear separation of concerns:
- ErrorKind: structural variants with specific contexts (file paths, registry locations, etc.)
- RefdocError: wraps ErrorKind with context strings and a span trace

Callers pattern match on ErrorKind, while RefdocError carries everything needed to
print a useful diagnostic at the top level.
*/

/// Error type wrapping [`ErrorKind`] with context and a span trace.
pub struct RefdocError {
    kind: ErrorKind,
    context: Vec<String>,
    span_trace: SpanTrace,
}

impl RefdocError {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a message error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Creates an authoring error for the given location (e.g. `services[2].endpoints[0]`).
    pub fn authoring(location: impl Into<String>, problem: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authoring {
            location: location.into(),
            problem: problem.into(),
        })
    }

    /// Creates an error aggregating several others.
    pub fn multiple(errors: Vec<RefdocError>) -> Self {
        Self::new(ErrorKind::Multiple { errors })
    }

    /// Attaches context to an error.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the attached context strings, oldest first.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;

        let mut children: Vec<TreeChild<'_>> = self
            .context
            .iter()
            .map(|context| TreeChild::Context(context))
            .collect();
        if let ErrorKind::Multiple { errors } = &self.kind {
            children.extend(errors.iter().map(TreeChild::Nested));
        }

        let last_index = children.len().saturating_sub(1);
        for (index, child) in children.into_iter().enumerate() {
            let is_last = index == last_index;
            let branch = if is_last { "└─ " } else { "├─ " };
            match child {
                TreeChild::Context(context) => writeln!(f, "{prefix}{branch}{context}")?,
                TreeChild::Nested(error) => {
                    write!(f, "{prefix}{branch}error: ")?;
                    let nested_prefix = format!("{prefix}{}", if is_last { "   " } else { "│  " });
                    error.fmt_tree(f, &nested_prefix)?;
                }
            }
        }
        Ok(())
    }
}

enum TreeChild<'a> {
    Context(&'a str),
    Nested(&'a RefdocError),
}

impl StdError for RefdocError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::Authoring { .. } | ErrorKind::Multiple { .. } | ErrorKind::Message { .. } => {
                None
            }
        }
    }
}

impl fmt::Display for RefdocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for context in &self.context {
            write!(f, "{}: ", context)?;
        }
        write!(f, "{}", self.kind)?;
        if let ErrorKind::Multiple { errors } = &self.kind {
            for error in errors {
                write!(f, "\n  - {}", error)?;
            }
        }
        Ok(())
    }
}

/* 📖 # Why a custom Debug implementation?

`main` returns errors through Debug, so Debug is what users actually read. The
derived output would dump the raw struct; instead we print the message, the context
chain and nested errors as a tree, followed by the span trace when one was captured.
*/
impl fmt::Debug for RefdocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, "")?;
        if self.span_trace.status() == SpanTraceStatus::CAPTURED {
            writeln!(f, "Trace: {}", self.span_trace)?;
        }
        Ok(())
    }
}

/* 📖 # Why use Box<RefdocError> in the result type?

Boxing the error reduces the size of the result type, making it more efficient to return in the common case.
The span trace and context vector would otherwise bloat every `Ok` value.
*/

/// Standard result type for refdoc operations.
pub type RefdocResult<T> = std::result::Result<T, Box<RefdocError>>;

/// Extension trait for attaching context to Results.
pub trait ResultExt<T> {
    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    fn with_context<F>(self, f: F) -> RefdocResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for RefdocResult<T> {
    fn with_context<F>(self, f: F) -> RefdocResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}

/// Builds a boxed message error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        Box::new($crate::RefdocError::message(format!($($arg)*)))
    };
}
