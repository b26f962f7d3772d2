//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

// lets `#[derive(ErrorKind)]` refer to this crate by name from within its own tests
extern crate self as mathify_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns `self` as [`Any`], so that callers can recover the concrete error kind.
    fn as_any(&self) -> &dyn Any;

    /// The one-line summary of the error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns the error kind as `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref()
    }

    /// Returns true if the error kind is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.downcast_ref::<K>().is_some()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error against the given source code.
    pub fn report_string(&self, src_id: &str, source: &str) -> String {
        let mut buf = Vec::new();
        let report = self.kind.build_report(src_id, &self.spans);

        // writing into a `Vec` cannot fail
        let _ = report.write((src_id, Source::from(source)), &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use mathify_attrs::ErrorKind;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("`{}` is not supported here", name),
        labels = ["this name"],
        help = "rename it",
    )]
    struct Unsupported {
        name: String,
    }

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(message = "something else", labels = ["here"])]
    struct Other;

    #[test]
    fn message_uses_fields() {
        let err = Error::new(vec![4..7], Unsupported { name: "foo".to_string() });
        assert_eq!(err.to_string(), "`foo` is not supported here");
    }

    #[test]
    fn downcast_to_kind() {
        let err = Error::new(vec![0..1], Other);
        assert!(err.is::<Other>());
        assert!(!err.is::<Unsupported>());
        assert_eq!(err.downcast_ref::<Other>(), Some(&Other));
    }

    #[test]
    fn report_mentions_message() {
        let err = Error::new(vec![4..7], Unsupported { name: "foo".to_string() });
        let report = err.report_string("input", "def foo(x): return x");
        let report = String::from_utf8(strip_ansi_escapes::strip(report)).unwrap();
        assert!(report.contains("`foo` is not supported here"));
        assert!(report.contains("rename it"));
    }
}
