//! Per-session parse state shared by every node of a tree.
//!
//! A [`ParseContext`] is owned by the grammar driver through an `Rc`. Nodes
//! only hold a [`ContextRef`], a weak back-reference, so dropping the driver's
//! handle ends the session even if trees built under it are still alive.
//!
//! A context is never shared between threads. Independent sessions each build
//! their own context and their own trees.

use crate::error::{Diagnostic, Error, Result};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Byte range of a construct in the statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    /// Start offset (inclusive)
    pub begin: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    pub const fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Widest tree printer indentation accepted per depth level.
pub const MAX_INDENT: usize = 16;

fn default_indent() -> usize {
    2
}

/// Session configuration supplied by the embedding compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextOptions {
    /// Schema assumed for unqualified object names in DDL statements
    pub default_schema: Option<String>,
    /// Spaces per depth level in tree printing, `1..=MAX_INDENT`
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            default_schema: None,
            indent: default_indent(),
        }
    }
}

impl ContextOptions {
    /// Parse options from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: ContextOptions =
            serde_json::from_str(json).map_err(|e| Error::options(e.to_string()))?;
        if !(1..=MAX_INDENT).contains(&options.indent) {
            return Err(Error::options(format!(
                "indent must be between 1 and {}, got {}",
                MAX_INDENT, options.indent
            )));
        }
        Ok(options)
    }

    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = Some(schema.into());
        self
    }
}

/// State of one parse/bind session.
#[derive(Debug, Default)]
pub struct ParseContext {
    options: ContextOptions,
    position: Cell<Span>,
    next_node_id: Cell<u64>,
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl ParseContext {
    /// Create a session with default options
    pub fn new() -> Rc<Self> {
        Self::with_options(ContextOptions::default())
    }

    /// Create a session with the given options
    pub fn with_options(options: ContextOptions) -> Rc<Self> {
        Rc::new(Self {
            options,
            ..Default::default()
        })
    }

    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    pub fn default_schema(&self) -> Option<&str> {
        self.options.default_schema.as_deref()
    }

    /// Source span the grammar driver is currently positioned on.
    pub fn position(&self) -> Span {
        self.position.get()
    }

    /// Move the current position; nodes allocated afterwards are stamped with it.
    pub fn set_position(&self, span: Span) {
        self.position.set(span);
    }

    /// Hand out the next node id of this session.
    pub(crate) fn next_node_id(&self) -> u64 {
        let id = self.next_node_id.get();
        self.next_node_id.set(id + 1);
        id
    }

    /// Number of nodes allocated so far in this session.
    pub fn allocated(&self) -> u64 {
        self.next_node_id.get()
    }

    /// Record an error at the current position.
    pub fn report(&self, error: &Error) {
        tracing::debug!(%error, "recording parse diagnostic");
        self.diagnostics
            .borrow_mut()
            .push(Diagnostic::error(error.to_string(), self.position()));
    }

    /// Record a warning at the current position.
    pub fn warn(&self, message: impl Into<String>) {
        self.diagnostics
            .borrow_mut()
            .push(Diagnostic::warning(message, self.position()));
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.severity == crate::error::DiagnosticSeverity::Error)
    }
}

/// Non-owning handle from a node back to the session that created it.
#[derive(Debug, Clone, Default)]
pub struct ContextRef(Weak<ParseContext>);

impl ContextRef {
    pub fn new(context: &Rc<ParseContext>) -> Self {
        Self(Rc::downgrade(context))
    }

    /// The session, if it is still alive.
    pub fn get(&self) -> Option<Rc<ParseContext>> {
        self.0.upgrade()
    }

    /// The session, or [`Error::ContextDropped`].
    pub fn require(&self) -> Result<Rc<ParseContext>> {
        self.get().ok_or(Error::ContextDropped)
    }

    /// Whether both handles point at the same session.
    pub fn same_session(&self, other: &ContextRef) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }

    pub fn is_bound_to(&self, context: &Rc<ParseContext>) -> bool {
        std::ptr::eq(self.0.as_ptr(), Rc::as_ptr(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_json_defaults() {
        let options = ContextOptions::from_json(r#"{"default_schema": "app"}"#).unwrap();
        assert_eq!(options.default_schema.as_deref(), Some("app"));
        assert_eq!(options.indent, 2);
    }

    #[test]
    fn test_options_reject_zero_indent() {
        let err = ContextOptions::from_json(r#"{"indent": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Options(_)));
    }

    #[test]
    fn test_options_bound_indent() {
        assert_eq!(ContextOptions::from_json(r#"{"indent": 16}"#).unwrap().indent, 16);
        let err = ContextOptions::from_json(r#"{"indent": 1000000}"#).unwrap_err();
        assert_eq!(
            err,
            Error::options("indent must be between 1 and 16, got 1000000")
        );
    }

    #[test]
    fn test_options_reject_malformed_json() {
        assert!(ContextOptions::from_json("{indent").is_err());
    }

    #[test]
    fn test_context_ref_does_not_keep_session_alive() {
        let ctx = ParseContext::new();
        let handle = ContextRef::new(&ctx);
        assert!(handle.get().is_some());
        assert!(handle.is_bound_to(&ctx));
        assert!(handle.same_session(&ContextRef::new(&ctx)));
        assert!(!handle.same_session(&ContextRef::new(&ParseContext::new())));
        drop(ctx);
        assert!(handle.get().is_none());
        assert_eq!(handle.require().unwrap_err(), Error::ContextDropped);
    }

    #[test]
    fn test_node_ids_are_per_session() {
        let a = ParseContext::new();
        let b = ParseContext::new();
        assert_eq!(a.next_node_id(), 0);
        assert_eq!(a.next_node_id(), 1);
        assert_eq!(b.next_node_id(), 0);
        assert_eq!(a.allocated(), 2);
    }

    #[test]
    fn test_report_uses_current_position() {
        let ctx = ParseContext::new();
        ctx.set_position(Span::new(4, 9));
        ctx.report(&Error::unknown_kind("Bogus"));
        ctx.warn("unused alias");
        let diags = ctx.diagnostics();
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].span, Span::new(4, 9));
        assert!(ctx.has_errors());
    }
}
