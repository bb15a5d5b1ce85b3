//! Namespace-aware name qualification.

use bsqgen_schema::NamedRef;

/// Qualifies declaration names relative to the namespace being emitted.
#[derive(Debug, Clone, Copy)]
pub struct NameQualifier<'a> {
    home: &'a str,
}

impl<'a> NameQualifier<'a> {
    /// Creates a qualifier for the given home namespace.
    #[must_use]
    pub fn new(home: &'a str) -> Self {
        Self { home }
    }

    /// Returns the home namespace.
    #[must_use]
    pub fn home(&self) -> &'a str {
        self.home
    }

    /// Qualifies `name` defined in `namespace`.
    ///
    /// Names from the home namespace, or with no namespace, stay unqualified.
    #[must_use]
    pub fn qualify(&self, namespace: Option<&str>, name: &str) -> String {
        match namespace {
            Some(ns) if ns != self.home => format!("{ns}::{name}"),
            _ => name.to_string(),
        }
    }

    /// Qualifies a resolved reference.
    #[must_use]
    pub fn qualify_ref(&self, reference: &NamedRef) -> String {
        self.qualify(reference.namespace.as_deref(), &reference.name)
    }
}
