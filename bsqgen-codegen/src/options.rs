//! Emitter configuration.

use std::path::{Path, PathBuf};

/// Options controlling which namespaces are emitted and where they go.
#[derive(Debug, Clone)]
pub struct EmitterOptions {
    output_dir: PathBuf,
    output_file: Option<String>,
    namespaces: Vec<String>,
    fail_on_error: bool,
    parallel: bool,
}

impl EmitterOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            output_file: None,
            namespaces: Vec::new(),
            fail_on_error: true,
            parallel: true,
        }
    }

    /// Sets the directory output files are written to.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Writes every namespace into a single file with this name.
    #[must_use]
    pub fn output_file(mut self, file: impl Into<String>) -> Self {
        self.output_file = Some(file.into());
        self
    }

    /// Restricts emission to the given namespaces.
    #[must_use]
    pub fn namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts emission to a comma-separated list of namespaces.
    #[must_use]
    pub fn namespaces_from_list(self, list: &str) -> Self {
        self.namespaces(
            list.split(',')
                .map(str::trim)
                .filter(|ns| !ns.is_empty()),
        )
    }

    /// Sets whether any failed declaration prevents output.
    #[must_use]
    pub fn fail_on_error(mut self, fail: bool) -> Self {
        self.fail_on_error = fail;
        self
    }

    /// Sets whether namespaces are generated in parallel.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the output directory.
    #[must_use]
    pub fn get_output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the combined output file name, if set.
    #[must_use]
    pub fn get_output_file(&self) -> Option<&str> {
        self.output_file.as_deref()
    }

    /// Returns the selected namespaces (empty means all).
    #[must_use]
    pub fn get_namespaces(&self) -> &[String] {
        &self.namespaces
    }

    /// Returns true if a namespace is selected for emission.
    #[must_use]
    pub fn includes(&self, namespace: &str) -> bool {
        self.namespaces.is_empty() || self.namespaces.iter().any(|ns| ns == namespace)
    }

    /// Returns true if failed declarations prevent output.
    #[must_use]
    pub const fn is_fail_on_error(&self) -> bool {
        self.fail_on_error
    }

    /// Returns true if namespaces are generated in parallel.
    #[must_use]
    pub const fn is_parallel(&self) -> bool {
        self.parallel
    }
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self::new()
    }
}
