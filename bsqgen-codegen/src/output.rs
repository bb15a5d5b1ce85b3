//! Writing generated namespaces to disk.

use crate::error::CodegenError;
use crate::generator::Emission;
use crate::options::EmitterOptions;
use std::fs;
use std::path::PathBuf;

/// File extension for generated Bosque sources.
pub const BOSQUE_EXTENSION: &str = "bsq";

/// Writes an [`Emission`] as configured by [`EmitterOptions`].
pub struct OutputWriter<'a> {
    options: &'a EmitterOptions,
}

impl<'a> OutputWriter<'a> {
    /// Creates a new output writer.
    #[must_use]
    pub fn new(options: &'a EmitterOptions) -> Self {
        Self { options }
    }

    /// Writes either one combined file or one `<namespace>.bsq` file per
    /// namespace into the output directory.
    ///
    /// # Returns
    /// The paths written, in namespace order.
    ///
    /// # Errors
    /// Returns `CodegenError::Declarations` if any declaration failed and the
    /// options fail on error, or `CodegenError::Io` if writing fails.
    pub fn write(&self, emission: Emission) -> Result<Vec<PathBuf>, CodegenError> {
        let emission = emission.check(self.options.is_fail_on_error())?;
        let dir = self.options.get_output_dir();
        fs::create_dir_all(dir)?;

        let mut written = Vec::new();
        match self.options.get_output_file() {
            Some(file) => {
                let path = dir.join(file);
                fs::write(&path, emission.combined_source())?;
                written.push(path);
            }
            None => {
                for ns in &emission.namespaces {
                    let path = dir.join(format!("{}.{BOSQUE_EXTENSION}", ns.name));
                    fs::write(&path, &ns.source)?;
                    written.push(path);
                }
            }
        }

        for path in &written {
            tracing::info!("Wrote {}", path.display());
        }
        Ok(written)
    }
}
