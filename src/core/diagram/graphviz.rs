//! PNG rendering via the external Graphviz backend
//!
//! The schema is converted to DOT source and piped to the `dot` binary,
//! which owns the output file for the duration of the call. Rendering
//! either produces the requested file or fails with a [`RenderError`].

use super::dot::DotGenerator;
use super::RenderError;
use crate::core::schema::Schema;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Default backend binary name
const DEFAULT_BACKEND: &str = "dot";

/// Renders schemas to PNG through the Graphviz `dot` binary
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    backend: String,
}

impl GraphvizRenderer {
    /// Create a renderer using the `dot` binary from `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: DEFAULT_BACKEND.to_string(),
        }
    }

    /// Create a renderer using a specific backend binary
    #[must_use]
    pub fn with_backend(backend: &str) -> Self {
        Self {
            backend: backend.to_string(),
        }
    }

    /// Render the schema as a PNG image at `output_path`
    ///
    /// # Errors
    /// Returns a [`RenderError`] when the backend binary is missing, exits
    /// with a failure, an I/O error occurs, or the backend reports success
    /// without producing a non-empty output file.
    pub fn render(&self, schema: &Schema, output_path: &Path) -> Result<(), RenderError> {
        let dot_source = DotGenerator::generate(schema);

        let mut child = Command::new(&self.backend)
            .arg("-Tpng")
            .arg("-o")
            .arg(output_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RenderError::BackendMissing {
                        backend: self.backend.clone(),
                    }
                } else {
                    RenderError::Io(e)
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot_source.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(RenderError::Backend {
                backend: self.backend.clone(),
                detail,
            });
        }

        // A zero exit with no usable file still counts as a failure
        let produced = fs::metadata(output_path).map(|m| m.len() > 0).unwrap_or(false);
        if !produced {
            return Err(RenderError::MissingOutput {
                path: output_path.to_path_buf(),
            });
        }

        Ok(())
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::social::social_schema;

    #[test]
    fn test_missing_backend_reported() {
        let renderer = GraphvizRenderer::with_backend("schemagram-no-such-backend");
        let target = std::env::temp_dir().join("schemagram_missing_backend.png");

        let err = renderer
            .render(&social_schema(), &target)
            .expect_err("backend should be missing");

        match err {
            RenderError::BackendMissing { backend } => {
                assert_eq!(backend, "schemagram-no-such-backend");
            }
            other => panic!("expected BackendMissing, got {other}"),
        }
    }

    #[test]
    fn test_render_never_silently_misses_output() {
        // With Graphviz installed this produces a non-empty PNG; without it,
        // the failure is loud. Either way there is no silent success.
        let renderer = GraphvizRenderer::new();
        let target = std::env::temp_dir().join("schemagram_render_test.png");
        let _ = fs::remove_file(&target);

        match renderer.render(&social_schema(), &target) {
            Ok(()) => {
                let metadata = fs::metadata(&target).expect("output file must exist");
                assert!(metadata.len() > 0, "output file must be non-empty");
                let _ = fs::remove_file(&target);
            }
            Err(RenderError::BackendMissing { .. }) => {}
            Err(other) => panic!("unexpected render failure: {other}"),
        }
    }
}
