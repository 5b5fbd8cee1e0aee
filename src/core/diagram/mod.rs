//! Entity-relationship diagram generation
//!
//! Text formats (Graphviz DOT, Mermaid `erDiagram`) are produced directly;
//! PNG output is delegated to the external Graphviz `dot` backend.

pub mod dot;
pub mod graphviz;
pub mod mermaid;

pub use dot::DotGenerator;
pub use graphviz::GraphvizRenderer;
pub use mermaid::MermaidGenerator;

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

/// Supported diagram output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramFormat {
    /// PNG image rendered by the external Graphviz backend
    Png,
    /// Graphviz DOT source
    Dot,
    /// Mermaid `erDiagram` source, embeddable in Markdown
    Mermaid,
}

impl DiagramFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Dot => "dot",
            Self::Mermaid => "mmd",
        }
    }
}

impl FromStr for DiagramFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "dot" | "gv" => Ok(Self::Dot),
            "mermaid" | "mmd" => Ok(Self::Mermaid),
            _ => Err(format!("Unknown diagram format: {s}")),
        }
    }
}

impl fmt::Display for DiagramFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "png"),
            Self::Dot => write!(f, "dot"),
            Self::Mermaid => write!(f, "mermaid"),
        }
    }
}

/// A failure to produce a rendered diagram
///
/// Rendering either writes the requested output file or fails with one of
/// these variants; it never succeeds silently with missing output.
#[derive(Debug)]
pub enum RenderError {
    /// The rendering backend binary was not found on this system
    BackendMissing {
        /// Name of the missing binary
        backend: String,
    },
    /// The rendering backend ran but exited with a failure
    Backend {
        /// Name of the backend binary
        backend: String,
        /// Captured stderr (trimmed), or the exit status when stderr is empty
        detail: String,
    },
    /// An I/O failure while talking to the backend or writing output
    Io(io::Error),
    /// The backend reported success but the output file is missing or empty
    MissingOutput {
        /// Expected output path
        path: PathBuf,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackendMissing { backend } => write!(
                f,
                "Rendering backend '{backend}' not found; install Graphviz or choose a text format"
            ),
            Self::Backend { backend, detail } => {
                write!(f, "Rendering backend '{backend}' failed: {detail}")
            }
            Self::Io(err) => write!(f, "Rendering I/O failure: {err}"),
            Self::MissingOutput { path } => write!(
                f,
                "Rendering reported success but produced no output at {}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
