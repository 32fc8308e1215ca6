use std::path::PathBuf;

pub const DIAGRAM_PATH: &str = "diagram.png";
pub const DOT_BINARY: &str = "dot";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramConfig {
    /// Destination file; its extension picks the output format.
    pub output: PathBuf,
    /// Graphviz executable used for image formats.
    pub dot_binary: PathBuf,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DIAGRAM_PATH),
            dot_binary: PathBuf::from(DOT_BINARY),
        }
    }
}

impl DiagramConfig {
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_dot_binary(mut self, dot_binary: impl Into<PathBuf>) -> Self {
        self.dot_binary = dot_binary.into();
        self
    }
}
