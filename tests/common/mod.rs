pub mod fixtures;
pub mod pdf_assertions;

use fixtures::SimulatedRenderer;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use toclink::ConverterBuilder;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A scratch directory holding the input files of one test.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self { dir: TempDir::new()? })
    }

    /// Writes `contents` to `name` inside the workspace and returns its path.
    pub fn file(&self, name: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// A builder wired to a fresh [`SimulatedRenderer`]; the returned renderer
/// shares its render log with the one inside the builder.
pub fn simulated_builder() -> (ConverterBuilder, SimulatedRenderer) {
    let _ = env_logger::builder().is_test(true).try_init();
    let renderer = SimulatedRenderer::new();
    let builder = ConverterBuilder::new().with_renderer(renderer.clone());
    (builder, renderer)
}
