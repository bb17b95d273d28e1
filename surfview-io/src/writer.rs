//! Scene writers.

use crate::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use surfview_algorithms::{SceneSink, SurfaceScene};

/// Output layout of a [`SceneWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFormat {
    /// The whole scene as pretty-printed JSON.
    Json,
    /// One `face,r,g,b,a` row per face.
    Csv,
}

impl SceneFormat {
    /// Picks the format from the file extension.
    ///
    /// # Errors
    /// `InvalidFormat` for anything but `.json` or `.csv`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(SceneFormat::Json),
            Some("csv") => Ok(SceneFormat::Csv),
            _ => Err(Error::InvalidFormat(format!(
                "unsupported output '{}', expected a .json or .csv file",
                path.display()
            ))),
        }
    }
}

/// Buffered file writer for computed scenes.
pub struct SceneWriter {
    writer: BufWriter<File>,
    format: SceneFormat,
}

impl SceneWriter {
    /// Creates a writer, choosing the format from the extension.
    ///
    /// The format is checked before the file is created.
    ///
    /// # Errors
    /// `InvalidFormat` for unknown extensions, `Io` if the file cannot be
    /// created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let format = SceneFormat::from_path(path.as_ref())?;
        Self::create_with_format(path, format)
    }

    /// Creates a writer with an explicit format.
    ///
    /// # Errors
    /// `Io` if the file cannot be created.
    pub fn create_with_format<P: AsRef<Path>>(path: P, format: SceneFormat) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            format,
        })
    }

    /// Output format.
    #[must_use]
    pub fn format(&self) -> SceneFormat {
        self.format
    }

    fn write_json(&mut self, scene: &SurfaceScene) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, scene)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_csv(&mut self, scene: &SurfaceScene) -> Result<()> {
        writeln!(self.writer, "face,r,g,b,a")?;
        for (face, color) in scene.face_colors.iter().enumerate() {
            writeln!(
                self.writer,
                "{},{},{},{},{}",
                face,
                color.r(),
                color.g(),
                color.b(),
                color.a()
            )?;
        }
        Ok(())
    }

    /// Flushes the writer.
    ///
    /// # Errors
    /// `Io` if the buffered data cannot be written.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl SceneSink for SceneWriter {
    type Error = Error;

    fn write_scene(&mut self, scene: &SurfaceScene) -> Result<()> {
        match self.format {
            SceneFormat::Json => self.write_json(scene)?,
            SceneFormat::Csv => self.write_csv(scene)?,
        }
        self.flush()
    }
}
