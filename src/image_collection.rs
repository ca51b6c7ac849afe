//! Ordered collection of imported images and its visible listing.
//!
//! The listing holds one label per image, at the same index. Every mutation
//! updates both so the two never diverge in length or order.

use std::path::Path;

use image::RgbaImage;

use crate::error::ImportError;

/// A source image, in animation order.
#[derive(Debug, Clone)]
pub enum ImportedImage {
    /// Referenced by path, read later by an external tool.
    Path(String),
    /// Decoded up front for the in-process encoder.
    Decoded { source: String, frame: RgbaImage },
}

impl ImportedImage {
    /// The path string the image was imported from.
    pub fn source(&self) -> &str {
        match self {
            ImportedImage::Path(source) => source,
            ImportedImage::Decoded { source, .. } => source,
        }
    }

    pub fn frame(&self) -> Option<&RgbaImage> {
        match self {
            ImportedImage::Path(_) => None,
            ImportedImage::Decoded { frame, .. } => Some(frame),
        }
    }

    /// Listing label: the file name without its directory.
    pub fn label(&self) -> String {
        let source = self.source();
        Path::new(source)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.to_string())
    }
}

/// Turns a candidate path into an `ImportedImage`.
pub trait ImageLoader {
    fn load(&self, source: &str) -> Result<ImportedImage, ImportError>;
}

/// Keeps the path only; the convert tool reads the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathLoader;

impl ImageLoader for PathLoader {
    fn load(&self, source: &str) -> Result<ImportedImage, ImportError> {
        Ok(ImportedImage::Path(source.to_string()))
    }
}

/// Decodes the image into an RGBA buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecodingLoader;

impl ImageLoader for DecodingLoader {
    fn load(&self, source: &str) -> Result<ImportedImage, ImportError> {
        let frame = image::open(source)
            .map_err(|e| ImportError::Decode {
                path: source.into(),
                reason: e.to_string(),
            })?
            .to_rgba8();
        Ok(ImportedImage::Decoded {
            source: source.to_string(),
            frame,
        })
    }
}

/// Result of one import attempt.
#[derive(Debug)]
pub enum ImportOutcome {
    Added,
    Duplicate,
    Failed(ImportError),
}

/// Per-path outcomes of an import batch, in encounter order.
#[derive(Debug, Default)]
pub struct ImportReport {
    outcomes: Vec<(String, ImportOutcome)>,
}

impl ImportReport {
    pub fn outcomes(&self) -> &[(String, ImportOutcome)] {
        &self.outcomes
    }

    pub fn added(&self) -> usize {
        self.count(|o| matches!(o, ImportOutcome::Added))
    }

    pub fn duplicates(&self) -> usize {
        self.count(|o| matches!(o, ImportOutcome::Duplicate))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &ImportError)> {
        self.outcomes.iter().filter_map(|(path, outcome)| match outcome {
            ImportOutcome::Failed(err) => Some((path.as_str(), err)),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&ImportOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

#[derive(Debug, Default)]
pub struct ImageCollection {
    images: Vec<ImportedImage>,
    listing: Vec<String>,
}

impl ImageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every path not already present, in encounter order.
    ///
    /// Duplicates (exact string match) and load failures are skipped without
    /// stopping the batch.
    pub fn import<I, S, L>(&mut self, paths: I, loader: &L) -> ImportReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        L: ImageLoader + ?Sized,
    {
        let mut report = ImportReport::default();

        for path in paths {
            let path = path.as_ref();
            let outcome = if self.contains(path) {
                ImportOutcome::Duplicate
            } else {
                match loader.load(path) {
                    Ok(image) => {
                        self.push(image);
                        ImportOutcome::Added
                    }
                    Err(err) => ImportOutcome::Failed(err),
                }
            };
            report.outcomes.push((path.to_string(), outcome));
        }

        report
    }

    /// Remove the entries at `indices`. Out-of-range and repeated indices are
    /// ignored. Returns how many entries were removed.
    pub fn delete(&mut self, indices: &[usize]) -> usize {
        let mut indices = indices.to_vec();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();

        let mut removed = 0;
        for index in indices {
            if index < self.images.len() {
                self.images.remove(index);
                self.listing.remove(index);
                removed += 1;
            }
        }
        removed
    }

    pub fn clear(&mut self) {
        self.images.clear();
        self.listing.clear();
    }

    pub fn contains(&self, source: &str) -> bool {
        self.images.iter().any(|image| image.source() == source)
    }

    pub fn images(&self) -> &[ImportedImage] {
        &self.images
    }

    /// Labels shown to the user, index-aligned with `images()`.
    pub fn listing(&self) -> &[String] {
        &self.listing
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(ImportedImage::source)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn push(&mut self, image: ImportedImage) {
        self.listing.push(image.label());
        self.images.push(image);
    }
}
