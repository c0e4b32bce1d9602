//! Annotation options and compiled text patterns.

use regex::Regex;

use crate::error::Result;

/// Bullet glyphs that open a marked list item.
pub const BULLET_CHARS: &str = "•◦●○▪–—*-·‣⁃■❖➤►▶⁌⁍";

/// Options controlling annotation extraction.
///
/// # Example
///
/// ```
/// use pagemark::AnnotateOptions;
///
/// let options = AnnotateOptions::new()
///     .with_dpi(150.0)
///     .with_image_dir("pages")
///     .sequential();
/// assert!((options.scale() - 150.0 / 72.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    /// Raster DPI of the training images
    pub target_dpi: f32,
    /// Reference DPI of the native page units
    pub native_dpi: f32,
    /// Directory component of `image_path` in emitted records
    pub image_dir: String,
    /// How much larger than body text a heading must be, in native units
    pub title_size_delta: f32,
    /// Case-insensitive pattern opening a figure caption
    pub figure_caption_pattern: String,
    /// Case-insensitive pattern opening a table caption
    pub table_caption_pattern: String,
    /// Case-insensitive keyword marking a formula line
    pub formula_keyword: String,
    /// Horizontal tolerance for the centered-line formula test, pixels
    pub center_tolerance: f32,
    /// Vertical jump that splits paragraph column clusters, native units
    pub column_gap: f32,
    /// Process document pages in parallel
    pub parallel: bool,
    /// Pretty-print emitted JSON records
    pub pretty: bool,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            target_dpi: 300.0,
            native_dpi: 72.0,
            image_dir: "image".to_string(),
            title_size_delta: 2.0,
            figure_caption_pattern: r"^\s*(рис\.?|рисунок)\s*\d+".to_string(),
            table_caption_pattern: r"^\s*(табл\.?|таблица)\s*\d+".to_string(),
            formula_keyword: "формула".to_string(),
            center_tolerance: 20.0,
            column_gap: 48.0,
            parallel: true,
            pretty: true,
        }
    }
}

impl AnnotateOptions {
    /// Create options with defaults (300 DPI, Russian caption prefixes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target raster DPI.
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.target_dpi = dpi;
        self
    }

    /// Set the image directory used in `image_path`.
    pub fn with_image_dir(mut self, dir: impl Into<String>) -> Self {
        self.image_dir = dir.into();
        self
    }

    /// Set the heading size delta over body text, in native units.
    pub fn with_title_size_delta(mut self, delta: f32) -> Self {
        self.title_size_delta = delta;
        self
    }

    /// Set the figure caption prefix pattern.
    pub fn with_figure_caption_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.figure_caption_pattern = pattern.into();
        self
    }

    /// Set the table caption prefix pattern.
    pub fn with_table_caption_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.table_caption_pattern = pattern.into();
        self
    }

    /// Disable page-level parallelism.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Emit compact JSON records.
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Native-to-pixel scale factor.
    pub fn scale(&self) -> f32 {
        self.target_dpi / self.native_dpi
    }
}

/// Text patterns compiled once per annotator.
#[derive(Debug)]
pub struct Patterns {
    /// Numbered list item opener, e.g. "3." or "12)"
    pub numbered: Regex,
    /// Marked list item opener (bullet glyph)
    pub bullet: Regex,
    /// Figure caption opener
    pub figure_caption: Regex,
    /// Table caption opener
    pub table_caption: Regex,
    /// Bracketed footnote reference, e.g. "[4]"
    pub footnote: Regex,
    /// Formula keyword, lowercased
    pub formula_keyword: String,
}

impl Patterns {
    /// Compile all patterns from the given options.
    pub fn compile(options: &AnnotateOptions) -> Result<Self> {
        Ok(Self {
            numbered: Regex::new(r"^\s*\d+[.)]\s+")?,
            bullet: Regex::new(&format!(r"^\s*[{}]\s+", regex::escape(BULLET_CHARS)))?,
            figure_caption: Regex::new(&format!("(?i){}", options.figure_caption_pattern))?,
            table_caption: Regex::new(&format!("(?i){}", options.table_caption_pattern))?,
            footnote: Regex::new(r"\[\d+\]")?,
            formula_keyword: options.formula_keyword.to_lowercase(),
        })
    }
}
