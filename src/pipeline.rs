//! Per-page orchestration and batch processing.
//!
//! One page flows collector -> transform -> table detector -> classifier
//! -> fusion -> assembler. Within a page processing is strictly
//! sequential; across pages there is no shared mutable state, so document
//! batches fan out over a rayon pool when parallelism is enabled.
//!
//! Every failure degrades to "skip and log" at page granularity; a batch
//! never aborts because one page was malformed.

use std::fs;
use std::path::Path;

use rayon::prelude::*;

use crate::assemble::{assemble, image_path, write_record};
use crate::classify::{RegionClassifier, RegionOutput};
use crate::collect::collect_page;
use crate::error::{Error, Result};
use crate::fusion::fuse_graphics;
use crate::model::{AnnotationRecord, PageLayout, RawDocument, RawPage};
use crate::options::{AnnotateOptions, Patterns};
use crate::tables::{exclude_table_elements, GridTableFinder, TableFinder};
use crate::transform::to_pixel_space;

/// Annotation extractor with compiled patterns.
///
/// Construct once, reuse across documents; all per-page state is local to
/// each `annotate_page` call.
pub struct Annotator {
    options: AnnotateOptions,
    patterns: Patterns,
}

impl Annotator {
    /// Create an annotator, compiling the option patterns.
    pub fn new(options: AnnotateOptions) -> Result<Self> {
        let patterns = Patterns::compile(&options)?;
        Ok(Self { options, patterns })
    }

    /// The options this annotator was built with.
    pub fn options(&self) -> &AnnotateOptions {
        &self.options
    }

    /// Annotate one page using the built-in grid table finder.
    ///
    /// `page_number` is 1-based and only used for the image path and
    /// error reporting.
    pub fn annotate_page(
        &self,
        raw: &RawPage,
        stem: &str,
        page_number: usize,
    ) -> Result<AnnotationRecord> {
        self.annotate_page_with(raw, stem, page_number, &GridTableFinder::new())
    }

    /// Annotate one page with a caller-supplied table finder.
    pub fn annotate_page_with(
        &self,
        raw: &RawPage,
        stem: &str,
        page_number: usize,
        finder: &dyn TableFinder,
    ) -> Result<AnnotationRecord> {
        if !raw.has_geometry() {
            return Err(Error::MissingPageGeometry(page_number, raw.width, raw.height));
        }

        let scale = self.options.scale();
        // Rendered image dimensions are whole pixels; boxes clamp against
        // the floored size so no edge coordinate can exceed them.
        let width_px = (raw.width * scale).floor();
        let height_px = (raw.height * scale).floor();

        let (mut elements, stats) = collect_page(raw);
        for element in &mut elements {
            element.bbox = to_pixel_space(element.bbox, height_px, width_px, scale);
            for glyph in &mut element.glyphs {
                *glyph = to_pixel_space(*glyph, height_px, width_px, scale);
            }
        }

        let mut page = PageLayout::new(width_px, height_px, raw.is_landscape());
        page.elements = elements;
        page.tables = finder.find_tables(&page);

        let path = image_path(&self.options.image_dir, stem, page_number);
        let working = exclude_table_elements(std::mem::take(&mut page.elements), &page.tables);

        // A page with no extractable text has no body-size pivot; emit an
        // all-empty record (tables and unmarked images still count).
        let Some(body_size) = stats.body_size() else {
            log::debug!("page {}: no extractable text, emitting empty record", page_number);
            let graphics = fuse_graphics(&working, &page.tables);
            return Ok(assemble(&page, RegionOutput::default(), graphics, path));
        };

        let classifier = RegionClassifier::new(&self.options, &self.patterns, &page, body_size);
        let regions = classifier.classify(&working);
        let graphics = fuse_graphics(&working, &page.tables);

        Ok(assemble(&page, regions, graphics, path))
    }

    /// Annotate every page of a document, in parallel when enabled.
    ///
    /// Returns one result per page, in page order.
    pub fn annotate_document(
        &self,
        document: &RawDocument,
        stem: &str,
    ) -> Vec<Result<AnnotationRecord>> {
        if self.options.parallel {
            document
                .pages
                .par_iter()
                .enumerate()
                .map(|(i, page)| self.annotate_page(page, stem, i + 1))
                .collect()
        } else {
            document
                .pages
                .iter()
                .enumerate()
                .map(|(i, page)| self.annotate_page(page, stem, i + 1))
                .collect()
        }
    }
}

/// Outcome counts for a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Layout dumps read
    pub documents: usize,
    /// Records written
    pub pages: usize,
    /// Pages skipped after an error
    pub skipped: usize,
}

/// Annotate one layout dump file, returning successful page records.
///
/// Failing pages are logged and dropped from the result.
pub fn annotate_file(path: &Path, options: AnnotateOptions) -> Result<Vec<AnnotationRecord>> {
    let annotator = Annotator::new(options)?;
    let document: RawDocument = serde_json::from_str(&fs::read_to_string(path)?)?;
    let stem = file_stem(path);
    Ok(annotator
        .annotate_document(&document, &stem)
        .into_iter()
        .enumerate()
        .filter_map(|(i, result)| match result {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("{}: skipping page {}: {}", path.display(), i + 1, e);
                None
            }
        })
        .collect())
}

/// Annotate every `*.json` layout dump in a directory.
///
/// Writes one `<stem>_page_<n>.json` record per page into `output`.
pub fn annotate_dir(
    input: &Path,
    output: &Path,
    options: AnnotateOptions,
) -> Result<BatchSummary> {
    fs::create_dir_all(output)?;
    let pretty = options.pretty;
    let annotator = Annotator::new(options)?;
    let mut summary = BatchSummary::default();

    let mut entries: Vec<_> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort();

    for path in entries {
        let document: RawDocument = match fs::read_to_string(&path)
            .map_err(Error::from)
            .and_then(|text| serde_json::from_str(&text).map_err(Error::from))
        {
            Ok(document) => document,
            Err(e) => {
                log::warn!("{}: skipping layout dump: {}", path.display(), e);
                continue;
            }
        };
        summary.documents += 1;
        let stem = file_stem(&path);

        for (i, result) in annotator.annotate_document(&document, &stem).into_iter().enumerate() {
            let page_number = i + 1;
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("{}: skipping page {}: {}", path.display(), page_number, e);
                    summary.skipped += 1;
                    continue;
                }
            };
            let out_path = output.join(format!("{}_page_{}.json", stem, page_number));
            match write_record(&out_path, &record, pretty) {
                Ok(()) => summary.pages += 1,
                Err(e) => {
                    log::warn!("{}: failed to write record: {}", out_path.display(), e);
                    summary.skipped += 1;
                }
            }
        }
    }

    Ok(summary)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string())
}
