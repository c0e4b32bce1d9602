//! # pagemark
//!
//! Layout annotation extraction for detection training data.
//!
//! Given the positioned text and graphics elements of one rendered page,
//! pagemark classifies every element into a semantic region category
//! (title, paragraph, table, picture, captions, lists, header, footer,
//! footnote, formula, graph) and emits one pixel-space bounding box per
//! region, as a JSON record per page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagemark::{annotate_file, AnnotateOptions};
//!
//! fn main() -> pagemark::Result<()> {
//!     let options = AnnotateOptions::new().with_dpi(300.0);
//!     let records = annotate_file("layout/report.json".as_ref(), options)?;
//!     for record in &records {
//!         println!("{}: {} regions", record.image_path, record.region_count());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! One page flows through fixed stages: element collection, coordinate
//! conversion to pixel space, table region detection, the rule-ordered
//! region classifier (with caption merging), graphic fusion against the
//! generator's marker side channel, and record assembly. Pages are
//! independent; documents fan out over a rayon pool.

pub mod assemble;
pub mod classify;
pub mod collect;
pub mod error;
pub mod fusion;
pub mod model;
pub mod options;
pub mod pipeline;
pub mod tables;
pub mod transform;

// Re-export commonly used types
pub use classify::{ClassifierState, ListKind, RegionClassifier, RegionOutput};
pub use collect::{collect_page, FontStats};
pub use error::{Error, Result};
pub use fusion::{fuse_graphics, FusionOutput, GraphicKind};
pub use model::{
    AnnotationRecord, BBox, Element, ElementKind, PageLayout, RawChar, RawDocument, RawLine,
    RawNode, RawPage,
};
pub use options::{AnnotateOptions, Patterns};
pub use pipeline::{annotate_dir, annotate_file, Annotator, BatchSummary};
pub use tables::{GridTableFinder, GridTableFinderConfig, TableFinder};
