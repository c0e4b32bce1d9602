//! Data model for layout annotation extraction.
//!
//! This module defines the intermediate representation shared by the
//! pipeline stages: the raw layout tree we are handed, the normalized
//! elements the collector produces from it, and the per-page annotation
//! record the assembler emits.

mod bbox;
mod element;
mod page;
mod raw;
mod record;

pub use bbox::BBox;
pub use element::{Element, ElementKind};
pub use page::PageLayout;
pub use raw::{RawChar, RawDocument, RawLine, RawNode, RawPage};
pub use record::AnnotationRecord;
