//! Annotation assembly.
//!
//! Merges the table boxes, classifier output, and fused graphic boxes
//! into the page's final record. Header and footer lines are unioned into
//! one box per page before emission.

use std::fs;
use std::path::Path;

use crate::classify::RegionOutput;
use crate::error::Result;
use crate::fusion::FusionOutput;
use crate::model::{AnnotationRecord, BBox, PageLayout};

/// Union a set of line boxes into one box, if any.
fn union_all(boxes: &[BBox]) -> Option<BBox> {
    let mut iter = boxes.iter();
    let first = *iter.next()?;
    Some(iter.fold(first, |acc, b| acc.union(b)))
}

/// Relative image path for a page record, e.g. `image/report_page_3.png`.
pub fn image_path(image_dir: &str, stem: &str, page_number: usize) -> String {
    format!("{}/{}_page_{}.png", image_dir, stem, page_number)
}

/// Build the final record for one page.
pub fn assemble(
    page: &PageLayout,
    regions: RegionOutput,
    graphics: FusionOutput,
    image_path: String,
) -> AnnotationRecord {
    let mut record = AnnotationRecord::empty(page.width as u32, page.height as u32, image_path);

    record.table = page.tables.clone();
    record.title = regions.title;
    record.paragraph = regions.paragraph;
    record.numbered_list = regions.numbered_list;
    record.marked_list = regions.marked_list;
    record.table_signature = regions.table_signature;
    record.picture_signature = regions.picture_signature;
    record.footnote = regions.footnote;

    // Text-line formula boxes plus fused raster formula blocks.
    record.formula = regions.formula;
    record.formula.extend(graphics.formula);
    record.picture = graphics.picture;
    record.graph = graphics.graph;

    if let Some(header) = union_all(&regions.header_lines) {
        record.header.push(header);
    }
    if let Some(footer) = union_all(&regions.footer_lines) {
        record.footer.push(footer);
    }

    record
}

/// Serialize one record to a JSON file.
pub fn write_record(path: &Path, record: &AnnotationRecord, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(record)?
    } else {
        serde_json::to_string(record)?
    };
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_path_format() {
        assert_eq!(image_path("image", "report", 3), "image/report_page_3.png");
    }

    #[test]
    fn test_header_lines_union_to_one_box() {
        let mut page = PageLayout::new(1000.0, 1400.0, false);
        page.tables.push(BBox::new(100.0, 600.0, 900.0, 800.0));

        let mut regions = RegionOutput::default();
        regions.header_lines.push(BBox::new(100.0, 10.0, 300.0, 30.0));
        regions.header_lines.push(BBox::new(700.0, 12.0, 900.0, 32.0));
        regions.footer_lines.push(BBox::new(450.0, 1370.0, 550.0, 1390.0));

        let record = assemble(&page, regions, FusionOutput::default(), "image/d_page_1.png".into());
        assert_eq!(record.header, vec![BBox::new(100.0, 10.0, 900.0, 32.0)]);
        assert_eq!(record.footer.len(), 1);
        assert_eq!(record.table.len(), 1);
    }

    #[test]
    fn test_formula_combines_text_and_raster() {
        let page = PageLayout::new(1000.0, 1400.0, false);
        let mut regions = RegionOutput::default();
        regions.formula.push(BBox::new(400.0, 500.0, 600.0, 520.0));
        let mut graphics = FusionOutput::default();
        graphics.formula.push(BBox::new(350.0, 420.0, 650.0, 490.0));

        let record = assemble(&page, regions, graphics, "image/d_page_1.png".into());
        assert_eq!(record.formula.len(), 2);
    }

    #[test]
    fn test_write_record_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d_page_1.json");
        let record = AnnotationRecord::empty(100, 200, "image/d_page_1.png".into());
        write_record(&path, &record, true).unwrap();
        let back: AnnotationRecord =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, record);
    }
}
