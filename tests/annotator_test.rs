//! End-to-end annotation properties over constructed page dumps.

use pagemark::{AnnotateOptions, Annotator, RawChar, RawLine, RawNode, RawPage};

const PAGE_W: f32 = 800.0;
const PAGE_H: f32 = 1000.0;

/// Build options with scale 1.0 so pixel coordinates equal native ones
/// (modulo the vertical flip).
fn options() -> AnnotateOptions {
    AnnotateOptions::new().with_dpi(72.0)
}

fn annotator() -> Annotator {
    Annotator::new(options()).unwrap()
}

/// A text line given in *pixel* coordinates (top-left origin); converts
/// to the native bottom-left boxes the collector expects.
fn line_px(text: &str, x0: f32, py0: f32, x1: f32, py1: f32, size: f32, font: &str) -> RawLine {
    let native = [x0, PAGE_H - py1, x1, PAGE_H - py0];
    let chars: Vec<RawChar> = {
        let count = text.chars().count().max(1);
        let step = (x1 - x0) / count as f32;
        text.chars()
            .enumerate()
            .map(|(i, c)| RawChar {
                text: c.to_string(),
                bbox: [
                    x0 + i as f32 * step,
                    native[1],
                    x0 + (i + 1) as f32 * step,
                    native[3],
                ],
                size,
                font: font.to_string(),
            })
            .collect()
    };
    RawLine { bbox: native, chars }
}

fn text_box(lines: Vec<RawLine>) -> RawNode {
    RawNode::TextBox { lines }
}

fn page(nodes: Vec<RawNode>) -> RawPage {
    RawPage { width: PAGE_W, height: PAGE_H, nodes }
}

/// Body text filler so the font-size mode lands on 12.
fn body_lines() -> Vec<RawLine> {
    (0..4)
        .map(|i| {
            line_px(
                "обычный текст страницы",
                100.0,
                400.0 + i as f32 * 18.0,
                500.0,
                414.0 + i as f32 * 18.0,
                12.0,
                "Times-Roman",
            )
        })
        .collect()
}

#[test]
fn all_boxes_stay_inside_the_image() {
    let mut lines = body_lines();
    lines.push(line_px("Заголовок", 100.0, 200.0, 400.0, 222.0, 16.0, "Times-Bold"));
    lines.push(line_px("1. пункт списка", 100.0, 600.0, 450.0, 615.0, 12.0, "Times-Roman"));
    let record = annotator().annotate_page(&page(vec![text_box(lines)]), "doc", 1).unwrap();

    assert!(record.region_count() > 0);
    for b in record.all_boxes() {
        assert!(0.0 <= b.x0 && b.x0 < b.x1 && b.x1 <= record.image_width as f32);
        assert!(0.0 <= b.y0 && b.y0 < b.y1 && b.y1 <= record.image_height as f32);
    }
}

#[test]
fn page_without_text_yields_empty_categories() {
    let raw = page(vec![RawNode::Image { bbox: [100.0, 400.0, 300.0, 600.0] }]);
    let record = annotator().annotate_page(&raw, "doc", 1).unwrap();

    // The unmarked image defaults to picture; every text category is empty.
    assert_eq!(record.picture.len(), 1);
    assert!(record.title.is_empty());
    assert!(record.paragraph.is_empty());
    assert!(record.numbered_list.is_empty());
    assert!(record.header.is_empty());
    assert!(record.footnote.is_empty());
}

#[test]
fn wrapped_numbered_item_emits_one_union_box() {
    let mut lines = body_lines();
    lines.push(line_px("1. Alpha beta", 100.0, 600.0, 400.0, 620.0, 12.0, "Times-Roman"));
    lines.push(line_px("continuation of alpha", 118.0, 622.0, 430.0, 642.0, 12.0, "Times-Roman"));
    let record = annotator().annotate_page(&page(vec![text_box(lines)]), "doc", 1).unwrap();

    assert_eq!(record.numbered_list.len(), 1);
    let b = record.numbered_list[0];
    assert_eq!((b.x0, b.y0, b.x1, b.y1), (100.0, 600.0, 430.0, 642.0));
}

#[test]
fn top_band_line_is_header_not_title() {
    // Native top edge at 0.97 x page height => pixel y0 = 30, inside the
    // 5% header band, despite being oversized and bold.
    let mut lines = body_lines();
    lines.push(line_px("РАЗДЕЛ 1", 100.0, 30.0, 300.0, 48.0, 18.0, "Times-Bold"));
    let record = annotator().annotate_page(&page(vec![text_box(lines)]), "doc", 1).unwrap();

    assert_eq!(record.header.len(), 1);
    assert!(record.title.is_empty());
}

#[test]
fn table_interior_text_is_never_relabeled() {
    // A 2x2 ruling grid spanning (100,100)-(500,300) in pixel space.
    let grid = vec![
        RawNode::Line { bbox: [100.0, PAGE_H - 101.0, 500.0, PAGE_H - 100.0] },
        RawNode::Line { bbox: [100.0, PAGE_H - 301.0, 500.0, PAGE_H - 300.0] },
        RawNode::Line { bbox: [100.0, PAGE_H - 301.0, 101.0, PAGE_H - 100.0] },
        RawNode::Line { bbox: [500.0, PAGE_H - 301.0, 501.0, PAGE_H - 100.0] },
    ];
    let mut lines = body_lines();
    lines.push(line_px("1. ячейка", 150.0, 150.0, 300.0, 165.0, 12.0, "Times-Bold"));
    let mut nodes = grid;
    nodes.push(text_box(lines));

    let record = annotator().annotate_page(&page(nodes), "doc", 1).unwrap();

    assert_eq!(record.table.len(), 1);
    let cell = |b: &pagemark::BBox| b.overlaps(&pagemark::BBox::new(150.0, 150.0, 300.0, 165.0));
    assert!(!record.paragraph.iter().any(cell));
    assert!(!record.title.iter().any(cell));
    assert!(!record.numbered_list.iter().any(cell));
    assert!(!record.marked_list.iter().any(cell));
}

#[test]
fn annotation_is_idempotent() {
    let mut lines = body_lines();
    lines.push(line_px("Заголовок", 100.0, 200.0, 400.0, 222.0, 16.0, "Times-Bold"));
    lines.push(line_px("• пункт", 100.0, 600.0, 450.0, 615.0, 12.0, "Times-Roman"));
    lines.push(line_px("стр. 7", 380.0, 975.0, 420.0, 990.0, 10.0, "Times-Roman"));
    let raw = page(vec![text_box(lines), RawNode::Image { bbox: [100.0, 50.0, 300.0, 250.0] }]);

    let a = annotator().annotate_page(&raw, "doc", 1).unwrap();
    let b = annotator().annotate_page(&raw, "doc", 1).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn caption_opener_and_continuation_merge() {
    let mut lines = body_lines();
    lines.push(line_px("Рисунок 3 — Пример", 200.0, 700.0, 600.0, 715.0, 11.0, "Times-Roman"));
    lines.push(line_px("продолжение подписи", 220.0, 718.0, 580.0, 733.0, 11.0, "Times-Roman"));
    let record = annotator().annotate_page(&page(vec![text_box(lines)]), "doc", 1).unwrap();

    assert_eq!(record.picture_signature.len(), 1);
    let b = record.picture_signature[0];
    assert_eq!((b.x0, b.y0, b.x1, b.y1), (200.0, 700.0, 600.0, 733.0));
}

#[test]
fn footnote_reference_gets_tight_box() {
    let mut lines = body_lines();
    lines.push(line_px("см. источник [4] стр. 9", 100.0, 600.0, 560.0, 615.0, 12.0, "Times-Roman"));
    let record = annotator().annotate_page(&page(vec![text_box(lines)]), "doc", 1).unwrap();

    assert_eq!(record.footnote.len(), 1);
    let b = record.footnote[0];
    assert!(b.x0 > 100.0);
    assert!(b.x1 < 560.0);
}

#[test]
fn marker_lines_do_not_skew_the_body_size() {
    // A sparse page: three tiny marker glyphs and two bold 12pt lines.
    // The body-size mode must come from the real text, so the bold lines
    // stay paragraphs instead of towering over a 1pt pivot as titles.
    let lines = vec![
        line_px("~", 700.0, 100.0, 703.0, 101.0, 1.0, "F"),
        line_px("&", 700.0, 300.0, 703.0, 301.0, 1.0, "F"),
        line_px("$", 700.0, 500.0, 703.0, 501.0, 1.0, "F"),
        line_px("жирный текст", 100.0, 400.0, 400.0, 414.0, 12.0, "Times-Bold"),
        line_px("ещё жирный текст", 100.0, 416.0, 420.0, 430.0, 12.0, "Times-Bold"),
    ];
    let record = annotator().annotate_page(&page(vec![text_box(lines)]), "doc", 1).unwrap();

    assert!(record.title.is_empty());
    assert_eq!(record.paragraph.len(), 1);
}

#[test]
fn landscape_page_widens_the_bands() {
    // Landscape 1000x800: footer band is the bottom 10%.
    let raw = RawPage {
        width: 1000.0,
        height: 800.0,
        nodes: vec![text_box(vec![
            RawLine {
                bbox: [400.0, 800.0 - 740.0, 500.0, 800.0 - 725.0],
                chars: "стр 2"
                    .chars()
                    .enumerate()
                    .map(|(i, c)| RawChar {
                        text: c.to_string(),
                        bbox: [400.0 + i as f32 * 10.0, 60.0, 410.0 + i as f32 * 10.0, 75.0],
                        size: 10.0,
                        font: "Times-Roman".to_string(),
                    })
                    .collect(),
            },
        ])],
    };
    let record = annotator().annotate_page(&raw, "doc", 1).unwrap();
    // Pixel y1 = 740 >= 0.90 * 800: footer on a landscape page, not on a
    // portrait one (threshold would be 760 there).
    assert_eq!(record.footer.len(), 1);
}
