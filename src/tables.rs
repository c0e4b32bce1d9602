//! Table region detection.
//!
//! The classifier never looks inside tables: every element overlapping a
//! detected table box is removed from the working sequence first, so cell
//! contents cannot be double-labeled as paragraphs or titles.
//!
//! Detection itself sits behind the [`TableFinder`] trait. The built-in
//! [`GridTableFinder`] finds ruled tables from vector line intersections;
//! callers with a smarter external detector can plug it in through the
//! same seam.

use crate::model::{BBox, Element, ElementKind, PageLayout};

/// Source of table bounding boxes for a page.
pub trait TableFinder {
    /// Detect zero or more table regions on the page, in pixel space.
    fn find_tables(&self, page: &PageLayout) -> Vec<BBox>;
}

/// Configuration for [`GridTableFinder`].
#[derive(Debug, Clone)]
pub struct GridTableFinderConfig {
    /// Minimum ruling length to count as a table line, pixels
    pub min_line_len: f32,
    /// Aspect ratio above which a vector box counts as a ruling
    pub axis_ratio: f32,
    /// How far apart rulings may be and still join, pixels
    pub join_tolerance: f32,
}

impl Default for GridTableFinderConfig {
    fn default() -> Self {
        Self {
            min_line_len: 40.0,
            axis_ratio: 5.0,
            join_tolerance: 10.0,
        }
    }
}

/// Line-intersection table finder.
///
/// Groups the page's horizontal and vertical rulings into connected
/// clusters; a cluster whose rulings cross often enough to form at least
/// one closed cell becomes a table box spanning the whole cluster.
#[derive(Debug, Default)]
pub struct GridTableFinder {
    config: GridTableFinderConfig,
}

/// A ruling segment with its axis.
#[derive(Debug, Clone, Copy)]
struct Ruling {
    bbox: BBox,
    horizontal: bool,
}

impl GridTableFinder {
    /// Create a finder with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a finder with custom thresholds.
    pub fn with_config(config: GridTableFinderConfig) -> Self {
        Self { config }
    }

    fn rulings(&self, page: &PageLayout) -> Vec<Ruling> {
        let mut rulings = Vec::new();
        for element in &page.elements {
            if element.kind != ElementKind::Vector {
                continue;
            }
            let b = element.bbox;
            let (w, h) = (b.width(), b.height());
            if w >= h.max(0.1) * self.config.axis_ratio && w >= self.config.min_line_len {
                rulings.push(Ruling { bbox: b, horizontal: true });
            } else if h >= w.max(0.1) * self.config.axis_ratio && h >= self.config.min_line_len {
                rulings.push(Ruling { bbox: b, horizontal: false });
            }
        }
        rulings
    }

    fn touches(&self, a: &BBox, b: &BBox) -> bool {
        let t = self.config.join_tolerance;
        let grown = BBox::new(a.x0 - t, a.y0 - t, a.x1 + t, a.y1 + t);
        grown.overlaps(b)
    }
}

impl TableFinder for GridTableFinder {
    fn find_tables(&self, page: &PageLayout) -> Vec<BBox> {
        let rulings = self.rulings(page);
        if rulings.len() < 4 {
            return Vec::new();
        }
        log::debug!("GridTableFinder: {} candidate rulings", rulings.len());

        // Connected components over the touch graph, by worklist.
        let mut visited = vec![false; rulings.len()];
        let mut tables = Vec::new();

        for start in 0..rulings.len() {
            if visited[start] {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = vec![start];
            visited[start] = true;
            while let Some(i) = queue.pop() {
                component.push(i);
                for j in 0..rulings.len() {
                    if !visited[j] && self.touches(&rulings[i].bbox, &rulings[j].bbox) {
                        visited[j] = true;
                        queue.push(j);
                    }
                }
            }

            let horizontals: Vec<_> =
                component.iter().filter(|&&i| rulings[i].horizontal).collect();
            let verticals: Vec<_> =
                component.iter().filter(|&&i| !rulings[i].horizontal).collect();

            // A closed cell needs two rulings per axis, all crossing.
            if horizontals.len() < 2 || verticals.len() < 2 {
                continue;
            }
            let mut crossings = 0;
            for &&h in &horizontals {
                for &&v in &verticals {
                    if self.touches(&rulings[h].bbox, &rulings[v].bbox) {
                        crossings += 1;
                    }
                }
            }
            if crossings < 4 {
                log::debug!("GridTableFinder: cluster rejected, {} crossings", crossings);
                continue;
            }

            let mut bbox = rulings[component[0]].bbox;
            for &i in &component[1..] {
                bbox.expand(&rulings[i].bbox);
            }
            log::debug!(
                "GridTableFinder: table at ({:.0},{:.0})-({:.0},{:.0}), {}x{} rulings",
                bbox.x0,
                bbox.y0,
                bbox.x1,
                bbox.y1,
                horizontals.len(),
                verticals.len()
            );
            tables.push(bbox);
        }

        tables
    }
}

/// Drop every element whose box overlaps a table region.
pub fn exclude_table_elements(elements: Vec<Element>, tables: &[BBox]) -> Vec<Element> {
    if tables.is_empty() {
        return elements;
    }
    elements
        .into_iter()
        .filter(|e| !tables.iter().any(|t| e.bbox.overlaps(t)))
        .collect()
}
