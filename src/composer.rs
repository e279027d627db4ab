//! Builds the single-page test document.
//!
//! The page is written with `pdf-writer` as a catalog, a one-page tree, the page itself
//! and a single uncompressed content stream holding the four filled rectangles.

use crate::error::AppError;
use crate::layout::{BarGroup, BarSpec, PageSize};
use pdf_writer::{Content, Finish, Pdf, Rect, Ref, TextStr};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const DOCUMENT_TITLE: &str = "CMYK nozzle exerciser";

/// Places a bar group at random on `page_size` and writes the document to `output_path`.
///
/// The file is overwritten if it already exists. Returns `output_path` unchanged.
///
/// # Errors
///
/// Returns an error if the bars do not fit on the page or the file cannot be written.
pub fn compose<R: Rng + ?Sized>(
    output_path: &Path,
    page_size: PageSize,
    bar_width_mm: f64,
    bar_height_mm: f64,
    rng: &mut R,
) -> Result<PathBuf, AppError> {
    let spec = BarSpec::new(bar_width_mm, bar_height_mm)?;
    let group = BarGroup::place(page_size, spec, rng)?;
    debug!(
        page = page_size.name(),
        x = group.placement.x,
        y = group.placement.y,
        "placed bar group"
    );

    let bytes = render(&group);
    fs::write(output_path, &bytes).map_err(|source| AppError::ArtifactWrite {
        path: output_path.to_path_buf(),
        source,
    })?;
    debug!(path = %output_path.display(), bytes = bytes.len(), "wrote test page");

    Ok(output_path.to_path_buf())
}

/// Serializes a placed bar group into a complete PDF document.
pub fn render(group: &BarGroup) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let content_id = Ref::new(4);
    let info_id = Ref::new(5);

    let (page_width, page_height) = group.page.dimensions();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, page_width as f32, page_height as f32));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.finish();

    pdf.stream(content_id, &draw_bars(group));

    let producer = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));
    pdf.document_info(info_id)
        .title(TextStr(DOCUMENT_TITLE))
        .creator(TextStr(producer))
        .producer(TextStr(producer));

    pdf.finish()
}

/// Fill-only rectangles, one DeviceCMYK fill color per bar.
fn draw_bars(group: &BarGroup) -> Vec<u8> {
    let mut content = Content::new();
    for bar in &group.bars {
        let (c, m, y, k) = bar.ink.cmyk();
        content.set_fill_cmyk(c, m, y, k);
        content.rect(
            bar.x as f32,
            bar.y as f32,
            bar.width as f32,
            bar.height as f32,
        );
        content.fill_nonzero();
    }
    content.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Ink, Placement};
    use lopdf::content::Content as PageContent;
    use lopdf::{Document, Object};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Inspected {
        page_count: usize,
        media_box: Vec<f32>,
        fills: Vec<([f32; 4], [f32; 4])>,
        strokes: usize,
    }

    fn floats(operands: &[Object]) -> Vec<f32> {
        operands.iter().map(|o| o.as_float().unwrap()).collect()
    }

    fn inspect(bytes: &[u8]) -> Inspected {
        let doc = Document::load_mem(bytes).unwrap();
        let pages = doc.get_pages();
        let page_id = *pages.values().next().unwrap();

        let media_box = floats(
            doc.get_dictionary(page_id)
                .unwrap()
                .get(b"MediaBox")
                .unwrap()
                .as_array()
                .unwrap(),
        );

        let content = PageContent::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        let mut fills = Vec::new();
        let mut color = [0.0; 4];
        let mut rect = [0.0; 4];
        let mut strokes = 0;
        for op in &content.operations {
            match op.operator.as_str() {
                "k" => color.copy_from_slice(&floats(&op.operands)),
                "re" => rect.copy_from_slice(&floats(&op.operands)),
                "f" => fills.push((color, rect)),
                "S" | "s" | "B" | "b" => strokes += 1,
                _ => {}
            }
        }

        Inspected {
            page_count: pages.len(),
            media_box,
            fills,
            strokes,
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn document_has_one_page_with_four_cmyk_bars() {
        let spec = BarSpec::new(7.0, 40.0).unwrap();
        let group = BarGroup::at(PageSize::A4, spec, Placement { x: 100.0, y: 200.0 });
        let doc = inspect(&render(&group));

        assert_eq!(doc.page_count, 1);
        assert_eq!(doc.fills.len(), 4);
        assert_eq!(doc.strokes, 0);

        for ((color, rect), ink) in doc.fills.iter().zip(Ink::ORDER) {
            let (c, m, y, k) = ink.cmyk();
            assert_eq!(*color, [c, m, y, k]);
            assert!(close(rect[1], 200.0));
            assert!(close(rect[2], spec.bar_width_pt() as f32));
            assert!(close(rect[3], spec.bar_height_pt() as f32));
        }

        assert!(close(doc.fills[0].1[0], 100.0));
        for pair in doc.fills.windows(2) {
            let (_, left) = pair[0];
            let (_, right) = pair[1];
            assert!(close(left[0] + left[2], right[0]));
        }
    }

    #[test]
    fn media_box_matches_page_size() {
        let spec = BarSpec::new(7.0, 40.0).unwrap();
        for page in [PageSize::A4, PageSize::Letter] {
            let group = BarGroup::at(page, spec, Placement { x: 0.0, y: 0.0 });
            let doc = inspect(&render(&group));
            let (w, h) = page.dimensions();

            assert_eq!(doc.media_box.len(), 4);
            assert!(close(doc.media_box[0], 0.0));
            assert!(close(doc.media_box[1], 0.0));
            assert!(close(doc.media_box[2], w as f32));
            assert!(close(doc.media_box[3], h as f32));
        }
    }

    #[test]
    fn compose_writes_and_returns_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.pdf");
        let mut rng = StdRng::seed_from_u64(11);

        let returned = compose(&path, PageSize::Letter, 7.0, 40.0, &mut rng).unwrap();

        assert_eq!(returned, path);
        let doc = inspect(&fs::read(&path).unwrap());
        assert_eq!(doc.page_count, 1);
        assert_eq!(doc.fills.len(), 4);
    }

    #[test]
    fn composing_twice_overwrites_with_a_fresh_placement() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.pdf");
        let mut rng = StdRng::seed_from_u64(5);

        compose(&path, PageSize::A4, 7.0, 40.0, &mut rng).unwrap();
        let first = inspect(&fs::read(&path).unwrap());
        compose(&path, PageSize::A4, 7.0, 40.0, &mut rng).unwrap();
        let second = inspect(&fs::read(&path).unwrap());

        assert_eq!(second.page_count, 1);
        assert_eq!(second.fills.len(), 4);
        assert_ne!(first.fills[0].1, second.fills[0].1);
    }

    #[test]
    fn unwritable_path_is_an_artifact_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("page.pdf");
        let mut rng = StdRng::seed_from_u64(1);

        let err = compose(&path, PageSize::A4, 7.0, 40.0, &mut rng).unwrap_err();
        assert!(matches!(err, AppError::ArtifactWrite { .. }));
    }

    #[test]
    fn oversized_bars_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.pdf");
        let mut rng = StdRng::seed_from_u64(1);

        let err = compose(&path, PageSize::A4, 1000.0, 40.0, &mut rng).unwrap_err();
        assert!(matches!(err, AppError::BarGroupExceedsPage { .. }));
        assert!(!path.exists());
    }
}
