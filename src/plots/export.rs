//! Vector output: figures are drawn through the SVG backend and converted
//! to a single-page PDF.

use std::error::Error;

use svg2pdf::usvg;

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options)?;
    let pdf = svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|err| format!("svg to pdf conversion failed: {err:?}"))?;
    Ok(pdf)
}
