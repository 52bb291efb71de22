//! PNG export

use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::{ChartError, ChartResult};

/// Rasterize an SVG document at the pixel size of its `width`/`height`
pub(crate) fn rasterize(svg: &str, font_family: &str) -> ChartResult<Vec<u8>> {
    let mut options = Options::default();
    options.font_family = font_family.to_string();
    options.fontdb_mut().load_system_fonts();

    let tree = Tree::from_str(svg, &options)
        .map_err(|err| ChartError::Raster(format!("invalid SVG: {}", err)))?;

    let size = tree.size().to_int_size();
    let mut pixmap = Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        ChartError::Raster(format!(
            "cannot allocate a {}x{} image",
            size.width(),
            size.height()
        ))
    })?;
    pixmap.fill(Color::WHITE);

    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
    log::debug!("rasterized chart at {}x{} px", size.width(), size.height());

    pixmap
        .encode_png()
        .map_err(|err| ChartError::Raster(err.to_string()))
}
