//! Bundled font registration for the rendering backend.
//!
//! The raster and vector backends measure (and the raster backend draws) text
//! through fonts registered by family name. DejaVu Sans is compiled in and
//! registered as the `sans-serif` family so rendering never depends on the
//! fonts installed on the host.

use plotters::style::{register_font, FontStyle};
use std::sync::LazyLock;

use super::base::FONT_FAMILY;
use crate::error::{LabError, LabResult};

static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

static REGISTERED: LazyLock<Result<(), String>> = LazyLock::new(|| {
    register_font(FONT_FAMILY, FontStyle::Normal, DEJAVU_SANS)
        .map_err(|_| "bundled DejaVu Sans could not be parsed".to_string())?;
    tracing::debug!(family = FONT_FAMILY, "registered bundled chart font");
    Ok(())
});

/// Register the bundled font once per process
pub fn ensure_fonts() -> LabResult<()> {
    (*REGISTERED).clone().map_err(LabError::Font)
}
