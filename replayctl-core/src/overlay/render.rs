//! Overlay image synthesis.
//!
//! Builds the transparent RGBA pixmap matching the video frame, fills the
//! rounded badge rectangle, rasterizes the caption glyphs on top of it, and
//! writes the result as a PNG. The file is staged and renamed into place so
//! a failure leaves no partial image at the destination.

use crate::error::{CoreError, CoreResult};
use crate::external::VideoDimensions;
use crate::overlay::layout::{self, BadgeLayout, TextSize, BADGE_CORNER_RADIUS};
use crate::temp_files;
use cosmic_text::{
    fontdb, Attrs, Buffer, Color as TextColor, Family, FontSystem, Metrics, Shaping, SwashCache,
    Weight,
};
use std::fmt;
use std::io::Write;
use std::path::Path;
use tiny_skia::{FillRule, Paint, Path as SkiaPath, PathBuilder, Pixmap, PremultipliedColorU8, Transform};

/// Badge fill: solid near-black, fully opaque.
const BADGE_FILL_RGB: (u8, u8, u8) = (0x20, 0x20, 0x20);

/// Line box height relative to the font size. Covers the ascent and descent
/// of common monospace faces so the badge height matches the glyphs.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// A font loaded from an explicit file path, isolated from the system font
/// database, together with the shaping and rasterization caches.
pub struct FontStore {
    font_system: FontSystem,
    swash_cache: SwashCache,
    family_name: String,
}

// FontSystem is not Debug, so this cannot be derived.
impl fmt::Debug for FontStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontStore")
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl FontStore {
    /// Loads the caption font from `font_path`. The database contains only
    /// this file, so shaping can never silently substitute a system font.
    pub fn load(font_path: &Path) -> CoreResult<Self> {
        let mut db = fontdb::Database::new();
        db.load_font_file(font_path).map_err(|e| {
            CoreError::FontLoad(format!(
                "could not read font file {}: {e}",
                font_path.display()
            ))
        })?;

        let family_name = db
            .faces()
            .next()
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| {
                CoreError::FontLoad(format!(
                    "no usable font faces in {}",
                    font_path.display()
                ))
            })?;

        log::debug!(
            "Loaded caption font '{family_name}' from {}",
            font_path.display()
        );

        Ok(Self {
            font_system: FontSystem::new_with_locale_and_db("en-US".to_string(), db),
            swash_cache: SwashCache::new(),
            family_name,
        })
    }

    /// Shapes `text` at `font_size` and returns the laid-out width and line
    /// box height.
    pub fn measure_text(&mut self, text: &str, font_size: u32) -> TextSize {
        let buffer = self.shape(text, font_size);
        let mut width = 0f32;
        let mut height = 0f32;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            height += run.line_height;
        }
        TextSize {
            width: width.ceil() as u32,
            height: height.ceil() as u32,
        }
    }

    /// Rasterizes `text` into `pixmap` with its top-left at (origin_x,
    /// origin_y), clipping to the pixmap bounds.
    fn draw_text(
        &mut self,
        pixmap: &mut Pixmap,
        text: &str,
        font_size: u32,
        origin_x: i32,
        origin_y: i32,
        color: TextColor,
    ) {
        let buffer = self.shape(text, font_size);
        let width = pixmap.width() as i32;
        let height = pixmap.height() as i32;

        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            color,
            |x, y, w, h, c| {
                if c.a() == 0 {
                    return;
                }
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        let px = origin_x + x + dx;
                        let py = origin_y + y + dy;
                        if px < 0 || py < 0 || px >= width || py >= height {
                            continue;
                        }
                        let idx = (py * width + px) as usize;
                        blend_pixel(pixmap.pixels_mut(), idx, c.r(), c.g(), c.b(), c.a());
                    }
                }
            },
        );
    }

    fn shape(&mut self, text: &str, font_size: u32) -> Buffer {
        let line_height = (font_size as f32 * LINE_HEIGHT_FACTOR).ceil();
        let metrics = Metrics::new(font_size as f32, line_height);
        let family = self.family_name.clone();
        let attrs = Attrs::new()
            .family(Family::Name(&family))
            .weight(Weight::BOLD);

        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }
}

/// Produces the transparent badge+text overlay for a video of `dims` and
/// writes it to `output_path` as a PNG, replacing any existing file.
pub fn render_overlay_png(
    font: &mut FontStore,
    dims: VideoDimensions,
    text: &str,
    output_path: &Path,
) -> CoreResult<()> {
    let font_size = layout::font_size_for_height(dims.height);
    if font_size == 0 {
        return Err(CoreError::Layout(format!(
            "frame height {} is too small to render a caption",
            dims.height
        )));
    }

    let text_size = font.measure_text(text, font_size);
    let badge = BadgeLayout::compute(dims, text_size);
    log::debug!(
        "Caption '{text}' at {font_size}px measures {}x{}, badge {:?}",
        text_size.width,
        text_size.height,
        badge
    );

    let mut pixmap = Pixmap::new(dims.width, dims.height).ok_or_else(|| {
        CoreError::ImageEncode(format!(
            "invalid overlay dimensions {}x{}",
            dims.width, dims.height
        ))
    })?;

    if let Some(path) = rounded_rect_path(&badge) {
        let mut paint = Paint::default();
        paint.set_color_rgba8(BADGE_FILL_RGB.0, BADGE_FILL_RGB.1, BADGE_FILL_RGB.2, 0xff);
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    font.draw_text(
        &mut pixmap,
        text,
        font_size,
        badge.anchor_x,
        badge.anchor_y,
        TextColor::rgba(0xff, 0xff, 0xff, 0xff),
    );

    let png = pixmap
        .encode_png()
        .map_err(|e| CoreError::ImageEncode(format!("PNG encoding failed: {e}")))?;

    let staging_dir = temp_files::staging_dir_for(output_path);
    let mut staging = temp_files::create_staging_file(staging_dir, "overlay", "png")?;
    staging
        .write_all(&png)
        .map_err(|e| CoreError::ImageEncode(format!("writing overlay image failed: {e}")))?;
    staging.persist(output_path).map_err(|e| {
        CoreError::ImageEncode(format!(
            "could not move overlay image into place at {}: {}",
            output_path.display(),
            e.error
        ))
    })?;

    log::info!("Saved overlay image to {}", output_path.display());
    Ok(())
}

/// The badge outline as a rounded-rectangle path, or `None` for a degenerate
/// rectangle.
fn rounded_rect_path(badge: &BadgeLayout) -> Option<SkiaPath> {
    let (x0, y0) = (badge.rect_left as f32, badge.rect_top as f32);
    let (x1, y1) = (badge.rect_right as f32, badge.rect_bottom as f32);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    let r = BADGE_CORNER_RADIUS
        .min((x1 - x0) / 2.0)
        .min((y1 - y0) / 2.0);

    let mut pb = PathBuilder::new();
    pb.move_to(x0 + r, y0);
    pb.line_to(x1 - r, y0);
    pb.quad_to(x1, y0, x1, y0 + r);
    pb.line_to(x1, y1 - r);
    pb.quad_to(x1, y1, x1 - r, y1);
    pb.line_to(x0 + r, y1);
    pb.quad_to(x0, y1, x0, y1 - r);
    pb.line_to(x0, y0 + r);
    pb.quad_to(x0, y0, x0 + r, y0);
    pb.close();
    pb.finish()
}

/// Source-over blend of a straight-alpha color onto one premultiplied pixel.
fn blend_pixel(pixels: &mut [PremultipliedColorU8], idx: usize, r: u8, g: u8, b: u8, a: u8) {
    let sa = a as u32;
    let inv = 255 - sa;
    let dst = pixels[idx];

    let na = (sa + dst.alpha() as u32 * inv / 255).min(255) as u8;
    let nr = ((r as u32 * sa / 255) + dst.red() as u32 * inv / 255).min(na as u32) as u8;
    let ng = ((g as u32 * sa / 255) + dst.green() as u32 * inv / 255).min(na as u32) as u8;
    let nb = ((b as u32 * sa / 255) + dst.blue() as u32 * inv / 255).min(na as u32) as u8;

    if let Some(c) = PremultipliedColorU8::from_rgba(nr, ng, nb, na) {
        pixels[idx] = c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_a_missing_font_is_a_font_load_error() {
        let err = FontStore::load(Path::new("/no/such/font.ttf")).unwrap_err();
        assert!(matches!(err, CoreError::FontLoad(_)));
    }

    #[test]
    fn loading_a_non_font_file_is_a_font_load_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a font").unwrap();
        let err = FontStore::load(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::FontLoad(_)));
    }

    // The remaining tests need a real font; they bail out quietly on
    // machines without the default DejaVu install.
    fn default_font() -> Option<&'static Path> {
        let path = Path::new(crate::config::DEFAULT_FONT_PATH);
        path.is_file().then_some(path)
    }

    #[test]
    fn rendered_overlay_matches_badge_geometry() {
        let Some(font_path) = default_font() else {
            return;
        };
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("overlay.png");
        let dims = VideoDimensions {
            width: 1920,
            height: 1080,
        };
        let mut font = FontStore::load(font_path).expect("font loads");

        render_overlay_png(&mut font, dims, "2024-01-01", &out).expect("renders");

        let pixmap = Pixmap::load_png(&out).expect("png decodes");
        assert_eq!((pixmap.width(), pixmap.height()), (1920, 1080));

        let text_size = font.measure_text("2024-01-01", 24);
        let badge = BadgeLayout::compute(dims, text_size);

        // Fully transparent away from the badge.
        assert_eq!(pixmap.pixel(1919, 0).expect("pixel").alpha(), 0);
        assert_eq!(pixmap.pixel(100, 540).expect("pixel").alpha(), 0);

        // Opaque #202020 fill inside the badge, left of the glyphs.
        let inside = pixmap
            .pixel(1, (badge.rect_top + 2) as u32)
            .expect("pixel");
        assert_eq!(inside.alpha(), 255);
        assert_eq!(inside.red(), 0x20);
        assert_eq!(inside.green(), 0x20);
        assert_eq!(inside.blue(), 0x20);

        // Near-white glyph ink somewhere in the text box.
        let mut ink = false;
        for y in badge.anchor_y..badge.rect_bottom.min(1080) {
            for x in badge.anchor_x..badge.rect_right.min(1920) {
                if let Some(p) = pixmap.pixel(x as u32, y as u32) {
                    if p.red() > 0x80 {
                        ink = true;
                    }
                }
            }
        }
        assert!(ink, "no glyph ink found inside the badge");
    }

    #[test]
    fn tiny_frames_cannot_carry_a_caption() {
        let Some(font_path) = default_font() else {
            return;
        };
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("overlay.png");
        let mut font = FontStore::load(font_path).expect("font loads");

        let dims = VideoDimensions {
            width: 64,
            height: 30,
        };
        let err = render_overlay_png(&mut font, dims, "x", &out).unwrap_err();
        assert!(matches!(err, CoreError::Layout(_)));
        assert!(!out.exists());
    }

    #[test]
    fn degenerate_badge_produces_no_path() {
        let badge = BadgeLayout {
            anchor_x: 0,
            anchor_y: 0,
            rect_left: 5,
            rect_top: 5,
            rect_right: 5,
            rect_bottom: 5,
        };
        assert!(rounded_rect_path(&badge).is_none());
    }

    #[test]
    fn blending_opaque_source_replaces_destination() {
        let mut pixels = vec![PremultipliedColorU8::from_rgba(0, 0, 0, 0).unwrap()];
        blend_pixel(&mut pixels, 0, 255, 255, 255, 255);
        assert_eq!(pixels[0].alpha(), 255);
        assert_eq!(pixels[0].red(), 255);
    }
}
