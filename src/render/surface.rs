use kurbo::{BezPath, Point, Shape, Stroke, StrokeOpts};

use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{ShutterboxError, ShutterboxResult};
use crate::paint::color::ColorDef;
use crate::paint::gradient::Gradient;

const STROKE_TOLERANCE: f64 = 0.25;

/// Offscreen render target: a premultiplied RGBA8 pixel buffer.
///
/// This is the "graphics layer" the accumulation pass records into: it can
/// be drawn to repeatedly and composited onto another surface once per frame.
/// All drawing uses source-over blending in premultiplied space.
#[derive(Debug)]
pub struct Surface {
    canvas: Canvas,
    data: Vec<u8>,
}

impl Surface {
    pub fn new(canvas: Canvas) -> ShutterboxResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(ShutterboxError::validation(
                "surface dimensions must be non-zero",
            ));
        }
        let len = (canvas.width as usize)
            .checked_mul(canvas.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ShutterboxError::render("surface buffer size overflow"))?;
        Ok(Self {
            canvas,
            data: vec![0u8; len],
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Overwrites every pixel with `color` (no blending).
    pub fn fill_solid(&mut self, color: ColorDef) {
        let px = color.to_rgba8_premul();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[px.r, px.g, px.b, px.a]);
        }
    }

    /// Overwrites the surface with a top-to-bottom sweep of `gradient`.
    pub fn fill_vertical_gradient(&mut self, gradient: &Gradient) {
        let h = self.canvas.height;
        let w = self.canvas.width as usize;
        let denom = (h.saturating_sub(1)).max(1) as f64;
        for y in 0..h {
            let px = gradient.color_at(f64::from(y) / denom).to_rgba8_premul();
            let row = &mut self.data[(y as usize) * w * 4..(y as usize + 1) * w * 4];
            for chunk in row.chunks_exact_mut(4) {
                chunk.copy_from_slice(&[px.r, px.g, px.b, px.a]);
            }
        }
    }

    /// Draws a filled disc with analytic edge coverage.
    pub fn fill_disc(&mut self, center: Point, radius: f64, color: ColorDef) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }

        let w = self.canvas.width as i64;
        let h = self.canvas.height as i64;
        let x0 = ((center.x - radius - 1.0).floor() as i64).clamp(0, w);
        let x1 = ((center.x + radius + 1.0).ceil() as i64).clamp(0, w);
        let y0 = ((center.y - radius - 1.0).floor() as i64).clamp(0, h);
        let y1 = ((center.y + radius + 1.0).ceil() as i64).clamp(0, h);

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = (x as f64 + 0.5) - center.x;
                let dy = (y as f64 + 0.5) - center.y;
                let coverage = (radius - dx.hypot(dy) + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let src = color.with_alpha(color.a * coverage).to_rgba8_premul();
                    self.blend_pixel(x as u32, y as u32, src);
                }
            }
        }
    }

    /// Fills `path` (non-zero winding) with `color`.
    pub fn fill_path(&mut self, path: &BezPath, color: ColorDef) {
        if color.a <= 0.0 {
            return;
        }
        let src = color.to_rgba8_premul();

        let bbox = path.bounding_box();
        let w = self.canvas.width as i64;
        let h = self.canvas.height as i64;
        let x0 = (bbox.x0.floor() as i64).clamp(0, w);
        let x1 = (bbox.x1.ceil() as i64).clamp(0, w);
        let y0 = (bbox.y0.floor() as i64).clamp(0, h);
        let y1 = (bbox.y1.ceil() as i64).clamp(0, h);

        for y in y0..y1 {
            for x in x0..x1 {
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if path.winding(p) != 0 {
                    self.blend_pixel(x as u32, y as u32, src);
                }
            }
        }
    }

    /// Strokes the outline of `path` with the given width.
    pub fn stroke_path(&mut self, path: &BezPath, width: f64, color: ColorDef) {
        if width <= 0.0 {
            return;
        }
        let outline = kurbo::stroke(
            path.elements().iter().copied(),
            &Stroke::new(width),
            &StrokeOpts::default(),
            STROKE_TOLERANCE,
        );
        self.fill_path(&outline, color);
    }

    /// Composites `src` over this surface with its top-left corner at
    /// `(left, top)`; pixels falling outside the target are clipped.
    pub fn blit_over(&mut self, src: &Surface, left: u32, top: u32) {
        let dst_w = self.canvas.width as u64;
        let dst_h = self.canvas.height as u64;
        for sy in 0..src.canvas.height {
            let dy = u64::from(top) + u64::from(sy);
            if dy >= dst_h {
                break;
            }
            for sx in 0..src.canvas.width {
                let dx = u64::from(left) + u64::from(sx);
                if dx >= dst_w {
                    break;
                }
                let i = ((sy as usize) * src.canvas.width as usize + sx as usize) * 4;
                let px = Rgba8Premul {
                    r: src.data[i],
                    g: src.data[i + 1],
                    b: src.data[i + 2],
                    a: src.data[i + 3],
                };
                if px.a != 0 || px.r != 0 || px.g != 0 || px.b != 0 {
                    self.blend_pixel(dx as u32, dy as u32, px);
                }
            }
        }
    }

    /// Scales every channel by `factor` in `[0, 1]` (fade support).
    pub fn scale_alpha(&mut self, factor: f64) {
        let f = ((factor.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16;
        if f == 255 {
            return;
        }
        for byte in self.data.iter_mut() {
            *byte = mul_div255(u16::from(*byte), f);
        }
    }

    /// Converts the buffer to straight (non-premultiplied) RGBA8 for export.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for chunk in self.data.chunks_exact(4) {
            let a = chunk[3];
            if a == 0 {
                out.extend_from_slice(&[0, 0, 0, 0]);
            } else {
                let unpremul =
                    |c: u8| (((u16::from(c) * 255) + u16::from(a) / 2) / u16::from(a)).min(255) as u8;
                out.extend_from_slice(&[unpremul(chunk[0]), unpremul(chunk[1]), unpremul(chunk[2]), a]);
            }
        }
        out
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        let i = self.pixel_index(x, y);
        Rgba8Premul {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        }
    }

    fn pixel_index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.canvas.width && y < self.canvas.height);
        ((y as usize) * self.canvas.width as usize + x as usize) * 4
    }

    fn blend_pixel(&mut self, x: u32, y: u32, src: Rgba8Premul) {
        let i = self.pixel_index(x, y);
        let dst = Rgba8Premul {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        };
        let out = over(dst, src);
        self.data[i] = out.r;
        self.data[i + 1] = out.g;
        self.data[i + 2] = out.b;
        self.data[i + 3] = out.a;
    }
}

/// Source-over in premultiplied space: `out = src + dst * (1 - src.a)`.
pub fn over(dst: Rgba8Premul, src: Rgba8Premul) -> Rgba8Premul {
    if src.a == 0 && src.r == 0 && src.g == 0 && src.b == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src.a);
    Rgba8Premul {
        r: src.r.saturating_add(mul_div255(u16::from(dst.r), inv)),
        g: src.g.saturating_add(mul_div255(u16::from(dst.g), inv)),
        b: src.b.saturating_add(mul_div255(u16::from(dst.b), inv)),
        a: src.a.saturating_add(mul_div255(u16::from(dst.a), inv)),
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
