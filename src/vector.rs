//! Textual vector document emission.
//!
//! Builds a deterministic, byte-stable XML-ish document with a strict
//! back-to-front layer order, using `std::fmt::Write` in place of
//! repeated `String::push_str` chains.

use std::fmt::Write as _;

use crate::cells::{FrameElement, Ray};
use crate::color::sample::ColoredCell;
use crate::geometry::Rect;
use crate::lighting::glow::GlowElement;
use crate::settings::Settings;

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

fn write_polygon_points(out: &mut String, polygon: &[crate::geometry::Point]) {
    for (i, p) in polygon.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:.3},{:.3}", p.x, p.y);
    }
}

fn write_ray_polygon(out: &mut String, ray: &Ray) {
    let (dx, dy) = (ray.direction_radians.cos(), ray.direction_radians.sin());
    let (nx, ny) = (-dy, dx);
    let half_w0 = ray.base_width / 2.0;
    let tip_width = ray.base_width * 2.5;
    let half_w1 = tip_width / 2.0;
    let tip_x = ray.origin.x + dx * ray.length;
    let tip_y = ray.origin.y + dy * ray.length;
    let p0 = (ray.origin.x + nx * half_w0, ray.origin.y + ny * half_w0);
    let p1 = (ray.origin.x - nx * half_w0, ray.origin.y - ny * half_w0);
    let p2 = (tip_x - nx * half_w1, tip_y - ny * half_w1);
    let p3 = (tip_x + nx * half_w1, tip_y + ny * half_w1);
    let _ = write!(
        out,
        "{:.3},{:.3} {:.3},{:.3} {:.3},{:.3} {:.3},{:.3}",
        p0.0, p0.1, p1.0, p1.1, p2.0, p2.1, p3.0, p3.1
    );
}

/// Writes the shared `<defs>` block: lighting filters (if enabled) and
/// the artwork clip path (if a frame occupies part of the canvas).
/// Omits the block entirely when neither is needed.
fn write_defs(out: &mut String, settings: &Settings, artwork_clip: Option<Rect>) {
    let needs_filters = settings.lighting.enabled && (settings.lighting.rays.enabled || settings.lighting.glow.enabled);
    if !needs_filters && artwork_clip.is_none() {
        return;
    }
    out.push_str("<defs>");
    if settings.lighting.enabled {
        if settings.lighting.rays.enabled {
            out.push_str("<filter id=\"ray-blur\"><feGaussianBlur stdDeviation=\"1.5\"/></filter>");
        }
        if settings.lighting.glow.enabled {
            let sigma = crate::lighting::glow::filter_sigma(&settings.lighting);
            let _ = write!(
                out,
                "<filter id=\"glow-blur\"><feGaussianBlur stdDeviation=\"{sigma:.3}\"/></filter>"
            );
        }
    }
    if let Some(rect) = artwork_clip {
        let _ = write!(
            out,
            "<clipPath id=\"artwork-clip\"><rect x=\"{:.3}\" y=\"{:.3}\" width=\"{:.3}\" height=\"{:.3}\"/></clipPath>",
            rect.min_x(),
            rect.min_y(),
            rect.size.width,
            rect.size.height
        );
    }
    out.push_str("</defs>");
}

fn write_ray_layer(out: &mut String, id: &str, rays: &[Ray], blend: &str) {
    if rays.is_empty() {
        return;
    }
    let _ = write!(out, "<g id=\"{id}\" filter=\"url(#ray-blur)\" style=\"mix-blend-mode:{blend}\">");
    for ray in rays {
        out.push_str("<polygon points=\"");
        write_ray_polygon(out, ray);
        let _ = write!(out, "\" fill=\"{}\" fill-opacity=\"{:.3}\"/>", ray.color.to_hex(), ray.opacity);
    }
    out.push_str("</g>");
}

/// Assembles the complete vector document. Deterministic given
/// deterministic inputs: no wall-clock timestamps, no hash-map-ordered
/// iteration.
pub fn emit(
    width: u32,
    height: u32,
    settings: &Settings,
    frame: &[FrameElement],
    inner: Rect,
    cells: &[ColoredCell],
    back_rays: &[Ray],
    front_rays: &[Ray],
    glow: &[GlowElement],
) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {width} {height}\">"
    );

    let artwork_clip = if frame.is_empty() { None } else { Some(inner) };
    write_defs(&mut out, settings, artwork_clip);

    let background = if settings.lighting.enabled && settings.lighting.dark_mode {
        "#1a1a1a"
    } else {
        "#ffffff"
    };
    let _ = write!(
        out,
        "<rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{background}\"/>"
    );

    write_ray_layer(&mut out, "back-rays", back_rays, "screen");

    if !frame.is_empty() {
        out.push_str("<g id=\"frame\">");
        for element in frame {
            out.push_str("<polygon points=\"");
            write_polygon_points(&mut out, &element.polygon);
            let _ = write!(out, "\" fill=\"{}\"/>", element.color.to_hex());
        }
        out.push_str("</g>");
    }

    if artwork_clip.is_some() {
        out.push_str("<g id=\"artwork\" clip-path=\"url(#artwork-clip)\">");
    } else {
        out.push_str("<g id=\"artwork\">");
    }
    for cell in cells {
        out.push_str("<path d=\"M");
        for (i, p) in cell.polygon.iter().enumerate() {
            if i > 0 {
                out.push('L');
            }
            let _ = write!(out, "{:.3},{:.3}", p.x, p.y);
        }
        out.push_str(" Z\" ");
        let _ = write!(
            out,
            "fill=\"{}\" stroke=\"{}\" stroke-width=\"{:.3}\" stroke-linejoin=\"round\"/>",
            cell.color.to_hex(),
            escape_attr(&settings.line_color.to_hex()),
            settings.line_width
        );
    }
    out.push_str("</g>");

    let front_blend = if settings.lighting.dark_mode { "screen" } else { "soft-light" };
    write_ray_layer(&mut out, "front-rays", front_rays, front_blend);

    if !glow.is_empty() {
        let blend = if settings.lighting.dark_mode { "screen" } else { "multiply" };
        let opacity = crate::lighting::glow::layer_opacity(&settings.lighting);
        let _ = write!(
            out,
            "<g id=\"glow\" filter=\"url(#glow-blur)\" style=\"mix-blend-mode:{blend}\" opacity=\"{opacity:.3}\">"
        );
        for element in glow {
            out.push_str("<polygon points=\"");
            write_polygon_points(&mut out, &element.polygon);
            let _ = write!(out, "\" fill=\"{}\"/>", element.color.to_hex());
        }
        out.push_str("</g>");
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rgb};

    fn full_image_rect(width: f64, height: f64) -> Rect {
        Rect::new(Point::new(0.0, 0.0), crate::geometry::Size::new(width, height))
    }

    #[test]
    fn solid_color_document_has_no_frame_or_filters() {
        let settings = Settings::default();
        let cells = vec![ColoredCell {
            index: 0,
            polygon: vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 4.0), Point::new(0.0, 4.0)],
            centroid: Point::new(2.0, 2.0),
            color: Rgb::new(255, 0, 0),
        }];
        let doc = emit(4, 4, &settings, &[], full_image_rect(4.0, 4.0), &cells, &[], &[], &[]);
        assert!(doc.contains("viewBox=\"0 0 4 4\""));
        assert!(doc.contains("#ff0000"));
        assert!(!doc.contains("<defs>"));
        assert!(!doc.contains("id=\"frame\""));
    }

    #[test]
    fn document_layer_order_is_back_rays_frame_artwork_front_rays_glow() {
        let settings = Settings { lighting: crate::settings::LightSettings { enabled: true, ..Default::default() }, ..Settings::default() };
        let cells = vec![ColoredCell { index: 0, polygon: vec![], centroid: Point::new(0.0, 0.0), color: Rgb::new(1, 2, 3) }];
        let ray = Ray { origin: Point::new(0.0, 0.0), direction_radians: 0.0, color: Rgb::new(9, 9, 9), opacity: 0.5, base_width: 1.0, length: 5.0 };
        let glow = vec![crate::lighting::glow::GlowElement { polygon: vec![], color: Rgb::new(5, 5, 5) }];
        let doc = emit(10, 10, &settings, &[], full_image_rect(10.0, 10.0), &cells, &[ray], &[ray], &glow);

        let back = doc.find("id=\"back-rays\"").unwrap();
        let artwork = doc.find("id=\"artwork\"").unwrap();
        let front = doc.find("id=\"front-rays\"").unwrap();
        let glow_idx = doc.find("id=\"glow\"").unwrap();
        assert!(back < artwork);
        assert!(artwork < front);
        assert!(front < glow_idx);
    }

    #[test]
    fn framed_artwork_clips_to_the_inner_rectangle() {
        let settings = Settings::default();
        let frame = vec![FrameElement { polygon: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 2.0), Point::new(0.0, 2.0)], color: Rgb::new(10, 10, 10) }];
        let cells = vec![ColoredCell { index: 0, polygon: vec![], centroid: Point::new(5.0, 5.0), color: Rgb::new(1, 2, 3) }];
        let inner = Rect::new(Point::new(2.0, 2.0), crate::geometry::Size::new(6.0, 6.0));
        let doc = emit(10, 10, &settings, &frame, inner, &cells, &[], &[], &[]);
        assert!(doc.contains("<clipPath id=\"artwork-clip\">"));
        assert!(doc.contains("clip-path=\"url(#artwork-clip)\""));
        assert!(doc.contains("width=\"6.000\" height=\"6.000\""));
    }
}

// end of file
