#![allow(dead_code)]

use std::io::Cursor;

use flipbook::{AnimationManager, FrameLayout, FrameSize, Template, TemplateRegistry};

/// Distinct opaque fill color for frame `i` of a fixture.
pub fn frame_color(i: u32) -> [u8; 4] {
    [
        (10 + i * 37) as u8,
        (60 + i * 23) as u8,
        (120 + i * 11) as u8,
        255,
    ]
}

fn encode_png(img: image::RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// PNG bytes of a one-row strip: `frame_count` frames of `fw` x `fh`, frame
/// `i` filled with `frame_color(i)`.
pub fn strip_png(frame_count: u32, fw: u32, fh: u32) -> Vec<u8> {
    let mut img = image::RgbaImage::new(fw * frame_count, fh);
    for (x, _, px) in img.enumerate_pixels_mut() {
        *px = image::Rgba(frame_color(x / fw));
    }
    encode_png(img)
}

/// PNG bytes of an `across` x `down` sheet, cell `i` (row-major) filled with
/// `frame_color(i)`.
pub fn sheet_png(across: u32, down: u32, fw: u32, fh: u32) -> Vec<u8> {
    let mut img = image::RgbaImage::new(fw * across, fh * down);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = image::Rgba(frame_color((y / fh) * across + x / fw));
    }
    encode_png(img)
}

/// A strip-layout template with per-frame fixture colors.
pub fn strip_template(name: &str, frame_count: u32, fw: u32, fh: u32) -> Template {
    Template::from_encoded(
        name,
        strip_png(frame_count, fw, fh),
        FrameSize::new(fw, fh).unwrap(),
        FrameLayout::Strip { frame_count },
    )
    .unwrap()
}

/// A registry holding one strip template under `name`.
pub fn registry_with(name: &str, frame_count: u32, fw: u32, fh: u32) -> TemplateRegistry {
    let mut registry = TemplateRegistry::new();
    assert!(registry.register(name, strip_template(name, frame_count, fw, fh)));
    registry
}

/// A manager over a registry holding one strip template under `name`.
pub fn manager_with(name: &str, frame_count: u32, fw: u32, fh: u32) -> AnimationManager {
    AnimationManager::new(registry_with(name, frame_count, fw, fh))
}
