use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct `#rrggbb` colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}
