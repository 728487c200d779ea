use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Hue of the first series; later series step evenly around the wheel.
const BASE_HUE: f32 = 210.0;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (BASE_HUE + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours: series name → Color32
// ---------------------------------------------------------------------------

/// Assigns each bar series of a chart its own colour, in series order.
#[derive(Debug, Clone)]
pub struct SeriesColors {
    colors: Vec<Color32>,
}

impl SeriesColors {
    pub fn new(n_series: usize) -> Self {
        SeriesColors {
            colors: generate_palette(n_series),
        }
    }

    pub fn color_for(&self, series: usize) -> Color32 {
        self.colors.get(series).copied().unwrap_or(Color32::GRAY)
    }
}
