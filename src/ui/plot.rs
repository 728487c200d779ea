use eframe::egui::{self, epaint::TextShape, Align2, FontId, Pos2, Sense, Ui, Vec2};
use egui_plot::{Bar, BarChart, Corner, Legend, Plot, PlotPoint};

use crate::chart::{bar_offsets, Chart, ChartData};
use crate::color::SeriesColors;

const TICK_FONT_SIZE: f32 = 12.0;
const AXIS_FONT_SIZE: f32 = 14.0;
const LABEL_PADDING: f32 = 6.0;

// ---------------------------------------------------------------------------
// Rotated tick labels
// ---------------------------------------------------------------------------

/// Height of the bounding box of a `size` label rotated by `degrees`.
pub fn rotated_height(size: Vec2, degrees: f32) -> f32 {
    let a = degrees.to_radians();
    size.x * a.sin().abs() + size.y * a.cos().abs()
}

/// Where to put the unrotated top-left corner of a label so that, after
/// rotating it `degrees` counter-clockwise about that corner, its bounding
/// box is centred on `anchor.x` and starts at `anchor.y`.
pub fn rotated_label_origin(size: Vec2, degrees: f32, anchor: Pos2) -> Pos2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let corners = [(0.0, 0.0), (size.x, 0.0), (0.0, size.y), (size.x, size.y)];
    let rotated = corners.map(|(x, y)| (x * cos + y * sin, -x * sin + y * cos));

    let min_x = rotated.iter().map(|p| p.0).fold(f32::INFINITY, f32::min);
    let max_x = rotated.iter().map(|p| p.0).fold(f32::NEG_INFINITY, f32::max);
    let min_y = rotated.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);

    Pos2::new(anchor.x - (min_x + max_x) / 2.0, anchor.y - min_y)
}

// ---------------------------------------------------------------------------
// Bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render one chart: title, bars, rotated x tick labels, axis captions.
pub fn bar_chart(ui: &mut Ui, chart: &Chart) {
    let style = &chart.style;
    let text_color = ui.visuals().text_color();

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&style.title);
        if let Some(legend_title) = &style.legend_title {
            ui.weak(legend_title);
        }
    });

    let categories = chart.data.categories();
    let series = chart.data.series();
    let colors = SeriesColors::new(series.len());
    let offsets = bar_offsets(series.len(), style.bar_width);

    let tick_font = FontId::proportional(TICK_FONT_SIZE);
    let galleys: Vec<_> = categories
        .iter()
        .map(|c| ui.painter().layout_no_wrap(c.clone(), tick_font.clone(), text_color))
        .collect();
    let tick_band = galleys
        .iter()
        .map(|g| rotated_height(g.size(), style.rotation))
        .fold(0.0, f32::max);
    let band_height = tick_band + AXIS_FONT_SIZE + 3.0 * LABEL_PADDING;

    let mut plot = Plot::new(("bar_chart", &style.title))
        .height((ui.available_height() - band_height).max(100.0))
        .y_axis_label(style.y_label.clone())
        .show_axes([false, true])
        .show_grid([false, true])
        .include_x(-0.5)
        .include_x(categories.len() as f64 - 0.5)
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if matches!(chart.data, ChartData::Grouped(_)) {
        plot = plot.legend(Legend::default().position(Corner::RightTop));
    }

    let response = plot.show(ui, |plot_ui| {
        for (i, s) in series.iter().enumerate() {
            let (offset, width) = offsets[i];
            let bars: Vec<Bar> = s
                .heights
                .iter()
                .zip(&categories)
                .enumerate()
                .map(|(slot, (&h, name))| Bar::new(slot as f64 + offset, h).width(width).name(name))
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).name(&s.name).color(colors.color_for(i)));
        }
    });

    // Tick labels and the x caption live in a band under the plot frame.
    let plot_rect = response.response.rect;
    let (band, _) = ui.allocate_exact_size(egui::vec2(plot_rect.width(), band_height), Sense::hover());
    let painter = ui.painter_at(band);
    let angle = -style.rotation.to_radians();
    for (slot, galley) in galleys.into_iter().enumerate() {
        let tick = response
            .transform
            .position_from_point(&PlotPoint::new(slot as f64, 0.0));
        let anchor = Pos2::new(tick.x, band.top() + LABEL_PADDING);
        let origin = rotated_label_origin(galley.size(), style.rotation, anchor);
        painter.add(TextShape::new(origin, galley, text_color).with_angle(angle));
    }
    painter.text(
        Pos2::new(plot_rect.center().x, band.bottom() - LABEL_PADDING),
        Align2::CENTER_BOTTOM,
        &style.x_label,
        FontId::proportional(AXIS_FONT_SIZE),
        text_color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Pos2, b: Pos2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn unrotated_label_is_centred_below_tick() {
        let origin = rotated_label_origin(Vec2::new(40.0, 10.0), 0.0, Pos2::new(100.0, 50.0));
        assert!(close(origin, Pos2::new(80.0, 50.0)));
        assert!((rotated_height(Vec2::new(40.0, 10.0), 0.0) - 10.0).abs() < 1e-3);
    }

    #[test]
    fn vertical_label_hangs_from_anchor() {
        let size = Vec2::new(40.0, 10.0);
        let origin = rotated_label_origin(size, 90.0, Pos2::new(100.0, 50.0));
        // Text reads upwards, so its start sits at the bottom of the band.
        assert!(close(origin, Pos2::new(95.0, 90.0)));
        assert!((rotated_height(size, 90.0) - 40.0).abs() < 1e-3);
    }

    #[test]
    fn diagonal_label_height() {
        let h = rotated_height(Vec2::new(40.0, 10.0), 45.0);
        assert!((h - 50.0 * std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-3);
    }
}
