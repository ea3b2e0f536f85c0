use eframe::egui;
use egui_plot::{Legend, Line, LineStyle, Plot};
use trendcast_core::domain::prediction::PredictionSeries;

pub const PRICE_COLOR: egui::Color32 = egui::Color32::from_rgb(46, 204, 113);
pub const TREND_COLOR: egui::Color32 = egui::Color32::from_rgb(231, 76, 60);

/// Points are placed by index so that several samples on the same day stay
/// in order instead of stacking on one x value.
pub fn price_points(series: &PredictionSeries) -> Vec<[f64; 2]> {
    indexed(&series.prices)
}

pub fn trend_points(series: &PredictionSeries) -> Vec<[f64; 2]> {
    indexed(&series.predictions)
}

fn indexed(values: &[f64]) -> Vec<[f64; 2]> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| [i as f64, *v])
        .collect()
}

/// Date label for an x grid mark; empty between samples or off the ends.
pub fn date_label(series: &PredictionSeries, x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    series
        .dates
        .get(rounded as usize)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn title(asset: &str) -> String {
    format!("{}: price and trend", asset.to_uppercase())
}

pub fn show(ui: &mut egui::Ui, asset: &str, series: &PredictionSeries) {
    ui.label(egui::RichText::new(title(asset)).size(18.0).strong());
    ui.add_space(6.0);

    let height = ui.available_height() - 20.0;
    let labels = series.clone();
    Plot::new(format!("chart_{asset}"))
        .height(height.max(300.0))
        .show_grid([true, true])
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Price (USD)")
        .x_axis_formatter(move |mark, _range| date_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new("Price", price_points(series))
                    .color(PRICE_COLOR)
                    .width(2.0),
            );
            plot_ui.line(
                Line::new("Trend", trend_points(series))
                    .color(TREND_COLOR)
                    .style(LineStyle::Dashed { length: 8.0 })
                    .width(1.5),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series() -> PredictionSeries {
        PredictionSeries {
            dates: vec![
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            ],
            prices: vec![10.0, 12.0, 11.0],
            predictions: vec![10.5, 11.0, 11.5],
        }
    }

    #[test]
    fn lines_share_the_index_axis() {
        let s = series();
        assert_eq!(price_points(&s), vec![[0.0, 10.0], [1.0, 12.0], [2.0, 11.0]]);
        assert_eq!(trend_points(&s), vec![[0.0, 10.5], [1.0, 11.0], [2.0, 11.5]]);
    }

    #[test]
    fn labels_only_land_on_samples() {
        let s = series();
        assert_eq!(date_label(&s, 2.0), "2026-01-02");
        assert_eq!(date_label(&s, 0.5), "");
        assert_eq!(date_label(&s, -1.0), "");
        assert_eq!(date_label(&s, 3.0), "");
    }

    #[test]
    fn title_uppercases_asset() {
        assert_eq!(title("shiba-inu"), "SHIBA-INU: price and trend");
    }
}
