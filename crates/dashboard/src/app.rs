use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::chart;
use crate::client::{ClientError, PredictionClient};
use crate::state::{Dashboard, LoadOutcome, LoadPlan, LoadState, ASSETS};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(78, 154, 6);
const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(255, 85, 85);
const STATUS_LOADING: egui::Color32 = egui::Color32::from_rgb(250, 204, 21);
const STATUS_IDLE: egui::Color32 = egui::Color32::from_gray(170);
const BG_DARK: egui::Color32 = egui::Color32::from_rgb(10, 10, 10);

pub struct DashboardApp {
    dashboard: Dashboard,
    selected: Option<String>,
    client: Arc<PredictionClient>,
    outcome_tx: Sender<LoadOutcome>,
    outcome_rx: Receiver<LoadOutcome>,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        client: PredictionClient,
        initial_asset: Option<String>,
    ) -> Self {
        apply_theme(&cc.egui_ctx);

        let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded();
        let mut app = Self {
            dashboard: Dashboard::new(),
            selected: None,
            client: Arc::new(client),
            outcome_tx,
            outcome_rx,
        };

        if let Some(asset) = initial_asset {
            app.selected = Some(asset);
            app.start_load(&cc.egui_ctx, false);
        }
        app
    }

    fn start_load(&mut self, ctx: &egui::Context, bypass_cache: bool) {
        let Some(asset) = self.selected.clone() else {
            return;
        };

        let generation = match self.dashboard.begin_load(&asset, bypass_cache) {
            LoadPlan::Cached => {
                tracing::debug!(%asset, "rendering from client cache");
                return;
            }
            LoadPlan::Fetch { generation } => generation,
        };

        tracing::info!(%asset, generation, service = self.client.base_url(), "loading prediction");

        let client = Arc::clone(&self.client);
        let tx = self.outcome_tx.clone();
        let repaint = ctx.clone();
        let worker_asset = asset.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("load-{asset}"))
            .spawn(move || {
                let result = client.fetch_prediction(&worker_asset);
                let _ = tx.send(LoadOutcome {
                    generation,
                    asset: worker_asset,
                    result,
                });
                repaint.request_repaint();
            });

        if let Err(err) = spawned {
            self.dashboard.complete(LoadOutcome {
                generation,
                asset,
                result: Err(ClientError::Transport(format!(
                    "failed to spawn worker thread: {err}"
                ))),
            });
        }
    }

    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.dashboard.complete(outcome);
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        let mut picked = false;
        let mut refresh = false;

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Crypto Dashboard").size(20.0).strong());
            ui.separator();

            let selected_text = self.selected.as_deref().unwrap_or("Select asset").to_string();
            egui::ComboBox::from_id_salt("asset_picker")
                .selected_text(selected_text)
                .width(200.0)
                .show_ui(ui, |ui| {
                    for asset in ASSETS {
                        let response =
                            ui.selectable_value(&mut self.selected, Some(asset.to_string()), asset);
                        if response.clicked() {
                            picked = true;
                        }
                    }
                });

            let refresh_button = egui::Button::new("Refresh").stroke(egui::Stroke::new(1.5, ACCENT));
            if ui
                .add_enabled(self.selected.is_some(), refresh_button)
                .clicked()
            {
                refresh = true;
            }

            if self.dashboard.is_loading() {
                ui.spinner();
            }
        });

        if picked || refresh {
            self.start_load(ui.ctx(), refresh);
        }
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        let (text, color) = status_line(self.dashboard.state());
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(text).color(color).size(13.0));
        });
    }

    fn render_body(&self, ui: &mut egui::Ui) {
        match self.dashboard.state() {
            LoadState::Rendered { asset, series } => chart::show(ui, asset, series),
            _ => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("No chart yet")
                            .italics()
                            .color(STATUS_IDLE),
                    );
                });
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_outcomes();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            self.render_header(ui);
            ui.add_space(8.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_status(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_body(ui);
        });
    }
}

/// Caption and color for the status bar.
pub fn status_line(state: &LoadState) -> (String, egui::Color32) {
    match state {
        LoadState::Idle => ("Select a cryptocurrency".to_string(), STATUS_IDLE),
        LoadState::Loading { asset } => (
            format!("Loading {}...", asset.to_uppercase()),
            STATUS_LOADING,
        ),
        LoadState::Rendered { asset, series } => {
            let range = match (series.dates.first(), series.dates.last()) {
                (Some(first), Some(last)) => format!(", {first} to {last}"),
                _ => String::new(),
            };
            (
                format!("{}: {} points{range}", asset.to_uppercase(), series.len()),
                ACCENT,
            )
        }
        LoadState::Error { message, .. } => (format!("Error: {message}"), STATUS_ERROR),
    }
}

fn apply_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = BG_DARK;
    visuals.panel_fill = BG_DARK;
    visuals.selection.bg_fill = ACCENT.linear_multiply(0.6);
    visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);
    ctx.set_visuals(visuals);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use trendcast_core::domain::prediction::PredictionSeries;

    #[test]
    fn status_reflects_each_state() {
        assert_eq!(status_line(&LoadState::Idle).0, "Select a cryptocurrency");
        assert_eq!(
            status_line(&LoadState::Loading {
                asset: "bitcoin".to_string()
            })
            .0,
            "Loading BITCOIN..."
        );
        assert_eq!(
            status_line(&LoadState::Error {
                asset: "bitcoin".to_string(),
                message: "cannot reach prediction service: connection refused".to_string(),
            }),
            (
                "Error: cannot reach prediction service: connection refused".to_string(),
                STATUS_ERROR
            )
        );

        let series = PredictionSeries {
            dates: vec![
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 1, 30).unwrap(),
            ],
            prices: vec![1.0, 2.0],
            predictions: vec![1.0, 2.0],
        };
        assert_eq!(
            status_line(&LoadState::Rendered {
                asset: "solana".to_string(),
                series: Arc::new(series),
            })
            .0,
            "SOLANA: 2 points, 2026-01-01 to 2026-01-30"
        );
    }
}
