use eframe::egui;

use crate::data::model::{DashboardData, WalkTimeSelection};
use crate::state::{AppEvent, AppState, Tab};
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CafeWalkApp {
    pub state: AppState,
}

impl CafeWalkApp {
    pub fn new(
        data: DashboardData,
        data_dir: std::path::PathBuf,
        selection: WalkTimeSelection,
    ) -> Self {
        Self {
            state: AppState::new(data, data_dir, selection),
        }
    }
}

impl eframe::App for CafeWalkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events: Vec<AppEvent> = Vec::new();

        // ---- Top panel: menu bar and tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &mut events);
        });

        // ---- Left side panel: walk time and scorecards ----
        egui::SidePanel::left("scorecard_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state, &mut events);
            });

        // ---- Central panel: map / charts / tables ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.tab {
            Tab::Map => plot::map_plot(ui, &self.state),
            Tab::Revenue => plot::revenue_bar_chart(ui, &self.state),
            Tab::MarketShare => plot::market_share(ui, &self.state),
            Tab::TopFive => plot::top_five(ui, &self.state),
            Tab::Rankings => tables::rankings(ui, &self.state),
        });

        // One event at a time, after drawing.
        for event in events {
            self.state.handle(event);
        }
    }
}
