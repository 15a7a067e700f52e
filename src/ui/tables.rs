use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::GroupTotal;
use crate::data::format::currency;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Ranking tables
// ---------------------------------------------------------------------------

/// Revenue by shop and by chain, side by side.
pub fn rankings(ui: &mut Ui, state: &AppState) {
    ui.columns(2, |cols| {
        cols[0].heading("Revenue by Coffee Shop");
        cols[0].push_id("rank_by_name", |ui| {
            ranking_table(ui, "Coffee Shop", &state.view.revenue_by_name);
        });
        cols[1].heading("Revenue by Chain");
        cols[1].push_id("rank_by_chain", |ui| {
            ranking_table(ui, "Chain", &state.view.revenue_by_chain);
        });
    });
}

fn ranking_table(ui: &mut Ui, key_title: &str, groups: &[GroupTotal]) {
    if groups.is_empty() {
        ui.label("No rows.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(32.0))
        .column(Column::remainder().at_least(120.0))
        .column(Column::auto().at_least(90.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong(key_title);
            });
            header.col(|ui| {
                ui.strong("Revenue ($)");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, groups.len(), |mut row| {
                let i = row.index();
                let group = &groups[i];
                row.col(|ui| {
                    ui.label((i + 1).to_string());
                });
                row.col(|ui| {
                    ui.label(&group.key);
                });
                row.col(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(currency(group.total));
                    });
                });
            });
        });
}
