use std::path::PathBuf;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DataPaths;
use crate::data::filter::{FilteredView, compute};
use crate::data::format::Scorecards;
use crate::data::loader::load_dashboard;
use crate::data::model::{DashboardData, WalkTimeSelection};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Something the user asked for. Widgets only emit events; [`AppState::handle`]
/// applies them one at a time after the frame is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Select(WalkTimeSelection),
    ShowTab(Tab),
    OpenDataDir(PathBuf),
    ExportCsv(PathBuf),
}

/// Which chart area is shown in the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Map,
    Revenue,
    MarketShare,
    TopFive,
    Rankings,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Map, Tab::Revenue, Tab::MarketShare, Tab::TopFive, Tab::Rankings];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Map => "Map",
            Tab::Revenue => "Revenue",
            Tab::MarketShare => "Market Share",
            Tab::TopFive => "Top 5",
            Tab::Rankings => "Rankings",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded data. Shared read-only; replaced wholesale on reload.
    pub data: Arc<DashboardData>,

    /// Folder `data` was loaded from.
    pub data_dir: PathBuf,

    /// Current walk-time selection.
    pub selection: WalkTimeSelection,

    /// Figures derived from `selection` (recomputed on every change).
    pub view: FilteredView,

    /// Display text for `view.summary`.
    pub scorecards: Scorecards,

    /// Colours for the top-5 shop names.
    pub name_colors: ColorMap,

    /// Colours for chains.
    pub chain_colors: ColorMap,

    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state for freshly loaded data.
    pub fn new(data: DashboardData, data_dir: PathBuf, selection: WalkTimeSelection) -> Self {
        let data = Arc::new(data);
        let view = compute(selection, &data.locations);
        let mut state = Self {
            scorecards: Scorecards::from_summary(&view.summary),
            name_colors: ColorMap::new(std::iter::empty::<&str>()),
            chain_colors: ColorMap::new(std::iter::empty::<&str>()),
            data,
            data_dir,
            selection,
            view,
            tab: Tab::default(),
            status_message: None,
        };
        state.rebuild_colors();
        state
    }

    /// Apply one event.
    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Select(selection) => self.select(selection),
            AppEvent::ShowTab(tab) => self.tab = tab,
            AppEvent::OpenDataDir(dir) => self.reload(dir),
            AppEvent::ExportCsv(path) => self.export(path),
        }
    }

    /// Recompute the view for a new walk-time selection.
    pub fn select(&mut self, selection: WalkTimeSelection) {
        log::info!("Walk time selection changed to '{}'", selection.value());
        self.selection = selection;
        self.view = compute(selection, &self.data.locations);
        self.scorecards = Scorecards::from_summary(&self.view.summary);
        self.rebuild_colors();
    }

    /// Load a different data folder. On failure the current data stays.
    pub fn reload(&mut self, dir: PathBuf) {
        match load_dashboard(&DataPaths::in_dir(&dir)) {
            Ok(data) => {
                log::info!(
                    "Reloaded {} locations from {}",
                    data.locations.len(),
                    dir.display()
                );
                self.data = Arc::new(data);
                self.data_dir = dir;
                self.status_message = None;
                self.select(self.selection);
            }
            Err(e) => {
                let e = anyhow::Error::from(e);
                log::error!("Failed to load data folder: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Write the current view's rows to a CSV file.
    pub fn export(&mut self, path: PathBuf) {
        match crate::export::export_csv(&path, &self.view, &self.data.locations) {
            Ok(n) => {
                log::info!("Exported {n} rows to {}", path.display());
                self.status_message = Some(format!("Exported {n} rows"));
            }
            Err(e) => {
                log::error!("CSV export failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    fn rebuild_colors(&mut self) {
        self.name_colors = ColorMap::new(self.view.top_names.iter().map(String::as_str));
        self.chain_colors = ColorMap::new(
            self.view
                .locations_by_chain
                .iter()
                .map(|g| g.key.as_str()),
        );
    }
}
