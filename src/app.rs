use std::time::Instant;

use eframe::egui;

use crate::audio::MusicManager;
use crate::state::AppState;
use crate::ui::{card, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PokeCardApp {
    pub state: AppState,
    pub music: MusicManager,
}

impl PokeCardApp {
    pub fn new(state: AppState, music: MusicManager) -> Self {
        Self { state, music }
    }
}

impl eframe::App for PokeCardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Slideshow timer ----
        if let Some(wait) = self.state.tick(Instant::now()) {
            ctx.request_repaint_after(wait);
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: menu ----
        egui::SidePanel::left("menu_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::menu_panel(ui, &mut self.state, &mut self.music);
            });

        // ---- Central panel: card ----
        egui::CentralPanel::default().show(ctx, |ui| {
            card::central_view(ui, &self.state);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.stop_slideshow();
        self.music.dispose();
    }
}
