mod app;
mod audio;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::PokeCardApp;
use audio::MusicManager;
use config::AppConfig;
use data::loader::DirResources;
use data::store::RecordStore;
use eframe::egui;
use state::AppState;

const THEME_TRACK: &str = "pokemon_theme";

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::error!("{e:#}; using default configuration");
        AppConfig::default()
    });

    let store = RecordStore::initialize(&DirResources::new(&config.assets_dir), &config.data_file);

    let mut music = MusicManager::with_default_backend(config.music_volume);
    if music.load_music(THEME_TRACK, &config.music_path()) {
        music.play(THEME_TRACK);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([720.0, 600.0]),
        ..Default::default()
    };

    let state = AppState::new(store, config);

    eframe::run_native(
        "PokéCard – Pokémon Card Collection",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render png/gif card art.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(PokeCardApp::new(state, music)))
        }),
    )
}
