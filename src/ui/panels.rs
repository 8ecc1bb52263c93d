use std::time::Instant;

use eframe::egui::{self, Color32, Key, RichText, ScrollArea, Ui};

use crate::audio::MusicManager;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – menu
// ---------------------------------------------------------------------------

/// Render the menu panel: search, remove, random, slideshow, music, quit.
pub fn menu_panel(ui: &mut Ui, state: &mut AppState, music: &mut MusicManager) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(8.0);
        ui.heading(RichText::new("Pokémon Cards").size(28.0).strong());
        ui.label(format!("{} in the collection", state.store.count()));
    });
    ui.add_space(12.0);

    // ---- Search ----
    ui.strong("Search Pokemon");
    ui.horizontal(|ui: &mut Ui| {
        let field = ui.text_edit_singleline(&mut state.search_text);
        let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        if ui.button("Search").clicked() || submitted {
            state.search();
        }
    });
    ui.add_space(8.0);

    // ---- Remove ----
    ui.strong("Remove Pokemon");
    ui.horizontal(|ui: &mut Ui| {
        let field = ui.text_edit_singleline(&mut state.remove_text);
        let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        if ui.button("Remove").clicked() || submitted {
            state.remove();
        }
    });
    ui.separator();

    // ---- Cards ----
    ui.vertical_centered_justified(|ui: &mut Ui| {
        if ui.button("View Random Pokemon").clicked() {
            state.view_random();
        }

        let label = if state.slideshow_running() {
            "Stop Slideshow"
        } else {
            "Start Slideshow"
        };
        if ui.button(label).clicked() {
            state.toggle_slideshow(Instant::now());
        }
    });
    ui.separator();

    // ---- Music ----
    music_controls(ui, music);
    ui.separator();

    load_report(ui, state);
    ui.separator();

    ui.vertical_centered_justified(|ui: &mut Ui| {
        if ui.button(RichText::new("Quit").color(Color32::RED)).clicked() {
            state.stop_slideshow();
            music.dispose();
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn music_controls(ui: &mut Ui, music: &mut MusicManager) {
    ui.strong("Music");
    track_list(ui, music);
    if music.current_track().is_none() {
        ui.label("No music playing");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let play_label = if music.is_playing() { "Pause" } else { "Play" };
        if ui.button(play_label).clicked() {
            music.toggle_pause();
        }
        let mute_label = if music.is_muted() { "Unmute" } else { "Mute" };
        if ui.button(mute_label).clicked() {
            music.toggle_mute();
        }
    });

    let mut volume = music.volume();
    if ui
        .add(egui::Slider::new(&mut volume, 0.0..=1.0).text("Volume"))
        .changed()
    {
        music.set_volume(volume);
    }
}

/// Registered tracks, each with play and unload buttons.
fn track_list(ui: &mut Ui, music: &mut MusicManager) {
    let tracks: Vec<String> = music.loaded_tracks().into_iter().map(str::to_string).collect();
    for track in tracks {
        ui.horizontal(|ui: &mut Ui| {
            let current = music.current_track() == Some(track.as_str());
            ui.label(RichText::new(&track).strong().color(if current {
                Color32::LIGHT_GREEN
            } else {
                ui.visuals().text_color()
            }));
            if !current && ui.small_button("Play").clicked() {
                music.play(&track);
            }
            if ui.small_button("Unload").clicked() {
                music.remove_track(&track);
            }
        });
    }
}

/// Diagnostics of the load that built the store.
fn load_report(ui: &mut Ui, state: &AppState) {
    let report = state.store.report();
    egui::CollapsingHeader::new(RichText::new("Load report").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if report.resource_missing {
                ui.label(
                    RichText::new(format!("{} not found", report.resource)).color(Color32::RED),
                );
            }
            ui.label(report.summary());
            ScrollArea::vertical()
                .max_height(160.0)
                .show(ui, |ui: &mut Ui| {
                    for detail in &report.skipped_details {
                        ui.small(detail);
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!("{} Pokemon loaded", state.store.count()));

        ui.separator();

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open Pokemon list")
        .add_filter("CSV", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}
