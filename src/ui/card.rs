use eframe::egui::{
    self, Align, Color32, Layout, Mesh, Painter, ProgressBar, Rect, RichText, Sense, Shape, Stroke,
    StrokeKind, Ui, UiBuilder, Vec2,
};

use crate::color::{self, TypeColors};
use crate::config::AppConfig;
use crate::data::model::Record;
use crate::state::{AppState, Display};

const CARD_SIZE: Vec2 = Vec2::new(360.0, 540.0);
const CARD_BORDER: Color32 = Color32::from_rgb(0xFF, 0xCB, 0x05);
const GRADIENT_BANDS: usize = 16;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render whatever the state wants in the central panel.
pub fn central_view(ui: &mut Ui, state: &AppState) {
    match &state.display {
        Display::Welcome => welcome(ui, state),
        Display::Message(msg) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(msg);
            });
        }
        Display::Card(record) => {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.add_space(24.0);
                card(ui, record, &state.config);
            });
        }
    }
}

fn welcome(ui: &mut Ui, state: &AppState) {
    ui.centered_and_justified(|ui: &mut Ui| {
        if state.store.is_empty() {
            ui.heading("No Pokemon data available");
        } else {
            ui.heading(format!(
                "Welcome to the Pokémon Card Collection!\n{} cards loaded",
                state.store.count()
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

/// Draw one trading card for `record`.
pub fn card(ui: &mut Ui, record: &Record, config: &AppConfig) {
    let colors = color::primary_colors(record);
    let text = color::text_color_on(colors.mid());

    let (rect, _) = ui.allocate_exact_size(CARD_SIZE, Sense::hover());
    paint_gradient(ui.painter(), rect, colors);
    ui.painter().rect_stroke(
        rect,
        0.0,
        Stroke::new(4.0, CARD_BORDER),
        StrokeKind::Inside,
    );

    let mut inner = ui.new_child(
        UiBuilder::new()
            .max_rect(rect.shrink(18.0))
            .layout(Layout::top_down(Align::Center)),
    );
    card_contents(&mut inner, record, config, text);
}

fn card_contents(ui: &mut Ui, record: &Record, config: &AppConfig, text: Color32) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(record.name()).size(26.0).strong().color(text));
        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
            ui.label(RichText::new(format!("#{:03}", record.id())).size(18.0).color(text));
        });
    });

    ui.horizontal(|ui: &mut Ui| {
        type_badge(ui, record.primary_type(), color::type_colors(record.primary_type()));
        if let Some(second) = record.secondary_type() {
            type_badge(ui, second, color::secondary_colors(record));
        }
    });
    ui.add_space(8.0);

    let image = config.image_path(record.name());
    if image.is_file() {
        ui.add(
            egui::Image::new(format!("file://{}", image.display()))
                .max_height(200.0)
                .max_width(ui.available_width()),
        );
    } else {
        ui.add_sized(
            [ui.available_width(), 200.0],
            egui::Label::new(RichText::new("No image").italics().color(text)),
        );
    }
    ui.add_space(8.0);

    ui.label(RichText::new(format!("Weight: {} kg", record.weight_kg())).color(text));
    ui.label(RichText::new(format!("Height: {} m", record.height_m())).color(text));
    ui.label(
        RichText::new(format!("Power Level: {:.1}", record.power_level()))
            .strong()
            .size(18.0)
            .color(text),
    );
    ui.add_space(8.0);

    stat_bar(ui, "Attack", record.attack(), Color32::from_rgb(0xE5, 0x39, 0x35));
    stat_bar(ui, "Defense", record.defense(), Color32::from_rgb(0x1E, 0x88, 0xE5));
    stat_bar(ui, "Stamina", record.stamina(), Color32::from_rgb(0x43, 0xA0, 0x47));
}

fn type_badge(ui: &mut Ui, tag: &str, colors: TypeColors) {
    let fill = colors.mid();
    egui::Frame::default()
        .fill(fill)
        .inner_margin(6.0)
        .show(ui, |ui: &mut Ui| {
            ui.label(
                RichText::new(tag.to_uppercase())
                    .strong()
                    .color(color::text_color_on(fill)),
            );
        });
}

fn stat_bar(ui: &mut Ui, label: &str, value: f64, fill: Color32) {
    // Bars saturate at 1.0; the label still shows the raw value.
    let shown = (value * 100.0) as i64;
    ui.add(
        ProgressBar::new(value.clamp(0.0, 1.0) as f32)
            .text(format!("{label}: {shown}"))
            .fill(fill)
            .desired_width(ui.available_width()),
    );
}

/// Fill `rect` with a top-to-bottom gradient built from horizontal bands.
fn paint_gradient(painter: &Painter, rect: Rect, colors: TypeColors) {
    let mut mesh = Mesh::default();
    for i in 0..=GRADIENT_BANDS {
        let t = i as f32 / GRADIENT_BANDS as f32;
        let y = rect.top() + rect.height() * t;
        let c = colors.at(t);
        mesh.colored_vertex(egui::pos2(rect.left(), y), c);
        mesh.colored_vertex(egui::pos2(rect.right(), y), c);
    }
    for i in 0..GRADIENT_BANDS as u32 {
        let tl = 2 * i;
        let (tr, bl, br) = (tl + 1, tl + 2, tl + 3);
        mesh.add_triangle(tl, tr, bl);
        mesh.add_triangle(tr, br, bl);
    }
    painter.add(Shape::mesh(mesh));
}
