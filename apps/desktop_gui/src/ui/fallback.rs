//! Loading and error screens shown while the bootstrap gate is not ready.
//! Pure decision-to-pixels rendering: no state, no side effects.

use eframe::egui;

pub fn show_loading(ui: &mut egui::Ui) {
    vertically_centered(ui, |ui| {
        ui.add(egui::Spinner::new().size(28.0));
        ui.add_space(10.0);
        ui.weak("Starting Driftline...");
    });
}

pub fn show_error(ui: &mut egui::Ui, message: &str) {
    vertically_centered(ui, |ui| {
        ui.label(
            egui::RichText::new(message)
                .color(ui.visuals().error_fg_color)
                .strong()
                .size(16.0),
        );
    });
}

fn vertically_centered(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    let top_space = (ui.available_height() * 0.4).max(48.0);
    ui.add_space(top_space);
    ui.vertical_centered(add_contents);
}
