// src/app.rs
//
// Front end egui (feature `gui`)
// ------------------------------
// - etat.rs : état de l’afficheur, sans vue ni noyau
// - vue.rs  : widgets, appel du noyau
// Ici : impl eframe::App seulement.

pub mod etat;
pub mod vue;

pub use etat::AppSymbolique;

use eframe::egui;

impl eframe::App for AppSymbolique {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = effacer seulement l’entrée (comme le bouton "C").
        // Enter est géré par la vue (champ de saisie).
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_entree();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
