// src/app/vue.rs
//
// Vue (UI egui) : une saisie, des réglages, trois panneaux de sortie.
// - Enter (ou "Convertir") lance la conversion
// - précision / espacement modifiés : la dernière saisie est reconvertie
// - la vue ne calcule rien : elle appelle eval_expression et range le résultat

use eframe::egui;
use log::debug;

use nombre_symbolique::noyau::config::PRECISION_MAX;

use super::etat::AppSymbolique;

/// (libellé du bouton, texte ajouté à la saisie)
const SYMBOLES: [(&str, &str); 10] = [
    ("π", "π"),
    ("e", "e"),
    ("φ", "φ"),
    ("√", "√("),
    ("∛", "∛("),
    ("sin", "sin("),
    ("cos", "cos("),
    ("tan", "tan("),
    ("ln", "ln("),
    ("exp", "exp("),
];

impl AppSymbolique {
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Nombre symbolique");
        ui.add_space(4.0);

        self.ui_saisie(ui);
        self.ui_reglages(ui);

        ui.separator();
        self.ui_sorties(ui);

        ui.separator();
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| self.ui_demarche(ui));
    }

    fn ui_saisie(&mut self, ui: &mut egui::Ui) {
        let champ = egui::TextEdit::singleline(&mut self.entree)
            .hint_text("sqrt(50), 12*cos(pi/6), 2*pi+1, 345/456")
            .font(egui::TextStyle::Monospace)
            .desired_width(f32::INFINITY);
        let resp = ui.add(champ);

        if std::mem::take(&mut self.focus_entree) {
            resp.request_focus();
        }
        // un singleline perd le focus sur Enter
        if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.convertir();
        }

        ui.horizontal_wrapped(|ui| {
            for (libelle, texte) in SYMBOLES {
                if ui.button(libelle).clicked() {
                    self.entree.push_str(texte);
                    self.focus_entree = true;
                }
            }
        });

        ui.horizontal(|ui| {
            if ui.button("Convertir").clicked() {
                self.convertir();
            }
            if ui.button("C").on_hover_text("Efface la saisie").clicked() {
                self.clear_entree();
            }
            if ui.button("CLR").on_hover_text("Efface les résultats").clicked() {
                self.clear_resultats();
            }
            if ui.button("AC").on_hover_text("Tout remettre à zéro").clicked() {
                self.reset_total();
            }
        });

        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_reglages(&mut self, ui: &mut egui::Ui) {
        let mut relancer = false;

        ui.horizontal(|ui| {
            let mut precision = self.precision;
            ui.label("Décimales :");
            if ui
                .add(egui::DragValue::new(&mut precision).range(0..=PRECISION_MAX))
                .changed()
            {
                self.set_precision(precision);
                relancer = true;
            }
            relancer |= ui.checkbox(&mut self.espacement, "Espacement").changed();
        });

        if relancer && !self.exact.is_empty() && !self.entree.trim().is_empty() {
            self.convertir();
        }
    }

    fn ui_sorties(&self, ui: &mut egui::Ui) {
        egui::Grid::new("sorties")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.strong("EXACT");
                ui.label(egui::RichText::new(&self.exact).monospace().size(20.0));
                ui.end_row();

                ui.strong("Lecture décimale");
                ui.monospace(&self.lecture);
                ui.end_row();
            });
    }

    fn ui_demarche(&self, ui: &mut egui::Ui) {
        let d = &self.demarche;
        let lignes = [
            ("Jetons", &d.jetons),
            ("RPN", &d.rpn),
            ("Reconnaisseur", &d.etape),
            ("Arbre brut", &d.avant),
            ("Arbre simplifié", &d.apres),
        ];

        egui::Grid::new("demarche").num_columns(2).striped(true).show(ui, |ui| {
            for (titre, contenu) in lignes {
                ui.label(titre);
                ui.monospace(contenu.as_str());
                ui.end_row();
            }
        });
        if !d.note.is_empty() {
            ui.small(&d.note);
        }
    }

    fn convertir(&mut self) {
        let cfg = self.config();
        match nombre_symbolique::eval_expression(&self.entree, &cfg) {
            Ok((exact, lecture, demarche)) => {
                debug!("« {} » -> {exact}", self.entree.trim());
                self.set_resultats(exact, lecture, demarche);
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
    }
}
