//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de l’afficheur (saisie, forme exacte, lecture décimale,
//! erreur, démarche, réglages) et offrir des opérations simples (C/CLR/AC).
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Précision bornée par PRECISION_MAX (comme ConfigPartielle::resoudre).

use nombre_symbolique::noyau::config::{Config, PRECISION_DEFAUT, PRECISION_MAX};
use nombre_symbolique::DemarcheNoyau;

#[derive(Clone, Debug)]
pub struct AppSymbolique {
    // --- saisie ---
    pub entree: String,

    // --- sorties ---
    pub exact: String,   // forme symbolique
    pub lecture: String, // lecture décimale à `precision` décimales
    pub erreur: String,  // message d’erreur de lecture

    // --- démarche (panneau d’explication) ---
    pub demarche: DemarcheNoyau,

    // --- réglages ---
    pub precision: usize,
    pub espacement: bool,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à la saisie après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppSymbolique {
    fn default() -> Self {
        Self {
            entree: String::new(),
            exact: String::new(),
            lecture: String::new(),
            erreur: String::new(),
            demarche: DemarcheNoyau::default(),
            precision: PRECISION_DEFAUT,
            espacement: false,
            focus_entree: true,
        }
    }
}

impl AppSymbolique {
    /// Config de conversion issue des réglages.
    pub fn config(&self) -> Config {
        Config {
            espacement: self.espacement,
            precision: self.precision,
            ..Config::default()
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (saisie + résultats + réglages par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.precision = PRECISION_DEFAUT;
        self.espacement = false;
    }

    /// C : effacer seulement la saisie.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à la saisie).
    pub fn clear_resultats(&mut self) {
        self.exact.clear();
        self.lecture.clear();
        self.erreur.clear();
        self.demarche = DemarcheNoyau::default();
        self.focus_entree = true;
    }

    /// On CONSERVE `exact` (dernier résultat) ; lecture et démarche ne valent plus rien.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.lecture.clear();
        self.demarche = DemarcheNoyau::default();
        self.focus_entree = true;
    }

    pub fn set_resultats(&mut self, exact: String, lecture: String, demarche: DemarcheNoyau) {
        self.erreur.clear();
        self.exact = exact;
        self.lecture = lecture;
        self.demarche = demarche;
        self.focus_entree = true;
    }

    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision.min(PRECISION_MAX);
        self.focus_entree = true;
    }
}
