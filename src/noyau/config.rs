// src/noyau/config.rs
//
// Configuration d’une conversion (passée explicitement, jamais globale).
// - espacement : rendu "2 · π" au lieu de "2·π"
// - precision  : décimales du repli décimal
// - epsilon    : tolérance de TOUTES les comparaisons flottantes
//
// Contrats :
// - Une Config est en lecture seule pendant une conversion.
// - Garde-fous : precision bornée, epsilon fini et > 0.

use log::warn;

/// Décimales par défaut du repli décimal.
pub const PRECISION_DEFAUT: usize = 8;

/// Garde-fou : au-delà, le repli décimal n’a plus de sens en f64.
pub const PRECISION_MAX: usize = 100;

/// Tolérance par défaut.
pub const EPSILON_DEFAUT: f64 = 1e-10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub espacement: bool,
    pub precision: usize,
    pub epsilon: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            espacement: false,
            precision: PRECISION_DEFAUT,
            epsilon: EPSILON_DEFAUT,
        }
    }
}

impl Config {
    /// Variante "espacée" de la config par défaut.
    pub fn espacee() -> Self {
        Self {
            espacement: true,
            ..Self::default()
        }
    }

    /// |a - b| < epsilon
    pub fn proche(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.epsilon
    }

    /// Vrai si `x` est à epsilon d’un entier.
    pub fn quasi_entier(&self, x: f64) -> bool {
        self.proche(x, x.round())
    }
}

/// Config "tous champs optionnels" : ce que fournit l’appelant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConfigPartielle {
    pub espacement: Option<bool>,
    pub precision: Option<usize>,
    pub epsilon: Option<f64>,
}

impl ConfigPartielle {
    /// Complète les champs absents avec les valeurs par défaut, puis borne.
    pub fn resoudre(self) -> Config {
        let defaut = Config::default();

        let precision = match self.precision {
            Some(p) if p > PRECISION_MAX => {
                warn!("precision {p} bornée à {PRECISION_MAX}");
                PRECISION_MAX
            }
            Some(p) => p,
            None => defaut.precision,
        };

        let epsilon = match self.epsilon {
            Some(e) if e.is_finite() && e > 0.0 => e,
            Some(e) => {
                warn!("epsilon {e} invalide, retour à {}", defaut.epsilon);
                defaut.epsilon
            }
            None => defaut.epsilon,
        };

        Config {
            espacement: self.espacement.unwrap_or(defaut.espacement),
            precision,
            epsilon,
        }
    }
}

impl From<ConfigPartielle> for Config {
    fn from(p: ConfigPartielle) -> Self {
        p.resoudre()
    }
}
