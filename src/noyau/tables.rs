// src/noyau/tables.rs
//
// Tables statiques (lecture seule) consultées par le décomposeur :
// - constantes nommées (π, e, φ, √2..√19, √π, logarithmes)
// - valeurs trigonométriques remarquables, avec leur forme exacte
//
// Les valeurs sont calculées une fois (OnceLock) : sin(π/6) vaut ce que
// f64::sin renvoie, pas 0.5, pour reconnaître exactement ce que l’appelant obtient.

use std::f64::consts::{E, LN_10, LN_2, LOG10_E, LOG2_E, PI};
use std::sync::OnceLock;

use super::config::Config;
use super::expr::Expr;

#[derive(Clone, Debug)]
pub struct ConstanteNommee {
    pub symbole: &'static str,
    /// Variante avec espacement (√(2), sin(π / 6)).
    pub symbole_espace: &'static str,
    pub valeur: f64,
    /// Forme exacte à relire (toujours compacte), si elle existe.
    pub forme_exacte: Option<&'static str>,
    /// n si la constante est √n.
    pub radicande: Option<u32>,
}

impl ConstanteNommee {
    fn simple(symbole: &'static str, valeur: f64) -> Self {
        Self {
            symbole,
            symbole_espace: symbole,
            valeur,
            forme_exacte: None,
            radicande: None,
        }
    }

    fn racine(symbole: &'static str, symbole_espace: &'static str, n: u32) -> Self {
        Self {
            symbole,
            symbole_espace,
            valeur: f64::from(n).sqrt(),
            forme_exacte: None,
            radicande: Some(n),
        }
    }

    fn trig(
        symbole: &'static str,
        symbole_espace: &'static str,
        valeur: f64,
        forme_exacte: &'static str,
    ) -> Self {
        Self {
            symbole,
            symbole_espace,
            valeur,
            forme_exacte: Some(forme_exacte),
            radicande: None,
        }
    }

    pub fn symbole(&self, cfg: &Config) -> &'static str {
        if cfg.espacement {
            self.symbole_espace
        } else {
            self.symbole
        }
    }

    /// Noeud Constante correspondant.
    pub fn expr(&self, cfg: &Config) -> Expr {
        Expr::constante(self.symbole(cfg), self.valeur)
    }
}

static CONSTANTES: OnceLock<Vec<ConstanteNommee>> = OnceLock::new();
static VALEURS_TRIG: OnceLock<Vec<ConstanteNommee>> = OnceLock::new();

pub fn constantes() -> &'static [ConstanteNommee] {
    CONSTANTES.get_or_init(|| {
        vec![
            ConstanteNommee::simple("π", PI),
            ConstanteNommee::simple("e", E),
            ConstanteNommee::simple("φ", (1.0 + 5f64.sqrt()) / 2.0),
            ConstanteNommee::racine("√2", "√(2)", 2),
            ConstanteNommee::racine("√3", "√(3)", 3),
            ConstanteNommee::racine("√5", "√(5)", 5),
            ConstanteNommee::racine("√7", "√(7)", 7),
            ConstanteNommee::racine("√11", "√(11)", 11),
            ConstanteNommee::racine("√13", "√(13)", 13),
            ConstanteNommee::racine("√17", "√(17)", 17),
            ConstanteNommee::racine("√19", "√(19)", 19),
            ConstanteNommee {
                symbole: "√π",
                symbole_espace: "√(π)",
                valeur: PI.sqrt(),
                forme_exacte: None,
                radicande: None,
            },
            ConstanteNommee::simple("ln(2)", LN_2),
            ConstanteNommee::simple("ln(10)", LN_10),
            ConstanteNommee::simple("log₂(e)", LOG2_E),
            ConstanteNommee::simple("log₁₀(e)", LOG10_E),
        ]
    })
}

pub fn valeurs_trig() -> &'static [ConstanteNommee] {
    VALEURS_TRIG.get_or_init(|| {
        use ConstanteNommee as C;
        vec![
            // sin
            C::trig("sin(π/6)", "sin(π / 6)", (PI / 6.0).sin(), "1/2"),
            C::trig("sin(π/4)", "sin(π / 4)", (PI / 4.0).sin(), "√2/2"),
            C::trig("sin(π/3)", "sin(π / 3)", (PI / 3.0).sin(), "√3/2"),
            C::trig("sin(π/2)", "sin(π / 2)", (PI / 2.0).sin(), "1"),
            // cos
            C::trig("cos(0)", "cos(0)", 0f64.cos(), "1"),
            C::trig("cos(π/6)", "cos(π / 6)", (PI / 6.0).cos(), "√3/2"),
            C::trig("cos(π/4)", "cos(π / 4)", (PI / 4.0).cos(), "√2/2"),
            C::trig("cos(π/3)", "cos(π / 3)", (PI / 3.0).cos(), "1/2"),
            C::trig("cos(π/2)", "cos(π / 2)", (PI / 2.0).cos(), "0"),
            // tan
            C::trig("tan(π/6)", "tan(π / 6)", (PI / 6.0).tan(), "1/√3"),
            C::trig("tan(π/4)", "tan(π / 4)", (PI / 4.0).tan(), "1"),
            C::trig("tan(π/3)", "tan(π / 3)", (PI / 3.0).tan(), "√3"),
        ]
    })
}

/// Première entrée de `table` à epsilon de `x`.
pub fn chercher<'a>(
    table: &'a [ConstanteNommee],
    x: f64,
    cfg: &Config,
) -> Option<&'a ConstanteNommee> {
    table.iter().find(|c| cfg.proche(x, c.valeur))
}

/// Constantes puis valeurs trig (ordre de recherche du décomposeur).
pub fn toutes() -> impl Iterator<Item = &'static ConstanteNommee> {
    constantes().iter().chain(valeurs_trig())
}
