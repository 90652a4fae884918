//! Noyau : conversion (pipeline réel)
//!
//! nombre -> décomposeur (arbre brut) -> simplify -> format
//!
//! Saisie texte (front end) : tokenize -> RPN -> valeur f64 -> conversion ci-dessus.
//! NaN et ±∞ ne passent jamais par le décomposeur.

use log::debug;

use super::config::Config;
use super::decompose::Decomposeur;
use super::erreur::ErreurLecture;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{evaluer_rpn, to_rpn};

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
    pub avant: String,
    pub apres: String,
    pub etape: String,
    pub note: String,
}

/// Sentinelles des valeurs non finies.
fn sentinelle(x: f64) -> Option<&'static str> {
    if x.is_nan() {
        Some("NaN")
    } else if x == f64::INFINITY {
        Some("∞")
    } else if x == f64::NEG_INFINITY {
        Some("-∞")
    } else {
        None
    }
}

/// API publique : forme symbolique de `x`.
///
/// ```
/// use nombre_symbolique::{convert, Config};
///
/// let cfg = Config::default();
/// assert_eq!(convert(0.5, &cfg), "1/2");
/// assert_eq!(convert(50f64.sqrt(), &cfg), "5·√2");
/// assert_eq!(convert(2.0 * std::f64::consts::PI, &Config::espacee()), "2 · π");
/// ```
pub fn convert(x: f64, cfg: &Config) -> String {
    convert_avec_demarche(x, cfg).0
}

/// Comme `convert`, avec les étapes intermédiaires (arbre brut, arbre simplifié, reconnaisseur).
pub fn convert_avec_demarche(x: f64, cfg: &Config) -> (String, DemarcheNoyau) {
    if let Some(s) = sentinelle(x) {
        let d = DemarcheNoyau {
            etape: "non fini".into(),
            note: "Valeur non finie : pas de décomposition.".into(),
            ..Default::default()
        };
        return (s.to_string(), d);
    }

    let decomposition = Decomposeur::new(cfg).decomposer(x);
    let avant = decomposition.expr.to_string();
    let simplifie = decomposition.expr.simplify(cfg);
    let exact = simplifie.format(cfg);

    debug!("{x} -> {exact} ({})", decomposition.etape);

    let d = DemarcheNoyau {
        avant,
        apres: simplifie.to_string(),
        etape: decomposition.etape.to_string(),
        note: "Pipeline: décomposeur → arbre brut → simplify → format.".into(),
        ..Default::default()
    };
    (exact, d)
}

/// Lecture décimale de `x` à `cfg.precision` décimales.
pub fn lecture_decimale(x: f64, cfg: &Config) -> String {
    match sentinelle(x) {
        Some(s) => s.to_string(),
        None => format!("{x:.prec$}", prec = cfg.precision),
    }
}

/// API front end : évalue une saisie et retourne:
/// - EXACT (forme symbolique)
/// - lecture décimale
/// - Démarche (jetons, rpn, arbres, reconnaisseur)
pub fn eval_expression(
    expr_str: &str,
    cfg: &Config,
) -> Result<(String, String, DemarcheNoyau), ErreurLecture> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurLecture::Vide);
    }

    // 1) Jetons
    let jetons = tokenize(s)?;

    // 2) RPN
    let rpn = to_rpn(&jetons)?;

    // 3) Valeur
    let x = evaluer_rpn(&rpn)?;

    // 4) Conversion
    let (exact, mut d) = convert_avec_demarche(x, cfg);
    d.jetons = format_tokens(&jetons);
    d.rpn = format_tokens(&rpn);

    Ok((exact, lecture_decimale(x, cfg), d))
}
