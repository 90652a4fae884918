//! Noyau symbolique
//!
//! Organisation interne :
//! - config.rs              : Config (espacement, precision, epsilon) + valeurs par défaut
//! - factorisation.rs       : pgcd, primalité, extraction des carrés
//! - fractions_continues.rs : termes, réduites, irrationnels quadratiques
//! - expr.rs                : arbre d’expression + evaluate / equals
//! - simplification.rs      : règles de réécriture (Expr::simplify)
//! - format.rs              : affichage final (Expr::format)
//! - tables.rs              : constantes nommées + valeurs trig remarquables
//! - jetons.rs / rpn.rs     : lecture des formes exactes et de la saisie
//! - decompose.rs           : nombre -> arbre brut (reconnaisseurs ordonnés)
//! - eval.rs                : pipeline complet

pub mod config;
pub mod decompose;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod factorisation;
pub mod format;
pub mod fractions_continues;
pub mod jetons;
pub mod rpn;
pub mod simplification;
pub mod tables;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use config::{Config, ConfigPartielle};
pub use erreur::ErreurLecture;
pub use eval::{convert, convert_avec_demarche, eval_expression, DemarcheNoyau};
pub use expr::Expr;
