//! Affichage symbolique de nombres flottants.
//!
//! `convert(0.5)` -> "1/2", `convert(√50)` -> "5·√2", `convert(2π)` -> "2·π".

pub mod noyau;

pub use noyau::{
    convert, convert_avec_demarche, eval_expression, Config, ConfigPartielle, DemarcheNoyau,
    ErreurLecture, Expr,
};
