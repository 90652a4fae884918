// src/noyau/erreur.rs
//
// Erreurs du lecteur de formes (jetons -> RPN -> arbre / valeur).
// La conversion d’un nombre, elle, n’échoue jamais.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurLecture {
    #[error("expression vide")]
    Vide,

    #[error("caractère inattendu : '{0}'")]
    Caractere(char),

    #[error("nombre invalide : {0}")]
    NombreInvalide(String),

    #[error("parenthèses non équilibrées")]
    Parentheses,

    #[error("identifiant inconnu : {0}")]
    Inconnu(String),

    /// sin, ln... : évaluables, mais sans noeud d’arbre correspondant.
    #[error("fonction non représentable dans l’arbre : {0}")]
    NonRepresentable(String),

    #[error("expression invalide")]
    Invalide,
}
