// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> arbre / valeur
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire une Expr (formes exactes des tables, quadratiques reconnus)
// - Ou évaluer directement en f64 (saisie du front end)
//
// Règles:
// - Ident(name):
//    - si name ∈ {sqrt, cbrt, sin, cos, tan, ln, exp} => fonction unaire préfixe
//    - si name ∈ {pi, e, phi} => constante
//    - sinon => erreur
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur => Tok::Neg (préfixe)
// - Les préfixes (fonctions, Neg) s’appliquent à la valeur qui suit : "√2/2" = (√2)/2
//
// Précédences : + - (1) < * / (2) < neg (3) < ^ (4) < fonctions (5)
// donc "-2^2" = -(2^2) et "√2^2" = (√2)^2.

use std::f64::consts::{E, PI};

use super::erreur::ErreurLecture;
use super::expr::{Expr, OpBin, OpUn};
use super::jetons::{tokenize, Tok};

const PHI: f64 = 1.618_033_988_749_895;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        Tok::Ident(_) => 5,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

/// Identificateurs reconnus comme fonctions (unaire).
fn is_fonction_ident(name: &str) -> bool {
    matches!(name, "sqrt" | "cbrt" | "sin" | "cos" | "tan" | "ln" | "exp")
}

/// Constantes nommées lisibles : (symbole affiché, valeur).
fn constante_nommee(name: &str) -> Option<(&'static str, f64)> {
    match name {
        "pi" => Some(("π", PI)),
        "e" => Some(("e", E)),
        "phi" => Some(("φ", PHI)),
        _ => None,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sqrt"), Num(2), Slash, Num(2)]
///   rpn:    [Num(2), Ident("sqrt"), Num(2), Slash]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurLecture> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if is_fonction_ident(&name) {
                    // fonction : sur la pile, elle sortira après son argument
                    ops.push(Tok::Ident(name));
                    prev_was_value = false;
                } else if constante_nommee(&name).is_some() {
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                } else {
                    return Err(ErreurLecture::Inconnu(name));
                }
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(ErreurLecture::Parentheses);
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Tok::Ident(_)) = ops.last() {
                    out.extend(ops.pop());
                }

                prev_was_value = true;
            }

            Tok::Minus if !prev_was_value => {
                ops.push(Tok::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let p_tok = precedence(&tok);

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }
                    let p_top = precedence(top);
                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };
                    if !doit_pop {
                        break;
                    }
                    out.extend(ops.pop());
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => ops.push(tok),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurLecture::Parentheses);
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
///
/// - sqrt => Racine, cbrt => Un(Cbrt), neg => Un(Neg), ^ => Puissance
/// - pi, e, phi => Constante
/// - sin, cos, tan, ln, exp => NonRepresentable
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurLecture> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Nombre(v)),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = st.pop().ok_or(ErreurLecture::Invalide)?;
                let a = st.pop().ok_or(ErreurLecture::Invalide)?;

                let e = match tok {
                    Tok::Plus => Expr::bin(OpBin::Add, a, b),
                    Tok::Minus => Expr::bin(OpBin::Sub, a, b),
                    Tok::Star => Expr::bin(OpBin::Mul, a, b),
                    Tok::Slash => Expr::bin(OpBin::Div, a, b),
                    _ => Expr::puissance(a, b),
                };
                st.push(e);
            }

            Tok::Neg => {
                let x = st.pop().ok_or(ErreurLecture::Invalide)?;
                st.push(Expr::neg(x));
            }

            Tok::Ident(name) => {
                if let Some((symbole, valeur)) = constante_nommee(&name) {
                    st.push(Expr::constante(symbole, valeur));
                    continue;
                }
                let x = st.pop().ok_or(ErreurLecture::Invalide)?;
                let e = match name.as_str() {
                    "sqrt" => Expr::racine(x),
                    "cbrt" => Expr::un(OpUn::Cbrt, x),
                    _ => return Err(ErreurLecture::NonRepresentable(name)),
                };
                st.push(e);
            }

            Tok::LPar | Tok::RPar => return Err(ErreurLecture::Parentheses),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(ErreurLecture::Invalide),
    }
}

/// Évalue une RPN en f64 (toutes les fonctions, y compris sin/ln...).
pub fn evaluer_rpn(rpn: &[Tok]) -> Result<f64, ErreurLecture> {
    let mut st: Vec<f64> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(v) => st.push(*v),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = st.pop().ok_or(ErreurLecture::Invalide)?;
                let a = st.pop().ok_or(ErreurLecture::Invalide)?;
                st.push(match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    Tok::Slash => a / b,
                    _ => a.powf(b),
                });
            }

            Tok::Neg => {
                let x = st.pop().ok_or(ErreurLecture::Invalide)?;
                st.push(-x);
            }

            Tok::Ident(name) => {
                if let Some((_, valeur)) = constante_nommee(name) {
                    st.push(valeur);
                    continue;
                }
                let x = st.pop().ok_or(ErreurLecture::Invalide)?;
                let v = match name.as_str() {
                    "sqrt" => x.sqrt(),
                    "cbrt" => x.cbrt(),
                    "sin" => x.sin(),
                    "cos" => x.cos(),
                    "tan" => x.tan(),
                    "ln" => x.ln(),
                    "exp" => x.exp(),
                    _ => return Err(ErreurLecture::Inconnu(name.clone())),
                };
                st.push(v);
            }

            Tok::LPar | Tok::RPar => return Err(ErreurLecture::Parentheses),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(ErreurLecture::Invalide),
    }
}

/// Texte -> arbre (formes exactes : "√2/2", "(√13-3)/2", "1/√3"...).
pub fn lire_expr(s: &str) -> Result<Expr, ErreurLecture> {
    from_rpn(&to_rpn(&tokenize(s)?)?)
}

/// Texte -> valeur (saisie utilisateur : "sin(pi/3)*12", "sqrt(50)"...).
pub fn evaluer_texte(s: &str) -> Result<f64, ErreurLecture> {
    evaluer_rpn(&to_rpn(&tokenize(s)?)?)
}
