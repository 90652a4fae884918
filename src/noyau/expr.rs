// src/noyau/expr.rs
//
// Arbre d’expression (flottant, immuable).
// - Nombre     : littéral (entier, fraction, décimal, ±∞)
// - Constante  : irrationnel nommé (π, e, φ, √2, ln(2)...)
// - Bin        : + − × ÷
// - Un         : négation, √, ∛
// - Racine     : √ "spécialisée" (préférée à Un(Sqrt) pour l’affichage)
// - Puissance  : base^exposant
//
// Contrats :
// - un noeud n’est jamais modifié après construction (simplify() renvoie un nouvel arbre)
// - produit : l’opérande de plus faible priorité est à gauche (cf. `ordonner_produit`)
// - equals() compare la FORME (avec tolérance sur les feuilles), pas la valeur

use std::fmt;

use super::config::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBin {
    Add,
    Sub,
    Mul,
    Div,
}

impl OpBin {
    pub fn symbole(self) -> &'static str {
        match self {
            OpBin::Add => "+",
            OpBin::Sub => "-",
            OpBin::Mul => "·",
            OpBin::Div => "/",
        }
    }

    /// + ou −
    pub fn est_additif(self) -> bool {
        matches!(self, OpBin::Add | OpBin::Sub)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUn {
    Neg,
    Sqrt,
    Cbrt,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Constante(String, f64),

    Bin(OpBin, Box<Expr>, Box<Expr>),
    Un(OpUn, Box<Expr>),

    Racine(Box<Expr>),
    Puissance(Box<Expr>, Box<Expr>), // base, exposant
}

/* ------------------------ Ordre canonique des produits ------------------------ */

/// Priorité d’affichage dans un produit (plus petit = plus à gauche).
/// Nombre=1, racine (Racine ou Un(Sqrt))=2, le reste=6.
pub fn priorite_produit(e: &Expr) -> u8 {
    match e {
        Expr::Nombre(_) => 1,
        _ if e.est_racine() => 2,
        _ => 6,
    }
}

/// Vrai si (a, b) doit être échangé pour respecter l’ordre canonique.
pub fn doit_echanger(a: &Expr, b: &Expr) -> bool {
    priorite_produit(a) > priorite_produit(b)
}

/// Paire normalisée (gauche, droite) pour un produit.
pub fn ordonner_produit(a: Expr, b: Expr) -> (Expr, Expr) {
    if doit_echanger(&a, &b) {
        (b, a)
    } else {
        (a, b)
    }
}

/* ------------------------ Constructeurs ------------------------ */

impl Expr {
    pub fn nombre(v: f64) -> Expr {
        Expr::Nombre(v)
    }

    pub fn constante(symbole: impl Into<String>, valeur: f64) -> Expr {
        Expr::Constante(symbole.into(), valeur)
    }

    /// Noeud binaire. Pour ×, les opérandes sont remis dans l’ordre canonique.
    pub fn bin(op: OpBin, a: Expr, b: Expr) -> Expr {
        let (a, b) = match op {
            OpBin::Mul => ordonner_produit(a, b),
            _ => (a, b),
        };
        Expr::Bin(op, Box::new(a), Box::new(b))
    }

    pub fn add(a: Expr, b: Expr) -> Expr {
        Expr::bin(OpBin::Add, a, b)
    }

    pub fn sub(a: Expr, b: Expr) -> Expr {
        Expr::bin(OpBin::Sub, a, b)
    }

    pub fn mul(a: Expr, b: Expr) -> Expr {
        Expr::bin(OpBin::Mul, a, b)
    }

    pub fn div(a: Expr, b: Expr) -> Expr {
        Expr::bin(OpBin::Div, a, b)
    }

    pub fn un(op: OpUn, x: Expr) -> Expr {
        Expr::Un(op, Box::new(x))
    }

    pub fn neg(x: Expr) -> Expr {
        Expr::un(OpUn::Neg, x)
    }

    pub fn racine(x: Expr) -> Expr {
        Expr::Racine(Box::new(x))
    }

    pub fn puissance(base: Expr, exposant: Expr) -> Expr {
        Expr::Puissance(Box::new(base), Box::new(exposant))
    }
}

/* ------------------------ Accès ------------------------ */

impl Expr {
    pub fn as_nombre(&self) -> Option<f64> {
        match self {
            Expr::Nombre(v) => Some(*v),
            _ => None,
        }
    }

    /// Racine ou Un(Sqrt).
    pub fn est_racine(&self) -> bool {
        matches!(self, Expr::Racine(_) | Expr::Un(OpUn::Sqrt, _))
    }

    /// Opérande d’un noeud racine.
    ///
    /// Appelé uniquement après `est_racine()` : tout autre noeud est une erreur de programmation.
    pub fn operande_racine(&self) -> &Expr {
        match self {
            Expr::Racine(x) | Expr::Un(OpUn::Sqrt, x) => x,
            autre => unreachable!("operande_racine sur un noeud non racine : {autre}"),
        }
    }

    /// Nombre de noeuds (démarche / garde-fous de tests).
    pub fn taille(&self) -> usize {
        match self {
            Expr::Nombre(_) | Expr::Constante(..) => 1,
            Expr::Bin(_, a, b) | Expr::Puissance(a, b) => 1 + a.taille() + b.taille(),
            Expr::Un(_, x) | Expr::Racine(x) => 1 + x.taille(),
        }
    }
}

/* ------------------------ Évaluation ------------------------ */

impl Expr {
    /// Valeur flottante. NaN et ±∞ se propagent tels quels.
    pub fn evaluate(&self) -> f64 {
        match self {
            Expr::Nombre(v) => *v,
            Expr::Constante(_, v) => *v,

            Expr::Bin(op, a, b) => {
                let (x, y) = (a.evaluate(), b.evaluate());
                match op {
                    OpBin::Add => x + y,
                    OpBin::Sub => x - y,
                    OpBin::Mul => x * y,
                    OpBin::Div => x / y,
                }
            }

            Expr::Un(op, x) => {
                let v = x.evaluate();
                match op {
                    OpUn::Neg => -v,
                    OpUn::Sqrt => v.sqrt(),
                    OpUn::Cbrt => v.cbrt(),
                }
            }

            Expr::Racine(x) => x.evaluate().sqrt(),
            Expr::Puissance(b, e) => b.evaluate().powf(e.evaluate()),
        }
    }
}

/* ------------------------ Égalité structurelle ------------------------ */

impl Expr {
    /// Même forme d’arbre, feuilles numériques à epsilon près.
    /// Racine et Un(Sqrt) sont deux formes distinctes, même de valeur égale.
    pub fn equals(&self, other: &Expr, cfg: &Config) -> bool {
        use Expr::*;

        match (self, other) {
            (Nombre(a), Nombre(b)) => cfg.proche(*a, *b) || a == b,
            (Constante(s1, _), Constante(s2, _)) => s1 == s2,

            (Bin(o1, a1, b1), Bin(o2, a2, b2)) => {
                o1 == o2 && a1.equals(a2, cfg) && b1.equals(b2, cfg)
            }
            (Un(o1, x1), Un(o2, x2)) => o1 == o2 && x1.equals(x2, cfg),
            (Racine(x1), Racine(x2)) => x1.equals(x2, cfg),
            (Puissance(b1, e1), Puissance(b2, e2)) => b1.equals(b2, cfg) && e1.equals(e2, cfg),

            _ => false,
        }
    }
}

/* ------------------------ Affichage debug (pas “joli” final) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Nombre(v) => write!(f, "{v}"),
            Constante(s, _) => write!(f, "{s}"),
            Bin(op, a, b) => {
                let s = match op {
                    OpBin::Mul => "*",
                    autre => autre.symbole(),
                };
                write!(f, "({a}{s}{b})")
            }
            Un(OpUn::Neg, x) => write!(f, "neg({x})"),
            Un(OpUn::Sqrt, x) => write!(f, "sqrt({x})"),
            Un(OpUn::Cbrt, x) => write!(f, "cbrt({x})"),
            Racine(x) => write!(f, "√({x})"),
            Puissance(b, e) => write!(f, "({b})^({e})"),
        }
    }
}
