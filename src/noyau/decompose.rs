// src/noyau/decompose.rs
//
// Décomposeur : nombre flottant -> arbre brut (non simplifié)
// -----------------------------------------------------------
// Étapes structurelles (zéro, signe, entier), puis une liste ORDONNÉE de
// reconnaisseurs nommés ; le premier qui répond gagne. L’ordre fixe la
// représentation choisie quand plusieurs sont justes (0.75 : fraction avant 3·sin(π/6)/2...).
//
// Les reconnaisseurs "récursifs" ne sont tentés que sous la profondeur maximale
// et ne redescendent qu’une fois par niveau : le travail est borné.

use log::{trace, warn};

use super::config::Config;
use super::expr::{Expr, OpUn};
use super::factorisation::{factorize_radicand, is_prime, should_preserve_direct_radical};
use super::fractions_continues::{approximation_rationnelle, identify_quadratic_irrational};
use super::rpn::lire_expr;
use super::tables::{chercher, constantes, toutes, valeurs_trig, ConstanteNommee};

/// Profondeur maximale de la décomposition récursive.
pub const PROFONDEUR_MAX: usize = 3;

/// Multiplicateurs ambigus : une fraction simple plutôt qu’un multiple de constante.
const MULTIPLICATEURS_EXCLUS: [f64; 5] = [0.75, 0.5, 0.25, 1.0 / 3.0, 2.0 / 3.0];

/// Reconnaisseur : Some(arbre) si x a la forme cherchée.
type Essai = fn(&Decomposeur, f64, usize) -> Option<Expr>;

struct Reconnaisseur {
    nom: &'static str,
    essai: Essai,
    /// Tenté seulement si profondeur < profondeur_max.
    recursif: bool,
}

const RECONNAISSEURS: &[Reconnaisseur] = &[
    Reconnaisseur { nom: "rationnel", essai: Decomposeur::rationnel, recursif: false },
    Reconnaisseur { nom: "constante", essai: Decomposeur::constante, recursif: false },
    Reconnaisseur { nom: "trigonométrique", essai: Decomposeur::trigonometrique, recursif: false },
    Reconnaisseur { nom: "quadratique", essai: Decomposeur::quadratique, recursif: false },
    Reconnaisseur { nom: "racine carrée", essai: Decomposeur::racine_directe, recursif: false },
    Reconnaisseur { nom: "puissance", essai: Decomposeur::puissance, recursif: false },
    Reconnaisseur { nom: "constante/entier", essai: Decomposeur::constante_sur_entier, recursif: true },
    Reconnaisseur { nom: "produit", essai: Decomposeur::produit, recursif: true },
    Reconnaisseur { nom: "somme", essai: Decomposeur::somme, recursif: true },
    Reconnaisseur { nom: "multiple + reste", essai: Decomposeur::multiple_plus_reste, recursif: true },
    Reconnaisseur { nom: "racine cubique", essai: Decomposeur::racine_cubique, recursif: true },
    Reconnaisseur { nom: "racine (x²)", essai: Decomposeur::racine_finale, recursif: false },
];

/// Résultat d’une décomposition : l’arbre brut et l’étape qui l’a produit.
#[derive(Clone, Debug)]
pub struct Decomposition {
    pub expr: Expr,
    pub etape: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct Decomposeur {
    cfg: Config,
    profondeur_max: usize,
}

impl Decomposeur {
    pub fn new(cfg: &Config) -> Self {
        Self {
            cfg: *cfg,
            profondeur_max: PROFONDEUR_MAX,
        }
    }

    pub fn avec_profondeur_max(mut self, profondeur_max: usize) -> Self {
        self.profondeur_max = profondeur_max;
        self
    }

    /// Arbre brut de `x` (x fini).
    pub fn parse(&self, x: f64) -> Expr {
        self.decomposer(x).expr
    }

    pub fn decomposer(&self, x: f64) -> Decomposition {
        self.parse_a(x, 0)
    }

    fn sous_arbre(&self, x: f64, profondeur: usize) -> Expr {
        self.parse_a(x, profondeur).expr
    }

    fn parse_a(&self, x: f64, profondeur: usize) -> Decomposition {
        let cfg = &self.cfg;

        if x.abs() < cfg.epsilon {
            return Decomposition { expr: Expr::Nombre(0.0), etape: "zéro" };
        }
        if x < 0.0 {
            let d = self.parse_a(-x, profondeur);
            return Decomposition { expr: Expr::neg(d.expr), etape: d.etape };
        }
        if cfg.quasi_entier(x) {
            return Decomposition { expr: Expr::Nombre(x.round()), etape: "entier" };
        }

        for r in RECONNAISSEURS {
            if r.recursif && profondeur >= self.profondeur_max {
                continue;
            }
            if let Some(expr) = (r.essai)(self, x, profondeur) {
                trace!("[{profondeur}] {} : {x} -> {expr}", r.nom);
                return Decomposition { expr, etape: r.nom };
            }
        }

        Decomposition { expr: Expr::Nombre(x), etape: "décimal" }
    }

    /* ------------------------ helpers ------------------------ */

    /// Arbre d’une entrée de table : sa forme exacte relue si elle existe, sinon la constante.
    /// Une forme illisible fait décliner l’appelant.
    fn valeur_de(&self, c: &ConstanteNommee) -> Option<Expr> {
        let Some(forme) = c.forme_exacte else {
            return Some(c.expr(&self.cfg));
        };
        lire_forme(forme)
    }

    /// Valeur "jolie" : acceptable comme multiplicateur ou reste.
    pub fn est_joli(&self, v: f64) -> bool {
        let cfg = &self.cfg;

        if cfg.quasi_entier(v) {
            return true;
        }
        if approximation_rationnelle(v, 10, 20, 50, cfg.epsilon).is_some() {
            return true;
        }
        let racine_simple = (2u64..=30)
            .any(|i| cfg.proche(v, (i as f64).sqrt()) && (is_prime(i) || i <= 20));
        if racine_simple {
            return true;
        }
        if toutes().any(|c| cfg.proche(v, c.valeur)) {
            return true;
        }

        let frac_pi_3 = std::f64::consts::FRAC_PI_3;
        let frac_pi_4 = std::f64::consts::FRAC_PI_4;
        cfg.proche(v, frac_pi_3.sin()) || cfg.proche(v, frac_pi_4.cos())
    }

    /* ------------------------ reconnaisseurs ------------------------ */

    fn rationnel(&self, x: f64, _: usize) -> Option<Expr> {
        let (p, q) = approximation_rationnelle(x, 20, 1000, 10_000, self.cfg.epsilon)?;
        Some(Expr::div(Expr::Nombre(p as f64), Expr::Nombre(q as f64)))
    }

    fn constante(&self, x: f64, _: usize) -> Option<Expr> {
        chercher(constantes(), x, &self.cfg).map(|c| c.expr(&self.cfg))
    }

    fn trigonometrique(&self, x: f64, _: usize) -> Option<Expr> {
        chercher(valeurs_trig(), x, &self.cfg).and_then(|c| self.valeur_de(c))
    }

    fn quadratique(&self, x: f64, _: usize) -> Option<Expr> {
        let forme = identify_quadratic_irrational(x, self.cfg.epsilon)?;
        lire_forme(&forme)
    }

    fn racine_directe(&self, x: f64, _: usize) -> Option<Expr> {
        let i = (2u64..=100).find(|&i| self.cfg.proche(x, (i as f64).sqrt()))?;

        if should_preserve_direct_radical(i) {
            return Some(Expr::racine(Expr::Nombre(i as f64)));
        }
        let f = factorize_radicand(i);
        let racine = Expr::racine(Expr::Nombre(f.radicande as f64));
        Some(if f.coefficient > 1 {
            Expr::mul(Expr::Nombre(f.coefficient as f64), racine)
        } else {
            racine
        })
    }

    fn puissance(&self, x: f64, _: usize) -> Option<Expr> {
        toutes().find_map(|c| {
            let p = (2..=3).find(|&p| self.cfg.proche(x, c.valeur.powi(p)))?;
            let base = self.valeur_de(c)?;
            Some(Expr::puissance(base, Expr::Nombre(f64::from(p))))
        })
    }

    fn constante_sur_entier(&self, x: f64, _: usize) -> Option<Expr> {
        constantes().iter().find_map(|c| {
            let d = (2u32..=12).find(|&d| self.cfg.proche(x, c.valeur / f64::from(d)))?;
            Some(Expr::div(self.valeur_de(c)?, Expr::Nombre(f64::from(d))))
        })
    }

    /// x = multiplicateur · c, avec un multiplicateur joli et non ambigu.
    fn produit(&self, x: f64, profondeur: usize) -> Option<Expr> {
        let cfg = &self.cfg;

        for c in toutes() {
            if c.valeur.abs() <= cfg.epsilon {
                continue;
            }
            // √p (p premier) : déjà couverts par les racines directes
            if c.radicande.is_some_and(|n| is_prime(u64::from(n))) {
                continue;
            }

            let m = x / c.valeur;
            if MULTIPLICATEURS_EXCLUS.iter().any(|&e| cfg.proche(m, e)) {
                continue;
            }
            if !self.est_joli(m) {
                continue;
            }

            let Some(valeur) = self.valeur_de(c) else {
                continue;
            };
            let multiplicateur = self.sous_arbre(m, profondeur + 1);

            if matches!(multiplicateur, Expr::Nombre(v) if cfg.proche(v, 1.0)) {
                return Some(valeur);
            }

            let produit = produit_ordonne(multiplicateur, valeur);

            // 2·π + 1 ... : le produit vaut déjà x à epsilon près, ce terme ne
            // s’ajoute donc jamais ; 2·π+1 passe par "multiple + reste"
            let v = produit.evaluate();
            if let Some(a) = (1u32..=10).find(|&a| cfg.proche(x, v + f64::from(a))) {
                return Some(Expr::add(produit, Expr::Nombre(f64::from(a))));
            }
            return Some(produit);
        }
        None
    }

    /// x = c + reste, reste joli.
    fn somme(&self, x: f64, profondeur: usize) -> Option<Expr> {
        toutes().find_map(|c| {
            let reste = x - c.valeur;
            if !self.est_joli(reste) {
                return None;
            }
            let valeur = self.valeur_de(c)?;
            Some(self.plus_reste(valeur, reste, profondeur))
        })
    }

    /// x = m·c + reste, m ∈ [2, 5], reste joli.
    fn multiple_plus_reste(&self, x: f64, profondeur: usize) -> Option<Expr> {
        toutes().find_map(|c| {
            let m = (2u32..=5).find(|&m| self.est_joli(x - f64::from(m) * c.valeur))?;
            let reste = x - f64::from(m) * c.valeur;
            let multiple = Expr::mul(Expr::Nombre(f64::from(m)), self.valeur_de(c)?);
            Some(self.plus_reste(multiple, reste, profondeur))
        })
    }

    /// terme (+|-) |reste| ; un reste nul rend le terme seul.
    fn plus_reste(&self, terme: Expr, reste: f64, profondeur: usize) -> Expr {
        if reste.abs() < self.cfg.epsilon {
            terme
        } else if reste < 0.0 {
            Expr::sub(terme, self.sous_arbre(-reste, profondeur + 1))
        } else {
            Expr::add(terme, self.sous_arbre(reste, profondeur + 1))
        }
    }

    fn racine_cubique(&self, x: f64, _: usize) -> Option<Expr> {
        let i = (2u32..=100).find(|&i| self.cfg.proche(x, f64::from(i).cbrt()))?;
        Some(Expr::un(OpUn::Cbrt, Expr::Nombre(f64::from(i))))
    }

    fn racine_finale(&self, x: f64, _: usize) -> Option<Expr> {
        let n = (x * x).round();
        (n.is_finite() && self.cfg.proche(x, n.sqrt())).then(|| Expr::racine(Expr::Nombre(n)))
    }
}

/// Relit une forme exacte ; None (avec avertissement) si elle est illisible.
fn lire_forme(forme: &str) -> Option<Expr> {
    match lire_expr(forme) {
        Ok(e) => Some(e),
        Err(err) => {
            warn!("forme exacte illisible « {forme} » : {err}");
            None
        }
    }
}

/// Rang d’une constante dans un produit (plus petit = plus à gauche).
fn priorite_constante(e: &Expr) -> u8 {
    match e {
        Expr::Constante(s, _) => match s.as_str() {
            "e" => 1,
            "π" => 2,
            "φ" => 3,
            s if s.starts_with('√') => 10,
            _ => 50,
        },
        _ => 100,
    }
}

/// multiplicateur · valeur, dans l’ordre canonique :
/// nombre d’abord ; deux constantes par rang ; e, π, φ, √ avant une expression.
fn produit_ordonne(multiplicateur: Expr, valeur: Expr) -> Expr {
    let valeur_avant = match (&multiplicateur, &valeur) {
        (Expr::Nombre(_), _) => false,
        (Expr::Constante(..), Expr::Constante(..)) => {
            priorite_constante(&multiplicateur) > priorite_constante(&valeur)
        }
        _ => priorite_constante(&valeur) < 50,
    };
    if valeur_avant {
        Expr::mul(valeur, multiplicateur)
    } else {
        Expr::mul(multiplicateur, valeur)
    }
}
