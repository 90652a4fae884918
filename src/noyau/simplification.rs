// src/noyau/simplification.rs
//
// Règles de réécriture, appliquées de bas en haut (enfants d’abord).
//
// Contrats :
// - simplify(simplify(t)) == simplify(t) (les sorties de règle sont re-simplifiées au besoin)
// - aucune mutation : on consomme l’arbre et on en rend un nouveau
// - tests "zéro"/"un" à epsilon près (cfg.epsilon)
// - un produit est remis dans l’ordre canonique AVANT d’appliquer les règles

use super::config::Config;
use super::expr::{ordonner_produit, Expr, OpBin, OpUn};
use super::factorisation::{entier_exact, factorize_radicand, gcd};

impl Expr {
    pub fn simplify(self, cfg: &Config) -> Expr {
        match self {
            Expr::Nombre(_) | Expr::Constante(..) => self,

            Expr::Bin(op, a, b) => simplifier_bin(op, a.simplify(cfg), b.simplify(cfg), cfg),
            Expr::Un(op, x) => simplifier_un(op, x.simplify(cfg)),
            Expr::Racine(x) => simplifier_racine(x.simplify(cfg), cfg),
            Expr::Puissance(b, e) => simplifier_puissance(b.simplify(cfg), e.simplify(cfg), cfg),
        }
    }
}

/* ------------------------ utilitaires ------------------------ */

fn est_zero(e: &Expr, cfg: &Config) -> bool {
    matches!(e, Expr::Nombre(v) if cfg.proche(*v, 0.0))
}

fn est_un(e: &Expr, cfg: &Config) -> bool {
    matches!(e, Expr::Nombre(v) if cfg.proche(*v, 1.0))
}

fn est_nombre_egal(e: &Expr, v: f64, cfg: &Config) -> bool {
    matches!(e, Expr::Nombre(x) if cfg.proche(*x, v))
}

fn appliquer(op: OpBin, x: f64, y: f64) -> f64 {
    match op {
        OpBin::Add => x + y,
        OpBin::Sub => x - y,
        OpBin::Mul => x * y,
        OpBin::Div => x / y,
    }
}

/// Entier exact (signé) porté par un f64.
fn entier_signe(v: f64) -> Option<i64> {
    entier_exact(v.abs()).and_then(|n| i64::try_from(n).ok()).map(|n| if v < 0.0 { -n } else { n })
}

/* ------------------------ Binaires ------------------------ */

fn simplifier_bin(op: OpBin, a: Expr, b: Expr, cfg: &Config) -> Expr {
    // 1. repliement numérique
    if let (Expr::Nombre(x), Expr::Nombre(y)) = (&a, &b) {
        return Expr::Nombre(appliquer(op, *x, *y));
    }

    match op {
        OpBin::Add => simplifier_add(a, b, cfg),
        OpBin::Sub => simplifier_sub(a, b, cfg),
        OpBin::Mul => {
            let (a, b) = ordonner_produit(a, b);
            simplifier_mul(a, b, cfg)
        }
        OpBin::Div => simplifier_div(a, b, cfg),
    }
}

fn simplifier_add(a: Expr, b: Expr, cfg: &Config) -> Expr {
    if est_zero(&b, cfg) {
        return a;
    }
    if est_zero(&a, cfg) {
        return b;
    }
    Expr::add(a, b)
}

fn simplifier_sub(a: Expr, b: Expr, cfg: &Config) -> Expr {
    if est_zero(&b, cfg) {
        return a;
    }
    // 0 - b => -b (et --x => x)
    if est_zero(&a, cfg) {
        return simplifier_un(OpUn::Neg, b);
    }
    if a.equals(&b, cfg) {
        return Expr::Nombre(0.0);
    }
    Expr::sub(a, b)
}

fn simplifier_mul(a: Expr, b: Expr, cfg: &Config) -> Expr {
    if est_zero(&a, cfg) || est_zero(&b, cfg) {
        return Expr::Nombre(0.0);
    }
    if est_un(&b, cfg) {
        return a;
    }
    if est_un(&a, cfg) {
        return b;
    }

    // n·(√m/2) => (n/2)·√m
    if let (Expr::Nombre(n), Expr::Bin(OpBin::Div, r, deux)) = (&a, &b) {
        if r.est_racine() && est_nombre_egal(deux, 2.0, cfg) {
            return simplifier_mul(Expr::Nombre(n / 2.0), (**r).clone(), cfg);
        }
    }

    // (p/q)·c => (p·c)/q
    if let Expr::Bin(OpBin::Div, p, q) = a {
        return Expr::div(Expr::mul(*p, b), *q).simplify(cfg);
    }
    // c·(p/q) => (c·p)/q
    if let Expr::Bin(OpBin::Div, p, q) = b {
        return Expr::div(Expr::mul(a, *p), *q).simplify(cfg);
    }

    // n1·(n2·reste) => (n1·n2)·reste
    if let (Expr::Nombre(n1), Expr::Bin(OpBin::Mul, g, reste)) = (&a, &b) {
        if let Expr::Nombre(n2) = g.as_ref() {
            return Expr::mul(Expr::Nombre(n1 * n2), (**reste).clone()).simplify(cfg);
        }
    }

    // √x·√y => √(x·y) si x, y nombres
    if a.est_racine() && b.est_racine() {
        if let (Expr::Nombre(x), Expr::Nombre(y)) = (a.operande_racine(), b.operande_racine()) {
            return simplifier_racine(Expr::Nombre(x * y), cfg);
        }
    }

    Expr::mul(a, b)
}

fn simplifier_div(a: Expr, b: Expr, cfg: &Config) -> Expr {
    if est_zero(&a, cfg) {
        return Expr::Nombre(0.0);
    }
    if est_un(&b, cfg) {
        return a;
    }
    if a.equals(&b, cfg) {
        return Expr::Nombre(1.0);
    }

    if let Some(reduite) = reduire_fraction_entiere(&a, &b) {
        return reduite;
    }

    // (x·y)/y => x, d’abord par coefficient numérique, puis par égalité de forme
    if let Expr::Bin(OpBin::Mul, g, d) = &a {
        if let Expr::Nombre(k) = &b {
            if est_nombre_egal(g, *k, cfg) {
                return (**d).clone();
            }
            if est_nombre_egal(d, *k, cfg) {
                return (**g).clone();
            }
        }
        if g.equals(&b, cfg) {
            return (**d).clone();
        }
        if d.equals(&b, cfg) {
            return (**g).clone();
        }
    }

    Expr::div(a, b)
}

/// n/d entiers => (n/pgcd)/(d/pgcd) si pgcd > 1.
fn reduire_fraction_entiere(a: &Expr, b: &Expr) -> Option<Expr> {
    let n = entier_signe(a.as_nombre()?)?;
    let d = entier_signe(b.as_nombre()?)?;
    let g = gcd(n, d);
    if g > 1 {
        Some(Expr::div(
            Expr::Nombre((n / g) as f64),
            Expr::Nombre((d / g) as f64),
        ))
    } else {
        None
    }
}

/* ------------------------ Racines ------------------------ */

/// √x avec x déjà simplifié.
fn simplifier_racine(x: Expr, cfg: &Config) -> Expr {
    if let Some(n) = x.as_nombre().and_then(entier_exact) {
        return racine_entiere(n);
    }

    // √(p·q) avec p, q entiers
    if let Expr::Bin(OpBin::Mul, p, q) = &x {
        let produit = p
            .as_nombre()
            .zip(q.as_nombre())
            .and_then(|(p, q)| entier_exact(p * q));
        if let Some(n) = produit {
            let f = factorize_radicand(n);
            if f.coefficient > 1 {
                return racine_entiere(n).simplify(cfg);
            }
        }
    }

    Expr::racine(x)
}

/// √n : entier si carré parfait, sinon c·√r (extraction des carrés).
fn racine_entiere(n: u64) -> Expr {
    if let Some(r) = racine_carree_exacte(n) {
        return Expr::Nombre(r as f64);
    }
    let f = factorize_radicand(n);
    let racine = Expr::racine(Expr::Nombre(f.radicande as f64));
    if f.coefficient > 1 {
        Expr::mul(Expr::Nombre(f.coefficient as f64), racine)
    } else {
        racine
    }
}

fn racine_carree_exacte(n: u64) -> Option<u64> {
    let r = (n as f64).sqrt().round() as u64;
    (r.checked_mul(r) == Some(n)).then_some(r)
}

fn racine_cubique_exacte(v: f64) -> Option<f64> {
    if !v.is_finite() || v.fract() != 0.0 {
        return None;
    }
    let r = v.cbrt().round();
    (r * r * r == v).then_some(r)
}

/* ------------------------ Unaires ------------------------ */

fn simplifier_un(op: OpUn, x: Expr) -> Expr {
    match (op, x) {
        // --a => a
        (OpUn::Neg, Expr::Un(OpUn::Neg, y)) => *y,

        (OpUn::Sqrt, Expr::Nombre(v)) => match entier_exact(v).and_then(racine_carree_exacte) {
            Some(r) => Expr::Nombre(r as f64),
            None => Expr::un(OpUn::Sqrt, Expr::Nombre(v)),
        },

        (OpUn::Cbrt, Expr::Nombre(v)) => match racine_cubique_exacte(v) {
            Some(r) => Expr::Nombre(r),
            None => Expr::un(OpUn::Cbrt, Expr::Nombre(v)),
        },

        (op, x) => Expr::un(op, x),
    }
}

/* ------------------------ Puissances ------------------------ */

fn simplifier_puissance(base: Expr, exposant: Expr, cfg: &Config) -> Expr {
    if est_zero(&exposant, cfg) {
        return Expr::Nombre(1.0);
    }
    if est_un(&exposant, cfg) {
        return base;
    }
    if est_zero(&base, cfg) && matches!(exposant, Expr::Nombre(e) if e > 0.0) {
        return Expr::Nombre(0.0);
    }
    if est_un(&base, cfg) {
        return Expr::Nombre(1.0);
    }
    if let (Expr::Nombre(b), Expr::Nombre(e)) = (&base, &exposant) {
        return Expr::Nombre(b.powf(*e));
    }
    Expr::puissance(base, exposant)
}
