// src/noyau/format.rs
//
// Affichage "joli" d’un arbre simplifié.
// - produit : "2·π" (ou "2 · π"), ordre canonique re-vérifié ici
// - quotient : "a/b", une somme en opérande est parenthésée
// - racines : √, ∛ ; puissances ² et ³ en exposant
// - nombres : entier, sinon fraction n/d (d <= 1000), sinon décimal borné

use super::config::Config;
use super::expr::{doit_echanger, Expr, OpBin, OpUn};
use super::factorisation::gcd;

/// Dénominateur maximal cherché pour afficher un nombre en fraction.
const DENOMINATEUR_MAX: i64 = 1000;

/// Au-delà de cette longueur, l’écriture décimale brute est tronquée à `precision`.
const LONGUEUR_DECIMALE_MAX: usize = 10;

impl Expr {
    pub fn format(&self, cfg: &Config) -> String {
        match self {
            Expr::Nombre(v) => format_nombre(*v, cfg),
            Expr::Constante(s, _) => s.clone(),
            Expr::Bin(op, a, b) => format_bin(*op, a, b, cfg),
            Expr::Un(op, x) => format_un(*op, x, cfg),
            Expr::Racine(x) => format_racine(x, cfg),
            Expr::Puissance(b, e) => format_puissance(b, e, cfg),
        }
    }
}

/// " op " si espacement, "op" sinon.
fn joindre(a: &str, op: &str, b: &str, cfg: &Config) -> String {
    if cfg.espacement {
        format!("{a} {op} {b}")
    } else {
        format!("{a}{op}{b}")
    }
}

fn est_additif(e: &Expr) -> bool {
    matches!(e, Expr::Bin(op, _, _) if op.est_additif())
}

/// Opérande "atomique" : un nombre dont l’écriture n’est pas une fraction.
fn est_atomique(e: &Expr, rendu: &str) -> bool {
    matches!(e, Expr::Nombre(_)) && !rendu.contains('/')
}

/// Opérande d’un binaire : une somme est parenthésée ("(√13-3)/2", "π-(1+2)").
fn facteur(e: &Expr, cfg: &Config) -> String {
    let s = e.format(cfg);
    if est_additif(e) {
        format!("({s})")
    } else {
        s
    }
}

/* ------------------------ Binaires ------------------------ */

fn format_bin(op: OpBin, a: &Expr, b: &Expr, cfg: &Config) -> String {
    match op {
        OpBin::Mul => {
            let (g, d) = if doit_echanger(a, b) { (b, a) } else { (a, b) };
            joindre(&facteur(g, cfg), op.symbole(), &facteur(d, cfg), cfg)
        }

        OpBin::Div => joindre(&facteur(a, cfg), op.symbole(), &facteur(b, cfg), cfg),

        // chaque côté indépendamment
        OpBin::Add | OpBin::Sub => {
            joindre(&facteur(a, cfg), op.symbole(), &facteur(b, cfg), cfg)
        }
    }
}

/* ------------------------ Unaires / racines / puissances ------------------------ */

fn format_un(op: OpUn, x: &Expr, cfg: &Config) -> String {
    let s = x.format(cfg);
    if s == "0" {
        return s;
    }

    match op {
        OpUn::Neg if est_additif(x) => format!("-({s})"),
        OpUn::Neg if cfg.espacement && !est_atomique(x, &s) => format!("-({s})"),
        OpUn::Neg => format!("-{s}"),
        OpUn::Sqrt => radical("√", x, &s, cfg),
        OpUn::Cbrt => radical("∛", x, &s, cfg),
    }
}

fn format_racine(x: &Expr, cfg: &Config) -> String {
    radical("√", x, &x.format(cfg), cfg)
}

/// "√8", "∛2" ; en mode espacé, un opérande composé est parenthésé ("√(1 / 2)").
fn radical(signe: &str, x: &Expr, s: &str, cfg: &Config) -> String {
    if cfg.espacement && !est_atomique(x, s) {
        format!("{signe}({s})")
    } else {
        format!("{signe}{s}")
    }
}

fn format_puissance(base: &Expr, exposant: &Expr, cfg: &Config) -> String {
    let b = base.format(cfg);
    let b = match base {
        Expr::Constante(..) | Expr::Racine(_) => b,
        Expr::Nombre(_) if est_atomique(base, &b) && !b.starts_with('-') => b,
        _ => format!("({b})"),
    };
    let e = exposant.evaluate();

    if cfg.proche(e, 2.0) {
        return format!("{b}²");
    }
    if cfg.proche(e, 3.0) {
        return format!("{b}³");
    }
    joindre(&b, "^", &exposant.format(cfg), cfg)
}

/* ------------------------ Nombres ------------------------ */

fn format_nombre(v: f64, cfg: &Config) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.abs() < cfg.epsilon {
        return "0".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    if v.fract() == 0.0 {
        return format!("{v}");
    }

    if let Some((n, d)) = fraction_proche(v, cfg) {
        return joindre(&n.to_string(), "/", &d.to_string(), cfg);
    }

    let brut = format!("{v}");
    if brut.chars().count() <= LONGUEUR_DECIMALE_MAX {
        return brut;
    }
    // trop petit pour `precision` décimales : "0.00000000" relirait 0
    if v.abs() < 10f64.powi(-(cfg.precision as i32)) {
        return format!("{v:e}");
    }
    format!("{v:.prec$}", prec = cfg.precision)
}

/// Plus petit dénominateur d <= 1000 tel que v ≈ n/d, réduit.
fn fraction_proche(v: f64, cfg: &Config) -> Option<(i64, i64)> {
    (2..=DENOMINATEUR_MAX).find_map(|d| {
        let n = (v * d as f64).round();
        if !cfg.proche(v, n / d as f64) {
            return None;
        }
        let n = n as i64;
        let g = gcd(n, d).max(1);
        Some((n / g, d / g))
    })
}
