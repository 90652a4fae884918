//! Tests scientifiques (campagne) : scénarios de bout en bout + propriétés.
//!
//! But : fixer les écritures attendues pour les nombres "connus",
//! puis vérifier des invariants sur des nombres quelconques.
//! - convert : sortie exacte attendue (compacte et espacée)
//! - décomposition : l’arbre brut simplifié s’évalue bien en x
//! - simplify : une seconde passe ne change plus l’écriture
//!
//! Notes :
//! - Les valeurs trig sont passées telles que f64 les calcule (sin(π/6) = 0.49999999999999994).
//! - Les propriétés restent sur |x| <= 1000 : au-delà, l’erreur d’arrondi
//!   des produits approche epsilon.

use std::f64::consts::{E, PI};

use proptest::prelude::*;

use super::config::Config;
use super::decompose::Decomposeur;
use super::expr::{priorite_produit, Expr, OpBin};
use super::factorisation::gcd;
use super::{convert, convert_avec_demarche};

fn compact(x: f64) -> String {
    convert(x, &Config::default())
}

fn espace(x: f64) -> String {
    convert(x, &Config::espacee())
}

fn assert_convert(x: f64, attendu: &str) {
    assert_eq!(compact(x), attendu, "x={x:?}");
}

fn assert_convert_espace(x: f64, attendu: &str) {
    assert_eq!(espace(x), attendu, "x={x:?}");
}

/* ------------------------ Rationnels ------------------------ */

#[test]
fn sci_fractions_simples() {
    assert_convert(0.5, "1/2");
    assert_convert(-0.5, "-1/2");
    assert_convert(0.75, "3/4");
    assert_convert(2.0 / 3.0, "2/3");
    assert_convert(345.0 / 456.0, "115/152");
}

#[test]
fn sci_entiers_et_zero() {
    assert_convert(0.0, "0");
    assert_convert(-0.0, "0");
    assert_convert(42.0, "42");
    assert_convert(-7.0, "-7");
    assert_convert(1e6, "1000000");
    assert_convert(1e-12, "0");
    // bruit de calcul
    assert_convert(0.1 + 0.2 - 0.3, "0");
    assert_convert(2.9999999999999996, "3");
}

/* ------------------------ Valeurs non finies ------------------------ */

#[test]
fn sci_valeurs_non_finies() {
    assert_convert(f64::INFINITY, "∞");
    assert_convert(f64::NEG_INFINITY, "-∞");
    assert_convert(f64::NAN, "NaN");
    assert_convert_espace(f64::NAN, "NaN");

    let (_, d) = convert_avec_demarche(f64::NAN, &Config::default());
    assert_eq!(d.etape, "non fini");
    assert!(d.avant.is_empty());
}

/* ------------------------ Constantes et racines ------------------------ */

#[test]
fn sci_constantes_nommees() {
    assert_convert(PI, "π");
    assert_convert(E, "e");
    assert_convert(-PI, "-π");
    assert_convert(2f64.sqrt(), "√2");
    assert_convert(-(2f64.sqrt()), "-√2");
    assert_convert(6f64.sqrt(), "√6");
    assert_convert(2f64.sqrt() * 3f64.sqrt(), "√6");
}

#[test]
fn sci_racines_factorisees() {
    assert_convert(50f64.sqrt(), "5·√2");
    assert_convert(8f64.sqrt(), "2·√2");
    assert_convert(27f64.sqrt(), "3·√3");
    assert_convert(75f64.sqrt(), "5·√3");
    assert_convert(16f64.sqrt(), "4");
}

#[test]
fn sci_racines_cubiques() {
    assert_convert(2f64.cbrt(), "∛2");
    assert_convert(8f64.cbrt(), "2");
}

#[test]
fn sci_quotients() {
    assert_convert(PI / 2.0, "π/2");
    assert_convert(E / 2.0, "e/2");
    assert_convert(2f64.sqrt() / 2.0, "√2/2");
    assert_convert(1.0 / 3f64.sqrt(), "1/√3");
    assert_convert((13f64.sqrt() - 3.0) / 2.0, "(√13-3)/2");
}

/* ------------------------ Trigonométrie ------------------------ */

#[test]
fn sci_valeurs_trig() {
    assert_convert((PI / 6.0).sin(), "1/2");
    assert_convert((PI / 3.0).cos(), "1/2");
    assert_convert((PI / 4.0).sin(), "√2/2");
    assert_convert((PI / 3.0).sin(), "√3/2");
    assert_convert((PI / 3.0).tan(), "√3");
    assert_convert((PI / 4.0).tan(), "1");
    assert_convert((PI / 2.0).cos(), "0");
}

/* ------------------------ Sommes, produits, puissances ------------------------ */

#[test]
fn sci_sommes() {
    assert_convert(2.0 * PI + 1.0, "2·π+1");
    assert_convert(PI - 1.0, "π-1");
    assert_convert(2.0 * PI - 3.0, "2·π-3");
    assert_convert(2f64.sqrt() + 3f64.sqrt(), "√2+√3");
    assert_convert(1.0 + 2.0 * 2f64.sqrt(), "1+2·√2");
    assert_convert(-(2.0 * PI + 1.0), "-(2·π+1)");
    assert_convert(PI / 2.0 + PI / 2.0, "π");
    // et non (√8+2)/2
    assert_convert(1.0 + 2f64.sqrt(), "√2+1");
}

#[test]
fn sci_etapes_des_sommes() {
    let cfg = Config::default();
    assert_eq!(convert_avec_demarche(2.0 * PI + 1.0, &cfg).1.etape, "multiple + reste");
    assert_eq!(convert_avec_demarche(2.0 * PI - 3.0, &cfg).1.etape, "multiple + reste");
    assert_eq!(convert_avec_demarche(PI - 1.0, &cfg).1.etape, "somme");
    assert_eq!(convert_avec_demarche(1.0 + 2.0 * 2f64.sqrt(), &cfg).1.etape, "somme");
    assert_eq!(convert_avec_demarche(1.0 + 2f64.sqrt(), &cfg).1.etape, "somme");
}

#[test]
fn sci_produits() {
    assert_convert(2.0 * PI, "2·π");
    assert_convert(3.0 * E, "3·e");
    assert_convert(-2.0 * PI, "-2·π");
    assert_convert(12.0 * (PI / 6.0).cos(), "6·√3");
    assert_convert(6.0 * (PI / 3.0).sin(), "3·√3");
    assert_convert(2f64.sqrt() * 8f64.sqrt(), "4");
    assert_convert(2f64.sqrt() / 2.0 * 2.0, "√2");
}

#[test]
fn sci_puissances() {
    assert_convert(PI * PI, "π²");
    assert_convert(E * E, "e²");
}

/* ------------------------ Repli décimal ------------------------ */

#[test]
fn sci_repli_decimal() {
    assert_convert(3.14159, "3.14159");
    assert_convert(1e-6, "0.000001");
    assert_convert(0.1234567890123456789, "0.12345679");
    // au-dessus d’epsilon mais sous 10^-8 : jamais "0.00000000"
    assert_convert(1e-9, "1e-9");
    assert_convert(-1e-9, "-1e-9");
}

#[test]
fn sci_precision_du_repli() {
    let x = 0.1234567890123456789;
    let cinq = Config {
        precision: 5,
        ..Config::default()
    };
    let dix = Config {
        precision: 10,
        ..Config::default()
    };
    assert_eq!(convert(x, &cinq), "0.12346");
    assert_eq!(convert(x, &dix), "0.1234567890");
    // une écriture courte n’est jamais tronquée
    assert_eq!(convert(3.14159, &cinq), "3.14159");
}

/* ------------------------ Espacement ------------------------ */

#[test]
fn sci_espacement() {
    assert_convert_espace(345.0 / 456.0, "115 / 152");
    assert_convert_espace(2.0 * PI, "2 · π");
    assert_convert_espace(3.0 * E, "3 · e");
    assert_convert_espace(8f64.sqrt(), "2 · √2");
    assert_convert_espace(2.0 * PI + 1.0, "2 · π + 1");
    assert_convert_espace(PI - 1.0, "π - 1");
    assert_convert_espace(2.0 * PI - 3.0, "2 · π - 3");
    assert_convert_espace(9f64.cbrt(), "∛9");
}

#[test]
fn sci_espacement_des_negatifs() {
    assert_convert_espace(-7.0, "-7");
    assert_convert_espace(-PI, "-(π)");
    assert_convert_espace(-2.0 * PI, "-(2 · π)");
    assert_convert_espace(-0.5, "-(1 / 2)");
}

/* ------------------------ Propriétés ------------------------ */

/// Chaque produit de l’arbre garde l’opérande de plus faible priorité à gauche.
fn produits_ordonnes(e: &Expr) -> bool {
    match e {
        Expr::Bin(op, a, b) => {
            (*op != OpBin::Mul || priorite_produit(a) <= priorite_produit(b))
                && produits_ordonnes(a)
                && produits_ordonnes(b)
        }
        Expr::Puissance(a, b) => produits_ordonnes(a) && produits_ordonnes(b),
        Expr::Un(_, x) | Expr::Racine(x) => produits_ordonnes(x),
        Expr::Nombre(_) | Expr::Constante(..) => true,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// L’arbre simplifié garde la valeur de départ.
    #[test]
    fn prop_valeur_conservee(x in -1000.0f64..1000.0) {
        let cfg = Config::default();
        let arbre = Decomposeur::new(&cfg).parse(x).simplify(&cfg);
        let v = arbre.evaluate();
        prop_assert!(
            (v - x).abs() < cfg.epsilon,
            "x={} arbre={} valeur={}", x, arbre, v
        );
    }

    /// Coefficient numérique puis racine puis le reste, à tous les étages.
    #[test]
    fn prop_produits_ordonnes(x in -1000.0f64..1000.0) {
        let cfg = Config::default();
        let arbre = Decomposeur::new(&cfg).parse(x).simplify(&cfg);
        prop_assert!(produits_ordonnes(&arbre), "x={} arbre={}", x, arbre);
    }

    /// Multiples entiers de constantes et de racines : ordre conservé après simplify.
    #[test]
    fn prop_produits_construits_ordonnes(k in 2u32..=9, i in 0usize..4) {
        let cfg = Config::default();
        let c = [PI, E, 2f64.sqrt(), 3f64.sqrt()][i];
        let arbre = Decomposeur::new(&cfg).parse(f64::from(k) * c).simplify(&cfg);
        prop_assert!(produits_ordonnes(&arbre), "k={} arbre={}", k, arbre);
    }

    /// Une seconde simplification ne change plus l’écriture.
    #[test]
    fn prop_simplify_idempotent(x in -1000.0f64..1000.0) {
        let cfg = Config::default();
        let une = Decomposeur::new(&cfg).parse(x).simplify(&cfg);
        let deux = une.clone().simplify(&cfg);
        prop_assert_eq!(une.format(&cfg), deux.format(&cfg));
    }

    /// Même entrée, même config : même sortie.
    #[test]
    fn prop_convert_deterministe(x in -1000.0f64..1000.0, espacement in any::<bool>()) {
        let cfg = Config { espacement, ..Config::default() };
        prop_assert_eq!(convert(x, &cfg), convert(x, &cfg));
    }

    /// p/q irréductible : écrit tel quel.
    #[test]
    fn prop_fractions_irreductibles(p in 1i64..200, q in 2i64..50, negatif in any::<bool>()) {
        prop_assume!(gcd(p, q) == 1);
        let x = p as f64 / q as f64;
        let (x, attendu) = if negatif {
            (-x, format!("-{p}/{q}"))
        } else {
            (x, format!("{p}/{q}"))
        };
        prop_assert_eq!(compact(x), attendu);
    }

    /// Le multiplicateur entier s’écrit avant la constante.
    #[test]
    fn prop_multiple_entier_en_tete(k in 2u32..=9, pi in any::<bool>()) {
        let (c, symbole) = if pi { (PI, "π") } else { (E, "e") };
        let x = f64::from(k) * c;
        prop_assert_eq!(compact(x), format!("{k}·{symbole}"));
        prop_assert_eq!(compact(-x), format!("-{k}·{symbole}"));
    }
}
