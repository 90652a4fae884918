//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   * une saisie bien formée est toujours lue (pas d’erreur, pas de panique)
//!   * NaN / ±∞ : EXACT == lecture décimale
//!   * EXACT relu (quand il est relisible) redonne la valeur de départ

use std::time::{Duration, Instant};

use super::config::Config;
use super::erreur::ErreurLecture;
use super::eval_expression;
use super::rpn::evaluer_texte;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_entier(rng: &mut Rng) -> String {
    // inclut 0 : les divisions par zéro doivent donner ∞ / NaN, jamais une erreur
    format!("{}", rng.pick(13))
}

fn gen_fraction(rng: &mut Rng) -> String {
    let a = rng.pick(10);
    let b = 1 + rng.pick(9);
    format!("{a}/{b}")
}

fn gen_constante(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "pi",
        1 => "π",
        2 => "e",
        3 => "phi",
        4 => "φ",
        _ => "2",
    }
    .to_string()
}

fn gen_racine(rng: &mut Rng) -> String {
    let n = 2 + rng.pick(60);
    match rng.pick(4) {
        0 => format!("sqrt({n})"),
        1 => format!("√{n}"),
        2 => format!("cbrt({n})"),
        _ => format!("∛({n})"),
    }
}

fn gen_trig(rng: &mut Rng) -> String {
    let f = match rng.pick(3) {
        0 => "sin",
        1 => "cos",
        _ => "tan",
    };
    let d = match rng.pick(5) {
        0 => 2,
        1 => 3,
        2 => 4,
        3 => 6,
        _ => 12,
    };
    if rng.coin() {
        format!("{f}(pi/{d})")
    } else {
        format!("{f}({}*π/{d})", 1 + rng.pick(5))
    }
}

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(5) {
        0 => gen_entier(rng),
        1 => gen_fraction(rng),
        2 => gen_constante(rng),
        3 => gen_racine(rng),
        _ => gen_trig(rng),
    }
}

fn gen_expr(rng: &mut Rng, profondeur: u32) -> String {
    if profondeur == 0 || rng.pick(3) == 0 {
        return gen_atome(rng);
    }

    let a = gen_expr(rng, profondeur - 1);
    match rng.pick(7) {
        0 => format!("{a} + {}", gen_expr(rng, profondeur - 1)),
        1 => format!("{a} - {}", gen_expr(rng, profondeur - 1)),
        2 => format!("{a}*{}", gen_expr(rng, profondeur - 1)),
        3 => format!("({a})/({})", gen_expr(rng, profondeur - 1)),
        4 => format!("({a})^{}", 2 + rng.pick(2)),
        5 => format!("-({a})"),
        _ => format!("({a})"),
    }
}

/* ------------------------ Invariants ------------------------ */

fn est_non_fini(s: &str) -> bool {
    matches!(s, "NaN" | "∞" | "-∞")
}

fn check_non_fini(exact: &str, lecture: &str) {
    if est_non_fini(lecture) {
        assert_eq!(exact, lecture, "valeur non finie : EXACT doit reprendre la sentinelle");
    }
}

/// EXACT relu doit redonner la lecture décimale.
/// "π²", "log₂(e)"... ne sont pas relisibles : seule une erreur de caractère est admise.
fn check_relecture(expr: &str, exact: &str, lecture: &str) {
    if est_non_fini(lecture) {
        return;
    }
    let Ok(attendu) = lecture.parse::<f64>() else {
        panic!("lecture illisible expr={expr:?} lecture={lecture:?}");
    };

    match evaluer_texte(exact) {
        Ok(v) => {
            let tol = 1e-7 * attendu.abs().max(1.0);
            assert!(
                (v - attendu).abs() < tol,
                "expr={expr:?} exact={exact:?} relu={v} attendu={attendu}"
            );
        }
        Err(ErreurLecture::Caractere(_)) => {}
        Err(e) => panic!("expr={expr:?} exact={exact:?} relecture: {e}"),
    }
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_pipeline_saisies_bien_formees() {
    let start = Instant::now();
    let max = Duration::from_secs(20);
    let cfg = Config::default();
    let mut rng = Rng::new(0x5EED_1234);

    for _ in 0..300 {
        budget(start, max);

        let expr = gen_expr(&mut rng, 3);
        let (exact, lecture, d) =
            eval_expression(&expr, &cfg).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));

        assert!(!exact.trim().is_empty(), "expr={expr:?}");
        assert!(!exact.contains("neg("), "arbre de debug dans EXACT : {exact:?}");
        assert!(!d.jetons.is_empty(), "expr={expr:?}");
        assert!(!d.rpn.is_empty(), "expr={expr:?}");

        check_non_fini(&exact, &lecture);
        check_relecture(&expr, &exact, &lecture);
    }
}

#[test]
fn fuzz_determinisme() {
    let start = Instant::now();
    let max = Duration::from_secs(10);
    let mut rng = Rng::new(42);

    for _ in 0..100 {
        budget(start, max);

        let expr = gen_expr(&mut rng, 2);
        let cfg = Config {
            espacement: rng.coin(),
            ..Config::default()
        };
        let a = eval_expression(&expr, &cfg).map(|(exact, lecture, _)| (exact, lecture));
        let b = eval_expression(&expr, &cfg).map(|(exact, lecture, _)| (exact, lecture));
        assert_eq!(a, b, "expr={expr:?}");
    }
}

#[test]
fn fuzz_saisies_cassees() {
    let start = Instant::now();
    let max = Duration::from_secs(10);
    let cfg = Config::default();
    let mut rng = Rng::new(7);

    let parasites = ['(', ')', '+', '*', '#', '^', '/'];

    for _ in 0..200 {
        budget(start, max);

        // on abîme une saisie valide : jamais de panique, au pire une erreur
        let mut expr = gen_expr(&mut rng, 2);
        let p = parasites[rng.pick(parasites.len() as u32) as usize];
        let n = expr.chars().count() as u32;
        let pos = rng.pick(n + 1) as usize;
        let idx = expr.char_indices().nth(pos).map_or(expr.len(), |(i, _)| i);
        expr.insert(idx, p);

        if let Ok((exact, lecture, _)) = eval_expression(&expr, &cfg) {
            check_non_fini(&exact, &lecture);
        }
    }
}

#[test]
fn fuzz_valeurs_brutes() {
    let start = Instant::now();
    let max = Duration::from_secs(10);
    let cfg = Config::default();
    let mut rng = Rng::new(2024);

    for _ in 0..300 {
        budget(start, max);

        // x = a/b · 10^k, tout le spectre des échelles raisonnables
        let a = f64::from(rng.pick(100_000));
        let b = f64::from(1 + rng.pick(1000));
        let k = rng.pick(13) as i32 - 6;
        let x = a / b * 10f64.powi(k);
        let x = if rng.coin() { -x } else { x };

        let exact = super::convert(x, &cfg);
        assert!(!exact.is_empty(), "x={x:?}");
        assert!(!est_non_fini(&exact), "x={x:?} exact={exact:?}");
    }
}
