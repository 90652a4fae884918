// src/noyau/fractions_continues.rs
//
// Fractions continues
// -------------------
// - x -> [a0; a1, a2, ...] (termes entiers, arrêt dès que le reste < epsilon)
// - termes -> (numérateur, dénominateur) par récurrence arrière, en BigInt
//   (les termes peuvent être énormes : pas de débordement i64 silencieux)
// - convergents = réduites successives
// - reconnaissance "best effort" des irrationnels quadratiques
//
// Limite documentée : la reconstruction depuis une période quelconque
// ne reconnaît que les racines pures √N (période terminée par 2·a0).
// Ce n’est PAS un solveur de Pell.

use log::trace;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

use super::factorisation::factorize_radicand;

/// Réduite : (numérateur, dénominateur).
pub type Convergent = (BigInt, BigInt);

/// Bornes de la recherche brute (√n ± m)/k.
const QUADRATIQUE_N_MAX: u64 = 30;
const QUADRATIQUE_M_MAX: u64 = 10;
const QUADRATIQUE_K_MAX: u64 = 10;

/// Nombre de termes calculés pour la détection de période.
const TERMES_PERIODE: usize = 30;

/// Au-delà de quelques termes, l’erreur flottante s’amplifie : on ne compare que ce préfixe.
const FENETRE_MOTIF: usize = 8;

/// Période maximale cherchée par l’heuristique.
const PERIODE_MAX: usize = 6;

/// Motif périodique connu : [a0; periode, periode, ...] = √radicande
struct MotifPeriodique {
    a0: i64,
    periode: &'static [i64],
    radicande: u64,
}

const MOTIFS: &[MotifPeriodique] = &[
    MotifPeriodique { a0: 1, periode: &[2], radicande: 2 },
    MotifPeriodique { a0: 1, periode: &[1, 2], radicande: 3 },
    MotifPeriodique { a0: 2, periode: &[4], radicande: 5 },
    MotifPeriodique { a0: 2, periode: &[2, 4], radicande: 6 },
    MotifPeriodique { a0: 2, periode: &[1, 1, 1, 4], radicande: 7 },
    MotifPeriodique { a0: 2, periode: &[1, 4], radicande: 8 },
];

/// Termes de la fraction continue de `x`, au plus `max_terms`.
///
/// Un `x` non fini donne une liste vide.
pub fn to_continued_fraction(x: f64, max_terms: usize, epsilon: f64) -> Vec<i64> {
    let mut termes = Vec::with_capacity(max_terms);
    if !x.is_finite() {
        return termes;
    }

    let mut x = x;
    for _ in 0..max_terms {
        let a = x.floor();
        termes.push(a as i64);

        let reste = x - a;
        if reste.abs() < epsilon {
            break;
        }
        x = 1.0 / reste;
    }
    termes
}

/// Reconstruit (numérateur, dénominateur) depuis les termes (du dernier au premier) :
/// num' = a·num + den ; den' = num
pub fn from_continued_fraction(termes: &[i64]) -> Convergent {
    let Some((dernier, reste)) = termes.split_last() else {
        return (BigInt::zero(), BigInt::one());
    };

    let mut num = BigInt::from(*dernier);
    let mut den = BigInt::one();

    for &a in reste.iter().rev() {
        let nouveau = BigInt::from(a) * &num + &den;
        den = num;
        num = nouveau;
    }
    (num, den)
}

/// Toutes les réduites (un préfixe non vide après l’autre).
pub fn convergents(termes: &[i64]) -> Vec<Convergent> {
    (1..=termes.len())
        .map(|i| from_continued_fraction(&termes[..i]))
        .collect()
}

/// Première réduite de `x` (sur `n_termes` termes) assez petite et à epsilon de `x`.
/// Retour réduit (p, q), q > 0.
pub(crate) fn approximation_rationnelle(
    x: f64,
    n_termes: usize,
    den_max: i64,
    num_max: i64,
    epsilon: f64,
) -> Option<(i64, i64)> {
    let termes = to_continued_fraction(x, n_termes, epsilon);

    for (p, q) in convergents(&termes) {
        if q.is_zero() {
            continue;
        }
        // BigRational : normalise signe + réduction
        let r = BigRational::new(p, q);
        let (Some(p), Some(q)) = (r.numer().to_i64(), r.denom().to_i64()) else {
            continue;
        };
        if q > den_max || p.abs() > num_max {
            continue;
        }
        if (x - p as f64 / q as f64).abs() < epsilon {
            return Some((p, q));
        }
    }
    None
}

fn est_carre_parfait(n: u64) -> bool {
    let r = (n as f64).sqrt().round() as u64;
    r * r == n
}

/// Essaie de reconnaître un irrationnel quadratique simple. Renvoie la forme exacte
/// ("√7", "φ", "(√13-3)/2"...) ou None.
///
/// Ordre : √n direct, φ et son conjugué, recherche (√n ± m)/k, puis périodes.
pub fn identify_quadratic_irrational(x: f64, epsilon: f64) -> Option<String> {
    if !x.is_finite() {
        return None;
    }
    let proche = |v: f64| (x - v).abs() < epsilon;

    // (a) √n direct
    for n in 2..=QUADRATIQUE_N_MAX {
        if !est_carre_parfait(n) && proche((n as f64).sqrt()) {
            return Some(format!("√{n}"));
        }
    }

    // (b) φ et conjugué
    let racine5 = 5f64.sqrt();
    if proche((1.0 + racine5) / 2.0) {
        return Some("φ".to_string());
    }
    if proche((racine5 - 1.0) / 2.0) {
        return Some("(√5-1)/2".to_string());
    }

    // (c) (√n ± m)/k, radicande sans facteur carré :
    // (√8+2)/2 ne se réduit pas en √2+1 ensuite
    for n in 2..=QUADRATIQUE_N_MAX {
        if factorize_radicand(n).coefficient != 1 {
            continue;
        }
        let r = (n as f64).sqrt();
        for k in 2..=QUADRATIQUE_K_MAX {
            for m in 1..=QUADRATIQUE_M_MAX {
                let (mf, kf) = (m as f64, k as f64);
                if proche((r + mf) / kf) {
                    return Some(format!("(√{n}+{m})/{k}"));
                }
                if proche((r - mf) / kf) {
                    return Some(format!("(√{n}-{m})/{k}"));
                }
            }
        }
    }

    // (d) périodes
    let termes = to_continued_fraction(x, TERMES_PERIODE, epsilon);
    if let Some(n) = motif_connu(&termes).or_else(|| radicande_depuis_periode(&termes, x)) {
        if proche((n as f64).sqrt()) {
            trace!("période reconnue : √{n}");
            return Some(format!("√{n}"));
        }
    }

    None
}

fn motif_connu(termes: &[i64]) -> Option<u64> {
    if termes.len() <= FENETRE_MOTIF {
        return None;
    }
    MOTIFS
        .iter()
        .find(|m| {
            termes[0] == m.a0
                && termes[1..=FENETRE_MOTIF]
                    .iter()
                    .enumerate()
                    .all(|(i, &t)| t == m.periode[i % m.periode.len()])
        })
        .map(|m| m.radicande)
}

/// Heuristique : si [a0; p1..pk, p1..pk, ...] avec pk = 2·a0, alors x ≈ √N avec N = round(x²).
/// Le candidat est re-vérifié à epsilon par l’appelant.
fn radicande_depuis_periode(termes: &[i64], x: f64) -> Option<u64> {
    let a0 = *termes.first()?;
    if a0 < 1 {
        return None;
    }

    let periode = (1..=PERIODE_MAX).find(|&p| {
        termes.len() > 2 * p
            && termes[p] == 2 * a0
            && termes[1..=p] == termes[p + 1..=2 * p]
    })?;
    trace!("période {periode} détectée pour a0 = {a0}");

    let n = (x * x).round();
    if n >= 2.0 && n.is_finite() {
        Some(n as u64)
    } else {
        None
    }
}
