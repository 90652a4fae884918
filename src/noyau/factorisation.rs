// src/noyau/factorisation.rs
//
// Outils entiers : pgcd, primalité, extraction des carrés parfaits d’un radicande,
// et la politique "garder √n tel quel".

use num_integer::Integer;

/// Plus grand entier représenté exactement par un f64 (2^53).
const ENTIER_F64_MAX: f64 = 9_007_199_254_740_992.0;

/// Radicande décomposé : n = coefficient² * radicande.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Radicande {
    pub coefficient: u64,
    pub radicande: u64,
}

/// PGCD (toujours >= 0).
pub fn gcd(a: i64, b: i64) -> i64 {
    a.gcd(&b)
}

/// Primalité par essais 6k ± 1.
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut i: u64 = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Décompose n en coefficient² * radicande (extraction des carrés parfaits par essais).
///
/// Le même diviseur est retenté tant qu’il divise encore (ex: 16 = 4² * 1).
pub fn factorize_radicand(n: u64) -> Radicande {
    let mut reste = n;
    let mut coefficient: u64 = 1;

    let mut i: u64 = 2;
    while i * i <= reste {
        let carre = i * i;
        if reste % carre == 0 {
            coefficient *= i;
            reste /= carre;
            continue;
        }
        i += 1;
    }

    Radicande {
        coefficient,
        radicande: reste,
    }
}

/// √n reste-t-il sous forme directe ?
/// - n premier : oui
/// - n <= 30 : oui
/// - sinon : seulement si n n’a aucun facteur carré
pub fn should_preserve_direct_radical(n: u64) -> bool {
    if is_prime(n) {
        return true;
    }
    if n <= 30 {
        return true;
    }
    factorize_radicand(n).coefficient == 1
}

/// f64 -> u64 si la valeur est un entier positif exactement représentable.
pub(crate) fn entier_exact(v: f64) -> Option<u64> {
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= ENTIER_F64_MAX {
        Some(v as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pgcd_signe() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn premiers() {
        let premiers: Vec<u64> = (0..40).filter(|&n| is_prime(n)).collect();
        assert_eq!(
            premiers,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37]
        );
        assert!(is_prime(7919));
        assert!(!is_prime(7917));
    }

    #[test]
    fn extraction_carres() {
        let r = |n| {
            let f = factorize_radicand(n);
            (f.coefficient, f.radicande)
        };
        assert_eq!(r(50), (5, 2));
        assert_eq!(r(75), (5, 3));
        assert_eq!(r(72), (6, 2));
        assert_eq!(r(16), (4, 1));
        assert_eq!(r(30), (1, 30));
        assert_eq!(r(1), (1, 1));
        assert_eq!(r(0), (1, 0));
    }

    #[test]
    fn politique_radical_direct() {
        // petits : toujours directs
        assert!(should_preserve_direct_radical(8));
        assert!(should_preserve_direct_radical(27));
        // premiers
        assert!(should_preserve_direct_radical(97));
        // sans facteur carré
        assert!(should_preserve_direct_radical(35));
        // > 30 avec facteur carré
        assert!(!should_preserve_direct_radical(50));
        assert!(!should_preserve_direct_radical(75));
    }

    #[test]
    fn entier_exact_refuse_le_reste() {
        assert_eq!(entier_exact(50.0), Some(50));
        assert_eq!(entier_exact(2.5), None);
        assert_eq!(entier_exact(-4.0), None);
        assert_eq!(entier_exact(f64::INFINITY), None);
    }
}
