// src/noyau/jetons.rs

use super::erreur::ErreurLecture;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions + constantes nommées, normalisées en minuscules ASCII
    // (π -> "pi", φ -> "phi", √ -> "sqrt", ∛ -> "cbrt").
    // La RPN décidera si c’est une fonction ou une constante.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    // moins unaire (produit par to_rpn, jamais par tokenize)
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 0.5, 1e-6)
/// - opérateurs + - * / ^ (et × · ÷)
/// - parenthèses ( )
/// - π, φ, √, ∛
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurLecture> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' | '×' | '·' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            'π' => Some(Tok::Ident("pi".to_string())),
            'φ' => Some(Tok::Ident("phi".to_string())),
            '√' => Some(Tok::Ident("sqrt".to_string())),
            '∛' => Some(Tok::Ident("cbrt".to_string())),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_lowercase()));
            continue;
        }

        // Nombre décimal : chiffres [. chiffres] [e [+-] chiffres]
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            i = lire_exposant(&chars, i);

            let texte: String = chars[start..i].iter().collect();
            let v = texte
                .parse::<f64>()
                .map_err(|_| ErreurLecture::NombreInvalide(texte.clone()))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurLecture::Caractere(c));
    }

    if out.is_empty() {
        return Err(ErreurLecture::Vide);
    }
    Ok(out)
}

/// "e-6" après une mantisse : seulement si un chiffre suit (sinon 'e' est la constante).
fn lire_exposant(chars: &[char], i: usize) -> usize {
    if i >= chars.len() || !matches!(chars[i], 'e' | 'E') {
        return i;
    }
    let mut j = i + 1;
    if j < chars.len() && matches!(chars[j], '+' | '-') {
        j += 1;
    }
    if j >= chars.len() || !chars[j].is_ascii_digit() {
        return i;
    }
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }
    j
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
