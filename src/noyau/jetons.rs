// src/noyau/jetons.rs

use std::fmt;

use super::erreurs::ParseError;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions, constantes et variable (tout ce qui n’est pas opérateur / nombre)
    // NOTE: le parse (RPN) décidera si c’est une fonction, une constante ou `x`.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
    Percent,

    LPar,
    RPar,
    Comma,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5) avec au plus un point
/// - notation scientifique collée (ex: 1.5e+21) : relit un résultat formaté
/// - opérateurs + - * / ^ %
/// - parenthèses ( ) et virgule
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
/// - π (équivaut à ident("pi")), √ (équivaut à ident("sqrt")), × ÷ −
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ParseError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Ponctuation + opérateurs (un caractère)
        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Comma),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' | '×' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '%' => Some(Tok::Percent),
            'π' => Some(Tok::Ident("pi".to_string())),
            '√' => Some(Tok::Ident("sqrt".to_string())),
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

        // Nombre : chiffres + au plus un point, puis exposant optionnel
        let point_puis_chiffre =
            c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit();
        if c.is_ascii_digit() || point_puis_chiffre {
            let start = i;
            let mut points = 0;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    points += 1;
                }
                i += 1;
            }

            // exposant: e5, e+5, e-5 (sinon `e` reste la constante, et sera refusé plus loin)
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let suivant = chars.get(i + 1).copied();
                let apres = chars.get(i + 2).copied();
                let chiffre = |c: Option<char>| c.is_some_and(|c| c.is_ascii_digit());
                let avec_signe = matches!(suivant, Some('+' | '-')) && chiffre(apres);
                if chiffre(suivant) || avec_signe {
                    i += if avec_signe { 2 } else { 1 };
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }

            let texte: String = chars[start..i].iter().collect();
            if points > 1 {
                return Err(ParseError::NombreInvalide(texte));
            }
            let v = texte
                .parse::<f64>()
                .map_err(|_| ParseError::NombreInvalide(texte.clone()))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ParseError::CaractereInattendu(c));
    }

    Ok(out)
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "{v}"),
            Tok::Ident(name) => write!(f, "{name}"),
            Tok::Plus => write!(f, "+"),
            Tok::Minus => write!(f, "-"),
            Tok::Star => write!(f, "*"),
            Tok::Slash => write!(f, "/"),
            Tok::Caret => write!(f, "^"),
            Tok::Percent => write!(f, "%"),
            Tok::LPar => write!(f, "("),
            Tok::RPar => write!(f, ")"),
            Tok::Comma => write!(f, ","),
        }
    }
}

/// Format utilitaire (debug) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
