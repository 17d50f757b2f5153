// src/noyau/format.rs
//
// Affichage borné d’un résultat f64.
// - texte_naturel   : écriture "naturelle" (scientifique seulement hors [1e-6, 1e21[)
// - format_result   : budget de largeur (max_chiffres), PAS une garantie de précision
//
// Les arrondis de troncature sont attendus (budget d’affichage).

/// Écriture naturelle d’un f64 :
/// - plus courte représentation décimale relisible
/// - notation scientifique `1.5e+21` / `1e-7` si |v| >= 1e21 ou |v| < 1e-6
/// - `-0` s’écrit `0`
pub fn texte_naturel(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let a = v.abs();
    if !(1e-6..1e21).contains(&a) {
        return exposant_signe(format!("{v:e}"));
    }
    format!("{v}")
}

/// `1.5e21` -> `1.5e+21` (exposant toujours signé).
fn exposant_signe(s: String) -> String {
    match s.split_once('e') {
        Some((mantisse, exp)) if !exp.starts_with('-') => format!("{mantisse}e+{exp}"),
        _ => s,
    }
}

/// Notation exponentielle avec `decimales` chiffres après la virgule.
pub fn to_exponential(v: f64, decimales: usize) -> String {
    if !v.is_finite() {
        return texte_naturel(v);
    }
    exposant_signe(format!("{v:.decimales$e}"))
}

/// Virgule fixe bornée : si l’arrondi propage une retenue (9.999… -> 10.00…)
/// et dépasse la largeur, on retire une décimale.
fn to_fixed_borne(v: f64, decimales: usize, max_chiffres: usize) -> String {
    let mut d = decimales;
    loop {
        let s = format!("{v:.d$}");
        if s.len() <= max_chiffres || d == 0 {
            return s;
        }
        d -= 1;
    }
}

/// Formate un résultat pour l’écran (largeur `max_chiffres`).
///
/// Règles :
/// - déjà en notation scientifique => inchangé
/// - longueur <= max_chiffres => inchangé
/// - partie fractionnaire :
///     - partie entière >= max_chiffres caractères => exponentielle (max_chiffres - 5 décimales)
///     - sinon => virgule fixe, `max_chiffres - len(entier) - 1` décimales
/// - pas de partie fractionnaire => exponentielle (max_chiffres - 5 décimales)
pub fn format_result(v: f64, max_chiffres: usize) -> String {
    let s = texte_naturel(v);
    if s.contains('e') || s.len() <= max_chiffres {
        return s;
    }

    let decimales_exp = max_chiffres.saturating_sub(5);

    match s.split_once('.') {
        Some((entier, _)) if entier.len() >= max_chiffres => to_exponential(v, decimales_exp),
        Some((entier, _)) => {
            let decimales = max_chiffres - entier.len() - 1;
            to_fixed_borne(v, decimales, max_chiffres)
        }
        None => to_exponential(v, decimales_exp),
    }
}
