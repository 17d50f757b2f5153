// src/noyau/integrale.rs
//
// Intégration numérique : règle des trapèzes composite.
// - [a, b] découpé en `pas` sous-intervalles égaux
// - poids 0.5 aux extrémités, 1.0 à l’intérieur, somme × largeur
//
// Limite assumée : pas de raffinement adaptatif, pas d’estimation d’erreur.
// La précision est celle que donne le nombre de pas fixé (erreur en O(h²)).

use super::erreurs::EvalError;
use super::eval::evaluate;
use super::expr::Expr;
use super::reglages::PAS_MAX;

/// Intervalle par défaut.
pub const INTERVALLE_DEFAUT: (f64, f64) = (0.0, 1.0);

/// ∫ expr dx sur [a, b] ; échoue dès qu’un point d’échantillonnage échoue.
/// `pas` est ramené dans `1..=PAS_MAX` (0 vaut 1).
pub fn integrate(expr: &Expr, (a, b): (f64, f64), pas: usize) -> Result<f64, EvalError> {
    let n = pas.clamp(1, PAS_MAX);
    let h = (b - a) / n as f64;

    let mut somme = 0.0;
    for i in 0..=n {
        let x = a + i as f64 * h;
        let y = evaluate(expr, Some(x))?;
        let poids = if i == 0 || i == n { 0.5 } else { 1.0 };
        somme += poids * y;
    }

    let r = somme * h;
    log::trace!("∫[{a}, {b}] {expr} dx ({n} pas) = {r}");
    Ok(r)
}
