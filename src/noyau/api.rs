//! Noyau — frontière publique (appelée par la couche présentation)
//!
//! Toutes les fonctions rendent des valeurs simples ; aucune ne panique.
//! La couche présentation affiche `DisplayError` comme "Error" si elle veut
//! reproduire le comportement de l’écran.

use super::derivee::{derivee_en, differentiate};
use super::erreurs::{DisplayError, EvalError};
use super::eval::{appliquer, evaluate};
use super::expr::{FunctionKind, VAR_X};
use super::format::format_result;
use super::integrale::integrate;
use super::reglages::Reglages;
use super::rpn::parse;
use super::trace::{sample, GraphRange, Trace};

/// Touche "fonction" de la calculatrice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FonctionTouche {
    /// Fonction scalaire appliquée à la valeur affichée.
    Scalaire(FunctionKind),
    /// d/dx de l’expression affichée, évaluée au point réglé.
    Derivee,
    /// ∫ de l’expression affichée sur l’intervalle réglé.
    Integrale,
}

impl FonctionTouche {
    /// Nom utilisé dans l’historique : `<nom>(<affichage>) = <résultat>`.
    pub fn nom(self) -> &'static str {
        match self {
            FonctionTouche::Scalaire(f) => f.nom(),
            FonctionTouche::Derivee => "derivative",
            FonctionTouche::Integrale => "integrate",
        }
    }
}

/// Valeur numérique d’un texte arithmétique (x non liée).
pub fn valeur(text: &str) -> Result<f64, DisplayError> {
    let ast = parse(text)?;
    Ok(evaluate(&ast, None)?)
}

/// `=` : évalue et formate.
pub fn evaluate_expression(text: &str, max_chiffres: usize) -> Result<String, DisplayError> {
    let v = valeur(text)?;
    let s = format_result(v, max_chiffres);
    log::debug!("{text} = {s}");
    Ok(s)
}

/// Applique une touche fonction au texte affiché, puis formate.
pub fn apply_function(
    kind: FonctionTouche,
    text: &str,
    reglages: &Reglages,
) -> Result<String, DisplayError> {
    let v = match kind {
        FonctionTouche::Scalaire(f) => appliquer(f, valeur(text)?)?,
        FonctionTouche::Derivee => differentiate_at(text, reglages.point_derivee)?,
        FonctionTouche::Integrale => integrate_over(
            text,
            reglages.intervalle_integrale,
            reglages.pas_integrale,
        )?,
    };
    let s = format_result(v, reglages.max_chiffres);
    log::debug!("{}({text}) = {s}", kind.nom());
    Ok(s)
}

/// d/dx du texte, évaluée en `point`.
pub fn differentiate_at(text: &str, point: f64) -> Result<f64, DisplayError> {
    let ast = parse(text)?;
    Ok(derivee_en(&ast, point)?)
}

/// Dérivée symbolique simplifiée, en texte re-lisible.
/// Une dérivée dégénérée (fact(x), f % g…) contient NaN : `Domain` plutôt qu’un texte
/// que le parseur refuserait.
pub fn derivative_text(text: &str) -> Result<String, DisplayError> {
    let ast = parse(text)?;
    let d = differentiate(&ast, VAR_X).simplify();
    if !d.nombres_finis() {
        return Err(EvalError::Domain("dérivée symbolique non définie").into());
    }
    Ok(d.to_string())
}

/// ∫ du texte sur `interval` avec `steps` trapèzes.
pub fn integrate_over(
    text: &str,
    interval: (f64, f64),
    steps: usize,
) -> Result<f64, DisplayError> {
    let ast = parse(text)?;
    Ok(integrate(&ast, interval, steps)?)
}

/// Données de tracé (jamais d’erreur : repli + points omis).
pub fn sample_range(text: &str, range: &GraphRange) -> Trace {
    sample(text, range)
}
