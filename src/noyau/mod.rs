//! Noyau de la calculatrice scientifique (f64)
//!
//! Organisation interne :
//! - erreurs.rs   : ParseError / EvalError / DisplayError / RangeError
//! - reglages.rs  : chiffres affichés, point de dérivée, intervalle + pas d’intégrale
//! - expr.rs      : AST (Expr, FunctionKind) + Display + simplify
//! - jetons.rs    : tokenisation
//! - rpn.rs       : shunting-yard + construction Expr (`parse`)
//! - eval.rs      : évaluation f64 avec contrôle de domaine
//! - derivee.rs   : dérivation symbolique
//! - integrale.rs : trapèzes composites
//! - format.rs    : texte écran (budget de chiffres, exponentielle)
//! - trace.rs     : échantillonnage pour le graphe
//! - api.rs       : frontière appelée par la présentation
//! - machine.rs   : état de la calculatrice + transitions par touche

pub mod api;
pub mod derivee;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod integrale;
pub mod jetons;
pub mod machine;
pub mod reglages;
pub mod rpn;
pub mod trace;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use api::{
    apply_function, derivative_text, differentiate_at, evaluate_expression, integrate_over,
    sample_range, FonctionTouche,
};
pub use erreurs::{DisplayError, EvalError, ParseError, RangeError};
pub use expr::{Constante, Expr, FunctionKind};
pub use machine::{advance, CalculatorState, GenreTouche, Touche};
pub use reglages::Reglages;
pub use rpn::parse;
pub use trace::{GraphRange, Sample, Trace};
