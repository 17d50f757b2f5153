//! Noyau — évaluation numérique (f64)
//!
//! Pure, sans état global : `evaluate(expr, x)` ne lit que l’arbre et la liaison de `x`.
//!
//! Conventions (domaine) :
//! - division / modulo par 0 exact => DivisionByZero
//! - 0^négatif => DivisionByZero
//! - base négative ^ exposant non entier => Domain
//! - asin/acos hors [-1, 1] => Domain
//! - ln/log10 : argument <= 0 => Domain (0 compris)
//! - sqrt : argument < 0 => Domain, sqrt(0) = 0
//! - factorielle : entier >= 0 (tolérance 1e-9), calcul itératif, ∞ => Overflow
//! - tout résultat intermédiaire NaN => Domain, ±∞ => Overflow

use super::erreurs::EvalError;
use super::expr::{BinOp, Expr, FunctionKind, UnOp, VAR_X};

/// Tolérance "entier" pour la factorielle.
const TOLERANCE_ENTIER: f64 = 1e-9;

/// Contrôle de finitude d’un résultat.
fn verifie(v: f64) -> Result<f64, EvalError> {
    if v.is_nan() {
        Err(EvalError::Domain("résultat indéterminé"))
    } else if v.is_infinite() {
        Err(EvalError::Overflow)
    } else {
        Ok(v)
    }
}

/// Évalue une expression. `x` : valeur liée à la variable libre (None => non liée).
pub fn evaluate(expr: &Expr, x: Option<f64>) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(v) => verifie(*v),

        Expr::Variable(name) if name == VAR_X => x.ok_or(EvalError::VariableLibre),
        Expr::Variable(_) => Err(EvalError::VariableLibre),

        Expr::Constant(c) => Ok(c.valeur()),

        Expr::UnaryOp(UnOp::Neg, a) => Ok(-evaluate(a, x)?),

        Expr::Call(f, a) => appliquer(*f, evaluate(a, x)?),

        Expr::BinaryOp(op, a, b) => {
            let va = evaluate(a, x)?;
            let vb = evaluate(b, x)?;
            binaire(*op, va, vb)
        }
    }
}

fn binaire(op: BinOp, a: f64, b: f64) -> Result<f64, EvalError> {
    match op {
        BinOp::Add => verifie(a + b),
        BinOp::Sub => verifie(a - b),
        BinOp::Mul => verifie(a * b),
        BinOp::Div => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            verifie(a / b)
        }
        BinOp::Mod => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            // fmod : signe du dividende
            verifie(a % b)
        }
        BinOp::Pow => {
            if a < 0.0 && b.fract() != 0.0 {
                return Err(EvalError::Domain("base négative, exposant non entier"));
            }
            if a == 0.0 && b < 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            verifie(a.powf(b))
        }
    }
}

/// Applique une fonction à une valeur (radians pour la trigo).
pub fn appliquer(f: FunctionKind, v: f64) -> Result<f64, EvalError> {
    use FunctionKind::*;

    match f {
        Sin => verifie(v.sin()),
        Cos => verifie(v.cos()),
        Tan => verifie(v.tan()),
        Asin | Acos => {
            if !(-1.0..=1.0).contains(&v) {
                return Err(EvalError::Domain("asin/acos : argument hors [-1, 1]"));
            }
            Ok(if f == Asin { v.asin() } else { v.acos() })
        }
        Atan => verifie(v.atan()),
        Log10 | Ln => {
            if v <= 0.0 {
                return Err(EvalError::Domain("logarithme : argument <= 0"));
            }
            Ok(if f == Ln { v.ln() } else { v.log10() })
        }
        Exp => verifie(v.exp()),
        Sqrt => {
            if v < 0.0 {
                return Err(EvalError::Domain("√ : argument négatif"));
            }
            Ok(v.sqrt())
        }
        Square => verifie(v * v),
        Cube => verifie(v * v * v),
        Factorial => factorielle(v),
    }
}

/// n! itératif ; n doit être un entier >= 0 (à la tolérance près).
pub fn factorielle(v: f64) -> Result<f64, EvalError> {
    let n = v.round();
    if !v.is_finite() || v < -TOLERANCE_ENTIER || (v - n).abs() > TOLERANCE_ENTIER {
        return Err(EvalError::Domain("factorielle : entier positif attendu"));
    }

    let mut acc = 1.0_f64;
    let mut k = 2.0_f64;
    while k <= n {
        acc *= k;
        if acc.is_infinite() {
            return Err(EvalError::Overflow);
        }
        k += 1.0;
    }
    Ok(acc)
}
