// src/noyau/trace.rs
//
// Échantillonnage d’une fonction de x sur une plage (données de tracé).
// - parse une seule fois ; en cas d’échec, repli sur `sin(x)` (signalé, pas silencieux)
// - pas = (max - min) / (points - 1)
// - un point en échec (erreur ou non fini) est omis, le tracé continue
// - arrondis (x: 2 décimales, y: 4) seulement à la sortie
// - séquence recalculée à chaque appel, x croissants

use super::erreurs::RangeError;
use super::eval::evaluate;
use super::expr::{Expr, FunctionKind};
use super::reglages::POINTS_MAX;
use super::rpn::parse;

/// Expression de repli si le texte ne se parse pas.
pub const FONCTION_REPLI: &str = "sin(x)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphRange {
    pub min: f64,
    pub max: f64,
    pub points: usize,
}

impl Default for GraphRange {
    fn default() -> Self {
        Self {
            min: -10.0,
            max: 10.0,
            points: 100,
        }
    }
}

impl GraphRange {
    /// Contrôle à la charge de l’appelant (l’échantillonneur ne refuse rien).
    pub fn valider(&self) -> Result<(), RangeError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(RangeError::BornesNonFinies);
        }
        if self.min >= self.max {
            return Err(RangeError::BornesInversees {
                min: self.min,
                max: self.max,
            });
        }
        if self.points < 2 {
            return Err(RangeError::TropPeuDePoints(self.points));
        }
        if self.points > POINTS_MAX {
            return Err(RangeError::TropDePoints(self.points, POINTS_MAX));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// Résultat d’un échantillonnage : l’expression réellement utilisée + les points.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    pub expression: String,
    /// true si le texte demandé ne se parse pas et que `FONCTION_REPLI` a servi.
    pub repli: bool,
    pub points: Vec<Sample>,
}

/// Arrondi décimal (même règle que l’affichage fixe).
fn arrondir(v: f64, decimales: usize) -> f64 {
    format!("{v:.decimales$}").parse().unwrap_or(v)
}

/// Échantillonne une expression déjà parsée.
/// `points` < 2 : au plus un point (en `min`) ; `points` borné à POINTS_MAX.
pub fn sample_expr(expr: &Expr, plage: &GraphRange) -> Vec<Sample> {
    let n = plage.points.min(POINTS_MAX);
    let pas = if n > 1 {
        (plage.max - plage.min) / (n - 1) as f64
    } else {
        0.0
    };

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let x = plage.min + i as f64 * pas;
        match evaluate(expr, Some(x)) {
            Ok(y) if y.is_finite() => out.push(Sample {
                x: arrondir(x, 2),
                y: arrondir(y, 4),
            }),
            Ok(_) => log::trace!("point omis x={x} : non fini"),
            Err(e) => log::trace!("point omis x={x} : {e}"),
        }
    }
    out
}

/// Échantillonne le texte `expr` ; repli sur `sin(x)` si le parse échoue.
pub fn sample(expr: &str, plage: &GraphRange) -> Trace {
    let (expression, repli, ast) = match parse(expr) {
        Ok(ast) => (expr.trim().to_string(), false, ast),
        Err(e) => {
            log::warn!("tracé : {expr:?} illisible ({e}), repli sur {FONCTION_REPLI}");
            let ast = Expr::call(FunctionKind::Sin, Expr::x());
            (FONCTION_REPLI.to_string(), true, ast)
        }
    };

    let points = sample_expr(&ast, plage);
    log::debug!("tracé {expression} : {} points", points.len());

    Trace {
        expression,
        repli,
        points,
    }
}
