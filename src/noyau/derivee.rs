// src/noyau/derivee.rs
//
// Dérivation symbolique (structurelle, récursive).
// - Fonction totale : jamais d’erreur. Un cas non dérivable donne un arbre
//   valide mais dégénéré (Number(NaN)), qui échouera à l’évaluation (Domain).
// - Construit un arbre neuf ; l’entrée n’est jamais modifiée.
// - Aucune simplification ici (linéarité structurelle : d(f+g) = df + dg).
//
// Règle de puissance f^g :
// - g sans la variable         : g·f^(g-1)·df
// - f sans la variable, g avec : f^g·ln(f)·dg
// - les deux avec la variable  : f^g·(dg·ln(f) + g·df/f)   (dérivation logarithmique)

use super::erreurs::EvalError;
use super::eval::evaluate;
use super::expr::{BinOp, Expr, FunctionKind, UnOp, VAR_X};

/// Arbre dégénéré : dérivée non définie symboliquement.
fn degenere() -> Expr {
    Expr::Number(f64::NAN)
}

/// d/d(var) de `expr`.
pub fn differentiate(expr: &Expr, var: &str) -> Expr {
    use Expr::*;

    match expr {
        Number(_) | Constant(_) => Expr::num(0.0),
        Variable(v) => Expr::num(if v == var { 1.0 } else { 0.0 }),

        UnaryOp(UnOp::Neg, a) => Expr::neg(differentiate(a, var)),

        BinaryOp(op, a, b) => {
            let f = a.as_ref();
            let g = b.as_ref();
            match op {
                BinOp::Add => Expr::add(differentiate(f, var), differentiate(g, var)),
                BinOp::Sub => Expr::sub(differentiate(f, var), differentiate(g, var)),

                // df·g + f·dg
                BinOp::Mul => Expr::add(
                    Expr::mul(differentiate(f, var), g.clone()),
                    Expr::mul(f.clone(), differentiate(g, var)),
                ),

                // (df·g − f·dg) / g²
                BinOp::Div => Expr::div(
                    Expr::sub(
                        Expr::mul(differentiate(f, var), g.clone()),
                        Expr::mul(f.clone(), differentiate(g, var)),
                    ),
                    Expr::pow(g.clone(), Expr::num(2.0)),
                ),

                BinOp::Pow => derivee_puissance(f, g, var),

                // f mod c : df presque partout ; diviseur variable => dégénéré
                BinOp::Mod => {
                    if g.contient_var(var) {
                        degenere()
                    } else {
                        differentiate(f, var)
                    }
                }
            }
        }

        // Chaîne : f'(u)·du
        Call(func, u) => match derivee_externe(*func, u) {
            Some(externe) => Expr::mul(externe, differentiate(u, var)),
            None if !u.contient_var(var) => Expr::num(0.0),
            None => degenere(),
        },
    }
}

fn derivee_puissance(f: &Expr, g: &Expr, var: &str) -> Expr {
    let g_var = g.contient_var(var);
    let f_var = f.contient_var(var);

    if !g_var {
        // n·f^(n-1)·df ; exposant littéral replié directement
        let g_moins_un = match g {
            Expr::Number(n) => Expr::num(n - 1.0),
            _ => Expr::sub(g.clone(), Expr::num(1.0)),
        };
        return Expr::mul(
            Expr::mul(g.clone(), Expr::pow(f.clone(), g_moins_un)),
            differentiate(f, var),
        );
    }

    let ln_f = Expr::call(FunctionKind::Ln, f.clone());
    let f_pow_g = Expr::pow(f.clone(), g.clone());

    if !f_var {
        // a^g : a^g·ln(a)·dg
        return Expr::mul(Expr::mul(f_pow_g, ln_f), differentiate(g, var));
    }

    // f^g·(dg·ln(f) + g·df/f)
    Expr::mul(
        f_pow_g,
        Expr::add(
            Expr::mul(differentiate(g, var), ln_f),
            Expr::div(Expr::mul(g.clone(), differentiate(f, var)), f.clone()),
        ),
    )
}

/// f'(u) pour chaque fonction (sans le facteur du). None => pas de dérivée symbolique.
fn derivee_externe(func: FunctionKind, u: &Expr) -> Option<Expr> {
    use FunctionKind::*;

    let u = u.clone();
    let un = || Expr::num(1.0);
    let carre = |e: Expr| Expr::pow(e, Expr::num(2.0));

    let d = match func {
        Sin => Expr::call(Cos, u),
        Cos => Expr::neg(Expr::call(Sin, u)),
        Tan => Expr::div(un(), carre(Expr::call(Cos, u))),
        Asin => Expr::div(un(), Expr::call(Sqrt, Expr::sub(un(), carre(u)))),
        Acos => Expr::neg(Expr::div(un(), Expr::call(Sqrt, Expr::sub(un(), carre(u))))),
        Atan => Expr::div(un(), Expr::add(un(), carre(u))),
        Ln => Expr::div(un(), u),
        Log10 => Expr::div(un(), Expr::mul(u, Expr::num(std::f64::consts::LN_10))),
        Exp => Expr::call(Exp, u),
        Sqrt => Expr::div(un(), Expr::mul(Expr::num(2.0), Expr::call(Sqrt, u))),
        Square => Expr::mul(Expr::num(2.0), u),
        Cube => Expr::mul(Expr::num(3.0), carre(u)),
        Factorial => return None,
    };
    Some(d)
}

/// Dérivée en `x`, évaluée au point donné.
pub fn derivee_en(expr: &Expr, point: f64) -> Result<f64, EvalError> {
    let d = differentiate(expr, VAR_X);
    log::trace!("d/dx({expr}) = {d}");
    evaluate(&d, Some(point))
}
