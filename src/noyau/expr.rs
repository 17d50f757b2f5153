// src/noyau/expr.rs
//
// AST flottant (f64).
// - Number   : littéral
// - Variable : seule `x` a un sens (le parseur refuse le reste)
// - Constant : π, e
// - BinaryOp / UnaryOp / Call : noeuds internes, enfants possédés (Box)
//
// IMPORTANT :
// - L’arbre est fini, sans partage : chaque noeud possède ses enfants.
// - Évaluation et dérivation ne modifient jamais un noeud : elles construisent un nouvel arbre.

use std::fmt;

use super::format::texte_naturel;

/// Nom conventionnel de la variable libre.
pub const VAR_X: &str = "x";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => std::f64::consts::PI,
            Constante::E => std::f64::consts::E,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,
}

impl BinOp {
    pub fn symbole(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
            BinOp::Pow => '^',
            BinOp::Mod => '%',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    Neg,
}

/// Ensemble fermé des fonctions (dispatch exhaustif, pas de chaîne).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log10,
    Ln,
    Exp,
    Sqrt,
    Square,
    Cube,
    Factorial,
}

impl FunctionKind {
    pub const TOUTES: [FunctionKind; 13] = [
        FunctionKind::Sin,
        FunctionKind::Cos,
        FunctionKind::Tan,
        FunctionKind::Asin,
        FunctionKind::Acos,
        FunctionKind::Atan,
        FunctionKind::Log10,
        FunctionKind::Ln,
        FunctionKind::Exp,
        FunctionKind::Sqrt,
        FunctionKind::Square,
        FunctionKind::Cube,
        FunctionKind::Factorial,
    ];

    /// Nom canonique (affichage + historique).
    pub fn nom(self) -> &'static str {
        match self {
            FunctionKind::Sin => "sin",
            FunctionKind::Cos => "cos",
            FunctionKind::Tan => "tan",
            FunctionKind::Asin => "asin",
            FunctionKind::Acos => "acos",
            FunctionKind::Atan => "atan",
            FunctionKind::Log10 => "log10",
            FunctionKind::Ln => "ln",
            FunctionKind::Exp => "exp",
            FunctionKind::Sqrt => "sqrt",
            FunctionKind::Square => "square",
            FunctionKind::Cube => "cube",
            FunctionKind::Factorial => "fact",
        }
    }

    /// Identifiant (déjà en minuscules) -> fonction. `log` est un alias de `log10`.
    pub fn depuis_nom(name: &str) -> Option<FunctionKind> {
        let f = match name {
            "sin" => FunctionKind::Sin,
            "cos" => FunctionKind::Cos,
            "tan" => FunctionKind::Tan,
            "asin" => FunctionKind::Asin,
            "acos" => FunctionKind::Acos,
            "atan" => FunctionKind::Atan,
            "log10" | "log" => FunctionKind::Log10,
            "ln" => FunctionKind::Ln,
            "exp" => FunctionKind::Exp,
            "sqrt" => FunctionKind::Sqrt,
            "square" => FunctionKind::Square,
            "cube" => FunctionKind::Cube,
            "fact" | "factorial" => FunctionKind::Factorial,
            _ => return None,
        };
        Some(f)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Constant(Constante),
    BinaryOp(BinOp, Box<Expr>, Box<Expr>),
    UnaryOp(UnOp, Box<Expr>),
    Call(FunctionKind, Box<Expr>),
}

/* ------------------------ Constructeurs courts ------------------------ */

impl Expr {
    pub fn num(v: f64) -> Expr {
        Expr::Number(v)
    }

    pub fn x() -> Expr {
        Expr::Variable(VAR_X.to_string())
    }

    pub fn bin(op: BinOp, a: Expr, b: Expr) -> Expr {
        Expr::BinaryOp(op, Box::new(a), Box::new(b))
    }

    pub fn add(a: Expr, b: Expr) -> Expr {
        Expr::bin(BinOp::Add, a, b)
    }

    pub fn sub(a: Expr, b: Expr) -> Expr {
        Expr::bin(BinOp::Sub, a, b)
    }

    pub fn mul(a: Expr, b: Expr) -> Expr {
        Expr::bin(BinOp::Mul, a, b)
    }

    pub fn div(a: Expr, b: Expr) -> Expr {
        Expr::bin(BinOp::Div, a, b)
    }

    pub fn pow(a: Expr, b: Expr) -> Expr {
        Expr::bin(BinOp::Pow, a, b)
    }

    pub fn neg(a: Expr) -> Expr {
        Expr::UnaryOp(UnOp::Neg, Box::new(a))
    }

    pub fn call(f: FunctionKind, a: Expr) -> Expr {
        Expr::Call(f, Box::new(a))
    }
}

/* ------------------------ Inspection ------------------------ */

impl Expr {
    /// Vrai si la variable `name` apparaît quelque part dans l’arbre.
    pub fn contient_var(&self, name: &str) -> bool {
        match self {
            Expr::Variable(v) => v == name,
            Expr::Number(_) | Expr::Constant(_) => false,
            Expr::BinaryOp(_, a, b) => a.contient_var(name) || b.contient_var(name),
            Expr::UnaryOp(_, a) | Expr::Call(_, a) => a.contient_var(name),
        }
    }

    /// Vrai si tous les littéraux sont finis (sinon l’affichage n’est pas relisible).
    pub fn nombres_finis(&self) -> bool {
        match self {
            Expr::Number(v) => v.is_finite(),
            Expr::Variable(_) | Expr::Constant(_) => true,
            Expr::BinaryOp(_, a, b) => a.nombres_finis() && b.nombres_finis(),
            Expr::UnaryOp(_, a) | Expr::Call(_, a) => a.nombres_finis(),
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/* ------------------------ Simplification ------------------------ */

impl Expr {
    /// Simplification locale (SAFE), sans heuristiques :
    /// - repliement des constantes numériques (seulement si le résultat est fini)
    /// - éléments neutres / absorbants : 0+a, a-0, 1*a, 0*a, a/1, a^1, a^0, --a
    ///
    /// Sert à l’affichage des dérivées ; la dérivation elle-même reste brute.
    pub fn simplify(self) -> Expr {
        use Expr::*;

        match self {
            Number(_) | Variable(_) | Constant(_) => self,

            UnaryOp(UnOp::Neg, a) => match a.simplify() {
                Number(v) => Number(-v),
                UnaryOp(UnOp::Neg, inner) => *inner,
                other => Expr::neg(other),
            },

            Call(f, a) => Call(f, Box::new(a.simplify())),

            BinaryOp(op, a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
                    if let Some(v) = replie(op, x, y) {
                        return Number(v);
                    }
                }

                let na = a.as_number();
                let nb = b.as_number();

                match op {
                    BinOp::Add if na == Some(0.0) => b,
                    BinOp::Add if nb == Some(0.0) => a,
                    BinOp::Sub if nb == Some(0.0) => a,
                    BinOp::Sub if na == Some(0.0) => Expr::neg(b).simplify(),
                    BinOp::Mul if na == Some(0.0) || nb == Some(0.0) => Number(0.0),
                    BinOp::Mul if na == Some(1.0) => b,
                    BinOp::Mul if nb == Some(1.0) => a,
                    BinOp::Div if nb == Some(1.0) => a,
                    BinOp::Pow if nb == Some(1.0) => a,
                    BinOp::Pow if nb == Some(0.0) => Number(1.0),
                    _ => Expr::bin(op, a, b),
                }
            }
        }
    }
}

/// Repliement numérique : None si le résultat n’est pas fini (on garde la forme).
fn replie(op: BinOp, x: f64, y: f64) -> Option<f64> {
    let v = match op {
        BinOp::Add => x + y,
        BinOp::Sub => x - y,
        BinOp::Mul => x * y,
        BinOp::Div => x / y,
        BinOp::Pow => x.powf(y),
        BinOp::Mod => x % y,
    };
    v.is_finite().then_some(v)
}

/* ------------------------ Affichage ------------------------ */

// Re-lisible par le parseur tant que `nombres_finis()` : NaN / Infinity n’ont pas de
// forme d’entrée.

/// Niveaux de précédence (affichage) : + - < * / % < moins unaire < ^ < atome.
fn niveau(e: &Expr) -> u8 {
    match e {
        Expr::BinaryOp(BinOp::Add | BinOp::Sub, _, _) => 1,
        Expr::BinaryOp(BinOp::Mul | BinOp::Div | BinOp::Mod, _, _) => 2,
        Expr::UnaryOp(UnOp::Neg, _) => 3,
        Expr::Number(v) if v.is_sign_negative() && *v != 0.0 => 3,
        Expr::BinaryOp(BinOp::Pow, _, _) => 4,
        _ => 5,
    }
}

fn ecrire(f: &mut fmt::Formatter<'_>, e: &Expr, min: u8) -> fmt::Result {
    if niveau(e) < min {
        write!(f, "(")?;
        ecrire(f, e, 0)?;
        return write!(f, ")");
    }

    match e {
        Expr::Number(v) => write!(f, "{}", texte_naturel(*v)),
        Expr::Variable(name) => write!(f, "{name}"),
        Expr::Constant(Constante::Pi) => write!(f, "pi"),
        Expr::Constant(Constante::E) => write!(f, "e"),
        Expr::UnaryOp(UnOp::Neg, a) => {
            write!(f, "-")?;
            ecrire(f, a, 3)
        }
        Expr::Call(func, a) => {
            write!(f, "{}(", func.nom())?;
            ecrire(f, a, 0)?;
            write!(f, ")")
        }
        Expr::BinaryOp(BinOp::Pow, a, b) => {
            // droite-associatif : la base doit être strictement plus forte
            ecrire(f, a, 5)?;
            write!(f, "^")?;
            ecrire(f, b, 4)
        }
        Expr::BinaryOp(op, a, b) => {
            let p = niveau(e);
            ecrire(f, a, p)?;
            write!(f, " {} ", op.symbole())?;
            ecrire(f, b, p + 1)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ecrire(f, self, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noms_fonctions_aller_retour() {
        for f in FunctionKind::TOUTES {
            assert_eq!(FunctionKind::depuis_nom(f.nom()), Some(f));
        }
        assert_eq!(FunctionKind::depuis_nom("log"), Some(FunctionKind::Log10));
        assert_eq!(FunctionKind::depuis_nom("factorial"), Some(FunctionKind::Factorial));
        assert_eq!(FunctionKind::depuis_nom("sinh"), None);
    }

    #[test]
    fn contient_var() {
        let e = Expr::add(Expr::num(1.0), Expr::call(FunctionKind::Sin, Expr::x()));
        assert!(e.contient_var(VAR_X));
        assert!(!e.contient_var("y"));
        assert!(!Expr::mul(Expr::num(2.0), Expr::Constant(Constante::Pi)).contient_var(VAR_X));
    }

    #[test]
    fn litteraux_non_finis() {
        assert!(Expr::add(Expr::x(), Expr::num(2.0)).nombres_finis());
        assert!(!Expr::mul(Expr::num(f64::NAN), Expr::x()).nombres_finis());
        assert!(!Expr::neg(Expr::num(f64::INFINITY)).nombres_finis());
    }

    #[test]
    fn simplify_neutres() {
        // 0*cos(x) + 1*x  =>  x
        let e = Expr::add(
            Expr::mul(Expr::num(0.0), Expr::call(FunctionKind::Cos, Expr::x())),
            Expr::mul(Expr::num(1.0), Expr::x()),
        );
        assert_eq!(e.simplify(), Expr::x());

        // 2*3 - 1 => 5
        let e = Expr::sub(Expr::mul(Expr::num(2.0), Expr::num(3.0)), Expr::num(1.0));
        assert_eq!(e.simplify(), Expr::num(5.0));

        // 1/0 reste tel quel (pas de repliement non fini)
        let e = Expr::div(Expr::num(1.0), Expr::num(0.0));
        assert_eq!(e.clone().simplify(), e);
    }

    #[test]
    fn affichage_precedence() {
        let e = Expr::mul(Expr::add(Expr::x(), Expr::num(1.0)), Expr::num(2.0));
        assert_eq!(e.to_string(), "(x + 1) * 2");

        let e = Expr::sub(Expr::x(), Expr::sub(Expr::num(1.0), Expr::num(2.0)));
        assert_eq!(e.to_string(), "x - (1 - 2)");

        let e = Expr::pow(Expr::neg(Expr::x()), Expr::num(2.0));
        assert_eq!(e.to_string(), "(-x)^2");

        let e = Expr::neg(Expr::pow(Expr::x(), Expr::num(2.0)));
        assert_eq!(e.to_string(), "-x^2");

        let e = Expr::call(FunctionKind::Log10, Expr::mul(Expr::x(), Expr::Constant(Constante::E)));
        assert_eq!(e.to_string(), "log10(x * e)");
    }
}
