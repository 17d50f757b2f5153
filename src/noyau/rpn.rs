// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - fonction connue (sin, cos, ..., log/log10) => opérateur préfixe, précédence maximale
//    - "pi" / "e" => Constant
//    - "x" => Variable
//    - sinon => erreur (identifiant inconnu)
// - Moins unaire:
//    - si '-' arrive quand on attend une valeur => opérateur préfixe Neg
//    - précédence: + - < * / % < Neg < ^ (droite) < fonction
// - Pas de multiplication implicite: une valeur qui suit une valeur est refusée ("2x").

use std::fmt;

use super::erreurs::ParseError;
use super::expr::{BinOp, Constante, Expr, FunctionKind, UnOp, VAR_X};
use super::jetons::{tokenize, Tok};

/// Élément de sortie RPN.
#[derive(Clone, Debug, PartialEq)]
pub enum ElemRpn {
    Valeur(Expr),
    Bin(BinOp),
    Neg,
    Fonc(FunctionKind),
}

/// Élément de la pile d’opérateurs.
#[derive(Clone, Copy, Debug)]
enum Op {
    Bin(BinOp),
    Neg,
    Fonc(FunctionKind),
    LPar,
}

fn precedence(op: Op) -> i32 {
    match op {
        Op::Bin(BinOp::Add | BinOp::Sub) => 1,
        Op::Bin(BinOp::Mul | BinOp::Div | BinOp::Mod) => 2,
        Op::Neg => 3,
        Op::Bin(BinOp::Pow) => 4,
        Op::Fonc(_) => 5,
        Op::LPar => 0,
    }
}

fn is_right_associative(op: BinOp) -> bool {
    matches!(op, BinOp::Pow)
}

fn vers_rpn(op: Op) -> Option<ElemRpn> {
    match op {
        Op::Bin(b) => Some(ElemRpn::Bin(b)),
        Op::Neg => Some(ElemRpn::Neg),
        Op::Fonc(f) => Some(ElemRpn::Fonc(f)),
        Op::LPar => None,
    }
}

fn binop_de(tok: &Tok) -> Option<BinOp> {
    match tok {
        Tok::Plus => Some(BinOp::Add),
        Tok::Minus => Some(BinOp::Sub),
        Tok::Star => Some(BinOp::Mul),
        Tok::Slash => Some(BinOp::Div),
        Tok::Caret => Some(BinOp::Pow),
        Tok::Percent => Some(BinOp::Mod),
        _ => None,
    }
}

/// Identifiant -> atome (x / pi / e) ou fonction.
enum Resolu {
    Atome(Expr),
    Fonction(FunctionKind),
}

fn resoudre(name: &str) -> Result<Resolu, ParseError> {
    match name {
        VAR_X => Ok(Resolu::Atome(Expr::x())),
        "pi" => Ok(Resolu::Atome(Expr::Constant(Constante::Pi))),
        "e" => Ok(Resolu::Atome(Expr::Constant(Constante::E))),
        _ => FunctionKind::depuis_nom(name)
            .map(Resolu::Fonction)
            .ok_or_else(|| ParseError::IdentifiantInconnu(name.to_string())),
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Ident("pi"), Slash, Num(2), RPar]
///   rpn:    [pi, 2, /, sin]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<ElemRpn>, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::Vide);
    }

    let mut out: Vec<ElemRpn> = Vec::new();
    let mut ops: Vec<Op> = Vec::new();

    // true tant qu’on attend un opérande (début, après opérateur, après '(' ou fonction).
    // Sert à détecter le moins unaire ET la multiplication implicite.
    let mut attend_valeur = true;

    for tok in tokens {
        match tok {
            Tok::Num(v) => {
                if !attend_valeur {
                    return Err(ParseError::JetonInattendu(tok.to_string()));
                }
                out.push(ElemRpn::Valeur(Expr::Number(*v)));
                attend_valeur = false;
            }

            Tok::Ident(name) => {
                if !attend_valeur {
                    return Err(ParseError::JetonInattendu(tok.to_string()));
                }
                match resoudre(name)? {
                    Resolu::Atome(e) => {
                        out.push(ElemRpn::Valeur(e));
                        attend_valeur = false;
                    }
                    Resolu::Fonction(f) => {
                        // fonction : reste sur la pile, sortira après son argument
                        ops.push(Op::Fonc(f));
                    }
                }
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(ParseError::JetonInattendu(tok.to_string()));
                }
                ops.push(Op::LPar);
            }

            Tok::RPar => {
                if attend_valeur {
                    return Err(ParseError::OperandeManquant);
                }
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Op::LPar) => break,
                        Some(op) => out.extend(vers_rpn(op)),
                        None => return Err(ParseError::ParentheseInattendue),
                    }
                }
            }

            Tok::Comma => return Err(ParseError::VirguleInattendue),

            Tok::Minus if attend_valeur => {
                // moins unaire : préfixe, ne dépile rien
                ops.push(Op::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret | Tok::Percent => {
                if attend_valeur {
                    return Err(ParseError::OperandeManquant);
                }
                let Some(bin) = binop_de(tok) else {
                    return Err(ParseError::JetonInattendu(tok.to_string()));
                };
                let p_tok = precedence(Op::Bin(bin));

                // dépile tant que la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(&top) = ops.last() {
                    if matches!(top, Op::LPar) {
                        break;
                    }
                    let p_top = precedence(top);
                    let doit_pop = if is_right_associative(bin) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };
                    if !doit_pop {
                        break;
                    }
                    ops.pop();
                    out.extend(vers_rpn(top));
                }

                ops.push(Op::Bin(bin));
                attend_valeur = true;
            }
        }
    }

    if attend_valeur {
        return Err(ParseError::OperandeManquant);
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Op::LPar) {
            return Err(ParseError::ParentheseNonFermee);
        }
        out.extend(vers_rpn(op));
    }

    Ok(out)
}

/// Profondeur maximale d’un arbre issu du parseur. La dérivée d’un arbre de
/// profondeur p reste sous ~4p, ce qui tient dans la pile d’un thread de test (2 Mio)
/// et dans celle du wasm.
pub const MAX_PROFONDEUR: usize = 256;

/// Construit une Expr à partir d’une RPN.
/// Chaque opérande garde sa profondeur : refus dès qu’un noeud dépasse `MAX_PROFONDEUR`.
pub fn from_rpn(rpn: &[ElemRpn]) -> Result<Expr, ParseError> {
    let mut st: Vec<(Expr, usize)> = Vec::new();

    let borne = |p: usize| {
        if p > MAX_PROFONDEUR {
            Err(ParseError::TropProfond(MAX_PROFONDEUR))
        } else {
            Ok(p)
        }
    };

    for elem in rpn.iter().cloned() {
        let e = match elem {
            ElemRpn::Valeur(e) => (e, 1),
            ElemRpn::Bin(op) => {
                let (b, pb) = st.pop().ok_or(ParseError::OperandeManquant)?;
                let (a, pa) = st.pop().ok_or(ParseError::OperandeManquant)?;
                (Expr::bin(op, a, b), borne(1 + pa.max(pb))?)
            }
            ElemRpn::Neg => {
                let (a, p) = st.pop().ok_or(ParseError::OperandeManquant)?;
                (Expr::UnaryOp(UnOp::Neg, Box::new(a)), borne(1 + p)?)
            }
            ElemRpn::Fonc(f) => {
                let (a, p) = st.pop().ok_or(ParseError::OperandeManquant)?;
                (Expr::call(f, a), borne(1 + p)?)
            }
        };
        st.push(e);
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        (Some((e, _)), false) => Err(ParseError::JetonInattendu(e.to_string())),
        (None, _) => Err(ParseError::Vide),
    }
}

/// Pipeline complet : texte -> jetons -> RPN -> Expr.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let s = source.trim();
    if s.is_empty() {
        return Err(ParseError::Vide);
    }
    let jetons = tokenize(s)?;
    let rpn = to_rpn(&jetons)?;
    let expr = from_rpn(&rpn)?;
    log::trace!("parse({s:?}) -> {expr}");
    Ok(expr)
}

impl fmt::Display for ElemRpn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElemRpn::Valeur(e) => write!(f, "{e}"),
            ElemRpn::Bin(op) => write!(f, "{}", op.symbole()),
            ElemRpn::Neg => write!(f, "neg"),
            ElemRpn::Fonc(func) => write!(f, "{}", func.nom()),
        }
    }
}

/// Format utilitaire (debug) : RPN en texte.
pub fn format_rpn(rpn: &[ElemRpn]) -> String {
    rpn.iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
