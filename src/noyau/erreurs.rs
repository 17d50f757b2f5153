//! Noyau — taxonomie des erreurs
//!
//! - ParseError   : texte mal formé (jetons / RPN / AST)
//! - EvalError    : échec numérique (division par zéro, domaine, dépassement)
//! - DisplayError : parapluie remonté jusqu’à la machine d’état
//!
//! Contrat : aucune de ces erreurs ne traverse la machine d’état.
//! Elle les convertit en affichage "Error".

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("entrée vide")]
    Vide,

    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("nombre invalide: {0}")]
    NombreInvalide(String),

    #[error("identifiant inconnu: {0}")]
    IdentifiantInconnu(String),

    #[error("parenthèses non fermées")]
    ParentheseNonFermee,

    #[error("parenthèse fermante inattendue")]
    ParentheseInattendue,

    #[error("virgule inattendue (fonctions à un seul argument)")]
    VirguleInattendue,

    #[error("opérande manquant")]
    OperandeManquant,

    /// Garde-fou : toutes les passes (évaluation, dérivée, affichage) sont récursives.
    #[error("expression trop imbriquée (profondeur max {0})")]
    TropProfond(usize),

    /// Couvre la multiplication implicite ("2x") et les jetons en trop.
    #[error("jeton inattendu: {0}")]
    JetonInattendu(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division par zéro")]
    DivisionByZero,

    #[error("hors domaine: {0}")]
    Domain(&'static str),

    #[error("dépassement de capacité")]
    Overflow,

    /// `x` apparaît alors qu’aucune valeur ne lui est liée.
    #[error("variable x non liée")]
    VariableLibre,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Plage de tracé refusée par `GraphRange::valider`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("bornes non finies")]
    BornesNonFinies,

    #[error("min ({min}) doit être < max ({max})")]
    BornesInversees { min: f64, max: f64 },

    #[error("au moins 2 points requis (reçu {0})")]
    TropPeuDePoints(usize),

    #[error("trop de points: {0} (max {1})")]
    TropDePoints(usize, usize),
}
