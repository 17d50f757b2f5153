//! Calculatrice scientifique : noyau (parse, évaluation, dérivée, intégrale,
//! format, tracé, machine d’état), sans dépendance à l’interface.

pub mod noyau;
