// src/noyau/reglages.rs
//
// Réglages de session (pas de persistance).
// Garde-fous : chaque setter borne sa valeur (anti-abus / anti-gel).

use super::integrale::INTERVALLE_DEFAUT;

/// Largeur d’affichage par défaut (chiffres).
pub const MAX_CHIFFRES_DEFAUT: usize = 10;
const MAX_CHIFFRES_MIN: usize = 6;
const MAX_CHIFFRES_MAX: usize = 20;

/// Pas de la règle des trapèzes par défaut.
pub const PAS_INTEGRALE_DEFAUT: usize = 100;
/// Garde-fou : nombre de pas maximal.
pub const PAS_MAX: usize = 100_000;

/// Nombre maximal de points pour un tracé.
pub const POINTS_MAX: usize = 10_000;

#[derive(Clone, Debug, PartialEq)]
pub struct Reglages {
    pub max_chiffres: usize,
    /// Point où d/dx est évalué (historiquement x = 1).
    pub point_derivee: f64,
    pub intervalle_integrale: (f64, f64),
    pub pas_integrale: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            max_chiffres: MAX_CHIFFRES_DEFAUT,
            point_derivee: 1.0,
            intervalle_integrale: INTERVALLE_DEFAUT,
            pas_integrale: PAS_INTEGRALE_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn set_max_chiffres(&mut self, n: usize) {
        self.max_chiffres = n.clamp(MAX_CHIFFRES_MIN, MAX_CHIFFRES_MAX);
    }

    pub fn set_pas_integrale(&mut self, pas: usize) {
        self.pas_integrale = pas.clamp(1, PAS_MAX);
    }

    /// Valeurs non finies ignorées (on garde l’ancien réglage).
    pub fn set_point_derivee(&mut self, x: f64) {
        if x.is_finite() {
            self.point_derivee = x;
        }
    }

    pub fn set_intervalle_integrale(&mut self, a: f64, b: f64) {
        if a.is_finite() && b.is_finite() {
            self.intervalle_integrale = (a, b);
        }
    }
}
