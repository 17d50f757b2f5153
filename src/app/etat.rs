//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : envelopper la machine d’état du noyau (`CalculatorState`) et y ajouter
//! ce qui ne concerne que l’écran : panneaux ouverts, fonction tracée, plage du
//! graphe, dernier tracé.
//!
//! Contrats :
//! - Toute touche passe par `CalculatorState::appliquer` (aucun calcul ici).
//! - Le tracé est recalculé sur demande (bouton / ouverture du panneau) ou quand la plage change.
//! - Un seul panneau (historique ou graphe) ouvert à la fois.
//! - Une plage invalide n’atteint jamais l’échantillonneur.

use calculatrice_sci::noyau::trace::{sample, GraphRange, Trace, FONCTION_REPLI};
use calculatrice_sci::noyau::{CalculatorState, RangeError, Touche};

/// Motifs qui font passer l’affichage pour une fonction de x.
const MOTIFS_FONCTION: [&str; 6] = ["x", "sin", "cos", "tan", "log", "exp"];

/// Vrai si le texte ressemble à une fonction à tracer (et pas à un simple nombre).
pub fn semble_fonction(texte: &str) -> bool {
    let t = texte.to_lowercase();
    MOTIFS_FONCTION.iter().any(|m| t.contains(m))
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- noyau ---
    pub calc: CalculatorState,

    // --- panneaux ---
    pub montrer_historique: bool,
    pub montrer_graphe: bool,

    // --- graphe ---
    pub fonction_graphe: String,
    pub plage: GraphRange,
    pub trace: Option<Trace>,
    pub erreur_graphe: Option<RangeError>,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            calc: CalculatorState::default(),
            montrer_historique: false,
            montrer_graphe: false,
            fonction_graphe: FONCTION_REPLI.to_string(),
            plage: GraphRange::default(),
            trace: None,
            erreur_graphe: None,
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” ------------------------ */

    pub fn touche(&mut self, t: Touche) {
        self.calc.appliquer(t);
    }

    /// C : effacer seulement l’entrée (mémoire + historique conservés).
    pub fn clear_entree(&mut self) {
        self.touche(Touche::EffacerEntree);
    }

    /// Ouvre/ferme l’historique ; l’ouvrir ferme le graphe.
    pub fn basculer_historique(&mut self) {
        self.montrer_historique = !self.montrer_historique;
        if self.montrer_historique {
            self.montrer_graphe = false;
        }
    }

    /// Ouvre/ferme le graphe (et ferme l’historique). À l’ouverture, l’affichage
    /// devient la fonction tracée s’il y ressemble, puis le tracé est recalculé.
    pub fn basculer_graphe(&mut self) {
        self.montrer_graphe = !self.montrer_graphe;
        if self.montrer_graphe {
            self.montrer_historique = false;
            if semble_fonction(&self.calc.affichage) {
                self.fonction_graphe = self.calc.affichage.clone();
            }
            self.generer_trace();
        }
    }

    /// "Utiliser l’affichage" : copie l’affichage dans le champ du graphe.
    pub fn maj_fonction_graphe(&mut self) {
        self.fonction_graphe = self.calc.affichage.clone();
        self.generer_trace();
    }

    /// Nouvelle plage saisie : recalcul seulement si elle a changé.
    pub fn maj_plage(&mut self, plage: GraphRange) {
        if plage != self.plage {
            self.plage = plage;
            self.generer_trace();
        }
    }

    /// Recalcule le tracé ; plage invalide => pas de tracé, erreur gardée pour l’écran.
    pub fn generer_trace(&mut self) {
        match self.plage.valider() {
            Ok(()) => {
                self.erreur_graphe = None;
                self.trace = Some(sample(&self.fonction_graphe, &self.plage));
            }
            Err(e) => {
                log::warn!("plage refusée : {e}");
                self.erreur_graphe = Some(e);
                self.trace = None;
            }
        }
    }
}
