//! Noyau — machine d’état de la calculatrice
//!
//! L’état est explicite (`CalculatorState`), possédé par la session et muté
//! uniquement par des touches successives. Aucune transition ne bloque ni ne
//! remonte d’erreur : tout échec devient l’affichage "Error" avec
//! `attente_operande = true`, la touche suivante repart de zéro.
//!
//! Contrats :
//! - `affichage` n’est jamais vide ("0" par défaut).
//! - `historique` ne fait que grandir (sauf EffacerHistorique).
//! - la mémoire et l’historique survivent à AC / C.

use super::api::{apply_function, evaluate_expression, valeur, FonctionTouche};
use super::erreurs::DisplayError;
use super::expr::Constante;
use super::format::{format_result, texte_naturel};
use super::reglages::Reglages;

/// Texte affiché après un échec.
pub const AFFICHAGE_ERREUR: &str = "Error";

/// Genre de la dernière touche significative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GenreTouche {
    #[default]
    Aucune,
    Chiffre,
    Decimal,
    Operateur,
    Fonction,
}

/// Événements d’entrée.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Touche {
    /// Chiffre, mais aussi tout symbole tapé tel quel : + - * / ^ % ( ) x
    Chiffre(char),
    Decimal,
    BasculeSigne,
    /// AC
    EffacerTout,
    /// C
    EffacerEntree,
    /// ⌫
    Retour,
    /// =
    Egal,
    Fonction(FonctionTouche),
    Constante(Constante),
    MemoireStocker,
    MemoireRappel,
    MemoireEffacer,
    MemoireAjouter,
    MemoireSoustraire,
    EffacerHistorique,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorState {
    /// Texte à l’écran (jamais vide).
    pub affichage: String,
    pub memoire: Option<f64>,
    /// Vrai juste après un résultat / une erreur : le prochain chiffre remplace l’écran.
    pub attente_operande: bool,
    pub derniere_touche: GenreTouche,
    /// Entrées `"<expr> = <résultat>"`, ordre d’insertion.
    pub historique: Vec<String>,
    pub reglages: Reglages,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            affichage: "0".to_string(),
            memoire: None,
            attente_operande: false,
            derniere_touche: GenreTouche::Aucune,
            historique: Vec::new(),
            reglages: Reglages::default(),
        }
    }
}

/// Forme fonctionnelle : consomme l’état, rend le suivant.
pub fn advance(mut etat: CalculatorState, touche: Touche) -> CalculatorState {
    etat.appliquer(touche);
    etat
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mémoire au format écran (indicateur "M" + rappel).
    pub fn memoire_texte(&self) -> Option<String> {
        self.memoire
            .map(|m| format_result(m, self.reglages.max_chiffres))
    }

    /// Traite une touche (synchrone, totale).
    pub fn appliquer(&mut self, touche: Touche) {
        match touche {
            Touche::Chiffre(c) => self.chiffre(c),
            Touche::Decimal => self.decimal(),
            Touche::BasculeSigne => self.bascule_signe(),
            Touche::EffacerTout => {
                self.affichage = "0".to_string();
                self.attente_operande = false;
                self.derniere_touche = GenreTouche::Aucune;
            }
            Touche::EffacerEntree => {
                self.affichage = "0".to_string();
                self.attente_operande = false;
            }
            Touche::Retour => {
                self.affichage.pop();
                if self.affichage.is_empty() {
                    self.affichage = "0".to_string();
                }
            }
            Touche::Egal => self.egal(),
            Touche::Fonction(f) => self.fonction(f),
            Touche::Constante(c) => {
                self.affichage = texte_naturel(c.valeur());
            }
            Touche::MemoireStocker => self.memoire_stocker(),
            Touche::MemoireRappel => {
                if let Some(s) = self.memoire_texte() {
                    self.affichage = s;
                    self.attente_operande = false;
                }
            }
            Touche::MemoireEffacer => self.memoire = None,
            Touche::MemoireAjouter => self.memoire_combiner(1.0),
            Touche::MemoireSoustraire => self.memoire_combiner(-1.0),
            Touche::EffacerHistorique => self.historique.clear(),
        }
    }

    fn chiffre(&mut self, c: char) {
        if self.affichage == "0" || self.attente_operande {
            self.affichage = c.to_string();
            self.attente_operande = false;
        } else {
            self.affichage.push(c);
        }
        self.derniere_touche = GenreTouche::Chiffre;
    }

    fn decimal(&mut self) {
        if self.attente_operande {
            self.affichage = "0.".to_string();
            self.attente_operande = false;
        } else if !self.affichage.contains('.') {
            self.affichage.push('.');
        }
        self.derniere_touche = GenreTouche::Decimal;
    }

    fn bascule_signe(&mut self) {
        match self.affichage.strip_prefix('-') {
            Some(reste) => self.affichage = reste.to_string(),
            None => self.affichage.insert(0, '-'),
        }
        if self.affichage.is_empty() {
            self.affichage = "0".to_string();
        }
    }

    fn egal(&mut self) {
        match evaluate_expression(&self.affichage, self.reglages.max_chiffres) {
            Ok(s) => {
                self.historique.push(format!("{} = {s}", self.affichage));
                self.affichage = s;
                self.attente_operande = true;
                self.derniere_touche = GenreTouche::Operateur;
            }
            Err(e) => self.erreur(e),
        }
    }

    fn fonction(&mut self, f: FonctionTouche) {
        match apply_function(f, &self.affichage, &self.reglages) {
            Ok(s) => {
                self.historique
                    .push(format!("{}({}) = {s}", f.nom(), self.affichage));
                self.affichage = s;
                self.attente_operande = true;
                self.derniere_touche = GenreTouche::Fonction;
            }
            Err(e) => self.erreur(e),
        }
    }

    fn memoire_stocker(&mut self) {
        match valeur(&self.affichage) {
            Ok(v) => self.memoire = Some(v),
            Err(e) => self.erreur(e),
        }
    }

    /// M+ (signe = 1) / M- (signe = -1). Mémoire vide : M+ stocke, M- stocke l’opposé.
    /// Le résultat passe par le format écran (même arrondi que l’affichage).
    fn memoire_combiner(&mut self, signe: f64) {
        let v = match valeur(&self.affichage) {
            Ok(v) => v,
            Err(e) => return self.erreur(e),
        };
        let brut = match self.memoire {
            Some(m) => m + signe * v,
            None if signe > 0.0 => {
                self.memoire = Some(v);
                return;
            }
            None => -v,
        };
        let texte = format_result(brut, self.reglages.max_chiffres);
        self.memoire = Some(texte.parse().unwrap_or(brut));
    }

    fn erreur(&mut self, e: DisplayError) {
        log::info!("{:?} -> {AFFICHAGE_ERREUR} ({e})", self.affichage);
        self.affichage = AFFICHAGE_ERREUR.to_string();
        self.attente_operande = true;
    }
}
