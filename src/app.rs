// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
// - Clavier physique : traduit en touches de la machine d’état

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use calculatrice_sci::noyau::Touche;
use eframe::egui;

/// Caractère tapé au clavier -> touche (None si ignoré).
fn touche_de_caractere(c: char) -> Option<Touche> {
    match c {
        '.' | ',' => Some(Touche::Decimal),
        '0'..='9' | '+' | '-' | '*' | '/' | '^' | '%' | '(' | ')' | 'x' => {
            Some(Touche::Chiffre(c))
        }
        _ => None,
    }
}

impl AppCalc {
    /// Clavier global, seulement quand aucun champ texte n’a le focus
    /// (sinon la saisie du champ "f(x)" serait aussi envoyée à l’écran).
    fn clavier(&mut self, ctx: &egui::Context) {
        if ctx.memory(|m| m.focused().is_some()) {
            return;
        }

        let touches: Vec<Touche> = ctx.input(|i| {
            let mut v = Vec::new();
            for ev in &i.events {
                match ev {
                    egui::Event::Text(t) => v.extend(t.chars().filter_map(touche_de_caractere)),
                    egui::Event::Key {
                        key: egui::Key::Enter,
                        pressed: true,
                        ..
                    } => v.push(Touche::Egal),
                    egui::Event::Key {
                        key: egui::Key::Backspace,
                        pressed: true,
                        ..
                    } => v.push(Touche::Retour),
                    _ => {}
                }
            }
            v
        });

        for t in touches {
            self.touche(t);
        }
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = effacer seulement l’entrée (comme bouton "C").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_entree();
        }

        self.clavier(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
