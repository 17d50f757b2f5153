// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran + pavé : chaque bouton envoie une `Touche` à la machine d’état
// - Panneaux optionnels : historique (avec dérivée en texte), graphe
// - Tactile : gros boutons
//
// Le clavier physique est traité dans app.rs (hors de tout champ focus).

use eframe::egui;

use calculatrice_sci::noyau::api::derivative_text;
use calculatrice_sci::noyau::reglages::{PAS_MAX, POINTS_MAX};
use calculatrice_sci::noyau::trace::{GraphRange, Trace};
use calculatrice_sci::noyau::{Constante, FonctionTouche, FunctionKind, Touche};

use super::etat::AppCalc;

const TAILLE_TOUCHE: [f32; 2] = [52.0, 32.0];
const HAUTEUR_GRAPHE: f32 = 220.0;

/// Fonctions scalaires du pavé : (étiquette, fonction).
const FONCTIONS: [(&str, FunctionKind); 13] = [
    ("sin", FunctionKind::Sin),
    ("cos", FunctionKind::Cos),
    ("tan", FunctionKind::Tan),
    ("asin", FunctionKind::Asin),
    ("acos", FunctionKind::Acos),
    ("atan", FunctionKind::Atan),
    ("ln", FunctionKind::Ln),
    ("log", FunctionKind::Log10),
    ("exp", FunctionKind::Exp),
    ("√", FunctionKind::Sqrt),
    ("x²", FunctionKind::Square),
    ("x³", FunctionKind::Cube),
    ("n!", FunctionKind::Factorial),
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_ecran(ui);
                ui.add_space(8.0);
                self.ui_memoire(ui);
                ui.add_space(6.0);
                self.ui_fonctions(ui);
                ui.add_space(6.0);
                self.ui_pave_numerique(ui);

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.selectable_label(self.montrer_historique, "Historique").clicked() {
                        self.basculer_historique();
                    }
                    if ui.selectable_label(self.montrer_graphe, "Graphe").clicked() {
                        self.basculer_graphe();
                    }
                });

                ui.add_space(6.0);
                self.ui_reglages(ui);

                if self.montrer_historique {
                    ui.separator();
                    self.ui_historique(ui);
                }
                if self.montrer_graphe {
                    ui.separator();
                    self.ui_graphe(ui);
                }
            });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    // indicateur mémoire
                    let m = if self.calc.memoire.is_some() { "M" } else { " " };
                    ui.monospace(m);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(&self.calc.affichage)
                                .monospace()
                                .size(28.0),
                        );
                    });
                });
            });
    }

    fn ui_memoire(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            self.bouton(ui, "MC", Touche::MemoireEffacer);
            self.bouton(ui, "MR", Touche::MemoireRappel);
            self.bouton(ui, "M+", Touche::MemoireAjouter);
            self.bouton(ui, "M-", Touche::MemoireSoustraire);
            self.bouton(ui, "MS", Touche::MemoireStocker);
            if let Some(m) = self.calc.memoire_texte() {
                ui.monospace(format!("M = {m}"));
            }
        });
    }

    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_fonctions")
            .num_columns(6)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for (i, (label, f)) in FONCTIONS.iter().enumerate() {
                    self.bouton(ui, label, Touche::Fonction(FonctionTouche::Scalaire(*f)));
                    if i % 6 == 5 {
                        ui.end_row();
                    }
                }
                self.bouton(ui, "d/dx", Touche::Fonction(FonctionTouche::Derivee));
                self.bouton(ui, "∫", Touche::Fonction(FonctionTouche::Integrale));
                self.bouton(ui, "π", Touche::Constante(Constante::Pi));
                self.bouton(ui, "e", Touche::Constante(Constante::E));
                self.bouton(ui, "x", Touche::Chiffre('x'));
                ui.end_row();
            });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton(ui, "AC", Touche::EffacerTout);
                self.bouton(ui, "C", Touche::EffacerEntree);
                self.bouton(ui, "⌫", Touche::Retour);
                self.bouton(ui, "±", Touche::BasculeSigne);
                self.bouton(ui, "%", Touche::Chiffre('%'));
                ui.end_row();

                let rangees = [
                    ['7', '8', '9', '/', '('],
                    ['4', '5', '6', '*', ')'],
                    ['1', '2', '3', '-', '^'],
                ];
                for rangee in rangees {
                    for c in rangee {
                        self.bouton(ui, &c.to_string(), Touche::Chiffre(c));
                    }
                    ui.end_row();
                }

                self.bouton(ui, "0", Touche::Chiffre('0'));
                self.bouton(ui, ".", Touche::Decimal);
                self.bouton(ui, "=", Touche::Egal);
                self.bouton(ui, "+", Touche::Chiffre('+'));
                ui.label("");
                ui.end_row();
            });
    }

    fn ui_reglages(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Réglages")
            .default_open(false)
            .show(ui, |ui| {
                let r = &mut self.calc.reglages;

                ui.horizontal(|ui| {
                    ui.label("Chiffres affichés :");
                    let mut n = r.max_chiffres;
                    if ui
                        .add(egui::DragValue::new(&mut n).speed(1).range(6..=20))
                        .changed()
                    {
                        r.set_max_chiffres(n);
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("d/dx au point x =");
                    let mut p = r.point_derivee;
                    if ui.add(egui::DragValue::new(&mut p).speed(0.1)).changed() {
                        r.set_point_derivee(p);
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("∫ sur [a, b] :");
                    let (mut a, mut b) = r.intervalle_integrale;
                    let ra = ui.add(egui::DragValue::new(&mut a).speed(0.1));
                    let rb = ui.add(egui::DragValue::new(&mut b).speed(0.1));
                    if ra.changed() || rb.changed() {
                        r.set_intervalle_integrale(a, b);
                    }
                    ui.label("pas :");
                    let mut n = r.pas_integrale;
                    if ui
                        .add(egui::DragValue::new(&mut n).speed(1).range(1..=PAS_MAX))
                        .changed()
                    {
                        r.set_pas_integrale(n);
                    }
                });
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("Historique");
            if ui.button("Effacer").clicked() {
                self.touche(Touche::EffacerHistorique);
            }
        });

        if self.calc.historique.is_empty() {
            ui.weak("(vide)");
        }
        for entree in self.calc.historique.iter().rev() {
            ui.monospace(entree);
        }

        // dérivée symbolique de l’affichage courant, si lisible
        if let Ok(d) = derivative_text(&self.calc.affichage) {
            ui.add_space(4.0);
            ui.monospace(format!("d/dx({}) = {d}", self.calc.affichage));
        }
    }

    fn ui_graphe(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("f(x) =");
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.fonction_graphe)
                    .desired_width(180.0)
                    .id_source("fonction_graphe")
                    .code_editor(),
            );
            let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
            if resp.lost_focus() && enter {
                self.generer_trace();
            }
            if ui.button("Tracer").clicked() {
                self.generer_trace();
            }
            if ui.button("Utiliser l’affichage").clicked() {
                self.maj_fonction_graphe();
            }
        });

        let mut p = self.plage;
        ui.horizontal(|ui| {
            ui.label("x min");
            ui.add(egui::DragValue::new(&mut p.min).speed(0.5));
            ui.label("x max");
            ui.add(egui::DragValue::new(&mut p.max).speed(0.5));
            ui.label("points");
            ui.add(egui::DragValue::new(&mut p.points).speed(1).range(2..=POINTS_MAX));
        });
        self.maj_plage(p);

        if let Some(e) = &self.erreur_graphe {
            ui.colored_label(ui.visuals().error_fg_color, e.to_string());
        }

        if let Some(t) = &self.trace {
            if t.repli {
                ui.colored_label(
                    ui.visuals().warn_fg_color,
                    format!("expression illisible, tracé de {}", t.expression),
                );
            }
            dessiner_trace(ui, t, &self.plage);
        }
    }

    fn bouton(&mut self, ui: &mut egui::Ui, label: &str, touche: Touche) {
        let resp = ui.add_sized(TAILLE_TOUCHE, egui::Button::new(label));
        if resp.clicked() {
            self.touche(touche);
        }
    }
}

/// Dessine la courbe : axes si visibles, segments coupés aux points omis.
fn dessiner_trace(ui: &mut egui::Ui, t: &Trace, plage: &GraphRange) {
    let (x_min, x_max) = (plage.min, plage.max);
    let largeur = ui.available_width();
    let (rect, _resp) =
        ui.allocate_exact_size(egui::vec2(largeur, HAUTEUR_GRAPHE), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let visuals = ui.visuals();
    painter.rect_filled(rect, 0.0, visuals.extreme_bg_color);

    if t.points.is_empty() || x_max <= x_min {
        return;
    }

    let (mut y_min, mut y_max) = t
        .points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });
    if y_max - y_min < 1e-9 {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let vers_ecran = |x: f64, y: f64| {
        let fx = ((x - x_min) / (x_max - x_min)) as f32;
        let fy = ((y - y_min) / (y_max - y_min)) as f32;
        egui::pos2(
            rect.left() + fx * rect.width(),
            rect.bottom() - fy * rect.height(),
        )
    };

    // axes
    let axe = egui::Stroke::new(1.0, visuals.weak_text_color());
    if y_min <= 0.0 && 0.0 <= y_max {
        painter.line_segment([vers_ecran(x_min, 0.0), vers_ecran(x_max, 0.0)], axe);
    }
    if x_min <= 0.0 && 0.0 <= x_max {
        painter.line_segment([vers_ecran(0.0, y_min), vers_ecran(0.0, y_max)], axe);
    }

    // un trou plus large que 1.5 pas = point(s) omis => on coupe la ligne
    let pas = (x_max - x_min) / (plage.points.max(2) - 1) as f64;
    let courbe = egui::Stroke::new(2.0, visuals.hyperlink_color);
    let mut segment: Vec<egui::Pos2> = Vec::new();
    let mut x_prec: Option<f64> = None;

    for p in &t.points {
        if x_prec.is_some_and(|xp| p.x - xp > 1.5 * pas) {
            tracer_segment(&painter, std::mem::take(&mut segment), courbe);
        }
        segment.push(vers_ecran(p.x, p.y));
        x_prec = Some(p.x);
    }
    tracer_segment(&painter, segment, courbe);
}

fn tracer_segment(painter: &egui::Painter, points: Vec<egui::Pos2>, stroke: egui::Stroke) {
    if points.len() >= 2 {
        painter.add(egui::Shape::line(points, stroke));
    }
}
