//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs de domaine (division par zéro, ln négatif, etc.)
//! - invariants clés : largeur d’affichage bornée, tracé ordonné, machine jamais bloquée

use std::time::{Duration, Instant};

use super::api::{evaluate_expression, sample_range};
use super::erreurs::{DisplayError, ParseError};
use super::format::format_result;
use super::machine::{CalculatorState, Touche, AFFICHAGE_ERREUR};
use super::trace::GraphRange;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    /// f64 "varié" : signe, mantisse et exposant décimal tirés séparément.
    fn valeur(&mut self) -> f64 {
        let m = self.next_u32() as f64 / u32::MAX as f64;
        let e = self.pick(41) as i32 - 20;
        let v = m * 10f64.powi(e);
        if self.coin() {
            -v
        } else {
            v
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng, avec_x: bool) -> String {
    match rng.pick(6) {
        0 => "pi".to_string(),
        1 => "e".to_string(),
        2 if avec_x => "x".to_string(),
        3 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        _ => format!("{}", rng.pick(10)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize, avec_x: bool) -> String {
    if depth == 0 {
        return gen_atom(rng, avec_x);
    }

    let sous = |rng: &mut Rng| gen_expr(rng, depth - 1, avec_x);
    match rng.pick(10) {
        0 => gen_atom(rng, avec_x),
        1 => format!("({}+{})", sous(rng), sous(rng)),
        2 => format!("({}-{})", sous(rng), sous(rng)),
        3 => format!("({}*{})", sous(rng), sous(rng)),
        4 => format!("({}/{})", sous(rng), sous(rng)),
        5 => format!("({}^{})", sous(rng), gen_atom(rng, false)),
        6 => format!("({}%{})", sous(rng), sous(rng)),
        7 => format!("-{}", sous(rng)),
        _ => {
            let f = ["sin", "cos", "tan", "ln", "log", "exp", "sqrt", "atan", "asin"]
                [rng.pick(9) as usize];
            format!("{f}({})", sous(rng))
        }
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_erreurs_typees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4, false);
        let a = evaluate_expression(&expr, 10);
        let b = evaluate_expression(&expr, 10);
        assert_eq!(a, b, "non déterministe: {expr:?}");

        match a {
            Ok(s) => {
                assert!(
                    s.len() <= 10 || s.contains('e'),
                    "largeur dépassée: {expr:?} -> {s:?}"
                );
                seen_ok += 1;
            }
            // une expression générée est toujours bien formée
            Err(DisplayError::Parse(e)) => panic!("parse refusé: {expr:?} ({e})"),
            Err(DisplayError::Eval(_)) => seen_err += 1,
        }
    }

    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_largeur_format() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..2000 {
        budget(t0, max);

        let v = rng.valeur();
        for largeur in [6, 10, 14, 20] {
            let s = format_result(v, largeur);
            assert!(
                s.len() <= largeur || s.contains('e'),
                "v={v:e} largeur={largeur} -> {s:?}"
            );
            // relisible par le lexeur
            assert!(
                evaluate_expression(&s, largeur).is_ok(),
                "non relisible: {s:?}"
            );
        }
    }
}

#[test]
fn fuzz_safe_trace_ordonne() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..40 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3, true);
        let min = rng.pick(20) as f64 - 10.0;
        let plage = GraphRange {
            min,
            max: min + 1.0 + rng.pick(20) as f64,
            points: 2 + rng.pick(200) as usize,
        };

        let t = sample_range(&expr, &plage);
        assert!(!t.repli, "repli inattendu: {expr:?}");
        assert!(t.points.len() <= plage.points);
        assert!(t.points.windows(2).all(|w| w[0].x <= w[1].x), "{expr:?}");
        assert!(t.points.iter().all(|p| p.y.is_finite()));
    }
}

#[test]
fn fuzz_safe_machine_jamais_bloquee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xFACADE_u64);
    let symboles = ['0', '1', '2', '7', '9', '+', '-', '*', '/', '^', '%', '(', ')', 'x'];

    let mut etat = CalculatorState::new();
    let mut historique_len = 0usize;

    for _ in 0..3000 {
        budget(t0, max);

        let touche = match rng.pick(8) {
            0..=3 => Touche::Chiffre(symboles[rng.pick(symboles.len() as u32) as usize]),
            4 => Touche::Decimal,
            5 => Touche::Egal,
            6 => Touche::Retour,
            _ => Touche::BasculeSigne,
        };
        etat.appliquer(touche);

        assert!(!etat.affichage.is_empty());
        // l’historique ne fait que grandir
        assert!(etat.historique.len() >= historique_len);
        historique_len = etat.historique.len();
        if etat.affichage == AFFICHAGE_ERREUR {
            assert!(etat.attente_operande);
        }
    }
}

#[test]
fn fuzz_safe_imbrication_profonde() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 200 niveaux de parenthèses : pas de débordement de pile
    let expr = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    assert_eq!(evaluate_expression(&expr, 10).unwrap(), "1");

    // 800 termes appariés : profondeur ~log2(800), bien sous la borne du parseur
    let somme = somme_balancee("0.5", 800);
    assert_eq!(evaluate_expression(&somme, 10).unwrap(), "400");
    budget(t0, max);
}

/// "(t+t)" apparié niveau par niveau jusqu’à ne rester qu’un terme.
fn somme_balancee(terme: &str, n: usize) -> String {
    let mut v: Vec<String> = vec![terme.to_string(); n];
    while v.len() > 1 {
        v = v
            .chunks(2)
            .map(|c| match c {
                [a, b] => format!("({a}+{b})"),
                [a] => a.clone(),
                _ => unreachable!(),
            })
            .collect();
    }
    v.pop().unwrap_or_default()
}

#[test]
fn fuzz_safe_moins_unaire_en_chaine() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2_000);

    // 50 000 moins unaires saisis au clavier puis "=" : refus, pas de débordement de pile
    let mut etat = CalculatorState::new();
    for _ in 0..50_000 {
        etat.appliquer(Touche::Chiffre('-'));
    }
    etat.appliquer(Touche::Chiffre('1'));
    etat.appliquer(Touche::Egal);
    assert_eq!(etat.affichage, AFFICHAGE_ERREUR);
    assert!(etat.attente_operande);
    assert!(etat.historique.is_empty());

    let s = format!("{}1", "-".repeat(50_000));
    assert!(matches!(
        evaluate_expression(&s, 10),
        Err(DisplayError::Parse(ParseError::TropProfond(_)))
    ));

    // même chose pour une longue somme non parenthésée
    let somme = vec!["1"; 20_000].join("+");
    assert!(matches!(
        evaluate_expression(&somme, 10),
        Err(DisplayError::Parse(ParseError::TropProfond(_)))
    ));
    budget(t0, max);
}
