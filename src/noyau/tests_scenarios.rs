//! Tests scénarios (campagne) : parcours complets au niveau de la machine d’état
//! et de la frontière publique, tels qu’un utilisateur les déroule au clavier.

use approx::assert_abs_diff_eq;

use super::expr::FunctionKind;
use super::machine::AFFICHAGE_ERREUR;
use super::*;

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn saisir(etat: &mut CalculatorState, s: &str) {
    for c in s.chars() {
        let t = if c == '.' {
            Touche::Decimal
        } else {
            Touche::Chiffre(c)
        };
        etat.appliquer(t);
    }
}

fn session(s: &str) -> CalculatorState {
    init_log();
    let mut e = CalculatorState::new();
    saisir(&mut e, s);
    e
}

const SQRT: Touche = Touche::Fonction(FonctionTouche::Scalaire(FunctionKind::Sqrt));

/* ------------------------ Scénarios de base ------------------------ */

#[test]
fn scen_priorite_operateurs() {
    let mut e = session("2+3*4");
    e.appliquer(Touche::Egal);
    assert_eq!(e.affichage, "14");
}

#[test]
fn scen_division_par_zero() {
    let mut e = session("1/0");
    e.appliquer(Touche::Egal);
    assert_eq!(e.affichage, AFFICHAGE_ERREUR);
    assert!(e.attente_operande);
}

#[test]
fn scen_racine() {
    let mut e = session("16");
    e.appliquer(SQRT);
    assert_eq!(e.affichage, "4");

    let mut e = session("1");
    e.appliquer(Touche::BasculeSigne);
    assert_eq!(e.affichage, "-1");
    e.appliquer(SQRT);
    assert_eq!(e.affichage, AFFICHAGE_ERREUR);
}

#[test]
fn scen_trace_sinus() {
    let plage = GraphRange {
        min: -10.0,
        max: 10.0,
        points: 5,
    };
    let t = sample_range("sin(x)", &plage);
    assert_eq!(t.points.len(), 5);
    for (p, x) in t.points.iter().zip([-10.0, -5.0, 0.0, 5.0, 10.0]) {
        assert_eq!(p.x, x);
        let attendu: f64 = format!("{:.4}", f64::sin(x)).parse().unwrap();
        assert_eq!(p.y, attendu);
        assert!(p.y.is_finite());
    }
}

#[test]
fn scen_memoire_addition() {
    let mut e = session("5");
    e.appliquer(Touche::MemoireStocker);
    e.appliquer(Touche::EffacerEntree);
    saisir(&mut e, "3");
    e.appliquer(Touche::MemoireAjouter);
    assert_eq!(e.memoire_texte().as_deref(), Some("8"));
}

#[test]
fn scen_integrale_de_x() {
    let r = integrate_over("x", (0.0, 1.0), 100).unwrap();
    assert_abs_diff_eq!(r, 0.5, epsilon = 1e-9);

    // même chose par la touche, avec les réglages par défaut
    let mut e = session("x");
    e.appliquer(Touche::Fonction(FonctionTouche::Integrale));
    let v: f64 = e.affichage.parse().unwrap();
    assert_abs_diff_eq!(v, 0.5, epsilon = 1e-8);
    assert!(e.historique[0].starts_with("integrate(x) = "));
}

/* ------------------------ Enchaînements ------------------------ */

#[test]
fn scen_resultat_reutilise() {
    // le résultat affiché redevient une entrée : "14" puis ^2
    let mut e = session("2+3*4");
    e.appliquer(Touche::Egal);
    e.appliquer(Touche::Fonction(FonctionTouche::Scalaire(FunctionKind::Square)));
    assert_eq!(e.affichage, "196");
    assert_eq!(
        e.historique,
        vec!["2+3*4 = 14".to_string(), "square(14) = 196".to_string()]
    );
}

#[test]
fn scen_resultat_exponentiel_reevaluable() {
    let mut e = session("123456789*1000000");
    e.appliquer(Touche::Egal);
    assert_eq!(e.affichage, "1.23457e+14");
    e.appliquer(Touche::Egal);
    assert_eq!(e.affichage, "1.23457e+14");
}

#[test]
fn scen_derivee_au_point_regle() {
    let mut e = session("x^2");
    e.reglages.set_point_derivee(5.0);
    e.appliquer(Touche::Fonction(FonctionTouche::Derivee));
    assert_eq!(e.affichage, "10");
    assert_eq!(e.historique, vec!["derivative(x^2) = 10".to_string()]);
}

#[test]
fn scen_erreur_puis_reprise() {
    let mut e = session("ln(0)");
    e.appliquer(Touche::Egal);
    assert_eq!(e.affichage, AFFICHAGE_ERREUR);
    e.appliquer(Touche::Decimal);
    assert_eq!(e.affichage, "0.");
    saisir(&mut e, "5*4");
    e.appliquer(Touche::Egal);
    assert_eq!(e.affichage, "2");
}

#[test]
fn scen_constante_et_fonction() {
    let mut e = CalculatorState::new();
    e.appliquer(Touche::Constante(Constante::Pi));
    e.appliquer(Touche::Fonction(FonctionTouche::Scalaire(FunctionKind::Cos)));
    assert_eq!(e.affichage, "-1");

    e.appliquer(Touche::Constante(Constante::E));
    e.appliquer(Touche::Fonction(FonctionTouche::Scalaire(FunctionKind::Ln)));
    assert_eq!(e.affichage, "1");
}

#[test]
fn scen_factorielle() {
    let mut e = session("5");
    e.appliquer(Touche::Fonction(FonctionTouche::Scalaire(FunctionKind::Factorial)));
    assert_eq!(e.affichage, "120");
    assert_eq!(e.historique[0], "fact(5) = 120");

    let mut e = session("2.5");
    e.appliquer(Touche::Fonction(FonctionTouche::Scalaire(FunctionKind::Factorial)));
    assert_eq!(e.affichage, AFFICHAGE_ERREUR);
}

#[test]
fn scen_multiplication_implicite_refusee() {
    let mut e = session("2x");
    e.appliquer(Touche::Egal);
    assert_eq!(e.affichage, AFFICHAGE_ERREUR);
    assert!(e.historique.is_empty());
}

#[test]
fn scen_memoire_survit_a_ac() {
    let mut e = session("12");
    e.appliquer(Touche::MemoireStocker);
    e.appliquer(Touche::EffacerTout);
    assert_eq!(e.affichage, "0");
    e.appliquer(Touche::MemoireRappel);
    assert_eq!(e.affichage, "12");
    saisir(&mut e, "+1");
    e.appliquer(Touche::Egal);
    assert_eq!(e.affichage, "13");
}

/* ------------------------ Propriétés ------------------------ */

#[test]
fn prop_evaluation_deterministe() {
    for s in ["2+3*4", "sin(1)/3", "2^0.5", "10 % 3", "-2^2"] {
        let a = evaluate_expression(s, 10);
        let b = evaluate_expression(s, 10);
        assert_eq!(a, b, "{s:?}");
    }
    assert_eq!(evaluate_expression("-2^2", 10).unwrap(), "-4");
}

#[test]
fn prop_linearite_derivee() {
    let f = parse("x^2").unwrap();
    let g = parse("exp(x)").unwrap();
    let d = derivee::differentiate(&Expr::add(f.clone(), g.clone()), expr::VAR_X);
    assert_eq!(
        d,
        Expr::add(
            derivee::differentiate(&f, expr::VAR_X),
            derivee::differentiate(&g, expr::VAR_X)
        )
    );
}

#[test]
fn prop_derivee_texte_relisible() {
    let d = derivative_text("x^3 + sin(x)").unwrap();
    // relue et évaluée en 0 : 3·0² + cos(0) = 1
    let ast = parse(&d).unwrap();
    assert_abs_diff_eq!(eval::evaluate(&ast, Some(0.0)).unwrap(), 1.0, epsilon = 1e-12);
}
