#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::config::CancelFlag;
use crate::observer::{ObserverEvent, RecordingObserver, TracingObserver};
use crate::tests::grammar::{self, PROGRAM};
use crate::tests::toy::{lex, Toy};
use crate::tests::{parse_program, sexpr};
use crate::tree::{SyntaxTree, TreeBuilder};
use pretty_assertions::assert_eq;

fn strict() -> ParserConfig {
    ParserConfig::default()
}

fn recovering() -> ParserConfig {
    ParserConfig::default().with_recovery(true)
}

fn parse_err(source: &str, config: ParserConfig) -> ParseError {
    parse_program(source, config).map(|_| ()).unwrap_err()
}

// ─────────────────────────────────────────────────────────────────────────
// Committed parsing
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_expression_statement() {
    assert_eq!(
        sexpr("a + b;"),
        "(expr_stmt (additive (primary a) + (primary b)) ;)"
    );
}

#[test]
fn test_generic_declaration() {
    assert_eq!(sexpr("List<X> y;"), "(decl (type List < (type X) >) y ;)");
}

#[test]
fn test_adjacent_closers_in_type() {
    assert_eq!(
        sexpr("A<B<C>> v;"),
        "(decl (type A < (type B < (type C) >) >) v ;)"
    );
}

#[test]
fn test_adjacent_closers_in_expression_shift() {
    assert_eq!(
        sexpr("a >> b;"),
        "(expr_stmt (shift (primary a) > > (primary b)) ;)"
    );
}

#[test]
fn test_less_than_falls_back_to_expression() {
    assert_eq!(
        sexpr("a < b;"),
        "(expr_stmt (expr (primary a) < (primary b)) ;)"
    );
}

#[test]
fn test_cast() {
    assert_eq!(
        sexpr("(T) x;"),
        "(expr_stmt (cast ( (type T) ) (primary x)) ;)"
    );
}

#[test]
fn test_parenthesized_expression() {
    assert_eq!(
        sexpr("(a) + b;"),
        "(expr_stmt (additive (paren ( (primary a) )) + (primary b)) ;)"
    );
}

#[test]
fn test_several_statements() {
    assert_eq!(
        sexpr("x y; 1;"),
        "(program (decl (type x) y ;) (expr_stmt (primary 1) ;))"
    );
}

#[test]
fn test_empty_program() {
    let (output, _) = parse_program("", strict()).unwrap();
    let tree = output.value;
    assert_eq!(tree.len(), 1);
    assert!(tree.children(tree.root().unwrap()).is_empty());
}

// ─────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_separated_closers_are_not_a_shift() {
    let err = parse_err("a > > b;", strict());
    assert_eq!(
        err.to_string(),
        "no viable alternative at `>` while deciding primary \
         (expected `a`, `b`, `c`, `d`, `identifier`, `number`, or `(`) \
         at line 1, column 5 (in primary)"
    );
    assert_eq!(err.position, 2);
}

#[test]
fn test_unexpected_token_message() {
    // The declaration trial fails, so the error comes from the expression
    // statement the decision fell back to.
    let err = parse_err("List<X y;", strict());
    assert_eq!(err.kind.code(), "E1001");
    assert_eq!(err.expected(), &[";"]);
    assert_eq!(err.rule, Some("expr_stmt"));
    assert_eq!(err.pos.column, 8);
}

#[test]
fn test_strict_mode_stops_at_first_error() {
    let err = parse_err("a + ; b + ;", strict());
    assert_eq!(err.position, 2);
}

#[test]
fn test_trailing_tokens() {
    let tokens = lex("a b c");
    let err = Parser::new(&tokens, strict())
        .parse(&PROGRAM, |p| grammar::s(p, &grammar::S_DECISION_K2))
        .unwrap_err();
    assert_eq!(err.to_string(), "expected `end of input`, found `c` at line 1, column 5");

    let output = Parser::with_sink(&tokens, recovering(), TreeBuilder::new())
        .parse(&PROGRAM, |p| grammar::s(p, &grammar::S_DECISION_K2))
        .unwrap();
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(
        output.value.to_sexpr(&tokens),
        "(program (s (ab a b))) (<error> c)"
    );
}

// ─────────────────────────────────────────────────────────────────────────
// Recovery
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_recovery_skips_to_terminator() {
    let (output, tokens) = parse_program("a + ; b;", recovering()).unwrap();
    assert_eq!(output.diagnostics.len(), 1);
    let diag = &output.diagnostics[0];
    assert_eq!(diag.position, 2);
    assert_eq!(diag.rule, Some("primary"));

    let tree = &output.value;
    assert_eq!(tree.error_count(), 1);
    assert_eq!(
        tree.to_compact_sexpr(&tokens),
        "(program (statement (additive (primary a) + (primary)) (<error> ;)) \
         (expr_stmt (primary b) ;))"
    );
}

#[test]
fn test_recovery_reports_each_statement() {
    let (output, _) = parse_program("a + ; x y z; 1;", recovering()).unwrap();
    assert_eq!(output.diagnostics.len(), 2);
    assert_eq!(output.value.error_count(), 2);
    assert_eq!(output.value.find_all("statement").len(), 3);
}

#[test]
fn test_recovery_keeps_every_token() {
    let source = "a + ; ) ) ( b; x<y z;";
    let (output, tokens) = parse_program(source, recovering()).unwrap();
    assert!(!output.is_clean());

    let expected: Vec<usize> = (0..tokens.len() - 1).collect();
    assert_eq!(output.value.tokens_in_order(), expected);
}

static ITEM: Rule = Rule::new(40, "item").follow(TokenSet::from_indices(&[Toy::RParen as u8]));

#[test]
fn test_recovery_without_progress_consumes_one_token() {
    let tokens = lex(") ) x");
    let output = Parser::with_sink(&tokens, recovering(), TreeBuilder::new())
        .parse(&PROGRAM, |p| {
            while !p.at_end() {
                p.rule_or_recover(&ITEM, |p| p.expect(Toy::Ident).map(|_| ()))?;
            }
            Ok(())
        })
        .unwrap();

    assert_eq!(output.diagnostics.len(), 2);
    assert_eq!(
        output.value.to_sexpr(&tokens),
        "(program (item (<error> ))) (item (<error> ))) (item x))"
    );
}

#[test]
fn test_recovery_is_off_in_strict_mode() {
    let err = parse_err("a + ; b;", strict());
    assert_eq!(err.rule, Some("primary"));
}

// ─────────────────────────────────────────────────────────────────────────
// Decisions
// ─────────────────────────────────────────────────────────────────────────

fn parse_s(source: &str, decision: &Decision<Toy>) -> (SyntaxTree, RecordingObserver) {
    let tokens = lex(source);
    let mut observer = RecordingObserver::new();
    let output = Parser::with_sink(&tokens, strict(), TreeBuilder::new())
        .with_observer(&mut observer)
        .parse(&PROGRAM, |p| grammar::s(p, decision))
        .unwrap();
    (output.value, observer)
}

#[test]
fn test_k1_backtracks_to_second_alternative() {
    let tokens = lex("a c");
    let (tree, observer) = parse_s("a c", &grammar::S_DECISION_K1);
    assert_eq!(tree.to_compact_sexpr(&tokens), "(ac a c)");
    assert_eq!(observer.decisions(), vec![("s", 1)]);
    assert_eq!(observer.trial_count(), 1);
}

#[test]
fn test_k1_first_alternative_wins_its_trial() {
    let (_, observer) = parse_s("a b", &grammar::S_DECISION_K1);
    assert_eq!(observer.decisions(), vec![("s", 0)]);
    assert_eq!(observer.trial_count(), 1);
}

#[test]
fn test_k2_predicts_without_trials() {
    let (_, observer) = parse_s("a c", &grammar::S_DECISION_K2);
    assert_eq!(observer.decisions(), vec![("s", 1)]);
    assert_eq!(observer.trial_count(), 0);
}

#[test]
fn test_tie_goes_to_first_alternative() {
    let tokens = lex("x");
    for _ in 0..10 {
        let output = Parser::with_sink(&tokens, strict(), TreeBuilder::new())
            .parse(&PROGRAM, grammar::tie)
            .unwrap();
        assert_eq!(output.value.to_compact_sexpr(&tokens), "(first x)");
    }
}

#[test]
fn test_memoized_trials() {
    let tokens = lex("(a, b) +");
    let parse = |config: ParserConfig| {
        Parser::with_sink(&tokens, config, TreeBuilder::new())
            .parse(&PROGRAM, grammar::tail)
            .unwrap()
    };

    let memoized = parse(strict());
    assert_eq!(memoized.stats.trials, 3);
    assert_eq!(memoized.stats.memo.hits, 2);
    assert_eq!(memoized.stats.memo.records, 1);

    let plain = parse(strict().with_memoization(false));
    assert_eq!(plain.stats.memo, MemoStats::default());
    assert_eq!(plain.value, memoized.value);
    // Memo hits still count as rule invocations.
    assert_eq!(plain.stats.steps, memoized.stats.steps);
}

#[test]
fn test_speculative_last_alternative_must_pass_trial() {
    let tokens = lex("(a) b");
    let err = Parser::new(&tokens, strict())
        .parse(&PROGRAM, grammar::tail)
        .unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::NoViableAlternative {
            decision: "tail",
            expected: vec!["("],
            found: "`(`".to_string(),
        }
    );
    assert_eq!(err.rule, Some("tail"));
}

// ─────────────────────────────────────────────────────────────────────────
// Speculation
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_speculate_rewinds() {
    let tokens = lex("a b c");
    let mut parser = Parser::new(&tokens, strict());
    parser.bump();

    let matched = parser
        .speculate(|p| {
            p.expect(Toy::B)?;
            p.expect(Toy::C)?;
            Ok(())
        })
        .unwrap();
    assert!(matched);
    assert_eq!(parser.position(), 1);

    let matched = parser
        .speculate(|p| {
            p.expect(Toy::B)?;
            p.expect(Toy::D)?;
            Ok(())
        })
        .unwrap();
    assert!(!matched);
    assert_eq!(parser.position(), 1);
    assert_eq!(parser.cursor().outstanding_marks(), 0);
}

#[test]
fn test_nested_speculation() {
    let tokens = lex("a b c");
    let mut parser = Parser::new(&tokens, strict());
    let outer = parser
        .speculate(|p| {
            p.bump();
            let inner = p.speculate(|p| {
                p.bump();
                p.bump();
                Ok(())
            })?;
            assert!(inner);
            assert_eq!(p.position(), 1);
            assert!(p.is_speculating());
            Ok(())
        })
        .unwrap();
    assert!(outer);
    assert!(!parser.is_speculating());
    assert_eq!(parser.position(), 0);
}

#[test]
fn test_errors_in_trials_are_cheap() {
    let tokens = lex("a");
    let mut parser = Parser::new(&tokens, strict());
    let mut seen = None;
    let matched = parser
        .speculate(|p| {
            let err = p.expect(Toy::B).unwrap_err();
            seen = Some(err.kind.clone());
            Err(err)
        })
        .unwrap();
    assert!(!matched);
    assert_eq!(seen, Some(ParseErrorKind::TrialFailure));
}

#[test]
fn test_trials_do_not_reach_the_sink() {
    let tokens = lex("(T) x; (a) + b;");
    let output = Parser::with_sink(&tokens, strict(), TreeBuilder::new())
        .parse(&PROGRAM, grammar::program)
        .unwrap();
    assert!(output.stats.trials >= 2);
    let expected: Vec<usize> = (0..tokens.len() - 1).collect();
    assert_eq!(output.value.tokens_in_order(), expected);
}

// ─────────────────────────────────────────────────────────────────────────
// Limits
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_cancelled_before_start() {
    let flag = CancelFlag::new();
    flag.cancel();
    let err = parse_err("a;", strict().with_cancel_flag(flag.clone()));
    assert_eq!(err.kind, ParseErrorKind::Cancelled);

    let err = parse_err("a;", recovering().with_cancel_flag(flag));
    assert_eq!(err.kind, ParseErrorKind::Cancelled);
}

#[test]
fn test_step_budget() {
    let err = parse_err("a + b;", strict().with_max_steps(3));
    assert_eq!(err.kind, ParseErrorKind::StepBudgetExhausted { limit: 3 });
    assert!(err.is_abort());
}

#[test]
fn test_step_budget_crosses_trial_boundary() {
    // program, statement, expr_stmt, expr, shift, additive, primary, then
    // the cast trial enters `cast` as step 8.
    for config in [strict(), recovering()] {
        let err = parse_err("(T) x;", config.with_max_steps(7));
        assert_eq!(err.kind, ParseErrorKind::StepBudgetExhausted { limit: 7 });
    }
}

#[test]
fn test_nesting_limit() {
    let source = format!("{}a{};", "(".repeat(20), ")".repeat(20));
    for config in [strict(), recovering()] {
        let err = parse_err(&source, config.with_max_depth(16));
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep { limit: 16 });
    }
    assert!(parse_program(&source, strict()).is_ok());
}

#[test]
fn test_stats() {
    let (output, _) = parse_program("(a) + b;", strict()).unwrap();
    let stats = output.stats;
    assert!(stats.steps > 10);
    assert_eq!(stats.trials, 1);
    assert!(stats.max_depth >= 9);
}

// ─────────────────────────────────────────────────────────────────────────
// Observers
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_observer_sees_speculative_rules() {
    let tokens = lex("(a) + b;");
    let mut observer = RecordingObserver::new();
    Parser::new(&tokens, strict())
        .with_observer(&mut observer)
        .parse(&PROGRAM, grammar::program)
        .unwrap();

    assert!(observer.events.iter().any(|e| matches!(
        e,
        ObserverEvent::RuleEnter {
            rule: "cast",
            speculating: true,
            ..
        }
    )));
    assert!(!observer.committed_rules().contains(&"cast"));
    assert!(observer.committed_rules().contains(&"paren"));

    let enters = observer
        .events
        .iter()
        .filter(|e| matches!(e, ObserverEvent::RuleEnter { .. }))
        .count();
    let exits = observer
        .events
        .iter()
        .filter(|e| matches!(e, ObserverEvent::RuleExit { .. }))
        .count();
    assert_eq!(enters, exits);
}

#[test]
fn test_observer_sees_recovered_errors() {
    let tokens = lex("a + ; b;");
    let mut observer = RecordingObserver::new();
    Parser::new(&tokens, recovering())
        .with_observer(&mut observer)
        .parse(&PROGRAM, grammar::program)
        .unwrap();
    let errors: Vec<_> = observer
        .events
        .iter()
        .filter(|e| matches!(e, ObserverEvent::Error { .. }))
        .collect();
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_tracing_observer() {
    let tokens = lex("List<X> y; a >> b;");
    let mut observer = TracingObserver::new();
    let output = Parser::new(&tokens, strict())
        .with_observer(&mut observer)
        .parse(&PROGRAM, grammar::program)
        .unwrap();
    assert!(output.is_clean());
}
