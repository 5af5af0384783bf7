//! Whole-program tests for the Java grammar.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use rewind_java::{lex, parse, parse_all, recognize};
use rewind_parse::{CancelFlag, ParseErrorKind, ParserConfig};

const SHAPES: &str = r#"
package demo.shapes;

import java.util.*;
import java.util.function.Function;
import static java.lang.Math.max;

/** Shapes and the things done to them. */
public abstract class Shape<T extends Comparable<T>> implements Comparable<Shape<T>> {
    protected final Map<String, List<Integer>> tags = new HashMap<>();
    private static int count;

    Shape() { count++; }

    public abstract double area();

    @Override
    public int compareTo(Shape<T> other) {
        double d = area() - other.area();
        return d < 0 ? -1 : d > 0 ? 1 : 0;
    }

    static int mask(int bits) {
        int m = 0;
        for (int i = 0; i < bits; i++) {
            m = (m << 1) | 1;
        }
        m >>>= 0;
        return m >> 2 >= 1 ? m : -m;
    }

    <R> List<R> mapAll(List<Shape<T>> shapes, Function<Shape<T>, R> f) {
        List<R> out = new ArrayList<>(shapes.size());
        for (final Shape<T> s : shapes) {
            out.add(f.apply(s));
        }
        return out;
    }

    void describe(Object o) throws java.io.IOException {
        if (o instanceof Shape) {
            Shape<?> s = (Shape<?>) o;
            String[] names = new String[] { "a", "b" };
            int[][] grid = new int[3][];
            long n = (long) names.length + (count) - 1;
            label:
            while (true) {
                switch ((int) n) {
                    case 0:
                        break label;
                    default:
                        n--;
                        continue label;
                }
            }
        } else {
            try {
                throw new IllegalStateException("not a shape: " + o);
            } catch (IllegalStateException | ClassCastException e) {
                System.err.println(e.getMessage());
            } finally {
                count = max(count, 0);
            }
        }
    }

    enum Kind implements Runnable {
        CIRCLE, SQUARE {
            public void run() {}
        };

        public void run() { do { count--; } while (count > 0); }
    }

    interface Visitor<R> {
        R visit(Shape<?> shape);
        default boolean accepts(Object o) { return o != null && !(o instanceof String); }
    }
}
"#;

#[test]
fn test_realistic_program_parses_cleanly() {
    let file = parse(SHAPES, ParserConfig::default()).unwrap();
    assert!(file.is_clean(), "{:?}", file.diagnostics);

    let tree = &file.tree;
    assert_eq!(tree.find_all("import_decl").len(), 3);
    assert_eq!(tree.find_all("class_decl").len(), 1);
    assert_eq!(tree.find_all("enum_decl").len(), 1);
    assert_eq!(tree.find_all("interface_decl").len(), 1);
    assert_eq!(tree.find_all("constructor_decl").len(), 1);
    assert_eq!(tree.find_all("for_each").len(), 1);
    assert_eq!(tree.find_all("for_classic").len(), 1);
    assert_eq!(tree.find_all("cast").len(), 3);
    assert_eq!(tree.find_all("catch_clause").len(), 1);
    assert_eq!(tree.find_all("labeled_stmt").len(), 1);

    // Every on-channel token except EOF lands in the tree exactly once.
    let expected: Vec<usize> = file
        .tokens
        .on_channel()
        .iter()
        .map(|&i| i as usize)
        .filter(|&i| i != file.tokens.eof_index())
        .collect();
    assert_eq!(tree.tokens_in_order(), expected);
}

#[test]
fn test_memoization_does_not_change_the_tree() {
    let with = parse(SHAPES, ParserConfig::default()).unwrap();
    let without = parse(SHAPES, ParserConfig::default().with_memoization(false)).unwrap();
    assert_eq!(with.sexpr(), without.sexpr());
    assert_eq!(without.stats.memo.hits, 0);
}

#[test]
fn test_recognize_without_tree() {
    let (tokens, errors) = lex(SHAPES);
    assert!(errors.is_empty());
    let output = recognize(&tokens, ParserConfig::default()).unwrap();
    assert!(output.is_clean());
    assert!(output.stats.trials > 0);
}

#[test]
fn test_recovery_keeps_later_declarations() {
    let source = "
        class A {
            int x = ;
            void f() { g(; h(); }
            int y;
        }
        class B {}
    ";
    let file = parse(source, ParserConfig::default().with_recovery(true)).unwrap();
    assert_eq!(file.diagnostics.len(), 2);
    assert_eq!(file.tree.find_all("class_decl").len(), 2);
    assert_eq!(file.tree.find_all("field_decl").len(), 2);

    let lines: Vec<u32> = file.diagnostics.iter().map(|d| d.pos.line).collect();
    assert_eq!(lines, vec![3, 4]);
}

#[test]
fn test_limits_abort_the_parse() {
    let err = parse(SHAPES, ParserConfig::default().with_max_steps(50)).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::StepBudgetExhausted { limit: 50 }));

    let nested = format!("class A {{ int x = {}1{}; }}", "(".repeat(200), ")".repeat(200));
    let err = parse(&nested, ParserConfig::default().with_recovery(true).with_max_depth(256))
        .unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::NestingTooDeep { limit: 256 }));

    let flag = CancelFlag::new();
    flag.cancel();
    let err = parse(SHAPES, ParserConfig::default().with_cancel_flag(flag)).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Cancelled);
}

#[test]
fn test_parse_all_matches_sequential() {
    let sources = [SHAPES, "class A {}", "interface I { void f(); }"];
    let parallel = parse_all(&sources, &ParserConfig::default());
    for (source, result) in sources.iter().zip(parallel) {
        let sequential = parse(source, ParserConfig::default()).unwrap();
        assert_eq!(result.unwrap().sexpr(), sequential.sexpr());
    }
}
