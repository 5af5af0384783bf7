//! Expressions, one rule per precedence level.
//!
//! Every level opens a node even when it only passes its operand through;
//! `SyntaxTree::to_compact_sexpr` folds those chains away.

use super::items::{array_init, class_body};
use super::predicates::{COMPOUND_ASSIGN_OPERATORS, RELATIONAL_OPERATORS, SHIFT_OPERATORS};
use super::types::{class_type, dims, ty};
use super::{
    JavaParser, ADDITIVE, ARGUMENTS, BIT_AND, BIT_OR, BIT_XOR, CAST, CONDITIONAL, CREATOR,
    EQUALITY, EXPR, EXPR_START, LOGICAL_AND, LOGICAL_OR, MULTIPLICATIVE, PAREN_EXPR, POSTFIX,
    PRIMARY, PRIMARY_DECISION, RELATIONAL, SHIFT, UNARY, UNARY_DECISION,
};
use crate::kind::{PRIMITIVE_TYPES, SIMPLE_ASSIGN_OPERATORS};
use crate::{kinds, JavaKind};
use rewind_ir::TokenSet;
use rewind_parse::{PResult, Rule, SemanticPredicate, TreeSink};

/// What a reference cast's operand may start with. Not `+`, `-`, `++` or
/// `--`: `(a) + b` is an addition.
const CAST_OPERAND_START: TokenSet =
    EXPR_START.difference(kinds![Plus, Minus, PlusPlus, MinusMinus]);

type Operand<S> = fn(&mut JavaParser<'_, S>) -> PResult<()>;

/// Width of the first operator in `table` that matches here.
fn operator_width<S: TreeSink>(
    p: &JavaParser<'_, S>,
    table: &[(&SemanticPredicate<JavaKind>, usize)],
) -> Option<usize> {
    table
        .iter()
        .find(|(predicate, _)| p.check_predicate(predicate))
        .map(|&(_, width)| width)
}

fn bump_n<S: TreeSink>(p: &mut JavaParser<'_, S>, n: usize) {
    for _ in 0..n {
        p.bump();
    }
}

/// `expr : conditional (assign_op expr)?`
///
/// Assignment is right associative.
pub(crate) fn expr<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&EXPR, |p| {
        conditional(p)?;
        if p.check_set(SIMPLE_ASSIGN_OPERATORS) {
            p.bump();
            expr(p)?;
        } else if let Some(width) = operator_width(p, &COMPOUND_ASSIGN_OPERATORS) {
            bump_n(p, width);
            expr(p)?;
        }
        Ok(())
    })
}

/// `conditional : logical_or ('?' expr ':' conditional)?`
fn conditional<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&CONDITIONAL, |p| {
        logical_or(p)?;
        if p.eat(JavaKind::Question) {
            expr(p)?;
            p.expect(JavaKind::Colon)?;
            conditional(p)?;
        }
        Ok(())
    })
}

/// A left-associative level whose operators are single tokens. The
/// operands of one level end up as siblings.
fn binary<S: TreeSink>(
    p: &mut JavaParser<'_, S>,
    rule: &'static Rule,
    operators: TokenSet,
    operand: Operand<S>,
) -> PResult<()> {
    p.rule(rule, |p| {
        operand(p)?;
        while p.check_set(operators) {
            p.bump();
            operand(p)?;
        }
        Ok(())
    })
}

fn logical_or<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    binary(p, &LOGICAL_OR, kinds![PipePipe], logical_and)
}

fn logical_and<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    binary(p, &LOGICAL_AND, kinds![AmpAmp], bit_or)
}

fn bit_or<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    binary(p, &BIT_OR, kinds![Pipe], bit_xor)
}

fn bit_xor<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    binary(p, &BIT_XOR, kinds![Caret], bit_and)
}

fn bit_and<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    binary(p, &BIT_AND, kinds![Amp], equality)
}

fn equality<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    binary(p, &EQUALITY, kinds![EqEq, BangEq], relational)
}

/// `relational : shift (rel_op shift | 'instanceof' type)*`
fn relational<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&RELATIONAL, |p| {
        shift(p)?;
        loop {
            if p.eat(JavaKind::Instanceof) {
                ty(p)?;
            } else if let Some(width) = operator_width(p, &RELATIONAL_OPERATORS) {
                bump_n(p, width);
                shift(p)?;
            } else {
                return Ok(());
            }
        }
    })
}

/// `shift : additive (('<<' | '>>' | '>>>') additive)*`
fn shift<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&SHIFT, |p| {
        additive(p)?;
        while let Some(width) = operator_width(p, &SHIFT_OPERATORS) {
            bump_n(p, width);
            additive(p)?;
        }
        Ok(())
    })
}

fn additive<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    binary(p, &ADDITIVE, kinds![Plus, Minus], multiplicative)
}

fn multiplicative<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    binary(p, &MULTIPLICATIVE, kinds![Star, Slash, Percent], unary)
}

/// `unary : prefix_op unary | cast | postfix`
fn unary<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&UNARY, |p| {
        let alt = p.decide(&UNARY_DECISION, cast_trial)?;
        unary_alt(p, alt)
    })
}

/// A parenthesized type followed by something that can be cast. Only the
/// two cast alternatives ever reach a trial.
fn cast_trial<S: TreeSink>(p: &mut JavaParser<'_, S>, alt: usize) -> PResult<()> {
    p.expect(JavaKind::LParen)?;
    if alt == 1 {
        p.expect_set(PRIMITIVE_TYPES)?;
        dims(p);
        p.expect(JavaKind::RParen)?;
        return Ok(());
    }
    ty(p)?;
    p.expect(JavaKind::RParen)?;
    p.expect_set(CAST_OPERAND_START)?;
    Ok(())
}

fn unary_alt<S: TreeSink>(p: &mut JavaParser<'_, S>, alt: usize) -> PResult<()> {
    match alt {
        0 => {
            p.bump();
            unary(p)
        }
        // '(' primitive dims ')' unary
        1 => p.rule(&CAST, |p| {
            p.expect(JavaKind::LParen)?;
            p.expect_set(PRIMITIVE_TYPES)?;
            dims(p);
            p.expect(JavaKind::RParen)?;
            unary(p)
        }),
        // '(' type ')' unary
        2 => p.rule(&CAST, |p| {
            p.expect(JavaKind::LParen)?;
            ty(p)?;
            p.expect(JavaKind::RParen)?;
            unary(p)
        }),
        _ => postfix(p),
    }
}

/// `postfix : primary selector* ('++' | '--')*`
fn postfix<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&POSTFIX, |p| {
        primary(p)?;
        loop {
            if p.eat(JavaKind::Dot) {
                // selector : '.' (Ident arguments? | 'class' | 'this')
                if p.eat(JavaKind::Class) || p.eat(JavaKind::This) {
                    continue;
                }
                p.expect(JavaKind::Ident)?;
                if p.check(JavaKind::LParen) {
                    arguments(p)?;
                }
            } else if p.eat(JavaKind::LBracket) {
                expr(p)?;
                p.expect(JavaKind::RBracket)?;
            } else {
                break;
            }
        }
        while p.check_set(kinds![PlusPlus, MinusMinus]) {
            p.bump();
        }
        Ok(())
    })
}

fn primary<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&PRIMARY, |p| {
        let alt = p.decide(&PRIMARY_DECISION, primary_alt)?;
        primary_alt(p, alt)
    })
}

fn primary_alt<S: TreeSink>(p: &mut JavaParser<'_, S>, alt: usize) -> PResult<()> {
    match alt {
        0 => paren_expr(p),
        1 => {
            p.bump();
            Ok(())
        }
        3 => {
            // 'super' (arguments | '.' Ident arguments?)
            p.expect(JavaKind::Super)?;
            if p.check(JavaKind::LParen) {
                return arguments(p);
            }
            p.expect(JavaKind::Dot)?;
            p.expect(JavaKind::Ident)?;
            if p.check(JavaKind::LParen) {
                arguments(p)?;
            }
            Ok(())
        }
        4 => creator(p),
        // `this` or a name, either possibly called
        _ => {
            p.bump();
            if p.check(JavaKind::LParen) {
                arguments(p)?;
            }
            Ok(())
        }
    }
}

/// `paren_expr : '(' expr ')'`
pub(crate) fn paren_expr<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&PAREN_EXPR, |p| {
        p.expect(JavaKind::LParen)?;
        expr(p)?;
        p.expect(JavaKind::RParen)?;
        Ok(())
    })
}

/// ```text
/// creator : 'new' primitive array_rest
///         | 'new' class_type (array_rest | arguments class_body?)
/// ```
fn creator<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&CREATOR, |p| {
        p.expect(JavaKind::New)?;
        if p.check_set(PRIMITIVE_TYPES) {
            p.bump();
            return array_rest(p);
        }
        class_type(p, true)?;
        if p.check(JavaKind::LBracket) {
            return array_rest(p);
        }
        arguments(p)?;
        if p.check(JavaKind::LBrace) {
            class_body(p)?;
        }
        Ok(())
    })
}

/// `array_rest : '[' ']' dims array_init | ('[' expr ']')+ dims`
fn array_rest<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    if p.check(JavaKind::LBracket) && p.peek_kind(1) == JavaKind::RBracket {
        dims(p);
        return array_init(p);
    }
    p.expect(JavaKind::LBracket)?;
    expr(p)?;
    p.expect(JavaKind::RBracket)?;
    while p.check(JavaKind::LBracket) && p.peek_kind(1) != JavaKind::RBracket {
        p.bump();
        expr(p)?;
        p.expect(JavaKind::RBracket)?;
    }
    dims(p);
    Ok(())
}

/// `arguments : '(' (expr (',' expr)*)? ')'`
pub(crate) fn arguments<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&ARGUMENTS, |p| {
        p.expect(JavaKind::LParen)?;
        if !p.check(JavaKind::RParen) {
            expr(p)?;
            while p.eat(JavaKind::Comma) {
                expr(p)?;
            }
        }
        p.expect(JavaKind::RParen)?;
        Ok(())
    })
}
