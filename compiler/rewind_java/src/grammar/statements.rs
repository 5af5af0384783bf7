//! Blocks and statements.

use super::expressions::{expr, paren_expr};
use super::items::{class_decl, formal_param, var_declarators};
use super::types::{modifiers, ty};
use super::{
    JavaParser, ASSERT_STMT, BLOCK, BLOCK_STMT, BLOCK_STMT_DECISION, BREAK_STMT, CATCH_CLAUSE, CONTINUE_STMT,
    DO_STMT, EMPTY_STMT, EXPR_STMT, FOR_CLASSIC, FOR_CONTROL_DECISION, FOR_EACH,
    FOR_INIT_DECISION, FOR_STMT, IF_STMT, LABELED_STMT, LOCAL_VAR_DECL, RETURN_STMT, STATEMENT,
    STATEMENT_DECISION, SWITCH_LABEL, SWITCH_STMT, SYNCHRONIZED_STMT, THROW_STMT, TRY_STMT,
    WHILE_STMT,
};
use crate::{kinds, JavaKind};
use rewind_parse::{PResult, TreeSink};

/// `block : '{' block_stmt* '}'`
pub(crate) fn block<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&BLOCK, |p| {
        p.expect(JavaKind::LBrace)?;
        while !p.check(JavaKind::RBrace) && !p.at_end() {
            block_stmt(p)?;
        }
        p.expect(JavaKind::RBrace)?;
        Ok(())
    })
}

/// `block_stmt : class_decl | local_var_decl ';' | statement`
///
/// Recovers to the end of the statement or the enclosing `}`.
fn block_stmt<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule_or_recover(&BLOCK_STMT, |p| {
        let alt = p.decide(&BLOCK_STMT_DECISION, |p, alt| {
            if alt == 2 {
                local_var_header(p)
            } else {
                block_stmt_alt(p, alt)
            }
        })?;
        block_stmt_alt(p, alt)
    })
}

fn block_stmt_alt<S: TreeSink>(p: &mut JavaParser<'_, S>, alt: usize) -> PResult<()> {
    match alt {
        0 => class_decl(p),
        1 | 2 => local_var_decl(p, true),
        _ => statement(p),
    }
}

/// `('final' | annotation)* type Ident`: a type followed by a name can
/// only start a declaration.
fn local_var_header<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    modifiers(p, kinds![Final])?;
    ty(p)?;
    p.expect(JavaKind::Ident)?;
    Ok(())
}

/// `local_var_decl : ('final' | annotation)* type var_declarators`, with the
/// trailing `;` unless it is a `for` initializer.
fn local_var_decl<S: TreeSink>(p: &mut JavaParser<'_, S>, terminated: bool) -> PResult<()> {
    p.rule(&LOCAL_VAR_DECL, |p| {
        modifiers(p, kinds![Final])?;
        ty(p)?;
        var_declarators(p)?;
        if terminated {
            p.expect(JavaKind::Semi)?;
        }
        Ok(())
    })
}

pub(crate) fn statement<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&STATEMENT, |p| {
        // Only `Ident ':'` reaches a trial, and it is always a label.
        let alt = p.decide(&STATEMENT_DECISION, |_, _| Ok(()))?;
        statement_alt(p, alt)
    })
}

fn statement_alt<S: TreeSink>(p: &mut JavaParser<'_, S>, alt: usize) -> PResult<()> {
    match alt {
        0 => block(p),
        1 => p.rule(&EMPTY_STMT, |p| p.expect(JavaKind::Semi).map(|_| ())),
        2 => if_stmt(p),
        3 => while_stmt(p),
        4 => do_stmt(p),
        5 => for_stmt(p),
        6 => p.rule(&RETURN_STMT, |p| {
            p.expect(JavaKind::Return)?;
            if !p.check(JavaKind::Semi) {
                expr(p)?;
            }
            p.expect(JavaKind::Semi)?;
            Ok(())
        }),
        7 => jump(p, &BREAK_STMT, JavaKind::Break),
        8 => jump(p, &CONTINUE_STMT, JavaKind::Continue),
        9 => p.rule(&THROW_STMT, |p| {
            p.expect(JavaKind::Throw)?;
            expr(p)?;
            p.expect(JavaKind::Semi)?;
            Ok(())
        }),
        10 => try_stmt(p),
        11 => switch_stmt(p),
        12 => p.rule(&SYNCHRONIZED_STMT, |p| {
            p.expect(JavaKind::Synchronized)?;
            paren_expr(p)?;
            block(p)
        }),
        13 => assert_stmt(p),
        14 => p.rule(&LABELED_STMT, |p| {
            p.expect(JavaKind::Ident)?;
            p.expect(JavaKind::Colon)?;
            statement(p)
        }),
        _ => p.rule(&EXPR_STMT, |p| {
            expr(p)?;
            p.expect(JavaKind::Semi)?;
            Ok(())
        }),
    }
}

/// `assert_stmt : 'assert' expr (':' expr)? ';'`
fn assert_stmt<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&ASSERT_STMT, |p| {
        p.expect(JavaKind::Assert)?;
        expr(p)?;
        if p.eat(JavaKind::Colon) {
            expr(p)?;
        }
        p.expect(JavaKind::Semi)?;
        Ok(())
    })
}

/// `('break' | 'continue') Ident? ';'`
fn jump<S: TreeSink>(
    p: &mut JavaParser<'_, S>,
    rule: &'static rewind_parse::Rule,
    keyword: JavaKind,
) -> PResult<()> {
    p.rule(rule, |p| {
        p.expect(keyword)?;
        p.eat(JavaKind::Ident);
        p.expect(JavaKind::Semi)?;
        Ok(())
    })
}

/// `if_stmt : 'if' paren_expr statement ('else' statement)?`
///
/// A dangling `else` binds to the nearest `if`.
fn if_stmt<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&IF_STMT, |p| {
        p.expect(JavaKind::If)?;
        paren_expr(p)?;
        statement(p)?;
        if p.eat(JavaKind::Else) {
            statement(p)?;
        }
        Ok(())
    })
}

fn while_stmt<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&WHILE_STMT, |p| {
        p.expect(JavaKind::While)?;
        paren_expr(p)?;
        statement(p)
    })
}

fn do_stmt<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&DO_STMT, |p| {
        p.expect(JavaKind::Do)?;
        statement(p)?;
        p.expect(JavaKind::While)?;
        paren_expr(p)?;
        p.expect(JavaKind::Semi)?;
        Ok(())
    })
}

/// `for_stmt : 'for' '(' (for_each | for_classic) ')' statement`
fn for_stmt<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&FOR_STMT, |p| {
        p.expect(JavaKind::For)?;
        p.expect(JavaKind::LParen)?;
        let alt = p.decide(&FOR_CONTROL_DECISION, |p, _| {
            formal_param(p)?;
            p.expect(JavaKind::Colon)?;
            Ok(())
        })?;
        for_control_alt(p, alt)?;
        p.expect(JavaKind::RParen)?;
        statement(p)
    })
}

fn for_control_alt<S: TreeSink>(p: &mut JavaParser<'_, S>, alt: usize) -> PResult<()> {
    if alt == 0 {
        // for_each : formal_param ':' expr
        p.rule(&FOR_EACH, |p| {
            formal_param(p)?;
            p.expect(JavaKind::Colon)?;
            expr(p)
        })
    } else {
        // for_classic : for_init? ';' expr? ';' (expr (',' expr)*)?
        p.rule(&FOR_CLASSIC, |p| {
            if !p.check(JavaKind::Semi) {
                let alt = p.decide(&FOR_INIT_DECISION, |p, alt| {
                    if alt == 1 {
                        local_var_header(p)
                    } else {
                        for_init_alt(p, alt)
                    }
                })?;
                for_init_alt(p, alt)?;
            }
            p.expect(JavaKind::Semi)?;
            if !p.check(JavaKind::Semi) {
                expr(p)?;
            }
            p.expect(JavaKind::Semi)?;
            if !p.check(JavaKind::RParen) {
                expr_list(p)?;
            }
            Ok(())
        })
    }
}

fn for_init_alt<S: TreeSink>(p: &mut JavaParser<'_, S>, alt: usize) -> PResult<()> {
    match alt {
        0 | 1 => local_var_decl(p, false),
        _ => expr_list(p),
    }
}

fn expr_list<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    expr(p)?;
    while p.eat(JavaKind::Comma) {
        expr(p)?;
    }
    Ok(())
}

/// `try_stmt : 'try' block catch_clause* ('finally' block)?`, with at least
/// one `catch` or a `finally`.
fn try_stmt<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&TRY_STMT, |p| {
        p.expect(JavaKind::Try)?;
        block(p)?;
        if !p.check(JavaKind::Catch) && !p.check(JavaKind::Finally) {
            return Err(p.unexpected(kinds![Catch, Finally]));
        }
        while p.check(JavaKind::Catch) {
            catch_clause(p)?;
        }
        if p.eat(JavaKind::Finally) {
            block(p)?;
        }
        Ok(())
    })
}

/// `catch_clause : 'catch' '(' 'final'? type ('|' type)* Ident ')' block`
fn catch_clause<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&CATCH_CLAUSE, |p| {
        p.expect(JavaKind::Catch)?;
        p.expect(JavaKind::LParen)?;
        modifiers(p, kinds![Final])?;
        ty(p)?;
        while p.eat(JavaKind::Pipe) {
            ty(p)?;
        }
        p.expect(JavaKind::Ident)?;
        p.expect(JavaKind::RParen)?;
        block(p)
    })
}

/// `switch_stmt : 'switch' paren_expr '{' (switch_label | block_stmt)* '}'`
fn switch_stmt<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&SWITCH_STMT, |p| {
        p.expect(JavaKind::Switch)?;
        paren_expr(p)?;
        p.expect(JavaKind::LBrace)?;
        while !p.check(JavaKind::RBrace) && !p.at_end() {
            if p.check(JavaKind::Case) || p.check(JavaKind::Default) {
                switch_label(p)?;
            } else {
                block_stmt(p)?;
            }
        }
        p.expect(JavaKind::RBrace)?;
        Ok(())
    })
}

/// `switch_label : 'case' expr ':' | 'default' ':'`
fn switch_label<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&SWITCH_LABEL, |p| {
        if p.eat(JavaKind::Default) {
            p.expect(JavaKind::Colon)?;
            return Ok(());
        }
        p.expect(JavaKind::Case)?;
        expr(p)?;
        p.expect(JavaKind::Colon)?;
        Ok(())
    })
}
