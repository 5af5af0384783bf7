//! Types, type arguments and type parameters.
//!
//! Every `type_args` consumes exactly one `>` token, so the two closers of
//! `Map<K, List<V>>` belong to two nested rules.

use super::{
    JavaParser, CLASS_TYPE, CREATED_CLASS_TYPE, DIAMOND_TYPE_ARGS, QUALIFIED_NAME, TYPE, TYPE_ARG,
    TYPE_ARGS, TYPE_PARAM, TYPE_PARAMS,
};
use crate::kind::PRIMITIVE_TYPES;
use crate::JavaKind;
use rewind_ir::TokenSet;
use rewind_parse::{PResult, TreeSink};

/// `type : (primitive | class_type) dims`
pub(crate) fn ty<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&TYPE, |p| {
        if p.check_set(PRIMITIVE_TYPES) {
            p.bump();
        } else {
            class_type(p, false)?;
        }
        dims(p);
        Ok(())
    })
}

/// `class_type : Ident type_args? ('.' Ident type_args?)*`
///
/// With `allow_diamond`, `<>` is accepted as the type arguments (`new
/// ArrayList<>()`). The two forms are distinct rules so a memoized
/// `List<>` never stands in for a plain type.
pub(crate) fn class_type<S: TreeSink>(
    p: &mut JavaParser<'_, S>,
    allow_diamond: bool,
) -> PResult<()> {
    let rule = if allow_diamond { &CREATED_CLASS_TYPE } else { &CLASS_TYPE };
    p.rule(rule, |p| {
        loop {
            p.expect(JavaKind::Ident)?;
            if p.check(JavaKind::Lt) {
                type_args(p, allow_diamond)?;
            }
            if p.check(JavaKind::Dot) && p.peek_kind(1) == JavaKind::Ident {
                p.bump();
            } else {
                return Ok(());
            }
        }
    })
}

/// `type_args : '<' (type_arg (',' type_arg)*)? '>'`
fn type_args<S: TreeSink>(p: &mut JavaParser<'_, S>, allow_diamond: bool) -> PResult<()> {
    let rule = if allow_diamond { &DIAMOND_TYPE_ARGS } else { &TYPE_ARGS };
    p.rule(rule, |p| {
        p.expect(JavaKind::Lt)?;
        if allow_diamond && p.check(JavaKind::Gt) {
            p.bump();
            return Ok(());
        }
        type_arg(p)?;
        while p.eat(JavaKind::Comma) {
            type_arg(p)?;
        }
        p.expect(JavaKind::Gt)?;
        Ok(())
    })
}

/// `type_arg : '?' (('extends' | 'super') type)? | type`
fn type_arg<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&TYPE_ARG, |p| {
        if p.eat(JavaKind::Question) {
            if p.eat(JavaKind::Extends) || p.eat(JavaKind::Super) {
                ty(p)?;
            }
            Ok(())
        } else {
            ty(p)
        }
    })
}

/// `type_params : '<' type_param (',' type_param)* '>'`
pub(crate) fn type_params<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&TYPE_PARAMS, |p| {
        p.expect(JavaKind::Lt)?;
        type_param(p)?;
        while p.eat(JavaKind::Comma) {
            type_param(p)?;
        }
        p.expect(JavaKind::Gt)?;
        Ok(())
    })
}

/// `type_param : Ident ('extends' type ('&' type)*)?`
fn type_param<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&TYPE_PARAM, |p| {
        p.expect(JavaKind::Ident)?;
        if p.eat(JavaKind::Extends) {
            ty(p)?;
            while p.eat(JavaKind::Amp) {
                ty(p)?;
            }
        }
        Ok(())
    })
}

/// `type (',' type)*`
pub(crate) fn type_list<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    ty(p)?;
    while p.eat(JavaKind::Comma) {
        ty(p)?;
    }
    Ok(())
}

/// `('[' ']')*`
pub(crate) fn dims<S: TreeSink>(p: &mut JavaParser<'_, S>) {
    while p.check(JavaKind::LBracket) && p.peek_kind(1) == JavaKind::RBracket {
        p.bump();
        p.bump();
    }
}

/// `qualified_name : Ident ('.' Ident)*`
///
/// Stops before a `.` not followed by a name, leaving `.*` of an import
/// on demand to the caller.
pub(crate) fn qualified_name<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&QUALIFIED_NAME, |p| {
        p.expect(JavaKind::Ident)?;
        while p.check(JavaKind::Dot) && p.peek_kind(1) == JavaKind::Ident {
            p.bump();
            p.bump();
        }
        Ok(())
    })
}

/// Modifiers and annotations in any order. Not a rule of its own: most
/// declarations have none.
pub(crate) fn modifiers<S: TreeSink>(p: &mut JavaParser<'_, S>, allowed: TokenSet) -> PResult<()> {
    loop {
        if p.check_set(allowed) {
            p.bump();
        } else if p.check(JavaKind::At) && p.peek_kind(1) != JavaKind::Interface {
            super::items::annotation(p)?;
        } else {
            return Ok(());
        }
    }
}
