//! Compilation units, type declarations and class members.

use super::expressions::{arguments, expr};
use super::statements::block;
use super::types::{class_type, dims, modifiers, qualified_name, ty, type_list, type_params};
use super::{
    JavaParser, ANNOTATION, ANNOTATION_ELEMENT, ANNOTATION_MEMBER, ANNOTATION_MEMBER_DECISION,
    ANNOTATION_TYPE_DECL, ARRAY_INIT, CLASS_BODY, CLASS_DECL, CONSTRUCTOR_DECL, ENUM_CONSTANT,
    ENUM_DECL, FIELD_DECL, FORMAL_PARAM, FORMAL_PARAMS, IMPORT_DECL, INITIALIZER, INTERFACE_DECL,
    MEMBER, MEMBER_DECISION, METHOD_DECL, PACKAGE_DECL, TYPE_DECL, VAR_DECLARATOR,
};
use crate::kind::MODIFIERS;
use crate::{kinds, JavaKind};
use rewind_ir::TokenSet;
use rewind_parse::{PResult, TreeSink};

/// Modifiers allowed on members; `default` marks interface methods.
const MEMBER_MODIFIERS: TokenSet = MODIFIERS.union(kinds![Default]);

/// `compilation_unit : package_decl? import_decl* type_decl*`
///
/// The caller's root rule wraps this; end of input is checked by
/// `Parser::finish`.
pub fn compilation_unit<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    if p.check(JavaKind::Package) {
        package_decl(p)?;
    }
    while p.check(JavaKind::Import) {
        import_decl(p)?;
    }
    while !p.at_end() {
        type_decl(p)?;
    }
    Ok(())
}

fn package_decl<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&PACKAGE_DECL, |p| {
        p.expect(JavaKind::Package)?;
        qualified_name(p)?;
        p.expect(JavaKind::Semi)?;
        Ok(())
    })
}

/// `import_decl : 'import' 'static'? qualified_name ('.' '*')? ';'`
fn import_decl<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule_or_recover(&IMPORT_DECL, |p| {
        p.expect(JavaKind::Import)?;
        p.eat(JavaKind::Static);
        qualified_name(p)?;
        if p.eat(JavaKind::Dot) {
            p.expect(JavaKind::Star)?;
        }
        p.expect(JavaKind::Semi)?;
        Ok(())
    })
}

fn type_decl<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule_or_recover(&TYPE_DECL, |p| {
        if p.eat(JavaKind::Semi) {
            return Ok(());
        }
        modifiers(p, MODIFIERS)?;
        nested_type_decl(p)
    })
}

/// A class, interface, enum or annotation type declaration after its
/// modifiers.
fn nested_type_decl<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    match p.current_kind() {
        JavaKind::Class => class_decl(p),
        JavaKind::Interface => interface_decl(p),
        JavaKind::Enum => enum_decl(p),
        JavaKind::At => annotation_type_decl(p),
        _ => Err(p.unexpected(kinds![Class, Interface, Enum, At])),
    }
}

/// `annotation_type_decl : '@' 'interface' Ident '{' annotation_member* '}'`
fn annotation_type_decl<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&ANNOTATION_TYPE_DECL, |p| {
        p.expect(JavaKind::At)?;
        p.expect(JavaKind::Interface)?;
        p.expect(JavaKind::Ident)?;
        p.expect(JavaKind::LBrace)?;
        while !p.check(JavaKind::RBrace) && !p.at_end() {
            annotation_member(p)?;
        }
        p.expect(JavaKind::RBrace)?;
        Ok(())
    })
}

fn annotation_member<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule_or_recover(&ANNOTATION_MEMBER, |p| {
        if p.eat(JavaKind::Semi) {
            return Ok(());
        }
        modifiers(p, MODIFIERS)?;
        let alt = p.decide(&ANNOTATION_MEMBER_DECISION, annotation_member_trial)?;
        annotation_member_alt(p, alt)
    })
}

fn annotation_member_trial<S: TreeSink>(p: &mut JavaParser<'_, S>, alt: usize) -> PResult<()> {
    if alt == 1 {
        ty(p)?;
        p.expect(JavaKind::Ident)?;
        p.expect(JavaKind::LParen)?;
        Ok(())
    } else {
        annotation_member_alt(p, alt)
    }
}

fn annotation_member_alt<S: TreeSink>(p: &mut JavaParser<'_, S>, alt: usize) -> PResult<()> {
    match alt {
        0 => nested_type_decl(p),
        1 => annotation_element(p),
        _ => field_decl(p),
    }
}

/// `annotation_element : type Ident '(' ')' dims ('default' element_value)? ';'`
fn annotation_element<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&ANNOTATION_ELEMENT, |p| {
        ty(p)?;
        p.expect(JavaKind::Ident)?;
        p.expect(JavaKind::LParen)?;
        p.expect(JavaKind::RParen)?;
        dims(p);
        if p.eat(JavaKind::Default) {
            element_value(p)?;
        }
        p.expect(JavaKind::Semi)?;
        Ok(())
    })
}

/// `annotation : '@' qualified_name ('(' (element (',' element)*)? ')')?`
pub(crate) fn annotation<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&ANNOTATION, |p| {
        p.expect(JavaKind::At)?;
        qualified_name(p)?;
        if p.eat(JavaKind::LParen) {
            if !p.check(JavaKind::RParen) {
                element_value(p)?;
                while p.eat(JavaKind::Comma) {
                    element_value(p)?;
                }
            }
            p.expect(JavaKind::RParen)?;
        }
        Ok(())
    })
}

/// `element_value : annotation | array_init | expr`
fn element_value<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    match p.current_kind() {
        JavaKind::At => annotation(p),
        JavaKind::LBrace => array_init(p),
        _ => expr(p),
    }
}

/// `class_decl : 'class' Ident type_params? ('extends' type)?
///               ('implements' type_list)? class_body`
pub(crate) fn class_decl<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&CLASS_DECL, |p| {
        p.expect(JavaKind::Class)?;
        p.expect(JavaKind::Ident)?;
        if p.check(JavaKind::Lt) {
            type_params(p)?;
        }
        if p.eat(JavaKind::Extends) {
            ty(p)?;
        }
        if p.eat(JavaKind::Implements) {
            type_list(p)?;
        }
        class_body(p)
    })
}

fn interface_decl<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&INTERFACE_DECL, |p| {
        p.expect(JavaKind::Interface)?;
        p.expect(JavaKind::Ident)?;
        if p.check(JavaKind::Lt) {
            type_params(p)?;
        }
        if p.eat(JavaKind::Extends) {
            type_list(p)?;
        }
        class_body(p)
    })
}

/// `enum_decl : 'enum' Ident ('implements' type_list)?
///              '{' (enum_constant (',' enum_constant)*)? ','? (';' member*)? '}'`
fn enum_decl<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&ENUM_DECL, |p| {
        p.expect(JavaKind::Enum)?;
        p.expect(JavaKind::Ident)?;
        if p.eat(JavaKind::Implements) {
            type_list(p)?;
        }
        p.expect(JavaKind::LBrace)?;
        while p.check(JavaKind::Ident) || p.check(JavaKind::At) {
            enum_constant(p)?;
            if !p.eat(JavaKind::Comma) {
                break;
            }
        }
        if p.eat(JavaKind::Semi) {
            members(p)?;
        }
        p.expect(JavaKind::RBrace)?;
        Ok(())
    })
}

fn enum_constant<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&ENUM_CONSTANT, |p| {
        modifiers(p, TokenSet::new())?;
        p.expect(JavaKind::Ident)?;
        if p.check(JavaKind::LParen) {
            arguments(p)?;
        }
        if p.check(JavaKind::LBrace) {
            class_body(p)?;
        }
        Ok(())
    })
}

/// `class_body : '{' member* '}'`
pub(crate) fn class_body<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&CLASS_BODY, |p| {
        p.expect(JavaKind::LBrace)?;
        members(p)?;
        p.expect(JavaKind::RBrace)?;
        Ok(())
    })
}

fn members<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    while !p.check(JavaKind::RBrace) && !p.at_end() {
        member(p)?;
    }
    Ok(())
}

fn member<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule_or_recover(&MEMBER, |p| {
        if p.eat(JavaKind::Semi) {
            return Ok(());
        }
        modifiers(p, MEMBER_MODIFIERS)?;
        let alt = p.decide(&MEMBER_DECISION, member_trial)?;
        member_alt(p, alt)
    })
}

/// Trials only look as far as it takes to tell members apart, so an error
/// inside a method body is reported there and not as an undecidable member.
fn member_trial<S: TreeSink>(p: &mut JavaParser<'_, S>, alt: usize) -> PResult<()> {
    match alt {
        // `Ident (` is already matched by the lookahead.
        5 => Ok(()),
        6 => method_header(p),
        _ => member_alt(p, alt),
    }
}

/// `type_params? (type | 'void') Ident '('`
fn method_header<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    if p.check(JavaKind::Lt) {
        type_params(p)?;
    }
    if !p.eat(JavaKind::Void) {
        ty(p)?;
    }
    p.expect(JavaKind::Ident)?;
    p.expect(JavaKind::LParen)?;
    Ok(())
}

fn member_alt<S: TreeSink>(p: &mut JavaParser<'_, S>, alt: usize) -> PResult<()> {
    match alt {
        0 => class_decl(p),
        1 => interface_decl(p),
        2 => enum_decl(p),
        3 => annotation_type_decl(p),
        4 => p.rule(&INITIALIZER, block),
        5 => constructor_decl(p),
        6 => method_decl(p),
        _ => field_decl(p),
    }
}

/// `field_decl : type var_declarator (',' var_declarator)* ';'`
fn field_decl<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&FIELD_DECL, |p| {
        ty(p)?;
        var_declarators(p)?;
        p.expect(JavaKind::Semi)?;
        Ok(())
    })
}

/// `method_decl : type_params? (type | 'void') Ident formal_params dims
///                ('throws' type_list)? (block | ';')`
fn method_decl<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&METHOD_DECL, |p| {
        if p.check(JavaKind::Lt) {
            type_params(p)?;
        }
        if !p.eat(JavaKind::Void) {
            ty(p)?;
        }
        p.expect(JavaKind::Ident)?;
        formal_params(p)?;
        dims(p);
        throws(p)?;
        if p.eat(JavaKind::Semi) {
            Ok(())
        } else {
            block(p)
        }
    })
}

/// `constructor_decl : Ident formal_params ('throws' type_list)? block`
fn constructor_decl<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&CONSTRUCTOR_DECL, |p| {
        p.expect(JavaKind::Ident)?;
        formal_params(p)?;
        throws(p)?;
        block(p)
    })
}

fn throws<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    if p.eat(JavaKind::Throws) {
        class_type(p, false)?;
        while p.eat(JavaKind::Comma) {
            class_type(p, false)?;
        }
    }
    Ok(())
}

/// `formal_params : '(' (formal_param (',' formal_param)*)? ')'`
fn formal_params<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&FORMAL_PARAMS, |p| {
        p.expect(JavaKind::LParen)?;
        if !p.check(JavaKind::RParen) {
            formal_param(p)?;
            while p.eat(JavaKind::Comma) {
                formal_param(p)?;
            }
        }
        p.expect(JavaKind::RParen)?;
        Ok(())
    })
}

/// `formal_param : ('final' | annotation)* type Ident dims`
pub(crate) fn formal_param<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&FORMAL_PARAM, |p| {
        modifiers(p, kinds![Final])?;
        ty(p)?;
        p.expect(JavaKind::Ident)?;
        dims(p);
        Ok(())
    })
}

/// `var_declarator (',' var_declarator)*`
pub(crate) fn var_declarators<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    var_declarator(p)?;
    while p.eat(JavaKind::Comma) {
        var_declarator(p)?;
    }
    Ok(())
}

/// `var_declarator : Ident dims ('=' var_init)?`
fn var_declarator<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&VAR_DECLARATOR, |p| {
        p.expect(JavaKind::Ident)?;
        dims(p);
        if p.eat(JavaKind::Eq) {
            var_init(p)?;
        }
        Ok(())
    })
}

/// `var_init : array_init | expr`
fn var_init<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    if p.check(JavaKind::LBrace) {
        array_init(p)
    } else {
        expr(p)
    }
}

/// `array_init : '{' (var_init (',' var_init)*)? ','? '}'`
pub(crate) fn array_init<S: TreeSink>(p: &mut JavaParser<'_, S>) -> PResult<()> {
    p.rule(&ARRAY_INIT, |p| {
        p.expect(JavaKind::LBrace)?;
        while !p.check(JavaKind::RBrace) {
            var_init(p)?;
            if !p.eat(JavaKind::Comma) {
                break;
            }
        }
        p.expect(JavaKind::RBrace)?;
        Ok(())
    })
}
