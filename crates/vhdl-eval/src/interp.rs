//! The tree-walking interpreter (§4.I): evaluates a function-call node,
//! either by delegating to the built-in folder or by executing a
//! user-function body over literal arguments.

use vhdl_ast::arena::{Arena, NodeId};
use vhdl_ast::ident::Ident;
use vhdl_ast::node::{Node, NodeKind};
use vhdl_source::types::Location;

use crate::builtins::{self, fold_builtin};
use crate::error::EvalFatal;
use crate::vtable::{Vtable, RESULT_IDENT};

/// Evaluates a function-call node (§6: `eval(call) → tree`), returning a
/// folded replacement or the original call unchanged. Starts with a fresh,
/// empty value-table — binding into it is a no-op until a user-function body
/// pushes its own frame (§4.G).
pub fn eval(arena: &mut Arena, call: NodeId) -> Result<NodeId, EvalFatal> {
    let mut vtable = Vtable::new();
    eval_fcall(arena, &mut vtable, call)
}

fn fatal(loc: Location, message: impl Into<String>) -> EvalFatal { EvalFatal::new(loc, message) }

/// Precondition: `call` names an `FCall` node (§4.I). A call whose referent
/// cannot be resolved — the parser never performs name resolution (§1) — is
/// returned unchanged rather than treated as an error.
fn eval_fcall(arena: &mut Arena, vtable: &mut Vtable, call: NodeId) -> Result<NodeId, EvalFatal> {
    let node = arena.get(call).ok_or_else(|| fatal(Location::INVALID, "eval() called on a node no longer in the arena"))?.clone();
    debug_assert_eq!(node.kind, NodeKind::FCall, "eval_fcall's precondition is an FCall node");

    let Some(referent) = node.referent else { return Ok(call) };
    let Some(callee) = arena.get(referent).cloned() else { return Ok(call) };

    if let Some(builtin) = callee.attrs.builtin.clone() {
        let mut folded_params = Vec::with_capacity(node.params.len());
        for param in &node.params {
            folded_params.push(eval_expr(arena, vtable, *param)?);
        }
        log::trace!("fold-order dispatch for builtin `{builtin}` ({} args)", folded_params.len());
        return Ok(fold_builtin(arena, &builtin, &folded_params, node.loc.clone()).unwrap_or(call));
    }

    if callee.kind == NodeKind::FuncBody && node.params.iter().all(|arg| is_raw_literal(arena, *arg)) {
        return eval_func_body(arena, vtable, &callee, &node.params, call);
    }

    Ok(call)
}

fn is_raw_literal(arena: &Arena, id: NodeId) -> bool {
    arena.get(id).is_some_and(|n| n.kind == NodeKind::Literal)
}

/// Executes a user function body over already-literal arguments (§4.I:
/// "push a frame, bind each parameter identifier to its literal argument,
/// execute the body, pop"). The frame is popped on every exit path,
/// including an early `Err` (§5).
fn eval_func_body(arena: &mut Arena, vtable: &mut Vtable, body: &Node, args: &[NodeId], call: NodeId) -> Result<NodeId, EvalFatal> {
    let formals: Vec<Ident> = body.params.iter().filter_map(|p| arena.get(*p).and_then(|n| n.ident.clone())).collect();

    vtable.push();
    for (formal, arg) in formals.iter().zip(args) {
        vtable.bind(formal, *arg);
    }

    let outcome = run_body(arena, vtable, body);
    vtable.pop();

    match outcome? {
        Some(value) => Ok(value),
        None => Ok(call),
    }
}

fn run_body(arena: &mut Arena, vtable: &mut Vtable, body: &Node) -> Result<Option<NodeId>, EvalFatal> {
    for decl_id in &body.decls {
        let decl = arena
            .get(*decl_id)
            .ok_or_else(|| fatal(body.loc.clone(), "variable declaration vanished from the arena"))?
            .clone();
        if let (Some(ident), Some(init)) = (decl.ident, decl.value) {
            let value = eval_expr(arena, vtable, init)?;
            vtable.bind(&ident, value);
        }
    }

    let result_ident = Ident::new(RESULT_IDENT);
    for stmt_id in &body.stmts {
        eval_stmt(arena, vtable, *stmt_id)?;
        if vtable.lookup(&result_ident).is_some() {
            break;
        }
    }
    Ok(vtable.lookup(&result_ident))
}

/// Executes one sequential statement (§4.I: "Supported statements: `return`,
/// `if/else`, `while`, variable assignment. Any other kind raises a fatal at
/// the statement's location.").
fn eval_stmt(arena: &mut Arena, vtable: &mut Vtable, stmt: NodeId) -> Result<(), EvalFatal> {
    let node = arena.get(stmt).ok_or_else(|| fatal(Location::INVALID, "statement vanished from the arena"))?.clone();
    match node.kind {
        NodeKind::Return => eval_return(arena, vtable, &node),
        NodeKind::If => eval_if(arena, vtable, &node),
        NodeKind::While => eval_while(arena, vtable, &node),
        NodeKind::VarAssign => eval_var_assign(arena, vtable, &node),
        other => Err(fatal(node.loc, format!("cannot evaluate a statement of kind {other:?} during constant folding"))),
    }
}

/// `return [e]`: binds `result` to `eval_expr(e)` when `e` is present (§4.I).
fn eval_return(arena: &mut Arena, vtable: &mut Vtable, node: &Node) -> Result<(), EvalFatal> {
    if let Some(expr) = node.value {
        let value = eval_expr(arena, vtable, expr)?;
        vtable.bind(&Ident::new(RESULT_IDENT), value);
    }
    Ok(())
}

/// `if e then S_t else S_e`: `eval_expr(e)` must fold to a boolean (§4.I).
fn eval_if(arena: &mut Arena, vtable: &mut Vtable, node: &Node) -> Result<(), EvalFatal> {
    let cond = node.value.ok_or_else(|| fatal(node.loc.clone(), "if statement has no condition"))?;
    let folded_cond = eval_expr(arena, vtable, cond)?;
    let is_true = builtins::get_bool_lit(arena, folded_cond)
        .ok_or_else(|| fatal(node.loc.clone(), "if condition did not fold to a boolean"))?;
    let branch = if is_true { &node.stmts } else { &node.else_stmts };
    run_sequence(arena, vtable, branch)
}

/// `while e loop S`: repeatedly evaluates `e`; runaway loops are the
/// caller's responsibility to avoid (§4.I).
fn eval_while(arena: &mut Arena, vtable: &mut Vtable, node: &Node) -> Result<(), EvalFatal> {
    let cond = node.value.ok_or_else(|| fatal(node.loc.clone(), "while statement has no condition"))?;
    let result_ident = Ident::new(RESULT_IDENT);
    loop {
        let folded_cond = eval_expr(arena, vtable, cond)?;
        let is_true = builtins::get_bool_lit(arena, folded_cond)
            .ok_or_else(|| fatal(node.loc.clone(), "while condition did not fold to a boolean"))?;
        if !is_true {
            return Ok(());
        }
        run_sequence(arena, vtable, &node.stmts)?;
        if vtable.lookup(&result_ident).is_some() {
            return Ok(());
        }
    }
}

fn run_sequence(arena: &mut Arena, vtable: &mut Vtable, stmts: &[NodeId]) -> Result<(), EvalFatal> {
    let result_ident = Ident::new(RESULT_IDENT);
    for stmt in stmts {
        eval_stmt(arena, vtable, *stmt)?;
        if vtable.lookup(&result_ident).is_some() {
            break;
        }
    }
    Ok(())
}

/// `var := e`: the target must be a simple reference; `eval_expr(e)` must be
/// [`builtins::folded`] (§4.I).
fn eval_var_assign(arena: &mut Arena, vtable: &mut Vtable, node: &Node) -> Result<(), EvalFatal> {
    let target = node.target.ok_or_else(|| fatal(node.loc.clone(), "assignment has no target"))?;
    let target_node = arena.get(target).ok_or_else(|| fatal(node.loc.clone(), "assignment target vanished from the arena"))?.clone();
    if target_node.kind != NodeKind::Ref {
        return Err(fatal(node.loc.clone(), "assignment target must be a simple reference"));
    }
    let ident = target_node
        .ident
        .ok_or_else(|| fatal(node.loc.clone(), "assignment target is an unresolved reference"))?;

    let value_expr = node.value.ok_or_else(|| fatal(node.loc.clone(), "assignment has no value"))?;
    let value = eval_expr(arena, vtable, value_expr)?;
    if !builtins::folded(arena, value) {
        return Err(fatal(node.loc.clone(), format!("value assigned to `{ident}` did not fold to a constant")));
    }
    vtable.bind(&ident, value);
    Ok(())
}

/// Evaluates one expression (§4.I): a function call folds recursively, a
/// reference is looked up, an aggregate must already be constant, a literal
/// returns as-is, and any other kind is fatal.
fn eval_expr(arena: &mut Arena, vtable: &mut Vtable, expr: NodeId) -> Result<NodeId, EvalFatal> {
    let node = arena.get(expr).ok_or_else(|| fatal(Location::INVALID, "expression vanished from the arena"))?.clone();
    match node.kind {
        NodeKind::FCall => eval_fcall(arena, vtable, expr),
        NodeKind::Ref => eval_ref(arena, vtable, &node),
        NodeKind::Aggregate => {
            if builtins::folded_agg(arena, expr) {
                Ok(expr)
            } else {
                Err(fatal(node.loc, "aggregate is not a compile-time constant"))
            }
        }
        NodeKind::Literal => Ok(expr),
        other => Err(fatal(node.loc, format!("cannot evaluate an expression of kind {other:?}"))),
    }
}

/// A reference with a referent already carries its value (e.g. the
/// structural boolean encoding, §4.H); an unresolved reference is looked up
/// by name, and an absent binding is fatal (§4.I).
fn eval_ref(arena: &Arena, vtable: &Vtable, node: &Node) -> Result<NodeId, EvalFatal> {
    if node.referent.is_some() {
        return Ok(node.id);
    }
    let ident = node.ident.clone().ok_or_else(|| fatal(node.loc.clone(), "reference has neither a name nor a referent"))?;
    vtable.lookup(&ident).ok_or_else(|| fatal(node.loc.clone(), format!("unbound reference to `{ident}`")))
}

#[cfg(test)]
mod tests {
    use vhdl_ast::node::LiteralValue;

    use super::*;
    use crate::builtins::{get_bool_lit, get_int_lit, make_bool_ref, BOOLEAN_TYPE_NAME};

    fn int_lit(arena: &mut Arena, n: i64) -> NodeId {
        arena.alloc(|id| Node::new(id, NodeKind::Literal, Location::INVALID).with_literal(LiteralValue::Integer(n)))
    }

    fn builtin_decl(arena: &mut Arena, name: &str) -> NodeId {
        arena.alloc(|id| {
            let mut node = Node::new(id, NodeKind::FuncDecl, Location::INVALID);
            node.attrs.builtin = Some(Ident::new(name));
            node
        })
    }

    fn binary_call(arena: &mut Arena, op: &str, left: NodeId, right: NodeId) -> NodeId {
        let decl = builtin_decl(arena, op);
        arena.alloc(|id| {
            let mut node = Node::new(id, NodeKind::FCall, Location::INVALID).with_ident(op);
            node.referent = Some(decl);
            node.params = vec![left, right];
            node
        })
    }

    fn unary_call(arena: &mut Arena, op: &str, operand: NodeId) -> NodeId {
        let decl = builtin_decl(arena, op);
        arena.alloc(|id| {
            let mut node = Node::new(id, NodeKind::FCall, Location::INVALID).with_ident(op);
            node.referent = Some(decl);
            node.params = vec![operand];
            node
        })
    }

    #[test]
    fn one_plus_two_times_three_folds_to_seven() {
        let mut arena = Arena::new();
        let one = int_lit(&mut arena, 1);
        let two = int_lit(&mut arena, 2);
        let three = int_lit(&mut arena, 3);
        let mul = binary_call(&mut arena, "mul", two, three);
        let add = binary_call(&mut arena, "add", one, mul);

        let result = eval(&mut arena, add).unwrap();
        assert_eq!(get_int_lit(&arena, result), Some(7));
    }

    #[test]
    fn not_true_folds_to_the_ordinal_zero_boolean() {
        let mut arena = Arena::new();
        let t = make_bool_ref(&mut arena, true, Location::INVALID);
        let not_call = unary_call(&mut arena, "not", t);

        let result = eval(&mut arena, not_call).unwrap();
        assert_eq!(get_bool_lit(&arena, result), Some(false));
    }

    #[test]
    fn user_function_with_a_while_loop_folds_to_the_final_variable_value() {
        // function f(x: integer) return integer is
        //   variable y: integer := x;
        // begin
        //   while y < 10 loop y := y + 1; end loop;
        //   return y;
        // end;
        let mut arena = Arena::new();

        let x_formal = arena.alloc(|id| Node::new(id, NodeKind::VariableDecl, Location::INVALID).with_ident("x"));
        let x_ref = arena.alloc(|id| Node::new(id, NodeKind::Ref, Location::INVALID).with_ident("x"));
        let y_decl = arena.alloc(|id| {
            let mut node = Node::new(id, NodeKind::VariableDecl, Location::INVALID).with_ident("y");
            node.value = Some(x_ref);
            node
        });

        let y_ref_cond = arena.alloc(|id| Node::new(id, NodeKind::Ref, Location::INVALID).with_ident("y"));
        let ten = int_lit(&mut arena, 10);
        let cond = binary_call(&mut arena, "lt", y_ref_cond, ten);

        let y_ref_rhs = arena.alloc(|id| Node::new(id, NodeKind::Ref, Location::INVALID).with_ident("y"));
        let one = int_lit(&mut arena, 1);
        let incremented = binary_call(&mut arena, "add", y_ref_rhs, one);
        let y_target = arena.alloc(|id| Node::new(id, NodeKind::Ref, Location::INVALID).with_ident("y"));
        let assign = arena.alloc(|id| {
            let mut node = Node::new(id, NodeKind::VarAssign, Location::INVALID);
            node.target = Some(y_target);
            node.value = Some(incremented);
            node
        });
        let while_loop = arena.alloc(|id| {
            let mut node = Node::new(id, NodeKind::While, Location::INVALID);
            node.value = Some(cond);
            node.stmts = vec![assign];
            node
        });

        let y_ref_return = arena.alloc(|id| Node::new(id, NodeKind::Ref, Location::INVALID).with_ident("y"));
        let return_stmt = arena.alloc(|id| {
            let mut node = Node::new(id, NodeKind::Return, Location::INVALID);
            node.value = Some(y_ref_return);
            node
        });

        let body = arena.alloc(|id| {
            let mut node = Node::new(id, NodeKind::FuncBody, Location::INVALID).with_ident("f");
            node.params = vec![x_formal];
            node.decls = vec![y_decl];
            node.stmts = vec![while_loop, return_stmt];
            node
        });

        let arg = int_lit(&mut arena, 3);
        let call = arena.alloc(|id| {
            let mut node = Node::new(id, NodeKind::FCall, Location::INVALID).with_ident("f");
            node.referent = Some(body);
            node.params = vec![arg];
            node
        });

        let result = eval(&mut arena, call).unwrap();
        assert_eq!(get_int_lit(&arena, result), Some(10));
    }

    #[test]
    fn user_function_call_with_a_non_literal_argument_is_left_unfolded() {
        let mut arena = Arena::new();
        let x_formal = arena.alloc(|id| Node::new(id, NodeKind::VariableDecl, Location::INVALID).with_ident("x"));
        let x_ref = arena.alloc(|id| Node::new(id, NodeKind::Ref, Location::INVALID).with_ident("x"));
        let return_stmt = arena.alloc(|id| {
            let mut node = Node::new(id, NodeKind::Return, Location::INVALID);
            node.value = Some(x_ref);
            node
        });
        let body = arena.alloc(|id| {
            let mut node = Node::new(id, NodeKind::FuncBody, Location::INVALID).with_ident("identity");
            node.params = vec![x_formal];
            node.stmts = vec![return_stmt];
            node
        });

        // An aggregate argument, not a raw literal, must not be folded even
        // though it is itself a constant (§9's preserved open question).
        let agg = arena.alloc(|id| Node::new(id, NodeKind::Aggregate, Location::INVALID));
        let call = arena.alloc(|id| {
            let mut node = Node::new(id, NodeKind::FCall, Location::INVALID).with_ident("identity");
            node.referent = Some(body);
            node.params = vec![agg];
            node
        });

        let result = eval(&mut arena, call).unwrap();
        assert_eq!(result, call, "non-literal argument must leave the call node unchanged");
    }

    #[test]
    fn unbound_reference_is_fatal() {
        let mut arena = Arena::new();
        let unbound = arena.alloc(|id| Node::new(id, NodeKind::Ref, Location::INVALID).with_ident("nowhere"));
        let decl = builtin_decl(&mut arena, "identity");
        let call = arena.alloc(|id| {
            let mut node = Node::new(id, NodeKind::FCall, Location::INVALID).with_ident("identity");
            node.referent = Some(decl);
            node.params = vec![unbound];
            node
        });

        assert!(eval(&mut arena, call).is_err());
    }

    #[test]
    fn unresolved_call_with_no_referent_is_returned_unchanged() {
        let mut arena = Arena::new();
        let one = int_lit(&mut arena, 1);
        let call = arena.alloc(|id| {
            let mut node = Node::new(id, NodeKind::FCall, Location::INVALID).with_ident("+");
            node.params = vec![one];
            node
        });
        let result = eval(&mut arena, call).unwrap();
        assert_eq!(result, call);
    }

    #[test]
    fn boolean_type_name_constant_matches_the_canonical_spelling() {
        assert_eq!(BOOLEAN_TYPE_NAME, "STD.STANDARD.BOOLEAN");
    }
}
