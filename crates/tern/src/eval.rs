//! The tree evaluator.
//!
//! A single-threaded cooperative walk over the executable tree. Operands
//! evaluate left to right, the left one completing before the right begins;
//! the short-circuit forms (`|`, `&`, `?`, `;`) skip their right operand
//! when the left decides the result. The only await points are host
//! callable invocations, so dropping the future cleanly abandons an
//! evaluation with no further scope mutation.

use std::{cell::Cell, rc::Rc};

use async_recursion::async_recursion;

use crate::{
    context::Scope,
    error::{Error, ErrorKind, RunResult},
    expressions::{BinaryOp, Expr, Node},
    function::{DefinedFunction, FunctionValue},
    ops,
    resource::Limits,
    tokenize::Pos,
    tracer::EvalTracer,
    value::Value,
};

pub(crate) struct Interp<'t> {
    tracer: &'t dyn EvalTracer,
    limits: Limits,
    depth: Cell<usize>,
}

impl<'t> Interp<'t> {
    pub fn new(limits: Limits, tracer: &'t dyn EvalTracer) -> Self {
        Self {
            tracer,
            limits,
            depth: Cell::new(0),
        }
    }

    #[async_recursion(?Send)]
    pub async fn eval(&self, node: &Node, scope: &Scope) -> RunResult<Value> {
        match &node.expr {
            Expr::Number(n) => Ok(Value::number(*n)),
            Expr::String { value, .. } => Ok(Value::string(value.as_str())),
            Expr::Name(name) => {
                let found = scope.lookup(name);
                self.tracer.on_lookup(name, found.is_some());
                // an unresolved identifier is Nothing, not an error
                Ok(found.unwrap_or(Value::Nothing))
            }
            Expr::Nothing => Ok(Value::Nothing),
            Expr::List(inner) => {
                let items = match inner {
                    Some(expr) => self.eval(expr, scope).await?.into_items(),
                    None => Vec::new(),
                };
                Ok(Value::list(items))
            }
            Expr::NamespaceBlock(inner) => {
                let block = scope.child();
                if let Some(expr) = inner {
                    // evaluated for its effect on the block frame only
                    self.eval(expr, &block).await?;
                }
                Ok(Value::namespace(block.own_namespace()))
            }
            Expr::Binary { op, lhs, rhs } => self.eval_binary(node.pos, *op, lhs, rhs, scope).await,
        }
    }

    async fn eval_binary(&self, pos: Pos, op: BinaryOp, lhs: &Rc<Node>, rhs: &Rc<Node>, scope: &Scope) -> RunResult<Value> {
        match op {
            BinaryOp::Pair => {
                let left = self.eval(lhs, scope).await?;
                let right = self.eval(rhs, scope).await?;
                Ok(Value::tuple([left, right]))
            }
            BinaryOp::Label => {
                let names = collect_names(lhs, ":")?;
                let values = self.eval(rhs, scope).await?;
                bind(&names, &values, scope);
                Ok(values)
            }
            BinaryOp::Set => {
                let names = collect_names(lhs, "=")?;
                let values = self.eval(rhs, scope).await?;
                bind(&names, &values, scope);
                Ok(Value::Nothing)
            }
            BinaryOp::Def => {
                let params = collect_names(lhs, "->")?;
                Ok(Value::function(FunctionValue::Defined(DefinedFunction {
                    params,
                    body: Rc::clone(rhs),
                    scope: scope.clone(),
                })))
            }
            BinaryOp::Else => {
                let left = self.eval(lhs, scope).await?;
                if left.is_nothing() {
                    self.eval(rhs, scope).await
                } else {
                    Ok(left)
                }
            }
            BinaryOp::If => {
                let left = self.eval(lhs, scope).await?;
                if left.truth() {
                    self.eval(rhs, scope).await
                } else {
                    Ok(Value::Nothing)
                }
            }
            BinaryOp::Or => {
                let left = self.eval(lhs, scope).await?;
                if left.truth() {
                    Ok(left)
                } else {
                    self.eval(rhs, scope).await
                }
            }
            BinaryOp::And => {
                let left = self.eval(lhs, scope).await?;
                if left.truth() {
                    self.eval(rhs, scope).await
                } else {
                    Ok(left)
                }
            }
            BinaryOp::Eq => {
                let left = self.eval(lhs, scope).await?;
                let right = self.eval(rhs, scope).await?;
                Ok(Value::Boolean(left == right))
            }
            BinaryOp::Ne => {
                let left = self.eval(lhs, scope).await?;
                let right = self.eval(rhs, scope).await?;
                Ok(Value::Boolean(left != right))
            }
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
                let left = self.eval(lhs, scope).await?;
                let right = self.eval(rhs, scope).await?;
                let ordering = ops::compare(&left, &right).map_err(|e| e.with_pos(pos))?;
                let result = match op {
                    BinaryOp::Lt => ordering.is_lt(),
                    BinaryOp::Le => ordering.is_le(),
                    BinaryOp::Gt => ordering.is_gt(),
                    _ => ordering.is_ge(),
                };
                Ok(Value::Boolean(result))
            }
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod | BinaryOp::Pow => {
                let left = self.eval(lhs, scope).await?;
                let right = self.eval(rhs, scope).await?;
                ops::arithmetic(op, left, right).map_err(|e| e.with_pos(pos))
            }
            BinaryOp::Dot => {
                let left = self.eval(lhs, scope).await?;
                let namespaces = left.into_items();
                if namespaces.is_empty() {
                    return Err(Error::dot().with_pos(pos));
                }
                let mut results = Vec::with_capacity(namespaces.len());
                for item in namespaces {
                    let Value::Namespace(ns) = item else {
                        return Err(Error::dot().with_pos(pos));
                    };
                    let child = scope.child();
                    child.insert_entries(&ns);
                    results.push(self.eval(rhs, &child).await?);
                }
                Ok(Value::tuple(results))
            }
            BinaryOp::Apply => {
                let target = self.eval(lhs, scope).await?;
                let argument = self.eval(rhs, scope).await?;
                self.apply(target, argument, pos).await
            }
        }
    }

    /// Application `X Y`, dispatched on the kind of `X`.
    #[async_recursion(?Send)]
    async fn apply(&self, target: Value, argument: Value, pos: Pos) -> RunResult<Value> {
        match target {
            Value::Function(f) => self.call_function(&f, argument.into_items(), pos).await,
            Value::String(s) => {
                let result = match &argument {
                    Value::Number(n) => index_of(*n, s.chars().count())
                        .and_then(|i| s.chars().nth(i))
                        .map(|c| c.to_string())
                        .unwrap_or_default(),
                    _ => String::new(),
                };
                Ok(Value::string(result))
            }
            Value::List(items) => {
                let result = match &argument {
                    Value::Number(n) => index_of(*n, items.len())
                        .and_then(|i| items.get(i).cloned())
                        .unwrap_or(Value::Nothing),
                    _ => Value::Nothing,
                };
                Ok(result)
            }
            Value::Namespace(ns) => {
                if let Some(hook) = ns.apply_hook() {
                    return self.call_function(&hook, argument.into_items(), pos).await;
                }
                match &argument {
                    Value::String(key) => Ok(ns.get(key).cloned().unwrap_or(Value::Nothing)),
                    _ => Ok(Value::Nothing),
                }
            }
            Value::Tuple(elements) => {
                let mut results = Vec::with_capacity(elements.len());
                for element in elements {
                    results.push(self.apply(element, argument.clone(), pos).await?);
                }
                Ok(Value::tuple(results))
            }
            other => Err(Error::operator_unary("Application", other.kind()).with_pos(pos)),
        }
    }

    /// Invokes a function value with the flat tuple of arguments.
    #[async_recursion(?Send)]
    pub(crate) async fn call_function(&self, f: &Rc<FunctionValue>, args: Vec<Value>, pos: Pos) -> RunResult<Value> {
        let depth = self.depth.get() + 1;
        self.limits.check_depth(depth).map_err(|e| e.with_pos(pos))?;
        self.depth.set(depth);
        self.tracer.on_call(&f.label(), depth);

        let result = match f.as_ref() {
            FunctionValue::Defined(def) => {
                let frame = def.scope.child();
                bind(&def.params, &Value::tuple(args), &frame);
                self.eval(&def.body, &frame).await
            }
            FunctionValue::Builtin(builtin) => builtin.call(Value::tuple(args)).map_err(|e| e.with_pos(pos)),
            FunctionValue::Host(host) => {
                self.tracer.on_host_call(&host.name);
                (host.call)(args).await
            }
            FunctionValue::Mapped(inner) => self.map_elements(inner, args, pos).await,
        };

        self.depth.set(self.depth.get() - 1);
        self.tracer.on_return(self.depth.get());
        result
    }

    /// Elementwise application behind a function produced by `map`.
    async fn map_elements(&self, inner: &Value, args: Vec<Value>, pos: Pos) -> RunResult<Value> {
        let Value::Function(f) = inner else {
            // the map built-in only wraps functions
            return Err(Error::builtin("map", inner.kind()).with_pos(pos));
        };
        let mut results = Vec::with_capacity(args.len());
        for arg in args {
            results.push(self.call_function(f, vec![arg], pos).await?);
        }
        Ok(Value::tuple(results))
    }
}

/// Resolves a (possibly fractional, possibly negative) index against a
/// container of `len` elements. Negative indices count from the end;
/// anything out of range is `None`.
fn index_of(n: f64, len: usize) -> Option<usize> {
    if !n.is_finite() {
        return None;
    }
    let mut index = n.floor();
    if index < 0.0 {
        index += len as f64;
    }
    if index >= 0.0 && index < len as f64 {
        Some(index as usize)
    } else {
        None
    }
}

/// Collects the identifier tuple on the left of `:`, `=` or `->`.
///
/// The left side is read in a restricted mode: identifiers stand for their
/// own name symbol, pairing and parentheses are honored, and any other
/// construct is an error.
fn collect_names(node: &Node, op_text: &str) -> RunResult<Vec<String>> {
    let mut names = Vec::new();
    collect_names_into(node, op_text, &mut names)?;
    Ok(names)
}

fn collect_names_into(node: &Node, op_text: &str, out: &mut Vec<String>) -> RunResult<()> {
    match &node.expr {
        Expr::Name(name) => {
            out.push(name.clone());
            Ok(())
        }
        Expr::Binary {
            op: BinaryOp::Pair,
            lhs,
            rhs,
        } => {
            collect_names_into(lhs, op_text, out)?;
            collect_names_into(rhs, op_text, out)
        }
        _ => Err(Error::new(
            ErrorKind::Operator,
            format!("valid name(s) expected on the left of '{op_text}'"),
        )
        .with_pos(node.pos)),
    }
}

/// Binds `names` against the items of `values` in `scope`:
/// missing trailing values bind as `Nothing`, and when values outnumber
/// names the last name takes the tuple of all remaining values.
fn bind(names: &[String], values: &Value, scope: &Scope) {
    let items = values.items();
    let count = names.len();
    for (i, name) in names.iter().enumerate() {
        let value = if i + 1 == count && items.len() > count {
            Value::tuple(items[i..].iter().cloned())
        } else {
            items.get(i).cloned().unwrap_or(Value::Nothing)
        };
        scope.set(name.clone(), value);
    }
}
