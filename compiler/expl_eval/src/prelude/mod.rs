//! Builtin functions bound in the root frame.
//!
//! Each builtin is a [`Primitive`]: a name, an optional fixed arity and a
//! plain function pointer. They are stored in a static table so a
//! `ValueKind::Primitive` is just a `&'static` reference into it.
//!
//! Builtins that exist for their side effect (`print`, `append`, `put`)
//! return `Unit`.

use std::fmt;
use std::rc::Rc;

use expl_ir::Name;

use crate::environment::Environment;
use crate::errors::{index_out_of_bounds, invalid_number, wrong_arg_type, EvalError, EvalResult};
use crate::print_handler::{InputHandlerImpl, PrintHandlerImpl};
use crate::value::{Explanation, ListValue, Value, ValueKind};

/// Host resources a builtin may use.
pub struct PrimitiveContext<'a> {
    pub print: &'a PrintHandlerImpl,
    pub input: &'a InputHandlerImpl,
}

pub type PrimitiveFn = fn(&PrimitiveContext<'_>, &[Value]) -> EvalResult;

pub struct Primitive {
    pub name: &'static str,
    /// `None` for variadic builtins.
    pub arity: Option<usize>,
    pub func: PrimitiveFn,
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Primitive({})", self.name)
    }
}

static PRIMITIVES: [Primitive; 10] = [
    Primitive {
        name: "print",
        arity: None,
        func: print,
    },
    Primitive {
        name: "input",
        arity: Some(0),
        func: input,
    },
    Primitive {
        name: "str",
        arity: Some(1),
        func: to_str,
    },
    Primitive {
        name: "comment",
        arity: Some(1),
        func: to_comment,
    },
    Primitive {
        name: "num",
        arity: Some(1),
        func: to_num,
    },
    Primitive {
        name: "list",
        arity: None,
        func: list,
    },
    Primitive {
        name: "append",
        arity: Some(2),
        func: append,
    },
    Primitive {
        name: "get",
        arity: Some(2),
        func: get,
    },
    Primitive {
        name: "put",
        arity: Some(3),
        func: put,
    },
    Primitive {
        name: "len",
        arity: Some(1),
        func: len,
    },
];

/// A fresh root frame holding every builtin.
pub fn prelude() -> Environment {
    let env = Environment::new();
    for primitive in &PRIMITIVES {
        env.put(Name::from(primitive.name), Value::primitive(primitive));
    }
    env
}

#[cfg(test)]
pub(crate) fn lookup_primitive(name: &str) -> Option<&'static Primitive> {
    PRIMITIVES.iter().find(|p| p.name == name)
}

fn print(ctx: &PrimitiveContext<'_>, args: &[Value]) -> EvalResult {
    let line = match args {
        [single] => match single.explanation() {
            Some(explanation) => format!("{single} /* {explanation} */"),
            None => single.to_string(),
        },
        _ => args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "),
    };
    ctx.print.write_line(&line);
    Ok(Value::unit())
}

fn input(ctx: &PrimitiveContext<'_>, _args: &[Value]) -> EvalResult {
    // End of input reads as an empty line.
    let line = ctx.input.read_line().unwrap_or_default();
    Ok(Value::with_explanation(
        ValueKind::Str(Rc::from(line)),
        "the user input",
    ))
}

fn to_str(_ctx: &PrimitiveContext<'_>, args: &[Value]) -> EvalResult {
    let [value] = args else { return Ok(Value::unit()) };
    Ok(Value::with_explanation(
        ValueKind::Str(Rc::from(value.to_string())),
        format!("the text of {}", value.describe()),
    ))
}

fn to_comment(_ctx: &PrimitiveContext<'_>, args: &[Value]) -> EvalResult {
    let [value] = args else { return Ok(Value::unit()) };
    Ok(Value::comment(Explanation::from(value.to_string())))
}

fn to_num(_ctx: &PrimitiveContext<'_>, args: &[Value]) -> EvalResult {
    let [value] = args else { return Ok(Value::unit()) };
    let n = match value.kind() {
        ValueKind::Number(n) => *n,
        ValueKind::Str(s) => s.trim().parse::<f64>().map_err(|_| invalid_number(s))?,
        ValueKind::Bool(b) => f64::from(u8::from(*b)),
        other => {
            return Err(wrong_arg_type(
                "num",
                "a Number, String or Bool",
                other.type_name(),
            ))
        }
    };
    Ok(Value::with_explanation(
        ValueKind::Number(n),
        format!("the numeric value of {}", value.describe()),
    ))
}

fn list(_ctx: &PrimitiveContext<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::list(args.to_vec()))
}

fn expect_list<'v>(function: &'static str, value: &'v Value) -> Result<&'v ListValue, EvalError> {
    value
        .as_list()
        .ok_or_else(|| wrong_arg_type(function, "a List", value.type_name()))
}

fn expect_index(function: &'static str, value: &Value) -> Result<f64, EvalError> {
    value
        .as_number()
        .ok_or_else(|| wrong_arg_type(function, "a Number index", value.type_name()))
}

/// A slot position, if `n` is a non-negative whole number.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn as_position(n: f64) -> Option<usize> {
    (n >= 0.0 && n.fract() == 0.0 && n < usize::MAX as f64).then(|| n as usize)
}

fn append(_ctx: &PrimitiveContext<'_>, args: &[Value]) -> EvalResult {
    let [list, item] = args else { return Ok(Value::unit()) };
    expect_list("append", list)?.push(item.clone());
    Ok(Value::unit())
}

fn get(_ctx: &PrimitiveContext<'_>, args: &[Value]) -> EvalResult {
    let [list, index] = args else { return Ok(Value::unit()) };
    let items = expect_list("get", list)?;
    let index = expect_index("get", index)?;
    Ok(as_position(index)
        .and_then(|i| items.get(i))
        .unwrap_or_else(Value::unit))
}

fn put(_ctx: &PrimitiveContext<'_>, args: &[Value]) -> EvalResult {
    let [list, index, item] = args else { return Ok(Value::unit()) };
    let items = expect_list("put", list)?;
    let n = expect_index("put", index)?;
    match as_position(n) {
        Some(i) if items.set(i, item.clone()) => Ok(Value::unit()),
        _ => Err(index_out_of_bounds(n, items.len())),
    }
}

fn len(_ctx: &PrimitiveContext<'_>, args: &[Value]) -> EvalResult {
    let [list] = args else { return Ok(Value::unit()) };
    let items = expect_list("len", list)?;
    #[allow(clippy::cast_precision_loss)]
    let n = items.len() as f64;
    Ok(Value::with_explanation(
        ValueKind::Number(n),
        format!("the length of {}", list.describe()),
    ))
}
