//! Runtime values and their explanations.
//!
//! A [`Value`] is a [`ValueKind`] plus an optional [`Explanation`]: text that
//! says what the value means or how it was derived. Operators build the
//! explanation of their result out of the explanations of their operands, so
//! `3 + 4` is explained as "the sum of the number 3 and the number 4".
//!
//! Explanations are immutable. Attaching one produces a new `Value` via
//! [`Value::explained`]; the original and every other holder keep theirs.
//! Lists are the one exception to replace-only semantics: a `List` is a shared
//! handle, so appends and index writes are seen by every holder. A list may
//! therefore contain itself; printing and comparing stop at the first
//! re-entered list (see [`ListVisit`]).

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use expl_ir::{FnDef, Literal, Name};
use rustc_hash::FxHashSet;

use crate::environment::Environment;
use crate::prelude::Primitive;

/// Human-readable text attached to a value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Explanation(Rc<str>);

impl Explanation {
    pub fn new(text: impl Into<Rc<str>>) -> Self {
        Explanation(text.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Explanation {
    fn from(text: &str) -> Self {
        Explanation::new(text)
    }
}

impl From<String> for Explanation {
    fn from(text: String) -> Self {
        Explanation::new(text)
    }
}

impl fmt::Debug for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared, mutable list storage.
#[derive(Clone, Default)]
pub struct ListValue(Rc<RefCell<Vec<Value>>>);

impl ListValue {
    pub fn new(items: Vec<Value>) -> Self {
        ListValue(Rc::new(RefCell::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    /// Overwrite an existing slot. Returns `false` when `index` is out of range.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.0.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Snapshot of the current items.
    pub fn items(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Whether two handles share the same storage.
    pub fn ptr_eq(&self, other: &ListValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Two lists are equal when they hold equal items. A pair already being
/// compared further up counts as equal, so cyclic lists compare in finite time.
impl PartialEq for ListValue {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match ListVisit::enter(Walk::Compare, self, Some(other)) {
            Some(_visit) => *self.0.borrow() == *other.0.borrow(),
            None => true,
        }
    }
}

impl fmt::Debug for ListValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(_visit) = ListVisit::enter(Walk::Debug, self, None) else {
            return f.write_str("[...]");
        };
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}

/// Which traversal a [`ListVisit`] belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Walk {
    Display,
    Debug,
    Compare,
}

type VisitKey = (Walk, usize, usize);

thread_local! {
    /// Lists (or list pairs) whose traversal is in progress on this thread.
    static OPEN_LISTS: RefCell<FxHashSet<VisitKey>> = RefCell::new(FxHashSet::default());
}

/// Marks a list as being traversed until dropped.
struct ListVisit {
    key: VisitKey,
}

impl ListVisit {
    /// `None` when the same traversal already entered this list (or pair).
    fn enter(walk: Walk, list: &ListValue, other: Option<&ListValue>) -> Option<ListVisit> {
        let addr = |l: &ListValue| Rc::as_ptr(&l.0) as usize;
        let key = (walk, addr(list), other.map_or(0, addr));
        OPEN_LISTS
            .with(|open| open.borrow_mut().insert(key))
            .then(|| ListVisit { key })
    }
}

impl Drop for ListVisit {
    fn drop(&mut self) {
        OPEN_LISTS.with(|open| {
            open.borrow_mut().remove(&self.key);
        });
    }
}

/// A function body paired with the frame it was created in.
///
/// The frame is held by shared reference, so the closure sees later updates
/// to bindings in that frame and keeps the frame alive after its block exits.
pub struct Closure {
    pub env: Environment,
    pub def: Rc<FnDef>,
}

impl Closure {
    pub fn params(&self) -> &[Name] {
        &self.def.params
    }

    fn signature(&self) -> String {
        let params: Vec<&str> = self.def.params.iter().map(Name::as_str).collect();
        params.join(", ")
    }
}

impl fmt::Debug for Closure {
    // The captured frame may hold this closure; printing it would not terminate.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Closure({})", self.signature())
    }
}

/// Value variants.
#[derive(Clone, Debug)]
pub enum ValueKind {
    Number(f64),
    Str(Rc<str>),
    Bool(bool),
    Unit,
    List(ListValue),
    /// An explanation held as a first-class value.
    Comment(Explanation),
    Closure(Rc<Closure>),
    Primitive(&'static Primitive),
}

impl PartialEq for ValueKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Unit, Self::Unit) => true,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Comment(a), Self::Comment(b)) => a == b,
            (Self::Closure(a), Self::Closure(b)) => Rc::ptr_eq(a, b),
            (Self::Primitive(a), Self::Primitive(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl ValueKind {
    /// Kind name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "Number",
            Self::Str(_) => "String",
            Self::Bool(_) => "Bool",
            Self::Unit => "Unit",
            Self::List(_) => "List",
            Self::Comment(_) => "Comment",
            Self::Closure(_) => "Closure",
            Self::Primitive(_) => "Primitive",
        }
    }
}

/// A runtime value with its optional explanation.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    kind: ValueKind,
    explanation: Option<Explanation>,
}

impl Value {
    /// A value with no explanation.
    pub fn new(kind: ValueKind) -> Self {
        Value {
            kind,
            explanation: None,
        }
    }

    pub fn with_explanation(kind: ValueKind, explanation: impl Into<Explanation>) -> Self {
        Value {
            kind,
            explanation: Some(explanation.into()),
        }
    }

    /// `Number` explained as "the number {v}".
    pub fn number(n: f64) -> Self {
        Self::with_explanation(ValueKind::Number(n), format!("the number {}", format_number(n)))
    }

    /// `String` explained as `the string "{s}"`.
    pub fn string(s: &str) -> Self {
        Self::with_explanation(ValueKind::Str(Rc::from(s)), format!("the string \"{s}\""))
    }

    /// `Bool` explained as `the boolean "{b}"`.
    pub fn boolean(b: bool) -> Self {
        Self::with_explanation(ValueKind::Bool(b), format!("the boolean \"{b}\""))
    }

    pub fn unit() -> Self {
        Self::new(ValueKind::Unit)
    }

    /// A `Comment` value holding `text`. The comment itself is unexplained.
    pub fn comment(text: impl Into<Explanation>) -> Self {
        Self::new(ValueKind::Comment(text.into()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Self::new(ValueKind::List(ListValue::new(items)))
    }

    pub fn closure(closure: Closure) -> Self {
        Self::new(ValueKind::Closure(Rc::new(closure)))
    }

    /// A builtin, explained as "the builtin {name} function".
    pub fn primitive(primitive: &'static Primitive) -> Self {
        Self::with_explanation(
            ValueKind::Primitive(primitive),
            format!("the builtin {} function", primitive.name),
        )
    }

    /// Convert a parsed literal, attaching the default explanation.
    pub fn from_literal(literal: &Literal) -> Self {
        match literal {
            Literal::Number(n) => Self::number(*n),
            Literal::Str(s) => Self::string(s),
            Literal::Bool(b) => Self::boolean(*b),
            Literal::Unit => Self::unit(),
            Literal::Comment(text) => Self::comment(text.as_str()),
        }
    }

    #[inline]
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    #[inline]
    pub fn explanation(&self) -> Option<&Explanation> {
        self.explanation.as_ref()
    }

    /// A copy of this value carrying `explanation` instead of its current one.
    #[must_use]
    pub fn explained(&self, explanation: impl Into<Explanation>) -> Value {
        Value {
            kind: self.kind.clone(),
            explanation: Some(explanation.into()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.kind, ValueKind::Closure(_) | ValueKind::Primitive(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ValueKind::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.kind {
            ValueKind::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListValue> {
        match &self.kind {
            ValueKind::List(list) => Some(list),
            _ => None,
        }
    }

    /// The text embedded when this value is an operand.
    ///
    /// The attached explanation when there is one, otherwise a description
    /// derived from the value itself.
    pub fn describe(&self) -> Cow<'_, str> {
        if let Some(explanation) = &self.explanation {
            return Cow::Borrowed(explanation.as_str());
        }
        Cow::Owned(match &self.kind {
            ValueKind::Number(n) => format!("the number {}", format_number(*n)),
            ValueKind::Str(s) => format!("the string \"{s}\""),
            ValueKind::Bool(b) => format!("the boolean \"{b}\""),
            ValueKind::Unit => "unit".to_string(),
            ValueKind::List(list) => match list.len() {
                1 => "a list of 1 item".to_string(),
                n => format!("a list of {n} items"),
            },
            ValueKind::Comment(_) => "a comment".to_string(),
            ValueKind::Closure(closure) => format!("a function of ({})", closure.signature()),
            ValueKind::Primitive(p) => format!("the builtin {} function", p.name),
        })
    }
}

/// Textual form, as printed by `print` and produced by `str`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::Number(n) => f.write_str(&format_number(*n)),
            ValueKind::Str(s) => f.write_str(s),
            ValueKind::Bool(b) => write!(f, "{b}"),
            ValueKind::Unit => f.write_str("()"),
            ValueKind::List(list) => {
                let Some(_visit) = ListVisit::enter(Walk::Display, list, None) else {
                    return f.write_str("[...]");
                };
                f.write_str("[")?;
                for (i, item) in list.items().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match item.kind() {
                        ValueKind::Str(s) => write!(f, "{s:?}")?,
                        _ => write!(f, "{item}")?,
                    }
                }
                f.write_str("]")
            }
            ValueKind::Comment(text) => write!(f, "{text}"),
            ValueKind::Closure(closure) => write!(f, "<fn({})>", closure.signature()),
            ValueKind::Primitive(p) => write!(f, "<builtin {}>", p.name),
        }
    }
}

/// Shortest round-tripping form: `3`, `3.5`, `-0.25`.
pub fn format_number(n: f64) -> String {
    n.to_string()
}

#[cfg(test)]
mod tests;
