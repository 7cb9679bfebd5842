//! Dynamically typed host values, objects, and callables.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use super::{ByteView, Deferred};
use crate::error::HostFault;

/// Outcome of invoking a host callable. `Err` is the analog of a host-side
/// exception.
pub type CallResult = Result<Value, HostFault>;

/// A dynamically typed host value.
///
/// `Null` doubles as the end-of-stream sentinel in both bridge directions.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Int(i64),
    Bytes(ByteView),
    Promise(Deferred),
    Object(Object),
    Func(HostFn),
}

impl Value {
    /// Wrap a closure as a callable host member.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> CallResult + Send + Sync + 'static,
    {
        Value::Func(HostFn(Arc::new(f)))
    }

    /// Short type name, used in fault messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Bytes(_) => "bytes",
            Value::Promise(_) => "promise",
            Value::Object(_) => "object",
            Value::Func(_) => "function",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Bytes(view) => write!(f, "Bytes({} bytes)", view.len()),
            Value::Promise(d) => write!(f, "Promise({d:?})"),
            Value::Object(obj) => write!(f, "{obj:?}"),
            Value::Func(_) => f.write_str("Func"),
        }
    }
}

/// A callable host member.
#[derive(Clone)]
pub struct HostFn(Arc<dyn Fn(&[Value]) -> CallResult + Send + Sync>);

impl HostFn {
    /// Invoke the callable with the given arguments.
    pub fn invoke(&self, args: &[Value]) -> CallResult {
        (self.0)(args)
    }
}

impl fmt::Debug for HostFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HostFn")
    }
}

/// A host object: a shared bag of named members.
///
/// Cloning an `Object` clones the reference, not the members, so adapters
/// constructed from clones of one handle observe the same state — including
/// any cursor state the host keeps behind the handle.
#[derive(Clone, Default)]
pub struct Object {
    members: Arc<Mutex<HashMap<String, Value>>>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a member; absent members read as `Undefined`.
    pub fn get(&self, name: &str) -> Value {
        self.members
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or(Value::Undefined)
    }

    /// Install or replace a member.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.members.lock().unwrap().insert(name.into(), value);
    }

    /// Remove a member, returning the previous value if any.
    pub fn remove(&self, name: &str) -> Option<Value> {
        self.members.lock().unwrap().remove(name)
    }

    /// Invoke the named member as a function.
    pub fn call(&self, name: &str, args: &[Value]) -> CallResult {
        match self.get(name) {
            Value::Func(f) => f.invoke(args),
            _ => Err(HostFault::NotCallable {
                member: name.to_string(),
            }),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.members.lock().unwrap().keys().cloned().collect();
        names.sort();
        write!(f, "Object{{{}}}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_member_reads_as_undefined() {
        let obj = Object::new();
        assert!(matches!(obj.get("read"), Value::Undefined));
    }

    #[test]
    fn call_dispatches_to_member() {
        let obj = Object::new();
        obj.set("answer", Value::func(|_| Ok(Value::Int(42))));
        match obj.call("answer", &[]) {
            Ok(Value::Int(42)) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn calling_a_non_function_member_faults() {
        let obj = Object::new();
        obj.set("data", Value::Int(7));
        let err = obj.call("data", &[]).unwrap_err();
        assert!(err.to_string().contains("not callable"));
    }

    #[test]
    fn clones_share_members() {
        let obj = Object::new();
        let alias = obj.clone();
        obj.set("n", Value::Int(1));
        assert!(matches!(alias.get("n"), Value::Int(1)));
        alias.remove("n");
        assert!(matches!(obj.get("n"), Value::Undefined));
    }
}
