// Core types for the tool system
//
// Argument schema (kinds, values, specs), the argument mapping passed to
// tools, and the execution context handed to every `execute` call.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ToolsConfig;
use crate::errors::LaunchError;

/// Closed set of argument types a tool may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    String,
    Int,
    Bool,
    List,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgKind::String => "string",
            ArgKind::Int => "int",
            ArgKind::Bool => "bool",
            ArgKind::List => "list",
        };
        write!(f, "{}", name)
    }
}

/// A typed argument value. No implicit coercion anywhere: an `Int(1)` never
/// satisfies a bool spec and vice versa.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<String>),
}

impl ArgValue {
    pub fn kind(&self) -> ArgKind {
        match self {
            ArgValue::Str(_) => ArgKind::String,
            ArgValue::Int(_) => ArgKind::Int,
            ArgValue::Bool(_) => ArgKind::Bool,
            ArgValue::List(_) => ArgKind::List,
        }
    }

    /// Convert a JSON value to an argument value, exact-typed.
    ///
    /// Integral numbers become `Int`, strings `Str`, booleans `Bool`, and
    /// arrays of strings `List`. Anything else (floats, objects, mixed
    /// arrays) is rejected so that validation can name the offending field.
    pub fn from_json(value: &Value) -> Option<ArgValue> {
        match value {
            Value::String(s) => Some(ArgValue::Str(s.clone())),
            Value::Number(n) => n.as_i64().map(ArgValue::Int),
            Value::Bool(b) => Some(ArgValue::Bool(*b)),
            Value::Array(items) => {
                let mut list = Vec::with_capacity(items.len());
                for item in items {
                    list.push(item.as_str()?.to_string());
                }
                Some(ArgValue::List(list))
            }
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Str(s) => write!(f, "{}", s),
            ArgValue::Int(i) => write!(f, "{}", i),
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

/// Declares one argument a tool accepts.
///
/// Constructed once per tool from static metadata and immutable afterwards.
/// A default of `Str("")` is a present value, distinct from no default at
/// all; the interactive prompt renders it as a "use config" marker.
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    pub name: String,
    pub description: String,
    pub kind: ArgKind,
    pub required: bool,
    pub default: Option<ArgValue>,
    pub choices: Vec<ArgValue>,
}

impl ArgumentSpec {
    fn new(name: &str, description: &str, kind: ArgKind) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            required: false,
            default: None,
            choices: Vec::new(),
        }
    }

    pub fn string(name: &str, description: &str) -> Self {
        Self::new(name, description, ArgKind::String)
    }

    pub fn int(name: &str, description: &str) -> Self {
        Self::new(name, description, ArgKind::Int)
    }

    pub fn bool(name: &str, description: &str) -> Self {
        Self::new(name, description, ArgKind::Bool)
    }

    pub fn list(name: &str, description: &str) -> Self {
        Self::new(name, description, ArgKind::List)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_str(mut self, value: &str) -> Self {
        self.default = Some(ArgValue::Str(value.to_string()));
        self
    }

    pub fn default_int(mut self, value: i64) -> Self {
        self.default = Some(ArgValue::Int(value));
        self
    }

    pub fn default_bool(mut self, value: bool) -> Self {
        self.default = Some(ArgValue::Bool(value));
        self
    }

    pub fn choices<'a, I>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.choices = choices
            .into_iter()
            .map(|c| ArgValue::Str(c.to_string()))
            .collect();
        self
    }

    /// Validate a candidate value against this spec.
    ///
    /// Checks run in order: requiredness, exact type, choice membership.
    /// A declared default never exempts a required argument; defaults are a
    /// prompting convenience only.
    pub fn validate(&self, value: Option<&ArgValue>) -> Result<(), String> {
        let value = match value {
            None if self.required => {
                return Err(format!("'{}' is required", self.name));
            }
            None => return Ok(()),
            Some(v) => v,
        };

        if value.kind() != self.kind {
            return Err(format!("'{}' must be of type {}", self.name, self.kind));
        }

        if !self.choices.is_empty() && !self.choices.contains(value) {
            let allowed: Vec<String> = self.choices.iter().map(|c| c.to_string()).collect();
            return Err(format!(
                "'{}' must be one of: {}",
                self.name,
                allowed.join(", ")
            ));
        }

        Ok(())
    }
}

/// Argument mapping passed to a tool's validation and execution.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    values: HashMap<String, ArgValue>,
}

impl ToolArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a parsed JSON object, rejecting values that do not map to
    /// an argument type (floats, nested objects, mixed arrays).
    pub fn from_json_map(map: &Map<String, Value>) -> Result<Self, LaunchError> {
        let mut args = Self::new();
        for (key, value) in map {
            match ArgValue::from_json(value) {
                Some(v) => {
                    args.values.insert(key.clone(), v);
                }
                None => {
                    return Err(LaunchError::InvalidArguments(format!(
                        "'{}' has an unsupported value type",
                        key
                    )));
                }
            }
        }
        Ok(args)
    }

    pub fn set(&mut self, name: &str, value: ArgValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn with(mut self, name: &str, value: ArgValue) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// String value, falling back to `default` when absent or empty.
    pub fn str_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        match self.str(name) {
            Some(s) if !s.is_empty() => s,
            _ => default,
        }
    }

    pub fn int_or(&self, name: &str, default: i64) -> i64 {
        match self.values.get(name) {
            Some(ArgValue::Int(i)) => *i,
            _ => default,
        }
    }

    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        match self.values.get(name) {
            Some(ArgValue::Bool(b)) => *b,
            _ => default,
        }
    }

    /// Boolean flag, absent means false.
    pub fn flag(&self, name: &str) -> bool {
        self.bool_or(name, false)
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.values.get(name) {
            Some(ArgValue::List(items)) => Some(items),
            _ => None,
        }
    }
}

/// Capability to run another tool by name. The registry implements this;
/// tests substitute stubs to keep composition testable in isolation.
pub trait ToolInvoker {
    /// Resolve `name` against the full (hidden-inclusive) registry and run
    /// it. Lookup failures and faults are reported and returned as a nonzero
    /// code, never propagated.
    fn invoke(&self, name: &str, args: &ToolArgs, ctx: &ToolContext) -> i32;
}

/// Context passed to tools during execution.
///
/// Carries the repository root and the invoker capability; there is no other
/// shared state between composed tools beyond the explicit argument mapping
/// each call constructs.
pub struct ToolContext<'a> {
    root_dir: PathBuf,
    invoker: &'a dyn ToolInvoker,
}

impl<'a> ToolContext<'a> {
    pub fn new(root_dir: impl Into<PathBuf>, invoker: &'a dyn ToolInvoker) -> Self {
        Self {
            root_dir: root_dir.into(),
            invoker,
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Run another tool by name with a fresh argument mapping.
    pub fn invoke(&self, name: &str, args: &ToolArgs) -> i32 {
        self.invoker.invoke(name, args, self)
    }

    /// This tool's section of the shared tools config file. Absent file or
    /// section yields an empty map, never an error.
    pub fn tool_config(&self, tool_name: &str) -> Map<String, Value> {
        ToolsConfig::new(&self.root_dir).section(tool_name)
    }
}
