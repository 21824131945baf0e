//! Tool trait: the abstraction over retrieval capabilities.
//!
//! Tools are what give the agent access to the graph: keyword, author,
//! institution, and topic search, statistics, and generated queries.
//! Each tool declares a typed parameter contract; binding the planner's
//! free-form arguments against that contract happens here.

use crate::error::ToolError;
use crate::observation::Observation;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Planner-provided arguments: parameter name to scalar value.
pub type ToolArgs = serde_json::Map<String, serde_json::Value>;

/// How arguments reach a tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInput {
    /// Named arguments, as decided by the planner.
    Named(ToolArgs),
    /// A single positional value, used by the executor's one retry.
    Positional(serde_json::Value),
}

impl ToolInput {
    /// The first supplied value, rendered as text (empty if none).
    pub fn first_value(&self) -> String {
        match self {
            ToolInput::Named(args) => args.values().next().map(scalar_text).unwrap_or_default(),
            ToolInput::Positional(value) => scalar_text(value),
        }
    }
}

/// The single parameter a tool accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: &'static str,
    /// Used when the argument is omitted; `None` makes it required.
    pub default: Option<&'static str>,
}

impl ParameterSpec {
    pub const fn required(name: &'static str) -> Self {
        Self { name, default: None }
    }

    pub const fn with_default(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            default: Some(default),
        }
    }
}

/// The core Tool trait.
///
/// Each retrieval capability implements this trait and is registered in the
/// [`ToolRegistry`]. The executor in `paperlens-tools` drives it.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "keyword_search").
    fn name(&self) -> &str;

    /// When to use this tool (sent to the LLM).
    fn description(&self) -> &str;

    /// A sample call shown next to the description, e.g. `topic_search("Deep Learning")`.
    fn example(&self) -> Option<&str> {
        None
    }

    /// The declared parameter, or `None` for argument-less tools.
    fn parameter(&self) -> Option<ParameterSpec>;

    /// Execute the tool. Implementations call [`bind_argument`] first.
    async fn execute(&self, input: ToolInput) -> Result<Observation, ToolError>;

    /// One catalog entry for the planner prompt.
    fn signature(&self) -> String {
        match self.parameter() {
            Some(p) => format!("{}({}: str)", self.name(), p.name),
            None => format!("{}()", self.name()),
        }
    }
}

/// Bind `input` to a tool's declared parameter.
///
/// Named arguments must use exactly the declared name; a missing argument
/// falls back to the declared default. A tool without a parameter rejects
/// every argument. Violations are `ToolError::InvalidArguments`.
pub fn bind_argument(
    tool_name: &str,
    spec: Option<ParameterSpec>,
    input: &ToolInput,
) -> Result<Option<String>, ToolError> {
    let mismatch = |reason: String| ToolError::InvalidArguments {
        tool_name: tool_name.to_string(),
        reason,
    };

    match (spec, input) {
        (None, ToolInput::Named(args)) if args.is_empty() => Ok(None),
        (None, ToolInput::Named(args)) => Err(mismatch(format!(
            "takes no arguments but got {}",
            args.keys().cloned().collect::<Vec<_>>().join(", ")
        ))),
        (None, ToolInput::Positional(_)) => {
            Err(mismatch("takes no arguments but got a positional value".into()))
        }
        (Some(spec), ToolInput::Named(args)) => {
            if let Some(unexpected) = args.keys().find(|k| k.as_str() != spec.name) {
                return Err(mismatch(format!("unexpected argument '{unexpected}'")));
            }
            match args.get(spec.name) {
                Some(value) => Ok(Some(scalar_text(value))),
                None => spec
                    .default
                    .map(|d| Some(d.to_string()))
                    .ok_or_else(|| mismatch(format!("missing argument '{}'", spec.name))),
            }
        }
        (Some(_), ToolInput::Positional(value)) => Ok(Some(scalar_text(value))),
    }
}

/// Render a scalar argument as text. Strings are taken verbatim.
pub fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A registry of available tools, keyed and iterated by name.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if !self.tools.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.order.iter().filter_map(|name| self.tools.get(name))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
