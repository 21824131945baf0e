//! # PaperLens Core
//!
//! Domain types, traits, and error definitions for the PaperLens
//! research-graph question answering agent. This crate has **no I/O**:
//! it defines the model that the provider, graph, tool, and agent crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is a trait here (`Provider`, `GraphStore`,
//! `Tool`, `QueryGenerator`). Implementations live in their own crates, so
//! the reasoning loop holds no inline network code and tests can
//! substitute scripted collaborators.

pub mod agent;
pub mod error;
pub mod graph;
pub mod observation;
pub mod provider;
pub mod query;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use agent::{AgentResult, Decision, Step, ThoughtChain, FINISH};
pub use error::{Error, GraphError, ProviderError, QueryGenerationError, Result, ToolError};
pub use graph::{GraphStore, Params, Record};
pub use observation::{GraphStatistics, Observation, PaperRecord};
pub use provider::{Provider, ProviderRequest, ProviderResponse};
pub use query::{GeneratedQuery, QueryGenerator, WRITE_KEYWORDS, check_read_only};
pub use tool::{ParameterSpec, Tool, ToolArgs, ToolInput, ToolRegistry, bind_argument};
