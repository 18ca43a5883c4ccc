//! Route and argument definitions.
//!
//! Definitions are produced once by an external loader (a build-time scan,
//! a JSON table) at registry-population time and never mutated afterwards.
//! The registry hands them out as `Arc<RouteDefinition>`.

use serde::{Deserialize, Serialize};

use crate::args::{ArgKind, ArgValue};

/// One declared argument of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentDefinition {
    /// Argument name, unique within one route.
    pub name: String,
    /// Whether this argument participates in route disambiguation.
    #[serde(default)]
    pub special: bool,
    /// Parser used to coerce the raw query value.
    pub kind: ArgKind,
    /// Value substituted whenever the query key is absent.
    pub default: ArgValue,
}

impl ArgumentDefinition {
    /// A plain argument.
    pub fn new(name: &str, kind: ArgKind, default: impl Into<ArgValue>) -> Self {
        Self {
            name: name.to_string(),
            special: false,
            kind,
            default: default.into(),
        }
    }

    /// A special argument: its query value must equal `default` for the
    /// owning route to match.
    pub fn special(name: &str, kind: ArgKind, default: impl Into<ArgValue>) -> Self {
        Self {
            name: name.to_string(),
            special: true,
            kind,
            default: default.into(),
        }
    }
}

/// The four transition codes handed to the external renderer.
///
/// Values are opaque to this layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transitions {
    /// Transition when the destination enters.
    #[serde(default)]
    pub enter: i32,
    /// Transition when the destination exits.
    #[serde(default)]
    pub exit: i32,
    /// Transition when the destination re-enters on back navigation.
    #[serde(default)]
    pub pop_enter: i32,
    /// Transition when the destination leaves on back navigation.
    #[serde(default)]
    pub pop_exit: i32,
}

/// A registered association between an action name and a target handler
/// identifier.
///
/// Several definitions may share one `action`; special arguments
/// disambiguate between them at match time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Globally unique positive id.
    pub id: u32,
    /// Action name; non-unique across definitions.
    pub action: String,
    /// Opaque container identifiers the route may be mounted under.
    #[serde(default)]
    pub host_identifiers: Vec<String>,
    /// Declared arguments, in declaration order.
    #[serde(default)]
    pub arguments: Vec<ArgumentDefinition>,
    /// Opaque name of the concrete handler/destination.
    pub target: String,
    /// Transition codes for the external renderer.
    #[serde(default)]
    pub transitions: Transitions,
}

impl RouteDefinition {
    /// A definition with no arguments or hosts; fill the rest via struct
    /// update syntax.
    pub fn new(id: u32, action: &str, target: &str) -> Self {
        Self {
            id,
            action: action.to_string(),
            host_identifiers: Vec::new(),
            arguments: Vec::new(),
            target: target.to_string(),
            transitions: Transitions::default(),
        }
    }

    /// Attach arguments (builder-style convenience for tests and loaders).
    pub fn with_arguments(mut self, arguments: Vec<ArgumentDefinition>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Attach host identifiers.
    pub fn with_hosts(mut self, hosts: Vec<String>) -> Self {
        self.host_identifiers = hosts;
        self
    }

    /// Attach transition codes.
    pub fn with_transitions(mut self, transitions: Transitions) -> Self {
        self.transitions = transitions;
        self
    }

    /// Look up a declared argument by name.
    pub fn argument(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.arguments.iter().find(|a| a.name == name)
    }
}
