//! Route registry - stores route definitions and resolves parsed schemes.
//!
//! The registry maps numeric ids to definitions (exact O(1) lookup) and
//! action names to ordered candidate lists. Population order is part of the
//! matching contract: when several candidates qualify, the first registered
//! wins.
//!
//! The registry is populated by an external loader and only consumed here;
//! it never reaches for ambient global state.
//!
//! # Example
//!
//! ```
//! use scheme_router::args::ArgKind;
//! use scheme_router::parser::parse;
//! use scheme_router::registry::{ArgumentDefinition, RouteDefinition, RouteRegistry};
//!
//! let mut registry = RouteRegistry::new();
//! registry
//!     .register(RouteDefinition::new(1, "profile", "ProfileScreen").with_arguments(vec![
//!         ArgumentDefinition::new("user_id", ArgKind::Long, 0i64),
//!     ]))
//!     .unwrap();
//!
//! let parts = parse("app://profile?user_id=42").unwrap();
//! let resolved = registry.resolve(&parts).unwrap();
//! assert_eq!(resolved.route.target, "ProfileScreen");
//! ```

mod definition;

pub use definition::{ArgumentDefinition, RouteDefinition, Transitions};

use std::collections::HashMap;
use std::sync::Arc;

use crate::args::ArgValue;
use crate::error::{Result, SchemeError};
use crate::parser::ParsedScheme;

/// A matched route plus its fully-typed argument map.
///
/// Every declared argument is present, using the parsed query value or the
/// declared default.
#[derive(Debug, Clone)]
pub struct ResolvedScheme {
    /// The matched definition.
    pub route: Arc<RouteDefinition>,
    /// Typed arguments keyed by declared name.
    pub args: HashMap<String, ArgValue>,
    /// The raw parts this resolution came from.
    pub parts: ParsedScheme,
}

impl ResolvedScheme {
    /// Typed argument by name.
    pub fn arg(&self, name: &str) -> Option<&ArgValue> {
        self.args.get(name)
    }
}

/// Registry of route definitions, indexed by id and by action name.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    /// Exact lookup by unique id.
    by_id: HashMap<u32, Arc<RouteDefinition>>,
    /// Candidates per action, in registration order.
    by_action: HashMap<String, Vec<Arc<RouteDefinition>>>,
}

impl RouteRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate a registry from a JSON array of route definitions, as
    /// produced by an external build-time scan.
    ///
    /// # Errors
    ///
    /// Returns [`SchemeError::RouteTable`] on malformed JSON and the usual
    /// registration errors for invalid definitions.
    pub fn from_json(json: &str) -> Result<Self> {
        let defs: Vec<RouteDefinition> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for def in defs {
            registry.register(def)?;
        }
        Ok(registry)
    }

    /// Register a definition.
    ///
    /// Argument defaults are normalized to their declared kind so that
    /// loader representations (e.g. JSON numbers) compare correctly during
    /// special-argument matching.
    ///
    /// # Errors
    ///
    /// Rejects id 0, ids already registered, duplicate argument names, and
    /// defaults that cannot be normalized to the declared kind.
    pub fn register(&mut self, mut def: RouteDefinition) -> Result<()> {
        if def.id == 0 {
            return Err(SchemeError::InvalidRoute("id must be positive".to_string()));
        }
        if self.by_id.contains_key(&def.id) {
            return Err(SchemeError::DuplicateRouteId(def.id));
        }
        for i in 0..def.arguments.len() {
            let name = def.arguments[i].name.clone();
            if def.arguments[i + 1..].iter().any(|a| a.name == name) {
                return Err(SchemeError::InvalidRoute(format!(
                    "duplicate argument name '{}' in route {}",
                    name, def.id
                )));
            }
            let arg = &mut def.arguments[i];
            if arg.default.kind() != arg.kind {
                arg.default = arg.kind.parse(&arg.name, &arg.default.to_string())?;
            }
        }

        let def = Arc::new(def);
        self.by_id.insert(def.id, def.clone());
        self.by_action
            .entry(def.action.clone())
            .or_default()
            .push(def);
        Ok(())
    }

    /// Exact lookup by unique id.
    pub fn route_by_id(&self, id: u32) -> Option<Arc<RouteDefinition>> {
        self.by_id.get(&id).cloned()
    }

    /// Registered candidates for an action, in registration order.
    pub fn candidates(&self, action: &str) -> &[Arc<RouteDefinition>] {
        self.by_action.get(action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Resolve parsed scheme parts to a definition and typed argument map.
    ///
    /// Candidates are filtered by exact action equality; the first (in
    /// registration order) whose special arguments are all present in the
    /// query with values equal to their defaults wins. A candidate with no
    /// special arguments matches on action alone.
    ///
    /// # Errors
    ///
    /// Returns [`SchemeError::NoMatchingRoute`] when the action is unknown
    /// or no candidate's special constraints are satisfied, and
    /// [`SchemeError::Coercion`] when a declared (non-special) argument's
    /// query value does not parse.
    pub fn resolve(&self, parts: &ParsedScheme) -> Result<ResolvedScheme> {
        let candidates = self
            .by_action
            .get(&parts.action)
            .ok_or_else(|| SchemeError::NoMatchingRoute(parts.action.clone()))?;

        let route = candidates
            .iter()
            .find(|c| specials_match(c, parts))
            .ok_or_else(|| SchemeError::NoMatchingRoute(parts.action.clone()))?;

        let args = typed_args(route, parts)?;
        Ok(ResolvedScheme {
            route: route.clone(),
            args,
            parts: parts.clone(),
        })
    }
}

/// Whether every special argument of `def` has a query entry whose parsed
/// value equals the argument's default.
///
/// A raw value that fails coercion disqualifies the candidate rather than
/// erroring; matching moves on to the next one.
fn specials_match(def: &RouteDefinition, parts: &ParsedScheme) -> bool {
    def.arguments.iter().filter(|a| a.special).all(|arg| {
        parts
            .query(&arg.name)
            .and_then(|raw| arg.kind.parse(&arg.name, raw).ok())
            .is_some_and(|value| value == arg.default)
    })
}

/// Build the typed argument map: defaults first, then parsed values for
/// every query key that names a declared argument. Unknown keys are ignored.
fn typed_args(def: &RouteDefinition, parts: &ParsedScheme) -> Result<HashMap<String, ArgValue>> {
    let mut args: HashMap<String, ArgValue> = def
        .arguments
        .iter()
        .map(|a| (a.name.clone(), a.default.clone()))
        .collect();

    for (name, raw) in &parts.queries {
        if let Some(arg) = def.argument(name) {
            args.insert(name.clone(), arg.kind.parse(name, raw)?);
        }
    }
    Ok(args)
}
