//! Fluent builder for canonical scheme URI strings.
//!
//! Accumulates typed arguments and an optional codec-encoded payload, then
//! renders `protocol://action?payload&name=value&...` via `Display`. No
//! escaping is performed beyond what the caller supplies; arguments render
//! in insertion order.
//!
//! # Example
//!
//! ```
//! use scheme_router::builder::SchemeBuilder;
//!
//! let uri = SchemeBuilder::new("app", "detail")
//!     .arg("item_id", 42i64)
//!     .arg("edit", true)
//!     .to_string();
//! assert_eq!(uri, "app://detail?item_id=42&edit=1");
//! ```

use std::fmt;

use crate::args::ArgValue;
use crate::codec::{FlatCodec, Record, RecordSchema};
use crate::error::{Result, SchemeError};

/// Reserved argument recorded when payload encoding fails in production
/// mode. The dispatch path refuses to execute schemes carrying it.
pub const BAD_PAYLOAD_KEY: &str = "__bad_payload__";

/// Reserved argument marking a force-new-host request for the external
/// launch mechanism.
pub const FORCE_NEW_HOST_KEY: &str = "__force_new_host__";

/// Reserved argument carrying opaque activity-launch flags.
pub const LAUNCH_FLAGS_KEY: &str = "__launch_flags__";

/// Builder for a canonical scheme URI.
#[derive(Debug, Clone)]
pub struct SchemeBuilder {
    protocol: String,
    action: String,
    /// Codec-encoded payload, rendered first in the query section.
    payload: Option<String>,
    /// Rendered arguments, in insertion order.
    args: Vec<(String, String)>,
    force_new_host: bool,
    launch_flags: Option<i32>,
    debug: bool,
}

impl SchemeBuilder {
    /// Create a builder for `protocol://action`.
    pub fn new(protocol: &str, action: &str) -> Self {
        Self {
            protocol: protocol.to_string(),
            action: action.to_string(),
            payload: None,
            args: Vec::new(),
            force_new_host: false,
            launch_flags: None,
            debug: false,
        }
    }

    /// Toggle debug mode: encoding failures are returned to the caller
    /// instead of being downgraded to the bad-payload marker.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Add a typed argument. Booleans render as `1`/`0`.
    ///
    /// A repeated name overwrites the value in place, keeping the original
    /// position.
    pub fn arg(mut self, name: &str, value: impl Into<ArgValue>) -> Self {
        let rendered = value.into().to_string();
        match self.args.iter_mut().find(|(k, _)| k == name) {
            Some((_, existing)) => *existing = rendered,
            None => self.args.push((name.to_string(), rendered)),
        }
        self
    }

    /// Attach a codec-encoded payload. May be set at most once.
    ///
    /// On encoding failure, debug mode returns the error immediately;
    /// production mode records the [`BAD_PAYLOAD_KEY`] marker argument
    /// instead, which the dispatch path treats as an automatic failure.
    ///
    /// # Errors
    ///
    /// In debug mode, [`SchemeError::Serialization`] from the codec, or when
    /// a payload was already set.
    pub fn model(mut self, schema: &RecordSchema, record: &Record) -> Result<Self> {
        if self.payload.is_some() {
            if self.debug {
                return Err(SchemeError::Serialization(
                    "payload already set".to_string(),
                ));
            }
            tracing::warn!(
                protocol = %self.protocol,
                action = %self.action,
                "Ignoring second payload on scheme builder"
            );
            return Ok(self);
        }

        match FlatCodec::encode(schema, record) {
            Ok(encoded) => {
                self.payload = Some(encoded);
                Ok(self)
            }
            Err(e) if self.debug => Err(e),
            Err(e) => {
                tracing::error!(
                    protocol = %self.protocol,
                    action = %self.action,
                    error = %e,
                    "Payload encoding failed, marking scheme as bad"
                );
                Ok(self.arg(BAD_PAYLOAD_KEY, true))
            }
        }
    }

    /// Request a fresh host for the destination.
    pub fn force_new_host(mut self) -> Self {
        self.force_new_host = true;
        self
    }

    /// Opaque flags for the external activity-launch mechanism.
    pub fn launch_flags(mut self, flags: i32) -> Self {
        self.launch_flags = Some(flags);
        self
    }
}

impl fmt::Display for SchemeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.protocol, self.action)?;

        let mut wrote_any = false;
        let mut sep = |f: &mut fmt::Formatter<'_>, wrote_any: &mut bool| -> fmt::Result {
            f.write_str(if *wrote_any { "&" } else { "?" })?;
            *wrote_any = true;
            Ok(())
        };

        if let Some(payload) = &self.payload {
            if !payload.is_empty() {
                sep(f, &mut wrote_any)?;
                f.write_str(payload)?;
            }
        }
        for (name, value) in &self.args {
            sep(f, &mut wrote_any)?;
            write!(f, "{}={}", name, value)?;
        }
        if self.force_new_host {
            sep(f, &mut wrote_any)?;
            write!(f, "{}=1", FORCE_NEW_HOST_KEY)?;
        }
        if let Some(flags) = self.launch_flags {
            sep(f, &mut wrote_any)?;
            write!(f, "{}={}", LAUNCH_FLAGS_KEY, flags)?;
        }
        Ok(())
    }
}
