//! Guard chains
//!
//! Every endpoint is an ordered list of guards followed by one terminal step.
//! A guard is a named, pure check over a [`GuardContext`]; [`GuardChain::run`]
//! evaluates guards in order and stops at the first failure, so the terminal
//! step (the mutation) only ever runs when every guard passed.
//!
//! ```text
//!  request ──▶ guard 1 ──▶ guard 2 ──▶ ... ──▶ guard N ──▶ terminal step
//!                 │           │                  │
//!                 ▼           ▼                  ▼
//!              ApiError    ApiError           ApiError   (first one wins)
//! ```
//!
//! Ordering is part of the contract: lookup guards run before guards that
//! inspect the looked-up record, which run before payload field guards.

use serde_json::Value;

use crate::error::ApiError;
use crate::payload::Payload;

/// Outcome of a single guard
pub type GuardResult = Result<(), ApiError>;

/// Everything a guard may inspect.
///
/// `record` is the result of the repository lookup for `route_id`, done before
/// the chain runs; the `record_exists` guard turns `None` into a NotFound.
pub struct GuardContext<'a, T> {
    pub payload: &'a Payload,
    pub route_id: Option<&'a str>,
    pub record: Option<&'a T>,
}

impl<'a, T> GuardContext<'a, T> {
    /// Context for collection routes (no route id)
    pub fn new(payload: &'a Payload) -> Self {
        Self {
            payload,
            route_id: None,
            record: None,
        }
    }

    /// Context for item routes
    pub fn for_route(payload: &'a Payload, route_id: &'a str, record: Option<&'a T>) -> Self {
        Self {
            payload,
            route_id: Some(route_id),
            record,
        }
    }

    /// Looked-up record. Guards that read record state sit after `record_exists`,
    /// so a miss here is a chain wiring bug.
    pub fn record(&self) -> Result<&'a T, ApiError> {
        self.record
            .ok_or_else(|| ApiError::internal("guard read a record before it was resolved"))
    }

    pub fn route_id(&self) -> &'a str {
        self.route_id.unwrap_or_default()
    }
}

type CheckFn<T> = Box<dyn Fn(&GuardContext<'_, T>) -> GuardResult + Send + Sync>;

/// A named check
pub struct Guard<T> {
    name: String,
    check: CheckFn<T>,
}

impl<T> Guard<T> {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&GuardContext<'_, T>) -> GuardResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self, ctx: &GuardContext<'_, T>) -> GuardResult {
        (self.check)(ctx)
    }
}

/// Ordered guards for one endpoint. Built once, run per request.
pub struct GuardChain<T> {
    name: &'static str,
    guards: Vec<Guard<T>>,
}

impl<T> GuardChain<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            guards: Vec::new(),
        }
    }

    /// Append a guard
    pub fn then(mut self, guard: Guard<T>) -> Self {
        self.guards.push(guard);
        self
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Guard names in evaluation order
    pub fn guard_names(&self) -> Vec<&str> {
        self.guards.iter().map(Guard::name).collect()
    }

    /// Evaluate guards in order; the first failure is returned and nothing
    /// after it runs.
    pub fn run(&self, ctx: &GuardContext<'_, T>) -> GuardResult {
        for guard in &self.guards {
            if let Err(e) = guard.check(ctx) {
                tracing::debug!(
                    chain = self.name,
                    guard = guard.name(),
                    error = %e,
                    "guard rejected request"
                );
                return Err(e);
            }
        }
        Ok(())
    }
}

// ============================================================================
// Shared guards
// ============================================================================

/// NotFound unless the route id resolved to a record.
pub fn record_exists<T: 'static>(not_found: fn(&str) -> String) -> Guard<T> {
    Guard::new("record_exists", move |ctx: &GuardContext<'_, T>| {
        match ctx.record {
            Some(_) => Ok(()),
            None => Err(ApiError::not_found(not_found(ctx.route_id()))),
        }
    })
}

/// A payload `id`, when given, must equal the route id.
///
/// Absent, `null` and `""` are treated as "not given".
pub fn id_matches_route<T: 'static>(mismatch: fn(&str, &str) -> String) -> Guard<T> {
    Guard::new("id_matches_route", move |ctx: &GuardContext<'_, T>| {
        let route_id = ctx.route_id();
        match ctx.payload.get("id") {
            None | Some(Value::Null) => Ok(()),
            Some(Value::String(id)) if id.is_empty() || id == route_id => Ok(()),
            Some(Value::String(id)) => Err(ApiError::validation(mismatch(id, route_id))),
            Some(other) => Err(ApiError::validation(mismatch(&other.to_string(), route_id))),
        }
    })
}

/// `field` must be a non-blank string.
pub fn require_text<T: 'static>(resource: &'static str, field: &'static str) -> Guard<T> {
    Guard::new(format!("require_{field}"), move |ctx: &GuardContext<'_, T>| {
        read_text(ctx.payload, resource, field).map(|_| ())
    })
}

/// Read a required text field; terminal steps use this after `require_text` passed.
pub fn read_text<'p>(
    payload: &'p Payload,
    resource: &str,
    field: &str,
) -> Result<&'p str, ApiError> {
    payload
        .text(field)
        .ok_or_else(|| ApiError::validation(format!("{resource} must include a {field}")))
}
