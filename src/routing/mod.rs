//! Route access - page classification and the middleware applying it.
//!
//! Checks run in a fixed order and the first match wins:
//! static asset -> unknown -> auth page -> public -> private -> fallthrough.

mod middleware;
mod pattern;
mod table;

pub use middleware::{is_authenticated, route_access};
pub use pattern::RoutePattern;
pub use table::{PassReason, RouteCategory, RouteDecision, RouteSpec, RouteTable};
