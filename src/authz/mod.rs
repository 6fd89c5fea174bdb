//! Authorization - role/permission evaluation
//!
//! The permission table maps `Role -> Resource -> Action -> Rule`, where a rule
//! is either a fixed boolean or a predicate over the user and the record being
//! acted upon. Evaluation is a pure OR across the user's roles and always fails
//! closed:
//! - no user -> deny
//! - no matching entry -> deny
//! - predicate rule without a record -> deny

mod dynamic;
mod evaluator;
mod policy;
mod principal;
pub mod resources;

pub use dynamic::Permission;
pub use evaluator::{GrantSummary, PermissionTable, ResourceRules, Rule, RuleKind};
pub use principal::{Role, User};
pub use resources::{Action, Resource};
