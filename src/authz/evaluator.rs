use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::principal::{Role, User};
use super::resources::{
    Action, AdminDashboard, Application, Cv, EnterpriseDashboard, Job, MarkCandidates,
    NavigationBar, Notifications, Resource,
};

/// A single permission rule for one (role, resource, action) triple.
pub enum Rule<D> {
    Static(bool),
    /// Decided per record; needs the subject to be evaluated.
    Predicate(fn(&User, &D) -> bool),
}

impl<D> Rule<D> {
    fn evaluate(&self, user: &User, data: Option<&D>) -> bool {
        match self {
            Rule::Static(allowed) => *allowed,
            Rule::Predicate(predicate) => match data {
                Some(subject) => predicate(user, subject),
                None => false,
            },
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Static(_) => RuleKind::Static,
            Rule::Predicate(_) => RuleKind::Predicate,
        }
    }
}

impl<D> fmt::Debug for Rule<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Static(allowed) => f.debug_tuple("Static").field(allowed).finish(),
            Rule::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Static,
    Predicate,
}

/// Rules for one resource, keyed by role and action.
pub struct ResourceRules<R: Resource> {
    rules: HashMap<(Role, R::Action), Rule<R::Data>>,
}

impl<R: Resource> Default for ResourceRules<R> {
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }
}

impl<R: Resource> ResourceRules<R> {
    pub fn get(&self, role: Role, action: R::Action) -> Option<&Rule<R::Data>> {
        self.rules.get(&(role, action))
    }

    fn insert(&mut self, role: Role, action: R::Action, rule: Rule<R::Data>) {
        self.rules.insert((role, action), rule);
    }
}

/// One granted (resource, action) pair, as reported by [`PermissionTable::grants_for_role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GrantSummary {
    pub resource: String,
    pub action: String,
    pub rule: RuleKind,
}

/// `Role -> Resource -> Action -> Rule`, built once at startup and read-only afterwards.
#[derive(Default)]
pub struct PermissionTable {
    pub(crate) job: ResourceRules<Job>,
    pub(crate) application: ResourceRules<Application>,
    pub(crate) cv: ResourceRules<Cv>,
    pub(crate) notification: ResourceRules<Notifications>,
    pub(crate) enterprise_dashboard: ResourceRules<EnterpriseDashboard>,
    pub(crate) admin_dashboard: ResourceRules<AdminDashboard>,
    pub(crate) mark_candidates: ResourceRules<MarkCandidates>,
    pub(crate) navigation_bar: ResourceRules<NavigationBar>,
}

impl PermissionTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_rule<R: Resource>(mut self, role: Role, action: R::Action, rule: Rule<R::Data>) -> Self {
        R::rules_mut(&mut self).insert(role, action, rule);
        self
    }

    pub fn allow<R: Resource>(self, role: Role, action: R::Action) -> Self {
        self.with_rule::<R>(role, action, Rule::Static(true))
    }

    pub fn deny<R: Resource>(self, role: Role, action: R::Action) -> Self {
        self.with_rule::<R>(role, action, Rule::Static(false))
    }

    pub fn allow_when<R: Resource>(
        self,
        role: Role,
        action: R::Action,
        predicate: fn(&User, &R::Data) -> bool,
    ) -> Self {
        self.with_rule::<R>(role, action, Rule::Predicate(predicate))
    }

    /// True when any of the user's roles grants `action` on `R`.
    ///
    /// Absent users, missing table entries and predicate rules without `data` all deny.
    pub fn has_permission<R: Resource>(
        &self,
        user: Option<&User>,
        action: R::Action,
        data: Option<&R::Data>,
    ) -> bool {
        let Some(user) = user else {
            tracing::debug!(resource = R::NAME, action = action.as_str(), "no user, permission denied");
            return false;
        };

        let rules = R::rules(self);
        let granted = user.roles.iter().any(|role| {
            rules
                .get(*role, action)
                .map(|rule| rule.evaluate(user, data))
                .unwrap_or(false)
        });

        tracing::debug!(
            user_id = %user.id,
            resource = R::NAME,
            action = action.as_str(),
            granted,
            "permission evaluated"
        );
        granted
    }

    /// Everything `role` can be granted, in declaration order. Static denials are left out.
    pub fn grants_for_role(&self, role: Role) -> Vec<GrantSummary> {
        let mut out = Vec::new();
        self.collect_grants::<Job>(role, &mut out);
        self.collect_grants::<Application>(role, &mut out);
        self.collect_grants::<Cv>(role, &mut out);
        self.collect_grants::<Notifications>(role, &mut out);
        self.collect_grants::<EnterpriseDashboard>(role, &mut out);
        self.collect_grants::<AdminDashboard>(role, &mut out);
        self.collect_grants::<MarkCandidates>(role, &mut out);
        self.collect_grants::<NavigationBar>(role, &mut out);
        out
    }

    fn collect_grants<R: Resource>(&self, role: Role, out: &mut Vec<GrantSummary>) {
        let rules = R::rules(self);
        for action in <R::Action as Action>::ALL {
            match rules.get(role, *action) {
                None | Some(Rule::Static(false)) => {}
                Some(rule) => out.push(GrantSummary {
                    resource: R::NAME.to_string(),
                    action: action.as_str().to_string(),
                    rule: rule.kind(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::resources::{JobAction, NavigationAction};
    use crate::models::job::JobPosting;
    use uuid::Uuid;

    fn owns(user: &User, posting: &JobPosting) -> bool {
        posting.enterprise_id == user.id
    }

    fn table() -> PermissionTable {
        PermissionTable::empty()
            .allow::<Job>(Role::Enterprise, JobAction::Create)
            .deny::<Job>(Role::User, JobAction::Create)
            .allow_when::<Job>(Role::Enterprise, JobAction::Update, owns)
            .allow::<Job>(Role::Admin, JobAction::Update)
    }

    #[test]
    fn absent_user_is_denied() {
        assert!(!table().has_permission::<Job>(None, JobAction::Create, None));
    }

    #[test]
    fn user_without_roles_is_denied() {
        let user = User::new(Uuid::new_v4());
        assert!(!table().has_permission::<Job>(Some(&user), JobAction::Create, None));
    }

    #[test]
    fn missing_entry_is_denied() {
        let user = User::new(Uuid::new_v4()).with_roles([Role::Enterprise]);
        assert!(!table().has_permission::<Job>(Some(&user), JobAction::Delete, None));
    }

    #[test]
    fn static_false_does_not_block_another_role() {
        let user = User::new(Uuid::new_v4()).with_roles([Role::User, Role::Enterprise]);
        assert!(table().has_permission::<Job>(Some(&user), JobAction::Create, None));
    }

    #[test]
    fn predicate_without_data_is_denied() {
        let user = User::new(Uuid::new_v4()).with_roles([Role::Enterprise]);
        assert!(!table().has_permission::<Job>(Some(&user), JobAction::Update, None));
    }

    #[test]
    fn predicate_sees_the_subject() {
        let user = User::new(Uuid::new_v4()).with_roles([Role::Enterprise]);
        let own = JobPosting::new(Uuid::new_v4(), user.id, "Backend Engineer");
        let other = JobPosting::new(Uuid::new_v4(), Uuid::new_v4(), "Designer");

        let table = table();
        assert!(table.has_permission::<Job>(Some(&user), JobAction::Update, Some(&own)));
        assert!(!table.has_permission::<Job>(Some(&user), JobAction::Update, Some(&other)));
    }

    #[test]
    fn static_grant_wins_over_failing_predicate() {
        let user = User::new(Uuid::new_v4()).with_roles([Role::Enterprise, Role::Admin]);
        let other = JobPosting::new(Uuid::new_v4(), Uuid::new_v4(), "Designer");
        assert!(table().has_permission::<Job>(Some(&user), JobAction::Update, Some(&other)));
    }

    #[test]
    fn grants_skip_static_denials() {
        let grants = table().grants_for_role(Role::User);
        assert!(grants.is_empty());

        let grants = table().grants_for_role(Role::Enterprise);
        assert_eq!(
            grants,
            vec![
                GrantSummary { resource: "job".into(), action: "create".into(), rule: RuleKind::Static },
                GrantSummary { resource: "job".into(), action: "update".into(), rule: RuleKind::Predicate },
            ]
        );
    }

    #[test]
    fn empty_table_denies_everything() {
        let user = User::new(Uuid::new_v4()).with_roles(Role::ALL);
        let table = PermissionTable::empty();
        for action in NavigationAction::ALL {
            assert!(!table.has_permission::<NavigationBar>(Some(&user), *action, None));
        }
    }
}
