//! String-keyed entry point for callers that cannot name resources at compile time
//! (the JSON API and the CLI).

use serde_json::Value;

use super::evaluator::PermissionTable;
use super::principal::User;
use super::resources::*;
use crate::errors::{AppError, AppResult};

/// A validated `(resource, action)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Job(JobAction),
    Application(ApplicationAction),
    Cv(CvAction),
    Notification(NotificationAction),
    EnterpriseDashboard(DashboardAction),
    AdminDashboard(AdminDashboardAction),
    MarkCandidates(MarkCandidatesAction),
    NavigationBar(NavigationAction),
}

impl Permission {
    /// Returns `None` for any pair the table does not declare.
    pub fn parse(resource: &str, action: &str) -> Option<Self> {
        match resource {
            Job::NAME => JobAction::parse(action).map(Self::Job),
            Application::NAME => ApplicationAction::parse(action).map(Self::Application),
            Cv::NAME => CvAction::parse(action).map(Self::Cv),
            Notifications::NAME => NotificationAction::parse(action).map(Self::Notification),
            EnterpriseDashboard::NAME => DashboardAction::parse(action).map(Self::EnterpriseDashboard),
            AdminDashboard::NAME => AdminDashboardAction::parse(action).map(Self::AdminDashboard),
            MarkCandidates::NAME => MarkCandidatesAction::parse(action).map(Self::MarkCandidates),
            NavigationBar::NAME => NavigationAction::parse(action).map(Self::NavigationBar),
            _ => None,
        }
    }

    pub fn resource(&self) -> &'static str {
        match self {
            Self::Job(_) => Job::NAME,
            Self::Application(_) => Application::NAME,
            Self::Cv(_) => Cv::NAME,
            Self::Notification(_) => Notifications::NAME,
            Self::EnterpriseDashboard(_) => EnterpriseDashboard::NAME,
            Self::AdminDashboard(_) => AdminDashboard::NAME,
            Self::MarkCandidates(_) => MarkCandidates::NAME,
            Self::NavigationBar(_) => NavigationBar::NAME,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            Self::Job(a) => a.as_str(),
            Self::Application(a) => a.as_str(),
            Self::Cv(a) => a.as_str(),
            Self::Notification(a) => a.as_str(),
            Self::EnterpriseDashboard(a) => a.as_str(),
            Self::AdminDashboard(a) => a.as_str(),
            Self::MarkCandidates(a) => a.as_str(),
            Self::NavigationBar(a) => a.as_str(),
        }
    }
}

impl PermissionTable {
    /// Like [`PermissionTable::has_permission`], with the subject given as JSON.
    ///
    /// `null` or missing data counts as absent. Data that does not fit the
    /// resource's payload type is a bad request rather than a silent denial.
    pub fn check(&self, user: Option<&User>, permission: Permission, data: Option<&Value>) -> AppResult<bool> {
        match permission {
            Permission::Job(a) => self.check_json::<Job>(user, a, data),
            Permission::Application(a) => self.check_json::<Application>(user, a, data),
            Permission::Cv(a) => self.check_json::<Cv>(user, a, data),
            Permission::Notification(a) => self.check_json::<Notifications>(user, a, data),
            Permission::EnterpriseDashboard(a) => self.check_json::<EnterpriseDashboard>(user, a, data),
            Permission::AdminDashboard(a) => self.check_json::<AdminDashboard>(user, a, data),
            Permission::MarkCandidates(a) => self.check_json::<MarkCandidates>(user, a, data),
            Permission::NavigationBar(a) => self.check_json::<NavigationBar>(user, a, data),
        }
    }

    fn check_json<R: Resource>(&self, user: Option<&User>, action: R::Action, data: Option<&Value>) -> AppResult<bool> {
        let subject = match data {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                serde_json::from_value::<R::Data>(value.clone())
                    .map_err(|err| AppError::bad_request(format!("invalid {} data: {err}", R::NAME)))?,
            ),
        };

        Ok(self.has_permission::<R>(user, action, subject.as_ref()))
    }
}
