//! Resources and their action sets.
//!
//! Each resource is a zero-sized marker implementing [`Resource`], which ties it to
//! exactly one action enum and one data payload type. A `(resource, action)` pair
//! that the table does not know about cannot be written at a call site.

use std::fmt::Debug;
use std::hash::Hash;

use serde::de::DeserializeOwned;

use super::evaluator::{PermissionTable, ResourceRules};
use crate::models::cv::CvDocument;
use crate::models::job::{JobApplication, JobPosting};
use crate::models::notification::Notification;

/// An action enum belonging to a single resource.
pub trait Action: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|action| action.as_str() == name)
    }
}

pub trait Resource: Sized + 'static {
    const NAME: &'static str;
    type Action: Action;
    /// Subject handed to predicate rules. `()` for resources without per-record rules.
    type Data: DeserializeOwned;

    fn rules(table: &PermissionTable) -> &ResourceRules<Self>;
    fn rules_mut(table: &mut PermissionTable) -> &mut ResourceRules<Self>;
}

macro_rules! actions {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Action for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }
    };
}

macro_rules! resource {
    ($marker:ident, $name:literal, $action:ty, $data:ty, $field:ident) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $marker;

        impl Resource for $marker {
            const NAME: &'static str = $name;
            type Action = $action;
            type Data = $data;

            fn rules(table: &PermissionTable) -> &ResourceRules<Self> {
                &table.$field
            }

            fn rules_mut(table: &mut PermissionTable) -> &mut ResourceRules<Self> {
                &mut table.$field
            }
        }
    };
}

actions!(JobAction {
    View => "view",
    Create => "create",
    Update => "update",
    Delete => "delete",
});

actions!(ApplicationAction {
    View => "view",
    Create => "create",
    Update => "update",
});

actions!(CvAction {
    View => "view",
    Upload => "upload",
    Delete => "delete",
});

actions!(NotificationAction {
    View => "view",
    Update => "update",
});

actions!(DashboardAction {
    View => "view",
});

actions!(AdminDashboardAction {
    View => "view",
    ManageUsers => "manageUsers",
});

actions!(MarkCandidatesAction {
    View => "view",
    Update => "update",
});

actions!(
    /// Links shown in the top navigation bar.
    NavigationAction {
        FindJobs => "findJobs",
        MyApplications => "myApplications",
        EnterpriseDashboard => "enterpriseDashboard",
        AdminDashboard => "adminDashboard",
        Notifications => "notifications",
    }
);

resource!(Job, "job", JobAction, JobPosting, job);
resource!(Application, "application", ApplicationAction, JobApplication, application);
resource!(Cv, "cv", CvAction, CvDocument, cv);
resource!(Notifications, "notification", NotificationAction, Notification, notification);
resource!(EnterpriseDashboard, "enterpriseDashboard", DashboardAction, (), enterprise_dashboard);
resource!(AdminDashboard, "adminDashboard", AdminDashboardAction, (), admin_dashboard);
// Marking candidates is scoped to the job posting they applied to.
resource!(MarkCandidates, "markCandidates", MarkCandidatesAction, JobPosting, mark_candidates);
resource!(NavigationBar, "navigationBar", NavigationAction, (), navigation_bar);
