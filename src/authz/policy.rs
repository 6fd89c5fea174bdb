//! The job board's permission table.

use super::evaluator::PermissionTable;
use super::principal::{Role, User};
use super::resources::*;
use crate::models::cv::CvDocument;
use crate::models::job::{JobApplication, JobPosting};
use crate::models::notification::Notification;

fn owns_posting(user: &User, posting: &JobPosting) -> bool {
    posting.is_owned_by(user.id)
}

fn submitted_application(user: &User, application: &JobApplication) -> bool {
    application.candidate_id == user.id
}

fn received_application(user: &User, application: &JobApplication) -> bool {
    application.enterprise_id == user.id
}

fn owns_cv(user: &User, cv: &CvDocument) -> bool {
    cv.owner_id == user.id
}

fn is_recipient(user: &User, notification: &Notification) -> bool {
    notification.recipient_id == user.id
}

impl PermissionTable {
    pub fn job_board() -> Self {
        let table = PermissionTable::empty()
            // Jobs
            .allow::<Job>(Role::User, JobAction::View)
            .allow::<Job>(Role::Enterprise, JobAction::View)
            .allow::<Job>(Role::Enterprise, JobAction::Create)
            .allow_when::<Job>(Role::Enterprise, JobAction::Update, owns_posting)
            .allow_when::<Job>(Role::Enterprise, JobAction::Delete, owns_posting)
            .allow::<Job>(Role::Admin, JobAction::View)
            .deny::<Job>(Role::Admin, JobAction::Update)
            .allow::<Job>(Role::Admin, JobAction::Delete)
            // Applications
            .allow::<Application>(Role::User, ApplicationAction::Create)
            .allow_when::<Application>(Role::User, ApplicationAction::View, submitted_application)
            .allow_when::<Application>(Role::User, ApplicationAction::Update, submitted_application)
            .allow_when::<Application>(Role::Enterprise, ApplicationAction::View, received_application)
            .allow_when::<Application>(Role::Enterprise, ApplicationAction::Update, received_application)
            .allow::<Application>(Role::Admin, ApplicationAction::View)
            // CVs
            .allow::<Cv>(Role::User, CvAction::Upload)
            .allow_when::<Cv>(Role::User, CvAction::View, owns_cv)
            .allow_when::<Cv>(Role::User, CvAction::Delete, owns_cv)
            .allow::<Cv>(Role::Enterprise, CvAction::View)
            .allow::<Cv>(Role::Admin, CvAction::View);

        let table = Role::ALL.iter().fold(table, |table, role| {
            table
                .allow_when::<Notifications>(*role, NotificationAction::View, is_recipient)
                .allow_when::<Notifications>(*role, NotificationAction::Update, is_recipient)
                .allow::<NavigationBar>(*role, NavigationAction::Notifications)
        });

        table
            // Dashboards
            .allow::<EnterpriseDashboard>(Role::Enterprise, DashboardAction::View)
            .allow::<AdminDashboard>(Role::Admin, AdminDashboardAction::View)
            .allow::<AdminDashboard>(Role::Admin, AdminDashboardAction::ManageUsers)
            // Candidate shortlisting
            .allow_when::<MarkCandidates>(Role::Enterprise, MarkCandidatesAction::View, owns_posting)
            .allow_when::<MarkCandidates>(Role::Enterprise, MarkCandidatesAction::Update, owns_posting)
            .allow::<MarkCandidates>(Role::Admin, MarkCandidatesAction::View)
            // Navigation
            .allow::<NavigationBar>(Role::User, NavigationAction::FindJobs)
            .allow::<NavigationBar>(Role::User, NavigationAction::MyApplications)
            .deny::<NavigationBar>(Role::Enterprise, NavigationAction::FindJobs)
            .allow::<NavigationBar>(Role::Enterprise, NavigationAction::EnterpriseDashboard)
            .allow::<NavigationBar>(Role::Admin, NavigationAction::FindJobs)
            .allow::<NavigationBar>(Role::Admin, NavigationAction::AdminDashboard)
    }
}
