//! The ordered smoke test pipeline.
//!
//! Every [`Step`] declares the session values it [`requires`](Step::requires)
//! and the ones it [`produces`](Step::produces). [`run_step`] checks the
//! requirements before any request is sent, so a step whose inputs were never
//! captured fails with a precondition detail instead of calling the backend.

mod ai;
mod auth;
mod basics;
pub mod fixtures;
mod profile;
mod reviews;
mod social;

use anyhow::{bail, Result};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

use crate::client::{ApiClient, ApiResponse, EXPECTED_STATUS_KEY, STATUS_CODE_KEY};
use crate::outcome::Outcome;
use crate::session::{missing_detail, Requirement, Session};
use crate::utils::truncate;

/// Longest payload excerpt placed in a failure detail
const MAX_DETAIL_CHARS: usize = 300;

/// Informal grouping used for section headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Basics,
    Auth,
    Reviews,
    Social,
    Profile,
    Ai,
    Cleanup,
}

impl Group {
    pub fn title(&self) -> &'static str {
        match self {
            Group::Basics => "Basic endpoints",
            Group::Auth => "Authentication flow",
            Group::Reviews => "Review CRUD operations",
            Group::Social => "Comments and likes",
            Group::Profile => "User profile",
            Group::Ai => "AI features",
            Group::Cleanup => "Cleanup",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Categories,
    Registration,
    Login,
    CurrentUser,
    CreateReview,
    ListReviews,
    ReviewsByCategory,
    SingleReview,
    UpdateReview,
    CreateComment,
    ListComments,
    LikeReview,
    LikedStatus,
    UserProfile,
    UserReviews,
    AiAssist,
    AiExplain,
    DeleteReview,
}

/// Execution order. Later steps consume ids captured by earlier ones.
pub const PIPELINE: [Step; 18] = [
    Step::Categories,
    Step::Registration,
    Step::Login,
    Step::CurrentUser,
    Step::CreateReview,
    Step::ListReviews,
    Step::ReviewsByCategory,
    Step::SingleReview,
    Step::UpdateReview,
    Step::CreateComment,
    Step::ListComments,
    Step::LikeReview,
    Step::LikedStatus,
    Step::UserProfile,
    Step::UserReviews,
    Step::AiAssist,
    Step::AiExplain,
    Step::DeleteReview,
];

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Categories => "Categories Endpoint",
            Step::Registration => "User Registration",
            Step::Login => "User Login",
            Step::CurrentUser => "Get Current User",
            Step::CreateReview => "Create Review",
            Step::ListReviews => "Get Reviews",
            Step::ReviewsByCategory => "Get Reviews by Category",
            Step::SingleReview => "Get Single Review",
            Step::UpdateReview => "Update Review",
            Step::CreateComment => "Create Comment",
            Step::ListComments => "Get Comments",
            Step::LikeReview => "Like Review",
            Step::LikedStatus => "Check Liked Status",
            Step::UserProfile => "Get User Profile",
            Step::UserReviews => "Get User Reviews",
            Step::AiAssist => "AI Writing Assistant",
            Step::AiExplain => "AI Word Explanation",
            Step::DeleteReview => "Delete Review",
        }
    }

    pub fn group(&self) -> Group {
        match self {
            Step::Categories => Group::Basics,
            Step::Registration | Step::Login | Step::CurrentUser => Group::Auth,
            Step::CreateReview
            | Step::ListReviews
            | Step::ReviewsByCategory
            | Step::SingleReview
            | Step::UpdateReview => Group::Reviews,
            Step::CreateComment | Step::ListComments | Step::LikeReview | Step::LikedStatus => {
                Group::Social
            }
            Step::UserProfile | Step::UserReviews => Group::Profile,
            Step::AiAssist | Step::AiExplain => Group::Ai,
            Step::DeleteReview => Group::Cleanup,
        }
    }

    pub fn requires(&self) -> &'static [Requirement] {
        use Requirement::*;
        match self {
            Step::Categories
            | Step::Registration
            | Step::ListReviews
            | Step::ReviewsByCategory
            | Step::AiExplain => &[],
            Step::Login => &[Username],
            Step::CurrentUser | Step::CreateReview | Step::AiAssist => &[Token],
            Step::SingleReview | Step::ListComments => &[ReviewId],
            Step::UpdateReview
            | Step::CreateComment
            | Step::LikeReview
            | Step::LikedStatus
            | Step::DeleteReview => &[ReviewId, Token],
            Step::UserProfile | Step::UserReviews => &[UserId],
        }
    }

    pub fn produces(&self) -> &'static [Requirement] {
        use Requirement::*;
        match self {
            Step::Registration => &[Token, UserId, Username],
            Step::CreateReview => &[ReviewId],
            Step::CreateComment => &[CommentId],
            _ => &[],
        }
    }

    /// Failed outcome for a step whose inputs are absent
    pub fn precondition_failed(&self, missing: &[Requirement]) -> Outcome {
        Outcome::failed(self.name(), missing_detail(missing))
    }

    fn execute(&self, client: &ApiClient, session: &mut Session) -> Outcome {
        match self {
            Step::Categories => basics::categories(client),
            Step::Registration => auth::register(client, session),
            Step::Login => auth::login(client, session),
            Step::CurrentUser => auth::current_user(client, session),
            Step::CreateReview => reviews::create(client, session),
            Step::ListReviews => reviews::list(client),
            Step::ReviewsByCategory => reviews::list_by_category(client),
            Step::SingleReview => reviews::get(client, session),
            Step::UpdateReview => reviews::update(client, session),
            Step::CreateComment => social::create_comment(client, session),
            Step::ListComments => social::list_comments(client, session),
            Step::LikeReview => social::like(client, session),
            Step::LikedStatus => social::liked_status(client, session),
            Step::UserProfile => profile::user(client, session),
            Step::UserReviews => profile::user_reviews(client, session),
            Step::AiAssist => ai::assist(client, session),
            Step::AiExplain => ai::explain(client),
            Step::DeleteReview => reviews::delete(client, session),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run one step: check its requirements, then call the backend
pub fn run_step(step: Step, client: &ApiClient, session: &mut Session) -> Outcome {
    let missing = session.missing(step.requires());
    if !missing.is_empty() {
        warn!(step = %step, missing = ?missing, "precondition not met, skipping request");
        return step.precondition_failed(&missing);
    }

    step.execute(client, session)
}

/// Check that every requirement is produced by an earlier step
pub fn validate_order(steps: &[Step]) -> Result<()> {
    let mut available: HashSet<Requirement> = HashSet::new();

    for step in steps {
        for requirement in step.requires() {
            if !available.contains(requirement) {
                bail!(
                    "Step '{}' requires {} but no earlier step produces it",
                    step.name(),
                    requirement
                );
            }
        }
        available.extend(step.produces().iter().copied());
    }

    Ok(())
}

/// Failure detail quoting the (possibly truncated) payload.
///
/// Status codes are appended after truncation so a long error page never
/// hides them.
pub(crate) fn response_detail(response: &ApiResponse) -> String {
    let mut payload = response.payload.clone();
    let mut expected = None;
    if !response.success {
        if let Some(obj) = payload.as_object_mut() {
            obj.remove(STATUS_CODE_KEY);
            expected = obj.remove(EXPECTED_STATUS_KEY).and_then(|v| v.as_u64());
        }
    }

    let body = truncate(&payload.to_string(), MAX_DETAIL_CHARS);
    match (response.status, expected) {
        (Some(status), Some(expected)) => {
            format!("- Response: {body} (status {status}, expected {expected})")
        }
        (Some(status), None) => format!("- Response: {body} (status {status})"),
        (None, _) => format!("- Response: {body}"),
    }
}
