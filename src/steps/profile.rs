use super::reviews::list_outcome;
use super::{response_detail, Step};
use crate::client::{ApiClient, ApiRequest};
use crate::outcome::Outcome;
use crate::session::{Requirement, Session};

pub(super) fn user(client: &ApiClient, session: &Session) -> Outcome {
    let step = Step::UserProfile;
    let Some(user_id) = session.user_id.as_deref() else {
        return step.precondition_failed(&[Requirement::UserId]);
    };

    let response = client.execute(&ApiRequest::get(format!("users/{user_id}")), None);

    match response.field("username").filter(|_| response.success) {
        Some(username) => Outcome::passed(
            step.name(),
            format!("- Username: {}", username.as_str().unwrap_or_default()),
        ),
        None => Outcome::failed(step.name(), response_detail(&response)),
    }
}

pub(super) fn user_reviews(client: &ApiClient, session: &Session) -> Outcome {
    let step = Step::UserReviews;
    let Some(user_id) = session.user_id.as_deref() else {
        return step.precondition_failed(&[Requirement::UserId]);
    };

    let response = client.execute(&ApiRequest::get(format!("users/{user_id}/reviews")), None);
    list_outcome(step, &response, "user reviews")
}
