//! Review create, read, update and delete

use super::fixtures::{review_body, review_update_body, REVIEW_CATEGORY, UPDATED_REVIEW_TITLE};
use super::{response_detail, Step};
use crate::client::{ApiClient, ApiRequest, ApiResponse};
use crate::outcome::Outcome;
use crate::session::{id_from_value, Requirement, Session};

pub(super) fn create(client: &ApiClient, session: &mut Session) -> Outcome {
    let name = Step::CreateReview.name();
    let request = ApiRequest::post("reviews").json(review_body()).authorized();
    let response = client.execute(&request, session.token());

    match response
        .field("id")
        .and_then(id_from_value)
        .filter(|_| response.success)
    {
        Some(review_id) => {
            let detail = format!("- Review ID: {review_id}");
            session.review_id = Some(review_id);
            Outcome::passed(name, detail)
        }
        None => Outcome::failed(name, response_detail(&response)),
    }
}

pub(super) fn list(client: &ApiClient) -> Outcome {
    let response = client.execute(&ApiRequest::get("reviews"), None);
    list_outcome(Step::ListReviews, &response, "reviews")
}

pub(super) fn list_by_category(client: &ApiClient) -> Outcome {
    let endpoint = format!("reviews?category={REVIEW_CATEGORY}");
    let response = client.execute(&ApiRequest::get(endpoint), None);
    list_outcome(
        Step::ReviewsByCategory,
        &response,
        &format!("{REVIEW_CATEGORY} reviews"),
    )
}

pub(super) fn get(client: &ApiClient, session: &Session) -> Outcome {
    let step = Step::SingleReview;
    let Some(review_id) = session.review_id.as_deref() else {
        return step.precondition_failed(&[Requirement::ReviewId]);
    };

    let response = client.execute(&ApiRequest::get(format!("reviews/{review_id}")), None);

    match (response.success, response.has_field("id"), response.field("title")) {
        (true, true, Some(title)) => Outcome::passed(
            step.name(),
            format!("- Title: {}", title.as_str().unwrap_or_default()),
        ),
        _ => Outcome::failed(step.name(), response_detail(&response)),
    }
}

/// Submit a new title and require the backend to echo it back unchanged
pub(super) fn update(client: &ApiClient, session: &Session) -> Outcome {
    let step = Step::UpdateReview;
    let Some(review_id) = session.review_id.as_deref() else {
        return step.precondition_failed(&[Requirement::ReviewId]);
    };

    let request = ApiRequest::put(format!("reviews/{review_id}"))
        .json(review_update_body())
        .authorized();
    let response = client.execute(&request, session.token());

    if response.success && response.str_field("title") == Some(UPDATED_REVIEW_TITLE) {
        Outcome::passed(step.name(), "- Review updated successfully")
    } else {
        Outcome::failed(step.name(), response_detail(&response))
    }
}

/// Best-effort cleanup of the review created earlier in the run
pub(super) fn delete(client: &ApiClient, session: &Session) -> Outcome {
    let step = Step::DeleteReview;
    let Some(review_id) = session.review_id.as_deref() else {
        return step.precondition_failed(&[Requirement::ReviewId]);
    };

    let request = ApiRequest::delete(format!("reviews/{review_id}")).authorized();
    let response = client.execute(&request, session.token());

    if response.success && response.has_field("message") {
        Outcome::passed(step.name(), "- Review deleted successfully")
    } else {
        Outcome::failed(step.name(), response_detail(&response))
    }
}

/// Shared check for endpoints that must answer with a JSON array
pub(super) fn list_outcome(step: Step, response: &ApiResponse, noun: &str) -> Outcome {
    match response.list_len().filter(|_| response.success) {
        Some(count) => Outcome::passed(step.name(), format!("- Found {count} {noun}")),
        None => Outcome::failed(step.name(), response_detail(response)),
    }
}
