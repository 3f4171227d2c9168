//! Registration, login rejection and current-user checks

use super::fixtures::{mismatched_login_body, registration_body};
use super::{response_detail, Step};
use crate::client::{ApiClient, ApiRequest};
use crate::outcome::Outcome;
use crate::session::{id_from_value, Session};

/// Status the backend returns for credentials that match no user
const INVALID_CREDENTIALS_STATUS: u16 = 401;

/// Register a fresh user and keep its token and identity for later steps
pub(super) fn register(client: &ApiClient, session: &mut Session) -> Outcome {
    let name = Step::Registration.name();
    let request = ApiRequest::post("auth/register").json(registration_body(&session.run_id));
    let response = client.execute(&request, None);

    if !response.success {
        return Outcome::failed(name, response_detail(&response));
    }

    let token = response.str_field("access_token").map(str::to_string);
    let user = response.field("user");
    let user_id = user.and_then(|u| u.get("id")).and_then(id_from_value);
    let username = user
        .and_then(|u| u.get("username"))
        .and_then(|u| u.as_str())
        .map(str::to_string);

    match (token, user_id, username) {
        (Some(token), Some(user_id), Some(username)) => {
            let detail = format!("- User: {username}");
            session.authenticate(token, user_id, username);
            Outcome::passed(name, detail)
        }
        _ => Outcome::failed(name, response_detail(&response)),
    }
}

/// Exercise the rejection path: an unknown email must be refused with 401.
///
/// This does not prove a successful login; the backend only exposes the
/// registered user's credentials through the registration response.
pub(super) fn login(client: &ApiClient, session: &Session) -> Outcome {
    let name = Step::Login.name();
    let request = ApiRequest::post("auth/login")
        .json(mismatched_login_body(&session.run_id))
        .expect_status(INVALID_CREDENTIALS_STATUS);
    let response = client.execute(&request, None);

    if response.success {
        Outcome::passed(name, "- Login endpoint working (401 for invalid creds)")
    } else {
        Outcome::failed(name, response_detail(&response))
    }
}

/// The token must resolve to the user registration stored
pub(super) fn current_user(client: &ApiClient, session: &Session) -> Outcome {
    let name = Step::CurrentUser.name();
    let response = client.execute(&ApiRequest::get("auth/me").authorized(), session.token());

    let username = response
        .str_field("username")
        .filter(|_| response.success && response.has_field("id"));

    match (username, session.username.as_deref()) {
        (Some(got), Some(registered)) if got != registered => Outcome::failed(
            name,
            format!("- Expected user {registered}, got {got}"),
        ),
        (Some(got), _) => Outcome::passed(name, format!("- User: {got}")),
        (None, _) => Outcome::failed(name, response_detail(&response)),
    }
}
