//! Friendship API handlers.
//!
//! ```text
//! POST /v1/friends/add {"friendEmail":"grace@example.com"}
//! GET /v1/friends?maxDegree=2
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Degree, DegreeValidationError, EmailAddress, Error, FriendNetworkEntry, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /v1/friends/add`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFriendRequest {
    /// Email of the account to befriend.
    pub friend_email: String,
}

/// Query parameters for `GET /v1/friends`.
#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FriendsQuery {
    /// Traversal bound in hops; defaults to 3 when omitted.
    pub max_degree: Option<u32>,
}

/// One reachable friend, labelled with its separation degree.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FriendEntry {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Ordinal degree label such as `"1st"` or `"2nd"`.
    pub degree: String,
}

impl From<FriendNetworkEntry> for FriendEntry {
    fn from(entry: FriendNetworkEntry) -> Self {
        let degree = entry.degree().label();
        let user = entry.into_user();
        Self {
            name: user.name().to_string(),
            email: user.email().to_string(),
            degree,
        }
    }
}

fn map_email_validation_error(err: UserValidationError) -> Error {
    let code = match &err {
        UserValidationError::EmptyEmail => "empty_email",
        UserValidationError::EmailTooLong { .. } => "email_too_long",
        _ => "invalid_email",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "friendEmail", "code": code }))
}

fn map_degree_validation_error(err: DegreeValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "maxDegree", "code": "zero_hops" }))
}

/// Record a directed friendship from the caller to another account.
#[utoipa::path(
    post,
    path = "/v1/friends/add",
    request_body = AddFriendRequest,
    responses(
        (status = 200, description = "Friendship recorded"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No account with that email", body = Error),
        (status = 409, description = "Friendship already recorded", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["friends"],
    operation_id = "add_friend"
)]
#[post("/friends/add")]
pub async fn add_friend(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddFriendRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let email = EmailAddress::try_from(payload.into_inner().friend_email)
        .map_err(map_email_validation_error)?;
    state.friendships.add_friend(user_id, &email).await?;
    Ok(HttpResponse::Ok().finish())
}

/// List the caller's friend network out to `maxDegree` hops.
#[utoipa::path(
    get,
    path = "/v1/friends",
    params(FriendsQuery),
    responses(
        (status = 200, description = "Friend network, nearest degrees first", body = [FriendEntry]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["friends"],
    operation_id = "friends"
)]
#[get("/friends")]
pub async fn friends(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<FriendsQuery>,
) -> ApiResult<web::Json<Vec<FriendEntry>>> {
    let user_id = session.require_user_id()?;
    let max_degree = match query.into_inner().max_degree {
        Some(hops) => Degree::new(hops).map_err(map_degree_validation_error)?,
        None => Degree::DEFAULT_MAX,
    };
    let network = state.network.explore(user_id, max_degree).await?;
    Ok(web::Json(network.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::InMemorySocialGraph;
    use crate::domain::{AccountService, FriendNetworkService, FriendshipService, UserId};
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;
    use std::sync::Arc;

    fn state(repo: Arc<InMemorySocialGraph>) -> HttpState {
        HttpState::new(
            Arc::new(AccountService::new(Arc::clone(&repo))),
            Arc::new(FriendshipService::new(Arc::clone(&repo))),
            Arc::new(FriendNetworkService::new(repo)),
        )
    }

    async fn test_app(
        repo: Arc<InMemorySocialGraph>,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new().app_data(web::Data::new(state(repo))).service(
                web::scope("/v1")
                    .wrap(test_session_middleware())
                    .service(crate::inbound::http::accounts::register)
                    .service(add_friend)
                    .service(friends),
            ),
        )
        .await
    }

    async fn register(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        name: &str,
        email: &str,
    ) -> Cookie<'static> {
        let res = test::call_service(
            app,
            test::TestRequest::post()
                .uri("/v1/auth/register")
                .set_json(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": "hunter2",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn friend_network_is_labelled_by_degree() {
        let repo = Arc::new(InMemorySocialGraph::default());
        let app = test_app(Arc::clone(&repo)).await;
        let ada = register(&app, "Ada", "ada@example.com").await;
        register(&app, "Grace", "grace@example.com").await;
        let edsger = repo.seed_user("Edsger", "edsger@example.com");

        let add = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/v1/friends/add")
                .cookie(ada.clone())
                .set_json(serde_json::json!({ "friendEmail": "grace@example.com" }))
                .to_request(),
        )
        .await;
        assert_eq!(add.status(), StatusCode::OK);
        repo.seed_edge(UserId::new(2), edsger.id());

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/v1/friends")
                .cookie(ada)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            serde_json::json!([
                { "name": "Grace", "email": "grace@example.com", "degree": "1st" },
                { "name": "Edsger", "email": "edsger@example.com", "degree": "2nd" },
            ])
        );
    }

    #[actix_web::test]
    async fn max_degree_bounds_the_traversal() {
        let repo = Arc::new(InMemorySocialGraph::default());
        let app = test_app(Arc::clone(&repo)).await;
        let ada = register(&app, "Ada", "ada@example.com").await;
        let grace = repo.seed_user("Grace", "grace@example.com");
        let edsger = repo.seed_user("Edsger", "edsger@example.com");
        repo.seed_edge(UserId::new(1), grace.id());
        repo.seed_edge(grace.id(), edsger.id());

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/v1/friends?maxDegree=1")
                .cookie(ada)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            serde_json::json!([
                { "name": "Grace", "email": "grace@example.com", "degree": "1st" },
            ])
        );
    }

    #[actix_web::test]
    async fn zero_max_degree_is_400() {
        let repo = Arc::new(InMemorySocialGraph::default());
        let app = test_app(repo).await;
        let ada = register(&app, "Ada", "ada@example.com").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/v1/friends?maxDegree=0")
                .cookie(ada)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "maxDegree");
    }

    #[actix_web::test]
    async fn adding_an_unknown_email_is_404() {
        let repo = Arc::new(InMemorySocialGraph::default());
        let app = test_app(repo).await;
        let ada = register(&app, "Ada", "ada@example.com").await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/v1/friends/add")
                .cookie(ada)
                .set_json(serde_json::json!({ "friendEmail": "nobody@example.com" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn repeated_friendship_is_409() {
        let repo = Arc::new(InMemorySocialGraph::default());
        let app = test_app(Arc::clone(&repo)).await;
        let ada = register(&app, "Ada", "ada@example.com").await;
        repo.seed_user("Grace", "grace@example.com");
        let payload = serde_json::json!({ "friendEmail": "grace@example.com" });

        let first = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/v1/friends/add")
                .cookie(ada.clone())
                .set_json(&payload)
                .to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/v1/friends/add")
                .cookie(ada)
                .set_json(&payload)
                .to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn friends_without_session_is_401() {
        let app = test_app(Arc::new(InMemorySocialGraph::default())).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/v1/friends").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
