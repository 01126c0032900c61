use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    accounts::{
        dto::{CreateRequest, CreateResponse, GetResponse, UpdateRequest},
        error::AccountError,
    },
    state::AppState,
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(create))
        .route(
            "/accounts/:id",
            get(get_account).patch(update).delete(delete),
        )
}

#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateRequest>,
) -> Result<Json<CreateResponse>, (StatusCode, String)> {
    if let Err(e) = validate_create(&payload) {
        warn!(name = %payload.name, email = %payload.email, error = %e, "create rejected");
        return Err(rejection(e));
    }

    match state
        .accounts
        .create_account(&payload.name, &payload.email, &payload.password, payload.role)
        .await
    {
        Ok(resp) => {
            info!(id = resp.id, name = %payload.name, email = %payload.email, "account created");
            Ok(Json(resp))
        }
        Err(e) => {
            error!(name = %payload.name, email = %payload.email, error = %e, "create account failed");
            Err(rejection(e))
        }
    }
}

#[instrument(skip(state))]
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<GetResponse>, (StatusCode, String)> {
    check_id(id).map_err(rejection)?;

    match state.accounts.get_account(id).await {
        Ok(resp) => {
            info!(id, "account fetched");
            Ok(Json(resp))
        }
        Err(e) => {
            error!(id, error = %e, "get account failed");
            Err(rejection(e))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    check_id(id).map_err(rejection)?;
    info!(
        id,
        name = ?payload.name,
        email = ?payload.email,
        role = ?payload.role,
        "update account"
    );
    state.accounts.update_account(id).await.map_err(rejection)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    check_id(id).map_err(rejection)?;
    info!(id, "delete account");
    state.accounts.delete_account(id).await.map_err(rejection)?;
    Ok(StatusCode::NO_CONTENT)
}

fn validate_create(req: &CreateRequest) -> Result<(), AccountError> {
    if req.name.is_empty() {
        return Err(AccountError::Validation("name is required".into()));
    }
    if req.email.is_empty() {
        return Err(AccountError::Validation("email is required".into()));
    }
    if let Some(confirm) = &req.password_confirm {
        if confirm.as_bytes() != req.password.as_bytes() {
            return Err(AccountError::Validation(
                "password and password_confirm do not match".into(),
            ));
        }
    }
    Ok(())
}

fn check_id(id: i64) -> Result<(), AccountError> {
    if id <= 0 {
        return Err(AccountError::Validation("id must be positive".into()));
    }
    Ok(())
}

fn rejection(e: AccountError) -> (StatusCode, String) {
    let status = match &e {
        AccountError::Validation(_) => StatusCode::BAD_REQUEST,
        AccountError::NotFound(_) => StatusCode::NOT_FOUND,
        AccountError::Conflict(_) => StatusCode::CONFLICT,
        AccountError::Hashing(_)
        | AccountError::QueryBuild(_)
        | AccountError::Storage(_)
        | AccountError::UnknownRole(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::store::memory::MemoryStore;
    use crate::app::build_app;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_store(store.clone());
        (build_app(state), store)
    }

    fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_then_get_over_http() {
        let (app, _) = app();
        let res = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/v1/accounts",
                r#"{"name":"Ada","email":"ada@x.io","password":"s3cret","password_confirm":"s3cret","role":"User"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["id"], 1);

        let res = app
            .oneshot(empty_request(Method::GET, "/api/v1/accounts/1"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["email"], "ada@x.io");
        assert_eq!(body["role"], "User");
        assert!(body.get("updated_at").is_none());
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn confirmation_mismatch_never_reaches_store() {
        let (app, store) = app();
        let res = app
            .oneshot(json_request(
                Method::POST,
                "/api/v1/accounts",
                r#"{"name":"Ada","email":"ada@x.io","password":"s3cret","password_confirm":"S3cret","role":"Admin"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let (app, store) = app();
        let res = app
            .oneshot(json_request(
                Method::POST,
                "/api/v1/accounts",
                r#"{"name":"","email":"ada@x.io","password":"s3cret","role":"User"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn missing_account_is_404() {
        let (app, _) = app();
        let res = app
            .oneshot(empty_request(Method::GET, "/api/v1/accounts/999999"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_positive_id_is_400() {
        let (app, _) = app();
        let res = app
            .oneshot(empty_request(Method::GET, "/api/v1/accounts/0"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_outage_is_500() {
        let (app, store) = app();
        store.fail_all();
        let res = app
            .oneshot(empty_request(Method::GET, "/api/v1/accounts/1"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn column_mismatch_is_500() {
        let (app, store) = app();
        store.fail_decode();
        let res = app
            .oneshot(empty_request(Method::GET, "/api/v1/accounts/1"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).starts_with("storage error"));
    }

    #[tokio::test]
    async fn update_and_delete_acknowledge() {
        let (app, _) = app();
        let res = app
            .clone()
            .oneshot(json_request(
                Method::PATCH,
                "/api/v1/accounts/1",
                r#"{"name":"Grace"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = app
            .oneshot(empty_request(Method::DELETE, "/api/v1/accounts/1"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            rejection(AccountError::Conflict("dup".into())).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            rejection(AccountError::UnknownRole("x".into())).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            rejection(AccountError::Hashing("x".into())).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
