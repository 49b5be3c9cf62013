use axum::{
    Router,
    middleware,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{auth, expenses};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub credentials: Arc<dyn auth::Credentials>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/expenses", post(expenses::create).get(expenses::list))
        .route("/expenses/{id}", get(expenses::get).put(expenses::update))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require,
        ))
        .with_state(state)
}

pub async fn run(engine: Engine, credentials: impl auth::Credentials + 'static) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, credentials, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    credentials: impl auth::Credentials + 'static,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        credentials: Arc::new(credentials),
    };

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

pub fn spawn_with_listener(
    engine: Engine,
    credentials: impl auth::Credentials + 'static,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, credentials, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

/// Resolves on SIGINT or SIGTERM so in-flight requests drain before the
/// listener closes.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install SIGINT handler: {err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!("failed to install SIGTERM handler: {err}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SharedSecret;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use sea_orm::Database;
    use tower::ServiceExt;

    const SECRET: &str = "November 10, 2009";

    async fn test_router() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        let engine = Engine::builder().database(db).build().await.unwrap();

        router(ServerState {
            engine: Arc::new(engine),
            credentials: Arc::new(SharedSecret::new(SECRET)),
        })
    }

    fn request(method: &str, uri: &str, body: Option<&str>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, SECRET);

        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn create_returns_201_with_the_assigned_id() {
        let app = test_router().await;

        let response = app
            .oneshot(request(
                "POST",
                "/expenses",
                Some(r#"{"title":"smoothie","amount":79,"note":"abcd","tags":["food","beverage"]}"#),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_string(response).await,
            r#"{"id":1,"title":"smoothie","amount":79,"note":"abcd","tags":["food","beverage"]}"#
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_400() {
        let app = test_router().await;

        let response = app
            .oneshot(request(
                "POST",
                "/expenses",
                Some(r#"{"title":"smoothie","amount":"79","note":"abcd","tags":[]}"#),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn reading_a_missing_id_is_a_404() {
        let app = test_router().await;

        let response = app
            .oneshot(request("GET", "/expenses/42", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn an_empty_table_lists_as_an_empty_array() {
        let app = test_router().await;

        let response = app.oneshot(request("GET", "/expenses", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "[]");
    }

    #[tokio::test]
    async fn created_expenses_can_be_read_back() {
        let app = test_router().await;

        let created = app
            .clone()
            .oneshot(request(
                "POST",
                "/expenses",
                Some(r#"{"title":"latte","amount":88,"note":"morning","tags":["coffee","drink"]}"#),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let response = app.oneshot(request("GET", "/expenses/1", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response).await,
            r#"{"id":1,"title":"latte","amount":88,"note":"morning","tags":["coffee","drink"]}"#
        );
    }

    #[tokio::test]
    async fn update_replaces_every_field_but_the_id() {
        let app = test_router().await;

        app.clone()
            .oneshot(request(
                "POST",
                "/expenses",
                Some(r#"{"title":"smoothie","amount":79,"note":"abcd","tags":["food","beverage"]}"#),
            ))
            .await
            .unwrap();

        let updated = app
            .clone()
            .oneshot(request(
                "PUT",
                "/expenses/1",
                Some(r#"{"title":"iced latte","amount":120,"note":"upsized","tags":["coffee"]}"#),
            ))
            .await
            .unwrap();

        assert_eq!(updated.status(), StatusCode::OK);
        assert_eq!(
            body_string(updated).await,
            r#"{"id":1,"title":"iced latte","amount":120,"note":"upsized","tags":["coffee"]}"#
        );

        let fetched = app.oneshot(request("GET", "/expenses/1", None)).await.unwrap();
        assert_eq!(
            body_string(fetched).await,
            r#"{"id":1,"title":"iced latte","amount":120,"note":"upsized","tags":["coffee"]}"#
        );
    }

    #[tokio::test]
    async fn updating_a_missing_id_is_a_404() {
        let app = test_router().await;

        let response = app
            .oneshot(request(
                "PUT",
                "/expenses/9",
                Some(r#"{"title":"x","amount":1,"note":"","tags":[]}"#),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn requests_without_the_secret_never_reach_persistence() {
        let app = test_router().await;

        // No Authorization header at all.
        let rejected = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/expenses")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"title":"smoothie","amount":79,"note":"abcd","tags":[]}"#.to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(rejected).await, r#"{"error":"invalid key value"}"#);

        // The rejected create must not have inserted a row.
        let listed = app.oneshot(request("GET", "/expenses", None)).await.unwrap();
        assert_eq!(body_string(listed).await, "[]");
    }

    #[tokio::test]
    async fn a_wrong_secret_is_rejected() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/expenses")
                    .header(header::AUTHORIZATION, "November 11, 2009")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
