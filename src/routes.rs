// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn create_router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Conta do próprio usuário (qualquer papel autenticado)
    let account_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/profile", put(handlers::auth::update_profile))
        .route("/password", put(handlers::auth::change_password))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Painel do operador: cada handler exige no mínimo OPERADOR
    let operador_routes = Router::new()
        .route("/embarques", post(handlers::inventory::create_voyage))
        .route(
            "/embarques/{id}",
            get(handlers::inventory::get_voyage).put(handlers::inventory::update_voyage),
        )
        .route("/passagens", post(handlers::inventory::issue_ticket))
        .route(
            "/passagens/{id}/status",
            put(handlers::inventory::update_ticket_status),
        )
        .route("/embarcacoes", post(handlers::fleet::create_vessel))
        .route("/rotas", post(handlers::fleet::create_route))
        .route("/passageiros", post(handlers::passengers::create_passenger))
        .route("/passageiros/{id}", put(handlers::passengers::update_passenger))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let admin_routes = Router::new()
        .route("/users/{id}/active", put(handlers::admin::set_user_active))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/", get(|| async { "🚢 API Navega Afuá" }))
        .route("/api/health", get(health))
        .route("/api/docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/auth", auth_routes.merge(account_routes))
        .nest("/api/operador", operador_routes)
        .nest("/api/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::TEST_BCRYPT_COST,
        db::{memory::MemoryStore, UserStore},
        models::auth::{NewUser, Role},
    };

    const SECRET: &str = "segredo-de-teste";

    fn app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let app = create_router(AppState::in_memory(store.clone(), SECRET));
        (app, store)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    // Cria o usuário direto no store e faz login pela API.
    async fn login_as(app: &Router, store: &MemoryStore, role: Role) -> String {
        let email = format!("{}@navega.com", role.as_str().to_lowercase());
        store
            .create_user(NewUser {
                name: format!("Usuário {}", role),
                email: email.clone(),
                password_hash: bcrypt::hash("senha123", TEST_BCRYPT_COST).unwrap(),
                phone: None,
                role,
            })
            .await
            .unwrap();

        let (status, body) = send(
            app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": "senha123" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_owned()
    }

    // Embarcação de 1 lugar, rota, embarque e passageiro. Retorna (embarque, passageiro).
    async fn single_seat_voyage(app: &Router, token: &str) -> (String, String) {
        let (status, vessel) = send(
            app,
            Method::POST,
            "/api/operador/embarcacoes",
            Some(token),
            Some(json!({ "name": "Lancha Afuá", "capacity": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, route) = send(
            app,
            Method::POST,
            "/api/operador/rotas",
            Some(token),
            Some(json!({ "origin": "Macapá", "destination": "Afuá", "duration": "8h" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, voyage) = send(
            app,
            Method::POST,
            "/api/operador/embarques",
            Some(token),
            Some(json!({
                "vesselId": vessel["id"],
                "routeId": route["id"],
                "departureAt": "2026-12-01T08:00:00Z",
                "price": 45.0,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(voyage["totalSeats"], 1);
        assert_eq!(voyage["seatsAvailable"], 1);

        let (status, passenger) = send(
            app,
            Method::POST,
            "/api/operador/passageiros",
            Some(token),
            Some(json!({ "name": "João da Silva", "taxId": "123.456.789-00" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        (
            voyage["id"].as_str().unwrap().to_owned(),
            passenger["id"].as_str().unwrap().to_owned(),
        )
    }

    async fn seats_available(app: &Router, token: &str, voyage_id: &str) -> i64 {
        let (status, body) = send(
            app,
            Method::GET,
            &format!("/api/operador/embarques/{}", voyage_id),
            Some(token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["seatsAvailable"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn health_and_banner_are_public() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = send(&app, Method::GET, "/api/docs/openapi.json", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/operador/passagens"].is_object());
    }

    #[tokio::test]
    async fn operator_endpoint_without_token_is_401() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/operador/passagens",
            None,
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Token não fornecido");

        let (status, _) = send(&app, Method::GET, "/api/auth/me", Some("lixo"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn cliente_on_operator_endpoint_is_403() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "name": "Ana", "email": "ana@navega.com", "password": "senha123" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["role"], "CLIENTE");
        let token = body["token"].as_str().unwrap().to_owned();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/operador/rotas",
            Some(&token),
            Some(json!({ "origin": "Macapá", "destination": "Afuá" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Acesso negado");
        assert_eq!(body["message"], "Requer nível mínimo: OPERADOR");
    }

    #[tokio::test]
    async fn single_seat_issue_cancel_scenario() {
        let (app, store) = app();
        let token = login_as(&app, &store, Role::Operador).await;
        let (voyage_id, passenger_id) = single_seat_voyage(&app, &token).await;
        let issue = json!({ "voyageId": voyage_id, "passengerId": passenger_id });

        let (status, t1) = send(&app, Method::POST, "/api/operador/passagens", Some(&token), Some(issue.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(t1["status"], "CONFIRMED");
        assert_eq!(t1["paymentMethod"], "PIX");
        assert_eq!(t1["amountPaid"], 45.0);
        assert_eq!(seats_available(&app, &token, &voyage_id).await, 0);

        let (status, body) = send(&app, Method::POST, "/api/operador/passagens", Some(&token), Some(issue)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Não há assentos disponíveis");
        assert_eq!(seats_available(&app, &token, &voyage_id).await, 0);

        let cancel_uri = format!("/api/operador/passagens/{}/status", t1["id"].as_str().unwrap());
        let (status, body) = send(&app, Method::PUT, &cancel_uri, Some(&token), Some(json!({ "status": "CANCELLED" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Status atualizado");
        assert_eq!(body["ticket"]["status"], "CANCELLED");
        assert_eq!(seats_available(&app, &token, &voyage_id).await, 1);

        // Recancelar (inclusive pelo nome em português) não devolve outro assento.
        let (status, _) = send(&app, Method::PUT, &cancel_uri, Some(&token), Some(json!({ "status": "CANCELADA" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(seats_available(&app, &token, &voyage_id).await, 1);
    }

    #[tokio::test]
    async fn ticket_status_errors() {
        let (app, store) = app();
        let token = login_as(&app, &store, Role::Admin).await;
        let (voyage_id, passenger_id) = single_seat_voyage(&app, &token).await;

        let (_, ticket) = send(
            &app,
            Method::POST,
            "/api/operador/passagens",
            Some(&token),
            Some(json!({ "voyageId": voyage_id, "passengerId": passenger_id, "paymentMethod": "DINHEIRO" })),
        )
        .await;
        assert_eq!(ticket["paymentMethod"], "DINHEIRO");

        let uri = format!("/api/operador/passagens/{}/status", ticket["id"].as_str().unwrap());
        let (status, body) = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "status": "REEMBOLSADA" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Status inválido");

        let unknown = format!("/api/operador/passagens/{}/status", uuid::Uuid::new_v4());
        let (status, _) = send(&app, Method::PUT, &unknown, Some(&token), Some(json!({ "status": "USED" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/operador/passagens",
            Some(&token),
            Some(json!({ "voyageId": uuid::Uuid::new_v4(), "passengerId": passenger_id })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_status_payloads_are_400_json() {
        let (app, store) = app();
        let token = login_as(&app, &store, Role::Operador).await;
        let (voyage_id, passenger_id) = single_seat_voyage(&app, &token).await;
        let (_, ticket) = send(
            &app,
            Method::POST,
            "/api/operador/passagens",
            Some(&token),
            Some(json!({ "voyageId": voyage_id, "passengerId": passenger_id })),
        )
        .await;
        let uri = format!("/api/operador/passagens/{}/status", ticket["id"].as_str().unwrap());

        for body in [json!({}), json!({ "status": 5 }), json!({ "status": null })] {
            let (status, response) = send(&app, Method::PUT, &uri, Some(&token), Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response["error"], "Status inválido");
        }
        // Nada mudou: a passagem segue ocupando o assento.
        assert_eq!(seats_available(&app, &token, &voyage_id).await, 0);

        let request = Request::builder()
            .method(Method::PUT)
            .uri(&uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("isto não é json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("Corpo da requisição inválido"));

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/operador/passagens/nao-e-uuid/status",
            Some(&token),
            Some(json!({ "status": "CANCELLED" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Parâmetro de rota inválido"));
    }

    #[tokio::test]
    async fn duplicate_tax_id_is_409() {
        let (app, store) = app();
        let token = login_as(&app, &store, Role::Operador).await;
        let passenger = json!({ "name": "Maria", "taxId": "987.654.321-00" });

        let (status, _) = send(&app, Method::POST, "/api/operador/passageiros", Some(&token), Some(passenger.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = send(&app, Method::POST, "/api/operador/passageiros", Some(&token), Some(passenger)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "CPF já cadastrado");

        let (status, body) = send(&app, Method::POST, "/api/operador/passageiros", Some(&token), Some(json!({ "name": "", "taxId": "1" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["name"].is_array());
    }

    #[tokio::test]
    async fn admin_deactivation_revokes_existing_tokens() {
        let (app, store) = app();
        let admin = login_as(&app, &store, Role::Admin).await;
        let operador = login_as(&app, &store, Role::Operador).await;

        let (status, me) = send(&app, Method::GET, "/api/auth/me", Some(&operador), None).await;
        assert_eq!(status, StatusCode::OK);
        let operador_id = me["user"]["id"].as_str().unwrap().to_owned();
        let uri = format!("/api/admin/users/{}/active", operador_id);

        // OPERADOR não passa no papel exato ADMIN.
        let (status, _) = send(&app, Method::PUT, &uri, Some(&operador), Some(json!({ "active": false }))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, Method::PUT, &uri, Some(&admin), Some(json!({ "active": false }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["isActive"], false);

        let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&operador), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Usuário não encontrado ou inativo");
    }
}
