// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "Navega Afuá API", description = "Venda de passagens e gestão de embarques"),
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::update_profile,
        handlers::auth::change_password,

        // --- Admin ---
        handlers::admin::set_user_active,

        // --- Operador ---
        handlers::inventory::create_voyage,
        handlers::inventory::get_voyage,
        handlers::inventory::update_voyage,
        handlers::inventory::issue_ticket,
        handlers::inventory::update_ticket_status,
        handlers::fleet::create_vessel,
        handlers::fleet::create_route,
        handlers::passengers::create_passenger,
        handlers::passengers::update_passenger,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::Principal,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::UpdateProfilePayload,
            models::auth::ChangePasswordPayload,
            models::auth::SetUserActivePayload,
            models::auth::AuthResponse,
            handlers::auth::MeResponse,
            handlers::auth::ProfileResponse,
            handlers::auth::MessageResponse,

            // --- Inventory ---
            models::inventory::VoyageStatus,
            models::inventory::TicketStatus,
            models::inventory::Voyage,
            models::inventory::Ticket,
            models::inventory::VoyageDetail,
            models::fleet::Vessel,
            models::fleet::Route,
            models::passenger::Passenger,

            // --- Payloads ---
            handlers::inventory::CreateVoyagePayload,
            handlers::inventory::UpdateVoyagePayload,
            handlers::inventory::IssueTicketPayload,
            handlers::inventory::UpdateTicketStatusPayload,
            handlers::inventory::TicketStatusResponse,
            handlers::fleet::CreateVesselPayload,
            handlers::fleet::CreateRoutePayload,
            handlers::passengers::CreatePassengerPayload,
            handlers::passengers::UpdatePassengerPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Admin", description = "Controle de acesso dos usuários"),
        (name = "Operador", description = "Embarques, passagens, frota e passageiros")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
