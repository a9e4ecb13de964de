// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve subir.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let project_routes = Router::new()
        .route(
            "/",
            post(handlers::projects::create_project).get(handlers::projects::get_all_projects),
        )
        .route("/my-projects", get(handlers::projects::get_my_projects))
        .route("/assign", post(handlers::projects::assign_user_to_project))
        .route(
            "/{project_id}/stats",
            get(handlers::projects::get_project_stats),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let employee_routes = Router::new()
        .route("/", post(handlers::employees::create_employee))
        .route(
            "/project/{project_id}",
            get(handlers::employees::get_project_employees),
        )
        .route(
            "/{id}",
            put(handlers::employees::update_employee)
                .delete(handlers::employees::delete_employee),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let attendance_routes = Router::new()
        .route("/table", get(handlers::attendance::get_attendance_table))
        .route(
            "/bulk-save",
            post(handlers::attendance::bulk_save_attendance),
        )
        .route(
            "/history",
            get(handlers::attendance::get_attendance_history),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let payroll_routes = Router::new()
        .route("/", get(handlers::payroll::get_payrolls))
        .route("/generate", post(handlers::payroll::generate_payroll))
        .route("/export", get(handlers::payroll::export_payroll))
        .route(
            "/employee/{employee_id}",
            get(handlers::payroll::get_employee_payroll_history),
        )
        .route(
            "/period/{period_start}/{period_end}",
            get(handlers::payroll::get_payroll_by_period),
        )
        .route("/{id}/mark-paid", put(handlers::payroll::mark_payroll_paid))
        .route("/{id}/cancel", put(handlers::payroll::cancel_payroll))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let inventory_routes = Router::new()
        .route(
            "/",
            post(handlers::inventory::create_inventory_item)
                .get(handlers::inventory::get_project_inventory),
        )
        .route(
            "/expenses",
            post(handlers::inventory::create_expense)
                .get(handlers::inventory::get_project_expenses),
        )
        .route(
            "/{id}",
            put(handlers::inventory::update_inventory_item)
                .delete(handlers::inventory::delete_inventory_item),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let enquiry_routes = Router::new()
        .route(
            "/",
            post(handlers::enquiries::create_enquiry)
                .get(handlers::enquiries::get_user_enquiries),
        )
        .route(
            "/pending-count",
            get(handlers::enquiries::get_pending_count),
        )
        .route("/{id}", get(handlers::enquiries::get_enquiry_by_id))
        .route(
            "/{id}/respond",
            put(handlers::enquiries::respond_to_enquiry),
        )
        .route(
            "/{id}/status",
            put(handlers::enquiries::update_enquiry_status),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let notification_routes = Router::new()
        .route("/", get(handlers::notifications::get_notifications))
        .route(
            "/unread-count",
            get(handlers::notifications::get_unread_count),
        )
        .route(
            "/read-all",
            put(handlers::notifications::mark_all_notifications_read),
        )
        .route(
            "/{id}/read",
            put(handlers::notifications::mark_notification_read),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let report_routes = Router::new()
        .route("/payroll", get(handlers::reports::payroll_report))
        .route("/inventory", get(handlers::reports::inventory_report))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/stats", get(handlers::dashboard::get_dashboard_stats))
        .route("/audit-logs", get(handlers::dashboard::get_audit_logs))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/projects", project_routes)
        .nest("/api/employees", employee_routes)
        .nest("/api/attendance", attendance_routes)
        .nest("/api/payroll", payroll_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/enquiries", enquiry_routes)
        .nest("/api/notifications", notification_routes)
        .nest("/api/reports", report_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
