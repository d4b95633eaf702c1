use crate::error::RegistryError;
use crate::model::{AdminQuery, DeleteForm, LinkForm, SortOrder};
use crate::registry::LinkRegistry;
use crate::utils::{internal_error, normalize_url};
use crate::views::render_admin_page;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;

// Every visit has to reach the server to be counted.
const CACHE_CONTROL_HEADER_VALUE: &str = "no-store";

#[derive(Clone)]
pub struct AppState {
    pub registry: LinkRegistry,
}

type HandlerResult = Result<Response, (StatusCode, String)>;

pub async fn root() -> Redirect {
    Redirect::temporary("/admin")
}

pub async fn admin_page(State(state): State<AppState>, Query(query): Query<AdminQuery>) -> HandlerResult {
    let order = SortOrder::parse(query.order.as_deref());
    render(&state, order, None, StatusCode::OK).await
}

pub async fn create_link(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
    Form(form): Form<LinkForm>,
) -> HandlerResult {
    let order = requested_order(form.order.as_deref(), &query);
    let slug = form.slug.trim();
    let target = match validate(slug, &form.target) {
        Ok(target) => target,
        Err(message) => return render(&state, order, Some(message), StatusCode::BAD_REQUEST).await,
    };
    let result = state.registry.create(slug, &target).await.map(|_| format!("Created {slug} -> {target}"));
    respond(&state, order, result).await
}

pub async fn update_link(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
    Form(form): Form<LinkForm>,
) -> HandlerResult {
    let order = requested_order(form.order.as_deref(), &query);
    let slug = form.slug.trim();
    let target = match validate(slug, &form.target) {
        Ok(target) => target,
        Err(message) => return render(&state, order, Some(message), StatusCode::BAD_REQUEST).await,
    };
    let result = state.registry.update(slug, &target).await.map(|_| format!("Updated {slug}."));
    respond(&state, order, result).await
}

pub async fn delete_link(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
    Form(form): Form<DeleteForm>,
) -> HandlerResult {
    let order = requested_order(form.order.as_deref(), &query);
    let slug = form.slug.trim();
    if slug.is_empty() {
        return render(&state, order, Some("Slug is required.".into()), StatusCode::BAD_REQUEST).await;
    }
    let result = state.registry.delete(slug).await.map(|_| format!("Deleted {slug}."));
    respond(&state, order, result).await
}

pub async fn redirect(State(state): State<AppState>, Path(slug): Path<String>) -> HandlerResult {
    match state.registry.record_hit(&slug).await {
        Ok(url) => Response::builder()
            .status(StatusCode::TEMPORARY_REDIRECT)
            .header(header::LOCATION, url)
            .header(header::CACHE_CONTROL, CACHE_CONTROL_HEADER_VALUE)
            .body(Body::empty())
            .map_err(internal_error),
        Err(RegistryError::NotFound(slug)) => {
            tracing::debug!("Redirect requested for unknown slug {}", slug);
            Ok((StatusCode::NOT_FOUND, format!("No link named '{slug}'.")).into_response())
        }
        Err(err) => Err(internal_error(err)),
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn requested_order(form_order: Option<&str>, query: &AdminQuery) -> SortOrder {
    SortOrder::parse(form_order.or(query.order.as_deref()))
}

fn validate(slug: &str, target: &str) -> Result<String, String> {
    if slug.is_empty() {
        return Err("Slug is required.".into());
    }
    normalize_url(target).ok_or_else(|| "Invalid target URL.".into())
}

async fn respond(state: &AppState, order: SortOrder, result: Result<String, RegistryError>) -> HandlerResult {
    let err = match result {
        Ok(message) => return render(state, order, Some(message), StatusCode::OK).await,
        Err(err) => err,
    };
    let status = match err {
        RegistryError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
        RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
        RegistryError::Store(_) => return Err(internal_error(err)),
    };
    tracing::warn!("{}", err);
    render(state, order, Some(err.to_string()), status).await
}

async fn render(state: &AppState, order: SortOrder, flash: Option<String>, status: StatusCode) -> HandlerResult {
    let listing = state.registry.list(order).await.map_err(internal_error)?;
    Ok((status, Html(render_admin_page(&listing, flash.as_deref(), order))).into_response())
}
