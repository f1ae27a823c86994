use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::core::{MatchError, Matcher};
use crate::models::{
    BatchMatchRequest, BatchMatchResponse, CompatibilityQuery, ErrorResponse, HealthResponse,
    LimitQuery, MatchListResponse, SearchModelsRequest, UpdateWeightsRequest, WeightsResponse,
};
use crate::services::PostgresClient;
use std::sync::Arc;

/// Header carrying the authenticated caller id, set by the gateway
pub const CALLER_ID_HEADER: &str = "X-User-Id";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub postgres: Option<Arc<PostgresClient>>,
    pub max_limit: u16,
}

/// Configure all matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matching/search", web::post().to(search_models))
        .route("/matching/castings/{casting_id}/models", web::get().to(models_for_casting))
        .route("/matching/models/{model_id}/similar", web::get().to(similar_models))
        .route("/matching/compatibility", web::get().to(compatibility))
        .route("/matching/batch", web::post().to(batch_match))
        .service(
            web::resource("/matching/weights")
                .route(web::get().to(get_weights))
                .route(web::put().to(update_weights)),
        )
        .route("/matching/stats", web::get().to(platform_stats));
}

fn error_response(err: &MatchError) -> HttpResponse {
    let (status, error) = match err {
        MatchError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        MatchError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "invalid_argument"),
        MatchError::PermissionDenied(_) => (StatusCode::FORBIDDEN, "permission_denied"),
        MatchError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        MatchError::Unimplemented(_) => (StatusCode::NOT_IMPLEMENTED, "unimplemented"),
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Matching request failed: {}", err);
    }

    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = match &state.postgres {
        Some(pg) => pg.health_check().await.unwrap_or(false),
        None => true,
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank models by explicit filters
///
/// POST /api/v1/matching/search
///
/// Request body:
/// ```json
/// {
///   "filters": { "city": "Almaty", "categories": ["fashion"], "heightMin": 170, "heightMax": 185 },
///   "limit": 20,
///   "minScore": 40
/// }
/// ```
async fn search_models(
    state: web::Data<AppState>,
    req: web::Json<SearchModelsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let limit = req.limit.min(state.max_limit) as usize;

    match state.matcher.find_models_by_filters(&req.filters, limit, req.min_score).await {
        Ok(matches) => {
            tracing::info!("Search returned {} models", matches.len());
            HttpResponse::Ok().json(MatchListResponse {
                total_results: matches.len(),
                matches,
            })
        }
        Err(e) => error_response(&e),
    }
}

/// GET /api/v1/matching/castings/{casting_id}/models?limit=20
async fn models_for_casting(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let casting_id = path.into_inner();
    let limit = query.limit.min(state.max_limit) as usize;

    match state.matcher.find_models_for_casting_id(&casting_id, limit).await {
        Ok(matches) => HttpResponse::Ok().json(MatchListResponse {
            total_results: matches.len(),
            matches,
        }),
        Err(e) => error_response(&e),
    }
}

/// GET /api/v1/matching/models/{model_id}/similar?limit=10
async fn similar_models(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let model_id = path.into_inner();
    let limit = query.limit.min(state.max_limit) as usize;

    match state.matcher.find_similar_models(&model_id, limit).await {
        Ok(matches) => HttpResponse::Ok().json(MatchListResponse {
            total_results: matches.len(),
            matches,
        }),
        Err(e) => error_response(&e),
    }
}

/// GET /api/v1/matching/compatibility?modelId={id}&castingId={id}
async fn compatibility(
    state: web::Data<AppState>,
    query: web::Query<CompatibilityQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    match state.matcher.compatibility(&query.model_id, &query.casting_id).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => error_response(&e),
    }
}

/// POST /api/v1/matching/batch
///
/// Request body:
/// ```json
/// { "castingIds": ["c1", "c2"], "limit": 10 }
/// ```
async fn batch_match(
    state: web::Data<AppState>,
    req: web::Json<BatchMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let limit = req.limit.min(state.max_limit) as usize;
    let results = state.matcher.batch_match(&req.casting_ids, limit).await;

    tracing::info!("Batch matched {} castings", results.len());

    HttpResponse::Ok().json(BatchMatchResponse { results })
}

/// GET /api/v1/matching/weights
async fn get_weights(state: web::Data<AppState>) -> impl Responder {
    let manager = state.matcher.weight_manager();
    HttpResponse::Ok().json(WeightsResponse {
        weights: manager.weights(),
        state: manager.state(),
    })
}

/// PUT /api/v1/matching/weights
///
/// Only administrators may call this; the caller is taken from `X-User-Id`.
async fn update_weights(
    state: web::Data<AppState>,
    req: web::Json<UpdateWeightsRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let caller_id = http_req
        .headers()
        .get(CALLER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let manager = state.matcher.weight_manager();
    match manager.update_weights(caller_id, req.weights) {
        Ok(()) => HttpResponse::Ok().json(WeightsResponse {
            weights: manager.weights(),
            state: manager.state(),
        }),
        Err(e) => error_response(&e),
    }
}

/// GET /api/v1/matching/stats
async fn platform_stats(state: web::Data<AppState>) -> impl Responder {
    match state.matcher.platform_stats().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}
