use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Matcher, RankError};
use crate::models::{ErrorResponse, HealthResponse, RankRequest, RankResponse, Requirement};
use crate::services::CandidateStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CandidateStore>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/rank", web::post().to(rank_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank candidates endpoint
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "skills": ["Go", "Go", "SQL"],
///   "intervals": [{"start": "2024-03-04T09:00:00Z", "end": "2024-03-04T11:00:00Z"}]
/// }
/// ```
async fn rank_matches(
    state: web::Data<AppState>,
    req: web::Json<Option<RankRequest>>,
) -> impl Responder {
    let request_id = uuid::Uuid::new_v4().to_string();

    let requirement: Option<Requirement> = match req.into_inner() {
        Some(body) => {
            if let Err(errors) = body.validate() {
                tracing::info!("[{}] Validation failed for rank request: {:?}", request_id, errors);
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Validation failed".to_string(),
                    message: errors.to_string(),
                    status_code: 400,
                });
            }
            Some(body.into())
        }
        None => None,
    };

    if let Some(requirement) = &requirement {
        tracing::info!(
            "[{}] Ranking for {} skills, {} intervals",
            request_id,
            requirement.skills.len(),
            requirement.intervals.len()
        );
    }

    match state
        .matcher
        .rank_with_stats(state.store.as_ref(), requirement.as_ref())
        .await
    {
        Ok(outcome) => {
            tracing::info!(
                "[{}] Returning {} matches (from {} candidates)",
                request_id,
                outcome.matches.len(),
                outcome.total_scanned
            );

            HttpResponse::Ok().json(RankResponse {
                request_id,
                matches: outcome.matches,
                total_scanned: outcome.total_scanned,
                total_admitted: outcome.total_admitted,
            })
        }
        Err(RankError::InvalidArgument(message)) => {
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid argument".to_string(),
                message,
                status_code: 400,
            })
        }
        Err(e @ RankError::Retrieval(_)) => {
            tracing::error!("[{}] Failed to rank candidates: {}", request_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to rank candidates".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateDetail, RankedMatch};
    use crate::services::InMemoryStore;
    use actix_web::{http::StatusCode, test, App};

    fn app_state() -> AppState {
        let store = InMemoryStore::new(vec![
            CandidateDetail {
                id: "e1".to_string(),
                name: "Ada".to_string(),
                skills: vec!["SQL".to_string()],
                availability: vec![],
            },
            CandidateDetail {
                id: "e2".to_string(),
                name: "Grace".to_string(),
                skills: vec!["Go".to_string()],
                availability: vec![],
            },
        ]);

        AppState {
            store: Arc::new(store),
            matcher: Matcher::with_defaults(),
        }
    }

    #[actix_web::test]
    async fn test_rank_endpoint() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/rank")
            .set_json(serde_json::json!({ "skills": ["sql", "SQL"] }))
            .to_request();
        let resp: RankResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.total_scanned, 2);
        assert_eq!(
            resp.matches,
            vec![RankedMatch {
                candidate_id: "e1".to_string(),
                name: "Ada".to_string(),
                skills: vec!["SQL".to_string()],
                availability: vec![],
                score: 20,
            }]
        );
    }

    #[actix_web::test]
    async fn test_null_body_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/rank")
            .insert_header(("content-type", "application/json"))
            .set_payload("null")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.status, "healthy");
    }
}
