//! AWS Lambda HTTP handler: POST a scenario as JSON, receive the period report

use lambda_http::http::{Method, StatusCode};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};
use serde::Deserialize;

use rentobuy::{PeriodReport, ProjectionConfig, ProjectionEngine, ScenarioConfig};

/// Request body: a scenario plus an optional `horizon_months`
#[derive(Debug, Deserialize)]
struct ProjectRequest {
    #[serde(flatten)]
    scenario: ScenarioConfig,
    #[serde(flatten)]
    config: ProjectionConfig,
}

fn build_report(body: &[u8]) -> Result<PeriodReport, String> {
    let request: ProjectRequest =
        serde_json::from_slice(body).map_err(|e| format!("invalid request: {}", e))?;

    let engine = ProjectionEngine::new(request.config);
    let projection = engine
        .project(&request.scenario)
        .map_err(|e| e.to_string())?;

    Ok(PeriodReport::build(&projection))
}

fn json_response(status: StatusCode, body: String) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body))?)
}

async fn function_handler(event: Request) -> Result<Response<Body>, Error> {
    if event.method() != Method::POST {
        return json_response(
            StatusCode::METHOD_NOT_ALLOWED,
            serde_json::json!({ "error": "use POST" }).to_string(),
        );
    }

    match build_report(event.body()) {
        Ok(report) => {
            info!("Projected {} over {} months", report.scenario, report.horizon_months);
            json_response(StatusCode::OK, serde_json::to_string(&report)?)
        }
        Err(message) => {
            warn!("Rejected request: {}", message);
            json_response(
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": message }).to_string(),
            )
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(function_handler)).await
}
