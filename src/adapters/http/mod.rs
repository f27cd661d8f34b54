//! HTTP adapter: prediction service client over reqwest.
//!
//! Talks to the service's JSON API:
//! - `POST {base}/predict` with the full patient profile
//! - `GET {base}/` for the status probe

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::domain::{PatientProfile, PredictionResult};
use crate::ports::{PredictionError, Predictor, ServiceStatus};

/// Blocking HTTP client for the prediction service.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    http: Client,
    status_url: Url,
    predict_url: Url,
}

impl HttpPredictor {
    /// Create a client for the configured endpoint.
    ///
    /// Must not be called from inside an async runtime (reqwest's blocking
    /// client owns its own).
    ///
    /// # Errors
    /// Returns error if the TLS backend cannot be initialized.
    pub fn new(config: &ClientConfig) -> crate::Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            status_url: config.api_base().clone(),
            predict_url: config.predict_url().clone(),
        })
    }

    /// Endpoint the profile is posted to.
    #[must_use]
    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }
}

fn transport(err: reqwest::Error) -> PredictionError {
    PredictionError::Transport(err.to_string())
}

/// Check the status, then decode the body as `T`.
fn decode<T: DeserializeOwned>(response: Response) -> Result<T, PredictionError> {
    let status = response.status();
    if !status.is_success() {
        return Err(PredictionError::Status(status.as_u16()));
    }

    let body = response.bytes().map_err(transport)?;
    serde_json::from_slice(&body).map_err(|e| PredictionError::MalformedBody(e.to_string()))
}

impl Predictor for HttpPredictor {
    fn predict(&self, profile: &PatientProfile) -> Result<PredictionResult, PredictionError> {
        tracing::debug!("POST {}", self.predict_url);

        let response = self
            .http
            .post(self.predict_url.clone())
            .json(profile)
            .send()
            .map_err(transport)?;

        decode(response)
    }

    fn health(&self) -> Result<ServiceStatus, PredictionError> {
        let response = self
            .http
            .get(self.status_url.clone())
            .send()
            .map_err(transport)?;

        decode(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProfileField, RiskLevel};
    use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{mpsc, Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone)]
    struct ServiceState {
        received: Arc<Mutex<mpsc::Sender<Value>>>,
        reply: Value,
    }

    async fn handle_predict(
        State(state): State<ServiceState>,
        Json(payload): Json<Value>,
    ) -> Json<Value> {
        if let Ok(tx) = state.received.lock() {
            let _ = tx.send(payload);
        }
        Json(state.reply.clone())
    }

    async fn handle_status() -> Json<Value> {
        Json(json!({"message": "Disease Prediction API is Online", "status": "Ready"}))
    }

    /// Serve `app` on an ephemeral port from a background runtime.
    fn spawn_service(app: Router) -> String {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        listener.set_nonblocking(true).expect("nonblocking");

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("listener");
                let _ = axum::serve(listener, app).await;
            });
        });

        format!("http://{addr}")
    }

    fn predictor_for(base: &str, timeout: Duration) -> HttpPredictor {
        let config = ClientConfig::new(base, timeout).expect("config");
        HttpPredictor::new(&config).expect("client")
    }

    fn spawn_prediction_service(reply: Value) -> (String, mpsc::Receiver<Value>) {
        let (tx, rx) = mpsc::channel();
        let state = ServiceState {
            received: Arc::new(Mutex::new(tx)),
            reply,
        };
        let app = Router::new()
            .route("/", get(handle_status))
            .route("/predict", post(handle_predict))
            .with_state(state);
        (spawn_service(app), rx)
    }

    #[test]
    fn test_predict_posts_full_profile() {
        let (base, received) = spawn_prediction_service(json!({
            "Diabetes": {"probability": 62, "risk_level": "Moderate"},
            "Hypertension": {"probability": 18.5, "risk_level": "Low"}
        }));
        let predictor = predictor_for(&base, Duration::from_secs(5));

        let profile = PatientProfile::default().with_field(ProfileField::Bmi, 31.2);
        let result = predictor.predict(&profile).expect("Should predict");

        let names: Vec<&str> = result.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Diabetes", "Hypertension"]);
        assert_eq!(
            result.get("Diabetes").map(|e| e.risk_level),
            Some(RiskLevel::Moderate)
        );

        let payload = received
            .recv_timeout(Duration::from_secs(5))
            .expect("payload");
        let object = payload.as_object().expect("object payload");
        assert_eq!(object.len(), 13);
        assert_eq!(payload["bmi"], json!(31.2));
        assert_eq!(payload["alcohol"], json!(888.0));
    }

    #[test]
    fn test_predict_sends_nan_as_null() {
        let (base, received) = spawn_prediction_service(json!({}));
        let predictor = predictor_for(&base, Duration::from_secs(5));

        let profile = PatientProfile::default().with_field(ProfileField::Age, f64::NAN);
        predictor.predict(&profile).expect("Should predict");

        let payload = received
            .recv_timeout(Duration::from_secs(5))
            .expect("payload");
        assert!(payload["age"].is_null());
    }

    #[test]
    fn test_health_probe() {
        let (base, _received) = spawn_prediction_service(json!({}));
        let predictor = predictor_for(&base, Duration::from_secs(5));

        let status = predictor.health().expect("Should reach service");
        assert_eq!(status.status, "Ready");
    }

    #[test]
    fn test_non_success_status() {
        let app = Router::new().route(
            "/predict",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "Prediction model not found on server."})),
                )
            }),
        );
        let predictor = predictor_for(&spawn_service(app), Duration::from_secs(5));

        let err = predictor
            .predict(&PatientProfile::default())
            .expect_err("must fail");
        assert_eq!(err, PredictionError::Status(500));
    }

    #[test]
    fn test_malformed_body() {
        let app = Router::new().route(
            "/predict",
            post(|| async { Json(json!({"Diabetes": {"risk": 1}})) }),
        );
        let predictor = predictor_for(&spawn_service(app), Duration::from_secs(5));

        let err = predictor
            .predict(&PatientProfile::default())
            .expect_err("must fail");
        assert!(matches!(err, PredictionError::MalformedBody(_)), "{err:?}");
    }

    #[test]
    fn test_unreachable_service() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");

        let predictor = predictor_for(&format!("http://{addr}"), Duration::from_secs(5));
        let err = predictor
            .predict(&PatientProfile::default())
            .expect_err("must fail");
        assert!(matches!(err, PredictionError::Transport(_)), "{err:?}");
    }

    #[test]
    fn test_request_timeout() {
        let app = Router::new().route(
            "/predict",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({}))
            }),
        );
        let predictor = predictor_for(&spawn_service(app), Duration::from_secs(1));

        let err = predictor
            .predict(&PatientProfile::default())
            .expect_err("must time out");
        assert!(matches!(err, PredictionError::Transport(_)), "{err:?}");
    }
}
