//! Test helpers: build AppState and router for integration tests.
//!
//! The image generator is replaced by `StubGenerator`, so no network access
//! or API key is needed.

pub mod fixtures;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use reforma_api::setup::routes;
use reforma_api::{AppState, ImageGenerator};
use reforma_core::{AppError, Config, ValidatedSubmission, VisualizerConfig};

/// Base64 returned by the stub on success
pub const STUB_IMAGE: &str = "aW1hZ2UtYnl0ZXM=";

/// Image generator that answers without calling any provider
#[derive(Default)]
pub struct StubGenerator {
    fail: bool,
    prompts: Mutex<Vec<String>>,
    mood_board_counts: Mutex<Vec<usize>>,
}

impl StubGenerator {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn mood_board_counts(&self) -> Vec<usize> {
        self.mood_board_counts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for StubGenerator {
    async fn generate(
        &self,
        submission: &ValidatedSubmission,
        prompt: &str,
    ) -> Result<String, AppError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.mood_board_counts
            .lock()
            .unwrap()
            .push(submission.mood_board_images.len());

        if self.fail {
            return Err(AppError::Generation(
                "provider rejected request: quota exceeded for key sk-test".to_string(),
            ));
        }
        Ok(STUB_IMAGE.to_string())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Test application: server plus the stub it calls.
pub struct TestApp {
    pub server: TestServer,
    pub generator: Arc<StubGenerator>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("GEMINI_API_KEY".to_string(), "test-key".to_string());
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    let config = VisualizerConfig::from_lookup(|key| vars.get(key).cloned())
        .expect("test configuration");
    Config(Box::new(config))
}

pub fn setup_test_app_with(config: Config, generator: StubGenerator) -> TestApp {
    let generator = Arc::new(generator);
    let state = Arc::new(AppState::new(&config, generator.clone()));
    let router = routes::setup_routes(&config, state).expect("router");
    let server = TestServer::new(router).expect("test server");

    TestApp { server, generator }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(test_config(&[]), StubGenerator::default())
}
