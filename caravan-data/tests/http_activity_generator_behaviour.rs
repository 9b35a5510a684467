//! Behavioural tests for [`HttpActivityGenerator`].
//!
//! Each scenario runs the real generator against a loopback server that
//! answers a single scripted request, so no text-generation service is
//! required.

mod support;

use std::cell::RefCell;
use std::time::Duration;

use caravan_core::{ActivityGenerator, GenerationError};
use caravan_data::{HttpActivityGenerator, HttpActivityGeneratorConfig};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use support::{OneShotServer, Reply, closed_base_url};

const MODEL: &str = "llama3.2:1b";

#[derive(Default)]
struct GenerationWorld {
    server: RefCell<Option<OneShotServer>>,
    base_url: RefCell<String>,
    timeout: RefCell<Option<Duration>>,
    outcome: RefCell<Option<Result<String, GenerationError>>>,
}

impl GenerationWorld {
    fn serve(&self, reply: Reply) {
        let server = OneShotServer::start(reply);
        self.base_url.replace(server.base_url());
        self.server.replace(Some(server));
    }

    fn generator(&self) -> HttpActivityGenerator {
        let mut config = HttpActivityGeneratorConfig::new(self.base_url.borrow().clone())
            .with_model(MODEL);
        if let Some(timeout) = *self.timeout.borrow() {
            config = config.with_timeout(timeout);
        }
        HttpActivityGenerator::with_config(config).expect("generator should build")
    }

    fn outcome(&self) -> Result<String, GenerationError> {
        self.outcome
            .borrow()
            .clone()
            .expect("a request should have been made")
    }
}

#[fixture]
fn world() -> GenerationWorld {
    GenerationWorld::default()
}

// --- Given steps ---

#[given("a generation service answering \"1. Medina Walk - 0\"")]
fn service_answering(world: &GenerationWorld) {
    world.serve(Reply::Json {
        status: 200,
        body: r#"{"model":"llama3.2:1b","response":"1. Medina Walk - 0","done":true}"#.to_owned(),
    });
}

#[given("a generation service rejecting requests with status 404")]
fn service_rejecting(world: &GenerationWorld) {
    world.serve(Reply::Json {
        status: 404,
        body: r#"{"error":"model 'llama3.2:1b' not found"}"#.to_owned(),
    });
}

#[given("no generation service is listening")]
fn service_missing(world: &GenerationWorld) {
    world.base_url.replace(closed_base_url());
}

#[given("a generation service that never answers")]
fn service_silent(world: &GenerationWorld) {
    world.serve(Reply::Silence(Duration::from_secs(5)));
    world.timeout.replace(Some(Duration::from_secs(1)));
}

// --- When steps ---

#[when("I ask for activities in Fes")]
fn ask_for_activities(world: &GenerationWorld) {
    let outcome = world
        .generator()
        .generate("List 2 activities in Fes, one per line as 'Name - price'.");
    world.outcome.replace(Some(outcome));
}

#[when("I send an empty prompt")]
fn send_empty_prompt(world: &GenerationWorld) {
    let outcome = world.generator().generate("");
    world.outcome.replace(Some(outcome));
}

// --- Then steps ---

#[then("the generated text is \"1. Medina Walk - 0\"")]
fn then_text(world: &GenerationWorld) {
    let text = world.outcome().expect("expected generated text");
    assert_eq!(text, "1. Medina Walk - 0");
}

#[then("the service received a non-streaming request for the configured model")]
fn then_request_shape(world: &GenerationWorld) {
    let server = world.server.borrow();
    let request = server
        .as_ref()
        .and_then(OneShotServer::received)
        .expect("server should have received a request");
    assert!(request.starts_with("POST /api/generate "), "{request}");
    let (_, body) = request
        .split_once("\r\n\r\n")
        .expect("request should carry a body");
    let payload: serde_json::Value = serde_json::from_str(body).expect("JSON body");
    assert_eq!(payload["model"], MODEL);
    assert_eq!(payload["stream"], false);
    assert!(
        payload["prompt"]
            .as_str()
            .is_some_and(|prompt| prompt.contains("Fes"))
    );
}

#[then("a service error with status 404 is returned")]
fn then_service_error(world: &GenerationWorld) {
    let outcome = world.outcome();
    assert!(
        matches!(
            &outcome,
            Err(GenerationError::Service { status: 404, message }) if message.contains("not found")
        ),
        "expected Service error, got {outcome:?}"
    );
}

#[then("a network error is returned")]
fn then_network_error(world: &GenerationWorld) {
    let outcome = world.outcome();
    assert!(
        matches!(&outcome, Err(GenerationError::Network { .. })),
        "expected Network error, got {outcome:?}"
    );
}

#[then("a timeout error is returned")]
fn then_timeout_error(world: &GenerationWorld) {
    let outcome = world.outcome();
    assert!(
        matches!(&outcome, Err(GenerationError::Timeout { timeout_secs: 1, .. })),
        "expected Timeout error, got {outcome:?}"
    );
}

#[then("an empty prompt error is returned")]
fn then_empty_prompt(world: &GenerationWorld) {
    assert_eq!(world.outcome(), Err(GenerationError::EmptyPrompt));
}

// --- Scenario registrations ---

#[scenario(path = "tests/features/http_activity_generation.feature", index = 0)]
fn returning_generated_text(world: GenerationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/http_activity_generation.feature", index = 1)]
fn reporting_service_error(world: GenerationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/http_activity_generation.feature", index = 2)]
fn reporting_unreachable_service(world: GenerationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/http_activity_generation.feature", index = 3)]
fn reporting_slow_service(world: GenerationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/http_activity_generation.feature", index = 4)]
fn rejecting_empty_prompt(world: GenerationWorld) {
    let _ = world;
}
