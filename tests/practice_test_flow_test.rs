use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

fn init_test_config() {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("OPENAI_API_KEY", "sk-test");
    // Closed port: the Groq call fails fast, so tests exercise the
    // deterministic fallback generator instead of the network.
    env::set_var("GROQ_API_URL", "http://127.0.0.1:9/v1/chat/completions");
    env::set_var("PUBLIC_RPS", "1000");
    env::set_var("MAX_AI_QUESTIONS", "20");
    let _ = brainstack_backend::config::init_config();
}

struct TestApp {
    app: Router,
    token: String,
}

async fn setup_app() -> TestApp {
    init_test_config();
    let data_file = std::env::temp_dir().join(format!("brainstack_test_{}.json", Uuid::new_v4()));
    let storage = brainstack_backend::storage::store::Storage::open(&data_file)
        .await
        .expect("open storage");
    let app_state = brainstack_backend::AppState::new(storage);

    let auth_api = Router::new().route(
        "/api/auth/login",
        post(brainstack_backend::routes::auth::login),
    );
    let protected_api = Router::new()
        .route(
            "/api/decks",
            post(brainstack_backend::routes::decks::create_deck),
        )
        .route(
            "/api/decks/:id/cards",
            post(brainstack_backend::routes::decks::add_card),
        )
        .route(
            "/api/practice-tests",
            get(brainstack_backend::routes::tests::list_tests)
                .post(brainstack_backend::routes::tests::create_test),
        )
        .route(
            "/api/practice-tests/:id",
            get(brainstack_backend::routes::tests::get_test)
                .delete(brainstack_backend::routes::tests::delete_test),
        )
        .route(
            "/api/practice-tests/:id/questions/:question_id/answer",
            post(brainstack_backend::routes::tests::submit_answer),
        )
        .route(
            "/api/practice-tests/:id/complete",
            post(brainstack_backend::routes::tests::complete_test),
        )
        .layer(axum::middleware::from_fn(
            brainstack_backend::middleware::auth::require_bearer_auth,
        ));

    let app = auth_api.merge(protected_api).with_state(app_state);

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(json!({}).to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    let token = body["token"].as_str().expect("token").to_string();

    TestApp { app, token }
}

async fn read_json(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl TestApp {
    async fn post(&self, uri: &str, body: JsonValue) -> axum::response::Response {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", self.token))
            .body(Body::from(body.to_string()))
            .unwrap();
        self.app.clone().oneshot(req).await.unwrap()
    }

    async fn get(&self, uri: &str) -> axum::response::Response {
        let req = Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", format!("Bearer {}", self.token))
            .body(Body::empty())
            .unwrap();
        self.app.clone().oneshot(req).await.unwrap()
    }

    async fn delete(&self, uri: &str) -> axum::response::Response {
        let req = Request::builder()
            .method("DELETE")
            .uri(uri)
            .header("authorization", format!("Bearer {}", self.token))
            .body(Body::empty())
            .unwrap();
        self.app.clone().oneshot(req).await.unwrap()
    }

    async fn seed_deck(&self, cards: &[(&str, &str)]) -> String {
        let resp = self.post("/api/decks", json!({"name": "Seeded"})).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let deck = read_json(resp).await;
        let deck_id = deck["id"].as_str().unwrap().to_string();
        for (front, back) in cards {
            let resp = self
                .post(
                    &format!("/api/decks/{}/cards", deck_id),
                    json!({"front": front, "back": back}),
                )
                .await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }
        deck_id
    }
}

#[tokio::test]
async fn empty_deck_cannot_produce_a_test() {
    let t = setup_app().await;
    let deck_id = t.seed_deck(&[]).await;
    let resp = t
        .post("/api/practice-tests", json!({"deck_id": deck_id}))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fallback_generation_produces_card_derived_questions() {
    let t = setup_app().await;
    let deck_id = t
        .seed_deck(&[("Capital of France", "Paris"), ("2+2", "4")])
        .await;

    let resp = t
        .post(
            "/api/practice-tests",
            json!({"deck_id": deck_id, "num_questions": 5}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let test = read_json(resp).await;

    // AI is unreachable, so min(5, 2 cards) fallback questions come back.
    let questions = test["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(
        questions[0]["question"],
        "What is the answer to: Capital of France?"
    );
    assert_eq!(questions[0]["correct_answer"], "Paris");
    assert_eq!(questions[1]["question"], "What is the answer to: 2+2?");
    assert_eq!(questions[1]["correct_answer"], "4");
    assert_eq!(test["is_completed"], false);
    assert_eq!(test["progress"]["unanswered"], 2);
}

#[tokio::test]
async fn answers_are_graded_with_fuzzy_matching() {
    let t = setup_app().await;
    let deck_id = t
        .seed_deck(&[("Capital of France", "Paris"), ("Cell powerhouse", "Mitochondria")])
        .await;

    let resp = t
        .post(
            "/api/practice-tests",
            json!({"deck_id": deck_id, "num_questions": 4}),
        )
        .await;
    let test = read_json(resp).await;
    let test_id = test["id"].as_str().unwrap().to_string();
    let questions = test["questions"].as_array().unwrap();
    let q0 = questions[0]["id"].as_str().unwrap().to_string();
    let q1 = questions[1]["id"].as_str().unwrap().to_string();

    // Case and surrounding whitespace are forgiven.
    let resp = t
        .post(
            &format!("/api/practice-tests/{}/questions/{}/answer", test_id, q0),
            json!({"answer": "  PARIS "}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let verdict = read_json(resp).await;
    assert_eq!(verdict["is_correct"], true);

    // A substantively different answer is rejected.
    let resp = t
        .post(
            &format!("/api/practice-tests/{}/questions/{}/answer", test_id, q1),
            json!({"answer": "Ribosome"}),
        )
        .await;
    let verdict = read_json(resp).await;
    assert_eq!(verdict["is_correct"], false);
    assert_eq!(verdict["correct_answer"], "Mitochondria");

    let resp = t
        .post(&format!("/api/practice-tests/{}/complete", test_id), json!({}))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let completed = read_json(resp).await;
    assert_eq!(completed["is_completed"], true);
    assert_eq!(completed["score"], 50.0);

    // Completed tests no longer accept answers.
    let resp = t
        .post(
            &format!("/api/practice-tests/{}/questions/{}/answer", test_id, q0),
            json!({"answer": "Paris"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tests_can_be_listed_filtered_and_deleted() {
    let t = setup_app().await;
    let deck_id = t.seed_deck(&[("front", "back")]).await;
    let other_deck_id = t.seed_deck(&[("f2", "b2")]).await;

    for id in [&deck_id, &other_deck_id] {
        let resp = t
            .post("/api/practice-tests", json!({"deck_id": id}))
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = t.get("/api/practice-tests").await;
    let body = read_json(resp).await;
    assert_eq!(body["tests"].as_array().unwrap().len(), 2);

    let resp = t
        .get(&format!("/api/practice-tests?deck_id={}", deck_id))
        .await;
    let body = read_json(resp).await;
    let tests = body["tests"].as_array().unwrap();
    assert_eq!(tests.len(), 1);
    assert_eq!(tests[0]["deck_id"].as_str().unwrap(), deck_id);

    let test_id = tests[0]["id"].as_str().unwrap().to_string();
    let resp = t.delete(&format!("/api/practice-tests/{}", test_id)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = t.get(&format!("/api/practice-tests/{}", test_id)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
