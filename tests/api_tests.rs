//! Pruebas de integración de la API HTTP sobre un dataset CSV temporal.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use food_explorer::{create_router, AppConfig, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::sync::oneshot;
use tower::util::ServiceExt; // para `oneshot`

const RECIPES_CSV: &str = "name,id,minutes,contributor_id,submitted,tags,nutrition,n_steps,steps,description,ingredients,n_ingredients
french apple tart,1,50,10,2005-09-16,\"['60-minutes-or-less', 'desserts', 'easy']\",\"[300.0, 20.0, 50.0, 5.0, 8.0, 30.0, 12.0]\",2,\"['bake', 'serve']\",classic,\"['apples', 'butter']\",2
spaghetti carbonara,2,25,11,2006-01-01,\"['30-minutes-or-less', 'italian', 'main-dish']\",\"[600.0, 40.0, 2.0, 30.0, 50.0, 60.0, 10.0]\",1,\"['cook']\",,\"['pasta', 'eggs']\",2
mystery dish,3,10,12,2007-01-01,\"['oops'\",[],1,\"['mix']\",,\"['x']\",1
";

const REVIEWS_CSV: &str = "user_id,recipe_id,date,rating,review
100,1,2010-01-01,5,Lovely tart
101,1,2010-01-02,1,Burnt
102,2,2010-01-03,4,
";

fn setup_data_dir(with_reviews: bool) -> TempDir {
    let dir = tempfile::tempdir().expect("Debe crear el directorio temporal");
    std::fs::write(dir.path().join("RAW_recipes.csv"), RECIPES_CSV).unwrap();
    if with_reviews {
        std::fs::create_dir(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data").join("RAW_interactions.csv"), REVIEWS_CSV).unwrap();
    }
    dir
}

fn setup_app(dir: &TempDir) -> Router {
    let config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        open_browser: false,
        ..AppConfig::default()
    };
    create_router(AppState::new(config, None))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Debe leer el cuerpo");
    serde_json::from_slice(&bytes).expect("Debe ser JSON")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

#[tokio::test]
async fn status_reports_discovered_files() {
    let dir = setup_data_dir(true);
    let (status, body) = send(setup_app(&dir), get("/api/status")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["files_found"], 2);
    assert_eq!(body["recipes_available"], true);
    assert_eq!(body["reviews_available"], true);
    assert_eq!(body["language"], "en");
}

#[tokio::test]
async fn files_are_listed_with_their_kind() {
    let dir = setup_data_dir(true);
    let (_, body) = send(setup_app(&dir), get("/api/files")).await;

    let kinds: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["name"].as_str().unwrap().to_string(), f["kind"].as_str().unwrap().to_string()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("RAW_interactions.csv".to_string(), "reviews".to_string()),
            ("RAW_recipes.csv".to_string(), "recipes".to_string()),
        ]
    );
}

#[tokio::test]
async fn taxonomy_lists_categories_with_labels() {
    let dir = setup_data_dir(false);
    let (status, body) = send(setup_app(&dir), get("/api/taxonomy")).await;

    assert_eq!(status, StatusCode::OK);
    let cuisine = body
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["key"] == "cuisine")
        .expect("Debe existir la categoría de cocina");
    assert!(cuisine["labels"]
        .as_array()
        .unwrap()
        .iter()
        .any(|l| l["label"] == "🇮🇹 Italian" && l["keywords"] == json!(["italian"])));
}

#[tokio::test]
async fn search_without_selection_returns_every_recipe() {
    let dir = setup_data_dir(false);
    let (status, body) = send(setup_app(&dir), post_json("/api/recipes/search", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["pagination"]["page"], 1);
    assert!(body["recipes"][2]["tags"].is_null());
}

#[tokio::test]
async fn search_with_selections_uses_or_semantics() {
    let dir = setup_data_dir(false);
    let request = post_json(
        "/api/recipes/search",
        json!({
            "selections": {
                "meal_type": ["🍰 Desserts"],
                "cuisine": ["🇫🇷 French"]
            }
        }),
    );
    let (status, body) = send(setup_app(&dir), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["recipes"][0]["id"], 1);
    assert_eq!(body["recipes"][0]["tag_groups"]["method"], json!(["60-minutes-or-less", "easy"]));
    assert_eq!(body["recipes"][0]["nutrition"][0]["name"], "calories");
    assert_eq!(body["active_keywords"], json!(["desserts", "french"]));
}

#[tokio::test]
async fn search_every_category_mode() {
    let dir = setup_data_dir(false);
    let request = post_json(
        "/api/recipes/search",
        json!({
            "selections": { "meal_type": ["🍽️ Main dish"], "cuisine": ["🇮🇹 Italian"] },
            "mode": "every_category"
        }),
    );
    let (_, body) = send(setup_app(&dir), request).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["recipes"][0]["id"], 2);
}

#[tokio::test]
async fn unknown_label_is_a_bad_request() {
    let dir = setup_data_dir(false);
    let request = post_json(
        "/api/recipes/search",
        json!({ "selections": { "cuisine": ["Atlantean"] } }),
    );
    let (status, body) = send(setup_app(&dir), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Atlantean"));
}

#[tokio::test]
async fn recipe_detail_and_not_found() {
    let dir = setup_data_dir(false);
    let (status, body) = send(setup_app(&dir), get("/api/recipes/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "spaghetti carbonara");
    assert_eq!(body["tag_groups"]["cuisine"], json!(["italian"]));
    assert_eq!(body["submitted"], "2006-01-01");

    let (status, _) = send(setup_app(&dir), get("/api/recipes/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reviews_are_filtered_by_rating() {
    let dir = setup_data_dir(true);
    let request = post_json("/api/reviews", json!({ "min_rating": 4 }));
    let (status, body) = send(setup_app(&dir), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_matching"], 2);
    assert_eq!(body["reviews"][0]["review"], "Lovely tart");
    assert_eq!(body["reviews"][0]["stars"], "⭐⭐⭐⭐⭐");
    assert!(body["reviews"][1]["review"].is_null());
}

#[tokio::test]
async fn missing_reviews_file_is_reported_in_the_requested_language() {
    let dir = setup_data_dir(false);
    let request = post_json("/api/reviews?lang=sk", json!({}));
    let (status, body) = send(setup_app(&dir), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "❌ Súbor s recenziami nebol nájdený!");
    assert!(body["instructions"].as_str().unwrap().contains("RAW_interactions.csv"));
}

#[tokio::test]
async fn missing_recipes_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(setup_app(&dir), post_json("/api/recipes/search", json!({}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "❌ Recipe files not found!");
}

#[tokio::test]
async fn malformed_search_body_is_a_json_bad_request() {
    let dir = setup_data_dir(false);

    let (status, body) = send(setup_app(&dir), post_json("/api/recipes/search", json!({ "mode": "all" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("all"));

    let request = post_json("/api/recipes/search", json!({ "selections": ["cuisine"] }));
    let (status, body) = send(setup_app(&dir), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let request = Request::builder()
        .method("POST")
        .uri("/api/recipes/search")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(setup_app(&dir), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn out_of_range_rating_is_a_json_bad_request() {
    let dir = setup_data_dir(true);

    for min_rating in [0, 300] {
        let request = post_json("/api/reviews", json!({ "min_rating": min_rating }));
        let (status, body) = send(setup_app(&dir), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "min_rating {min_rating}");
        assert!(body["error"].is_string(), "min_rating {min_rating}");
    }
}

#[tokio::test]
async fn non_numeric_recipe_id_is_a_json_bad_request() {
    let dir = setup_data_dir(false);
    let (status, body) = send(setup_app(&dir), get("/api/recipes/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn analysis_profiles_a_discovered_file() {
    let dir = setup_data_dir(true);
    let (status, body) = send(setup_app(&dir), get("/api/analysis/RAW_interactions.csv")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_records"], 3);
    assert_eq!(body["columns"], 5);
    assert_eq!(body["duplicates"], 0);

    let (status, _) = send(setup_app(&dir), get("/api/analysis/secret.csv")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tag_statistics_count_decoded_tags() {
    let dir = setup_data_dir(false);
    let (status, body) = send(setup_app(&dir), get("/api/tags/stats?top=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recipes_with_tags"], 2);
    assert_eq!(body["distinct_tags"], 6);
    assert_eq!(body["top"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn translations_and_unknown_language() {
    let dir = setup_data_dir(false);
    let (status, body) = send(setup_app(&dir), get("/api/i18n/ru")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language_name"], "Русский");
    assert_eq!(body["strings"]["calories"], "Calories");

    let (status, _) = send(setup_app(&dir), get("/api/i18n/xx")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test]
fn shutdown_fires_the_signal_once() {
    tokio_test::block_on(async {
        let dir = setup_data_dir(false);
        let (tx, rx) = oneshot::channel();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let app = create_router(AppState::new(config, Some(tx)));

        let response = app.clone().oneshot(post_json("/api/shutdown", json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(rx.await.is_ok());

        let response = app.oneshot(post_json("/api/shutdown", json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    });
}
