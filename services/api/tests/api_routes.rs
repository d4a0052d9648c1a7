//! End-to-end tests for the REST surface, driven through the router without a socket.

use api_lib::config::Config;
use api_lib::web::{self, AppState, Services};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use fridge_core::{FixedClock, PortError, PortResult, ProductCatalog, RecipeService, RecipeSummary};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
}

/// Recipe service that answers with a fixed list, or fails, or stalls.
struct FakeRecipes {
    outcome: Outcome,
}

enum Outcome {
    Recipes(Vec<RecipeSummary>),
    Fail,
    Stall,
}

#[async_trait]
impl RecipeService for FakeRecipes {
    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
        limit: usize,
    ) -> PortResult<Vec<RecipeSummary>> {
        assert!(!ingredients.is_empty());
        match &self.outcome {
            Outcome::Recipes(recipes) => Ok(recipes.iter().take(limit).cloned().collect()),
            Outcome::Fail => Err(PortError::Unexpected("upstream returned 500".to_string())),
            Outcome::Stall => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(Vec::new())
            }
        }
    }
}

fn recipe(id: i64, title: &str, missing: &[&str]) -> RecipeSummary {
    RecipeSummary {
        id,
        title: title.to_string(),
        image_url: None,
        used_ingredients: vec!["milk".to_string()],
        missing_ingredients: missing.iter().map(|s| s.to_string()).collect(),
    }
}

fn test_app(vars: &[(&str, &str)], recipes: Option<Arc<dyn RecipeService>>) -> Router {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = Config::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test config is valid");

    let services = Services {
        clock: Arc::new(FixedClock(today())),
        catalog: Arc::new(ProductCatalog::deterministic()),
        recipes,
        stt_adapter: None,
        tts_adapter: None,
    };
    web::router(Arc::new(AppState::new(Arc::new(config), services)))
}

fn seeded_app() -> Router {
    test_app(&[("SEED_DEMO_DATA", "true")], None)
}

async fn send(app: &Router, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(path);
    let body = match body {
        Some(json_body) => {
            request = request.header("content-type", "application/json");
            Body::from(json_body.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

//=========================================================================================
// Health
//=========================================================================================

#[tokio::test]
async fn health_reports_disabled_integrations() {
    let app = test_app(&[], None);
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["today"], "2026-03-10");
    assert_eq!(body["recipes_enabled"], false);
    assert_eq!(body["voice_audio_enabled"], false);
}

//=========================================================================================
// Inventory
//=========================================================================================

#[tokio::test]
async fn inventory_crud_round_trip() {
    let app = test_app(&[], None);

    let (status, created) = send(
        &app,
        Method::POST,
        "/inventory",
        Some(json!({ "name": "Butter", "category": "dairy", "expiration_date": "2026-03-12" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["quantity"], 1);
    assert_eq!(created["days_until_expiry"], 2);
    assert_eq!(created["status"], "warning");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, Method::GET, &format!("/inventory/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Butter");

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/inventory/{}", id),
        Some(json!({ "name": "Butter", "category": "dairy", "expiration_date": "2026-04-01", "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 2);
    assert_eq!(updated["status"], "good");

    let (status, _) = send(&app, Method::DELETE, &format!("/inventory/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(&app, Method::GET, &format!("/inventory/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&id));

    // Deleting again is still fine.
    let (status, _) = send(&app, Method::DELETE, &format!("/inventory/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn inventory_rejects_invalid_items() {
    let app = test_app(&[], None);

    let (status, body) = send(
        &app,
        Method::POST,
        "/inventory",
        Some(json!({ "name": "   ", "category": "fruit", "expiration_date": "2026-03-12" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/inventory/{}", uuid::Uuid::new_v4()),
        Some(json!({ "name": "Kiwi", "category": "fruit", "expiration_date": "2026-03-12" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn inventory_sorts_and_searches() {
    let app = seeded_app();

    let (_, by_name) = send(&app, Method::GET, "/inventory?sort=name_asc", None).await;
    assert_eq!(
        names(&by_name),
        vec!["Blueberries", "Carrots", "Chicken Thighs", "Greek Yogurt", "Milk", "Spinach"]
    );

    let (_, by_expiry) = send(&app, Method::GET, "/inventory?sort=expiry_asc", None).await;
    assert_eq!(names(&by_expiry)[0], "Blueberries");
    assert_eq!(by_expiry[0]["status"], "expired");

    let (_, found) = send(&app, Method::GET, "/inventory?q=CHICK", None).await;
    assert_eq!(names(&found), vec!["Chicken Thighs"]);

    let (status, dairy) = send(&app, Method::GET, "/inventory/category/dairy?sort=name_asc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&dairy), vec!["Greek Yogurt", "Milk"]);

    let (status, _) = send(&app, Method::GET, "/inventory/category/snacks", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn alerts_follow_the_preference_window() {
    let app = seeded_app();

    let (status, alerts) = send(&app, Method::GET, "/inventory/alerts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(alerts["alert_days"], 3);
    assert_eq!(names(&alerts["expired"]), vec!["Blueberries"]);
    assert_eq!(names(&alerts["expiring"]), vec!["Spinach", "Chicken Thighs"]);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/preferences",
        Some(json!({ "household_size": 2, "expiry_alert_days": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, alerts) = send(&app, Method::GET, "/inventory/alerts", None).await;
    assert_eq!(names(&alerts["expiring"]), vec!["Spinach", "Chicken Thighs", "Milk"]);
}

#[tokio::test]
async fn remove_expired_drops_only_past_items() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::POST, "/inventory/remove-expired", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], 1);

    let (_, items) = send(&app, Method::GET, "/inventory", None).await;
    assert_eq!(items.as_array().unwrap().len(), 5);
    assert!(!names(&items).contains(&"Blueberries".to_string()));
}

//=========================================================================================
// Scanning
//=========================================================================================

#[tokio::test]
async fn expiry_scan_picks_first_valid_line() {
    let app = test_app(&[], None);

    let (status, body) = send(
        &app,
        Method::POST,
        "/scan/expiry",
        Some(json!({ "lines": ["LOT 01/20", "BEST BY 08-2027", "12/30"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token"], "08/27");
    assert_eq!(body["expiration_date"], "2027-08-31");

    let (_, body) = send(&app, Method::POST, "/scan/expiry", Some(json!({ "lines": ["NET WT 500G"] }))).await;
    assert_eq!(body["token"], Value::Null);
    assert_eq!(body["message"], "No valid date found");
}

#[tokio::test]
async fn barcode_scan_guesses_and_optionally_adds() {
    let app = test_app(&[], None);

    let (status, body) = send(
        &app,
        Method::POST,
        "/scan/barcode",
        Some(json!({ "barcode": "012345678905", "add_to_inventory": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["guess"]["name"], "Whole Milk");
    assert_eq!(body["guess"]["category"], "dairy");
    assert_eq!(body["added"]["expiration_date"], "2026-03-17");

    let (_, body) = send(&app, Method::POST, "/scan/barcode", Some(json!({ "barcode": "074999" }))).await;
    assert_eq!(body["guess"]["name"], "Meat Product");
    assert_eq!(body["added"], Value::Null);

    let (status, body) = send(&app, Method::POST, "/scan/barcode", Some(json!({ "barcode": "999000111" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["guess"], Value::Null);

    let (_, items) = send(&app, Method::GET, "/inventory", None).await;
    assert_eq!(names(&items), vec!["Whole Milk"]);
}

//=========================================================================================
// Recipes
//=========================================================================================

#[tokio::test]
async fn recipes_are_unavailable_without_a_service() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::GET, "/recipes/suggestions", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("SPOONACULAR_API_KEY"));
}

#[tokio::test]
async fn suggestions_use_fresh_inventory_soonest_first() {
    let fake = FakeRecipes {
        outcome: Outcome::Recipes(vec![
            recipe(1, "Creamed Spinach", &["butter"]),
            recipe(2, "Chicken Soup", &["onion", "celery"]),
        ]),
    };
    let app = test_app(&[("SEED_DEMO_DATA", "true")], Some(Arc::new(fake)));

    let (status, body) = send(&app, Method::GET, "/recipes/suggestions", None).await;
    assert_eq!(status, StatusCode::OK);
    let ingredients: Vec<&str> = body["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(ingredients[0], "spinach");
    assert!(!ingredients.contains(&"blueberries"));
    assert_eq!(body["recipes"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        Method::POST,
        "/recipes/missing-to-shopping",
        Some(body["recipes"][1].clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["added"], 2);

    let (_, list) = send(&app, Method::GET, "/shopping", None).await;
    assert_eq!(names(&list), vec!["onion", "celery"]);
}

#[tokio::test]
async fn recipe_upstream_failures_map_to_gateway_errors() {
    let failing = test_app(&[], Some(Arc::new(FakeRecipes { outcome: Outcome::Fail })));
    let (status, _) = send(
        &failing,
        Method::POST,
        "/recipes/search",
        Some(json!({ "ingredients": ["egg"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let stalled = test_app(
        &[("RECIPE_TIMEOUT_SECS", "1")],
        Some(Arc::new(FakeRecipes { outcome: Outcome::Stall })),
    );
    let (status, body) = send(
        &stalled,
        Method::POST,
        "/recipes/search",
        Some(json!({ "ingredients": ["egg"] })),
    )
    .await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(body["error"].as_str().unwrap().contains("try again"));
}

//=========================================================================================
// Shopping list, meal plan, budget
//=========================================================================================

#[tokio::test]
async fn shopping_list_merges_toggles_and_clears() {
    let app = test_app(&[], None);

    let (status, first) = send(&app, Method::POST, "/shopping", Some(json!({ "name": "Eggs", "quantity": 6 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, merged) = send(&app, Method::POST, "/shopping", Some(json!({ "name": "eggs", "quantity": 6 }))).await;
    assert_eq!(merged["id"], first["id"]);
    assert_eq!(merged["quantity"], 12);

    send(&app, Method::POST, "/shopping", Some(json!({ "name": "Bread" }))).await;
    let id = first["id"].as_str().unwrap();
    let (status, toggled) = send(&app, Method::POST, &format!("/shopping/{}/toggle", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["checked"], true);

    let (_, list) = send(&app, Method::GET, "/shopping", None).await;
    assert_eq!(names(&list), vec!["Bread", "Eggs"]);

    let (_, cleared) = send(&app, Method::POST, "/shopping/clear-checked", None).await;
    assert_eq!(cleared["removed"], 1);

    let (status, _) = send(&app, Method::POST, &format!("/shopping/{}/toggle", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shopping_quantity_overflow_is_a_bad_request() {
    let app = test_app(&[], None);

    let (status, _) = send(&app, Method::POST, "/shopping", Some(json!({ "name": "Rice", "quantity": 9999 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, Method::POST, "/shopping", Some(json!({ "name": "rice", "quantity": 4294967295u32 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("quantity"));

    let (_, list) = send(&app, Method::GET, "/shopping", None).await;
    assert_eq!(list[0]["quantity"], 9999);
}

#[tokio::test]
async fn meal_plan_shows_the_coming_week() {
    let app = test_app(&[], None);

    for (date, slot, title) in [
        ("2026-03-11", "dinner", "Tacos"),
        ("2026-03-11", "breakfast", "Oatmeal"),
        ("2026-03-20", "lunch", "Salad"),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/meal-plan",
            Some(json!({ "date": date, "slot": slot, "title": title })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, week) = send(&app, Method::GET, "/meal-plan", None).await;
    let titles: Vec<&str> = week
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Oatmeal", "Tacos"]);

    let (status, _) = send(
        &app,
        Method::POST,
        "/meal-plan",
        Some(json!({ "date": "2026-03-12", "slot": "lunch", "title": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The last representable day still yields a (short) week instead of failing.
    let last_day = NaiveDate::MAX.to_string().replace('+', "%2B");
    let (status, week) = send(&app, Method::GET, &format!("/meal-plan?start={}", last_day), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(week, json!([]));
}

#[tokio::test]
async fn budget_summary_tracks_the_monthly_limit() {
    let app = test_app(&[], None);

    send(
        &app,
        Method::PUT,
        "/preferences",
        Some(json!({ "household_size": 2, "expiry_alert_days": 3, "monthly_budget_cents": 20000 })),
    )
    .await;
    for (description, amount, category) in [
        ("Milk and cheese", 1250, Some("dairy")),
        ("Steaks", 3000, Some("meat")),
        ("Paper towels", 500, None),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/budget/expenses",
            Some(json!({ "description": description, "amount_cents": amount, "category": category })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    send(
        &app,
        Method::POST,
        "/budget/expenses",
        Some(json!({ "description": "Last month", "amount_cents": 999, "date": "2026-02-27" })),
    )
    .await;

    let (status, summary) = send(&app, Method::GET, "/budget/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["spent_cents"], 4750);
    assert_eq!(summary["remaining_cents"], 15250);
    assert_eq!(summary["by_category"].as_array().unwrap().len(), 3);

    let (_, february) = send(&app, Method::GET, "/budget/expenses?year=2026&month=2", None).await;
    assert_eq!(february.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::GET, "/budget/summary?month=13", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(
        &app,
        Method::POST,
        "/budget/expenses",
        Some(json!({ "description": "Refund", "amount_cents": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            Method::POST,
            "/budget/expenses",
            Some(json!({ "description": "Typo", "amount_cents": i64::MAX })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
    let (status, summary) = send(&app, Method::GET, "/budget/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["spent_cents"], 4750);
}

#[tokio::test]
async fn preferences_are_validated() {
    let app = test_app(&[], None);

    let (status, prefs) = send(&app, Method::GET, "/preferences", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(prefs["household_size"], 1);
    assert_eq!(prefs["expiry_alert_days"], 3);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/preferences",
        Some(json!({ "household_size": 0, "expiry_alert_days": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, prefs) = send(&app, Method::GET, "/preferences", None).await;
    assert_eq!(prefs["household_size"], 1);
}

//=========================================================================================
// Voice
//=========================================================================================

#[tokio::test]
async fn voice_commands_drive_inventory_and_shopping() {
    let app = test_app(&[], None);

    let (status, body) = send(
        &app,
        Method::POST,
        "/voice/command",
        Some(json!({ "transcript": "Add some chicken to the fridge" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["command"]["command"], "add_item");
    assert!(body["reply"].as_str().unwrap().starts_with("Added chicken"));

    let (_, items) = send(&app, Method::GET, "/inventory", None).await;
    assert_eq!(items[0]["category"], "meat");
    assert_eq!(items[0]["expiration_date"], "2026-03-13");

    let (_, body) = send(&app, Method::POST, "/voice/command", Some(json!({ "transcript": "What is expiring?" }))).await;
    assert_eq!(body["reply"], "chicken expires in 3 days.");

    send(&app, Method::POST, "/voice/command", Some(json!({ "transcript": "add bread to my shopping list" }))).await;
    let (_, body) = send(&app, Method::POST, "/voice/command", Some(json!({ "transcript": "read my shopping list" }))).await;
    assert_eq!(body["reply"], "Your shopping list has bread.");

    let (_, body) = send(&app, Method::POST, "/voice/command", Some(json!({ "transcript": "I finished the chicken" }))).await;
    assert_eq!(body["reply"], "Removed chicken from your fridge.");

    let (_, body) = send(&app, Method::POST, "/voice/command", Some(json!({ "transcript": "suggest a recipe" }))).await;
    assert_eq!(body["reply"], "Your fridge is empty, so I have no recipe ideas yet.");

    let (_, body) = send(&app, Method::POST, "/voice/command", Some(json!({ "transcript": "remove expired items" }))).await;
    assert_eq!(body["command"]["command"], "remove_expired");
    assert_eq!(body["reply"], "Nothing in your fridge has expired.");

    let (_, body) = send(&app, Method::POST, "/voice/command", Some(json!({ "transcript": "sing me a song" }))).await;
    assert_eq!(body["command"]["command"], "unknown");
    assert_eq!(body["reply"], "Sorry, I didn't catch that.");
}

#[tokio::test]
async fn voice_recipe_failures_degrade_to_a_spoken_apology() {
    let app = test_app(
        &[("SEED_DEMO_DATA", "true")],
        Some(Arc::new(FakeRecipes { outcome: Outcome::Fail })),
    );
    let (status, body) = send(&app, Method::POST, "/voice/command", Some(json!({ "transcript": "any recipes?" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["reply"].as_str().unwrap().starts_with("I couldn't fetch recipes"));
}

#[tokio::test]
async fn speech_endpoints_need_an_openai_key() {
    let app = test_app(&[], None);
    let (status, _) = send(&app, Method::POST, "/voice/speak", Some(json!({ "text": "hello" }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
