mod common;

use actix_web::test;
use serde_json::{json, Value};

use common::TestApp;

fn names(body: &Value, key: &str) -> Vec<String> {
    body["data"]["alternatives"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v[key].as_str().unwrap().to_string())
        .collect()
}

#[actix_rt::test]
async fn test_hotel_alternatives_nearest_first() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/alternatives")
        .set_json(json!({
            "city": "New York",
            "category": "hotels",
            "current_url": "Midtown Inn",
            "budget": "high"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(names(&body, "name"), vec!["Harbor Hotel", "Airport Lodge"]);
    assert_eq!(body["data"]["alternatives"][0]["category"], "hotel");
}

#[actix_rt::test]
async fn test_alternatives_exclude_by_url_and_honour_cap() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/alternatives")
        .set_json(json!({
            "city": "New York",
            "category": "tour",
            "current_url": "https://tours.example.com/Food-Walk",
            "max_results": 10
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;

    let found = names(&body, "title");
    assert_eq!(found.len(), 5);
    assert!(!found.contains(&"Food Walk".to_string()));
}

#[actix_rt::test]
async fn test_alternatives_unknown_city_is_empty() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/alternatives")
        .set_json(json!({
            "city": "Atlantis",
            "category": "attraction",
            "current_url": "Lost Temple"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["alternatives"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_alternatives_unknown_category() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/alternatives")
        .set_json(json!({
            "city": "New York",
            "category": "restaurant",
            "current_url": "Joe's Pizza"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
}
