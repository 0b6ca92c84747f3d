use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use reelmatch::api::{create_router, AppState};
use reelmatch::index::{MovieIndex, MovieRecord};
use reelmatch::services::Enricher;

fn movies() -> Vec<MovieRecord> {
    vec![
        MovieRecord::new("Toy Story (1995)", "Adventure|Animation|Children|Comedy|Fantasy"),
        MovieRecord::new("Heat (1995)", "Action|Crime|Thriller"),
        MovieRecord::new("Toy Story 2 (1999)", "Adventure|Animation|Children|Comedy|Fantasy"),
        MovieRecord::new("Casino (1995)", "Crime|Drama"),
        MovieRecord::new("Balto (1995)", "Adventure|Animation|Children"),
        MovieRecord::new("Jumanji (1995)", "Adventure|Children|Fantasy"),
        MovieRecord::new("Tom & Huck (1995)", "Adventure|Children"),
    ]
}

fn create_test_server() -> TestServer {
    let index = MovieIndex::build(movies()).unwrap();
    let state = AppState::new(index, Enricher::disabled(), 3, 5);
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["movies"], 7);
    assert_eq!(body["enrichment"], false);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert_eq!(header.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn test_title_search() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/titles/search")
        .add_query_param("q", "toy")
        .await;
    response.assert_status_ok();

    let titles: Vec<Value> = response.json();
    let names: Vec<&str> = titles.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Toy Story (1995)", "Toy Story 2 (1999)"]);
}

#[tokio::test]
async fn test_title_search_rejects_blank_query() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/titles/search")
        .add_query_param("q", "  ")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_exclude_query_and_respect_count() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Toy Story (1995)")
        .add_query_param("count", 4)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["found"], true);
    let results = body["recommendations"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["title"], "Toy Story 2 (1999)");
    assert_eq!(results[0]["rank"], 1);
    assert!(results.iter().all(|r| r["title"] != "Toy Story (1995)"));
    assert!(results.iter().all(|r| r.get("enrichment").is_none()));

    let scores: Vec<f64> = results.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_recommendations_use_default_count() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Heat (1995)")
        .await;
    let body: Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unknown_title_returns_empty_result() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Not A Movie (2042)")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["found"], false);
    assert!(body["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_count_out_of_range_is_rejected() {
    let server = create_test_server();
    for count in [0, 6] {
        let response = server
            .get("/api/v1/recommendations")
            .add_query_param("title", "Heat (1995)")
            .add_query_param("count", count)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_enriched_recommendations_degrade_without_catalog() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Heat (1995)")
        .add_query_param("enrich", true)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    for result in body["recommendations"].as_array().unwrap() {
        assert_eq!(result["enrichment"]["status"], "unavailable");
        assert_eq!(result["enrichment"]["reason"]["kind"], "disabled");
    }
}

#[tokio::test]
async fn test_random_movie_is_from_corpus() {
    let server = create_test_server();
    let response = server.get("/api/v1/movies/random").await;
    response.assert_status_ok();

    let movie: MovieRecord = response.json();
    assert!(movies().contains(&movie));
}

#[tokio::test]
async fn test_home_page() {
    let server = create_test_server();
    let response = server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("<a href=\"/\" class=\"active\">Home</a>"));
    assert!(html.contains("catalog of 7 movies"));
}

#[tokio::test]
async fn test_about_page() {
    let server = create_test_server();
    let html = server.get("/about").await.text();
    assert!(html.contains("class=\"active\">About</a>"));
    assert!(html.contains("TF-IDF"));
}

#[tokio::test]
async fn test_recommendations_page_filters_titles() {
    let server = create_test_server();
    let html = server
        .get("/recommendations")
        .add_query_param("q", "STORY")
        .await
        .text();

    assert!(html.contains("Toy Story 2 (1999)</a></li>"));
    assert!(!html.contains("Heat (1995)"));
    assert!(!html.contains("class=\"grid\""));
}

#[tokio::test]
async fn test_recommendations_page_renders_grid() {
    let server = create_test_server();
    let html = server
        .get("/recommendations")
        .add_query_param("movie", "Toy Story (1995)")
        .add_query_param("count", 2)
        .await
        .text();

    assert!(html.contains("Because you chose Toy Story (1995)"));
    assert_eq!(html.matches("class=\"card\"").count(), 2);
    assert!(html.contains("No poster"));
    assert!(html.contains("Description not available."));
    assert!(html.contains("<option value=\"2\" selected>2</option>"));
}

#[tokio::test]
async fn test_recommendations_page_escapes_titles() {
    let server = create_test_server();
    let html = server
        .get("/recommendations")
        .add_query_param("movie", "Tom & Huck (1995)")
        .await
        .text();

    assert!(html.contains("Because you chose Tom &amp; Huck (1995)"));
}

#[tokio::test]
async fn test_recommendations_page_unknown_movie() {
    let server = create_test_server();
    let response = server
        .get("/recommendations")
        .add_query_param("movie", "Not A Movie (2042)")
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Movie not found"));
}

#[tokio::test]
async fn test_recommendations_page_random_pick() {
    let server = create_test_server();
    let html = server
        .get("/recommendations")
        .add_query_param("random", true)
        .await
        .text();

    assert!(html.contains("Surprise pick"));
    assert_eq!(html.matches("class=\"card\"").count(), 3);
}

#[tokio::test]
async fn test_recommendations_page_ignores_malformed_params() {
    let server = create_test_server();
    let response = server
        .get("/recommendations")
        .add_query_param("movie", "Toy Story (1995)")
        .add_query_param("count", "abc")
        .add_query_param("random", "maybe")
        .await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("Because you chose Toy Story (1995)"));
    assert!(html.contains("<option value=\"3\" selected>3</option>"));
    assert_eq!(html.matches("class=\"card\"").count(), 3);
}
