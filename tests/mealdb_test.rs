//! TheMealDB API client tests
//!
//! Tests payload parsing, endpoint wiring, and the empty-on-failure
//! behavior of the `RecipeSource` boundary.

use mockito::{Matcher, Server};
use chefs_choice::api::{MealDbClient, MealDbError, RecipeSource};

const TERIYAKI: &str = r#"{
    "meals": [
        {
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strDrinkAlternate": null,
            "strCategory": "Chicken",
            "strArea": "American",
            "strInstructions": "Preheat oven to 350° F.",
            "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
            "strTags": "Meat,Casserole",
            "strYoutube": "https://www.youtube.com/watch?v=4aZr5hZXP_s",
            "strIngredient1": "soy sauce",
            "strIngredient2": "water",
            "strIngredient3": "brown sugar",
            "strIngredient4": "",
            "strIngredient5": null,
            "strMeasure1": "3/4 cup",
            "strMeasure2": "1/2 cup",
            "strMeasure3": "1/4 cup",
            "strMeasure4": "",
            "strMeasure5": null,
            "strSource": null,
            "dateModified": null
        }
    ]
}"#;

// =============================================================================
// Single Recipe
// =============================================================================

#[tokio::test]
async fn test_random_parses_recipe() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/random.php")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TERIYAKI)
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url());
    let recipe = client.fetch_random().await.unwrap();

    mock.assert_async().await;

    assert_eq!(recipe.id, "52772");
    assert_eq!(recipe.name, "Teriyaki Chicken Casserole");
    assert_eq!(recipe.category, "Chicken");
    assert_eq!(recipe.area, "American");
    assert_eq!(
        recipe.video(),
        Some("https://www.youtube.com/watch?v=4aZr5hZXP_s")
    );
    let ingredients: Vec<String> = recipe.ingredients().map(|i| i.to_string()).collect();
    assert_eq!(
        ingredients,
        vec!["3/4 cup soy sauce", "1/2 cup water", "1/4 cup brown sugar"]
    );
}

#[tokio::test]
async fn test_lookup_by_id() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "52772".into()))
        .with_status(200)
        .with_body(TERIYAKI)
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url());
    let recipe = client.fetch_by_id("52772").await;

    mock.assert_async().await;
    assert_eq!(recipe.unwrap().id, "52772");
}

#[tokio::test]
async fn test_lookup_not_found_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"meals": null}"#)
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url());
    assert!(client.lookup_meal("1").await.unwrap().is_none());
    assert!(client.fetch_by_id("1").await.is_none());
}

// =============================================================================
// Lists
// =============================================================================

#[tokio::test]
async fn test_search_encodes_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "chicken pie".into()))
        .with_status(200)
        .with_body(TERIYAKI)
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url());
    let results = client.search_by_name("chicken pie").await;

    mock.assert_async().await;
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_search_no_matches() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"meals": null}"#)
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url());
    assert!(client.search_by_name("zzzz").await.is_empty());
}

#[tokio::test]
async fn test_blank_search_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url());
    assert!(client.search_by_name("   ").await.is_empty());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_random_selection_batch() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/randomselection.php")
        .with_status(200)
        .with_body(
            r#"{"meals": [
                {"idMeal": "1", "strMeal": "One"},
                {"idMeal": "2", "strMeal": "Two"},
                {"strMeal": "No id"}
            ]}"#,
        )
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url());
    let batch = client.fetch_random_batch().await;

    let ids: Vec<_> = batch.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[tokio::test]
async fn test_latest() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/latest.php")
        .with_status(200)
        .with_body(TERIYAKI)
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url());
    assert_eq!(client.fetch_latest().await.len(), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_categories_parse() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/categories.php")
        .with_status(200)
        .with_body(
            r#"{"categories": [
                {
                    "idCategory": "1",
                    "strCategory": "Beef",
                    "strCategoryThumb": "https://www.themealdb.com/images/category/beef.png",
                    "strCategoryDescription": "Beef is the culinary name for meat from cattle."
                },
                {"idCategory": "2", "strCategory": "Chicken"}
            ]}"#,
        )
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url());
    let categories = client.fetch_categories().await;

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Beef");
    assert!(categories[0].description.starts_with("Beef is"));
    assert!(categories[1].thumbnail.is_empty());
}

#[tokio::test]
async fn test_filter_by_category_partial_records() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("c".into(), "Seafood".into()))
        .with_status(200)
        .with_body(
            r#"{"meals": [
                {"strMeal": "Baked salmon", "strMealThumb": "https://x/1.jpg", "idMeal": "52959"}
            ]}"#,
        )
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url());
    let recipes = client.fetch_by_category("Seafood").await;

    mock.assert_async().await;
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].id, "52959");
    assert!(recipes[0].area.is_empty());
    assert!(recipes[0].ingredients.is_empty());
    assert!(!recipes[0].has_video());
}

// =============================================================================
// Error Handling
// =============================================================================

#[tokio::test]
async fn test_server_error_is_typed_then_absorbed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/latest.php")
        .with_status(500)
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url());

    let err = client.latest_meals().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MealDbError>(),
        Some(MealDbError::ServerError(500))
    ));
    assert!(client.fetch_latest().await.is_empty());
}

#[tokio::test]
async fn test_malformed_payload_is_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/random.php")
        .with_status(200)
        .with_body("<html>Service unavailable</html>")
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url());

    let err = client.random_meal().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MealDbError>(),
        Some(MealDbError::InvalidResponse(_))
    ));
    assert!(client.fetch_random().await.is_none());
}

#[tokio::test]
async fn test_not_found_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url());
    let err = client.lookup_meal("1").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MealDbError>(),
        Some(MealDbError::NotFound)
    ));
}

#[tokio::test]
async fn test_rate_limit_retries_then_gives_up() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/random.php")
        .with_status(429)
        .with_header("Retry-After", "0")
        .expect(3)
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url());
    let err = client.random_meal().await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(
        err.downcast_ref::<MealDbError>(),
        Some(MealDbError::RateLimited)
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_empty() {
    // Nothing listens on port 9 (discard) in the test environment
    let client = MealDbClient::with_base_url("http://127.0.0.1:9")
        .timeout(std::time::Duration::from_secs(2));

    assert!(client.fetch_random().await.is_none());
    assert!(client.fetch_categories().await.is_empty());
}
