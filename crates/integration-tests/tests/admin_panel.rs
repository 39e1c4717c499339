//! Integration tests for the admin panel forms.
//!
//! Every flow goes through the router: form POST, redirect, then a fresh
//! dashboard GET that re-reads the store.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use wellness_way_integration_tests::{
    admin, get, position, post_form, seed_ad, seed_web_result,
};
use wellness_way_store::{AdRepository, MemoryStore, StoreCall, Table, WebResultRepository};

const NEW_AD: &str = "title=Yoga+Basics&description=Stretch.+Breathe.&url=https%3A%2F%2Fyoga.test&image_url=";

// =============================================================================
// Ads
// =============================================================================

#[tokio::test]
async fn test_add_ad_then_list() {
    let store = MemoryStore::new();
    let router = admin(&store);

    let response = post_form(&router, "/ads", NEW_AD).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/?tab=ads&success=ad_added");

    let page = get(&router, response.location()).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Ad added successfully"));
    assert!(page.body.contains("Yoga Basics"));
    // The add form is back to its empty defaults.
    assert!(page.body.contains(r#"name="title" value="""#));

    let ads = AdRepository::new(&store).list_recent().await.unwrap();
    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0].title, "Yoga Basics");
    assert_eq!(ads[0].image_url, None);
    assert!(!ads[0].is_featured);
}

#[tokio::test]
async fn test_add_ad_with_featured_checkbox() {
    let store = MemoryStore::new();

    let body = format!("{NEW_AD}&is_featured=on");
    post_form(&admin(&store), "/ads", &body).await;

    let ad = AdRepository::new(&store).featured().await.unwrap();
    assert_eq!(ad.title, "Yoga Basics");
}

#[tokio::test]
async fn test_add_ad_with_blank_field_is_rejected_without_store_write() {
    let store = MemoryStore::new();
    let router = admin(&store);

    let body = "title=Kept+Title&description=+++&url=https%3A%2F%2Fyoga.test";
    let response = post_form(&router, "/ads", body).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Please fill in all required fields"));
    assert!(response.body.contains(r#"value="Kept Title""#));
    assert!(!store.calls().iter().any(|call| call.is_write()));
}

#[tokio::test]
async fn test_add_ad_store_failure_shows_notice() {
    let store = MemoryStore::new();
    store.set_unavailable(true);

    let response = post_form(&admin(&store), "/ads", NEW_AD).await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert!(response.body.contains("Failed to add ad"));
}

#[tokio::test]
async fn test_edit_ad_flow() {
    let store = MemoryStore::new();
    let router = admin(&store);
    let ad = seed_ad(&store, "Old Title", "Old body.", false).await;

    let edit = get(&router, &format!("/ads/{}/edit", ad.id)).await;
    assert_eq!(edit.status, StatusCode::OK);
    assert!(edit.body.contains(&format!(r#"action="/ads/{}""#, ad.id)));
    assert!(edit.body.contains(r#"value="Old Title""#));

    let body = "title=New+Title&description=New+body.&url=https%3A%2F%2Fnew.test&is_featured=on";
    let response = post_form(&router, &format!("/ads/{}", ad.id), body).await;
    assert_eq!(response.location(), "/?tab=ads&success=ad_updated");

    let page = get(&router, response.location()).await;
    assert!(page.body.contains("Ad updated successfully"));
    assert!(page.body.contains("New Title"));
    assert!(!page.body.contains("Old Title"));
    // Edit form closed.
    assert!(!page.body.contains(&format!(r#"action="/ads/{}""#, ad.id)));

    let saved = AdRepository::new(&store).get(ad.id).await.unwrap();
    assert_eq!(saved.url, "https://new.test");
    assert!(saved.is_featured);
}

#[tokio::test]
async fn test_edit_ad_with_blank_title_keeps_form_open() {
    let store = MemoryStore::new();
    let router = admin(&store);
    let ad = seed_ad(&store, "Keep Me", "Body.", false).await;

    let body = "title=&description=Changed.&url=https%3A%2F%2Fx.test";
    let response = post_form(&router, &format!("/ads/{}", ad.id), body).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains(&format!(r#"action="/ads/{}""#, ad.id)));
    assert!(response.body.contains("Changed."));
    let saved = AdRepository::new(&store).get(ad.id).await.unwrap();
    assert_eq!(saved.title, "Keep Me");
}

#[tokio::test]
async fn test_edit_ad_during_outage_keeps_form_and_values() {
    let store = MemoryStore::new();
    let router = admin(&store);
    let ad = seed_ad(&store, "Stored Title", "Body.", false).await;
    store.set_unavailable(true);

    let body = "title=Unsaved+Title&description=Unsaved+body.&url=https%3A%2F%2Fx.test&is_featured=on";
    let response = post_form(&router, &format!("/ads/{}", ad.id), body).await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert!(response.body.contains("Failed to update ad"));
    assert!(response.body.contains(&format!(r#"action="/ads/{}""#, ad.id)));
    assert!(response.body.contains(r#"value="Unsaved Title""#));
    assert!(response.body.contains("Unsaved body."));
    assert!(response.body.contains(r#"name="is_featured" checked"#));

    store.set_unavailable(false);
    let saved = AdRepository::new(&store).get(ad.id).await.unwrap();
    assert_eq!(saved.title, "Stored Title");
}

#[tokio::test]
async fn test_ad_values_stored_as_submitted() {
    let store = MemoryStore::new();
    let router = admin(&store);

    let body = "title=+A+&description=+Stretch.+&url=https%3A%2F%2Fyoga.test";
    let response = post_form(&router, "/ads", body).await;
    assert_eq!(response.location(), "/?tab=ads&success=ad_added");

    let ads = AdRepository::new(&store).list_recent().await.unwrap();
    assert_eq!(ads[0].title, " A ");
    assert_eq!(ads[0].description, " Stretch. ");

    let edit = get(&router, &format!("/ads/{}/edit", ads[0].id)).await;
    assert!(edit.body.contains(r#"value=" A ""#));
}

#[tokio::test]
async fn test_delete_ad_requires_confirmation() {
    let store = MemoryStore::new();
    let router = admin(&store);
    let ad = seed_ad(&store, "Doomed", "Body.", false).await;

    let confirm = get(&router, &format!("/ads/{}/delete", ad.id)).await;
    assert_eq!(confirm.status, StatusCode::OK);
    assert!(confirm.body.contains("Are you sure you want to delete this ad?"));
    assert!(confirm.body.contains("Doomed"));

    store.clear_calls();
    let response = post_form(&router, &format!("/ads/{}/delete", ad.id), "").await;
    assert_eq!(response.location(), "/?tab=ads");
    assert!(!store.calls().contains(&StoreCall::Delete(Table::Ads)));

    let response = post_form(&router, &format!("/ads/{}/delete", ad.id), "confirm=yes").await;
    assert_eq!(response.location(), "/?tab=ads&success=ad_deleted");
    assert!(AdRepository::new(&store).list_recent().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_ad_shows_error() {
    let store = MemoryStore::new();
    let router = admin(&store);
    let id = uuid::Uuid::new_v4();

    let confirm = get(&router, &format!("/ads/{id}/delete")).await;
    assert_eq!(confirm.status, StatusCode::NOT_FOUND);

    let response = post_form(&router, &format!("/ads/{id}/delete"), "confirm=yes").await;
    assert_eq!(response.location(), "/?tab=ads&error=ad_delete_failed");
    let page = get(&router, response.location()).await;
    assert!(page.body.contains("Failed to delete ad"));
}

#[tokio::test]
async fn test_ads_listed_newest_first() {
    let store = MemoryStore::new();
    seed_ad(&store, "Older Ad", "Body.", false).await;
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    seed_ad(&store, "Newer Ad", "Body.", true).await;

    let body = get(&admin(&store), "/?tab=ads").await.body;

    assert!(position(&body, "Newer Ad") < position(&body, "Older Ad"));
    assert!(body.contains("Featured</span>"));
}

// =============================================================================
// Web results
// =============================================================================

#[tokio::test]
async fn test_add_web_result_then_list_in_order() {
    let store = MemoryStore::new();
    let router = admin(&store);
    seed_web_result(&store, "Third", 30).await;
    seed_web_result(&store, "First", 10).await;

    let body = "title=Second&description=Middle.&url=https%3A%2F%2Fmid.test&display_order=20";
    let response = post_form(&router, "/web-results", body).await;
    assert_eq!(response.location(), "/?tab=results&success=web_result_added");

    let page = get(&router, response.location()).await.body;
    assert!(page.contains("Web result added successfully"));
    let first = position(&page, "First");
    let second = position(&page, "Second");
    let third = position(&page, "Third");
    assert!(first < second && second < third);
    assert!(page.contains("#20"));
}

#[tokio::test]
async fn test_add_web_result_with_unparsable_order_stores_zero() {
    let store = MemoryStore::new();

    let body = "title=T&description=D.&url=https%3A%2F%2Fd.test&display_order=abc";
    post_form(&admin(&store), "/web-results", body).await;

    let results = WebResultRepository::new(&store).list(None).await.unwrap();
    assert_eq!(results[0].display_order, 0);
}

#[tokio::test]
async fn test_edit_and_delete_web_result() {
    let store = MemoryStore::new();
    let router = admin(&store);
    let result = seed_web_result(&store, "Sleep Tips", 1).await;

    let edit = get(&router, &format!("/web-results/{}/edit", result.id)).await;
    assert!(edit.body.contains(r#"name="display_order" value="1""#));

    let body = "title=Better+Sleep&description=Rest.&url=https%3A%2F%2Fsleep.test&display_order=4";
    let response = post_form(&router, &format!("/web-results/{}", result.id), body).await;
    assert_eq!(response.location(), "/?tab=results&success=web_result_updated");
    let saved = WebResultRepository::new(&store).get(result.id).await.unwrap();
    assert_eq!(saved.title, "Better Sleep");
    assert_eq!(saved.display_order, 4);

    let confirm = get(&router, &format!("/web-results/{}/delete", result.id)).await;
    assert!(confirm.body.contains("Are you sure you want to delete this web result?"));

    let response = post_form(
        &router,
        &format!("/web-results/{}/delete", result.id),
        "confirm=yes",
    )
    .await;
    assert_eq!(response.location(), "/?tab=results&success=web_result_deleted");
    assert!(WebResultRepository::new(&store).list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_web_result_during_outage_keeps_form_and_values() {
    let store = MemoryStore::new();
    let router = admin(&store);
    let result = seed_web_result(&store, "Stored Result", 1).await;
    store.set_unavailable(true);

    let body = "title=Unsaved+Result&description=Rest.&url=https%3A%2F%2Fsleep.test&display_order=9";
    let response = post_form(&router, &format!("/web-results/{}", result.id), body).await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert!(response.body.contains("Failed to update web result"));
    assert!(response.body.contains(&format!(r#"action="/web-results/{}""#, result.id)));
    assert!(response.body.contains(r#"value="Unsaved Result""#));
    assert!(response.body.contains(r#"name="display_order" value="9""#));
}

#[tokio::test]
async fn test_web_result_values_stored_as_submitted() {
    let store = MemoryStore::new();

    let body = "title=+Sleep+&description=Rest.&url=+https%3A%2F%2Fsleep.test&display_order=2";
    post_form(&admin(&store), "/web-results", body).await;

    let results = WebResultRepository::new(&store).list(None).await.unwrap();
    assert_eq!(results[0].title, " Sleep ");
    assert_eq!(results[0].url, " https://sleep.test");
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn test_dashboard_ignores_unknown_codes() {
    let store = MemoryStore::new();

    let response = get(&admin(&store), "/?tab=results&success=bogus&error=ad_add_failed").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Failed to add ad"));
    assert!(response.body.contains("Add New Web Result"));
    assert!(!response.body.contains("Add New Ad"));
}

#[tokio::test]
async fn test_dashboard_load_failure() {
    let store = MemoryStore::new();
    store.set_unavailable(true);

    let response = get(&admin(&store), "/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Failed to load data"));
}

#[tokio::test]
async fn test_dashboard_links_back_to_storefront() {
    let store = MemoryStore::new();

    let response = get(&admin(&store), "/").await;

    assert!(response.body.contains(r#"href="http://localhost:3000""#));
    assert!(response.body.contains("Back to Home"));
    assert_eq!(response.header("cache-control"), "no-store, max-age=0");
    assert_eq!(response.header("x-robots-tag"), "noindex, nofollow");
}

#[tokio::test]
async fn test_edit_unknown_ad_redirects_with_load_error() {
    let store = MemoryStore::new();

    let response = get(&admin(&store), &format!("/ads/{}/edit", uuid::Uuid::new_v4())).await;

    assert_eq!(response.location(), "/?tab=ads&error=load_failed");
}
