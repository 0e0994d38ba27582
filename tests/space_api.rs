mod common;

use axum::http::StatusCode;
use common::{error_message, parse, setup};
use nimbusx::{Language, Space, Store};

const SPACE_BODY: &str = r##"{
    "name": "Docs",
    "color1": "#101010",
    "color2": "#202020",
    "color3": "#303030",
    "color4": "#404040",
    "imageUrl": "https://cdn.example.com/docs.png",
    "primaryLanguage": {"name": "en-US"},
    "languages": [{"name": "en-US"}, {"name": "de-DE"}]
}"##;

#[tokio::test]
async fn test_create_space_roundtrip_with_languages() {
    let app = setup();

    let (status, body) = app.send("POST", "/spaces", Some(SPACE_BODY)).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Space = parse(&body);

    assert_eq!(created.id, 1);
    assert_eq!(created.color3, "#303030");
    let primary = created.primary_language.clone().unwrap();
    assert_eq!(primary.name, "en-US");
    assert_eq!(created.primary_language_id, Some(primary.id));
    let names: Vec<_> = created.languages.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["en-US", "de-DE"]);

    let (status, body) = app.send("GET", "/spaces/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<Space>(&body), created);
}

#[tokio::test]
async fn test_create_space_linking_existing_language() {
    let app = setup();
    let existing = app
        .store
        .create_space(&Space::new("First").with_languages(vec![Language::new("fr")]))
        .unwrap()
        .languages[0]
        .clone();

    let body = format!(
        r#"{{"name":"Second","primaryLanguageId":{id},"languages":[{{"id":{id},"name":"fr"}}]}}"#,
        id = existing.id
    );
    let (status, body) = app.send("POST", "/spaces", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let created: Space = parse(&body);
    assert_eq!(created.primary_language, Some(existing.clone()));
    assert_eq!(created.languages, vec![existing]);
    assert_eq!(app.store.list_languages().unwrap().len(), 1);
}

#[tokio::test]
async fn test_blank_space_is_not_mistaken_for_missing() {
    let app = setup();

    let (status, body) = app.send("POST", "/spaces", Some("{}")).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Space = parse(&body);

    let (status, body) = app.send("GET", &format!("/spaces/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<Space>(&body), created);
}

#[tokio::test]
async fn test_get_missing_space() {
    let app = setup();

    let (status, body) = app.send("GET", "/spaces/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Space not found, by the given id");
}

#[tokio::test]
async fn test_list_spaces() {
    let app = setup();

    let (status, body) = app.send("GET", "/spaces", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(parse::<Vec<Space>>(&body).is_empty());

    app.send("POST", "/spaces", Some(SPACE_BODY)).await;
    app.send("POST", "/spaces", Some(r#"{"name":"Blog"}"#)).await;

    let (_, body) = app.send("GET", "/spaces", None).await;
    let spaces: Vec<Space> = parse(&body);
    assert_eq!(spaces.len(), 2);
    assert_eq!(spaces[0].languages.len(), 2);
    assert!(spaces[1].languages.is_empty());
}

#[tokio::test]
async fn test_update_space() {
    let app = setup();
    let (_, body) = app.send("POST", "/spaces", Some(SPACE_BODY)).await;
    let created: Space = parse(&body);

    let body = r#"{"id":77,"name":"Renamed","languages":[{"name":"it-IT"}]}"#;
    let (status, body) = app.send("PUT", &format!("/spaces/{}", created.id), Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    let updated: Space = parse(&body);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.color1, "");
    assert_eq!(updated.primary_language, None);
    let names: Vec<_> = updated.languages.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["it-IT"]);

    assert_eq!(app.store.get_space(created.id).unwrap(), Some(updated));
    assert_eq!(app.store.get_space(77).unwrap(), None);
}

#[tokio::test]
async fn test_update_missing_space_does_not_create() {
    let app = setup();

    let (status, body) = app.send("PUT", "/spaces/3", Some(r#"{"name":"Ghost"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Space not found, by the given id");
    assert!(app.store.list_spaces().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_space() {
    let app = setup();
    let (_, body) = app.send("POST", "/spaces", Some(SPACE_BODY)).await;
    let created: Space = parse(&body);

    let (status, body) = app.send("DELETE", &format!("/spaces/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(app.store.get_space(created.id).unwrap(), None);
}

#[tokio::test]
async fn test_delete_missing_space() {
    let app = setup();

    let (status, body) = app.send("DELETE", "/spaces/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Space not found, by the given id");
}

#[tokio::test]
async fn test_create_space_with_malformed_body() {
    let app = setup();

    let (status, body) = app.send("POST", "/spaces", Some(r#"{"languages": "en"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_message(&body).is_empty());
    assert!(app.store.list_spaces().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_space_with_array_body() {
    let app = setup();

    let (status, body) = app.send("POST", "/spaces", Some("[]")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("expected a JSON object"));
    assert!(app.store.list_spaces().unwrap().is_empty());
    assert_eq!(app.store.stats().unwrap().languages, 0);
}
