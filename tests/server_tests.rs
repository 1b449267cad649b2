//! HTTP tests driving the router directly with `oneshot`.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use slabel::Workspace;
use slabel::server::{AppState, ServerConfig, router};

fn app() -> (Arc<AppState>, Router) {
    let config = ServerConfig {
        listen_addr: "127.0.0.1:0".to_string(),
        data_dir: "unused".into(),
    };
    let state = Arc::new(AppState::new(config, Workspace::in_memory()));
    (state.clone(), router(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ============================================================================
// PAGES
// ============================================================================

#[tokio::test]
async fn test_index_renders_designer() {
    let (_, app) = app();
    let (status, html) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Create Label"));
    assert!(html.contains("Charizard"));
    assert!(html.contains("/assets/designer.css?v="));
}

#[tokio::test]
async fn test_print_view_is_sheet_only() {
    let (_, app) = app();
    let (status, html) = send(&app, get("/print")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("paper-mock"));
    assert!(!html.contains("<form"));
}

#[tokio::test]
async fn test_stylesheet_served() {
    let (_, app) = app();
    let response = app
        .clone()
        .oneshot(get("/assets/designer.css"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");

    let (status, _) = send(&app, get("/assets/missing.css")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// FORM ACTIONS
// ============================================================================

#[tokio::test]
async fn test_save_form_adds_label_and_notifies_once() {
    let (state, app) = app();
    let response = app
        .clone()
        .oneshot(form("/editor/save", "yearSetLine=2016+Evolutions&playerLine=Blastoise&gradeNumber=8"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    assert_eq!(state.session.read().await.workspace.labels().len(), 2);

    let (_, first) = send(&app, get("/")).await;
    assert!(first.contains("Label added!"));
    let (_, second) = send(&app, get("/")).await;
    assert!(!second.contains("Label added!"));
}

#[tokio::test]
async fn test_save_form_without_identity_warns() {
    let (state, app) = app();
    send(&app, form("/editor/save", "gradeTerm=MINT")).await;
    assert_eq!(state.session.read().await.workspace.labels().len(), 1);

    let (_, html) = send(&app, get("/")).await;
    assert!(html.contains("Please enter at least a Card Name or Set!"));
}

#[tokio::test]
async fn test_edit_then_delete_returns_to_create() {
    let (state, app) = app();
    send(&app, form("/editor/edit/0", "")).await;
    let (_, html) = send(&app, get("/")).await;
    assert!(html.contains("Edit Label"));

    send(&app, form("/labels/0/delete", "")).await;
    let session = state.session.read().await;
    assert!(session.workspace.labels().is_empty());
    assert!(!session.editor.is_editing());
}

#[tokio::test]
async fn test_clear_all_flow() {
    let (state, app) = app();
    send(&app, form("/editor/clear", "")).await;
    let (_, html) = send(&app, get("/")).await;
    assert!(html.contains("Are you sure? All labels will be permanently removed."));

    send(&app, form("/editor/clear/confirm", "")).await;
    assert!(state.session.read().await.workspace.labels().is_empty());
}

#[tokio::test]
async fn test_cancel_keeps_typed_fields() {
    let (state, app) = app();
    send(&app, form("/editor/edit/0", "")).await;
    send(&app, form("/editor/cancel", "yearSetLine=&playerLine=Typed&gradeNumber=7")).await;

    {
        let session = state.session.read().await;
        assert!(!session.editor.is_editing());
        assert_eq!(session.editor.fields().player_line, "Typed");
    }
    let (_, html) = send(&app, get("/")).await;
    assert!(html.contains("Create Label"));
    assert!(html.contains(r#"value="Typed""#));
}

#[tokio::test]
async fn test_clear_request_keeps_typed_fields() {
    let (state, app) = app();
    send(&app, form("/editor/clear", "playerLine=Zapdos&cardNumber=145")).await;
    send(&app, form("/editor/clear/dismiss", "")).await;

    let session = state.session.read().await;
    assert!(!session.editor.is_confirming_clear());
    assert_eq!(session.editor.fields().player_line, "Zapdos");
    assert_eq!(session.editor.fields().card_number, "145");
    assert_eq!(session.workspace.labels().len(), 1);
}

#[tokio::test]
async fn test_settings_forms() {
    let (state, app) = app();
    send(&app, form("/settings/border", "color=%23ff0000&size=3")).await;
    send(&app, form("/settings/size", "widthIn=3.25&heightIn=1")).await;
    send(&app, form("/settings/theme", "theme=2")).await;

    let session = state.session.read().await;
    assert_eq!(session.workspace.border().css(), "3px solid #ff0000");
    assert_eq!(session.workspace.label_size().width_in, 3.25);
    assert_eq!(session.workspace.theme_index(), 2);
    assert_eq!(session.workspace.layout().grid.columns, 2);
}

#[tokio::test]
async fn test_invalid_size_form_keeps_size() {
    let (state, app) = app();
    send(&app, form("/settings/size", "widthIn=0&heightIn=1")).await;
    assert_eq!(state.session.read().await.workspace.label_size().width_in, 2.65);
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn test_api_label_crud() {
    let (_, app) = app();

    let (status, _) = send(
        &app,
        json_request("POST", "/api/labels", json!({"playerLine": "Gengar", "gradeNumber": "10"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(
        &app,
        json_request("PUT", "/api/labels/1", json!({"playerLine": "Haunter"})),
    )
    .await;
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"changed": true}));

    let (_, body) = send(
        &app,
        json_request("PUT", "/api/labels/9", json!({"playerLine": "Ghost"})),
    )
    .await;
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"changed": false}));

    let (_, body) = send(&app, get("/api/labels")).await;
    let labels: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(labels[1]["playerLine"], "Haunter");
    assert_eq!(labels[1]["gradeNumber"], "");

    let request = Request::delete("/api/labels/0").body(Body::empty()).unwrap();
    let (_, body) = send(&app, request).await;
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"changed": true}));

    let (_, body) = send(&app, get("/api/labels")).await;
    let labels: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(labels.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_api_rejects_blank_label() {
    let (_, app) = app();
    let (status, _) = send(&app, json_request("POST", "/api/labels", json!({"cardNumber": "#1"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_api_size_validation() {
    let (_, app) = app();
    let (status, _) = send(
        &app,
        json_request("PUT", "/api/settings/size", json!({"widthIn": -1.0, "heightIn": 0.8})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        json_request("PUT", "/api/settings/size", json!({"widthIn": 2.0, "heightIn": 0.5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("/api/layout")).await;
    let layout: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(layout["grid"]["columns"], 3);
    assert_eq!(layout["grid"]["cellWidthIn"], 2.0);
}

#[tokio::test]
async fn test_api_border_clamps_negative_size() {
    let (_, app) = app();
    let (_, body) = send(
        &app,
        json_request("PUT", "/api/settings/border", json!({"color": "#000000", "size": -4.0})),
    )
    .await;
    let border: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(border["size"], 0.0);
}

// ============================================================================
// EXPORT / IMPORT
// ============================================================================

#[tokio::test]
async fn test_export_download() {
    let (_, app) = app();
    let response = app.clone().oneshot(get("/export")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"slab-labels.json\""
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let doc: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(doc["labelWidthIn"], 2.65);
    assert_eq!(doc["labels"][0]["playerLine"], "Charizard");
}

#[tokio::test]
async fn test_api_import_labels_only_keeps_settings() {
    let (state, app) = app();
    send(&app, form("/settings/border", "color=%23123456&size=2")).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/import?name=backup.json",
            json!({"labels": [{"playerLine": "Mew", "cardNumber": 151}]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let notice: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(notice["title"], "Import successful!");
    assert_eq!(notice["description"], "Imported labels from backup.json");

    let session = state.session.read().await;
    let labels = session.workspace.labels();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels.get(0).unwrap().card_number, "151");
    assert_eq!(session.workspace.border().css(), "2px solid #123456");
}

#[tokio::test]
async fn test_api_import_malformed() {
    let (state, app) = app();
    let request = Request::post("/api/import")
        .body(Body::from("{ nope"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let notice: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(notice["title"], "Import failed");
    assert_eq!(state.session.read().await.workspace.labels().len(), 1);
}

#[tokio::test]
async fn test_multipart_import() {
    let (state, app) = app();
    let boundary = "slabelboundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cards.json\"\r\nContent-Type: application/json\r\n\r\n{json}\r\n--{b}--\r\n",
        b = boundary,
        json = r#"{"labels":[{"playerLine":"Ditto"},{"playerLine":"Porygon"}],"labelWidthIn":3}"#,
    );
    let request = Request::post("/import")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    {
        let session = state.session.read().await;
        assert_eq!(session.workspace.labels().len(), 2);
        assert_eq!(session.workspace.label_size().width_in, 3.0);
    }

    let (_, html) = send(&app, get("/")).await;
    assert!(html.contains("Imported labels from cards.json"));
}

#[tokio::test]
async fn test_multipart_import_rejects_binary_upload() {
    let (state, app) = app();
    let boundary = "slabelboundary";
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"photo.json\"\r\nContent-Type: application/json\r\n\r\n",
        b = boundary,
    )
    .into_bytes();
    body.extend_from_slice(&[0xff, 0xfe, 0x00, 0x7b, 0xc3]);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    let request = Request::post("/import")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(state.session.read().await.workspace.labels().len(), 1);

    let (_, html) = send(&app, get("/")).await;
    assert!(html.contains("Import failed"));
    assert!(html.contains("Invalid JSON file or structure."));
    assert!(!html.contains("No file was uploaded."));
}
