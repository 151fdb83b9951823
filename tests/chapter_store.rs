use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chapter_console::{ChapterClient, ChapterView, ConsoleError, NewChapter, Settings};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Store = Arc<Mutex<Vec<Value>>>;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}", addr)
}

fn client(base_url: &str) -> ChapterClient {
    ChapterClient::new(&Settings::with_base_url(base_url)).unwrap()
}

fn ordinals(view: &ChapterView) -> Vec<i64> {
    view.records().iter().map(|r| r.ordinal).collect()
}

#[tokio::test]
async fn loads_and_sorts_wrapped_chapters() {
    let app = Router::new().route(
        "/api/chapters",
        get(|| async {
            Json(json!({
                "code": 200,
                "data": {"chapters": [
                    {"id": 3, "chapter_number": 3, "title_en": "Three"},
                    {"id": 1, "chapter_number": 1, "title_en": "One"},
                    {"id": 2, "chapter_number": 2, "title_en": "Two"},
                ]}
            }))
        }),
    );
    let base = serve(app).await;

    let view = client(&base).load_view().await;
    assert_eq!(vec![1, 2, 3], ordinals(&view));
    assert_eq!("One", view.records()[0].title.en);
}

#[tokio::test]
async fn slow_server_times_out() {
    let app = Router::new().route(
        "/api/chapters",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!([]))
        }),
    );
    let base = serve(app).await;
    let mut settings = Settings::with_base_url(&base);
    settings.request_timeout_ms = 200;
    let client = ChapterClient::new(&settings).unwrap();

    let err = client.load().await.unwrap_err();
    assert!(err.is_timeout(), "{:?}", err);

    let view = client.load_view().await;
    assert_eq!(ChapterView::Failed("request timed out after 200 ms".into()), view);
}

#[tokio::test]
async fn server_error_surfaces_message() {
    let app = Router::new().route(
        "/api/chapters",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "database unavailable"})),
            )
        }),
    );
    let base = serve(app).await;

    match client(&base).load_view().await {
        ChapterView::Failed(message) => {
            assert_eq!("server responded with 500: database unavailable", message)
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_server_fails() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let view = client(&format!("http://{}", addr)).load_view().await;
    assert!(matches!(view, ChapterView::Failed(_)), "{:?}", view);
}

#[tokio::test]
async fn unrecognized_payloads_render_empty() {
    let app = Router::new()
        .route(
            "/api/chapters",
            get(|| async { Json(json!({"status": "ok", "meta": {"total": 0}})) }),
        )
        .route("/html/api/chapters", get(|| async { "<html>maintenance</html>" }))
        .route("/empty/api/chapters", get(|| async { Json(json!({"data": []})) }));
    let base = serve(app).await;

    assert_eq!(ChapterView::Empty, client(&base).load_view().await);
    assert_eq!(
        ChapterView::Empty,
        client(&format!("{}/html/", base)).load_view().await
    );
    assert_eq!(
        ChapterView::Empty,
        client(&format!("{}/empty/", base)).load_view().await
    );
}

async fn list_chapters(State(store): State<Store>) -> Json<Value> {
    Json(json!({"data": store.lock().unwrap().clone()}))
}

async fn create_chapter(
    State(store): State<Store>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut chapters = store.lock().unwrap();
    if chapters
        .iter()
        .any(|c| c["chapter_number"] == body["chapter_number"])
    {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "chapter_number already exists"})),
        );
    }
    let mut created = body;
    created["id"] = json!(100 + chapters.len());
    created["updated_at"] = json!("2024-06-01T08:00:00Z");
    chapters.push(created.clone());
    (StatusCode::CREATED, Json(json!({"data": created})))
}

async fn store_app() -> (String, Store) {
    let store: Store = Arc::new(Mutex::new(vec![
        json!({"id": 1, "chapter_number": 1, "title_zh": "一", "title_en": "One"}),
        json!({"id": 3, "chapter_number": 3, "title_zh": "三", "title_en": "Three"}),
    ]));
    let app = Router::new()
        .route("/api/chapters", get(list_chapters).post(create_chapter))
        .with_state(store.clone());
    (serve(app).await, store)
}

#[tokio::test]
async fn create_sends_form_and_locates_new_chapter() {
    let (base, store) = store_app().await;
    let mut chapter = NewChapter::new(2, "二", "Two");
    chapter.is_published = true;
    chapter.description_en = "The second one".into();

    let located = client(&base).create_and_locate(&chapter).await.unwrap();

    assert_eq!(Some("102".to_string()), located.record.id);
    assert_eq!("Two", located.record.title.en);
    assert_eq!(Some(true), located.record.is_published);
    assert_eq!(Some(1), located.position);
    assert_eq!(vec![1, 2, 3], ordinals(&located.view));

    let sent = store.lock().unwrap()[2].clone();
    assert_eq!(sent["order_index"], 2);
    assert_eq!(sent["description_en"], "The second one");
    assert!(sent.get("cover_image").is_none());
}

#[tokio::test]
async fn rejected_create_surfaces_server_message() {
    let (base, _) = store_app().await;

    let err = client(&base)
        .create(&NewChapter::new(3, "三", "Three again"))
        .await
        .unwrap_err();
    match err {
        ConsoleError::Status { status, message } => {
            assert_eq!(409, status);
            assert_eq!("chapter_number already exists", message);
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn invalid_form_is_not_sent() {
    let (base, store) = store_app().await;

    let err = client(&base)
        .create(&NewChapter::new(4, "四", "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Validation(_)), "{:?}", err);
    assert_eq!(2, store.lock().unwrap().len());
}
