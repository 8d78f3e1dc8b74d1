//! End-to-end integration tests
//!
//! These tests drive the complete HTTP surface against an in-memory store.
//! Each test:
//! 1. Builds the router around a fresh in-memory SQLite database
//! 2. Sends requests with `tower::ServiceExt::oneshot`
//! 3. Checks status codes, headers and rendered bodies
//!
//! Uploads are sent as hand-built multipart bodies, the way a browser posts
//! the upload form.

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use customer_csv_import::web::DEFAULT_MAX_UPLOAD_BYTES;
    use customer_csv_import::{router, AppState, CustomerStore};
    use rstest::rstest;
    use tower::ServiceExt;

    const BOUNDARY: &str = "----customer-import-test-boundary";

    struct TestApp {
        app: Router,
        store: CustomerStore,
    }

    impl TestApp {
        async fn new() -> Self {
            Self::with_limit(DEFAULT_MAX_UPLOAD_BYTES).await
        }

        async fn with_limit(max_upload_bytes: usize) -> Self {
            let store = CustomerStore::in_memory()
                .await
                .expect("Failed to open in-memory store");
            let state = AppState::new(store.clone()).expect("Failed to compile templates");
            Self {
                app: router(state, max_upload_bytes),
                store,
            }
        }

        /// Send a request and return (status, headers, body as text)
        async fn send(&self, request: Request<Body>) -> (StatusCode, header::HeaderMap, String) {
            let response = self
                .app
                .clone()
                .oneshot(request)
                .await
                .expect("Router failed");
            let status = response.status();
            let headers = response.headers().clone();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("Failed to read body");
            (status, headers, String::from_utf8_lossy(&bytes).into_owned())
        }

        async fn get(&self, uri: &str) -> (StatusCode, header::HeaderMap, String) {
            self.send(Request::get(uri).body(Body::empty()).unwrap())
                .await
        }

        async fn upload(&self, file_name: &str, content: &[u8]) -> (StatusCode, String) {
            let (status, _, body) = self
                .send(multipart_request("file", Some(file_name), content))
                .await;
            (status, body)
        }
    }

    /// Build a multipart/form-data POST to /upload with a single field
    fn multipart_request(field: &str, file_name: Option<&str>, content: &[u8]) -> Request<Body> {
        let disposition = match file_name {
            Some(name) => format!("form-data; name=\"{}\"; filename=\"{}\"", field, name),
            None => format!("form-data; name=\"{}\"", field),
        };

        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: {}\r\nContent-Type: text/csv\r\n\r\n",
                BOUNDARY, disposition
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        Request::post("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new().await;
        let (status, _, body) = app.get("/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_home_renders_form_and_empty_table() {
        let app = TestApp::new().await;
        let (status, headers, body) = app.get("/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(body.contains("action=\"/upload\""));
        assert!(body.contains("Latest records (top 50)"));
        assert!(!body.contains("Inserted:"));
    }

    #[tokio::test]
    async fn test_sample_download_is_fixed() {
        let app = TestApp::new().await;

        // Store contents must not affect the sample
        app.upload("people.csv", b"name,email,age\nZed,zed@x.io,50\n")
            .await;
        let (status, headers, body) = app.get("/sample").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"sample_customers.csv\""
        );
        assert_eq!(
            body,
            "name,email,age\nAlice,alice@example.com,30\nBob,bob@example.org,25\n"
        );
    }

    #[tokio::test]
    async fn test_upload_mixed_rows_reports_summary() {
        let app = TestApp::new().await;

        let (status, body) = app
            .upload(
                "customers.csv",
                b"name,email,age\nAlice,alice@example.com,30\nBo,bad,200\n",
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Inserted: <b>1</b>"));
        assert!(body.contains("Errors: <b>1</b>"));
        assert!(body.contains("<li>Row 3: invalid email</li>"));
        assert!(body.contains("<td>Alice</td><td>alice@example.com</td><td>30</td>"));

        let stored = app.store.list_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_upload_duplicate_email_counts_as_error() {
        let app = TestApp::new().await;
        app.upload("first.csv", b"name,email,age\nAlice,alice@example.com,30\n")
            .await;

        let (status, body) = app
            .upload("second.CSV", b"name,email,age\nAlicia,ALICE@example.com,31\n")
            .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Inserted: <b>0</b>"));
        assert!(body.contains("<li>Row 2: duplicate email (already imported)</li>"));
        assert_eq!(app.store.list_all().await.unwrap().len(), 1);
    }

    #[rstest]
    #[case::no_name("name")]
    #[case::no_email("email")]
    #[case::no_age("age")]
    #[tokio::test]
    async fn test_upload_missing_header_column_is_rejected(#[case] dropped: &str) {
        let app = TestApp::new().await;
        let columns: Vec<&str> = ["name", "email", "age"]
            .into_iter()
            .filter(|c| *c != dropped)
            .collect();
        let content = format!("{}\nAlice,alice@example.com\n", columns.join(","));

        let (status, body) = app.upload("customers.csv", content.as_bytes()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Header must include: name,email,age");
        assert!(app.store.list_all().await.unwrap().is_empty());
    }

    #[rstest]
    #[case::text_file("customers.txt")]
    #[case::double_extension("customers.csv.txt")]
    #[tokio::test]
    async fn test_upload_wrong_extension_is_rejected(#[case] file_name: &str) {
        let app = TestApp::new().await;

        let (status, body) = app
            .upload(file_name, b"name,email,age\nAlice,alice@example.com,30\n")
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Please upload a .csv file");
        assert!(app.store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_without_file_part_is_rejected() {
        let app = TestApp::new().await;

        let (status, _, body) = app
            .send(multipart_request("attachment", Some("customers.csv"), b"name,email,age\n"))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "No file part");

        let (status, _, body) = app
            .send(multipart_request("file", None, b"name,email,age\n"))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "No file part");
    }

    #[tokio::test]
    async fn test_upload_not_multipart_is_rejected() {
        let app = TestApp::new().await;

        let request = Request::post("/upload")
            .header(header::CONTENT_TYPE, "text/csv")
            .body(Body::from("name,email,age\n"))
            .unwrap();
        let (status, _, body) = app.send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "No file part");
    }

    #[tokio::test]
    async fn test_upload_over_size_ceiling_is_refused() {
        let app = TestApp::with_limit(256).await;
        let mut content = b"name,email,age\n".to_vec();
        for i in 0..50 {
            content.extend_from_slice(format!("Person {i},p{i}@example.com,30\n").as_bytes());
        }

        let (status, _) = app.upload("big.csv", &content).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(app.store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_malformed_utf8_commits_nothing() {
        let app = TestApp::new().await;
        let mut content = b"name,email,age\nAlice,alice@example.com,30\n".to_vec();
        content.extend_from_slice(b"B\xffb,bob@example.com,31\n");

        let (status, body) = app.upload("customers.csv", &content).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.starts_with("File must be UTF-8 encoded"));
        assert!(app.store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_escapes_user_text() {
        let app = TestApp::new().await;

        let (status, body) = app
            .upload(
                "customers.csv",
                b"name,email,age\n<i>Mallory</i>,mallory@example.com,40\n",
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("<i>Mallory</i>"));
        assert!(body.contains("&lt;i&gt;Mallory"));
    }

    #[tokio::test]
    async fn test_export_then_reimport_yields_only_duplicates() {
        let app = TestApp::new().await;
        app.upload(
            "customers.csv",
            b"name,email,age\n\"Smith, Jo\",jo@example.com,40\nAlice,alice@example.com,30\n",
        )
        .await;

        let (status, headers, exported) = app.get("/export").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"customers_export.csv\""
        );

        let lines: Vec<&str> = exported.lines().collect();
        assert_eq!(lines[0], "name,email,age,created_at");
        assert!(lines[1].starts_with("\"Smith, Jo\",jo@example.com,40,"));
        assert!(lines[2].starts_with("Alice,alice@example.com,30,"));
        assert!(lines[2].ends_with('Z'));

        let (status, body) = app.upload("customers_export.csv", exported.as_bytes()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Inserted: <b>0</b>"));
        assert!(body.contains("<li>Row 2: duplicate email (already imported)</li>"));
        assert!(body.contains("<li>Row 3: duplicate email (already imported)</li>"));
        assert_eq!(app.store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_home_shows_latest_first() {
        let app = TestApp::new().await;
        app.upload(
            "customers.csv",
            b"name,email,age\nFirst,first@example.com,20\nSecond,second@example.com,21\n",
        )
        .await;

        let (_, _, body) = app.get("/").await;
        let first = body.find("first@example.com").unwrap();
        let second = body.find("second@example.com").unwrap();

        assert!(second < first);
    }
}
