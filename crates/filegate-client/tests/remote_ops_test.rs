//! Integration tests for the remote file gateway against a mock file-service.

use bytes::Bytes;
use filegate_client::{
    AccessTokenOptions, FileCred, FileEdit, FileGateway, FileServiceConfig, FileStorage,
    FileUpload, TokenPurpose,
};
use mockito::Matcher;

fn config(api_url: &str) -> FileServiceConfig {
    FileServiceConfig {
        api_url: api_url.to_string(),
        file_access: AccessTokenOptions {
            secret: "access-secret".to_string(),
            expired_ms: None,
        },
        file_access_link: AccessTokenOptions {
            secret: "link-secret".to_string(),
            expired_ms: None,
        },
    }
}

fn upload(name: &str, data: &'static [u8]) -> FileUpload {
    FileUpload {
        user_id: "test-user".to_string(),
        name: name.to_string(),
        public: Some(false),
        storage: Some(FileStorage::Db),
        file_type: Some("document".to_string()),
        mime: Some("text/plain".to_string()),
        data: Bytes::from_static(data),
    }
}

fn cred(file_id: &str) -> FileCred {
    FileCred {
        file_id: file_id.to_string(),
        user_id: "test-user".to_string(),
    }
}

fn record_json(id: &str, name: &str) -> String {
    format!(
        r#"{{"ok":true,"result":{{"id":"{}","userId":"test-user","name":"{}","ext":"txt","mime":"text/plain","type":"document","public":false,"storage":"db"}}}}"#,
        id, name
    )
}

fn bearer() -> Matcher {
    Matcher::Regex(r"^Bearer [A-Za-z0-9_\-]+\.[A-Za-z0-9_\-]+\.[A-Za-z0-9_\-]+$".to_string())
}

#[tokio::test]
async fn create_posts_multipart_and_returns_record() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/file")
        .match_header("authorization", bearer())
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data".to_string()),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(record_json("file-1", "notes.txt"))
        .create_async()
        .await;

    let gateway = FileGateway::new(config(&server.url())).unwrap();
    let record = gateway.create(&upload("notes.txt", b"hello")).await.unwrap();

    assert_eq!(record.id, "file-1");
    assert_eq!(record.name, "notes.txt");
    assert_eq!(record.storage, FileStorage::Db);
    mock.assert_async().await;
}

#[tokio::test]
async fn edit_puts_to_the_file_resource() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/file/file-1")
        .match_header("authorization", bearer())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(record_json("file-1", "notes-v2.txt"))
        .create_async()
        .await;

    let gateway = FileGateway::new(config(&server.url())).unwrap();
    let edit = FileEdit {
        file_id: "file-1".to_string(),
        upload: upload("notes-v2.txt", b"hello again"),
    };
    let record = gateway.edit(&edit).await.unwrap();

    assert_eq!(record.id, "file-1");
    assert_eq!(record.name, "notes-v2.txt");
    mock.assert_async().await;
}

#[tokio::test]
async fn get_returns_the_raw_bytes() {
    let payload: &[u8] = &[0x25, 0x50, 0x44, 0x46, 0x00, 0xff, 0x07];

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/file/file-1")
        .match_header("authorization", bearer())
        .with_status(200)
        .with_body(payload)
        .create_async()
        .await;

    let gateway = FileGateway::new(config(&server.url())).unwrap();
    let data = gateway.get(&cred("file-1")).await.unwrap();

    assert_eq!(data.as_ref(), payload);
    mock.assert_async().await;
}

#[tokio::test]
async fn info_parses_the_record_envelope() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/file/file-1/info")
        .match_header("authorization", bearer())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(record_json("file-1", "notes.txt"))
        .create_async()
        .await;

    let gateway = FileGateway::new(config(&server.url())).unwrap();
    let record = gateway.info(&cred("file-1")).await.unwrap();

    assert_eq!(record.id, "file-1");
    assert_eq!(record.mime, "text/plain");
    assert_eq!(record.file_type, "document");
    assert!(!record.public);
    mock.assert_async().await;
}

#[tokio::test]
async fn destroy_returns_true_on_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/file/file-1")
        .match_header("authorization", bearer())
        .with_status(204)
        .create_async()
        .await;

    let gateway = FileGateway::new(config(&server.url())).unwrap();
    assert!(gateway.destroy(&cred("file-1")).await.unwrap());
    mock.assert_async().await;
}

#[tokio::test]
async fn failures_never_echo_the_response_body() {
    let internal_detail = "stack trace: storage shard 7 unreachable";

    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/file")
        .with_status(500)
        .with_body(internal_detail)
        .create_async()
        .await;
    server
        .mock("GET", "/file/file-1")
        .with_status(502)
        .with_body(internal_detail)
        .create_async()
        .await;
    server
        .mock("GET", "/file/file-1/info")
        .with_status(500)
        .with_body(internal_detail)
        .create_async()
        .await;
    server
        .mock("PUT", "/file/file-1")
        .with_status(403)
        .with_body(internal_detail)
        .create_async()
        .await;
    server
        .mock("DELETE", "/file/file-1")
        .with_status(500)
        .with_body(internal_detail)
        .create_async()
        .await;

    let gateway = FileGateway::new(config(&server.url())).unwrap();

    let create_err = gateway
        .create(&upload("notes.txt", b"hello"))
        .await
        .unwrap_err();
    assert_eq!(
        create_err.to_string(),
        "Failed to create notes.txt for test-user"
    );

    let edit_err = gateway
        .edit(&FileEdit {
            file_id: "file-1".to_string(),
            upload: upload("notes.txt", b"hello"),
        })
        .await
        .unwrap_err();
    let get_err = gateway.get(&cred("file-1")).await.unwrap_err();
    let info_err = gateway.info(&cred("file-1")).await.unwrap_err();
    let destroy_err = gateway.destroy(&cred("file-1")).await.unwrap_err();

    for err in [create_err, edit_err, get_err, info_err, destroy_err] {
        assert!(
            !err.to_string().contains(internal_detail),
            "error leaked the remote response body: {}",
            err
        );
        assert!(!err.to_string().contains("stack trace"));
    }
}

#[tokio::test]
async fn invalid_envelope_is_a_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/file")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let gateway = FileGateway::new(config(&server.url())).unwrap();
    let err = gateway
        .create(&upload("notes.txt", b"hello"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        filegate_client::FileServiceError::InvalidResponse(_)
    ));
}

#[tokio::test]
async fn transport_failures_propagate() {
    // Nothing listens on this port; the OS refuses the connection.
    let gateway = FileGateway::new(config("http://127.0.0.1:9")).unwrap();
    let err = gateway.get(&cred("file-1")).await.unwrap_err();
    assert!(matches!(
        err,
        filegate_client::FileServiceError::Transport(_)
    ));
}

// Full lifecycle: upload, download byte-for-byte, inspect, destroy, and then
// observe the resource gone.
#[tokio::test]
async fn upload_download_inspect_destroy_lifecycle() {
    let payload: &[u8] = b"quarterly report body";

    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/file")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(record_json("file-9", "report.txt"))
        .create_async()
        .await;
    let get_mock = server
        .mock("GET", "/file/file-9")
        .with_status(200)
        .with_body(payload)
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/file/file-9/info")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(record_json("file-9", "report.txt"))
        .create_async()
        .await;
    server
        .mock("DELETE", "/file/file-9")
        .with_status(200)
        .create_async()
        .await;

    let gateway = FileGateway::new(config(&server.url())).unwrap();
    let upload_req = upload("report.txt", b"quarterly report body");

    let created = gateway.create(&upload_req).await.unwrap();
    assert!(!created.id.is_empty());

    let file_cred = cred(&created.id);
    let downloaded = gateway.get(&file_cred).await.unwrap();
    assert_eq!(downloaded.as_ref(), payload);

    let info = gateway.info(&file_cred).await.unwrap();
    assert_eq!(info.name, upload_req.name);
    assert_eq!(Some(info.mime.clone()), upload_req.mime);
    assert_eq!(Some(info.file_type.clone()), upload_req.file_type);
    assert_eq!(Some(info.public), upload_req.public);
    assert_eq!(Some(info.storage), upload_req.storage);

    assert!(gateway.destroy(&file_cred).await.unwrap());
    get_mock.assert_async().await;

    // Resource is gone now; the most recent matching mock answers 404.
    server
        .mock("GET", "/file/file-9")
        .with_status(404)
        .with_body("not found")
        .create_async()
        .await;

    let err = gateway.get(&file_cred).await.unwrap_err();
    assert!(matches!(
        err,
        filegate_client::FileServiceError::DownloadFailed(_)
    ));
}

// A caller holding only the direct link has everything needed to fetch the
// resource: the path plus an embedded direct-link token.
#[tokio::test]
async fn direct_link_is_self_authenticating() {
    let gateway = FileGateway::new(config("http://files.example.com/api")).unwrap();
    let link = gateway.direct_link(&cred("file-1")).unwrap();

    assert_eq!(link.path(), "/api/file/file-1");

    let token = link
        .query_pairs()
        .find(|(k, _)| k == "token")
        .map(|(_, v)| v.into_owned())
        .expect("token query parameter");

    let claims = gateway
        .validate_token(&token, TokenPurpose::DirectLink)
        .unwrap();
    assert_eq!(claims.user_id, "test-user");
}
