use feedback_widget::clients::FeedbackClient;
use feedback_widget::config::Config;
use feedback_widget::logger;
use feedback_widget::models::{FileRef, SubmissionPhase};
use feedback_widget::workflow::{CloseCallback, PostSuccess, SubmissionController, SubmitOutcome};
use feedback_widget::SubmissionError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// 本地假服务：接收一个请求，返回指定状态码，并把原始请求交回测试
async fn spawn_server(status_line: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if request_complete(&buf) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            status_line
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        String::from_utf8_lossy(&buf).to_string()
    });

    (format!("http://{}/webhook/feedback", addr), handle)
}

/// 看到 multipart 结束边界即认为请求读完
fn request_complete(buf: &[u8]) -> bool {
    let text = String::from_utf8_lossy(buf);
    let Some(boundary) = text
        .lines()
        .find(|l| l.to_ascii_lowercase().starts_with("content-type: multipart/form-data"))
        .and_then(|l| l.split("boundary=").nth(1))
        .map(|b| b.trim().to_string())
    else {
        return false;
    };
    text.contains(&format!("--{}--", boundary))
}

fn test_config(endpoint_url: String) -> Config {
    Config {
        endpoint_url,
        success_delay_ms: 0,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_submit_sends_multipart_fields() {
    logger::init();

    let (url, server) = spawn_server("200 OK").await;
    let config = test_config(url);
    let controller = SubmissionController::new(FeedbackClient::new(&config), &config, None);

    controller.set_name("  Alice ");
    controller.set_rating(4);
    controller.set_comment("");

    let outcome = controller.submit().await.expect("提交应该成功");
    assert_eq!(outcome, SubmitOutcome::Completed(PostSuccess::FormReset));
    assert_eq!(controller.phase(), SubmissionPhase::Idle);
    assert_eq!(controller.snapshot().rating, 0);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /webhook/feedback"));
    assert!(request.contains("name=\"name\"\r\n\r\nAlice\r\n"));
    assert!(request.contains("name=\"rating\"\r\n\r\n4\r\n"));
    assert!(request.contains("name=\"comment\"\r\n\r\n\r\n"));
    assert!(!request.contains("profilePicture"));
}

#[tokio::test]
async fn test_submit_sends_profile_picture() {
    let (url, server) = spawn_server("204 No Content").await;
    let closed = Arc::new(AtomicUsize::new(0));
    let on_close: CloseCallback = {
        let closed = closed.clone();
        Box::new(move || {
            closed.fetch_add(1, Ordering::SeqCst);
        })
    };
    let config = test_config(url);
    let controller = SubmissionController::new(FeedbackClient::new(&config), &config, Some(on_close));

    controller.set_rating(5);
    controller
        .attach_file(Some(FileRef::new("me.png", "image/png", b"PNGDATA".to_vec())))
        .expect("PNG 应该通过校验");

    let outcome = controller.submit().await.expect("提交应该成功");
    assert_eq!(outcome, SubmitOutcome::Completed(PostSuccess::HostClosed));
    assert_eq!(closed.load(Ordering::SeqCst), 1);

    let request = server.await.unwrap();
    assert!(request.contains("name=\"profilePicture\"; filename=\"me.png\""));
    assert!(request.contains("image/png"));
    assert!(request.contains("PNGDATA"));
}

#[tokio::test]
async fn test_server_error_marks_failed() {
    let (url, server) = spawn_server("500 Internal Server Error").await;
    let config = test_config(url);
    let controller = SubmissionController::new(FeedbackClient::new(&config), &config, None);

    controller.set_rating(2);
    controller.set_name("Bob");

    let err = controller.submit().await.unwrap_err();
    assert_eq!(err, SubmissionError::ServerRejected { status: 500 });
    assert!(matches!(controller.phase(), SubmissionPhase::Failed { .. }));
    assert_eq!(controller.snapshot().name, "Bob");
    assert!(controller.snapshot().can_submit);

    server.await.unwrap();
}

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_submit_to_configured_endpoint() {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();

    let controller = SubmissionController::new(FeedbackClient::new(&config), &config, None);
    controller.set_name("integration test");
    controller.set_rating(5);
    controller.set_comment("sent by the ignored integration test");

    let result = controller.submit().await;
    assert!(result.is_ok(), "应该能够提交到配置的地址: {:?}", result);
}
