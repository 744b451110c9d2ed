use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use formgate_core::{MultipartError, SizeLimits};
use formgate_http::{Headers, MultipartReceiver, ReceiverError};
use formgate_types::FieldType;
use futures_util::stream;

const BOUNDARY: &str = "----formgate-test-7MA4YWxkTrZu0gW";

fn headers() -> Headers {
    Headers::new().with(
        "Content-Type",
        format!("multipart/form-data; boundary={BOUNDARY}"),
    )
}

fn limits() -> SizeLimits {
    SizeLimits::default()
        .max_field_bytes(4096)
        .max_attachment_bytes(1024)
}

fn field_part(name: &str, value: &str) -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
    )
    .into_bytes()
}

fn file_part(name: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut part = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    part.extend_from_slice(content);
    part.extend_from_slice(b"\r\n");
    part
}

fn closing() -> Vec<u8> {
    format!("--{BOUNDARY}--\r\n").into_bytes()
}

fn join(parts: &[Vec<u8>]) -> Vec<u8> {
    parts.concat()
}

/// Split `body` into chunks of `size` bytes and count how many are pulled.
fn chunked(
    body: &[u8],
    size: usize,
    pulled: &Arc<AtomicUsize>,
) -> (usize, impl futures_core::Stream<Item = Result<Bytes, Infallible>>) {
    let chunks: Vec<Bytes> = body.chunks(size).map(Bytes::copy_from_slice).collect();
    let total = chunks.len();
    let pulled = Arc::clone(pulled);
    let stream = stream::iter(chunks.into_iter().map(move |chunk| {
        pulled.fetch_add(1, Ordering::SeqCst);
        Ok(chunk)
    }));
    (total, stream)
}

const BODY_WITH_ATTACHMENT: &str = r#"{"responses":[
    {"_id":"f1","fieldType":"nric","question":"NRIC","answer":"S9912345A"},
    {"_id":"f2","fieldType":"attachment","question":"Upload","answer":"report.pdf"}
]}"#;

#[tokio::test]
async fn test_body_and_attachment_reconciled_across_small_chunks() {
    let body = join(&[
        field_part("body", BODY_WITH_ATTACHMENT),
        file_part("f2", "report.pdf", b"%PDF-1.7 fake"),
        closing(),
    ]);
    for size in [1, 7, 64, body.len()] {
        let pulled = Arc::new(AtomicUsize::new(0));
        let (_, stream) = chunked(&body, size, &pulled);
        let mut receiver = MultipartReceiver::new(&headers(), limits()).unwrap();
        let form = receiver.receive(stream).await.unwrap();

        assert_eq!(form.len(), 2);
        let f2 = form.get("f2").unwrap();
        assert_eq!(f2.field_type, FieldType::Attachment);
        assert_eq!(f2.filename.as_deref(), Some("report.pdf"));
        assert_eq!(f2.content, b"%PDF-1.7 fake");
        assert!(form.get("f1").unwrap().content.is_empty());
    }
}

#[tokio::test]
async fn test_body_may_follow_files() {
    let body = join(&[
        file_part("f2", "report.pdf", b"abc"),
        field_part("body", BODY_WITH_ATTACHMENT),
        closing(),
    ]);
    let pulled = Arc::new(AtomicUsize::new(0));
    let (_, stream) = chunked(&body, 16, &pulled);
    let mut receiver = MultipartReceiver::new(&headers(), limits()).unwrap();
    let form = receiver.receive(stream).await.unwrap();
    assert_eq!(form.get("f2").unwrap().content, b"abc");
}

#[tokio::test]
async fn test_attachment_at_exact_limit_is_accepted() {
    let content = vec![b'a'; 1024];
    let body = join(&[
        field_part("body", BODY_WITH_ATTACHMENT),
        file_part("f2", "report.pdf", &content),
        closing(),
    ]);
    let pulled = Arc::new(AtomicUsize::new(0));
    let (_, stream) = chunked(&body, 100, &pulled);
    let mut receiver = MultipartReceiver::new(&headers(), limits()).unwrap();
    let form = receiver.receive(stream).await.unwrap();
    assert_eq!(form.get("f2").unwrap().content.len(), 1024);
}

#[tokio::test]
async fn test_attachment_one_byte_over_rejected_before_stream_ends() {
    let content = vec![b'a'; 1025];
    let segments = vec![
        file_part("f2", "report.pdf", b"")
            .strip_suffix(b"\r\n")
            .map(<[u8]>::to_vec)
            .unwrap(),
        content,
        format!("\r\n--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"body\"\r\n\r\n")
            .into_bytes(),
        format!("{BODY_WITH_ATTACHMENT}\r\n").into_bytes(),
        closing(),
    ];
    let total = segments.len();
    let pulled = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&pulled);
    let stream = stream::iter(segments.into_iter().map(move |segment| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok::<_, Infallible>(Bytes::from(segment))
    }));

    let mut receiver = MultipartReceiver::new(&headers(), limits()).unwrap();
    let err = receiver.receive(stream).await.unwrap_err();
    assert!(matches!(err, ReceiverError::ContentLimit { .. }));
    assert_eq!(err.status_code(), 413);
    assert!(pulled.load(Ordering::SeqCst) < total);
}

#[tokio::test]
async fn test_large_upload_stops_pulling_early() {
    let content = vec![0u8; 64 * 1024];
    let body = join(&[
        file_part("f2", "big.zip", &content),
        field_part("body", BODY_WITH_ATTACHMENT),
        closing(),
    ]);
    let pulled = Arc::new(AtomicUsize::new(0));
    let (total, stream) = chunked(&body, 512, &pulled);
    let mut receiver = MultipartReceiver::new(&headers(), limits()).unwrap();
    let err = receiver.receive(stream).await.unwrap_err();
    assert!(matches!(err, ReceiverError::ContentLimit { .. }));
    assert!(pulled.load(Ordering::SeqCst) < total / 4);
}

#[tokio::test]
async fn test_invalid_body_json_is_content_parsing_error() {
    let body = join(&[field_part("body", r#"{"responses":[{"_id":"#), closing()]);
    let pulled = Arc::new(AtomicUsize::new(0));
    let (_, stream) = chunked(&body, 32, &pulled);
    let mut receiver = MultipartReceiver::new(&headers(), limits()).unwrap();
    let err = receiver.receive(stream).await.unwrap_err();
    assert!(matches!(err, ReceiverError::ContentParsing { .. }));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_truncated_stream_is_multipart_error() {
    let body = field_part("body", r#"{"responses":[]}"#);
    let pulled = Arc::new(AtomicUsize::new(0));
    let (_, stream) = chunked(&body, 8, &pulled);
    let mut receiver = MultipartReceiver::new(&headers(), limits()).unwrap();
    let err = receiver.receive(stream).await.unwrap_err();
    assert!(matches!(err, ReceiverError::Multipart { .. }));
}

#[tokio::test]
async fn test_duplicate_uploads_last_wins_and_orphans_dropped() {
    let body = join(&[
        field_part("body", BODY_WITH_ATTACHMENT),
        file_part("f2", "first.pdf", b"one"),
        file_part("f9", "orphan.pdf", b"zzz"),
        file_part("f2", "second.pdf", b"two"),
        closing(),
    ]);
    let pulled = Arc::new(AtomicUsize::new(0));
    let (_, stream) = chunked(&body, 13, &pulled);
    let mut receiver = MultipartReceiver::new(&headers(), limits()).unwrap();
    let form = receiver.receive(stream).await.unwrap();

    let f2 = form.get("f2").unwrap();
    assert_eq!(f2.filename.as_deref(), Some("second.pdf"));
    assert_eq!(f2.content, b"two");
    assert!(form.get("f9").is_none());
    assert_eq!(form.attachments().count(), 1);
}

#[tokio::test]
async fn test_file_parts_without_filename_are_ignored() {
    let body = join(&[
        field_part("body", BODY_WITH_ATTACHMENT),
        file_part("f2", "", b"ignored"),
        closing(),
    ]);
    let pulled = Arc::new(AtomicUsize::new(0));
    let (_, stream) = chunked(&body, 64, &pulled);
    let mut receiver = MultipartReceiver::new(&headers(), limits()).unwrap();
    let form = receiver.receive(stream).await.unwrap();
    assert!(form.get("f2").unwrap().content.is_empty());
}

#[tokio::test]
async fn test_path_like_filename_is_rejected() {
    let body = join(&[
        field_part("body", BODY_WITH_ATTACHMENT),
        file_part("f2", "../../etc/passwd", b"root"),
        closing(),
    ]);
    let pulled = Arc::new(AtomicUsize::new(0));
    let (_, stream) = chunked(&body, 64, &pulled);
    let mut receiver = MultipartReceiver::new(&headers(), limits()).unwrap();
    let err = receiver.receive(stream).await.unwrap_err();
    assert!(matches!(err, ReceiverError::Multipart { .. }));
}

#[tokio::test]
async fn test_same_input_same_output() {
    let body = join(&[
        field_part("body", BODY_WITH_ATTACHMENT),
        file_part("f2", "a.pdf", b"x"),
        closing(),
    ]);
    let mut results = Vec::new();
    for size in [3, 11] {
        let pulled = Arc::new(AtomicUsize::new(0));
        let (_, stream) = chunked(&body, size, &pulled);
        let mut receiver = MultipartReceiver::new(&headers(), limits()).unwrap();
        results.push(receiver.receive(stream).await.unwrap());
    }
    assert_eq!(results[0], results[1]);
}

#[tokio::test]
async fn test_unterminated_part_headers_hit_content_limit_early() {
    let mut body = format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"").into_bytes();
    body.extend_from_slice(&vec![b'h'; 4 * 1024 * 1024]);
    let pulled = Arc::new(AtomicUsize::new(0));
    let (total, stream) = chunked(&body, 4096, &pulled);
    let mut receiver = MultipartReceiver::new(&headers(), limits()).unwrap();
    let err = receiver.receive(stream).await.unwrap_err();

    assert!(matches!(err, ReceiverError::ContentLimit { .. }));
    assert_eq!(err.status_code(), 413);
    assert!(pulled.load(Ordering::SeqCst) <= 3);
    assert!(pulled.load(Ordering::SeqCst) < total);
}

#[tokio::test]
async fn test_header_bytes_count_toward_request_ceiling() {
    let mut body = format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"").into_bytes();
    body.extend_from_slice(&vec![b'h'; 6000]);
    let pulled = Arc::new(AtomicUsize::new(0));
    let (_, stream) = chunked(&body, 512, &pulled);
    let limits = limits().max_request_bytes(4096);
    let mut receiver = MultipartReceiver::new(&headers(), limits).unwrap();
    let err = receiver.receive(stream).await.unwrap_err();

    let ReceiverError::ContentLimit { source } = &err else {
        panic!("expected a content limit, got {err:?}");
    };
    assert!(matches!(source, MultipartError::TotalTooLarge { max: 4096, .. }));
}
