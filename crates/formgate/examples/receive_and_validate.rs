//! Receive and Validate Example
//!
//! Streams a small multipart submission through a `SubmissionGate` and prints
//! the outcome of a good submission and a few rejected ones.
//!
//! Run with: RUST_LOG=formgate=debug cargo run --example receive_and_validate -p formgate

use std::convert::Infallible;

use bytes::Bytes;
use formgate::prelude::*;
use futures_executor::block_on;
use futures_util::stream;
use tracing_subscriber::EnvFilter;

const BOUNDARY: &str = "example-boundary";

const FORM: &str = r#"[
    {"_id": "name", "fieldType": "textfield", "title": "Full name"},
    {"_id": "email", "fieldType": "email", "title": "Email"},
    {"_id": "id", "fieldType": "nric", "title": "NRIC"},
    {"_id": "cv", "fieldType": "attachment", "title": "CV", "attachmentSize": "2"}
]"#;

fn submission(body_json: &str, file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut out = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"body\"\r\n\r\n{body_json}\r\n"
    )
    .into_bytes();
    if let Some((filename, content)) = file {
        out.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"cv\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        out.extend_from_slice(content);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    out
}

fn run(gate: &SubmissionGate, label: &str, bytes: Vec<u8>) {
    let headers = Headers::new()
        .with(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .with("Content-Length", bytes.len().to_string());
    let chunks: Vec<Result<Bytes, Infallible>> = bytes
        .chunks(64)
        .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
        .collect();

    match block_on(gate.process(&headers, stream::iter(chunks))) {
        Ok(responses) => {
            println!("{label}: accepted");
            for response in responses {
                println!("   {} ({}) -> {:?}", response.question, response.field_type, response.answer);
            }
        }
        Err(err) => println!(
            "{label}: rejected with {} \"{}\" ({err})",
            err.status_code(),
            err.public_message()
        ),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let fields: Vec<FormField> = match serde_json::from_str(FORM) {
        Ok(fields) => fields,
        Err(err) => {
            eprintln!("form definition is invalid: {err}");
            return;
        }
    };
    let gate = SubmissionGate::new(fields).attachment_policy(AttachmentPolicy::for_mode(
        ResponseMode::Storage,
    ));

    let good = r#"{"responses": [
        {"_id": "name", "fieldType": "textfield", "answer": "Tan Ah Kow"},
        {"_id": "email", "fieldType": "email", "answer": "ahkow@example.com"},
        {"_id": "id", "fieldType": "nric", "answer": "S9912345A"},
        {"_id": "cv", "fieldType": "attachment", "answer": "cv.pdf"}
    ]}"#;
    run(&gate, "1. Valid submission", submission(good, Some(("cv.pdf", &b"%PDF-1.7"[..]))));

    let bad_nric = good.replace("S9912345A", "S9912345B");
    run(&gate, "2. Bad NRIC checksum", submission(&bad_nric, Some(("cv.pdf", &b"%PDF-1.7"[..]))));

    run(&gate, "3. Missing CV", submission(good, None));

    run(&gate, "4. Executable upload", submission(good, Some(("cv.exe", &b"MZ"[..]))));

    run(&gate, "5. Broken body", submission("{\"responses\": [", None));
}
