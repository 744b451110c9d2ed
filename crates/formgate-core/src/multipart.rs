//! Multipart form data parser.
//!
//! Parses `multipart/form-data` bodies incrementally: callers feed bytes as
//! they arrive and receive each part once its closing boundary has been seen.
//! Part payloads are accumulated through [`FieldAccumulator`], so per-part and
//! per-request size limits are enforced while the body is still streaming.

use memchr::memmem;
use thiserror::Error;

use crate::accumulator::FieldAccumulator;
use crate::limits::SizeLimits;

/// RFC 2046 recommends multipart boundary length <= 70 characters.
const MAX_BOUNDARY_LEN: usize = 70;

/// Ceiling on one part's boundary line plus header block.
pub const MAX_PART_HEADER_BYTES: usize = 8 * 1024;

/// Errors that can occur during multipart parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MultipartError {
    #[error("content type is not multipart/form-data")]
    NotMultipart,
    #[error("missing boundary in multipart Content-Type")]
    MissingBoundary,
    #[error("invalid multipart boundary")]
    InvalidBoundary,
    #[error("file {name:?} too large: {size} bytes exceeds limit of {max}")]
    FileTooLarge { name: String, size: usize, max: usize },
    #[error("field {name:?} too large: {size} bytes exceeds limit of {max}")]
    FieldTooLarge { name: String, size: usize, max: usize },
    #[error("total upload too large: {size} bytes exceeds limit of {max}")]
    TotalTooLarge { size: usize, max: usize },
    #[error("too many parts: {count} exceeds limit of {max}")]
    TooManyParts { count: usize, max: usize },
    #[error("part headers too large: {size} bytes exceeds limit of {max}")]
    HeadersTooLarge { size: usize, max: usize },
    #[error("missing Content-Disposition header in part")]
    MissingContentDisposition,
    #[error("invalid Content-Disposition: {detail}")]
    InvalidContentDisposition { detail: String },
    #[error("invalid part headers: {detail}")]
    InvalidPartHeaders { detail: String },
    #[error("unexpected end of multipart data")]
    UnexpectedEof,
    #[error("invalid multipart format: {detail}")]
    InvalidFormat { detail: &'static str },
}

impl MultipartError {
    /// Returns true when the error is a size or count limit violation.
    #[must_use]
    pub fn is_limit(&self) -> bool {
        matches!(
            self,
            Self::FileTooLarge { .. }
                | Self::FieldTooLarge { .. }
                | Self::TotalTooLarge { .. }
                | Self::TooManyParts { .. }
                | Self::HeadersTooLarge { .. }
        )
    }
}

/// A parsed multipart form part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Field name from Content-Disposition.
    pub name: String,
    /// Filename from Content-Disposition (if present).
    pub filename: Option<String>,
    /// Content-Type of the part (if present).
    pub content_type: Option<String>,
    /// The part's content.
    pub data: Vec<u8>,
}

impl Part {
    /// Returns true if this part is a file upload.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.filename.is_some()
    }

    /// Returns true if this part is a regular form field.
    #[must_use]
    pub fn is_field(&self) -> bool {
        self.filename.is_none()
    }

    /// Get the content as a UTF-8 string (for form fields).
    ///
    /// Returns `None` if the content is not valid UTF-8.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }

    /// Get the size of the data in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Parse boundary from Content-Type header.
///
/// Content-Type format: `multipart/form-data; boundary=----WebKitFormBoundary...`
pub fn parse_boundary(content_type: &str) -> Result<String, MultipartError> {
    let content_type = content_type.trim();
    let main = content_type.split(';').next().unwrap_or("").trim();
    if !main.eq_ignore_ascii_case("multipart/form-data") {
        return Err(MultipartError::NotMultipart);
    }

    for part in content_type.split(';').skip(1) {
        let Some((k, v)) = part.trim().split_once('=') else {
            continue;
        };
        if k.trim().eq_ignore_ascii_case("boundary") {
            let boundary = v.trim().trim_matches('"').trim_matches('\'');
            if boundary.is_empty() || boundary.len() > MAX_BOUNDARY_LEN {
                return Err(MultipartError::InvalidBoundary);
            }
            return Ok(boundary.to_string());
        }
    }

    Err(MultipartError::MissingBoundary)
}

/// Incremental parser state for streamed multipart bodies.
#[derive(Debug, Default)]
pub struct MultipartStreamState {
    started: bool,
    done: bool,
    part_count: usize,
    total_size: usize,
    current_part: Option<FieldAccumulator>,
}

impl MultipartStreamState {
    /// Returns true if the closing boundary has been fully parsed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Request bytes charged so far: part header blocks and payloads.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Name of the part currently being accumulated, if any.
    #[must_use]
    pub fn current_part_name(&self) -> Option<&str> {
        self.current_part.as_ref().map(FieldAccumulator::name)
    }
}

/// Multipart parser (boundary-based).
#[derive(Debug)]
pub struct MultipartParser {
    boundary: Vec<u8>,
    finder: memmem::Finder<'static>,
    limits: SizeLimits,
}

impl MultipartParser {
    /// Create a new parser with the given boundary.
    #[must_use]
    pub fn new(boundary: &str, limits: SizeLimits) -> Self {
        let boundary = format!("--{boundary}").into_bytes();
        let finder = memmem::Finder::new(&boundary).into_owned();
        Self {
            boundary,
            finder,
            limits,
        }
    }

    /// The limits this parser enforces.
    #[must_use]
    pub fn limits(&self) -> &SizeLimits {
        &self.limits
    }

    /// Parse all parts from a complete body.
    pub fn parse(&self, body: &[u8]) -> Result<Vec<Part>, MultipartError> {
        let mut buffer = body.to_vec();
        let mut state = MultipartStreamState::default();
        self.parse_incremental(&mut buffer, &mut state, true)
    }

    /// Parse any newly-available parts from a streamed multipart buffer.
    ///
    /// This method mutates `buffer` by draining bytes that were fully consumed.
    /// It can be called repeatedly as new bytes arrive.
    ///
    /// - Set `eof = false` while more chunks may still arrive.
    /// - Set `eof = true` on the final call to enforce that the stream ended on
    ///   a valid multipart boundary.
    pub fn parse_incremental(
        &self,
        buffer: &mut Vec<u8>,
        state: &mut MultipartStreamState,
        eof: bool,
    ) -> Result<Vec<Part>, MultipartError> {
        let mut parsed = Vec::new();

        loop {
            if state.done {
                return Ok(parsed);
            }

            if !state.started {
                match self.find_boundary_from(buffer) {
                    Ok(boundary_pos) => {
                        state.started = true;
                        buffer.drain(..boundary_pos);
                    }
                    Err(MultipartError::UnexpectedEof) if !eof => {
                        // Keep only the suffix that could still contain a split boundary.
                        let keep = self.boundary.len().saturating_add(4);
                        if buffer.len() > keep {
                            let drain_to = buffer.len() - keep;
                            buffer.drain(..drain_to);
                        }
                        return Ok(parsed);
                    }
                    Err(err) => return Err(err),
                }
            }

            if state.current_part.is_none() {
                if !self.start_part(buffer, state, eof)? {
                    return Ok(parsed);
                }
                continue;
            }

            match self.find_boundary_in_part_data(buffer) {
                Ok(data_end) => {
                    let write_end = if data_end >= 2 && buffer[data_end - 2..data_end] == *b"\r\n"
                    {
                        data_end - 2
                    } else {
                        data_end
                    };
                    let Some(mut part_state) = state.current_part.take() else {
                        return Err(MultipartError::InvalidFormat {
                            detail: "missing current multipart part state",
                        });
                    };
                    part_state.append(&buffer[..write_end], &mut state.total_size, &self.limits)?;
                    parsed.push(part_state.finish());

                    // Keep the next boundary in-buffer for the next iteration.
                    buffer.drain(..data_end);
                }
                Err(MultipartError::UnexpectedEof) => {
                    if eof {
                        return Err(MultipartError::UnexpectedEof);
                    }

                    // No complete boundary yet: flush the safe prefix into the current part.
                    let keep = self.boundary.len().saturating_add(4);
                    if buffer.len() > keep {
                        let flush_len = buffer.len() - keep;
                        let Some(part_state) = state.current_part.as_mut() else {
                            return Err(MultipartError::InvalidFormat {
                                detail: "missing current multipart part state",
                            });
                        };
                        part_state.append(
                            &buffer[..flush_len],
                            &mut state.total_size,
                            &self.limits,
                        )?;
                        buffer.drain(..flush_len);
                    }
                    return Ok(parsed);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Consume a boundary line and part headers from the front of `buffer`.
    ///
    /// Returns `Ok(false)` when more input is needed or the closing boundary
    /// was reached.
    fn start_part(
        &self,
        buffer: &mut Vec<u8>,
        state: &mut MultipartStreamState,
        eof: bool,
    ) -> Result<bool, MultipartError> {
        if !buffer.starts_with(&self.boundary) {
            match self.find_boundary_from(buffer) {
                Ok(boundary_pos) => {
                    buffer.drain(..boundary_pos);
                }
                Err(MultipartError::UnexpectedEof) if !eof => return Ok(false),
                Err(err) => return Err(err),
            }
        }

        let boundary_end = self.boundary.len();
        if boundary_end + 2 > buffer.len() {
            return if eof {
                Err(MultipartError::UnexpectedEof)
            } else {
                Ok(false)
            };
        }

        let boundary_suffix = &buffer[boundary_end..boundary_end + 2];
        if boundary_suffix == b"--" {
            state.done = true;

            // Consume through final boundary marker (+ optional CRLF).
            let mut consumed = boundary_end + 2;
            if consumed + 2 <= buffer.len() && buffer[consumed..consumed + 2] == *b"\r\n" {
                consumed += 2;
            }
            buffer.drain(..consumed);
            return Ok(false);
        }

        if boundary_suffix != b"\r\n" {
            return Err(MultipartError::InvalidFormat {
                detail: "expected CRLF after boundary",
            });
        }

        let (headers, data_start) = match parse_part_headers(buffer, boundary_end + 2) {
            Ok(v) => v,
            Err(MultipartError::UnexpectedEof) if !eof => {
                // Incomplete headers stay buffered, so bound them now.
                self.check_header_block(buffer.len(), state.total_size)?;
                return Ok(false);
            }
            Err(err) => return Err(err),
        };
        self.check_header_block(data_start, state.total_size)?;
        state.total_size = state.total_size.saturating_add(data_start);

        state.part_count = state.part_count.saturating_add(1);
        if state.part_count > self.limits.get_max_parts() {
            return Err(MultipartError::TooManyParts {
                count: state.part_count,
                max: self.limits.get_max_parts(),
            });
        }

        let content_disp = headers
            .content_disposition
            .ok_or(MultipartError::MissingContentDisposition)?;
        let (name, filename) = parse_content_disposition(&content_disp)?;

        state.current_part = Some(FieldAccumulator::new(
            name,
            filename,
            headers.content_type,
            &self.limits,
        ));
        buffer.drain(..data_start);
        Ok(true)
    }

    /// Reject a header block over [`MAX_PART_HEADER_BYTES`] or one that would
    /// push the request past its byte budget.
    fn check_header_block(&self, len: usize, total_size: usize) -> Result<(), MultipartError> {
        if len > MAX_PART_HEADER_BYTES {
            return Err(MultipartError::HeadersTooLarge {
                size: len,
                max: MAX_PART_HEADER_BYTES,
            });
        }
        let next_total = total_size.saturating_add(len);
        if next_total > self.limits.get_max_request_bytes() {
            return Err(MultipartError::TotalTooLarge {
                size: next_total,
                max: self.limits.get_max_request_bytes(),
            });
        }
        Ok(())
    }

    /// Find a boundary at the start of the buffer or of a CRLF-delimited line.
    fn find_boundary_from(&self, data: &[u8]) -> Result<usize, MultipartError> {
        self.locate_boundary(data, true)
    }

    /// Inside part payloads, boundaries must be preceded by CRLF.
    fn find_boundary_in_part_data(&self, data: &[u8]) -> Result<usize, MultipartError> {
        self.locate_boundary(data, false)
    }

    fn locate_boundary(&self, data: &[u8], allow_at_start: bool) -> Result<usize, MultipartError> {
        let boundary_len = self.boundary.len();

        for i in self.finder.find_iter(data) {
            let at_line_start = (i == 0 && allow_at_start) || (i >= 2 && data[i - 2..i] == *b"\r\n");
            if !at_line_start {
                continue;
            }

            // Must be followed by either CRLF (next part) or `--` (final boundary).
            let boundary_end = i + boundary_len;
            if boundary_end + 2 > data.len() {
                return Err(MultipartError::UnexpectedEof);
            }
            let suffix = &data[boundary_end..boundary_end + 2];
            if suffix != b"\r\n" && suffix != b"--" {
                continue;
            }

            return Ok(i);
        }

        Err(MultipartError::UnexpectedEof)
    }
}

#[derive(Debug, Default)]
struct PartHeaders {
    content_disposition: Option<String>,
    content_type: Option<String>,
}

fn parse_part_headers(data: &[u8], start: usize) -> Result<(PartHeaders, usize), MultipartError> {
    let mut headers = PartHeaders::default();
    let mut pos = start;

    loop {
        let line_end = find_crlf(data, pos)?;
        let line = &data[pos..line_end];
        if line.is_empty() {
            return Ok((headers, line_end + 2));
        }

        let line_str =
            std::str::from_utf8(line).map_err(|_| MultipartError::InvalidPartHeaders {
                detail: "invalid UTF-8 in header".to_string(),
            })?;

        if let Some((name, value)) = line_str.split_once(':') {
            let name = name.trim();
            if name.eq_ignore_ascii_case("content-disposition") {
                headers.content_disposition = Some(value.trim().to_string());
            } else if name.eq_ignore_ascii_case("content-type") {
                headers.content_type = Some(value.trim().to_string());
            }
        }

        pos = line_end + 2;
    }
}

fn find_crlf(data: &[u8], start: usize) -> Result<usize, MultipartError> {
    let haystack = data.get(start..).ok_or(MultipartError::UnexpectedEof)?;
    memmem::find(haystack, b"\r\n")
        .map(|offset| start + offset)
        .ok_or(MultipartError::UnexpectedEof)
}

/// Parse Content-Disposition header value.
///
/// Format: `form-data; name=\"field\"; filename=\"file.txt\"`
fn parse_content_disposition(value: &str) -> Result<(String, Option<String>), MultipartError> {
    let mut name = None;
    let mut filename = None;

    for part in value.split(';') {
        let part = part.trim();
        if part.eq_ignore_ascii_case("form-data") {
            continue;
        }

        if let Some((key, raw_value)) = part.split_once('=') {
            let key = key.trim();
            if key.eq_ignore_ascii_case("name") {
                name = Some(unquote(raw_value));
            } else if key.eq_ignore_ascii_case("filename") {
                let unquoted = unquote(raw_value);
                if unquoted.contains(['/', '\\', '\0']) || unquoted == "." || unquoted == ".." {
                    return Err(MultipartError::InvalidContentDisposition {
                        detail: "filename contains path characters".to_string(),
                    });
                }
                filename = Some(unquoted);
            }
        }
    }

    let name = name.ok_or_else(|| MultipartError::InvalidContentDisposition {
        detail: "missing name parameter".to_string(),
    })?;

    Ok((name, filename))
}

fn unquote(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
    {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_in_chunks(
        parser: &MultipartParser,
        body: &[u8],
        chunk_size: usize,
    ) -> Result<(Vec<Part>, MultipartStreamState), MultipartError> {
        let mut state = MultipartStreamState::default();
        let mut buffer = Vec::new();
        let mut parts = Vec::new();
        for chunk in body.chunks(chunk_size) {
            buffer.extend_from_slice(chunk);
            parts.append(&mut parser.parse_incremental(&mut buffer, &mut state, false)?);
        }
        parts.append(&mut parser.parse_incremental(&mut buffer, &mut state, true)?);
        Ok((parts, state))
    }

    #[test]
    fn test_parse_boundary() {
        let ct = "multipart/form-data; boundary=----WebKitFormBoundary7MA4YWxkTrZu0gW";
        let boundary = parse_boundary(ct).unwrap();
        assert_eq!(boundary, "----WebKitFormBoundary7MA4YWxkTrZu0gW");
    }

    #[test]
    fn test_parse_boundary_quoted() {
        let ct = r#"multipart/form-data; Boundary="simple-boundary""#;
        let boundary = parse_boundary(ct).unwrap();
        assert_eq!(boundary, "simple-boundary");
    }

    #[test]
    fn test_parse_boundary_missing() {
        let result = parse_boundary("multipart/form-data");
        assert_eq!(result, Err(MultipartError::MissingBoundary));
    }

    #[test]
    fn test_parse_boundary_rejects_too_long_value() {
        let too_long = "a".repeat(MAX_BOUNDARY_LEN + 1);
        let ct = format!("multipart/form-data; boundary={too_long}");
        assert_eq!(parse_boundary(&ct), Err(MultipartError::InvalidBoundary));
        assert_eq!(
            parse_boundary("multipart/form-data; boundary=\"\""),
            Err(MultipartError::InvalidBoundary)
        );
    }

    #[test]
    fn test_parse_boundary_wrong_content_type() {
        assert_eq!(
            parse_boundary("application/json"),
            Err(MultipartError::NotMultipart)
        );
    }

    #[test]
    fn test_parse_content_disposition_case_insensitive_params() {
        let (name, filename) =
            parse_content_disposition("form-data; Name=\"field\"; FileName=\"upload.txt\"")
                .expect("content disposition should parse");
        assert_eq!(name, "field");
        assert_eq!(filename.as_deref(), Some("upload.txt"));
    }

    #[test]
    fn test_parse_content_disposition_keeps_empty_filename() {
        let (_, filename) =
            parse_content_disposition("form-data; name=\"f\"; filename=\"\"").unwrap();
        assert_eq!(filename.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_content_disposition_rejects_paths() {
        for value in [
            "form-data; name=\"f\"; filename=\"../etc/passwd\"",
            "form-data; name=\"f\"; filename=\"C:\\\\x.pdf\"",
            "form-data; name=\"f\"; filename=\"..\"",
        ] {
            assert!(matches!(
                parse_content_disposition(value),
                Err(MultipartError::InvalidContentDisposition { .. })
            ));
        }
        // Dots inside a name are fine.
        assert!(parse_content_disposition("form-data; name=\"f\"; filename=\"v1..2.pdf\"").is_ok());
    }

    #[test]
    fn test_parse_mixed_form() {
        let boundary = "----boundary";
        let body = concat!(
            "------boundary\r\n",
            "Content-Disposition: form-data; name=\"body\"\r\n",
            "\r\n",
            "{\"responses\":[]}\r\n",
            "------boundary\r\n",
            "Content-Disposition: form-data; name=\"f2\"; filename=\"data.bin\"\r\n",
            "Content-Type: application/octet-stream\r\n",
            "\r\n",
            "\x00\x01\x02\x03\r\n",
            "------boundary--\r\n"
        );

        let parser = MultipartParser::new(boundary, SizeLimits::default());
        let parts = parser.parse(body.as_bytes()).unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].name, "body");
        assert!(parts[0].is_field());
        assert_eq!(parts[0].text(), Some("{\"responses\":[]}"));
        assert_eq!(parts[1].name, "f2");
        assert_eq!(parts[1].filename.as_deref(), Some("data.bin"));
        assert_eq!(
            parts[1].content_type.as_deref(),
            Some("application/octet-stream")
        );
        assert_eq!(parts[1].data, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_boundary_like_sequence_in_part_body_does_not_terminate_part() {
        let boundary = "----boundary";
        let body = concat!(
            "------boundary\r\n",
            "Content-Disposition: form-data; name=\"f\"; filename=\"x.txt\"\r\n",
            "\r\n",
            "line one\r\n------boundaryX not a boundary\r\n",
            "------boundary--\r\n"
        );

        let parser = MultipartParser::new(boundary, SizeLimits::default());
        let parts = parser.parse(body.as_bytes()).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(
            parts[0].text(),
            Some("line one\r\n------boundaryX not a boundary")
        );
    }

    #[test]
    fn test_parse_truncated_body_is_eof() {
        let boundary = "----boundary";
        let body = concat!(
            "------boundary\r\n",
            "Content-Disposition: form-data; name=\"body\"\r\n",
            "\r\n",
            "{\"respon"
        );
        let parser = MultipartParser::new(boundary, SizeLimits::default());
        assert_eq!(
            parser.parse(body.as_bytes()),
            Err(MultipartError::UnexpectedEof)
        );
    }

    #[test]
    fn test_part_without_disposition_is_rejected() {
        let boundary = "----boundary";
        let body = concat!(
            "------boundary\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "x\r\n",
            "------boundary--\r\n"
        );
        let parser = MultipartParser::new(boundary, SizeLimits::default());
        assert_eq!(
            parser.parse(body.as_bytes()),
            Err(MultipartError::MissingContentDisposition)
        );
    }

    #[test]
    fn test_incremental_parse_with_chunked_input() {
        let boundary = "----boundary";
        let body = concat!(
            "preamble\r\n",
            "------boundary\r\n",
            "Content-Disposition: form-data; name=\"body\"\r\n",
            "\r\n",
            "value1\r\n",
            "------boundary\r\n",
            "Content-Disposition: form-data; name=\"f9\"; filename=\"test.txt\"\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "hello-stream\r\n",
            "------boundary--\r\n"
        );

        let parser = MultipartParser::new(boundary, SizeLimits::default());
        for chunk_size in [1, 5, 7, 64] {
            let (parts, state) = feed_in_chunks(&parser, body.as_bytes(), chunk_size)
                .expect("incremental parse");
            assert!(state.is_done());
            assert_eq!(parts.len(), 2);
            assert_eq!(parts[0].text(), Some("value1"));
            assert_eq!(parts[1].name, "f9");
            assert_eq!(parts[1].data, b"hello-stream".to_vec());
            let first = "------boundary\r\nContent-Disposition: form-data; name=\"body\"\r\n\r\nvalue1";
            let second = concat!(
                "------boundary\r\n",
                "Content-Disposition: form-data; name=\"f9\"; filename=\"test.txt\"\r\n",
                "Content-Type: text/plain\r\n",
                "\r\n",
                "hello-stream"
            );
            assert_eq!(state.total_size(), first.len() + second.len());
        }
    }

    #[test]
    fn test_incremental_parse_keeps_buffer_bounded_for_large_streamed_file() {
        let boundary = "----boundary";
        let payload = vec![b'x'; 256 * 1024];

        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"file\"; filename=\"large.bin\"\r\n",
        );
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&payload);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let parser = MultipartParser::new(boundary, SizeLimits::default());
        let mut state = MultipartStreamState::default();
        let mut buffer = Vec::new();
        let mut parts = Vec::new();
        let mut max_buffer_len = 0usize;

        for chunk in body.chunks(513) {
            buffer.extend_from_slice(chunk);
            let mut parsed = parser
                .parse_incremental(&mut buffer, &mut state, false)
                .expect("incremental parse");
            parts.append(&mut parsed);
            max_buffer_len = max_buffer_len.max(buffer.len());
        }
        let mut tail = parser
            .parse_incremental(&mut buffer, &mut state, true)
            .expect("final parse");
        parts.append(&mut tail);

        assert!(state.is_done());
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].data, payload);
        assert!(
            max_buffer_len < 8 * 1024,
            "incremental parser buffer grew too large: {max_buffer_len}"
        );
    }

    #[test]
    fn test_incremental_parse_rejects_oversized_file_before_its_end() {
        let boundary = "----boundary";
        let limits = SizeLimits::new()
            .max_attachment_bytes(64)
            .max_request_bytes(1024);

        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"f\"; filename=\"a\"\r\n\r\n");
        body.extend_from_slice(&[b'y'; 500]);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let parser = MultipartParser::new(boundary, limits);
        let mut state = MultipartStreamState::default();
        let mut buffer = Vec::new();
        let mut consumed = 0usize;
        let mut failure = None;
        for chunk in body.chunks(32) {
            consumed += chunk.len();
            buffer.extend_from_slice(chunk);
            if let Err(err) = parser.parse_incremental(&mut buffer, &mut state, false) {
                failure = Some(err);
                break;
            }
        }

        assert!(matches!(
            failure,
            Some(MultipartError::FileTooLarge { max: 64, .. })
        ));
        assert!(consumed < body.len());
    }

    #[test]
    fn test_oversized_header_block_rejected_while_streaming() {
        let boundary = "----boundary";
        let mut body = format!("--{boundary}\r\nContent-Disposition: form-data; name=\"").into_bytes();
        body.extend_from_slice(&vec![b'n'; 64 * 1024]);
        body.extend_from_slice(format!("\"\r\n\r\nx\r\n--{boundary}--\r\n").as_bytes());

        let parser = MultipartParser::new(boundary, SizeLimits::default());
        let mut state = MultipartStreamState::default();
        let mut buffer = Vec::new();
        let mut consumed = 0usize;
        let mut failure = None;
        for chunk in body.chunks(1024) {
            consumed += chunk.len();
            buffer.extend_from_slice(chunk);
            if let Err(err) = parser.parse_incremental(&mut buffer, &mut state, false) {
                failure = Some(err);
                break;
            }
        }

        let err = failure.expect("header block over the ceiling");
        assert!(matches!(err, MultipartError::HeadersTooLarge { max: MAX_PART_HEADER_BYTES, .. }));
        assert!(err.is_limit());
        assert!(consumed <= MAX_PART_HEADER_BYTES + 1024);
    }

    #[test]
    fn test_header_bytes_count_against_request_budget() {
        let boundary = "b";
        let body = concat!(
            "--b\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\n1\r\n",
            "--b--\r\n"
        );
        let limits = SizeLimits::new()
            .max_field_bytes(16)
            .max_attachment_bytes(16)
            .max_request_bytes(16);
        let err = MultipartParser::new(boundary, limits)
            .parse(body.as_bytes())
            .unwrap_err();
        assert!(matches!(err, MultipartError::TotalTooLarge { max: 16, .. }));
    }

    #[test]
    fn test_too_many_parts() {
        let boundary = "b";
        let body = concat!(
            "--b\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\n1\r\n",
            "--b\r\nContent-Disposition: form-data; name=\"b\"\r\n\r\n2\r\n",
            "--b\r\nContent-Disposition: form-data; name=\"c\"\r\n\r\n3\r\n",
            "--b--\r\n"
        );
        let parser = MultipartParser::new(boundary, SizeLimits::new().max_parts(2));
        let err = parser.parse(body.as_bytes()).unwrap_err();
        assert_eq!(err, MultipartError::TooManyParts { count: 3, max: 2 });
        assert!(err.is_limit());
    }
}
