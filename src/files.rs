//! Operations on uploaded workspace files: listing and deletion.

use crate::error::{Result, SlackDumpError};
use crate::slack::{FileId, FileRecord, FilesPaging, SlackClient, UserId};
use serde_json::Value;
use std::io::{BufRead, Write};

/// Walk every `files.list` page, optionally filtered to one uploader.
///
/// Raw mode prints each page's JSON as one line; otherwise one
/// `id<TAB>user<TAB>is_public<TAB>name` line per file record. Returns the
/// number of pages walked.
pub async fn list_files<W: Write>(
    client: &SlackClient,
    user: Option<&UserId>,
    raw_output: bool,
    out: &mut W,
) -> Result<u64> {
    // files.list pages are 1-based.
    let mut page_no = 1u64;

    loop {
        let page = client.files_list(user, page_no).await?;

        if raw_output {
            writeln!(out, "{}", serde_json::to_string(&page)?)?;
        } else {
            for record in page_records(&page)? {
                writeln!(out, "{}", record.tsv_line())?;
            }
        }

        let paging = page_paging(&page)?;
        if paging.is_last() {
            return Ok(page_no);
        }
        page_no += 1;
    }
}

/// Delete the files named in `input`, one per line, taking the first
/// whitespace-separated token as the file ID (the format `list-files`
/// prints). Blank lines are skipped. The raw API response of each deletion
/// is printed as one line; an error aborts the remaining list. Returns the
/// number of files deleted.
pub async fn delete_files<R: BufRead, W: Write>(
    client: &SlackClient,
    input: R,
    out: &mut W,
) -> Result<u64> {
    let mut deleted = 0u64;

    for line in input.lines() {
        let line = line?;
        let Some(id) = line.split_whitespace().next() else {
            continue;
        };

        let file = FileId::new(id);
        let response = client.files_delete(&file).await?;
        writeln!(out, "{}", serde_json::to_string(&response)?)?;
        deleted += 1;
        tracing::debug!(file = file.as_str(), "file deleted");
    }

    Ok(deleted)
}

fn page_records(page: &Value) -> Result<Vec<FileRecord>> {
    let files = page
        .get("files")
        .cloned()
        .ok_or_else(|| SlackDumpError::api("files.list", "response has no `files` array"))?;

    Ok(serde_json::from_value(files)?)
}

fn page_paging(page: &Value) -> Result<FilesPaging> {
    let paging = page
        .get("paging")
        .cloned()
        .ok_or_else(|| SlackDumpError::api("files.list", "response has no `paging` block"))?;

    Ok(serde_json::from_value(paging)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlackConfig;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::io::Cursor;

    fn client(server: &MockServer) -> SlackClient {
        SlackClient::new(SlackConfig {
            api_token: "xoxp-test".to_string(),
        })
        .unwrap()
        .with_base_url(server.base_url())
    }

    #[tokio::test]
    async fn listing_walks_pages_until_last() {
        let server = MockServer::start_async().await;
        let first = server.mock(|when, then| {
            when.method(GET).path("/files.list").query_param("page", "1");
            then.status(200).json_body(json!({
                "ok": true,
                "files": [
                    { "id": "F1", "user": "U1", "is_public": true, "name": "a.txt" },
                    { "id": "F2", "user": "U2", "is_public": false, "name": "b.png" }
                ],
                "paging": { "count": 2, "total": 3, "page": 1, "pages": 2 }
            }));
        });
        let second = server.mock(|when, then| {
            when.method(GET).path("/files.list").query_param("page", "2");
            then.status(200).json_body(json!({
                "ok": true,
                "files": [{ "id": "F3", "user": "U1", "is_public": true, "name": "c.csv" }],
                "paging": { "count": 1, "total": 3, "page": 2, "pages": 2 }
            }));
        });

        let mut out = Vec::new();
        let pages = list_files(&client(&server), None, false, &mut out)
            .await
            .unwrap();

        assert_eq!(pages, 2);
        let output = String::from_utf8(out).unwrap();
        assert_eq!(
            output,
            "F1\tU1\ttrue\ta.txt\nF2\tU2\tfalse\tb.png\nF3\tU1\ttrue\tc.csv\n"
        );
        first.assert_calls(1);
        second.assert_calls(1);
    }

    #[tokio::test]
    async fn raw_listing_prints_whole_pages() {
        let server = MockServer::start_async().await;
        let page = json!({
            "ok": true,
            "files": [{ "id": "F1", "user": "U1", "is_public": true, "name": "a.txt" }],
            "paging": { "count": 1, "total": 1, "page": 1, "pages": 1 }
        });
        server.mock(|when, then| {
            when.method(GET).path("/files.list");
            then.status(200).json_body(page.clone());
        });

        let mut out = Vec::new();
        list_files(&client(&server), None, true, &mut out)
            .await
            .unwrap();

        let output = String::from_utf8(out).unwrap();
        let (line, rest) = output.split_once('\n').unwrap();
        assert!(rest.is_empty());
        assert_eq!(serde_json::from_str::<Value>(line).unwrap(), page);
    }

    #[tokio::test]
    async fn empty_listing_terminates_after_one_page() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/files.list");
            then.status(200).json_body(json!({
                "ok": true,
                "files": [],
                "paging": { "count": 0, "total": 0, "page": 1, "pages": 0 }
            }));
        });

        let mut out = Vec::new();
        let pages = list_files(&client(&server), None, false, &mut out)
            .await
            .unwrap();

        assert_eq!(pages, 1);
        assert!(out.is_empty());
        mock.assert_calls(1);
    }

    #[tokio::test]
    async fn listing_forwards_user_filter() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/files.list")
                .query_param("page", "1")
                .query_param("user", "U42");
            then.status(200).json_body(json!({
                "ok": true,
                "files": [],
                "paging": { "page": 1, "pages": 0 }
            }));
        });

        let mut out = Vec::new();
        list_files(&client(&server), Some(&UserId::new("U42")), false, &mut out)
            .await
            .unwrap();

        mock.assert_calls(1);
    }

    #[tokio::test]
    async fn deletion_takes_first_token_per_line() {
        let server = MockServer::start_async().await;
        let first = server.mock(|when, then| {
            when.method(POST)
                .path("/files.delete")
                .json_body(json!({ "file": "F1" }));
            then.status(200).json_body(json!({ "ok": true }));
        });
        let second = server.mock(|when, then| {
            when.method(POST)
                .path("/files.delete")
                .json_body(json!({ "file": "F2" }));
            then.status(200).json_body(json!({ "ok": true }));
        });

        let input = Cursor::new("F1 U1 true a.txt\nF2\n\n");
        let mut out = Vec::new();
        let deleted = delete_files(&client(&server), input, &mut out)
            .await
            .unwrap();

        assert_eq!(deleted, 2);
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.lines().count(), 2);
        first.assert_calls(1);
        second.assert_calls(1);
    }

    #[tokio::test]
    async fn failed_deletion_aborts_remaining_list() {
        let server = MockServer::start_async().await;
        let first = server.mock(|when, then| {
            when.method(POST)
                .path("/files.delete")
                .json_body(json!({ "file": "F1" }));
            then.status(200)
                .json_body(json!({ "ok": false, "error": "file_not_found" }));
        });
        let second = server.mock(|when, then| {
            when.method(POST)
                .path("/files.delete")
                .json_body(json!({ "file": "F2" }));
            then.status(200).json_body(json!({ "ok": true }));
        });

        let input = Cursor::new("F1\nF2\n");
        let mut out = Vec::new();
        let err = delete_files(&client(&server), input, &mut out)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("file_not_found"));
        first.assert_calls(1);
        second.assert_calls(0);
    }
}
