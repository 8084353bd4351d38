//! Process execution integration tests.
//!
//! These tests exercise the invoker against real subprocesses (shell scripts
//! standing in for yt-dlp) and verify the stream protocol end to end:
//! - both output streams drained concurrently without pipe-buffer deadlock
//! - carriage-return progress repaints surfaced as events
//! - exit codes mapped to typed failures with stderr payloads
#![cfg(unix)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use tubeferry_core::exec::{ExecConfig, ExecError, Invoker, Request, YtDlpInvoker};
use tubeferry_core::progress::{DownloadHooks, ProgressEvent};

/// Writes an executable shell script into the directory.
fn write_script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).expect("failed to write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("failed to chmod script");
    path
}

fn invoker_for(script: PathBuf) -> YtDlpInvoker {
    YtDlpInvoker::new(ExecConfig::with_executable(script))
}

#[tokio::test]
async fn test_dual_stream_draining_does_not_deadlock() {
    let dir = TempDir::new().unwrap();
    // Writes far more than an OS pipe buffer (64KiB) to stderr while also
    // emitting progress on stdout. With only one stream drained this stalls
    // forever on the full pipe.
    let script = write_script(
        &dir,
        "noisy.sh",
        r#"head -c 131072 /dev/zero | tr '\0' 'e' 1>&2
printf '[download]  50.0%% of ~  10.00MiB at    1.00MiB/s ETA 00:30\r'
echo 'done'
"#,
    );

    let events = Arc::new(Mutex::new(Vec::<ProgressEvent>::new()));
    let sink = Arc::clone(&events);
    let hooks = DownloadHooks::new().on_progress(move |event| {
        sink.lock().unwrap().push(event.clone());
    });

    let request = Request::builder().hooks(hooks).build();
    let response = invoker_for(script).execute(&request).await.unwrap();

    assert_eq!(response.exit_code, 0);
    assert_eq!(response.stderr.len(), 131_072);
    assert!(response.stdout.contains("done"));
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_carriage_return_repaints_become_events() {
    let dir = TempDir::new().unwrap();
    // Two repaints separated only by \r, the way the tool actually writes
    // them; naive \n-splitting would observe zero progress updates.
    let script = write_script(
        &dir,
        "progress.sh",
        r#"printf '[download]   1.0%% of ~  10.00MiB at    1.00MiB/s ETA 01:40\r'
printf '[download]   2.0%% of ~  10.00MiB at    1.00MiB/s ETA 01:38\r'
"#,
    );

    let events = Arc::new(Mutex::new(Vec::<ProgressEvent>::new()));
    let sink = Arc::clone(&events);
    let hooks = DownloadHooks::new().on_progress(move |event| {
        sink.lock().unwrap().push(event.clone());
    });

    let request = Request::builder().hooks(hooks).build();
    invoker_for(script).execute(&request).await.unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].percent, 1.0);
    assert_eq!(events[0].eta_secs, 100);
    assert_eq!(events[1].percent, 2.0);
}

#[tokio::test]
async fn test_start_and_end_hooks_fire_once() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        "lifecycle.sh",
        r#"printf '[youtube] Extracting URL: https://youtube.com/watch?v=it\n[download] Destination: clip.mp4\r'
printf '[download]  90.0%% of ~  10.00MiB at    1.00MiB/s ETA 00:05\r'
"#,
    );

    let starts = Arc::new(AtomicUsize::new(0));
    let ends = Arc::new(Mutex::new(Vec::new()));
    let start_sink = Arc::clone(&starts);
    let end_sink = Arc::clone(&ends);
    let hooks = DownloadHooks::new()
        .on_start(move |_, _| {
            start_sink.fetch_add(1, Ordering::SeqCst);
        })
        .on_end(move |file, url, elapsed_ms| {
            end_sink.lock().unwrap().push((
                file.map(String::from),
                url.map(String::from),
                elapsed_ms,
            ));
        });

    let request = Request::builder().hooks(hooks).build();
    invoker_for(script).execute(&request).await.unwrap();

    assert_eq!(starts.load(Ordering::SeqCst), 1);
    let ends = ends.lock().unwrap();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].0.as_deref(), Some("clip.mp4"));
    assert_eq!(ends[0].1.as_deref(), Some("https://youtube.com/watch?v=it"));
}

#[tokio::test]
async fn test_nonzero_exit_raises_process_failure_with_stderr() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        "failing.sh",
        r#"echo 'partial output'
echo 'ERROR: This video is unavailable' 1>&2
exit 3
"#,
    );

    let request = Request::builder().build();
    let err = invoker_for(script).execute(&request).await.unwrap_err();
    match err {
        ExecError::Process { exit_code, stderr } => {
            assert_eq!(exit_code, 3);
            assert!(stderr.contains("This video is unavailable"));
        }
        other => panic!("expected process failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_executable_raises_spawn_failure() {
    let invoker = YtDlpInvoker::new(ExecConfig::with_executable(PathBuf::from(
        "/nonexistent/never-a-real-binary",
    )));
    let request = Request::builder().flag("--version").build();
    let err = invoker.execute(&request).await.unwrap_err();
    assert!(matches!(err, ExecError::Spawn { .. }));
}

#[tokio::test]
async fn test_working_directory_is_honored() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "pwd.sh", "pwd\n");

    let request = Request::builder().working_dir(dir.path()).build();
    let response = invoker_for(script).execute(&request).await.unwrap();

    let reported = PathBuf::from(response.stdout.trim());
    // Compare canonicalized paths; the temp dir may be behind a symlink.
    assert_eq!(
        reported.canonicalize().unwrap(),
        dir.path().canonicalize().unwrap()
    );
}

#[tokio::test]
async fn test_response_reports_elapsed_time() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "sleepy.sh", "sleep 0.1\necho ok\n");

    let request = Request::builder().build();
    let response = invoker_for(script).execute(&request).await.unwrap();
    assert!(response.elapsed_ms >= 100);
}
