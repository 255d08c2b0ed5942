//! Integration: the task engine driving real child processes through the
//! shell execution layer

use std::time::Duration;

use chore_core::{Runner, TaskError};
use chore_shell::{sh, silent, ShellError};
use tokio_util::sync::CancellationToken;

fn token() -> CancellationToken {
    init_tracing();
    CancellationToken::new()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("chore_core=debug,chore_shell=debug")
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_series_of_shell_tasks_stops_at_failure() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("after-failure");
    let marker_arg = marker.display().to_string();

    let runner = Runner::new();
    runner.task("ok", |cancel| async move { Ok(sh(&cancel, "true").await?) });
    runner.task("boom", |cancel| async move { Ok(sh(&cancel, "false").await?) });
    runner.task("leaves-marker", move |cancel| {
        let marker_arg = marker_arg.clone();
        async move {
            sh(&cancel, &format!("touch {}", marker_arg)).await?;
            Ok(())
        }
    });

    runner.task_action("pipeline", runner.series(&["ok", "boom", "leaves-marker"]));
    let err = runner.run(token(), "pipeline").await.unwrap_err();

    // The failing step is identified by name and position, and the step
    // after it never ran.
    assert!(err.to_string().contains("boom"));
    assert!(err.to_string().contains("step 1"));
    assert!(!marker.exists(), "step after the failure must not run");
}

#[tokio::test]
async fn test_parallel_shell_tasks_all_run_and_aggregate() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("parallel-marker");
    let marker_arg = marker.display().to_string();

    let runner = Runner::new();
    runner.task("fails", |cancel| async move {
        Ok(silent(&cancel, "false").await?)
    });
    runner.task("writes", move |cancel| {
        let marker_arg = marker_arg.clone();
        async move {
            sh(&cancel, &format!("touch {}", marker_arg)).await?;
            Ok(())
        }
    });

    runner.task_action("both", runner.parallel(&["fails", "writes"]));
    let err = runner.run(token(), "both").await.unwrap_err();

    assert!(marker.exists(), "sibling must run despite the failure");

    let TaskError::Failed { source, .. } = err else {
        panic!("expected Failed wrapper");
    };
    let TaskError::Parallel(agg) = source.downcast_ref::<TaskError>().unwrap() else {
        panic!("expected Parallel aggregate");
    };
    assert_eq!(agg.len(), 1);
    assert_eq!(agg.failures()[0].0, "fails");
}

#[tokio::test]
async fn test_cancelling_run_terminates_child_process() {
    let runner = Runner::new();
    runner.task("long-sleep", |cancel| async move {
        silent(&cancel, "sleep 30").await?;
        Ok(())
    });

    let cancel = token();
    let stop = cancel.clone();
    let handle = {
        let runner = runner.clone();
        tokio::spawn(async move { runner.run(cancel, "long-sleep").await })
    };

    tokio::time::sleep(Duration::from_millis(200)).await;
    stop.cancel();

    // The child is killed promptly, well before its 30s runtime, and the
    // failure is a cancellation, not a nonzero exit.
    let err = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("cancelled task must finish promptly")
        .unwrap()
        .unwrap_err();

    let TaskError::Failed { name, source } = err else {
        panic!("expected Failed wrapper");
    };
    assert_eq!(name, "long-sleep");
    match source.downcast_ref::<ShellError>() {
        Some(ShellError::Cancelled { .. }) => {}
        other => panic!("expected shell cancellation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_captured_output_feeds_later_steps() {
    let runner = Runner::new();
    runner.task("greet", |cancel| async move {
        let out = chore_shell::sh_out(&cancel, "echo chore").await?;
        if out.trim() == "chore" {
            Ok(())
        } else {
            Err(format!("unexpected output: {:?}", out).into())
        }
    });
    runner.run(token(), "greet").await.unwrap();
}
