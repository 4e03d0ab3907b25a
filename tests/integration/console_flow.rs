//! End-to-end console playback: submit, match, schedule, present

use std::time::Duration;

use pipeline_sim::catalog::UNRECOGNIZED_MESSAGE;
use pipeline_sim::presenter::{present_until_finished, LineStyle, SessionOutcome};
use pipeline_sim::{
    ContextId, LineKind, MatchRule, OutputLog, PlaybackEvent, Simulator, SimulatorOptions,
    Submission,
};
use tokio::time::Instant;

use super::common::playback::{
    builtin_simulator, builtin_simulator_with, output_texts, present_until_idle,
};

const BUILD: ContextId = ContextId(2);
const REGISTRY: ContextId = ContextId(3);
const ORCHESTRATOR: ContextId = ContextId(6);

fn transcript_texts(simulator: &Simulator, context: ContextId, command: &str) -> Vec<String> {
    simulator
        .library()
        .lookup(context)
        .get(command)
        .expect("command should be in the catalog")
        .lines()
        .iter()
        .map(|l| l.text.clone())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_image_build_plays_in_order_and_on_time() {
    let (simulator, mut events) = builtin_simulator();
    let mut log = OutputLog::new();
    let start = Instant::now();

    let submission = simulator.submit_command(BUILD, "docker build -t myapp:1.0 .");
    let session = submission.session().expect("build should start a session").id;
    let outcome = present_until_finished(&mut events, &mut log, session).await;

    assert_eq!(outcome, SessionOutcome::Completed);
    assert_eq!(start.elapsed(), Duration::from_millis(7_700));

    let lines = log.lines(BUILD);
    assert_eq!(lines[0].style, LineStyle::Prompt);
    assert_eq!(lines[0].text, "docker build -t myapp:1.0 .");
    assert_eq!(lines.len(), 1 + 20);

    let last = lines.last().unwrap();
    assert_eq!(last.text, "Successfully tagged myapp:1.0");
    assert_eq!(last.style, LineStyle::Output(LineKind::Success));

    assert_eq!(
        output_texts(&log, BUILD),
        transcript_texts(&simulator, BUILD, "docker build -t myapp:1.0 .")
    );
}

#[tokio::test(start_paused = true)]
async fn test_scroll_follows_every_line() {
    let (simulator, mut events) = builtin_simulator();
    let mut log = OutputLog::new();

    simulator.submit_command(ORCHESTRATOR, "kubectl get svc -n myapp-prod");
    present_until_idle(&simulator, &mut events, &mut log).await;

    let pane = log.pane(ORCHESTRATOR).unwrap();
    // echo + two lines + completion
    assert_eq!(pane.scroll_signals(), 1 + 2 + 1);
    assert_eq!(pane.finished().len(), 1);
    assert!(!pane.finished()[0].1);
}

#[tokio::test(start_paused = true)]
async fn test_image_listing_snapshot() {
    let (simulator, mut events) = builtin_simulator();
    let mut log = OutputLog::new();

    simulator.submit_command(BUILD, "docker images");
    present_until_idle(&simulator, &mut events, &mut log).await;

    insta::assert_snapshot!(log.text(BUILD), @r"
    $ docker images
    REPOSITORY   TAG    IMAGE ID       CREATED          SIZE
    myapp        1.0    3f7a2b9c1d4e   2 minutes ago    297MB
    maven        3.8.6  8d2b1e7e9f3a   3 weeks ago      485MB
    openjdk      17     a1b2c3d4e5f6   3 weeks ago      274MB
    ");
}

#[tokio::test(start_paused = true)]
async fn test_sessions_in_different_consoles_interleave() {
    let (simulator, mut events) = builtin_simulator();
    let mut log = OutputLog::new();

    simulator.submit_command(BUILD, "docker build -t myapp:1.0 .");
    simulator.submit_command(ORCHESTRATOR, "kubectl get events -n myapp-prod");
    let seen = present_until_idle(&simulator, &mut events, &mut log).await;

    // Neither console waited for the other
    let first_orchestrator_line = seen
        .iter()
        .position(|e| {
            matches!(e, PlaybackEvent::Line { context, .. } if *context == ORCHESTRATOR)
        })
        .unwrap();
    let last_build_line = seen
        .iter()
        .rposition(|e| {
            matches!(e, PlaybackEvent::Line { context, .. } if *context == BUILD)
        })
        .unwrap();
    assert!(first_orchestrator_line < last_build_line);

    assert_eq!(
        output_texts(&log, BUILD),
        transcript_texts(&simulator, BUILD, "docker build -t myapp:1.0 .")
    );
    assert_eq!(
        output_texts(&log, ORCHESTRATOR),
        transcript_texts(&simulator, ORCHESTRATOR, "kubectl get events -n myapp-prod")
    );
}

#[tokio::test(start_paused = true)]
async fn test_same_console_sessions_overlap_by_default() {
    let (simulator, mut events) = builtin_simulator();
    let mut log = OutputLog::new();

    let push = simulator.submit_command(
        REGISTRY,
        "docker push your-jfrog.jfrog.io/docker-local/myapp:1.0",
    );
    let login = simulator.submit_command(REGISTRY, "docker login your-jfrog.jfrog.io");
    present_until_idle(&simulator, &mut events, &mut log).await;

    let pane = log.pane(REGISTRY).unwrap();
    let push_id = push.session().unwrap().id;
    let login_id = login.session().unwrap().id;

    let push_lines: Vec<_> = pane.session_lines(push_id).map(|l| l.text.clone()).collect();
    let login_lines: Vec<_> = pane.session_lines(login_id).map(|l| l.text.clone()).collect();
    assert_eq!(
        push_lines,
        transcript_texts(
            &simulator,
            REGISTRY,
            "docker push your-jfrog.jfrog.io/docker-local/myapp:1.0"
        )
    );
    assert_eq!(
        login_lines,
        transcript_texts(&simulator, REGISTRY, "docker login your-jfrog.jfrog.io")
    );

    // The shorter login finishes first even though it was submitted second
    assert_eq!(pane.finished()[0].0, login_id);
    assert_eq!(pane.finished()[1].0, push_id);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_on_submit_stops_previous_output() {
    let (simulator, mut events) = builtin_simulator_with(SimulatorOptions {
        cancel_on_submit: true,
        ..SimulatorOptions::default()
    });
    let mut log = OutputLog::new();

    let build = simulator.submit_command(BUILD, "docker build -t myapp:1.0 .");
    tokio::time::sleep(Duration::from_millis(1_000)).await;
    simulator.submit_command(BUILD, "docker ps");
    present_until_idle(&simulator, &mut events, &mut log).await;

    let pane = log.pane(BUILD).unwrap();
    let build_id = build.session().unwrap().id;
    assert!(pane.finished().contains(&(build_id, true)));
    assert!(pane.session_lines(build_id).count() < 20);
    assert!(!log.text(BUILD).contains("Successfully tagged myapp:1.0"));
}

#[tokio::test(start_paused = true)]
async fn test_unknown_command_shows_fallback() {
    let (simulator, mut events) = builtin_simulator();
    let mut log = OutputLog::new();

    assert_eq!(simulator.submit_command(ORCHESTRATOR, "   "), Submission::Ignored);
    let submission = simulator.submit_command(ORCHESTRATOR, "foo bar");
    assert!(matches!(submission, Submission::Unrecognized { .. }));
    present_until_idle(&simulator, &mut events, &mut log).await;

    let lines = log.lines(ORCHESTRATOR);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "foo bar");
    assert_eq!(lines[1].text, UNRECOGNIZED_MESSAGE);
    assert_eq!(lines[1].style, LineStyle::Output(LineKind::Error));
}

#[tokio::test(start_paused = true)]
async fn test_unknown_console_always_falls_back() {
    let (simulator, mut events) = builtin_simulator();
    let mut log = OutputLog::new();

    simulator.submit_command(ContextId(4), "docker images");
    present_until_idle(&simulator, &mut events, &mut log).await;

    assert_eq!(output_texts(&log, ContextId(4)), vec![UNRECOGNIZED_MESSAGE.to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_partial_command_runs_full_transcript() {
    let (simulator, mut events) = builtin_simulator();
    let mut log = OutputLog::new();

    match simulator.submit_command(BUILD, "DOCKER IMA") {
        Submission::Playing { command, rule, .. } => {
            assert_eq!(command, "docker images");
            assert_eq!(rule, MatchRule::Prefix);
        }
        other => panic!("unexpected submission: {other:?}"),
    }
    present_until_idle(&simulator, &mut events, &mut log).await;

    // The prompt shows what was typed, not the matched key
    assert_eq!(log.lines(BUILD)[0].text, "DOCKER IMA");
    assert_eq!(output_texts(&log, BUILD).len(), 4);
}
