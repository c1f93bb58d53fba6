//! Prompt loop behaviour with scripted input, client and interrupts
//!
//! Run with: cargo test --test prompt_loop

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};

use siridb_prompt::client::{Client, Request};
use siridb_prompt::prompt::interrupt::{self, Interrupt, InterruptSender};
use siridb_prompt::prompt::{
    LineReader, LoopOutcome, PromptLoop, PromptState, ReadOutcome, BUSY_INTERRUPT_WARNING,
};
use siridb_prompt::{Error, Result};

/// Log lines written while the returned guard is alive on this thread
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn count(&self, needle: &str) -> usize {
        let output = String::from_utf8(self.0.lock().unwrap().clone()).unwrap();
        output.matches(needle).count()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// What the fake client does for one request
enum Reply {
    Value(Value),
    Fail(String),
    /// Raise `n` interrupts, then wait for them to be handled and answer
    InterruptThen(usize, Value),
    /// Raise `n` interrupts and never answer
    InterruptAndHang(usize),
}

struct FakeClient {
    replies: VecDeque<Reply>,
    seen: Arc<Mutex<Vec<Request>>>,
    interrupts: InterruptSender,
    closed: bool,
}

impl FakeClient {
    fn new(replies: Vec<Reply>, interrupts: InterruptSender) -> (Self, Arc<Mutex<Vec<Request>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let client = Self {
            replies: replies.into(),
            seen: seen.clone(),
            interrupts,
            closed: false,
        };
        (client, seen)
    }
}

impl Client for FakeClient {
    fn execute<'a>(&'a mut self, request: &'a Request) -> BoxFuture<'a, Result<Value>> {
        self.seen.lock().unwrap().push(request.clone());
        let reply = self.replies.pop_front().expect("unexpected request");
        let interrupts = self.interrupts.clone();

        Box::pin(async move {
            match reply {
                Reply::Value(value) => Ok(value),
                Reply::Fail(msg) => Err(Error::Query(msg)),
                Reply::InterruptThen(n, value) => {
                    for _ in 0..n {
                        interrupts.send(Interrupt).unwrap();
                    }
                    tokio::task::yield_now().await;
                    Ok(value)
                }
                Reply::InterruptAndHang(n) => {
                    for _ in 0..n {
                        interrupts.send(Interrupt).unwrap();
                    }
                    futures::future::pending().await
                }
            }
        })
    }

    fn close(&mut self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.closed = true;
            Ok(())
        })
    }
}

/// Reader returning scripted lines, then end of input
struct ScriptedReader {
    lines: VecDeque<ReadOutcome>,
    history: Vec<String>,
}

impl ScriptedReader {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|l| ReadOutcome::Line(l.to_string()))
                .collect(),
            history: Vec::new(),
        }
    }

    fn then(mut self, outcome: ReadOutcome) -> Self {
        self.lines.push_back(outcome);
        self
    }
}

impl LineReader for ScriptedReader {
    fn read_line<'a>(&'a mut self, _prompt: &'a str) -> BoxFuture<'a, Result<ReadOutcome>> {
        let next = self.lines.pop_front().unwrap_or(ReadOutcome::Eof);
        Box::pin(async move { Ok(next) })
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }
}

/// Reader that never produces a line
struct SilentReader;

impl LineReader for SilentReader {
    fn read_line<'a>(&'a mut self, _prompt: &'a str) -> BoxFuture<'a, Result<ReadOutcome>> {
        Box::pin(futures::future::pending())
    }
}

#[tokio::test]
async fn test_exit_command_dispatches_nothing() {
    let (tx, rx) = interrupt::channel();
    let (client, seen) = FakeClient::new(vec![], tx);
    let reader = ScriptedReader::new(&["  EXIT  ", "list series"]);
    let mut out = Vec::new();

    let mut repl = PromptLoop::new(client, reader, rx, &mut out);
    let outcome = assert_ok!(repl.run().await);

    assert_eq!(outcome, LoopOutcome::Exit);
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(repl.state(), PromptState::Terminal);
    assert_eq!(repl.stats().requests, 0);
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_results_are_printed_and_errors_do_not_end_the_loop() {
    let (tx, rx) = interrupt::channel();
    let (client, seen) = FakeClient::new(
        vec![
            Reply::Fail("Query error at position 6".into()),
            Reply::Value(json!({"series": 3})),
        ],
        tx,
    );
    let reader = ScriptedReader::new(&["select bogus", "", "count series", "exit"]);
    let mut out = Vec::new();

    let outcome = {
        let mut repl = PromptLoop::new(client, reader, rx, &mut out);
        let outcome = assert_ok!(repl.run().await);
        let stats = repl.stats();
        assert_eq!(stats.requests, 2);
        assert_eq!(stats.failures, 1);
        outcome
    };

    assert_eq!(outcome, LoopOutcome::Exit);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Query error at position 6\nseries: 3\n"
    );
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            Request::Query("select bogus".into()),
            Request::Query("count series".into())
        ]
    );
}

#[tokio::test]
async fn test_insert_lines_become_insert_requests() {
    let (tx, rx) = interrupt::channel();
    let (client, seen) = FakeClient::new(
        vec![Reply::Value(
            json!({"success_msg": "Successfully inserted 1 point(s)."}),
        )],
        tx,
    );
    let reader = ScriptedReader::new(&[r#"insert {"cpu": [[1500000000, 0.5]]}"#, "insert nonsense"]);
    let mut out = Vec::new();

    {
        let mut repl = PromptLoop::new(client, reader, rx, &mut out);
        assert_eq!(assert_ok!(repl.run().await), LoopOutcome::Exit);
        assert_eq!(repl.stats().failures, 1);
    }

    let output = String::from_utf8(out).unwrap();
    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("Successfully inserted 1 point(s)."));
    assert!(lines.next().unwrap().starts_with("invalid request:"));

    // the malformed insert never reached the client
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_first_busy_interrupt_warns_and_keeps_waiting() {
    let (tx, rx) = interrupt::channel();
    let (client, _seen) = FakeClient::new(
        vec![
            Reply::InterruptThen(1, json!({"success_msg": "done"})),
            Reply::Value(json!({"success_msg": "again"})),
        ],
        tx,
    );
    let reader = ScriptedReader::new(&["drop series 'cpu'", "list series"]);
    let mut out = Vec::new();
    let logs = LogCapture::default();
    let _guard = logs.install();

    {
        let mut repl = PromptLoop::new(client, reader, rx, &mut out);
        assert_eq!(assert_ok!(repl.run().await), LoopOutcome::Exit);
        assert_eq!(repl.stats().interrupt_warnings, 1);
    }

    // the pending exit did not carry over into the next request
    assert_eq!(String::from_utf8(out).unwrap(), "done\nagain\n");
    assert_eq!(logs.count(BUSY_INTERRUPT_WARNING), 1);
}

#[tokio::test]
async fn test_second_busy_interrupt_forces_exit() {
    let (tx, rx) = interrupt::channel();
    let (client, seen) = FakeClient::new(vec![Reply::InterruptAndHang(2)], tx);
    let reader = ScriptedReader::new(&["select * from /.*/", "list series"]);
    let mut out = Vec::new();
    let logs = LogCapture::default();
    let _guard = logs.install();

    let mut repl = PromptLoop::new(client, reader, rx, &mut out);
    let outcome = assert_ok!(repl.run().await);

    assert_eq!(outcome, LoopOutcome::ForcedExit);
    assert_ne!(outcome.exit_code(), 0);
    assert_eq!(repl.stats().interrupt_warnings, 1);
    assert_eq!(logs.count(BUSY_INTERRUPT_WARNING), 1);
    assert_eq!(repl.state(), PromptState::Terminal);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_interrupt_while_idle_quits() {
    let (tx, rx) = interrupt::channel();
    let (client, seen) = FakeClient::new(vec![], tx.clone());
    tx.send(Interrupt).unwrap();

    let mut repl = PromptLoop::new(client, SilentReader, rx, Vec::new());
    let outcome = assert_ok!(repl.run().await);

    assert_eq!(outcome, LoopOutcome::Interrupted);
    assert_eq!(outcome.exit_code(), 130);
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_editor_interrupt_quits() {
    let (tx, rx) = interrupt::channel();
    let (client, _seen) = FakeClient::new(vec![], tx);
    let reader = ScriptedReader::new(&[]).then(ReadOutcome::Interrupted);

    let mut repl = PromptLoop::new(client, reader, rx, Vec::new());
    assert_eq!(assert_ok!(repl.run().await), LoopOutcome::Interrupted);
}

#[tokio::test]
async fn test_end_of_input_exits_cleanly() {
    let (tx, rx) = interrupt::channel();
    let (client, _seen) = FakeClient::new(vec![Reply::Value(json!({"series": 0}))], tx);
    let reader = ScriptedReader::new(&["count series"]);

    let mut repl = PromptLoop::new(client, reader, rx, Vec::new()).with_prompt("dbtest> ");
    assert_eq!(assert_ok!(repl.run().await), LoopOutcome::Exit);

    let mut client = repl.into_client();
    assert_ok!(client.close().await);
    assert!(client.closed);
}

#[tokio::test]
async fn test_history_skips_blank_lines() {
    let (tx, rx) = interrupt::channel();
    let (client, _seen) = FakeClient::new(vec![Reply::Value(Value::Null)], tx);
    let mut reader = ScriptedReader::new(&["   ", "list series", "exit"]);
    let mut out = Vec::new();

    {
        let mut repl = PromptLoop::new(client, &mut reader, rx, &mut out);
        assert_ok!(repl.run().await);
    }

    assert_eq!(reader.history, ["list series", "exit"]);
    // a null response prints nothing
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_reader_failure_is_returned() {
    struct Broken;
    impl LineReader for Broken {
        fn read_line<'a>(&'a mut self, _prompt: &'a str) -> BoxFuture<'a, Result<ReadOutcome>> {
            Box::pin(async { Err(Error::Input("terminal went away".into())) })
        }
    }

    let (tx, rx) = interrupt::channel();
    let (client, _seen) = FakeClient::new(vec![], tx);
    let mut repl = PromptLoop::new(client, Broken, rx, Vec::new());
    assert_err!(repl.run().await);
}
