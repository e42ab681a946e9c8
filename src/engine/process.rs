//! A UCI engine running as a child process.
//!
//! A reader thread turns the engine's stdout into [`EngineEvent`]s on a
//! channel; the owning thread writes commands straight to stdin and polls
//! the channel with a deadline, so a silent engine can always be abandoned.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};

use crate::board::Move;
use crate::sync::StopFlag;
use crate::uci::{UciCommand, UciReply};

use super::{EngineConfig, EngineError, MoveProvider};

/// How often a blocked wait re-checks its stop flag
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How long an abandoned search gets to report its `bestmove`
const STOP_GRACE: Duration = Duration::from_millis(500);

/// How long the process gets to exit after `quit`
const QUIT_GRACE: Duration = Duration::from_millis(250);

/// Messages from the reader thread
#[derive(Debug)]
enum EngineEvent {
    /// A line of engine output
    Output(String),
    /// Engine stdout closed
    Exited,
    /// Reading stdout failed
    Error(String),
}

struct Deadline {
    start: Instant,
    timeout: Duration,
}

impl Deadline {
    fn after(timeout: Duration) -> Self {
        Self {
            start: Instant::now(),
            timeout,
        }
    }

    fn remaining(&self) -> Option<Duration> {
        self.timeout
            .checked_sub(self.start.elapsed())
            .filter(|d| !d.is_zero())
    }

    fn expired(&self) -> EngineError {
        let waited = self.start.elapsed().as_millis();
        EngineError::Timeout {
            waited_ms: u64::try_from(waited).unwrap_or(u64::MAX),
        }
    }
}

/// A running UCI engine.
///
/// Dropping it sends `quit` and reaps the process.
pub struct UciEngine {
    config: EngineConfig,
    child: Child,
    stdin: ChildStdin,
    events: Receiver<EngineEvent>,
    name: Option<String>,
}

impl UciEngine {
    /// Spawn the configured program and complete the UCI handshake.
    pub fn start(config: EngineConfig) -> Result<Self, EngineError> {
        let program = config.program.display().to_string();

        let mut child = Command::new(&config.program)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| unavailable(format!("failed to start {program}: {e}")))?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let (Some(stdin), Some(stdout)) = (stdin, stdout) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(unavailable(format!("no stdio pipes for {program}")));
        };

        let (tx, rx) = mpsc::channel::<EngineEvent>();
        let spawned = thread::Builder::new()
            .name("uci-engine-reader".to_string())
            .spawn(move || {
                let reader = BufReader::new(stdout);
                for line in reader.lines() {
                    match line {
                        Ok(text) => {
                            if tx.send(EngineEvent::Output(text)).is_err() {
                                return;
                            }
                        }
                        Err(e) => {
                            let _ = tx.send(EngineEvent::Error(e.to_string()));
                            return;
                        }
                    }
                }
                let _ = tx.send(EngineEvent::Exited);
            });
        if let Err(e) = spawned {
            let _ = child.kill();
            let _ = child.wait();
            return Err(unavailable(format!("failed to spawn reader thread: {e}")));
        }

        let mut engine = UciEngine {
            config,
            child,
            stdin,
            events: rx,
            name: None,
        };
        engine.handshake()?;
        info!(
            "Engine {} ready",
            engine.name.as_deref().unwrap_or(program.as_str())
        );
        Ok(engine)
    }

    /// The name the engine gave in `id name`, if any
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tell the engine a new game starts and wait until it has caught up.
    pub fn new_game(&mut self) -> Result<(), EngineError> {
        self.send(&UciCommand::UciNewGame)?;
        self.sync()
    }

    fn handshake(&mut self) -> Result<(), EngineError> {
        let deadline = Deadline::after(self.config.handshake_timeout);
        let never = StopFlag::new();

        self.send(&UciCommand::Uci)?;
        loop {
            match self.next_reply(&deadline, &never)? {
                UciReply::UciOk => break,
                UciReply::Id(id) => {
                    if let Some(name) = id.strip_prefix("name ") {
                        self.name = Some(name.trim().to_string());
                    }
                }
                _ => {}
            }
        }

        for (name, value) in self.config.options.clone() {
            self.send(&UciCommand::SetOption { name, value })?;
        }
        self.send(&UciCommand::UciNewGame)?;
        self.sync()
    }

    /// `isready` / `readyok`, discarding everything in between.
    ///
    /// Anything left over from an earlier request (a late `bestmove`
    /// included) arrives before `readyok` and is dropped here.
    fn sync(&mut self) -> Result<(), EngineError> {
        let deadline = Deadline::after(self.config.handshake_timeout);
        let never = StopFlag::new();

        self.send(&UciCommand::IsReady)?;
        loop {
            match self.next_reply(&deadline, &never) {
                Ok(UciReply::ReadyOk) => return Ok(()),
                Ok(_) | Err(EngineError::MalformedReply { .. }) => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn send(&mut self, cmd: &UciCommand) -> Result<(), EngineError> {
        let line = cmd.to_uci_string();
        debug!("> {line}");
        writeln!(self.stdin, "{line}")
            .and_then(|()| self.stdin.flush())
            .map_err(|e| unavailable(format!("failed to write to engine: {e}")))
    }

    /// Wait for the next engine line, giving up at `deadline` or when
    /// `stop` is raised.
    fn next_reply(&mut self, deadline: &Deadline, stop: &StopFlag) -> Result<UciReply, EngineError> {
        loop {
            if stop.is_stopped() {
                return Err(EngineError::Cancelled);
            }
            let Some(remaining) = deadline.remaining() else {
                return Err(deadline.expired());
            };

            match self.events.recv_timeout(remaining.min(POLL_INTERVAL)) {
                Ok(EngineEvent::Output(line)) => {
                    trace!("< {line}");
                    return UciReply::parse(&line)
                        .map_err(|_| EngineError::MalformedReply { reply: line });
                }
                Ok(EngineEvent::Exited) => return Err(unavailable("engine exited".to_string())),
                Ok(EngineEvent::Error(e)) => return Err(unavailable(e)),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(unavailable("engine output closed".to_string()));
                }
            }
        }
    }

    /// Stop a search we no longer want and swallow its `bestmove`.
    fn abandon_search(&mut self) {
        if self.send(&UciCommand::Stop).is_err() {
            return;
        }
        let deadline = Deadline::after(STOP_GRACE);
        let never = StopFlag::new();
        loop {
            match self.next_reply(&deadline, &never) {
                Ok(UciReply::BestMove { .. } | UciReply::NoMove)
                | Err(
                    EngineError::Timeout { .. }
                    | EngineError::Unavailable { .. }
                    | EngineError::Cancelled
                    | EngineError::NoMove,
                ) => return,
                Ok(_) | Err(EngineError::MalformedReply { .. }) => {}
            }
        }
    }

    fn check_alive(&mut self) -> Result<(), EngineError> {
        loop {
            match self.events.try_recv() {
                Ok(EngineEvent::Output(line)) => trace!("< {line} (stale)"),
                Ok(EngineEvent::Exited) | Err(TryRecvError::Disconnected) => {
                    return Err(unavailable("engine exited".to_string()));
                }
                Ok(EngineEvent::Error(e)) => return Err(unavailable(e)),
                Err(TryRecvError::Empty) => return Ok(()),
            }
        }
    }

    fn search(&mut self, fen: &str, stop: &StopFlag) -> Result<Move, EngineError> {
        self.check_alive()?;
        self.sync()?;

        self.send(&UciCommand::Position {
            fen: Some(fen.to_string()),
            moves: Vec::new(),
        })?;
        let limit = self.config.limit;
        self.send(&UciCommand::Go(limit))?;

        let deadline = Deadline::after(self.config.request_timeout);
        loop {
            match self.next_reply(&deadline, stop) {
                Ok(UciReply::BestMove { mv, .. }) => {
                    debug!("Engine chose {mv}");
                    return Ok(mv);
                }
                Ok(UciReply::NoMove) => return Err(EngineError::NoMove),
                Ok(_) => {}
                Err(e @ (EngineError::Timeout { .. } | EngineError::Cancelled)) => {
                    self.abandon_search();
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl MoveProvider for UciEngine {
    fn best_move(&mut self, fen: &str, stop: &StopFlag) -> Result<Move, EngineError> {
        if stop.is_stopped() {
            return Err(EngineError::Cancelled);
        }
        self.search(fen, stop).map_err(|e| {
            warn!("Engine request failed: {e}");
            e
        })
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        let _ = self.send(&UciCommand::Quit);

        let deadline = Deadline::after(QUIT_GRACE);
        while deadline.remaining().is_some() {
            match self.child.try_wait() {
                Ok(Some(_)) => return,
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(_) => break,
            }
        }
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn unavailable(reason: String) -> EngineError {
    EngineError::Unavailable { reason }
}
