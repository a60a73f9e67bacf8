use log::{debug, warn};
use smol::channel::{Receiver, Sender};
use smol::future;
use smol::process::Command;
use smol::Timer;
use std::process::Stdio;
use std::time::Duration;

const SPEECH_TIMEOUT: Duration = Duration::from_secs(3);
const BACKLOG: usize = 4;

/// Speaks announcements through an external program on a detached task.
/// The game never waits for it; announcements that do not fit the backlog are dropped.
pub struct Narrator {
    sender: Sender<String>,
}

impl Narrator {
    pub fn spawn(program: String) -> Self {
        let (sender, receiver) = smol::channel::bounded(BACKLOG);
        smol::spawn(speak_all(program, receiver)).detach();
        Self { sender }
    }

    pub fn say(&self, text: &str) {
        if let Err(err) = self.sender.try_send(text.to_owned()) {
            debug!("dropped announcement '{text}': {err}");
        }
    }
}

async fn speak_all(program: String, receiver: Receiver<String>) {
    while let Ok(text) = receiver.recv().await {
        speak(&program, &text).await;
    }
}

async fn speak(program: &str, text: &str) {
    let mut child = match Command::new(program)
        .arg(text)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            warn!("failed to run speech program '{program}': {err}");
            return;
        }
    };

    let finished = future::or(async { child.status().await.ok() }, async {
        Timer::after(SPEECH_TIMEOUT).await;
        None
    })
    .await;

    if finished.is_none() {
        debug!("speech for '{text}' timed out");
        let _ = child.kill();
    }
}
