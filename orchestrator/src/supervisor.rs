use std::{
    any::Any,
    io,
    thread::{self, JoinHandle},
};

use log::{info, warn};
use roles::{Role, RoleErr, RoleKind};

/// How a role's worker ended.
#[derive(Debug)]
pub enum ExitStatus {
    Finished,
    Failed(RoleErr),
    Panicked,
    /// The worker thread couldn't be created, the role never ran.
    NotStarted(io::Error),
}

/// The exit of one role, as observed when joining it.
#[derive(Debug)]
pub struct RoleExit {
    pub ordinal: usize,
    pub kind: RoleKind,
    pub status: ExitStatus,
}

impl RoleExit {
    pub fn is_clean(&self) -> bool {
        matches!(self.status, ExitStatus::Finished)
    }
}

type Worker = io::Result<JoinHandle<roles::Result<()>>>;

/// Runs every role on its own thread and waits for all of them.
///
/// There is no restart and no timeout: a role that fails or panics is joined
/// like any other, its exit is only reported.
pub struct Supervisor {
    workers: Vec<(usize, RoleKind, Worker)>,
}

impl Supervisor {
    /// Spawns every role, in order, on a dedicated named thread.
    pub fn spawn(roles: Vec<Role>) -> Self {
        let workers = roles
            .into_iter()
            .map(|role| {
                let (ordinal, kind) = (role.ordinal(), role.kind());
                let handle = thread::Builder::new()
                    .name(format!("{kind}-{ordinal}"))
                    .spawn(move || role.run());
                (ordinal, kind, handle)
            })
            .collect();

        Self { workers }
    }

    /// Waits for every role to end, in spawn order.
    ///
    /// Joining happens on the runtime's blocking pool, one role at a time, so
    /// a pool smaller than the amount of roles never stalls a run.
    ///
    /// # Returns
    /// The exit of every role, in spawn order.
    pub async fn join(self) -> Vec<RoleExit> {
        let mut exits = Vec::with_capacity(self.workers.len());

        for (ordinal, kind, worker) in self.workers {
            let status = match worker {
                Ok(handle) => match tokio::task::spawn_blocking(move || handle.join()).await {
                    Ok(Ok(Ok(()))) => ExitStatus::Finished,
                    Ok(Ok(Err(e))) => {
                        warn!("{kind} {ordinal} failed: {e}");
                        ExitStatus::Failed(e)
                    }
                    Ok(Err(payload)) => {
                        warn!("{kind} {ordinal} panicked: {}", panic_message(&payload));
                        ExitStatus::Panicked
                    }
                    Err(e) => {
                        warn!("joining {kind} {ordinal} panicked: {e}");
                        ExitStatus::Panicked
                    }
                },
                Err(e) => {
                    warn!("{kind} {ordinal} couldn't be started: {e}");
                    ExitStatus::NotStarted(e)
                }
            };

            info!("joined {kind} {ordinal}");
            exits.push(RoleExit {
                ordinal,
                kind,
                status,
            });
        }

        exits
    }
}

fn panic_message(payload: &Box<dyn Any + Send>) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
