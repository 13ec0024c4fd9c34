/// Shared-session wrapper: one mutex around the game plus a background
/// ticker thread for enemy sweeps and the level clock.
///
/// The mutex is the exclusion boundary the engine requires: one player
/// move (with its chained teleport effects) and one full enemy sweep are
/// each a single critical section, so neither context ever observes the
/// world mid-operation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::error;

use crate::domain::position::Direction;
use crate::sim::game::{Game, GameState};

pub struct GameSession {
    game: Arc<Mutex<Game>>,
    shutdown: Arc<AtomicBool>,
    ticker: Option<JoinHandle<()>>,
}

impl GameSession {
    /// Wrap a game and start the ticker.
    pub fn start(game: Game) -> Self {
        let tick_rate = Duration::from_millis(game.config().tick_rate_ms);
        let game = Arc::new(Mutex::new(game));
        let shutdown = Arc::new(AtomicBool::new(false));
        let ticker = spawn_ticker(Arc::clone(&game), Arc::clone(&shutdown), tick_rate);
        GameSession {
            game,
            shutdown,
            ticker: Some(ticker),
        }
    }

    /// Shared handle for collaborators that lock the game themselves.
    pub fn game(&self) -> Arc<Mutex<Game>> {
        Arc::clone(&self.game)
    }

    /// One player move under the session lock.
    pub fn move_player(&self, dir: Direction) {
        lock(&self.game).move_player(dir);
    }

    pub fn pause(&self) {
        lock(&self.game).pause();
    }

    pub fn resume(&self) {
        lock(&self.game).resume();
    }

    /// Run a closure under the session lock, for reads and compound
    /// operations (save, restart).
    pub fn with_game<T>(&self, f: impl FnOnce(&mut Game) -> T) -> T {
        f(&mut lock(&self.game))
    }

    /// Signal the ticker and wait for it to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = self.ticker.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Take the lock even if a previous holder panicked; every mutation either
/// completed or rejected before the lock was released, so the world inside
/// stays consistent.
fn lock(game: &Arc<Mutex<Game>>) -> MutexGuard<'_, Game> {
    match game.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn spawn_ticker(
    game: Arc<Mutex<Game>>,
    shutdown: Arc<AtomicBool>,
    tick_rate: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut since_second = Duration::ZERO;
        loop {
            if shutdown.load(Ordering::SeqCst) {
                break;
            }
            thread::sleep(tick_rate);
            since_second += tick_rate;

            let mut game = lock(&game);
            if game.state() == GameState::Finished {
                break;
            }
            if let Err(err) = game.tick_enemies() {
                error!(%err, "enemy sweep failed, stopping ticker");
                break;
            }
            // Wall time accumulates across sweeps; the clock loses one
            // second per full second elapsed.
            while since_second >= Duration::from_secs(1) {
                since_second -= Duration::from_secs(1);
                if let Err(err) = game.tick_clock() {
                    error!(%err, "clock tick failed, stopping ticker");
                    return;
                }
            }
        }
    })
}
