use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use anyhow::{Context, Result};
use sneak_rendering::{Color, Presentation, RenderingBackend, Scene};
use sneak_world::SharedWorld;
use tracing::{error, trace};

const WINDOW_TITLE: &str = "Sneak";
const CLEAR_COLOR: Color = Color::from_rgb_u8(0, 0, 0);

/// Read-only repaint loop presenting world snapshots at a fixed interval.
#[derive(Debug)]
pub(crate) struct RepaintObserver {
    stop: Sender<()>,
    handle: JoinHandle<Result<()>>,
}

impl RepaintObserver {
    /// Starts presenting `world` on a background thread.
    ///
    /// A frame is only drawn when the scene differs from the last one shown.
    /// After a stop request one last check runs, so the final state is always
    /// presented. A failing backend is logged and ends the loop.
    pub(crate) fn spawn<B>(
        world: SharedWorld,
        mut backend: B,
        interval: Duration,
        debug: bool,
    ) -> Self
    where
        B: RenderingBackend + Send + 'static,
    {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = thread::spawn(move || -> Result<()> {
            let mut shown: Option<Scene> = None;
            loop {
                repaint(&world, &mut backend, debug, &mut shown)?;
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        return repaint(&world, &mut backend, debug, &mut shown);
                    }
                }
            }
        });
        Self { stop, handle }
    }

    /// Reports whether the loop is still presenting frames.
    pub(crate) fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stops the loop and reports the first failure it hit, if any.
    pub(crate) fn finish(self) -> Result<()> {
        let _ = self.stop.send(());
        match self.handle.join() {
            Ok(outcome) => outcome,
            Err(_) => anyhow::bail!("repaint observer panicked"),
        }
    }
}

fn repaint<B>(
    world: &SharedWorld,
    backend: &mut B,
    debug: bool,
    shown: &mut Option<Scene>,
) -> Result<()>
where
    B: RenderingBackend,
{
    let snapshot = world.snapshot();
    let scene = Scene::from_snapshot(&snapshot, debug).context("failed to build scene")?;
    if shown.as_ref() == Some(&scene) {
        return Ok(());
    }
    trace!(session = scene.session, "repainting");
    let presentation = Presentation::new(WINDOW_TITLE, CLEAR_COLOR, scene.clone());
    if let Err(failure) = backend.present(&presentation) {
        error!("repaint observer stopped: {failure:#}");
        return Err(failure);
    }
    *shown = Some(scene);
    Ok(())
}
