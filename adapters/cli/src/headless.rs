use std::time::Duration;

use anyhow::Result as AnyResult;
use tracing::debug;
use turret_survivor_rendering::{FrameControl, Presentation, RenderingBackend, Scene};

/// Backend that drives a fixed number of frames without opening a window.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HeadlessBackend {
    frames: u32,
    frame_time: Duration,
}

impl HeadlessBackend {
    pub(crate) fn new(frames: u32, frame_time: Duration) -> Self {
        Self { frames, frame_time }
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) -> FrameControl,
    {
        let Presentation {
            window_title,
            mut scene,
            ..
        } = presentation;
        debug!(title = %window_title, frames = self.frames, "headless backend started");

        for frame in 0..self.frames {
            if update_scene(self.frame_time, &mut scene) == FrameControl::Exit {
                debug!(frame, "frame loop exited early");
                break;
            }
        }
        Ok(())
    }
}
