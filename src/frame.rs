use crate::scene::SceneGraph;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the session clock started. Monotonic.
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Infinite iterator that yields frame information
/// Use this in a loop: `for frame in frames { ... }`
pub struct FrameIterator {
    frame_number: u64,
    start_time: std::time::Instant,
    last_frame_time: std::time::Instant,
}

impl FrameIterator {
    pub fn new() -> Self {
        let now = std::time::Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn time(&self) -> f32 {
        self.start_time.elapsed().as_secs_f32()
    }
}

impl Default for FrameIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let now = std::time::Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        let time = now.duration_since(self.start_time).as_secs_f32();

        let info = FrameInfo::new(self.frame_number, time, delta);

        self.frame_number += 1;
        self.last_frame_time = now;

        Some(info)
    }
}

/// Work run once per display refresh, before the frame is drawn
pub trait FrameCallback {
    fn on_frame(&mut self, frame: &FrameInfo, scene: &mut SceneGraph);
}

impl<F> FrameCallback for F
where
    F: FnMut(&FrameInfo, &mut SceneGraph),
{
    fn on_frame(&mut self, frame: &FrameInfo, scene: &mut SceneGraph) {
        self(frame, scene)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

/// Per-frame callback registry driven by the event loop.
/// Callbacks run in registration order, each to completion.
pub struct FrameScheduler {
    callbacks: Vec<(CallbackId, Box<dyn FrameCallback>)>,
    next_id: u64,
    frames: FrameIterator,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
            next_id: 0,
            frames: FrameIterator::new(),
        }
    }

    pub fn register(&mut self, callback: impl FrameCallback + 'static) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    pub fn unregister(&mut self, id: CallbackId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(cb_id, _)| *cb_id != id);
        self.callbacks.len() != before
    }

    /// Drop every callback, e.g. when the scene unmounts
    pub fn clear(&mut self) {
        self.callbacks.clear();
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Advance the session clock and run every callback
    pub fn tick(&mut self, scene: &mut SceneGraph) -> FrameInfo {
        let frame = self.frames.next().unwrap_or(FrameInfo::new(0, 0.0, 0.0));
        self.run_frame(&frame, scene);
        frame
    }

    /// Run every callback for an externally supplied frame
    pub fn run_frame(&mut self, frame: &FrameInfo, scene: &mut SceneGraph) {
        for (_, callback) in &mut self.callbacks {
            callback.on_frame(frame, scene);
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}
