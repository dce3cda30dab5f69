//! Scroll-into-view requests.
//!
//! With scroll tracking on, each body mount asks once to be scrolled to the
//! middle of the viewport. Requests are collected in order and the renderer
//! only honors the last one.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Jump straight to the target
    Auto,
    /// Approach the target over several frames
    #[default]
    Smooth,
}

/// Where the target should land inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBlock {
    Start,
    #[default]
    Center,
    End,
    /// Move as little as possible to make the target visible
    Nearest,
}

impl ScrollBlock {
    /// Offset of the viewport's first row that places a target spanning
    /// `top..top + height` according to this alignment.
    pub fn offset_for(&self, top: usize, height: usize, viewport: usize, current: usize) -> usize {
        match self {
            ScrollBlock::Start => top,
            ScrollBlock::Center => (top + height / 2).saturating_sub(viewport / 2),
            ScrollBlock::End => (top + height).saturating_sub(viewport),
            ScrollBlock::Nearest => {
                if top < current {
                    top
                } else if top + height > current + viewport {
                    (top + height).saturating_sub(viewport).min(top)
                } else {
                    current
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Step whose content container asked to be shown
    pub index: usize,
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl ScrollRequest {
    /// The request a step body makes when it mounts
    pub fn on_mount(index: usize) -> Self {
        Self {
            index,
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Center,
        }
    }
}

/// Pending scroll requests for one stepper
#[derive(Debug, Default)]
pub struct ScrollPort {
    pending: Vec<ScrollRequest>,
}

impl ScrollPort {
    pub fn request(&mut self, request: ScrollRequest) {
        self.pending.push(request);
    }

    pub fn pending(&self) -> &[ScrollRequest] {
        &self.pending
    }

    /// Drain the queue and return the request that wins the viewport
    pub fn take_target(&mut self) -> Option<ScrollRequest> {
        self.pending.drain(..).last()
    }
}
