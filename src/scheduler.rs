use crate::handler::HandlerKind;

/// Per-frame callbacks requested since the last rendered frame. Requests from
/// the same handler coalesce, so several pointer moves between two frames
/// cost one camera update.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: Vec<HandlerKind>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, kind: HandlerKind) {
        if !self.pending.contains(&kind) {
            self.pending.push(kind);
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn take(&mut self) -> Vec<HandlerKind> {
        std::mem::take(&mut self.pending)
    }
}
