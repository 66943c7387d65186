//! Call stack for `call`/`ret`.

/// One active `call`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Where `ret` resumes (the offset after the `call`).
    pub return_addr: u32,
}

/// Return-address stack, bounded by a recursion limit.
///
/// Separate from the operand stack: `ret` never sees operand values.
#[derive(Debug)]
pub struct CallStack {
    frames: Vec<Frame>,
    limit: usize,
}

impl CallStack {
    pub fn new(limit: usize) -> Self {
        Self {
            frames: Vec::new(),
            limit,
        }
    }

    /// Push a frame. Returns `false` (and pushes nothing) at the limit.
    #[must_use]
    pub fn push(&mut self, frame: Frame) -> bool {
        if self.frames.len() >= self.limit {
            return false;
        }
        self.frames.push(frame);
        true
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
