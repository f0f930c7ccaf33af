//! Frames for the groups of the current top-level group.
//!
//! Frames stay in the stack, in opening order, until the enclosing top-level
//! group closes. Alternation and quantifier scoping downgrade ranges of them
//! by index, so siblings that already closed must still be reachable.

use regroup_core::GroupDescriptor;

/// Provisional classification of an open or closed group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    MandatoryCapturing,
    OptionalCapturing,
    NonCapturing,
    /// Non-capturing, and every capturing group inside it is optional
    /// (negative lookaround, conditional).
    OptionalNonCapturing,
}

impl FrameKind {
    pub fn is_capturing(self) -> bool {
        matches!(self, Self::MandatoryCapturing | Self::OptionalCapturing)
    }

    pub fn forces_optional(self) -> bool {
        self == Self::OptionalNonCapturing
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    kind: FrameKind,
    name: Option<String>,
}

/// A group that was just closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Closed {
    /// Position of the group's frame in the stack.
    pub index: usize,
    pub kind: FrameKind,
}

#[derive(Debug, Clone, Default)]
pub struct NestingStack {
    frames: Vec<Frame>,
    /// Frame indices of the groups still open, innermost last.
    open: Vec<usize>,
}

impl NestingStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open groups.
    #[inline]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[cfg(test)]
    pub fn kind(&self, index: usize) -> Option<FrameKind> {
        self.frames.get(index).map(|f| f.kind)
    }

    /// Open a group, returning its frame index.
    pub fn open(&mut self, kind: FrameKind, name: Option<String>) -> usize {
        let index = self.frames.len();
        self.frames.push(Frame { kind, name });
        self.open.push(index);
        index
    }

    /// Close the innermost open group. `None` on an unbalanced `)`.
    pub fn close(&mut self) -> Option<Closed> {
        let index = self.open.pop()?;
        Some(Closed {
            index,
            kind: self.frames[index].kind,
        })
    }

    /// Downgrade mandatory capturing frames at `index` and everything after it.
    pub fn downgrade_from(&mut self, index: usize) {
        self.downgrade(index);
    }

    /// Downgrade mandatory capturing frames strictly after `index`.
    pub fn downgrade_after(&mut self, index: usize) {
        self.downgrade(index + 1);
    }

    fn downgrade(&mut self, start: usize) {
        for frame in self.frames.iter_mut().skip(start) {
            if frame.kind == FrameKind::MandatoryCapturing {
                frame.kind = FrameKind::OptionalCapturing;
            }
        }
    }

    /// Move every capturing frame into `out`, in order, and reset the stack.
    pub fn flush_into(&mut self, out: &mut Vec<GroupDescriptor>) {
        debug_assert!(self.open.is_empty(), "flush with open groups");
        out.extend(
            self.frames
                .drain(..)
                .filter(|f| f.kind.is_capturing())
                .map(|f| GroupDescriptor::new(f.name, f.kind == FrameKind::MandatoryCapturing)),
        );
    }
}
