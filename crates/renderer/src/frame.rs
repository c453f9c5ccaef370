//! Buffer slot rotation for frames in flight.

use tracing::debug;

/// Hands out frame buffer slots in strict FIFO order.
///
/// With a pipeline depth of `n`, frame `k` (counting from zero) always uses
/// slot `k % n`. A backend must not overwrite the resources of a slot until
/// its own fence confirms the GPU finished the previous frame in that slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRing {
    depth: usize,
    next: usize,
}

impl FrameRing {
    /// Creates a ring with `depth` slots. A depth of zero is treated as one.
    pub fn new(depth: usize) -> Self {
        let depth = depth.max(1);
        debug!("Frame ring created with {} slots", depth);
        Self {
            depth,
            next: 0,
        }
    }

    /// Slot the next frame will use.
    #[inline]
    pub fn peek(&self) -> usize {
        self.next
    }

    /// Claims the next slot and returns it.
    pub fn advance(&mut self) -> usize {
        let index = self.next;
        self.next = (self.next + 1) % self.depth;
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_uses_slot_zero() {
        let ring = FrameRing::new(2);
        assert_eq!(ring.peek(), 0);
    }

    #[test]
    fn test_rotation() {
        let mut ring = FrameRing::new(3);
        let slots: Vec<usize> = (0..7).map(|_| ring.advance()).collect();
        assert_eq!(slots, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(ring.peek(), 1);
    }

    #[test]
    fn test_zero_depth_clamped() {
        let mut ring = FrameRing::new(0);
        assert_eq!(ring.advance(), 0);
        assert_eq!(ring.advance(), 0);
    }
}
