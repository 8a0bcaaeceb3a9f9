//! Direction latch between key presses and ticks.
//!
//! Key presses only write the pending slot. The reversal check runs when the
//! tick consumes the slot, against whatever direction is committed then.

use super::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Steering {
    committed: Direction,
    pending: Option<Direction>,
}

impl Steering {
    pub fn new(direction: Direction) -> Self {
        Self {
            committed: direction,
            pending: None,
        }
    }

    /// Direction the snake moved in on the last tick
    pub fn committed(&self) -> Direction {
        self.committed
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    /// Record a turn request. Latest request wins.
    pub fn request(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }

    /// Consume the pending request at a tick boundary and return the
    /// direction to move in.
    pub fn latch(&mut self) -> Direction {
        if let Some(next) = self.pending.take() {
            if !self.committed.is_opposite(next) {
                self.committed = next;
            }
        }
        self.committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_without_request_keeps_direction() {
        let mut steering = Steering::new(Direction::Up);
        assert_eq!(steering.latch(), Direction::Up);
        assert_eq!(steering.pending(), None);
    }

    #[test]
    fn test_latest_request_wins() {
        let mut steering = Steering::new(Direction::Up);
        steering.request(Direction::Left);
        steering.request(Direction::Right);
        assert_eq!(steering.latch(), Direction::Right);
    }

    #[test]
    fn test_reversal_is_ignored_for_every_direction() {
        for dir in Direction::ALL {
            let mut steering = Steering::new(dir);
            steering.request(dir.opposite());
            assert_eq!(steering.latch(), dir);
            assert_eq!(steering.pending(), None);
        }
    }

    #[test]
    fn test_reversal_checked_at_consumption() {
        // Down then Left between two ticks: only Left reaches the latch.
        let mut steering = Steering::new(Direction::Up);
        steering.request(Direction::Down);
        steering.request(Direction::Left);
        assert_eq!(steering.latch(), Direction::Left);

        // A reversal overwriting a legal turn drops the turn entirely.
        steering.request(Direction::Up);
        steering.request(Direction::Right);
        assert_eq!(steering.latch(), Direction::Left);
    }

    #[test]
    fn test_non_reversing_turns_take_effect() {
        for from in Direction::ALL {
            for to in Direction::ALL {
                if from.is_opposite(to) {
                    continue;
                }
                let mut steering = Steering::new(from);
                steering.request(to);
                assert_eq!(steering.latch(), to);
            }
        }
    }
}
