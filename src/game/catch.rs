// Level 3: catch the falling hearts.
// Hearts spawn on a fixed interval until the target is caught. Each heart
// lives for one fall animation; a heart that lands uncaught is simply removed.

pub const TARGET_HEARTS: u32 = 10;
pub const POINTS_PER_HEART: u32 = 10;
pub const SPAWN_INTERVAL_MS: u32 = 800;
pub const FALL_DURATION_MS: u32 = 3000;
/// How long a caught heart fades before its node is removed.
pub const CAUGHT_FADE_MS: u32 = 300;

pub type HeartId = u32;

#[derive(Debug, PartialEq, Eq)]
pub enum Catch {
    /// Unknown, already gone, or the round is over.
    Ignored,
    Caught { caught: u32, complete: bool },
}

pub struct CatchRound {
    target: u32,
    caught: u32,
    spawned: u32,
    live: Vec<HeartId>,
    next_id: HeartId,
}

impl CatchRound {
    pub fn new(target: u32) -> Self {
        Self {
            target,
            caught: 0,
            spawned: 0,
            live: Vec::new(),
            next_id: 0,
        }
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn caught(&self) -> u32 {
        self.caught
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn in_flight(&self) -> usize {
        self.live.len()
    }

    pub fn is_complete(&self) -> bool {
        self.caught >= self.target
    }

    /// New heart id, or `None` once the target has been reached.
    pub fn spawn(&mut self) -> Option<HeartId> {
        if self.is_complete() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.spawned += 1;
        self.live.push(id);
        Some(id)
    }

    pub fn catch(&mut self, id: HeartId) -> Catch {
        if self.is_complete() || !self.take(id) {
            return Catch::Ignored;
        }
        self.caught += 1;
        Catch::Caught {
            caught: self.caught,
            complete: self.is_complete(),
        }
    }

    /// Heart reached the bottom. No penalty.
    pub fn expire(&mut self, id: HeartId) -> bool {
        self.take(id)
    }

    fn take(&mut self, id: HeartId) -> bool {
        match self.live.iter().position(|&h| h == id) {
            Some(pos) => {
                self.live.swap_remove(pos);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawning_stops_at_target() {
        let mut r = CatchRound::new(2);
        let a = r.spawn().unwrap();
        let b = r.spawn().unwrap();
        assert_eq!(r.catch(a), Catch::Caught { caught: 1, complete: false });
        assert_eq!(r.catch(b), Catch::Caught { caught: 2, complete: true });
        assert!(r.spawn().is_none());
    }

    #[test]
    fn expired_heart_cannot_be_caught() {
        let mut r = CatchRound::new(3);
        let a = r.spawn().unwrap();
        assert!(r.expire(a));
        assert_eq!(r.catch(a), Catch::Ignored);
        assert!(!r.expire(a));
        assert_eq!(r.caught(), 0);
    }

    #[test]
    fn double_click_counts_once() {
        let mut r = CatchRound::new(3);
        let a = r.spawn().unwrap();
        r.catch(a);
        assert_eq!(r.catch(a), Catch::Ignored);
        assert_eq!(r.caught(), 1);
    }

    #[test]
    fn late_catches_after_completion_are_ignored() {
        let mut r = CatchRound::new(1);
        let a = r.spawn().unwrap();
        let b = r.spawn().unwrap();
        r.catch(a);
        assert_eq!(r.catch(b), Catch::Ignored);
        assert_eq!(r.in_flight(), 1);
    }
}
