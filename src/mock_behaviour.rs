//! Scripted failures for the in-memory gateway

use crate::BoxError;

/// Which requests a [`LocalGateway`](crate::local::LocalGateway) should fail.
///
/// Each counter is `(m, n)`: the first `m` requests of this kind succeed, the `n` following ones fail, then they all succeed again.
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// While this is set, nothing fails and the counters are left untouched
    pub is_suspended: bool,

    pub get_behaviour: (u32, u32),
    pub post_behaviour: (u32, u32),
    pub patch_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every kind of request fails `n_fails` times, starting with the next one
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            get_behaviour: (0, n_fails),
            post_behaviour: (0, n_fails),
            patch_behaviour: (0, n_fails),
        }
    }

    /// Let everything through until [`Self::resume`] is called
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_get(&mut self) -> Result<(), BoxError> {
        self.check(Operation::Get)
    }
    pub fn can_post(&mut self) -> Result<(), BoxError> {
        self.check(Operation::Post)
    }
    pub fn can_patch(&mut self) -> Result<(), BoxError> {
        self.check(Operation::Patch)
    }

    fn check(&mut self, operation: Operation) -> Result<(), BoxError> {
        if self.is_suspended {
            return Ok(());
        }
        let counters = match operation {
            Operation::Get => &mut self.get_behaviour,
            Operation::Post => &mut self.post_behaviour,
            Operation::Patch => &mut self.patch_behaviour,
        };
        match counters {
            (successes, _) if *successes > 0 => {
                *successes -= 1;
                Ok(())
            },
            (_, failures) if *failures > 0 => {
                *failures -= 1;
                log::debug!("Mock behaviour: failing a {:?} ({} more to fail)", operation, failures);
                Err(format!("Mocked failure of a {:?} request", operation).into())
            },
            _ => Ok(()),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Operation {
    Get,
    Post,
    Patch,
}
