use core::ops::{Deref, DerefMut};

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::context::Context;

/// bounded free list of request contexts.
pub(crate) struct ContextPool {
    idle: Mutex<Vec<Context>>,
    capacity: usize,
}

impl ContextPool {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// take an idle context or construct a new one when the pool is empty.
    pub(crate) fn acquire(&self) -> PooledContext<'_> {
        let ctx = self.lock().pop().unwrap_or_default();
        PooledContext { ctx, pool: self }
    }

    fn release(&self, mut ctx: Context) {
        ctx.clear();
        let mut idle = self.lock();
        if idle.len() < self.capacity {
            idle.push(ctx);
        }
    }

    // a panic while holding the lock can not leave the free list in a broken state.
    fn lock(&self) -> MutexGuard<'_, Vec<Context>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub(crate) fn idle(&self) -> usize {
        self.lock().len()
    }
}

/// scoped ownership of a pooled [Context]. the context is cleared and handed back on drop.
pub(crate) struct PooledContext<'a> {
    ctx: Context,
    pool: &'a ContextPool,
}

impl Deref for PooledContext<'_> {
    type Target = Context;

    fn deref(&self) -> &Self::Target {
        &self.ctx
    }
}

impl DerefMut for PooledContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.ctx
    }
}

impl Drop for PooledContext<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.ctx));
    }
}

#[cfg(test)]
mod test {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use http::StatusCode;

    use super::*;

    #[test]
    fn reuse_cleared() {
        let pool = ContextPool::new(2);

        {
            let mut ctx = pool.acquire();
            ctx.set_var("user", 1u8);
            ctx.set_action("Show");
            ctx.render(StatusCode::IM_A_TEAPOT, "tea");
        }

        assert_eq!(pool.idle(), 1);

        let mut ctx = pool.acquire();
        assert_eq!(pool.idle(), 0);
        assert!(ctx.var::<u8>("user").is_none());
        assert_eq!(ctx.action(), "");
        assert_eq!(ctx.take_response().status(), StatusCode::OK);
    }

    #[test]
    fn bounded() {
        let pool = ContextPool::new(1);

        let a = pool.acquire();
        let b = pool.acquire();
        drop(a);
        drop(b);

        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn returned_on_panic() {
        let pool = ContextPool::new(4);

        let res = catch_unwind(AssertUnwindSafe(|| {
            let mut ctx = pool.acquire();
            ctx.set_var("leak", 1u8);
            panic!("handler panic");
        }));

        assert!(res.is_err());
        assert_eq!(pool.idle(), 1);
        assert!(pool.acquire().var::<u8>("leak").is_none());
    }
}
