use std::marker::PhantomData;

use bevy::{
    ecs::component::Component,
    math::Vec2,
    tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, Task},
};

use crate::scatter::{self, CancelToken, ScatterError, ScatterParams};

/// Placement running on the [`AsyncComputeTaskPool`].
///
/// The sampling never touches the world.
/// The owner polls it from a system with [`ScatterTask::poll`] and applies the
/// result there.
///
/// `M` tells apart tasks of different screens or shapes.
///
/// Dropping the task, e.g. by despawning the entity that holds it, cancels
/// the sampling loop.
#[derive(Component)]
pub struct ScatterTask<M> {
    task: Option<Task<Result<Vec<Vec2>, ScatterError>>>,
    cancel: CancelToken,
    _marker: PhantomData<fn() -> M>,
}

impl<M> ScatterTask<M> {
    /// Starts sampling in the background.
    ///
    /// The [`AsyncComputeTaskPool`] must be initialized, which is done by
    /// bevy's `TaskPoolPlugin`.
    pub fn spawn(params: ScatterParams) -> Self {
        let cancel = CancelToken::new();

        let task = {
            let cancel = cancel.clone();
            AsyncComputeTaskPool::get()
                .spawn(async move { scatter_on_this_thread(&params, &cancel) })
        };

        Self {
            task: Some(task),
            cancel,
            _marker: PhantomData,
        }
    }

    /// Returns [`None`] while the sampling runs and after the result has been
    /// taken.
    pub fn poll(&mut self) -> Option<Result<Vec<Vec2>, ScatterError>> {
        let task = self.task.as_mut()?;
        let result = block_on(future::poll_once(task))?;
        self.task = None;

        Some(result)
    }

    #[cfg(test)]
    pub(crate) fn is_done(&self) -> bool {
        self.task.is_none()
    }

    /// Another handle to the token that stops the sampling.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}

impl<M> Drop for ScatterTask<M> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn scatter_on_this_thread(
    params: &ScatterParams,
    cancel: &CancelToken,
) -> Result<Vec<Vec2>, ScatterError> {
    scatter::scatter(params, &mut rand::thread_rng(), cancel)
}
