//! Scene ownership and background mesh loading.
//!
//! Loads are futures polled by the frame driver between frames on the same
//! thread, so a mesh can only appear between two frames, never inside one.

use std::future::Future;
use std::ops::Range;
use std::task::{Context, Poll};

use futures::future::{FutureExt, LocalBoxFuture};
use futures::task::noop_waker_ref;
use tracing::{info, warn};

use crate::error::LoadError;
use crate::geometry::Mesh;

struct PendingLoad {
    label: String,
    task: LocalBoxFuture<'static, Result<Mesh, LoadError>>,
}

/// The set of meshes drawn each frame
#[derive(Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    pending: Vec<PendingLoad>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut [Mesh] {
        &mut self.meshes
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Queue a one-shot load. The mesh is appended by a later
    /// [`Scene::poll_loads`] once `load` resolves.
    pub fn spawn_load<F>(&mut self, label: impl Into<String>, load: F)
    where
        F: Future<Output = Result<Mesh, LoadError>> + 'static,
    {
        self.pending.push(PendingLoad {
            label: label.into(),
            task: load.boxed_local(),
        });
    }

    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }

    /// Poll every pending load once.
    ///
    /// Finished loads are removed: successes are appended to the scene,
    /// failures are logged and dropped without retry. Returns the indices
    /// of the meshes appended by this call.
    pub fn poll_loads(&mut self) -> Range<usize> {
        let start = self.meshes.len();
        let mut cx = Context::from_waker(noop_waker_ref());
        let meshes = &mut self.meshes;

        self.pending.retain_mut(|load| match load.task.poll_unpin(&mut cx) {
            Poll::Pending => true,
            Poll::Ready(Ok(mesh)) => {
                info!(label = %load.label, triangles = mesh.len(), "mesh loaded");
                meshes.push(mesh);
                false
            }
            Poll::Ready(Err(e)) => {
                warn!(label = %load.label, "mesh load failed: {}", e);
                false
            }
        });

        start..self.meshes.len()
    }
}
