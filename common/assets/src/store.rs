use std::{marker::PhantomData, sync::Arc};

use bevy::{
    asset::{
        AssetServer, Handle, LoadState, StrongHandle, UntypedHandle,
    },
    ecs::system::{Commands, Res, Resource},
    log::{error, trace},
    prelude::default,
    utils::HashMap,
};

/// When all [`StrongHandle`]s are dropped, an asset is unloaded.
///
/// We organize screen assets around the [`AssetStore`] where `T` is the
/// generic for a given screen.
/// Then, we can load all assets on screen load and drop them all on screen
/// exit.
#[derive(Resource)]
pub struct AssetStore<T> {
    assets: HashMap<&'static str, Arc<StrongHandle>>,

    _phantom: PhantomData<T>,
}

/// Implement this for your screen marking trait and use the
/// [`insert_as_resource`] and [`remove_as_resource`] systems.
pub trait AssetList {
    /// Paths relative to the assets folder.
    fn files() -> &'static [&'static str];
}

/// Inserts a resource that holds strong handles to the screen assets.
/// In another words, begins loading process for the assets and
/// it keeps them loaded.
pub fn insert_as_resource<T: AssetList + Send + Sync + 'static>(
    mut cmd: Commands,
    asset_server: Res<AssetServer>,
) {
    cmd.insert_resource(AssetStore::<T>::load_all(&asset_server));
}

/// Removes the asset store that holds strong handles to given assets.
/// Then they will be unloaded.
pub fn remove_as_resource<T: Send + Sync + 'static>(mut cmd: Commands) {
    cmd.remove_resource::<AssetStore<T>>();
}

impl<T: AssetList> AssetStore<T> {
    pub fn load_all(asset_server: &AssetServer) -> Self {
        let mut store = Self::new();

        for file in T::files() {
            match asset_server.load_untyped(*file) {
                Handle::Strong(h) => {
                    store.assets.insert(file, h);
                }
                Handle::Weak(_) => error!("Cannot append weak handle"),
            }
        }

        store
    }
}

impl<T> AssetStore<T> {
    pub fn new() -> Self {
        Self {
            assets: default(),
            _phantom: PhantomData,
        }
    }

    /// Every asset is either loaded or failed to load.
    ///
    /// A missing sound must not keep the screen from showing up, so failed
    /// assets are logged and count as settled.
    pub fn are_all_settled(&self, asset_server: &AssetServer) -> bool {
        self.assets.iter().all(|(path, h)| {
            let handle = UntypedHandle::Strong(Arc::clone(h));
            if asset_server.is_loaded_with_dependencies(&handle) {
                return true;
            }

            match asset_server.get_load_state(&handle) {
                Some(LoadState::Failed(_)) => {
                    trace!("Asset {path} failed to load");
                    true
                }
                _ => false,
            }
        })
    }
}

impl<T> Default for AssetStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
