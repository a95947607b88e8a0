mod sled_meta_tree;

pub use sled_meta_tree::*;


use crate::constants::META_DB_DIR;
use crate::Error;
use crate::StorageConfig;

/// Opens the metadata database at `<db_root_dir>/inlay_meta`
#[doc(hidden)]
pub fn init_sled_meta_db(config: &StorageConfig) -> Result<sled::Db, Error> {
    tracing::debug!("init_sled_meta_db from path: {:?}", &config.db_root_dir);

    let meta_db_path = config.db_root_dir.join(META_DB_DIR);

    sled::Config::default()
        .path(&meta_db_path)
        .cache_capacity(config.cache_capacity_bytes)
        .flush_every_ms(config.flush_every_ms)
        .use_compression(config.use_compression)
        .compression_factor(1)
        .open()
        .map_err(|e| {
            tracing::warn!(
                "Try to open DB at this location: {:?} and failed: {:?}",
                meta_db_path,
                e
            );
            e.into()
        })
}
