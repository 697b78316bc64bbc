mod types;

pub use types::*;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sysinfo::Disks;

use crate::error::{Error, Result};
use crate::traits::{MetricProvider, ProviderKind};

/// Path whose filesystem is reported when none is configured
pub const DEFAULT_DISK_PATH: &str = "/";

/// Disk usage provider
///
/// Usage is reported for the filesystem holding `path`: the mounted disk with the
/// longest mount point that is a prefix of the path.
#[derive(Debug, Clone)]
pub struct Disk {
    path: PathBuf,
}

impl Disk {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for Disk {
    fn default() -> Self {
        Self::new(DEFAULT_DISK_PATH)
    }
}

/// Picks the mount point owning `path` among `mounts`
pub(crate) fn owning_mount<'a, I>(path: &Path, mounts: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Path>,
{
    mounts
        .into_iter()
        .enumerate()
        .filter(|(_, mount)| path.starts_with(mount))
        .max_by_key(|(_, mount)| mount.as_os_str().len())
        .map(|(index, _)| index)
}

#[async_trait]
impl MetricProvider for Disk {
    type Info = DiskInfo;
    type Usage = DiskUsage;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Disk
    }

    async fn get_info(&self) -> Result<DiskInfo> {
        tokio::task::spawn_blocking(|| {
            let disks = Disks::new_with_refreshed_list();
            let partitions = disks.list().iter().map(|disk| disk.name().to_string_lossy().into_owned()).collect();
            DiskInfo { partitions }
        })
        .await
        .map_err(|e| Error::provider_query(ProviderKind::Disk, format!("listing disks failed: {e}")))
    }

    /// Refreshes the mount list off the runtime threads; it stats every filesystem
    async fn get_usage(&self) -> Result<DiskUsage> {
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || {
            let disks = Disks::new_with_refreshed_list();
            let list = disks.list();

            let index = owning_mount(&path, list.iter().map(|disk| disk.mount_point())).ok_or_else(|| {
                Error::provider_unavailable(format!("no mounted filesystem holds {}", path.display()))
            })?;

            let disk = &list[index];
            Ok(DiskUsage::new(path, disk.total_space(), disk.available_space()))
        })
        .await
        .map_err(|e| Error::provider_query(ProviderKind::Disk, format!("disk query failed: {e}")))?
    }
}
