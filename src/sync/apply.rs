use std::collections::HashSet;

use crate::{
    Res, info, success,
    sync::DestinationCatalog,
    types::{ApplyReport, DestPlaylist, PlaylistWork, WorkSet},
};

/// Per-request id ceilings of the destination API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchLimits {
    pub library: usize,
    pub playlist: usize,
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            library: 50,
            playlist: 100,
        }
    }
}

/// Replays a [`WorkSet`] against the destination account.
///
/// Library saves are naturally idempotent on the destination side; playlist
/// additions are made idempotent by diffing against the playlist's current
/// contents first.
pub struct SyncApplier<'d, D: DestinationCatalog + ?Sized> {
    destination: &'d mut D,
    limits: BatchLimits,
}

impl<'d, D: DestinationCatalog + ?Sized> SyncApplier<'d, D> {
    pub fn new(destination: &'d mut D) -> Self {
        Self::with_limits(destination, BatchLimits::default())
    }

    pub fn with_limits(destination: &'d mut D, limits: BatchLimits) -> Self {
        Self {
            destination,
            limits: BatchLimits {
                library: limits.library.max(1),
                playlist: limits.playlist.max(1),
            },
        }
    }

    pub async fn apply(&mut self, work: &WorkSet) -> Res<ApplyReport> {
        let mut report = ApplyReport::default();

        info!("Following {} artists", work.artists.len());
        for chunk in work.artists.chunks(self.limits.library) {
            self.destination.follow_artists(chunk).await?;
            report.artists_followed += chunk.len();
        }

        info!("Saving {} albums", work.albums.len());
        for chunk in work.albums.chunks(self.limits.library) {
            self.destination.save_albums(chunk).await?;
            report.albums_saved += chunk.len();
        }

        info!("Saving {} tracks", work.tracks.len());
        for chunk in work.tracks.chunks(self.limits.library) {
            self.destination.save_tracks(chunk).await?;
            report.tracks_saved += chunk.len();
        }

        if work.playlists.is_empty() {
            return Ok(report);
        }

        let mut existing = self.destination.own_playlists().await?;
        for playlist in &work.playlists {
            self.apply_playlist(playlist, &mut existing, &mut report)
                .await?;
        }

        Ok(report)
    }

    async fn apply_playlist(
        &mut self,
        playlist: &PlaylistWork,
        existing: &mut Vec<DestPlaylist>,
        report: &mut ApplyReport,
    ) -> Res<()> {
        let (target, created) = match existing.iter().find(|p| p.name == playlist.name) {
            Some(found) => {
                report.playlists_reused += 1;
                (found.clone(), false)
            }
            None => {
                let created = self
                    .destination
                    .create_playlist(&playlist.name, "", playlist.public)
                    .await?;
                success!("Playlist {} created", created.name);
                report.playlists_created += 1;
                existing.push(created.clone());
                (created, true)
            }
        };

        let mut present: HashSet<String> = if created {
            HashSet::new()
        } else {
            self.destination
                .playlist_track_uris(&target.id)
                .await?
                .into_iter()
                .collect()
        };

        let missing: Vec<String> = playlist
            .tracks
            .iter()
            .filter(|uri| present.insert((*uri).clone()))
            .cloned()
            .collect();
        report.playlist_tracks_skipped += playlist.tracks.len() - missing.len();

        info!(
            "Adding {} tracks to playlist {}",
            missing.len(),
            target.name
        );
        for chunk in missing.chunks(self.limits.playlist) {
            self.destination
                .add_playlist_tracks(&target.id, chunk)
                .await?;
            report.playlist_tracks_added += chunk.len();
        }

        Ok(())
    }
}
