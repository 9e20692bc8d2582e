//! Single-slot slice playback.

use crate::{Error, Result, SliceTable};
use parking_lot::Mutex;
use snip_core::AudioBuffer;

/// Something that can start playing PCM.
pub trait PlaybackDevice: Send + Sync {
    type Handle: PlaybackHandle;

    /// Begin playing `pcm` immediately.
    fn start(&self, pcm: &AudioBuffer) -> Result<Self::Handle>;
}

/// A playback in progress.
pub trait PlaybackHandle: Send {
    /// Stop playing and release the playback.
    fn stop(self);

    /// Whether audio is still being produced.
    fn is_playing(&self) -> bool {
        true
    }
}

struct ActivePlayback<H> {
    index: usize,
    handle: H,
}

/// Plays one slice at a time.
///
/// Starting a slice stops whatever is currently playing first. `play` and
/// `stop` hold one lock for their whole duration, so concurrent callers see
/// at most one active playback at any instant.
///
/// # Example
/// ```ignore
/// let player = PlaybackController::new(CpalDevice::default());
/// player.play(&table, 0)?;
/// // ... later
/// player.stop();
/// ```
pub struct PlaybackController<D: PlaybackDevice> {
    device: D,
    active: Mutex<Option<ActivePlayback<D::Handle>>>,
}

impl<D: PlaybackDevice> PlaybackController<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            active: Mutex::new(None),
        }
    }

    /// Play slice `index` of `table`, preempting any current playback.
    ///
    /// An invalid index is rejected before the current playback is touched.
    /// If the device refuses the PCM, nothing is left playing.
    pub fn play(&self, table: &SliceTable, index: usize) -> Result<()> {
        table.slice(index)?;

        let mut active = self.active.lock();
        if let Some(previous) = active.take() {
            tracing::debug!(index = previous.index, "stopping previous playback");
            previous.handle.stop();
        }

        let pcm = table.derive_playback_audio(index)?;
        match self.device.start(&pcm) {
            Ok(handle) => {
                tracing::debug!(index, frames = pcm.frames(), "started playback");
                *active = Some(ActivePlayback { index, handle });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(index, "playback failed: {e}");
                Err(Error::PlaybackFailed(e.to_string()))
            }
        }
    }

    /// Stop current playback. No-op when nothing is playing.
    pub fn stop(&self) {
        if let Some(previous) = self.active.lock().take() {
            tracing::debug!(index = previous.index, "stopped playback");
            previous.handle.stop();
        }
    }

    /// Check if a slice is currently producing audio.
    pub fn is_playing(&self) -> bool {
        self.active
            .lock()
            .as_ref()
            .is_some_and(|a| a.handle.is_playing())
    }

    /// Index of the slice holding the playback slot, finished or not.
    pub fn current_slice(&self) -> Option<usize> {
        self.active.lock().as_ref().map(|a| a.index)
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Start { id: usize, frames: usize },
        Stop { id: usize },
    }

    #[derive(Default, Clone)]
    struct RecordingDevice {
        events: Arc<Mutex<Vec<Event>>>,
        next_id: Arc<Mutex<usize>>,
        reject: bool,
    }

    struct RecordingHandle {
        id: usize,
        events: Arc<Mutex<Vec<Event>>>,
    }

    impl PlaybackDevice for RecordingDevice {
        type Handle = RecordingHandle;

        fn start(&self, pcm: &AudioBuffer) -> Result<RecordingHandle> {
            if self.reject {
                return Err(Error::EmptyBuffer);
            }
            let mut next = self.next_id.lock();
            let id = *next;
            *next += 1;
            self.events.lock().push(Event::Start {
                id,
                frames: pcm.frames(),
            });
            Ok(RecordingHandle {
                id,
                events: Arc::clone(&self.events),
            })
        }
    }

    impl PlaybackHandle for RecordingHandle {
        fn stop(self) {
            self.events.lock().push(Event::Stop { id: self.id });
        }
    }

    fn table() -> SliceTable {
        let buffer = AudioBuffer::silence(1, 1000, 4000).unwrap();
        SliceTable::new(buffer, 4).unwrap()
    }

    #[test]
    fn test_second_play_stops_first() {
        let device = RecordingDevice::default();
        let player = PlaybackController::new(device.clone());
        let table = table();

        player.play(&table, 0).unwrap();
        player.play(&table, 1).unwrap();

        assert_eq!(
            *device.events.lock(),
            vec![
                Event::Start { id: 0, frames: 1000 },
                Event::Stop { id: 0 },
                Event::Start { id: 1, frames: 1000 },
            ]
        );
        assert_eq!(player.current_slice(), Some(1));
        assert!(player.is_playing());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let device = RecordingDevice::default();
        let player = PlaybackController::new(device.clone());

        player.stop();
        player.play(&table(), 2).unwrap();
        player.stop();
        player.stop();

        assert_eq!(
            *device.events.lock(),
            vec![Event::Start { id: 0, frames: 1000 }, Event::Stop { id: 0 }]
        );
        assert!(!player.is_playing());
        assert_eq!(player.current_slice(), None);
    }

    #[test]
    fn test_invalid_index_keeps_current_playback() {
        let device = RecordingDevice::default();
        let player = PlaybackController::new(device.clone());
        let table = table();

        player.play(&table, 0).unwrap();
        assert!(matches!(
            player.play(&table, 4),
            Err(Error::IndexOutOfRange { index: 4, len: 4 })
        ));

        assert_eq!(device.events.lock().len(), 1);
        assert_eq!(player.current_slice(), Some(0));
    }

    #[test]
    fn test_device_failure_clears_slot() {
        let device = RecordingDevice {
            reject: true,
            ..Default::default()
        };
        let player = PlaybackController::new(device);

        let err = player.play(&table(), 0).unwrap_err();
        assert!(matches!(err, Error::PlaybackFailed(_)));
        assert!(!player.is_playing());
        assert_eq!(player.current_slice(), None);
    }

    #[test]
    fn test_concurrent_play_keeps_one_handle() {
        let device = RecordingDevice::default();
        let player = Arc::new(PlaybackController::new(device.clone()));
        let table = Arc::new(table());

        let threads: Vec<_> = (0..8)
            .map(|t| {
                let player = Arc::clone(&player);
                let table = Arc::clone(&table);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        player.play(&table, (t + i) % 4).unwrap();
                        if i % 7 == 0 {
                            player.stop();
                        }
                    }
                })
            })
            .collect();
        for thread in threads {
            thread.join().unwrap();
        }
        player.stop();

        // Replay the log: never more than one live handle, each stopped exactly once
        let mut live: Option<usize> = None;
        for event in device.events.lock().iter() {
            match *event {
                Event::Start { id, .. } => {
                    assert!(live.is_none(), "start {id} while {live:?} still playing");
                    live = Some(id);
                }
                Event::Stop { id } => {
                    assert_eq!(live, Some(id));
                    live = None;
                }
            }
        }
        assert!(live.is_none());
    }
}
