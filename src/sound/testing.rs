// In-memory backend for unit tests
// Records every create/start/release so tests can check handle lifecycles
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::backend::{PlaybackHandle, SoundBackend, SoundSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Created(usize),
    Started(usize),
    Released(usize),
}

#[derive(Default)]
pub(crate) struct Journal {
    events: Mutex<Vec<Event>>,
    next_id: AtomicUsize,
    live: AtomicUsize,
    pub(crate) max_live: AtomicUsize,
}

impl Journal {
    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub(crate) fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    fn record(&self, event: Event) {
        self.events.lock().push(event);
    }
}

pub(crate) struct FakeHandle {
    id: usize,
    journal: Arc<Journal>,
    fail_start: bool,
    fail_release: bool,
}

impl PlaybackHandle for FakeHandle {
    fn start(&mut self) -> anyhow::Result<()> {
        if self.fail_start {
            anyhow::bail!("audio device went away");
        }
        self.journal.record(Event::Started(self.id));
        Ok(())
    }

    fn release(self) -> anyhow::Result<()> {
        self.journal.record(Event::Released(self.id));
        self.journal.live.fetch_sub(1, Ordering::SeqCst);
        if self.fail_release {
            anyhow::bail!("release failed");
        }
        Ok(())
    }
}

pub(crate) struct FakeBackend {
    pub(crate) journal: Arc<Journal>,
    pub(crate) has_default: bool,
    pub(crate) bundled: Vec<&'static str>,
    pub(crate) decline_create: bool,
    pub(crate) fail_start: bool,
    pub(crate) fail_release: bool,
    pub(crate) fail_resolve: bool,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self {
            journal: Arc::new(Journal::default()),
            has_default: true,
            bundled: vec!["ding"],
            decline_create: false,
            fail_start: false,
            fail_release: false,
            fail_resolve: false,
        }
    }
}

impl SoundBackend for FakeBackend {
    type Handle = FakeHandle;

    fn default_notification_source(&self) -> anyhow::Result<Option<SoundSource>> {
        if self.fail_resolve {
            anyhow::bail!("ringtone provider crashed");
        }
        Ok(self
            .has_default
            .then(|| SoundSource::default_notification("/sounds/notification.ogg")))
    }

    fn bundled_source(&self, name: &str) -> anyhow::Result<Option<SoundSource>> {
        Ok(self
            .bundled
            .contains(&name)
            .then(|| SoundSource::bundled(name, format!("/app/sounds/{}.wav", name))))
    }

    fn create_player(&self, _source: &SoundSource) -> anyhow::Result<Option<FakeHandle>> {
        if self.decline_create {
            return Ok(None);
        }
        let id = self.journal.next_id.fetch_add(1, Ordering::SeqCst);
        let live = self.journal.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.journal.max_live.fetch_max(live, Ordering::SeqCst);
        self.journal.record(Event::Created(id));
        Ok(Some(FakeHandle {
            id,
            journal: self.journal.clone(),
            fail_start: self.fail_start,
            fail_release: self.fail_release,
        }))
    }
}
